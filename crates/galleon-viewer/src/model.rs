//! Model loading and part registry construction
//!
//! The model goes through a small lifecycle: the glTF asset is requested at
//! startup, polled until loaded, its default scene spawned, and finally the
//! spawned hierarchy is walked to register every named mesh node as a part.

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use galleon_core::PartId;

use crate::app::{
    Catalog, DisassemblyState, FocusRequest, FocusTarget, Interaction, ShipRegistry, ViewerConfig,
};

/// A pickable part of the loaded model, attached to its mesh entity
#[derive(Component, Debug)]
pub struct ScenePart {
    pub id: PartId,
    /// Material assigned by the asset, restored when highlights clear
    pub original_material: Handle<StandardMaterial>,
    /// Local translation before the first disassembly, captured lazily
    pub home: Option<Vec3>,
}

/// Root entity of the spawned model scene
#[derive(Component)]
pub struct ModelRoot;

/// Lifecycle of the current model load
#[derive(Resource, Debug)]
pub struct ModelSession {
    pub path: String,
    pub phase: LoadPhase,
}

#[derive(Debug)]
pub enum LoadPhase {
    /// Asset requested, waiting on the loader
    Loading(Handle<Gltf>),
    /// Scene spawned, waiting for the hierarchy to appear
    Spawned(Entity),
    /// Registry built, viewer fully interactive
    Ready(Entity),
    /// Load failed; the message is shown in the UI
    Failed(String),
}

impl ModelSession {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading(_) | LoadPhase::Spawned(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, begin_load)
            .add_systems(Update, (poll_load, build_registry).chain());
    }
}

/// Request the model asset
fn begin_load(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    asset_server: Res<AssetServer>,
) {
    tracing::info!(path = %config.model_path, "Loading model");
    let handle: Handle<Gltf> = asset_server.load(config.model_path.clone());
    commands.insert_resource(ModelSession {
        path: config.model_path.clone(),
        phase: LoadPhase::Loading(handle),
    });
}

/// Check loading state and spawn the default scene once the glTF is ready
fn poll_load(
    mut commands: Commands,
    mut session: ResMut<ModelSession>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
) {
    let handle = match &session.phase {
        LoadPhase::Loading(handle) => handle.clone(),
        _ => return,
    };

    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => {
            let Some(gltf) = gltf_assets.get(&handle) else {
                return;
            };
            // Use the default scene, falling back to the first
            let scene = gltf
                .default_scene
                .clone()
                .or_else(|| gltf.scenes.first().cloned());
            match scene {
                Some(scene) => {
                    tracing::info!(path = %session.path, "Model loaded");
                    let root = commands
                        .spawn((
                            SceneRoot(scene),
                            Transform::default(),
                            Visibility::default(),
                            ModelRoot,
                        ))
                        .id();
                    session.phase = LoadPhase::Spawned(root);
                }
                None => {
                    tracing::error!(path = %session.path, "Model contains no scenes");
                    session.phase = LoadPhase::Failed(format!(
                        "Model {} contains no scenes",
                        session.path
                    ));
                }
            }
        }
        Some(LoadState::Failed(err)) => {
            tracing::error!(path = %session.path, error = %err, "Failed to load model");
            session.phase = LoadPhase::Failed(format!("Failed to load {}: {}", session.path, err));
        }
        _ => {
            // Still loading
        }
    }
}

/// Walk the spawned hierarchy and register every named mesh node as a part.
/// Scene instances spawn atomically, so the first frame where meshes exist
/// under the root has the full hierarchy.
fn build_registry(
    mut commands: Commands,
    mut session: ResMut<ModelSession>,
    catalog: Res<Catalog>,
    mut registry: ResMut<ShipRegistry>,
    mut interaction: ResMut<Interaction>,
    mut disassembly: ResMut<DisassemblyState>,
    mut focus: ResMut<FocusRequest>,
    children_query: Query<&Children>,
    name_query: Query<&Name>,
    mesh_query: Query<&MeshMaterial3d<StandardMaterial>, With<Mesh3d>>,
) {
    let root = match &session.phase {
        LoadPhase::Spawned(root) => *root,
        _ => return,
    };

    let mut found: Vec<(String, Entity)> = Vec::new();
    collect_named_meshes(root, &children_query, &name_query, &mesh_query, &mut found);
    if found.is_empty() {
        // Hierarchy not instantiated yet
        return;
    }

    registry.clear();
    interaction.state.reset();
    interaction.pending.clear();
    // Written conditionally so change detection doesn't start spurious motions
    if disassembly.exploded {
        disassembly.exploded = false;
    }

    for (name, mesh_entity) in found {
        let descriptor = catalog.0.lookup(&name).cloned();
        if descriptor.is_none() {
            tracing::debug!(node = %name, "No catalog entry for scene node");
        }
        let id = registry.parts.insert(&name, descriptor);

        let Ok(material) = mesh_query.get(mesh_entity) else {
            continue;
        };
        commands.entity(mesh_entity).insert(ScenePart {
            id: id.clone(),
            original_material: material.0.clone(),
            home: None,
        });
        registry.entities.insert(id, mesh_entity);
    }

    tracing::info!(parts = registry.parts.len(), "Part registry built");
    session.phase = LoadPhase::Ready(root);

    // Frame the whole model now that its bounds exist
    focus.0 = Some(FocusTarget::Model);
}

/// Depth-first walk collecting (node name, mesh entity) pairs in traversal
/// order. The glTF loader spawns mesh primitives as children of their node
/// entity, so a part is a named node with at least one direct mesh child.
fn collect_named_meshes(
    entity: Entity,
    children_query: &Query<&Children>,
    name_query: &Query<&Name>,
    mesh_query: &Query<&MeshMaterial3d<StandardMaterial>, With<Mesh3d>>,
    out: &mut Vec<(String, Entity)>,
) {
    if let Ok(name) = name_query.get(entity) {
        if let Some(mesh_entity) = direct_mesh_child(entity, children_query, mesh_query) {
            out.push((name.to_string(), mesh_entity));
            // The primitive children belong to this part
            return;
        }
    }
    if let Ok(children) = children_query.get(entity) {
        for child in children.iter() {
            collect_named_meshes(child, children_query, name_query, mesh_query, out);
        }
    }
}

/// First direct child carrying a mesh with a standard material
fn direct_mesh_child(
    parent: Entity,
    children_query: &Query<&Children>,
    mesh_query: &Query<&MeshMaterial3d<StandardMaterial>, With<Mesh3d>>,
) -> Option<Entity> {
    let children = children_query.get(parent).ok()?;
    children.iter().find(|child| mesh_query.contains(*child))
}
