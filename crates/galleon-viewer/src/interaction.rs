//! Pointer picking and part highlighting
//!
//! Hover and click are resolved by raycasting the cursor against part meshes.
//! Highlights are applied by swapping material handles: every part keeps its
//! original handle in [`ScenePart`], so clearing a highlight is an exact
//! restore rather than a color reconstruction.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use galleon_core::view::ROTATE_NUDGE_RADIANS;
use galleon_core::{Highlight, PartId};

use crate::app::{Interaction, ShipRegistry};
use crate::model::ScenePart;
use crate::scene::MainCamera;

/// Shared hover/selection materials, created once at startup
#[derive(Resource)]
pub struct HighlightMaterials {
    pub hovered: Handle<StandardMaterial>,
    pub selected: Handle<StandardMaterial>,
}

/// Rotation nudges queued by the toolbar, applied to the active part
#[derive(Resource, Default)]
pub struct PendingRotations(pub Vec<(Vec3, f32)>);

impl PendingRotations {
    pub fn push_nudge(&mut self, axis: Vec3, sign: f32) {
        self.0.push((axis, sign * ROTATE_NUDGE_RADIANS));
    }
}

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingRotations>()
            .add_systems(Startup, setup_highlight_materials)
            .add_systems(
                Update,
                (
                    (update_hover, handle_click, apply_highlights).chain(),
                    apply_rotation_nudges,
                ),
            );
    }
}

fn setup_highlight_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Red for hover, green for selection, both with a matching emissive glow
    // so highlighted parts read clearly even in shadow
    let hovered = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 0.0),
        emissive: bevy::color::LinearRgba::new(0.33, 0.0, 0.0, 1.0),
        ..default()
    });
    let selected = materials.add(StandardMaterial {
        base_color: Color::srgb(0.0, 1.0, 0.0),
        emissive: bevy::color::LinearRgba::new(0.0, 0.33, 0.0, 1.0),
        ..default()
    });
    commands.insert_resource(HighlightMaterials { hovered, selected });
}

/// Raycast the cursor against part meshes and feed the nearest hit into the
/// interaction state
fn update_hover(
    mut ray_cast: MeshRayCast,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    part_query: Query<&ScenePart>,
    mut interaction: ResMut<Interaction>,
    mut contexts: EguiContexts,
) {
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let mut hit: Option<PartId> = None;
    if !egui_wants_pointer {
        if let (Ok(window), Ok((camera, camera_transform))) =
            (windows.single(), camera_query.single())
        {
            if let Some(cursor) = window.cursor_position() {
                if let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) {
                    let filter = |entity: Entity| part_query.contains(entity);
                    let settings = MeshRayCastSettings::default().with_filter(&filter);
                    if let Some((entity, _)) = ray_cast.cast_ray(ray, &settings).first() {
                        hit = part_query.get(*entity).ok().map(|part| part.id.clone());
                    }
                }
            }
        }
    }

    let changes = interaction.state.pointer_over(hit);
    interaction.pending.extend(changes);
}

/// Left click selects the hovered part
fn handle_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut interaction: ResMut<Interaction>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);
    if egui_wants_pointer {
        return;
    }

    let changes = interaction.state.click();
    interaction.pending.extend(changes);
}

/// Swap material handles for every pending highlight change
fn apply_highlights(
    mut interaction: ResMut<Interaction>,
    highlight: Res<HighlightMaterials>,
    registry: Res<ShipRegistry>,
    mut part_query: Query<(&ScenePart, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    if interaction.pending.is_empty() {
        return;
    }

    let pending = std::mem::take(&mut interaction.pending);
    for (id, state) in pending {
        let Some(entity) = registry.entity_of(&id) else {
            continue;
        };
        let Ok((part, mut material)) = part_query.get_mut(entity) else {
            continue;
        };
        material.0 = match state {
            Highlight::None => part.original_material.clone(),
            Highlight::Hovered => highlight.hovered.clone(),
            Highlight::Selected => highlight.selected.clone(),
        };
    }
}

/// Apply queued toolbar rotations to the selected (or hovered) part.
/// Nudges queued with no active part are dropped.
fn apply_rotation_nudges(
    mut pending: ResMut<PendingRotations>,
    interaction: Res<Interaction>,
    registry: Res<ShipRegistry>,
    mut transforms: Query<&mut Transform, With<ScenePart>>,
) {
    if pending.0.is_empty() {
        return;
    }
    let nudges = std::mem::take(&mut pending.0);

    let Some(id) = interaction.state.active() else {
        return;
    };
    let Some(entity) = registry.entity_of(id) else {
        return;
    };
    let Ok(mut transform) = transforms.get_mut(entity) else {
        return;
    };

    for (axis, angle) in nudges {
        // Rotate in the part's local frame
        transform.rotation *= Quat::from_axis_angle(axis, angle);
    }
}
