//! Application wiring and shared resources

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::{prelude::MeshPickingPlugin, DefaultPickingPlugins};
use galleon_core::view::DEFAULT_ZOOM_BASE;
use galleon_core::{Highlight, InteractionState, PartCatalog, PartId, PartRegistry};
use std::collections::HashMap;

use crate::disassembly::DisassemblyPlugin;
use crate::interaction::InteractionPlugin;
use crate::model::ModelPlugin;
use crate::scene::ScenePlugin;
use crate::ui::UiPlugin;

/// Startup configuration captured from the command line
#[derive(Resource, Debug, Clone)]
pub struct ViewerConfig {
    /// Asset path of the model to load
    pub model_path: String,
}

/// Part catalog loaded before the app starts
#[derive(Resource)]
pub struct Catalog(pub PartCatalog);

/// Hover/selection state plus highlight changes not yet applied to materials
#[derive(Resource, Default)]
pub struct Interaction {
    pub state: InteractionState,
    pub pending: Vec<(PartId, Highlight)>,
}

/// Registry of the loaded model's parts and their mesh entities.
/// Rebuilt whenever a model finishes loading.
#[derive(Resource, Default)]
pub struct ShipRegistry {
    pub parts: PartRegistry,
    pub entities: HashMap<PartId, Entity>,
}

impl ShipRegistry {
    pub fn entity_of(&self, id: &PartId) -> Option<Entity> {
        self.entities.get(id).copied()
    }

    pub fn clear(&mut self) {
        self.parts.clear();
        self.entities.clear();
    }
}

/// Orbit camera state. `target_*` fields are goals that the camera eases
/// toward each frame for smooth motion.
#[derive(Resource, Debug)]
pub struct CameraSettings {
    /// Horizontal angle around the Y axis (radians)
    pub azimuth: f32,
    /// Vertical angle above the horizon (radians)
    pub elevation: f32,
    /// Current orbit distance
    pub distance: f32,
    /// Orbit distance being eased toward
    pub target_distance: f32,
    /// Current look-at point
    pub target: Vec3,
    /// Look-at point being eased toward
    pub target_focus: Vec3,
    /// Mouse drag sensitivity
    pub sensitivity: f32,
    /// Scroll wheel zoom speed
    pub zoom_speed: f32,
    /// Exponential smoothing factor for distance/target easing
    pub smooth_factor: f32,
    /// Zoom slider value; orbit distance follows base / factor
    pub zoom_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            azimuth: 0.6,
            elevation: 0.4,
            distance: DEFAULT_ZOOM_BASE,
            target_distance: DEFAULT_ZOOM_BASE,
            target: Vec3::ZERO,
            target_focus: Vec3::ZERO,
            sensitivity: 0.005,
            zoom_speed: 1.0,
            smooth_factor: 0.1,
            zoom_factor: 1.0,
        }
    }
}

/// Whether the model is currently dispersed into the exploded layout.
/// Toggled by the UI; the disassembly systems react to the change.
#[derive(Resource, Default)]
pub struct DisassemblyState {
    pub exploded: bool,
}

/// One-shot camera framing request
#[derive(Resource, Default)]
pub struct FocusRequest(pub Option<FocusTarget>);

#[derive(Debug, Clone)]
pub enum FocusTarget {
    /// Frame a single part's bounds
    Part(PartId),
    /// Frame the whole model's bounds
    Model,
}

/// Panel visibility state
#[derive(Resource)]
pub struct UiState {
    pub show_parts_panel: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_parts_panel: true,
        }
    }
}

/// Run the Bevy application
pub fn run(config: ViewerConfig, catalog: PartCatalog) {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.94, 0.94, 0.94))) // Light gray background
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Galleon Ship Viewer".to_string(),
                ..default()
            }),
            ..default()
        }))
        // DefaultPickingPlugins provides core picking (PointerInputPlugin, PickingPlugin, InteractionPlugin)
        // MeshPickingPlugin must be added separately for 3D mesh raycasting
        // These must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .insert_resource(config)
        .insert_resource(Catalog(catalog))
        .init_resource::<Interaction>()
        .init_resource::<ShipRegistry>()
        .init_resource::<CameraSettings>()
        .init_resource::<DisassemblyState>()
        .init_resource::<FocusRequest>()
        .init_resource::<UiState>()
        .add_plugins(ScenePlugin)
        .add_plugins(ModelPlugin)
        .add_plugins(InteractionPlugin)
        .add_plugins(DisassemblyPlugin)
        .add_plugins(UiPlugin)
        .run();
}
