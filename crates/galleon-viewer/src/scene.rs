//! Camera, lighting, and framing
//!
//! The orbit camera follows spherical coordinates around a focus point with
//! exponential easing on distance and focus so zoom and framing feel smooth.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::camera::primitives::Aabb;
use bevy::render::renderer::RenderAdapterInfo;
use bevy_egui::EguiContexts;
use galleon_core::view::{fit_distance, DEFAULT_ZOOM_BASE, MODEL_FOCUS_MARGIN, PART_FOCUS_MARGIN};

use crate::app::{CameraSettings, FocusRequest, FocusTarget, Interaction, ShipRegistry};
use crate::model::ScenePart;

/// Marker for the orbit camera
#[derive(Component)]
pub struct MainCamera;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (check_graphics_adapter, setup_scene))
            .add_systems(
                Update,
                ((apply_focus_requests, update_camera).chain(), handle_deselection),
            );
    }
}

/// Log which adapter we ended up on. There is no degraded mode; a missing
/// adapter just gets a warning before the renderer fails on its own terms.
fn check_graphics_adapter(adapter: Option<Res<RenderAdapterInfo>>) {
    match adapter {
        Some(info) => {
            tracing::info!(adapter = %info.name, backend = ?info.backend, "Graphics adapter");
        }
        None => {
            tracing::warn!("No graphics adapter info; GPU rendering may be unavailable");
        }
    }
}

fn setup_scene(mut commands: Commands, settings: Res<CameraSettings>) {
    // Orbit camera; its transform is recomputed every frame from the settings
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: std::f32::consts::FRAC_PI_4,
            ..default()
        }),
        Transform::from_xyz(0.0, settings.distance * 0.4, settings.distance)
            .looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 5000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill light from the opposite side so shadowed hull faces stay readable
    commands.spawn((
        PointLight {
            intensity: 500_000.0,
            range: 60.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-8.0, 6.0, -8.0),
    ));
}

fn update_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut contexts: EguiContexts,
) {
    // Don't fight the UI for the pointer
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let delta = mouse_motion.delta;

    // Orbit with left mouse drag
    if mouse_button.pressed(MouseButton::Left) && !egui_wants_pointer {
        settings.azimuth -= delta.x * settings.sensitivity;
        settings.elevation =
            (settings.elevation + delta.y * settings.sensitivity).clamp(-1.5, 1.5);
    }

    // Pan with right mouse drag (screen-space right and up)
    if mouse_button.pressed(MouseButton::Right) && !egui_wants_pointer {
        let right = Vec3::new(settings.azimuth.cos(), 0.0, -settings.azimuth.sin());
        let pan_speed = settings.distance * 0.002;
        let pan = right * -delta.x * pan_speed + Vec3::Y * delta.y * pan_speed;
        settings.target_focus += pan;
    }

    // Zoom with scroll, keeping the slider's factor in sync
    let scroll = mouse_scroll.delta.y;
    if scroll != 0.0 && !egui_wants_pointer {
        let zoom = 1.0 - scroll * settings.zoom_speed * 0.1;
        settings.target_distance = (settings.target_distance * zoom).clamp(1.0, 100.0);
        settings.zoom_factor = DEFAULT_ZOOM_BASE / settings.target_distance;
    }

    // Smooth interpolation for zoom and focus
    let dt = time.delta_secs();
    let lerp_factor = 1.0 - (-settings.smooth_factor * 60.0 * dt).exp();
    settings.distance += (settings.target_distance - settings.distance) * lerp_factor;
    settings.target = settings.target + (settings.target_focus - settings.target) * lerp_factor;

    // Spherical coordinates with Y up
    if let Ok(mut transform) = camera_query.single_mut() {
        let x = settings.distance * settings.elevation.cos() * settings.azimuth.sin();
        let y = settings.distance * settings.elevation.sin();
        let z = settings.distance * settings.elevation.cos() * settings.azimuth.cos();

        transform.translation = settings.target + Vec3::new(x, y, z);
        transform.look_at(settings.target, Vec3::Y);
    }
}

/// Resolve pending framing requests into camera focus and distance goals
fn apply_focus_requests(
    mut request: ResMut<FocusRequest>,
    mut settings: ResMut<CameraSettings>,
    registry: Res<ShipRegistry>,
    camera_query: Query<&Projection, With<MainCamera>>,
    part_query: Query<(&GlobalTransform, &Aabb), With<ScenePart>>,
) {
    let Some(target) = request.0.take() else {
        return;
    };

    let fov = match camera_query.single() {
        Ok(Projection::Perspective(perspective)) => perspective.fov,
        _ => std::f32::consts::FRAC_PI_4,
    };

    let framed = match target {
        FocusTarget::Part(id) => registry
            .entity_of(&id)
            .and_then(|entity| part_query.get(entity).ok())
            .map(|(global, aabb)| (world_bounds(global, aabb), PART_FOCUS_MARGIN)),
        FocusTarget::Model => {
            let mut bounds: Option<(Vec3, Vec3)> = None;
            for (global, aabb) in part_query.iter() {
                let (min, max) = world_bounds(global, aabb);
                bounds = Some(match bounds {
                    Some((bmin, bmax)) => (bmin.min(min), bmax.max(max)),
                    None => (min, max),
                });
            }
            bounds.map(|b| (b, MODEL_FOCUS_MARGIN))
        }
    };

    let Some(((min, max), margin)) = framed else {
        return;
    };

    let center = (min + max) * 0.5;
    let extent = (max - min).max_element().max(f32::EPSILON);

    settings.target_focus = center;
    settings.target_distance = fit_distance(extent, fov, margin);
    settings.zoom_factor = DEFAULT_ZOOM_BASE / settings.target_distance.max(f32::EPSILON);
}

/// World-space bounding box of a mesh's local AABB
fn world_bounds(global: &GlobalTransform, aabb: &Aabb) -> (Vec3, Vec3) {
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);

    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for corner in [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
    ] {
        let world = global.transform_point(center + half * corner);
        min = min.min(world);
        max = max.max(world);
    }
    (min, max)
}

/// Escape clears the current selection
fn handle_deselection(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut interaction: ResMut<Interaction>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        let changes = interaction.state.select(None);
        interaction.pending.extend(changes);
    }
}
