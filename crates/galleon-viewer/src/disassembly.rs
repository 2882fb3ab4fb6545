//! Exploded-view animation
//!
//! Toggling [`DisassemblyState`] starts a [`PartMotion`] on every part: out
//! to its layered position above the hull, or back home. Each part has a
//! single motion slot; re-toggling mid-flight replaces the in-flight motion
//! with one starting from the part's current position, so the animation
//! reverses smoothly instead of snapping.

use bevy::prelude::*;
use galleon_core::explode::{explode_target, lerp3, progress, DEFAULT_EXPLODE_STEP, DEFAULT_MOTION_SECS};

use crate::app::{DisassemblyState, ShipRegistry};
use crate::model::ScenePart;

/// In-flight motion of a single part. Inserting a new one replaces any
/// motion already running for that part.
#[derive(Component, Debug)]
pub struct PartMotion {
    pub from: Vec3,
    pub to: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

pub struct DisassemblyPlugin;

impl Plugin for DisassemblyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (start_motions, animate_parts).chain());
    }
}

/// React to a disassembly toggle by starting a motion on every part
fn start_motions(
    mut commands: Commands,
    disassembly: Res<DisassemblyState>,
    registry: Res<ShipRegistry>,
    mut part_query: Query<(&mut ScenePart, &Transform)>,
) {
    if !disassembly.is_changed() || disassembly.is_added() {
        return;
    }

    for part in registry.parts.iter() {
        let Some(entity) = registry.entity_of(&part.id) else {
            continue;
        };
        let Ok((mut scene_part, transform)) = part_query.get_mut(entity) else {
            continue;
        };

        // The rest position is captured the first time the part moves
        let home = *scene_part.home.get_or_insert(transform.translation);

        let to = if disassembly.exploded {
            Vec3::from(explode_target(
                home.to_array(),
                part.ordinal,
                DEFAULT_EXPLODE_STEP,
            ))
        } else {
            home
        };

        commands.entity(entity).insert(PartMotion {
            from: transform.translation,
            to,
            elapsed: 0.0,
            duration: DEFAULT_MOTION_SECS,
        });
    }

    tracing::debug!(
        exploded = disassembly.exploded,
        parts = registry.parts.len(),
        "Disassembly toggled"
    );
}

/// Advance every in-flight motion, removing it on arrival
fn animate_parts(
    mut commands: Commands,
    time: Res<Time>,
    mut motions: Query<(Entity, &mut Transform, &mut PartMotion)>,
) {
    for (entity, mut transform, mut motion) in motions.iter_mut() {
        motion.elapsed += time.delta_secs();
        let t = progress(motion.elapsed, motion.duration);
        transform.translation = Vec3::from(lerp3(motion.from.to_array(), motion.to.to_array(), t));

        if t >= 1.0 {
            commands.entity(entity).remove::<PartMotion>();
        }
    }
}
