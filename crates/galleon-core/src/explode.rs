//! Disassembly dispersal math
//!
//! When the model is disassembled, every part rises along +Y from its home
//! position by an offset proportional to its registry ordinal, so parts fan
//! out into distinct layers instead of overlapping.

/// Vertical spacing between consecutive dispersed parts, in scene units
pub const DEFAULT_EXPLODE_STEP: f32 = 2.0;

/// Duration of the per-part dispersal/return animation
pub const DEFAULT_MOTION_SECS: f32 = 1.0;

/// Vertical offset for the part with the given registry ordinal.
/// The first part (ordinal 0) already moves one full step.
pub fn explode_offset(ordinal: usize, step: f32) -> f32 {
    (ordinal as f32 + 1.0) * step
}

/// Dispersed target position for a part: its home position lifted along +Y
pub fn explode_target(home: [f32; 3], ordinal: usize, step: f32) -> [f32; 3] {
    [home[0], home[1] + explode_offset(ordinal, step), home[2]]
}

/// Normalized animation progress for `elapsed` seconds of a motion lasting
/// `duration` seconds, clamped to [0, 1]. A non-positive duration completes
/// immediately.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Linear interpolation between two positions at progress `t`
pub fn lerp3(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_grow_with_ordinal() {
        assert_eq!(explode_offset(0, DEFAULT_EXPLODE_STEP), 2.0);
        assert_eq!(explode_offset(1, DEFAULT_EXPLODE_STEP), 4.0);
        assert_eq!(explode_offset(9, DEFAULT_EXPLODE_STEP), 20.0);
    }

    #[test]
    fn test_target_lifts_along_y_only() {
        let home = [1.5, -0.5, 3.0];
        let target = explode_target(home, 2, DEFAULT_EXPLODE_STEP);
        assert_eq!(target, [1.5, 5.5, 3.0]);
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(-0.1, 1.0), 0.0);
        assert_eq!(progress(0.5, 1.0), 0.5);
        assert_eq!(progress(2.0, 1.0), 1.0);
        // Degenerate duration snaps to the end state
        assert_eq!(progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let from = [0.0, 2.0, -4.0];
        let to = [8.0, 2.0, 4.0];
        assert_eq!(lerp3(from, to, 0.0), from);
        assert_eq!(lerp3(from, to, 1.0), to);
        assert_eq!(lerp3(from, to, 0.5), [4.0, 2.0, 0.0]);
    }

    #[test]
    fn test_reassembly_round_trip() {
        let home = [2.0, 0.25, -1.0];
        let out = explode_target(home, 3, DEFAULT_EXPLODE_STEP);
        // Animating back at full progress lands exactly on home
        assert_eq!(lerp3(out, home, progress(1.0, DEFAULT_MOTION_SECS)), home);
    }
}
