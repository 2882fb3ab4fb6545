//! Camera distance math
//!
//! Pure helpers for the orbit camera: slider-driven zoom and fit-to-view
//! distances. The viewer applies these to its camera transform every frame.

/// Numerator of the zoom mapping: orbit distance is `base / factor`,
/// so factor 1.0 puts the camera 15 units out and larger factors move in.
pub const DEFAULT_ZOOM_BASE: f32 = 15.0;

/// Extra margin when framing a single part
pub const PART_FOCUS_MARGIN: f32 = 1.5;

/// Extra margin when framing the whole model
pub const MODEL_FOCUS_MARGIN: f32 = 2.5;

/// Rotation applied to the active part per nudge button press, radians
pub const ROTATE_NUDGE_RADIANS: f32 = 0.1;

/// Orbit distance for a zoom slider factor. Non-positive factors are
/// treated as 1.0 rather than producing an infinite or negative distance.
pub fn zoom_distance(base: f32, factor: f32) -> f32 {
    if factor <= 0.0 {
        return base;
    }
    base / factor
}

/// Camera distance that frames a bounding volume of the given maximum
/// extent within a vertical field of view of `fov_radians`, with headroom
/// controlled by `margin`.
pub fn fit_distance(max_extent: f32, fov_radians: f32, margin: f32) -> f32 {
    (max_extent / 2.0) / (fov_radians / 2.0).tan() * margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_zoom_is_inverse_of_factor() {
        assert_eq!(zoom_distance(DEFAULT_ZOOM_BASE, 1.0), 15.0);
        assert_eq!(zoom_distance(DEFAULT_ZOOM_BASE, 2.0), 7.5);
        assert_eq!(zoom_distance(DEFAULT_ZOOM_BASE, 0.5), 30.0);
    }

    #[test]
    fn test_zoom_guards_degenerate_factor() {
        assert_eq!(zoom_distance(DEFAULT_ZOOM_BASE, 0.0), DEFAULT_ZOOM_BASE);
        assert_eq!(zoom_distance(DEFAULT_ZOOM_BASE, -3.0), DEFAULT_ZOOM_BASE);
    }

    #[test]
    fn test_fit_distance_scales_with_extent_and_margin() {
        let near = fit_distance(2.0, FRAC_PI_4, PART_FOCUS_MARGIN);
        let far = fit_distance(2.0, FRAC_PI_4, MODEL_FOCUS_MARGIN);
        assert!(far > near);

        // Half-extent over tan(fov/2), times the margin
        let expected = (2.0f32 / 2.0) / (FRAC_PI_4 / 2.0).tan() * PART_FOCUS_MARGIN;
        assert!((near - expected).abs() < f32::EPSILON);
    }
}
