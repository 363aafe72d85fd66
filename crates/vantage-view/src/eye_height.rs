//! Eye height for immersive viewing
//!
//! This is a heuristic, not a measurement. It assumes the asset's vertical
//! extent stands for `reference_height` metres (a room) and scales the
//! standing eye height by the same ratio. Sizes outside the plausible range
//! are not trusted and get the plain standing eye height.

use vantage_core::BoundingVolume;

use crate::config::EyeHeightConfig;

/// Estimate the eye height, in scene units, for normalized bounds.
pub fn estimate(bounds: &BoundingVolume, config: &EyeHeightConfig) -> f32 {
    let height = bounds.size().y;
    let plausible = height > config.plausible_min && height < config.plausible_max;
    if plausible && config.reference_height > 0.0 {
        config.standing_eye_height * (height / config.reference_height)
    } else {
        config.standing_eye_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn of_height(h: f32) -> BoundingVolume {
        BoundingVolume::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, h, 1.0))
    }

    #[test]
    fn reference_height_gives_standing_eye_height() {
        let config = EyeHeightConfig::default();
        assert!((estimate(&of_height(3.0), &config) - 1.6).abs() < 1e-6);
    }

    #[test]
    fn doubling_height_doubles_eye_height() {
        let config = EyeHeightConfig::default();
        let a = estimate(&of_height(2.0), &config);
        let b = estimate(&of_height(4.0), &config);
        assert!((b - 2.0 * a).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_falls_back() {
        let config = EyeHeightConfig::default();
        assert_eq!(estimate(&of_height(0.05), &config), 1.6);
        assert_eq!(estimate(&of_height(0.1), &config), 1.6);
        assert_eq!(estimate(&of_height(100.0), &config), 1.6);
        assert_eq!(estimate(&of_height(5000.0), &config), 1.6);
    }

    #[test]
    fn degenerate_bounds_fall_back() {
        let config = EyeHeightConfig::default();
        assert_eq!(estimate(&BoundingVolume::default(), &config), 1.6);
    }

    #[test]
    fn zero_reference_height_falls_back() {
        let config = EyeHeightConfig {
            reference_height: 0.0,
            ..Default::default()
        };
        assert_eq!(estimate(&of_height(3.0), &config), 1.6);
    }
}
