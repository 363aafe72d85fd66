//! Axis-aligned bounding volumes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Sizes at or below this length are treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Axis-aligned box enclosing some geometry in world space.
///
/// An empty point set yields the zero volume at the origin, which callers
/// see through [`BoundingVolume::is_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingVolume {
    /// Create a volume from explicit corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    /// Smallest volume enclosing every point, or the zero volume for no points
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(None, |acc: Option<Self>, p| {
                Some(match acc {
                    Some(b) => b.expanded(p),
                    None => Self { min: p, max: p },
                })
            })
            .unwrap_or_default()
    }

    /// Grow the volume to include a point
    pub fn expanded(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True when the volume has no extent on any axis
    pub fn is_degenerate(&self) -> bool {
        self.size().length() <= DEGENERATE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_points_give_zero_volume() {
        let b = BoundingVolume::from_points(std::iter::empty());
        assert_eq!(b, BoundingVolume::default());
        assert!(b.is_degenerate());
        assert_eq!(b.size(), Vec3::ZERO);
    }

    #[test]
    fn center_and_size() {
        let b = BoundingVolume::from_points([
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(3.0, 4.0, -2.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(b.max, Vec3::new(3.0, 4.0, 2.0));
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(b.size(), Vec3::new(4.0, 4.0, 4.0));
        assert!(!b.is_degenerate());
    }

    #[test]
    fn flat_volume_is_not_degenerate() {
        let b = BoundingVolume::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(!b.is_degenerate());
        assert_eq!(b.size().y, 0.0);
    }

    #[test]
    fn new_orders_corners() {
        let b = BoundingVolume::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::ONE);
    }
}
