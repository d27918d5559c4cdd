/// Axis-aligned bounding boxes for view tests and quad bounds.

use glam::Vec3;

/// Axis-Aligned Bounding Box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Build from two corners in any order.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Box enclosing a sphere.
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        let r = Vec3::splat(radius.abs());
        Self { min: center - r, max: center + r }
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if this AABB overlaps or touches another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_orders_components() {
        let aabb = AABB::from_corners(Vec3::new(5.0, -1.0, 2.0), Vec3::new(1.0, 3.0, -2.0));
        assert_eq!(aabb.min, Vec3::new(1.0, -1.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(5.0, 3.0, 2.0));
    }

    #[test]
    fn test_from_sphere() {
        let aabb = AABB::from_sphere(Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert_eq!(aabb.min, Vec3::new(8.0, -2.0, -2.0));
        assert_eq!(aabb.center(), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_contains_and_intersects() {
        let big = AABB::from_corners(Vec3::splat(-10.0), Vec3::splat(10.0));
        let small = AABB::from_corners(Vec3::splat(-1.0), Vec3::splat(1.0));
        let straddling = AABB::from_corners(Vec3::splat(5.0), Vec3::splat(15.0));
        let far = AABB::from_corners(Vec3::splat(20.0), Vec3::splat(30.0));

        assert!(big.contains(&small));
        assert!(!small.contains(&big));
        assert!(!big.contains(&straddling));
        assert!(big.intersects(&straddling));
        assert!(!big.intersects(&far));
    }
}
