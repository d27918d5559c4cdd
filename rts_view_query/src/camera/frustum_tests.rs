use glam::{Mat4, Vec3};
use super::*;

fn looking_down_negative_z() -> Frustum {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_view_projection(&(projection * view))
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_planes_are_normalized() {
    let frustum = looking_down_negative_z();
    for plane in &frustum.planes {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

#[test]
fn test_near_plane_sits_at_near_distance() {
    let frustum = looking_down_negative_z();
    // Camera at z=5 looking at -Z, near = 0.1 → near plane at z = 4.9
    let on_near = Vec3::new(0.0, 0.0, 4.9);
    assert!(frustum.plane_distance(PLANE_NEAR, on_near).abs() < 1e-3);
    assert!(frustum.plane_distance(PLANE_NEAR, Vec3::ZERO) > 0.0);
}

#[test]
fn test_far_plane_rejects_distant_points() {
    let frustum = looking_down_negative_z();
    assert!(frustum.plane_distance(PLANE_FAR, Vec3::new(0.0, 0.0, -50.0)) > 0.0);
    assert!(frustum.plane_distance(PLANE_FAR, Vec3::new(0.0, 0.0, -200.0)) < 0.0);
}

// ============================================================================
// Frustum::intersects_sphere
// ============================================================================

#[test]
fn test_sphere_in_front_is_visible() {
    let frustum = looking_down_negative_z();
    assert!(frustum.intersects_sphere(Vec3::ZERO, 1.0));
    assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, -20.0), 0.0));
}

#[test]
fn test_sphere_behind_camera_is_culled() {
    let frustum = looking_down_negative_z();
    assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0));
}

#[test]
fn test_sphere_radius_reaches_into_view() {
    let frustum = looking_down_negative_z();
    // 90° FOV: at z=0 (distance 5) the half-width is 5; centre at x=8 is outside
    let center = Vec3::new(8.0, 0.0, 0.0);
    assert!(!frustum.intersects_sphere(center, 0.5));
    assert!(frustum.intersects_sphere(center, 4.0));
}

#[test]
fn test_negative_radius_acts_as_point() {
    let frustum = looking_down_negative_z();
    let center = Vec3::new(8.0, 0.0, 0.0);
    assert_eq!(
        frustum.intersects_sphere(center, -10.0),
        frustum.intersects_sphere(center, 0.0)
    );
}

// ============================================================================
// Frustum::intersects_aabb
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = looking_down_negative_z();
    let aabb = AABB::from_corners(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_behind_camera() {
    let frustum = looking_down_negative_z();
    let aabb = AABB::from_corners(Vec3::new(-1.0, -1.0, 10.0), Vec3::new(1.0, 1.0, 12.0));
    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_large_aabb_enclosing_camera() {
    let frustum = looking_down_negative_z();
    let aabb = AABB::from_corners(Vec3::splat(-500.0), Vec3::splat(500.0));
    assert!(frustum.intersects_aabb(&aabb));
}
