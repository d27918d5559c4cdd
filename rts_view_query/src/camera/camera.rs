/// Camera - view/projection state of the local player's view.
///
/// The caller (renderer) computes the view and projection matrices and
/// hands them over. The camera derives its frustum from them and answers
/// the geometric questions the queries need: sphere/box view tests,
/// pixel-to-ray and world-to-window transforms.

use glam::{Mat4, Vec3};
use super::aabb::AABB;
use super::frustum::Frustum;

/// Viewport of the 3D view inside the window.
///
/// `x` is the offset from the window's left edge, `y` the offset from the
/// window's bottom edge (GL convention), both in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-depth viewport at the given offset and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, min_depth: 0.0, max_depth: 1.0 }
    }
}

/// View camera.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
    viewport: Viewport,
}

impl Camera {
    /// Create a camera; the frustum is extracted from `projection * view`.
    pub fn new(view: Mat4, projection: Mat4, viewport: Viewport) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            frustum: Frustum::from_view_projection(&(projection * view)),
            viewport,
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum planes used by the view tests.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Viewport dimensions and depth range.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// World-space camera position.
    pub fn position(&self) -> Vec3 {
        self.view_matrix.inverse().transform_point3(Vec3::ZERO)
    }

    /// World-space forward direction.
    pub fn direction(&self) -> Vec3 {
        self.view_matrix
            .inverse()
            .transform_vector3(Vec3::NEG_Z)
            .normalize_or_zero()
    }

    // ===== SETTERS =====

    /// Set the view matrix and re-derive the frustum.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
    }

    /// Set the projection matrix and re-derive the frustum.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
    }

    /// Override the frustum (e.g. a tighter culling volume).
    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    /// Set the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // ===== VIEW TESTS =====

    /// Whether a sphere is (potentially) visible.
    pub fn in_view_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.frustum.intersects_sphere(center, radius)
    }

    /// Whether an axis-aligned box is (potentially) visible.
    pub fn in_view_aabb(&self, mins: Vec3, maxs: Vec3) -> bool {
        self.frustum.intersects_aabb(&AABB::from_corners(mins, maxs))
    }

    // ===== TRANSFORMS =====

    /// Direction of the ray through a window pixel.
    ///
    /// `x` is the window column, `y` the window row counted from the top
    /// with the viewport's bottom offset already subtracted, which is the
    /// form `ViewGeometry::window_pixel` produces.
    pub fn pixel_dir(&self, x: f32, y: f32) -> Vec3 {
        let width = self.viewport.width.max(1.0);
        let height = self.viewport.height.max(1.0);

        let column = x - self.viewport.x + 0.5;
        let row = y + self.viewport.y + 0.5;

        let ndc_x = column / width * 2.0 - 1.0;
        let ndc_y = 1.0 - row / height * 2.0;

        let inverse = self.view_projection_matrix().inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        (far - near).normalize_or_zero()
    }

    /// Window coordinates of a world position.
    ///
    /// x/y are window pixels with a bottom-left origin, z is the depth
    /// in [0, 1] for points between the near and far planes.
    pub fn world_to_screen(&self, pos: Vec3) -> Vec3 {
        let ndc = self.view_projection_matrix().project_point3(pos);
        Vec3::new(
            self.viewport.x + (ndc.x + 1.0) * 0.5 * self.viewport.width,
            self.viewport.y + (ndc.y + 1.0) * 0.5 * self.viewport.height,
            ndc.z,
        )
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
