//! Camera module - view camera, viewport, frustum and bounding boxes.
//!
//! The camera is owned and updated by the renderer; the queries only
//! borrow it for view tests and screen/world transforms.

mod aabb;
mod camera;
mod frustum;

pub use aabb::AABB;
pub use camera::{Camera, Viewport};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
