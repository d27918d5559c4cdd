//! Screen ray casting: ground, object scene and the screen-ray classifier.

mod ground;
mod screen_ray;
mod trace;

pub use ground::{line_plane_intersect, FlatGround, Ground, Heightmap};
pub use screen_ray::{RayCoords, RayHit, ScreenRayCaster, ScreenRayOptions};
pub use trace::{ray_sphere_intersect, trace_objects, ObjectHit};
