//! Spatial grid index and the quad walker.

mod quad_field;
mod walker;

pub use quad_field::{Quad, QuadField, QuadRange};
pub use walker::{walk, QuadListCollector, QuadRegion, QuadVisitor};
