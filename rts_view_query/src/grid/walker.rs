/// Quad walker - broad-phase enumeration of quads.
///
/// The walker performs no filtering. It hands every quad of a region to a
/// visitor; collectors keep borrowed membership lists (never copies) for
/// the filter stage.

use glam::Vec2;
use super::quad_field::{Quad, QuadField};
use crate::world::{FeatureKey, ProjectileKey, UnitKey};

/// Region of the map to enumerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadRegion {
    /// Every quad of the field
    All,
    /// Quads overlapping a world-space xz rectangle (corners in any order)
    Rect { min: Vec2, max: Vec2 },
}

impl QuadRegion {
    /// Rectangle enclosing a circle on the xz plane.
    pub fn around(center: Vec2, radius: f32) -> Self {
        let r = Vec2::splat(radius.abs());
        QuadRegion::Rect { min: center - r, max: center + r }
    }
}

/// Receives each quad of a walk.
pub trait QuadVisitor<'a> {
    fn visit(&mut self, quad: &'a Quad);
}

/// Hand every quad of `region` to `visitor`. Returns the number of quads visited.
pub fn walk<'a, V: QuadVisitor<'a>>(field: &'a QuadField, region: QuadRegion, visitor: &mut V) -> usize {
    let mut visited = 0;
    match region {
        QuadRegion::All => {
            for quad in field.cells() {
                visitor.visit(quad);
                visited += 1;
            }
        }
        QuadRegion::Rect { min, max } => {
            for quad in field.cells_in(field.quad_range(min, max)) {
                visitor.visit(quad);
                visited += 1;
            }
        }
    }
    visited
}

/// Collects the non-empty membership lists of one object variant.
///
/// Stores pointers to the quads' lists, not copies; its length equals the
/// number of non-empty visited quads.
pub struct QuadListCollector<'a, K> {
    select: fn(&Quad) -> &[K],
    lists: Vec<&'a [K]>,
    object_count: usize,
}

impl<'a> QuadListCollector<'a, UnitKey> {
    pub fn units() -> Self {
        Self::new(Quad::units)
    }
}

impl<'a> QuadListCollector<'a, FeatureKey> {
    pub fn features() -> Self {
        Self::new(Quad::features)
    }
}

impl<'a> QuadListCollector<'a, ProjectileKey> {
    pub fn projectiles() -> Self {
        Self::new(Quad::projectiles)
    }
}

impl<'a, K> QuadListCollector<'a, K> {
    fn new(select: fn(&Quad) -> &[K]) -> Self {
        Self {
            select,
            lists: Vec::with_capacity(64),
            object_count: 0,
        }
    }

    /// Collected lists, in walk order.
    pub fn lists(&self) -> &[&'a [K]] {
        &self.lists
    }

    /// Number of non-empty lists collected.
    pub fn quad_count(&self) -> usize {
        self.lists.len()
    }

    /// Total entries over all lists (duplicates included).
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Entries over all lists, in walk order (duplicates included).
    pub fn iter(&self) -> impl Iterator<Item = &'a K> + '_ {
        self.lists.iter().flat_map(|list| list.iter())
    }
}

impl<'a, K> QuadVisitor<'a> for QuadListCollector<'a, K> {
    fn visit(&mut self, quad: &'a Quad) {
        let list = (self.select)(quad);
        if list.is_empty() {
            return;
        }
        self.lists.push(list);
        self.object_count += list.len();
    }
}
