/// QuadField - fixed-size square partition of the map.
///
/// Each quad holds key lists for the three object variants. An object is
/// listed in every quad its bounding square (position ± radius, on the
/// xz plane) overlaps, so a large object can appear in several quads.
/// Membership is maintained by the simulation; queries only read.
///
/// Quads are stored row-major: index = z * cols + x.

use glam::{Vec2, Vec3};
use slotmap::{Key, SecondaryMap};
use crate::world::{FeatureKey, ProjectileKey, UnitKey};

/// One grid cell.
#[derive(Debug, Default, Clone)]
pub struct Quad {
    units: Vec<UnitKey>,
    features: Vec<FeatureKey>,
    projectiles: Vec<ProjectileKey>,
}

impl Quad {
    pub fn units(&self) -> &[UnitKey] {
        &self.units
    }

    pub fn features(&self) -> &[FeatureKey] {
        &self.features
    }

    pub fn projectiles(&self) -> &[ProjectileKey] {
        &self.projectiles
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty() && self.features.is_empty() && self.projectiles.is_empty()
    }
}

/// Inclusive range of quad coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadRange {
    pub x0: usize,
    pub z0: usize,
    pub x1: usize,
    pub z1: usize,
}

impl QuadRange {
    /// Number of quads covered (never zero).
    pub fn quad_count(&self) -> usize {
        (self.x1 - self.x0 + 1) * (self.z1 - self.z0 + 1)
    }
}

/// The map's quad grid.
pub struct QuadField {
    quads: Vec<Quad>,
    cols: usize,
    rows: usize,
    quad_size: f32,
    unit_quads: SecondaryMap<UnitKey, Vec<usize>>,
    feature_quads: SecondaryMap<FeatureKey, Vec<usize>>,
    projectile_quads: SecondaryMap<ProjectileKey, Vec<usize>>,
}

impl QuadField {
    /// Create a grid covering `map_width` × `map_depth` world units.
    ///
    /// Always at least one quad per axis. `quad_size` must be positive
    /// (`ViewConfig::validate` enforces this for configured values).
    pub fn new(map_width: f32, map_depth: f32, quad_size: f32) -> Self {
        let quad_size = quad_size.max(f32::MIN_POSITIVE);
        let cols = ((map_width / quad_size).ceil() as usize).max(1);
        let rows = ((map_depth / quad_size).ceil() as usize).max(1);

        Self {
            quads: vec![Quad::default(); cols * rows],
            cols,
            rows,
            quad_size,
            unit_quads: SecondaryMap::new(),
            feature_quads: SecondaryMap::new(),
            projectile_quads: SecondaryMap::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn quad_size(&self) -> f32 {
        self.quad_size
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Quad coordinates covering a world position (clamped to the grid).
    pub fn cell_coords(&self, x: f32, z: f32) -> (usize, usize) {
        (
            Self::clamp_axis(x / self.quad_size, self.cols),
            Self::clamp_axis(z / self.quad_size, self.rows),
        )
    }

    /// Quad at quad coordinates (clamped to the grid).
    pub fn cell_at(&self, x: usize, z: usize) -> &Quad {
        let x = x.min(self.cols - 1);
        let z = z.min(self.rows - 1);
        &self.quads[z * self.cols + x]
    }

    /// Quad covering a world position.
    pub fn cell_at_pos(&self, pos: Vec3) -> &Quad {
        let (x, z) = self.cell_coords(pos.x, pos.z);
        self.cell_at(x, z)
    }

    /// Every quad exactly once, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &Quad> + '_ {
        self.quads.iter()
    }

    /// Quads in an inclusive range.
    pub fn cells_in(&self, range: QuadRange) -> impl Iterator<Item = &Quad> + '_ {
        (range.z0..=range.z1).flat_map(move |z| {
            let row = z * self.cols;
            self.quads[row + range.x0..=row + range.x1].iter()
        })
    }

    /// Clamped quad range covering a world xz rectangle.
    pub fn quad_range(&self, min: Vec2, max: Vec2) -> QuadRange {
        let lo = min.min(max);
        let hi = min.max(max);
        let (x0, z0) = self.cell_coords(lo.x, lo.y);
        let (x1, z1) = self.cell_coords(hi.x, hi.y);
        QuadRange { x0, z0, x1, z1 }
    }

    fn clamp_axis(scaled: f32, count: usize) -> usize {
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(count - 1)
        }
    }

    fn indices_for(&self, pos: Vec3, radius: f32) -> Vec<usize> {
        let r = radius.max(0.0);
        let range = self.quad_range(
            Vec2::new(pos.x - r, pos.z - r),
            Vec2::new(pos.x + r, pos.z + r),
        );
        let mut indices = Vec::with_capacity(range.quad_count());
        for z in range.z0..=range.z1 {
            for x in range.x0..=range.x1 {
                indices.push(z * self.cols + x);
            }
        }
        indices
    }

    // ===== MEMBERSHIP (simulation side) =====

    /// Place a unit (replaces any previous placement).
    pub fn insert_unit(&mut self, key: UnitKey, pos: Vec3, radius: f32) {
        let indices = self.indices_for(pos, radius);
        place(&mut self.quads, &mut self.unit_quads, |q| &mut q.units, key, indices);
    }

    /// Remove a unit from every quad it occupies.
    pub fn remove_unit(&mut self, key: UnitKey) {
        unplace(&mut self.quads, &mut self.unit_quads, |q| &mut q.units, key);
    }

    /// Place a feature (replaces any previous placement).
    pub fn insert_feature(&mut self, key: FeatureKey, pos: Vec3, radius: f32) {
        let indices = self.indices_for(pos, radius);
        place(&mut self.quads, &mut self.feature_quads, |q| &mut q.features, key, indices);
    }

    /// Remove a feature from every quad it occupies.
    pub fn remove_feature(&mut self, key: FeatureKey) {
        unplace(&mut self.quads, &mut self.feature_quads, |q| &mut q.features, key);
    }

    /// Place a projectile (replaces any previous placement).
    pub fn insert_projectile(&mut self, key: ProjectileKey, pos: Vec3, radius: f32) {
        let indices = self.indices_for(pos, radius);
        place(&mut self.quads, &mut self.projectile_quads, |q| &mut q.projectiles, key, indices);
    }

    /// Remove a projectile from every quad it occupies.
    pub fn remove_projectile(&mut self, key: ProjectileKey) {
        unplace(&mut self.quads, &mut self.projectile_quads, |q| &mut q.projectiles, key);
    }

    /// Number of quads a unit is listed in (0 if not placed).
    pub fn unit_quad_count(&self, key: UnitKey) -> usize {
        self.unit_quads.get(key).map_or(0, Vec::len)
    }

    /// Drop every membership list.
    pub fn clear(&mut self) {
        for quad in &mut self.quads {
            quad.units.clear();
            quad.features.clear();
            quad.projectiles.clear();
        }
        self.unit_quads.clear();
        self.feature_quads.clear();
        self.projectile_quads.clear();
    }
}

fn place<K: Key>(
    quads: &mut [Quad],
    placed: &mut SecondaryMap<K, Vec<usize>>,
    list: fn(&mut Quad) -> &mut Vec<K>,
    key: K,
    indices: Vec<usize>,
) {
    unplace(quads, placed, list, key);
    for &index in &indices {
        list(&mut quads[index]).push(key);
    }
    placed.insert(key, indices);
}

fn unplace<K: Key>(
    quads: &mut [Quad],
    placed: &mut SecondaryMap<K, Vec<usize>>,
    list: fn(&mut Quad) -> &mut Vec<K>,
    key: K,
) {
    if let Some(indices) = placed.remove(key) {
        for index in indices {
            let keys = list(&mut quads[index]);
            if let Some(pos) = keys.iter().position(|&k| k == key) {
                keys.swap_remove(pos);
            }
        }
    }
}

#[cfg(test)]
#[path = "quad_field_tests.rs"]
mod tests;
