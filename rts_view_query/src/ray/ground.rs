/// Ground collision for screen rays.

use glam::{Vec2, Vec3};
use crate::config::ViewConfig;

/// Terrain the ray caster can hit.
pub trait Ground {
    /// Terrain height at (x, z), water ignored.
    fn height(&self, x: f32, z: f32) -> f32;

    /// Distance along `dir` (unit length) from `from` to the first
    /// surface hit within `max_len`. The water plane counts as a surface
    /// unless `ignore_water` is set.
    fn ray_intersect(&self, from: Vec3, dir: Vec3, max_len: f32, ignore_water: bool) -> Option<f32>;
}

/// Distance along `dir` at which the segment `from .. from + dir * max_len`
/// crosses the horizontal plane `y = plane_y`.
pub fn line_plane_intersect(from: Vec3, dir: Vec3, max_len: f32, plane_y: f32) -> Option<f32> {
    if dir.y == 0.0 {
        return None;
    }
    let dist = (plane_y - from.y) / dir.y;
    (0.0..=max_len).contains(&dist).then_some(dist)
}

// ===== FLAT GROUND =====

/// Infinite flat terrain, optionally flooded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    pub height: f32,
    pub water_level: f32,
}

impl FlatGround {
    pub fn new(height: f32, water_level: f32) -> Self {
        Self { height, water_level }
    }
}

impl Ground for FlatGround {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn ray_intersect(&self, from: Vec3, dir: Vec3, max_len: f32, ignore_water: bool) -> Option<f32> {
        let surface = if ignore_water { self.height } else { self.height.max(self.water_level) };
        if from.y <= surface {
            return Some(0.0);
        }
        line_plane_intersect(from, dir, max_len, surface)
    }
}

// ===== HEIGHTMAP =====

/// Regular height grid with bilinear interpolation.
///
/// `heights` holds `(cols + 1) * (rows + 1)` corner samples, row-major,
/// spaced `square_size` apart. Rays only collide inside the map.
#[derive(Debug, Clone)]
pub struct Heightmap {
    cols: usize,
    rows: usize,
    square_size: f32,
    heights: Vec<f32>,
    water_level: f32,
    step: f32,
}

/// Bisection rounds after the march brackets a crossing
const REFINE_STEPS: usize = 16;

impl Heightmap {
    /// Build from corner samples. Returns `None` if the sample count does
    /// not match the grid.
    pub fn new(cols: usize, rows: usize, square_size: f32, heights: Vec<f32>) -> Option<Self> {
        if cols == 0 || rows == 0 || heights.len() != (cols + 1) * (rows + 1) || !(square_size > 0.0) {
            return None;
        }
        Some(Self {
            cols,
            rows,
            square_size,
            heights,
            water_level: 0.0,
            step: square_size * 0.5,
        })
    }

    /// Uniform terrain at `height`.
    pub fn flat(cols: usize, rows: usize, square_size: f32, height: f32) -> Option<Self> {
        Self::new(cols, rows, square_size, vec![height; (cols + 1) * (rows + 1)])
    }

    /// Builder: water plane height.
    pub fn with_water_level(mut self, water_level: f32) -> Self {
        self.water_level = water_level;
        self
    }

    /// Builder: ray march step length (clamped to a positive value).
    pub fn with_trace_step(mut self, step: f32) -> Self {
        self.step = step.max(0.01);
        self
    }

    /// Builder: water level and march step from a view configuration.
    pub fn with_config(self, config: &ViewConfig) -> Self {
        self.with_water_level(config.water_level)
            .with_trace_step(config.ground_trace_step)
    }

    pub fn water_level(&self) -> f32 {
        self.water_level
    }

    /// Map extent in world units.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * self.square_size, self.rows as f32 * self.square_size)
    }

    fn contains(&self, x: f32, z: f32) -> bool {
        let size = self.size();
        (0.0..=size.x).contains(&x) && (0.0..=size.y).contains(&z)
    }

    fn sample(&self, col: usize, row: usize) -> f32 {
        self.heights[row * (self.cols + 1) + col]
    }

    fn surface(&self, x: f32, z: f32, ignore_water: bool) -> f32 {
        let height = self.height(x, z);
        if ignore_water { height } else { height.max(self.water_level) }
    }

    // Signed height of the ray point above the surface; None off-map.
    fn clearance(&self, point: Vec3, ignore_water: bool) -> Option<f32> {
        self.contains(point.x, point.z)
            .then(|| point.y - self.surface(point.x, point.z, ignore_water))
    }
}

impl Ground for Heightmap {
    fn height(&self, x: f32, z: f32) -> f32 {
        let size = self.size();
        let fx = x.clamp(0.0, size.x) / self.square_size;
        let fz = z.clamp(0.0, size.y) / self.square_size;

        let col = (fx as usize).min(self.cols - 1);
        let row = (fz as usize).min(self.rows - 1);
        let tx = fx - col as f32;
        let tz = fz - row as f32;

        let top = self.sample(col, row) * (1.0 - tx) + self.sample(col + 1, row) * tx;
        let bottom = self.sample(col, row + 1) * (1.0 - tx) + self.sample(col + 1, row + 1) * tx;
        top * (1.0 - tz) + bottom * tz
    }

    fn ray_intersect(&self, from: Vec3, dir: Vec3, max_len: f32, ignore_water: bool) -> Option<f32> {
        if let Some(clearance) = self.clearance(from, ignore_water) {
            if clearance <= 0.0 {
                return Some(0.0);
            }
        }

        if !max_len.is_finite() || max_len <= 0.0 {
            return None;
        }

        // Sample positions come from the step index so the march reaches
        // max_len even where t + step rounds back to t.
        let samples = (max_len / self.step).ceil() as usize;
        let mut prev_t = 0.0;
        for i in 1..=samples {
            let t = (i as f32 * self.step).min(max_len);
            let Some(clearance) = self.clearance(from + dir * t, ignore_water) else {
                prev_t = t;
                continue;
            };
            if clearance > 0.0 {
                prev_t = t;
                continue;
            }

            // Crossing lies in (prev_t, t]
            let (mut lo, mut hi) = (prev_t, t);
            for _ in 0..REFINE_STEPS {
                let mid = (lo + hi) * 0.5;
                match self.clearance(from + dir * mid, ignore_water) {
                    Some(c) if c <= 0.0 => hi = mid,
                    _ => lo = mid,
                }
            }
            return Some(hi);
        }
        None
    }
}
