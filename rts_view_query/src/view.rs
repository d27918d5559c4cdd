/// View state - where the 3D view and the minimap sit in the window.
///
/// Script coordinates have a bottom-left origin relative to the view.
/// Window pixels handed to the camera have a top-left origin and include
/// the view offset; `ViewGeometry::window_pixel` converts between them.

use glam::{Vec2, Vec3};
use crate::config::ViewConfig;
use crate::engine::Engine;
use crate::grid::{walk, QuadListCollector, QuadRegion};
use crate::query::ReadAccess;
use crate::world::{UnitId, World};

// ===== VIEW GEOMETRY =====

/// Size and offset of the 3D view inside the window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewGeometry {
    pub size_x: i32,
    pub size_y: i32,
    pub pos_x: i32,
    pub pos_y: i32,
}

impl ViewGeometry {
    pub fn new(size_x: i32, size_y: i32, pos_x: i32, pos_y: i32) -> Self {
        Self { size_x, size_y, pos_x, pos_y }
    }

    /// Window pixel of a script point.
    pub fn window_pixel(&self, mx: i32, my: i32) -> (i32, i32) {
        (mx + self.pos_x, self.size_y - 1 - my - self.pos_y)
    }

    /// Whether a script point lies inside the view.
    pub fn contains(&self, mx: i32, my: i32) -> bool {
        (0..self.size_x).contains(&mx) && (0..self.size_y).contains(&my)
    }
}

// ===== MINIMAP =====

/// Minimap widget: screen rectangle plus its projection onto the map.
///
/// `pos_y` is measured from the bottom of the window, like script
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    pub pos_x: i32,
    pub pos_y: i32,
    pub size_x: i32,
    pub size_y: i32,
    pub minimized: bool,
    pub maximized: bool,
    map_width: f32,
    map_depth: f32,
}

impl Minimap {
    /// Minimap showing a `map_width` × `map_depth` map.
    pub fn new(pos_x: i32, pos_y: i32, size_x: i32, size_y: i32, map_width: f32, map_depth: f32) -> Self {
        Self {
            pos_x,
            pos_y,
            size_x,
            size_y,
            minimized: false,
            maximized: false,
            map_width,
            map_depth,
        }
    }

    /// Half-open rectangle test against window x and bottom-origin y.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.pos_x..self.pos_x + self.size_x).contains(&x)
            && (self.pos_y..self.pos_y + self.size_y).contains(&y)
    }

    /// Map position (x, z) under a window pixel (top-left origin).
    ///
    /// The minimap's top edge is map z = 0. Points outside the minimap
    /// clamp to the map border.
    pub fn map_position(&self, wx: i32, wy: i32, view: &ViewGeometry) -> Vec2 {
        let top = view.size_y - (self.pos_y + self.size_y);
        let sx = (wx - self.pos_x) as f32 / self.size_x.max(1) as f32;
        let sz = (wy - top) as f32 / self.size_y.max(1) as f32;
        Vec2::new(
            (sx * self.map_width).clamp(0.0, self.map_width),
            (sz * self.map_depth).clamp(0.0, self.map_depth),
        )
    }

    /// Nearest selectable unit within `radius` of `pos` on the xz plane.
    ///
    /// Only units the reader can see (LOS or radar, or full read) and
    /// that are not flagged `no_select` qualify.
    pub fn select_unit(&self, world: &World, access: &ReadAccess, pos: Vec3, radius: f32) -> Option<UnitId> {
        let center = Vec2::new(pos.x, pos.z);
        let mut collector = QuadListCollector::units();
        walk(world.quads(), QuadRegion::around(center, radius), &mut collector);

        let ally_team = access.ally_team.unwrap_or(access.local_ally_team);
        let mut best: Option<(f32, UnitId)> = None;
        for &key in collector.iter() {
            let Some(unit) = world.units().get(key) else {
                continue;
            };
            if unit.no_select || (!access.full_read && !unit.los.in_los_or_radar(ally_team)) {
                continue;
            }
            let dist_sq = Vec2::new(unit.position.x, unit.position.z).distance_squared(center);
            if dist_sq > radius * radius {
                continue;
            }
            if best.map_or(true, |(d, _)| dist_sq < d) {
                best = Some((dist_sq, unit.id));
            }
        }
        best.map(|(_, id)| id)
    }
}

// ===== VIEW STATE =====

/// Everything about the local view the queries need besides the camera.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub geometry: ViewGeometry,
    pub minimap: Option<Minimap>,
    /// The whole interface (minimap included) is hidden
    pub hide_interface: bool,
    pub config: ViewConfig,
}

impl ViewState {
    /// View state using the engine's current default configuration.
    pub fn new(geometry: ViewGeometry) -> Self {
        Self::with_config(geometry, Engine::config())
    }

    pub fn with_config(geometry: ViewGeometry, config: ViewConfig) -> Self {
        Self {
            geometry,
            minimap: None,
            hide_interface: false,
            config,
        }
    }

    /// Builder: attach a minimap.
    pub fn with_minimap(mut self, minimap: Minimap) -> Self {
        self.minimap = Some(minimap);
        self
    }

    /// Whether a script point is over the minimap.
    ///
    /// `None` without a minimap; false while it is minimized or the
    /// interface is hidden.
    pub fn is_above_minimap(&self, x: i32, y: i32) -> Option<bool> {
        let minimap = self.minimap.as_ref()?;
        if minimap.minimized || self.hide_interface {
            return Some(false);
        }
        Some(minimap.contains(x + self.geometry.pos_x, y))
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
