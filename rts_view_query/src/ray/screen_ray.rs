/// Screen ray caster - what lies under a screen pixel.
///
/// A script point is first offered to the minimap (when asked to and the
/// point is on it). Otherwise a ray from the camera through the pixel is
/// traced against the visible objects, the ground and a reference plane,
/// and the result is classified as unit, feature, ground or sky.

use glam::Vec3;
use crate::camera::Camera;
use crate::query::ReadAccess;
use crate::view::ViewState;
use crate::world::{FeatureId, UnitId, World};
use super::ground::{line_plane_intersect, Ground};
use super::trace::{trace_objects, ObjectHit};

/// Positions reported with a ground or sky hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCoords {
    /// End of the trace (ground point, or wherever the ray stopped)
    pub trace: Vec3,
    /// Where the ray crosses the reference plane, if it does within range
    pub plane: Option<Vec3>,
}

/// Classified result of a screen ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayHit {
    Unit(UnitId),
    Feature(FeatureId),
    Ground(RayCoords),
    Sky(RayCoords),
}

impl RayHit {
    /// Script name of the hit kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RayHit::Unit(_) => "unit",
            RayHit::Feature(_) => "feature",
            RayHit::Ground(_) => "ground",
            RayHit::Sky(_) => "sky",
        }
    }

    pub fn coords(&self) -> Option<&RayCoords> {
        match self {
            RayHit::Ground(coords) | RayHit::Sky(coords) => Some(coords),
            RayHit::Unit(_) | RayHit::Feature(_) => None,
        }
    }
}

/// Switches of `trace_screen_ray`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRayOptions {
    /// Report positions only, never objects
    pub only_coords: bool,
    /// Resolve points over the minimap through its own projection
    pub use_minimap: bool,
    /// Report rays into the void as `Sky` instead of nothing
    pub include_sky: bool,
    /// Let the ray pass through water down to the terrain
    pub ignore_water: bool,
    /// Height of the reference plane
    pub plane_height: f32,
}

/// Everything a screen ray needs to see.
pub struct ScreenRayCaster<'a> {
    pub world: &'a World,
    pub camera: &'a Camera,
    pub view: &'a ViewState,
    pub ground: &'a dyn Ground,
    pub access: &'a ReadAccess,
}

impl<'a> ScreenRayCaster<'a> {
    /// Trace the script point (`mx`, `my`), bottom-left origin.
    ///
    /// `None`: outside the view, or a miss without `include_sky`.
    pub fn trace_screen_ray(&self, mx: i32, my: i32, options: &ScreenRayOptions) -> Option<RayHit> {
        let geometry = &self.view.geometry;
        let (wx, wy) = geometry.window_pixel(mx, my);

        if options.use_minimap {
            if let Some(hit) = self.trace_minimap(mx, my, wx, wy, options) {
                return Some(hit);
            }
        }

        if !geometry.contains(mx, my) {
            return None;
        }

        let config = &self.view.config;
        let trace_range = config.trace_range();
        let good_range = config.good_range();

        let from = self.camera.position();
        let dir = self.camera.pixel_dir(wx as f32, wy as f32);

        let ground_dist = self.ground.ray_intersect(from, dir, trace_range, options.ignore_water);
        let object_hit = if options.only_coords {
            None
        } else {
            trace_objects(self.world, self.access, from, dir, ground_dist.unwrap_or(trace_range))
        };
        let trace_dist = match object_hit {
            Some((dist, _)) => Some(dist),
            None => ground_dist,
        };

        let plane = line_plane_intersect(from, dir, trace_range, options.plane_height)
            .map(|dist| from + dir * dist);
        let coords = |dist: f32| RayCoords { trace: from + dir * dist, plane };

        crate::view_trace!(
            "viewquery::ray",
            "trace_screen_ray ({}, {}): object {:?}, ground {:?}",
            mx, my, object_hit, ground_dist
        );

        match (object_hit, trace_dist) {
            (Some((_, ObjectHit::Unit(id))), _) => Some(RayHit::Unit(id)),
            (Some((_, ObjectHit::Feature(id))), _) => Some(RayHit::Feature(id)),
            (None, Some(dist)) if dist <= good_range => Some(RayHit::Ground(coords(dist))),
            // into the void, or too far to be trusted
            (None, dist) => options
                .include_sky
                .then(|| RayHit::Sky(coords(dist.unwrap_or(trace_range)))),
        }
    }

    /// Minimap branch. Once the point is on an active minimap the result
    /// is final, even when no unit is found there.
    fn trace_minimap(&self, mx: i32, my: i32, wx: i32, wy: i32, options: &ScreenRayOptions) -> Option<RayHit> {
        let minimap = self.view.minimap.as_ref()?;
        if minimap.minimized {
            return None;
        }

        let geometry = &self.view.geometry;
        if !minimap.contains(mx + geometry.pos_x, my) {
            return None;
        }

        let xz = minimap.map_position(wx, wy, geometry);
        let pos = Vec3::new(xz.x, self.ground.height(xz.x, xz.y), xz.y);

        if !options.only_coords {
            let radius = self.view.config.minimap_select_radius;
            if let Some(id) = minimap.select_unit(self.world, self.access, pos, radius) {
                return Some(RayHit::Unit(id));
            }
        }
        Some(RayHit::Ground(RayCoords { trace: pos, plane: None }))
    }
}

#[cfg(test)]
#[path = "screen_ray_tests.rs"]
mod tests;
