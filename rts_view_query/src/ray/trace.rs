/// Object-scene ray trace: nearest unit or feature along a segment.

use glam::{Vec2, Vec3};
use crate::grid::{walk, QuadListCollector, QuadRegion};
use crate::query::ReadAccess;
use crate::world::{FeatureId, UnitId, World};

/// Object struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectHit {
    Unit(UnitId),
    Feature(FeatureId),
}

/// Distance along `dir` (unit length) to the entry point of a sphere, or
/// 0 when `from` is inside it. `None` if the ray misses or the entry lies
/// beyond `max_len`.
pub fn ray_sphere_intersect(from: Vec3, dir: Vec3, max_len: f32, center: Vec3, radius: f32) -> Option<f32> {
    let offset = from - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = offset.dot(dir);
    if b > 0.0 {
        // moving away from the sphere
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let dist = -b - discriminant.sqrt();
    (dist <= max_len).then_some(dist)
}

/// Nearest unit or feature the reader can see along the segment
/// `from .. from + dir * max_len`.
///
/// Units need LOS or radar contact, features LOS; full-read readers see
/// everything. Objects flagged `no_draw` are never hit. Units win ties.
pub fn trace_objects(
    world: &World,
    access: &ReadAccess,
    from: Vec3,
    dir: Vec3,
    max_len: f32,
) -> Option<(f32, ObjectHit)> {
    let end = from + dir * max_len;
    let region = QuadRegion::Rect {
        min: Vec2::new(from.x, from.z),
        max: Vec2::new(end.x, end.z),
    };
    let ally_team = access.ally_team.unwrap_or(access.local_ally_team);

    let mut best: Option<(f32, ObjectHit)> = None;
    let mut consider = |dist: f32, hit: ObjectHit| {
        if best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, hit));
        }
    };

    let mut units = QuadListCollector::units();
    walk(world.quads(), region, &mut units);
    for &key in units.iter() {
        let Some(unit) = world.units().get(key) else {
            continue;
        };
        if unit.no_draw || (!access.full_read && !unit.los.in_los_or_radar(ally_team)) {
            continue;
        }
        if let Some(dist) = ray_sphere_intersect(from, dir, max_len, unit.position, unit.radius) {
            consider(dist, ObjectHit::Unit(unit.id));
        }
    }

    let mut features = QuadListCollector::features();
    walk(world.quads(), region, &mut features);
    for &key in features.iter() {
        let Some(feature) = world.features().get(key) else {
            continue;
        };
        if feature.no_draw || (!access.full_read && !feature.los.in_los(ally_team)) {
            continue;
        }
        if let Some(dist) = ray_sphere_intersect(from, dir, max_len, feature.position, feature.radius) {
            consider(dist, ObjectHit::Feature(feature.id));
        }
    }

    best
}
