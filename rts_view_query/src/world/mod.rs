//! World model: object arenas, team roster and the quad index over them.

mod object;
mod object_table;
mod teams;

pub use object::{
    AllyTeamId, Feature, FeatureDrawFlag, FeatureId, FeatureKey, LosStatus, LosTable,
    Projectile, ProjectileId, ProjectileKey, RawId, TeamId, Unit, UnitId, UnitKey, WorldObject,
};
pub use object_table::ObjectTable;
pub use teams::TeamRoster;

use glam::Vec3;
use crate::grid::QuadField;

/// Snapshot of the simulation as the read layer sees it.
///
/// Owns the three object arenas and keeps the quad index in step with
/// them: every insert, move or update re-places the object using its
/// grid radius.
pub struct World {
    units: ObjectTable<UnitKey, Unit>,
    features: ObjectTable<FeatureKey, Feature>,
    projectiles: ObjectTable<ProjectileKey, Projectile>,
    quads: QuadField,
    teams: TeamRoster,
}

impl World {
    /// Empty world over a `map_width` × `map_depth` map.
    pub fn new(map_width: f32, map_depth: f32, quad_size: f32, teams: TeamRoster) -> Self {
        Self {
            units: ObjectTable::new(),
            features: ObjectTable::new(),
            projectiles: ObjectTable::new(),
            quads: QuadField::new(map_width, map_depth, quad_size),
            teams,
        }
    }

    // ===== ACCESSORS =====

    pub fn units(&self) -> &ObjectTable<UnitKey, Unit> {
        &self.units
    }

    pub fn features(&self) -> &ObjectTable<FeatureKey, Feature> {
        &self.features
    }

    pub fn projectiles(&self) -> &ObjectTable<ProjectileKey, Projectile> {
        &self.projectiles
    }

    pub fn quads(&self) -> &QuadField {
        &self.quads
    }

    pub fn teams(&self) -> &TeamRoster {
        &self.teams
    }

    /// Map extent in world units (quad-aligned).
    pub fn map_size(&self) -> (f32, f32) {
        let size = self.quads.quad_size();
        (self.quads.cols() as f32 * size, self.quads.rows() as f32 * size)
    }

    // ===== UNITS =====

    /// Add a unit. Returns `None` if the id is already in use.
    pub fn insert_unit(&mut self, unit: Unit) -> Option<UnitKey> {
        let (id, pos, radius) = (unit.id, unit.position, unit.grid_radius());
        let Some(key) = self.units.insert(unit) else {
            crate::view_warn!("viewquery::World", "Unit id {} already in use", id);
            return None;
        };
        self.quads.insert_unit(key, pos, radius);
        Some(key)
    }

    /// Move a unit and re-place it in the grid. Returns false for unknown ids.
    pub fn move_unit(&mut self, id: UnitId, pos: Vec3) -> bool {
        let Some(key) = self.units.key_of(id) else {
            return false;
        };
        let Some(unit) = self.units.get_mut(key) else {
            return false;
        };
        unit.position = pos;
        let radius = unit.grid_radius();
        self.quads.insert_unit(key, pos, radius);
        true
    }

    /// Edit a unit in place, then re-place it in the grid so radius or
    /// position edits stay indexed. Returns false for unknown ids.
    pub fn update_unit(&mut self, id: UnitId, edit: impl FnOnce(&mut Unit)) -> bool {
        let Some(key) = self.units.key_of(id) else {
            return false;
        };
        let Some(unit) = self.units.get_mut(key) else {
            return false;
        };
        edit(unit);
        let (pos, radius) = (unit.position, unit.grid_radius());
        self.quads.insert_unit(key, pos, radius);
        true
    }

    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let key = self.units.key_of(id)?;
        self.quads.remove_unit(key);
        self.units.remove(key)
    }

    // ===== FEATURES =====

    /// Add a feature. Returns `None` if the id is already in use.
    pub fn insert_feature(&mut self, feature: Feature) -> Option<FeatureKey> {
        let (id, pos, radius) = (feature.id, feature.position, feature.grid_radius());
        let Some(key) = self.features.insert(feature) else {
            crate::view_warn!("viewquery::World", "Feature id {} already in use", id);
            return None;
        };
        self.quads.insert_feature(key, pos, radius);
        Some(key)
    }

    pub fn move_feature(&mut self, id: FeatureId, pos: Vec3) -> bool {
        let Some(key) = self.features.key_of(id) else {
            return false;
        };
        let Some(feature) = self.features.get_mut(key) else {
            return false;
        };
        feature.position = pos;
        let radius = feature.grid_radius();
        self.quads.insert_feature(key, pos, radius);
        true
    }

    pub fn update_feature(&mut self, id: FeatureId, edit: impl FnOnce(&mut Feature)) -> bool {
        let Some(key) = self.features.key_of(id) else {
            return false;
        };
        let Some(feature) = self.features.get_mut(key) else {
            return false;
        };
        edit(feature);
        let (pos, radius) = (feature.position, feature.grid_radius());
        self.quads.insert_feature(key, pos, radius);
        true
    }

    pub fn remove_feature(&mut self, id: FeatureId) -> Option<Feature> {
        let key = self.features.key_of(id)?;
        self.quads.remove_feature(key);
        self.features.remove(key)
    }

    // ===== PROJECTILES =====

    /// Add a projectile. Returns `None` if the id is already in use.
    pub fn insert_projectile(&mut self, projectile: Projectile) -> Option<ProjectileKey> {
        let (id, pos, radius) = (projectile.id, projectile.position, projectile.grid_radius());
        let Some(key) = self.projectiles.insert(projectile) else {
            crate::view_warn!("viewquery::World", "Projectile id {} already in use", id);
            return None;
        };
        self.quads.insert_projectile(key, pos, radius);
        Some(key)
    }

    pub fn move_projectile(&mut self, id: ProjectileId, pos: Vec3) -> bool {
        let Some(key) = self.projectiles.key_of(id) else {
            return false;
        };
        let Some(projectile) = self.projectiles.get_mut(key) else {
            return false;
        };
        projectile.position = pos;
        let radius = projectile.grid_radius();
        self.quads.insert_projectile(key, pos, radius);
        true
    }

    pub fn update_projectile(&mut self, id: ProjectileId, edit: impl FnOnce(&mut Projectile)) -> bool {
        let Some(key) = self.projectiles.key_of(id) else {
            return false;
        };
        let Some(projectile) = self.projectiles.get_mut(key) else {
            return false;
        };
        edit(projectile);
        let (pos, radius) = (projectile.position, projectile.grid_radius());
        self.quads.insert_projectile(key, pos, radius);
        true
    }

    pub fn remove_projectile(&mut self, id: ProjectileId) -> Option<Projectile> {
        let key = self.projectiles.key_of(id)?;
        self.quads.remove_projectile(key);
        self.projectiles.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(1024.0, 1024.0, 128.0, TeamRoster::new(vec![0, 1]))
    }

    #[test]
    fn test_insert_places_in_grid() {
        let mut world = world();
        let key = world
            .insert_unit(Unit::new(UnitId(1), 0, 0, Vec3::new(64.0, 0.0, 64.0), 10.0))
            .unwrap();

        assert_eq!(world.quads().cell_at(0, 0).units(), &[key]);
        assert!(world.insert_unit(Unit::new(UnitId(1), 0, 0, Vec3::ZERO, 1.0)).is_none());
    }

    #[test]
    fn test_move_updates_grid() {
        let mut world = world();
        let key = world
            .insert_unit(Unit::new(UnitId(1), 0, 0, Vec3::new(64.0, 0.0, 64.0), 10.0))
            .unwrap();

        assert!(world.move_unit(UnitId(1), Vec3::new(700.0, 0.0, 700.0)));
        assert!(world.quads().cell_at(0, 0).units().is_empty());
        assert_eq!(world.quads().cell_at(5, 5).units(), &[key]);
        assert!(!world.move_unit(UnitId(99), Vec3::ZERO));
    }

    #[test]
    fn test_collision_radius_widens_footprint() {
        let mut world = world();
        let mut unit = Unit::new(UnitId(1), 0, 0, Vec3::new(140.0, 0.0, 64.0), 40.0);
        unit.draw_radius = 5.0;
        let key = world.insert_unit(unit).unwrap();

        assert_eq!(world.quads().cell_at(0, 0).units(), &[key]);
        assert_eq!(world.quads().cell_at(1, 0).units(), &[key]);
    }

    #[test]
    fn test_update_replaces_in_grid() {
        let mut world = world();
        let key = world
            .insert_unit(Unit::new(UnitId(1), 0, 0, Vec3::new(140.0, 0.0, 64.0), 5.0))
            .unwrap();
        assert!(world.quads().cell_at(0, 0).units().is_empty());

        assert!(world.update_unit(UnitId(1), |unit| unit.radius = 40.0));
        assert_eq!(world.quads().cell_at(0, 0).units(), &[key]);

        assert!(world.update_unit(UnitId(1), |unit| unit.radius = 5.0));
        assert!(world.quads().cell_at(0, 0).units().is_empty());
        assert!(!world.update_unit(UnitId(99), |unit| unit.radius = 1.0));
    }

    #[test]
    fn test_remove_clears_grid() {
        let mut world = world();
        world.insert_feature(Feature::new(FeatureId(4), 0, 0, Vec3::new(128.0, 0.0, 128.0), 30.0));
        world.insert_projectile(Projectile::new(ProjectileId(5), 0, 0, Vec3::new(10.0, 0.0, 10.0), 2.0));

        assert!(world.remove_feature(FeatureId(4)).is_some());
        assert!(world.remove_projectile(ProjectileId(5)).is_some());
        assert!(world.quads().cells().all(|q| q.is_empty()));
        assert!(world.remove_feature(FeatureId(4)).is_none());
    }

    #[test]
    fn test_map_size_is_quad_aligned() {
        let world = World::new(1000.0, 200.0, 128.0, TeamRoster::default());
        assert_eq!(world.map_size(), (1024.0, 256.0));
    }
}
