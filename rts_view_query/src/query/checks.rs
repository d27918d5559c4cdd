/// Per-object reads gated by the reader's privileges.
///
/// Every read resolves the id first. An id the reader may not see is
/// indistinguishable from an unknown id: both give `None`.

use crate::camera::Camera;
use crate::world::{Feature, FeatureId, Unit, UnitId, World};
use super::access::ReadAccess;

/// Resolves ids for one reader and answers per-object questions.
#[derive(Clone, Copy)]
pub struct ObjectReader<'a> {
    world: &'a World,
    access: &'a ReadAccess,
}

impl<'a> ObjectReader<'a> {
    pub fn new(world: &'a World, access: &'a ReadAccess) -> Self {
        Self { world, access }
    }

    // ===== ID RESOLUTION =====

    /// A unit the reader can see (in LOS or on radar).
    ///
    /// Without a reading ally-team only full-read readers resolve units.
    pub fn unit(&self, id: UnitId) -> Option<&'a Unit> {
        let unit = self.world.units().by_id(id)?;
        match self.access.ally_team {
            None => self.access.full_read.then_some(unit),
            Some(ally_team) => unit.los.in_los_or_radar(ally_team).then_some(unit),
        }
    }

    /// A feature the reader can see (in LOS), or any feature with full read.
    pub fn feature(&self, id: FeatureId) -> Option<&'a Feature> {
        let feature = self.world.features().by_id(id)?;
        if self.access.full_read {
            return Some(feature);
        }
        let ally_team = self.access.ally_team?;
        feature.los.in_los(ally_team).then_some(feature)
    }

    // ===== UNIT CHECKS =====

    /// Whether the unit belongs to the reader's ally-team (the local
    /// player's ally-team for readers without one).
    pub fn is_unit_allied(&self, id: UnitId) -> Option<bool> {
        let unit = self.unit(id)?;
        let ally_team = self.access.ally_team.unwrap_or(self.access.local_ally_team);
        Some(unit.ally_team == ally_team)
    }

    /// Sphere test at the unit's position with its own radius.
    pub fn is_unit_in_view(&self, camera: &Camera, id: UnitId) -> Option<bool> {
        let unit = self.unit(id)?;
        Some(camera.in_view_sphere(unit.position, unit.radius))
    }

    /// Whether the reader actually sees the unit on screen.
    ///
    /// Stricter than `unit`: radar contact is not enough, the unit must be
    /// in LOS. With `check_icon`, units drawn as icons count as not visible.
    pub fn is_unit_visible(
        &self,
        camera: &Camera,
        id: UnitId,
        radius: Option<f32>,
        check_icon: bool,
    ) -> Option<bool> {
        let unit = self.unit(id)?;
        let sighted = match self.access.ally_team {
            None => self.access.full_read,
            Some(ally_team) => unit.los.in_los(ally_team),
        };
        if !sighted || (check_icon && unit.is_icon) {
            return Some(false);
        }
        Some(camera.in_view_sphere(unit.position, radius.unwrap_or(unit.radius)))
    }

    pub fn is_unit_icon(&self, id: UnitId) -> Option<bool> {
        self.unit(id).map(|unit| unit.is_icon)
    }

    pub fn unit_no_draw(&self, id: UnitId) -> Option<bool> {
        self.unit(id).map(|unit| unit.no_draw)
    }

    pub fn unit_no_select(&self, id: UnitId) -> Option<bool> {
        self.unit(id).map(|unit| unit.no_select)
    }

    pub fn unit_no_minimap(&self, id: UnitId) -> Option<bool> {
        self.unit(id).map(|unit| unit.no_minimap)
    }

    pub fn unit_lua_draw(&self, id: UnitId) -> Option<bool> {
        self.unit(id).map(|unit| unit.lua_draw)
    }

    // ===== FEATURE CHECKS =====

    pub fn feature_no_draw(&self, id: FeatureId) -> Option<bool> {
        self.feature(id).map(|feature| feature.no_draw)
    }

    pub fn feature_lua_draw(&self, id: FeatureId) -> Option<bool> {
        self.feature(id).map(|feature| feature.lua_draw)
    }
}
