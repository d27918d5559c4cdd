/// Visibility queries - which units, features and projectiles the camera
/// currently shows to a reader.
///
/// Each query allocates one fresh generation stamp, walks every quad of
/// the map and streams the candidates through the filter pipeline.
/// Survivors are returned in grid-enumeration order.

use rdst::RadixSort;
use slotmap::Key;
use crate::camera::Camera;
use crate::grid::{walk, QuadListCollector, QuadRegion};
use crate::world::{
    AllyTeamId, Feature, FeatureId, FeatureKey, ObjectTable, ProjectileId, ProjectileKey, RawId,
    TeamId, Unit, UnitId, UnitKey, World,
};
use super::access::ReadAccess;
use super::filter::{
    admit, Allegiance, CategoryFilter, FilterParams, Filterable, QueryContext, RadiusSpec,
    StampTable,
};

// ===== RESULTS =====

/// Ids returned by a visibility query, in grid-enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleIds<I> {
    ids: Vec<I>,
}

impl<I: RawId> VisibleIds<I> {
    fn with_capacity(capacity: usize) -> Self {
        Self { ids: Vec::with_capacity(capacity) }
    }

    pub fn as_slice(&self) -> &[I] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: I) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &I> + '_ {
        self.ids.iter()
    }

    /// Ids in ascending order, for order-independent comparison.
    pub fn sorted(&self) -> Vec<I> {
        let mut raw: Vec<u32> = self.ids.iter().map(|id| id.raw()).collect();
        raw.radix_sort_unstable();
        raw.into_iter().map(I::from_raw).collect()
    }

    pub fn into_vec(self) -> Vec<I> {
        self.ids
    }
}

impl<I> Default for VisibleIds<I> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

// ===== REQUEST TYPES =====

/// Team selector of `get_visible_units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSelector {
    All,
    /// The reader's own team (every unit if the reader has none)
    Mine,
    /// Allied units, excluding the reader's own team
    Ally,
    Enemy,
    /// One specific team
    Team(TeamId),
}

impl UnitSelector {
    pub const ALL: i64 = -1;
    pub const MINE: i64 = -2;
    pub const ALLY: i64 = -3;
    pub const ENEMY: i64 = -4;

    /// Decode the script's team argument. Unknown negatives select all.
    pub fn from_team_arg(team: i64) -> Self {
        match team {
            Self::MINE => UnitSelector::Mine,
            Self::ALLY => UnitSelector::Ally,
            Self::ENEMY => UnitSelector::Enemy,
            t if t >= 0 => UnitSelector::Team(u32::try_from(t).unwrap_or(u32::MAX)),
            _ => UnitSelector::All,
        }
    }
}

/// Parameters of `get_visible_units`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitQuery {
    pub selector: UnitSelector,
    /// Radius argument (see `RadiusSpec`)
    pub radius: Option<f32>,
    pub include_icons: bool,
}

impl Default for UnitQuery {
    fn default() -> Self {
        Self { selector: UnitSelector::All, radius: None, include_icons: true }
    }
}

/// Parameters of `get_visible_features`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureQuery {
    /// Ally-team whose view is queried (`None`: the reader's own)
    pub ally_team: Option<i64>,
    pub radius: Option<f32>,
    pub include_icons: bool,
    pub include_geothermal: bool,
}

impl Default for FeatureQuery {
    fn default() -> Self {
        Self { ally_team: None, radius: None, include_icons: true, include_geothermal: true }
    }
}

/// Parameters of `get_visible_projectiles`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileQuery {
    pub ally_team: Option<i64>,
    pub include_weapons: bool,
    pub include_pieces: bool,
}

impl Default for ProjectileQuery {
    fn default() -> Self {
        Self { ally_team: None, include_weapons: true, include_pieces: true }
    }
}

// ===== ENGINE =====

/// Owner of the per-query generation stamps.
///
/// Queries take `&mut self`, so two queries on one engine can never
/// interleave. The stamp counter is 64-bit and never wraps in practice.
#[derive(Debug, Default)]
pub struct VisibilityEngine {
    next_stamp: u64,
    unit_stamps: StampTable<UnitKey>,
    feature_stamps: StampTable<FeatureKey>,
    projectile_stamps: StampTable<ProjectileKey>,
}

impl VisibilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the stamp of a new query.
    pub fn begin_query(&mut self) -> QueryContext {
        self.next_stamp += 1;
        QueryContext::new(self.next_stamp)
    }

    /// Stamps handed out so far.
    pub fn query_count(&self) -> u64 {
        self.next_stamp
    }

    /// Units in view. Empty when the reader may not see the requested team.
    pub fn get_visible_units(
        &mut self,
        world: &World,
        camera: &Camera,
        access: &ReadAccess,
        query: &UnitQuery,
    ) -> VisibleIds<UnitId> {
        let mut reader_ally = access.ally_team;
        let selector = match query.selector {
            UnitSelector::Mine => access.team.map_or(UnitSelector::All, UnitSelector::Team),
            other => other,
        };

        if let UnitSelector::Team(team) = selector {
            match world.teams().ally_team(team) {
                Some(ally_team) => reader_ally = Some(ally_team),
                None => return VisibleIds::default(),
            }
        }
        if reader_ally.is_none() && !access.full_read {
            return VisibleIds::default();
        }

        let allegiance = match selector {
            UnitSelector::All | UnitSelector::Mine => Allegiance::All,
            UnitSelector::Team(team) => Allegiance::Team(team),
            UnitSelector::Ally => Allegiance::Ally { ally_team: reader_ally, own_team: access.team },
            UnitSelector::Enemy => Allegiance::Enemy(reader_ally),
        };
        let params = FilterParams {
            fog_ally_team: reader_ally,
            allegiance,
            skip_icons: !query.include_icons,
            category: CategoryFilter::default(),
            radius: RadiusSpec::from_arg(query.radius, Unit::DEFAULT_DRAW_MULT),
        };

        let ctx = self.begin_query();
        let mut collector = QuadListCollector::units();
        walk(world.quads(), QuadRegion::All, &mut collector);

        let ids = run_pipeline(&collector, world.units(), &ctx, &mut self.unit_stamps, &params, camera);
        crate::view_trace!(
            "viewquery::visible",
            "get_visible_units: {} of {} candidates (stamp {})",
            ids.len(), collector.object_count(), ctx.stamp()
        );
        ids
    }

    /// Features in view for an ally-team.
    pub fn get_visible_features(
        &mut self,
        world: &World,
        camera: &Camera,
        access: &ReadAccess,
        query: &FeatureQuery,
    ) -> VisibleIds<FeatureId> {
        let Some(fog_ally_team) = resolve_ally_team(world, access, query.ally_team) else {
            return VisibleIds::default();
        };

        let params = FilterParams {
            fog_ally_team,
            allegiance: Allegiance::All,
            skip_icons: !query.include_icons,
            category: CategoryFilter {
                skip_geothermal: !query.include_geothermal,
                ..CategoryFilter::default()
            },
            radius: RadiusSpec::from_arg(query.radius, Feature::DEFAULT_DRAW_MULT),
        };

        let ctx = self.begin_query();
        let mut collector = QuadListCollector::features();
        walk(world.quads(), QuadRegion::All, &mut collector);

        let ids = run_pipeline(&collector, world.features(), &ctx, &mut self.feature_stamps, &params, camera);
        crate::view_trace!(
            "viewquery::visible",
            "get_visible_features: {} of {} candidates (stamp {})",
            ids.len(), collector.object_count(), ctx.stamp()
        );
        ids
    }

    /// Synced projectiles in view for an ally-team.
    pub fn get_visible_projectiles(
        &mut self,
        world: &World,
        camera: &Camera,
        access: &ReadAccess,
        query: &ProjectileQuery,
    ) -> VisibleIds<ProjectileId> {
        let Some(fog_ally_team) = resolve_ally_team(world, access, query.ally_team) else {
            return VisibleIds::default();
        };

        let params = FilterParams {
            fog_ally_team,
            allegiance: Allegiance::All,
            skip_icons: false,
            category: CategoryFilter {
                skip_geothermal: false,
                weapons: query.include_weapons,
                pieces: query.include_pieces,
            },
            radius: RadiusSpec::draw_radius(),
        };

        let ctx = self.begin_query();
        let mut collector = QuadListCollector::projectiles();
        walk(world.quads(), QuadRegion::All, &mut collector);

        let ids = run_pipeline(&collector, world.projectiles(), &ctx, &mut self.projectile_stamps, &params, camera);
        crate::view_trace!(
            "viewquery::visible",
            "get_visible_projectiles: {} of {} candidates (stamp {})",
            ids.len(), collector.object_count(), ctx.stamp()
        );
        ids
    }
}

/// Ally-team that gates a feature/projectile query.
///
/// `None`: the requested ally-team is invalid (no result).
/// `Some(None)`: full read, no fog.
fn resolve_ally_team(
    world: &World,
    access: &ReadAccess,
    requested: Option<i64>,
) -> Option<Option<AllyTeamId>> {
    match requested {
        Some(ally_team) if ally_team >= 0 => {
            if !world.teams().is_valid_ally_team(ally_team) {
                return None;
            }
            u32::try_from(ally_team).ok().map(Some)
        }
        _ if access.full_read => Some(None),
        // A reader without ally-team or full read sees nothing
        _ => access.ally_team.map(Some),
    }
}

fn run_pipeline<K: Key, T: Filterable>(
    collector: &QuadListCollector<'_, K>,
    table: &ObjectTable<K, T>,
    ctx: &QueryContext,
    stamps: &mut StampTable<K>,
    params: &FilterParams,
    camera: &Camera,
) -> VisibleIds<T::Id> {
    let mut result = VisibleIds::with_capacity(collector.object_count());
    for &key in collector.iter() {
        let Some(object) = table.get(key) else {
            continue;
        };
        if admit(key, object, ctx, stamps, params, camera) {
            result.ids.push(object.id());
        }
    }
    result
}

#[cfg(test)]
#[path = "visible_tests.rs"]
mod tests;
