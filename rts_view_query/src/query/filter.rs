/// Visibility filter pipeline.
///
/// Every candidate produced by the quad walk runs through the same chain
/// of predicates, in a fixed order, and is dropped by the first one that
/// rejects it:
///
/// 1. dedup by generation stamp
/// 2. no-draw
/// 3. fog of war
/// 4. icon exclusion
/// 5. category exclusion
/// 6. allegiance
/// 7. camera sphere test with the effective radius
///
/// The order matters: the stamp is set before anything can reject the
/// object, so an object listed in several quads is evaluated exactly once.

use slotmap::{Key, SecondaryMap};
use crate::camera::Camera;
use crate::world::{AllyTeamId, Feature, Projectile, TeamId, Unit, WorldObject};

// ===== GENERATION STAMPS =====

/// Identity of one query invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    stamp: u64,
}

impl QueryContext {
    pub(crate) fn new(stamp: u64) -> Self {
        Self { stamp }
    }

    pub fn stamp(&self) -> u64 {
        self.stamp
    }
}

/// Last stamp seen per object key.
#[derive(Debug)]
pub struct StampTable<K: Key> {
    stamps: SecondaryMap<K, u64>,
}

impl<K: Key> StampTable<K> {
    pub fn new() -> Self {
        Self { stamps: SecondaryMap::new() }
    }

    /// Mark `key` as seen by `ctx`. Returns false if it already was.
    pub fn mark(&mut self, key: K, ctx: &QueryContext) -> bool {
        if self.stamps.get(key) == Some(&ctx.stamp) {
            return false;
        }
        self.stamps.insert(key, ctx.stamp);
        true
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}

impl<K: Key> Default for StampTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ===== RADIUS =====

/// Radius used by the camera test: `test_radius + draw_radius * draw_mult`.
///
/// | argument N | test_radius | draw_mult        | effective          |
/// |------------|-------------|------------------|--------------------|
/// | omitted    | 0           | category default | draw radius or 0   |
/// | N >= 0     | N           | 1                | N + draw radius    |
/// | N < 0      | abs(N)      | 0                | abs(N)             |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSpec {
    pub test_radius: f32,
    pub draw_mult: f32,
}

impl RadiusSpec {
    /// Radius from an optional script argument.
    pub fn from_arg(arg: Option<f32>, default_mult: f32) -> Self {
        match arg {
            None => Self { test_radius: 0.0, draw_mult: default_mult },
            Some(n) if n >= 0.0 => Self { test_radius: n, draw_mult: 1.0 },
            Some(n) => Self { test_radius: n.abs(), draw_mult: 0.0 },
        }
    }

    /// The object's own draw radius, nothing added.
    pub fn draw_radius() -> Self {
        Self { test_radius: 0.0, draw_mult: 1.0 }
    }

    pub fn effective(&self, draw_radius: f32) -> f32 {
        self.test_radius + draw_radius * self.draw_mult
    }
}

// ===== ALLEGIANCE =====

/// Allegiance filter, resolved against the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    /// No filter
    All,
    /// Objects owned by one team (also how "mine" resolves)
    Team(TeamId),
    /// Same ally-team as the reader, minus the reader's own team.
    /// A reader without an ally-team has no allies.
    Ally {
        ally_team: Option<AllyTeamId>,
        own_team: Option<TeamId>,
    },
    /// Different ally-team than the reader. A reader without an
    /// ally-team considers everything hostile.
    Enemy(Option<AllyTeamId>),
}

impl Allegiance {
    pub fn admits(&self, team: TeamId, ally_team: AllyTeamId) -> bool {
        match *self {
            Allegiance::All => true,
            Allegiance::Team(t) => team == t,
            Allegiance::Ally { ally_team: reader, own_team } => {
                reader == Some(ally_team) && own_team != Some(team)
            }
            Allegiance::Enemy(reader) => reader != Some(ally_team),
        }
    }
}

// ===== CATEGORY =====

/// Per-variant exclusion switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Drop features with a geothermal definition
    pub skip_geothermal: bool,
    /// Keep projectiles fired by weapons
    pub weapons: bool,
    /// Keep flying unit pieces
    pub pieces: bool,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self { skip_geothermal: false, weapons: true, pieces: true }
    }
}

/// Variant-specific hooks of the pipeline.
pub trait Filterable: WorldObject {
    /// Draw-radius multiplier when no radius argument is given
    const DEFAULT_DRAW_MULT: f32;

    /// Whether the object shows through the fog for `ally_team`.
    fn seen_by(&self, ally_team: AllyTeamId) -> bool {
        self.los().in_los(ally_team)
    }

    fn excluded_by(&self, _category: &CategoryFilter) -> bool {
        false
    }
}

impl Filterable for Unit {
    const DEFAULT_DRAW_MULT: f32 = 1.0;
}

impl Filterable for Feature {
    const DEFAULT_DRAW_MULT: f32 = 0.0;

    fn excluded_by(&self, category: &CategoryFilter) -> bool {
        category.skip_geothermal && self.geo_thermal
    }
}

impl Filterable for Projectile {
    const DEFAULT_DRAW_MULT: f32 = 1.0;

    fn seen_by(&self, ally_team: AllyTeamId) -> bool {
        self.los.in_los_or_radar(ally_team)
    }

    // Unsynced projectiles have no id scripts could resolve
    fn excluded_by(&self, category: &CategoryFilter) -> bool {
        !self.synced
            || (self.weapon && !category.weapons)
            || (self.piece && !category.pieces)
    }
}

// ===== PIPELINE =====

/// Parameters of one visibility query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Ally-team whose LOS gates the result (`None`: no fog)
    pub fog_ally_team: Option<AllyTeamId>,
    pub allegiance: Allegiance,
    pub skip_icons: bool,
    pub category: CategoryFilter,
    pub radius: RadiusSpec,
}

impl FilterParams {
    /// No restriction beyond dedup, no-draw and the camera test.
    pub fn unrestricted(radius: RadiusSpec) -> Self {
        Self {
            fog_ally_team: None,
            allegiance: Allegiance::All,
            skip_icons: false,
            category: CategoryFilter::default(),
            radius,
        }
    }
}

/// Run one candidate through the pipeline. Returns true to keep it.
pub fn admit<K: Key, T: Filterable>(
    key: K,
    object: &T,
    ctx: &QueryContext,
    stamps: &mut StampTable<K>,
    params: &FilterParams,
    camera: &Camera,
) -> bool {
    if !stamps.mark(key, ctx) {
        return false;
    }
    if object.no_draw() {
        return false;
    }
    if let Some(ally_team) = params.fog_ally_team {
        if !object.seen_by(ally_team) {
            return false;
        }
    }
    if params.skip_icons && object.is_icon() {
        return false;
    }
    if object.excluded_by(&params.category) {
        return false;
    }
    if !params.allegiance.admits(object.team(), object.ally_team()) {
        return false;
    }
    camera.in_view_sphere(object.position(), params.radius.effective(object.draw_radius()))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
