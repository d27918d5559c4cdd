/// World objects visible to the query layer: units, features, projectiles.
///
/// Objects are created, moved and destroyed by the simulation. The query
/// layer only reads them through the `WorldObject` trait.

use std::fmt;
use bitflags::bitflags;
use glam::Vec3;
use slotmap::new_key_type;

// ===== IDS =====

/// Team index (a single player or AI)
pub type TeamId = u32;

/// Ally-team index (a set of teams sharing vision)
pub type AllyTeamId = u32;

/// Integer id as exchanged with scripts.
pub trait RawId: Copy + Eq + std::hash::Hash + fmt::Debug {
    fn raw(self) -> u32;
    fn from_raw(raw: u32) -> Self;
}

macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl RawId for $name {
            fn raw(self) -> u32 {
                self.0
            }

            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

object_id! {
    /// Script-visible unit id
    UnitId
}

object_id! {
    /// Script-visible feature id
    FeatureId
}

object_id! {
    /// Script-visible projectile id
    ProjectileId
}

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Arena key of a unit (what quads store)
    pub struct UnitKey;

    /// Arena key of a feature
    pub struct FeatureKey;

    /// Arena key of a projectile
    pub struct ProjectileKey;
}

// ===== LINE OF SIGHT =====

bitflags! {
    /// Per-ally-team sensor status of an object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LosStatus: u8 {
        /// Currently in line of sight
        const IN_LOS     = 1 << 0;
        /// Currently on radar
        const IN_RADAR   = 1 << 1;
        /// Was in line of sight at some point
        const PREV_LOS   = 1 << 2;
        /// Continuously on radar since last seen
        const CONT_RADAR = 1 << 3;
    }
}

/// Sensor status table indexed by ally-team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LosTable {
    status: Vec<LosStatus>,
}

impl LosTable {
    /// Empty table (nothing sees the object).
    pub fn new() -> Self {
        Self::default()
    }

    /// Status for one ally-team; unknown ally-teams see nothing.
    pub fn get(&self, ally_team: AllyTeamId) -> LosStatus {
        self.status
            .get(ally_team as usize)
            .copied()
            .unwrap_or_else(LosStatus::empty)
    }

    /// Overwrite the status for one ally-team.
    pub fn set(&mut self, ally_team: AllyTeamId, status: LosStatus) {
        let index = ally_team as usize;
        if self.status.len() <= index {
            self.status.resize(index + 1, LosStatus::empty());
        }
        self.status[index] = status;
    }

    /// Builder form of `set`.
    pub fn with(mut self, ally_team: AllyTeamId, status: LosStatus) -> Self {
        self.set(ally_team, status);
        self
    }

    /// Currently in LOS for the ally-team.
    pub fn in_los(&self, ally_team: AllyTeamId) -> bool {
        self.get(ally_team).contains(LosStatus::IN_LOS)
    }

    /// In LOS or on radar for the ally-team.
    pub fn in_los_or_radar(&self, ally_team: AllyTeamId) -> bool {
        self.get(ally_team).intersects(LosStatus::IN_LOS | LosStatus::IN_RADAR)
    }
}

// ===== WORLD OBJECT TRAIT =====

/// Common read interface of units, features and projectiles.
pub trait WorldObject {
    /// Script-visible id type
    type Id: RawId;

    fn id(&self) -> Self::Id;

    /// Draw mid position (used for view tests and quad placement)
    fn position(&self) -> Vec3;

    /// Draw radius
    fn draw_radius(&self) -> f32;

    /// Half-extent of the object's quad footprint. Must cover every sphere
    /// the object is tested against, drawn or traced.
    fn grid_radius(&self) -> f32 {
        self.draw_radius()
    }

    fn team(&self) -> TeamId;

    fn ally_team(&self) -> AllyTeamId;

    /// Sensor status per ally-team
    fn los(&self) -> &LosTable;

    /// Hidden from regular drawing (and therefore from visibility queries)
    fn no_draw(&self) -> bool {
        false
    }

    /// Currently drawn as a distance icon
    fn is_icon(&self) -> bool {
        false
    }
}

// ===== UNIT =====

/// A unit as seen by the unsynced layer.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub team: TeamId,
    pub ally_team: AllyTeamId,
    /// Draw mid position
    pub position: Vec3,
    /// Collision/selection radius
    pub radius: f32,
    /// Draw radius (usually slightly larger than `radius`)
    pub draw_radius: f32,
    pub los: LosTable,
    pub is_icon: bool,
    pub no_draw: bool,
    pub no_select: bool,
    pub no_minimap: bool,
    pub lua_draw: bool,
}

impl Unit {
    /// Unit with default flags; `draw_radius` starts equal to `radius`.
    pub fn new(id: UnitId, team: TeamId, ally_team: AllyTeamId, position: Vec3, radius: f32) -> Self {
        Self {
            id,
            team,
            ally_team,
            position,
            radius,
            draw_radius: radius,
            los: LosTable::new(),
            is_icon: false,
            no_draw: false,
            no_select: false,
            no_minimap: false,
            lua_draw: false,
        }
    }

    /// Builder: sensor status table.
    pub fn with_los(mut self, los: LosTable) -> Self {
        self.los = los;
        self
    }
}

impl WorldObject for Unit {
    type Id = UnitId;

    fn id(&self) -> UnitId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn draw_radius(&self) -> f32 {
        self.draw_radius
    }

    fn grid_radius(&self) -> f32 {
        self.radius.max(self.draw_radius)
    }

    fn team(&self) -> TeamId {
        self.team
    }

    fn ally_team(&self) -> AllyTeamId {
        self.ally_team
    }

    fn los(&self) -> &LosTable {
        &self.los
    }

    fn no_draw(&self) -> bool {
        self.no_draw
    }

    fn is_icon(&self) -> bool {
        self.is_icon
    }
}

// ===== FEATURE =====

/// How a feature is currently drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureDrawFlag {
    /// Not drawn this frame
    #[default]
    None,
    /// Regular model pass
    Normal,
    /// Fading (alpha) pass
    Fade,
    /// Shadow pass only
    Shadow,
    /// Far-texture billboard (the feature's "icon" form)
    FarTexture,
}

/// A map feature (wreck, tree, rock, geothermal vent...).
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: FeatureId,
    pub team: TeamId,
    pub ally_team: AllyTeamId,
    pub position: Vec3,
    pub radius: f32,
    pub draw_radius: f32,
    pub los: LosTable,
    pub draw_flag: FeatureDrawFlag,
    /// The feature definition is a geothermal vent
    pub geo_thermal: bool,
    pub no_draw: bool,
    pub lua_draw: bool,
}

impl Feature {
    /// Feature with default flags; `draw_radius` starts equal to `radius`.
    pub fn new(id: FeatureId, team: TeamId, ally_team: AllyTeamId, position: Vec3, radius: f32) -> Self {
        Self {
            id,
            team,
            ally_team,
            position,
            radius,
            draw_radius: radius,
            los: LosTable::new(),
            draw_flag: FeatureDrawFlag::Normal,
            geo_thermal: false,
            no_draw: false,
            lua_draw: false,
        }
    }

    /// Builder: sensor status table.
    pub fn with_los(mut self, los: LosTable) -> Self {
        self.los = los;
        self
    }
}

impl WorldObject for Feature {
    type Id = FeatureId;

    fn id(&self) -> FeatureId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn draw_radius(&self) -> f32 {
        self.draw_radius
    }

    fn grid_radius(&self) -> f32 {
        self.radius.max(self.draw_radius)
    }

    fn team(&self) -> TeamId {
        self.team
    }

    fn ally_team(&self) -> AllyTeamId {
        self.ally_team
    }

    fn los(&self) -> &LosTable {
        &self.los
    }

    fn no_draw(&self) -> bool {
        self.no_draw
    }

    fn is_icon(&self) -> bool {
        self.draw_flag == FeatureDrawFlag::FarTexture
    }
}

// ===== PROJECTILE =====

/// A projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub team: TeamId,
    pub ally_team: AllyTeamId,
    pub position: Vec3,
    pub draw_radius: f32,
    pub los: LosTable,
    /// Part of the synced simulation (only these have script-resolvable ids)
    pub synced: bool,
    /// Fired by a weapon
    pub weapon: bool,
    /// A flying piece of a destroyed unit
    pub piece: bool,
}

impl Projectile {
    /// Synced weapon projectile.
    pub fn new(id: ProjectileId, team: TeamId, ally_team: AllyTeamId, position: Vec3, draw_radius: f32) -> Self {
        Self {
            id,
            team,
            ally_team,
            position,
            draw_radius,
            los: LosTable::new(),
            synced: true,
            weapon: true,
            piece: false,
        }
    }

    /// Builder: sensor status table.
    pub fn with_los(mut self, los: LosTable) -> Self {
        self.los = los;
        self
    }
}

impl WorldObject for Projectile {
    type Id = ProjectileId;

    fn id(&self) -> ProjectileId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn draw_radius(&self) -> f32 {
        self.draw_radius
    }

    fn team(&self) -> TeamId {
        self.team
    }

    fn ally_team(&self) -> AllyTeamId {
        self.ally_team
    }

    fn los(&self) -> &LosTable {
        &self.los
    }
}
