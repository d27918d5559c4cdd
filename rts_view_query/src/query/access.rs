/// Read privileges of the calling script.

use crate::world::{AllyTeamId, TeamId};

/// Who is asking, and how much of the world they may see.
///
/// A player script reads through its own team and ally-team. A spectator
/// or widget with full read has no ally-team restriction at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadAccess {
    /// Team the script reads as (`None`: no single team)
    pub team: Option<TeamId>,
    /// Ally-team whose line of sight applies (`None`: unrestricted or no read)
    pub ally_team: Option<AllyTeamId>,
    /// May see everything regardless of line of sight
    pub full_read: bool,
    /// Ally-team of the local player (used when no ally-team is read)
    pub local_ally_team: AllyTeamId,
}

impl ReadAccess {
    /// Regular player: reads through its own team and ally-team.
    pub fn player(team: TeamId, ally_team: AllyTeamId) -> Self {
        Self {
            team: Some(team),
            ally_team: Some(ally_team),
            full_read: false,
            local_ally_team: ally_team,
        }
    }

    /// Full-read observer with no team of its own.
    pub fn full_view(local_ally_team: AllyTeamId) -> Self {
        Self {
            team: None,
            ally_team: None,
            full_read: true,
            local_ally_team,
        }
    }

    /// No team, no ally-team, no full read: sees nothing through the
    /// fog-gated queries.
    pub fn none(local_ally_team: AllyTeamId) -> Self {
        Self {
            team: None,
            ally_team: None,
            full_read: false,
            local_ally_team,
        }
    }
}
