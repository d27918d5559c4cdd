/// Team roster: which teams exist and which ally-team each belongs to.

use super::object::{AllyTeamId, TeamId};

/// Team → ally-team mapping.
#[derive(Debug, Clone, Default)]
pub struct TeamRoster {
    ally_of_team: Vec<AllyTeamId>,
    ally_team_count: u32,
}

impl TeamRoster {
    /// Build from the ally-team of each team (index = team id).
    pub fn new(ally_of_team: Vec<AllyTeamId>) -> Self {
        let ally_team_count = ally_of_team.iter().map(|&a| a + 1).max().unwrap_or(0);
        Self { ally_of_team, ally_team_count }
    }

    pub fn is_valid_team(&self, team: i64) -> bool {
        team >= 0 && (team as u64) < self.ally_of_team.len() as u64
    }

    pub fn is_valid_ally_team(&self, ally_team: i64) -> bool {
        ally_team >= 0 && (ally_team as u64) < self.ally_team_count as u64
    }

    /// Ally-team of a team, `None` for unknown teams.
    pub fn ally_team(&self, team: TeamId) -> Option<AllyTeamId> {
        self.ally_of_team.get(team as usize).copied()
    }

    pub fn team_count(&self) -> u32 {
        self.ally_of_team.len() as u32
    }

    pub fn ally_team_count(&self) -> u32 {
        self.ally_team_count
    }
}
