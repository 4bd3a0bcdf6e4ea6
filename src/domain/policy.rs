// src/domain/policy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GroupId, RoundId};
use crate::types::{BracketType, SchedulingMode};

/// Upper bound for `ScheduleConfig::days` under `SchedulingMode::Days`.
pub const MAX_DAYS: u32 = 14;

/// Used under Direct cadence when no setting matches a round's game count.
pub const DEFAULT_MATCH_LENGTH: MatchLengthSetting = MatchLengthSetting {
    number_of_games: 1,
    match_length_min: 30,
};

/// A user-declared date anchor: `starting_round_id` starts at `start_date`,
/// whatever its predecessors resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub group_id: GroupId,
    pub starting_round_id: RoundId,
    pub start_date: DateTime<Utc>,
    /// Seeded automatically for a structural first round.
    pub is_first: bool,
    /// Rescue date for rounds with neither a phase nor predecessors.
    /// Exactly one phase in a config carries this flag.
    #[serde(default)]
    pub is_default: bool,
}

/// Wall-clock duration of a match with `number_of_games` games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLengthSetting {
    pub number_of_games: u32,
    pub match_length_min: u32,
}

/// Policy bundle for one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub scheduling_mode: SchedulingMode,
    pub bracket_type: BracketType,
    pub match_length_settings: Vec<MatchLengthSetting>,
    pub phases: Vec<Phase>,
    /// Spacing for `SchedulingMode::Days`; ignored by every other mode.
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    1
}

impl ScheduleConfig {
    pub fn new(scheduling_mode: SchedulingMode, bracket_type: BracketType) -> Self {
        Self {
            scheduling_mode,
            bracket_type,
            match_length_settings: Vec::new(),
            phases: Vec::new(),
            days: default_days(),
        }
    }

    /// Phase anchored to `round_id`, if any.
    pub fn phase_for_round(&self, round_id: &str) -> Option<&Phase> {
        self.phases
            .iter()
            .find(|phase| phase.starting_round_id == round_id)
    }

    /// The phase flagged as the structural default.
    pub fn default_phase(&self) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.is_default)
    }

    /// Duration setting for a match with `number_of_games` games, falling back
    /// to [`DEFAULT_MATCH_LENGTH`].
    pub fn match_length_for(&self, number_of_games: u32) -> MatchLengthSetting {
        self.match_length_settings
            .iter()
            .find(|setting| setting.number_of_games == number_of_games)
            .copied()
            .unwrap_or(DEFAULT_MATCH_LENGTH)
    }
}
