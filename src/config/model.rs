// src/config/model.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Group, Match, MatchOpponent, Participant, Round};
use crate::types::{defaults_for_stage_type, BracketType, SchedulingMode};

/// A stage export as read from disk, in the tournament API's shape.
///
/// ```toml
/// [stage]
/// name = "Playoffs"
/// type = "single_elimination"
///
/// [[groups]]
/// id = "g1"
/// name = "Main bracket"
/// number = 1
///
/// [[rounds]]
/// id = "r1"
/// group_id = "g1"
/// name = "Semi finals"
/// number = 1
/// size = 4
///
/// [[matches]]
/// id = "m1"
/// round_id = "r1"
/// group_id = "g1"
/// number_of_games = 3
/// ```
///
/// The same structure is accepted as JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStageFile {
    #[serde(default)]
    pub stage: StageSection,

    #[serde(default)]
    pub groups: Vec<Group>,

    #[serde(default)]
    pub rounds: Vec<RawRound>,

    #[serde(default)]
    pub matches: Vec<RawMatch>,
}

/// `[stage]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageSection {
    #[serde(default)]
    pub name: Option<String>,

    /// Stage type as reported by the API (`single_elimination`, `pools`, ...).
    /// Drives the default cadence and bracket type.
    #[serde(default, rename = "type")]
    pub stage_type: String,
}

/// A round as fetched; `round_length` and `scheduled_at` are derived later.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRound {
    pub id: String,
    pub group_id: String,
    #[serde(default)]
    pub name: String,
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    pub id: String,
    pub round_id: String,
    pub group_id: String,

    /// Defaults to a single game.
    #[serde(default = "default_number_of_games")]
    pub number_of_games: u32,

    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub opponents: Vec<MatchOpponent>,

    #[serde(default)]
    pub participants: Vec<Participant>,
}

fn default_number_of_games() -> u32 {
    1
}

impl From<RawRound> for Round {
    fn from(raw: RawRound) -> Self {
        Round::new(raw.id, raw.group_id, raw.name, raw.number, raw.size)
    }
}

impl From<RawMatch> for Match {
    fn from(raw: RawMatch) -> Self {
        Match {
            id: raw.id,
            round_id: raw.round_id,
            group_id: raw.group_id,
            number_of_games: raw.number_of_games,
            scheduled_at: raw.scheduled_at,
            opponents: raw.opponents,
            participants: raw.participants,
        }
    }
}

/// A validated stage. Construct via `StageFile::try_from(RawStageFile)`.
#[derive(Debug, Clone)]
pub struct StageFile {
    pub name: Option<String>,
    pub stage_type: String,
    pub groups: Vec<Group>,
    pub rounds: Vec<Round>,
    pub matches: Vec<Match>,
}

impl StageFile {
    pub(crate) fn new_unchecked(raw: RawStageFile) -> Self {
        Self {
            name: raw.stage.name,
            stage_type: raw.stage.stage_type,
            groups: raw.groups,
            rounds: raw.rounds.into_iter().map(Round::from).collect(),
            matches: raw.matches.into_iter().map(Match::from).collect(),
        }
    }

    /// Cadence and bracket type implied by the stage type.
    pub fn defaults(&self) -> (SchedulingMode, BracketType) {
        defaults_for_stage_type(&self.stage_type)
    }
}

/// Scheduling policy as read from a TOML file.
///
/// ```toml
/// [schedule]
/// mode = "days"
/// days = 3
/// bracket_type = "bracket"
///
/// [[match_length]]
/// games = 3
/// minutes = 45
///
/// [[phase]]
/// round = "r1"
/// start = "2024-01-01T10:00:00Z"
/// default = true
/// ```
///
/// Every section is optional. Missing values fall back to the stage type's
/// defaults; missing phases are seeded from the first rounds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScheduleFile {
    #[serde(default)]
    pub schedule: ScheduleSection,

    #[serde(default)]
    pub match_length: Vec<RawMatchLength>,

    #[serde(default)]
    pub phase: Vec<RawPhase>,
}

/// `[schedule]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleSection {
    #[serde(default)]
    pub mode: Option<SchedulingMode>,

    /// Only read when `mode = "days"`.
    #[serde(default)]
    pub days: Option<u32>,

    #[serde(default)]
    pub bracket_type: Option<BracketType>,
}

/// `[[match_length]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatchLength {
    pub games: u32,
    pub minutes: u32,
}

/// `[[phase]]` entry. `start` is an RFC 3339 string.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPhase {
    pub round: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub default: bool,
}
