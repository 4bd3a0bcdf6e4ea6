// src/domain/mod.rs

//! Plain value types for a fetched tournament stage and the policies used
//! to schedule it.
//!
//! - [`records`] holds groups, rounds, matches and their opponents.
//! - [`policy`] holds phases, match length settings and the schedule config.

pub mod policy;
pub mod records;

/// Identifier types as handed out by the tournament API.
pub type GroupId = String;
pub type RoundId = String;
pub type MatchId = String;

pub use policy::{MatchLengthSetting, Phase, ScheduleConfig, DEFAULT_MATCH_LENGTH, MAX_DAYS};
pub use records::{Group, Match, MatchOpponent, Participant, Round};
