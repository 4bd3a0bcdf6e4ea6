// src/domain/records.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GroupId, MatchId, RoundId};

/// A bracket or pool grouping inside a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub number: u32,
}

/// A synchronized set of matches within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub group_id: GroupId,
    pub name: String,
    pub number: u32,
    pub size: u32,
    /// Number of games in the longest match of this round.
    pub round_length: u32,
    /// Written by the scheduler; `None` until a run resolves this round.
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Round {
    /// Fresh round as fetched: length 1, unscheduled.
    pub fn new(
        id: impl Into<RoundId>,
        group_id: impl Into<GroupId>,
        name: impl Into<String>,
        number: u32,
        size: u32,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            name: name.into(),
            number,
            size,
            round_length: 1,
            scheduled_at: None,
        }
    }

    /// Raise `round_length` to `number_of_games` if that match is longer.
    pub fn observe_match_length(&mut self, number_of_games: u32) {
        if number_of_games > self.round_length {
            self.round_length = number_of_games;
        }
    }
}

/// One opponent slot of a match.
///
/// `source_node_id` names the match whose result feeds this slot
/// (e.g. "winner of match X").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOpponent {
    pub number: u32,
    #[serde(default)]
    pub source_node_id: Option<MatchId>,
    #[serde(default)]
    pub source_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round_id: RoundId,
    pub group_id: GroupId,
    pub number_of_games: u32,
    /// Per-match override; `None` means "use the round's time".
    pub scheduled_at: Option<DateTime<Utc>>,
    pub opponents: Vec<MatchOpponent>,
    pub participants: Vec<Participant>,
}

impl Match {
    pub fn new(
        id: impl Into<MatchId>,
        round_id: impl Into<RoundId>,
        group_id: impl Into<GroupId>,
        number_of_games: u32,
    ) -> Self {
        Self {
            id: id.into(),
            round_id: round_id.into(),
            group_id: group_id.into(),
            number_of_games,
            scheduled_at: None,
            opponents: Vec::new(),
            participants: Vec::new(),
        }
    }

    /// Ids of the matches feeding this one's opponent slots.
    pub fn source_match_ids(&self) -> impl Iterator<Item = &str> {
        self.opponents
            .iter()
            .filter_map(|opp| opp.source_node_id.as_deref())
    }
}
