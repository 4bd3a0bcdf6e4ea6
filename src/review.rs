// src/review.rs

//! Human-readable summary of a scheduling run, one row per round.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::RoundId;
use crate::structure::TournamentStructure;

pub const UNKNOWN_GROUP: &str = "Unknown Group";
pub const SCHEDULING_FAILED: &str = "scheduling failed for this entry";

const DATE_FORMAT: &str = "%a, %b %-d, %Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub round_id: RoundId,
    pub group_name: String,
    pub round_name: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl ReviewRow {
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_at.is_some()
    }
}

impl fmt::Display for ReviewRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}: ", self.group_name, self.round_name)?;
        match self.scheduled_at {
            Some(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            None => f.write_str(SCHEDULING_FAILED),
        }
    }
}

/// Rows for every round, unscheduled rounds first, then by date.
pub fn review_rows(structure: &TournamentStructure) -> Vec<ReviewRow> {
    let mut rows: Vec<ReviewRow> = structure
        .rounds()
        .iter()
        .map(|round| ReviewRow {
            round_id: round.id.clone(),
            group_name: structure
                .group_name(&round.group_id)
                .unwrap_or(UNKNOWN_GROUP)
                .to_string(),
            round_name: round.name.clone(),
            scheduled_at: round.scheduled_at,
        })
        .collect();

    // `None` orders before `Some`; the sort is stable for equal dates.
    rows.sort_by_key(|row| row.scheduled_at);
    rows
}
