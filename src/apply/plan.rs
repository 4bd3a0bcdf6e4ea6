// src/apply/plan.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{MatchId, RoundId};
use crate::structure::TournamentStructure;

/// A match and the date it should be persisted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAssignment {
    pub match_id: MatchId,
    pub round_id: RoundId,
    pub scheduled_at: DateTime<Utc>,
}

/// Ordered work list for the apply sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyPlan {
    pub assignments: Vec<MatchAssignment>,
    /// Matches with neither an override nor a round date.
    pub skipped: Vec<MatchId>,
}

impl ApplyPlan {
    /// Number of matches the plan covers, skipped ones included.
    pub fn total(&self) -> usize {
        self.assignments.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Pair every match with `match.scheduled_at`, falling back to its round's
/// date. Matches keep the structure's order.
pub fn build_apply_plan(structure: &TournamentStructure) -> ApplyPlan {
    let mut plan = ApplyPlan::default();

    for m in structure.matches() {
        let round_date = structure
            .round(&m.round_id)
            .and_then(|round| round.scheduled_at);

        match m.scheduled_at.or(round_date) {
            Some(scheduled_at) => plan.assignments.push(MatchAssignment {
                match_id: m.id.clone(),
                round_id: m.round_id.clone(),
                scheduled_at,
            }),
            None => plan.skipped.push(m.id.clone()),
        }
    }

    debug!(
        assignments = plan.assignments.len(),
        skipped = plan.skipped.len(),
        "built apply plan"
    );
    plan
}
