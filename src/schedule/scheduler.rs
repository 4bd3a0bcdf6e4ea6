// src/schedule/scheduler.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::validate::validate_bracket_type;
use crate::domain::{RoundId, ScheduleConfig};
use crate::errors::{Result, ScheduleError};
use crate::schedule::cadence::Cadence;
use crate::structure::TournamentStructure;

/// Per-run state of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// Resolution started but has not returned yet.
    InProgress,
    /// Resolved to this date in the current run.
    Done(DateTime<Utc>),
}

/// Outcome of a full scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSummary {
    /// Number of rounds that received a date.
    pub scheduled: usize,
    /// Rounds no terminal round reaches; they keep `scheduled_at = None`.
    pub unscheduled: Vec<RoundId>,
}

/// Backward scheduling pass over a [`TournamentStructure`].
///
/// Each round resolves its predecessors first, then picks its own date from
/// (in order) an anchoring phase, the default phase when it has no
/// predecessors, or the latest predecessor advanced by the cadence.
///
/// A round is resolved at most once per scheduler; revisiting a round that
/// is still being resolved means the dependencies loop back on themselves.
pub struct RoundScheduler<'a> {
    structure: &'a mut TournamentStructure,
    config: &'a ScheduleConfig,
    cadence: Cadence,
    visits: HashMap<RoundId, VisitState>,
    /// Rounds currently being resolved, outermost first.
    path: Vec<RoundId>,
}

impl<'a> RoundScheduler<'a> {
    pub fn new(structure: &'a mut TournamentStructure, config: &'a ScheduleConfig) -> Self {
        Self {
            structure,
            config,
            cadence: Cadence::from_config(config),
            visits: HashMap::new(),
            path: Vec::new(),
        }
    }

    /// Resolve every round reachable from a terminal round.
    ///
    /// Fails before touching any date if the config's bracket type differs
    /// from the structure's topology.
    pub fn schedule_all(&mut self) -> Result<ScheduleSummary> {
        validate_bracket_type(self.config, self.structure)?;
        self.structure.clear_round_dates();

        let last_rounds = self.structure.last_round_ids();
        info!(
            mode = %self.config.scheduling_mode,
            terminal_rounds = last_rounds.len(),
            "scheduling tournament"
        );

        for round_id in &last_rounds {
            self.schedule_round(round_id)?;
        }

        let unscheduled: Vec<RoundId> = self
            .structure
            .rounds()
            .iter()
            .filter(|round| round.scheduled_at.is_none())
            .map(|round| round.id.clone())
            .collect();

        if !unscheduled.is_empty() {
            warn!(
                ?unscheduled,
                "rounds not reachable from any terminal round were left unscheduled"
            );
        }

        let summary = ScheduleSummary {
            scheduled: self.structure.rounds().len() - unscheduled.len(),
            unscheduled,
        };
        info!(scheduled = summary.scheduled, "scheduling finished");
        Ok(summary)
    }

    /// Resolve one round (and, transitively, its predecessors) and store the
    /// result on the round.
    pub fn schedule_round(&mut self, round_id: &str) -> Result<DateTime<Utc>> {
        if !self.structure.contains_round(round_id) {
            return Err(ScheduleError::UnknownRound(round_id.to_string()));
        }

        match self.visits.get(round_id) {
            Some(VisitState::Done(date)) => return Ok(*date),
            Some(VisitState::InProgress) => return Err(self.cycle_error(round_id)),
            None => {}
        }

        self.visits
            .insert(round_id.to_string(), VisitState::InProgress);
        self.path.push(round_id.to_string());

        let config = self.config;
        let preceding = self.structure.preceding_round_ids(round_id);

        // Predecessors are always resolved, even when a phase pins this
        // round, so that their own dates get written.
        let mut latest: Option<(DateTime<Utc>, u32)> = None;
        for preceding_id in &preceding {
            let date = self.schedule_round(preceding_id)?;
            let length = self
                .structure
                .round(preceding_id)
                .map(|round| round.round_length)
                .unwrap_or(1);

            latest = match latest {
                Some(best) if best >= (date, length) => Some(best),
                _ => Some((date, length)),
            };
        }

        let date = match (config.phase_for_round(round_id), latest) {
            (Some(phase), _) => {
                debug!(round = %round_id, date = %phase.start_date, "round anchored by phase");
                phase.start_date
            }
            (None, None) => {
                let phase = config
                    .default_phase()
                    .ok_or_else(|| ScheduleError::MissingDefaultPhase(round_id.to_string()))?;
                debug!(
                    round = %round_id,
                    date = %phase.start_date,
                    "round has no predecessors; using default phase"
                );
                phase.start_date
            }
            (None, Some((from, length))) => {
                let date = self.cadence.advance(from, length, config)?;
                debug!(
                    round = %round_id,
                    predecessors = preceding.len(),
                    %from,
                    %date,
                    "round placed after latest predecessor"
                );
                date
            }
        };

        self.structure.set_round_date(round_id, Some(date))?;
        self.visits
            .insert(round_id.to_string(), VisitState::Done(date));
        self.path.pop();

        Ok(date)
    }

    fn cycle_error(&self, round_id: &str) -> ScheduleError {
        let start = self
            .path
            .iter()
            .position(|id| id == round_id)
            .unwrap_or(0);
        let mut cycle: Vec<&str> = self.path[start..].iter().map(String::as_str).collect();
        cycle.push(round_id);
        ScheduleError::DependencyCycle(cycle.join(" -> "))
    }
}

impl TournamentStructure {
    /// Clear all round dates, then resolve every round reachable from a
    /// terminal round under `config`.
    pub fn schedule_tournament(&mut self, config: &ScheduleConfig) -> Result<ScheduleSummary> {
        RoundScheduler::new(self, config).schedule_all()
    }

    /// Resolve a single round (and its predecessors) under `config`.
    pub fn schedule_round(
        &mut self,
        round_id: &str,
        config: &ScheduleConfig,
    ) -> Result<DateTime<Utc>> {
        validate_bracket_type(config, self)?;
        RoundScheduler::new(self, config).schedule_round(round_id)
    }
}
