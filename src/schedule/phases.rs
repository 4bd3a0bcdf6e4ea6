// src/schedule/phases.rs

//! Creating and editing the phase list of a [`ScheduleConfig`].

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Phase, ScheduleConfig};
use crate::errors::{Result, ScheduleError};
use crate::structure::TournamentStructure;

/// One phase per first round, all starting at `start`.
///
/// The first seeded phase is the default.
pub fn seed_phases(structure: &TournamentStructure, start: DateTime<Utc>) -> Vec<Phase> {
    let phases: Vec<Phase> = structure
        .first_rounds()
        .into_iter()
        .enumerate()
        .map(|(pos, round)| Phase {
            group_id: round.group_id.clone(),
            starting_round_id: round.id.clone(),
            start_date: start,
            is_first: true,
            is_default: pos == 0,
        })
        .collect();

    debug!(phases = phases.len(), %start, "seeded phases from first rounds");
    phases
}

/// Whether another round can still receive a phase.
pub fn can_add_phase(config: &ScheduleConfig, structure: &TournamentStructure) -> bool {
    config.phases.len() < structure.rounds().len()
}

/// Anchor the first round (in structure order) that has no phase yet.
///
/// The new phase starts where the last phase starts. Returns the new phase,
/// or `None` when there is nothing to copy from or nothing left to anchor.
pub fn add_phase<'c>(
    config: &'c mut ScheduleConfig,
    structure: &TournamentStructure,
) -> Option<&'c Phase> {
    let start_date = config.phases.last()?.start_date;

    let round = structure
        .rounds()
        .iter()
        .find(|round| config.phase_for_round(&round.id).is_none())?;

    debug!(round = %round.id, %start_date, "adding phase");
    config.phases.push(Phase {
        group_id: round.group_id.clone(),
        starting_round_id: round.id.clone(),
        start_date,
        is_first: false,
        is_default: false,
    });
    config.phases.last()
}

/// Remove the phase at `index`. The default phase cannot be removed.
pub fn remove_phase(config: &mut ScheduleConfig, index: usize) -> Result<Phase> {
    let phase = config.phases.get(index).ok_or_else(|| {
        ScheduleError::ConfigError(format!(
            "phase index {index} out of range ({} phases)",
            config.phases.len()
        ))
    })?;

    if phase.is_default {
        return Err(ScheduleError::ConfigError(format!(
            "phase for round '{}' is the default phase and cannot be removed",
            phase.starting_round_id
        )));
    }

    Ok(config.phases.remove(index))
}
