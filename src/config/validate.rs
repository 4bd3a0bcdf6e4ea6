// src/config/validate.rs

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{RawScheduleFile, RawStageFile, StageFile};
use crate::domain::{MatchLengthSetting, Phase, ScheduleConfig, MAX_DAYS};
use crate::errors::{Result, ScheduleError};
use crate::ingest::default_match_lengths;
use crate::structure::TournamentStructure;
use crate::types::{defaults_for_stage_type, SchedulingMode};

impl TryFrom<RawStageFile> for StageFile {
    type Error = ScheduleError;

    fn try_from(raw: RawStageFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_stage(&raw)?;
        Ok(StageFile::new_unchecked(raw))
    }
}

fn validate_raw_stage(stage: &RawStageFile) -> Result<()> {
    ensure_has_rounds(stage)?;
    ensure_unique_ids(stage)?;
    validate_match_references(stage)?;
    validate_round_graph(stage)?;
    Ok(())
}

fn ensure_has_rounds(stage: &RawStageFile) -> Result<()> {
    if stage.rounds.is_empty() {
        return Err(ScheduleError::ConfigError(
            "stage must contain at least one round".to_string(),
        ));
    }
    Ok(())
}

fn ensure_unique_ids(stage: &RawStageFile) -> Result<()> {
    check_unique("group", stage.groups.iter().map(|g| g.id.as_str()))?;
    check_unique("round", stage.rounds.iter().map(|r| r.id.as_str()))?;
    check_unique("match", stage.matches.iter().map(|m| m.id.as_str()))?;
    Ok(())
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ScheduleError::ConfigError(format!(
                "duplicate {kind} id '{id}'"
            )));
        }
    }
    Ok(())
}

/// Every match must sit in a known round. Group ids are only checked when
/// the stage lists its groups at all.
fn validate_match_references(stage: &RawStageFile) -> Result<()> {
    let rounds: HashSet<&str> = stage.rounds.iter().map(|r| r.id.as_str()).collect();
    let groups: HashSet<&str> = stage.groups.iter().map(|g| g.id.as_str()).collect();

    for m in &stage.matches {
        if !rounds.contains(m.round_id.as_str()) {
            return Err(ScheduleError::ConfigError(format!(
                "match '{}' references unknown round '{}'",
                m.id, m.round_id
            )));
        }
        if !groups.is_empty() && !groups.contains(m.group_id.as_str()) {
            return Err(ScheduleError::ConfigError(format!(
                "match '{}' references unknown group '{}'",
                m.id, m.group_id
            )));
        }
    }
    Ok(())
}

fn validate_round_graph(stage: &RawStageFile) -> Result<()> {
    // Edge direction: source round -> fed round.
    let round_of: HashMap<&str, &str> = stage
        .matches
        .iter()
        .map(|m| (m.id.as_str(), m.round_id.as_str()))
        .collect();

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for round in &stage.rounds {
        graph.add_node(round.id.as_str());
    }

    for m in &stage.matches {
        let sources = m
            .opponents
            .iter()
            .filter_map(|opp| opp.source_node_id.as_deref())
            .filter_map(|source| round_of.get(source).copied());
        for source_round in sources {
            graph.add_edge(source_round, m.round_id.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(ScheduleError::DependencyCycle(format!(
            "cycle detected in round graph involving round '{}'",
            cycle.node_id()
        ))),
    }
}

/// Turn a schedule file into a validated [`ScheduleConfig`] for `structure`.
///
/// Same as [`build_schedule_config`] followed by [`validate_schedule_config`].
pub fn resolve_schedule(
    raw: RawScheduleFile,
    structure: &TournamentStructure,
    stage_type: &str,
) -> Result<ScheduleConfig> {
    let config = build_schedule_config(raw, structure, stage_type)?;
    validate_schedule_config(&config, structure)?;
    Ok(config)
}

/// Turn a schedule file into a [`ScheduleConfig`] for `structure` without
/// checking policy values, so callers can apply overrides first.
///
/// - Mode falls back to the stage type's default cadence.
/// - Without `[[match_length]]` entries, one 30 minute setting per game
///   count seen in the stage is used.
/// - Phases are attached to their round's group; a phase on a first round
///   is marked `is_first`.
///
/// The phase list may come back empty; callers seed it in that case.
/// Phases on unknown rounds are still rejected here.
pub fn build_schedule_config(
    raw: RawScheduleFile,
    structure: &TournamentStructure,
    stage_type: &str,
) -> Result<ScheduleConfig> {
    let (default_mode, _) = defaults_for_stage_type(stage_type);
    let mut config = ScheduleConfig::new(
        raw.schedule.mode.unwrap_or(default_mode),
        structure.bracket_type(),
    );

    if let Some(days) = raw.schedule.days {
        config.days = days;
    }

    config.match_length_settings = if raw.match_length.is_empty() {
        default_match_lengths(structure.matches())
    } else {
        raw.match_length
            .iter()
            .map(|entry| MatchLengthSetting {
                number_of_games: entry.games,
                match_length_min: entry.minutes,
            })
            .collect()
    };

    let first_rounds: HashSet<String> = structure.first_round_ids().into_iter().collect();
    for entry in raw.phase {
        let round = structure.round(&entry.round).ok_or_else(|| {
            ScheduleError::ConfigError(format!(
                "[[phase]] references unknown round '{}'",
                entry.round
            ))
        })?;
        config.phases.push(Phase {
            group_id: round.group_id.clone(),
            starting_round_id: round.id.clone(),
            start_date: entry.start,
            is_first: first_rounds.contains(&round.id),
            is_default: entry.default,
        });
    }

    Ok(config)
}

/// Check a finished config against the structure it will schedule.
pub fn validate_schedule_config(
    config: &ScheduleConfig,
    structure: &TournamentStructure,
) -> Result<()> {
    validate_bracket_type(config, structure)?;
    validate_days(config)?;
    validate_match_lengths(config)?;
    validate_phases(config, structure)?;
    Ok(())
}

/// The topology is fixed when the structure is built; the policy must agree.
pub(crate) fn validate_bracket_type(
    config: &ScheduleConfig,
    structure: &TournamentStructure,
) -> Result<()> {
    if config.bracket_type != structure.bracket_type() {
        return Err(ScheduleError::ConfigError(format!(
            "schedule bracket_type '{}' does not match the stage structure ('{}')",
            config.bracket_type,
            structure.bracket_type()
        )));
    }
    Ok(())
}

fn validate_days(config: &ScheduleConfig) -> Result<()> {
    if config.scheduling_mode == SchedulingMode::Days && !(1..=MAX_DAYS).contains(&config.days) {
        return Err(ScheduleError::ConfigError(format!(
            "[schedule].days must be between 1 and {MAX_DAYS} (got {})",
            config.days
        )));
    }
    Ok(())
}

fn validate_match_lengths(config: &ScheduleConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for setting in &config.match_length_settings {
        if setting.match_length_min == 0 {
            return Err(ScheduleError::ConfigError(format!(
                "match length for {} game(s) must be >= 1 minute (got 0)",
                setting.number_of_games
            )));
        }
        if !seen.insert(setting.number_of_games) {
            return Err(ScheduleError::ConfigError(format!(
                "duplicate match length for {} game(s)",
                setting.number_of_games
            )));
        }
    }
    Ok(())
}

fn validate_phases(config: &ScheduleConfig, structure: &TournamentStructure) -> Result<()> {
    if config.phases.is_empty() {
        return Ok(());
    }

    let mut anchored = HashSet::new();
    for phase in &config.phases {
        if !structure.contains_round(&phase.starting_round_id) {
            return Err(ScheduleError::UnknownRound(phase.starting_round_id.clone()));
        }
        if !anchored.insert(phase.starting_round_id.as_str()) {
            return Err(ScheduleError::ConfigError(format!(
                "round '{}' has more than one phase",
                phase.starting_round_id
            )));
        }
    }

    let defaults = config.phases.iter().filter(|phase| phase.is_default).count();
    if defaults != 1 {
        return Err(ScheduleError::ConfigError(format!(
            "exactly one phase must be marked default (found {defaults})"
        )));
    }

    Ok(())
}
