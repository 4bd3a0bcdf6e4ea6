// src/structure/tournament.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Group, Match, Round, RoundId};
use crate::errors::{Result, ScheduleError};
use crate::ingest::observe_round_lengths;
use crate::structure::dependency::DependencyIndex;
use crate::structure::topology::{topology_for, Topology};
use crate::types::BracketType;

/// A fetched stage: rounds, groups and matches plus the derived round
/// dependencies and the topology chosen for its bracket type.
///
/// The dependency index is built once here. Scheduling mutates round dates
/// in place through [`TournamentStructure::set_round_date`].
#[derive(Debug)]
pub struct TournamentStructure {
    rounds: Vec<Round>,
    round_index: HashMap<RoundId, usize>,
    groups: Vec<Group>,
    matches: Vec<Match>,
    dependencies: DependencyIndex,
    topology: Box<dyn Topology>,
}

impl TournamentStructure {
    /// Build the structure. Round lengths are raised to the longest match
    /// seen in each round before anything else happens.
    pub fn new(
        mut rounds: Vec<Round>,
        groups: Vec<Group>,
        matches: Vec<Match>,
        bracket_type: BracketType,
    ) -> Self {
        observe_round_lengths(&mut rounds, &matches);

        let round_index = rounds
            .iter()
            .enumerate()
            .map(|(pos, round)| (round.id.clone(), pos))
            .collect();
        let dependencies = DependencyIndex::build(&matches);
        let topology = topology_for(bracket_type, &rounds);

        debug!(
            rounds = rounds.len(),
            groups = groups.len(),
            matches = matches.len(),
            dependency_entries = dependencies.entries().len(),
            %bracket_type,
            "built tournament structure"
        );

        Self {
            rounds,
            round_index,
            groups,
            matches,
            dependencies,
            topology,
        }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn dependencies(&self) -> &DependencyIndex {
        &self.dependencies
    }

    pub fn bracket_type(&self) -> BracketType {
        self.topology.bracket_type()
    }

    pub fn round(&self, round_id: &str) -> Option<&Round> {
        self.round_index.get(round_id).map(|&pos| &self.rounds[pos])
    }

    pub fn contains_round(&self, round_id: &str) -> bool {
        self.round_index.contains_key(round_id)
    }

    pub fn group_name(&self, group_id: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|group| group.id == group_id)
            .map(|group| group.name.as_str())
    }

    /// Write a round's resolved date.
    pub fn set_round_date(&mut self, round_id: &str, date: Option<DateTime<Utc>>) -> Result<()> {
        let pos = *self
            .round_index
            .get(round_id)
            .ok_or_else(|| ScheduleError::UnknownRound(round_id.to_string()))?;
        self.rounds[pos].scheduled_at = date;
        Ok(())
    }

    /// Set or clear the per-match override.
    pub fn set_match_date(&mut self, match_id: &str, date: Option<DateTime<Utc>>) -> Result<()> {
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| ScheduleError::UnknownMatch(match_id.to_string()))?;
        m.scheduled_at = date;
        Ok(())
    }

    /// Forget every round date from a previous run.
    pub fn clear_round_dates(&mut self) {
        for round in &mut self.rounds {
            round.scheduled_at = None;
        }
    }

    pub fn first_round_ids(&self) -> Vec<RoundId> {
        self.topology.first_rounds(&self.rounds, &self.dependencies)
    }

    pub fn last_round_ids(&self) -> Vec<RoundId> {
        self.topology.last_rounds(&self.rounds, &self.dependencies)
    }

    pub fn preceding_round_ids(&self, round_id: &str) -> Vec<RoundId> {
        self.topology.preceding_rounds(round_id, &self.dependencies)
    }

    pub fn following_round_ids(&self, round_id: &str) -> Vec<RoundId> {
        self.topology.following_rounds(round_id, &self.dependencies)
    }

    pub fn first_rounds(&self) -> Vec<&Round> {
        self.resolve(self.first_round_ids())
    }

    pub fn last_rounds(&self) -> Vec<&Round> {
        self.resolve(self.last_round_ids())
    }

    pub fn preceding_rounds(&self, round_id: &str) -> Vec<&Round> {
        self.resolve(self.preceding_round_ids(round_id))
    }

    pub fn following_rounds(&self, round_id: &str) -> Vec<&Round> {
        self.resolve(self.following_round_ids(round_id))
    }

    /// Map ids to rounds, dropping ids that are not rounds of this structure.
    fn resolve(&self, ids: Vec<RoundId>) -> Vec<&Round> {
        ids.iter().filter_map(|id| self.round(id)).collect()
    }
}
