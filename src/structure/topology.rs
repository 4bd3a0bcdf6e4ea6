// src/structure/topology.rs

//! Round-order interpretations of a stage.
//!
//! Elimination brackets form a DAG where progression is explicit (the winner
//! of match A feeds match B), so [`BracketTopology`] reads order straight off
//! the [`DependencyIndex`]. Pools and round-robin groups have no
//! opponent-sourced links between rounds, so [`PoolTopology`] falls back to
//! sequential order within each group.
//!
//! The implementation is chosen once when the structure is built; see
//! [`topology_for`].

use std::collections::HashMap;
use std::fmt::Debug;

use crate::domain::{GroupId, Round, RoundId};
use crate::structure::dependency::DependencyIndex;
use crate::types::BracketType;

/// Round-order queries over a stage.
///
/// `following_rounds` and `last_rounds` are read from the dependency index
/// under every interpretation; implementations override only what differs.
pub trait Topology: Debug + Send + Sync {
    fn bracket_type(&self) -> BracketType;

    /// Rounds that start a chain and so get a seeded phase.
    fn first_rounds(&self, rounds: &[Round], deps: &DependencyIndex) -> Vec<RoundId>;

    /// Rounds that must be resolved before `round_id`.
    fn preceding_rounds(&self, round_id: &str, deps: &DependencyIndex) -> Vec<RoundId>;

    fn following_rounds(&self, round_id: &str, deps: &DependencyIndex) -> Vec<RoundId> {
        deps.following_of(round_id).to_vec()
    }

    /// Terminal rounds: the entry points of a scheduling run.
    fn last_rounds(&self, rounds: &[Round], deps: &DependencyIndex) -> Vec<RoundId> {
        rounds
            .iter()
            .filter(|round| deps.following_of(&round.id).is_empty())
            .map(|round| round.id.clone())
            .collect()
    }
}

/// Elimination-bracket interpretation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketTopology;

impl Topology for BracketTopology {
    fn bracket_type(&self) -> BracketType {
        BracketType::Bracket
    }

    fn first_rounds(&self, rounds: &[Round], deps: &DependencyIndex) -> Vec<RoundId> {
        rounds
            .iter()
            .filter(|round| deps.preceding_of(&round.id).is_empty())
            .map(|round| round.id.clone())
            .collect()
    }

    fn preceding_rounds(&self, round_id: &str, deps: &DependencyIndex) -> Vec<RoundId> {
        deps.preceding_of(round_id).to_vec()
    }
}

/// Parallel pool / round-robin interpretation.
///
/// Each group's rounds run in sequence, ordered by round number (ties keep
/// input order). Groups run side by side, each with its own first round.
#[derive(Debug, Clone, Default)]
pub struct PoolTopology {
    /// Group ids in order of first appearance.
    groups: Vec<GroupId>,
    /// Ordered round ids per group.
    sequences: HashMap<GroupId, Vec<RoundId>>,
    /// Round id -> (group id, position in that group's sequence).
    positions: HashMap<RoundId, (GroupId, usize)>,
}

impl PoolTopology {
    pub fn new(rounds: &[Round]) -> Self {
        let mut groups: Vec<GroupId> = Vec::new();
        let mut grouped: HashMap<GroupId, Vec<&Round>> = HashMap::new();

        for round in rounds {
            if !grouped.contains_key(&round.group_id) {
                groups.push(round.group_id.clone());
            }
            grouped.entry(round.group_id.clone()).or_default().push(round);
        }

        let mut sequences = HashMap::new();
        let mut positions = HashMap::new();

        for (group_id, mut members) in grouped {
            // Stable: equal numbers keep input order.
            members.sort_by_key(|round| round.number);
            let ids: Vec<RoundId> = members.iter().map(|round| round.id.clone()).collect();
            for (pos, id) in ids.iter().enumerate() {
                positions.insert(id.clone(), (group_id.clone(), pos));
            }
            sequences.insert(group_id, ids);
        }

        Self {
            groups,
            sequences,
            positions,
        }
    }

    /// Ordered round ids of one group.
    pub fn group_sequence(&self, group_id: &str) -> &[RoundId] {
        self.sequences
            .get(group_id)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }
}

impl Topology for PoolTopology {
    fn bracket_type(&self) -> BracketType {
        BracketType::Rounds
    }

    fn first_rounds(&self, _rounds: &[Round], _deps: &DependencyIndex) -> Vec<RoundId> {
        self.groups
            .iter()
            .filter_map(|group_id| self.group_sequence(group_id).first().cloned())
            .collect()
    }

    fn preceding_rounds(&self, round_id: &str, _deps: &DependencyIndex) -> Vec<RoundId> {
        match self.positions.get(round_id) {
            Some((group_id, pos)) if *pos > 0 => {
                vec![self.group_sequence(group_id)[pos - 1].clone()]
            }
            _ => Vec::new(),
        }
    }
}

/// Select the topology implementation for `bracket_type`.
pub fn topology_for(bracket_type: BracketType, rounds: &[Round]) -> Box<dyn Topology> {
    match bracket_type {
        BracketType::Bracket => Box::new(BracketTopology),
        BracketType::Rounds => Box::new(PoolTopology::new(rounds)),
    }
}
