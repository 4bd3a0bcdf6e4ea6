// src/structure/dependency.rs

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Match, RoundId};

/// Direct round-to-round adjacency for a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundDependency {
    pub round_id: RoundId,
    /// Rounds containing a match that feeds one of this round's matches.
    pub preceding_round_ids: Vec<RoundId>,
    /// Rounds with a match fed by one of this round's matches.
    pub following_round_ids: Vec<RoundId>,
}

impl RoundDependency {
    fn empty(round_id: &str) -> Self {
        Self {
            round_id: round_id.to_string(),
            preceding_round_ids: Vec::new(),
            following_round_ids: Vec::new(),
        }
    }
}

/// Round dependency table derived from match opponent sources.
///
/// Built once in a single pass over the matches; never mutated afterwards.
/// A round that appears in no match has no entry, and every query treats
/// that exactly like an entry with empty lists.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    entries: Vec<RoundDependency>,
    by_round: HashMap<RoundId, usize>,
}

impl DependencyIndex {
    /// Build the index from `matches`.
    ///
    /// The result does not depend on the order of `matches`: a forward edge
    /// whose source round has no entry yet is recovered when that round's
    /// first match is processed.
    pub fn build(matches: &[Match]) -> Self {
        let by_match: HashMap<&str, &Match> =
            matches.iter().map(|m| (m.id.as_str(), m)).collect();

        let mut index = Self::default();

        for m in matches {
            let slot = index.ensure_entry(&m.round_id);

            // Stage newly found preceding rounds.
            let mut new_preceding: Vec<RoundId> = Vec::new();
            for source_id in m.source_match_ids() {
                let Some(source) = by_match.get(source_id) else {
                    trace!(
                        match_id = %m.id,
                        source = %source_id,
                        "opponent source is not a known match; ignoring"
                    );
                    continue;
                };

                let known = &index.entries[slot].preceding_round_ids;
                if !known.contains(&source.round_id) && !new_preceding.contains(&source.round_id)
                {
                    new_preceding.push(source.round_id.clone());
                }
            }

            index.entries[slot]
                .preceding_round_ids
                .extend(new_preceding.iter().cloned());

            // Recover forward edges from rounds processed earlier.
            let recovered: Vec<RoundId> = index
                .entries
                .iter()
                .filter(|dep| dep.preceding_round_ids.contains(&m.round_id))
                .map(|dep| dep.round_id.clone())
                .collect();
            let following = &mut index.entries[slot].following_round_ids;
            for id in recovered {
                if !following.contains(&id) {
                    following.push(id);
                }
            }

            // Back-link the new preceding rounds that already have an entry.
            for preceding in &new_preceding {
                if let Some(&pos) = index.by_round.get(preceding) {
                    let following = &mut index.entries[pos].following_round_ids;
                    if !following.contains(&m.round_id) {
                        following.push(m.round_id.clone());
                    }
                }
            }
        }

        index
    }

    fn ensure_entry(&mut self, round_id: &str) -> usize {
        if let Some(&pos) = self.by_round.get(round_id) {
            return pos;
        }
        let pos = self.entries.len();
        self.entries.push(RoundDependency::empty(round_id));
        self.by_round.insert(round_id.to_string(), pos);
        pos
    }

    /// All entries, in the order their rounds were first seen.
    pub fn entries(&self) -> &[RoundDependency] {
        &self.entries
    }

    pub fn get(&self, round_id: &str) -> Option<&RoundDependency> {
        self.by_round.get(round_id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, round_id: &str) -> bool {
        self.by_round.contains_key(round_id)
    }

    /// Immediate preceding rounds (empty if the round has no entry).
    pub fn preceding_of(&self, round_id: &str) -> &[RoundId] {
        self.get(round_id)
            .map(|dep| dep.preceding_round_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate following rounds (empty if the round has no entry).
    pub fn following_of(&self, round_id: &str) -> &[RoundId] {
        self.get(round_id)
            .map(|dep| dep.following_round_ids.as_slice())
            .unwrap_or(&[])
    }
}
