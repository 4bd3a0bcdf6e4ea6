// src/ingest.rs

//! Helpers applied to freshly fetched records before scheduling.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{Match, MatchLengthSetting, Round, DEFAULT_MATCH_LENGTH};

/// Raise every round's `round_length` to the longest match seen for it.
///
/// Never lowers a length, so applying it twice is harmless.
pub fn observe_round_lengths(rounds: &mut [Round], matches: &[Match]) {
    let mut longest: HashMap<&str, u32> = HashMap::new();
    for m in matches {
        let games = longest.entry(m.round_id.as_str()).or_insert(0);
        *games = (*games).max(m.number_of_games);
    }

    for round in rounds.iter_mut() {
        if let Some(&games) = longest.get(round.id.as_str()) {
            round.observe_match_length(games);
        }
    }
}

/// One editable duration per distinct game count, sorted by game count.
pub fn default_match_lengths(matches: &[Match]) -> Vec<MatchLengthSetting> {
    let counts: BTreeSet<u32> = matches.iter().map(|m| m.number_of_games).collect();
    counts
        .into_iter()
        .map(|number_of_games| MatchLengthSetting {
            number_of_games,
            match_length_min: DEFAULT_MATCH_LENGTH.match_length_min,
        })
        .collect()
}
