// tests/topology_queries.rs

mod common;
use crate::common::StageBuilder;

use smartschedule::domain::Round;
use smartschedule::structure::{DependencyIndex, PoolTopology, Topology};
use smartschedule::types::BracketType;

fn ids(rounds: &[&Round]) -> Vec<String> {
    rounds.iter().map(|round| round.id.clone()).collect()
}

fn two_pools(bracket_type: BracketType) -> StageBuilder {
    StageBuilder::new(bracket_type)
        .with_group("ga", "Pool A")
        .with_group("gb", "Pool B")
        .with_round("a1", "ga", 1)
        .with_round("a2", "ga", 2)
        .with_round("b1", "gb", 1)
        .with_round("b2", "gb", 2)
        .with_match("a1-1", "a1", 1)
        .with_match("a2-1", "a2", 1)
        .with_match("b1-1", "b1", 1)
        .with_match("b2-1", "b2", 1)
}

#[test]
fn bracket_first_and_last_rounds_follow_the_graph() {
    let structure = StageBuilder::chain(&["r1", "r2", "r3"]).build();

    assert_eq!(structure.bracket_type(), BracketType::Bracket);
    assert_eq!(ids(&structure.first_rounds()), vec!["r1"]);
    assert_eq!(ids(&structure.last_rounds()), vec!["r3"]);
    assert_eq!(ids(&structure.preceding_rounds("r3")), vec!["r2"]);
    assert_eq!(ids(&structure.following_rounds("r1")), vec!["r2"]);
}

#[test]
fn bracket_round_without_matches_is_first_and_last() {
    let structure = StageBuilder::chain(&["r1", "r2"])
        .with_round("bye", "g1", 9)
        .build();

    assert!(structure.first_round_ids().contains(&"bye".to_string()));
    assert!(structure.last_round_ids().contains(&"bye".to_string()));
}

#[test]
fn pools_have_one_first_round_per_group() {
    let structure = two_pools(BracketType::Rounds).build();

    assert_eq!(structure.bracket_type(), BracketType::Rounds);
    assert_eq!(structure.first_round_ids(), vec!["a1", "b1"]);
}

#[test]
fn pool_predecessor_is_previous_round_of_the_same_group() {
    let structure = two_pools(BracketType::Rounds).build();

    assert_eq!(structure.preceding_round_ids("a2"), vec!["a1"]);
    assert_eq!(structure.preceding_round_ids("b2"), vec!["b1"]);
    assert!(structure.preceding_round_ids("a1").is_empty());
    assert!(structure.preceding_round_ids("b1").is_empty());
}

#[test]
fn pools_without_source_links_are_all_terminal() {
    let structure = two_pools(BracketType::Rounds).build();

    assert_eq!(structure.last_round_ids(), vec!["a1", "a2", "b1", "b2"]);
    assert!(structure.following_round_ids("a1").is_empty());
}

#[test]
fn same_records_read_as_bracket_have_no_predecessors() {
    let structure = two_pools(BracketType::Bracket).build();

    assert_eq!(structure.first_round_ids(), vec!["a1", "a2", "b1", "b2"]);
    assert!(structure.preceding_round_ids("a2").is_empty());
}

#[test]
fn pool_sequence_is_ordered_by_round_number() {
    let rounds = vec![
        Round::new("a3", "ga", "Round 3", 3, 4),
        Round::new("a1", "ga", "Round 1", 1, 4),
        Round::new("a2", "ga", "Round 2", 2, 4),
    ];
    let topology = PoolTopology::new(&rounds);
    let deps = DependencyIndex::default();

    assert_eq!(topology.group_sequence("ga"), &["a1", "a2", "a3"]);
    assert_eq!(topology.first_rounds(&rounds, &deps), vec!["a1"]);
    assert_eq!(topology.preceding_rounds("a3", &deps), vec!["a2"]);
    assert!(topology.group_sequence("nope").is_empty());
}

#[test]
fn unknown_round_has_no_neighbours() {
    let structure = StageBuilder::chain(&["r1", "r2"]).build();

    assert!(structure.preceding_rounds("zz").is_empty());
    assert!(structure.following_rounds("zz").is_empty());
}
