// tests/config_loading.rs

mod common;
use crate::common::{demo_path, temp_file, utc};

use std::error::Error;

use smartschedule::config::{
    build_schedule_config, load_and_validate_stage, load_schedule_from_path, resolve_schedule,
    validate_schedule_config, StageFile,
};
use smartschedule::domain::MatchLengthSetting;
use smartschedule::errors::ScheduleError;
use smartschedule::structure::TournamentStructure;
use smartschedule::types::{BracketType, SchedulingMode};

type TestResult = Result<(), Box<dyn Error>>;

const CHAIN_STAGE: &str = r#"
[stage]
name = "Cup"
type = "single_elimination"

[[groups]]
id = "g1"
name = "Main"
number = 1

[[rounds]]
id = "r1"
group_id = "g1"
name = "Semis"
number = 1
size = 4

[[rounds]]
id = "r2"
group_id = "g1"
name = "Final"
number = 2
size = 2

[[matches]]
id = "sf1"
round_id = "r1"
group_id = "g1"
number_of_games = 3

[[matches]]
id = "final"
round_id = "r2"
group_id = "g1"
opponents = [{ number = 1, source_node_id = "sf1" }]
"#;

fn chain_structure() -> Result<(StageFile, TournamentStructure), Box<dyn Error>> {
    let file = temp_file(CHAIN_STAGE, ".toml");
    let stage = load_and_validate_stage(file.path())?;
    let structure = TournamentStructure::new(
        stage.rounds.clone(),
        stage.groups.clone(),
        stage.matches.clone(),
        stage.defaults().1,
    );
    Ok((stage, structure))
}

fn expect_config_error(result: Result<impl std::fmt::Debug, ScheduleError>, needle: &str) {
    match result {
        Err(ScheduleError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn toml_stage_loads_with_defaults_filled_in() -> TestResult {
    let (stage, structure) = chain_structure()?;

    assert_eq!(stage.name.as_deref(), Some("Cup"));
    assert_eq!(stage.stage_type, "single_elimination");
    assert_eq!(stage.defaults(), (SchedulingMode::Direct, BracketType::Bracket));
    assert_eq!(stage.matches[1].number_of_games, 1);
    assert_eq!(structure.round("r1").map(|r| r.round_length), Some(3));
    assert_eq!(structure.preceding_round_ids("r2"), vec!["r1"]);
    Ok(())
}

#[test]
fn json_stage_is_detected_by_extension() -> TestResult {
    let file = temp_file(
        r#"{
            "stage": { "type": "swiss" },
            "rounds": [{ "id": "s1", "group_id": "g", "number": 1 }],
            "matches": [{ "id": "m", "round_id": "s1", "group_id": "g", "number_of_games": 2 }]
        }"#,
        ".json",
    );

    let stage = load_and_validate_stage(file.path())?;

    assert_eq!(stage.defaults(), (SchedulingMode::Weekly, BracketType::Rounds));
    assert_eq!(stage.rounds[0].id, "s1");
    assert!(stage.groups.is_empty());
    Ok(())
}

#[test]
fn stage_without_rounds_is_rejected() {
    let file = temp_file("[stage]\ntype = \"pools\"\n", ".toml");
    expect_config_error(load_and_validate_stage(file.path()), "at least one round");
}

#[test]
fn duplicate_round_ids_are_rejected() {
    let file = temp_file(
        r#"
[[rounds]]
id = "r1"
group_id = "g1"
number = 1

[[rounds]]
id = "r1"
group_id = "g1"
number = 2
"#,
        ".toml",
    );
    expect_config_error(load_and_validate_stage(file.path()), "duplicate round id 'r1'");
}

#[test]
fn match_in_unknown_round_is_rejected() {
    let file = temp_file(
        r#"
[[rounds]]
id = "r1"
group_id = "g1"
number = 1

[[matches]]
id = "m1"
round_id = "r9"
group_id = "g1"
"#,
        ".toml",
    );
    expect_config_error(load_and_validate_stage(file.path()), "unknown round 'r9'");
}

#[test]
fn match_in_unlisted_group_is_rejected() {
    let file = temp_file(
        r#"
[[groups]]
id = "g1"
name = "Main"
number = 1

[[rounds]]
id = "r1"
group_id = "g1"
number = 1

[[matches]]
id = "m1"
round_id = "r1"
group_id = "g2"
"#,
        ".toml",
    );
    expect_config_error(load_and_validate_stage(file.path()), "unknown group 'g2'");
}

#[test]
fn cyclic_round_graph_returns_structured_error() {
    let file = temp_file(
        r#"
[[rounds]]
id = "A"
group_id = "g"
number = 1

[[rounds]]
id = "B"
group_id = "g"
number = 2

[[matches]]
id = "a"
round_id = "A"
group_id = "g"
opponents = [{ number = 1, source_node_id = "b" }]

[[matches]]
id = "b"
round_id = "B"
group_id = "g"
opponents = [{ number = 1, source_node_id = "a" }]
"#,
        ".toml",
    );

    match load_and_validate_stage(file.path()) {
        Err(ScheduleError::DependencyCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains('A') || msg.contains('B'));
        }
        other => panic!("Expected DependencyCycle error, got: {:?}", other),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = temp_file("[[rounds]\nid = ", ".toml");
    assert!(matches!(
        load_and_validate_stage(file.path()),
        Err(ScheduleError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate_stage("/definitely/not/here.toml"),
        Err(ScheduleError::IoError(_))
    ));
}

#[test]
fn schedule_file_resolves_against_structure() -> TestResult {
    let (stage, structure) = chain_structure()?;
    let file = temp_file(
        r#"
[schedule]
mode = "days"
days = 2

[[match_length]]
games = 3
minutes = 40

[[phase]]
round = "r1"
start = "2024-05-01T12:00:00Z"
default = true

[[phase]]
round = "r2"
start = "2024-05-10T12:00:00Z"
"#,
        ".toml",
    );

    let raw = load_schedule_from_path(file.path())?;
    let config = resolve_schedule(raw, &structure, &stage.stage_type)?;

    assert_eq!(config.scheduling_mode, SchedulingMode::Days);
    assert_eq!(config.days, 2);
    assert_eq!(config.bracket_type, BracketType::Bracket);
    assert_eq!(
        config.match_length_settings,
        vec![MatchLengthSetting { number_of_games: 3, match_length_min: 40 }]
    );
    assert_eq!(config.phases.len(), 2);
    assert!(config.phases[0].is_first && config.phases[0].is_default);
    assert!(!config.phases[1].is_first && !config.phases[1].is_default);
    assert_eq!(config.phases[1].group_id, "g1");
    assert_eq!(config.phases[1].start_date, utc(2024, 5, 10, 12, 0));
    Ok(())
}

#[test]
fn empty_schedule_file_uses_stage_defaults() -> TestResult {
    let (stage, structure) = chain_structure()?;
    let file = temp_file("", ".toml");

    let raw = load_schedule_from_path(file.path())?;
    let config = resolve_schedule(raw, &structure, &stage.stage_type)?;

    assert_eq!(config.scheduling_mode, SchedulingMode::Direct);
    assert!(config.phases.is_empty());
    assert_eq!(
        config.match_length_settings,
        vec![
            MatchLengthSetting { number_of_games: 1, match_length_min: 30 },
            MatchLengthSetting { number_of_games: 3, match_length_min: 30 },
        ]
    );
    Ok(())
}

#[test]
fn schedule_validation_failures() -> TestResult {
    let (stage, structure) = chain_structure()?;
    let cases = [
        (
            "[schedule]\nmode = \"days\"\ndays = 15\n",
            "between 1 and 14",
        ),
        (
            "[schedule]\nmode = \"days\"\ndays = 0\n",
            "between 1 and 14",
        ),
        ("[[match_length]]\ngames = 3\nminutes = 0\n", "must be >= 1 minute"),
        (
            "[[phase]]\nround = \"nope\"\nstart = \"2024-01-01T00:00:00Z\"\ndefault = true\n",
            "unknown round 'nope'",
        ),
        (
            "[[phase]]\nround = \"r1\"\nstart = \"2024-01-01T00:00:00Z\"\ndefault = true\n\
             [[phase]]\nround = \"r1\"\nstart = \"2024-01-02T00:00:00Z\"\n",
            "more than one phase",
        ),
        (
            "[[phase]]\nround = \"r1\"\nstart = \"2024-01-01T00:00:00Z\"\n",
            "exactly one phase must be marked default",
        ),
        (
            "[[phase]]\nround = \"r1\"\nstart = \"2024-01-01T00:00:00Z\"\ndefault = true\n\
             [[phase]]\nround = \"r2\"\nstart = \"2024-01-02T00:00:00Z\"\ndefault = true\n",
            "exactly one phase must be marked default",
        ),
    ];

    for (contents, needle) in cases {
        let file = temp_file(contents, ".toml");
        let raw = load_schedule_from_path(file.path())?;
        expect_config_error(resolve_schedule(raw, &structure, &stage.stage_type), needle);
    }
    Ok(())
}

#[test]
fn building_defers_policy_checks_until_overrides_are_applied() -> TestResult {
    let (stage, structure) = chain_structure()?;
    let file = temp_file(
        "[schedule]\nmode = \"days\"\ndays = 20\n\n\
         [[phase]]\nround = \"r1\"\nstart = \"2024-01-01T00:00:00Z\"\ndefault = true\n",
        ".toml",
    );

    let raw = load_schedule_from_path(file.path())?;
    let mut config = build_schedule_config(raw, &structure, &stage.stage_type)?;
    assert_eq!(config.days, 20);
    expect_config_error(
        validate_schedule_config(&config, &structure),
        "between 1 and 14",
    );

    config.days = 3;
    validate_schedule_config(&config, &structure)?;
    Ok(())
}

#[test]
fn building_still_rejects_phase_on_unknown_round() -> TestResult {
    let (stage, structure) = chain_structure()?;
    let file = temp_file(
        "[[phase]]\nround = \"nope\"\nstart = \"2024-01-01T00:00:00Z\"\ndefault = true\n",
        ".toml",
    );

    let raw = load_schedule_from_path(file.path())?;
    expect_config_error(
        build_schedule_config(raw, &structure, &stage.stage_type),
        "unknown round 'nope'",
    );
    Ok(())
}

#[test]
fn demo_playoffs_schedule_end_to_end() -> TestResult {
    let stage = load_and_validate_stage(demo_path("playoffs.toml"))?;
    let raw = load_schedule_from_path(demo_path("playoffs-schedule.toml"))?;
    let bracket_type = raw.schedule.bracket_type.unwrap_or(stage.defaults().1);
    let mut structure = TournamentStructure::new(
        stage.rounds.clone(),
        stage.groups.clone(),
        stage.matches.clone(),
        bracket_type,
    );

    let config = resolve_schedule(raw, &structure, &stage.stage_type)?;
    structure.schedule_tournament(&config)?;

    let date = |id: &str| structure.round(id).and_then(|r| r.scheduled_at);
    assert_eq!(date("r1"), Some(utc(2024, 6, 1, 14, 0)));
    assert_eq!(date("r2"), Some(utc(2024, 6, 1, 14, 45)));
    assert_eq!(date("r3"), Some(utc(2024, 6, 1, 19, 0)));
    Ok(())
}

#[test]
fn demo_pools_schedule_end_to_end() -> TestResult {
    let stage = load_and_validate_stage(demo_path("pools.json"))?;
    let raw = load_schedule_from_path(demo_path("pools-schedule.toml"))?;
    let bracket_type = raw.schedule.bracket_type.unwrap_or(stage.defaults().1);
    let mut structure = TournamentStructure::new(
        stage.rounds.clone(),
        stage.groups.clone(),
        stage.matches.clone(),
        bracket_type,
    );

    let config = resolve_schedule(raw, &structure, &stage.stage_type)?;
    structure.schedule_tournament(&config)?;

    assert_eq!(structure.bracket_type(), BracketType::Rounds);
    let date = |id: &str| structure.round(id).and_then(|r| r.scheduled_at);
    assert_eq!(date("a2"), Some(utc(2024, 3, 7, 18, 0)));
    assert_eq!(date("b2"), Some(utc(2024, 3, 7, 18, 0)));
    Ok(())
}
