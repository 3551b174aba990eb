use std::fs;
use std::path::PathBuf;

use league_terminal::snapshot::parse_league_snapshot_json;
use league_terminal::state::{Round, SeasonId};

const SEASONS: [SeasonId; 2] = [SeasonId::Season1, SeasonId::Season2];

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_snapshot_fixture_file() {
    let raw = read_fixture("league_snapshot.json");
    let report = parse_league_snapshot_json(&raw, &SEASONS).expect("fixture should parse");

    let season1 = report
        .data
        .season(SeasonId::Season1)
        .expect("season1 should exist");

    // The nameless team entry is dropped with a warning.
    assert_eq!(season1.teams.len(), 2);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("team entry without a name"))
    );

    let alpha = &season1.teams[0];
    assert_eq!(alpha.name, "Alpha");
    assert_eq!(alpha.points, Some(4));
    assert_eq!(alpha.form, "WD");

    // Beta exercises the lenient paths: numeric string played, long
    // aliases for goals, explicit null points.
    let beta = &season1.teams[1];
    assert_eq!(beta.played, 2);
    assert_eq!(beta.goals_for, 3);
    assert_eq!(beta.goals_against, 5);
    assert_eq!(beta.points, None);
    assert_eq!(beta.effective_points(), 1);
}

#[test]
fn fixture_rounds_cover_aliases_and_falsy_values() {
    let raw = read_fixture("league_snapshot.json");
    let report = parse_league_snapshot_json(&raw, &SEASONS).expect("fixture should parse");
    let fixtures = &report
        .data
        .season(SeasonId::Season1)
        .expect("season1 should exist")
        .fixtures;
    assert_eq!(fixtures.len(), 4);

    assert_eq!(fixtures[0].round, Some(Round::Matchday(1)));
    assert_eq!(fixtures[0].home, "Alpha");
    assert_eq!(fixtures[0].home_score, Some(2));

    // Legacy fixtureNum alias with short team-name keys.
    assert_eq!(fixtures[1].round, Some(Round::Stage("SF1".to_string())));
    assert_eq!(fixtures[1].home, "Alpha");
    assert_eq!(fixtures[1].home_score, None);
    assert_eq!(fixtures[1].away_score, None);

    // Round 0 is present, not missing.
    assert_eq!(fixtures[2].round, Some(Round::Matchday(0)));

    // A whitespace round is present too, verbatim; the numeric-string
    // score parses.
    assert_eq!(fixtures[3].round, Some(Round::Stage(" ".to_string())));
    assert_eq!(fixtures[3].home_score, Some(3));
    assert_eq!(fixtures[3].away_score, None);
}

#[test]
fn null_season_payload_degrades_to_empty_with_a_diagnostic() {
    let raw = read_fixture("league_snapshot.json");
    let report = parse_league_snapshot_json(&raw, &SEASONS).expect("fixture should parse");

    let season2 = report
        .data
        .season(SeasonId::Season2)
        .expect("season2 should still exist");
    assert!(season2.teams.is_empty());
    assert!(season2.fixtures.is_empty());
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("season2") && w.contains("missing backend payload"))
    );
}

#[test]
fn empty_or_null_snapshot_degrades_to_empty_league() {
    for raw in ["", "   ", "null"] {
        let report = parse_league_snapshot_json(raw, &SEASONS).expect("should not error");
        assert_eq!(report.data.seasons.len(), 2);
        assert!(report.data.seasons.iter().all(|(_, data)| data.is_empty()));
        assert!(!report.warnings.is_empty());
    }
}

#[test]
fn invalid_json_is_an_error() {
    assert!(parse_league_snapshot_json("{not json", &SEASONS).is_err());
}

#[test]
fn non_array_sections_warn_and_default() {
    let raw = r#"{"season1": {"teams": "oops", "fixtures": 7}, "season2": {"teams": [], "fixtures": []}}"#;
    let report = parse_league_snapshot_json(raw, &SEASONS).expect("should parse");
    let season1 = report.data.season(SeasonId::Season1).unwrap();
    assert!(season1.is_empty());
    assert!(report.warnings.iter().any(|w| w.contains("teams is not an array")));
    assert!(report.warnings.iter().any(|w| w.contains("fixtures is not an array")));
}
