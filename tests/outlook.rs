use league_terminal::analysis::team_outlook;
use league_terminal::state::{Fixture, Round, SeasonData, Team};

fn team(name: &str, points: i64) -> Team {
    Team {
        name: name.to_string(),
        points: Some(points),
        ..Team::default()
    }
}

fn completed(home: &str, away: &str, home_score: i64, away_score: i64) -> Fixture {
    Fixture {
        round: Some(Round::Matchday(1)),
        home: home.to_string(),
        away: away.to_string(),
        status: Some("Completed".to_string()),
        home_score: Some(home_score),
        away_score: Some(away_score),
        ..Fixture::default()
    }
}

fn scheduled(home: &str, away: &str) -> Fixture {
    Fixture {
        round: Some(Round::Matchday(2)),
        home: home.to_string(),
        away: away.to_string(),
        status: Some("Scheduled".to_string()),
        ..Fixture::default()
    }
}

fn season() -> SeasonData {
    SeasonData {
        teams: vec![team("Alpha", 6), team("Beta", 9), team("Gamma", 1)],
        fixtures: vec![
            completed("Alpha", "Beta", 0, 2),
            completed("Gamma", "Alpha", 1, 1),
            scheduled("Alpha", "Gamma"),
            scheduled("Beta", "Gamma"),
        ],
    }
}

#[test]
fn outlook_counts_played_remaining_and_max_points() {
    let outlook = team_outlook("Alpha", &season()).expect("Alpha should resolve");
    assert_eq!(outlook.played, 2);
    assert_eq!(outlook.remaining, 1);
    assert_eq!(outlook.points, 6);
    assert_eq!(outlook.max_points, 9);
    assert_eq!(outlook.remaining_fixtures.len(), 1);
    assert_eq!(outlook.remaining_fixtures[0].away, "Gamma");
}

#[test]
fn outlook_ranks_against_the_leader() {
    let outlook = team_outlook("Alpha", &season()).expect("Alpha should resolve");
    assert_eq!(outlook.rank, 2);
    assert_eq!(outlook.leader_points, 9);
    assert_eq!(outlook.points_to_leader, 3);

    let leader = team_outlook("Beta", &season()).expect("Beta should resolve");
    assert_eq!(leader.rank, 1);
    assert_eq!(leader.points_to_leader, 0);
}

#[test]
fn head_to_head_is_from_the_subject_perspective() {
    let outlook = team_outlook("Alpha", &season()).expect("Alpha should resolve");
    assert_eq!(outlook.head_to_head.len(), 2);

    let beta = outlook
        .head_to_head
        .iter()
        .find(|h| h.opponent == "Beta")
        .expect("Beta record should exist");
    assert_eq!(beta.played, 1);
    assert_eq!(beta.remaining, 0);
    assert_eq!(beta.results, "L");

    let gamma = outlook
        .head_to_head
        .iter()
        .find(|h| h.opponent == "Gamma")
        .expect("Gamma record should exist");
    assert_eq!(gamma.played, 1);
    assert_eq!(gamma.remaining, 1);
    assert_eq!(gamma.results, "D");
}

#[test]
fn fixtures_against_unknown_opponents_are_ignored() {
    let mut data = season();
    data.fixtures.push(completed("Alpha", "Nobody", 5, 0));

    let outlook = team_outlook("Alpha", &data).expect("Alpha should resolve");
    // The phantom match still counts as played for the team itself,
    // but no head-to-head record appears for an unknown opponent.
    assert_eq!(outlook.played, 3);
    assert!(outlook.head_to_head.iter().all(|h| h.opponent != "Nobody"));
}

#[test]
fn unknown_team_has_no_outlook() {
    assert!(team_outlook("Nobody", &season()).is_none());
}
