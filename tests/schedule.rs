use std::collections::HashSet;

use league_terminal::schedule::generate_round_robin;
use league_terminal::state::Round;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn round_of(fixture: &league_terminal::state::Fixture) -> i64 {
    match fixture.round.as_ref() {
        Some(Round::Matchday(num)) => *num,
        other => panic!("generated fixture should have a numeric round, got {other:?}"),
    }
}

#[test]
fn four_teams_single_round_robin_covers_every_pairing() {
    let teams = names(&["A", "B", "C", "D"]);
    let fixtures = generate_round_robin(&teams, 1);

    assert_eq!(fixtures.len(), 6);
    let rounds: HashSet<i64> = fixtures.iter().map(round_of).collect();
    assert_eq!(rounds, HashSet::from([1, 2, 3]));
    for round in 1..=3 {
        assert_eq!(fixtures.iter().filter(|f| round_of(f) == round).count(), 2);
    }

    // Every unordered pair meets exactly once.
    let mut pairs = HashSet::new();
    for fixture in &fixtures {
        let mut pair = [fixture.home.as_str(), fixture.away.as_str()];
        pair.sort();
        assert!(pairs.insert((pair[0].to_string(), pair[1].to_string())));
    }
    assert_eq!(pairs.len(), 6);
}

#[test]
fn odd_team_count_gets_a_bye_each_round() {
    let teams = names(&["A", "B", "C"]);
    let fixtures = generate_round_robin(&teams, 1);

    // Three rounds of one match; each team sits out once.
    assert_eq!(fixtures.len(), 3);
    let rounds: HashSet<i64> = fixtures.iter().map(round_of).collect();
    assert_eq!(rounds, HashSet::from([1, 2, 3]));
    for name in &teams {
        let appearances = fixtures
            .iter()
            .filter(|f| &f.home == name || &f.away == name)
            .count();
        assert_eq!(appearances, 2);
    }
}

#[test]
fn second_meeting_swaps_home_and_away_with_sequential_rounds() {
    let teams = names(&["A", "B", "C", "D"]);
    let fixtures = generate_round_robin(&teams, 2);
    assert_eq!(fixtures.len(), 12);

    let (first, second): (Vec<_>, Vec<_>) =
        fixtures.iter().partition(|f| round_of(f) <= 3);
    assert_eq!(first.len(), 6);
    assert_eq!(second.len(), 6);

    for fixture in first {
        let mirrored = second.iter().any(|f| {
            f.home == fixture.away
                && f.away == fixture.home
                && round_of(f) == round_of(fixture) + 3
        });
        assert!(mirrored, "no reversed leg for {} vs {}", fixture.home, fixture.away);
    }
}

#[test]
fn generated_fixtures_are_scheduled_and_unscored() {
    let fixtures = generate_round_robin(&names(&["A", "B"]), 1);
    assert_eq!(fixtures.len(), 1);
    let fixture = &fixtures[0];
    assert_eq!(fixture.status.as_deref(), Some("Scheduled"));
    assert!(!fixture.is_completed());
    assert_eq!(fixture.home_score, None);
    assert_eq!(fixture.away_score, None);
}

#[test]
fn degenerate_inputs_schedule_nothing() {
    assert!(generate_round_robin(&[], 1).is_empty());
    assert!(generate_round_robin(&names(&["solo"]), 3).is_empty());
}

#[test]
fn zero_meetings_still_plays_one() {
    let fixtures = generate_round_robin(&names(&["A", "B"]), 0);
    assert_eq!(fixtures.len(), 1);
}
