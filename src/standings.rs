use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::rounds;
use crate::state::{Fixture, Team};

/// Rounds whose results never feed the league table. Wider than the
/// display knockout set: quarterfinals are table-exempt too even
/// though they group as plain matchdays on screen.
static TABLE_EXEMPT_ROUNDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["SF1", "SF2", "Final", "QF1", "QF2", "QF3", "QF4"]
        .into_iter()
        .collect()
});

/// Total order over a season's teams: points desc, goal difference
/// desc, goals-for desc. The sort is stable, so teams equal on all
/// three keys keep their input relative order. Never panics; empty in,
/// empty out.
pub fn rank_teams(teams: &[Team]) -> Vec<Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(|a, b| {
        b.effective_points()
            .cmp(&a.effective_points())
            .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
    });
    ranked
}

/// Whether a fixture's result contributes to the table: completed,
/// both scores present, and not a cup round.
pub fn counts_for_table(fixture: &Fixture) -> bool {
    if !fixture.is_completed() || !fixture.has_result() {
        return false;
    }
    let key = rounds::round_key(fixture.round.as_ref());
    !TABLE_EXEMPT_ROUNDS.contains(key.as_str())
}

/// Rebuilds every team's stats from the fixture list. Fixture input
/// order is taken as chronological for form purposes. Fixtures naming
/// unknown teams are skipped whole; team list order is preserved.
pub fn recompute_standings(teams: &[Team], fixtures: &[Fixture]) -> Vec<Team> {
    let mut fresh: Vec<Team> = teams
        .iter()
        .map(|team| Team {
            name: team.name.clone(),
            points: Some(0),
            ..Team::default()
        })
        .collect();
    let index: HashMap<String, usize> = fresh
        .iter()
        .enumerate()
        .map(|(idx, team)| (team.name.clone(), idx))
        .collect();
    let mut forms: Vec<Vec<char>> = vec![Vec::new(); fresh.len()];

    for fixture in fixtures {
        if !counts_for_table(fixture) {
            continue;
        }
        let (Some(&home_idx), Some(&away_idx)) =
            (index.get(&fixture.home), index.get(&fixture.away))
        else {
            continue;
        };
        let (Some(home_score), Some(away_score)) = (fixture.home_score, fixture.away_score) else {
            continue;
        };

        fresh[home_idx].played += 1;
        fresh[away_idx].played += 1;
        fresh[home_idx].goals_for += home_score.max(0) as u32;
        fresh[home_idx].goals_against += away_score.max(0) as u32;
        fresh[away_idx].goals_for += away_score.max(0) as u32;
        fresh[away_idx].goals_against += home_score.max(0) as u32;

        if home_score > away_score {
            fresh[home_idx].won += 1;
            fresh[away_idx].lost += 1;
            add_points(&mut fresh[home_idx], 3);
            forms[home_idx].push('W');
            forms[away_idx].push('L');
        } else if away_score > home_score {
            fresh[away_idx].won += 1;
            fresh[home_idx].lost += 1;
            add_points(&mut fresh[away_idx], 3);
            forms[away_idx].push('W');
            forms[home_idx].push('L');
        } else {
            fresh[home_idx].drawn += 1;
            fresh[away_idx].drawn += 1;
            add_points(&mut fresh[home_idx], 1);
            add_points(&mut fresh[away_idx], 1);
            forms[home_idx].push('D');
            forms[away_idx].push('D');
        }
    }

    for (team, form) in fresh.iter_mut().zip(forms) {
        let start = form.len().saturating_sub(5);
        team.form = form[start..].iter().collect();
    }

    fresh
}

fn add_points(team: &mut Team, delta: i64) {
    team.points = Some(team.points.unwrap_or(0) + delta);
}
