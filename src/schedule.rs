use crate::state::{Fixture, Round, STATUS_SCHEDULED};

/// Circle-method round robin. Odd team counts get a bye slot; the
/// first slot stays fixed while the rest rotate. `meetings` repeats
/// the base rounds with sequential round numbers, swapping home and
/// away on every second meeting. Fewer than two teams schedules
/// nothing.
pub fn generate_round_robin(team_names: &[String], meetings: usize) -> Vec<Fixture> {
    if team_names.len() < 2 {
        return Vec::new();
    }
    let meetings = meetings.max(1);

    let mut rotation: Vec<Option<&String>> = team_names.iter().map(Some).collect();
    if rotation.len() % 2 == 1 {
        rotation.push(None);
    }
    let slots = rotation.len();
    let rounds_per_set = slots - 1;

    let mut base_rounds: Vec<Vec<(String, String)>> = Vec::with_capacity(rounds_per_set);
    for _ in 0..rounds_per_set {
        let mut pairs = Vec::with_capacity(slots / 2);
        for i in 0..slots / 2 {
            if let (Some(home), Some(away)) = (rotation[i], rotation[slots - 1 - i]) {
                pairs.push((home.clone(), away.clone()));
            }
        }
        base_rounds.push(pairs);

        if let Some(last) = rotation.pop() {
            rotation.insert(1, last);
        }
    }

    let mut fixtures = Vec::new();
    for meeting in 0..meetings {
        let reverse = meeting % 2 == 1;
        for (round_idx, pairs) in base_rounds.iter().enumerate() {
            let round_num = (meeting * rounds_per_set + round_idx + 1) as i64;
            for (home, away) in pairs {
                let (home, away) = if reverse {
                    (away.clone(), home.clone())
                } else {
                    (home.clone(), away.clone())
                };
                fixtures.push(Fixture {
                    round: Some(Round::Matchday(round_num)),
                    status: Some(STATUS_SCHEDULED.to_string()),
                    home,
                    away,
                    ..Fixture::default()
                });
            }
        }
    }

    fixtures
}
