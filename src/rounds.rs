use crate::state::{Fixture, Round};

/// Rounds that collapse into the single knockout group. Compared by
/// exact string form, so a symbolic round that happens to spell one of
/// these is treated as knockout (see DESIGN.md on the collision).
pub const KNOCKOUT_ROUNDS: [&str; 3] = ["SF1", "SF2", "Final"];

pub const KNOCKOUT_GROUP_LABEL: &str = "Knockout Stage";

pub fn is_knockout_key(key: &str) -> bool {
    KNOCKOUT_ROUNDS.contains(&key)
}

/// String form a round groups under. A missing round still renders,
/// under a visible "?" rather than a silent drop.
pub fn round_key(round: Option<&Round>) -> String {
    match round {
        Some(round) => round.key(),
        None => "?".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct RoundGroup {
    pub label: String,
    pub knockout: bool,
    pub fixtures: Vec<Fixture>,
}

/// Partitions fixtures into labeled groups, first-seen order. Regular
/// rounds become "Matchday {round}"; SF1/SF2/Final share one
/// "Knockout Stage" group. Fixtures keep input order inside a group;
/// there is no secondary sort.
pub fn group_fixtures(fixtures: &[Fixture]) -> Vec<RoundGroup> {
    let mut groups: Vec<RoundGroup> = Vec::new();

    for fixture in fixtures {
        let key = round_key(fixture.round.as_ref());
        let knockout = is_knockout_key(&key);
        let label = if knockout {
            KNOCKOUT_GROUP_LABEL.to_string()
        } else {
            format!("Matchday {key}")
        };

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.fixtures.push(fixture.clone()),
            None => groups.push(RoundGroup {
                label,
                knockout,
                fixtures: vec![fixture.clone()],
            }),
        }
    }

    groups
}
