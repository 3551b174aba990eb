use crate::standings;
use crate::state::{Fixture, SeasonData};

/// Per-opponent record from the subject team's perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHead {
    pub opponent: String,
    pub played: u32,
    pub remaining: u32,
    /// Result codes in fixture order, e.g. "WLD".
    pub results: String,
}

#[derive(Debug, Clone)]
pub struct TeamOutlook {
    pub team: String,
    pub rank: usize,
    pub played: u32,
    pub remaining: u32,
    pub points: i64,
    pub max_points: i64,
    pub leader_points: i64,
    pub points_to_leader: i64,
    pub head_to_head: Vec<HeadToHead>,
    pub remaining_fixtures: Vec<Fixture>,
}

/// Season outlook for one team: how much is banked, how much is still
/// on the table, and the record against every opponent. Returns None
/// for a team the season does not know.
pub fn team_outlook(team_name: &str, data: &SeasonData) -> Option<TeamOutlook> {
    let team = data.teams.iter().find(|t| t.name == team_name)?;

    let involved: Vec<&Fixture> = data
        .fixtures
        .iter()
        .filter(|f| f.home == team.name || f.away == team.name)
        .collect();
    let remaining_fixtures: Vec<Fixture> = involved
        .iter()
        .filter(|f| !f.is_completed())
        .map(|f| (*f).clone())
        .collect();

    let played = involved.iter().filter(|f| f.is_completed()).count() as u32;
    let remaining = remaining_fixtures.len() as u32;
    let points = team.effective_points();
    let max_points = points + remaining as i64 * 3;

    let ranked = standings::rank_teams(&data.teams);
    let rank = ranked
        .iter()
        .position(|t| t.name == team.name)
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let leader_points = ranked
        .first()
        .map(|t| t.effective_points())
        .unwrap_or_default();

    let mut head_to_head: Vec<HeadToHead> = data
        .teams
        .iter()
        .filter(|t| t.name != team.name)
        .map(|t| HeadToHead {
            opponent: t.name.clone(),
            played: 0,
            remaining: 0,
            results: String::new(),
        })
        .collect();

    for fixture in &involved {
        let opponent = if fixture.home == team.name {
            &fixture.away
        } else {
            &fixture.home
        };
        let Some(record) = head_to_head.iter_mut().find(|h| &h.opponent == opponent) else {
            // Opponent not in the team list; fixture data is not
            // validated against it.
            continue;
        };
        if fixture.is_completed() {
            record.played += 1;
            if let (Some(home_score), Some(away_score)) = (fixture.home_score, fixture.away_score)
            {
                let (ours, theirs) = if fixture.home == team.name {
                    (home_score, away_score)
                } else {
                    (away_score, home_score)
                };
                record.results.push(if ours > theirs {
                    'W'
                } else if theirs > ours {
                    'L'
                } else {
                    'D'
                });
            }
        } else {
            record.remaining += 1;
        }
    }

    Some(TeamOutlook {
        team: team.name.clone(),
        rank,
        played,
        remaining,
        points,
        max_points,
        leader_points,
        points_to_leader: leader_points - points,
        head_to_head,
        remaining_fixtures,
    })
}
