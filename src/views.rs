use std::env;

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::rounds;
use crate::standings;
use crate::state::{Fixture, SeasonData, SeasonId, Team};

/// Venue placeholder shown when the backend supplies none.
static DEFAULT_VENUE: Lazy<String> = Lazy::new(|| {
    env::var("LEAGUE_VENUE")
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| "LEAGUE ARENA".to_string())
});

pub const VERSUS_PLACEHOLDER: &str = "vs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
}

impl FormResult {
    // Unrecognized codes fall through to Loss, as the original did.
    pub fn from_code(code: char) -> FormResult {
        match code {
            'W' => FormResult::Win,
            'D' => FormResult::Draw,
            _ => FormResult::Loss,
        }
    }
}

/// Qualification slot highlighting for the current competition season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Final,
    Semi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    Standard,
}

impl Medal {
    pub fn for_rank(rank: usize) -> Medal {
        match rank {
            1 => Medal::Gold,
            2 => Medal::Silver,
            3 => Medal::Bronze,
            _ => Medal::Standard,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
            Medal::Standard => "⚫",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableRow {
    pub rank: usize,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i64,
    pub goal_diff_label: String,
    pub points: i64,
    pub form: Vec<FormResult>,
    pub zone: Option<Zone>,
}

#[derive(Debug, Clone)]
pub struct FixtureCard {
    pub home: String,
    pub away: String,
    /// "2 - 1" when both scores exist; None renders the vs placeholder.
    pub score: Option<String>,
    pub kickoff: String,
    pub date: String,
    pub venue_line: String,
    pub knockout: bool,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct FixtureGroupView {
    pub header: String,
    pub knockout: bool,
    pub matches: Vec<FixtureCard>,
}

#[derive(Debug, Clone)]
pub struct ScorerRow {
    pub rank: usize,
    pub medal: Medal,
    pub name: String,
    pub goals: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SeasonViews {
    pub table: Vec<TableRow>,
    pub fixtures: Vec<FixtureGroupView>,
    pub scorers: Vec<ScorerRow>,
    pub champion: Option<String>,
}

/// Projects one season into everything the draw layer needs. Pure; no
/// terminal types in here.
pub fn build_season_views(
    season: SeasonId,
    data: &SeasonData,
    latest: Option<SeasonId>,
) -> SeasonViews {
    let ranked = standings::rank_teams(&data.teams);
    let mark_zones = latest == Some(season);

    let table = ranked
        .iter()
        .enumerate()
        .map(|(idx, team)| {
            let zone = if mark_zones {
                match idx {
                    0 => Some(Zone::Final),
                    1 | 2 => Some(Zone::Semi),
                    _ => None,
                }
            } else {
                None
            };
            table_row(idx + 1, team, zone)
        })
        .collect();

    let fixtures = rounds::group_fixtures(&data.fixtures)
        .into_iter()
        .map(|group| FixtureGroupView {
            header: group_header(season, &group.label, group.knockout),
            knockout: group.knockout,
            matches: group.fixtures.iter().map(fixture_card).collect(),
        })
        .collect();

    let champion = if season == SeasonId::Season1 {
        champion_from_final(&data.fixtures)
    } else {
        None
    };

    SeasonViews {
        table,
        fixtures,
        scorers: scorer_rows(&data.teams),
        champion,
    }
}

fn table_row(rank: usize, team: &Team, zone: Option<Zone>) -> TableRow {
    let goal_diff = team.goal_difference();
    TableRow {
        rank,
        name: team.name.clone(),
        played: team.played,
        won: team.won,
        drawn: team.drawn,
        lost: team.lost,
        goals_for: team.goals_for,
        goals_against: team.goals_against,
        goal_diff,
        goal_diff_label: format_goal_diff(goal_diff),
        points: team.effective_points(),
        form: form_cells(&team.form),
        zone,
    }
}

/// Explicit "+" for positive differences only; zero and negatives
/// render bare.
pub fn format_goal_diff(goal_diff: i64) -> String {
    if goal_diff > 0 {
        format!("+{goal_diff}")
    } else {
        goal_diff.to_string()
    }
}

/// Last five results, uppercased, most-recent-last.
pub fn form_cells(form: &str) -> Vec<FormResult> {
    let codes: Vec<char> = form.to_uppercase().chars().collect();
    let start = codes.len().saturating_sub(5);
    codes[start..].iter().map(|c| FormResult::from_code(*c)).collect()
}

pub fn fixture_card(fixture: &Fixture) -> FixtureCard {
    FixtureCard {
        home: fixture.home.clone(),
        away: fixture.away.clone(),
        score: score_label(fixture),
        kickoff: kickoff_label(fixture),
        date: date_label(fixture),
        venue_line: venue_line(fixture),
        knockout: fixture
            .round
            .as_ref()
            .is_some_and(|round| rounds::is_knockout_key(&round.key())),
        completed: fixture.is_completed(),
    }
}

/// Both scores or nothing; half-reported results fall back to the
/// placeholder rather than showing a bare null.
pub fn score_label(fixture: &Fixture) -> Option<String> {
    match (fixture.home_score, fixture.away_score) {
        (Some(home), Some(away)) => Some(format!("{home} - {away}")),
        _ => None,
    }
}

pub fn kickoff_label(fixture: &Fixture) -> String {
    match fixture.time.as_deref() {
        Some("FT") => "FULL TIME".to_string(),
        Some(time) => time.to_string(),
        None if fixture.is_completed() => "FULL TIME".to_string(),
        None => "TBD".to_string(),
    }
}

pub fn date_label(fixture: &Fixture) -> String {
    match fixture.date.as_deref() {
        Some(raw) => format_match_date(raw),
        None => "Upcoming".to_string(),
    }
}

/// Completed fixtures show the kickoff label where the venue would go,
/// matching the original card layout.
pub fn venue_line(fixture: &Fixture) -> String {
    if fixture.is_completed() {
        return kickoff_label(fixture);
    }
    match fixture.venue.as_deref() {
        Some(venue) => venue.to_uppercase(),
        None => DEFAULT_VENUE.clone(),
    }
}

/// Best-effort pretty date; unrecognized strings pass through.
pub fn format_match_date(raw: &str) -> String {
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];
    let cleaned = raw.trim();
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            return date.format("%d %b %Y").to_string();
        }
    }
    cleaned.to_string()
}

fn group_header(season: SeasonId, label: &str, knockout: bool) -> String {
    if knockout && season == SeasonId::Season1 {
        // Celebratory marker on the completed inaugural season only.
        format!("{label} 👑 (SF & Final)")
    } else {
        label.to_string()
    }
}

/// Teams by goals-for descending, stable on ties.
pub fn scorer_rows(teams: &[Team]) -> Vec<ScorerRow> {
    let mut sorted: Vec<&Team> = teams.iter().collect();
    sorted.sort_by(|a, b| b.goals_for.cmp(&a.goals_for));
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, team)| ScorerRow {
            rank: idx + 1,
            medal: Medal::for_rank(idx + 1),
            name: team.name.clone(),
            goals: team.goals_for,
        })
        .collect()
}

/// Winner of the fixture in the Final round, when it has a decisive
/// score. Drawn or unscored finals leave no champion.
fn champion_from_final(fixtures: &[Fixture]) -> Option<String> {
    let fixture = fixtures.iter().find(|f| {
        f.round
            .as_ref()
            .is_some_and(|round| round.key() == "Final")
    })?;
    let (home, away) = (fixture.home_score?, fixture.away_score?);
    if home > away {
        Some(fixture.home.clone())
    } else if away > home {
        Some(fixture.away.clone())
    } else {
        None
    }
}

/// Lines the fixtures tab occupies when drawn: one header plus three
/// lines per card and a trailing blank per group. Keeps scroll bounds
/// in sync with the draw layer.
pub fn fixture_line_count(views: &SeasonViews) -> usize {
    views
        .fixtures
        .iter()
        .map(|group| 1 + group.matches.len() * 3 + 1)
        .sum()
}
