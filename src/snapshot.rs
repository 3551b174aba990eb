use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::state::{Fixture, LeagueData, Round, SeasonData, SeasonId, Team};

/// Normalized league data plus the non-fatal shape complaints gathered
/// along the way. Warnings are for the console log: loud in
/// development, harmless at runtime.
#[derive(Debug, Clone)]
pub struct SnapshotReport {
    pub data: LeagueData,
    pub warnings: Vec<String>,
}

pub fn load_league_snapshot(path: &Path, seasons: &[SeasonId]) -> Result<SnapshotReport> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read league snapshot {}", path.display()))?;
    parse_league_snapshot_json(&raw, seasons)
}

/// Adapts a season-keyed backend snapshot into canonical records. The
/// backend mixes snake_case and legacy aliases; everything here is
/// best-effort: a malformed entry is warned about and defaulted, never
/// rejected. Only unparseable JSON is an error.
pub fn parse_league_snapshot_json(raw: &str, seasons: &[SeasonId]) -> Result<SnapshotReport> {
    let mut warnings = Vec::new();

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        warnings.push("no backend snapshot found, rendering empty".to_string());
        return Ok(SnapshotReport {
            data: LeagueData::empty(seasons),
            warnings,
        });
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid league snapshot json")?;

    let mut data = LeagueData::default();
    for id in seasons {
        let season = match root.get(id.key()) {
            Some(value) if !value.is_null() => parse_season(*id, value, &mut warnings),
            _ => {
                warnings.push(format!(
                    "{}: missing backend payload, rendering empty",
                    id.key()
                ));
                SeasonData::default()
            }
        };
        data.seasons.push((*id, season));
    }

    Ok(SnapshotReport { data, warnings })
}

fn parse_season(id: SeasonId, value: &Value, warnings: &mut Vec<String>) -> SeasonData {
    let mut season = SeasonData::default();

    match value.get("teams") {
        Some(Value::Array(entries)) => {
            for entry in entries {
                if let Some(team) = parse_team(id, entry, warnings) {
                    season.teams.push(team);
                }
            }
        }
        Some(_) => warnings.push(format!("{}: teams is not an array", id.key())),
        None => {}
    }

    match value.get("fixtures") {
        Some(Value::Array(entries)) => {
            for entry in entries {
                season.fixtures.push(parse_fixture(id, entry, warnings));
            }
        }
        Some(_) => warnings.push(format!("{}: fixtures is not an array", id.key())),
        None => {}
    }

    season
}

fn parse_team(id: SeasonId, value: &Value, warnings: &mut Vec<String>) -> Option<Team> {
    let Some(name) = pick_string(value, &["name", "team", "team_name"]) else {
        warnings.push(format!("{}: team entry without a name skipped", id.key()));
        return None;
    };

    Some(Team {
        name,
        played: pick_count(value, &["played", "p"]),
        won: pick_count(value, &["won", "w"]),
        drawn: pick_count(value, &["drawn", "d"]),
        lost: pick_count(value, &["lost", "l"]),
        goals_for: pick_count(value, &["gf", "goals_for"]),
        goals_against: pick_count(value, &["ga", "goals_against"]),
        points: pick_int(value, &["points", "pts"]),
        form: pick_string(value, &["form"]).unwrap_or_default(),
    })
}

fn parse_fixture(id: SeasonId, value: &Value, warnings: &mut Vec<String>) -> Fixture {
    let home = pick_string(value, &["home_team", "home"]).unwrap_or_default();
    let away = pick_string(value, &["away_team", "away"]).unwrap_or_default();
    if home.is_empty() || away.is_empty() {
        warnings.push(format!("{}: fixture with unnamed team", id.key()));
    }

    Fixture {
        round: parse_round(value, warnings, id),
        date: pick_string(value, &["date"]),
        time: pick_string(value, &["time"]),
        venue: pick_string(value, &["venue"]),
        home,
        away,
        status: pick_string(value, &["status"]),
        home_score: pick_int(value, &["home_score"]),
        away_score: pick_int(value, &["away_score"]),
    }
}

/// A round is absent only when the key is missing or null. The literal
/// 0 and the empty string stay present: numbers become matchdays,
/// everything else passes through verbatim as a stage label.
fn parse_round(value: &Value, warnings: &mut Vec<String>, id: SeasonId) -> Option<Round> {
    const KEYS: [&str; 3] = ["round", "fixtureNum", "fixture_num"];
    for key in KEYS {
        match value.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::Number(num)) => {
                return Some(match num.as_i64() {
                    Some(n) => Round::Matchday(n),
                    None => Round::Stage(num.to_string()),
                });
            }
            Some(Value::String(raw)) => return Some(Round::parse(raw)),
            Some(other) => {
                warnings.push(format!("{}: unusual round value {other}", id.key()));
                return Some(Round::Stage(other.to_string()));
            }
        }
    }
    None
}

/// First usable integer under any of the keys. Null, absent, and
/// non-numeric values are all treated as missing.
fn pick_int(value: &Value, keys: &[&str]) -> Option<i64> {
    for key in keys {
        let Some(v) = value.get(*key) else { continue };
        if let Some(num) = v.as_i64() {
            return Some(num);
        }
        if let Some(raw) = v.as_str() {
            if let Ok(num) = raw.trim().parse::<i64>() {
                return Some(num);
            }
        }
    }
    None
}

/// Counting stats default to zero when absent or unusable.
fn pick_count(value: &Value, keys: &[&str]) -> u32 {
    pick_int(value, keys).map(|num| num.max(0) as u32).unwrap_or(0)
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(Value::String(raw)) = value.get(*key) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}
