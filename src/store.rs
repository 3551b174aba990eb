use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, params};

use crate::standings;
use crate::state::{
    Fixture, LeagueData, Round, SeasonData, SeasonId, STATUS_COMPLETED, Team,
};

const DATA_DIR: &str = "league_terminal";
const DB_FILE: &str = "league.sqlite";

/// LEAGUE_DB wins; otherwise the XDG data directory, then
/// ~/.local/share.
pub fn default_db_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("LEAGUE_DB") {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    if let Ok(base) = std::env::var("XDG_DATA_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(DATA_DIR).join(DB_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR)
            .join(DB_FILE),
    )
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            season TEXT NOT NULL,
            name TEXT NOT NULL,
            played INTEGER NOT NULL DEFAULT 0,
            won INTEGER NOT NULL DEFAULT 0,
            drawn INTEGER NOT NULL DEFAULT 0,
            lost INTEGER NOT NULL DEFAULT 0,
            gf INTEGER NOT NULL DEFAULT 0,
            ga INTEGER NOT NULL DEFAULT 0,
            points INTEGER NULL,
            form TEXT NOT NULL DEFAULT '',
            UNIQUE(season, name)
        );
        CREATE TABLE IF NOT EXISTS fixtures (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            season TEXT NOT NULL,
            round TEXT NULL,
            date TEXT NULL,
            time TEXT NULL,
            venue TEXT NULL,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            home_score INTEGER NULL,
            away_score INTEGER NULL,
            status TEXT NOT NULL DEFAULT 'Scheduled'
        );
        CREATE INDEX IF NOT EXISTS idx_teams_season ON teams(season);
        CREATE INDEX IF NOT EXISTS idx_fixtures_season ON fixtures(season);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

/// Loads every deployment season; a season with no rows comes back
/// empty rather than missing. Row order (insert order) is the
/// chronological order the rest of the crate relies on.
pub fn load_league_data(conn: &Connection, seasons: &[SeasonId]) -> Result<LeagueData> {
    let mut data = LeagueData::default();
    for id in seasons {
        let season = SeasonData {
            teams: load_teams(conn, *id)?,
            fixtures: load_fixtures(conn, *id)?,
        };
        data.seasons.push((*id, season));
    }
    Ok(data)
}

fn load_teams(conn: &Connection, season: SeasonId) -> Result<Vec<Team>> {
    let mut stmt = conn
        .prepare(
            "SELECT name, played, won, drawn, lost, gf, ga, points, form
             FROM teams WHERE season = ?1 ORDER BY id ASC",
        )
        .context("prepare load teams query")?;

    let rows = stmt
        .query_map(params![season.key()], |row| {
            Ok(Team {
                name: row.get(0)?,
                played: row.get(1)?,
                won: row.get(2)?,
                drawn: row.get(3)?,
                lost: row.get(4)?,
                goals_for: row.get(5)?,
                goals_against: row.get(6)?,
                points: row.get(7)?,
                form: row.get(8)?,
            })
        })
        .context("query load teams")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode team row")?);
    }
    Ok(out)
}

fn load_fixtures(conn: &Connection, season: SeasonId) -> Result<Vec<Fixture>> {
    let mut stmt = conn
        .prepare(
            "SELECT round, date, time, venue, home_team, away_team,
                    home_score, away_score, status
             FROM fixtures WHERE season = ?1 ORDER BY id ASC",
        )
        .context("prepare load fixtures query")?;

    let rows = stmt
        .query_map(params![season.key()], |row| {
            Ok(Fixture {
                round: row
                    .get::<_, Option<String>>(0)?
                    .map(|raw| Round::parse(&raw)),
                date: row.get(1)?,
                time: row.get(2)?,
                venue: row.get(3)?,
                home: row.get(4)?,
                away: row.get(5)?,
                home_score: row.get(6)?,
                away_score: row.get(7)?,
                status: row.get(8)?,
            })
        })
        .context("query load fixtures")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode fixture row")?);
    }
    Ok(out)
}

pub fn insert_team(conn: &Connection, season: SeasonId, team: &Team) -> Result<()> {
    conn.execute(
        "INSERT INTO teams (season, name, played, won, drawn, lost, gf, ga, points, form)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            season.key(),
            team.name,
            team.played,
            team.won,
            team.drawn,
            team.lost,
            team.goals_for,
            team.goals_against,
            team.points,
            team.form,
        ],
    )
    .context("insert team")?;
    Ok(())
}

pub fn insert_fixture(conn: &Connection, season: SeasonId, fixture: &Fixture) -> Result<()> {
    conn.execute(
        "INSERT INTO fixtures (season, round, date, time, venue, home_team, away_team,
                               home_score, away_score, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            season.key(),
            fixture.round.as_ref().map(|round| round.key()),
            fixture.date,
            fixture.time,
            fixture.venue,
            fixture.home,
            fixture.away,
            fixture.home_score,
            fixture.away_score,
            fixture.status.as_deref().unwrap_or("Scheduled"),
        ],
    )
    .context("insert fixture")?;
    Ok(())
}

/// Overwrites a season's team stats in place (after a recalculation).
pub fn save_standings(conn: &mut Connection, season: SeasonId, teams: &[Team]) -> Result<()> {
    let tx = conn.transaction().context("begin standings transaction")?;
    for team in teams {
        tx.execute(
            "UPDATE teams
             SET played = ?1, won = ?2, drawn = ?3, lost = ?4,
                 gf = ?5, ga = ?6, points = ?7, form = ?8
             WHERE season = ?9 AND name = ?10",
            params![
                team.played,
                team.won,
                team.drawn,
                team.lost,
                team.goals_for,
                team.goals_against,
                team.points,
                team.form,
                season.key(),
                team.name,
            ],
        )
        .context("update team standings")?;
    }
    tx.commit().context("commit standings transaction")?;
    Ok(())
}

/// Marks a fixture completed with the given score, then recalculates
/// and writes back that season's table.
pub fn record_result(
    conn: &mut Connection,
    fixture_id: i64,
    home_score: i64,
    away_score: i64,
) -> Result<SeasonId> {
    let updated = conn
        .execute(
            "UPDATE fixtures SET home_score = ?1, away_score = ?2, status = ?3 WHERE id = ?4",
            params![home_score, away_score, STATUS_COMPLETED, fixture_id],
        )
        .context("update fixture result")?;
    if updated == 0 {
        return Err(anyhow!("fixture {fixture_id} not found"));
    }

    let season_key: String = conn
        .query_row(
            "SELECT season FROM fixtures WHERE id = ?1",
            params![fixture_id],
            |row| row.get(0),
        )
        .context("query fixture season")?;
    let season = SeasonId::from_key(&season_key)
        .ok_or_else(|| anyhow!("fixture {fixture_id} has unknown season {season_key}"))?;

    let teams = load_teams(conn, season)?;
    let fixtures = load_fixtures(conn, season)?;
    let recomputed = standings::recompute_standings(&teams, &fixtures);
    save_standings(conn, season, &recomputed)?;
    Ok(season)
}

// Inaugural-season data set, used to bootstrap an empty database.
const SEED_TEAMS: [(&str, u32, u32, u32, u32, u32, u32, i64, &str); 6] = [
    ("Avin puliken", 10, 4, 1, 5, 25, 31, 13, "LLLWWDLLLW"),
    ("Basil sabu", 10, 2, 1, 7, 19, 36, 7, "LLLWLDWWLD"),
    ("Chris john George", 10, 6, 0, 4, 32, 18, 18, "WLWLWWWWLL"),
    ("Christo shaju", 10, 7, 0, 3, 24, 15, 21, "LWLWWWWLW"),
    ("Basil santhosh", 10, 5, 1, 4, 18, 14, 16, "WWWLDLLWWL"),
    ("Basil Eldo", 10, 4, 1, 5, 19, 26, 13, "LLLLWWLDWW"),
];

const SEED_FIXTURES: [(&str, &str, &str, i64, i64); 30] = [
    ("Basil sabu", "Avin puliken", "1", 2, 7),
    ("Chris john George", "Christo shaju", "1", 3, 1),
    ("Basil santhosh", "Basil Eldo", "1", 5, 1),
    ("Christo shaju", "Basil sabu", "2", 2, 0),
    ("Basil Eldo", "Avin puliken", "2", 2, 3),
    ("Basil santhosh", "Chris john George", "2", 0, 1),
    ("Basil sabu", "Basil Eldo", "3", 1, 2),
    ("Christo shaju", "Basil santhosh", "3", 6, 3),
    ("Avin puliken", "Chris john George", "3", 1, 6),
    ("Basil santhosh", "Basil sabu", "4", 5, 2),
    ("Chris john George", "Basil Eldo", "4", 1, 7),
    ("Avin puliken", "Christo shaju", "4", 1, 3),
    ("Basil sabu", "Chris john George", "5", 2, 8),
    ("Basil santhosh", "Avin puliken", "5", 0, 1),
    ("Basil Eldo", "Christo shaju", "5", 2, 1),
    ("Avin puliken", "Basil sabu", "6", 4, 4),
    ("Christo shaju", "Chris john George", "6", 2, 0),
    ("Basil Eldo", "Basil santhosh", "6", 0, 0),
    ("Basil sabu", "Christo shaju", "7", 1, 2),
    ("Avin puliken", "Basil Eldo", "7", 1, 5),
    ("Chris john George", "Basil santhosh", "7", 0, 1),
    ("Basil Eldo", "Basil sabu", "8", 3, 4),
    ("Basil santhosh", "Christo shaju", "8", 0, 1),
    ("Chris john George", "Avin puliken", "8", 2, 4),
    ("Basil sabu", "Basil santhosh", "9", 2, 1),
    ("Basil Eldo", "Chris john George", "9", 2, 3),
    ("Christo shaju", "Avin puliken", "9", 5, 0),
    ("Chris john George", "Basil sabu", "10", 2, 1),
    ("Avin puliken", "Basil santhosh", "10", 1, 2),
    ("Christo shaju", "Basil Eldo", "10", 1, 4),
];

// Team name casing in the Final is carried over from the source data
// untouched; fixture names are not validated against the team list.
const SEED_KNOCKOUT: [(&str, &str, &str, i64, i64); 3] = [
    ("Christo shaju", "Basil santhosh", "SF1", 4, 2),
    ("Avin puliken", "Chris john George", "SF2", 2, 3),
    ("Christo shaju", "chris john George", "Final", 3, 1),
];

/// Seeds the inaugural season into an empty database. A database with
/// any existing rows is left alone.
pub fn seed_if_empty(conn: &mut Connection) -> Result<bool> {
    let teams: i64 = conn
        .query_row("SELECT COUNT(*) FROM teams", [], |row| row.get(0))
        .context("count teams")?;
    let fixtures: i64 = conn
        .query_row("SELECT COUNT(*) FROM fixtures", [], |row| row.get(0))
        .context("count fixtures")?;
    if teams > 0 || fixtures > 0 {
        return Ok(false);
    }

    let tx = conn.transaction().context("begin seed transaction")?;
    for (name, played, won, drawn, lost, gf, ga, points, form) in SEED_TEAMS {
        tx.execute(
            "INSERT INTO teams (season, name, played, won, drawn, lost, gf, ga, points, form)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                SeasonId::Season1.key(),
                name,
                played,
                won,
                drawn,
                lost,
                gf,
                ga,
                points,
                form
            ],
        )
        .context("seed team")?;
    }
    for (home, away, round, home_score, away_score) in SEED_FIXTURES {
        seed_fixture(&tx, home, away, round, home_score, away_score, "2024-10-28")?;
    }
    for (home, away, round, home_score, away_score) in SEED_KNOCKOUT {
        seed_fixture(&tx, home, away, round, home_score, away_score, "2024-12-20")?;
    }
    tx.commit().context("commit seed transaction")?;
    Ok(true)
}

fn seed_fixture(
    tx: &rusqlite::Transaction<'_>,
    home: &str,
    away: &str,
    round: &str,
    home_score: i64,
    away_score: i64,
    date: &str,
) -> Result<()> {
    tx.execute(
        "INSERT INTO fixtures (season, round, date, time, venue, home_team, away_team,
                               home_score, away_score, status)
         VALUES (?1, ?2, ?3, 'FT', 'Basil Arena', ?4, ?5, ?6, ?7, ?8)",
        params![
            SeasonId::Season1.key(),
            round,
            date,
            home,
            away,
            home_score,
            away_score,
            STATUS_COMPLETED,
        ],
    )
    .context("seed fixture")?;
    Ok(())
}
