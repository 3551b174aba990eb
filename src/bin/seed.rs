use std::path::PathBuf;

use anyhow::{Context, Result};

use league_terminal::state::deployment_seasons;
use league_terminal::store;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let db_path = parse_db_path_arg()
        .or_else(store::default_db_path)
        .context("unable to resolve league db path")?;

    let mut conn = store::open_db(&db_path)?;
    let seeded = store::seed_if_empty(&mut conn)?;

    println!("League DB: {}", db_path.display());
    if seeded {
        println!("Seeded inaugural season data.");
    } else {
        println!("Database already has data, nothing seeded.");
    }

    let data = store::load_league_data(&conn, &deployment_seasons())?;
    for (season, season_data) in &data.seasons {
        println!(
            "{}: {} teams, {} fixtures",
            season.key(),
            season_data.teams.len(),
            season_data.fixtures.len()
        );
    }

    Ok(())
}

fn parse_db_path_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if arg == "--db" {
            return args.get(idx + 1).map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--db=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}
