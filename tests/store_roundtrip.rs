use rusqlite::Connection;

use league_terminal::state::{Fixture, Round, SeasonId, Team};
use league_terminal::store;

const SEASONS: [SeasonId; 2] = [SeasonId::Season1, SeasonId::Season2];

fn memory_db() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory sqlite should open");
    store::init_schema(&conn).expect("schema should initialize");
    conn
}

#[test]
fn seed_populates_only_an_empty_database() {
    let mut conn = memory_db();
    assert!(store::seed_if_empty(&mut conn).expect("first seed should work"));
    assert!(!store::seed_if_empty(&mut conn).expect("second seed should be a no-op"));

    let data = store::load_league_data(&conn, &SEASONS).expect("load should work");
    let season1 = data.season(SeasonId::Season1).expect("season1 should exist");
    assert_eq!(season1.teams.len(), 6);
    assert_eq!(season1.fixtures.len(), 33);

    let season2 = data.season(SeasonId::Season2).expect("season2 should exist");
    assert!(season2.is_empty());
}

#[test]
fn seeded_rows_round_trip_with_typed_rounds() {
    let mut conn = memory_db();
    store::seed_if_empty(&mut conn).expect("seed should work");

    let data = store::load_league_data(&conn, &SEASONS).expect("load should work");
    let season1 = data.season(SeasonId::Season1).unwrap();

    let avin = &season1.teams[0];
    assert_eq!(avin.name, "Avin puliken");
    assert_eq!(avin.points, Some(13));
    assert_eq!(avin.form, "LLLWWDLLLW");

    // Insert order is chronological: 30 matchdays then the knockouts.
    assert_eq!(season1.fixtures[0].round, Some(Round::Matchday(1)));
    assert!(season1.fixtures[0].is_completed());
    assert_eq!(
        season1.fixtures[30].round,
        Some(Round::Stage("SF1".to_string()))
    );
    assert_eq!(
        season1.fixtures[32].round,
        Some(Round::Stage("Final".to_string()))
    );
    assert_eq!(season1.fixtures[32].venue.as_deref(), Some("Basil Arena"));
}

#[test]
fn record_result_completes_the_fixture_and_recalculates() {
    let mut conn = memory_db();
    for name in ["Home FC", "Away FC"] {
        store::insert_team(
            &conn,
            SeasonId::Season2,
            &Team {
                name: name.to_string(),
                ..Team::default()
            },
        )
        .expect("insert team should work");
    }
    store::insert_fixture(
        &conn,
        SeasonId::Season2,
        &Fixture {
            round: Some(Round::Matchday(1)),
            home: "Home FC".to_string(),
            away: "Away FC".to_string(),
            status: Some("Scheduled".to_string()),
            ..Fixture::default()
        },
    )
    .expect("insert fixture should work");

    let season = store::record_result(&mut conn, 1, 3, 1).expect("record should work");
    assert_eq!(season, SeasonId::Season2);

    let data = store::load_league_data(&conn, &SEASONS).expect("load should work");
    let season2 = data.season(SeasonId::Season2).unwrap();

    let fixture = &season2.fixtures[0];
    assert!(fixture.is_completed());
    assert_eq!(fixture.home_score, Some(3));

    let home = &season2.teams[0];
    assert_eq!(home.played, 1);
    assert_eq!(home.won, 1);
    assert_eq!(home.points, Some(3));
    assert_eq!(home.form, "W");

    let away = &season2.teams[1];
    assert_eq!(away.lost, 1);
    assert_eq!(away.points, Some(0));
    assert_eq!(away.form, "L");
}

#[test]
fn recording_an_unknown_fixture_fails() {
    let mut conn = memory_db();
    assert!(store::record_result(&mut conn, 404, 1, 0).is_err());
}
