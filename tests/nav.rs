use league_terminal::state::{
    AppState, Fixture, LeagueData, Round, Screen, SeasonData, SeasonId, Tab, Team,
};

fn league_with_two_seasons() -> LeagueData {
    let team = |name: &str| Team {
        name: name.to_string(),
        won: 1,
        goals_for: 2,
        ..Team::default()
    };
    let fixture = Fixture {
        round: Some(Round::Matchday(1)),
        home: "Alpha".to_string(),
        away: "Beta".to_string(),
        status: Some("Completed".to_string()),
        home_score: Some(2),
        away_score: Some(0),
        ..Fixture::default()
    };

    LeagueData {
        seasons: vec![
            (
                SeasonId::Season1,
                SeasonData {
                    teams: vec![team("Alpha"), team("Beta")],
                    fixtures: vec![fixture.clone()],
                },
            ),
            (
                SeasonId::Season2,
                SeasonData {
                    teams: vec![team("Alpha"), team("Gamma")],
                    fixtures: vec![fixture],
                },
            ),
        ],
    }
}

#[test]
fn initial_state_shows_latest_season_table_tab() {
    let state = AppState::new(league_with_two_seasons());
    assert_eq!(state.season, SeasonId::Season2);
    assert_eq!(state.tab, Tab::Table);
    assert_eq!(state.screen, Screen::League);
    // One view build per season at load.
    assert_eq!(state.rebuilds, 2);
    assert!(state.season_views().is_some());
}

#[test]
fn selecting_the_current_season_is_a_noop() {
    let mut state = AppState::new(league_with_two_seasons());
    state.select_tab(Tab::Fixtures);
    let rebuilds_before = state.rebuilds;

    state.select_season(SeasonId::Season2);

    assert_eq!(state.rebuilds, rebuilds_before);
    assert_eq!(state.tab, Tab::Fixtures);
    assert_eq!(state.season, SeasonId::Season2);
}

#[test]
fn switching_season_resets_tab_and_rebuilds_views() {
    let mut state = AppState::new(league_with_two_seasons());
    state.select_tab(Tab::Scorers);
    let rebuilds_before = state.rebuilds;

    state.select_season(SeasonId::Season1);

    assert_eq!(state.season, SeasonId::Season1);
    assert_eq!(state.tab, Tab::Table);
    assert_eq!(state.rebuilds, rebuilds_before + 1);
}

#[test]
fn tab_switch_never_recomputes_views() {
    let mut state = AppState::new(league_with_two_seasons());
    let rebuilds_before = state.rebuilds;

    state.select_tab(Tab::Fixtures);
    state.select_tab(Tab::Scorers);
    state.cycle_tab();

    assert_eq!(state.rebuilds, rebuilds_before);
    assert_eq!(state.tab, Tab::Table);
}

#[test]
fn cycle_season_wraps_around_the_deployment_set() {
    let mut state = AppState::new(league_with_two_seasons());
    assert_eq!(state.season, SeasonId::Season2);
    state.cycle_season();
    assert_eq!(state.season, SeasonId::Season1);
    state.cycle_season();
    assert_eq!(state.season, SeasonId::Season2);
}

#[test]
fn unknown_season_select_is_rejected_with_a_log() {
    let mut state = AppState::new(league_with_two_seasons());
    state.select_season(SeasonId::Season3);
    assert_eq!(state.season, SeasonId::Season2);
    assert!(state.logs.iter().any(|msg| msg.contains("not available")));
}

#[test]
fn empty_league_still_builds_views() {
    let state = AppState::new(LeagueData::empty(&[SeasonId::Season1, SeasonId::Season2]));
    let views = state.season_views().expect("views should exist");
    assert!(views.table.is_empty());
    assert!(views.fixtures.is_empty());
    assert!(views.scorers.is_empty());
    assert_eq!(state.selected_team(), None);
}

#[test]
fn outlook_opens_for_the_selected_team_and_closes_back() {
    let mut state = AppState::new(league_with_two_seasons());
    state.open_outlook();
    match &state.screen {
        Screen::Outlook { team } => assert_eq!(team, "Alpha"),
        other => panic!("expected outlook screen, got {other:?}"),
    }
    assert!(state.outlook.is_some());

    state.close_outlook();
    assert_eq!(state.screen, Screen::League);
    assert!(state.outlook.is_none());
}

#[test]
fn outlook_on_empty_season_stays_on_league_screen() {
    let mut state = AppState::new(LeagueData::empty(&[SeasonId::Season1, SeasonId::Season2]));
    state.open_outlook();
    assert_eq!(state.screen, Screen::League);
    assert!(state.logs.iter().any(|msg| msg.contains("No team selected")));
}

#[test]
fn replace_season_rebuilds_and_clamps_selection() {
    let mut state = AppState::new(league_with_two_seasons());
    state.table_selected = 1;
    let rebuilds_before = state.rebuilds;

    state.replace_season(
        SeasonId::Season2,
        SeasonData {
            teams: vec![Team {
                name: "Only".to_string(),
                ..Team::default()
            }],
            fixtures: Vec::new(),
        },
    );

    assert_eq!(state.rebuilds, rebuilds_before + 1);
    assert_eq!(state.table_selected, 0);
    assert_eq!(state.selected_team().as_deref(), Some("Only"));
}

#[test]
fn table_selection_wraps_in_both_directions() {
    let mut state = AppState::new(league_with_two_seasons());
    assert_eq!(state.table_selected, 0);
    state.select_next();
    assert_eq!(state.table_selected, 1);
    state.select_next();
    assert_eq!(state.table_selected, 0);
    state.select_prev();
    assert_eq!(state.table_selected, 1);
}
