use std::collections::{HashMap, VecDeque};
use std::env;

use crate::analysis::{self, TeamOutlook};
use crate::views::{self, SeasonViews};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeasonId {
    Season1,
    Season2,
    Season3,
}

impl SeasonId {
    pub const ALL: [SeasonId; 3] = [SeasonId::Season1, SeasonId::Season2, SeasonId::Season3];

    pub fn key(self) -> &'static str {
        match self {
            SeasonId::Season1 => "season1",
            SeasonId::Season2 => "season2",
            SeasonId::Season3 => "season3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeasonId::Season1 => "Season 1",
            SeasonId::Season2 => "Season 2",
            SeasonId::Season3 => "Season 3",
        }
    }

    pub fn from_key(raw: &str) -> Option<SeasonId> {
        SeasonId::ALL.into_iter().find(|id| id.key() == raw)
    }
}

/// Seasons active for this deployment: the first LEAGUE_SEASON_COUNT
/// entries of the closed season set (two seasons unless configured).
pub fn deployment_seasons() -> Vec<SeasonId> {
    let count = env::var("LEAGUE_SEASON_COUNT")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(2)
        .clamp(2, SeasonId::ALL.len());
    SeasonId::ALL[..count].to_vec()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Table,
    Fixtures,
    Scorers,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Table => "League Table",
            Tab::Fixtures => "Fixtures",
            Tab::Scorers => "Top Scorers",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Table => Tab::Fixtures,
            Tab::Fixtures => Tab::Scorers,
            Tab::Scorers => Tab::Table,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    League,
    Outlook { team: String },
}

/// A fixture's round slot. Numeric rounds are regular matchdays; any
/// other token is a symbolic stage label and passes through verbatim.
/// The literal 0 and the empty string are valid, present rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
    Matchday(i64),
    Stage(String),
}

impl Round {
    pub fn parse(raw: &str) -> Round {
        match raw.trim().parse::<i64>() {
            Ok(num) => Round::Matchday(num),
            Err(_) => Round::Stage(raw.to_string()),
        }
    }

    /// String form used for grouping and storage.
    pub fn key(&self) -> String {
        match self {
            Round::Matchday(num) => num.to_string(),
            Round::Stage(label) => label.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Supplied by the backend when present; derived otherwise.
    pub points: Option<i64>,
    /// Result codes, chronological, most-recent-last. Possibly empty.
    pub form: String,
}

impl Team {
    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    /// Backend points win over derivable points; 3 per win and 1 per
    /// draw only when nothing was supplied.
    pub fn effective_points(&self) -> i64 {
        self.points
            .unwrap_or(self.won as i64 * 3 + self.drawn as i64)
    }
}

pub const STATUS_COMPLETED: &str = "Completed";
pub const STATUS_SCHEDULED: &str = "Scheduled";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixture {
    pub round: Option<Round>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub home: String,
    pub away: String,
    pub status: Option<String>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
}

impl Fixture {
    // Only the exact backend vocabulary "Completed" is special.
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some(STATUS_COMPLETED)
    }

    pub fn has_result(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeasonData {
    pub teams: Vec<Team>,
    pub fixtures: Vec<Fixture>,
}

impl SeasonData {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.fixtures.is_empty()
    }
}

/// The immutable per-run league snapshot, season-keyed and ordered.
#[derive(Debug, Clone, Default)]
pub struct LeagueData {
    pub seasons: Vec<(SeasonId, SeasonData)>,
}

impl LeagueData {
    pub fn empty(season_ids: &[SeasonId]) -> Self {
        Self {
            seasons: season_ids
                .iter()
                .map(|id| (*id, SeasonData::default()))
                .collect(),
        }
    }

    pub fn season(&self, id: SeasonId) -> Option<&SeasonData> {
        self.seasons
            .iter()
            .find(|(season, _)| *season == id)
            .map(|(_, data)| data)
    }

    pub fn season_mut(&mut self, id: SeasonId) -> Option<&mut SeasonData> {
        self.seasons
            .iter_mut()
            .find(|(season, _)| *season == id)
            .map(|(_, data)| data)
    }

    pub fn season_ids(&self) -> Vec<SeasonId> {
        self.seasons.iter().map(|(id, _)| *id).collect()
    }

    /// Most recent season of the deployment set.
    pub fn latest(&self) -> Option<SeasonId> {
        self.seasons.last().map(|(id, _)| *id)
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub season: SeasonId,
    pub tab: Tab,
    pub data: LeagueData,
    pub views: HashMap<SeasonId, SeasonViews>,
    /// Counts view-model rebuilds; a same-season select must not move it.
    pub rebuilds: usize,
    pub table_selected: usize,
    pub fixtures_scroll: u16,
    pub scorers_scroll: u16,
    pub outlook: Option<TeamOutlook>,
    pub outlook_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(data: LeagueData) -> Self {
        let season = data.latest().unwrap_or(SeasonId::Season1);
        let mut state = Self {
            screen: Screen::League,
            season,
            tab: Tab::Table,
            data,
            views: HashMap::new(),
            rebuilds: 0,
            table_selected: 0,
            fixtures_scroll: 0,
            scorers_scroll: 0,
            outlook: None,
            outlook_scroll: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        };
        // Build every season up front so tab/season switches only
        // toggle visibility.
        for id in state.data.season_ids() {
            state.rebuild_views(id);
        }
        state
    }

    fn rebuild_views(&mut self, season: SeasonId) {
        let latest = self.data.latest();
        let built = self
            .data
            .season(season)
            .map(|data| views::build_season_views(season, data, latest))
            .unwrap_or_default();
        self.views.insert(season, built);
        self.rebuilds += 1;
    }

    pub fn season_views(&self) -> Option<&SeasonViews> {
        self.views.get(&self.season)
    }

    /// Season switch: no-op when already current, otherwise the tab
    /// falls back to the table and the season's views are rebuilt.
    pub fn select_season(&mut self, season: SeasonId) {
        if self.season == season {
            return;
        }
        if self.data.season(season).is_none() {
            self.push_log(format!("[WARN] {} is not available", season.label()));
            return;
        }
        self.season = season;
        self.tab = Tab::Table;
        self.table_selected = 0;
        self.fixtures_scroll = 0;
        self.scorers_scroll = 0;
        self.rebuild_views(season);
        self.push_log(format!("[INFO] Season: {}", season.label()));
    }

    pub fn cycle_season(&mut self) {
        let ids = self.data.season_ids();
        if ids.is_empty() {
            return;
        }
        let pos = ids.iter().position(|id| *id == self.season).unwrap_or(0);
        self.select_season(ids[(pos + 1) % ids.len()]);
    }

    /// Tab switch: visibility only, cached views are reused as-is.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn cycle_tab(&mut self) {
        self.tab = self.tab.next();
    }

    /// Replaces a season's data wholesale (result recorded, standings
    /// recalculated) and refreshes its views.
    pub fn replace_season(&mut self, season: SeasonId, data: SeasonData) {
        if let Some(slot) = self.data.season_mut(season) {
            *slot = data;
        }
        self.rebuild_views(season);
        self.clamp_selection();
    }

    pub fn selected_team(&self) -> Option<String> {
        self.season_views()
            .and_then(|views| views.table.get(self.table_selected))
            .map(|row| row.name.clone())
    }

    pub fn open_outlook(&mut self) {
        let Some(team) = self.selected_team() else {
            self.push_log("[INFO] No team selected");
            return;
        };
        let Some(data) = self.data.season(self.season) else {
            return;
        };
        match analysis::team_outlook(&team, data) {
            Some(outlook) => {
                self.outlook = Some(outlook);
                self.outlook_scroll = 0;
                self.screen = Screen::Outlook { team };
            }
            None => self.push_log(format!("[WARN] No data for {team}")),
        }
    }

    pub fn close_outlook(&mut self) {
        self.screen = Screen::League;
        self.outlook = None;
        self.outlook_scroll = 0;
    }

    pub fn select_next(&mut self) {
        if matches!(self.screen, Screen::Outlook { .. }) {
            self.outlook_scroll = self.outlook_scroll.saturating_add(1);
            return;
        }
        match self.tab {
            Tab::Table => {
                let total = self.table_len();
                if total == 0 {
                    self.table_selected = 0;
                } else {
                    self.table_selected = (self.table_selected + 1) % total;
                }
            }
            Tab::Fixtures => {
                let max = self.max_fixture_scroll();
                if self.fixtures_scroll < max {
                    self.fixtures_scroll += 1;
                }
            }
            Tab::Scorers => {
                let max = self.max_scorer_scroll();
                if self.scorers_scroll < max {
                    self.scorers_scroll += 1;
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        if matches!(self.screen, Screen::Outlook { .. }) {
            self.outlook_scroll = self.outlook_scroll.saturating_sub(1);
            return;
        }
        match self.tab {
            Tab::Table => {
                let total = self.table_len();
                if total == 0 {
                    self.table_selected = 0;
                } else if self.table_selected == 0 {
                    self.table_selected = total - 1;
                } else {
                    self.table_selected -= 1;
                }
            }
            Tab::Fixtures => self.fixtures_scroll = self.fixtures_scroll.saturating_sub(1),
            Tab::Scorers => self.scorers_scroll = self.scorers_scroll.saturating_sub(1),
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.table_len();
        if total == 0 {
            self.table_selected = 0;
        } else if self.table_selected >= total {
            self.table_selected = total - 1;
        }
        self.fixtures_scroll = self.fixtures_scroll.min(self.max_fixture_scroll());
        self.scorers_scroll = self.scorers_scroll.min(self.max_scorer_scroll());
    }

    fn table_len(&self) -> usize {
        self.season_views().map(|v| v.table.len()).unwrap_or(0)
    }

    fn max_fixture_scroll(&self) -> u16 {
        let lines = self
            .season_views()
            .map(views::fixture_line_count)
            .unwrap_or(0);
        lines.saturating_sub(1).min(u16::MAX as usize) as u16
    }

    fn max_scorer_scroll(&self) -> u16 {
        let rows = self.season_views().map(|v| v.scorers.len()).unwrap_or(0);
        rows.saturating_sub(1).min(u16::MAX as usize) as u16
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
