use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use rusqlite::Connection;

use league_terminal::state::{
    AppState, LeagueData, Screen, SeasonData, SeasonId, Tab, deployment_seasons,
};
use league_terminal::views::{FormResult, Medal, SeasonViews, VERSUS_PLACEHOLDER, Zone};
use league_terminal::{export, schedule, snapshot, standings, store};

struct App {
    state: AppState,
    db: Option<Connection>,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, db: Option<Connection>) -> Self {
        Self {
            state,
            db,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc | KeyCode::Char('b') => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else {
                    self.state.close_outlook();
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ if matches!(self.state.screen, Screen::Outlook { .. }) => {}
            KeyCode::Char('1') => self.state.select_tab(Tab::Table),
            KeyCode::Char('2') => self.state.select_tab(Tab::Fixtures),
            KeyCode::Char('3') => self.state.select_tab(Tab::Scorers),
            KeyCode::Tab => self.state.cycle_tab(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.state.cycle_season(),
            KeyCode::Enter | KeyCode::Char('a') => {
                if self.state.tab == Tab::Table {
                    self.state.open_outlook();
                }
            }
            KeyCode::Char('e') => self.export_current_season(),
            KeyCode::Char('r') => self.recalculate_standings(),
            KeyCode::Char('g') => self.generate_fixtures(),
            _ => {}
        }
    }

    /// Fills an empty season with a single round robin over its teams.
    fn generate_fixtures(&mut self) {
        let season = self.state.season;
        let Some(data) = self.state.data.season(season) else {
            return;
        };
        if data.teams.len() < 2 {
            self.state
                .push_log("[INFO] Need at least 2 teams to generate fixtures");
            return;
        }
        if !data.fixtures.is_empty() {
            self.state
                .push_log("[INFO] Fixtures already exist for this season");
            return;
        }
        let names: Vec<String> = data.teams.iter().map(|t| t.name.clone()).collect();
        let teams = data.teams.clone();
        let fixtures = schedule::generate_round_robin(&names, 1);

        if let Some(conn) = self.db.as_ref() {
            for fixture in &fixtures {
                if let Err(err) = store::insert_fixture(conn, season, fixture) {
                    self.state
                        .push_log(format!("[WARN] Fixture not saved: {err}"));
                    break;
                }
            }
        }

        let count = fixtures.len();
        self.state.replace_season(season, SeasonData { teams, fixtures });
        self.state.push_log(format!(
            "[INFO] Generated {count} fixtures for {}",
            season.label()
        ));
    }

    fn export_current_season(&mut self) {
        let season = self.state.season;
        let Some(views) = self.state.season_views().cloned() else {
            self.state.push_log("[INFO] Nothing to export");
            return;
        };
        let path = PathBuf::from(format!("league_{}.xlsx", season.key()));
        match export::export_season(&path, season, &views) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} ({} table rows, {} fixtures, {} scorers)",
                report.path.display(),
                report.table_rows,
                report.fixture_rows,
                report.scorer_rows
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err}")),
        }
    }

    /// Rebuilds the current season's table from its completed
    /// fixtures, persisting when a database is attached.
    fn recalculate_standings(&mut self) {
        let season = self.state.season;
        let Some(data) = self.state.data.season(season) else {
            return;
        };
        if data.teams.is_empty() {
            self.state.push_log("[INFO] No teams to recalculate");
            return;
        }
        let fixtures = data.fixtures.clone();
        let recomputed = standings::recompute_standings(&data.teams, &fixtures);

        if let Some(conn) = self.db.as_mut() {
            if let Err(err) = store::save_standings(conn, season, &recomputed) {
                self.state
                    .push_log(format!("[WARN] Standings not saved: {err}"));
            }
        }
        self.state.replace_season(
            season,
            SeasonData {
                teams: recomputed,
                fixtures,
            },
        );
        self.state.push_log(format!(
            "[INFO] Standings recalculated for {}",
            season.label()
        ));
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let seasons = deployment_seasons();
    let (data, boot_logs, db) = load_league(&seasons);
    let mut state = AppState::new(data);
    for msg in boot_logs {
        state.push_log(msg);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state, db);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

/// Snapshot file when configured, otherwise the SQLite store. Either
/// source failing degrades to an empty league plus a diagnostic; the
/// app never refuses to start over data.
fn load_league(seasons: &[SeasonId]) -> (LeagueData, Vec<String>, Option<Connection>) {
    let mut logs = Vec::new();

    if let Ok(path) = env::var("LEAGUE_SNAPSHOT") {
        if !path.trim().is_empty() {
            match snapshot::load_league_snapshot(Path::new(&path), seasons) {
                Ok(report) => {
                    for warning in report.warnings {
                        logs.push(format!("[WARN] {warning}"));
                    }
                    logs.push(format!("[INFO] Snapshot loaded from {path}"));
                    return (report.data, logs, None);
                }
                Err(err) => {
                    logs.push(format!(
                        "[WARN] Snapshot unavailable: {err}; rendering empty"
                    ));
                    return (LeagueData::empty(seasons), logs, None);
                }
            }
        }
    }

    match open_league_db(seasons, &mut logs) {
        Ok((data, conn)) => (data, logs, Some(conn)),
        Err(err) => {
            logs.push(format!(
                "[WARN] League database unavailable: {err}; rendering empty"
            ));
            (LeagueData::empty(seasons), logs, None)
        }
    }
}

fn open_league_db(
    seasons: &[SeasonId],
    logs: &mut Vec<String>,
) -> Result<(LeagueData, Connection)> {
    let path = store::default_db_path().context("unable to resolve league db path")?;
    let mut conn = store::open_db(&path)?;
    if store::seed_if_empty(&mut conn)? {
        logs.push("[INFO] Seeded inaugural season data".to_string());
    }
    let data = store::load_league_data(&conn, seasons)?;
    Ok((data, conn))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::League => render_league(frame, chunks[1], &app.state),
        Screen::Outlook { .. } => render_outlook(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match &state.screen {
        Screen::League => format!(
            "LEAGUE TERMINAL | {} | {}",
            state.season.label(),
            state.tab.label()
        ),
        Screen::Outlook { team } => {
            format!("TEAM OUTLOOK | {} | {}", state.season.label(), team)
        }
    };
    let line1 = format!("  ___  {title}");
    let line2 = " (___)".to_string();
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::League => {
            "1 Table | 2 Fixtures | 3 Scorers | Tab Cycle | s Season | j/k/↑/↓ Move | Enter Outlook | e Export | r Recalc | g Generate | ? Help | q Quit"
                .to_string()
        }
        Screen::Outlook { .. } => "b/Esc Back | j/k/↑/↓ Scroll | ? Help | q Quit".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_league(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    match state.tab {
        Tab::Table => render_table(frame, area, state),
        Tab::Fixtures => render_fixtures(frame, area, state),
        Tab::Scorers => render_scorers(frame, area, state),
    }
}

fn table_columns() -> [Constraint; 11] {
    [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(11),
    ]
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(views) = state.season_views() else {
        return;
    };

    let mut sections = vec![Constraint::Length(1), Constraint::Min(1)];
    if views.champion.is_some() {
        sections.insert(0, Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(sections)
        .split(area);

    let mut next = 0;
    if let Some(champion) = &views.champion {
        let banner = Paragraph::new(format!("🏆 {champion} are the champions!")).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(banner, chunks[next]);
        next += 1;
    }

    let widths = table_columns();
    render_table_header(frame, chunks[next], &widths);
    let list_area = chunks[next + 1];

    if views.table.is_empty() {
        let empty = Paragraph::new("No teams data available for this season yet.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    if list_area.height == 0 {
        return;
    }
    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.table_selected, views.table.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let row = &views.table[idx];
        let selected = idx == state.table_selected;
        let mut row_style = match row.zone {
            Some(Zone::Final) => Style::default().fg(Color::Yellow),
            Some(Zone::Semi) => Style::default().fg(Color::Cyan),
            None => Style::default(),
        };
        if selected {
            row_style = row_style.bg(Color::DarkGray);
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        render_cell_text(frame, cols[0], &row.rank.to_string(), row_style);
        render_cell_text(frame, cols[1], &row.name, row_style);
        render_cell_text(frame, cols[2], &row.played.to_string(), row_style);
        render_cell_text(frame, cols[3], &row.won.to_string(), row_style);
        render_cell_text(frame, cols[4], &row.drawn.to_string(), row_style);
        render_cell_text(frame, cols[5], &row.lost.to_string(), row_style);
        render_cell_text(frame, cols[6], &row.goals_for.to_string(), row_style);
        render_cell_text(frame, cols[7], &row.goals_against.to_string(), row_style);
        render_cell_text(frame, cols[8], &row.goal_diff_label, row_style);
        render_cell_text(
            frame,
            cols[9],
            &row.points.to_string(),
            row_style.add_modifier(Modifier::BOLD),
        );

        let form_line = Line::from(
            row.form
                .iter()
                .map(|cell| form_span(*cell, selected))
                .collect::<Vec<_>>(),
        );
        frame.render_widget(Paragraph::new(form_line), cols[10]);
    }
}

fn render_table_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    let labels = [
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts", "Form",
    ];
    for (col, label) in cols.iter().zip(labels) {
        render_cell_text(frame, *col, label, style);
    }
}

fn form_span(cell: FormResult, selected: bool) -> Span<'static> {
    let (glyph, color) = match cell {
        FormResult::Win => ("W ", Color::Green),
        FormResult::Draw => ("D ", Color::Yellow),
        FormResult::Loss => ("L ", Color::Red),
    };
    let mut style = Style::default().fg(color);
    if selected {
        style = style.bg(Color::DarkGray);
    }
    Span::styled(glyph, style)
}

fn render_fixtures(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(views) = state.season_views() else {
        return;
    };
    if views.fixtures.is_empty() {
        let empty = Paragraph::new("No fixtures scheduled yet.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let lines = fixture_lines(views);
    let paragraph = Paragraph::new(Text::from(lines)).scroll((state.fixtures_scroll, 0));
    frame.render_widget(paragraph, area);
}

// One header line, three lines per card, one trailing blank per group;
// views::fixture_line_count mirrors this shape for scroll bounds.
fn fixture_lines(views: &SeasonViews) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for group in &views.fixtures {
        let header_style = if group.knockout {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::styled(group.header.clone(), header_style));

        for card in &group.matches {
            lines.push(Line::styled(
                format!("  {} / {}", card.date, card.kickoff),
                Style::default().fg(Color::DarkGray),
            ));

            let score_span = match &card.score {
                Some(score) => Span::styled(
                    score.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                None => Span::styled(
                    VERSUS_PLACEHOLDER.to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {:>22}  ", card.home)),
                score_span,
                Span::raw(format!("  {}", card.away)),
            ]));

            lines.push(Line::styled(
                format!("  {}", card.venue_line),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::raw(""));
    }
    lines
}

fn render_scorers(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(views) = state.season_views() else {
        return;
    };
    if views.scorers.is_empty() {
        let empty =
            Paragraph::new("No stats available.").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = views
        .scorers
        .iter()
        .map(|row| {
            let style = match row.medal {
                Medal::Gold => Style::default().fg(Color::Yellow),
                Medal::Silver => Style::default().fg(Color::White),
                Medal::Bronze => Style::default().fg(Color::LightRed),
                Medal::Standard => Style::default(),
            };
            Line::styled(
                format!(
                    "{} {:>2}. {:<26} {} Goals",
                    row.medal.glyph(),
                    row.rank,
                    row.name,
                    row.goals
                ),
                style,
            )
        })
        .collect();

    let paragraph = Paragraph::new(Text::from(lines)).scroll((state.scorers_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_outlook(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let Some(outlook) = &state.outlook else {
        let empty =
            Paragraph::new("No outlook available").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(30)])
        .split(area);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(1)])
        .split(columns[0]);

    let summary_lines = [
        format!("Rank: {}", outlook.rank),
        format!("Played: {}", outlook.played),
        format!("Remaining: {}", outlook.remaining),
        format!("Points: {}", outlook.points),
        format!("Max points: {}", outlook.max_points),
        format!("Leader: {} pts", outlook.leader_points),
        format!("Gap to leader: {}", outlook.points_to_leader),
    ]
    .join("\n");
    let summary =
        Paragraph::new(summary_lines).block(Block::default().title("Summary").borders(Borders::ALL));
    frame.render_widget(summary, left_chunks[0]);

    let remaining_text = if outlook.remaining_fixtures.is_empty() {
        "Season complete".to_string()
    } else {
        outlook
            .remaining_fixtures
            .iter()
            .map(|fixture| format!("{} vs {}", fixture.home, fixture.away))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let remaining = Paragraph::new(remaining_text)
        .block(Block::default().title("Remaining").borders(Borders::ALL));
    frame.render_widget(remaining, left_chunks[1]);

    let h2h_lines: Vec<Line> = outlook
        .head_to_head
        .iter()
        .map(|record| {
            Line::raw(format!(
                "{:<26} P{} R{} {}",
                record.opponent, record.played, record.remaining, record.results
            ))
        })
        .collect();
    let h2h = Paragraph::new(Text::from(h2h_lines))
        .scroll((state.outlook_scroll, 0))
        .block(Block::default().title("Head to Head").borders(Borders::ALL));
    frame.render_widget(h2h, columns[1]);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "League Terminal - Help",
        "",
        "League:",
        "  1 / 2 / 3    League Table / Fixtures / Top Scorers",
        "  Tab          Cycle tabs",
        "  s            Next season (tab resets to the table)",
        "  j/k or ↑/↓   Move/scroll",
        "  Enter / a    Team outlook (table tab)",
        "  e            Export season workbook",
        "  r            Recalculate standings from fixtures",
        "  g            Generate a round robin for an empty season",
        "",
        "Outlook:",
        "  b / Esc      Back",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
