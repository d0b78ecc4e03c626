use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use rand::rngs::StdRng;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, Paragraph, Wrap};

use odi_terminal::config::AppConfig;
use odi_terminal::dataset::{self, Dataset};
use odi_terminal::leaderboard::{self, RoleChoice};
use odi_terminal::player_detail::ChartPair;
use odi_terminal::query::{BannerLevel, Intent};
use odi_terminal::state::{AppState, InputMode};

struct App {
    state: AppState,
    dataset: Dataset,
    rng: StdRng,
    should_quit: bool,
}

impl App {
    fn new(dataset: Dataset, config: &AppConfig) -> Self {
        let mut app = Self {
            state: AppState::new().with_leaderboard_size(config.leaderboard_size),
            dataset,
            rng: config.quote_rng(),
            should_quit: false,
        };
        app.state.push_log(format!(
            "[INFO] Loaded {} players from {}",
            app.dataset.len(),
            config.data_path.display()
        ));
        app.refresh_detail();
        app
    }

    fn refresh_detail(&mut self) {
        self.state.refresh_detail(&self.dataset, &mut self.rng);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.input_mode == InputMode::Query {
            self.on_query_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.state.begin_query(),
            KeyCode::Tab | KeyCode::Char('r') => {
                self.state.cycle_role_next();
                self.refresh_detail();
            }
            KeyCode::BackTab | KeyCode::Char('R') => {
                self.state.cycle_role_prev();
                self.refresh_detail();
            }
            KeyCode::Char('1') => self.pick_role(RoleChoice::Batsman),
            KeyCode::Char('2') => self.pick_role(RoleChoice::Bowler),
            KeyCode::Char('3') => self.pick_role(RoleChoice::AllRounder),
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select_player_next(&self.dataset);
                self.refresh_detail();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select_player_prev(&self.dataset);
                self.refresh_detail();
            }
            KeyCode::Char('n') => self.state.reroll_quote(&mut self.rng),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn on_query_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state.submit_query(&self.dataset),
            KeyCode::Esc => self.state.cancel_query(),
            KeyCode::Backspace => self.state.pop_query_char(),
            KeyCode::Char(c) => self.state.push_query_char(c),
            _ => {}
        }
    }

    fn pick_role(&mut self, role: RoleChoice) {
        self.state.set_role(role);
        self.refresh_detail();
    }
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let dataset = dataset::load(&config.data_path)
        .with_context(|| format!("unable to load player data from {}", config.data_path.display()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(dataset, &config);
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
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state, &app.dataset))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_dashboard(frame, chunks[1], app);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState, dataset: &Dataset) -> String {
    let title = format!(
        "ODI PLAYER STATS | Role: {} | {} players loaded",
        state.role.label(),
        dataset.len()
    );
    let line1 = format!("   o   {title}");
    let line2 = "  /|\\__".to_string();
    let line3 = "  / \\".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.input_mode {
        InputMode::Browse => {
            "Tab/r Role | 1/2/3 Pick role | j/k/↑/↓ Player | / Ask | n Quote | ? Help | q Quit"
                .to_string()
        }
        InputMode::Query => "Type a question | Enter Ask | Backspace Delete | Esc Cancel".to_string(),
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(34),
            Constraint::Min(40),
            Constraint::Length(40),
        ])
        .split(area);

    let board_height = app.state.leaderboard_size as u16 + 2;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(board_height), Constraint::Min(1)])
        .split(columns[0]);

    let board = Paragraph::new(leaderboard_text(&app.state, &app.dataset)).block(
        Block::default()
            .title(format!(
                "Top {} {}s",
                app.state.leaderboard_size,
                app.state.role.label()
            ))
            .borders(Borders::ALL),
    );
    frame.render_widget(board, left[0]);
    render_player_list(frame, left[1], &app.state, &app.dataset);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(columns[1]);
    render_player_card(frame, middle[0], &app.state);
    render_charts(frame, middle[1], &app.state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(columns[2]);
    render_query_input(frame, right[0], &app.state);
    render_banner(frame, right[1], &app.state);
}

fn leaderboard_text(state: &AppState, dataset: &Dataset) -> String {
    let entries = state.leaderboard(dataset);
    if entries.is_empty() {
        return "No players for this role".to_string();
    }
    let metric = state.role.metric();
    entries
        .iter()
        .map(|entry| leaderboard::format_entry(metric, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_player_list(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let block = Block::default().title("Players").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let names = state.player_names(dataset);
    if names.is_empty() {
        let empty = Paragraph::new("No players for this role")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(state.player_selected, names.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };
        let selected = idx == state.player_selected;
        let (prefix, style) = if selected {
            ("> ", Style::default().fg(Color::White).bg(Color::DarkGray))
        } else {
            ("  ", Style::default())
        };
        let line = Paragraph::new(format!("{prefix}{}", names[idx])).style(style);
        frame.render_widget(line, row_area);
    }
}

fn render_player_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Player").borders(Borders::ALL);

    let text = match (&state.detail, &state.detail_error) {
        (Some(detail), _) => {
            let mut lines = vec![
                Line::styled(detail.heading(), Style::default().add_modifier(Modifier::BOLD)),
                Line::raw(""),
            ];
            for (label, value) in detail.stat_lines() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label}: "), Style::default().fg(Color::Cyan)),
                    Span::raw(value),
                ]));
            }
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                detail.quote,
                Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
            ));
            Text::from(lines)
        }
        (None, Some(err)) => Text::styled(err.clone(), Style::default().fg(Color::Red)),
        (None, None) => Text::raw("No player selected"),
    };

    let card = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

fn render_charts(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    let Some(detail) = &state.detail else {
        for (col, title) in cols.iter().zip(["Batting", "Bowling", "Match Results"]) {
            let empty = Paragraph::new("No data")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(empty, *col);
        }
        return;
    };

    frame.render_widget(pair_bar_chart(&detail.batting, Color::LightBlue), cols[0]);
    frame.render_widget(pair_bar_chart(&detail.bowling, Color::LightRed), cols[1]);
    render_results_gauge(frame, cols[2], &detail.results);
}

fn pair_bar_chart(pair: &ChartPair, color: Color) -> BarChart<'static> {
    let bars: Vec<Bar<'static>> = pair
        .labels
        .iter()
        .zip(pair.values)
        .map(|(label, value)| {
            Bar::default()
                .value(u64::from(value))
                .label(Line::from(*label))
                .style(Style::default().fg(color))
        })
        .collect();

    BarChart::default()
        .block(Block::default().title(pair.title).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .max(u64::from(pair.max().max(1)))
}

fn render_results_gauge(frame: &mut Frame, area: Rect, pair: &ChartPair) {
    let block = Block::default().title(pair.title).borders(Borders::ALL);
    let Some([won, lost]) = pair.shares() else {
        let empty = Paragraph::new("No matches recorded")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Red))
        .ratio((won / 100.0).clamp(0.0, 1.0))
        .label(format!("{won:.1}%"));
    frame.render_widget(gauge, rows[1]);

    let legend = Line::from(vec![
        Span::styled(
            format!("{} {} ({won:.1}%)", pair.labels[0], pair.values[0]),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} {} ({lost:.1}%)", pair.labels[1], pair.values[1]),
            Style::default().fg(Color::Red),
        ),
    ]);
    frame.render_widget(Paragraph::new(legend), rows[2]);
}

fn render_query_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let (text, style) = match state.input_mode {
        InputMode::Query => (
            format!("{}_", state.query_input),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Browse => (
            "Press / to ask (e.g. 'most runs')".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title("Ask").borders(Borders::ALL));
    frame.render_widget(input, area);
}

fn render_banner(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Answer").borders(Borders::ALL);
    let Some(banner) = &state.banner else {
        let hint = Paragraph::new("No question asked yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let color = match banner.level {
        BannerLevel::Info => Color::Cyan,
        BannerLevel::Warning => Color::Yellow,
    };
    let mut lines = vec![Line::styled(
        banner.title.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    lines.extend(banner.lines.iter().map(|l| Line::raw(l.clone())));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
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

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        "ODI Terminal - Help".to_string(),
        String::new(),
        "  Tab / r      Next role".to_string(),
        "  S-Tab / R    Previous role".to_string(),
        "  1 / 2 / 3    Batsman / Bowler / All-Rounder".to_string(),
        "  j/k or ↑/↓   Move player selection".to_string(),
        "  /            Ask a question".to_string(),
        "  n            New quote".to_string(),
        "  ?            Toggle help".to_string(),
        "  q            Quit".to_string(),
        String::new(),
        "Questions:".to_string(),
    ];
    for intent in Intent::all() {
        lines.push(format!("  {}", intent.phrases().join(" / ")));
    }

    let help = Paragraph::new(lines.join("\n"))
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
