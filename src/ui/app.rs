// Main TUI application
use super::grid::{self, Move};
use crate::config::{Config, MAX_GRID_COLUMNS};
use crate::error::Result;
use crate::expiry::{self, format_time_with_am_pm, split_meridiem};
use crate::panel::{clear_notification, Notification, RecordDetails, Rental, TimeColumn};
use crate::session::PanelSession;
use catppuccin::Flavor;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear as ClearArea, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// How long a toast stays in the status area
const TOAST_TTL: Duration = Duration::from_secs(5);

/// Height of one time cell, borders included
const CELL_HEIGHT: u16 = 3;

/// Convert Catppuccin color to Ratatui Color
fn catppuccin_color(color: catppuccin::Color) -> Color {
    Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
}

/// Which grid has the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Active,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
enum AppState {
    /// Both grids
    Main,
    /// Help screen
    Help,
    /// "Account Details" dialog over the grids
    Details(Rental),
    /// "Clear Expired Orders" confirmation over the grids
    ConfirmClear,
    /// Clear confirmed; runs on the next loop iteration, after one draw
    Clearing,
}

pub struct App {
    /// Whether the app should quit
    should_quit: bool,
    state: AppState,
    active_pane: Pane,
    /// Selected cell in the ACTIVE grid
    active_selected: usize,
    /// Selected cell in the EXPIRED grid
    expired_selected: usize,
    session: PanelSession,
    grid_columns: usize,
    /// Status message to display
    status_message: Option<String>,
    /// Latest notification and when it was raised
    toast: Option<(Notification, Instant)>,
    /// Last Ctrl+C press time for double-press detection
    last_ctrl_c_time: Option<Instant>,
    theme: Flavor,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let session = PanelSession::connect(&config)?;
        Ok(Self::with_session(session, &config))
    }

    fn with_session(session: PanelSession, config: &Config) -> Self {
        Self {
            should_quit: false,
            state: AppState::Main,
            active_pane: Pane::Active,
            active_selected: 0,
            expired_selected: 0,
            session,
            grid_columns: config.ui.grid_columns.clamp(1, MAX_GRID_COLUMNS),
            status_message: None,
            toast: None,
            last_ctrl_c_time: None,
            theme: catppuccin::PALETTE.mocha,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.refresh().await;

        let result = self.run_event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if self.state == AppState::Clearing {
                self.run_clear().await;
                continue;
            }

            let now = Instant::now();
            if self.session.refresher_mut().is_due(now) {
                tracing::debug!("Auto-refreshing rentals");
                self.session.refresher_mut().reset_timer(now);
                self.refresh().await;
            }

            if self
                .toast
                .as_ref()
                .is_some_and(|(_, raised)| raised.elapsed() >= TOAST_TTL)
            {
                self.toast = None;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    // Only handle key press events, ignore key release
                    if key.kind == KeyEventKind::Press {
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            self.handle_ctrl_c();
                        } else {
                            self.handle_key(key.code).await;
                        }
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Refetch rentals and reclassify against the current time
    async fn refresh(&mut self) {
        match self.session.refresh(expiry::now()).await {
            Ok(()) => {
                let buckets = self.session.buckets();
                self.status_message = Some(if buckets.is_empty() {
                    "No active or expired accounts".to_string()
                } else {
                    format!(
                        "{} active, {} expired",
                        buckets.active.len(),
                        buckets.expired.len()
                    )
                });
            }
            Err(e) => {
                self.status_message = Some(format!("Refresh failed: {}", e));
            }
        }
        self.clamp_selection();
    }

    async fn run_clear(&mut self) {
        let result = self.session.clear_expired().await;
        self.notify(clear_notification(&result));
        self.state = AppState::Main;
        self.clamp_selection();
    }

    fn notify(&mut self, notification: Notification) {
        tracing::info!("{}: {}", notification.title, notification.description);
        self.toast = Some((notification, Instant::now()));
    }

    async fn handle_key(&mut self, key: KeyCode) {
        match self.state {
            AppState::Main => self.handle_main_key(key).await,
            AppState::Help => {
                // Any key exits help screen
                self.state = AppState::Main;
            }
            AppState::Details(_) => {
                if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.state = AppState::Main;
                }
            }
            AppState::ConfirmClear => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.state = AppState::Clearing;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Main;
                }
                _ => {}
            },
            AppState::Clearing => {
                // A started clear always runs to completion
            }
        }
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();

        if let Some(last_press) = self.last_ctrl_c_time {
            if now.duration_since(last_press).as_secs() < 2 {
                tracing::info!("Ctrl+C pressed twice - forcing exit");
                self.should_quit = true;
                return;
            }
        }

        self.last_ctrl_c_time = Some(now);
        self.status_message = Some("Press Ctrl+C again within 2 seconds to force quit".to_string());
    }

    async fn handle_main_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state = AppState::Help;
            }
            KeyCode::Tab => {
                self.active_pane = match self.active_pane {
                    Pane::Active => Pane::Expired,
                    Pane::Expired => Pane::Active,
                };
            }
            KeyCode::Char('r') => {
                self.refresh().await;
                self.session.refresher_mut().reset_timer(Instant::now());
            }
            KeyCode::Char('c') => {
                if self.session.buckets().expired.is_empty() {
                    self.status_message = Some("No expired accounts to clear".to_string());
                } else {
                    self.state = AppState::ConfirmClear;
                }
            }
            KeyCode::Enter => {
                if let Some(rental) = self.selected_rental() {
                    self.state = AppState::Details(rental.clone());
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(Move::Left),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(Move::Right),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(Move::Up),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(Move::Down),
            _ => {}
        }
    }

    fn pane_rentals(&self, pane: Pane) -> &[Rental] {
        let buckets = self.session.buckets();
        match pane {
            Pane::Active => &buckets.active,
            Pane::Expired => &buckets.expired,
        }
    }

    fn selected_index(&self, pane: Pane) -> usize {
        match pane {
            Pane::Active => self.active_selected,
            Pane::Expired => self.expired_selected,
        }
    }

    fn selected_rental(&self) -> Option<&Rental> {
        self.pane_rentals(self.active_pane)
            .get(self.selected_index(self.active_pane))
    }

    fn move_selection(&mut self, movement: Move) {
        let len = self.pane_rentals(self.active_pane).len();
        let next = grid::step(
            self.selected_index(self.active_pane),
            len,
            self.grid_columns,
            movement,
        );
        match self.active_pane {
            Pane::Active => self.active_selected = next,
            Pane::Expired => self.expired_selected = next,
        }
    }

    /// Keep selections inside the grids after they change size
    fn clamp_selection(&mut self) {
        let buckets = self.session.buckets();
        self.active_selected = self
            .active_selected
            .min(buckets.active.len().saturating_sub(1));
        self.expired_selected = self
            .expired_selected
            .min(buckets.expired.len().saturating_sub(1));
    }

    fn ui(&self, f: &mut Frame) {
        match &self.state {
            AppState::Help => self.draw_help_screen(f),
            AppState::Main => self.draw_main_screen(f),
            AppState::Details(rental) => {
                self.draw_main_screen(f);
                self.draw_details_dialog(f, rental);
            }
            AppState::ConfirmClear => {
                self.draw_main_screen(f);
                self.draw_confirmation_dialog(f);
            }
            AppState::Clearing => {
                self.draw_main_screen(f);
                self.draw_clearing_dialog(f);
            }
        }
    }

    fn draw_main_screen(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Header
                Constraint::Percentage(50), // Active grid
                Constraint::Percentage(50), // Expired grid
                Constraint::Length(4),      // Status
                Constraint::Length(1),      // Help bar
            ])
            .split(f.area());

        // Header
        let header = Paragraph::new(format!("Account Status - {}", self.session.service()))
            .style(
                Style::default()
                    .fg(catppuccin_color(self.theme.colors.blue))
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        self.draw_grid(f, chunks[1], Pane::Active);
        self.draw_grid(f, chunks[2], Pane::Expired);
        self.draw_status(f, chunks[3]);

        let help = if self.session.buckets().expired.is_empty() {
            "q:quit | ?:help | Tab:switch pane | ←↓↑→/hjkl:navigate | Enter:details | r:refresh"
        } else {
            "q:quit | ?:help | Tab:switch pane | ←↓↑→/hjkl:navigate | Enter:details | r:refresh | c:clear expired"
        };
        let help_bar =
            Paragraph::new(help).style(Style::default().fg(catppuccin_color(self.theme.colors.subtext0)));
        f.render_widget(help_bar, chunks[4]);
    }

    fn draw_grid(&self, f: &mut Frame, area: Rect, pane: Pane) {
        let (title, empty_message) = match pane {
            Pane::Active => ("ACTIVE", "No active accounts"),
            Pane::Expired => ("EXPIRED", "No expired accounts"),
        };
        let rentals = self.pane_rentals(pane);
        let focused = self.active_pane == pane;

        let border_style = if focused {
            Style::default().fg(catppuccin_color(self.theme.colors.mauve))
        } else {
            Style::default().fg(catppuccin_color(self.theme.colors.surface0))
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ({}) ", title, rentals.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if rentals.is_empty() {
            let placeholder = Paragraph::new(empty_message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(catppuccin_color(self.theme.colors.overlay0)));
            f.render_widget(placeholder, inner);
            return;
        }

        let columns = self.grid_columns;
        let visible_rows = (inner.height / CELL_HEIGHT) as usize;
        let selected = self.selected_index(pane);
        let first_row = grid::first_visible_row(selected, columns, visible_rows);
        let last_row = (first_row + visible_rows).min(grid::row_count(rentals.len(), columns));

        let time_color = match pane {
            Pane::Active => catppuccin_color(self.theme.colors.text),
            Pane::Expired => catppuccin_color(self.theme.colors.red),
        };

        for (offset, row) in (first_row..last_row).enumerate() {
            let row_area = Rect {
                x: inner.x,
                y: inner.y + offset as u16 * CELL_HEIGHT,
                width: inner.width,
                height: CELL_HEIGHT,
            };
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(row_area);

            for (column, cell_area) in cells.iter().enumerate() {
                let index = row * columns + column;
                let Some((_, record)) = rentals.get(index) else {
                    break;
                };

                let cell_border = if focused && index == selected {
                    Style::default()
                        .fg(catppuccin_color(self.theme.colors.mauve))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(catppuccin_color(self.theme.colors.surface1))
                };
                let label = Line::from(time_spans(
                    record.end_time.as_deref().unwrap_or_default(),
                    Style::default().fg(time_color),
                ));
                let cell = Paragraph::new(label).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(cell_border),
                );
                f.render_widget(cell, *cell_area);
            }
        }
    }

    fn draw_status(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::new();

        if let Some((notification, _)) = &self.toast {
            let color = if notification.is_destructive() {
                catppuccin_color(self.theme.colors.red)
            } else {
                catppuccin_color(self.theme.colors.green)
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", notification.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(notification.description.clone()),
            ]));
        }
        if let Some(ref msg) = self.status_message {
            lines.push(Line::from(msg.clone()));
        }

        let status = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(status, area);
    }

    fn draw_details_dialog(&self, f: &mut Frame, rental: &Rental) {
        let details = RecordDetails::new(rental, expiry::now());
        let label = Style::default().fg(catppuccin_color(self.theme.colors.subtext0));

        let mut lines = vec![
            Line::from(vec![Span::styled("ID:   ", label), Span::raw(details.id.clone())]),
            Line::from(vec![Span::styled("Slot: ", label), Span::raw(details.slot.clone())]),
            Line::from(""),
        ];

        if !details.times.is_empty() {
            let mut labels = Vec::new();
            let mut times = Vec::new();
            for column in &details.times {
                labels.push(Span::styled(format!("{:^12}", column.label), label));
                times.extend(self.time_column_spans(column));
            }
            lines.push(Line::from(labels).alignment(Alignment::Center));
            lines.push(Line::from(times).alignment(Alignment::Center));
            lines.push(Line::from(""));
        }

        if let Some(account) = &details.account {
            lines.push(
                Line::from(Span::styled(
                    format!("Account: {}", account),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );
        }
        if let Some(email) = &details.email {
            lines.push(Line::from(format!("Email: {}", email)).alignment(Alignment::Center));
        }
        if let Some(user_id) = details.user_id {
            lines.push(
                Line::from(Span::styled(format!("User ID: {}", user_id), label))
                    .alignment(Alignment::Center),
            );
        }

        let area = centered_rect(60, 50, f.area());
        let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Account Details")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(catppuccin_color(self.theme.colors.mauve))),
        );
        f.render_widget(ClearArea, area);
        f.render_widget(dialog, area);
    }

    /// A Start/Approved/End time padded to its column; End is red once passed
    fn time_column_spans(&self, column: &TimeColumn) -> Vec<Span<'static>> {
        let style = if column.ended {
            Style::default().fg(catppuccin_color(self.theme.colors.red))
        } else {
            Style::default()
        };
        let (clock, meridiem) = split_meridiem(&column.time);
        let width = clock.len() + meridiem.map(|m| m.len() + 1).unwrap_or(0);
        let padding = 12usize.saturating_sub(width);
        let left = padding / 2;

        let mut spans = vec![Span::raw(" ".repeat(left))];
        spans.extend(styled_time(clock, meridiem, style));
        spans.push(Span::raw(" ".repeat(padding - left)));
        spans
    }

    fn draw_confirmation_dialog(&self, f: &mut Frame) {
        let expired = self.session.buckets().expired.len();
        let text = vec![
            Line::from(""),
            Line::from("Are you sure you want to clear all expired orders?"),
            Line::from("This will also decrement usage counts on their accounts."),
            Line::from(""),
            Line::from(format!("{} expired orders will be cleared.", expired)),
            Line::from(""),
            Line::from(Span::styled(
                "y/Enter: confirm | n/Esc: cancel",
                Style::default().fg(catppuccin_color(self.theme.colors.yellow)),
            )),
        ];

        let area = centered_rect(60, 40, f.area());
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Clear Expired Orders")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(catppuccin_color(self.theme.colors.red))),
            );
        f.render_widget(ClearArea, area);
        f.render_widget(dialog, area);
    }

    fn draw_clearing_dialog(&self, f: &mut Frame) {
        let area = centered_rect(40, 20, f.area());
        let dialog = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Clearing expired orders...",
                Style::default()
                    .fg(catppuccin_color(self.theme.colors.yellow))
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(ClearArea, area);
        f.render_widget(dialog, area);
    }

    fn draw_help_screen(&self, f: &mut Frame) {
        let help_text = vec![
            Line::from(Span::styled(
                "slotwatch - Help",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Navigation:"),
            Line::from("  Tab         - Switch between ACTIVE and EXPIRED"),
            Line::from("  ←↓↑→, hjkl  - Move selection"),
            Line::from("  Enter       - Show account details"),
            Line::from(""),
            Line::from("Actions:"),
            Line::from("  c           - Clear expired orders (asks for confirmation)"),
            Line::from("  r           - Refresh now"),
            Line::from(""),
            Line::from("General:"),
            Line::from("  q, Esc      - Quit application"),
            Line::from("  ?, F1       - Show this help screen"),
            Line::from("  Ctrl+C x2   - Force quit"),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to return to main screen",
                Style::default().fg(Color::Yellow),
            )),
        ];

        let help = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::White));
        f.render_widget(help, f.area());
    }
}

/// `H:MM` in `style` followed by a dimmer AM/PM
fn time_spans(raw: &str, style: Style) -> Vec<Span<'static>> {
    let formatted = format_time_with_am_pm(raw);
    let (clock, meridiem) = split_meridiem(&formatted);
    styled_time(clock, meridiem, style)
}

fn styled_time(clock: &str, meridiem: Option<&str>, style: Style) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        clock.to_string(),
        style.add_modifier(Modifier::BOLD),
    )];
    if let Some(meridiem) = meridiem {
        spans.push(Span::styled(
            format!(" {}", meridiem),
            style.add_modifier(Modifier::DIM),
        ));
    }
    spans
}

/// Rect of `percent_x` by `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Refresher;
    use crate::store::memory::MemoryStore;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::sync::Arc;

    fn stamp(offset_minutes: i64) -> String {
        (expiry::now() + chrono::Duration::minutes(offset_minutes))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    async fn app(store: MemoryStore) -> App {
        let config = Config::default();
        let session = PanelSession::with_store(
            Arc::new(store),
            "rentals",
            Refresher::new(config.recent_window(), config.refresh_interval()),
        );
        let mut app = App::with_session(session, &config);
        app.refresh().await;
        app
    }

    fn seeded() -> MemoryStore {
        MemoryStore::new(json!({
            "acct": {"usage_count": 2},
            "transactions": {
                "live-1": {"end_time": stamp(30), "slot_id": "A"},
                "live-2": {"end_time": stamp(90), "slot_id": "B"},
                "gone-1": {"end_time": stamp(-30), "slot_id": "C", "assign_to": "acct"}
            }
        }))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_store_shows_placeholders() {
        let app = app(MemoryStore::new(json!({}))).await;

        let screen = screen(&app);
        assert!(screen.contains("No active accounts"));
        assert!(screen.contains("No expired accounts"));
        assert!(!screen.contains("c:clear expired"));
    }

    #[tokio::test]
    async fn test_grids_render_both_buckets() {
        let app = app(seeded()).await;

        let screen = screen(&app);
        assert!(screen.contains("ACTIVE (2)"));
        assert!(screen.contains("EXPIRED (1)"));
        assert!(screen.contains("c:clear expired"));
    }

    #[tokio::test]
    async fn test_oversized_grid_is_capped() {
        let mut config = Config::default();
        config.ui.grid_columns = 1_000_000;
        let session = PanelSession::with_store(
            Arc::new(seeded()),
            "rentals",
            Refresher::new(config.recent_window(), config.refresh_interval()),
        );
        let mut app = App::with_session(session, &config);
        app.refresh().await;

        assert_eq!(app.grid_columns, MAX_GRID_COLUMNS);
        assert!(screen(&app).contains("ACTIVE (2)"));
    }

    #[tokio::test]
    async fn test_enter_opens_details_of_selection() {
        let mut app = app(seeded()).await;

        app.handle_key(KeyCode::Right).await;
        app.handle_key(KeyCode::Enter).await;
        match &app.state {
            AppState::Details((id, _)) => assert_eq!(id, "live-2"),
            other => panic!("unexpected state {:?}", other),
        }
        assert!(screen(&app).contains("Account Details"));

        app.handle_key(KeyCode::Esc).await;
        assert_eq!(app.state, AppState::Main);
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let store = seeded();
        let mut app = app(store.clone()).await;

        app.handle_key(KeyCode::Char('c')).await;
        assert_eq!(app.state, AppState::ConfirmClear);
        app.handle_key(KeyCode::Char('n')).await;
        assert_eq!(app.state, AppState::Main);
        assert_eq!(app.session.buckets().expired.len(), 1);

        app.handle_key(KeyCode::Char('c')).await;
        app.handle_key(KeyCode::Char('y')).await;
        assert_eq!(app.state, AppState::Clearing);
        app.run_clear().await;

        assert_eq!(app.state, AppState::Main);
        assert!(app.session.buckets().expired.is_empty());
        let (notification, _) = app.toast.as_ref().unwrap();
        assert_eq!(notification.title, "Success");
        assert_eq!(store.get("/transactions/gone-1/hidden").await, json!(true));
        assert_eq!(store.get("/acct/usage_count").await, json!(1));
    }

    #[tokio::test]
    async fn test_clear_unavailable_without_expired() {
        let mut app = app(MemoryStore::new(json!({
            "transactions": {"live": {"end_time": stamp(10)}}
        })))
        .await;

        app.handle_key(KeyCode::Char('c')).await;
        assert_eq!(app.state, AppState::Main);
    }

    #[test]
    fn test_time_spans_split_meridiem() {
        let spans = time_spans("2024-01-01 15:45:00", Style::default());
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "3:45");
        assert_eq!(spans[1].content, " PM");
    }
}
