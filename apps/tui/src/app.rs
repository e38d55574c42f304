//! Core TUI application state and event loop.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use leadflow_board::{LeadStore, SensorConfig, registry};
use leadflow_core::{BoardEngine, StageListener, TransitionService};
use leadflow_data::{load_leads, sample_leads};
use leadflow_shared::{LeadId, StageId, load_config, sync_endpoint};
use leadflow_sync::StatusSync;

use crate::screens::{
    CoursesScreen, DocumentsScreen, LeadsScreen, PipelineScreen, ProfilesScreen, ScreenId,
};
use crate::widgets::status_bar;

/// Stage-change listener that appends readable lines to a shared log.
///
/// The transition service invokes it synchronously on every committed
/// change, so the entry is on screen by the next frame. The leads screen
/// renders the log as its activity feed.
struct ActivityLog(Arc<Mutex<Vec<String>>>);

impl StageListener for ActivityLog {
    fn on_stage_change(&self, lead: &LeadId, stage: StageId) {
        if let Ok(mut log) = self.0.lock() {
            log.push(format!("{lead} moved to {}", registry::column(stage).title));
        }
    }
}

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Available screens.
    pub screens: Vec<ScreenId>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Stage changes committed this session, oldest first.
    pub activity: Arc<Mutex<Vec<String>>>,
    pub pipeline: PipelineScreen,
    pub leads: LeadsScreen,
    pub documents: DocumentsScreen,
    pub courses: CoursesScreen,
    pub profiles: ProfilesScreen,
}

impl App {
    pub(crate) fn new() -> Result<Self> {
        let config = load_config()?;

        let leads = match &config.data.lead_file {
            Some(path) => load_leads(Path::new(path))?,
            None => sample_leads(),
        };
        let store = LeadStore::from_leads(leads);

        let sync = match sync_endpoint(&config)? {
            Some(url) => Some(StatusSync::new(url)?),
            None => None,
        };

        let activity = Arc::new(Mutex::new(Vec::new()));
        let service = TransitionService::new(sync)
            .with_listener(Box::new(ActivityLog(Arc::clone(&activity))));
        let engine = BoardEngine::new(store, service, SensorConfig::from(&config.board));

        Ok(Self {
            active_tab: 0,
            screens: vec![
                ScreenId::Pipeline,
                ScreenId::Leads,
                ScreenId::Documents,
                ScreenId::Courses,
                ScreenId::Profiles,
            ],
            should_quit: false,
            status: "Ready — press ? for help".to_string(),
            show_help: false,
            activity,
            pipeline: PipelineScreen::new(engine),
            leads: LeadsScreen::new(),
            documents: DocumentsScreen::new(),
            courses: CoursesScreen::new(),
            profiles: ProfilesScreen::new(),
        })
    }
}

/// Entry point: sets up the terminal, runs the event loop, restores the
/// terminal. Mouse capture stays on for the lifetime of the app; the board
/// screen is the only consumer.
pub(crate) fn run() -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut app = App::new()?;

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        // Poll with a 100ms timeout; the timeout doubles as the clock tick
        // that lets a touch hold mature with no event arriving.
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key.code, key.modifiers),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }
        app.pipeline.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.screens.len() {
                app.active_tab = idx;
                app.status = format!("{}", app.screens[idx]);
            }
            return;
        }
        KeyCode::Tab => {
            app.active_tab = (app.active_tab + 1) % app.screens.len();
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        KeyCode::BackTab => {
            app.active_tab = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen
    match app.screens[app.active_tab] {
        ScreenId::Pipeline => {
            if let Some(status) = app.pipeline.handle_key(code, modifiers) {
                app.status = status;
            }
        }
        ScreenId::Leads => {
            let count = app.pipeline.store().len();
            app.leads.handle_key(code, modifiers, count);
        }
        ScreenId::Documents => app.documents.handle_key(code, modifiers),
        ScreenId::Courses => app.courses.handle_key(code, modifiers),
        ScreenId::Profiles => app.profiles.handle_key(code, modifiers),
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // The board is the only mouse-interactive screen.
    if app.screens[app.active_tab] != ScreenId::Pipeline {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.pipeline.on_mouse_down(mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.pipeline.on_mouse_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(status) = app.pipeline.on_mouse_up(mouse.column, mouse.row) {
                app.status = status;
            }
        }
        _ => {}
    }
}

fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app
        .screens
        .iter()
        .map(|s| Line::from(format!("{s}")))
        .collect();

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Leadflow "),
        )
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area — delegate to screen
    match app.screens[app.active_tab] {
        ScreenId::Pipeline => app.pipeline.draw(f, chunks[1]),
        ScreenId::Leads => {
            let store = app.pipeline.store().clone();
            let activity = app
                .activity
                .lock()
                .map(|log| log.clone())
                .unwrap_or_default();
            app.leads.draw(f, chunks[1], &store, &activity);
        }
        ScreenId::Documents => app.documents.draw(f, chunks[1]),
        ScreenId::Courses => app.courses.draw(f, chunks[1]),
        ScreenId::Profiles => app.profiles.draw(f, chunks[1]),
    }

    // Status bar
    let bar = status_bar(&app.status, app.pipeline.dragging());
    f.render_widget(bar, chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-5          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Pipeline board:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  mouse drag   Pick up a card and drop it on a column"),
        Line::from("  ←/→  ↑/↓     Focus column / select card"),
        Line::from("  [ / ]        Move selected lead back / forward"),
        Line::from("  Esc          Cancel an active drag"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help — press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
