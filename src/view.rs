//! View layer - renders dashboard state to the terminal
//!
//! Two renderers over the same state object: a live ratatui dashboard for
//! `watch` and a one-shot colored console printout for `status`.

use colored::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Terminal;

use crate::error::Result;
use crate::state::DashboardState;

/// Dashboard redraw cadence (values only change every poll cycle)
const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the live TUI dashboard until `q`, Esc or Ctrl-C
pub async fn run_dashboard(state: Arc<RwLock<DashboardState>>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = dashboard_loop(&mut terminal, state).await;

    // Restore terminal before surfacing any error
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

async fn dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: Arc<RwLock<DashboardState>>,
) -> Result<()> {
    loop {
        let snapshot = state.read().await.clone();
        terminal.draw(|f| draw_dashboard(f, &snapshot))?;

        // Redraw once per tick, or immediately on input
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        },
                        _ => {},
                    }
                }
            }
        }
    }
}

/// Draw the dashboard UI
fn draw_dashboard(f: &mut ratatui::Frame, state: &DashboardState) {
    // Layout: status bar + readings table + notification banner
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(f.area());

    // Status bar
    let status_text = format!(
        " Moisture: {}  Chickens: {}  Flu: {}  Errors: {}/{}  │  [q]uit",
        state.moisture_display(),
        state.total_detected_display(),
        state.flu_detected_display(),
        state.sensor_errors(),
        state.status_errors(),
    );

    let status_style = if state.banner().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text).style(status_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Coop Monitor "),
    );
    f.render_widget(status, chunks[0]);

    // Readings table, one row per display target
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(["Target", "Value", "Updated"])
        .style(header_style)
        .height(1);

    let rows = vec![
        Row::new([
            "moisture".to_string(),
            state.moisture_display(),
            update_time(state.last_sensor_update()),
        ]),
        Row::new([
            "total-detected".to_string(),
            state.total_detected_display(),
            update_time(state.last_status_update()),
        ]),
        Row::new([
            "flu-detected".to_string(),
            state.flu_detected_display(),
            update_time(state.last_status_update()),
        ]),
    ];

    let widths = [
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Readings "));
    f.render_widget(table, chunks[1]);

    // Notification banner, hidden while no flu is detected
    if let Some(warning) = state.banner() {
        let banner = Paragraph::new(warning)
            .style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title(" Warning "));
        f.render_widget(banner, chunks[2]);
    }
}

fn update_time(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match at {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// One-shot console printout of a state snapshot
pub fn print_status(state: &DashboardState) {
    println!("{}", "=== Coop Monitor Status ===".bright_cyan());
    println!();
    println!(
        "  {:<20} {}",
        "Moisture:",
        state.moisture_display().bright_yellow()
    );
    println!(
        "  {:<20} {}",
        "Chickens detected:",
        state.total_detected_display().bright_yellow()
    );
    println!(
        "  {:<20} {}",
        "Flu positive:",
        state.flu_detected_display().bright_yellow()
    );
    println!();

    match state.banner() {
        Some(warning) => println!("  {}", warning.red().bold()),
        None => println!("  {}", "No flu detected".green()),
    }
}
