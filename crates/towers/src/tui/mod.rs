//! Terminal UI for the puzzle.

mod app;
mod input;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use towers_core::{PuzzleConfig, PuzzleSession};
use tracing::{error, info, instrument};

use app::App;

/// Longest the loop waits for input before re-checking the clock.
const MAX_INPUT_WAIT: Duration = Duration::from_millis(50);

/// Run the TUI until the user quits.
pub async fn run_tui(config: PuzzleConfig) -> Result<()> {
    info!("Starting towers TUI");
    let session = PuzzleSession::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, App::new(session)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

/// Ticks the session at the configured rate and redraws when anything moved.
#[instrument(skip_all)]
async fn run_loop<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    let mut dirty = true;

    loop {
        let speed = app.session().speed();
        if app.clock_mut().poll(Instant::now(), speed) {
            dirty |= app.tick().redraw;
        }

        if dirty {
            terminal.draw(|f| ui::draw(f, &app))?;
            dirty = false;
        }

        let wait = if app.clock().is_paused() {
            MAX_INPUT_WAIT
        } else {
            app.clock()
                .until_due(Instant::now(), speed)
                .min(MAX_INPUT_WAIT)
        };

        if event::poll(wait)? {
            match event::read()? {
                // Skip key release events (crossterm fires both press and release).
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(action) = input::action_for(key) {
                        if !app.apply(action) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        tokio::task::yield_now().await;
    }
}
