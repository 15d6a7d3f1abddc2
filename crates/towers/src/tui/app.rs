//! Application state and logic.

use derive_getters::Getters;
use towers_core::{FrameClock, PegId, PuzzleSession, TickReport};
use tracing::{debug, info, instrument};

use super::input::Action;

/// Main application state.
#[derive(Debug, Getters)]
pub struct App {
    session: PuzzleSession,
    clock: FrameClock,
    selected: Option<PegId>,
    show_help: bool,
    status_message: String,
}

impl App {
    /// Creates a new application around a fresh session.
    pub fn new(session: PuzzleSession) -> Self {
        Self {
            session,
            clock: FrameClock::new(),
            selected: None,
            show_help: false,
            status_message: "Press 's' to solve, 1-3 to move a disc, 'h' for help".to_string(),
        }
    }

    /// Mutable clock, polled by the event loop.
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Advances the session by one tick and updates the status line.
    pub fn tick(&mut self) -> TickReport {
        let report = self.session.tick();
        if let Some(started) = report.started {
            let (from, to) = started.mv.indices();
            self.status_message = format!("From peg {} to peg {}", from, to);
        }
        if report.landed.is_some() && self.is_solved() {
            self.status_message = "Solved! Press 'r' to reset".to_string();
        }
        report
    }

    /// Whether every disc rests on the last peg.
    pub fn is_solved(&self) -> bool {
        let board = self.session.board();
        board.peg(PegId::Right).discs().count() == board.disc_count()
    }

    /// Applies a user action. Returns `false` when the program should exit.
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                info!("Quit requested");
                return false;
            }
            Action::Solve => {
                self.selected = None;
                self.status_message = match self.session.request_solve() {
                    Ok(count) => format!("Solving: {} moves", count),
                    Err(e) => format!("{} (press 'r' to reset)", e),
                };
            }
            Action::SpeedUp => {
                let speed = self.session.increase_speed();
                self.status_message = format!("Speed {}%", speed.percent());
            }
            Action::SlowDown => {
                let speed = self.session.decrease_speed();
                self.status_message = format!("Speed {}%", speed.percent());
            }
            Action::TogglePause => {
                let paused = self.clock.toggle_pause();
                self.status_message = if paused { "Paused" } else { "Resumed" }.to_string();
            }
            Action::ToggleLightMotion => {
                let on = self.session.light_mut().toggle_auto_motion();
                self.status_message = format!("Light auto-motion {}", if on { "on" } else { "off" });
            }
            Action::ToggleLightMode => {
                let directional = self.session.light_mut().toggle_directional();
                self.status_message = if directional {
                    "Directional light"
                } else {
                    "Positional light"
                }
                .to_string();
            }
            Action::DragLight(dx, dy) => {
                let light = self.session.light_mut();
                light.set_dragging(true);
                light.drag(dx, dy);
                light.set_dragging(false);
            }
            Action::SelectPeg(peg) => self.select_peg(peg),
            Action::Reset => {
                self.session.reset();
                self.selected = None;
                self.status_message = "Reset".to_string();
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
        }
        true
    }

    /// First press picks the source peg, second press the destination.
    fn select_peg(&mut self, peg: PegId) {
        let Some(from) = self.selected.take() else {
            if self.session.board().is_legal_source(peg) {
                self.selected = Some(peg);
                self.status_message = format!("Move from peg {} to...", peg);
            } else {
                self.status_message = format!("Peg {} is empty", peg);
            }
            return;
        };

        if from == peg {
            self.status_message = "Selection cleared".to_string();
            return;
        }
        if !self.session.board().can_stack(from, peg) {
            self.status_message = format!("Cannot put a larger disc on peg {}", peg);
            return;
        }
        match self.session.request_move(from.index(), peg.index()) {
            Ok(disc) => {
                debug!(%disc, %from, to = %peg, "Manual move");
                self.status_message = format!("From peg {} to peg {}", from, peg);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(discs: usize) -> App {
        App::new(PuzzleSession::with_discs(discs).unwrap())
    }

    #[test]
    fn test_two_presses_move_a_disc() {
        let mut app = app(3);
        app.apply(Action::SelectPeg(PegId::Left));
        assert_eq!(app.selected(), &Some(PegId::Left));
        app.apply(Action::SelectPeg(PegId::Right));
        assert_eq!(app.selected(), &None);
        assert_eq!(app.session().board().peg(PegId::Right).discs().count(), 1);
    }

    #[test]
    fn test_empty_peg_cannot_be_source() {
        let mut app = app(3);
        app.apply(Action::SelectPeg(PegId::Center));
        assert_eq!(app.selected(), &None);
        assert!(app.status_message().contains("empty"));
    }

    #[test]
    fn test_size_rule_enforced() {
        let mut app = app(3);
        app.apply(Action::SelectPeg(PegId::Left));
        app.apply(Action::SelectPeg(PegId::Center));
        app.apply(Action::SelectPeg(PegId::Left));
        app.apply(Action::SelectPeg(PegId::Center));
        assert_eq!(app.session().board().peg(PegId::Center).discs().count(), 1);
        assert!(app.status_message().contains("larger"));
    }

    #[test]
    fn test_solve_runs_to_completion() {
        let mut app = app(2);
        app.apply(Action::Solve);
        while app.session().is_busy() {
            app.tick();
        }
        assert!(app.is_solved());
        assert!(app.status_message().starts_with("Solved"));
    }

    #[test]
    fn test_pause_and_quit() {
        let mut app = app(2);
        assert!(app.apply(Action::TogglePause));
        assert!(app.clock().is_paused());
        assert!(!app.apply(Action::Quit));
    }
}
