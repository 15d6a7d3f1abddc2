//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use towers_core::PegId;

/// Pixel-equivalent drag distance applied per arrow key press.
pub const LIGHT_DRAG_STEP: f64 = 8.0;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Queue and animate the full solution.
    Solve,
    /// Raise the animation rate.
    SpeedUp,
    /// Lower the animation rate.
    SlowDown,
    /// Suspend or resume ticking.
    TogglePause,
    /// Start or stop the light orbiting.
    ToggleLightMotion,
    /// Switch between directional and positional light.
    ToggleLightMode,
    /// Move the light as if dragged by `(dx, dy)`.
    DragLight(f64, f64),
    /// Pick a peg as move source or destination.
    SelectPeg(PegId),
    /// Put every disc back on peg 0.
    Reset,
    /// Show or hide the key reference.
    ToggleHelp,
    /// Leave the program.
    Quit,
}

/// Maps a key press to an action.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char('s') => Action::Solve,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::SpeedUp,
        KeyCode::Char('-') => Action::SlowDown,
        KeyCode::Char('p') | KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('l') => Action::ToggleLightMotion,
        KeyCode::Char('d') => Action::ToggleLightMode,
        KeyCode::Left => Action::DragLight(-LIGHT_DRAG_STEP, 0.0),
        KeyCode::Right => Action::DragLight(LIGHT_DRAG_STEP, 0.0),
        KeyCode::Up => Action::DragLight(0.0, -LIGHT_DRAG_STEP),
        KeyCode::Down => Action::DragLight(0.0, LIGHT_DRAG_STEP),
        KeyCode::Char('1') => Action::SelectPeg(PegId::Left),
        KeyCode::Char('2') => Action::SelectPeg(PegId::Center),
        KeyCode::Char('3') => Action::SelectPeg(PegId::Right),
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('h') | KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Lines of the help overlay.
pub const HELP: &[(&str, &str)] = &[
    ("s", "solve from the starting layout"),
    ("+ / -", "faster / slower"),
    ("p", "pause / resume"),
    ("1 2 3", "pick source, then destination peg"),
    ("arrows", "move the light"),
    ("l", "light auto-motion"),
    ("d", "directional / positional light"),
    ("r", "reset"),
    ("h", "toggle this help"),
    ("q / Esc", "quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_peg_keys() {
        assert_eq!(
            action_for(press(KeyCode::Char('2'))),
            Some(Action::SelectPeg(PegId::Center))
        );
        assert_eq!(action_for(press(KeyCode::Char('4'))), None);
    }

    #[test]
    fn test_arrow_up_raises_light() {
        // Dragging up is a negative dy, which raises the light.
        assert_eq!(
            action_for(press(KeyCode::Up)),
            Some(Action::DragLight(0.0, -LIGHT_DRAG_STEP))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }
}
