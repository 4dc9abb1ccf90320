use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Engine command a key press maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    TogglePause,
    Restart,
    Quit,
    None,
}

/// Keyboard bindings: arrows or WASD steer, space or P pauses, R restarts
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => Self::handle_char(c.to_ascii_lowercase()),
            _ => KeyAction::None,
        }
    }

    fn handle_char(c: char) -> KeyAction {
        match c {
            'w' => KeyAction::Steer(Direction::Up),
            's' => KeyAction::Steer(Direction::Down),
            'a' => KeyAction::Steer(Direction::Left),
            'd' => KeyAction::Steer(Direction::Right),
            ' ' | 'p' => KeyAction::TogglePause,
            'r' => KeyAction::Restart,
            'q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Down), KeyAction::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Left), KeyAction::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Char('D')), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('p')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('P')), KeyAction::TogglePause);
    }

    #[test]
    fn test_restart_and_quit_keys() {
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
