//! Key mapping from terminal events to player intents.

use crate::types::{Direction, GameMode, InputIntent, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an intent for the given screen.
pub fn handle_key_event(screen: Screen, key: KeyEvent) -> Option<InputIntent> {
    match screen {
        Screen::Menu => menu_key(key.code),
        Screen::Playing => playing_key(key.code),
        Screen::Results => results_key(key.code),
    }
}

fn menu_key(code: KeyCode) -> Option<InputIntent> {
    match code {
        KeyCode::Char('1') | KeyCode::Char('c') | KeyCode::Char('C') => {
            Some(InputIntent::StartMode(GameMode::Classic))
        }
        KeyCode::Char('2') | KeyCode::Char('g') | KeyCode::Char('G') => {
            Some(InputIntent::StartMode(GameMode::GridHunt))
        }
        KeyCode::Char('+') | KeyCode::Char('=') => Some(InputIntent::DurationUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(InputIntent::DurationDown),
        _ => None,
    }
}

fn playing_key(code: KeyCode) -> Option<InputIntent> {
    match code {
        // Slots: 1-9, 0, -, = pick cells 1-12 (Classic only has 1-4)
        KeyCode::Char(c @ '1'..='9') => Some(InputIntent::Choose(c as usize - '1' as usize)),
        KeyCode::Char('0') => Some(InputIntent::Choose(9)),
        KeyCode::Char('-') => Some(InputIntent::Choose(10)),
        KeyCode::Char('=') => Some(InputIntent::Choose(11)),

        // Cursor
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(InputIntent::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(InputIntent::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(InputIntent::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(InputIntent::Move(Direction::Right))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputIntent::Confirm),

        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(InputIntent::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputIntent::Menu),
        _ => None,
    }
}

fn results_key(code: KeyCode) -> Option<InputIntent> {
    match code {
        KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputIntent::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('m') | KeyCode::Char('M') => {
            Some(InputIntent::Menu)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => Some(InputIntent::DurationUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(InputIntent::DurationDown),
        _ => None,
    }
}

/// Check if key should quit the app (any screen).
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(
            handle_key_event(Screen::Menu, key(KeyCode::Char('1'))),
            Some(InputIntent::StartMode(GameMode::Classic))
        );
        assert_eq!(
            handle_key_event(Screen::Menu, key(KeyCode::Char('g'))),
            Some(InputIntent::StartMode(GameMode::GridHunt))
        );
        assert_eq!(
            handle_key_event(Screen::Menu, key(KeyCode::Char('+'))),
            Some(InputIntent::DurationUp)
        );
        assert_eq!(
            handle_key_event(Screen::Menu, key(KeyCode::Char('-'))),
            Some(InputIntent::DurationDown)
        );
        assert_eq!(handle_key_event(Screen::Menu, key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_playing_slot_keys() {
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char('1'))),
            Some(InputIntent::Choose(0))
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char('9'))),
            Some(InputIntent::Choose(8))
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char('0'))),
            Some(InputIntent::Choose(9))
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char('-'))),
            Some(InputIntent::Choose(10))
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char('='))),
            Some(InputIntent::Choose(11))
        );
    }

    #[test]
    fn test_playing_cursor_and_control_keys() {
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Left)),
            Some(InputIntent::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char('J'))),
            Some(InputIntent::Move(Direction::Down))
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char(' '))),
            Some(InputIntent::Confirm)
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Esc)),
            Some(InputIntent::TogglePause)
        );
        assert_eq!(
            handle_key_event(Screen::Playing, key(KeyCode::Char('r'))),
            Some(InputIntent::Menu)
        );
        // Mode hotkeys mean nothing mid-session.
        assert_eq!(handle_key_event(Screen::Playing, key(KeyCode::Char('g'))), None);
    }

    #[test]
    fn test_results_keys() {
        assert_eq!(
            handle_key_event(Screen::Results, key(KeyCode::Enter)),
            Some(InputIntent::Confirm)
        );
        assert_eq!(
            handle_key_event(Screen::Results, key(KeyCode::Char('a'))),
            Some(InputIntent::Confirm)
        );
        assert_eq!(
            handle_key_event(Screen::Results, key(KeyCode::Char('m'))),
            Some(InputIntent::Menu)
        );
        assert_eq!(
            handle_key_event(Screen::Results, key(KeyCode::Char('-'))),
            Some(InputIntent::DurationDown)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('c'))));
        assert!(!should_quit(key(KeyCode::Char('x'))));
    }
}
