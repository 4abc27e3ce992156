//! Maps terminal key presses onto game commands.

use crate::input::KeyCommand;
use connect_four_rules::WIDTH;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the UI loop should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the program.
    Quit,
    /// Forward to the human player.
    Command(KeyCommand),
    /// Nothing bound to this key.
    Ignore,
}

/// Translates a crossterm key event.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Command(KeyCommand::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Command(KeyCommand::MoveRight),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
            KeyAction::Command(KeyCommand::Confirm)
        }
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(d) if (1..=WIDTH).contains(&(d as usize)) => {
                KeyAction::Command(KeyCommand::Select(d as usize))
            }
            _ => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}
