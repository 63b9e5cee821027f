//! Button identifiers and name resolution
//!
//! The config file names buttons the way a person would ("LEFT", "ENTER",
//! "F5"); the rest of the launcher works with host key codes.

use crossterm::event::{KeyCode, MouseButton};
use tracing::warn;

/// A trackable button on the host input system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Default binding for moving the selection left
pub const DEFAULT_SELECT_LEFT: Button = Button::Key(KeyCode::Left);

/// Default binding for moving the selection right
pub const DEFAULT_SELECT_RIGHT: Button = Button::Key(KeyCode::Right);

/// Default binding for launching the selection
pub const DEFAULT_CONFIRM: Button = Button::Key(KeyCode::Enter);

/// Resolve a configured button name, falling back to `default` when the name
/// is absent or not recognised.
pub fn resolve_button(name: Option<&str>, default: Button) -> Button {
    let Some(raw) = name else {
        return default;
    };

    match parse_button(raw) {
        Some(button) => button,
        None => {
            warn!(
                "Unrecognised button name {:?}, using {}",
                raw,
                button_name(default)
            );
            default
        }
    }
}

/// Parse a button name. Case-insensitive, surrounding whitespace ignored.
pub fn parse_button(name: &str) -> Option<Button> {
    let upper = name.trim().to_ascii_uppercase();

    let code = match upper.as_str() {
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "ENTER" | "RETURN" => KeyCode::Enter,
        "SPACE" => KeyCode::Char(' '),
        "TAB" => KeyCode::Tab,
        "BACKSPACE" => KeyCode::Backspace,
        "ESCAPE" | "ESC" => KeyCode::Esc,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "PGUP" | "PAGEUP" => KeyCode::PageUp,
        "PGDN" | "PAGEDOWN" => KeyCode::PageDown,
        "INSERT" => KeyCode::Insert,
        "DELETE" => KeyCode::Delete,
        "MOUSE LEFT" => return Some(Button::Mouse(MouseButton::Left)),
        "MOUSE RIGHT" => return Some(Button::Mouse(MouseButton::Right)),
        "MOUSE MIDDLE" => return Some(Button::Mouse(MouseButton::Middle)),
        other => {
            if let Some(n) = other.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(Button::Key(KeyCode::F(n)));
                }
                return None;
            }

            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => {
                    KeyCode::Char(c.to_ascii_lowercase())
                }
                _ => return None,
            }
        }
    };

    Some(Button::Key(code))
}

/// Human-readable name for a button, the inverse of [`parse_button`]
pub fn button_name(button: Button) -> String {
    match button {
        Button::Key(code) => match code {
            KeyCode::Left => "LEFT".into(),
            KeyCode::Right => "RIGHT".into(),
            KeyCode::Up => "UP".into(),
            KeyCode::Down => "DOWN".into(),
            KeyCode::Enter => "ENTER".into(),
            KeyCode::Char(' ') => "SPACE".into(),
            KeyCode::Tab => "TAB".into(),
            KeyCode::Backspace => "BACKSPACE".into(),
            KeyCode::Esc => "ESCAPE".into(),
            KeyCode::Home => "HOME".into(),
            KeyCode::End => "END".into(),
            KeyCode::PageUp => "PGUP".into(),
            KeyCode::PageDown => "PGDN".into(),
            KeyCode::Insert => "INSERT".into(),
            KeyCode::Delete => "DELETE".into(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            other => format!("{:?}", other),
        },
        Button::Mouse(MouseButton::Left) => "MOUSE LEFT".into(),
        Button::Mouse(MouseButton::Right) => "MOUSE RIGHT".into(),
        Button::Mouse(MouseButton::Middle) => "MOUSE MIDDLE".into(),
    }
}
