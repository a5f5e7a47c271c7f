use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use speedread_core::input::{InputEvent, InputProvider};
use thiserror::Error;

/// Reader action bound to a key press, if any.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(InputEvent::Exit),
            _ => None,
        };
    }

    let event = match key.code {
        KeyCode::Left => InputEvent::SkipBackward,
        KeyCode::Right => InputEvent::SkipForward,
        KeyCode::Up => InputEvent::SpeedUp,
        KeyCode::Down => InputEvent::SlowDown,
        KeyCode::Esc => InputEvent::ToggleControls,
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            ' ' | 'p' => InputEvent::TogglePlayPause,
            'h' => InputEvent::SkipBackward,
            'l' => InputEvent::SkipForward,
            'k' | '+' | '=' => InputEvent::SpeedUp,
            'j' | '-' => InputEvent::SlowDown,
            'b' => InputEvent::ToggleBrake,
            'r' => InputEvent::Restart,
            'c' => InputEvent::ShowControls,
            't' => InputEvent::ToggleControls,
            'q' => InputEvent::Exit,
            _ => return None,
        },
        _ => return None,
    };
    Some(event)
}

#[derive(Debug, Error)]
pub enum KeyboardError {
    #[error("keyboard read failed: {0}")]
    Io(#[from] io::Error),
}

/// Blocking [`InputProvider`] over the terminal's event stream. Meant to be
/// polled from its own thread while raw mode is on.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    pub const fn new() -> Self {
        Self
    }
}

impl InputProvider for KeyboardInput {
    type Error = KeyboardError;

    /// Blocks until the next terminal event; returns `Ok(None)` when it was
    /// not a mapped key (resize, focus, unbound keys).
    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn map_chars(keys: &str) -> Vec<Option<InputEvent>> {
        keys.chars().map(|ch| map_key(press(KeyCode::Char(ch)))).collect()
    }

    #[test]
    fn letter_keys_map_case_insensitively() {
        assert_eq!(
            map_chars(" pHLkjbrctQ"),
            vec![
                Some(InputEvent::TogglePlayPause),
                Some(InputEvent::TogglePlayPause),
                Some(InputEvent::SkipBackward),
                Some(InputEvent::SkipForward),
                Some(InputEvent::SpeedUp),
                Some(InputEvent::SlowDown),
                Some(InputEvent::ToggleBrake),
                Some(InputEvent::Restart),
                Some(InputEvent::ShowControls),
                Some(InputEvent::ToggleControls),
                Some(InputEvent::Exit),
            ]
        );
        assert_eq!(
            map_chars("+=-"),
            vec![
                Some(InputEvent::SpeedUp),
                Some(InputEvent::SpeedUp),
                Some(InputEvent::SlowDown),
            ]
        );
    }

    #[test]
    fn arrows_and_escape() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(InputEvent::SpeedUp));
        assert_eq!(map_key(press(KeyCode::Down)), Some(InputEvent::SlowDown));
        assert_eq!(map_key(press(KeyCode::Right)), Some(InputEvent::SkipForward));
        assert_eq!(map_key(press(KeyCode::Left)), Some(InputEvent::SkipBackward));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(InputEvent::ToggleControls));
    }

    #[test]
    fn ctrl_c_exits_and_other_chords_are_ignored() {
        let ctrl = |ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl('c')), Some(InputEvent::Exit));
        assert_eq!(map_key(ctrl('p')), None);
    }

    #[test]
    fn unbound_keys_and_releases_are_ignored() {
        assert_eq!(map_chars("xyz"), vec![None, None, None]);
        assert_eq!(map_key(press(KeyCode::Enter)), None);
        assert_eq!(map_key(press(KeyCode::PageUp)), None);

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
    }
}
