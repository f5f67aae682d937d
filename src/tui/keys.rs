//! Keyboard to pad-button translation
//!
//! Terminals that report key releases give us real held state, so holding
//! an arrow drives the accelerating repeat. Elsewhere every OS auto-repeat
//! arrives as a fresh press and nothing is considered held between frames.

use crate::input::{Buttons, InputFrame};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Button a key stands for, if any.
pub fn map_key(key: &KeyEvent) -> Option<Buttons> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Buttons::B),
            _ => None,
        };
    }

    let button = match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('y') => Buttons::A,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') | KeyCode::Char('n') => Buttons::B,
        KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('+') => Buttons::PLUS,
        KeyCode::Tab | KeyCode::Char('s') => Buttons::R,
        KeyCode::Up | KeyCode::Char('k') => Buttons::UP,
        KeyCode::Down | KeyCode::Char('j') => Buttons::DOWN,
        _ => return None,
    };
    Some(button)
}

/// Collects key events between frames into one [`InputFrame`].
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    release_events: bool,
    pressed: Buttons,
    held: Buttons,
}

impl KeyTracker {
    /// `release_events`: whether the terminal reports key releases.
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    pub fn handle(&mut self, key: KeyEvent) {
        let Some(button) = map_key(&key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => {
                self.pressed.insert(button);
                self.held.insert(button);
            }
            KeyEventKind::Repeat => {
                if self.release_events {
                    self.held.insert(button);
                } else {
                    self.pressed.insert(button);
                }
            }
            KeyEventKind::Release => self.held.remove(button),
        }
    }

    /// Input for the frame that is starting; clears the press edges.
    pub fn frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            pressed: self.pressed,
            held: self.held | self.pressed,
        };
        self.pressed = Buttons::NONE;
        if !self.release_events {
            self.held = Buttons::NONE;
        }
        frame
    }

    /// Forget everything held, e.g. after the terminal lost focus.
    pub fn clear(&mut self) {
        self.pressed = Buttons::NONE;
        self.held = Buttons::NONE;
    }
}
