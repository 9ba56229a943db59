//! Keyboard input from the terminal.
//!
//! Terminals only report key presses (and OS key-repeat presses); most never
//! report releases. So instead of acting on each event, `KeyTracker` records
//! the frame a key was last seen and treats it as held while that is within
//! `HOLD_WINDOW` frames. Terminals with the keyboard-enhancement protocol
//! (kitty, Ghostty, ...) do send releases, which drop the key immediately.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;
use crate::platform::{Controls, InputSource};

/// Frames a press keeps a key "held" without a fresh repeat. At 60 FPS this
/// is ~133 ms, longer than the typical OS repeat interval.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key and the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// Ctrl-C is latched: once seen it stays set.
    interrupted: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame; call before feeding that frame's events.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        let frame = self.frame;
        self.key_frame
            .retain(|_, &mut last| frame.saturating_sub(last) <= HOLD_WINDOW);
    }

    pub fn handle(&mut self, key: KeyEvent) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.interrupted = true;
                    return;
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    fn held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.key_frame.contains_key(k))
    }

    pub fn controls(&self) -> Controls {
        Controls {
            up: self.held(&[KeyCode::Up, KeyCode::Char('w')]),
            down: self.held(&[KeyCode::Down, KeyCode::Char('s')]),
            left: self.held(&[KeyCode::Left, KeyCode::Char('a')]),
            right: self.held(&[KeyCode::Right, KeyCode::Char('d')]),
            fire: self.held(&[KeyCode::Char(' '), KeyCode::Char('j')]),
            restart: self.held(&[KeyCode::Char('r')]),
            quit: self.interrupted || self.held(&[KeyCode::Char('q'), KeyCode::Esc]),
        }
    }
}

/// Fold letter case so Caps Lock / Shift don't matter.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Non-blocking crossterm input: drains whatever events are queued and
/// returns immediately.
#[derive(Debug, Default)]
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Controls> {
        self.tracker.advance_frame();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.tracker.handle(key);
            }
        }
        Ok(self.tracker.controls())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn press_is_held_for_the_window() {
        let mut t = KeyTracker::new();
        t.advance_frame();
        t.handle(press(KeyCode::Left));
        assert!(t.controls().left);

        for _ in 0..HOLD_WINDOW {
            t.advance_frame();
        }
        assert!(t.controls().left);

        t.advance_frame();
        assert!(!t.controls().left);
    }

    #[test]
    fn release_drops_key_immediately() {
        let mut t = KeyTracker::new();
        t.advance_frame();
        t.handle(press(KeyCode::Char(' ')));
        assert!(t.controls().fire);
        t.handle(KeyEvent::new_with_kind(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(!t.controls().fire);
    }

    #[test]
    fn diagonal_and_fire_together() {
        let mut t = KeyTracker::new();
        t.advance_frame();
        t.handle(press(KeyCode::Char('W')));
        t.handle(press(KeyCode::Char('d')));
        t.handle(press(KeyCode::Char('j')));
        let c = t.controls();
        assert!(c.up && c.right && c.fire);
        assert!(!c.down && !c.left && !c.quit);
    }

    #[test]
    fn ctrl_c_latches_quit() {
        let mut t = KeyTracker::new();
        t.advance_frame();
        t.handle(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        for _ in 0..(HOLD_WINDOW * 3) {
            t.advance_frame();
        }
        assert!(t.controls().quit);
    }
}
