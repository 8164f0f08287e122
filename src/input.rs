//! Player actions and the debounced key buffer
//!
//! Hosts decode raw keys into [`Action`]s, push them through an
//! [`InputBuffer`] and hand whatever it releases to the next tick.

use serde::{Deserialize, Serialize};

use crate::sim::Axis;

/// Arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Left | Direction::Right => Axis::X,
        }
    }

    /// Screen-space sign along [`Direction::axis`] (+y points down)
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }
}

/// A decoded player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    Stop,
    ToggleShield,
    Fire,
    /// Only honored once the match is over
    Restart,
}

impl Action {
    /// Default keyboard layout
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "ArrowUp" | "up" => Action::Move(Direction::Up),
            "ArrowDown" | "down" => Action::Move(Direction::Down),
            "ArrowLeft" | "left" => Action::Move(Direction::Left),
            "ArrowRight" | "right" => Action::Move(Direction::Right),
            " " | "space" => Action::Stop,
            "q" | "Q" => Action::ToggleShield,
            "w" | "W" => Action::Fire,
            "Enter" => Action::Restart,
            _ => return None,
        })
    }
}

/// A raw key press after decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: Action,
    /// Auto-repeat from a held key
    pub repeat: bool,
    pub at_ms: u64,
}

impl KeyEvent {
    pub fn press(action: Action, at_ms: u64) -> Self {
        Self {
            action,
            repeat: false,
            at_ms,
        }
    }
}

/// Trailing-edge debounce over key presses.
///
/// Presses closer together than the window collapse into the latest one,
/// which is released once the window has passed without a newer press.
/// Auto-repeats never enter the buffer.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    window_ms: u64,
    pending: Option<KeyEvent>,
}

impl InputBuffer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    /// Queue a press, replacing any pending one. Returns false for ignored
    /// repeats.
    pub fn push(&mut self, event: KeyEvent) -> bool {
        if event.repeat {
            return false;
        }
        if let Some(replaced) = self.pending.replace(event) {
            log::trace!("Debounced {:?} in favor of {:?}", replaced.action, event.action);
        }
        true
    }

    /// Release the pending action once its window has elapsed
    pub fn poll(&mut self, now_ms: u64) -> Option<Action> {
        let ready = self
            .pending
            .is_some_and(|e| now_ms.saturating_sub(e.at_ms) >= self.window_ms);
        if ready {
            self.pending.take().map(|e| e.action)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
