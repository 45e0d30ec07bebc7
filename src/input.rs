//! Keyboard input for the simulation.
//!
//! Key events arrive outside the tick boundary. Each event replaces the whole
//! `InputState` held in an `InputCell`; the simulation reads one snapshot at
//! the top of every tick, so a tick never sees a half-applied update.

use std::cell::Cell;

/// Physical keys the game listens to. Arrows and WASD are aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Map a lowercase key name (as reported by the browser) to a key.
    /// Unrecognized names return `None` and are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "arrowup" => Some(Key::ArrowUp),
            "arrowdown" => Some(Key::ArrowDown),
            "arrowleft" => Some(Key::ArrowLeft),
            "arrowright" => Some(Key::ArrowRight),
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Key::ArrowUp => 1 << 0,
            Key::ArrowDown => 1 << 1,
            Key::ArrowLeft => 1 << 2,
            Key::ArrowRight => 1 << 3,
            Key::W => 1 << 4,
            Key::A => 1 << 5,
            Key::S => 1 << 6,
            Key::D => 1 << 7,
        }
    }
}

/// Pressed/released state of every tracked key, packed into one byte.
///
/// Keys are tracked individually so that releasing `w` while `arrowup` is
/// still held keeps the craft moving up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    bits: u8,
}

impl InputState {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub const fn is_pressed(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    /// Copy of this state with one key updated
    #[must_use]
    pub const fn with_key(self, key: Key, pressed: bool) -> Self {
        let bits = if pressed {
            self.bits | key.bit()
        } else {
            self.bits & !key.bit()
        };
        Self { bits }
    }

    /// Collapse aliases into the four movement directions
    pub const fn directions(&self) -> TickInput {
        TickInput {
            up: self.is_pressed(Key::ArrowUp) || self.is_pressed(Key::W),
            down: self.is_pressed(Key::ArrowDown) || self.is_pressed(Key::S),
            left: self.is_pressed(Key::ArrowLeft) || self.is_pressed(Key::A),
            right: self.is_pressed(Key::ArrowRight) || self.is_pressed(Key::D),
        }
    }
}

/// Movement directions held during a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Single-writer, single-reader cell for the current input state.
///
/// Event handlers call `key_down`/`key_up`; the frame callback calls
/// `snapshot` once per tick.
#[derive(Debug, Default)]
pub struct InputCell {
    state: Cell<InputState>,
}

impl InputCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns false if the key is not one we track.
    pub fn key_down(&self, name: &str) -> bool {
        self.apply(name, true)
    }

    /// Record a key release. Returns false if the key is not one we track.
    pub fn key_up(&self, name: &str) -> bool {
        self.apply(name, false)
    }

    fn apply(&self, name: &str, pressed: bool) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.state.set(self.state.get().with_key(key, pressed));
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> InputState {
        self.state.get()
    }

    /// Release every key (the page lost focus and key-ups went missing)
    pub fn clear(&self) {
        self.state.set(InputState::new());
    }
}
