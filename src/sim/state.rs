//! Game state and core simulation types
//!
//! A `GameState` is an immutable snapshot: `tick::step` reads one and
//! produces the next, so nothing is mutated in place between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Craft was hit; the snapshot is frozen until the next start
    GameOver,
}

/// The player's craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Craft {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Units per tick on each pressed axis
    pub speed: f32,
    /// Current heading (radians, 0 = up, clockwise positive)
    pub rotation: f32,
    /// Heading the craft is turning toward
    pub target_rotation: f32,
}

impl Craft {
    /// Fixed starting pose for a new session
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(CRAFT_START_X, CRAFT_START_Y),
            width: tuning.craft_width,
            height: tuning.craft_height,
            speed: tuning.craft_speed,
            rotation: 0.0,
            target_rotation: 0.0,
        }
    }

    /// Center of the bounding box (also the rotation pivot)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }
}

impl Default for Craft {
    fn default() -> Self {
        Self::spawn(&Tuning::default())
    }
}

/// An asteroid drifting across the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Obstacle {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self { pos, radius, vel }
    }

    /// Position after one tick of straight-line motion
    #[must_use]
    pub fn advanced(&self) -> Self {
        Self {
            pos: self.pos + self.vel,
            ..*self
        }
    }

    /// True while the center is within `margin` of the visible field
    pub fn in_play(&self, margin: f32) -> bool {
        self.pos.x > -margin
            && self.pos.x < FIELD_WIDTH + margin
            && self.pos.y > -margin
            && self.pos.y < FIELD_HEIGHT + margin
    }
}

/// Final result of a session, produced once when the craft is hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Survival time in milliseconds
    pub elapsed_ms: f64,
}

impl SessionOutcome {
    pub fn seconds(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }
}

/// Complete game snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub craft: Craft,
    /// Active asteroids, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Wall-clock timestamp (ms) the session started at
    pub started_at_ms: f64,
    /// Survival time so far; frozen once the phase is `GameOver`
    pub elapsed_ms: f64,
    /// Ticks simulated this session
    pub ticks: u64,
}

impl GameState {
    /// Snapshot before any session has started
    pub fn idle(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            craft: Craft::spawn(tuning),
            obstacles: Vec::new(),
            started_at_ms: 0.0,
            elapsed_ms: 0.0,
            ticks: 0,
        }
    }

    /// Fresh running session starting at `now_ms`
    pub fn new_session(tuning: &Tuning, now_ms: f64) -> Self {
        Self {
            phase: GamePhase::Running,
            started_at_ms: now_ms,
            ..Self::idle(tuning)
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Outcome, once the session has ended
    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.phase {
            GamePhase::GameOver => Some(SessionOutcome {
                elapsed_ms: self.elapsed_ms,
            }),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::idle(&Tuning::default())
    }
}
