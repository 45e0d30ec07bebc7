//! Astro Dodge - an asteroid-dodging survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (craft motion, asteroids, collisions)
//! - `session`: Session control (start, per-frame advance, game over)
//! - `input`: Keyboard mapping and the per-tick input snapshot
//! - `renderer`: Frame building and WebGPU drawing
//! - `platform`: Frame scheduling for browser and headless hosts
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{InputCell, InputState, Key, TickInput};
pub use session::Session;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical units, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Craft defaults
    pub const CRAFT_START_X: f32 = 400.0;
    pub const CRAFT_START_Y: f32 = 300.0;
    pub const CRAFT_WIDTH: f32 = 30.0;
    pub const CRAFT_HEIGHT: f32 = 30.0;
    /// Units moved per tick on each pressed axis
    pub const CRAFT_SPEED: f32 = 5.0;
    /// Fraction of the remaining turn applied each tick
    pub const ROTATION_SMOOTHING: f32 = 0.3;

    /// Asteroids enter this far outside the field
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Asteroids are culled once this far outside the field
    pub const CULL_MARGIN: f32 = 50.0;
    pub const ASTEROID_MIN_SPEED: f32 = 2.0;
    pub const ASTEROID_MAX_SPEED: f32 = 5.0;
    pub const ASTEROID_MIN_RADIUS: f32 = 10.0;
    pub const ASTEROID_MAX_RADIUS: f32 = 20.0;
    /// Shrinks the asteroid hitbox relative to its drawn radius
    pub const HITBOX_FORGIVENESS: f32 = 0.8;

    /// Per-tick chance of a single spawn
    pub const SPAWN_CHANCE: f64 = 0.08;
    /// Per-tick chance of a burst spawn
    pub const BURST_CHANCE: f64 = 0.02;
    pub const BURST_SIZE: u32 = 3;
}

/// Wrap an angle into (-π, π]. Non-finite input comes back as NaN.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Convert field coordinates (origin top-left, y down) to normalized device coordinates
#[inline]
pub fn field_to_ndc(pos: Vec2) -> Vec2 {
    use consts::{FIELD_HEIGHT, FIELD_WIDTH};
    Vec2::new(
        pos.x / FIELD_WIDTH * 2.0 - 1.0,
        1.0 - pos.y / FIELD_HEIGHT * 2.0,
    )
}
