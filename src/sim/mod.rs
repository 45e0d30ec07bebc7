//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Snapshots in, snapshots out (no shared mutable state)
//! - Injected RNG only
//! - Stable iteration order (asteroids stay in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collides, collides_with, craft_radius, first_hit, obstacle_radius};
pub use spawn::{SpawnEdge, spawn_obstacle, spawn_on_edge};
pub use state::{Craft, GamePhase, GameState, Obstacle, SessionOutcome};
pub use tick::{advance_obstacles, smooth_rotation, spawn_wave, step, target_rotation, update_craft};
