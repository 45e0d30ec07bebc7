//! Asteroid spawning
//!
//! Asteroids enter from a random edge just outside the field. The velocity
//! component perpendicular to that edge always points inward; the parallel
//! component is random so trajectories cross the field at varied angles.

use glam::Vec2;
use rand::Rng;

use super::state::Obstacle;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::tuning::Tuning;

/// Field edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Top,
        SpawnEdge::Right,
        SpawnEdge::Bottom,
        SpawnEdge::Left,
    ];

    /// Pick an edge uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Spawn an asteroid on a random edge
pub fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Obstacle {
    let edge = SpawnEdge::random(rng);
    spawn_on_edge(rng, tuning, edge)
}

/// Spawn an asteroid entering through `edge`
pub fn spawn_on_edge<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, edge: SpawnEdge) -> Obstacle {
    let speed = rng.random_range(tuning.asteroid_min_speed..tuning.asteroid_max_speed);
    let margin = tuning.spawn_margin;

    // Parallel component is drift in [-speed, speed)
    let (pos, vel) = match edge {
        SpawnEdge::Top => {
            let dx = rng.random_range(-speed..speed);
            let x = rng.random_range(0.0..FIELD_WIDTH);
            (Vec2::new(x, -margin), Vec2::new(dx, speed))
        }
        SpawnEdge::Right => {
            let dy = rng.random_range(-speed..speed);
            let y = rng.random_range(0.0..FIELD_HEIGHT);
            (Vec2::new(FIELD_WIDTH + margin, y), Vec2::new(-speed, dy))
        }
        SpawnEdge::Bottom => {
            let dx = rng.random_range(-speed..speed);
            let x = rng.random_range(0.0..FIELD_WIDTH);
            (Vec2::new(x, FIELD_HEIGHT + margin), Vec2::new(dx, -speed))
        }
        SpawnEdge::Left => {
            let dy = rng.random_range(-speed..speed);
            let y = rng.random_range(0.0..FIELD_HEIGHT);
            (Vec2::new(-margin, y), Vec2::new(speed, dy))
        }
    };

    let radius = rng.random_range(tuning.asteroid_min_radius..tuning.asteroid_max_radius);

    Obstacle::new(pos, radius, vel)
}
