//! Per-frame simulation step
//!
//! `step` takes the previous snapshot and returns the next one. Ticks are not
//! scaled by frame time: speeds are in units per tick, so perceived speed
//! follows the host's refresh rate.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::collision::first_hit;
use super::spawn::spawn_obstacle;
use super::state::{Craft, GamePhase, GameState, Obstacle};
use crate::input::TickInput;
use crate::tuning::Tuning;
use crate::wrap_angle;

/// Heading for the held directions, or `current` when nothing is held.
///
/// Later rules override earlier ones: cardinals in the order left, right,
/// up, down, then diagonals in the order up-left, up-right, down-left,
/// down-right. Any diagonal therefore beats any cardinal.
pub fn target_rotation(input: TickInput, current: f32) -> f32 {
    let mut target = current;

    if input.left {
        target = -FRAC_PI_2;
    }
    if input.right {
        target = FRAC_PI_2;
    }
    if input.up {
        target = 0.0;
    }
    if input.down {
        target = PI;
    }

    if input.up && input.left {
        target = -FRAC_PI_4;
    }
    if input.up && input.right {
        target = FRAC_PI_4;
    }
    if input.down && input.left {
        target = -3.0 * FRAC_PI_4;
    }
    if input.down && input.right {
        target = 3.0 * FRAC_PI_4;
    }

    target
}

/// Turn `current` a fraction of the way toward `target` along the shorter arc
pub fn smooth_rotation(current: f32, target: f32, factor: f32) -> f32 {
    let diff = wrap_angle(target - current);
    wrap_angle(current + diff * factor)
}

/// Move and turn the craft for one tick, clamped to the field
pub fn update_craft(craft: &Craft, input: TickInput, tuning: &Tuning) -> Craft {
    let mut delta = Vec2::ZERO;
    // Each axis moves at full speed; diagonals are intentionally not normalized
    if input.left {
        delta.x -= craft.speed;
    }
    if input.right {
        delta.x += craft.speed;
    }
    if input.up {
        delta.y -= craft.speed;
    }
    if input.down {
        delta.y += craft.speed;
    }

    let target = target_rotation(input, craft.rotation);
    let rotation = smooth_rotation(craft.rotation, target, tuning.rotation_smoothing);

    let pos = (craft.pos + delta).clamp(
        Vec2::ZERO,
        Vec2::new(tuning.craft_max_x(), tuning.craft_max_y()),
    );

    Craft {
        pos,
        rotation,
        target_rotation: target,
        ..*craft
    }
}

/// Move every asteroid along its velocity and drop those that left play
pub fn advance_obstacles(obstacles: &[Obstacle], tuning: &Tuning) -> Vec<Obstacle> {
    obstacles
        .iter()
        .map(Obstacle::advanced)
        .filter(|o| o.in_play(tuning.cull_margin))
        .collect()
}

/// Roll the single-spawn and burst-spawn chances (independently)
pub fn spawn_wave<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, obstacles: &mut Vec<Obstacle>) {
    if rng.random_bool(tuning.spawn_chance) {
        obstacles.push(spawn_obstacle(rng, tuning));
    }

    if rng.random_bool(tuning.burst_chance) {
        log::debug!("Asteroid burst ({} rocks)", tuning.burst_size);
        for _ in 0..tuning.burst_size {
            obstacles.push(spawn_obstacle(rng, tuning));
        }
    }
}

/// Advance the game state by one tick
///
/// Returns `prev` unchanged unless the session is running. On the first
/// collision the returned snapshot is `GameOver` with its elapsed time frozen.
pub fn step<R: Rng + ?Sized>(
    prev: &GameState,
    input: TickInput,
    now_ms: f64,
    rng: &mut R,
    tuning: &Tuning,
) -> GameState {
    if prev.phase != GamePhase::Running {
        return prev.clone();
    }

    let craft = update_craft(&prev.craft, input, tuning);

    let mut obstacles = advance_obstacles(&prev.obstacles, tuning);
    spawn_wave(rng, tuning, &mut obstacles);

    // Wall-clock survival time; never runs backwards
    let elapsed_ms = (now_ms - prev.started_at_ms).max(prev.elapsed_ms);

    let phase = match first_hit(&craft, &obstacles, tuning.hitbox_forgiveness) {
        Some(index) => {
            log::debug!(
                "Craft hit by asteroid {} at {:?} after {} ticks",
                index,
                obstacles[index].pos,
                prev.ticks + 1
            );
            GamePhase::GameOver
        }
        None => GamePhase::Running,
    };

    GameState {
        phase,
        craft,
        obstacles,
        started_at_ms: prev.started_at_ms,
        elapsed_ms,
        ticks: prev.ticks + 1,
    }
}
