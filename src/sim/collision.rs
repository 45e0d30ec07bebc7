//! Collision detection between the craft and asteroids
//!
//! Both bodies are treated as circles. The craft's circle averages its
//! half-width and half-height; the asteroid's is shrunk by the forgiveness
//! factor so near misses that look like misses are misses.

use super::state::{Craft, Obstacle};
use crate::consts::HITBOX_FORGIVENESS;

/// Collision radius of the craft: mean of half-width and half-height
#[inline]
pub fn craft_radius(craft: &Craft) -> f32 {
    (craft.width + craft.height) / 4.0
}

/// Collision radius of an asteroid
#[inline]
pub fn obstacle_radius(obstacle: &Obstacle, forgiveness: f32) -> f32 {
    obstacle.radius * forgiveness
}

/// Check whether the craft overlaps an asteroid (strict inequality)
pub fn collides_with(craft: &Craft, obstacle: &Obstacle, forgiveness: f32) -> bool {
    let distance = craft.center().distance(obstacle.pos);
    distance < craft_radius(craft) + obstacle_radius(obstacle, forgiveness)
}

/// Check collision using the default forgiveness factor
#[inline]
pub fn collides(craft: &Craft, obstacle: &Obstacle) -> bool {
    collides_with(craft, obstacle, HITBOX_FORGIVENESS)
}

/// Index of the first asteroid (in list order) the craft overlaps
pub fn first_hit(craft: &Craft, obstacles: &[Obstacle], forgiveness: f32) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| collides_with(craft, o, forgiveness))
}
