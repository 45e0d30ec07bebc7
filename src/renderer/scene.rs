//! Frame building
//!
//! Turns a `GameState` into stroke geometry plus the timer label. This is a
//! read-only view of the simulation: it never mutates the snapshot, and the
//! random detail strokes draw from their own RNG so painting cannot change
//! what the simulation does next.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::shapes::{stroke_circle, stroke_polyline, stroke_segment};
use super::vertex::{Vertex, colors};
use crate::sim::{Craft, GameState, Obstacle};

/// Outline width in field units
pub const LINE_WIDTH: f32 = 2.0;
/// Corners on an asteroid outline
pub const ASTEROID_POINTS: usize = 12;
/// How far the outline bulges in and out, relative to the radius
pub const ASTEROID_VARIANCE: f32 = 0.3;
/// Interior scratch lines per asteroid
pub const DETAIL_STROKES: usize = 2;
const COCKPIT_SEGMENTS: u32 = 16;

/// Everything needed to paint one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Triangle list in field coordinates
    pub vertices: Vec<Vertex>,
    /// Survival time, e.g. "12.3s", shown centered at the top
    pub timer_label: String,
}

/// Format elapsed milliseconds as seconds with one decimal
pub fn format_elapsed(elapsed_ms: f64) -> String {
    format!("{:.1}s", elapsed_ms / 1000.0)
}

/// Arrow-with-thrusters outline, rotated about the craft center
pub fn craft_outline(craft: &Craft) -> [Vec2; 6] {
    let (w, h) = (craft.width, craft.height);
    let rotation = Vec2::from_angle(craft.rotation);
    let center = craft.center();
    [
        Vec2::new(0.0, -h / 2.0),
        Vec2::new(-w / 2.0, h / 2.0),
        Vec2::new(-w / 4.0, h / 4.0),
        Vec2::new(0.0, h / 3.0),
        Vec2::new(w / 4.0, h / 4.0),
        Vec2::new(w / 2.0, h / 2.0),
    ]
    .map(|p| center + rotation.rotate(p))
}

/// Lumpy 12-point outline: radius modulated by sin(3θ)
pub fn asteroid_outline(obstacle: &Obstacle) -> [Vec2; ASTEROID_POINTS] {
    std::array::from_fn(|i| {
        let angle = (i as f32 / ASTEROID_POINTS as f32) * TAU;
        let radius = obstacle.radius * (1.0 + (angle * 3.0).sin() * ASTEROID_VARIANCE);
        obstacle.pos + Vec2::new(angle.cos(), angle.sin()) * radius
    })
}

/// Short interior strokes at random angles, from 30% to 100% of 0.8 × radius
pub fn detail_strokes<R: Rng + ?Sized>(
    obstacle: &Obstacle,
    rng: &mut R,
) -> [(Vec2, Vec2); DETAIL_STROKES] {
    let length = obstacle.radius * 0.8;
    std::array::from_fn(|_| {
        let angle = rng.random::<f32>() * TAU;
        let dir = Vec2::new(angle.cos(), angle.sin());
        (
            obstacle.pos + dir * length * 0.3,
            obstacle.pos + dir * length,
        )
    })
}

/// Append the craft (outline and cockpit ring)
pub fn draw_craft(out: &mut Vec<Vertex>, craft: &Craft) {
    stroke_polyline(out, &craft_outline(craft), true, LINE_WIDTH, colors::CRAFT);
    stroke_circle(
        out,
        craft.center(),
        craft.width / 6.0,
        LINE_WIDTH,
        colors::CRAFT,
        COCKPIT_SEGMENTS,
    );
}

/// Append one asteroid (outline and detail strokes)
pub fn draw_asteroid<R: Rng + ?Sized>(out: &mut Vec<Vertex>, obstacle: &Obstacle, rng: &mut R) {
    stroke_polyline(
        out,
        &asteroid_outline(obstacle),
        true,
        LINE_WIDTH,
        colors::ASTEROID,
    );
    for (a, b) in detail_strokes(obstacle, rng) {
        stroke_segment(out, a, b, LINE_WIDTH, colors::ASTEROID);
    }
}

/// Build the frame for a snapshot
pub fn build_frame<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Frame {
    let mut vertices = Vec::new();

    draw_craft(&mut vertices, &state.craft);
    for obstacle in &state.obstacles {
        draw_asteroid(&mut vertices, obstacle, rng);
    }

    Frame {
        vertices,
        timer_label: format_elapsed(state.elapsed_ms),
    }
}
