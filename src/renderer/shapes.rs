//! Stroke geometry for 2D outlines
//!
//! Everything is drawn as outlines: each line segment becomes a quad (two
//! triangles) of the requested width, in field coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Append a thick line segment from `a` to `b`
pub fn stroke_segment(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    // Two triangles
    out.push(Vertex::at(a1, color));
    out.push(Vertex::at(a2, color));
    out.push(Vertex::at(b1, color));

    out.push(Vertex::at(b1, color));
    out.push(Vertex::at(a2, color));
    out.push(Vertex::at(b2, color));
}

/// Append a stroked polyline; `closed` joins the last point back to the first
pub fn stroke_polyline(
    out: &mut Vec<Vertex>,
    points: &[Vec2],
    closed: bool,
    width: f32,
    color: [f32; 4],
) {
    for pair in points.windows(2) {
        stroke_segment(out, pair[0], pair[1], width, color);
    }
    if closed && points.len() > 2 {
        stroke_segment(out, points[points.len() - 1], points[0], width, color);
    }
}

/// Points on a circle, starting at angle 0
pub fn circle_points(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            center + Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect()
}

/// Append a circle outline
pub fn stroke_circle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    width: f32,
    color: [f32; 4],
    segments: u32,
) {
    let points = circle_points(center, radius, segments);
    stroke_polyline(out, &points, true, width, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_segment_is_two_triangles() {
        let mut out = Vec::new();
        stroke_segment(&mut out, Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, WHITE);
        assert_eq!(out.len(), 6);
        // Horizontal segment of width 2 spans y in [-1, 1]
        for v in &out {
            assert!((v.position[1].abs() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_segment_skipped() {
        let mut out = Vec::new();
        stroke_segment(&mut out, Vec2::ONE, Vec2::ONE, 2.0, WHITE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_closed_polyline_segment_count() {
        let square = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut open = Vec::new();
        stroke_polyline(&mut open, &square, false, 1.0, WHITE);
        let mut closed = Vec::new();
        stroke_polyline(&mut closed, &square, true, 1.0, WHITE);
        assert_eq!(open.len(), 3 * 6);
        assert_eq!(closed.len(), 4 * 6);
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Vec2::new(5.0, 5.0);
        for p in circle_points(center, 3.0, 16) {
            assert!((p.distance(center) - 3.0).abs() < 1e-5);
        }
    }
}
