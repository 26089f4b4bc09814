//! Shape generation for 2D primitives
//!
//! Everything is emitted as a flat triangle list in playfield coordinates
//! (y grows downward).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Body;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    fan(center, radius, 0.0, 2.0 * PI, color, segments)
}

/// Upper half of a disc, flat side down
pub fn half_disc(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    // Screen y points down, so the upper half spans angles PI..2PI
    fan(center, radius, PI, 2.0 * PI, color, segments)
}

/// Axis-aligned rectangle around `center`
pub fn rect(center: Vec2, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let (l, r) = (center.x - hw, center.x + hw);
    let (t, b) = (center.y - hh, center.y + hh);

    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Filled outline of a collision body
pub fn body(center: Vec2, body: &Body, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    match *body {
        Body::Circle { radius } => circle(center, radius, color, segments),
        Body::Rect { width, height } => rect(center, width, height, color),
    }
}

/// Triangle fan from `center` over the angle range [from, to]
fn fan(center: Vec2, radius: f32, from: f32, to: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = to - from;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = from + (i as f32 / segments as f32) * span;
        let theta2 = from + ((i + 1) as f32 / segments as f32) * span;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
