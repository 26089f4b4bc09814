//! Scene building
//!
//! Turns a read-only view of the session into a triangle list. Nothing here
//! mutates game state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{STAR_COUNT, STAR_RADIUS_MAX};
use crate::sim::{Body, GamePhase, GameState};

const ENTITY_SEGMENTS: u32 = 24;
const STAR_SEGMENTS: u32 = 6;

/// A background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
}

/// Static decorative background, regenerated per run
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut field = Self::default();
        field.regenerate(width, height, seed);
        field
    }

    /// Scatter a fresh set of stars over the playfield
    pub fn regenerate(&mut self, width: f32, height: f32, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..width.max(1.0)),
                    rng.random_range(0.0..height.max(1.0)),
                ),
                radius: rng.random_range(0.0..STAR_RADIUS_MAX),
            })
            .collect();
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

/// Build the full frame. Stars are always drawn; entities only once a run
/// has started (Running or Over).
pub fn build_scene(state: &GameState, phase: GamePhase, stars: &Starfield) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for star in stars.stars() {
        vertices.extend(shapes::circle(star.pos, star.radius, colors::STAR, STAR_SEGMENTS));
    }

    if phase == GamePhase::Idle {
        return vertices;
    }

    // Player: dome for the circle family, plain box for the rect family
    let player = &state.player;
    match player.body {
        Body::Circle { radius } => vertices.extend(shapes::half_disc(
            player.pos,
            radius,
            colors::PLAYER,
            ENTITY_SEGMENTS,
        )),
        Body::Rect { .. } => vertices.extend(shapes::body(
            player.pos,
            &player.body,
            colors::PLAYER,
            ENTITY_SEGMENTS,
        )),
    }

    for bullet in &state.bullets {
        vertices.extend(shapes::body(bullet.pos, &bullet.body, colors::BULLET, 8));
    }

    for enemy in &state.enemies {
        let color = colors::enemy(enemy.palette_index);
        vertices.extend(shapes::body(enemy.pos, &enemy.body, color, ENTITY_SEGMENTS));
    }

    vertices
}
