//! Game state and core simulation types
//!
//! `GameState` is the entity store for one session: the player, the live
//! bullets and enemies, score and the frame counter. The controller in
//! `crate::game` owns it together with the current `GamePhase`.

use std::fmt;

use glam::Vec2;

use super::collision::Body;
use crate::settings::GameConfig;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the first start trigger, nothing on the field
    #[default]
    Idle,
    /// Simulation active
    Running,
    /// Simulation frozen, waiting for a restart trigger
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// An enemy got past the bottom edge
    EnemyEscaped,
    /// An enemy touched the player
    PlayerCollision,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::EnemyEscaped => f.write_str("target escaped"),
            GameOverReason::PlayerCollision => f.write_str("collided with obstacle"),
        }
    }
}

/// Things that happened during a tick, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    EnemyDestroyed { points: u64 },
    EnemySpawned,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub body: Body,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub shoot_delay: u32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.width / 2.0, config.player_y()),
            body: config.shape_family.body(config.player_radius),
            shoot_cooldown: 0,
            shoot_delay: config.shoot_delay,
        }
    }

    /// Distance from center to the left/right edge
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.body.half_width()
    }

    /// Keep the whole body inside [0, width]
    pub fn clamp_x(&mut self, width: f32) {
        let half = self.half_extent();
        self.pos.x = self.pos.x.max(half).min(width - half);
    }

    /// Where a new bullet appears: centered, just above the forward edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.body.half_height())
    }
}

/// A player projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub body: Body,
    /// Upward speed, pixels per tick
    pub speed: f32,
    /// Cleared when the bullet is consumed; swept out by `GameState::compact`
    pub alive: bool,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2, body: Body, speed: f32) -> Self {
        Self {
            id,
            pos,
            body,
            speed,
            alive: true,
        }
    }
}

/// A descending target
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// x = horizontal drift, y = fall speed (pixels per tick)
    pub vel: Vec2,
    pub body: Body,
    /// Index into the renderer's enemy palette (cosmetic)
    pub palette_index: u8,
    pub alive: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, body: Body, palette_index: u8) -> Self {
        Self {
            id,
            pos,
            vel,
            body,
            palette_index,
            alive: true,
        }
    }
}

/// Complete per-session simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    /// Ticks since start
    pub frame: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Empty field with the player at its resting position
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            frame: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Back to a fresh session
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// True when no bullets or enemies are on the field
    pub fn is_clear(&self) -> bool {
        self.bullets.is_empty() && self.enemies.is_empty()
    }

    /// Drop every entity marked dead during the last scan
    pub fn compact(&mut self) {
        self.bullets.retain(|b| b.alive);
        self.enemies.retain(|e| e.alive);
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
