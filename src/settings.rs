//! Game configuration
//!
//! Playfield bounds and the gameplay policy knobs. Nothing here is persisted;
//! the browser host measures its canvas, the native runner may read a JSON file.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ShapeFamily;

/// Points awarded when a bullet destroys an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Enemy size rounded up (bigger targets are worth more)
    #[default]
    BySize,
    /// Same amount for every kill
    Fixed(u64),
}

impl ScorePolicy {
    /// Points for destroying an enemy with the given half extent
    pub fn points_for(&self, enemy_half_extent: f32) -> u64 {
        match *self {
            ScorePolicy::BySize => enemy_half_extent.max(0.0).ceil() as u64,
            ScorePolicy::Fixed(points) => points,
        }
    }
}

/// Sound levels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }
}

/// Everything a session needs to know before `start()`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub width: f32,
    /// Playfield height in pixels
    pub height: f32,
    pub shape_family: ShapeFamily,

    // === Player ===
    pub player_radius: f32,
    /// Keyboard movement, pixels per tick
    pub player_speed: f32,
    /// Ticks between shots
    pub shoot_delay: u32,
    /// Pointer position sets the player X directly once the pointer has moved
    pub pointer_authoritative: bool,

    // === Bullets ===
    pub bullet_radius: f32,
    /// Upward speed, pixels per tick
    pub bullet_speed: f32,

    // === Enemies ===
    /// Ticks between spawns
    pub spawn_period: u64,
    /// Ticks after start before the first enemy (0 = spawn on start)
    pub first_spawn_delay: u64,
    pub enemy_radius_min: f32,
    pub enemy_radius_max: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Horizontal drift drawn from [-span/2, span/2]
    pub enemy_drift_span: f32,

    // === Rules ===
    pub score_policy: ScorePolicy,
    /// Spawn a fresh enemy every time one is shot down
    pub respawn_on_kill: bool,

    pub audio: AudioSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            shape_family: ShapeFamily::Circle,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            shoot_delay: SHOOT_DELAY,
            pointer_authoritative: true,

            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,

            spawn_period: ENEMY_SPAWN_PERIOD,
            first_spawn_delay: FIRST_SPAWN_DELAY,
            enemy_radius_min: ENEMY_RADIUS_MIN,
            enemy_radius_max: ENEMY_RADIUS_MAX,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_drift_span: ENEMY_DRIFT_SPAN,

            score_policy: ScorePolicy::BySize,
            respawn_on_kill: false,

            audio: AudioSettings::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Same config with different playfield bounds
    pub fn with_playfield(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fix up values the simulation cannot work with
    pub fn validated(mut self) -> Self {
        if self.spawn_period == 0 {
            log::warn!("spawn_period 0 is invalid, using 1");
            self.spawn_period = 1;
        }
        if self.enemy_radius_min > self.enemy_radius_max {
            log::warn!("enemy radius range inverted, swapping");
            std::mem::swap(&mut self.enemy_radius_min, &mut self.enemy_radius_max);
        }
        if self.enemy_speed_min > self.enemy_speed_max {
            log::warn!("enemy speed range inverted, swapping");
            std::mem::swap(&mut self.enemy_speed_min, &mut self.enemy_speed_max);
        }
        if self.enemy_drift_span < 0.0 {
            log::warn!("negative enemy_drift_span, using its magnitude");
            self.enemy_drift_span = -self.enemy_drift_span;
        }
        let min_width = self.player_radius * 2.0;
        if !(self.width >= min_width) {
            log::warn!("playfield width {} narrower than the player, using {}", self.width, min_width);
            self.width = min_width;
        }
        let min_height = self.player_radius * 2.0;
        if !(self.height >= min_height) {
            log::warn!("playfield height {} shorter than the player, using {}", self.height, min_height);
            self.height = min_height;
        }
        self
    }

    /// Resting Y of the player's center
    pub fn player_y(&self) -> f32 {
        self.height - self.player_radius * 1.5
    }
}
