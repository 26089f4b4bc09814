//! Star Shooter - a small vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Per-tick simulation (motion, spawning, collisions)
//! - `game`: Idle/Running/Over state machine driving the simulation
//! - `settings`: Playfield bounds and gameplay policy
//! - `audio`: Procedural sound cues
//! - `renderer`: WebGPU rendering pipeline and HUD model

pub mod audio;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioCues, SilentAudio, SoundEffect};
pub use game::Game;
pub use settings::{AudioSettings, GameConfig, ScorePolicy};

/// Game tuning constants
pub mod consts {
    /// Simulation rate; one tick per animation frame on a 60 Hz display
    pub const TICKS_PER_SECOND: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default playfield, in canvas pixels
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player (drawn as a half disc sitting near the bottom edge)
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Ticks between shots
    pub const SHOOT_DELAY: u32 = 20;

    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 7.0;

    pub const ENEMY_RADIUS_MIN: f32 = 15.0;
    pub const ENEMY_RADIUS_MAX: f32 = 25.0;
    pub const ENEMY_SPEED_MIN: f32 = 0.5;
    pub const ENEMY_SPEED_MAX: f32 = 1.5;
    /// Horizontal drift is drawn from [-span/2, span/2]
    pub const ENEMY_DRIFT_SPAN: f32 = 1.0;
    /// Ticks between spawns (larger = slower)
    pub const ENEMY_SPAWN_PERIOD: u64 = 180;
    /// First enemy shows up half a second after start
    pub const FIRST_SPAWN_DELAY: u64 = 30;
    /// Number of entries in the enemy color palette
    pub const ENEMY_PALETTE_SIZE: u8 = 5;

    pub const STAR_COUNT: usize = 100;
    pub const STAR_RADIUS_MAX: f32 = 1.5;
}
