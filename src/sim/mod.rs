//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, no wall-clock time
//! - Randomness only through the injected RNG
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Body, ShapeFamily, circles_overlap};
pub use input::{InputSampler, TickInput};
pub use spawn::{Spawner, is_spawn_frame, roll_enemy};
pub use state::{Bullet, Enemy, GameEvent, GameOverReason, GamePhase, GameState, Player};
pub use tick::{TickOutcome, tick};
