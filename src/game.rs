//! Game state controller
//!
//! Owns the session and is the only writer of the `GamePhase`:
//!
//! ```text
//! Idle --start--> Running --game over--> Over --restart--> Running
//! ```
//!
//! Invalid transitions are no-ops, not errors.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioCues, SoundEffect};
use crate::settings::GameConfig;
use crate::sim::{GameEvent, GameOverReason, GamePhase, GameState, InputSampler, TickOutcome, tick};

/// One player session plus everything needed to drive it
pub struct Game<A> {
    config: GameConfig,
    phase: GamePhase,
    state: GameState,
    input: InputSampler,
    rng: Pcg32,
    audio: A,
    last_reason: Option<GameOverReason>,
}

impl<A: AudioCues> Game<A> {
    pub fn new(config: GameConfig, seed: u64, audio: A) -> Self {
        let config = config.validated();
        Self {
            state: GameState::new(&config),
            config,
            phase: GamePhase::Idle,
            input: InputSampler::new(),
            rng: Pcg32::seed_from_u64(seed),
            audio,
            last_reason: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Read-only view for renderers and HUDs
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Why the last run ended (None before the first game over)
    pub fn last_reason(&self) -> Option<GameOverReason> {
        self.last_reason
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Begin a fresh run on an empty field. No-op while already Running.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Running {
            log::debug!("start ignored: already running");
            return;
        }

        self.state.reset(&self.config);
        self.input.clear();
        self.last_reason = None;
        self.phase = GamePhase::Running;
        log::info!("Game started");
    }

    /// Start again after a game over. No-op unless Over.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::Over {
            log::debug!("restart ignored in {:?}", self.phase);
            return;
        }
        log::info!("Restarting");
        self.start();
    }

    /// Freeze the run. No-op unless Running.
    pub fn set_game_over(&mut self, reason: GameOverReason) {
        if self.phase != GamePhase::Running {
            log::debug!("game over ({}) ignored in {:?}", reason, self.phase);
            return;
        }
        self.phase = GamePhase::Over;
        self.last_reason = Some(reason);
        self.audio.play(SoundEffect::GameOver);
        log::info!("Game over: {}, score {}", reason, self.state.score);
    }

    /// Run one simulation tick if Running
    pub fn frame(&mut self) -> Option<TickOutcome> {
        if self.phase != GamePhase::Running {
            return None;
        }

        let input = self.input.take_snapshot();
        let outcome = tick(&mut self.state, &input, &self.config, &mut self.rng);

        for event in self.state.drain_events() {
            match event {
                GameEvent::ShotFired => self.audio.play(SoundEffect::Shoot),
                GameEvent::EnemyDestroyed { .. } => self.audio.play(SoundEffect::Hit),
                GameEvent::EnemySpawned => {}
            }
        }

        if let TickOutcome::GameOver(reason) = outcome {
            self.set_game_over(reason);
        }
        Some(outcome)
    }

    // === Host input ===

    pub fn key_down(&mut self, code: &str) {
        self.input.key_down(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    /// Pointer moved; `x` is relative to the playfield origin
    pub fn pointer_move(&mut self, x: f32) {
        self.input.pointer_move(x);
    }

    /// Pointer pressed: starts/restarts when not Running, otherwise asks for a shot
    pub fn pointer_down(&mut self, x: f32) {
        match self.phase {
            GamePhase::Idle => self.start(),
            GamePhase::Over => self.restart(),
            GamePhase::Running => {
                self.input.pointer_move(x);
                self.input.request_fire();
            }
        }
    }
}
