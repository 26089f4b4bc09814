//! HUD model
//!
//! What the overlay should show for a given phase. The browser host copies
//! this into DOM elements; tests check it directly.

use crate::sim::{GameOverReason, GamePhase};

/// Final-result panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverPanel {
    pub reason: String,
    pub final_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HudView {
    /// Top-left score, hidden while Idle
    pub score: Option<u64>,
    pub show_start_prompt: bool,
    pub game_over: Option<GameOverPanel>,
}

impl HudView {
    pub fn new(phase: GamePhase, score: u64, reason: Option<GameOverReason>) -> Self {
        match phase {
            GamePhase::Idle => Self {
                score: None,
                show_start_prompt: true,
                game_over: None,
            },
            GamePhase::Running => Self {
                score: Some(score),
                ..Default::default()
            },
            GamePhase::Over => Self {
                score: Some(score),
                show_start_prompt: false,
                game_over: Some(GameOverPanel {
                    reason: reason.map(|r| r.to_string()).unwrap_or_default(),
                    final_score: score,
                }),
            },
        }
    }

    pub fn score_text(&self) -> String {
        self.score.map(|s| format!("Score: {}", s)).unwrap_or_default()
    }
}
