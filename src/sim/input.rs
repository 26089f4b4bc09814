//! Input sampling
//!
//! Host event handlers only write into [`InputSampler`]; the simulation reads
//! an immutable [`TickInput`] snapshot taken at the tick boundary.

use std::collections::HashMap;

/// DOM `KeyboardEvent.code` identifiers the game reacts to
pub mod keys {
    pub const LEFT: [&str; 2] = ["ArrowLeft", "KeyA"];
    pub const RIGHT: [&str; 2] = ["ArrowRight", "KeyD"];
    pub const FIRE: &str = "Space";
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Fire key held down
    pub fire_held: bool,
    /// One-shot shot request from a pointer press
    pub fire_requested: bool,
    /// Last pointer X in playfield coordinates (None until the pointer moves)
    pub pointer_x: Option<f32>,
}

impl TickInput {
    /// Keyboard velocity sign: -1, 0 or 1 (right wins when both are held)
    pub fn horizontal_axis(&self) -> f32 {
        if self.move_right {
            1.0
        } else if self.move_left {
            -1.0
        } else {
            0.0
        }
    }

    pub fn wants_fire(&self) -> bool {
        self.fire_held || self.fire_requested
    }
}

/// Accumulates host input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    keys: HashMap<String, bool>,
    pointer_x: Option<f32>,
    fire_requested: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.keys.insert(code.to_owned(), true);
    }

    pub fn key_up(&mut self, code: &str) {
        self.keys.insert(code.to_owned(), false);
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.keys.get(code).copied().unwrap_or(false)
    }

    fn any_pressed(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.is_pressed(code))
    }

    /// Overwrite the pointer X; not clamped here
    pub fn pointer_move(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    /// Ask for one shot on the next tick
    pub fn request_fire(&mut self) {
        self.fire_requested = true;
    }

    pub fn fire_requested(&self) -> bool {
        self.fire_requested
    }

    /// Forget every key, the pointer and any pending shot
    pub fn clear(&mut self) {
        self.keys.clear();
        self.pointer_x = None;
        self.fire_requested = false;
    }

    /// Snapshot for the coming tick. The one-shot fire request is consumed
    /// here, so it is seen by exactly one tick whether or not it can fire.
    pub fn take_snapshot(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.any_pressed(&keys::LEFT),
            move_right: self.any_pressed(&keys::RIGHT),
            fire_held: self.is_pressed(keys::FIRE),
            fire_requested: self.fire_requested,
            pointer_x: self.pointer_x,
        };
        self.fire_requested = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_directions() {
        let mut sampler = InputSampler::new();
        sampler.key_down("KeyA");
        let input = sampler.take_snapshot();
        assert!(input.move_left && !input.move_right);
        assert_eq!(input.horizontal_axis(), -1.0);

        sampler.key_up("KeyA");
        sampler.key_down("ArrowRight");
        sampler.key_down("Space");
        let input = sampler.take_snapshot();
        assert!(!input.move_left && input.move_right && input.fire_held);
        assert_eq!(input.horizontal_axis(), 1.0);
    }

    #[test]
    fn test_fire_request_is_one_shot() {
        let mut sampler = InputSampler::new();
        sampler.request_fire();
        assert!(sampler.take_snapshot().fire_requested);
        assert!(!sampler.fire_requested());
        assert!(!sampler.take_snapshot().fire_requested);
    }

    #[test]
    fn test_pointer_is_not_clamped() {
        let mut sampler = InputSampler::new();
        assert_eq!(sampler.take_snapshot().pointer_x, None);
        sampler.pointer_move(-250.0);
        assert_eq!(sampler.take_snapshot().pointer_x, Some(-250.0));
        sampler.pointer_move(9000.0);
        assert_eq!(sampler.take_snapshot().pointer_x, Some(9000.0));
    }

    #[test]
    fn test_clear() {
        let mut sampler = InputSampler::new();
        sampler.key_down("ArrowLeft");
        sampler.pointer_move(12.0);
        sampler.request_fire();
        sampler.clear();
        assert_eq!(sampler.take_snapshot(), TickInput::default());
    }
}
