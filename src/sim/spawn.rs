//! Enemy spawn cadence and attribute rolls

use glam::Vec2;
use rand::Rng;

use super::state::Enemy;
use crate::consts::ENEMY_PALETTE_SIZE;
use crate::settings::GameConfig;

/// True on every `period`-th frame
#[inline]
pub fn is_spawn_frame(frame: u64, period: u64) -> bool {
    frame % period.max(1) == 0
}

/// Frame-counter driven spawn policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    period: u64,
    /// Frame of the one-off opening spawn
    first_spawn_at: u64,
}

impl Spawner {
    /// A `first_spawn_delay` of 0 spawns on the first tick of a run
    pub fn new(period: u64, first_spawn_delay: u64) -> Self {
        Self {
            period: period.max(1),
            first_spawn_at: first_spawn_delay.max(1),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.spawn_period, config.first_spawn_delay)
    }

    /// Decide whether `frame` (already incremented for this tick) spawns
    pub fn should_spawn(&self, frame: u64) -> bool {
        frame == self.first_spawn_at || is_spawn_frame(frame, self.period)
    }
}

/// Roll a fresh enemy just above the top edge, fully inside horizontally
pub fn roll_enemy<R: Rng>(id: u32, config: &GameConfig, rng: &mut R) -> Enemy {
    let radius = rng.random_range(config.enemy_radius_min..=config.enemy_radius_max);
    let body = config.shape_family.body(radius);
    let half_w = body.half_width();

    let x = if config.width > half_w * 2.0 {
        rng.random_range(half_w..=config.width - half_w)
    } else {
        config.width / 2.0
    };
    let y = -body.half_height();

    let fall = rng.random_range(config.enemy_speed_min..=config.enemy_speed_max);
    let half_span = config.enemy_drift_span / 2.0;
    let drift = rng.random_range(-half_span..=half_span);
    let palette_index = rng.random_range(0..ENEMY_PALETTE_SIZE);

    Enemy::new(id, Vec2::new(x, y), Vec2::new(drift, fall), body, palette_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence() {
        let spawner = Spawner::new(180, 30);
        let frames: Vec<u64> = (1..=400).filter(|&f| spawner.should_spawn(f)).collect();
        assert_eq!(frames, vec![30, 180, 360]);
    }

    #[test]
    fn test_zero_delay_spawns_on_first_tick() {
        let spawner = Spawner::new(5, 0);
        let frames: Vec<u64> = (1..=12).filter(|&f| spawner.should_spawn(f)).collect();
        assert_eq!(frames, vec![1, 5, 10]);
    }

    #[test]
    fn test_delay_matching_period_spawns_once() {
        let spawner = Spawner::new(5, 5);
        let frames: Vec<u64> = (1..=12).filter(|&f| spawner.should_spawn(f)).collect();
        assert_eq!(frames, vec![5, 10]);
    }

    #[test]
    fn test_zero_period_is_every_frame() {
        let spawner = Spawner::new(0, 0);
        assert!((1..10).all(|f| spawner.should_spawn(f)));
    }

    #[test]
    fn test_rolled_enemies_in_range() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..500 {
            let enemy = roll_enemy(id, &config, &mut rng);
            let r = enemy.body.half_width();
            assert!((config.enemy_radius_min..=config.enemy_radius_max).contains(&r));
            assert!(enemy.pos.x - r >= 0.0 && enemy.pos.x + r <= config.width);
            assert_eq!(enemy.pos.y, -r);
            assert!((config.enemy_speed_min..=config.enemy_speed_max).contains(&enemy.vel.y));
            assert!(enemy.vel.x.abs() <= config.enemy_drift_span / 2.0);
            assert!(enemy.palette_index < ENEMY_PALETTE_SIZE);
            assert!(enemy.alive);
        }
    }

    #[test]
    fn test_degenerate_ranges() {
        let config = GameConfig {
            enemy_radius_min: 10.0,
            enemy_radius_max: 10.0,
            enemy_drift_span: 0.0,
            width: 15.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let enemy = roll_enemy(1, &config, &mut rng);
        assert_eq!(enemy.body.half_width(), 10.0);
        assert_eq!(enemy.vel.x, 0.0);
        assert_eq!(enemy.pos.x, 7.5);
    }
}
