//! Per-frame simulation tick
//!
//! Advances player, bullets and enemies by one step and resolves collisions.
//! The caller (the game controller) only runs this while the game is Running
//! and acts on the returned [`TickOutcome`].

use rand::Rng;

use super::input::TickInput;
use super::spawn::{Spawner, roll_enemy};
use super::state::{Bullet, GameEvent, GameOverReason, GameState};
use crate::settings::GameConfig;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver(GameOverReason),
}

/// Advance the game state by one tick
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    config: &GameConfig,
    rng: &mut R,
) -> TickOutcome {
    // 1. Player motion
    move_player(state, input, config);

    // 2. Shooting
    update_shooting(state, input, config);

    // 3. Bullets fly up; anything fully past the top is gone
    advance_bullets(state);

    // 4. Frame counter and spawn
    state.frame += 1;
    if Spawner::from_config(config).should_spawn(state.frame) {
        spawn_enemy(state, config, rng);
    }

    // 5. Enemies fall and bounce off the side walls
    if let Some(reason) = advance_enemies(state, config) {
        return TickOutcome::GameOver(reason);
    }

    // 6. Bullet vs enemy
    resolve_bullet_hits(state, config, rng);

    // 7. Enemy vs player
    let player = &state.player;
    if state
        .enemies
        .iter()
        .any(|e| player.body.overlaps(player.pos, &e.body, e.pos))
    {
        return TickOutcome::GameOver(GameOverReason::PlayerCollision);
    }

    TickOutcome::Continue
}

fn move_player(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    let player = &mut state.player;
    match input.pointer_x {
        // Pointer maps to the player's center
        Some(x) if config.pointer_authoritative => player.pos.x = x,
        _ => player.pos.x += input.horizontal_axis() * config.player_speed,
    }
    player.clamp_x(config.width);
}

fn update_shooting(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    if state.player.shoot_cooldown > 0 {
        state.player.shoot_cooldown -= 1;
    }
    if input.wants_fire() && state.player.shoot_cooldown == 0 {
        let id = state.next_entity_id();
        let body = config.shape_family.body(config.bullet_radius);
        let muzzle = state.player.muzzle();
        state
            .bullets
            .push(Bullet::new(id, muzzle, body, config.bullet_speed));
        state.player.shoot_cooldown = state.player.shoot_delay;
        state.events.push(GameEvent::ShotFired);
    }
}

fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
        if bullet.pos.y + bullet.body.half_height() < 0.0 {
            bullet.alive = false;
        }
    }
    state.compact();
}

fn spawn_enemy<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) {
    let id = state.next_entity_id();
    state.enemies.push(roll_enemy(id, config, rng));
    state.events.push(GameEvent::EnemySpawned);
}

/// Move every enemy; returns the game-over reason if one fell off the bottom
fn advance_enemies(state: &mut GameState, config: &GameConfig) -> Option<GameOverReason> {
    let mut escaped = false;
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel;

        // One reflection per wall contact: only flip while heading into it
        let half_w = enemy.body.half_width();
        let at_left = enemy.pos.x - half_w <= 0.0 && enemy.vel.x < 0.0;
        let at_right = enemy.pos.x + half_w >= config.width && enemy.vel.x > 0.0;
        if at_left || at_right {
            enemy.vel.x = -enemy.vel.x;
        }

        if enemy.pos.y - enemy.body.half_height() > config.height {
            enemy.alive = false;
            escaped = true;
            break;
        }
    }

    if escaped {
        state.compact();
        return Some(GameOverReason::EnemyEscaped);
    }
    None
}

fn resolve_bullet_hits<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) {
    let mut kills = 0usize;

    for bullet in state.bullets.iter_mut() {
        // A bullet takes out at most one enemy
        let hit = state.enemies.iter_mut().find(|e| {
            e.alive && bullet.body.overlaps(bullet.pos, &e.body, e.pos)
        });
        if let Some(enemy) = hit {
            let points = config.score_policy.points_for(enemy.body.half_width());
            state.score += points;
            bullet.alive = false;
            enemy.alive = false;
            state.events.push(GameEvent::EnemyDestroyed { points });
            kills += 1;
        }
    }

    state.compact();

    if config.respawn_on_kill {
        for _ in 0..kills {
            spawn_enemy(state, config, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ShapeFamily;
    use crate::sim::state::Enemy;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Config with spawning pushed out of the way
    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_period: 1_000_000,
            first_spawn_delay: 1_000_000,
            ..Default::default()
        }
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    fn enemy(state: &mut GameState, config: &GameConfig, pos: Vec2, vel: Vec2, r: f32) -> u32 {
        let id = state.next_entity_id();
        let body = config.shape_family.body(r);
        state.enemies.push(Enemy::new(id, pos, vel, body, 0));
        id
    }

    fn bullet(state: &mut GameState, config: &GameConfig, pos: Vec2, speed: f32) -> u32 {
        let id = state.next_entity_id();
        let body = config.shape_family.body(config.bullet_radius);
        state.bullets.push(Bullet::new(id, pos, body, speed));
        id
    }

    #[test]
    fn test_keyboard_moves_player() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        let start_x = state.player.pos.x;
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, &config, &mut rng());
        assert_eq!(state.player.pos.x, start_x - config.player_speed);
    }

    #[test]
    fn test_pointer_overrides_keys() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        let input = TickInput {
            move_left: true,
            pointer_x: Some(123.0),
            ..Default::default()
        };
        tick(&mut state, &input, &config, &mut rng());
        assert_eq!(state.player.pos.x, 123.0);

        let keyboard_only = GameConfig {
            pointer_authoritative: false,
            ..quiet_config()
        };
        tick(&mut state, &input, &keyboard_only, &mut rng());
        assert_eq!(state.player.pos.x, 123.0 - keyboard_only.player_speed);
    }

    #[test]
    fn test_fire_spawns_bullet_at_muzzle() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        let input = TickInput {
            fire_requested: true,
            ..Default::default()
        };
        tick(&mut state, &input, &config, &mut rng());

        assert_eq!(state.bullets.len(), 1);
        let b = &state.bullets[0];
        let muzzle = state.player.muzzle();
        // Spawned at the muzzle, then advanced once in the same tick
        assert_eq!(b.pos, muzzle - Vec2::new(0.0, config.bullet_speed));
        assert_eq!(state.player.shoot_cooldown, config.shoot_delay);
        assert_eq!(state.drain_events().collect::<Vec<_>>(), vec![GameEvent::ShotFired]);
    }

    #[test]
    fn test_held_fire_is_rate_limited() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        let input = TickInput {
            fire_held: true,
            ..Default::default()
        };
        let mut rng = rng();
        // Tick 1 fires, then a full shoot_delay of ticks passes before the next
        for _ in 0..config.shoot_delay {
            tick(&mut state, &input, &config, &mut rng);
        }
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &input, &config, &mut rng);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_leaves_through_top() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        bullet(&mut state, &config, Vec2::new(100.0, 5.0), 7.0);
        // Enemy sitting where the bullet would be if it were still tracked
        enemy(&mut state, &config, Vec2::new(100.0, -30.0), Vec2::ZERO, 20.0);

        tick(&mut state, &TickInput::default(), &config, &mut rng());
        // y = -2, still touching the field (radius 4)
        assert_eq!(state.bullets.len(), 1);

        tick(&mut state, &TickInput::default(), &config, &mut rng());
        // y = -9: fully past the top, removed before collisions run
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_spawn_on_period() {
        let config = GameConfig {
            spawn_period: 3,
            first_spawn_delay: 3,
            ..Default::default()
        };
        let mut state = GameState::new(&config);
        let mut rng = rng();
        tick(&mut state, &TickInput::default(), &config, &mut rng);
        tick(&mut state, &TickInput::default(), &config, &mut rng);
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default(), &config, &mut rng);
        assert_eq!(state.frame, 3);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_zero_delay_spawns_on_first_tick() {
        let config = GameConfig {
            first_spawn_delay: 0,
            ..Default::default()
        };
        let mut state = GameState::new(&config);
        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(state.frame, 1);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.drain_events().any(|e| e == GameEvent::EnemySpawned));
    }

    #[test]
    fn test_enemy_bounces_off_walls() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        enemy(&mut state, &config, Vec2::new(20.5, 100.0), Vec2::new(-1.0, 0.5), 20.0);
        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(state.enemies[0].vel.x, 1.0);
        // Still touching the wall next tick, but moving away: no second flip
        state.enemies[0].pos.x = 19.0;
        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(state.enemies[0].vel.x, 1.0);

        let right = config.width - 20.5;
        enemy(&mut state, &config, Vec2::new(right, 100.0), Vec2::new(1.0, 0.5), 20.0);
        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(state.enemies[1].vel.x, -1.0);
    }

    #[test]
    fn test_escaped_enemy_ends_game_and_skips_collisions() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        let y = config.height + 19.5;
        enemy(&mut state, &config, Vec2::new(100.0, y), Vec2::new(0.0, 1.0), 20.0);
        // A bullet overlapping a second enemy: not resolved this tick
        let target = Vec2::new(300.0, 300.0);
        enemy(&mut state, &config, target, Vec2::ZERO, 20.0);
        bullet(&mut state, &config, target + Vec2::new(0.0, 7.0), 7.0);

        let outcome = tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(outcome, TickOutcome::GameOver(GameOverReason::EnemyEscaped));
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_bullet_kills_enemy_and_scores_by_size() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        enemy(&mut state, &config, Vec2::new(200.0, 200.0), Vec2::ZERO, 17.3);
        bullet(&mut state, &config, Vec2::new(200.0, 207.0), 7.0);

        let outcome = tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(outcome, TickOutcome::Continue);
        assert!(state.is_clear());
        assert_eq!(state.score, 18);
        assert!(state
            .drain_events()
            .any(|e| e == GameEvent::EnemyDestroyed { points: 18 }));
    }

    #[test]
    fn test_bullet_kills_at_most_one_enemy() {
        let config = GameConfig {
            score_policy: crate::ScorePolicy::Fixed(10),
            ..quiet_config()
        };
        let mut state = GameState::new(&config);
        enemy(&mut state, &config, Vec2::new(200.0, 200.0), Vec2::ZERO, 20.0);
        enemy(&mut state, &config, Vec2::new(205.0, 200.0), Vec2::ZERO, 20.0);
        bullet(&mut state, &config, Vec2::new(202.0, 207.0), 7.0);

        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(state.enemies.len(), 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_two_bullets_one_enemy() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        enemy(&mut state, &config, Vec2::new(200.0, 200.0), Vec2::ZERO, 20.0);
        bullet(&mut state, &config, Vec2::new(200.0, 207.0), 7.0);
        bullet(&mut state, &config, Vec2::new(201.0, 207.0), 7.0);

        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert!(state.enemies.is_empty());
        // The second bullet found nothing left to hit
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_respawn_on_kill() {
        let config = GameConfig {
            respawn_on_kill: true,
            ..quiet_config()
        };
        let mut state = GameState::new(&config);
        let old = enemy(&mut state, &config, Vec2::new(200.0, 200.0), Vec2::ZERO, 20.0);
        bullet(&mut state, &config, Vec2::new(200.0, 207.0), 7.0);

        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(state.enemies.len(), 1);
        assert_ne!(state.enemies[0].id, old);
        assert!(state.enemies[0].pos.y < 0.0);
    }

    #[test]
    fn test_enemy_reaches_player_within_three_ticks() {
        let config = quiet_config();
        let mut state = GameState::new(&config);
        let player = state.player.pos;
        // Radii 20 + 20: contact at distance 40, reached exactly on tick 3
        let start = Vec2::new(player.x, player.y - 40.0 - 15.0);
        enemy(&mut state, &config, start, Vec2::new(0.0, 5.0), 20.0);

        let mut rng = rng();
        let mut outcome = TickOutcome::Continue;
        for _ in 0..3 {
            outcome = tick(&mut state, &TickInput::default(), &config, &mut rng);
            if outcome != TickOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::GameOver(GameOverReason::PlayerCollision));
        assert_eq!(state.frame, 3);
    }

    #[test]
    fn test_rect_family_shared_edge_is_not_a_hit() {
        let config = GameConfig {
            shape_family: ShapeFamily::Rect,
            ..quiet_config()
        };
        let mut state = GameState::new(&config);
        // Enemy spans x 216..256; bullet (width 8) ends at 216 after moving
        enemy(&mut state, &config, Vec2::new(236.0, 200.0), Vec2::ZERO, 20.0);
        bullet(&mut state, &config, Vec2::new(212.0, 207.0), 7.0);

        tick(&mut state, &TickInput::default(), &config, &mut rng());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside(pointer in proptest::num::f32::ANY, keys in 0u8..4) {
            let config = quiet_config();
            let mut state = GameState::new(&config);
            let input = TickInput {
                move_left: keys & 1 != 0,
                move_right: keys & 2 != 0,
                pointer_x: if pointer.is_nan() { None } else { Some(pointer) },
                ..Default::default()
            };
            let mut rng = rng();
            for _ in 0..5 {
                tick(&mut state, &input, &config, &mut rng);
                let half = state.player.half_extent();
                prop_assert!(state.player.pos.x >= half);
                prop_assert!(state.player.pos.x <= config.width - half);
            }
        }

        #[test]
        fn prop_fire_requests_inside_delay_make_one_bullet(gap in 1u32..crate::consts::SHOOT_DELAY) {
            let config = quiet_config();
            let mut state = GameState::new(&config);
            let mut rng = rng();
            let fire = TickInput { fire_requested: true, ..Default::default() };
            tick(&mut state, &fire, &config, &mut rng);
            for _ in 1..gap {
                tick(&mut state, &TickInput::default(), &config, &mut rng);
            }
            tick(&mut state, &fire, &config, &mut rng);
            let fired = state.drain_events().filter(|e| *e == GameEvent::ShotFired).count();
            prop_assert_eq!(fired, 1);
        }

        #[test]
        fn prop_hit_outcome_ignores_collection_order(slot in 0usize..4, bullet_slot in 0usize..3) {
            let config = quiet_config();
            let mut state = GameState::new(&config);
            // Four far-apart enemies, the bullet overlaps only the one at `slot`
            let xs = [100.0, 250.0, 400.0, 550.0];
            for x in xs {
                enemy(&mut state, &config, Vec2::new(x, 200.0), Vec2::ZERO, 20.0);
            }
            for i in 0..3 {
                let x = if i == bullet_slot { xs[slot] } else { 700.0 + i as f32 * 30.0 };
                bullet(&mut state, &config, Vec2::new(x, 207.0), 7.0);
            }
            let target_id = state.enemies[slot].id;

            tick(&mut state, &TickInput::default(), &config, &mut rng());
            prop_assert_eq!(state.enemies.len(), 3);
            prop_assert!(state.enemies.iter().all(|e| e.id != target_id));
            prop_assert_eq!(state.bullets.len(), 2);
            prop_assert_eq!(state.score, 20);
        }
    }
}
