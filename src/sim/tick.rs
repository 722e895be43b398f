//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{
    contact_damage, cull_out_of_bounds, resolve_enemy_projectile_hits, resolve_projectile_hits,
    separate_enemies,
};
use super::spawner::{player_shoot, soldier_volley, spawn_enemy};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement per axis, each component -1, 0 or 1
    pub move_dir: Vec2,
    /// Pointer position in arena pixels
    pub aim: Option<Vec2>,
    /// Fire button went down since the last tick
    pub fire_pressed: bool,
    /// Fire button is being held
    pub fire_held: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new run
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart {
        let seed = next_seed(state.seed);
        *state = state.restarted(seed);
        log::info!("Run restarted with seed: {}", seed);
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Player movement and fire
    state.player.walk(input.move_dir, dt);
    state.player.clamp_to(state.bounds);

    state.player.fire_cooldown_ticks = state.player.fire_cooldown_ticks.saturating_sub(1);
    if let Some(aim) = input.aim {
        let ready = state.player.fire_cooldown_ticks == 0;
        if input.fire_pressed || (input.fire_held && ready) {
            if player_shoot(state, aim).is_some() {
                state.player.fire_cooldown_ticks = state.tuning.fire_cooldown_ticks();
            }
        }
    }

    // Enemies chase the player; projectiles fly straight
    let target = state.player.body.pos;
    for enemy in &mut state.enemies {
        enemy.steer_toward(target);
        enemy.advance(dt);
    }
    for projectile in state
        .player_projectiles
        .iter_mut()
        .chain(state.enemy_projectiles.iter_mut())
    {
        projectile.advance(dt);
    }

    // Timed spawns
    if state.spawn_timer.tick() {
        spawn_enemy(state);
    }
    if state.volley_timer.tick() {
        soldier_volley(state);
    }

    separate_enemies(&mut state.enemies);

    // Damage
    let kills = resolve_projectile_hits(&mut state.player_projectiles, &mut state.enemies);
    for kill in kills {
        state.score += u64::from(kill.points);
        log::debug!("Killed {} #{} (+{})", kill.kind.name(), kill.id, kill.points);
        state.events.push(GameEvent::EnemyKilled {
            kind: kill.kind,
            points: kill.points,
        });
    }

    let damage = contact_damage(&state.player.body, &state.enemies).saturating_add(
        resolve_enemy_projectile_hits(&state.player.body, &mut state.enemy_projectiles),
    );
    if damage > 0 {
        state.player.body.health = state.player.body.health.saturating_sub(damage);
        state.events.push(GameEvent::PlayerHit { damage });
    }

    // Cull
    cull_out_of_bounds(&mut state.player_projectiles, state.bounds);
    cull_out_of_bounds(&mut state.enemy_projectiles, state.bounds);

    if state.player.body.is_dead() {
        state.player.body.health = 0;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDied { score: state.score });
        log::info!(
            "Player died at tick {} with score {}",
            state.time_ticks,
            state.score
        );
    }
}

/// Derive the next run's seed from the current one
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::EnemyKind;
    use crate::tuning::Tuning;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Tuning::default(), Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn test_player_moves_per_axis() {
        let mut state = new_state(1);
        let start = state.player.body.pos;
        let input = TickInput {
            move_dir: Vec2::new(1.0, -1.0),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        // 180 px/s at 60 Hz is 3 px per tick on each axis
        let moved = state.player.body.pos - start;
        assert!((moved.x - 3.0).abs() < 1e-3);
        assert!((moved.y + 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = new_state(1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.time_ticks;

        // Paused state does not advance
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);

        // Unpause
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = new_state(5);
        let idle = TickInput::default();
        for _ in 0..179 {
            tick(&mut state, &idle, SIM_DT);
        }
        assert!(state.enemies.is_empty());
        tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.enemies.len(), 1);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::EnemySpawned { .. }, ..]
        ));
    }

    #[test]
    fn test_click_fires_and_hold_respects_cooldown() {
        let mut state = new_state(1);
        let aim = Some(state.player.body.pos + Vec2::new(0.0, -200.0));
        let press = TickInput {
            aim,
            fire_pressed: true,
            fire_held: true,
            ..Default::default()
        };
        tick(&mut state, &press, SIM_DT);
        assert_eq!(state.player_projectiles.len(), 1);
        assert!(state.events.contains(&GameEvent::PlayerShot));

        let hold = TickInput {
            aim,
            fire_held: true,
            ..Default::default()
        };
        // 0.25 s cooldown is 15 ticks
        for _ in 0..14 {
            tick(&mut state, &hold, SIM_DT);
        }
        assert_eq!(state.player_projectiles.len(), 1);
        tick(&mut state, &hold, SIM_DT);
        assert_eq!(state.player_projectiles.len(), 2);
    }

    #[test]
    fn test_kill_awards_points() {
        let mut state = new_state(1);
        let player = state.player.body.pos;
        state.push_enemy(EnemyKind::Mini, player + Vec2::new(0.0, -60.0));
        let input = TickInput {
            aim: Some(player + Vec2::new(0.0, -60.0)),
            fire_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        for _ in 0..30 {
            if state.score > 0 {
                break;
            }
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.score, 2);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_contact_damage_and_game_over() {
        let mut state = new_state(1);
        let player = state.player.body.pos;
        state.player.body.health = 4;
        state.push_enemy(EnemyKind::Tank, player + Vec2::new(100.0, 0.0));

        let idle = TickInput::default();
        tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.player.body.health, 1);
        assert!(state.events.contains(&GameEvent::PlayerHit { damage: 3 }));

        tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.body.health, 0);
        assert!(state.events.contains(&GameEvent::PlayerDied { score: 0 }));

        // Game over freezes the run
        let ticks = state.time_ticks;
        tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_overwhelming_contact_damage_ends_run() {
        let tuning = Tuning::from_json(r#"{ "zombie": { "damage": 2147483647 } }"#).unwrap();
        let mut state = GameState::new(1, tuning, Vec2::new(1280.0, 720.0));
        let player = state.player.body.pos;
        state.push_enemy(EnemyKind::Zombie, player + Vec2::new(40.0, 0.0));
        state.push_enemy(EnemyKind::Zombie, player - Vec2::new(40.0, 0.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.events.contains(&GameEvent::PlayerHit { damage: i32::MAX }));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.body.health, 0);
    }

    #[test]
    fn test_soldiers_fire_every_second() {
        let mut state = new_state(1);
        let player = state.player.body.pos;
        state.push_enemy(EnemyKind::Soldier, player + Vec2::new(400.0, 0.0));

        let idle = TickInput::default();
        for _ in 0..59 {
            tick(&mut state, &idle, SIM_DT);
            assert!(state.enemy_projectiles.is_empty());
        }
        tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.time_ticks, 60);
        assert!(state.events.contains(&GameEvent::SoldierVolley { count: 1 }));
        assert_eq!(state.enemy_projectiles.len(), 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = new_state(1);
        state.phase = GamePhase::GameOver;
        state.score = 40;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_ne!(state.seed, 1);
        assert_eq!(state.player.body.health, 200);
    }

    #[test]
    fn test_projectiles_leave_the_arena() {
        let mut state = new_state(1);
        let aim = Some(state.player.body.pos + Vec2::new(100.0, 0.0));
        let press = TickInput {
            aim,
            fire_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &press, SIM_DT);
        assert_eq!(state.player_projectiles.len(), 1);
        // 640 px at 3 px per tick
        for _ in 0..230 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.player_projectiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            TickInput {
                move_dir: Vec2::new(1.0, 0.0),
                ..Default::default()
            },
            TickInput {
                aim: Some(Vec2::new(100.0, 100.0)),
                fire_pressed: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for step in 0..1200 {
            let input = &inputs[step % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.body.pos, b.body.pos);
        }
        assert_eq!(state1.player.body.health, state2.player.body.health);
    }
}
