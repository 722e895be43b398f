//! Timer-driven spawning of enemies and projectiles

use glam::Vec2;
use rand::Rng;

use super::state::{EnemyKind, GameEvent, GameState, Projectile, ProjectileOwner};
use crate::{circles_overlap, direction_to};
use crate::tuning::SpawnTable;

/// Repeating countdown measured in ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub interval_ticks: u32,
    pub remaining: u32,
}

impl Timer {
    pub fn new(interval_ticks: u32) -> Self {
        let interval_ticks = interval_ticks.max(1);
        Self {
            interval_ticks,
            remaining: interval_ticks,
        }
    }

    /// Count down one tick; true (and re-armed) when the interval elapses
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.interval_ticks;
            true
        } else {
            false
        }
    }
}

/// Map a uniform roll in [0, 1) to an enemy kind
pub fn roll_enemy_kind(roll: f32, table: &SpawnTable) -> EnemyKind {
    if roll <= table.mini {
        EnemyKind::Mini
    } else if roll <= table.soldier {
        EnemyKind::Soldier
    } else if roll <= table.tank {
        EnemyKind::Tank
    } else {
        EnemyKind::Zombie
    }
}

/// Spawn one random enemy at a free spot in the arena
///
/// Returns the new enemy's ID, or `None` when the arena is at capacity or no
/// free position turned up within the configured number of attempts.
pub fn spawn_enemy(state: &mut GameState) -> Option<u32> {
    if state.enemies.len() >= state.tuning.max_enemies {
        log::debug!("Spawn skipped: {} enemies alive", state.enemies.len());
        return None;
    }

    let kind = roll_enemy_kind(state.rng.random::<f32>(), &state.tuning.spawn);
    let radius = state.tuning.enemy(kind).body.radius;

    for _ in 0..state.tuning.placement_attempts {
        let pos = Vec2::new(
            state.rng.random::<f32>() * state.bounds.x,
            state.rng.random::<f32>() * state.bounds.y,
        );
        if is_free(state, pos, radius) {
            let id = state.push_enemy(kind, pos);
            log::debug!("Spawned {} #{} at ({:.0}, {:.0})", kind.name(), id, pos.x, pos.y);
            return Some(id);
        }
    }

    log::debug!("Spawn skipped: no free spot for {}", kind.name());
    None
}

/// True when a circle at `pos` touches neither the player nor any enemy
fn is_free(state: &GameState, pos: Vec2, radius: f32) -> bool {
    let player = &state.player.body;
    if circles_overlap(pos, radius, player.pos, player.radius) {
        return false;
    }
    !state
        .enemies
        .iter()
        .any(|e| circles_overlap(pos, radius, e.body.pos, e.body.radius))
}

/// Every soldier fires one projectile at the player's current position
pub fn soldier_volley(state: &mut GameState) -> usize {
    let target = state.player.body.pos;
    let origins: Vec<Vec2> = state
        .enemies
        .iter()
        .filter(|e| e.kind == EnemyKind::Soldier)
        .map(|e| e.body.pos)
        .collect();

    let mut fired = 0;
    for origin in origins {
        if direction_to(origin, target) == Vec2::ZERO {
            continue;
        }
        let id = state.next_entity_id();
        let projectile = Projectile::aimed(
            id,
            ProjectileOwner::Enemy,
            origin,
            target,
            &state.tuning.soldier_projectile,
        );
        state.enemy_projectiles.push(projectile);
        fired += 1;
    }

    if fired > 0 {
        state.events.push(GameEvent::SoldierVolley { count: fired });
    }
    fired
}

/// Fire a player projectile from the avatar toward `target`
///
/// Aiming at (or within a hair of) the avatar's own center has no direction
/// and fires nothing.
pub fn player_shoot(state: &mut GameState, target: Vec2) -> Option<u32> {
    let origin = state.player.body.pos;
    if direction_to(origin, target) == Vec2::ZERO {
        return None;
    }
    let id = state.next_entity_id();
    let projectile = Projectile::aimed(
        id,
        ProjectileOwner::Player,
        origin,
        target,
        &state.tuning.player_projectile,
    );
    state.player_projectiles.push(projectile);
    state.events.push(GameEvent::PlayerShot);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(42, Tuning::default(), Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn test_timer_fires_every_interval() {
        let mut timer = Timer::new(3);
        let fired: Vec<bool> = (0..7).map(|_| timer.tick()).collect();
        assert_eq!(fired, [false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_timer_zero_interval_fires_each_tick() {
        let mut timer = Timer::new(0);
        assert!(timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_roll_thresholds() {
        let table = SpawnTable::default();
        assert_eq!(roll_enemy_kind(0.0, &table), EnemyKind::Mini);
        assert_eq!(roll_enemy_kind(0.15, &table), EnemyKind::Mini);
        assert_eq!(roll_enemy_kind(0.151, &table), EnemyKind::Soldier);
        assert_eq!(roll_enemy_kind(0.20, &table), EnemyKind::Soldier);
        assert_eq!(roll_enemy_kind(0.205, &table), EnemyKind::Tank);
        assert_eq!(roll_enemy_kind(0.5, &table), EnemyKind::Zombie);
        assert_eq!(roll_enemy_kind(0.999, &table), EnemyKind::Zombie);
    }

    #[test]
    fn test_spawned_enemies_never_overlap() {
        let mut state = state();
        for _ in 0..30 {
            spawn_enemy(&mut state);
        }
        assert!(!state.enemies.is_empty());
        for (i, a) in state.enemies.iter().enumerate() {
            assert!(!a.body.overlaps(&state.player.body));
            for b in &state.enemies[i + 1..] {
                assert!(!a.body.overlaps(&b.body));
            }
        }
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut state = state();
        state.tuning.max_enemies = 2;
        for _ in 0..10 {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.len() <= 2);
    }

    #[test]
    fn test_spawn_skipped_when_arena_full() {
        // Arena barely larger than the player: every spot overlaps it
        let mut state = GameState::new(3, Tuning::default(), Vec2::new(60.0, 60.0));
        assert_eq!(spawn_enemy(&mut state), None);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_soldier_volley_aims_at_player() {
        let mut state = state();
        let player = state.player.body.pos;
        state.push_enemy(EnemyKind::Soldier, player + Vec2::new(200.0, 0.0));
        state.push_enemy(EnemyKind::Zombie, player - Vec2::new(200.0, 0.0));

        assert_eq!(soldier_volley(&mut state), 1);
        let shot = &state.enemy_projectiles[0];
        assert_eq!(shot.owner, ProjectileOwner::Enemy);
        assert!((shot.vel - Vec2::NEG_X).length() < 1e-5);
        assert_eq!(shot.body.damage, 10);
        assert!(state.events.contains(&GameEvent::SoldierVolley { count: 1 }));
    }

    #[test]
    fn test_player_shoot_toward_target() {
        let mut state = state();
        let target = state.player.body.pos + Vec2::new(0.0, -100.0);
        assert!(player_shoot(&mut state, target).is_some());
        let shot = &state.player_projectiles[0];
        assert!((shot.vel - Vec2::NEG_Y).length() < 1e-5);
        assert_eq!(shot.body.pos, state.player.body.pos);

        let own_center = state.player.body.pos;
        assert_eq!(player_shoot(&mut state, own_center), None);
        assert_eq!(
            player_shoot(&mut state, own_center + Vec2::splat(1e-4)),
            None
        );
        assert_eq!(state.player_projectiles.len(), 1);
    }

    #[test]
    fn test_soldier_on_top_of_player_holds_fire() {
        let mut state = state();
        let player = state.player.body.pos;
        state.push_enemy(EnemyKind::Soldier, player + Vec2::splat(1e-4));
        assert_eq!(soldier_volley(&mut state), 0);
        assert!(state.enemy_projectiles.is_empty());
    }
}
