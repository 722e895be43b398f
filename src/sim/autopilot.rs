//! Idle/demo mode - AI plays the game
//!
//! Produces the same `TickInput` a human would, so the simulation cannot tell
//! the difference.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// Extra clearance kept from enemies beyond touching distance
const ENEMY_DANGER_MARGIN: f32 = 120.0;
/// Enemy projectiles closer than this are dodged
const PROJECTILE_DANGER_RADIUS: f32 = 100.0;
/// Distance from a wall at which the avatar starts steering back inward
const WALL_MARGIN: f32 = 80.0;
/// Below this the urge to move on an axis is ignored
const AXIS_DEAD_ZONE: f32 = 0.2;

/// Pick inputs for the current state
pub fn autopilot(state: &GameState) -> TickInput {
    let me = state.player.body.pos;
    let my_radius = state.player.body.radius;

    let nearest = state.enemies.iter().min_by(|a, b| {
        a.body
            .pos
            .distance_squared(me)
            .partial_cmp(&b.body.pos.distance_squared(me))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut flee = Vec2::ZERO;
    for enemy in &state.enemies {
        let danger = enemy.body.radius + my_radius + ENEMY_DANGER_MARGIN;
        flee += repulsion(me, enemy.body.pos, danger);
    }
    for projectile in &state.enemy_projectiles {
        flee += repulsion(me, projectile.body.pos, PROJECTILE_DANGER_RADIUS);
    }

    // Walls repel too, otherwise the avatar gets pinned in a corner
    let bounds = state.bounds;
    if me.x < WALL_MARGIN {
        flee.x += 1.0 - me.x / WALL_MARGIN;
    }
    if me.x > bounds.x - WALL_MARGIN {
        flee.x -= 1.0 - (bounds.x - me.x) / WALL_MARGIN;
    }
    if me.y < WALL_MARGIN {
        flee.y += 1.0 - me.y / WALL_MARGIN;
    }
    if me.y > bounds.y - WALL_MARGIN {
        flee.y -= 1.0 - (bounds.y - me.y) / WALL_MARGIN;
    }

    TickInput {
        move_dir: Vec2::new(axis(flee.x), axis(flee.y)),
        aim: nearest.map(|e| e.body.pos),
        fire_pressed: false,
        fire_held: nearest.is_some(),
        pause: false,
        restart: false,
    }
}

/// Push away from `threat`, strongest when touching and zero at `radius`
fn repulsion(me: Vec2, threat: Vec2, radius: f32) -> Vec2 {
    let delta = me - threat;
    let dist = delta.length();
    if dist >= radius {
        return Vec2::ZERO;
    }
    let away = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::Y
    };
    away * (1.0 - dist / radius)
}

fn axis(urge: f32) -> f32 {
    if urge > AXIS_DEAD_ZONE {
        1.0
    } else if urge < -AXIS_DEAD_ZONE {
        -1.0
    } else {
        0.0
    }
}
