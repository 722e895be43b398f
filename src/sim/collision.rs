//! Collision detection and damage resolution
//!
//! Everything in the arena is a circle, so every test here reduces to
//! center distance against the sum of radii.

use glam::Vec2;

use super::state::{Body, Enemy, EnemyKind, Projectile};

/// An enemy removed by player fire this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub id: u32,
    pub kind: EnemyKind,
    pub points: u32,
}

/// Push overlapping enemies apart
///
/// Each enemy of an overlapping pair moves half the overlap along the line
/// between the two centers. Coincident centers split along +x.
pub fn separate_enemies(enemies: &mut [Enemy]) {
    for i in 0..enemies.len() {
        let (head, tail) = enemies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            let delta = b.body.pos - a.body.pos;
            let dist = delta.length();
            let overlap = a.body.radius + b.body.radius - dist;
            if overlap <= 0.0 {
                continue;
            }
            let dir = if dist > f32::EPSILON {
                delta / dist
            } else {
                Vec2::X
            };
            let half = overlap / 2.0;
            a.body.pos -= dir * half;
            b.body.pos += dir * half;
        }
    }
}

/// Apply player projectiles to enemies
///
/// Projectiles are processed in order. A projectile damages every live enemy it
/// overlaps, at most once per enemy over its lifetime, and loses one health per
/// hit; it stops hitting once spent. Dead enemies and spent projectiles are
/// removed, and the kills are returned in enemy order.
pub fn resolve_projectile_hits(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
) -> Vec<Kill> {
    for projectile in projectiles.iter_mut() {
        for enemy in enemies.iter_mut() {
            if projectile.body.is_dead() {
                break;
            }
            if enemy.body.is_dead() || projectile.struck.contains(&enemy.id) {
                continue;
            }
            if projectile.body.overlaps(&enemy.body) {
                enemy.body.health = enemy.body.health.saturating_sub(projectile.body.damage);
                projectile.body.health -= 1;
                projectile.struck.push(enemy.id);
            }
        }
    }

    let kills = enemies
        .iter()
        .filter(|e| e.body.is_dead())
        .map(|e| Kill {
            id: e.id,
            kind: e.kind,
            points: e.points,
        })
        .collect();

    enemies.retain(|e| !e.body.is_dead());
    projectiles.retain(|p| !p.body.is_dead());
    kills
}

/// Total contact damage from every enemy touching the player
///
/// Saturates at `i32::MAX` rather than wrapping.
pub fn contact_damage(player: &Body, enemies: &[Enemy]) -> i32 {
    enemies
        .iter()
        .filter(|e| e.body.overlaps(player))
        .fold(0i32, |total, e| total.saturating_add(e.body.damage))
}

/// Apply enemy projectiles to the player
///
/// Returns the damage dealt; spent projectiles are removed.
pub fn resolve_enemy_projectile_hits(player: &Body, projectiles: &mut Vec<Projectile>) -> i32 {
    let mut damage = 0i32;
    for projectile in projectiles.iter_mut() {
        if projectile.body.overlaps(player) {
            damage = damage.saturating_add(projectile.body.damage);
            projectile.body.health -= 1;
        }
    }
    projectiles.retain(|p| !p.body.is_dead());
    damage
}

/// Drop projectiles that have fully left the arena
pub fn cull_out_of_bounds(projectiles: &mut Vec<Projectile>, bounds: Vec2) -> usize {
    let before = projectiles.len();
    projectiles.retain(|p| !p.body.is_outside(bounds));
    before - projectiles.len()
}
