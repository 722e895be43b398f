//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{
    Kill, contact_damage, cull_out_of_bounds, resolve_enemy_projectile_hits,
    resolve_projectile_hits, separate_enemies,
};
pub use spawner::{Timer, player_shoot, roll_enemy_kind, soldier_volley, spawn_enemy};
pub use state::{
    Body, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Player, Projectile, ProjectileOwner,
};
pub use tick::{TickInput, tick};
