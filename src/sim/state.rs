//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives here. Positions are canvas
//! pixels with the origin at the top-left corner and y pointing down.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawner::Timer;
use crate::circles_overlap;
use crate::tuning::{BodyTuning, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player died; waiting for restart
    GameOver,
}

/// Shared physical and combat stats
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
    /// Pixels per second
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
}

impl Body {
    pub fn from_tuning(pos: Vec2, tuning: &BodyTuning) -> Self {
        Self {
            pos,
            radius: tuning.radius,
            color: tuning.color,
            speed: tuning.speed,
            health: tuning.health,
            damage: tuning.damage,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// True once the whole circle has left the `bounds` rectangle
    pub fn is_outside(&self, bounds: Vec2) -> bool {
        self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > bounds.x
            || self.pos.y + self.radius < 0.0
            || self.pos.y - self.radius > bounds.y
    }
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Ticks until held fire shoots again
    pub fire_cooldown_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &BodyTuning) -> Self {
        Self {
            body: Body::from_tuning(pos, tuning),
            fire_cooldown_ticks: 0,
        }
    }

    /// Move along `dir`, whose components are already -1/0/1 per axis
    pub fn walk(&mut self, dir: Vec2, dt: f32) {
        self.body.pos += dir * self.body.speed * dt;
    }

    /// Keep the avatar fully inside the arena
    pub fn clamp_to(&mut self, bounds: Vec2) {
        let min = Vec2::splat(self.body.radius);
        // An arena smaller than the avatar pins it to the top-left inset
        let max = (bounds - min).max(min);
        self.body.pos = self.body.pos.clamp(min, max);
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Slow, sturdy melee
    Zombie,
    /// Fast and fragile
    Mini,
    /// Fires at the player on every volley
    Soldier,
    /// Huge and slow
    Tank,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Zombie,
        EnemyKind::Mini,
        EnemyKind::Soldier,
        EnemyKind::Tank,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Zombie => "zombie",
            EnemyKind::Mini => "mini",
            EnemyKind::Soldier => "soldier",
            EnemyKind::Tank => "tank",
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    /// Unit heading (scaled by `body.speed` when moving)
    pub vel: Vec2,
    pub points: u32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, tuning: &Tuning) -> Self {
        let stats = tuning.enemy(kind);
        Self {
            id,
            kind,
            body: Body::from_tuning(pos, &stats.body),
            vel: Vec2::ZERO,
            points: stats.points,
        }
    }

    /// Point the heading at `target`
    pub fn steer_toward(&mut self, target: Vec2) {
        self.vel = crate::direction_to(self.body.pos, target);
    }

    pub fn advance(&mut self, dt: f32) {
        self.body.pos += self.vel * self.body.speed * dt;
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A projectile entity
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub owner: ProjectileOwner,
    pub body: Body,
    /// Unit heading
    pub vel: Vec2,
    /// Enemy IDs already damaged by this projectile
    pub struck: Vec<u32>,
}

impl Projectile {
    /// Spawn at `origin` heading toward `target`
    pub fn aimed(
        id: u32,
        owner: ProjectileOwner,
        origin: Vec2,
        target: Vec2,
        tuning: &BodyTuning,
    ) -> Self {
        Self {
            id,
            owner,
            body: Body::from_tuning(origin, tuning),
            vel: crate::direction_to(origin, target),
            struck: Vec::new(),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.body.pos += self.vel * self.body.speed * dt;
    }
}

/// Things that happened during the last tick (for HUD, logging and tests)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: u32, kind: EnemyKind },
    EnemyKilled { kind: EnemyKind, points: u32 },
    PlayerShot,
    SoldierVolley { count: usize },
    PlayerHit { damage: i32 },
    PlayerDied { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Arena size in pixels
    pub bounds: Vec2,
    pub player: Player,
    /// Active enemies (spawn order)
    pub enemies: Vec<Enemy>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub spawn_timer: Timer,
    pub volley_timer: Timer,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the player centered in the arena
    pub fn new(seed: u64, tuning: Tuning, bounds: Vec2) -> Self {
        let player = Player::new(bounds / 2.0, &tuning.player);
        let spawn_timer = Timer::new(tuning.spawn_interval_ticks());
        let volley_timer = Timer::new(tuning.volley_interval_ticks());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            bounds,
            player,
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            spawn_timer,
            volley_timer,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Start over with fresh state, keeping tuning and arena size
    pub fn restarted(&self, seed: u64) -> Self {
        Self::new(seed, self.tuning.clone(), self.bounds)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Arena resized (window resize)
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.player.clamp_to(bounds);
    }

    /// Remaining player health in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        let max = self.tuning.player.health.max(1) as f32;
        (self.player.body.health as f32 / max).clamp(0.0, 1.0)
    }

    /// Append an enemy and record the spawn
    pub fn push_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::new(id, kind, pos, &self.tuning);
        self.enemies.push(enemy);
        self.events.push(GameEvent::EnemySpawned { id, kind });
        id
    }
}
