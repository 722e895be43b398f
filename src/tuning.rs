//! Data-driven game balance
//!
//! Defaults reproduce the classic arena values. Overrides are JSON documents
//! that only need to name the fields they change:
//!
//! ```json
//! { "tank": { "health": 80 }, "spawn_interval_secs": 2.0 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::TICKS_PER_SECOND;
use crate::sim::state::EnemyKind;

/// Tuning errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or wrong field types
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed but unplayable value
    #[error("Invalid tuning value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Shared stats for anything with a body in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTuning {
    /// Damage dealt on contact (per tick for enemies, per hit for projectiles)
    pub damage: i32,
    pub health: i32,
    pub radius: f32,
    /// Pixels per second
    pub speed: f32,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl BodyTuning {
    const fn new(damage: i32, health: i32, radius: f32, speed: f32, color: [f32; 4]) -> Self {
        Self {
            damage,
            health,
            radius,
            speed,
            color,
        }
    }

    fn validate(&self, name: &str) -> Result<(), TuningError> {
        if self.radius <= 0.0 {
            return Err(invalid(name, "radius", "must be positive"));
        }
        if self.speed <= 0.0 {
            return Err(invalid(name, "speed", "must be positive"));
        }
        if self.health <= 0 {
            return Err(invalid(name, "health", "must be positive"));
        }
        if self.damage < 0 {
            return Err(invalid(name, "damage", "must not be negative"));
        }
        Ok(())
    }
}

/// Enemy archetype stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    #[serde(flatten)]
    pub body: BodyTuning,
    /// Score awarded on kill
    pub points: u32,
}

/// Cumulative thresholds for the spawn roll (uniform draw in [0, 1))
///
/// `roll <= mini` spawns a Mini, `<= soldier` a Soldier, `<= tank` a Tank,
/// anything above is a Zombie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub mini: f32,
    pub soldier: f32,
    pub tank: f32,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            mini: 0.15,
            soldier: 0.20,
            tank: 0.21,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub player: BodyTuning,
    pub player_projectile: BodyTuning,
    pub zombie: EnemyTuning,
    pub mini: EnemyTuning,
    pub soldier: EnemyTuning,
    pub soldier_projectile: BodyTuning,
    pub tank: EnemyTuning,
    pub spawn: SpawnTable,
    /// Seconds between enemy spawns
    pub spawn_interval_secs: f32,
    /// Seconds between soldier volleys
    pub volley_interval_secs: f32,
    /// Seconds between shots while the fire button is held
    pub fire_cooldown_secs: f32,
    /// Random positions tried before a spawn is skipped
    pub placement_attempts: u32,
    /// No spawns while this many enemies are alive
    pub max_enemies: usize,
}

/// Named colors of the classic palette
pub mod palette {
    pub const PINK: [f32; 4] = [1.0, 0.753, 0.796, 1.0];
    pub const GRAY: [f32; 4] = [0.502, 0.502, 0.502, 1.0];
    pub const GREEN: [f32; 4] = [0.0, 0.502, 0.0, 1.0];
    pub const LIGHT_GREEN: [f32; 4] = [0.565, 0.933, 0.565, 1.0];
    pub const DARK_GREEN: [f32; 4] = [0.0, 0.392, 0.0, 1.0];
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const PURPLE: [f32; 4] = [0.502, 0.0, 0.502, 1.0];
}

impl Default for Tuning {
    fn default() -> Self {
        use palette::*;

        // Classic values were per display frame; scale to per second
        let fps = TICKS_PER_SECOND;
        Self {
            player: BodyTuning::new(0, 200, 30.0, 3.0 * fps, PINK),
            player_projectile: BodyTuning::new(1, 1, 5.0, 3.0 * fps, GRAY),
            zombie: EnemyTuning {
                body: BodyTuning::new(1, 3, 30.0, 1.0 * fps, GREEN),
                points: 1,
            },
            mini: EnemyTuning {
                body: BodyTuning::new(1, 1, 15.0, 3.0 * fps, LIGHT_GREEN),
                points: 2,
            },
            soldier: EnemyTuning {
                body: BodyTuning::new(1, 5, 20.0, 1.0 * fps, DARK_GREEN),
                points: 5,
            },
            soldier_projectile: BodyTuning::new(10, 1, 5.0, 5.0 * fps, BLUE),
            tank: EnemyTuning {
                body: BodyTuning::new(3, 50, 90.0, 0.5 * fps, PURPLE),
                points: 25,
            },
            spawn: SpawnTable::default(),
            spawn_interval_secs: 3.0,
            volley_interval_secs: 1.0,
            fire_cooldown_secs: 0.25,
            placement_attempts: 16,
            max_enemies: 40,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge_json(&mut merged, overrides);

        let tuning: Self = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON override file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        self.player.validate("player")?;
        self.player_projectile.validate("player_projectile")?;
        self.soldier_projectile.validate("soldier_projectile")?;
        for kind in EnemyKind::ALL {
            self.enemy(kind).body.validate(kind.name())?;
        }

        let SpawnTable {
            mini,
            soldier,
            tank,
        } = self.spawn;
        if !(0.0 <= mini && mini <= soldier && soldier <= tank && tank <= 1.0) {
            return Err(invalid(
                "spawn",
                "thresholds",
                &format!("need 0 <= mini <= soldier <= tank <= 1, got {mini}/{soldier}/{tank}"),
            ));
        }

        for (field, secs) in [
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("volley_interval_secs", self.volley_interval_secs),
            ("fire_cooldown_secs", self.fire_cooldown_secs),
        ] {
            if secs <= 0.0 {
                return Err(TuningError::Invalid {
                    field: field.to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Stats for an enemy archetype
    pub fn enemy(&self, kind: EnemyKind) -> &EnemyTuning {
        match kind {
            EnemyKind::Zombie => &self.zombie,
            EnemyKind::Mini => &self.mini,
            EnemyKind::Soldier => &self.soldier,
            EnemyKind::Tank => &self.tank,
        }
    }

    pub fn spawn_interval_ticks(&self) -> u32 {
        secs_to_ticks(self.spawn_interval_secs)
    }

    pub fn volley_interval_ticks(&self) -> u32 {
        secs_to_ticks(self.volley_interval_secs)
    }

    pub fn fire_cooldown_ticks(&self) -> u32 {
        secs_to_ticks(self.fire_cooldown_secs)
    }
}

/// Convert seconds to whole ticks (at least one)
pub fn secs_to_ticks(secs: f32) -> u32 {
    ((secs * TICKS_PER_SECOND).round() as u32).max(1)
}

fn invalid(name: &str, field: &str, reason: &str) -> TuningError {
    TuningError::Invalid {
        field: format!("{name}.{field}"),
        reason: reason.to_string(),
    }
}

/// Recursively overlay `patch` objects onto `base`
fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.spawn_interval_ticks(), 180);
        assert_eq!(tuning.volley_interval_ticks(), 60);
        assert_eq!(tuning.tank.points, 25);
        assert!((tuning.tank.body.speed - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let tuning = Tuning::from_json(r#"{ "tank": { "health": 80 } }"#).unwrap();
        assert_eq!(tuning.tank.body.health, 80);
        // Untouched tank fields keep tank defaults, not generic ones
        assert_eq!(tuning.tank.points, 25);
        assert_eq!(tuning.tank.body.radius, 90.0);
        assert_eq!(tuning.zombie, Tuning::default().zombie);
    }

    #[test]
    fn test_empty_override_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "mini": { "radius": "big" } }"#),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unplayable_values() {
        let err = Tuning::from_json(r#"{ "mini": { "radius": 0 } }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "mini.radius"),
            other => panic!("unexpected error: {other}"),
        }

        assert!(Tuning::from_json(r#"{ "spawn": { "soldier": 0.1 } }"#).is_err());
        assert!(Tuning::from_json(r#"{ "volley_interval_secs": 0 } "#).is_err());
    }

    #[test]
    fn test_secs_to_ticks_floor_of_one() {
        assert_eq!(secs_to_ticks(0.001), 1);
        assert_eq!(secs_to_ticks(0.25), 15);
    }
}
