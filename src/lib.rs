//! Horde Arena - A browser arena survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, damage)
//! - `input`: Keyboard/mouse state folded into per-tick commands
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use input::InputState;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena size used before the canvas reports its real size
    pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;
}

/// Unit vector pointing from `from` toward `to`
///
/// Zero when the two points coincide.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin())
}

/// True when two circles strictly overlap
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_axes() {
        let right = direction_to(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((right - Vec2::X).length() < 1e-5);

        let down = direction_to(Vec2::new(5.0, 5.0), Vec2::new(5.0, 50.0));
        assert!((down - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_direction_to_same_point() {
        assert_eq!(direction_to(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        // Touching exactly is not an overlap
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
    }
}
