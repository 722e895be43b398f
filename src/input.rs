//! Keyboard and mouse state
//!
//! Browser events arrive between frames; `InputState` accumulates them and
//! hands the simulation one `TickInput` per tick.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

const UP_KEYS: [&str; 2] = ["w", "ArrowUp"];
const DOWN_KEYS: [&str; 2] = ["s", "ArrowDown"];
const LEFT_KEYS: [&str; 2] = ["a", "ArrowLeft"];
const RIGHT_KEYS: [&str; 2] = ["d", "ArrowRight"];

/// Accumulated input between simulation ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
    /// Last pointer position in arena pixels
    pointer: Option<Vec2>,
    button_down: bool,
    fire_pressed: bool,
    pause: bool,
    restart: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        if key == "Escape" {
            self.pause = true;
            return;
        }
        self.held.insert(normalize_key(key));
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&normalize_key(key));
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
        self.button_down = true;
        self.fire_pressed = true;
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn mouse_up(&mut self) {
        self.button_down = false;
    }

    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    pub fn request_restart(&mut self) {
        self.restart = true;
    }

    /// Forget held keys and buttons (focus lost, so key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.button_down = false;
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.held.contains(*k))
    }

    /// Movement per axis; up beats down and left beats right
    pub fn move_dir(&self) -> Vec2 {
        let y = if self.any_held(&UP_KEYS) {
            -1.0
        } else if self.any_held(&DOWN_KEYS) {
            1.0
        } else {
            0.0
        };
        let x = if self.any_held(&LEFT_KEYS) {
            -1.0
        } else if self.any_held(&RIGHT_KEYS) {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    /// Build the input for one tick and clear one-shot flags
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_dir: self.move_dir(),
            aim: self.pointer,
            fire_pressed: self.fire_pressed,
            fire_held: self.button_down,
            pause: self.pause,
            restart: self.restart,
        };
        self.fire_pressed = false;
        self.pause = false;
        self.restart = false;
        input
    }
}

/// Single letters compare case-insensitively (Shift or Caps Lock held)
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows() {
        let mut input = InputState::new();
        input.key_down("w");
        input.key_down("ArrowRight");
        assert_eq!(input.move_dir(), Vec2::new(1.0, -1.0));

        input.key_up("w");
        input.key_up("ArrowRight");
        assert_eq!(input.move_dir(), Vec2::ZERO);
    }

    #[test]
    fn test_up_beats_down_left_beats_right() {
        let mut input = InputState::new();
        input.key_down("s");
        input.key_down("ArrowUp");
        input.key_down("d");
        input.key_down("a");
        assert_eq!(input.move_dir(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        let mut input = InputState::new();
        input.key_down("D");
        assert_eq!(input.move_dir(), Vec2::new(1.0, 0.0));
        input.key_up("d");
        assert_eq!(input.move_dir(), Vec2::ZERO);
    }

    #[test]
    fn test_click_is_one_shot_hold_persists() {
        let mut input = InputState::new();
        input.mouse_down(100.0, 50.0);

        let first = input.take_tick_input();
        assert!(first.fire_pressed);
        assert!(first.fire_held);
        assert_eq!(first.aim, Some(Vec2::new(100.0, 50.0)));

        input.mouse_move(120.0, 60.0);
        let second = input.take_tick_input();
        assert!(!second.fire_pressed);
        assert!(second.fire_held);
        assert_eq!(second.aim, Some(Vec2::new(120.0, 60.0)));

        input.mouse_up();
        assert!(!input.take_tick_input().fire_held);
    }

    #[test]
    fn test_escape_requests_pause_once() {
        let mut input = InputState::new();
        input.key_down("Escape");
        assert!(input.take_tick_input().pause);
        assert!(!input.take_tick_input().pause);
        assert_eq!(input.move_dir(), Vec2::ZERO);
    }

    #[test]
    fn test_restart_request_is_one_shot() {
        let mut input = InputState::new();
        input.request_restart();
        assert!(input.take_tick_input().restart);
        assert!(!input.take_tick_input().restart);
    }

    #[test]
    fn test_release_all_clears_held() {
        let mut input = InputState::new();
        input.key_down("a");
        input.mouse_down(1.0, 1.0);
        input.release_all();
        let tick = input.take_tick_input();
        assert_eq!(tick.move_dir, Vec2::ZERO);
        assert!(!tick.fire_held);
    }
}
