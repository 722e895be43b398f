//! Turn a game state into a triangle list in arena pixels

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Body, GameState};

/// Health bar size at full health (pixels)
pub const HEALTH_BAR_WIDTH: f32 = 200.0;
pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
/// Gap between the bar and the bottom edge
const HEALTH_BAR_MARGIN: f32 = 40.0;
const HEALTH_BAR_BORDER: f32 = 5.0;
/// Below this fraction the bar turns red
const HEALTH_LOW_FRACTION: f32 = 0.25;

/// Build every vertex for the current frame, back to front
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let outline = settings.outline_width();
    let mut vertices = Vec::new();

    let mut draw = |body: &Body, segments: u32| {
        vertices.extend(shapes::circle(body.pos, body.radius, body.color, segments));
        if outline > 0.0 {
            vertices.extend(shapes::ring(
                body.pos,
                (body.radius - outline / 2.0).max(0.0),
                body.radius + outline / 2.0,
                colors::OUTLINE,
                segments,
            ));
        }
    };

    draw(&state.player.body, segments);
    for enemy in &state.enemies {
        draw(&enemy.body, segments);
    }
    // Projectiles are tiny; half the tessellation is plenty
    let small = (segments / 2).max(6);
    for projectile in state
        .player_projectiles
        .iter()
        .chain(&state.enemy_projectiles)
    {
        draw(&projectile.body, small);
    }

    if settings.health_bar {
        vertices.extend(health_bar(state.bounds, state.health_fraction()));
    }

    vertices
}

/// Outlined bar centered near the bottom of the arena
fn health_bar(bounds: Vec2, fraction: f32) -> Vec<Vertex> {
    let min = Vec2::new(
        (bounds.x - HEALTH_BAR_WIDTH) / 2.0,
        bounds.y - HEALTH_BAR_MARGIN - HEALTH_BAR_HEIGHT,
    );
    let max = min + Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);

    let mut vertices = Vec::with_capacity(30);
    if fraction > 0.0 {
        let fill = if fraction < HEALTH_LOW_FRACTION {
            colors::HEALTH_LOW
        } else {
            colors::HEALTH_FILL
        };
        let fill_max = Vec2::new(min.x + HEALTH_BAR_WIDTH * fraction, max.y);
        vertices.extend(shapes::rect(min, fill_max, fill));
    }
    vertices.extend(shapes::rect_outline(
        min,
        max,
        HEALTH_BAR_BORDER,
        colors::HEALTH_FRAME,
    ));
    vertices
}
