//! Per-frame update and draw driver
//!
//! Strict phase order within a tick: recompute the viewport, let the field
//! fill/prune for the new viewport, update the skier, update the rhino.
//! Drawing happens after all updates, reads only, and follows descent
//! order: terrain first, then the skier, then the rhino on top.

use glam::Vec2;

use super::entity::{DrawSurface, Entity, ImageCatalog};
use super::skier::GameKey;
use super::state::GameState;

/// Advance the whole world one frame. `now` is wall-clock milliseconds from
/// the shell; it only drives animation frame pacing, never movement.
pub fn tick(state: &mut GameState, images: &dyn ImageCatalog, now: f64) {
    let previous = state.recompute_viewport();
    let viewport = state.viewport();

    state.field.place_new_obstacle(&viewport, &previous, images);
    state.skier.update(now, &state.field, images, &mut state.events);
    state.rhino.update(now, &mut state.skier, images, &mut state.events);
}

/// Draw everything visible, offset so the viewport maps to the screen.
pub fn draw(state: &GameState, surface: &mut dyn DrawSurface, images: &dyn ImageCatalog) {
    let viewport = state.viewport();
    let offset = Vec2::new(viewport.left, viewport.top);

    for obstacle in state.field.obstacles() {
        obstacle.draw(surface, images, offset);
    }
    state.skier.draw(surface, images, offset);
    state.rhino.draw(surface, images, offset);
}

/// Route a key press to the skier. Returns whether it was handled so the
/// shell can suppress the browser default.
pub fn handle_key(state: &mut GameState, key: GameKey, now: f64) -> bool {
    state.skier.handle_input(key, now, &mut state.events)
}
