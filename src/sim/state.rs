//! Top-level game state
//!
//! One skier, one rhino, one obstacle field, and the viewport that tracks
//! the skier. Collaborator-facing effects (audio cues, score lifecycle)
//! leave the sim as [`GameEvent`]s drained by the shell each frame, so the
//! core never touches the DOM.

use glam::Vec2;

use super::entity::{Entity, ImageCatalog};
use super::field::ObstacleField;
use super::geom::Rect;
use super::rhino::Rhino;
use super::skier::Skier;
use crate::consts::{RHINO_START_X, RHINO_START_Y};

/// Things the outside world needs to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play the jump sound (fire-and-forget)
    Jumped,
    /// Stop advancing the score; the run is over
    SkierDied,
}

pub struct GameState {
    width: f32,
    height: f32,
    viewport: Rect,
    pub skier: Skier,
    pub rhino: Rhino,
    pub field: ObstacleField,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh run: skier at the origin, rhino far upslope, starting band of
    /// obstacles placed. Creating a new state is also how restart works:
    /// dropping the old one cancels every in-flight animation with it.
    pub fn new(width: f32, height: f32, seed: u64, images: &dyn ImageCatalog) -> Self {
        let skier = Skier::new(Vec2::ZERO);
        let viewport = viewport_around(skier.position(), width, height);

        let mut field = ObstacleField::new(seed);
        field.place_initial(&viewport, images);

        log::info!("new run: seed {seed}, window {width}x{height}");

        Self {
            width,
            height,
            viewport,
            skier,
            rhino: Rhino::new(Vec2::new(RHINO_START_X, RHINO_START_Y)),
            field,
            events: Vec::new(),
        }
    }

    /// The world region currently on screen
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Re-center the viewport on the skier. Returns the previous viewport
    /// so the obstacle field can see what terrain was just exposed.
    pub fn recompute_viewport(&mut self) -> Rect {
        let previous = self.viewport;
        self.viewport = viewport_around(self.skier.position(), self.width, self.height);
        previous
    }

    /// Hand pending events to the shell
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Rect of the game window size centered on `pos`
fn viewport_around(pos: Vec2, width: f32, height: f32) -> Rect {
    let left = pos.x - width / 2.0;
    let top = pos.y - height / 2.0;
    Rect::new(left, top, left + width, top + height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::test_support::FixedImages;

    #[test]
    fn test_viewport_centered_on_skier() {
        let images = FixedImages(Vec2::new(30.0, 30.0));
        let state = GameState::new(800.0, 600.0, 1, &images);
        assert_eq!(state.viewport(), Rect::new(-400.0, -300.0, 400.0, 300.0));
    }

    #[test]
    fn test_recompute_follows_the_skier() {
        let images = FixedImages(Vec2::new(30.0, 30.0));
        let mut state = GameState::new(800.0, 600.0, 1, &images);
        state.skier.set_position(Vec2::new(100.0, 900.0));

        let previous = state.recompute_viewport();
        assert_eq!(previous, Rect::new(-400.0, -300.0, 400.0, 300.0));
        assert_eq!(state.viewport(), Rect::new(-300.0, 600.0, 500.0, 1200.0));
    }

    #[test]
    fn test_drain_events_empties_the_queue() {
        let images = FixedImages(Vec2::new(30.0, 30.0));
        let mut state = GameState::new(800.0, 600.0, 1, &images);
        state.events.push(GameEvent::Jumped);

        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_new_run_seeds_obstacles_and_spawns() {
        let images = FixedImages(Vec2::new(30.0, 30.0));
        let state = GameState::new(800.0, 600.0, 42, &images);
        assert!(!state.field.obstacles().is_empty());
        assert_eq!(state.skier.position(), Vec2::ZERO);
        assert_eq!(
            state.rhino.position(),
            Vec2::new(RHINO_START_X, RHINO_START_Y)
        );
    }
}
