//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame-based movement, animation pacing from timestamps passed in
//! - Seeded RNG only (obstacle placement)
//! - No rendering or platform dependencies; pixels and sound go through
//!   the `ImageCatalog`/`DrawSurface` seams and the `GameEvent` queue

pub mod animation;
pub mod entity;
pub mod field;
pub mod geom;
pub mod obstacle;
pub mod rhino;
pub mod skier;
pub mod state;
pub mod tick;

pub use animation::{Animation, AnimationEvent, AnimationPlayer};
pub use entity::{DrawSurface, Entity, ImageCatalog, ImageName};
pub use field::ObstacleField;
pub use geom::{Rect, direction_vector, intersect_two_rects, random_int};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleProperties};
pub use rhino::{Rhino, RhinoState};
pub use skier::{Direction, GameKey, Skier, SkierState};
pub use state::{GameEvent, GameState};
pub use tick::{draw, handle_key, tick};
