//! The player-controlled skier
//!
//! The skier runs a small state machine: skiing until a solid obstacle is
//! hit, crashed until a left/right input recovers them, and dead for good
//! once the rhino catches up. Movement is frame based; terrain contact can
//! slow, boost, or launch the skier depending on what was hit.

use glam::Vec2;

use super::animation::{Animation, AnimationEvent, AnimationPlayer};
use super::entity::{DrawSurface, Entity, ImageCatalog, ImageName};
use super::field::ObstacleField;
use super::geom::{Rect, intersect_two_rects};
use super::obstacle::{Obstacle, ObstacleKind};
use super::state::GameEvent;
use crate::consts::{DIAGONAL_SPEED_REDUCER, JUMP_FRAME_MS, JUMP_HEIGHT, SKIER_STARTING_SPEED};

/// The five discrete headings, ordered hard-left to hard-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    LeftDown,
    Down,
    RightDown,
    Right,
}

impl Direction {
    const ORDER: [Direction; 5] = [
        Direction::Left,
        Direction::LeftDown,
        Direction::Down,
        Direction::RightDown,
        Direction::Right,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|d| *d == self).unwrap_or(2)
    }

    fn image(self) -> ImageName {
        match self {
            Direction::Left => ImageName::SkierLeft,
            Direction::LeftDown => ImageName::SkierLeftDown,
            Direction::Down => ImageName::SkierDown,
            Direction::RightDown => ImageName::SkierRightDown,
            Direction::Right => ImageName::SkierRight,
        }
    }
}

/// Logical input keys delivered by the shell, one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Up,
    Down,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkierState {
    Skiing,
    Crashed,
    Dead,
}

/// Jump sequence, one-shot
const JUMP_ANIMATION: Animation = Animation::new(
    &[
        ImageName::SkierJump1,
        ImageName::SkierJump2,
        ImageName::SkierJump3,
        ImageName::SkierJump4,
        ImageName::SkierJump5,
    ],
    false,
    JUMP_FRAME_MS,
);

pub struct Skier {
    pos: Vec2,
    image: ImageName,
    state: SkierState,
    direction: Direction,
    speed: f32,
    /// Baseline restored on crash recovery; terrain modifiers rewrite it
    prev_speed: f32,
    /// Height above the snow; > 0 means airborne
    height: f32,
    jump_animation: Option<AnimationPlayer>,
}

impl Skier {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            image: ImageName::SkierDown,
            state: SkierState::Skiing,
            direction: Direction::Down,
            speed: SKIER_STARTING_SPEED,
            prev_speed: SKIER_STARTING_SPEED,
            height: 0.0,
            jump_animation: None,
        }
    }

    pub fn state(&self) -> SkierState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_skiing(&self) -> bool {
        self.state == SkierState::Skiing
    }

    pub fn is_crashed(&self) -> bool {
        self.state == SkierState::Crashed
    }

    pub fn is_dead(&self) -> bool {
        self.state == SkierState::Dead
    }

    pub fn is_airborne(&self) -> bool {
        self.height > 0.0
    }

    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.image = direction.image();
    }

    /// Advance one frame: move, run the jump animation, test for contact.
    /// Does nothing unless the skier is in the skiing state.
    pub fn update(
        &mut self,
        now: f64,
        field: &ObstacleField,
        images: &dyn ImageCatalog,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.is_skiing() {
            return;
        }
        self.move_by_direction();
        self.advance_jump(now);
        self.check_if_hit_obstacle(now, field, images, events);
    }

    /// Per-frame movement for the current heading. Fully horizontal
    /// directions don't drift; they only move on explicit input.
    fn move_by_direction(&mut self) {
        let diagonal = self.speed / DIAGONAL_SPEED_REDUCER;
        match self.direction {
            Direction::LeftDown => {
                self.pos.x -= diagonal;
                self.pos.y += diagonal;
            }
            Direction::Down => {
                self.pos.y += self.speed;
            }
            Direction::RightDown => {
                self.pos.x += diagonal;
                self.pos.y += diagonal;
            }
            Direction::Left | Direction::Right => {}
        }
    }

    /// Handle one logical key. Returns whether the key meant anything, so
    /// the shell knows when to suppress default browser behavior. A dead
    /// skier handles nothing.
    pub fn handle_input(&mut self, key: GameKey, now: f64, events: &mut Vec<GameEvent>) -> bool {
        if self.is_dead() {
            return false;
        }

        match key {
            GameKey::Left => self.turn_left(),
            GameKey::Right => self.turn_right(),
            GameKey::Up => self.turn_up(),
            GameKey::Down => self.turn_down(),
            GameKey::Jump => {
                // Only while skiing on the ground; crashed and mid-air
                // presses are swallowed
                if self.is_skiing() && !self.is_airborne() {
                    self.jump(now, events);
                }
            }
        }
        true
    }

    /// One step toward hard-left, or a sideways nudge once already there.
    /// A crashed skier first recovers facing left.
    fn turn_left(&mut self) {
        if self.is_crashed() {
            self.recover_from_crash(Direction::Left);
        }
        if self.direction == Direction::Left {
            self.pos.x -= SKIER_STARTING_SPEED;
        } else {
            self.set_direction(Direction::ORDER[self.direction.index() - 1]);
        }
    }

    fn turn_right(&mut self) {
        if self.is_crashed() {
            self.recover_from_crash(Direction::Right);
        }
        if self.direction == Direction::Right {
            self.pos.x += SKIER_STARTING_SPEED;
        } else {
            self.set_direction(Direction::ORDER[self.direction.index() + 1]);
        }
    }

    /// Uphill nudge, only meaningful while fully horizontal
    fn turn_up(&mut self) {
        if self.is_crashed() {
            return;
        }
        if self.direction == Direction::Left || self.direction == Direction::Right {
            self.pos.y -= SKIER_STARTING_SPEED;
        }
    }

    /// Face straight downhill. Ignored while crashed so the player has to
    /// turn sideways to get clear of whatever they hit.
    fn turn_down(&mut self) {
        if self.is_crashed() {
            return;
        }
        self.set_direction(Direction::Down);
    }

    /// Launch off the snow and start cycling the jump frames. The audio cue
    /// is fire-and-forget on the shell side.
    fn jump(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::Jumped);
        self.height = JUMP_HEIGHT;
        self.jump_animation = Some(AnimationPlayer::start(JUMP_ANIMATION, now));
    }

    fn advance_jump(&mut self, now: f64) {
        let Some(player) = &mut self.jump_animation else {
            return;
        };
        match player.advance(now) {
            AnimationEvent::Frame(frame) => self.image = frame,
            AnimationEvent::Finished => {
                self.jump_animation = None;
                self.height = 0.0;
                self.image = self.direction.image();
            }
            AnimationEvent::None => {}
        }
    }

    /// The skier's hit-box is their image with the bottom edge raised, so a
    /// crash registers once they visibly overlap the obstacle instead of at
    /// their feet-line.
    pub fn collision_bounds(&self, images: &dyn ImageCatalog) -> Option<Rect> {
        let size = images.size(self.image)?;
        Some(Rect::new(
            self.pos.x - size.x / 2.0,
            self.pos.y - size.y / 2.0,
            self.pos.x + size.x / 2.0,
            self.pos.y - size.y / 4.0,
        ))
    }

    /// Test against every obstacle's full bounds; the first hit wins.
    /// Unloaded images on either side mean no collision this frame.
    fn check_if_hit_obstacle(
        &mut self,
        now: f64,
        field: &ObstacleField,
        images: &dyn ImageCatalog,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(skier_bounds) = self.collision_bounds(images) else {
            return;
        };

        let collision = field.obstacles().iter().find(|obstacle| {
            obstacle
                .bounds(images)
                .is_some_and(|bounds| intersect_two_rects(&skier_bounds, &bounds))
        });

        if let Some(obstacle) = collision {
            self.crash(obstacle.clone(), now, events);
        }
    }

    /// Respond to contact with an obstacle. Airborne skiers clear anything
    /// shorter than their current height.
    pub fn crash(&mut self, obstacle: Obstacle, now: f64, events: &mut Vec<GameEvent>) {
        let props = obstacle.properties();
        if self.height > f32::from(props.height) {
            return;
        }

        match obstacle.kind() {
            ObstacleKind::JumpRamp => {
                self.jump(now, events);
            }
            ObstacleKind::MuddyTerrain => {
                // Sticks until the next crash/boost rewrites the baseline
                self.speed = props.speed_multiplier * SKIER_STARTING_SPEED;
                self.prev_speed = self.speed;
            }
            ObstacleKind::SpeedBoost => {
                // Transient: recovery goes back to the nominal baseline
                self.speed = props.speed_multiplier * SKIER_STARTING_SPEED;
                self.prev_speed = SKIER_STARTING_SPEED;
            }
            // Every solid kind, and anything unclassified, is a wipeout
            _ => self.crash_into_solid(),
        }
    }

    fn crash_into_solid(&mut self) {
        if let Some(player) = &mut self.jump_animation {
            player.cancel();
        }
        self.jump_animation = None;
        self.height = 0.0;
        self.state = SkierState::Crashed;
        self.speed = 0.0;
        self.image = ImageName::SkierCrash;
    }

    /// Back to skiing at the pre-crash speed, facing `direction`
    pub fn recover_from_crash(&mut self, direction: Direction) {
        self.state = SkierState::Skiing;
        self.speed = self.prev_speed;
        self.set_direction(direction);
    }

    /// Terminal. Stops movement and tells the score collaborator to freeze.
    pub fn die(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(player) = &mut self.jump_animation {
            player.cancel();
        }
        self.jump_animation = None;
        self.state = SkierState::Dead;
        self.speed = 0.0;
        events.push(GameEvent::SkierDied);
    }
}

impl Entity for Skier {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn image(&self) -> ImageName {
        self.image
    }

    /// Dead skiers are not drawn (the rhino is busy)
    fn draw(&self, surface: &mut dyn DrawSurface, images: &dyn ImageCatalog, offset: Vec2) {
        if self.is_dead() {
            return;
        }
        if let Some(size) = images.size(self.image) {
            surface.draw_image(self.image, self.pos - size / 2.0 - offset, size);
        }
    }
}
