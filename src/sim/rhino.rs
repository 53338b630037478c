//! The rhino that chases the skier down the mountain
//!
//! Pure pursuit: every tick while running, the rhino re-aims straight at
//! the skier's current position and advances at constant speed. Once the
//! skier is caught the chase is over for good: the rhino eats, then
//! celebrates, and never runs again.

use glam::Vec2;

use super::animation::{Animation, AnimationEvent, AnimationPlayer};
use super::entity::{Entity, ImageCatalog, ImageName};
use super::geom::{direction_vector, intersect_two_rects};
use super::skier::Skier;
use super::state::GameEvent;
use crate::consts::{ANIMATION_FRAME_MS, RHINO_SPEED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhinoState {
    Running,
    Eating,
    Celebrating,
}

const RUN_ANIMATION: Animation = Animation::new(
    &[ImageName::RhinoRun1, ImageName::RhinoRun2],
    true,
    ANIMATION_FRAME_MS,
);

const EAT_ANIMATION: Animation = Animation::new(
    &[
        ImageName::RhinoEat1,
        ImageName::RhinoEat2,
        ImageName::RhinoEat3,
        ImageName::RhinoEat4,
    ],
    false,
    ANIMATION_FRAME_MS,
);

const CELEBRATE_ANIMATION: Animation = Animation::new(
    &[ImageName::RhinoCelebrate1, ImageName::RhinoCelebrate2],
    true,
    ANIMATION_FRAME_MS,
);

pub struct Rhino {
    pos: Vec2,
    image: ImageName,
    state: RhinoState,
    speed: f32,
    animation: AnimationPlayer,
}

impl Rhino {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            image: ImageName::RhinoRun1,
            state: RhinoState::Running,
            speed: RHINO_SPEED,
            animation: AnimationPlayer::start(RUN_ANIMATION, 0.0),
        }
    }

    pub fn state(&self) -> RhinoState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Switch tracked state and swap in that state's animation sequence.
    /// The previous animation is cancelled so it can't fire late.
    pub fn set_state(&mut self, state: RhinoState, now: f64) {
        self.animation.cancel();
        self.state = state;
        let animation = match state {
            RhinoState::Running => RUN_ANIMATION,
            RhinoState::Eating => EAT_ANIMATION,
            RhinoState::Celebrating => CELEBRATE_ANIMATION,
        };
        self.animation = AnimationPlayer::start(animation, now);
    }

    /// Chase while running, stand still while eating/celebrating, always
    /// keep the current animation cycling.
    pub fn update(
        &mut self,
        now: f64,
        skier: &mut Skier,
        images: &dyn ImageCatalog,
        events: &mut Vec<GameEvent>,
    ) {
        if self.state == RhinoState::Running {
            self.move_toward(skier.position());
            if self.caught_skier(skier, images) {
                skier.die(events);
                self.set_state(RhinoState::Eating, now);
            }
        }

        match self.animation.advance(now) {
            AnimationEvent::Frame(frame) => self.image = frame,
            AnimationEvent::Finished => {
                // Only the eat sequence is one-shot
                if self.state == RhinoState::Eating {
                    self.set_state(RhinoState::Celebrating, now);
                }
            }
            AnimationEvent::None => {}
        }
    }

    fn move_toward(&mut self, target: Vec2) {
        let dir = direction_vector(self.pos, target);
        self.pos += dir * self.speed;
    }

    /// Catch policy: visual bounds overlap. Tune the threshold here, not
    /// in the state machine.
    fn caught_skier(&self, skier: &Skier, images: &dyn ImageCatalog) -> bool {
        if skier.is_dead() {
            return false;
        }
        let (Some(mine), Some(theirs)) = (self.bounds(images), skier.bounds(images)) else {
            return false;
        };
        intersect_two_rects(&mine, &theirs)
    }
}

impl Entity for Rhino {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn image(&self) -> ImageName {
        self.image
    }
}
