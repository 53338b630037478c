//! Frame-cycling sprite animations
//!
//! Animations are explicit cancellable tasks driven by game time, not
//! free-running timers: the owner starts a player, feeds it the current
//! timestamp every tick, and cancels it on any state change that
//! invalidates the in-flight sequence (crash, death, restart). A cancelled
//! player never yields another frame, so there is no dangling callback to
//! mutate state later.

use super::entity::ImageName;

/// A fixed sprite sequence with a per-frame interval.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    frames: &'static [ImageName],
    looping: bool,
    frame_ms: f64,
}

impl Animation {
    pub const fn new(frames: &'static [ImageName], looping: bool, frame_ms: f64) -> Self {
        Self {
            frames,
            looping,
            frame_ms,
        }
    }

    pub fn frames(&self) -> &'static [ImageName] {
        self.frames
    }

    pub fn looping(&self) -> bool {
        self.looping
    }
}

/// What an [`AnimationPlayer::advance`] call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// Nothing to do this tick
    None,
    /// Display a new frame
    Frame(ImageName),
    /// A one-shot sequence completed; the owner applies its completion
    /// behavior (looping sequences never finish)
    Finished,
}

/// Handle to an in-flight animation.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    animation: Animation,
    next_frame: usize,
    last_frame_at: f64,
    cancelled: bool,
    finished: bool,
}

impl AnimationPlayer {
    /// Start playing at `now`; the first frame is yielded one interval later
    pub fn start(animation: Animation, now: f64) -> Self {
        Self {
            animation,
            next_frame: 0,
            last_frame_at: now,
            cancelled: false,
            finished: false,
        }
    }

    /// Stop the animation. Idempotent; a cancelled player yields nothing.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled && !self.finished
    }

    /// Step the animation forward to `now`.
    pub fn advance(&mut self, now: f64) -> AnimationEvent {
        if !self.is_active() || self.animation.frames.is_empty() {
            return AnimationEvent::None;
        }
        if now - self.last_frame_at < self.animation.frame_ms {
            return AnimationEvent::None;
        }
        self.last_frame_at = now;

        let frame = self.animation.frames[self.next_frame];
        self.next_frame += 1;
        if self.next_frame >= self.animation.frames.len() {
            if self.animation.looping {
                self.next_frame = 0;
            } else {
                self.finished = true;
                return AnimationEvent::Finished;
            }
        }
        AnimationEvent::Frame(frame)
    }
}
