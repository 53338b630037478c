//! Powder Run - an endless downhill skiing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game core (entities, collisions, obstacle field)
//! - `score`: Run score tracking and persisted high scores
//! - `settings`: User preferences (audio, overlay)
//! - `audio`: Browser audio playback (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod score;
pub mod settings;
pub mod sim;

pub use score::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default game window size (world units == pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// The skier starts a run at this speed. Also the baseline that crash
    /// recovery and terrain speed modifiers are computed from.
    pub const SKIER_STARTING_SPEED: f32 = 10.0;
    /// Hypotenuse scale so diagonal travel keeps the same resultant speed
    pub const DIAGONAL_SPEED_REDUCER: f32 = 1.4142;
    /// Height above ground while airborne. Same unit space as obstacle
    /// height classes, so a class-2 tree cannot be flown over.
    pub const JUMP_HEIGHT: f32 = 2.0;
    /// Per-frame interval of the jump animation (ms)
    pub const JUMP_FRAME_MS: f64 = 100.0;
    /// Per-frame interval of rhino animations (ms)
    pub const ANIMATION_FRAME_MS: f64 = 250.0;

    /// The rhino runs just under the skier's baseline speed
    pub const RHINO_SPEED: f32 = 9.5;
    /// The rhino starts far above and left of the slope
    pub const RHINO_START_X: f32 = -500.0;
    pub const RHINO_START_Y: f32 = -2000.0;

    /// Vertical gap below the skier before the first obstacles appear
    pub const STARTING_OBSTACLE_GAP: f32 = 100.0;
    /// Density reducer: initial obstacle count is viewport area / reducer²
    pub const OBSTACLE_DENSITY_REDUCER: f32 = 300.0;
    /// 1-in-N chance per frame of placing an obstacle in newly exposed terrain
    pub const NEW_OBSTACLE_CHANCE: i32 = 8;
    /// Minimum clearance kept between placed obstacles
    pub const OBSTACLE_PADDING: f32 = 50.0;
    /// Attempts to find an open position before skipping a placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10;
    /// Obstacles are retained this far beyond the viewport before pruning
    pub const PRUNE_MARGIN: f32 = 100.0;
}
