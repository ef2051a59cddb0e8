//! Flap Gate - a one-button arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacle generation, collisions, game state machine)
//! - `renderer`: Drawing surface abstraction, scene drawing and the WebGPU backend
//! - `platform`: Input normalization, frame driving and HUD overlays
//! - `persistence`: Best-score storage backends
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, RenderError, StoreError};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Downward acceleration added to the avatar velocity every frame
    pub const GRAVITY: f32 = 0.25;
    /// Velocity set by a flap (negative is up)
    pub const JUMP_VELOCITY: f32 = -5.5;

    /// Vertical size of the gate in every obstacle
    pub const GATE_GAP: f32 = 200.0;
    /// Horizontal size of an obstacle
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Distance from the right edge the newest obstacle must travel before the next spawns
    pub const OBSTACLE_SPACING: f32 = 280.0;
    /// Leftward obstacle movement per frame
    pub const OBSTACLE_SPEED: f32 = 2.0;
    /// Smallest visible length of the upper and lower obstacle segments
    pub const MIN_SEGMENT: f32 = 80.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 80.0;
    pub const AVATAR_START_Y: f32 = 200.0;
    pub const AVATAR_SIZE: f32 = 35.0;

    /// Avatar tilt in radians per unit of velocity (cosmetic)
    pub const TILT_FACTOR: f32 = 0.1;
}
