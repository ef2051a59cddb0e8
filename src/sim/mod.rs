//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Fixed per-frame integration
//! - Seeded RNG only
//! - Obstacles kept in spatial (insertion) order

pub mod game;
pub mod physics;
pub mod spawn;
pub mod state;

pub use game::{Command, Game};
pub use physics::{advance, apply_impulse, collides, out_of_bounds};
pub use spawn::{ObstacleGenerator, should_spawn};
pub use state::{Avatar, CrashCause, GameEvent, GamePhase, GameState, Obstacle, Viewport};
