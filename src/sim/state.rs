//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first trigger; nothing moves
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Round ended, waiting for a trigger to reset
    Over,
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Avatar left the top of the surface
    Ceiling,
    /// Avatar left the bottom of the surface
    Floor,
    /// Avatar hit an obstacle segment
    Obstacle,
}

/// Events emitted by the state machine, drained by the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u64 },
    Crashed { cause: CrashCause },
    GameOver { score: u64, best: u64, new_record: bool },
    Reset,
}

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner of the collision box; x never changes
    pub pos: Vec2,
    /// Vertical velocity in pixels per frame (negative is up)
    pub velocity: f32,
    /// Collision box
    pub size: Vec2,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.avatar_start,
            velocity: 0.0,
            size: tuning.avatar_size,
        }
    }

    /// Put the avatar back at its spawn point, at rest
    pub fn reset(&mut self, tuning: &Tuning) {
        self.pos = tuning.avatar_start;
        self.velocity = 0.0;
        self.size = tuning.avatar_size;
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// A gated obstacle pair: a segment from the top down to `gate_top` and one
/// from `gate_top + gap` to the bottom of the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Upper edge of the gate
    pub gate_top: f32,
    /// Already counted towards the score
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gate_top: f32) -> Self {
        Self {
            x,
            gate_top,
            passed: false,
        }
    }

    /// Lower edge of the gate
    pub fn gate_bottom(&self, gap: f32) -> f32 {
        self.gate_top + gap
    }

    /// Right edge
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub avatar: Avatar,
    /// Active obstacles, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    /// Score of the current round
    pub score: u64,
    pub viewport: Viewport,
    /// Frames simulated in the current round
    pub frames: u64,
}

impl GameState {
    pub fn new(tuning: &Tuning, viewport: Viewport) -> Self {
        Self {
            phase: GamePhase::Idle,
            avatar: Avatar::new(tuning),
            obstacles: Vec::new(),
            score: 0,
            viewport,
            frames: 0,
        }
    }

    /// Back to the idle screen with a fresh round
    pub fn reset(&mut self, tuning: &Tuning) {
        self.phase = GamePhase::Idle;
        self.avatar.reset(tuning);
        self.obstacles.clear();
        self.score = 0;
        self.frames = 0;
    }
}
