//! Avatar integration and collision checks
//!
//! Integration is a fixed increment per frame: gravity is added to the
//! velocity and the velocity to the position once per call, whatever the
//! frame time. Collision boxes are axis-aligned; the avatar's cosmetic tilt
//! is ignored.

use super::state::{Avatar, CrashCause, Obstacle, Viewport};
use crate::tuning::Tuning;

/// Advance the avatar by one frame. `_dt_ms` is not used by the fixed-step
/// integration.
pub fn advance(avatar: &mut Avatar, tuning: &Tuning, _dt_ms: f64) {
    avatar.velocity += tuning.gravity;
    avatar.pos.y += avatar.velocity;
}

/// Flap: replace the velocity with the jump velocity
pub fn apply_impulse(avatar: &mut Avatar, tuning: &Tuning) {
    avatar.velocity = tuning.jump_velocity;
}

/// Whether the avatar overlaps either segment of the obstacle
pub fn collides(avatar: &Avatar, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let overlaps_x = avatar.right() > obstacle.x
        && avatar.left() < obstacle.trailing_edge(tuning.obstacle_width);
    if !overlaps_x {
        return false;
    }
    avatar.top() < obstacle.gate_top || avatar.bottom() > obstacle.gate_bottom(tuning.gap)
}

/// Which surface edge the avatar left, if any
pub fn out_of_bounds(avatar: &Avatar, viewport: &Viewport) -> Option<CrashCause> {
    if avatar.top() < 0.0 {
        Some(CrashCause::Ceiling)
    } else if avatar.bottom() > viewport.height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}
