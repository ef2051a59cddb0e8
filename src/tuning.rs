//! Data-driven game balance
//!
//! Every gameplay number lives here so a build can be rebalanced without
//! touching the simulation. An optional JSON override is read from
//! LocalStorage on the web.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay constants consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to the avatar velocity once per frame
    pub gravity: f32,
    /// Velocity set by a flap (must be negative)
    pub jump_velocity: f32,
    /// Gate height
    pub gap: f32,
    pub obstacle_width: f32,
    pub obstacle_spacing: f32,
    /// Obstacle movement per frame
    pub obstacle_speed: f32,
    /// Minimum length of each obstacle segment
    pub min_segment: f32,
    /// Avatar spawn position (x stays fixed for the whole round)
    pub avatar_start: Vec2,
    pub avatar_size: Vec2,
    /// Cosmetic avatar rotation per unit of velocity
    pub tilt_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            gap: GATE_GAP,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_speed: OBSTACLE_SPEED,
            min_segment: MIN_SEGMENT,
            avatar_start: Vec2::new(AVATAR_X, AVATAR_START_Y),
            avatar_size: Vec2::splat(AVATAR_SIZE),
            tilt_factor: TILT_FACTOR,
        }
    }
}

impl Tuning {
    /// Smallest surface height that still leaves room for a gate
    pub fn min_surface_height(&self) -> f32 {
        self.gap + 2.0 * self.min_segment
    }

    /// Reject numbers that would break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::InvalidTuning { field, reason });

        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return invalid("gravity", "must be finite and non-negative");
        }
        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            return invalid("jump_velocity", "must be finite and negative (upward)");
        }
        if !positive(self.gap) {
            return invalid("gap", "must be finite and positive");
        }
        if !positive(self.obstacle_width) {
            return invalid("obstacle_width", "must be finite and positive");
        }
        if !positive(self.obstacle_spacing) {
            return invalid("obstacle_spacing", "must be finite and positive");
        }
        if !positive(self.obstacle_speed) {
            return invalid("obstacle_speed", "must be finite and positive");
        }
        if !(self.min_segment.is_finite() && self.min_segment >= 0.0) {
            return invalid("min_segment", "must be finite and non-negative");
        }
        if !self.avatar_start.is_finite() {
            return invalid("avatar_start", "must be finite");
        }
        if !(positive(self.avatar_size.x) && positive(self.avatar_size.y)) {
            return invalid("avatar_size", "must be finite and positive");
        }
        if !self.tilt_factor.is_finite() {
            return invalid("tilt_factor", "must be finite");
        }
        Ok(())
    }

    /// LocalStorage key for the JSON override
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flap_gate_tuning";

    /// Parse a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => match tuning.validate() {
                        Ok(()) => {
                            log::info!("Loaded tuning override from LocalStorage");
                            return tuning;
                        }
                        Err(e) => log::warn!("Ignoring tuning override: {}", e),
                    },
                    Err(e) => log::warn!("Ignoring unreadable tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.min_surface_height(), 360.0);
    }

    #[test]
    fn test_rejects_downward_jump() {
        let tuning = Tuning {
            jump_velocity: 3.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::InvalidTuning {
                field: "jump_velocity",
                reason: "must be finite and negative (upward)",
            })
        );
    }

    #[test]
    fn test_rejects_nan_gap() {
        let tuning = Tuning {
            gap: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_infinite_values() {
        let field_of = |tuning: Tuning| match tuning.validate() {
            Err(ConfigError::InvalidTuning { field, .. }) => field,
            other => panic!("expected invalid tuning, got {:?}", other),
        };

        assert_eq!(
            field_of(Tuning {
                gap: f32::INFINITY,
                ..Default::default()
            }),
            "gap"
        );
        assert_eq!(
            field_of(Tuning {
                obstacle_spacing: f32::INFINITY,
                ..Default::default()
            }),
            "obstacle_spacing"
        );
        assert_eq!(
            field_of(Tuning {
                avatar_start: Vec2::new(80.0, f32::NEG_INFINITY),
                ..Default::default()
            }),
            "avatar_start"
        );
        assert_eq!(
            field_of(Tuning {
                min_segment: f32::INFINITY,
                ..Default::default()
            }),
            "min_segment"
        );
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "gap": 150.0, "obstacle_speed": 3.0 }"#).unwrap();
        assert_eq!(tuning.gap, 150.0);
        assert_eq!(tuning.obstacle_speed, 3.0);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.avatar_start, Vec2::new(AVATAR_X, AVATAR_START_Y));
    }
}
