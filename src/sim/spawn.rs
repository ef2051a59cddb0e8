//! Obstacle generation
//!
//! Gate positions come from a seeded PCG stream so a round can be replayed
//! from its seed. Spawning is distance based: a new obstacle appears once
//! the newest one has moved `spacing` pixels in from the right edge.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Obstacle, Viewport};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Seeded obstacle factory
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    seed: u64,
    rng: Pcg32,
}

impl ObstacleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Half-open range of valid gate tops for a surface height
    pub fn gate_range(height: f32, tuning: &Tuning) -> Result<(f32, f32), ConfigError> {
        let min = tuning.min_segment;
        let max = height - tuning.gap - tuning.min_segment;
        // Also rejects NaN and infinite heights
        if !(max > min) || !max.is_finite() {
            return Err(ConfigError::SurfaceTooSmall {
                height,
                required: tuning.min_surface_height(),
            });
        }
        Ok((min, max))
    }

    /// Create an obstacle at the right edge with a random gate.
    ///
    /// The gate top is uniform over `[min_segment, height - gap - min_segment)`
    /// and snapped down to a whole pixel offset from `min_segment`.
    pub fn create_obstacle(
        &mut self,
        viewport: &Viewport,
        tuning: &Tuning,
    ) -> Result<Obstacle, ConfigError> {
        let (min, max) = Self::gate_range(viewport.height, tuning)?;
        let span = max - min;
        let offset = self.rng.random_range(0.0..span).floor();

        Ok(Obstacle::new(viewport.width, min + offset))
    }
}

/// Whether the next obstacle is due
pub fn should_spawn(obstacles: &[Obstacle], viewport: &Viewport, spacing: f32) -> bool {
    match obstacles.last() {
        None => true,
        Some(last) => viewport.width - last.x >= spacing,
    }
}
