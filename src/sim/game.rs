//! Game state machine
//!
//! `Idle --trigger--> Running --crash--> Over --trigger--> Idle`.
//! Only `Running` simulates; a trigger while running is a flap.

use super::physics::{advance, apply_impulse, collides, out_of_bounds};
use super::spawn::{ObstacleGenerator, should_spawn};
use super::state::{CrashCause, GameEvent, GamePhase, GameState, Viewport};
use crate::error::ConfigError;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// What a trigger means in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Idle -> Running
    Start,
    /// Over -> Idle, fresh round
    Reset,
    /// Flap while running
    Impulse,
}

/// Owns the simulation and everything that mutates it
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    tuning: Tuning,
    generator: ObstacleGenerator,
    high_score: HighScore,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create an idle game. Fails if the tuning is unusable.
    pub fn new(
        tuning: Tuning,
        viewport: Viewport,
        seed: u64,
        high_score: HighScore,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(&tuning, viewport),
            tuning,
            generator: ObstacleGenerator::new(seed),
            high_score,
            events: Vec::new(),
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Best score across rounds
    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Surface was resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.viewport = Viewport::new(width, height);
        if height <= self.tuning.min_surface_height() {
            log::warn!(
                "Surface {}x{} is too small for obstacles (needs height > {})",
                width,
                height,
                self.tuning.min_surface_height()
            );
        }
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The command a trigger maps to right now
    pub fn command_for_trigger(&self) -> Command {
        match self.state.phase {
            GamePhase::Idle => Command::Start,
            GamePhase::Running => Command::Impulse,
            GamePhase::Over => Command::Reset,
        }
    }

    /// Handle the normalized player input
    pub fn on_trigger(&mut self) -> Command {
        let command = self.command_for_trigger();
        self.apply(command);
        command
    }

    /// Apply a command. Commands that don't fit the current phase are ignored;
    /// returns whether the command took effect.
    pub fn apply(&mut self, command: Command) -> bool {
        match (command, self.state.phase) {
            (Command::Start, GamePhase::Idle) => {
                self.state.phase = GamePhase::Running;
                self.events.push(GameEvent::Started);
                log::info!("Round started");
                true
            }
            (Command::Impulse, GamePhase::Running) => {
                apply_impulse(&mut self.state.avatar, &self.tuning);
                self.events.push(GameEvent::Flapped);
                true
            }
            (Command::Reset, GamePhase::Over) => {
                self.state.reset(&self.tuning);
                self.events.push(GameEvent::Reset);
                log::debug!("Round reset");
                true
            }
            _ => false,
        }
    }

    /// Start button: begin the round and flap right away
    pub fn start_and_flap(&mut self) {
        if self.apply(Command::Start) {
            self.apply(Command::Impulse);
        }
    }

    /// Advance the simulation by one frame
    pub fn update(&mut self, dt_ms: f64) -> Result<(), ConfigError> {
        if self.state.phase != GamePhase::Running {
            return Ok(());
        }

        let tuning = &self.tuning;
        let state = &mut self.state;

        // A failed spawn leaves the frame untouched
        let spawned = if should_spawn(&state.obstacles, &state.viewport, tuning.obstacle_spacing) {
            Some(self.generator.create_obstacle(&state.viewport, tuning)?)
        } else {
            None
        };

        state.frames += 1;
        advance(&mut state.avatar, tuning, dt_ms);

        if let Some(obstacle) = spawned {
            log::debug!("Spawned obstacle, gate at {}", obstacle.gate_top);
            state.obstacles.push(obstacle);
        }

        let avatar_left = state.avatar.left();
        for obstacle in &mut state.obstacles {
            obstacle.x -= tuning.obstacle_speed;

            if !obstacle.passed && obstacle.trailing_edge(tuning.obstacle_width) < avatar_left {
                obstacle.passed = true;
                state.score += 1;
                self.events.push(GameEvent::Scored { score: state.score });
                log::debug!("Score: {}", state.score);
            }
        }
        state
            .obstacles
            .retain(|o| o.trailing_edge(tuning.obstacle_width) >= 0.0);

        if let Some(cause) = out_of_bounds(&state.avatar, &state.viewport) {
            self.crash(cause);
            return Ok(());
        }

        if state
            .obstacles
            .iter()
            .any(|o| collides(&state.avatar, o, tuning))
        {
            self.crash(CrashCause::Obstacle);
        }

        Ok(())
    }

    /// Running -> Over, recording the best score once per round
    fn crash(&mut self, cause: CrashCause) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.phase = GamePhase::Over;

        let score = self.state.score;
        let new_record = self.high_score.submit(score);
        let best = self.high_score.best();

        self.events.push(GameEvent::Crashed { cause });
        self.events.push(GameEvent::GameOver {
            score,
            best,
            new_record,
        });
        log::info!(
            "Game over ({:?}) after {} frames: score {}, best {}",
            cause,
            self.state.frames,
            score,
            best
        );
    }
}
