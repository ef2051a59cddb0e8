//! Input normalization
//!
//! Pointer-down, touch-start and the trigger key all mean the same thing:
//! one trigger for the state machine. Events are applied the moment they
//! are dispatched, never queued.

use crate::sim::{Command, Game};

/// Raw input as delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown,
    TouchStart,
    /// Physical key code, e.g. `"Space"`
    KeyDown { code: String },
}

/// The single normalized action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger;

/// Maps raw input to triggers
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    trigger_key: String,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl InputDispatcher {
    pub const DEFAULT_KEY: &'static str = "Space";

    pub fn new(trigger_key: &str) -> Self {
        Self {
            trigger_key: trigger_key.to_string(),
        }
    }

    /// Whether the event is a trigger
    pub fn normalize(&self, event: &InputEvent) -> Option<Trigger> {
        match event {
            InputEvent::PointerDown | InputEvent::TouchStart => Some(Trigger),
            InputEvent::KeyDown { code } if *code == self.trigger_key => Some(Trigger),
            InputEvent::KeyDown { .. } => None,
        }
    }

    /// Feed an event to the game. Returns the command it produced, or `None`
    /// if the event was not ours (the platform default should then run).
    pub fn dispatch(&self, game: &mut Game, event: &InputEvent) -> Option<Command> {
        self.normalize(event)?;
        let command = game.on_trigger();
        log::trace!("{:?} -> {:?}", event, command);
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::sim::{GamePhase, Viewport};
    use crate::tuning::Tuning;

    fn game() -> Game {
        Game::new(
            Tuning::default(),
            Viewport::new(800.0, 600.0),
            5,
            HighScore::in_memory(),
        )
        .unwrap()
    }

    fn key(code: &str) -> InputEvent {
        InputEvent::KeyDown {
            code: code.to_string(),
        }
    }

    #[test]
    fn test_normalize() {
        let dispatcher = InputDispatcher::default();
        assert_eq!(dispatcher.normalize(&InputEvent::PointerDown), Some(Trigger));
        assert_eq!(dispatcher.normalize(&InputEvent::TouchStart), Some(Trigger));
        assert_eq!(dispatcher.normalize(&key("Space")), Some(Trigger));
        assert_eq!(dispatcher.normalize(&key("KeyA")), None);
    }

    #[test]
    fn test_custom_key() {
        let dispatcher = InputDispatcher::new("ArrowUp");
        assert_eq!(dispatcher.normalize(&key("ArrowUp")), Some(Trigger));
        assert_eq!(dispatcher.normalize(&key("Space")), None);
    }

    #[test]
    fn test_dispatch_routes_by_phase() {
        let dispatcher = InputDispatcher::default();
        let mut game = game();

        assert_eq!(
            dispatcher.dispatch(&mut game, &InputEvent::TouchStart),
            Some(Command::Start)
        );
        assert_eq!(
            dispatcher.dispatch(&mut game, &key("Space")),
            Some(Command::Impulse)
        );
        assert_eq!(dispatcher.dispatch(&mut game, &key("Enter")), None);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_pointer_and_touch_consumed_in_every_phase() {
        let dispatcher = InputDispatcher::default();
        let mut game = game();

        for event in [InputEvent::PointerDown, InputEvent::TouchStart] {
            game.state.phase = GamePhase::Idle;
            assert_eq!(dispatcher.dispatch(&mut game, &event), Some(Command::Start));
            assert_eq!(dispatcher.dispatch(&mut game, &event), Some(Command::Impulse));
            game.state.phase = GamePhase::Over;
            assert_eq!(dispatcher.dispatch(&mut game, &event), Some(Command::Reset));
        }
        // Other keys keep their default behaviour
        assert_eq!(dispatcher.dispatch(&mut game, &key("Tab")), None);
    }

    #[test]
    fn test_burst_of_triggers_between_frames() {
        let dispatcher = InputDispatcher::default();
        let mut game = game();

        // Mouse and touch fire together on some devices
        for _ in 0..5 {
            dispatcher.dispatch(&mut game, &InputEvent::PointerDown);
            dispatcher.dispatch(&mut game, &InputEvent::TouchStart);
        }
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.state.avatar.velocity, -5.5);

        game.update(16.0).unwrap();
        assert_eq!(game.state.avatar.velocity, -5.25);
    }
}
