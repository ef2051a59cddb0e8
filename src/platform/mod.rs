//! Platform abstraction layer
//!
//! Browser/native differences are kept behind small traits:
//! - `input`: raw pointer/touch/key events to a single trigger
//! - `frame`: frame clock, handler and the injectable scheduler
//! - `hud`: text overlays (score, start and game-over screens)

pub mod frame;
pub mod hud;
pub mod input;

pub use frame::{FrameClock, FrameDriver, FrameHandler, FrameScheduler, ManualScheduler};
pub use hud::{HudElement, Overlay};
pub use input::{InputDispatcher, InputEvent, Trigger};
