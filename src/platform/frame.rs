//! Frame driving
//!
//! One update followed by one draw per display refresh. The refresh source
//! is injected through [`FrameScheduler`]: `requestAnimationFrame` in the
//! browser, [`ManualScheduler`] with synthetic timestamps elsewhere.

use std::cell::RefCell;
use std::rc::Rc;

/// Milliseconds elapsed between consecutive frame timestamps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta to the previous timestamp; 0 on the first frame and when the
    /// timestamp goes backwards
    pub fn delta(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last {
            Some(last) if timestamp_ms > last => timestamp_ms - last,
            _ => 0.0,
        };
        self.last = Some(timestamp_ms);
        dt
    }
}

/// Receives the per-frame calls
pub trait FrameHandler {
    fn update(&mut self, dt_ms: f64);
    fn draw(&mut self, time_ms: f64);
}

/// Callback run on the next refresh with its timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Source of display refreshes
pub trait FrameScheduler {
    fn schedule_next_frame(&self, callback: FrameCallback);
}

/// Turns timestamps into update/draw calls
pub struct FrameDriver<H> {
    clock: FrameClock,
    handler: H,
    frames: u64,
}

impl<H: FrameHandler> FrameDriver<H> {
    pub fn new(handler: H) -> Self {
        Self {
            clock: FrameClock::new(),
            handler,
            frames: 0,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        let dt = self.clock.delta(timestamp_ms);
        self.handler.update(dt);
        self.handler.draw(timestamp_ms);
        self.frames += 1;
    }
}

/// Drive `driver` on every refresh from now on, whatever the game phase
pub fn run<H, S>(driver: Rc<RefCell<FrameDriver<H>>>, scheduler: Rc<S>)
where
    H: FrameHandler + 'static,
    S: FrameScheduler + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.schedule_next_frame(Box::new(move |timestamp| {
        driver.borrow_mut().on_frame(timestamp);
        run(driver, next);
    }));
}

/// Scheduler fired by hand, for tests and headless runs
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Option<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Run the pending callback, if any, at `timestamp_ms`
    pub fn fire(&self, timestamp_ms: f64) -> bool {
        let callback = self.pending.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback(timestamp_ms);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_frame(&self, callback: FrameCallback) {
        *self.pending.borrow_mut() = Some(callback);
    }
}

/// `requestAnimationFrame` scheduler
#[cfg(target_arch = "wasm32")]
pub struct AnimationFrameScheduler;

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for AnimationFrameScheduler {
    fn schedule_next_frame(&self, callback: FrameCallback) {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| callback(time));
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed, frame loop stopped");
        }
        closure.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl FrameHandler for Recorder {
        fn update(&mut self, dt_ms: f64) {
            self.calls.push(format!("update {}", dt_ms));
        }

        fn draw(&mut self, time_ms: f64) {
            self.calls.push(format!("draw {}", time_ms));
        }
    }

    #[test]
    fn test_clock_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert_eq!(clock.delta(1016.0), 16.0);
        assert_eq!(clock.delta(1050.0), 34.0);
        assert_eq!(clock.delta(900.0), 0.0);
        assert_eq!(clock.delta(916.0), 16.0);
    }

    #[test]
    fn test_update_before_draw() {
        let mut driver = FrameDriver::new(Recorder::default());
        driver.on_frame(5.0);
        driver.on_frame(21.0);
        assert_eq!(
            driver.handler().calls,
            vec!["update 0", "draw 5", "update 16", "draw 21"]
        );
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn test_run_reschedules_forever() {
        let driver = Rc::new(RefCell::new(FrameDriver::new(Recorder::default())));
        let scheduler = Rc::new(ManualScheduler::new());

        assert!(!scheduler.is_pending());
        run(Rc::clone(&driver), Rc::clone(&scheduler));

        for i in 0..10 {
            assert!(scheduler.is_pending());
            assert!(scheduler.fire(i as f64 * 16.0));
        }
        assert!(scheduler.is_pending());
        assert_eq!(driver.borrow().frames(), 10);
        assert_eq!(driver.borrow().handler().calls[18], "update 16");
    }

    #[test]
    fn test_fire_without_pending_frame() {
        let scheduler = ManualScheduler::new();
        assert!(!scheduler.fire(0.0));
    }
}
