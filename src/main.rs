//! Flap Gate entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flap_gate::error::{ConfigError, RenderError};
    use flap_gate::highscores::HighScore;
    use flap_gate::persistence::LocalStorageStore;
    use flap_gate::platform::frame::{AnimationFrameScheduler, run as run_frames};
    use flap_gate::platform::hud::{self, DomOverlay};
    use flap_gate::platform::{FrameDriver, FrameHandler, InputDispatcher, InputEvent};
    use flap_gate::renderer::{RenderState, Surface, Tessellator, draw_frame};
    use flap_gate::sim::{Command, Game, GameEvent, Viewport};
    use flap_gate::{Settings, Tuning};

    type Driver = Rc<RefCell<FrameDriver<App>>>;

    /// Everything one page owns
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        tessellator: Tessellator,
        overlay: DomOverlay,
        settings: Settings,
        dispatcher: InputDispatcher,
        /// Last simulation failure, logged once
        halted: Option<ConfigError>,
    }

    impl App {
        /// Canvas changed size: `css` is the logical size, `dpr` the pixel ratio
        fn resize(&mut self, css: Vec2, dpr: f64) {
            self.game.resize(css.x, css.y);
            self.tessellator.resize(css.x, css.y);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(
                    (css.x as f64 * dpr) as u32,
                    (css.y as f64 * dpr) as u32,
                );
            }
        }

        fn handle_input(&mut self, event: &InputEvent) -> bool {
            self.dispatcher.dispatch(&mut self.game, event).is_some()
        }

        fn log_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::GameOver {
                        new_record: true,
                        score,
                        ..
                    } => log::info!("New high score: {}", score),
                    GameEvent::Reset => self.halted = None,
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }

    impl FrameHandler for App {
        fn update(&mut self, dt_ms: f64) {
            if let Err(e) = self.game.update(dt_ms) {
                if self.halted.as_ref() != Some(&e) {
                    log::error!("Simulation halted: {}", e);
                    self.halted = Some(e);
                }
            }
            self.log_events();
        }

        fn draw(&mut self, time_ms: f64) {
            draw_frame(
                &mut self.tessellator,
                &self.game.state,
                self.game.tuning(),
                &self.settings,
                time_ms,
            );

            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(
                    self.tessellator.vertices(),
                    self.tessellator.size(),
                    self.tessellator.clear_color(),
                ) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            hud::sync(&mut self.overlay, &self.game.state, self.game.high_score());
        }
    }

    fn canvas_size(canvas: &HtmlCanvasElement) -> Vec2 {
        Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32)
    }

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    async fn init_gpu(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    fn open_high_score() -> HighScore {
        match LocalStorageStore::open(LocalStorageStore::DEFAULT_KEY) {
            Ok(store) => HighScore::load(Box::new(store)),
            Err(e) => {
                log::warn!("High score will not persist: {}", e);
                HighScore::in_memory()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        log::info!("Flap Gate starting...");

        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_error("no canvas"))?
            .dyn_into()?;

        // Backbuffer in device pixels, game in CSS pixels
        let dpr = window.device_pixel_ratio();
        let css = canvas_size(&canvas);
        let width = (css.x as f64 * dpr) as u32;
        let height = (css.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::load();
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(tuning, Viewport::new(css.x, css.y), seed, open_high_score())
            .map_err(|e| {
                log::error!("Cannot start: {}", e);
                js_error(e)
            })?;

        log::info!("Game initialized with seed: {}", game.seed());

        let render_state = match init_gpu(&canvas, width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("WebGPU unavailable, nothing will be drawn: {}", e);
                None
            }
        };

        let app = App {
            game,
            render_state,
            tessellator: Tessellator::new(css.x, css.y, settings.quality.circle_segments()),
            overlay: DomOverlay::new(document.clone()),
            settings,
            dispatcher: InputDispatcher::default(),
            halted: None,
        };
        let driver: Driver = Rc::new(RefCell::new(FrameDriver::new(app)));

        setup_input_handlers(&canvas, driver.clone())?;
        setup_buttons(&document, driver.clone())?;
        setup_resize(&canvas, driver.clone())?;

        run_frames(driver, Rc::new(AnimationFrameScheduler));

        log::info!("Flap Gate running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, driver: Driver) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;

        // Mouse down
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if driver
                    .borrow_mut()
                    .handler_mut()
                    .handle_input(&InputEvent::PointerDown)
                {
                    event.prevent_default();
                }
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start; not passive so the synthetic mouse events and scrolling are suppressed
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                driver
                    .borrow_mut()
                    .handler_mut()
                    .handle_input(&InputEvent::TouchStart);
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = InputEvent::KeyDown { code: event.code() };
                if driver.borrow_mut().handler_mut().handle_input(&input) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &web_sys::Document, driver: Driver) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                driver.borrow_mut().handler_mut().game.start_and_flap();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                driver.borrow_mut().handler_mut().game.apply(Command::Reset);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(canvas: &HtmlCanvasElement, driver: Driver) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let canvas = canvas.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let css = canvas_size(&canvas);
            canvas.set_width((css.x as f64 * dpr) as u32);
            canvas.set_height((css.y as f64 * dpr) as u32);
            driver.borrow_mut().handler_mut().resize(css, dpr);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Headless round flown by a simple autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use flap_gate::error::ConfigError;
    use flap_gate::highscores::HighScore;
    use flap_gate::persistence::MemoryStore;
    use flap_gate::platform::frame::run;
    use flap_gate::platform::{
        FrameDriver, FrameHandler, InputDispatcher, InputEvent, ManualScheduler,
    };
    use flap_gate::renderer::{Tessellator, draw_frame};
    use flap_gate::sim::{Game, GamePhase, Viewport};
    use flap_gate::{Settings, Tuning};

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes at 60 Hz
    const MAX_FRAMES: u64 = 60 * 120;

    struct Autopilot {
        game: Game,
        dispatcher: InputDispatcher,
        tessellator: Tessellator,
        settings: Settings,
        error: Option<ConfigError>,
        max_vertices: usize,
    }

    impl Autopilot {
        /// Vertical position to aim for: the next gate's centre, or mid-screen
        fn target_y(&self) -> f32 {
            let state = &self.game.state;
            let tuning = self.game.tuning();
            state
                .obstacles
                .iter()
                .find(|o| o.trailing_edge(tuning.obstacle_width) >= state.avatar.left())
                .map(|o| o.gate_top + tuning.gap / 2.0)
                .unwrap_or(state.viewport.height / 2.0)
        }
    }

    impl FrameHandler for Autopilot {
        fn update(&mut self, dt_ms: f64) {
            let avatar = &self.game.state.avatar;
            let sinking = avatar.velocity >= 0.0 && avatar.center().y > self.target_y() + 10.0;
            if self.game.phase() == GamePhase::Idle || sinking {
                self.dispatcher
                    .dispatch(&mut self.game, &InputEvent::PointerDown);
            }

            if let Err(e) = self.game.update(dt_ms) {
                self.error = Some(e);
            }
            for event in self.game.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        fn draw(&mut self, time_ms: f64) {
            draw_frame(
                &mut self.tessellator,
                &self.game.state,
                self.game.tuning(),
                &self.settings,
                time_ms,
            );
            self.max_vertices = self.max_vertices.max(self.tessellator.vertices().len());
        }
    }

    pub fn run_round(seed: u64) -> Result<(), ConfigError> {
        let settings = Settings::load();
        let high_score = HighScore::load(Box::new(MemoryStore::new()));
        let game = Game::new(Tuning::load(), Viewport::new(WIDTH, HEIGHT), seed, high_score)?;

        let pilot = Autopilot {
            game,
            dispatcher: InputDispatcher::default(),
            tessellator: Tessellator::new(WIDTH, HEIGHT, settings.quality.circle_segments()),
            settings,
            error: None,
            max_vertices: 0,
        };
        let driver = Rc::new(RefCell::new(FrameDriver::new(pilot)));
        let scheduler = Rc::new(ManualScheduler::new());
        run(Rc::clone(&driver), Rc::clone(&scheduler));

        let mut frame = 0;
        while frame < MAX_FRAMES {
            scheduler.fire(frame as f64 * FRAME_MS);
            frame += 1;

            let driver = driver.borrow();
            let pilot = driver.handler();
            if pilot.error.is_some() || pilot.game.phase() == GamePhase::Over {
                break;
            }
        }

        let driver = driver.borrow();
        let pilot = driver.handler();
        if let Some(e) = &pilot.error {
            return Err(e.clone());
        }

        let state = &pilot.game.state;
        log::info!(
            "Round finished after {} frames ({:?}), peak {} vertices",
            state.frames,
            state.phase,
            pilot.max_vertices
        );
        println!(
            "seed {}: score {} (best {}) in {} frames",
            pilot.game.seed(),
            state.score,
            pilot.game.high_score(),
            state.frames
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flap Gate (native) starting...");
    log::info!("Native mode runs a headless autopilot round - run with `trunk serve` for web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    if let Err(e) = headless::run_round(seed) {
        log::error!("Round aborted: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
