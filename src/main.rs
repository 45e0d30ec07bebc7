//! Astro Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use astro_dodge::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use astro_dodge::platform::web::AnimationFrames;
    use astro_dodge::platform::{FrameControl, FrameScheduler};
    use astro_dodge::renderer::{RenderState, build_frame, format_elapsed};
    use astro_dodge::sim::GamePhase;
    use astro_dodge::{InputCell, Session, Tuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: Rc<InputCell>,
        scheduler: FrameScheduler<AnimationFrames>,
        /// None until the GPU is ready; frames still tick without it
        render_state: Option<RenderState>,
        /// Jitter for asteroid detail strokes, separate from the sim RNG
        paint_rng: Pcg32,
    }

    impl Game {
        fn is_running(&self) -> bool {
            self.session.phase() == GamePhase::Running
        }

        /// Begin a new run and start pulling frames
        fn start(&mut self) {
            let now = js_sys::Date::now();
            self.session.restart_with_seed(now as u64, now);
            set_overlay_visible(false);
            self.scheduler.start();
        }

        /// Pick up a run whose frame loop was stopped while the page was hidden
        fn resume(&mut self) {
            if self.is_running() && !self.scheduler.is_running() {
                log::info!("Frame loop resumed");
                self.scheduler.start();
            }
        }

        /// One scheduled frame: step the sim, then paint
        fn frame(&mut self) {
            let Self {
                session,
                input,
                scheduler,
                render_state,
                paint_rng,
            } = self;

            scheduler.on_frame(|| {
                let phase = session.advance(input.snapshot(), js_sys::Date::now());

                let frame = build_frame(session.state(), paint_rng);
                set_text("hud-time", &frame.timer_label);

                if let Some(render_state) = render_state.as_mut() {
                    match render_state.render(&frame) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of memory!");
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }

                if phase == GamePhase::Running {
                    FrameControl::Continue
                } else {
                    FrameControl::Stop
                }
            });
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_overlay_visible(visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("overlay")) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Astro Dodge starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let mut session = Session::new(seed, tuning);
        session.set_game_over_listener(|outcome| {
            set_text("final-time", &format_elapsed(outcome.elapsed_ms));
            set_text("overlay-action", "Press SPACE to play again");
            set_overlay_visible(true);
        });

        let frames = AnimationFrames::new();
        let game = Rc::new(RefCell::new(Game {
            session,
            input: Rc::new(InputCell::new()),
            scheduler: FrameScheduler::new(frames.clone()),
            render_state: None,
            paint_rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
        }));

        {
            let game = game.clone();
            frames.set_callback(move |_time: f64| game.borrow_mut().frame());
        }

        setup_input_handlers(game.clone());
        setup_teardown(game.clone());

        // Frames run without a render target until the GPU is ready
        match init_renderer(canvas).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::error!("WebGPU unavailable; running without rendering"),
        }

        log::info!("Astro Dodge ready (seed {})", seed);
    }

    async fn init_renderer(canvas: HtmlCanvasElement) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| log::error!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, FIELD_WIDTH as u32, FIELD_HEIGHT as u32)
            .await
            .map_err(|e| log::error!("Failed to create device: {}", e))
            .ok()
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let input = game.borrow().input.clone();

        // Key down: movement keys update the input cell, space starts a run
        {
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let name = event.key().to_lowercase();
                if input.key_down(&name) {
                    event.prevent_default();
                    return;
                }
                if name == " " {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    if g.is_running() {
                        g.resume();
                    } else {
                        g.start();
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                input.key_up(&event.key().to_lowercase());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop requesting frames when the page goes away, resume when it returns
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.scheduler.stop();
                // Key-up events are lost while hidden
                g.input.clear();
                log::info!("Frame loop cancelled (page hidden)");
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restored from the back/forward cache with the run still in progress
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resume();
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Astro Dodge (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` to play");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session driven by a simulated 60 Hz clock, no input held
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use astro_dodge::platform::{FrameControl, FrameScheduler, ManualFrames};
    use astro_dodge::renderer::{build_frame, format_elapsed};
    use astro_dodge::sim::GamePhase;
    use astro_dodge::{InputCell, Session, Tuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of frames
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    pub fn run() {
        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            });

        let mut session = Session::new(seed, Tuning::load());
        session.set_game_over_listener(|outcome| {
            println!("Game over! Survived {}", format_elapsed(outcome.elapsed_ms));
        });

        let input = InputCell::new();
        let mut paint_rng = Pcg32::seed_from_u64(seed);
        let mut scheduler = FrameScheduler::new(ManualFrames::new());
        let mut now = 0.0;

        session.start(now);
        scheduler.start();

        while scheduler.has_pending() {
            now += FRAME_MS;
            scheduler.on_frame(|| {
                let phase = session.advance(input.snapshot(), now);
                let frame = build_frame(session.state(), &mut paint_rng);
                log::trace!(
                    "t={} asteroids={} vertices={}",
                    frame.timer_label,
                    session.state().obstacles.len(),
                    frame.vertices.len()
                );
                if phase == GamePhase::Running {
                    FrameControl::Continue
                } else {
                    FrameControl::Stop
                }
            });

            if scheduler.frames() >= MAX_FRAMES {
                log::warn!("Stopping after {} frames without a collision", MAX_FRAMES);
                scheduler.stop();
            }
        }

        log::info!(
            "Seed {} ran {} ticks",
            session.seed(),
            session.state().ticks
        );
    }
}
