//! Wolf Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use wolf_run::audio::AudioManager;
    use wolf_run::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use wolf_run::persistence::{BestScoreStore, LocalStorageStore};
    use wolf_run::platform::{InputSampler, Key};
    use wolf_run::renderer::{Palette, RenderState};
    use wolf_run::sim::{GameEvent, GamePhase, GameState, PlayField, tick};
    use wolf_run::{Settings, Tuning};

    /// Highest device pixel ratio the backing store is scaled to
    const MAX_DPR: f64 = 2.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: InputSampler,
        store: LocalStorageStore,
        audio: AudioManager,
        settings: Settings,
        palette: Palette,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            let store = LocalStorageStore;
            let best = store.load();
            log::info!("Best score on record: {}", best);
            let state = GameState::with_config(seed, best, PlayField::default(), tuning)
                .unwrap_or_else(|e| {
                    log::warn!("Falling back to default tuning: {e:#}");
                    GameState::new(seed, best)
                });
            Self {
                state,
                render_state: None,
                input: InputSampler::new(),
                store,
                audio: AudioManager::new(&settings),
                palette: Palette::for_contrast(settings.high_contrast),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run exactly one simulation tick and react to what it raised
        fn update(&mut self, time: f64) {
            let input = self.input.sample();
            tick(&mut self.state, &input);

            for event in self.state.drain_events() {
                if let GameEvent::NewBest { best } = event {
                    self.store.save(best);
                }
                self.audio.play_event(&event);
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Flip mute and remember it across page loads
        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            self.settings.save();
            self.audio.apply_settings(&self.settings);
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let snapshot = self.state.snapshot();
            match render_state.render(&snapshot, &self.palette, self.settings.reduced_motion) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Status line under the canvas
        fn status_text(&self) -> String {
            let world = &self.state.world;
            let mut text = format!(
                "Score: {} | Best: {} | Speed: {:.2}",
                world.score, world.best_score, world.speed
            );
            if self.settings.muted {
                text.push_str(" | Muted (M)");
            }
            if self.settings.show_fps {
                text.push_str(&format!(" | {} fps", self.fps));
            }
            let hint = match self.state.phase {
                GamePhase::Start => " | Press Space or tap to start",
                GamePhase::Play => "",
                GamePhase::Pause => " | Paused - press P to resume",
                GamePhase::Over => " | Game over - press R to restart",
            };
            text.push_str(hint);
            text
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("status") {
                el.set_text_content(Some(&self.status_text()));
            }

            // Show/hide restart button
            if let Some(el) = document.get_element_by_id("restart-btn") {
                let class = if self.state.phase == GamePhase::Over {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    /// Find the canvas, creating one inside the mount point if the page has none
    fn mount_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
        if let Some(existing) = document.get_element_by_id("canvas") {
            return existing.dyn_into::<HtmlCanvasElement>().map_err(JsValue::from);
        }

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id("canvas");
        canvas.set_attribute(
            "style",
            &format!(
                "width: 100%; max-width: {}px; aspect-ratio: {} / {}; touch-action: none;",
                FIELD_WIDTH, FIELD_WIDTH, FIELD_HEIGHT
            ),
        )?;

        let mount = match document.get_element_by_id("gameMount") {
            Some(mount) => mount,
            None => document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .into(),
        };
        mount.append_child(&canvas)?;
        Ok(canvas)
    }

    /// Backing store size for the canvas at the current DPR
    fn backing_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .min(MAX_DPR);
        let rect = canvas.get_bounding_client_rect();
        let width = (rect.width() * dpr).max(1.0) as u32;
        let height = (rect.height() * dpr).max(1.0) as u32;
        (width, height)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Wolf Run starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas = mount_canvas(&document)?;
        let (width, height) = backing_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::load();
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, PlayField::default())
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;
        setup_restart_button(&document, game.clone());
        setup_resize(&canvas, game.clone())?;
        setup_auto_pause(&document, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Wolf Run running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let chord = event.ctrl_key() || event.meta_key() || event.alt_key();
                let Some(key) = Key::from_dom_event(&event.key(), chord) else {
                    return;
                };
                if key.scrolls_page() {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                if key == Key::M {
                    if !event.repeat() {
                        g.toggle_mute();
                    }
                    return;
                }
                g.input.key_down(key, event.repeat());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer down (mouse, touch, pen) - jump and start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.pointer_down();
            });
            canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer up / cancel
        for name in ["pointerup", "pointercancel", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.pointer_up();
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.request_restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = backing_size(&canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Pause a running game when the tab is hidden or the window loses focus
    fn auto_pause(game: &Rc<RefCell<Game>>, reason: &str) {
        let mut g = game.borrow_mut();
        g.input.release_all();
        if g.settings.pause_on_blur && g.state.phase == GamePhase::Play {
            g.input.request_pause();
            log::info!("Auto-paused ({})", reason);
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&game, "window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: a simple autopilot plays one seeded run to the end
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use wolf_run::persistence::{BestScoreStore, MemoryStore};
    use wolf_run::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Jump when a spike's leading edge is this close to the wolf
    const JUMP_LOOKAHEAD: f32 = 60.0;
    /// Give up after this many ticks (a perfect autopilot never crashes)
    const MAX_TICKS: u32 = 100_000;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Wolf Run (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    let mut store = MemoryStore::new();
    let mut state = GameState::new(seed, store.load());
    let mut ticks = 0u32;

    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );

    while state.phase == GamePhase::Play && ticks < MAX_TICKS {
        let player = state.player.bounds();
        let jump = state.obstacles.iter().any(|o| {
            let gap = o.pos.x - player.max().x;
            (0.0..JUMP_LOOKAHEAD).contains(&gap)
        });
        tick(
            &mut state,
            &TickInput {
                jump,
                ..Default::default()
            },
        );
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::NewBest { best } => store.save(best),
                GameEvent::SpeedUp { speed } => log::debug!("Speed up to {:.2}", speed),
                _ => {}
            }
        }
    }

    log::info!(
        "Seed {}: {} ticks, score {}, speed {:.2}, best {}",
        seed,
        ticks,
        state.world.score,
        state.world.speed,
        store.load()
    );
}
