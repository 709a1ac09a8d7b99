//! Dodge Football entry point
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
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use dodge_football::audio::{AudioManager, SoundEffect};
    use dodge_football::consts::*;
    use dodge_football::platform::{KeyCommand, KeyState, LocalStorage, fresh_seed, now_ms};
    use dodge_football::renderer::{RenderState, scene_vertices};
    use dodge_football::sim::GamePhase;
    use dodge_football::ui::{self, Button};
    use dodge_football::{Scene, Session, Settings, Tuning, UiAction};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        render_state: Option<RenderState>,
        settings: Settings,
        audio: AudioManager,
        keys: KeyState,
        accumulator: f32,
        last_time: f64,
        start_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Scene last drawn to the DOM, to detect transitions
        last_scene: Scene,
    }

    impl Game {
        fn new(world: Vec2) -> Self {
            let storage = LocalStorage::open();
            let tuning = Tuning::load(&storage);
            let settings = Settings::load(&storage);
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());

            Self {
                session: Session::new(storage, tuning, world),
                render_state: None,
                settings,
                audio,
                keys: KeyState::new(),
                accumulator: 0.0,
                last_time: 0.0,
                start_time: now_ms(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_scene: Scene::Start,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            if self.session.scene() == Scene::Game {
                self.accumulator += dt.min(0.1);

                let mut substeps = 0;
                while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                    let input = self.keys.take_input();
                    let events = self.session.tick(&input, now_ms());
                    for event in &events {
                        if let Some(effect) = SoundEffect::for_event(event) {
                            self.audio.play(effect);
                        }
                    }
                    self.accumulator -= SIM_DT;
                    substeps += 1;

                    if self.session.scene() != Scene::Game {
                        self.accumulator = 0.0;
                        break;
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Apply a scene button press
        fn apply(&mut self, action: UiAction) {
            if self.session.apply(action, fresh_seed()) {
                self.accumulator = 0.0;
                self.keys.release_all();
                if self.session.scene() == Scene::Game {
                    self.audio.resume();
                    self.audio.play(SoundEffect::Start);
                }
            }
        }

        fn handle_command(&mut self, command: KeyCommand) {
            match command {
                KeyCommand::ToggleMute => {
                    self.settings.toggle_mute();
                    self.audio.set_volume(self.settings.effective_volume());
                    self.save_settings();
                }
                KeyCommand::ToggleFps => {
                    self.settings.toggle_fps();
                    self.save_settings();
                }
                KeyCommand::Pause => {
                    // Only a live run can be paused
                    if self.session.scene() != Scene::Game {
                        self.keys.clear_commands();
                    }
                }
                KeyCommand::ToggleIdle => {}
            }
        }

        fn save_settings(&mut self) {
            if let Err(e) = self.settings.save(self.session.storage_mut()) {
                log::warn!("Failed to save settings: {}", e);
            }
        }

        /// Pause a live run and drop held keys
        fn auto_pause(&mut self, reason: &str) {
            self.keys.release_all();
            let playing = self
                .session
                .game()
                .is_some_and(|g| g.phase == GamePhase::Playing);
            if self.session.scene() == Scene::Game && playing {
                self.keys.request_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = match (self.session.scene(), self.session.game()) {
                (Scene::Game, Some(game)) => {
                    scene_vertices(game, ((time - self.start_time) / 1000.0) as f32)
                }
                _ => Vec::new(),
            };
            match render_state.render(&vertices) {
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

        /// Update overlays in the DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let scene = self.session.scene();

            if scene != self.last_scene {
                if let Scene::GameOver(summary) = scene {
                    set_text(&document, "time-survived", &ui::time_survived(&summary));
                    set_text(&document, "summary-high-score", &ui::summary_high_score(&summary));
                    let rank = ui::rank_line(&summary);
                    set_text(&document, "rank-line", rank.as_deref().unwrap_or(""));
                    set_visible(&document, "rank-line", rank.is_some());
                    if summary.new_best {
                        self.audio.play(SoundEffect::HighScore);
                    }
                }
                set_visible(&document, "start-screen", scene == Scene::Start);
                set_visible(&document, "hud", scene == Scene::Game);
                set_visible(&document, "game-over", matches!(scene, Scene::GameOver(_)));
                log::debug!("Scene: {} -> {}", self.last_scene.name(), scene.name());
                self.last_scene = scene;
            }

            if let (Scene::Game, Some(game)) = (scene, self.session.game()) {
                set_text(&document, "hud-time", &ui::hud_time(game.display_time()));
                set_text(
                    &document,
                    "hud-high-score",
                    &ui::hud_high_score(self.session.run_high_score()),
                );
                set_visible(&document, "pause-overlay", game.phase == GamePhase::Paused);
                set_visible(&document, "idle-badge", self.keys.idle_mode());
            } else {
                set_visible(&document, "pause-overlay", false);
            }

            set_visible(&document, "hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                set_text(&document, "hud-fps", &format!("{} FPS", self.fps));
            }
        }

        fn resize(&mut self, world: Vec2, width: u32, height: u32) {
            self.session.resize(world);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
                render_state.set_world(world);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Size the canvas backing store; returns (world size, pixel width, pixel height)
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Dodge Football starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        let (world, width, height) = fit_canvas(&window, &canvas);
        let game = Rc::new(RefCell::new(Game::new(world)));
        set_text(&document, "title", ui::TITLE);
        set_text(&document, "game-over-title", ui::GAME_OVER);
        set_text(&document, "play-again-btn", ui::PLAY_AGAIN);
        set_text(&document, "exit-btn", ui::EXIT);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, world)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        // Hide loading indicator
        set_visible(&document, "loading", false);
        set_visible(&document, "start-screen", true);

        setup_input_handlers(game.clone());
        setup_button("play-btn", UiAction::Play, game.clone());
        setup_button("play-again-btn", UiAction::PlayAgain, game.clone());
        setup_button("exit-btn", UiAction::Exit, game.clone());
        setup_auto_pause(game.clone());
        setup_resize(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Dodge Football running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                // Keep arrow keys from scrolling the page
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if let Some(command) = g.keys.key_down(&key) {
                    g.handle_command(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire a DOM button to a scene action with hover scaling
    fn setup_button(id: &str, action: UiAction, game: Rc<RefCell<Game>>) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            return;
        };

        // Laid out while hovered; buttons are hidden until their scene shows
        let button = Rc::new(RefCell::new(Button::new(Vec2::ZERO, Vec2::ZERO)));

        {
            let button = button.clone();
            let target = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut b = button.borrow_mut();
                layout_button(&target, &mut b);
                let point = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                if b.track_pointer(point) {
                    apply_scale(&target, &b);
                }
            });
            let _ = el
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let button = button.clone();
            let target = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut b = button.borrow_mut();
                b.pointer_out();
                apply_scale(&target, &b);
            });
            let _ = el
                .add_event_listener_with_callback("pointerout", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let target = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                // The button is hidden once the scene changes
                let mut b = button.borrow_mut();
                b.pointer_out();
                apply_scale(&target, &b);
                drop(b);
                game.borrow_mut().apply(action);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Sync a button's unscaled rectangle from the DOM
    fn layout_button(el: &HtmlElement, button: &mut Button) {
        let rect = el.get_bounding_client_rect();
        let scale = button.scale() as f64;
        button.center = Vec2::new(
            (rect.left() + rect.width() / 2.0) as f32,
            (rect.top() + rect.height() / 2.0) as f32,
        );
        button.size = Vec2::new((rect.width() / scale) as f32, (rect.height() / scale) as f32);
    }

    fn apply_scale(el: &HtmlElement, button: &Button) {
        let _ = el
            .style()
            .set_property("transform", &format!("scale({})", button.scale()));
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.auto_pause("window blur");
                if g.settings.mute_on_blur {
                    g.audio.set_volume(0.0);
                }
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus restores volume
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let volume = g.settings.effective_volume();
                g.audio.set_volume(volume);
            });
            let _ = window
                .add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (world, width, height) = fit_canvas(&window, &canvas);
            game.borrow_mut().resize(world, width, height);
            log::info!("Resized to {}x{}", world.x, world.y);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot run: `dodge-football [--tuning FILE] [--seed N] [--seconds N]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dodge_football::consts::*;
    use dodge_football::platform::{MemoryStorage, fresh_seed, now_ms};
    use dodge_football::sim::{GameEvent, TickInput};
    use dodge_football::{Scene, Session, Tuning, UiAction};
    use glam::Vec2;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dodge Football (native, headless) starting...");

    let mut tuning = Tuning::default();
    let mut seed = fresh_seed();
    let mut seconds: u64 = 300;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let value = args.next();
        match (arg.as_str(), value) {
            ("--tuning", Some(path)) => match std::fs::read_to_string(&path) {
                Ok(json) => match Tuning::from_json(&json) {
                    Ok(t) => tuning = t,
                    Err(e) => log::error!("Bad tuning file {}: {}", path, e),
                },
                Err(e) => log::error!("Can't read {}: {}", path, e),
            },
            ("--seed", Some(v)) => match v.parse() {
                Ok(v) => seed = v,
                Err(e) => log::error!("Bad seed {:?}: {}", v, e),
            },
            ("--seconds", Some(v)) => match v.parse() {
                Ok(v) => seconds = v,
                Err(e) => log::error!("Bad duration {:?}: {}", v, e),
            },
            (other, _) => log::warn!("Ignoring argument {:?}", other),
        }
    }

    let world = Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT);
    let mut session = Session::new(MemoryStorage::new(), tuning, world);
    session.apply(UiAction::Play, seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let max_ticks = (seconds as f32 / SIM_DT) as u64;
    let mut collected = 0u32;
    let mut ticks = 0u64;
    while ticks < max_ticks && session.scene() == Scene::Game {
        for event in session.tick(&input, now_ms()) {
            if let GameEvent::PowerUpCollected { .. } = event {
                collected += 1;
            }
        }
        ticks += 1;
    }

    match session.scene() {
        Scene::GameOver(summary) => println!(
            "Caught after {:.1}s of play: time {} (seed {}, {} power-ups)",
            ticks as f32 * SIM_DT,
            summary.final_time,
            seed,
            collected
        ),
        _ => println!(
            "Still alive after {}s: time {} (seed {}, {} power-ups)",
            seconds,
            session.game().map_or(0, |g| g.display_time()),
            seed,
            collected
        ),
    }
}
