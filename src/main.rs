//! Star Shooter entry point
//!
//! Browser: wires the canvas, DOM HUD and input events to the game and runs
//! the requestAnimationFrame loop. Native: a headless fixed-rate runner with
//! a simple autopilot.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use star_shooter::audio::WebAudio;
    use star_shooter::consts::*;
    use star_shooter::renderer::{HudView, RenderState, Starfield, build_scene};
    use star_shooter::sim::GamePhase;
    use star_shooter::{Game, GameConfig};

    /// Browser-side application state
    struct App {
        game: Game<WebAudio>,
        render_state: Option<RenderState>,
        stars: Starfield,
        canvas: HtmlCanvasElement,
        accumulator: f32,
        last_time: f64,
        // Starfield is reseeded when a run begins
        last_phase: GamePhase,
        last_hud: Option<HudView>,
    }

    impl App {
        fn new(config: GameConfig, seed: u64, canvas: HtmlCanvasElement) -> Self {
            let stars = Starfield::new(config.width, config.height, seed);
            let audio = WebAudio::new(config.audio.clone());
            Self {
                game: Game::new(config, seed, audio),
                render_state: None,
                stars,
                canvas,
                accumulator: 0.0,
                last_time: 0.0,
                last_phase: GamePhase::Idle,
                last_hud: None,
            }
        }

        /// Client X (CSS pixels) to playfield X
        fn to_playfield_x(&self, client_x: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            let width = rect.width() as f32;
            if width <= 0.0 {
                return client_x as f32;
            }
            (client_x as f32 - rect.left() as f32) / width * self.game.config().width
        }

        fn pointer_down(&mut self, client_x: i32) {
            let x = self.to_playfield_x(client_x);
            self.game.audio_mut().resume();
            self.game.pointer_down(x);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.game.frame();
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            let phase = self.game.phase();
            if phase != self.last_phase {
                if phase == GamePhase::Running {
                    let config = self.game.config();
                    self.stars
                        .regenerate(config.width, config.height, js_sys::Date::now() as u64);
                }
                self.last_phase = phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(self.game.state(), self.game.phase(), &self.stars);
            if let Some(ref mut render_state) = self.render_state {
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
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = HudView::new(
                self.game.phase(),
                self.game.state().score,
                self.game.last_reason(),
            );
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score_text()));
                let class = if hud.score.is_some() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("start-prompt") {
                let class = if hud.show_start_prompt { "panel" } else { "panel hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if let Some(panel) = &hud.game_over {
                    let _ = el.set_attribute("class", "panel");
                    if let Some(reason_el) = document.get_element_by_id("game-over-reason") {
                        reason_el.set_text_content(Some(&panel.reason));
                    }
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&panel.final_score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "panel hidden");
                }
            }

            self.last_hud = Some(hud);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Star Shooter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Playfield in CSS pixels, backing store in device pixels
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let dpr = window.device_pixel_ratio();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = GameConfig::default().with_playfield(client_w as f32, client_h as f32);
        let playfield = (config.width, config.height);
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(config, seed, canvas.clone())));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, playfield)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(app);

        log::info!("Star Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                // Keep arrows and space from scrolling the page
                if matches!(code.as_str(), "ArrowLeft" | "ArrowRight" | "Space") {
                    event.prevent_default();
                }
                app.borrow_mut().game.key_down(&code);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let x = a.to_playfield_x(event.client_x());
                a.game.pointer_move(x);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse press: start, restart or fire
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().pointer_down(event.client_x());
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    let x = a.to_playfield_x(touch.client_x());
                    a.game.pointer_move(x);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().pointer_down(touch.client_x());
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window for animation frame");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Star Shooter failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};

    use clap::Parser;
    use star_shooter::consts::SIM_DT;
    use star_shooter::sim::{GameState, TickOutcome};
    use star_shooter::{Game, GameConfig, SilentAudio};

    const DEFAULT_TICK_LIMIT: u64 = 60 * 60 * 5;

    /// Command-line options for the headless runner
    #[derive(Parser, Debug, Clone, PartialEq)]
    #[command(name = "star-shooter")]
    #[command(about = "Headless autopilot run of the star shooter simulation")]
    pub struct RunnerArgs {
        /// Optional JSON game config; missing fields take defaults
        pub config: Option<PathBuf>,
        /// Skip the 60 Hz pacing
        #[arg(long)]
        pub fast: bool,
        /// Stop after this many ticks if the run has not ended
        #[arg(long, default_value_t = DEFAULT_TICK_LIMIT)]
        pub ticks: u64,
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
    }

    /// Where the autopilot steers: under the lowest enemy, else center
    pub fn autopilot_target(state: &GameState, config: &GameConfig) -> f32 {
        state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x)
            .unwrap_or(config.width / 2.0)
    }

    fn load_config(path: Option<&Path>) -> GameConfig {
        let Some(path) = path else {
            return GameConfig::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match GameConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::error!("Invalid config {}: {}; using defaults", path.display(), e);
                    GameConfig::default()
                }
            },
            Err(e) => {
                log::error!("Could not read {}: {}; using defaults", path.display(), e);
                GameConfig::default()
            }
        }
    }

    /// Drive one autopilot run; returns (ticks run, final score)
    pub fn run(args: &RunnerArgs) -> (u64, u64) {
        let config = load_config(args.config.as_deref());
        let mut game = Game::new(config, args.seed, SilentAudio);
        let step = Duration::from_secs_f32(SIM_DT);

        game.pointer_down(game.config().width / 2.0);
        game.key_down("Space");

        let mut ticks = 0;
        while ticks < args.ticks {
            let started = Instant::now();
            let target = autopilot_target(game.state(), game.config());
            game.pointer_move(target);

            let outcome = game.frame();
            ticks += 1;
            if ticks % 600 == 0 {
                log::debug!("tick {}: score {}", ticks, game.state().score);
            }
            if let Some(TickOutcome::GameOver(reason)) = outcome {
                log::info!("Run ended after {} ticks: {}", ticks, reason);
                break;
            }

            if !args.fast {
                if let Some(rest) = step.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        (ticks, game.state().score)
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Shooter (native) starting...");
    log::info!("Headless autopilot run - use `trunk serve` for the playable web version");

    let args = headless::RunnerArgs::parse();

    let (ticks, score) = headless::run(&args);
    log::info!("Final score {} after {} ticks", score, ticks);
    println!("score: {score} ticks: {ticks}");
}
