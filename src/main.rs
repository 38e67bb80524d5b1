//! Snack Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, TouchEvent};

    use snack_dash::assets::AssetGate;
    use snack_dash::audio::AudioManager;
    use snack_dash::render::CanvasRenderer;
    use snack_dash::sim::{GameEvent, LoopControl};
    use snack_dash::{Command, Game, HudSink, PlatformError, Settings, Tuning};

    const PLAYER_SPRITE: &str = "assets/player.png";
    const MUSIC_TRACK: &str = "assets/music.wav";
    /// Sprites that must decode before the loop may start
    const REQUIRED_ASSETS: usize = 1;

    /// Score label, game-over panel and audio cues
    struct DomHud {
        document: Document,
        audio: AudioManager,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    impl HudSink for DomHud {
        fn score_changed(&mut self, score: u32) {
            self.set_text("score", &score.to_string());
        }

        fn game_over(&mut self, final_score: u32) {
            self.set_text("final-score", &final_score.to_string());
            self.set_visible("game-over", true);
        }

        fn event(&mut self, event: &GameEvent) {
            self.audio.on_event(event);
        }
    }

    struct App {
        game: Game,
        renderer: CanvasRenderer,
        hud: DomHud,
        gate: AssetGate,
        /// An animation frame is pending
        looping: bool,
    }

    impl App {
        /// Apply a command and refresh the screens it affects
        fn command(&mut self, command: Command) {
            let was_running = self.game.is_running();
            self.game.handle(command, js_sys::Date::now() as u64);
            if self.game.is_running() && !was_running {
                self.hud.set_visible("start-screen", false);
                self.hud.set_visible("game-over", false);
            }
        }
    }

    fn seed() -> u64 {
        js_sys::Date::now() as u64
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| PlatformError::Js(e.to_string()))?;

        log::info!("Snack Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window
            .document()
            .ok_or_else(|| PlatformError::MissingElement("document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or_else(|| PlatformError::MissingElement("game-canvas".into()))?
            .dyn_into()
            .map_err(|_| PlatformError::MissingElement("game-canvas".into()))?;

        let tuning = Tuning::default();
        canvas.set_width(tuning.playfield.x as u32);
        canvas.set_height(tuning.playfield.y as u32);

        let sprite = HtmlImageElement::new().map_err(|e| PlatformError::Js(format!("{:?}", e)))?;
        let renderer = CanvasRenderer::new(&canvas, sprite.clone(), seed())?;
        let audio = AudioManager::new(Settings::load(), MUSIC_TRACK);
        set_mute_label(&document, audio.is_muted());

        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed(), tuning),
            renderer,
            hud: DomHud {
                document: document.clone(),
                audio,
            },
            gate: AssetGate::new(REQUIRED_ASSETS),
            looping: false,
        }));

        setup_asset_loading(&sprite, app.clone());
        setup_buttons(&document, app.clone());
        setup_input_handlers(&canvas, app.clone());

        log::info!("Snack Dash ready");
        Ok(())
    }

    /// Kick off the frame loop if a run is active and no frame is pending
    fn ensure_loop(app: &Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.looping || !a.game.is_running() {
                return;
            }
            a.looping = true;
        }
        request_animation_frame(app.clone());
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let control = {
            let mut a = app.borrow_mut();
            let App {
                game,
                renderer,
                hud,
                ..
            } = &mut *a;
            let control = game.frame(time, renderer, hud);
            if control == LoopControl::Stop {
                a.looping = false;
            }
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
    }

    fn setup_asset_loading(sprite: &HtmlImageElement, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let ready = {
                    let mut a = app.borrow_mut();
                    let ready = a.gate.loaded();
                    let (loaded, total) = a.gate.progress();
                    a.hud.set_text("load-progress", &format!("Loading {}/{}", loaded, total));
                    a.hud.set_visible("load-progress", !a.gate.is_ready());
                    ready
                };
                if let Some(command) = ready {
                    app.borrow_mut().command(command);
                    ensure_loop(&app);
                }
            });
            sprite.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut a = app.borrow_mut();
                a.gate.failed(PLAYER_SPRITE);
                let err = PlatformError::AssetLoad(a.gate.failures().join(", "));
                log::error!("{}", err);
                a.hud.set_text("load-error", &err.to_string());
                a.hud.set_visible("load-progress", false);
                a.hud.set_visible("load-error", true);
            });
            sprite.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        sprite.set_src(PLAYER_SPRITE);
    }

    fn on_click(document: &Document, id: &str, app: Rc<RefCell<App>>, f: fn(&Rc<RefCell<App>>)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| f(&app));
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_mute_label(document: &Document, muted: bool) {
        if let Some(el) = document.get_element_by_id("mute-btn") {
            el.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        on_click(document, "start-btn", app.clone(), |app| {
            {
                let mut a = app.borrow_mut();
                a.hud.audio.start_music();
                a.command(Command::Start);
            }
            ensure_loop(app);
        });
        on_click(document, "restart-btn", app.clone(), |app| {
            app.borrow_mut().command(Command::Restart);
            log::info!("Game restarted");
            ensure_loop(app);
        });
        on_click(document, "mute-btn", app, |app| {
            let mut a = app.borrow_mut();
            let muted = a.hud.audio.toggle_mute();
            set_mute_label(&a.hud.document, muted);
        });
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        app.borrow_mut().command(Command::RequestJump);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().command(Command::RequestJump);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Native runner: plays the simulation without a window using a simple autopilot

    use snack_dash::consts::REFERENCE_FRAME_MS;
    use snack_dash::render::RecordingRenderer;
    use snack_dash::sim::{GameEvent, GameState, LoopControl, ObstacleKind};
    use snack_dash::{Command, Error, Game, HudSink, Tuning};

    /// How far ahead of the player's front edge a crate triggers a jump
    const JUMP_LOOKAHEAD: f32 = 40.0;

    #[derive(Default)]
    struct LogHud {
        collected: u32,
        jumps: u32,
    }

    impl HudSink for LogHud {
        fn score_changed(&mut self, score: u32) {
            log::debug!("Score: {}", score);
        }

        fn game_over(&mut self, final_score: u32) {
            log::info!("Game over! Final score: {}", final_score);
        }

        fn event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Collected { .. } => self.collected += 1,
                GameEvent::Jumped => self.jumps += 1,
                _ => {}
            }
        }
    }

    /// Jump when a crate is about to reach the player
    fn should_jump(state: &GameState) -> bool {
        let front = state.player.pos.x + state.player.size.x;
        state.player.is_grounded()
            && state.obstacles.iter().any(|obs| {
                obs.kind == ObstacleKind::Crate
                    && obs.pos.x + obs.size.x > state.player.pos.x
                    && obs.pos.x - front < JUMP_LOOKAHEAD
            })
    }

    pub fn run() -> Result<(), Error> {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Tuning::default(),
        };
        let max_frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut game = Game::new(seed, tuning);
        game.handle(Command::AllAssetsReady, seed);
        game.handle(Command::Start, seed);

        let mut renderer = RecordingRenderer::default();
        let mut hud = LogHud::default();
        let mut time = 0.0;
        while renderer.frames < max_frames {
            if should_jump(&game.state) {
                game.handle(Command::RequestJump, seed);
            }
            if game.frame(time, &mut renderer, &mut hud) == LoopControl::Stop {
                break;
            }
            time += REFERENCE_FRAME_MS as f64;
        }

        log::info!(
            "Ran {} frames: score {}, {} snacks, {} jumps, phase {:?}",
            renderer.frames,
            game.score(),
            hud.collected,
            hud.jumps,
            game.phase()
        );
        if let Ok(json) = serde_json::to_string(&renderer.last) {
            log::debug!("Last frame: {}", json);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), snack_dash::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Snack Dash (native, headless) starting...");
    log::info!("Run with `trunk serve` for the playable web version");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
