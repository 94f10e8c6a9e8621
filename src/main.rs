//! Kaiju Climb entry point
//!
//! In the browser this drives the simulation from requestAnimationFrame and
//! hands every frame to the JS presentation layer. Natively it runs a
//! headless autopilot session and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use kaiju_climb::audio::{AudioManager, SoundEffect, SoundSink};
    use kaiju_climb::consts::*;
    use kaiju_climb::{Frame, Settings};
    use kaiju_climb::sim::{GameEvent, GamePhase, GameState, RestartScope, TickInput, tick};

    // Bridge to the JS renderer and synth
    #[wasm_bindgen(inline_js = "
        export function present_frame(frame_json) {
            if (window.kaijuPresent) {
                window.kaijuPresent(JSON.parse(frame_json));
            }
        }

        export function stored_settings() {
            return window.kaijuSettings ? JSON.stringify(window.kaijuSettings) : undefined;
        }

        export function settings_changed(settings_json) {
            if (window.kaijuSettingsChanged) {
                window.kaijuSettingsChanged(JSON.parse(settings_json));
            }
        }

        export function play_cue(name, gain) {
            if (window.kaijuPlayCue) {
                window.kaijuPlayCue(name, gain);
            }
        }
    ")]
    extern "C" {
        fn present_frame(frame_json: &str);
        fn play_cue(name: &str, gain: f32);
        fn stored_settings() -> Option<String>;
        fn settings_changed(settings_json: &str);
    }

    struct JsCueSink;

    impl SoundSink for JsCueSink {
        fn play(&mut self, effect: SoundEffect, gain: f32) {
            play_cue(effect.as_str(), gain);
        }
    }

    /// Keys currently held down
    #[derive(Debug, Default)]
    struct HeldKeys {
        left: bool,
        right: bool,
        up: bool,
        down: bool,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager<JsCueSink>,
        settings: Settings,
        held: HeldKeys,
        // One-shot inputs, consumed by the next tick
        jump_queued: bool,
        pause_queued: bool,
        accumulator: f64,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Result<Self, JsValue> {
            let state = GameState::with_builtin_levels(seed)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            let settings = load_settings();
            Ok(Self {
                state,
                audio: AudioManager::new(JsCueSink, &settings),
                settings,
                held: HeldKeys::default(),
                jump_queued: false,
                pause_queued: false,
                accumulator: 0.0,
                last_time: 0.0,
            })
        }

        fn next_input(&mut self) -> TickInput {
            TickInput {
                left: self.held.left,
                right: self.held.right,
                up: self.held.up,
                down: self.held.down,
                jump: std::mem::take(&mut self.jump_queued),
                pause: std::mem::take(&mut self.pause_queued),
            }
        }

        fn release_keys(&mut self) {
            self.held = HeldKeys::default();
            self.jump_queued = false;
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.audio.apply_settings(&self.settings);
            log::info!("Muted: {muted}");
            match self.settings.to_json() {
                Ok(json) => settings_changed(&json),
                Err(e) => log::warn!("Settings serialization failed: {e}"),
            }
        }

        /// Run simulation ticks for the elapsed frame time
        fn update(&mut self, dt: f64) -> Vec<GameEvent> {
            self.accumulator += dt.min(0.25);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.next_input();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Fell behind; drop the backlog rather than fast-forward
                self.accumulator = 0.0;
            }

            let events = self.state.drain_events();
            self.audio.dispatch(&events);
            events
        }

        fn present(&self, events: &[GameEvent]) {
            match Frame::new(&self.state, events, &self.settings).to_json() {
                Ok(json) => present_frame(&json),
                Err(e) => log::warn!("Frame serialization failed: {e}"),
            }
        }

        /// Update HUD text and overlay visibility in the DOM
        fn update_hud(&self, document: &Document) {
            let state = &self.state;
            set_text(document, "hud-score", &state.score.to_string());
            set_text(document, "hud-lives", &state.lives.to_string());
            set_text(document, "hud-health", &state.player.health.to_string());
            set_text(
                document,
                "hud-level",
                &format!("{} - {}", state.level_index + 1, state.level().name),
            );
            set_text(document, "hud-shield", &seconds(state.player.shield_ticks));
            set_text(document, "hud-speed", &seconds(state.player.speed_ticks));

            set_visible(document, "menu", state.phase == GamePhase::NotStarted);
            set_visible(document, "pause-menu", state.phase == GamePhase::Paused);
            set_visible(document, "game-over", state.phase == GamePhase::GameOver);
            set_visible(document, "victory", state.phase == GamePhase::Victory);
            set_visible(
                document,
                "level-transition",
                matches!(state.phase, GamePhase::LevelTransition { .. }),
            );
        }
    }

    /// Preferences the page handed over, or defaults
    fn load_settings() -> Settings {
        let Some(json) = stored_settings() else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring bad settings: {e}");
            Settings::default()
        })
    }

    /// Buff countdown shown to the player, in whole seconds
    fn seconds(ticks: u32) -> String {
        ticks.div_ceil(TICK_RATE).to_string()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Kaiju Climb starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)?));
        log::info!("Game initialized with seed: {seed}");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_keyboard(&window, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_auto_pause(&window, &document, game.clone())?;

        request_animation_frame(game);
        log::info!("Kaiju Climb running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if matches!(
                    code.as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Space"
                ) {
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                let fresh = !event.repeat();
                match code.as_str() {
                    "ArrowLeft" | "KeyA" => g.held.left = true,
                    "ArrowRight" | "KeyD" => g.held.right = true,
                    "ArrowUp" | "KeyW" => {
                        g.held.up = true;
                        g.jump_queued |= fresh;
                    }
                    "ArrowDown" | "KeyS" => g.held.down = true,
                    "Space" => g.jump_queued |= fresh,
                    "Escape" | "KeyP" if fresh => {
                        if matches!(g.state.phase, GamePhase::Playing | GamePhase::Paused) {
                            g.pause_queued = true;
                        }
                    }
                    "KeyM" if fresh => g.toggle_mute(),
                    "Enter" if fresh => {
                        if g.state.phase == GamePhase::NotStarted || g.state.phase.is_terminal() {
                            g.release_keys();
                            g.state.start_game();
                        }
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" | "KeyA" => g.held.left = false,
                    "ArrowRight" | "KeyD" => g.held.right = false,
                    "ArrowUp" | "KeyW" => g.held.up = false,
                    "ArrowDown" | "KeyS" => g.held.down = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        action: fn(&mut Game),
    ) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{id}");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut());
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        on_click(document, "start-btn", game.clone(), |g| {
            g.release_keys();
            g.state.start_game();
        })?;
        on_click(document, "resume-btn", game.clone(), |g| g.state.resume())?;
        on_click(document, "restart-level-btn", game.clone(), |g| {
            g.release_keys();
            g.state.restart(RestartScope::CurrentLevel);
        })?;
        on_click(document, "restart-btn", game.clone(), |g| {
            g.release_keys();
            g.state.restart(RestartScope::Full);
        })?;
        on_click(document, "quit-btn", game.clone(), |g| g.state.quit_to_menu())?;
        on_click(document, "mute-btn", game, Game::toggle_mute)?;
        Ok(())
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.state.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur: forget held keys so nothing stays stuck
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.release_keys();
                g.audio.set_focused(false);
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_focused(true);
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
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

            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                SIM_DT
            };
            g.last_time = time;

            let events = g.update(dt);
            g.present(&events);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::collections::BTreeMap;

    use kaiju_climb::Settings;
    use kaiju_climb::audio::{AudioManager, SoundEffect, SoundSink};
    use kaiju_climb::consts::TICK_RATE;
    use kaiju_climb::sim::{GameState, TickInput, tick};

    /// Counts cues instead of playing them
    #[derive(Default)]
    struct CueTally(BTreeMap<&'static str, u32>);

    impl SoundSink for CueTally {
        fn play(&mut self, effect: SoundEffect, _gain: f32) {
            *self.0.entry(effect.as_str()).or_default() += 1;
        }
    }

    /// Ten minutes of play at most
    const MAX_TICKS: u64 = 10 * 60 * TICK_RATE as u64;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => 0x5EED,
    };
    log::info!("Kaiju Climb (native) autopilot, seed {seed}");

    let mut state = GameState::with_builtin_levels(seed)?;
    let mut audio = AudioManager::new(CueTally::default(), &Settings::default());
    state.start_game();

    let mut ticks = 0;
    while ticks < MAX_TICKS && !state.phase.is_terminal() {
        let input = TickInput::autopilot(&state);
        tick(&mut state, &input);
        audio.dispatch(&state.drain_events());
        ticks += 1;
    }

    log::info!(
        "Finished after {ticks} ticks: {:?} on level {}/{} ('{}'), score {}, lives {}",
        state.phase,
        state.level_index + 1,
        state.level_count(),
        state.level().name,
        state.score,
        state.lives,
    );
    for (cue, count) in &audio.sink().0 {
        log::info!("  {cue}: {count}");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
