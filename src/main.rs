//! Grid Chase entry point
//!
//! On wasm: a Canvas 2D front-end driven by one `setInterval` timer.
//! On native: a headless demo where a seeded autopilot plays the game.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use grid_chase::audio::{AudioManager, SoundEffect};
    use grid_chase::persistence::LocalStorageStore;
    use grid_chase::render::{Color, DOT_RADIUS, DrawCmd, Scene};
    use grid_chase::sim::GameEvent;
    use grid_chase::{GameSession, Settings};

    /// Game instance holding all state
    struct Game {
        session: GameSession<LocalStorageStore>,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn handle_events(&self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::CellClaimed { .. } | GameEvent::RoundReset => {}
                    other => log::info!("{:?}", other),
                }
            }
            for effect in SoundEffect::for_events(events) {
                self.audio.play(effect);
            }
        }

        /// Apply a play/pause change: music follows the timer
        fn on_control(&mut self) {
            self.audio.sync_music(!self.session.is_paused());
            self.draw();
        }

        fn toggle_mute(&mut self) {
            self.session.toggle_mute();
            let settings = self.session.settings();
            let (sfx, music) = (settings.effective_volume(), settings.effective_music_volume());
            self.audio.set_volume(sfx);
            self.audio.set_music_volume(music);
            self.draw();
        }

        fn on_tick(&mut self) {
            let events = self.session.tick();
            self.handle_events(&events);
            if self.session.is_paused() {
                // Stopped after a round
                self.audio.sync_music(false);
            }
            self.draw();
        }

        fn on_pointer(&mut self, x: f32, y: f32) {
            let events = self.session.pointer_moved(x, y);
            if !events.is_empty() || self.session.state().evader.is_some() {
                self.handle_events(&events);
                self.draw();
            }
        }

        /// Execute the draw list on the canvas
        fn draw(&self) {
            let scene = Scene::build(self.session.state());
            let ctx = &self.ctx;
            let board = self.session.state().grid.board_size() as f64;

            ctx.begin_path();
            for cmd in &scene.commands {
                match cmd {
                    DrawCmd::Clear { size, color } => {
                        ctx.set_fill_style_str(color.css());
                        ctx.fill_rect(0.0, 0.0, *size as f64, *size as f64);
                    }
                    DrawCmd::Line { from, to, color } => {
                        ctx.set_stroke_style_str(color.css());
                        ctx.move_to(from.x as f64, from.y as f64);
                        ctx.line_to(to.x as f64, to.y as f64);
                    }
                    DrawCmd::Dot { center, color } => {
                        // Flush pending grid lines before filling shapes
                        ctx.stroke();
                        ctx.begin_path();
                        ctx.arc(center.x as f64, center.y as f64, DOT_RADIUS, 0.0, TAU).ok();
                        ctx.set_stroke_style_str(Color::Outline.css());
                        ctx.set_fill_style_str(color.css());
                        ctx.stroke();
                        ctx.fill();
                        ctx.begin_path();
                    }
                    DrawCmd::Banner { text } => {
                        ctx.set_global_alpha(0.5);
                        ctx.set_fill_style_str(Color::Overlay.css());
                        ctx.fill_rect(0.0, 0.0, board, board);
                        ctx.set_global_alpha(1.0);
                        ctx.set_font("50px Arial");
                        ctx.set_text_align("center");
                        ctx.set_fill_style_str(Color::Text.css());
                        ctx.fill_text(text, board / 2.0, board / 2.0).ok();
                    }
                }
            }
            ctx.stroke();

            update_hud(&scene, self.session.is_paused(), self.session.settings().muted);
        }
    }

    fn update_hud(scene: &Scene, paused: bool, muted: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let hud = &scene.hud;
        let fields = [
            ("hud-score", hud.score.to_string()),
            ("hud-level", hud.level.to_string()),
            ("hud-lives", hud.lives.to_string()),
            ("hud-hscore", hud.high_score.to_string()),
            ("play-btn", if paused { "PLAY" } else { "PAUSE" }.to_string()),
            ("mute-btn", if muted { "UNMUTE" } else { "MUTE" }.to_string()),
        ];
        for (id, text) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        }
    }

    fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for {}", event);
        }
        closure.forget();
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Grid Chase starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let mut settings = Settings::load();
        if let Err(e) = settings.grid() {
            log::warn!("Invalid board settings ({}), using defaults", e);
            settings = Settings::default();
        }
        let pause_on_blur = settings.pause_on_blur;
        let tick_ms = settings.tick_interval_ms();
        let volume = settings.effective_volume();
        let music_volume = settings.effective_music_volume();

        let session = GameSession::new(settings, LocalStorageStore::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let board = session.state().grid.board_size() as u32;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("chase")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(board);
        canvas.set_height(board);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let game = Rc::new(RefCell::new(Game {
            session,
            audio: AudioManager::new(volume, music_volume),
            ctx,
        }));
        game.borrow().draw();

        // Pointer: translate client coordinates to board-local ones
        {
            let game = game.clone();
            let canvas_ref = canvas.clone();
            listen(&canvas, "mousemove", move |event: MouseEvent| {
                let rect = canvas_ref.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                game.borrow_mut().on_pointer(x as f32, y as f32);
            });
        }

        // Play/pause button
        if let Some(btn) = document.get_element_by_id("play-btn") {
            let game = game.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.toggle_pause();
                g.on_control();
            });
        }

        // Mute button
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let game = game.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                game.borrow_mut().toggle_mute();
            });
        }

        // Reset button
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let game = game.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.new_game();
                g.on_control();
            });
        }

        // Auto-pause on focus loss
        if pause_on_blur {
            let game = game.clone();
            listen(&window, "blur", move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.session.pause() {
                    log::info!("Auto-paused (window blur)");
                    g.on_control();
                }
            });
        }

        // The one timer
        let timer = Closure::<dyn FnMut()>::new(move || game.borrow_mut().on_tick());
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            timer.as_ref().unchecked_ref(),
            tick_ms as i32,
        )?;
        timer.forget();

        log::info!("Grid Chase running!");
        Ok(())
    }

    #[wasm_bindgen(start)]
    pub fn wasm_main() -> Result<(), JsValue> {
        run()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use grid_chase::autopilot::Autopilot;
    use grid_chase::persistence::{FileStore, KeyValueStore, MemoryStore};
    use grid_chase::sim::GameEvent;
    use grid_chase::{GameSession, Settings};

    /// Environment variable naming a save file for the demo
    const SAVE_ENV: &str = "GRID_CHASE_SAVE";
    const DEFAULT_TICKS: u64 = 3000;

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let ticks = args
            .next()
            .and_then(|a| a.parse().ok())
            .unwrap_or(DEFAULT_TICKS);
        let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

        let settings = Settings::load();
        let result = match std::env::var(SAVE_ENV) {
            Ok(path) => match FileStore::open(&path) {
                Ok(store) => play(settings, store, ticks, seed),
                Err(e) => {
                    log::error!("Cannot open save file {}: {}", path, e);
                    return;
                }
            },
            Err(_) => play(settings, MemoryStore::new(), ticks, seed),
        };
        if let Err(e) = result {
            log::error!("{}", e);
        }
    }

    fn play<S: KeyValueStore>(
        settings: Settings,
        store: S,
        ticks: u64,
        seed: u64,
    ) -> Result<(), grid_chase::GridError> {
        let mut session = GameSession::new(settings, store)?;
        let mut pilot = Autopilot::new(seed);
        let (mut wins, mut captures) = (0u32, 0u32);

        log::info!("Demo: {} ticks, seed {}", ticks, seed);
        for _ in 0..ticks {
            if session.is_paused() {
                session.resume();
            }
            let (x, y) = pilot.next_pointer(session.state());
            let mut events = session.pointer_moved(x, y);
            events.extend(session.tick());

            for event in &events {
                match event {
                    GameEvent::LevelComplete { .. } => wins += 1,
                    GameEvent::Captured { .. } => captures += 1,
                    _ => {}
                }
                if !matches!(event, GameEvent::CellClaimed { .. } | GameEvent::RoundReset) {
                    log::info!("tick {}: {:?}", session.state().time_ticks, event);
                }
            }
        }

        let progress = session.state().progress;
        println!(
            "level {} | lives {} | score {} | high score {} | {} levels cleared, caught {} times",
            progress.level, progress.lives, progress.score, progress.high_score, wins, captures
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grid Chase (native demo) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
