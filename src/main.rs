//! Brick Breaker entry point
//!
//! On the web, wires keyboard input and `requestAnimationFrame` to the frame
//! driver. Natively, runs the game headless with the demo pilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use brick_breaker::platform::web::WebHost;
    use brick_breaker::sim::Gamepad;
    use brick_breaker::{Game, Settings};

    /// Fixed frame length in milliseconds (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum frames to catch up per animation callback
    const MAX_CATCH_UP: u32 = 4;

    /// Game instance holding all state
    struct Runtime {
        game: Game,
        host: WebHost,
        gamepad: u8,
        accumulator: f64,
        last_time: Option<f64>,
    }

    impl Runtime {
        fn frame(&mut self, now: f64) {
            let elapsed = self.last_time.map_or(FRAME_MS, |last| now - last);
            self.last_time = Some(now);
            self.accumulator = (self.accumulator + elapsed).min(FRAME_MS * MAX_CATCH_UP as f64);

            while self.accumulator >= FRAME_MS {
                self.game.update(&mut self.host, Gamepad(self.gamepad));
                self.accumulator -= FRAME_MS;
            }
        }
    }

    /// Gamepad bit for a keyboard `code`
    fn key_bit(code: &str) -> Option<u8> {
        match code {
            "ArrowLeft" => Some(Gamepad::LEFT),
            "ArrowRight" => Some(Gamepad::RIGHT),
            "ArrowUp" => Some(Gamepad::UP),
            "ArrowDown" => Some(Gamepad::DOWN),
            "KeyX" => Some(Gamepad::BUTTON_1),
            "KeyZ" | "Space" => Some(Gamepad::BUTTON_2),
            _ => None,
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Brick Breaker starting...");

        let mut host =
            WebHost::attach("canvas").ok_or_else(|| JsValue::from_str("no #canvas element"))?;
        let settings = Settings::default();
        let mut game = Game::new(&settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.start(&mut host);

        let runtime = Rc::new(RefCell::new(Runtime {
            game,
            host,
            gamepad: 0,
            accumulator: 0.0,
            last_time: None,
        }));

        setup_keyboard(runtime.clone())?;
        start_frame_loop(runtime);

        log::info!("Brick Breaker running!");
        Ok(())
    }

    fn setup_keyboard(runtime: Rc<RefCell<Runtime>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let runtime = runtime.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(bit) = key_bit(&event.code()) {
                    event.prevent_default();
                    runtime.borrow_mut().gamepad |= bit;
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(bit) = key_bit(&event.code()) {
                    runtime.borrow_mut().gamepad &= !bit;
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
        if let Some(window) = web_sys::window() {
            if window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .is_err()
            {
                log::error!("requestAnimationFrame failed");
            }
        }
    }

    fn start_frame_loop(runtime: Rc<RefCell<Runtime>>) {
        // The callback owns a handle to itself so it can reschedule
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let handle = callback.clone();

        *handle.borrow_mut() = Some(Closure::new(move |now: f64| {
            runtime.borrow_mut().frame(now);
            if let Some(cb) = callback.borrow().as_ref() {
                request_frame(cb);
            }
        }));

        if let Some(cb) = handle.borrow().as_ref() {
            request_frame(cb);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;

    use brick_breaker::demo::DemoPilot;
    use brick_breaker::platform::Canvas;
    use brick_breaker::sim::{GameEvent, Screen};
    use brick_breaker::{Game, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "brick-breaker")]
    #[command(about = "Run Brick Breaker headless with the demo pilot")]
    struct Args {
        /// Frames to simulate (60 per second)
        #[arg(long, default_value_t = 3600)]
        frames: u32,

        /// Demo pilot seed
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Write the final frame as a PPM image
        #[arg(long)]
        screenshot: Option<PathBuf>,
    }

    #[derive(Debug, Default, Serialize)]
    struct RunSummary {
        seed: u64,
        frames: u32,
        level: u8,
        lives: u8,
        screen: Option<Screen>,
        palette: String,
        bricks_alive: usize,
        brick_hits: usize,
        lives_lost: usize,
        levels_started: usize,
        tones: usize,
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::init();
        let args = Args::parse();

        let settings = match &args.settings {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        let mut game = Game::new(&settings)?;
        let mut canvas = Canvas::new();
        let mut pilot = DemoPilot::new(args.seed);
        let mut summary = RunSummary {
            seed: args.seed,
            frames: args.frames,
            ..RunSummary::default()
        };

        game.start(&mut canvas);
        for _ in 0..args.frames {
            canvas.clear_log();
            let input = pilot.next_input(game.state());
            let report = game.update(&mut canvas, input);
            summary.tones += canvas.tones().len();
            for event in &report.events {
                match event {
                    GameEvent::BrickHit { .. } => summary.brick_hits += 1,
                    GameEvent::LifeLost { .. } => summary.lives_lost += 1,
                    GameEvent::LevelStarted(_) => summary.levels_started += 1,
                    _ => {}
                }
            }
        }

        let state = game.state();
        summary.level = state.level.number();
        summary.lives = state.lives;
        summary.screen = Some(state.screen);
        summary.palette = state.palette.as_str().to_string();
        summary.bricks_alive = state.bricks.alive_count();

        if let Some(path) = &args.screenshot {
            std::fs::write(path, canvas.to_ppm())?;
            log::info!("Screenshot written to {}", path.display());
        }

        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}
