//! Bot Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use bot_dodger::consts::*;
    use bot_dodger::hud;
    use bot_dodger::platform::{InputEvent, Key};
    use bot_dodger::sim::{GameState, Snapshot, tick};
    use bot_dodger::Tuning;
    use glam::Vec2;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                ctx,
                canvas,
                last_time: 0.0,
            }
        }

        /// Convert a pointer position in CSS pixels to arena coordinates
        fn to_arena(&self, x: f32, y: f32) -> Vec2 {
            let arena = self.state.tuning.arena();
            let w = (self.canvas.client_width() as f32).max(1.0);
            let h = (self.canvas.client_height() as f32).max(1.0);
            Vec2::new(x * arena.x / w, y * arena.y / h)
        }

        /// Render the current frame
        fn render(&self) {
            let snapshot = self.state.snapshot();
            let ctx = &self.ctx;
            let arena = self.state.tuning.arena();

            // Background
            ctx.set_fill_style_str("#0b0f14");
            ctx.fill_rect(0.0, 0.0, arena.x as f64, arena.y as f64);

            // Pursuers and their bubbles
            ctx.set_font("12px system-ui, Arial");
            ctx.set_text_align("center");
            for pursuer in &snapshot.pursuers {
                let (x, y) = (pursuer.pos.x as f64, pursuer.pos.y as f64);
                let bot = (pursuer.half_size * 2.0) as f64;
                ctx.set_fill_style_str("#ef4444");
                ctx.fill_rect(x - bot / 2.0, y - bot / 2.0, bot, bot);
                ctx.set_fill_style_str("#e6edf3");
                let _ = ctx.fill_text(&pursuer.line, x, y - 26.0);
            }

            // Player (18px square, the default bot size)
            let size = (PURSUER_HALF_SIZE * 2.0) as f64;
            ctx.set_fill_style_str(if snapshot.game_over_title.is_some() { "#f97316" } else { "#22c55e" });
            ctx.fill_rect(
                snapshot.player.x as f64 - size / 2.0,
                snapshot.player.y as f64 - size / 2.0,
                size,
                size,
            );

            if let Some(joy) = snapshot.joystick {
                self.circle(joy.center, joy.radius, "rgba(17,24,39,0.6)");
                self.circle(joy.knob, JOYSTICK_KNOB_RADIUS, "rgba(31,41,55,0.8)");
            }

            self.draw_hud(&snapshot, arena);
        }

        fn circle(&self, center: Vec2, radius: f32, color: &str) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.set_fill_style_str(color);
            self.ctx.fill();
        }

        fn draw_hud(&self, snapshot: &Snapshot, arena: Vec2) {
            let ctx = &self.ctx;
            ctx.set_text_align("left");
            ctx.set_fill_style_str("#e6edf3");
            ctx.set_font("18px system-ui, Arial");
            let _ = ctx.fill_text(hud::TITLE, 16.0, 28.0);
            ctx.set_fill_style_str("#cbd5e1");
            ctx.set_font("14px system-ui, Arial");
            let _ = ctx.fill_text(&format!("Uptime: {}", snapshot.uptime), 16.0, 50.0);

            ctx.set_text_align("right");
            ctx.set_fill_style_str("#64748b");
            ctx.set_font("12px system-ui, Arial");
            let _ = ctx.fill_text(hud::CONTROLS_HINT, arena.x as f64 - 16.0, 24.0);

            if let (Some(title), Some(sub)) = (&snapshot.game_over_title, &snapshot.game_over_subtitle) {
                let (cx, cy) = (arena.x as f64 / 2.0, arena.y as f64 / 2.0);
                ctx.set_text_align("center");
                ctx.set_fill_style_str("#e6edf3");
                ctx.set_font("34px system-ui, Arial");
                let _ = ctx.fill_text(title, cx, cy - 8.0);
                ctx.set_fill_style_str("#cbd5e1");
                ctx.set_font("14px system-ui, Arial");
                let _ = ctx.fill_text(sub, cx, cy + 28.0);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bot Dodger starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::load();
        canvas.set_width(tuning.arena_width as u32);
        canvas.set_height(tuning.arena_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into().ok())
            .expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, canvas.clone(), ctx)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Bot Dodger running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer events (mouse and touch share one path)
        let pointer_events: [(&str, fn(i32, Vec2) -> InputEvent); 4] = [
            ("pointerdown", |id, pos| InputEvent::PointerDown { id, pos }),
            ("pointermove", |id, pos| InputEvent::PointerMove { id, pos }),
            ("pointerup", |id, pos| InputEvent::PointerUp { id, pos }),
            ("pointercancel", |id, _| InputEvent::PointerCancel { id }),
        ];
        for (name, make) in pointer_events {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let pos = g.to_arena(event.offset_x() as f32, event.offset_y() as f32);
                g.state.push_event(make(event.pointer_id(), pos));
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            log::warn!("No window; keyboard input disabled");
            return;
        };
        for (name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_key_name(&event.key()) else {
                    return;
                };
                event.prevent_default();
                let event = if down { InputEvent::KeyDown(key) } else { InputEvent::KeyUp(key) };
                game.borrow_mut().state.push_event(event);
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (keys released elsewhere never send keyup)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().state.push_event(InputEvent::FocusLost);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            // Calculate delta time
            let delta_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                0.0
            };
            g.last_time = time;

            tick(&mut g.state, delta_ms);
            g.render();
        }

        request_animation_frame(game);
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
    log::info!("Bot Dodger (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning_file(&path),
        None => bot_dodger::Tuning::load(),
    };

    let snapshot = demo::run(0x5eed, tuning);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning_file(path: &str) -> bot_dodger::Tuning {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| bot_dodger::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Could not load tuning from {}: {} (using defaults)", path, e);
            bot_dodger::Tuning::default()
        }
    }
}

/// Headless demo: a simple bot flees the nearest pursuer until caught
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use bot_dodger::Tuning;
    use bot_dodger::platform::{InputEvent, Key};
    use bot_dodger::sim::{GameState, Snapshot, tick};
    use glam::Vec2;

    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run(seed: u64, tuning: Tuning) -> Snapshot {
        let mut state = GameState::with_tuning(seed, tuning);
        log::info!("Demo session started with seed: {}", seed);
        let mut held: Vec<Key> = Vec::new();

        for frame in 0..MAX_FRAMES {
            let wanted = flee_keys(&state);
            for key in held.iter().filter(|k| !wanted.contains(*k)) {
                state.push_event(InputEvent::KeyUp(*key));
            }
            for key in wanted.iter().filter(|k| !held.contains(*k)) {
                state.push_event(InputEvent::KeyDown(*key));
            }
            held = wanted;

            tick(&mut state, FRAME_MS);
            if state.is_game_over() {
                log::info!("Demo bot caught after {} frames", frame + 1);
                break;
            }
        }

        state.snapshot()
    }

    /// Keys that move away from the nearest pursuer, steering off walls
    fn flee_keys(state: &GameState) -> Vec<Key> {
        let player = state.player.pos;
        let nearest = state.swarm.iter().min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let Some(nearest) = nearest else {
            return Vec::new();
        };

        // Bias toward the center so the bot doesn't pin itself in a corner
        let center = state.tuning.arena_center();
        let away = (player - nearest.pos).normalize_or_zero() + (center - player) * 0.004;

        let mut keys = Vec::new();
        if away.x < -0.3 {
            keys.push(Key::ArrowLeft);
        } else if away.x > 0.3 {
            keys.push(Key::ArrowRight);
        }
        if away.y < -0.3 {
            keys.push(Key::ArrowUp);
        } else if away.y > 0.3 {
            keys.push(Key::ArrowDown);
        }
        if keys.is_empty() && away != Vec2::ZERO {
            keys.push(if away.x.abs() > away.y.abs() {
                if away.x < 0.0 { Key::ArrowLeft } else { Key::ArrowRight }
            } else if away.y < 0.0 {
                Key::ArrowUp
            } else {
                Key::ArrowDown
            });
        }
        keys
    }
}
