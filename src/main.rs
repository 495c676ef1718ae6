//! Arena Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use arena_shooter::Tuning;
    use arena_shooter::consts::*;
    use arena_shooter::platform::BrowserPortal;
    use arena_shooter::platform::query;
    use arena_shooter::session::Session;
    use arena_shooter::sim::{GameState, TickInput};
    use arena_shooter::ui::LabelBoard;

    /// Game instance holding all state
    struct Game {
        session: Session<BrowserPortal>,
        labels: LabelBoard,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(state: GameState, ctx: CanvasRenderingContext2d) -> Self {
            let labels = LabelBoard::new(&state);
            Self {
                session: Session::new(state, BrowserPortal),
                labels,
                ctx,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt_ms: f32) {
            let dt_ms = dt_ms.min(100.0);
            self.accumulator += dt_ms;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                self.session.update(&self.input, SIM_DT_MS);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;
            }

            let events = self.session.state_mut().drain_events();
            let state = self.session.state();
            self.labels.apply_all(&events, state);
            self.labels.follow(state);
        }

        /// Draw the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            let state = self.session.state();

            ctx.set_fill_style_str("#111318");
            ctx.fill_rect(0.0, 0.0, state.viewport.x as f64, state.viewport.y as f64);

            if !state.is_room_open() {
                let door = state.tuning.door_pos;
                let r = state.tuning.door_radius as f64;
                ctx.set_fill_style_str("#8a5a2b");
                ctx.fill_rect(door.x as f64 - r, door.y as f64 - r, r * 2.0, r * 2.0);

                ctx.set_fill_style_str("#d04040");
                for enemy in state.enemies.iter() {
                    fill_circle(ctx, enemy.pos, enemy.radius);
                }

                ctx.set_fill_style_str("#f0e060");
                for bullet in state.bullets.active() {
                    fill_circle(ctx, bullet.pos, state.tuning.bullet_radius);
                }

                if state.player.is_alive() {
                    ctx.set_fill_style_str("#40a0f0");
                    fill_circle(ctx, state.player.pos, state.player.radius);
                }
            }

            for (_, label) in self.labels.iter() {
                ctx.set_fill_style_str(label.style.color());
                ctx.set_font(&format!("{}px monospace", label.style.font_px()));
                if label.style.centered() {
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                } else {
                    ctx.set_text_align("left");
                    ctx.set_text_baseline("top");
                }
                let _ = ctx.fill_text(&label.text, label.pos.x as f64, label.pos.y as f64);
            }
        }
    }

    fn fill_circle(ctx: &CanvasRenderingContext2d, pos: Vec2, radius: f32) {
        ctx.begin_path();
        let _ = ctx.arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, TAU);
        ctx.fill();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arena Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let search = window.location().search().unwrap_or_default();
        let currency = query::starting_currency(&search);
        let seed = js_sys::Date::now() as u64;
        let viewport = Vec2::new(width as f32, height as f32);
        let state = GameState::new(seed, viewport, currency, Tuning::load());

        let game = Rc::new(RefCell::new(Game::new(state, ctx)));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Arena Shooter running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Movement keys
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let keys = &mut g.input.keys;
                match event.key().as_str() {
                    "w" | "W" => keys.up = pressed,
                    "s" | "S" => keys.down = pressed,
                    "a" | "A" => keys.left = pressed,
                    "d" | "D" => keys.right = pressed,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer position
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer =
                    Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Fire button
        for (event_name, down) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                g.input.fire = down;
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
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

            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                SIM_DT_MS
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arena Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: an autopilot plays one session, visiting the room once
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use arena_shooter::consts::SIM_DT_MS;
    use arena_shooter::platform::{ManualPortal, query};
    use arena_shooter::sim::{GameEvent, GameState, MoveKeys, TickInput};
    use arena_shooter::ui::LabelBoard;
    use arena_shooter::{Session, Tuning};

    /// Demo length in simulated frames (one minute at 60 Hz)
    const DEMO_FRAMES: u32 = 60 * 60;
    /// Head for the door after this much play time (ms)
    const DOOR_AFTER_MS: f64 = 15_000.0;
    /// Frames spent in the room before closing it
    const ROOM_FRAMES: u32 = 90;
    /// Currency the room grants
    const ROOM_BONUS: u64 = 25;

    pub fn run(seed: u64) {
        let viewport = Vec2::new(1280.0, 720.0);
        let start_query = "";
        let state = GameState::new(
            seed,
            viewport,
            query::starting_currency(start_query),
            Tuning::load(),
        );
        let mut session = Session::new(state, ManualPortal::new(start_query));
        let mut labels = LabelBoard::new(session.state());

        let mut visited = false;
        let mut room_frames = 0;
        let mut kills = 0;
        let mut frames = 0;

        for _ in 0..DEMO_FRAMES {
            frames += 1;
            let input = autopilot(session.state(), visited);
            session.update(&input, SIM_DT_MS);

            let events = session.state_mut().drain_events();
            kills += events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
                .count();
            labels.apply_all(&events, session.state());
            labels.follow(session.state());

            if session.is_room_open() {
                room_frames += 1;
                if room_frames >= ROOM_FRAMES {
                    let currency = session.state().currency.saturating_add(ROOM_BONUS);
                    let portal = session.portal_mut();
                    portal.set_query(format!("?currency={}", currency));
                    portal.close_room();
                    visited = true;
                }
            }

            if !session.state().player.is_alive() {
                break;
            }
        }

        let state = session.state();
        log::info!(
            "Demo finished after {} frames: currency {}, kills {}, health {}, delay {}ms, multiplier {}",
            frames,
            state.currency,
            kills,
            state.player.health,
            state.spawner.delay_ms,
            state.spawner.multiplier
        );
        println!(
            "frames={} currency={} kills={} health={} labels={}",
            frames,
            state.currency,
            kills,
            state.player.health,
            labels.len()
        );
    }

    /// Aim at the nearest enemy and keep firing; back away from it when close,
    /// or walk to the door once it is time to visit the room.
    fn autopilot(state: &GameState, visited: bool) -> TickInput {
        let me = state.player.pos;
        let nearest = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(me)
                    .total_cmp(&b.pos.distance_squared(me))
            })
            .map(|e| e.pos);

        let heading = if !visited && state.time_ms > DOOR_AFTER_MS {
            state.tuning.door_pos - me
        } else if let Some(enemy) = nearest.filter(|p| p.distance(me) < 200.0) {
            me - enemy
        } else {
            state.center() - me
        };

        TickInput {
            keys: keys_toward(heading),
            pointer: nearest.unwrap_or(me + Vec2::X),
            fire: nearest.is_some(),
        }
    }

    fn keys_toward(d: Vec2) -> MoveKeys {
        const DEADZONE: f32 = 8.0;
        MoveKeys {
            up: d.y < -DEADZONE,
            down: d.y > DEADZONE,
            left: d.x < -DEADZONE,
            right: d.x > DEADZONE,
        }
    }
}
