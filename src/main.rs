//! Plinko Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use plinko_drop::Settings;
    use plinko_drop::consts::*;
    use plinko_drop::renderer::{DrawCommand, Frame, build_frame};
    use plinko_drop::sim::{GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::new(seed),
                settings: Settings::load(),
                ctx,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run one simulation step for this refresh
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FRAME_MS
            };
            self.last_time = time;

            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt);

            let ledger_changed = self.state.drain_events().iter().any(|e| {
                matches!(
                    e,
                    GameEvent::BallSpawned { .. } | GameEvent::Landed { .. } | GameEvent::Reset
                )
            });
            if ledger_changed {
                self.update_hud();
            }
        }

        fn render(&self) {
            let frame = build_frame(&self.state, &self.settings);
            if let Err(e) = paint(&self.ctx, &frame) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("totalScore") {
                el.set_text_content(Some(&self.state.ledger.total_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("ballsDropped") {
                el.set_text_content(Some(&self.state.ledger.balls_dropped.to_string()));
            }
        }
    }

    /// Execute a frame's draw commands on a 2D canvas context
    fn paint(ctx: &CanvasRenderingContext2d, frame: &Frame) -> Result<(), JsValue> {
        for command in &frame.commands {
            match command {
                DrawCommand::Clear { color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);
                }
                DrawCommand::FillRect { origin, size, color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::StrokeRect {
                    origin,
                    size,
                    color,
                    line_width,
                } => {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*line_width as f64);
                    ctx.stroke_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill();
                }
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color,
                    line_width,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*line_width as f64);
                    ctx.stroke();
                }
                DrawCommand::RadialGlow {
                    center,
                    radius,
                    color,
                } => {
                    let (x, y, r) = (center.x as f64, center.y as f64, *radius as f64);
                    let gradient = ctx.create_radial_gradient(x, y, 0.0, x, y, r)?;
                    gradient.add_color_stop(0.0, &color.to_css())?;
                    gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css())?;
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
                }
                DrawCommand::Label {
                    center,
                    text,
                    size_px,
                    color,
                } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.set_font(&format!("bold {}px Arial", size_px));
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    ctx.fill_text(text, center.x as f64, center.y as f64)?;
                }
            }
        }
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Plinko Drop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(PLAY_WIDTH as u32);
        canvas.set_height(PLAY_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx)));
        log::info!("Game initialized with seed: {}", seed);

        game.borrow().update_hud();
        setup_buttons(&document, game.clone());
        request_animation_frame(game);

        log::info!("Plinko Drop running!");
        Ok(())
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let bindings: [(&str, fn(&mut Game)); 3] = [
            ("dropBall", |g| g.input.drop_ball = true),
            ("dropMultiple", |g| g.input.drop_batch = Some(g.settings.batch_size)),
            ("resetGame", |g| g.input.reset = true),
        ];

        for (id, action) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing control #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                action(&mut game.borrow_mut());
            });
            if let Err(e) = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
                log::warn!("Failed to bind #{}: {:?}", id, e);
            }
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
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
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

/// Headless session: drop a batch, run until the board is empty, report
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use plinko_drop::Settings;
    use plinko_drop::consts::FRAME_MS;
    use plinko_drop::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Plinko Drop (native, headless) starting...");

    let settings = Settings::load();
    let mut args = std::env::args().skip(1);
    let count = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(settings.batch_size);
    let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut state = GameState::new(seed);
    log::info!("Dropping {} balls with seed {}", count, seed);

    let input = TickInput {
        drop_batch: Some(count),
        ..Default::default()
    };
    tick(&mut state, &input, FRAME_MS);

    // Ten simulated minutes is far beyond any real drop
    let max_ticks = 60 * 60 * 10;
    let mut hits = vec![0u32; state.field.containers.len()];
    let mut lost = 0u32;
    while !state.is_settled() && state.time_ticks < max_ticks {
        let dt = state.headless_step_ms();
        tick(&mut state, &TickInput::default(), dt);
        for event in state.drain_events() {
            match event {
                GameEvent::Landed { container_index, .. } => hits[container_index] += 1,
                GameEvent::BallLost { .. } => lost += 1,
                _ => {}
            }
        }
    }

    if !state.is_settled() {
        log::warn!("Stopped after {} ticks with {} balls still live", state.time_ticks, state.balls.len());
    }

    println!("seed:          {}", seed);
    println!("balls dropped: {}", state.ledger.balls_dropped);
    println!("total score:   {}", state.ledger.total_score);
    println!("ticks:         {}", state.time_ticks);
    for (container, n) in state.field.containers.iter().zip(&hits) {
        println!("  {:>3} pts: {}", container.points, n);
    }
    if lost > 0 {
        println!("lost:          {}", lost);
    }
}
