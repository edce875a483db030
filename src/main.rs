//! Spark Quiz entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_quiz {
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use spark_quiz::consts::*;
    use spark_quiz::renderer::{CanvasSurface, Surface, TextStyle, palette};
    use spark_quiz::{QuestionBank, QuizApp, Settings};

    /// App instance plus its drawing target
    struct Game {
        app: QuizApp,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Map CSS pixel offsets on the canvas to viewport units
        fn to_viewport(&self, x: f32, y: f32) -> Vec2 {
            let w = self.canvas.client_width().max(1) as f32;
            let h = self.canvas.client_height().max(1) as f32;
            Vec2::new(x * VIEWPORT_WIDTH / w, y * VIEWPORT_HEIGHT / h)
        }

        fn frame(&mut self) {
            self.surface.begin_frame();
            self.app.frame(&mut self.surface);
        }
    }

    /// Fetch the question CSV next to the page
    async fn fetch_text(path: &str) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let resp: web_sys::Response = JsFuture::from(window.fetch_with_str(path))
            .await?
            .dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!("HTTP {} for {path}", resp.status())));
        }
        let text = JsFuture::from(resp.text()?).await?;
        text.as_string().ok_or_else(|| JsValue::from_str("response is not text"))
    }

    fn setup_canvas() -> Result<(HtmlCanvasElement, CanvasSurface), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution, drawing in viewport units
        let dpr = window.device_pixel_ratio();
        canvas.set_width((VIEWPORT_WIDTH as f64 * dpr) as u32);
        canvas.set_height((VIEWPORT_HEIGHT as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        Ok((canvas, CanvasSurface::new(ctx, dpr)))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Spark Quiz starting...");

        let (canvas, mut surface) = match setup_canvas() {
            Ok(pair) => pair,
            Err(e) => {
                log::error!("Canvas setup failed: {e:?}");
                return;
            }
        };
        // Hide the OS cursor, the trail replaces it
        let _ = canvas.set_attribute("style", "cursor: none");

        let settings = Settings::load();
        let bank = match fetch_text(&settings.quiz_path).await {
            Ok(csv) => QuestionBank::from_csv_str(&csv).map_err(|e| e.to_string()),
            Err(e) => Err(format!("{e:?}")),
        };
        let bank = match bank {
            Ok(bank) => bank,
            Err(e) => {
                log::error!("Failed to load questions: {e}");
                surface.begin_frame();
                surface.clear(palette::BACKGROUND);
                surface.draw_text(
                    &format!("Could not load questions: {e}"),
                    Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0),
                    TextStyle::new(18.0, palette::TIER_TRY_AGAIN)
                        .centered()
                        .wrapped(VIEWPORT_WIDTH - 100.0),
                );
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            app: QuizApp::new(bank, settings),
            surface,
            canvas: canvas.clone(),
        }));

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);
        log::info!("Spark Quiz running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_viewport(event.offset_x() as f32, event.offset_y() as f32);
                g.app.pointer_moved(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_viewport(event.offset_x() as f32, event.offset_y() as f32);
                let outcome = g.app.mouse_pressed(event.button(), pos);
                log::debug!("Press at {pos}: {outcome:?}");
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start acts as a press
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let pos = g.to_viewport(x, y);
                    g.app.pointer_moved(pos);
                    g.app.pointer_pressed(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_quiz::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spark Quiz (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let settings = spark_quiz::Settings::load();
    let bank = match spark_quiz::QuestionBank::from_path(&settings.quiz_path) {
        Ok(bank) => bank,
        Err(e) => {
            log::error!("Failed to load {}: {e}", settings.quiz_path);
            std::process::exit(1);
        }
    };

    smoke_run(bank, settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Draw a single frame into a recorder to check the bank renders
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run(bank: spark_quiz::QuestionBank, settings: spark_quiz::Settings) {
    use spark_quiz::QuizApp;
    use spark_quiz::renderer::CommandList;

    let count = bank.len();
    let mut app = QuizApp::new(bank, settings);
    let mut frame = CommandList::new();
    app.frame(&mut frame);

    log::info!(
        "Rendered first frame: {} draw calls, {} questions, phase {:?}",
        frame.len(),
        count,
        app.phase()
    );
    println!("✓ {count} questions loaded and rendered");
}
