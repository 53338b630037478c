//! Powder Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
    };

    use powder_run::audio::AudioManager;
    use powder_run::score::{HighScores, RunScore};
    use powder_run::settings::Settings;
    use powder_run::sim::{
        self, DrawSurface, Entity, GameEvent, GameKey, GameState, ImageCatalog, ImageName,
    };

    /// Canvas element id the page must provide
    const GAME_CANVAS: &str = "game-canvas";
    /// Optional score readout element id
    const SCORE_ELEMENT: &str = "score";

    /// All sprites, fully decoded before the first tick
    struct LoadedImages {
        images: HashMap<ImageName, HtmlImageElement>,
    }

    impl LoadedImages {
        fn get(&self, name: ImageName) -> Option<&HtmlImageElement> {
            self.images.get(&name)
        }
    }

    impl ImageCatalog for LoadedImages {
        fn size(&self, name: ImageName) -> Option<Vec2> {
            self.images
                .get(&name)
                .map(|img| Vec2::new(img.natural_width() as f32, img.natural_height() as f32))
        }
    }

    /// Canvas-2d draw target for one frame
    struct CanvasSurface<'a> {
        ctx: &'a CanvasRenderingContext2d,
        images: &'a LoadedImages,
    }

    impl DrawSurface for CanvasSurface<'_> {
        fn draw_image(&mut self, name: ImageName, top_left: Vec2, size: Vec2) {
            if let Some(img) = self.images.get(name) {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    f64::from(top_left.x),
                    f64::from(top_left.y),
                    f64::from(size.x),
                    f64::from(size.y),
                );
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        images: Rc<LoadedImages>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        score: RunScore,
        high_scores: HighScores,
        settings: Settings,
        audio: AudioManager,
        score_element: Option<Element>,
    }

    impl Game {
        fn new(
            canvas: HtmlCanvasElement,
            ctx: CanvasRenderingContext2d,
            images: Rc<LoadedImages>,
        ) -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new(&settings);
            let seed = js_sys::Date::now() as u64;
            let state = GameState::new(
                canvas.width() as f32,
                canvas.height() as f32,
                seed,
                images.as_ref(),
            );
            let score_element = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(SCORE_ELEMENT));

            Self {
                state,
                images,
                canvas,
                ctx,
                score: RunScore::new(),
                high_scores: HighScores::load(),
                settings,
                audio,
                score_element,
            }
        }

        /// Throw away the current run and start over with a fresh seed.
        /// Dropping the old state cancels its in-flight animations.
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state = GameState::new(
                self.canvas.width() as f32,
                self.canvas.height() as f32,
                seed,
                self.images.as_ref(),
            );
            self.score = RunScore::new();
            log::info!("restarted run");
        }

        /// One animation frame: update everything, then draw everything
        fn frame(&mut self, now: f64) {
            sim::tick(&mut self.state, self.images.as_ref(), now);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Jumped => self.audio.play_jump(),
                    GameEvent::SkierDied => {
                        self.score.stop();
                        let points = self.score.points();
                        if let Some(rank) = self.high_scores.add_score(points, js_sys::Date::now())
                        {
                            log::info!("run over: {points} points, rank {rank}");
                            self.high_scores.save();
                        } else {
                            log::info!("run over: {points} points");
                        }
                    }
                }
            }
            self.score.advance(self.state.skier.position().y);

            self.ctx.clear_rect(
                0.0,
                0.0,
                f64::from(self.canvas.width()),
                f64::from(self.canvas.height()),
            );
            let mut surface = CanvasSurface {
                ctx: &self.ctx,
                images: &self.images,
            };
            sim::draw(&self.state, &mut surface, self.images.as_ref());

            if self.settings.show_score {
                if let Some(element) = &self.score_element {
                    element.set_text_content(Some(&format!("Score: {}", self.score.points())));
                }
            }
        }

        /// Route a key press; returns whether to suppress the browser default
        fn handle_key(&mut self, key: &str, now: f64) -> bool {
            match key {
                "m" | "M" => {
                    let muted = self.settings.toggle_music();
                    self.settings.save();
                    self.audio.set_music_muted(muted);
                    true
                }
                "r" | "R" => {
                    self.restart();
                    true
                }
                other => {
                    let game_key = match other {
                        "ArrowLeft" => Some(GameKey::Left),
                        "ArrowRight" => Some(GameKey::Right),
                        "ArrowUp" => Some(GameKey::Up),
                        "ArrowDown" => Some(GameKey::Down),
                        " " => Some(GameKey::Jump),
                        _ => None,
                    };
                    match game_key {
                        Some(key) => sim::handle_key(&mut self.state, key, now),
                        None => false,
                    }
                }
            }
        }
    }

    /// Decode a single sprite, resolving once the browser has its extent
    async fn load_image(name: ImageName) -> Result<HtmlImageElement, JsValue> {
        let image = HtmlImageElement::new()?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(name.asset_path());
        JsFuture::from(promise).await?;
        Ok(image)
    }

    async fn load_images() -> Result<LoadedImages, JsValue> {
        let mut images = HashMap::new();
        for name in ImageName::ALL {
            let image = load_image(name).await?;
            images.insert(name, image);
        }
        log::info!("loaded {} images", images.len());
        Ok(LoadedImages { images })
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        web_sys::window()
            .expect("no window")
            .request_animation_frame(f.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }

    fn setup_input(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let handled = game.borrow_mut().handle_key(&event.key(), now_ms());
            if handled {
                event.prevent_default();
            }
        });
        let _ = document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Powder Run starting...");

        let document = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(GAME_CANVAS)
            .ok_or_else(|| JsValue::from_str("missing #game-canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        // All assets decoded before the first tick; nothing pops in late
        let images = Rc::new(load_images().await?);

        let game = Rc::new(RefCell::new(Game::new(canvas, ctx, images)));
        setup_input(game.clone());

        // The rAF loop; each callback schedules the next
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move || {
            game.borrow_mut().frame(now_ms());
            request_animation_frame(f.borrow().as_ref().unwrap());
        }));
        request_animation_frame(g.borrow().as_ref().unwrap());

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(err) = wasm_game::run().await {
        log::error!("failed to start: {err:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Powder Run (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    // Headless smoke run
    println!("\nRunning a headless descent...");
    headless_descent();
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_descent() {
    use glam::Vec2;
    use powder_run::consts::{GAME_HEIGHT, GAME_WIDTH};
    use powder_run::score::RunScore;
    use powder_run::sim::{self, Entity, GameState, ImageCatalog, ImageName};

    struct NominalImages;

    impl ImageCatalog for NominalImages {
        fn size(&self, _name: ImageName) -> Option<Vec2> {
            Some(Vec2::new(48.0, 48.0))
        }
    }

    let images = NominalImages;
    let mut state = GameState::new(GAME_WIDTH, GAME_HEIGHT, 0xC0FFEE, &images);
    let mut score = RunScore::new();

    let mut now = 0.0;
    for _ in 0..600 {
        now += 16.0;
        sim::tick(&mut state, &images, now);
        if !state.skier.is_skiing() {
            sim::handle_key(&mut state, powder_run::sim::GameKey::Right, now);
            sim::handle_key(&mut state, powder_run::sim::GameKey::Down, now);
        }
        score.advance(state.skier.position().y);
    }

    println!(
        "✓ 600 frames: skier at {:?}, {} obstacles live, score {}",
        state.skier.position(),
        state.field.obstacles().len(),
        score.points()
    );
}
