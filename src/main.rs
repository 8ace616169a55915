//! Number Rain entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent, PointerEvent};

    use number_rain::persistence::LocalStorage;
    use number_rain::platform::web::{DomSurface, disc_id_from_target};
    use number_rain::sim::GamePhase;
    use number_rain::{Game, HighScores, Tier, Tuning, frame_step_ms};

    /// Game instance plus frame bookkeeping
    struct App {
        game: Game<DomSurface, LocalStorage>,
        last_time: f64,
        // Sub-millisecond remainder carried between frames
        frame_carry_ms: f64,
        // Only build the end screen once per run
        shown_game_over: bool,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Number Rain starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - nothing to do");
            return;
        };
        let Some(play_area) = document
            .get_element_by_id("play-area")
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            log::error!("Missing #play-area");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let surface = DomSurface::new(document.clone(), play_area.clone());
        let game = Game::new(surface, LocalStorage::open(), Tuning::default(), seed);
        log::info!("Game initialized with seed: {}", seed);

        render_leaderboard(&document, game.high_scores());
        highlight_tier(&document, game.settings().difficulty);

        let app = Rc::new(RefCell::new(App {
            game,
            last_time: 0.0,
            frame_carry_ms: 0.0,
            shown_game_over: false,
        }));

        setup_difficulty_buttons(&document, app.clone());
        setup_pointer_input(&play_area, app.clone());
        setup_restart_button(&document);
        request_animation_frame(app);

        log::info!("Number Rain running!");
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn render_leaderboard(document: &Document, scores: &HighScores) {
        let Some(list) = document.get_element_by_id("leaderboard") else {
            return;
        };
        list.set_inner_html("");
        for score in scores.top_scores() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(&score.to_string()));
                let _ = list.append_child(&li);
            }
        }
    }

    /// Mark the last tier played on the difficulty screen
    fn highlight_tier(document: &Document, tier: Tier) {
        let Ok(buttons) = document.query_selector_all("#difficulty-buttons button") else {
            return;
        };
        for i in 0..buttons.length() {
            if let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let selected = button.get_attribute("data-difficulty").as_deref() == Some(tier.as_str());
                let _ = button.class_list().toggle_with_force("selected", selected);
            }
        }
    }

    fn update_hud(document: &Document, app: &mut App) {
        let required = app.game.session().required_number;
        let score = app.game.session().score;
        set_text(document, "next-number", &required.to_string());
        set_text(document, "score", &score.to_string());

        if app.game.phase() == GamePhase::GameOver && !app.shown_game_over {
            app.shown_game_over = true;
            set_text(document, "final-score", &format!("Your score: {}", score));
            set_display(document, "end-screen", "flex");
            render_leaderboard(document, app.game.high_scores());
        }
    }

    fn setup_difficulty_buttons(document: &Document, app: Rc<RefCell<App>>) {
        let Some(buttons) = document.get_element_by_id("difficulty-buttons") else {
            log::warn!("Missing #difficulty-buttons");
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if target.tag_name() != "BUTTON" {
                return;
            }
            let Some(tier) = target
                .get_attribute("data-difficulty")
                .and_then(|d| Tier::from_str(&d))
            else {
                log::warn!("Unknown difficulty button");
                return;
            };

            set_display(&doc, "difficulty-screen", "none");
            set_display(&doc, "end-screen", "none");

            let mut a = app.borrow_mut();
            match a.game.start(tier) {
                Ok(()) => {
                    a.shown_game_over = false;
                    highlight_tier(&doc, tier);
                }
                Err(e) => log::warn!("Could not start: {}", e),
            }
        });
        let _ = buttons.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One delegated listener; pointerdown for immediate response on mobile
    fn setup_pointer_input(play_area: &HtmlElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let Some(id) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| disc_id_from_target(&el))
            else {
                return;
            };
            event.prevent_default();
            app.borrow_mut().game.select(id);
        });
        let _ = play_area
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document) {
        let Some(btn) = document.get_element_by_id("restart") else {
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            set_display(&doc, "difficulty-screen", "flex");
            set_display(&doc, "end-screen", "none");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
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
                let elapsed = time - a.last_time;
                frame_step_ms(elapsed, &mut a.frame_carry_ms)
            } else {
                0
            };
            a.last_time = time;

            a.game.advance(dt);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                update_hud(&document, &mut a);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use number_rain::consts::TICK_MS;
    use number_rain::persistence::MemoryStorage;
    use number_rain::platform::HeadlessSurface;
    use number_rain::sim::{Autopilot, GamePhase};
    use number_rain::{Game, Tier, Tuning};

    /// Ticks the demo player waits before clicking (~1.5 s)
    const DEMO_REACTION_TICKS: u32 = 90;
    /// Give up on a demo run after ten minutes of game time
    const DEMO_LIMIT_MS: u64 = 10 * 60 * 1000;

    env_logger::init();
    log::info!("Number Rain (native) starting...");
    log::info!("Native mode plays a headless demo - run with `trunk serve` for web version");

    let mut args = std::env::args().skip(1);
    let tier = args
        .next()
        .and_then(|s| Tier::from_str(&s))
        .unwrap_or_default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let mut game = Game::new(
        HeadlessSurface::default(),
        MemoryStorage::new(),
        Tuning::default(),
        seed,
    );
    if let Err(e) = game.start(tier) {
        log::error!("Could not start demo: {}", e);
        return;
    }
    log::info!("Demo on {} with seed {}", tier.as_str(), seed);

    let mut pilot = Autopilot::new(DEMO_REACTION_TICKS);
    let mut elapsed_ms = 0u64;
    while game.phase() == GamePhase::Running && elapsed_ms < DEMO_LIMIT_MS {
        game.advance(TICK_MS);
        elapsed_ms += u64::from(TICK_MS);
        if let Some(id) = pilot.observe(game.state()) {
            game.select(id);
        }
    }

    let session = game.session();
    println!(
        "Demo {} after {:.1}s: score {}, speed {:.1}, spawn every {} ms",
        if game.phase() == GamePhase::GameOver { "ended" } else { "stopped" },
        elapsed_ms as f64 / 1000.0,
        session.score,
        session.fall_speed,
        session.spawn_interval_ms
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
