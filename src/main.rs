//! Ball Arena entry point
//!
//! Browser build: drives the simulation from requestAnimationFrame and draws
//! it on a canvas. Native build: runs a headless simulation on a synthetic
//! 60 Hz clock and reports frame statistics.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use ball_arena::Settings;
    use ball_arena::renderer::CanvasRenderer;
    use ball_arena::sim::{SimEvent, Simulation};

    const NANOS_PER_MS: f64 = 1_000_000.0;

    /// App instance holding all state
    struct App {
        sim: Simulation,
        renderer: CanvasRenderer,
    }

    impl App {
        /// Advance one display frame; `time` is the rAF timestamp in ms
        fn frame(&mut self, time: f64) {
            let timestamp = (time * NANOS_PER_MS) as u64;
            if self.sim.on_tick(timestamp) {
                if let Err(e) = self.renderer.render(self.sim.draw_commands()) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        /// Sync the canvas backing store with its layout size and tell the sim
        fn sync_size(&mut self) {
            let canvas = self.renderer.canvas();
            let width = canvas.client_width().max(0) as u32;
            let height = canvas.client_height().max(0) as u32;
            if width != canvas.width() || height != canvas.height() {
                self.renderer.resize(width, height);
                self.sim.push_event(SimEvent::ViewportResized {
                    width: width as f64,
                    height: height as f64,
                });
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Ball Arena starting...");

        let Some(window) = web_sys::window() else {
            web_sys::console::error_1(&"no window".into());
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("arena")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("no #arena canvas");
                return;
            }
        };

        let renderer = match CanvasRenderer::new(canvas.clone()) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Canvas 2D unavailable: {:?}", e);
                return;
            }
        };

        // Start at the default arena size; the first sync_size picks up layout
        let settings = Settings::default();
        renderer.resize(settings.viewport_width as u32, settings.viewport_height as u32);

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let mut sim = Simulation::new(&settings, seed);

        // Stats label follows the simulation through an observer
        if let Some(label) = document.get_element_by_id("stats") {
            label.set_text_content(Some(&sim.stats_text()));
            sim.stats_mut()
                .subscribe(move |text| label.set_text_content(Some(text)));
        }

        let app = Rc::new(RefCell::new(App { sim, renderer }));
        app.borrow_mut().sync_size();

        setup_input_handlers(&canvas, app.clone());
        setup_resize_handler(app.clone());

        request_animation_frame(app);

        log::info!("Ball Arena running with seed {}", app.borrow().sim.seed());
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Double click reseeds the arena
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().sim.push_event(SimEvent::ResetRequested);
            log::info!("Reset requested");
        });
        if let Err(e) =
            canvas.add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())
        {
            log::warn!("Could not listen for dblclick: {:?}", e);
        }
        closure.forget();
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().sync_size();
        });
        if let Err(e) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            log::warn!("Could not listen for resize: {:?}", e);
        }
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Synthetic display refresh interval for the headless run (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_NANOS: u64 = 16_666_667;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 600;

/// Synthetic clock reading for frame `i`, pinned at `u64::MAX` for huge runs
#[cfg(not(target_arch = "wasm32"))]
fn frame_timestamp(i: u64) -> u64 {
    i.saturating_mul(FRAME_NANOS)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_arena::Settings;
    use ball_arena::sim::Simulation;

    env_logger::init();
    log::info!("Ball Arena (native) starting headless run...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            log::warn!("Invalid frame count ({}), using {}", e, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut sim = Simulation::new(&settings, seed);
    let energy = sim.kinetic_energy();

    // The first tick only primes the clock, so run one extra
    for i in 0..=frames {
        sim.on_tick(frame_timestamp(i));
        let count = sim.stats().frame_count();
        if count > 0 && count % 60 == 0 {
            log::info!("{}", sim.stats_text());
        }
    }

    log::info!(
        "Seed {}: kinetic energy {:.6} -> {:.6}",
        sim.seed(),
        energy,
        sim.kinetic_energy()
    );
    println!("{}", sim.stats_text());
}
