//! Particle Field entry point
//!
//! On the web, mounts the background on `#particle-canvas`. Natively, runs
//! the simulation headless and logs what each frame would draw.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use particle_field::ParticleBackground;

    /// Canvas the page provides for the background
    const CANVAS_ID: &str = "particle-canvas";

    thread_local! {
        // Lives as long as the page
        static BACKGROUND: RefCell<Option<ParticleBackground>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let has_canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CANVAS_ID))
            .is_some();
        if !has_canvas {
            log::info!("No #{} on this page, background not mounted", CANVAS_ID);
            return;
        }

        match ParticleBackground::mount_with(CANVAS_ID, particle_field::FieldSettings::load()) {
            Ok(background) => {
                log::info!(
                    "Particle background mounted ({} particles)",
                    background.particle_count()
                );
                BACKGROUND.with(|slot| *slot.borrow_mut() = Some(background));
            }
            Err(e) => log::error!("Failed to mount particle background: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless_run {
    use std::time::{SystemTime, UNIX_EPOCH};

    use particle_field::platform::HeadlessHost;
    use particle_field::{Engine, FieldSettings};

    const DEFAULT_SIZE: (u32, u32) = (1280, 720);
    const DEFAULT_FRAMES: u32 = 600;
    /// 60 Hz frame spacing (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Parse `WIDTHxHEIGHT`
    pub fn parse_size(s: &str) -> Option<(u32, u32)> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
    }

    fn env_or<T>(key: &str, default: T, parse: impl Fn(&str) -> Option<T>) -> T {
        match std::env::var(key) {
            Ok(value) => parse(&value).unwrap_or_else(|| {
                log::warn!("Ignoring unparseable {}={:?}", key, value);
                default
            }),
            Err(_) => default,
        }
    }

    pub fn run() {
        let (width, height) = env_or("PARTICLE_FIELD_SIZE", DEFAULT_SIZE, parse_size);
        let frames = env_or("PARTICLE_FIELD_FRAMES", DEFAULT_FRAMES, |s| s.trim().parse().ok());
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut engine = match Engine::new(
            HeadlessHost::new(width, height),
            FieldSettings::load(),
            seed,
        ) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("Cannot start particle field: {}", e);
                return;
            }
        };
        if !engine.attach() {
            return;
        }

        let mut total_links = 0usize;
        for i in 0..frames {
            let now = i as f64 * FRAME_MS;

            // Sweep the pointer left to right across the middle for the
            // first half of the run
            if i < frames / 2 {
                let x = width as f32 * (i as f32 / (frames / 2).max(1) as f32);
                engine.handle_pointer_move(x, height as f32 / 2.0, now);
            }

            engine.step_headless(now);
            let stats = engine.last_stats();
            total_links += stats.links;

            if i % 60 == 0 {
                log::info!(
                    "frame {:>4}: {} circles, {} links, pointer {}",
                    i,
                    stats.circles,
                    stats.links,
                    if stats.pointer_active { "active" } else { "idle" }
                );
            }
        }

        let pointer = engine.field().pointer.position();
        log::debug!("Pointer last seen at ({:.0}, {:.0})", pointer.x, pointer.y);

        engine.detach();
        log::info!(
            "Ran {} frames on {}x{}: {} particles, {:.1} links/frame",
            frames,
            width,
            height,
            engine.field().particles.len(),
            total_links as f64 / frames.max(1) as f64
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Particle Field (native, headless) starting...");
    headless_run::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::headless_run::parse_size;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1280x720"), Some((1280, 720)));
        assert_eq!(parse_size(" 640 X 480 "), Some((640, 480)));
        assert_eq!(parse_size("640"), None);
        assert_eq!(parse_size("axb"), None);
    }
}
