//! Browser bindings
//!
//! The page owns the render loop and input events; it forwards elapsed time
//! and tap coordinates here and draws from `snapshot_json()` / `drain_events_json()`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::Session;
use crate::spawner::Spawner;

/// One game: session plus its spawn policy
#[wasm_bindgen]
pub struct EelGame {
    session: Session,
    spawner: Spawner,
}

#[wasm_bindgen]
impl EelGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> EelGame {
        let settings = Settings {
            seed: seed as u64,
            ..Default::default()
        };
        log::info!("Eel Hook starting with seed {}", seed);
        EelGame {
            session: Session::new(settings.arena_width, settings.arena_height),
            spawner: Spawner::new(settings),
        }
    }

    /// Advance by `dt` seconds (one rendered frame)
    pub fn advance(&mut self, dt: f32) {
        self.spawner.update(&mut self.session, dt);
        self.session.advance(dt);
    }

    pub fn on_tap(&mut self, x: f32, y: f32) {
        self.session.on_tap(Vec2::new(x, y));
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.spawner.reset();
    }

    pub fn is_dead(&self) -> bool {
        self.session.is_dead()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }

    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_default()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
