//! Eel Hook headless runner
//!
//! Plays a few scripted runs at a fixed frame rate and logs how each one
//! ends. Usage: `eel-hook [settings.json]` (set `RUST_LOG=info` to see output).

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use eel_hook::sim::{GameEvent, Session};
    use eel_hook::{Settings, Spawner};

    /// Frame time of the simulated display
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a run after this many frames
    const MAX_FRAMES: u32 = 60 * 120;
    /// Average frames between scripted taps
    const TAP_EVERY: u32 = 45;
    const RUNS: u32 = 3;

    /// Host loop: spawner and session driven by one frame clock
    struct Game {
        session: Session,
        spawner: Spawner,
        taps: Pcg32,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                session: Session::new(settings.arena_width, settings.arena_height),
                taps: Pcg32::seed_from_u64(settings.seed.wrapping_add(1)),
                spawner: Spawner::new(settings),
            }
        }

        /// Tap somewhere in the arena now and then, like an idle player
        fn scripted_input(&mut self) {
            if self.taps.random_ratio(1, TAP_EVERY) {
                let x = self.taps.random_range(0.0..=self.session.width);
                let y = self.taps.random_range(0.0..=self.session.height);
                self.session.on_tap(Vec2::new(x, y));
            }
        }

        fn frame(&mut self) -> Vec<GameEvent> {
            self.scripted_input();
            self.spawner.update(&mut self.session, FRAME_DT);
            self.session.advance(FRAME_DT);
            self.session.drain_events()
        }

        fn play(&mut self, run: u32) {
            for frame in 0..MAX_FRAMES {
                for event in self.frame() {
                    match event {
                        GameEvent::GameOver { reason } => {
                            log::info!("Run {} over at frame {}: {}", run, frame, reason)
                        }
                        other => log::debug!("{:?}", other),
                    }
                }
                if self.session.is_dead() {
                    break;
                }
            }

            match serde_json::to_string(&self.session.stats) {
                Ok(json) => log::info!("Run {} stats: {}", run, json),
                Err(e) => log::warn!("Could not encode stats: {}", e),
            }
        }
    }

    pub fn run() {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(std::path::Path::new(&path)),
            None => Settings::default(),
        };
        log::info!("Settings: {:?}", settings);

        let mut game = Game::new(settings);
        for run in 1..=RUNS {
            game.play(run);
            game.session.restart();
            game.spawner.reset();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eel Hook (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `eel_hook::wasm::wasm_start`, this is just to satisfy the compiler
}
