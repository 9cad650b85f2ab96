//! Default spawn policy
//!
//! Decides when and where prey and hooks appear. The session only exposes
//! `spawn_prey` / `spawn_hook`; everything random lives here, driven by a
//! seeded PCG so a given seed always replays the same run.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{PreyKind, Session};

/// Timer-driven spawner for prey and hooks
#[derive(Debug, Clone)]
pub struct Spawner {
    settings: Settings,
    rng: Pcg32,
    prey_timer: f32,
    hook_timer: f32,
}

impl Spawner {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self {
            settings,
            rng,
            prey_timer: 0.0,
            hook_timer: 0.0,
        }
    }

    /// Restart the timers (the RNG keeps its stream so runs differ)
    pub fn reset(&mut self) {
        self.prey_timer = 0.0;
        self.hook_timer = 0.0;
    }

    /// Accumulate `dt` and spawn whatever is due
    pub fn update(&mut self, session: &mut Session, dt: f32) {
        if session.is_dead() {
            return;
        }
        let dt = crate::sanitize_dt(dt);

        self.prey_timer += dt;
        while self.prey_timer >= self.settings.prey_interval {
            self.prey_timer -= self.settings.prey_interval;
            self.spawn_prey(session);
        }

        self.hook_timer += dt;
        while self.hook_timer >= self.settings.hook_interval {
            self.hook_timer -= self.settings.hook_interval;
            if session.hooks.len() < self.settings.max_hooks {
                self.spawn_hook(session);
            }
        }
    }

    fn spawn_prey(&mut self, session: &mut Session) {
        let pad = self.settings.prey_padding;
        let x = self.rng.random_range(pad..=session.width - pad);
        let y = self.rng.random_range(pad..=session.height - pad);
        let kind = if self.rng.random_bool(self.settings.crab_chance as f64) {
            PreyKind::Crab
        } else {
            PreyKind::Fish
        };
        session.spawn_prey(Vec2::new(x, y), kind);
    }

    fn spawn_hook(&mut self, session: &mut Session) {
        let x = self.rng.random_range(0.0..=session.width);
        let depth_frac = self
            .rng
            .random_range(self.settings.hook_depth_min..=self.settings.hook_depth_max);
        session.spawn_hook(x, depth_frac * session.height);
    }
}
