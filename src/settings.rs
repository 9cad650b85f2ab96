//! Runtime settings
//!
//! Arena size and spawn policy. Core constants (speed, spacing, radii, hook
//! timings) live in `consts` and are not configurable.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Settings for a run and its spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Spawner ===
    /// RNG seed for the spawn policy
    pub seed: u64,
    /// Seconds between prey spawns
    pub prey_interval: f32,
    /// Chance (0-1) a spawned prey is a crab
    pub crab_chance: f32,
    /// Keep prey this far from the arena edges
    pub prey_padding: f32,
    /// Seconds between hook drops
    pub hook_interval: f32,
    /// Hook depth range as fractions of arena height
    pub hook_depth_min: f32,
    pub hook_depth_max: f32,
    /// Upper bound on live hooks
    pub max_hooks: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            seed: 0x5EED,
            prey_interval: 1.5,
            crab_chance: 0.25,
            prey_padding: 24.0,
            hook_interval: 4.0,
            hook_depth_min: 0.30,
            hook_depth_max: 0.85,
            max_hooks: 3,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.arena_width) || !positive(self.arena_height) {
            log::warn!("Arena size must be positive; using {}x{}", ARENA_WIDTH, ARENA_HEIGHT);
            self.arena_width = defaults.arena_width;
            self.arena_height = defaults.arena_height;
        }
        if !positive(self.prey_interval) {
            self.prey_interval = defaults.prey_interval;
        }
        if !positive(self.hook_interval) {
            self.hook_interval = defaults.hook_interval;
        }
        if !self.crab_chance.is_finite() {
            self.crab_chance = defaults.crab_chance;
        }
        self.crab_chance = self.crab_chance.clamp(0.0, 1.0);
        if !self.prey_padding.is_finite() || self.prey_padding < 0.0 {
            self.prey_padding = defaults.prey_padding;
        }
        self.prey_padding = self
            .prey_padding
            .min(self.arena_width / 2.0)
            .min(self.arena_height / 2.0);

        let depth_ok = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !depth_ok(self.hook_depth_min)
            || !depth_ok(self.hook_depth_max)
            || self.hook_depth_min > self.hook_depth_max
        {
            self.hook_depth_min = defaults.hook_depth_min;
            self.hook_depth_max = defaults.hook_depth_max;
        }
        self
    }
}
