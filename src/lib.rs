//! Eel Hook - a tap-steered eel dodging fishing hooks
//!
//! Core modules:
//! - `sim`: Simulation core (locomotion, body chain, collisions, hook lifecycle)
//! - `spawner`: Default prey/hook spawn policy (seeded RNG)
//! - `settings`: Runtime configuration
//! - `wasm`: Browser bindings (wasm32 only)

pub mod settings;
pub mod sim;
pub mod spawner;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use settings::Settings;
pub use spawner::Spawner;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Arena dimensions (screen space, +y down, top edge at y = 0)
    pub const ARENA_WIDTH: f32 = 320.0;
    pub const ARENA_HEIGHT: f32 = 512.0;

    /// Largest frame delta accepted by `advance` (frame hitch guard)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Enough substeps to cover a capped frame
    pub const MAX_SUBSTEPS: u32 = 12;

    /// Eel head speed (units per second)
    pub const EEL_SPEED: f32 = 140.0;
    /// Fixed gap between chain links
    pub const SEGMENT_SPACING: f32 = 28.0;
    /// Body segments the eel starts with
    pub const INITIAL_SEGMENTS: usize = 3;
    /// Initial drift target distance below the head
    pub const INITIAL_DRIFT: f32 = 200.0;
    /// Head keeps its last heading inside this distance of the target
    pub const ARRIVE_EPSILON: f32 = 1.0;

    /// Taps closer than this to the head are ignored
    pub const TAP_DEAD_ZONE: f32 = 24.0;
    /// Dot product below which a tap counts as "behind" the eel
    pub const BEHIND_DOT: f32 = -0.15;
    /// Side-step distance for an assisted turn
    pub const TURN_ARC: f32 = 60.0;
    /// Target counts as reached inside this distance
    pub const REACQUIRE_DISTANCE: f32 = 2.0;
    /// Drift target distance when no target is queued
    pub const DRIFT_DISTANCE: f32 = 1000.0;
    /// Heading is considered undefined below this squared length
    pub const MIN_HEADING_LEN_SQ: f32 = 0.0001;
    /// Heading used when the current one is undefined
    pub const FALLBACK_HEADING: Vec2 = Vec2::NEG_Y;

    /// Collision radii
    pub const PREY_CAPTURE_RADIUS: f32 = 16.0;
    pub const SELF_COLLISION_RADIUS: f32 = 18.0;
    pub const HOOK_COLLISION_RADIUS: f32 = 14.0;
    /// Body segments nearest the head that never count as self-collisions
    pub const SELF_COLLISION_SKIP: usize = 2;

    /// Prey time-to-live (seconds)
    pub const PREY_TTL: f32 = 10.0;

    /// Hook tip relative to its animated marker
    pub const HOOK_TIP_OFFSET: Vec2 = Vec2::new(0.0, 6.0);
    /// Marker height at spawn and at the end of a reel
    pub const HOOK_TOP_Y: f32 = 0.0;
    pub const HOOK_DESCEND_SECS: f32 = 2.0;
    pub const HOOK_BOB_AMPLITUDE: f32 = 6.0;
    pub const HOOK_BOB_PERIOD: f32 = 0.8;
    pub const HOOK_BOB_CYCLES: u32 = 3;
    pub const HOOK_REEL_SECS: f32 = 1.2;
}

/// Clamp a frame delta into `[0, MAX_FRAME_DT]`, mapping NaN/inf/negative to 0
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(consts::MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// True if both coordinates are finite
#[inline]
pub fn is_finite_point(p: Vec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
