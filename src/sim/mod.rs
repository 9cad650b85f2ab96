//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Driven only by `advance(dt)` and buffered taps
//! - Stable iteration order (insertion order of prey, hooks and segments)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hook;
pub mod locomotion;
pub mod math;
pub mod state;
pub mod steering;
pub mod tick;

pub use hook::{Hook, HookPhase, HookPhaseKind};
pub use state::{
    Eel, GameEvent, GameOverReason, Point2D, Prey, PreyKind, RunStats, Session, SessionState,
    Snapshot, SteeringTarget, UnitVector,
};
pub use steering::TapOutcome;
pub use tick::{TickInput, tick};
