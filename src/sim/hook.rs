//! Hook lifecycle
//!
//! Each hook runs its own phase timer: Descending -> Bobbing -> Reeling ->
//! gone. A collision can cut Descending/Bobbing short by calling
//! [`Hook::start_reel`], which replaces whatever animation was in flight.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::*;

/// Phase timer. `elapsed` counts seconds spent in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HookPhase {
    Descending { elapsed: f32 },
    Bobbing { elapsed: f32 },
    Reeling { elapsed: f32, from_y: f32 },
}

/// Phase without timer data, for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookPhaseKind {
    Descending,
    Bobbing,
    Reeling,
}

/// What a hook did during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStep {
    /// Still animating in the same phase (or moved to Bobbing)
    Moving,
    /// Bob cycles ran out; reeling has started
    StartedReeling,
    /// Reached the top edge; remove it and its cargo
    Finished,
}

/// A fishing hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    pub id: u32,
    /// Animated marker; the tip sits at a fixed offset from it
    pub marker: Vec2,
    /// Target marker depth
    pub depth: f32,
    pub phase: HookPhase,
    /// Severed segments as offsets from the tip
    pub cargo: Option<Vec<Vec2>>,
}

impl Hook {
    pub fn new(id: u32, x: f32, depth: f32) -> Self {
        Self {
            id,
            marker: Vec2::new(x, HOOK_TOP_Y),
            depth,
            phase: HookPhase::Descending { elapsed: 0.0 },
            cargo: None,
        }
    }

    #[inline]
    pub fn tip(&self) -> Vec2 {
        self.marker + HOOK_TIP_OFFSET
    }

    pub fn phase_kind(&self) -> HookPhaseKind {
        match self.phase {
            HookPhase::Descending { .. } => HookPhaseKind::Descending,
            HookPhase::Bobbing { .. } => HookPhaseKind::Bobbing,
            HookPhase::Reeling { .. } => HookPhaseKind::Reeling,
        }
    }

    /// Only hooks that have not started reeling take part in collisions
    pub fn is_catching(&self) -> bool {
        !matches!(self.phase, HookPhase::Reeling { .. })
    }

    /// Cancel any descend/bob animation and reel up from where the marker is now
    pub fn start_reel(&mut self) {
        if !self.is_catching() {
            return;
        }
        self.phase = HookPhase::Reeling {
            elapsed: 0.0,
            from_y: self.marker.y,
        };
    }

    /// Hang severed world-space segments off the tip
    pub fn attach_cargo(&mut self, segments: Vec<Vec2>) {
        let tip = self.tip();
        let offsets = segments.into_iter().map(|s| s - tip).collect();
        self.cargo = Some(offsets);
    }

    /// Cargo segments in world space (empty if none)
    pub fn cargo_positions(&self) -> Vec<Vec2> {
        let tip = self.tip();
        self.cargo
            .as_ref()
            .map(|c| c.iter().map(|&o| tip + o).collect())
            .unwrap_or_default()
    }

    /// Advance the phase timer and reposition the marker
    pub fn update(&mut self, dt: f32) -> HookStep {
        match self.phase {
            HookPhase::Descending { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= HOOK_DESCEND_SECS {
                    // Time past the end of the descent goes to the bob
                    self.marker.y = self.depth;
                    self.phase = HookPhase::Bobbing { elapsed: 0.0 };
                    return self.update(elapsed - HOOK_DESCEND_SECS);
                }
                let t = elapsed / HOOK_DESCEND_SECS;
                self.marker.y = lerp(HOOK_TOP_Y, self.depth, ease_out_sine(t));
                self.phase = HookPhase::Descending { elapsed };
                HookStep::Moving
            }
            HookPhase::Bobbing { elapsed } => {
                let elapsed = elapsed + dt;
                let bob_secs = HOOK_BOB_PERIOD * HOOK_BOB_CYCLES as f32;
                if elapsed >= bob_secs {
                    self.marker.y = self.depth;
                    self.start_reel();
                    if self.update(elapsed - bob_secs) == HookStep::Finished {
                        return HookStep::Finished;
                    }
                    return HookStep::StartedReeling;
                }
                self.marker.y = self.depth + (TAU * elapsed / HOOK_BOB_PERIOD).sin() * HOOK_BOB_AMPLITUDE;
                self.phase = HookPhase::Bobbing { elapsed };
                HookStep::Moving
            }
            HookPhase::Reeling { elapsed, from_y } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / HOOK_REEL_SECS).min(1.0);
                self.marker.y = lerp(from_y, HOOK_TOP_Y, ease_in_sine(t));
                self.phase = HookPhase::Reeling { elapsed, from_y };
                if t >= 1.0 {
                    HookStep::Finished
                } else {
                    HookStep::Moving
                }
            }
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn ease_out_sine(t: f32) -> f32 {
    (t * std::f32::consts::FRAC_PI_2).sin()
}

#[inline]
fn ease_in_sine(t: f32) -> f32 {
    1.0 - (t * std::f32::consts::FRAC_PI_2).cos()
}
