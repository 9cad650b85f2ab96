//! Tap steering with assisted turns
//!
//! A tap roughly behind the eel does not reverse it in place. Instead the
//! head first side-steps `TURN_ARC` units perpendicular to its heading, then
//! continues on to the tapped point.

use glam::Vec2;

use super::math::{cross_sign, distance, dot, normalize};
use super::state::{Eel, SteeringTarget};
use crate::consts::*;

/// How a tap was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Inside the dead zone around the head
    Ignored,
    /// Target set straight to the tap
    Direct,
    /// Side-step first, tap queued
    AssistedTurn,
}

/// Side of the heading the assisted turn steps to
///
/// Collinear (tap straight behind) resolves to +1, i.e. left of the heading.
#[inline]
pub fn turn_side(heading: Vec2, desired: Vec2) -> f32 {
    let side = cross_sign(heading, desired);
    if side == 0.0 { 1.0 } else { side }
}

/// Interpret a tap into the steering target
pub fn handle_tap(eel: &Eel, target: &mut SteeringTarget, tap: Vec2) -> TapOutcome {
    let head = eel.head;
    let d = distance(head, tap);
    if d < TAP_DEAD_ZONE {
        return TapOutcome::Ignored;
    }

    let desired = (tap - head) / d;
    let heading = eel.heading;

    if dot(desired, heading) < BEHIND_DOT {
        let side = turn_side(heading, desired);
        let perp = Vec2::new(-heading.y * side, heading.x * side);
        target.current = head + perp * TURN_ARC;
        target.queued = Some(tap);
        TapOutcome::AssistedTurn
    } else {
        target.current = tap;
        target.queued = None;
        TapOutcome::Direct
    }
}

/// Pick the next target once the head has (almost) reached the current one
///
/// A queued second leg wins; otherwise the target is pushed far ahead along
/// the heading so the eel keeps drifting. Returns true if the target changed.
pub fn reacquire_target(eel: &mut Eel, target: &mut SteeringTarget) -> bool {
    if distance(eel.head, target.current) >= REACQUIRE_DISTANCE {
        return false;
    }

    if let Some(next) = target.queued.take() {
        target.current = next;
    } else {
        if eel.heading.length_squared() < MIN_HEADING_LEN_SQ {
            eel.heading = FALLBACK_HEADING;
        }
        target.current += normalize(eel.heading) * DRIFT_DISTANCE;
    }
    true
}
