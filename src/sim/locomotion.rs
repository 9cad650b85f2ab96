//! Head movement and body-chain following

use super::math::distance;
use super::state::Eel;
use crate::consts::*;
use glam::Vec2;

/// Move the head toward `target` at `EEL_SPEED`
///
/// Inside `ARRIVE_EPSILON` of the target the last heading is kept, so the
/// head does not flip direction around its destination.
pub fn advance_head(eel: &mut Eel, target: Vec2, dt: f32) {
    let delta = target - eel.head;
    let dist = delta.length();

    if dist > ARRIVE_EPSILON {
        eel.heading = delta / dist;
    }

    eel.head += eel.heading * EEL_SPEED * dt;
}

/// One relaxation pass over the chain, then append queued growth
///
/// Each segment is pulled toward its leader only when the gap exceeds
/// `SEGMENT_SPACING`; closer segments are left alone (slack on tight turns).
/// New segments start on top of the tail and stretch out over later frames.
pub fn advance_chain(eel: &mut Eel) {
    let mut lead = eel.head;

    for segment in eel.body.iter_mut() {
        let gap = distance(lead, *segment);
        if gap > SEGMENT_SPACING {
            let pull = (gap - SEGMENT_SPACING) / gap;
            *segment += (lead - *segment) * pull;
        }
        lead = *segment;
    }

    while eel.pending_growth > 0 {
        let tail = eel.body.last().copied().unwrap_or(eel.head);
        eel.body.push(tail);
        eel.pending_growth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn eel_at(head: Vec2, body: Vec<Vec2>) -> Eel {
        Eel {
            head,
            heading: Vec2::Y,
            body,
            pending_growth: 0,
        }
    }

    #[test]
    fn test_head_moves_at_constant_speed() {
        let mut eel = eel_at(Vec2::new(100.0, 100.0), vec![]);
        advance_head(&mut eel, Vec2::new(200.0, 100.0), 0.5);
        assert!((eel.head.x - 170.0).abs() < 1e-4);
        assert_eq!(eel.heading, Vec2::X);
    }

    #[test]
    fn test_head_keeps_heading_near_target() {
        let mut eel = eel_at(Vec2::new(100.0, 100.0), vec![]);
        eel.heading = Vec2::X;
        // Target slightly behind, within the arrive distance
        advance_head(&mut eel, Vec2::new(99.5, 100.0), 0.1);
        assert_eq!(eel.heading, Vec2::X);
        assert!((eel.head.x - 114.0).abs() < 1e-4);
    }

    #[test]
    fn test_frame_rate_independence() {
        let target = Vec2::new(500.0, 100.0);
        let mut a = eel_at(Vec2::new(100.0, 100.0), vec![]);
        let mut b = a.clone();
        advance_head(&mut a, target, 0.5);
        for _ in 0..50 {
            advance_head(&mut b, target, 0.01);
        }
        assert!(a.head.distance(b.head) < 1e-2);
    }

    #[test]
    fn test_chain_pulls_to_exact_spacing() {
        let mut eel = eel_at(Vec2::ZERO, vec![Vec2::new(0.0, -50.0), Vec2::new(0.0, -45.0)]);
        advance_chain(&mut eel);
        assert!((eel.body[0].y + SEGMENT_SPACING).abs() < 1e-4);
        // Second segment is 17 from the new leader position: left alone
        assert_eq!(eel.body[1], Vec2::new(0.0, -45.0));
    }

    #[test]
    fn test_growth_appends_at_tail() {
        let mut eel = eel_at(Vec2::ZERO, vec![Vec2::new(0.0, -28.0)]);
        eel.pending_growth = 3;
        advance_chain(&mut eel);
        assert_eq!(eel.body.len(), 4);
        assert_eq!(eel.pending_growth, 0);
        assert!(eel.body[1..].iter().all(|&s| s == Vec2::new(0.0, -28.0)));
    }

    #[test]
    fn test_growth_on_empty_body_starts_at_head() {
        let mut eel = eel_at(Vec2::new(5.0, 5.0), vec![]);
        eel.pending_growth = 1;
        advance_chain(&mut eel);
        assert_eq!(eel.body, vec![Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn test_growth_stretches_out_over_frames() {
        let mut eel = eel_at(Vec2::new(100.0, 100.0), vec![Vec2::new(100.0, 72.0)]);
        eel.pending_growth = 1;
        advance_chain(&mut eel);
        for _ in 0..60 {
            advance_head(&mut eel, Vec2::new(100.0, 1000.0), 1.0 / 60.0);
            advance_chain(&mut eel);
        }
        let gap = eel.body[0].distance(eel.body[1]);
        assert!((gap - SEGMENT_SPACING).abs() < 1e-2);
    }

    proptest! {
        #[test]
        fn prop_chain_gaps_never_exceed_spacing(
            head in (0.0f32..320.0, 0.0f32..512.0),
            body in prop::collection::vec((0.0f32..320.0, 0.0f32..512.0), 0..12),
            growth in 0u32..5,
        ) {
            let mut eel = eel_at(
                Vec2::new(head.0, head.1),
                body.into_iter().map(|(x, y)| Vec2::new(x, y)).collect(),
            );
            eel.pending_growth = growth;
            advance_chain(&mut eel);

            let mut lead = eel.head;
            for seg in &eel.body {
                prop_assert!(lead.distance(*seg) <= SEGMENT_SPACING + 1e-3);
                lead = *seg;
            }
        }
    }
}
