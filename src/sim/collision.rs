//! Proximity tests
//!
//! Everything here is a squared-distance radius check (or a rectangle
//! containment test for the arena). No response or mutation happens in this
//! module; `tick` decides what a hit means.

use glam::Vec2;

use super::hook::Hook;
use super::math::within_radius;
use super::state::Prey;
use crate::consts::*;

/// True if the head has left `[0, width] × [0, height]`
#[inline]
pub fn hits_wall(head: Vec2, width: f32, height: f32) -> bool {
    !(0.0..=width).contains(&head.x) || !(0.0..=height).contains(&head.y)
}

/// Indices of every prey within capture range of the head
pub fn prey_in_reach(head: Vec2, prey: &[Prey]) -> Vec<usize> {
    prey.iter()
        .enumerate()
        .filter(|(_, p)| within_radius(head, p.pos, PREY_CAPTURE_RADIUS))
        .map(|(i, _)| i)
        .collect()
}

/// First body index (from `SELF_COLLISION_SKIP` on) touching the head
///
/// The segments right behind the head always sit close to it, so they are
/// never tested.
pub fn self_collision(head: Vec2, body: &[Vec2]) -> Option<usize> {
    body.iter()
        .enumerate()
        .skip(SELF_COLLISION_SKIP)
        .find(|(_, seg)| within_radius(head, **seg, SELF_COLLISION_RADIUS))
        .map(|(i, _)| i)
}

/// First hook still catching whose tip touches the head
pub fn hook_on_head(head: Vec2, hooks: &[Hook]) -> Option<usize> {
    hooks
        .iter()
        .position(|h| h.is_catching() && within_radius(head, h.tip(), HOOK_COLLISION_RADIUS))
}

/// Where a hook tip severs the body, scanning from the head end
///
/// The tail-most segment is never tested, and a hit on the first segment
/// cuts behind it, so the eel always keeps at least one segment. Returns the
/// index of the first segment to remove.
pub fn hook_cut_index(tip: Vec2, body: &[Vec2]) -> Option<usize> {
    let scan = body.len().saturating_sub(1);
    body[..scan]
        .iter()
        .position(|seg| within_radius(tip, *seg, HOOK_COLLISION_RADIUS))
        .map(|i| i.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PreyKind;
    use proptest::prelude::*;

    fn prey(id: u32, x: f32, y: f32) -> Prey {
        Prey {
            id,
            pos: Vec2::new(x, y),
            kind: PreyKind::Fish,
            spawn_time: 0.0,
        }
    }

    fn line_body(n: usize) -> Vec<Vec2> {
        (1..=n)
            .map(|i| Vec2::new(100.0, 100.0 - i as f32 * SEGMENT_SPACING))
            .collect()
    }

    #[test]
    fn test_wall() {
        assert!(!hits_wall(Vec2::new(0.0, 0.0), 320.0, 512.0));
        assert!(!hits_wall(Vec2::new(320.0, 512.0), 320.0, 512.0));
        assert!(hits_wall(Vec2::new(-0.1, 10.0), 320.0, 512.0));
        assert!(hits_wall(Vec2::new(10.0, 512.1), 320.0, 512.0));
    }

    #[test]
    fn test_prey_in_reach_collects_all() {
        let head = Vec2::new(100.0, 100.0);
        let list = vec![prey(1, 110.0, 100.0), prey(2, 200.0, 200.0), prey(3, 100.0, 90.0)];
        assert_eq!(prey_in_reach(head, &list), vec![0, 2]);
    }

    #[test]
    fn test_self_collision_skips_first_two() {
        let head = Vec2::new(100.0, 100.0);
        let body = vec![head, head, Vec2::new(300.0, 300.0), Vec2::new(105.0, 100.0)];
        assert_eq!(self_collision(head, &body), Some(3));
        assert_eq!(self_collision(head, &body[..3]), None);
    }

    #[test]
    fn test_hook_on_head_ignores_reeling() {
        let mut hook = Hook::new(1, 100.0, 100.0);
        let head = hook.tip() + Vec2::new(5.0, 0.0);
        assert_eq!(hook_on_head(head, std::slice::from_ref(&hook)), Some(0));
        hook.start_reel();
        assert_eq!(hook_on_head(head, std::slice::from_ref(&hook)), None);
    }

    #[test]
    fn test_cut_index_scan() {
        let body = line_body(5);
        assert_eq!(hook_cut_index(body[2] + Vec2::new(3.0, 0.0), &body), Some(2));
        // Tail-most segment is never cut
        assert_eq!(hook_cut_index(body[4], &body), None);
        // Leading segment hit keeps it on the eel
        assert_eq!(hook_cut_index(body[0], &body), Some(1));
        assert_eq!(hook_cut_index(body[0], &body[..1]), None);
        assert_eq!(hook_cut_index(Vec2::ZERO, &[]), None);
    }

    proptest! {
        #[test]
        fn prop_self_collision_never_reports_first_two(
            head in (0.0f32..320.0, 0.0f32..512.0),
            body in prop::collection::vec((0.0f32..320.0, 0.0f32..512.0), 0..10),
        ) {
            let head = Vec2::new(head.0, head.1);
            let mut body: Vec<Vec2> = body.into_iter().map(|(x, y)| Vec2::new(x, y)).collect();
            for seg in body.iter_mut().take(SELF_COLLISION_SKIP) {
                *seg = head;
            }
            if let Some(i) = self_collision(head, &body) {
                prop_assert!(i >= SELF_COLLISION_SKIP);
            }
        }
    }
}
