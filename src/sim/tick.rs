//! Per-frame simulation step
//!
//! Order within a tick: buffered taps -> target reacquisition -> head ->
//! body chain -> hooks -> prey expiry -> collisions. Hooks are moved before
//! collisions so every test sees this tick's tip and cargo positions.

use glam::Vec2;

use super::collision::{hits_wall, hook_cut_index, hook_on_head, prey_in_reach, self_collision};
use super::hook::HookStep;
use super::locomotion::{advance_chain, advance_head};
use super::state::{GameEvent, GameOverReason, Session, SessionState};
use super::steering::{handle_tap, reacquire_target};

/// Input gathered between ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Taps in arrival order
    pub taps: Vec<Vec2>,
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if session.is_dead() {
        return;
    }

    session.clock += dt;
    session.stats.elapsed_secs += dt;

    if session.state == SessionState::Alive {
        for &tap in &input.taps {
            let outcome = handle_tap(&session.eel, &mut session.target, tap);
            log::debug!("Tap at {:?}: {:?}", tap, outcome);
        }
        reacquire_target(&mut session.eel, &mut session.target);
        advance_head(&mut session.eel, session.target.current, dt);
        advance_chain(&mut session.eel);
    }

    update_hooks(session, dt);
    if session.is_dead() {
        return;
    }

    if let SessionState::Retracting { hook_id } = session.state {
        // Head is pinned to the captor; the body dangles behind it
        if let Some(hook) = session.hooks.iter().find(|h| h.id == hook_id) {
            session.eel.head = hook.tip();
        }
        advance_chain(&mut session.eel);
    }

    expire_prey(session);

    if session.state == SessionState::Alive {
        resolve_collisions(session);
    }
}

/// Run every hook's phase timer; drop finished hooks with their cargo
fn update_hooks(session: &mut Session, dt: f32) {
    let mut finished = Vec::new();
    let mut reeling = Vec::new();

    for hook in session.hooks.iter_mut() {
        match hook.update(dt) {
            HookStep::Moving => {}
            HookStep::StartedReeling => reeling.push(hook.id),
            HookStep::Finished => finished.push(hook.id),
        }
    }

    for id in reeling {
        session.push_event(GameEvent::HookReeling { id });
    }

    if finished.is_empty() {
        return;
    }
    session.hooks.retain(|h| !finished.contains(&h.id));
    for &id in &finished {
        log::debug!("Hook {} reeled out", id);
        session.push_event(GameEvent::HookGone { id });
    }

    if let SessionState::Retracting { hook_id } = session.state {
        if finished.contains(&hook_id) {
            session.end_session(GameOverReason::Hooked);
        }
    }
}

fn expire_prey(session: &mut Session) {
    let now = session.clock;
    let mut expired = Vec::new();
    session.prey.retain(|p| {
        if p.is_expired(now) {
            expired.push(p.id);
            false
        } else {
            true
        }
    });
    for id in expired {
        session.push_event(GameEvent::PreyExpired { id });
    }
}

/// Collision pass for a live eel
///
/// A hook on the head wins over everything else this tick. Otherwise: wall,
/// prey, self, then hook-on-body cuts in hook order. Each cut is applied
/// before the next hook is tested, so later hooks only see what is left of
/// the body.
fn resolve_collisions(session: &mut Session) {
    let head = session.eel.head;

    if let Some(i) = hook_on_head(head, &session.hooks) {
        let hook = &mut session.hooks[i];
        hook.start_reel();
        let hook_id = hook.id;
        session.eel.head = hook.tip();
        // Pull the body up behind the pinned head
        advance_chain(&mut session.eel);
        session.state = SessionState::Retracting { hook_id };
        log::info!("Eel caught by hook {}", hook_id);
        session.push_event(GameEvent::HookReeling { id: hook_id });
        session.push_event(GameEvent::EelHooked { hook_id });
        return;
    }

    if hits_wall(head, session.width, session.height) {
        session.end_session(GameOverReason::Wall);
        return;
    }

    let captured = prey_in_reach(head, &session.prey);
    // Remove back to front so earlier indices stay valid
    for &i in captured.iter().rev() {
        let prey = session.prey.remove(i);
        let reward = prey.kind.reward();
        session.eel.pending_growth += reward;
        session.stats.prey_eaten += 1;
        session.stats.growth_gained += reward;
        log::debug!("Ate {:?} {} (+{})", prey.kind, prey.id, reward);
        session.push_event(GameEvent::PreyEaten {
            id: prey.id,
            kind: prey.kind,
        });
    }

    if self_collision(head, &session.eel.body).is_some() {
        session.end_session(GameOverReason::SelfTangle);
        return;
    }

    for i in 0..session.hooks.len() {
        if !session.hooks[i].is_catching() {
            continue;
        }
        let Some(index) = hook_cut_index(session.hooks[i].tip(), &session.eel.body) else {
            continue;
        };

        let severed = session.eel.body.split_off(index);
        let segments = severed.len();
        let hook = &mut session.hooks[i];
        hook.attach_cargo(severed);
        hook.start_reel();
        let hook_id = hook.id;

        session.stats.segments_lost += segments as u32;
        log::debug!("Hook {} cut {} segments at {}", hook_id, segments, index);
        session.push_event(GameEvent::TailCut {
            hook_id,
            index,
            segments,
        });
        session.push_event(GameEvent::HookReeling { id: hook_id });
    }
}
