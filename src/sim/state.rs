//! Session state and core simulation types
//!
//! The `Session` owns every entity; nothing outlives it. Hosts talk to it
//! through `advance`, `on_tap`, `restart` and the two spawn calls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hook::{Hook, HookPhaseKind};
use super::tick::{TickInput, tick};
use crate::consts::*;
use crate::{is_finite_point, sanitize_dt};

/// Plain position
pub type Point2D = Vec2;
/// Direction, kept at (roughly) unit length by the operations that write it
pub type UnitVector = Vec2;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Head left the arena
    Wall,
    /// Head ran into its own body
    SelfTangle,
    /// Head was caught by a hook and reeled up
    Hooked,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "wall",
            GameOverReason::SelfTangle => "self-tangle",
            GameOverReason::Hooked => "hooked",
        }
    }
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Normal play
    Alive,
    /// Head pinned to a hook that is reeling it out
    Retracting { hook_id: u32 },
    /// Run over; only a restart gets out of here
    Dead { reason: GameOverReason },
}

/// Prey types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreyKind {
    #[default]
    Fish,
    Crab,
}

impl PreyKind {
    /// Segments gained by eating one
    pub fn reward(&self) -> u32 {
        match self {
            PreyKind::Fish => 1,
            PreyKind::Crab => 3,
        }
    }
}

/// A prey entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prey {
    pub id: u32,
    pub pos: Point2D,
    pub kind: PreyKind,
    /// Session clock (seconds) at spawn
    pub spawn_time: f32,
}

impl Prey {
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.spawn_time >= PREY_TTL
    }
}

/// The player's eel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eel {
    pub head: Point2D,
    /// Actual travel direction (not intent)
    pub heading: UnitVector,
    /// Chain order: index 0 is nearest the head
    pub body: Vec<Point2D>,
    /// Segments still to be appended at the tail
    pub pending_growth: u32,
}

impl Eel {
    /// Starter eel: head a third of the way down, heading down, body stacked above
    pub fn new(width: f32, height: f32) -> Self {
        let head = Vec2::new(width / 2.0, height / 3.0);
        let body = (1..=INITIAL_SEGMENTS)
            .map(|i| Vec2::new(head.x, head.y - i as f32 * SEGMENT_SPACING))
            .collect();
        Self {
            head,
            heading: Vec2::Y,
            body,
            pending_growth: 0,
        }
    }

    /// Body length including growth not yet appended
    pub fn total_length(&self) -> usize {
        self.body.len() + self.pending_growth as usize
    }
}

/// Where the head is steering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteeringTarget {
    pub current: Point2D,
    /// Second leg of an assisted turn, consumed on arrival at `current`
    pub queued: Option<Point2D>,
}

/// Events for the rendering layer, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PreyEaten { id: u32, kind: PreyKind },
    PreyExpired { id: u32 },
    HookSpawned { id: u32 },
    HookReeling { id: u32 },
    /// `segments` tail segments starting at body `index` now ride hook `hook_id`.
    /// A hit on body index 0 still cuts at 1, so `index` is not always the
    /// segment the hook touched.
    TailCut { hook_id: u32, index: usize, segments: usize },
    HookGone { id: u32 },
    EelHooked { hook_id: u32 },
    GameOver { reason: GameOverReason },
}

/// Per-run statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub elapsed_secs: f32,
    pub prey_eaten: u32,
    pub growth_gained: u32,
    pub segments_lost: u32,
}

/// Complete simulation state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub width: f32,
    pub height: f32,
    pub state: SessionState,
    pub eel: Eel,
    pub target: SteeringTarget,
    pub prey: Vec<Prey>,
    pub hooks: Vec<Hook>,
    /// Simulated seconds since the run started
    pub clock: f32,
    pub stats: RunStats,
    #[serde(skip)]
    events: Vec<GameEvent>,
    #[serde(skip)]
    pending_taps: Vec<Point2D>,
    /// Frame time not yet consumed by a fixed step
    #[serde(skip)]
    accumulator: f32,
    next_id: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl Session {
    /// Fresh run in an arena of the given size
    pub fn new(width: f32, height: f32) -> Self {
        let eel = Eel::new(width, height);
        let target = SteeringTarget {
            current: eel.head + Vec2::new(0.0, INITIAL_DRIFT),
            queued: None,
        };
        Self {
            width,
            height,
            state: SessionState::Alive,
            eel,
            target,
            prey: Vec::new(),
            hooks: Vec::new(),
            clock: 0.0,
            stats: RunStats::default(),
            events: Vec::new(),
            pending_taps: Vec::new(),
            accumulator: 0.0,
            next_id: 1,
        }
    }

    /// Advance the simulation by one frame of `dt` seconds
    ///
    /// The frame is run as whole `SIM_DT` ticks; the remainder carries over to
    /// the next call. Buffered taps go to the first tick that runs.
    pub fn advance(&mut self, dt: f32) {
        if self.is_dead() {
            self.pending_taps.clear();
            return;
        }
        self.accumulator += sanitize_dt(dt);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                taps: std::mem::take(&mut self.pending_taps),
            };
            tick(self, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Buffer a tap; applied at the start of the next tick
    pub fn on_tap(&mut self, point: Point2D) {
        if !is_finite_point(point) {
            log::warn!("Ignoring non-finite tap {:?}", point);
            return;
        }
        self.pending_taps.push(point);
    }

    /// Discard the whole run and start over from the initial configuration
    pub fn restart(&mut self) {
        log::info!("Session restart ({}x{})", self.width, self.height);
        *self = Self::new(self.width, self.height);
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.state, SessionState::Dead { .. })
    }

    /// Spawns are accepted while the run is still in progress
    fn accepts_spawns(&self) -> bool {
        !self.is_dead()
    }

    /// Create a prey; returns its id, or None if rejected
    pub fn spawn_prey(&mut self, pos: Point2D, kind: PreyKind) -> Option<u32> {
        if !self.accepts_spawns() {
            return None;
        }
        if !is_finite_point(pos) {
            log::warn!("Ignoring prey spawn at non-finite {:?}", pos);
            return None;
        }
        let id = self.next_entity_id();
        self.prey.push(Prey {
            id,
            pos,
            kind,
            spawn_time: self.clock,
        });
        log::debug!("Prey {} ({:?}) spawned at {:?}", id, kind, pos);
        Some(id)
    }

    /// Drop a hook at `x` that will descend to `depth`; returns its id, or None if rejected
    pub fn spawn_hook(&mut self, x: f32, depth: f32) -> Option<u32> {
        if !self.accepts_spawns() {
            return None;
        }
        if !x.is_finite() || !depth.is_finite() {
            log::warn!("Ignoring hook spawn at non-finite x={} depth={}", x, depth);
            return None;
        }
        let id = self.next_entity_id();
        let hook = Hook::new(id, x.clamp(0.0, self.width), depth.clamp(0.0, self.height));
        self.hooks.push(hook);
        self.push_event(GameEvent::HookSpawned { id });
        log::debug!("Hook {} dropped at x={} to depth {}", id, x, depth);
        Some(id)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Terminal transition. Emits exactly one `GameOver`; no-op once dead.
    pub(crate) fn end_session(&mut self, reason: GameOverReason) {
        if self.is_dead() {
            return;
        }
        log::info!(
            "Game over: {} after {:.1}s (length {})",
            reason,
            self.stats.elapsed_secs,
            self.eel.total_length()
        );
        self.state = SessionState::Dead { reason };
        self.push_event(GameEvent::GameOver { reason });
    }

    /// Render-facing view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            head: self.eel.head,
            heading: self.eel.heading,
            body: self.eel.body.clone(),
            prey: self
                .prey
                .iter()
                .map(|p| PreyView {
                    pos: p.pos,
                    kind: p.kind,
                })
                .collect(),
            hooks: self
                .hooks
                .iter()
                .map(|h| HookView {
                    id: h.id,
                    tip: h.tip(),
                    phase: h.phase_kind(),
                    cargo: h.cargo_positions(),
                })
                .collect(),
            state: self.state,
            stats: self.stats.clone(),
        }
    }
}

/// Prey as seen by the renderer
#[derive(Debug, Clone, Serialize)]
pub struct PreyView {
    pub pos: Point2D,
    pub kind: PreyKind,
}

/// Hook as seen by the renderer
#[derive(Debug, Clone, Serialize)]
pub struct HookView {
    pub id: u32,
    pub tip: Point2D,
    pub phase: HookPhaseKind,
    /// Cargo segments in world space
    pub cargo: Vec<Point2D>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub head: Point2D,
    pub heading: UnitVector,
    pub body: Vec<Point2D>,
    pub prey: Vec<PreyView>,
    pub hooks: Vec<HookView>,
    pub state: SessionState,
    pub stats: RunStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session() {
        let session = Session::new(ARENA_WIDTH, ARENA_HEIGHT);
        assert_eq!(session.state, SessionState::Alive);
        assert_eq!(session.eel.head, Vec2::new(160.0, ARENA_HEIGHT / 3.0));
        assert_eq!(session.eel.heading, Vec2::Y);
        assert_eq!(session.eel.body.len(), INITIAL_SEGMENTS);
        assert_eq!(session.eel.body[0].y, session.eel.head.y - SEGMENT_SPACING);
        assert_eq!(session.target.current.y, session.eel.head.y + INITIAL_DRIFT);
        assert!(session.target.queued.is_none());
        assert!(session.prey.is_empty() && session.hooks.is_empty());
    }

    #[test]
    fn test_end_session_emits_once() {
        let mut session = Session::default();
        session.end_session(GameOverReason::Wall);
        session.end_session(GameOverReason::SelfTangle);
        let overs: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(
            overs,
            vec![GameEvent::GameOver {
                reason: GameOverReason::Wall
            }]
        );
        assert_eq!(
            session.state,
            SessionState::Dead {
                reason: GameOverReason::Wall
            }
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut session = Session::default();
        session.on_tap(Vec2::new(f32::NAN, 10.0));
        assert!(session.pending_taps.is_empty());
        assert!(session.spawn_prey(Vec2::new(f32::INFINITY, 0.0), PreyKind::Fish).is_none());
        assert!(session.spawn_hook(f32::NAN, 100.0).is_none());
        assert!(session.prey.is_empty() && session.hooks.is_empty());
    }

    #[test]
    fn test_spawns_rejected_when_dead() {
        let mut session = Session::default();
        session.end_session(GameOverReason::Wall);
        assert!(session.spawn_prey(Vec2::new(10.0, 10.0), PreyKind::Crab).is_none());
        assert!(session.spawn_hook(50.0, 100.0).is_none());
    }

    #[test]
    fn test_hook_spawn_clamped() {
        let mut session = Session::default();
        let id = session.spawn_hook(-40.0, 9999.0).unwrap();
        let hook = session.hooks.iter().find(|h| h.id == id).unwrap();
        assert_eq!(hook.tip().x, 0.0);
        assert_eq!(hook.depth, ARENA_HEIGHT);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = Session::default();
        session.spawn_prey(Vec2::new(40.0, 40.0), PreyKind::Fish);
        session.spawn_hook(100.0, 200.0);
        session.eel.pending_growth = 4;
        session.end_session(GameOverReason::Wall);
        session.restart();
        assert_eq!(session.state, SessionState::Alive);
        assert!(session.prey.is_empty() && session.hooks.is_empty());
        assert_eq!(session.eel.total_length(), INITIAL_SEGMENTS);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_advance_runs_fixed_steps() {
        let mut session = Session::default();
        session.advance(SIM_DT * 0.5);
        assert_eq!(session.clock, 0.0);
        // The half step left over completes on the next call
        session.advance(SIM_DT * 0.5);
        assert!((session.clock - SIM_DT).abs() < 1e-6);

        session.advance(1.0 / 30.0);
        assert!((session.clock - 5.0 * SIM_DT).abs() < 1e-5);
    }

    #[test]
    fn test_hitch_is_capped() {
        let mut session = Session::default();
        session.advance(5.0);
        // At most one capped frame of ticks runs; the rest of the hitch is dropped
        assert!(session.clock <= MAX_FRAME_DT + 1e-4);
        assert!(session.clock >= MAX_FRAME_DT - SIM_DT - 1e-4);
    }

    #[test]
    fn test_taps_wait_for_a_tick() {
        let mut session = Session::default();
        let tap = session.eel.head + Vec2::new(100.0, 0.0);
        session.on_tap(tap);
        session.advance(0.0);
        assert_eq!(session.pending_taps.len(), 1);
        session.advance(SIM_DT);
        assert!(session.pending_taps.is_empty());
        assert_eq!(session.target.current, tap);
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(GameOverReason::Wall.as_str(), "wall");
        assert_eq!(GameOverReason::SelfTangle.to_string(), "self-tangle");
        assert_eq!(GameOverReason::Hooked.as_str(), "hooked");
        assert_eq!(PreyKind::Fish.reward(), 1);
        assert_eq!(PreyKind::Crab.reward(), 3);
    }
}
