//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; there are no
//! module-level globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::schedule::{ScheduledEvent, Scheduler};
use crate::consts::*;
use crate::decay_intensity;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Hue in degrees; drawn as hsl(hue, 70%, 60%)
    pub hue: f32,
    /// Cleared when the ball is lost or retired after landing
    pub is_active: bool,
    /// Set once on landing; the ball is frozen from then on
    pub has_scored: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, hue: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: BALL_RADIUS,
            hue,
            is_active: true,
            has_scored: false,
        }
    }

    /// Lowest point of the ball (screen y grows downward)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Pin the ball in place after landing
    pub fn freeze(&mut self) {
        self.has_scored = true;
        self.vel = Vec2::ZERO;
    }
}

/// A static circular obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
    pub radius: f32,
    /// Logical time of the most recent contact
    pub last_hit_ms: Option<f64>,
}

impl Peg {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PEG_RADIUS,
            last_hit_ms: None,
        }
    }

    pub fn notify_hit(&mut self, now_ms: f64) {
        self.last_hit_ms = Some(now_ms);
    }

    /// Glow strength in [0, 1], fading over [`PEG_GLOW_MS`]
    pub fn glow(&self, now_ms: f64) -> f32 {
        decay_intensity(self.last_hit_ms, now_ms, PEG_GLOW_MS)
    }
}

/// A scoring bin along the bottom edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub points: u32,
    /// 0xRRGGBB
    pub color: u32,
    pub last_flash_ms: Option<f64>,
}

impl Container {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Horizontal span check, inclusive at both edges
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.x && x <= self.right()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn notify_flash(&mut self, now_ms: f64) {
        self.last_flash_ms = Some(now_ms);
    }

    /// Flash strength in [0, 1], fading over [`CONTAINER_FLASH_MS`]
    pub fn flash(&self, now_ms: f64) -> f32 {
        decay_intensity(self.last_flash_ms, now_ms, CONTAINER_FLASH_MS)
    }
}

/// Running totals shown in the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    pub total_score: u64,
    pub balls_dropped: u64,
}

impl ScoreLedger {
    pub fn record_drop(&mut self) {
        self.balls_dropped += 1;
    }

    pub fn record_landing(&mut self, points: u32) {
        self.total_score += u64::from(points);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Things that happened during a tick, for HUD/audio/logging consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallSpawned { ball_id: u32 },
    PegHit { ball_id: u32, peg_index: usize },
    WallBounce { ball_id: u32 },
    Landed { ball_id: u32, container_index: usize, points: u32 },
    /// Fell below the play area without scoring
    BallLost { ball_id: u32 },
    /// Removed after its landing linger elapsed
    BallRetired { ball_id: u32 },
    BatchQueued { count: u32 },
    Reset,
}

/// Complete simulation context (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Logical clock (ms since session start)
    pub now_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub field: Field,
    /// Live balls (ascending id, spawn order)
    pub balls: Vec<Ball>,
    pub ledger: ScoreLedger,
    pub scheduler: Scheduler,
    /// Events since the last drain (not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0.0,
            time_ticks: 0,
            field: Field::generate(),
            balls: Vec::new(),
            ledger: ScoreLedger::default(),
            scheduler: Scheduler::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop one ball from the spawn point with random jitter, velocity and hue
    pub fn spawn_ball(&mut self) -> u32 {
        let x = SPAWN_X + (self.rng.random::<f32>() - 0.5) * SPAWN_JITTER;
        let vx = (self.rng.random::<f32>() - 0.5) * SPAWN_VX_RANGE;
        let hue = self.rng.random::<f32>() * 360.0;
        self.spawn_ball_at(Vec2::new(x, SPAWN_Y), Vec2::new(vx, 0.0), hue)
    }

    /// Drop a ball with explicit initial conditions; counts as a drop
    pub fn spawn_ball_at(&mut self, pos: Vec2, vel: Vec2, hue: f32) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, pos, vel, hue));
        self.ledger.record_drop();
        self.events.push(GameEvent::BallSpawned { ball_id: id });
        log::debug!("Ball {} spawned at ({:.1}, {:.1})", id, pos.x, pos.y);
        id
    }

    /// Queue `count` drops, one every [`BATCH_SPACING_MS`] starting one
    /// spacing from now. A count of zero queues nothing.
    pub fn spawn_batch(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        self.scheduler.schedule(
            self.now_ms + BATCH_SPACING_MS,
            ScheduledEvent::BatchSpawn { remaining: count },
        );
        self.events.push(GameEvent::BatchQueued { count });
        log::info!("Queued batch of {} balls", count);
    }

    /// Clear balls, zero the ledger, rebuild the field and cancel every
    /// pending scheduled event (including in-flight batches)
    pub fn reset(&mut self) {
        let cancelled = self.scheduler.len();
        self.balls.clear();
        self.ledger.reset();
        self.field = Field::generate();
        self.scheduler.clear();
        self.events.push(GameEvent::Reset);
        log::info!("Session reset ({} scheduled events cancelled)", cancelled);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Refresh delta for runs without a display: one frame, or a jump to the
    /// next scheduled event while the board is empty
    pub fn headless_step_ms(&self) -> f64 {
        match self.scheduler.next_due() {
            Some(due) if self.balls.is_empty() => (due - self.now_ms).max(FRAME_MS),
            _ => FRAME_MS,
        }
    }

    /// No live balls and nothing left to spawn
    pub fn is_settled(&self) -> bool {
        self.balls.is_empty() && self.scheduler.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ball_within_jitter() {
        let mut state = GameState::new(7);
        for _ in 0..50 {
            state.spawn_ball();
        }
        assert_eq!(state.ledger.balls_dropped, 50);
        for ball in &state.balls {
            assert!((ball.pos.x - SPAWN_X).abs() <= SPAWN_JITTER / 2.0);
            assert_eq!(ball.pos.y, SPAWN_Y);
            assert!(ball.vel.x.abs() <= SPAWN_VX_RANGE / 2.0);
            assert_eq!(ball.vel.y, 0.0);
            assert!((0.0..360.0).contains(&ball.hue));
            assert!(ball.is_active && !ball.has_scored);
        }
    }

    #[test]
    fn test_ids_are_unique_and_ascending() {
        let mut state = GameState::new(1);
        let a = state.spawn_ball();
        let b = state.spawn_ball();
        assert!(b > a);
    }

    #[test]
    fn test_spawn_batch_zero_is_noop() {
        let mut state = GameState::new(1);
        state.spawn_batch(0);
        assert!(state.scheduler.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = GameState::new(3);
        state.spawn_ball();
        state.spawn_batch(4);
        state.ledger.record_landing(50);
        state.field.pegs[0].notify_hit(10.0);

        state.reset();

        assert!(state.balls.is_empty());
        assert_eq!(state.ledger, ScoreLedger::default());
        assert!(state.scheduler.is_empty());
        assert_eq!(state.field, Field::generate());
        assert!(state.is_settled());
    }

    #[test]
    fn test_headless_step_skips_idle_time() {
        let mut state = GameState::new(1);
        assert_eq!(state.headless_step_ms(), FRAME_MS);

        state.spawn_batch(2);
        assert_eq!(state.headless_step_ms(), BATCH_SPACING_MS);

        state.spawn_ball();
        assert_eq!(state.headless_step_ms(), FRAME_MS);
    }

    #[test]
    fn test_glow_and_flash_decay() {
        let mut peg = Peg::new(Vec2::new(100.0, 100.0));
        assert_eq!(peg.glow(0.0), 0.0);
        peg.notify_hit(1000.0);
        assert!((peg.glow(1000.0) - 1.0).abs() < 1e-6);
        assert!((peg.glow(1100.0) - 0.5).abs() < 1e-6);
        assert_eq!(peg.glow(1200.0), 0.0);

        let mut container = Field::generate().containers[0].clone();
        container.notify_flash(0.0);
        assert!(container.flash(150.0) > 0.49 && container.flash(150.0) < 0.51);
        assert_eq!(container.flash(300.0), 0.0);
    }
}
