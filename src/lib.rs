//! Plinko Drop - balls fall through a peg field into scoring containers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scheduling, score)
//! - `renderer`: Pure state-to-draw-command conversion
//! - `settings`: Cosmetic preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Physics values are per simulation tick; one tick runs per display refresh.
pub mod consts {
    /// Nominal refresh interval used when no frame timing is available (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.3;
    /// Horizontal velocity multiplier applied every tick (air resistance)
    pub const HORIZONTAL_DAMPING: f32 = 0.98;
    /// Fraction of speed kept on every reflective collision
    pub const BOUNCE_FACTOR: f32 = 0.7;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// How far below the play area a ball may fall before it is lost
    pub const LOST_MARGIN: f32 = 100.0;
    /// Time a landed ball stays visible before removal (ms)
    pub const LANDING_LINGER_MS: f64 = 1000.0;

    /// Spawn point and randomization
    pub const SPAWN_X: f32 = PLAY_WIDTH / 2.0;
    pub const SPAWN_Y: f32 = 20.0;
    /// Total width of the horizontal spawn jitter band (±half)
    pub const SPAWN_JITTER: f32 = 50.0;
    /// Initial horizontal velocity range (±half)
    pub const SPAWN_VX_RANGE: f32 = 2.0;
    /// Horizontal kick range added on every peg contact (±half)
    pub const PEG_KICK_RANGE: f32 = 2.0;

    /// Delay between paced batch spawns (ms)
    pub const BATCH_SPACING_MS: f64 = 200.0;

    /// Peg lattice
    pub const PEG_RADIUS: f32 = 5.0;
    pub const PEG_ROWS: usize = 10;
    pub const PEG_SPACING: f32 = 60.0;
    pub const PEG_START_Y: f32 = 80.0;
    /// Pegs in the first row; each row adds one
    pub const PEG_FIRST_ROW_COUNT: usize = 3;

    /// Container row
    pub const CONTAINER_HEIGHT: f32 = 60.0;

    /// Glow decay windows (ms)
    pub const PEG_GLOW_MS: f64 = 200.0;
    pub const CONTAINER_FLASH_MS: f64 = 300.0;
}

/// Linear decay from 1 at the event to 0 after `window_ms`.
///
/// Returns 0 when the event never happened.
#[inline]
pub fn decay_intensity(event_ms: Option<f64>, now_ms: f64, window_ms: f64) -> f32 {
    match event_ms {
        Some(at) => (1.0 - (now_ms - at) / window_ms).clamp(0.0, 1.0) as f32,
        None => 0.0,
    }
}

/// Unit vector from `from` toward `to`, or +X when the points coincide
#[inline]
pub fn contact_normal(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}
