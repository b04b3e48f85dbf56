//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One explicit Euler step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order for balls, field order for pegs)
//! - Timers are scheduled events on the logical clock
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Wall, ball_peg_collision, landing_container, resolve_peg_contact, resolve_walls};
pub use field::{CONTAINER_TABLE, ContainerSpec, Field};
pub use schedule::{ScheduledEvent, Scheduler};
pub use state::{Ball, Container, GameEvent, GameState, Peg, ScoreLedger};
pub use tick::{StepReport, TickInput, advance_ball, tick};
