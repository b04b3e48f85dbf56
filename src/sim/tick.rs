//! Per-refresh simulation tick
//!
//! One explicit Euler step per display refresh; scheduled events fire first,
//! then inactive balls are dropped and the rest advance.

use rand::Rng;

use super::collision::{landing_container, resolve_peg_contact, resolve_walls};
use super::field::Field;
use super::schedule::ScheduledEvent;
use super::state::{Ball, GameEvent, GameState};
use crate::consts::*;

/// One-shot UI requests applied at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop a single ball
    pub drop_ball: bool,
    /// Queue a paced batch of this many balls
    pub drop_batch: Option<u32>,
    /// Start a fresh session
    pub reset: bool,
}

/// What happened to one ball during [`advance_ball`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub wall_bounce: bool,
    /// Peg indices contacted, in resolution order
    pub peg_hits: Vec<usize>,
    /// (container index, points) if the ball landed this step
    pub landed: Option<(usize, u32)>,
    /// Fell past the lost margin this step
    pub lost: bool,
}

/// Advance the session by one refresh of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    state.now_ms += dt_ms.max(0.0);
    state.time_ticks += 1;

    if input.reset {
        state.reset();
    }
    if input.drop_ball {
        state.spawn_ball();
    }
    if let Some(count) = input.drop_batch {
        state.spawn_batch(count);
    }

    fire_due_events(state);

    state.balls.retain(|b| b.is_active);

    let now_ms = state.now_ms;
    let GameState {
        balls, field, rng, ..
    } = state;
    let reports: Vec<StepReport> = balls
        .iter_mut()
        .map(|ball| advance_ball(ball, field, rng, now_ms))
        .collect();

    for (idx, report) in reports.iter().enumerate() {
        let ball_id = state.balls[idx].id;
        apply_report(state, ball_id, report);
    }
}

/// Step one ball: gravity, damping, integration, walls, pegs, landing, loss
///
/// A ball that has already scored is frozen and left untouched. Peg contacts
/// record their hit time on the peg; landing flashes the container. Score and
/// scheduling are applied by the caller from the returned report.
pub fn advance_ball<R: Rng>(ball: &mut Ball, field: &mut Field, rng: &mut R, now_ms: f64) -> StepReport {
    let mut report = StepReport::default();
    if ball.has_scored {
        return report;
    }

    ball.vel.y += GRAVITY;
    ball.vel.x *= HORIZONTAL_DAMPING;
    ball.pos += ball.vel;

    report.wall_bounce = resolve_walls(ball, field.width).is_some();

    // Every peg is tested in field order; the last contact wins
    for (i, peg) in field.pegs.iter_mut().enumerate() {
        if resolve_peg_contact(ball, peg) {
            ball.vel.x += (rng.random::<f32>() - 0.5) * PEG_KICK_RANGE;
            peg.notify_hit(now_ms);
            report.peg_hits.push(i);
        }
    }

    if let Some(i) = landing_container(ball, &field.containers) {
        let container = &mut field.containers[i];
        ball.freeze();
        container.notify_flash(now_ms);
        report.landed = Some((i, container.points));
    }

    if ball.pos.y > field.height + LOST_MARGIN {
        ball.is_active = false;
        report.lost = true;
    }

    report
}

/// Turn a ball's step report into ledger updates, scheduled retirement and
/// events
fn apply_report(state: &mut GameState, ball_id: u32, report: &StepReport) {
    if report.wall_bounce {
        state.events.push(GameEvent::WallBounce { ball_id });
    }
    for &peg_index in &report.peg_hits {
        state.events.push(GameEvent::PegHit { ball_id, peg_index });
    }
    if let Some((container_index, points)) = report.landed {
        state.ledger.record_landing(points);
        state.scheduler.schedule(
            state.now_ms + LANDING_LINGER_MS,
            ScheduledEvent::RetireBall { ball_id },
        );
        state.events.push(GameEvent::Landed {
            ball_id,
            container_index,
            points,
        });
        log::info!(
            "Ball {} landed in container {} for {} points (total {})",
            ball_id,
            container_index,
            points,
            state.ledger.total_score
        );
    }
    if report.lost {
        state.events.push(GameEvent::BallLost { ball_id });
        log::debug!("Ball {} lost below play area", ball_id);
    }
}

/// Fire every scheduled event whose due time has passed
fn fire_due_events(state: &mut GameState) {
    while let Some((due_ms, event)) = state.scheduler.pop_due(state.now_ms) {
        match event {
            ScheduledEvent::RetireBall { ball_id } => {
                if let Some(ball) = state.balls.iter_mut().find(|b| b.id == ball_id) {
                    ball.is_active = false;
                    state.events.push(GameEvent::BallRetired { ball_id });
                }
            }
            ScheduledEvent::BatchSpawn { remaining } => {
                state.spawn_ball();
                if remaining > 1 {
                    state.scheduler.schedule(
                        due_ms + BATCH_SPACING_MS,
                        ScheduledEvent::BatchSpawn {
                            remaining: remaining - 1,
                        },
                    );
                }
            }
        }
    }
}
