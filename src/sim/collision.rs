//! Collision detection and response
//!
//! Circle-circle contacts against pegs, side-wall clamping and the
//! circle-rectangle landing test against containers. Everything here is pure
//! and deterministic; random kicks are applied by the caller.

use glam::Vec2;

use super::state::{Ball, Container, Peg};
use crate::consts::BOUNCE_FACTOR;
use crate::contact_normal;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal from obstacle toward ball center
    pub normal: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
        }
    }
}

/// Which side wall a ball was pushed back from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
}

/// Check overlap between a ball and a circular peg
///
/// Touching exactly (distance == radii sum) is not a contact.
pub fn ball_peg_collision(ball_pos: Vec2, ball_radius: f32, peg_pos: Vec2, peg_radius: f32) -> CollisionResult {
    let reach = ball_radius + peg_radius;
    let dist = ball_pos.distance(peg_pos);
    if dist >= reach {
        return CollisionResult::miss();
    }

    let normal = contact_normal(peg_pos, ball_pos);
    CollisionResult {
        hit: true,
        normal,
    }
}

/// Push the ball out of `peg` along the contact normal and redirect its
/// velocity along that normal at `speed * BOUNCE_FACTOR`
///
/// Returns `false` (ball untouched) when there is no contact.
pub fn resolve_peg_contact(ball: &mut Ball, peg: &Peg) -> bool {
    let result = ball_peg_collision(ball.pos, ball.radius, peg.pos, peg.radius);
    if !result.hit {
        return false;
    }

    ball.pos = peg.pos + result.normal * (ball.radius + peg.radius);
    let speed = ball.vel.length();
    ball.vel = result.normal * speed * BOUNCE_FACTOR;
    true
}

/// Clamp the ball inside `[0, width]` and send it back inward with reduced
/// horizontal speed
pub fn resolve_walls(ball: &mut Ball, width: f32) -> Option<Wall> {
    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = ball.vel.x.abs() * BOUNCE_FACTOR;
        return Some(Wall::Left);
    }
    if ball.pos.x + ball.radius > width {
        ball.pos.x = width - ball.radius;
        ball.vel.x = -ball.vel.x.abs() * BOUNCE_FACTOR;
        return Some(Wall::Right);
    }
    None
}

/// First container (left to right) whose top edge the ball's bottom has
/// reached while its center lies over the container span
pub fn landing_container(ball: &Ball, containers: &[Container]) -> Option<usize> {
    containers
        .iter()
        .position(|c| ball.bottom() >= c.y && c.spans_x(ball.pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::Field;
    use proptest::prelude::*;

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(1, pos, vel, 0.0)
    }

    #[test]
    fn test_ball_peg_collision_miss_and_touch() {
        let peg = Peg::new(Vec2::new(100.0, 100.0));
        let far = ball_peg_collision(Vec2::new(130.0, 100.0), 8.0, peg.pos, peg.radius);
        assert!(!far.hit);
        // Exactly touching is not a contact
        let touching = ball_peg_collision(Vec2::new(113.0, 100.0), 8.0, peg.pos, peg.radius);
        assert!(!touching.hit);
    }

    #[test]
    fn test_ball_peg_collision_normal_points_at_ball() {
        let peg = Peg::new(Vec2::new(100.0, 100.0));
        let result = ball_peg_collision(Vec2::new(100.0, 90.0), 8.0, peg.pos, peg.radius);
        assert!(result.hit);
        assert!((result.normal - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_resolve_peg_contact_head_on() {
        // Falling straight onto the top of a peg bounces straight up
        let peg = Peg::new(Vec2::new(200.0, 200.0));
        let mut ball = ball_at(Vec2::new(200.0, 190.0), Vec2::new(0.0, 5.0));
        assert!(resolve_peg_contact(&mut ball, &peg));
        assert!((ball.pos - Vec2::new(200.0, 187.0)).length() < 1e-4);
        assert!((ball.vel - Vec2::new(0.0, -3.5)).length() < 1e-4);
    }

    #[test]
    fn test_resolve_peg_contact_coincident_centers() {
        let peg = Peg::new(Vec2::new(50.0, 50.0));
        let mut ball = ball_at(peg.pos, Vec2::new(0.0, 2.0));
        assert!(resolve_peg_contact(&mut ball, &peg));
        assert!((ball.pos - Vec2::new(63.0, 50.0)).length() < 1e-4);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_resolve_walls() {
        let mut left = ball_at(Vec2::new(3.0, 100.0), Vec2::new(-4.0, 1.0));
        assert_eq!(resolve_walls(&mut left, 800.0), Some(Wall::Left));
        assert_eq!(left.pos.x, left.radius);
        assert!((left.vel.x - 2.8).abs() < 1e-5);
        assert_eq!(left.vel.y, 1.0);

        let mut right = ball_at(Vec2::new(797.0, 100.0), Vec2::new(4.0, 1.0));
        assert_eq!(resolve_walls(&mut right, 800.0), Some(Wall::Right));
        assert_eq!(right.pos.x, 800.0 - right.radius);
        assert!((right.vel.x + 2.8).abs() < 1e-5);

        let mut inside = ball_at(Vec2::new(400.0, 100.0), Vec2::new(4.0, 1.0));
        assert_eq!(resolve_walls(&mut inside, 800.0), None);
        assert_eq!(inside.vel.x, 4.0);
    }

    #[test]
    fn test_landing_container() {
        let field = Field::generate();
        let top = field.containers[0].y;

        let above = ball_at(Vec2::new(400.0, top - 20.0), Vec2::ZERO);
        assert_eq!(landing_container(&above, &field.containers), None);

        let center = ball_at(Vec2::new(400.0, top - 8.0), Vec2::ZERO);
        assert_eq!(landing_container(&center, &field.containers), Some(4));

        let edge = ball_at(Vec2::new(field.containers[1].x, top), Vec2::ZERO);
        assert_eq!(landing_container(&edge, &field.containers), Some(0));
    }

    proptest! {
        #[test]
        fn prop_peg_contact_lands_on_surface(
            dx in -12.9f32..12.9,
            dy in -12.9f32..12.9,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            let peg = Peg::new(Vec2::new(400.0, 300.0));
            let mut ball = ball_at(peg.pos + Vec2::new(dx, dy), Vec2::new(vx, vy));
            let speed_before = ball.vel.length();
            prop_assume!(ball.pos.distance(peg.pos) < ball.radius + peg.radius);

            prop_assert!(resolve_peg_contact(&mut ball, &peg));
            let dist = ball.pos.distance(peg.pos);
            prop_assert!((dist - (ball.radius + peg.radius)).abs() < 1e-3);
            let expected = speed_before * BOUNCE_FACTOR;
            prop_assert!((ball.vel.length() - expected).abs() < 1e-3);
            prop_assert!(ball.vel.length() <= speed_before + 1e-4);
        }

        #[test]
        fn prop_walls_keep_ball_inside(x in -50.0f32..850.0, vx in -20.0f32..20.0) {
            let mut ball = ball_at(Vec2::new(x, 100.0), Vec2::new(vx, 0.0));
            match resolve_walls(&mut ball, 800.0) {
                Some(Wall::Left) => {
                    prop_assert_eq!(ball.pos.x, ball.radius);
                    prop_assert!(ball.vel.x >= 0.0);
                }
                Some(Wall::Right) => {
                    prop_assert_eq!(ball.pos.x, 800.0 - ball.radius);
                    prop_assert!(ball.vel.x <= 0.0);
                }
                None => {
                    prop_assert!(ball.pos.x - ball.radius >= 0.0);
                    prop_assert!(ball.pos.x + ball.radius <= 800.0);
                }
            }
        }
    }
}
