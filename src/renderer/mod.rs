//! State-to-drawing conversion
//!
//! Entities stay pure data; this module turns a [`GameState`] snapshot into a
//! flat list of [`DrawCommand`]s that any 2D backend can execute. Nothing here
//! touches the platform, so frames can be built and inspected headlessly.

pub mod palette;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::sim::{Ball, Container, GameState, Peg};
use palette::Rgba;

/// Peg glow reaches this multiple of the peg radius
const GLOW_RADIUS_SCALE: f32 = 3.0;
/// Peak opacity of the white container flash overlay
const FLASH_PEAK_ALPHA: f32 = 0.5;
const LABEL_SIZE_PX: f32 = 20.0;

/// One 2D drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill the whole play area
    Clear { color: Rgba },
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    StrokeRect { origin: Vec2, size: Vec2, color: Rgba, line_width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32, color: Rgba, line_width: f32 },
    /// Radial gradient from `color` at the center to transparent at `radius`
    RadialGlow { center: Vec2, radius: f32, color: Rgba },
    /// Bold text centred on `center`
    Label { center: Vec2, text: String, size_px: f32, color: Rgba },
}

/// Everything needed to paint one refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    /// Painter's order: background, containers, pegs, balls
    pub commands: Vec<DrawCommand>,
}

/// Build the frame for the state's current logical time
pub fn build_frame(state: &GameState, settings: &Settings) -> Frame {
    let now_ms = state.now_ms;
    let mut commands = vec![DrawCommand::Clear {
        color: palette::BACKGROUND,
    }];

    for container in &state.field.containers {
        let flash = if settings.effective_flash() {
            container.flash(now_ms)
        } else {
            0.0
        };
        draw_container(&mut commands, container, flash, settings.point_labels);
    }

    for peg in &state.field.pegs {
        let glow = if settings.effective_glow() {
            peg.glow(now_ms)
        } else {
            0.0
        };
        draw_peg(&mut commands, peg, glow);
    }

    for ball in state.balls.iter().filter(|b| b.is_active) {
        draw_ball(&mut commands, ball);
    }

    Frame {
        width: state.field.width,
        height: state.field.height,
        commands,
    }
}

/// Container fill, optional flash overlay, border and point label
pub fn draw_container(out: &mut Vec<DrawCommand>, container: &Container, flash: f32, label: bool) {
    let origin = Vec2::new(container.x, container.y);
    let size = Vec2::new(container.width, container.height);

    out.push(DrawCommand::FillRect {
        origin,
        size,
        color: Rgba::from_hex(container.color),
    });
    if flash > 0.0 {
        out.push(DrawCommand::FillRect {
            origin,
            size,
            color: Rgba::WHITE.with_alpha(flash * FLASH_PEAK_ALPHA),
        });
    }
    out.push(DrawCommand::StrokeRect {
        origin,
        size,
        color: Rgba::WHITE,
        line_width: 2.0,
    });
    if label {
        out.push(DrawCommand::Label {
            center: container.center(),
            text: container.points.to_string(),
            size_px: LABEL_SIZE_PX,
            color: Rgba::WHITE,
        });
    }
}

/// Peg body, lit while glowing, with a fading halo
pub fn draw_peg(out: &mut Vec<DrawCommand>, peg: &Peg, glow: f32) {
    if glow > 0.0 {
        out.push(DrawCommand::RadialGlow {
            center: peg.pos,
            radius: peg.radius * GLOW_RADIUS_SCALE,
            color: palette::PEG_GLOW.with_alpha(glow),
        });
    }
    out.push(DrawCommand::FillCircle {
        center: peg.pos,
        radius: peg.radius,
        color: if glow > 0.0 { palette::PEG_LIT } else { palette::PEG },
    });
    out.push(DrawCommand::StrokeCircle {
        center: peg.pos,
        radius: peg.radius,
        color: Rgba::WHITE,
        line_width: 1.0,
    });
}

pub fn draw_ball(out: &mut Vec<DrawCommand>, ball: &Ball) {
    out.push(DrawCommand::FillCircle {
        center: ball.pos,
        radius: ball.radius,
        color: palette::ball_fill(ball.hue),
    });
    out.push(DrawCommand::StrokeCircle {
        center: ball.pos,
        radius: ball.radius,
        color: palette::BALL_OUTLINE,
        line_width: 2.0,
    });
}
