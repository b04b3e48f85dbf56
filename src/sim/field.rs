//! Peg lattice and container row for one play session

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Container, Peg};
use crate::consts::*;

/// Point value and color of one container slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSpec {
    pub points: u32,
    pub color: u32,
}

/// Left-to-right container table: edges pay most, the middle least
pub const CONTAINER_TABLE: [ContainerSpec; 9] = [
    ContainerSpec { points: 100, color: 0xff6b6b },
    ContainerSpec { points: 50, color: 0xfeca57 },
    ContainerSpec { points: 20, color: 0x48dbfb },
    ContainerSpec { points: 10, color: 0x1dd1a1 },
    ContainerSpec { points: 5, color: 0x54a0ff },
    ContainerSpec { points: 10, color: 0x1dd1a1 },
    ContainerSpec { points: 20, color: 0x48dbfb },
    ContainerSpec { points: 50, color: 0xfeca57 },
    ContainerSpec { points: 100, color: 0xff6b6b },
];

/// The fixed arrangement of pegs and containers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    /// Row-major, top row first, left to right
    pub pegs: Vec<Peg>,
    /// Left to right
    pub containers: Vec<Container>,
}

impl Field {
    /// Canonical layout for the standard play area
    pub fn generate() -> Self {
        Self::with_dimensions(PLAY_WIDTH, PLAY_HEIGHT)
    }

    /// Lay out the peg triangle centred on `width / 2` and the container row
    /// flush with the bottom edge
    pub fn with_dimensions(width: f32, height: f32) -> Self {
        let center_x = width / 2.0;

        let mut pegs = Vec::new();
        for row in 0..PEG_ROWS {
            let count = row + PEG_FIRST_ROW_COUNT;
            let row_width = (count - 1) as f32 * PEG_SPACING;
            let row_start = center_x - row_width / 2.0;
            let y = PEG_START_Y + row as f32 * PEG_SPACING;
            for col in 0..count {
                pegs.push(Peg::new(Vec2::new(row_start + col as f32 * PEG_SPACING, y)));
            }
        }

        let slot_width = width / CONTAINER_TABLE.len() as f32;
        let top = height - CONTAINER_HEIGHT;
        let containers = CONTAINER_TABLE
            .iter()
            .enumerate()
            .map(|(i, spec)| Container {
                x: i as f32 * slot_width,
                y: top,
                width: slot_width,
                height: CONTAINER_HEIGHT,
                points: spec.points,
                color: spec.color,
                last_flash_ms: None,
            })
            .collect();

        log::debug!("Field generated: {} pegs, {} containers", pegs.len(), CONTAINER_TABLE.len());

        Self {
            width,
            height,
            pegs,
            containers,
        }
    }

    /// Same pegs and containers, ignoring hit/flash timestamps
    pub fn same_layout(&self, other: &Field) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.pegs.len() == other.pegs.len()
            && self
                .pegs
                .iter()
                .zip(&other.pegs)
                .all(|(a, b)| a.pos == b.pos && a.radius == b.radius)
            && self.containers.len() == other.containers.len()
            && self.containers.iter().zip(&other.containers).all(|(a, b)| {
                a.x == b.x
                    && a.y == b.y
                    && a.width == b.width
                    && a.height == b.height
                    && a.points == b.points
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peg_rows_are_triangular_and_centred() {
        let field = Field::generate();
        let expected: usize = (0..PEG_ROWS).map(|r| r + PEG_FIRST_ROW_COUNT).sum();
        assert_eq!(field.pegs.len(), expected);

        let mut offset = 0;
        for row in 0..PEG_ROWS {
            let count = row + PEG_FIRST_ROW_COUNT;
            let pegs = &field.pegs[offset..offset + count];
            let y = PEG_START_Y + row as f32 * PEG_SPACING;
            assert!(pegs.iter().all(|p| p.pos.y == y));

            let mid = (pegs[0].pos.x + pegs[count - 1].pos.x) / 2.0;
            assert!((mid - PLAY_WIDTH / 2.0).abs() < 1e-3);
            for pair in pegs.windows(2) {
                assert!((pair[1].pos.x - pair[0].pos.x - PEG_SPACING).abs() < 1e-3);
            }
            offset += count;
        }
    }

    #[test]
    fn test_first_row_matches_reference_layout() {
        let field = Field::generate();
        let xs: Vec<f32> = field.pegs[..3].iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![340.0, 400.0, 460.0]);
        assert_eq!(field.pegs[0].pos.y, 80.0);
    }

    #[test]
    fn test_containers_partition_bottom_edge() {
        let field = Field::generate();
        assert_eq!(field.containers.len(), CONTAINER_TABLE.len());
        assert_eq!(field.containers[0].x, 0.0);
        for pair in field.containers.windows(2) {
            assert!((pair[0].right() - pair[1].x).abs() < 1e-3);
        }
        let last = field.containers.last().unwrap();
        assert!((last.right() - PLAY_WIDTH).abs() < 1e-3);
        for c in &field.containers {
            assert_eq!(c.y + c.height, PLAY_HEIGHT);
            assert_eq!(c.height, CONTAINER_HEIGHT);
        }
    }

    #[test]
    fn test_container_values_symmetric() {
        let points: Vec<u32> = Field::generate().containers.iter().map(|c| c.points).collect();
        assert_eq!(points, vec![100, 50, 20, 10, 5, 10, 20, 50, 100]);
        let mut reversed = points.clone();
        reversed.reverse();
        assert_eq!(points, reversed);
    }

    #[test]
    fn test_same_layout_ignores_feedback_state() {
        let a = Field::generate();
        let mut b = Field::generate();
        b.pegs[3].notify_hit(50.0);
        b.containers[2].notify_flash(50.0);
        assert_ne!(a, b);
        assert!(a.same_layout(&b));
        assert!(!a.same_layout(&Field::with_dimensions(400.0, 300.0)));
    }
}
