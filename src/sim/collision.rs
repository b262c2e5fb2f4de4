//! Collision detection and scoring
//!
//! The body is a circle, obstacles are two axis-aligned columns with an open
//! band between them. All checks are pure functions of their arguments.

use glam::Vec2;

use super::state::{Obstacle, ObstacleShape};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCause {
    /// Hit an obstacle outside its gap
    Obstacle { id: u32 },
    /// Touched the top or bottom edge (bounded policy only)
    Wall,
}

/// Check whether the body overlaps the solid part of an obstacle
///
/// Overlap requires both a horizontal overlap with the column and the body
/// poking out of the gap band vertically.
pub fn overlaps(body_pos: Vec2, body_radius: f32, obstacle: &Obstacle, shape: ObstacleShape) -> bool {
    let in_column = body_pos.x + body_radius > obstacle.x
        && body_pos.x - body_radius < obstacle.trailing_edge(shape.width);
    let outside_gap = body_pos.y - body_radius < obstacle.gap_top
        || body_pos.y + body_radius > obstacle.gap_bottom(shape.gap_height);
    in_column && outside_gap
}

/// First obstacle the body overlaps, in track order
pub fn first_overlap<'a>(
    body_pos: Vec2,
    body_radius: f32,
    obstacles: &'a [Obstacle],
    shape: ObstacleShape,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| overlaps(body_pos, body_radius, o, shape))
}

/// Award the pass once the trailing edge is behind the body.
/// Returns true only on the tick the obstacle becomes scored.
pub fn score_pass(obstacle: &mut Obstacle, shape: ObstacleShape, body_x: f32) -> bool {
    if !obstacle.scored && obstacle.trailing_edge(shape.width) < body_x {
        obstacle.scored = true;
        return true;
    }
    false
}

/// Check if the body touches the top or bottom edge of the world
pub fn wall_contact(body_y: f32, body_radius: f32, height: f32) -> bool {
    body_y - body_radius <= 0.0 || body_y + body_radius >= height
}
