//! Body dynamics
//!
//! Fixed-step vertical integration. One call per tick, no sub-stepping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The player-controlled falling body
///
/// Only the vertical axis moves; the horizontal column is fixed by tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Vertical position (screen units, +y is down)
    pub y: f32,
    /// Vertical velocity per tick
    pub velocity: f32,
}

impl Body {
    /// Body at rest at the given height
    pub fn at_rest(y: f32) -> Self {
        Self { y, velocity: 0.0 }
    }

    /// Apply gravity, then move by the new velocity
    #[inline]
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    /// Jump replaces the current velocity, it never adds to it
    #[inline]
    pub fn apply_jump(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Center point for collision queries
    #[inline]
    pub fn center(&self, x: f32) -> Vec2 {
        Vec2::new(x, self.y)
    }
}
