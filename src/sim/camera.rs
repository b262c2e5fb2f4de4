//! Vertical camera follow

use serde::{Deserialize, Serialize};

use crate::smooth_toward;

/// Smoothed vertical scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub offset: f32,
    pub target: f32,
}

impl Camera {
    /// Camera already settled on `body_y`
    pub fn centered_on(body_y: f32, half_viewport: f32) -> Self {
        let target = body_y - half_viewport;
        Self {
            offset: target,
            target,
        }
    }

    /// Ease toward keeping the body at the middle of the viewport
    pub fn update(&mut self, body_y: f32, half_viewport: f32, smoothing: f32) {
        self.target = body_y - half_viewport;
        self.offset = smooth_toward(self.offset, self.target, smoothing);
    }

    /// Scrolled more than half a viewport away from the home position
    pub fn out_of_bounds(&self, half_viewport: f32) -> bool {
        self.offset.abs() > half_viewport
    }
}
