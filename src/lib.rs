//! Smart Pipes - a side-scroller where the pipes chase the bird
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body dynamics, obstacles, assist, collisions)
//! - `tuning`: Data-driven game balance and boundary policy
//! - `session`: Run lifecycle (input coalescing, game over, restart)

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{BoundaryPolicy, Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Target tick rate of the external clock
    pub const TICK_RATE: u32 = 60;

    /// World dimensions (screen units)
    pub const WORLD_WIDTH: f32 = 500.0;
    pub const WORLD_HEIGHT: f32 = 700.0;

    /// Body defaults - fixed column, falls under gravity
    pub const BODY_X: f32 = 100.0;
    pub const BODY_RADIUS: f32 = 20.0;
    pub const GRAVITY: f32 = 0.5;
    /// Jump sets velocity to this (negative is up)
    pub const JUMP_IMPULSE: f32 = -8.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const GAP_HEIGHT: f32 = 120.0;
    pub const SCROLL_SPEED: f32 = 4.0;
    /// Horizontal distance between consecutive spawns
    pub const SPAWN_SPACING: f32 = 300.0;
    /// Range for a freshly spawned gap top
    pub const GAP_SPAWN_MIN: f32 = 100.0;
    pub const GAP_SPAWN_MAX: f32 = 400.0;

    /// Gap-seeking defaults
    pub const LOOKAHEAD: f32 = 200.0;
    /// Max gap movement per tick
    pub const DODGE_SPEED: f32 = 14.0;
    /// Bounded policy keeps gaps this far from the edges
    pub const GAP_CLAMP_MARGIN: f32 = 50.0;
    pub const ASSIST_MARGIN: f32 = BODY_RADIUS * 1.5;
    pub const ASSIST_SMOOTHING: f32 = 0.3;
    pub const VELOCITY_DAMPING: f32 = 0.5;

    /// Camera follow factor per tick
    pub const CAMERA_SMOOTHING: f32 = 0.1;
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn step_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    current + (target - current).clamp(-max_delta, max_delta)
}

/// Exponential smoothing: close `factor` of the distance to `target`
#[inline]
pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward_limits_delta() {
        assert_eq!(step_toward(0.0, 100.0, 14.0), 14.0);
        assert_eq!(step_toward(100.0, 0.0, 14.0), 86.0);
        assert_eq!(step_toward(10.0, 15.0, 14.0), 15.0);
    }

    #[test]
    fn test_smooth_toward() {
        assert_eq!(smooth_toward(0.0, 10.0, 0.1), 1.0);
        assert_eq!(smooth_toward(5.0, 5.0, 0.3), 5.0);
    }
}
