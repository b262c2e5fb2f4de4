//! Game balance and boundary policy
//!
//! Loaded from JSON (optional), validated once when a world is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("invalid tuning `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the top and bottom edges of the world behave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundaryPolicy {
    /// Edges are walls: touching one ends the run, gaps stay clamped on screen
    Bounded,
    /// No walls: the camera follows the body, gaps are never clamped
    #[default]
    Unbounded,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::Bounded => "Bounded",
            BoundaryPolicy::Unbounded => "Unbounded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounded" | "walls" => Some(BoundaryPolicy::Bounded),
            "unbounded" | "open" => Some(BoundaryPolicy::Unbounded),
            _ => None,
        }
    }

    /// Whether touching the top/bottom edge is terminal
    pub fn walls_are_terminal(&self) -> bool {
        matches!(self, BoundaryPolicy::Bounded)
    }

    /// Whether tracked gaps are kept inside the screen
    pub fn clamps_gaps(&self) -> bool {
        matches!(self, BoundaryPolicy::Bounded)
    }
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub boundary_policy: BoundaryPolicy,

    // === World ===
    pub width: f32,
    pub height: f32,

    // === Body ===
    pub body_x: f32,
    pub body_radius: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub scroll_speed: f32,
    pub spawn_spacing: f32,
    pub gap_spawn_min: f32,
    pub gap_spawn_max: f32,

    // === Gap seeking / assist ===
    /// Master switch for both gap tracking and danger-assist
    pub assist_enabled: bool,
    pub lookahead: f32,
    pub dodge_speed: f32,
    pub gap_clamp_margin: f32,
    pub assist_margin: f32,
    pub assist_smoothing: f32,
    pub velocity_damping: f32,
    /// Bounded only: snap the body back to a gap when it touches an edge
    pub wall_rescue: bool,
    /// Snap the body into the gap of any obstacle it clips instead of ending the run
    pub overlap_rescue: bool,

    // === Camera ===
    pub camera_smoothing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            boundary_policy: BoundaryPolicy::default(),

            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,

            body_x: BODY_X,
            body_radius: BODY_RADIUS,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            scroll_speed: SCROLL_SPEED,
            spawn_spacing: SPAWN_SPACING,
            gap_spawn_min: GAP_SPAWN_MIN,
            gap_spawn_max: GAP_SPAWN_MAX,

            assist_enabled: true,
            lookahead: LOOKAHEAD,
            dodge_speed: DODGE_SPEED,
            gap_clamp_margin: GAP_CLAMP_MARGIN,
            assist_margin: ASSIST_MARGIN,
            assist_smoothing: ASSIST_SMOOTHING,
            velocity_damping: VELOCITY_DAMPING,
            wall_rescue: false,
            overlap_rescue: false,

            camera_smoothing: CAMERA_SMOOTHING,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be >= 0, got {value}")))
    }
}

fn require_unit(field: &'static str, value: f32, allow_zero: bool) -> Result<(), TuningError> {
    let low_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if value.is_finite() && low_ok && value <= 1.0 {
        Ok(())
    } else {
        let range = if allow_zero { "[0, 1]" } else { "(0, 1]" };
        Err(invalid(field, format!("must be in {range}, got {value}")))
    }
}

impl Tuning {
    /// Tuning with the given boundary policy, everything else default
    pub fn with_policy(policy: BoundaryPolicy) -> Self {
        Self {
            boundary_policy: policy,
            ..Self::default()
        }
    }

    /// Half the viewport height (camera follow anchor)
    pub fn half_viewport(&self) -> f32 {
        self.height / 2.0
    }

    /// Allowed gap-top range under the bounded policy
    pub fn gap_clamp_range(&self) -> (f32, f32) {
        (
            self.gap_clamp_margin,
            self.height - self.gap_height - self.gap_clamp_margin,
        )
    }

    /// Reject configurations that would break the track or the assist
    pub fn validate(&self) -> Result<(), TuningError> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_positive("body_radius", self.body_radius)?;
        require_positive("obstacle_width", self.obstacle_width)?;
        require_positive("gap_height", self.gap_height)?;
        require_positive("scroll_speed", self.scroll_speed)?;
        require_positive("spawn_spacing", self.spawn_spacing)?;
        require_positive("lookahead", self.lookahead)?;
        require_non_negative("dodge_speed", self.dodge_speed)?;
        require_non_negative("gap_clamp_margin", self.gap_clamp_margin)?;
        require_non_negative("assist_margin", self.assist_margin)?;
        require_unit("assist_smoothing", self.assist_smoothing, false)?;
        require_unit("velocity_damping", self.velocity_damping, true)?;
        require_unit("camera_smoothing", self.camera_smoothing, false)?;

        for (field, value) in [
            ("body_x", self.body_x),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("gap_spawn_min", self.gap_spawn_min),
            ("gap_spawn_max", self.gap_spawn_max),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }

        if self.gap_spawn_min > self.gap_spawn_max {
            return Err(invalid(
                "gap_spawn_min",
                format!(
                    "{} is above gap_spawn_max {}",
                    self.gap_spawn_min, self.gap_spawn_max
                ),
            ));
        }
        if self.gap_height >= self.height {
            return Err(invalid(
                "gap_height",
                format!("{} does not fit in world height {}", self.gap_height, self.height),
            ));
        }
        if self.boundary_policy.clamps_gaps() {
            let (low, high) = self.gap_clamp_range();
            if low > high {
                return Err(invalid(
                    "gap_clamp_margin",
                    "clamped gap range is empty for this height",
                ));
            }
            // Tracking only moves gaps toward a clamped target, so a spawn
            // inside the range keeps every gap inside it
            if self.gap_spawn_min < low || self.gap_spawn_max > high {
                return Err(invalid(
                    "gap_spawn_min",
                    format!(
                        "spawn range [{}, {}] leaves the bounded range [{}, {}]",
                        self.gap_spawn_min, self.gap_spawn_max, low, high
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} ({} policy)",
            path.display(),
            tuning.boundary_policy.as_str()
        );
        Ok(tuning)
    }
}
