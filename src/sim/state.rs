//! World state and core simulation types
//!
//! A `World` is owned by exactly one caller and replaced wholesale on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::camera::Camera;
use super::track::{ObstacleTrack, SpawnRules};
use crate::{Tuning, TuningError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended, waiting for an explicit reset
    GameOver,
}

/// Geometry shared by every obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    pub width: f32,
    pub gap_height: f32,
}

impl ObstacleShape {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            width: tuning.obstacle_width,
            gap_height: tuning.gap_height,
        }
    }
}

/// A vertical barrier with a passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Upper edge of the opening; the gap spans `gap_top..gap_top + gap_height`
    pub gap_top: f32,
    /// Set once the body has passed the trailing edge
    pub scored: bool,
}

impl Obstacle {
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_top + gap_height
    }

    /// Vertical midpoint of the opening
    #[inline]
    pub fn gap_mid(&self, gap_height: f32) -> f32 {
        self.gap_top + gap_height / 2.0
    }
}

/// Obstacle as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_top: f32,
    pub gap_mid: f32,
    pub scored: bool,
}

/// Read-only per-tick view handed to the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub body: Vec2,
    pub body_radius: f32,
    /// Ordered by spawn time
    pub obstacles: Vec<ObstacleView>,
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub score: u32,
    pub camera_offset: f32,
    /// Camera drifted more than half a viewport away (diagnostic only)
    pub out_of_bounds: bool,
    pub game_over: bool,
    pub tick_count: u64,
}

/// Complete simulation state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub body: Body,
    pub track: ObstacleTrack,
    pub score: u32,
    pub camera: Camera,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub tick_count: u64,
}

impl World {
    /// Create a world for a validated tuning
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let body = Body::at_rest(tuning.height / 2.0);
        let camera = Camera::centered_on(body.y, tuning.half_viewport());
        let mut track = ObstacleTrack::new(
            ObstacleShape::from_tuning(&tuning),
            SpawnRules::from_tuning(&tuning),
            Pcg32::seed_from_u64(seed),
        );
        track.spawn();

        Self {
            seed,
            tuning,
            body,
            track,
            score: 0,
            camera,
            phase: GamePhase::Running,
            tick_count: 0,
        }
    }

    /// Start a fresh run with the same tuning; nothing carries over
    pub fn reset(&mut self, seed: u64) {
        *self = Self::build(self.tuning.clone(), seed);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Body center in world coordinates
    pub fn body_pos(&self) -> Vec2 {
        self.body.center(self.tuning.body_x)
    }

    pub fn snapshot(&self) -> Snapshot {
        let gap_height = self.track.shape.gap_height;
        Snapshot {
            body: self.body_pos(),
            body_radius: self.tuning.body_radius,
            obstacles: self
                .track
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    gap_top: o.gap_top,
                    gap_mid: o.gap_mid(gap_height),
                    scored: o.scored,
                })
                .collect(),
            obstacle_width: self.track.shape.width,
            gap_height,
            score: self.score,
            camera_offset: self.camera.offset,
            out_of_bounds: self.camera.out_of_bounds(self.tuning.half_viewport()),
            game_over: self.is_over(),
            tick_count: self.tick_count,
        }
    }
}
