//! Obstacle track: spawn, scroll, cull
//!
//! Obstacles are kept in spawn order, which is also descending `x` since
//! every obstacle scrolls at the same speed.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Obstacle, ObstacleShape};
use crate::Tuning;

/// Where and how often obstacles appear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    /// New obstacles appear at this x (right edge of the world)
    pub edge: f32,
    /// Spawn again once the newest obstacle is this far past the edge
    pub spacing: f32,
    /// Range for a new obstacle's gap top
    pub gap_min: f32,
    pub gap_max: f32,
}

impl SpawnRules {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            edge: tuning.width,
            spacing: tuning.spawn_spacing,
            gap_min: tuning.gap_spawn_min,
            gap_max: tuning.gap_spawn_max,
        }
    }
}

/// Ordered collection of live obstacles
#[derive(Debug, Clone)]
pub struct ObstacleTrack {
    pub shape: ObstacleShape,
    pub rules: SpawnRules,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleTrack {
    /// Empty track drawing gap positions from `rng`
    pub fn new(shape: ObstacleShape, rules: SpawnRules, rng: Pcg32) -> Self {
        Self {
            shape,
            rules,
            obstacles: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an obstacle at the spawn edge with a random gap
    pub fn spawn(&mut self) -> &Obstacle {
        let id = self.next_obstacle_id();
        let gap_top = self
            .rng
            .random_range(self.rules.gap_min..=self.rules.gap_max);
        log::debug!("Spawn obstacle {} at x={} gap_top={:.1}", id, self.rules.edge, gap_top);
        self.obstacles.push(Obstacle {
            id,
            x: self.rules.edge,
            gap_top,
            scored: false,
        });
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Drop obstacles whose trailing edge is off the left side.
    /// Returns how many were removed.
    pub fn cull(&mut self) -> usize {
        let before = self.obstacles.len();
        let width = self.shape.width;
        self.obstacles.retain(|o| o.trailing_edge(width) > 0.0);
        let removed = before - self.obstacles.len();
        if removed > 0 {
            log::debug!("Culled {} obstacle(s), {} live", removed, self.obstacles.len());
        }
        removed
    }

    /// Keep an upcoming obstacle within `spacing` of the spawn edge.
    /// Returns true if a new obstacle was spawned.
    pub fn ensure_spawned(&mut self) -> bool {
        let threshold = self.rules.edge - self.rules.spacing;
        let needs_spawn = match self.obstacles.last() {
            None => true,
            Some(last) => last.x < threshold,
        };
        if needs_spawn {
            self.spawn();
        }
        needs_spawn
    }

    /// Most recently spawned obstacle
    pub fn newest(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
