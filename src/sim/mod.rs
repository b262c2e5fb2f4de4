//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod assist;
pub mod body;
pub mod camera;
pub mod collision;
pub mod state;
pub mod tick;
pub mod track;

pub use assist::GapSeeker;
pub use body::Body;
pub use camera::Camera;
pub use collision::{TerminalCause, overlaps, score_pass, wall_contact};
pub use state::{GamePhase, Obstacle, ObstacleShape, ObstacleView, Snapshot, World};
pub use tick::{StepOutcome, TickInput, step};
pub use track::{ObstacleTrack, SpawnRules};
