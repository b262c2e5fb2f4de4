//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. Stage order is
//! fixed: input, body, obstacles, track upkeep, assist, collision/scoring,
//! camera.

use super::assist::GapSeeker;
use super::collision::{TerminalCause, first_overlap, score_pass, wall_contact};
use super::state::{GamePhase, World};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump requested since the last tick (coalesced to one)
    pub jump: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self { jump: true }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    /// The run is over; `score` is final
    pub terminal: bool,
    pub score: u32,
    /// Obstacles passed this tick
    pub scored: u32,
    /// Danger-assist or a rescue moved the body
    pub assisted: bool,
    /// Camera diagnostic, never terminal
    pub out_of_bounds: bool,
    pub cause: Option<TerminalCause>,
}

/// Advance the world by one fixed tick
///
/// A world that is already over is left untouched; callers reset it
/// explicitly.
pub fn step(world: &mut World, input: &TickInput) -> StepOutcome {
    let half_viewport = world.tuning.half_viewport();
    if world.phase == GamePhase::GameOver {
        return StepOutcome {
            terminal: true,
            score: world.score,
            out_of_bounds: world.camera.out_of_bounds(half_viewport),
            ..Default::default()
        };
    }

    world.tick_count += 1;
    let tuning = &world.tuning;
    let seeker = GapSeeker::from_tuning(tuning);
    let assist_enabled = tuning.assist_enabled;

    // 1. Input
    if input.jump {
        world.body.apply_jump(tuning.jump_impulse);
    }

    // 2. Body dynamics
    world.body.integrate(tuning.gravity);

    // 3. Scroll obstacles, then let near-field gaps chase the body
    world.track.advance(tuning.scroll_speed);
    if assist_enabled {
        seeker.track_gaps(&mut world.track.obstacles, world.body.y);
    }

    // 4. Track upkeep
    world.track.cull();
    world.track.ensure_spawned();

    // 5. Danger-assist
    let mut assisted = false;
    if assist_enabled {
        assisted = seeker.rescue_from_wall(&mut world.body, &world.track.obstacles);
        assisted |= seeker.assist_body(&mut world.body, &world.track.obstacles);
        assisted |= seeker.rescue_from_overlap(&mut world.body, &world.track.obstacles);
    }

    // 6. Scoring, then collision
    let shape = world.track.shape;
    let body_x = tuning.body_x;
    let mut scored = 0;
    for obstacle in &mut world.track.obstacles {
        if score_pass(obstacle, shape, body_x) {
            scored += 1;
        }
    }
    world.score += scored;

    let body_pos = world.body.center(body_x);
    let radius = tuning.body_radius;
    let cause = if let Some(hit) = first_overlap(body_pos, radius, &world.track.obstacles, shape) {
        Some(TerminalCause::Obstacle { id: hit.id })
    } else if tuning.boundary_policy.walls_are_terminal()
        && wall_contact(world.body.y, radius, tuning.height)
    {
        Some(TerminalCause::Wall)
    } else {
        None
    };

    // 7. Camera
    let was_out = world.camera.out_of_bounds(half_viewport);
    world
        .camera
        .update(world.body.y, half_viewport, tuning.camera_smoothing);
    let out_of_bounds = world.camera.out_of_bounds(half_viewport);
    if out_of_bounds && !was_out {
        log::warn!(
            "Camera out of bounds: offset={:.1} (tick {})",
            world.camera.offset,
            world.tick_count
        );
    }

    if let Some(cause) = cause {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: {:?}, final score {}",
            world.tick_count,
            cause,
            world.score
        );
    }

    StepOutcome {
        terminal: cause.is_some(),
        score: world.score,
        scored,
        assisted,
        out_of_bounds,
        cause,
    }
}
