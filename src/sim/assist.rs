//! Gap-seeking controller
//!
//! Two behaviours run every tick:
//! - gap tracking: near-field obstacles slide their gap toward the body,
//!   rate-limited to `dodge_speed` per tick
//! - danger-assist: when the body is about to clip the nearest gap edge it
//!   is eased toward the middle of the gap and its velocity is damped
//!
//! Two opt-in rescues can follow the assist: `wall_rescue` (bounded only)
//! and `overlap_rescue`, which snap the body into a gap before collision
//! runs and keep its velocity.
//!
//! Together they make the game very hard to lose. Gap tracking must run
//! after the body integrates and before danger-assist, which reads the gap
//! positions it just produced.

use super::body::Body;
use super::collision::{first_overlap, wall_contact};
use super::state::{Obstacle, ObstacleShape};
use crate::{Tuning, smooth_toward, step_toward};

/// Controller parameters, derived from [`Tuning`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSeeker {
    pub body_x: f32,
    pub body_radius: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    /// Near-field window length ahead of the body
    pub lookahead: f32,
    pub dodge_speed: f32,
    /// Allowed gap-top range, bounded policy only
    pub gap_range: Option<(f32, f32)>,
    pub margin: f32,
    pub smoothing: f32,
    pub damping: f32,
    /// World height when wall rescue is active
    pub rescue_height: Option<f32>,
    pub overlap_rescue: bool,
}

impl GapSeeker {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let bounded = tuning.boundary_policy.clamps_gaps();
        let gap_range = bounded.then(|| tuning.gap_clamp_range());
        let rescue_height = (bounded && tuning.wall_rescue).then_some(tuning.height);

        Self {
            body_x: tuning.body_x,
            body_radius: tuning.body_radius,
            obstacle_width: tuning.obstacle_width,
            gap_height: tuning.gap_height,
            lookahead: tuning.lookahead,
            dodge_speed: tuning.dodge_speed,
            gap_range,
            margin: tuning.assist_margin,
            smoothing: tuning.assist_smoothing,
            damping: tuning.velocity_damping,
            rescue_height,
            overlap_rescue: tuning.overlap_rescue,
        }
    }

    /// Leading edge strictly inside the window ahead of the body
    #[inline]
    pub fn in_near_field(&self, obstacle: &Obstacle) -> bool {
        self.body_x < obstacle.x && obstacle.x < self.body_x + self.lookahead
    }

    /// Gap top that would center the gap on the body
    pub fn target_gap_top(&self, body_y: f32) -> f32 {
        let target = body_y - self.gap_height / 2.0;
        match self.gap_range {
            Some((low, high)) => target.clamp(low, high),
            None => target,
        }
    }

    /// Slide every near-field gap toward the body. Returns how many moved.
    pub fn track_gaps(&self, obstacles: &mut [Obstacle], body_y: f32) -> usize {
        let target = self.target_gap_top(body_y);
        let mut moved = 0;
        for obstacle in obstacles.iter_mut().filter(|o| self.in_near_field(o)) {
            let next = step_toward(obstacle.gap_top, target, self.dodge_speed);
            if next != obstacle.gap_top {
                moved += 1;
            }
            obstacle.gap_top = next;
        }
        moved
    }

    /// Closest obstacle not yet fully behind the body, within the window
    pub fn nearest_ahead<'a>(&self, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
        obstacles
            .iter()
            .filter(|o| {
                o.trailing_edge(self.obstacle_width) > self.body_x
                    && o.x < self.body_x + self.lookahead
            })
            .min_by(|a, b| {
                (a.x - self.body_x)
                    .partial_cmp(&(b.x - self.body_x))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Body edge within `margin` of either gap boundary
    pub fn in_danger(&self, body_y: f32, obstacle: &Obstacle) -> bool {
        let top_clearance = (body_y - self.body_radius) - obstacle.gap_top;
        let bottom_clearance =
            obstacle.gap_bottom(self.gap_height) - (body_y + self.body_radius);
        top_clearance < self.margin || bottom_clearance < self.margin
    }

    /// Ease the body toward the nearest gap's middle when it is in danger.
    /// Returns true if the assist fired.
    pub fn assist_body(&self, body: &mut Body, obstacles: &[Obstacle]) -> bool {
        let Some(nearest) = self.nearest_ahead(obstacles) else {
            return false;
        };
        if !self.in_danger(body.y, nearest) {
            return false;
        }

        let target = nearest.gap_mid(self.gap_height);
        log::debug!(
            "Assist: body y={:.1} -> gap {} mid {:.1}",
            body.y,
            nearest.id,
            target
        );
        body.y = smooth_toward(body.y, target, self.smoothing);
        body.velocity *= self.damping;
        true
    }

    /// Put the body back in a gap after it touched a wall (bounded + rescue only).
    /// Returns true if the body was moved.
    pub fn rescue_from_wall(&self, body: &mut Body, obstacles: &[Obstacle]) -> bool {
        let Some(height) = self.rescue_height else {
            return false;
        };
        if !wall_contact(body.y, self.body_radius, height) {
            return false;
        }

        body.y = match self.nearest_ahead(obstacles) {
            Some(nearest) => nearest.gap_mid(self.gap_height),
            None => height / 2.0,
        };
        log::debug!("Wall rescue: body reset to y={:.1}", body.y);
        true
    }

    /// Snap the body to the middle of the first gap it is clipping
    /// (overlap rescue only). Returns true if the body was moved.
    pub fn rescue_from_overlap(&self, body: &mut Body, obstacles: &[Obstacle]) -> bool {
        if !self.overlap_rescue {
            return false;
        }
        let shape = ObstacleShape {
            width: self.obstacle_width,
            gap_height: self.gap_height,
        };
        let Some(hit) = first_overlap(body.center(self.body_x), self.body_radius, obstacles, shape)
        else {
            return false;
        };

        body.y = hit.gap_mid(self.gap_height);
        log::debug!("Overlap rescue: body moved into gap {} at y={:.1}", hit.id, body.y);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundaryPolicy;
    use proptest::prelude::*;

    fn seeker(policy: BoundaryPolicy) -> GapSeeker {
        GapSeeker::from_tuning(&Tuning::with_policy(policy))
    }

    fn obstacle(id: u32, x: f32, gap_top: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            gap_top,
            scored: false,
        }
    }

    #[test]
    fn test_near_field_window() {
        let s = seeker(BoundaryPolicy::Unbounded);
        assert!(!s.in_near_field(&obstacle(1, 100.0, 0.0)));
        assert!(s.in_near_field(&obstacle(1, 101.0, 0.0)));
        assert!(s.in_near_field(&obstacle(1, 299.0, 0.0)));
        assert!(!s.in_near_field(&obstacle(1, 300.0, 0.0)));
    }

    #[test]
    fn test_track_gaps_rate_limited() {
        let s = seeker(BoundaryPolicy::Unbounded);
        // Target gap top for body at 350 is 290
        let mut obstacles = [obstacle(1, 200.0, 100.0), obstacle(2, 280.0, 285.0)];
        assert_eq!(s.track_gaps(&mut obstacles, 350.0), 2);
        assert_eq!(obstacles[0].gap_top, 114.0);
        assert_eq!(obstacles[1].gap_top, 290.0);
    }

    #[test]
    fn test_track_gaps_ignores_far_field() {
        let s = seeker(BoundaryPolicy::Unbounded);
        let mut obstacles = [obstacle(1, 50.0, 100.0), obstacle(2, 450.0, 100.0)];
        assert_eq!(s.track_gaps(&mut obstacles, 350.0), 0);
        assert_eq!(obstacles[0].gap_top, 100.0);
        assert_eq!(obstacles[1].gap_top, 100.0);
    }

    #[test]
    fn test_bounded_clamps_target() {
        let bounded = seeker(BoundaryPolicy::Bounded);
        let unbounded = seeker(BoundaryPolicy::Unbounded);
        // Body far above the screen
        assert_eq!(bounded.target_gap_top(-400.0), 50.0);
        assert_eq!(unbounded.target_gap_top(-400.0), -460.0);
        // Body far below: 700 - 120 - 50
        assert_eq!(bounded.target_gap_top(2000.0), 530.0);

        let mut obstacles = [obstacle(1, 200.0, 60.0)];
        bounded.track_gaps(&mut obstacles, -400.0);
        assert_eq!(obstacles[0].gap_top, 50.0);
    }

    #[test]
    fn test_nearest_ahead_prefers_smallest_distance() {
        let s = seeker(BoundaryPolicy::Unbounded);
        let obstacles = [
            obstacle(1, 0.0, 0.0),   // trailing edge 80, behind the body
            obstacle(2, 250.0, 0.0),
            obstacle(3, 150.0, 0.0),
            obstacle(4, 350.0, 0.0), // beyond the window
        ];
        assert_eq!(s.nearest_ahead(&obstacles).map(|o| o.id), Some(3));
        assert!(s.nearest_ahead(&[obstacle(5, 400.0, 0.0)]).is_none());
    }

    #[test]
    fn test_nearest_ahead_includes_overlapping_column() {
        let s = seeker(BoundaryPolicy::Unbounded);
        let obstacles = [obstacle(1, 60.0, 0.0), obstacle(2, 150.0, 0.0)];
        assert_eq!(s.nearest_ahead(&obstacles).map(|o| o.id), Some(1));
    }

    #[test]
    fn test_danger_detection() {
        let s = seeker(BoundaryPolicy::Unbounded);
        // Gap 300..420, mid 360, body half-height 20, margin 30
        let o = obstacle(1, 150.0, 300.0);
        assert!(!s.in_danger(360.0, &o));
        assert!(s.in_danger(340.0, &o));
        assert!(s.in_danger(380.0, &o));
    }

    #[test]
    fn test_assist_eases_body_and_damps_velocity() {
        let s = seeker(BoundaryPolicy::Unbounded);
        let obstacles = [obstacle(1, 150.0, 300.0)];
        let mut body = Body {
            y: 320.0,
            velocity: 4.0,
        };
        assert!(s.assist_body(&mut body, &obstacles));
        // 320 + (360 - 320) * 0.3
        assert!((body.y - 332.0).abs() < 1e-4);
        assert_eq!(body.velocity, 2.0);
    }

    #[test]
    fn test_assist_inactive_when_safe_or_alone() {
        let s = seeker(BoundaryPolicy::Unbounded);
        let mut body = Body {
            y: 360.0,
            velocity: 3.0,
        };
        assert!(!s.assist_body(&mut body, &[obstacle(1, 150.0, 300.0)]));
        assert!(!s.assist_body(&mut body, &[]));
        assert_eq!(body, Body { y: 360.0, velocity: 3.0 });
    }

    #[test]
    fn test_wall_rescue_only_when_enabled() {
        let obstacles = [obstacle(1, 150.0, 300.0)];
        let mut body = Body {
            y: 690.0,
            velocity: 9.0,
        };

        assert!(!seeker(BoundaryPolicy::Bounded).rescue_from_wall(&mut body, &obstacles));

        let tuning = Tuning {
            wall_rescue: true,
            ..Tuning::with_policy(BoundaryPolicy::Bounded)
        };
        let s = GapSeeker::from_tuning(&tuning);
        assert!(s.rescue_from_wall(&mut body, &obstacles));
        // Position only; the fall speed is kept
        assert_eq!(body, Body { y: 360.0, velocity: 9.0 });

        let mut body = Body {
            y: 5.0,
            velocity: -3.0,
        };
        assert!(s.rescue_from_wall(&mut body, &[]));
        assert_eq!(body.y, 350.0);
    }

    #[test]
    fn test_overlap_rescue_only_when_enabled() {
        // Column 90..170 covers the body column, gap 300..420
        let obstacles = [obstacle(1, 90.0, 300.0)];
        let mut body = Body {
            y: 250.0,
            velocity: 2.0,
        };
        assert!(!seeker(BoundaryPolicy::Unbounded).rescue_from_overlap(&mut body, &obstacles));
        assert_eq!(body.y, 250.0);

        let tuning = Tuning {
            overlap_rescue: true,
            ..Tuning::default()
        };
        let s = GapSeeker::from_tuning(&tuning);
        assert!(s.rescue_from_overlap(&mut body, &obstacles));
        assert_eq!(body, Body { y: 360.0, velocity: 2.0 });

        // Already inside the gap: nothing to do
        assert!(!s.rescue_from_overlap(&mut body, &obstacles));
    }

    proptest! {
        #[test]
        fn prop_bounded_gaps_stay_in_range(
            body_y in -2000.0f32..2000.0,
            gap_top in 100.0f32..=400.0,
            ticks in 1usize..60,
        ) {
            let tuning = Tuning::with_policy(BoundaryPolicy::Bounded);
            prop_assert!(tuning.validate().is_ok());
            let (low, high) = tuning.gap_clamp_range();
            let s = GapSeeker::from_tuning(&tuning);
            let mut obstacles = [obstacle(1, 200.0, gap_top)];
            for _ in 0..ticks {
                s.track_gaps(&mut obstacles, body_y);
                prop_assert!(obstacles[0].gap_top >= low && obstacles[0].gap_top <= high);
            }
        }

        #[test]
        fn prop_gap_moves_at_most_dodge_speed(
            body_y in -2000.0f32..2000.0,
            gap_top in -500.0f32..1000.0,
            x in 101.0f32..299.0,
            bounded in any::<bool>(),
        ) {
            let policy = if bounded { BoundaryPolicy::Bounded } else { BoundaryPolicy::Unbounded };
            let s = seeker(policy);
            let mut obstacles = [obstacle(1, x, gap_top)];
            s.track_gaps(&mut obstacles, body_y);
            prop_assert!((obstacles[0].gap_top - gap_top).abs() <= s.dodge_speed + 1e-3);
        }
    }
}
