use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ball radius in canvas pixels.
pub const BALL_RADIUS: f32 = 10.0;
/// Hole radius. The ball drops when its center is strictly inside this distance.
pub const HOLE_RADIUS: f32 = 15.0;
/// Friction multiplier per frame (velocity *= DAMPING each frame).
pub const DAMPING: f32 = 0.99;
/// Velocity components with a smaller magnitude snap to zero so the ball comes to rest.
pub const REST_THRESHOLD: f32 = 0.01;
/// Converts drag displacement (pixels) into launch velocity (pixels per frame).
pub const LAUNCH_FACTOR: f32 = 0.1;

/// Playable area of the green, in canvas pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a ball of the given radius centered at `center` lies fully on the green.
    pub fn holds(&self, center: Vec2, radius: f32) -> bool {
        center.x >= radius
            && center.x <= self.width - radius
            && center.y >= radius
            && center.y <= self.height - radius
    }
}

/// The single ball on the green.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: [f32; 3],
}

impl Ball {
    pub fn new(position: Vec2, radius: f32, color: [f32; 3]) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            color,
        }
    }

    /// Whether the ball has come to a complete stop.
    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vec2::ZERO
    }

    /// Whether `point` lies on the ball (edge inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.radius
    }

    /// Integrate one frame: move, damp, then snap slow axes to zero.
    pub fn step(&mut self, damping: f32, rest_threshold: f32) {
        self.position += self.velocity;
        self.velocity *= damping;

        if self.velocity.x.abs() < rest_threshold {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < rest_threshold {
            self.velocity.y = 0.0;
        }
    }

    /// Reflect off the green's edges, one axis at a time.
    ///
    /// The velocity component is negated first and the position clamped
    /// afterwards, so a ball that overshot the edge this frame is pulled back
    /// onto the green instead of tunnelling through on the next one.
    pub fn resolve_wall_collisions(&mut self, bounds: Bounds) {
        let r = self.radius;

        if self.position.x - r <= 0.0 || self.position.x + r >= bounds.width {
            self.velocity.x = -self.velocity.x;
            self.position.x = r.max(self.position.x.min(bounds.width - r));
        }
        if self.position.y - r <= 0.0 || self.position.y + r >= bounds.height {
            self.velocity.y = -self.velocity.y;
            self.position.y = r.max(self.position.y.min(bounds.height - r));
        }
    }

    /// Set the release velocity from a drag that ended at `release`.
    ///
    /// The ball travels away from the release point, so pulling back sends it forward.
    pub fn launch(&mut self, release: Vec2, launch_factor: f32) {
        self.velocity = (self.position - release) * launch_factor;
    }

    /// Put the ball back on the tee with no velocity.
    pub fn reset(&mut self, start: Vec2) {
        self.position = start;
        self.velocity = Vec2::ZERO;
    }
}

/// The cup. Fixed for the lifetime of the green.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hole {
    pub position: Vec2,
    pub radius: f32,
}

impl Hole {
    pub const fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Whether the ball center is strictly within the cup.
    pub fn captures(&self, ball: &Ball) -> bool {
        ball.position.distance(self.position) < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), BALL_RADIUS, WHITE)
    }

    #[test]
    fn step_moves_then_damps() {
        let mut ball = ball_at(100.0, 150.0);
        ball.velocity = Vec2::new(5.0, -2.0);

        ball.step(DAMPING, REST_THRESHOLD);

        assert_eq!(ball.position, Vec2::new(105.0, 148.0));
        assert!((ball.velocity.x - 4.95).abs() < 1e-5);
        assert!((ball.velocity.y + 1.98).abs() < 1e-5);
    }

    #[test]
    fn slow_axis_snaps_to_zero_independently() {
        let mut ball = ball_at(100.0, 150.0);
        ball.velocity = Vec2::new(3.0, 0.0101);

        ball.step(DAMPING, REST_THRESHOLD);

        // 0.0101 * 0.99 drops under the threshold; x keeps moving
        assert_eq!(ball.velocity.y, 0.0);
        assert!(ball.velocity.x > 2.9);
    }

    #[test]
    fn ball_comes_to_rest() {
        let mut ball = ball_at(300.0, 150.0);
        ball.velocity = Vec2::new(5.0, 3.0);

        for _ in 0..1000 {
            ball.step(DAMPING, REST_THRESHOLD);
        }

        assert!(ball.is_at_rest(), "vel = {:?}", ball.velocity);
    }

    #[test]
    fn left_wall_reflects_and_clamps() {
        let bounds = Bounds::new(600.0, 300.0);
        let mut ball = ball_at(BALL_RADIUS, 150.0);
        ball.velocity = Vec2::new(-5.0, 0.0);

        ball.resolve_wall_collisions(bounds);

        assert_eq!(ball.velocity.x, 5.0);
        assert_eq!(ball.position.x, BALL_RADIUS);
    }

    #[test]
    fn overshoot_is_pulled_back_onto_green() {
        let bounds = Bounds::new(600.0, 300.0);
        let mut ball = ball_at(596.0, 295.0);
        ball.velocity = Vec2::new(4.0, 6.0);

        ball.resolve_wall_collisions(bounds);

        assert_eq!(ball.velocity, Vec2::new(-4.0, -6.0));
        assert_eq!(ball.position, Vec2::new(590.0, 290.0));
    }

    #[test]
    fn interior_ball_is_untouched_by_walls() {
        let bounds = Bounds::new(600.0, 300.0);
        let mut ball = ball_at(300.0, 150.0);
        ball.velocity = Vec2::new(-5.0, 2.0);

        ball.resolve_wall_collisions(bounds);

        assert_eq!(ball.velocity, Vec2::new(-5.0, 2.0));
        assert_eq!(ball.position, Vec2::new(300.0, 150.0));
    }

    #[test]
    fn launch_points_away_from_release() {
        let mut ball = ball_at(100.0, 150.0);
        ball.launch(Vec2::new(50.0, 150.0), LAUNCH_FACTOR);
        assert!((ball.velocity.x - 5.0).abs() < 1e-5);
        assert_eq!(ball.velocity.y, 0.0);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let ball = ball_at(100.0, 150.0);
        assert!(ball.contains(Vec2::new(110.0, 150.0)));
        assert!(!ball.contains(Vec2::new(110.01, 150.0)));
    }

    #[test]
    fn hole_capture_is_strict() {
        let hole = Hole::new(Vec2::new(500.0, 150.0), HOLE_RADIUS);
        assert!(hole.captures(&ball_at(486.0, 150.0)));
        assert!(!hole.captures(&ball_at(485.0, 150.0)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn velocity_always_settles_to_zero(
                vx in -60.0f32..60.0,
                vy in -60.0f32..60.0,
            ) {
                let mut ball = ball_at(300.0, 150.0);
                ball.velocity = Vec2::new(vx, vy);

                // 60 * 0.99^n < 0.01 needs n < 870
                for _ in 0..1000 {
                    ball.step(DAMPING, REST_THRESHOLD);
                    if ball.is_at_rest() {
                        break;
                    }
                }

                prop_assert!(ball.is_at_rest(), "vel = {:?}", ball.velocity);
            }

            #[test]
            fn ball_never_leaves_the_green(
                x in BALL_RADIUS..(600.0 - BALL_RADIUS),
                y in BALL_RADIUS..(300.0 - BALL_RADIUS),
                vx in -80.0f32..80.0,
                vy in -80.0f32..80.0,
                frames in 1usize..300,
            ) {
                let bounds = Bounds::new(600.0, 300.0);
                let mut ball = ball_at(x, y);
                ball.velocity = Vec2::new(vx, vy);

                for _ in 0..frames {
                    ball.step(DAMPING, REST_THRESHOLD);
                    ball.resolve_wall_collisions(bounds);
                    prop_assert!(
                        bounds.holds(ball.position, ball.radius),
                        "ball escaped to {:?}",
                        ball.position
                    );
                }
            }
        }
    }
}
