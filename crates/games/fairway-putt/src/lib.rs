pub mod config;
pub mod drag;
pub mod input;
pub mod physics;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use config::{ConfigError, GreenConfig};
use drag::DragState;
use input::{PointerEvent, PointerKind};
use physics::{Ball, Bounds, Hole};

/// Serializable snapshot of the green, broadcast once per frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GreenState {
    pub ball: Ball,
    pub hole: Hole,
    pub bounds: Bounds,
    /// Where the ball returns after dropping.
    pub start: Vec2,
    pub drag: DragState,
    /// Frames simulated so far (paused frames are not counted).
    pub frame: u64,
    /// Strokes taken since the last capture.
    pub strokes: u32,
    pub captures: u32,
}

/// Things that happened on the green that the presentation layer may want to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GreenEvent {
    /// A drag was released and the ball launched.
    ShotTaken { velocity: Vec2 },
    /// The ball dropped into the hole and went back to the tee.
    Captured { strokes: u32, frame: u64 },
}

/// A single-ball putting green: integrator, walls, hole and drag-to-aim input.
pub struct PuttingGreen {
    config: GreenConfig,
    state: GreenState,
    paused: bool,
}

impl PuttingGreen {
    pub fn new(config: GreenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GreenConfig) -> Self {
        let start = config.start_point();
        let state = GreenState {
            ball: Ball::new(start, config.ball_radius, config.theme.ball),
            hole: Hole::new(config.hole_point(), config.hole_radius),
            bounds: config.bounds(),
            start,
            drag: DragState::Idle,
            frame: 0,
            strokes: 0,
            captures: 0,
        };
        Self {
            config,
            state,
            paused: false,
        }
    }

    pub fn config(&self) -> &GreenConfig {
        &self.config
    }

    pub fn state(&self) -> &GreenState {
        &self.state
    }

    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    pub fn hole(&self) -> &Hole {
        &self.state.hole
    }

    pub fn drag(&self) -> DragState {
        self.state.drag
    }

    /// Text to show the player when the ball drops.
    pub fn capture_message(&self) -> &str {
        &self.config.capture_message
    }

    /// Integrate ball motion for one frame.
    pub fn step(&mut self) {
        self.state
            .ball
            .step(self.config.damping, self.config.rest_threshold);
    }

    pub fn resolve_wall_collisions(&mut self) {
        self.state.ball.resolve_wall_collisions(self.state.bounds);
    }

    /// If the ball is in the hole, reset it to the tee and report the capture.
    pub fn check_capture(&mut self) -> Option<GreenEvent> {
        if !self.state.hole.captures(&self.state.ball) {
            return None;
        }
        let event = GreenEvent::Captured {
            strokes: self.state.strokes,
            frame: self.state.frame,
        };
        tracing::debug!(
            strokes = self.state.strokes,
            frame = self.state.frame,
            "Ball captured"
        );
        self.state.captures += 1;
        self.state.strokes = 0;
        self.reset();
        Some(event)
    }

    /// Return the ball to the tee at rest. The hole and any drag in progress are kept.
    pub fn reset(&mut self) {
        self.state.ball.reset(self.state.start);
    }

    /// Press at `point`. Only starts a drag when the press lands on the ball.
    pub fn begin_drag(&mut self, point: Vec2) -> bool {
        let started = self.state.drag.begin(&self.state.ball, point);
        if !started {
            tracing::trace!(x = point.x, y = point.y, "Press missed the ball");
        }
        started
    }

    pub fn update_drag(&mut self, point: Vec2) -> bool {
        self.state.drag.update(point)
    }

    /// Release at `point`, launching the ball if a drag was in progress.
    pub fn end_drag(&mut self, point: Vec2) -> Option<GreenEvent> {
        let velocity =
            self.state
                .drag
                .end(&mut self.state.ball, point, self.config.launch_factor)?;
        self.state.strokes += 1;
        tracing::debug!(vx = velocity.x, vy = velocity.y, "Shot taken");
        Some(GreenEvent::ShotTaken { velocity })
    }

    /// Route a pointer event to the matching drag operation.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<GreenEvent> {
        match event.kind {
            PointerKind::Press => {
                self.begin_drag(event.position);
                None
            },
            PointerKind::Move => {
                self.update_drag(event.position);
                None
            },
            PointerKind::Release => self.end_drag(event.position),
        }
    }

    /// Run one frame: step, walls, then hole. Does nothing while paused.
    pub fn tick(&mut self) -> Vec<GreenEvent> {
        if self.paused {
            return Vec::new();
        }
        self.state.frame += 1;
        self.step();
        self.resolve_wall_collisions();
        self.check_capture().into_iter().collect()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Encode the current state for broadcast.
    pub fn snapshot(&self) -> Vec<u8> {
        rmp_serde::to_vec(&self.state).unwrap_or_default()
    }

    /// Replace the state with a decoded snapshot. Malformed data, snapshots of
    /// a different layout, and balls that are off the green are dropped.
    pub fn apply_snapshot(&mut self, data: &[u8]) -> bool {
        match rmp_serde::from_slice::<GreenState>(data) {
            Ok(state) if self.accepts(&state) => {
                self.state = state;
                true
            },
            Ok(_) => {
                tracing::debug!("Dropped green snapshot that does not fit this green");
                false
            },
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed green snapshot");
                false
            },
        }
    }
}

impl PuttingGreen {
    /// The layout is fixed at creation; only the ball, drag and counters may change.
    fn accepts(&self, state: &GreenState) -> bool {
        let ball = &state.ball;
        state.hole == self.state.hole
            && state.bounds == self.state.bounds
            && state.start == self.state.start
            && ball.radius == self.state.ball.radius
            && ball.position.is_finite()
            && ball.velocity.is_finite()
            && state.bounds.holds(ball.position, ball.radius)
    }
}

impl Default for PuttingGreen {
    fn default() -> Self {
        Self::from_valid_config(GreenConfig::default())
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use glam::Vec2;

    use crate::{GreenEvent, PuttingGreen};

    /// The canvas demo layout: 600x300, tee at (100, 150), hole r=15 at (500, 150).
    pub fn scenario_green() -> PuttingGreen {
        PuttingGreen::default()
    }

    /// Run `n` frames, returning all accumulated events.
    pub fn run_ticks(green: &mut PuttingGreen, n: usize) -> Vec<GreenEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(green.tick());
        }
        all_events
    }

    /// Press on the ball center and release at `center + pull`.
    pub fn putt(green: &mut PuttingGreen, pull: Vec2) -> Option<GreenEvent> {
        let center = green.ball().position;
        assert!(green.begin_drag(center), "press on ball center must start a drag");
        green.end_drag(center + pull)
    }

    /// Tick until a capture happens, giving up after `max_ticks`.
    /// Returns the number of frames it took.
    pub fn ticks_until_capture(green: &mut PuttingGreen, max_ticks: usize) -> Option<usize> {
        for n in 1..=max_ticks {
            if green
                .tick()
                .iter()
                .any(|e| matches!(e, GreenEvent::Captured { .. }))
            {
                return Some(n);
            }
        }
        None
    }
}
