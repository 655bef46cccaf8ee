use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::Ball;

/// Aiming gesture state. One drag lives from a press on the ball to the next release.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// The player is pulling back; `aim` is the latest pointer position and
    /// the far end of the aiming line.
    Dragging { aim: Vec2 },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Aiming line endpoint, if a drag is in progress.
    pub fn aim(&self) -> Option<Vec2> {
        match self {
            Self::Dragging { aim } => Some(*aim),
            Self::Idle => None,
        }
    }

    /// Start a drag if `point` lands on the ball. Returns whether the drag started.
    pub fn begin(&mut self, ball: &Ball, point: Vec2) -> bool {
        if !ball.contains(point) {
            return false;
        }
        *self = Self::Dragging { aim: point };
        true
    }

    /// Follow the pointer while dragging. Returns whether the aim moved.
    pub fn update(&mut self, point: Vec2) -> bool {
        match self {
            Self::Dragging { aim } => {
                *aim = point;
                true
            },
            Self::Idle => false,
        }
    }

    /// Finish the drag at `point`, launching the ball. Returns the applied
    /// velocity, or `None` if no drag was in progress.
    pub fn end(&mut self, ball: &mut Ball, point: Vec2, launch_factor: f32) -> Option<Vec2> {
        if !self.is_dragging() {
            return None;
        }
        ball.launch(point, launch_factor);
        *self = Self::Idle;
        Some(ball.velocity)
    }
}
