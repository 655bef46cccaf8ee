use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer button transitions and motion delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Press,
    Move,
    Release,
}

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    pub const fn press(position: Vec2) -> Self {
        Self::new(PointerKind::Press, position)
    }

    pub const fn moved(position: Vec2) -> Self {
        Self::new(PointerKind::Move, position)
    }

    pub const fn release(position: Vec2) -> Self {
        Self::new(PointerKind::Release, position)
    }

    /// Build an event from window/client coordinates, given the canvas's
    /// top-left corner in the same space. Points outside the canvas are kept.
    pub fn from_client(kind: PointerKind, client: Vec2, canvas_origin: Vec2) -> Self {
        Self::new(kind, client - canvas_origin)
    }
}
