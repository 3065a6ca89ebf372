//! Generic pointer event types for host integration.

use crate::util::Point;

/// Identifies one finger, pen or mouse across its down, move and up events.
pub type TouchId = u64;

/// Stage of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Touch began / button pressed
    Down,
    /// Touch moved while down
    Move,
    /// Touch ended or was cancelled
    Up,
}

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub touch: TouchId,
    pub phase: PointerPhase,
    pub point: Point,
}

impl PointerEvent {
    pub fn new(touch: TouchId, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            touch,
            phase,
            point: Point::new(x, y),
        }
    }

    pub fn down(touch: TouchId, x: f64, y: f64) -> Self {
        Self::new(touch, PointerPhase::Down, x, y)
    }

    pub fn moved(touch: TouchId, x: f64, y: f64) -> Self {
        Self::new(touch, PointerPhase::Move, x, y)
    }

    pub fn up(touch: TouchId, x: f64, y: f64) -> Self {
        Self::new(touch, PointerPhase::Up, x, y)
    }
}
