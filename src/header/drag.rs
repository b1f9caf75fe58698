//! Per-cell resize drag state machine.
//!
//! States: Idle -> Dragging -> Idle, re-entrant across drags. Move events
//! yield a live width only while it is positive; End yields whatever the
//! pointer gives, because End, not Move, is authoritative for commit.

use log::trace;

use crate::pointer::PointerInput;

/// Live width implied by the pointer: distance from the cell's rendered
/// left edge. `None` when no coordinate is available.
pub fn width_from_pointer(pointer: PointerInput, cell_left_edge: f32) -> Option<f32> {
    pointer.x().map(|x| x - cell_left_edge)
}

/// Transient drag state for one cell's resize affordance.
///
/// The controller holds no layout authority; it only tracks the drag
/// lifecycle and derives widths from pointer samples.
#[derive(Debug, Default)]
pub struct ResizeController {
    dragging: bool,
}

impl ResizeController {
    /// Idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a drag is in flight.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer-down on the affordance. No width change yet.
    pub fn drag_start(&mut self) {
        self.dragging = true;
    }

    /// Pointer moved mid-drag.
    ///
    /// Returns the live width only when a drag is in flight and the width
    /// is positive; dropping non-positive widths prevents collapse during
    /// fast drags past the cell's left edge. Cheap enough to run on every
    /// pointer-move.
    pub fn drag_move(&mut self, pointer: PointerInput, cell_left_edge: f32) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        let width = width_from_pointer(pointer, cell_left_edge)?;
        if width <= 0.0 {
            return None;
        }
        trace!("drag width {width}");
        Some(width)
    }

    /// Drag finished.
    ///
    /// Returns the final width even when it is non-positive; callers decide
    /// what to commit. `None` only when the pointer has no coordinate.
    pub fn drag_end(&mut self, pointer: PointerInput, cell_left_edge: f32) -> Option<f32> {
        self.dragging = false;
        width_from_pointer(pointer, cell_left_edge)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_flags() {
        let mut controller = ResizeController::new();
        assert!(!controller.is_dragging());
        controller.drag_start();
        assert!(controller.is_dragging());
        controller.drag_end(PointerInput::from_page_x(100.0), 0.0);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_move_requires_a_drag_in_flight() {
        let mut controller = ResizeController::new();
        assert_eq!(
            controller.drag_move(PointerInput::from_page_x(100.0), 0.0),
            None
        );
    }

    #[test]
    fn test_move_drops_non_positive_widths() {
        let mut controller = ResizeController::new();
        controller.drag_start();
        assert_eq!(
            controller.drag_move(PointerInput::from_page_x(95.0), 100.0),
            None
        );
        assert_eq!(
            controller.drag_move(PointerInput::from_page_x(100.0), 100.0),
            None
        );
        assert_eq!(
            controller.drag_move(PointerInput::from_page_x(180.0), 100.0),
            Some(80.0)
        );
    }

    #[test]
    fn test_end_yields_even_negative_widths() {
        let mut controller = ResizeController::new();
        controller.drag_start();
        assert_eq!(
            controller.drag_end(PointerInput::from_page_x(95.0), 100.0),
            Some(-5.0)
        );
    }

    #[test]
    fn test_missing_pointer() {
        let mut controller = ResizeController::new();
        controller.drag_start();
        assert_eq!(controller.drag_move(PointerInput::missing(), 100.0), None);
        assert_eq!(controller.drag_end(PointerInput::missing(), 100.0), None);
    }

    #[test]
    fn test_touch_fallback_feeds_width() {
        let mut controller = ResizeController::new();
        controller.drag_start();
        let touch = PointerInput::from_touches(Some(150.0), None);
        assert_eq!(controller.drag_move(touch, 100.0), Some(50.0));
    }
}
