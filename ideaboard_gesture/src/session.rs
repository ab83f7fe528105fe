// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: one captured pointer, incremental deltas, bounded positions.
//!
//! ## Usage
//!
//! 1) Start a session with [`DragSession::start`] on pointer-down. The session
//!    captures that pointer; events from any other pointer are ignored.
//! 2) On each move, call [`DragSession::update`] to get the delta since the
//!    last recorded position. The recorded position is clamped into the canvas
//!    first, so dragging outside the canvas and back does not accumulate slack.
//! 3) End the session with [`DragSession::end`] on pointer-up.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use ideaboard_geometry::CanvasFrame;
//! use ideaboard_gesture::session::{DragSession, PointerId};
//!
//! let frame = CanvasFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let mut drag = DragSession::default();
//!
//! drag.start(PointerId(1), Point::new(90.0, 10.0));
//! assert!(drag.is_dragging());
//!
//! // Leaves the canvas: the full delta is reported, but only x = 100 is kept.
//! assert_eq!(drag.update(PointerId(1), Point::new(120.0, 10.0), &frame), Some(Vec2::new(30.0, 0.0)));
//! // Coming back is measured from the edge.
//! assert_eq!(drag.update(PointerId(1), Point::new(95.0, 10.0), &frame), Some(Vec2::new(-5.0, 0.0)));
//!
//! // A different pointer is stale.
//! assert_eq!(drag.update(PointerId(2), Point::new(0.0, 0.0), &frame), None);
//! assert!(drag.end(PointerId(1)));
//! ```

use ideaboard_geometry::CanvasFrame;
use kurbo::{Point, Vec2};

/// Identifier of a pointer (mouse, pen or touch contact) as assigned by the
/// host's input system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// A pointer event in client/device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer that produced the event.
    pub pointer: PointerId,
    /// Position in client/device pixels.
    pub position: Point,
}

impl PointerEvent {
    /// Creates a pointer event.
    #[must_use]
    pub fn new(pointer: PointerId, position: Point) -> Self {
        Self { pointer, position }
    }
}

/// Tracks one pointer-drag gesture from down to up.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragSession {
    pointer: Option<PointerId>,
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    moved: bool,
}

impl DragSession {
    /// Starts a new session captured by `pointer` at `pos`.
    ///
    /// Any previous session is discarded.
    pub fn start(&mut self, pointer: PointerId, pos: Point) {
        self.pointer = Some(pointer);
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.moved = false;
    }

    /// Returns the delta from the last recorded position to `pos`.
    ///
    /// The new position is clamped into `frame` before it is recorded. Returns
    /// `None` when no session is active or `pointer` is not the captured one.
    pub fn update(&mut self, pointer: PointerId, pos: Point, frame: &CanvasFrame) -> Option<Vec2> {
        if self.pointer != Some(pointer) {
            return None;
        }
        let last_pos = self.last_pos?;
        let delta = pos - last_pos;
        self.last_pos = Some(frame.clamp_point(pos));
        if delta != Vec2::ZERO {
            self.moved = true;
        }
        Some(delta)
    }

    /// Returns the offset of `current_pos` from the start position.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Ends the session if `pointer` is the captured one.
    ///
    /// Returns `true` if a session was ended.
    pub fn end(&mut self, pointer: PointerId) -> bool {
        if self.pointer != Some(pointer) {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    /// Returns the captured pointer, if any.
    #[must_use]
    pub fn captured(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Returns `true` once any non-zero delta was observed in this session.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn frame() -> CanvasFrame {
        CanvasFrame::new(Rect::new(0.0, 0.0, 200.0, 100.0))
    }

    #[test]
    fn new_session_is_idle() {
        let drag = DragSession::default();
        assert!(!drag.is_dragging());
        assert!(drag.captured().is_none());
        assert!(!drag.has_moved());
    }

    #[test]
    fn start_captures_pointer() {
        let mut drag = DragSession::default();
        drag.start(PointerId(7), Point::new(10.0, 20.0));
        assert_eq!(drag.captured(), Some(PointerId(7)));
        assert_eq!(drag.total_offset(Point::new(10.0, 20.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn update_reports_incremental_deltas() {
        let mut drag = DragSession::default();
        let p = PointerId(1);
        drag.start(p, Point::new(0.0, 0.0));

        assert_eq!(
            drag.update(p, Point::new(5.0, 3.0), &frame()),
            Some(Vec2::new(5.0, 3.0))
        );
        assert_eq!(
            drag.update(p, Point::new(8.0, 7.0), &frame()),
            Some(Vec2::new(3.0, 4.0))
        );
        assert_eq!(
            drag.total_offset(Point::new(8.0, 7.0)),
            Some(Vec2::new(8.0, 7.0))
        );
    }

    #[test]
    fn recorded_position_is_clamped_to_canvas() {
        let mut drag = DragSession::default();
        let p = PointerId(1);
        drag.start(p, Point::new(190.0, 50.0));

        assert_eq!(
            drag.update(p, Point::new(260.0, -40.0), &frame()),
            Some(Vec2::new(70.0, -90.0))
        );
        // Measured from (200, 0), not from (260, -40).
        assert_eq!(
            drag.update(p, Point::new(180.0, 10.0), &frame()),
            Some(Vec2::new(-20.0, 10.0))
        );
    }

    #[test]
    fn stale_pointer_is_ignored() {
        let mut drag = DragSession::default();
        drag.start(PointerId(1), Point::new(10.0, 10.0));

        assert_eq!(drag.update(PointerId(2), Point::new(50.0, 50.0), &frame()), None);
        assert!(!drag.end(PointerId(2)));
        assert!(drag.is_dragging());
        assert!(!drag.has_moved());
    }

    #[test]
    fn update_without_session_returns_none() {
        let mut drag = DragSession::default();
        assert_eq!(drag.update(PointerId(1), Point::new(1.0, 1.0), &frame()), None);
    }

    #[test]
    fn zero_delta_does_not_count_as_movement() {
        let mut drag = DragSession::default();
        let p = PointerId(3);
        drag.start(p, Point::new(50.0, 50.0));

        assert_eq!(drag.update(p, Point::new(50.0, 50.0), &frame()), Some(Vec2::ZERO));
        assert!(!drag.has_moved());

        drag.update(p, Point::new(51.0, 50.0), &frame());
        assert!(drag.has_moved());
    }

    #[test]
    fn end_resets_and_restart_clears_movement() {
        let mut drag = DragSession::default();
        let p = PointerId(1);
        drag.start(p, Point::new(0.0, 0.0));
        drag.update(p, Point::new(10.0, 10.0), &frame());

        assert!(drag.end(p));
        assert!(!drag.is_dragging());
        assert!(drag.total_offset(Point::ZERO).is_none());

        drag.start(p, Point::new(50.0, 60.0));
        assert!(!drag.has_moved());
        assert_eq!(
            drag.total_offset(Point::new(55.0, 65.0)),
            Some(Vec2::new(5.0, 5.0))
        );
    }
}
