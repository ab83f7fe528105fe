// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize knobs: one drag handle per compass position.
//!
//! A [`ResizeKnob`] turns pointer movement into a [`PixelDelta`] for its owner.
//! Knobs on the left or top edge move the card's corner by the negated size
//! change, so the opposite edge stays where it is. While Shift is held the
//! knob also reports the aspect ratio it captured at pointer-down.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use ideaboard_geometry::CanvasFrame;
//! use ideaboard_gesture::knob::{KnobPosition, ResizeKnob};
//! use ideaboard_gesture::session::{PointerEvent, PointerId};
//!
//! let frame = CanvasFrame::new(Rect::new(0.0, 0.0, 1000.0, 500.0));
//! let mut knob = ResizeKnob::new(KnobPosition::Left);
//!
//! knob.pointer_down(PointerEvent::new(PointerId(1), Point::new(100.0, 80.0)), Size::new(200.0, 100.0));
//! let step = knob
//!     .pointer_move(PointerEvent::new(PointerId(1), Point::new(80.0, 95.0)), &frame, false)
//!     .unwrap();
//!
//! // Dragging the left knob 20px left grows the card by 20px and moves its
//! // left edge by -20px. The vertical component is ignored.
//! assert_eq!(step.delta.width, 20.0);
//! assert_eq!(step.delta.x, -20.0);
//! assert_eq!(step.delta.height, 0.0);
//! assert!(knob.pointer_up(PointerId(1)));
//! ```

use ideaboard_geometry::{AspectLock, CanvasFrame, Intent, PixelDelta};
use kurbo::Size;

use crate::session::{DragSession, PointerEvent, PointerId};

/// Compass position of a resize knob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnobPosition {
    /// Top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge.
    Left,
    /// Top-left corner.
    TopLeft,
}

impl KnobPosition {
    /// All eight positions, clockwise from the top edge.
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
        Self::TopLeft,
    ];

    /// Returns `-1.0` for left knobs, `1.0` for right knobs and `0.0` for knobs
    /// that do not resize horizontally.
    #[must_use]
    pub fn horizontal_factor(self) -> f64 {
        match self {
            Self::Left | Self::TopLeft | Self::BottomLeft => -1.0,
            Self::Right | Self::TopRight | Self::BottomRight => 1.0,
            Self::Top | Self::Bottom => 0.0,
        }
    }

    /// Returns `-1.0` for top knobs, `1.0` for bottom knobs and `0.0` for knobs
    /// that do not resize vertically.
    #[must_use]
    pub fn vertical_factor(self) -> f64 {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => -1.0,
            Self::Bottom | Self::BottomLeft | Self::BottomRight => 1.0,
            Self::Left | Self::Right => 0.0,
        }
    }

    /// Returns `true` for the four corner knobs.
    #[must_use]
    pub fn is_corner(self) -> bool {
        self.horizontal_factor() != 0.0 && self.vertical_factor() != 0.0
    }

    /// Returns a stable kebab-case name, e.g. `"top-left"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Right => "right",
            Self::BottomRight => "bottom-right",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottom-left",
            Self::Left => "left",
            Self::TopLeft => "top-left",
        }
    }
}

/// One step of a knob drag, ready for [`ideaboard_geometry::GeometryClamp`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobStep {
    /// Pixel delta for the card.
    pub delta: PixelDelta,
    /// Ratio to keep, present while Shift is held.
    pub aspect: Option<AspectLock>,
}

impl KnobStep {
    /// Returns the resize intent for this step.
    #[must_use]
    pub fn intent(&self) -> Intent {
        Intent::Resize {
            aspect: self.aspect,
        }
    }
}

/// A drag handle at one compass position.
#[derive(Clone, Copy, Debug)]
pub struct ResizeKnob {
    position: KnobPosition,
    session: DragSession,
    aspect: Option<AspectLock>,
}

impl ResizeKnob {
    /// Creates an idle knob.
    #[must_use]
    pub fn new(position: KnobPosition) -> Self {
        Self {
            position,
            session: DragSession::default(),
            aspect: None,
        }
    }

    /// Returns the knob position.
    #[must_use]
    pub fn position(&self) -> KnobPosition {
        self.position
    }

    /// Returns `true` while a resize gesture is active.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.session.is_dragging()
    }

    /// Returns the pointer captured by the active gesture, if any.
    #[must_use]
    pub fn captured(&self) -> Option<PointerId> {
        self.session.captured()
    }

    /// Starts a resize gesture.
    ///
    /// `card_px` is the card's current size in pixels; its ratio is what a
    /// Shift-held drag keeps.
    pub fn pointer_down(&mut self, event: PointerEvent, card_px: Size) {
        self.session.start(event.pointer, event.position);
        self.aspect = AspectLock::from_size(card_px);
    }

    /// Converts a pointer move into a resize step.
    ///
    /// Returns `None` for events from a pointer other than the captured one.
    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        frame: &CanvasFrame,
        shift: bool,
    ) -> Option<KnobStep> {
        let moved = self.session.update(event.pointer, event.position, frame)?;

        let width = moved.x * self.position.horizontal_factor();
        let height = moved.y * self.position.vertical_factor();
        let delta = PixelDelta {
            x: if self.position.horizontal_factor() < 0.0 {
                -width
            } else {
                0.0
            },
            y: if self.position.vertical_factor() < 0.0 {
                -height
            } else {
                0.0
            },
            width,
            height,
        };

        Some(KnobStep {
            delta,
            aspect: if shift { self.aspect } else { None },
        })
    }

    /// Ends the gesture captured by `pointer`.
    ///
    /// Returns `true` if a gesture was ended; the owner then reports a
    /// completed resize.
    pub fn pointer_up(&mut self, pointer: PointerId) -> bool {
        if !self.session.end(pointer) {
            return false;
        }
        self.aspect = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    fn frame() -> CanvasFrame {
        CanvasFrame::new(Rect::new(0.0, 0.0, 1000.0, 500.0))
    }

    fn ev(x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(PointerId(1), Point::new(x, y))
    }

    #[test]
    fn factors_cover_all_positions() {
        let corners = KnobPosition::ALL.iter().filter(|k| k.is_corner()).count();
        assert_eq!(corners, 4);
        for knob in KnobPosition::ALL {
            assert!(
                knob.horizontal_factor() != 0.0 || knob.vertical_factor() != 0.0,
                "{} must resize something",
                knob.name()
            );
        }
        assert_eq!(KnobPosition::TopLeft.name(), "top-left");
    }

    #[test]
    fn top_left_knob_moves_corner_by_negated_growth() {
        let mut knob = ResizeKnob::new(KnobPosition::TopLeft);
        knob.pointer_down(ev(100.0, 50.0), Size::new(200.0, 100.0));

        let step = knob.pointer_move(ev(90.0, 45.0), &frame(), false).unwrap();
        assert_eq!(
            step.delta,
            PixelDelta {
                x: -10.0,
                y: -5.0,
                width: 10.0,
                height: 5.0,
            }
        );
        assert_eq!(step.intent(), Intent::resize());
    }

    #[test]
    fn bottom_right_knob_never_moves_corner() {
        let mut knob = ResizeKnob::new(KnobPosition::BottomRight);
        knob.pointer_down(ev(300.0, 150.0), Size::new(200.0, 100.0));

        let step = knob.pointer_move(ev(280.0, 170.0), &frame(), false).unwrap();
        assert_eq!(step.delta, PixelDelta::grow(-20.0, 20.0));
    }

    #[test]
    fn shift_reports_ratio_captured_at_pointer_down() {
        let mut knob = ResizeKnob::new(KnobPosition::Right);
        knob.pointer_down(ev(300.0, 100.0), Size::new(200.0, 100.0));

        let step = knob.pointer_move(ev(310.0, 100.0), &frame(), true).unwrap();
        assert_eq!(step.aspect.map(AspectLock::ratio), Some(2.0));

        let step = knob.pointer_move(ev(320.0, 100.0), &frame(), false).unwrap();
        assert!(step.aspect.is_none());
    }

    #[test]
    fn stale_pointer_and_idle_knob_are_ignored() {
        let mut knob = ResizeKnob::new(KnobPosition::Bottom);
        assert!(knob.pointer_move(ev(1.0, 1.0), &frame(), false).is_none());
        assert!(!knob.pointer_up(PointerId(1)));

        knob.pointer_down(ev(10.0, 10.0), Size::new(50.0, 50.0));
        let other = PointerEvent::new(PointerId(9), Point::new(20.0, 20.0));
        assert!(knob.pointer_move(other, &frame(), false).is_none());
        assert!(!knob.pointer_up(PointerId(9)));
        assert!(knob.is_resizing());

        assert!(knob.pointer_up(PointerId(1)));
        assert!(!knob.is_resizing());
    }

    #[test]
    fn steps_are_relative_to_clamped_last_position() {
        let mut knob = ResizeKnob::new(KnobPosition::Right);
        knob.pointer_down(ev(990.0, 100.0), Size::new(100.0, 100.0));

        let step = knob.pointer_move(ev(1100.0, 100.0), &frame(), false).unwrap();
        assert_eq!(step.delta.width, 110.0);
        // Back from the canvas edge at 1000.
        let step = knob.pointer_move(ev(980.0, 100.0), &frame(), false).unwrap();
        assert_eq!(step.delta.width, -20.0);
    }
}
