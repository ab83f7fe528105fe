// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ideaboard Gesture: small state machines for moving and resizing cards.
//!
//! Each module handles one interaction pattern and owns just enough state to
//! turn raw input into pixel deltas:
//!
//! - [`session`]: one captured pointer drag, with incremental deltas measured
//!   from a last position that is kept inside the canvas.
//! - [`knob`]: eight compass-positioned resize handles that map pointer
//!   movement to a [`PixelDelta`](ideaboard_geometry::PixelDelta) and an
//!   optional aspect lock.
//! - [`nudge`]: arrow-key stepping with acceleration for the keyboard move and
//!   resize protocol.
//! - [`guard`]: a focus-retention suppression window checked against a
//!   monotonic clock.
//!
//! None of these apply geometry themselves. Their output is fed into
//! [`ideaboard_geometry::GeometryClamp`] by the owning element, which decides
//! what to keep.
//!
//! ## Keyboard and pointer parity
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use ideaboard_geometry::CanvasFrame;
//! use ideaboard_gesture::nudge::{Key, NudgeAccumulator};
//! use ideaboard_gesture::session::{DragSession, PointerId};
//!
//! let frame = CanvasFrame::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! // Dragging one pixel to the right...
//! let mut drag = DragSession::default();
//! drag.start(PointerId(1), Point::new(10.0, 10.0));
//! let by_pointer = drag.update(PointerId(1), Point::new(11.0, 10.0), &frame).unwrap();
//!
//! // ...is the same offset as the first ArrowRight keydown.
//! let mut nudge = NudgeAccumulator::new(1.0, 0.4);
//! let by_key = nudge.step(Key::ArrowRight).unwrap();
//! assert_eq!(by_pointer, by_key);
//! assert_eq!(by_key, Vec2::new(1.0, 0.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod guard;
pub mod knob;
pub mod nudge;
pub mod session;
