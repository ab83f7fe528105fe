// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ideaboard Geometry: percentage-space telemetry and its clamp pipeline.
//!
//! Cards on an idea board store their position and size as percentages of the
//! canvas extent, so a board renders the same at any resolution. Input, on the
//! other hand, arrives in device pixels. This crate is the bridge:
//! - [`Telemetry`] / [`TelemetryPatch`]: the per-card `{x, y, width, height}`
//!   record, each value a percentage of the canvas extent.
//! - [`CanvasFrame`]: the live canvas rectangle in device pixels and the
//!   pixel↔percent conversions derived from it.
//! - [`Intent`]: what a proposed update is for (moving, resizing with an
//!   optional [`AspectLock`], or placing), which selects the overflow policy.
//! - [`GeometryClamp`]: turns a [`PixelDelta`] into valid new telemetry, or
//!   rejects it with a [`GeometryError`].
//!
//! It does **not** own any card, scene or input state. Callers query the
//! canvas rectangle fresh for every gesture step, build a [`CanvasFrame`] from
//! it and hand it to the clamp together with the current telemetry.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use ideaboard_geometry::{CanvasFrame, GeometryClamp, Intent, PixelDelta, Telemetry};
//!
//! // A 1000x500 px canvas.
//! let frame = CanvasFrame::new(Rect::new(0.0, 0.0, 1000.0, 500.0));
//! let clamp = GeometryClamp::default();
//!
//! // Drag a card 400 px to the right. Moving never resizes, so the card
//! // stops at the right edge instead of shrinking.
//! let card = Telemetry::new(70.0, 70.0, 30.0, 30.0);
//! let moved = clamp
//!     .apply_pixel_delta(&card, PixelDelta::translate(Vec2::new(400.0, 0.0)), &frame, Intent::Move)
//!     .unwrap();
//! assert_eq!(moved.x, 70.0);
//! assert_eq!(moved.y, 70.0);
//! ```
//!
//! ## Rejection vs. clamping
//!
//! Mid-gesture updates that would leave the canvas under an aspect lock, or
//! that would shrink a card below [`GeometryClamp::min_size_px`], are rejected
//! as a whole: the caller keeps the previous telemetry. Everything else is
//! clamped into range by [`GeometryClamp::sanitize`].
//!
//! This crate is `no_std`.

#![no_std]

mod clamp;
mod error;
mod frame;
mod intent;
mod telemetry;

pub use clamp::{DEFAULT_MIN_SIZE_PX, GeometryClamp, PixelDelta};
pub use error::GeometryError;
pub use frame::{Axis, CanvasFrame};
pub use intent::{AspectLock, Intent, OverflowPolicy};
pub use telemetry::{PERCENT_MAX, Telemetry, TelemetryPatch};
