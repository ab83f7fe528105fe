// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::error::GeometryError;
use crate::frame::{Axis, CanvasFrame};
use crate::intent::{Intent, OverflowPolicy};
use crate::telemetry::{PERCENT_MAX, Telemetry, TelemetryPatch};

/// Default minimum card size in pixels, on both axes.
pub const DEFAULT_MIN_SIZE_PX: f64 = 48.0;

/// Slack, in pixels, allowed when checking aspect-locked rectangles against
/// the canvas edges. Absorbs percent→pixel rounding of flush cards.
const EDGE_SLACK_PX: f64 = 1e-6;

/// A proposed change to a card, in device pixels.
///
/// `x`/`y` move the top-left corner, `width`/`height` change the size. A knob
/// on the left or top edge moves the corner by the negated size change so the
/// opposite edge stays put.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PixelDelta {
    /// Horizontal offset of the left edge.
    pub x: f64,
    /// Vertical offset of the top edge.
    pub y: f64,
    /// Change in width.
    pub width: f64,
    /// Change in height.
    pub height: f64,
}

impl PixelDelta {
    /// The empty delta.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// A pure translation.
    #[must_use]
    pub fn translate(offset: Vec2) -> Self {
        Self {
            x: offset.x,
            y: offset.y,
            ..Self::ZERO
        }
    }

    /// A pure size change anchored at the top-left corner.
    #[must_use]
    pub fn grow(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::ZERO
        }
    }

    /// Returns `true` if every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    fn finite_or_zero(self) -> Self {
        let f = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            x: f(self.x),
            y: f(self.y),
            width: f(self.width),
            height: f(self.height),
        }
    }
}

/// Card rectangle in canvas-relative pixels.
#[derive(Clone, Copy, Debug)]
struct PxBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl PxBox {
    fn from_telemetry(t: &Telemetry, frame: &CanvasFrame) -> Self {
        Self {
            x: frame.percent_to_px(t.x, Axis::Horizontal),
            y: frame.percent_to_px(t.y, Axis::Vertical),
            width: frame.percent_to_px(t.width, Axis::Horizontal),
            height: frame.percent_to_px(t.height, Axis::Vertical),
        }
    }

    fn offset(&self, delta: &PixelDelta) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            width: self.width + delta.width,
            height: self.height + delta.height,
        }
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn to_telemetry(self, frame: &CanvasFrame) -> Telemetry {
        Telemetry {
            x: frame.px_to_percent(self.x, Axis::Horizontal),
            y: frame.px_to_percent(self.y, Axis::Vertical),
            width: frame.px_to_percent(self.width, Axis::Horizontal),
            height: frame.px_to_percent(self.height, Axis::Vertical),
        }
    }
}

/// The clamp pipeline that keeps card telemetry valid.
///
/// Two entry points:
/// - [`GeometryClamp::sanitize`] clamps a (possibly sparse) percentage update
///   into range. It never fails.
/// - [`GeometryClamp::apply_pixel_delta`] applies a pixel-space gesture step.
///   It rejects whole updates that violate the minimum size or, under an
///   aspect lock, the canvas bounds, and otherwise finishes with `sanitize`.
///
/// The minimum size is fixed in pixels, so its percentage equivalent depends on
/// the live canvas extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryClamp {
    min_size_px: f64,
}

impl Default for GeometryClamp {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE_PX)
    }
}

impl GeometryClamp {
    /// Creates a clamp with the given minimum card size in pixels.
    ///
    /// Negative or non-finite minimums are treated as zero.
    #[must_use]
    pub fn new(min_size_px: f64) -> Self {
        let min_size_px = if min_size_px.is_finite() {
            min_size_px.max(0.0)
        } else {
            0.0
        };
        Self { min_size_px }
    }

    /// Returns the minimum card size in pixels.
    #[must_use]
    pub fn min_size_px(&self) -> f64 {
        self.min_size_px
    }

    /// Returns the minimum card size along `axis` in percent of `frame`.
    #[must_use]
    pub fn min_percent(&self, frame: &CanvasFrame, axis: Axis) -> f64 {
        frame.px_to_percent(self.min_size_px, axis)
    }

    /// Applies `patch` to `current` and clamps the result into range.
    ///
    /// Runs, in order: position clamp, size clamp, overflow correction,
    /// minimum restore. Non-finite patch values are ignored.
    #[must_use]
    pub fn sanitize(
        &self,
        current: &Telemetry,
        patch: TelemetryPatch,
        frame: &CanvasFrame,
        intent: Intent,
    ) -> Telemetry {
        let keep_finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        let patch = TelemetryPatch {
            x: keep_finite(patch.x),
            y: keep_finite(patch.y),
            width: keep_finite(patch.width),
            height: keep_finite(patch.height),
        };
        let proposed = current.patched(patch);
        let positioned = self.sanitize_position(proposed);
        let sized = self.sanitize_size(positioned, frame);
        let fitted = self.sanitize_overflow(sized, intent);
        self.restore_minimum(fitted, frame)
    }

    /// Clamps `x` and `y` independently into `[0, 100]`.
    #[must_use]
    pub fn sanitize_position(&self, t: Telemetry) -> Telemetry {
        Telemetry {
            x: t.x.clamp(0.0, PERCENT_MAX),
            y: t.y.clamp(0.0, PERCENT_MAX),
            ..t
        }
    }

    /// Clamps `width` and `height` into `[min_percent, 100]`.
    ///
    /// On a canvas smaller than the pixel minimum the minimum wins.
    #[must_use]
    pub fn sanitize_size(&self, t: Telemetry, frame: &CanvasFrame) -> Telemetry {
        Telemetry {
            width: t
                .width
                .min(PERCENT_MAX)
                .max(self.min_percent(frame, Axis::Horizontal)),
            height: t
                .height
                .min(PERCENT_MAX)
                .max(self.min_percent(frame, Axis::Vertical)),
            ..t
        }
    }

    /// Pulls a rectangle that sticks out past 100% back inside.
    ///
    /// Under [`OverflowPolicy::RetainSize`] the position shifts; under
    /// [`OverflowPolicy::Shrink`] the size shrinks. Vertical overflow is left
    /// untouched for aspect-locked resizes: shrinking the height here would
    /// break the ratio, and [`GeometryClamp::apply_pixel_delta`] has already
    /// rejected locked rectangles that leave the canvas.
    #[must_use]
    pub fn sanitize_overflow(&self, t: Telemetry, intent: Intent) -> Telemetry {
        let mut t = t;
        let policy = intent.overflow_policy();

        if t.right() > PERCENT_MAX {
            match policy {
                OverflowPolicy::RetainSize => t.x = PERCENT_MAX - t.width,
                OverflowPolicy::Shrink => t.width = PERCENT_MAX - t.x,
            }
        }

        if t.bottom() > PERCENT_MAX {
            match policy {
                OverflowPolicy::RetainSize => t.y = PERCENT_MAX - t.height,
                OverflowPolicy::Shrink if intent.aspect().is_none() => {
                    t.height = PERCENT_MAX - t.y;
                }
                OverflowPolicy::Shrink => {}
            }
        }

        t
    }

    /// Grows a dimension that overflow trimming left below the minimum back
    /// to it, moving the position back so the far edge stays at 100%.
    #[must_use]
    pub fn restore_minimum(&self, t: Telemetry, frame: &CanvasFrame) -> Telemetry {
        let fit = |pos: f64, size: f64, min: f64| {
            if size < min {
                (pos.min(PERCENT_MAX - min).max(0.0), min)
            } else {
                (pos, size)
            }
        };
        let (x, width) = fit(t.x, t.width, self.min_percent(frame, Axis::Horizontal));
        let (y, height) = fit(t.y, t.height, self.min_percent(frame, Axis::Vertical));
        Telemetry {
            x,
            y,
            width,
            height,
        }
    }

    /// Applies a pixel-space delta to `current` and returns the new telemetry.
    ///
    /// Steps:
    /// 1. Reject degenerate canvases.
    /// 2. Offset the current pixel rectangle by `delta`.
    /// 3. With an aspect lock, recompute the dependent dimension and anchor the
    ///    edge or corner opposite the dragged knob, then reject the whole
    ///    update if the rectangle leaves the canvas.
    /// 4. For a size change that pushed the top-left corner past the canvas
    ///    origin, trim the size by the excess and pin the corner to zero.
    /// 5. Reject sizes below the pixel minimum.
    /// 6. Convert to percentages and [`sanitize`](Self::sanitize).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateCanvas`] for a zero-extent frame,
    /// [`GeometryError::OutOfBounds`] for a locked rectangle outside the canvas
    /// and [`GeometryError::BelowMinimum`] for a too-small result. The caller
    /// is expected to keep `current` in every case.
    pub fn apply_pixel_delta(
        &self,
        current: &Telemetry,
        delta: PixelDelta,
        frame: &CanvasFrame,
        intent: Intent,
    ) -> Result<Telemetry, GeometryError> {
        if let Some(axis) = frame.degenerate_axis() {
            return Err(GeometryError::DegenerateCanvas { axis });
        }

        let delta = delta.finite_or_zero();
        let start = PxBox::from_telemetry(current, frame);
        let mut target = start.offset(&delta);

        if let Some(lock) = intent.aspect() {
            target = lock_aspect(&delta, &start, target, lock.ratio());

            let size = frame.size();
            if target.x < -EDGE_SLACK_PX
                || target.x + target.width > size.width + EDGE_SLACK_PX
                || target.y < -EDGE_SLACK_PX
                || target.y + target.height > size.height + EDGE_SLACK_PX
            {
                return Err(GeometryError::OutOfBounds);
            }
        }

        if target.x < 0.0 && delta.width != 0.0 {
            target.width += target.x;
            target.x = 0.0;
        }
        if target.y < 0.0 && delta.height != 0.0 {
            target.height += target.y;
            target.y = 0.0;
        }

        if target.width < self.min_size_px {
            return Err(GeometryError::BelowMinimum {
                axis: Axis::Horizontal,
                size_px: target.width,
                min_px: self.min_size_px,
            });
        }
        if target.height < self.min_size_px {
            return Err(GeometryError::BelowMinimum {
                axis: Axis::Vertical,
                size_px: target.height,
                min_px: self.min_size_px,
            });
        }

        let proposed = target.to_telemetry(frame);
        Ok(self.sanitize(current, proposed.into(), frame, intent))
    }
}

/// Recomputes the dependent dimension of an aspect-locked resize.
///
/// The dragged knob is recognised from which components of `delta` are set:
/// a moving left edge sets `x`, a moving top edge sets `y`, and a horizontal
/// knob sets `width`.
fn lock_aspect(delta: &PixelDelta, start: &PxBox, target: PxBox, ratio: f64) -> PxBox {
    let mut target = target;
    let moves_left = delta.x != 0.0;
    let moves_top = delta.y != 0.0;

    match (moves_left, moves_top) {
        // Top-left corner: keep the bottom-right corner.
        (true, true) => {
            target.height = target.width / ratio;
            target.y = start.bottom() - target.height;
        }
        // Top edge: width follows height.
        (false, true) if delta.width == 0.0 => {
            target.width = target.height * ratio;
        }
        // Top-right corner: keep the bottom edge.
        (false, true) => {
            target.height = target.width / ratio;
            target.y = start.bottom() - target.height;
        }
        // Left edge and bottom-left corner: keep the top edge.
        (true, false) => {
            target.height = target.width / ratio;
            target.y = start.y;
        }
        // Bottom edge: width follows height.
        (false, false) if delta.width == 0.0 => {
            target.width = target.height * ratio;
        }
        // Right edge and bottom-right corner: keep the top edge.
        (false, false) => {
            target.height = target.width / ratio;
            target.y = start.y;
        }
    }

    target
}
