// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

use crate::telemetry::{PERCENT_MAX, Telemetry};

/// A canvas axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right; `x` and `width`.
    Horizontal,
    /// Top to bottom; `y` and `height`.
    Vertical,
}

/// The canvas rectangle in device pixels, used as the coordinate frame for
/// every card.
///
/// `CanvasFrame` is a snapshot: build one from a fresh bounding-rect query for
/// each gesture step instead of keeping it across frames. It can be used to:
/// - Convert pixel lengths on either axis into percentages and back.
/// - Convert [`Telemetry`] into a pixel rectangle relative to the canvas.
/// - Clamp client-space pointer positions into the canvas.
/// - Fit the canvas into an available area for fullscreen display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasFrame {
    rect: Rect,
}

impl CanvasFrame {
    /// Creates a frame over `rect`, in client/device coordinates.
    ///
    /// The rect is normalized so that `x0 <= x1` and `y0 <= y1`.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect: rect.abs() }
    }

    /// Returns the canvas rectangle in client/device coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns the canvas size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Returns the pixel extent along `axis`.
    #[must_use]
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.rect.width(),
            Axis::Vertical => self.rect.height(),
        }
    }

    /// Returns the first axis with zero extent, if any.
    #[must_use]
    pub fn degenerate_axis(&self) -> Option<Axis> {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .find(|&axis| self.extent(axis) <= 0.0)
    }

    /// Converts a pixel length along `axis` into percent of the extent.
    ///
    /// Returns `0.0` when the extent is zero.
    #[must_use]
    pub fn px_to_percent(&self, px: f64, axis: Axis) -> f64 {
        let extent = self.extent(axis);
        if extent <= 0.0 {
            return 0.0;
        }
        PERCENT_MAX * px / extent
    }

    /// Converts a percentage of the extent along `axis` into pixels.
    #[must_use]
    pub fn percent_to_px(&self, percent: f64, axis: Axis) -> f64 {
        percent * self.extent(axis) / PERCENT_MAX
    }

    /// Converts telemetry into a pixel rectangle relative to the canvas origin.
    #[must_use]
    pub fn telemetry_to_rect(&self, telemetry: &Telemetry) -> Rect {
        let x = self.percent_to_px(telemetry.x, Axis::Horizontal);
        let y = self.percent_to_px(telemetry.y, Axis::Vertical);
        let width = self.percent_to_px(telemetry.width, Axis::Horizontal);
        let height = self.percent_to_px(telemetry.height, Axis::Vertical);
        Rect::new(x, y, x + width, y + height)
    }

    /// Converts a client-space point into canvas percentages.
    ///
    /// Points outside the canvas map outside `[0, 100]`; degenerate axes map
    /// to `0.0`.
    #[must_use]
    pub fn point_to_percent(&self, client: Point) -> Point {
        Point::new(
            self.px_to_percent(client.x - self.rect.x0, Axis::Horizontal),
            self.px_to_percent(client.y - self.rect.y0, Axis::Vertical),
        )
    }

    /// Clamps a client-space point into the canvas rectangle.
    #[must_use]
    pub fn clamp_point(&self, client: Point) -> Point {
        // `max`/`min` rather than `clamp`: a NaN rect must not panic.
        Point::new(
            client.x.max(self.rect.x0).min(self.rect.x1),
            client.y.max(self.rect.y0).min(self.rect.y1),
        )
    }

    /// Returns the largest size with the canvas aspect ratio that fits inside
    /// `available`.
    ///
    /// Returns `None` if either the canvas or the available area has a zero
    /// extent.
    #[must_use]
    pub fn fit_within(&self, available: Size) -> Option<Size> {
        let canvas = self.size();
        if canvas.width <= 0.0 || canvas.height <= 0.0 {
            return None;
        }
        if available.width <= 0.0 || available.height <= 0.0 {
            return None;
        }

        let fitted = if canvas.width / canvas.height > available.width / available.height {
            Size::new(
                available.width,
                available.width * canvas.height / canvas.width,
            )
        } else {
            Size::new(
                available.height * canvas.width / canvas.height,
                available.height,
            )
        };
        Some(fitted)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{Axis, CanvasFrame};
    use crate::Telemetry;

    #[test]
    fn percent_roundtrip_on_both_axes() {
        let frame = CanvasFrame::new(Rect::new(10.0, 20.0, 1010.0, 520.0));
        assert_eq!(frame.px_to_percent(250.0, Axis::Horizontal), 25.0);
        assert_eq!(frame.px_to_percent(250.0, Axis::Vertical), 50.0);
        assert_eq!(frame.percent_to_px(25.0, Axis::Horizontal), 250.0);
        assert_eq!(frame.percent_to_px(50.0, Axis::Vertical), 250.0);
    }

    #[test]
    fn degenerate_extent_short_circuits_to_zero() {
        let frame = CanvasFrame::new(Rect::new(0.0, 0.0, 0.0, 300.0));
        assert_eq!(frame.degenerate_axis(), Some(Axis::Horizontal));
        assert_eq!(frame.px_to_percent(48.0, Axis::Horizontal), 0.0);
        assert_eq!(frame.px_to_percent(150.0, Axis::Vertical), 50.0);
        assert_eq!(frame.point_to_percent(Point::new(5.0, 5.0)).x, 0.0);
    }

    #[test]
    fn telemetry_maps_to_canvas_relative_pixels() {
        let frame = CanvasFrame::new(Rect::new(100.0, 100.0, 1100.0, 600.0));
        let rect = frame.telemetry_to_rect(&Telemetry::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(rect, Rect::new(100.0, 50.0, 300.0, 150.0));
    }

    #[test]
    fn drop_position_is_relative_to_canvas_origin() {
        let frame = CanvasFrame::new(Rect::new(100.0, 50.0, 500.0, 250.0));
        let pct = frame.point_to_percent(Point::new(300.0, 100.0));
        assert_eq!(pct, Point::new(50.0, 25.0));
    }

    #[test]
    fn clamp_point_stays_inside_rect() {
        let frame = CanvasFrame::new(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(
            frame.clamp_point(Point::new(-20.0, 80.0)),
            Point::new(0.0, 50.0)
        );
        assert_eq!(
            frame.clamp_point(Point::new(40.0, 10.0)),
            Point::new(40.0, 10.0)
        );
    }

    #[test]
    fn fit_within_preserves_aspect_ratio() {
        let frame = CanvasFrame::new(Rect::new(0.0, 0.0, 800.0, 400.0));

        // Wider than available: width-limited.
        let fitted = frame.fit_within(Size::new(1000.0, 1000.0)).unwrap();
        assert_eq!(fitted, Size::new(1000.0, 500.0));

        // Taller than available: height-limited.
        let fitted = frame.fit_within(Size::new(4000.0, 1000.0)).unwrap();
        assert_eq!(fitted, Size::new(2000.0, 1000.0));

        assert!(frame.fit_within(Size::new(0.0, 100.0)).is_none());
        assert!(
            CanvasFrame::new(Rect::ZERO)
                .fit_within(Size::new(10.0, 10.0))
                .is_none()
        );
    }
}
