// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Upper bound of every percentage value.
pub const PERCENT_MAX: f64 = 100.0;

/// Position and size of a card, each a percentage of the canvas extent.
///
/// `x` and `width` are relative to the canvas width, `y` and `height` to the
/// canvas height. After every mutation through [`crate::GeometryClamp`] the
/// card lies inside the canvas: `0 <= x`, `x + width <= 100`, and likewise
/// vertically.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telemetry {
    /// Left edge, in percent of the canvas width.
    pub x: f64,
    /// Top edge, in percent of the canvas height.
    pub y: f64,
    /// Width, in percent of the canvas width.
    pub width: f64,
    /// Height, in percent of the canvas height.
    pub height: f64,
}

impl Telemetry {
    /// Creates telemetry from raw percentages. No clamping is applied.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `x + width`.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns `y + height`.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns a copy with every field present in `patch` replaced.
    #[must_use]
    pub fn patched(&self, patch: TelemetryPatch) -> Self {
        Self {
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            width: patch.width.unwrap_or(self.width),
            height: patch.height.unwrap_or(self.height),
        }
    }

    /// Returns `true` if the rectangle lies inside `[0, 100]` on both axes,
    /// allowing `tolerance` of float slack.
    #[must_use]
    pub fn is_inside_canvas(&self, tolerance: f64) -> bool {
        self.x >= -tolerance
            && self.y >= -tolerance
            && self.right() <= PERCENT_MAX + tolerance
            && self.bottom() <= PERCENT_MAX + tolerance
    }
}

/// A sparse telemetry update: only the present fields are changed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TelemetryPatch {
    /// New left edge, if any.
    pub x: Option<f64>,
    /// New top edge, if any.
    pub y: Option<f64>,
    /// New width, if any.
    pub width: Option<f64>,
    /// New height, if any.
    pub height: Option<f64>,
}

impl TelemetryPatch {
    /// Returns `true` if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// Sets the position fields.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Sets the size fields.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

impl From<Telemetry> for TelemetryPatch {
    fn from(t: Telemetry) -> Self {
        Self {
            x: Some(t.x),
            y: Some(t.y),
            width: Some(t.width),
            height: Some(t.height),
        }
    }
}
