// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::frame::Axis;

/// Why a proposed telemetry update was not applied.
///
/// None of these are fatal. Callers keep the previous telemetry and carry on;
/// rejections are expected many times per second during a drag.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The canvas has zero extent on `axis`, so no percentage can be derived.
    #[error("canvas has zero extent on the {axis:?} axis")]
    DegenerateCanvas {
        /// The collapsed axis.
        axis: Axis,
    },
    /// An aspect-locked resize would leave the canvas.
    #[error("aspect-locked rectangle leaves the canvas")]
    OutOfBounds,
    /// The resulting size is below the fixed pixel minimum.
    #[error("{axis:?} size of {size_px}px is below the {min_px}px minimum")]
    BelowMinimum {
        /// Axis that is too small.
        axis: Axis,
        /// Proposed size in pixels.
        size_px: f64,
        /// Configured minimum in pixels.
        min_px: f64,
    },
}

impl GeometryError {
    /// Returns `true` for the invalid-geometry class: the proposal violated
    /// bounds or minimum size, as opposed to the canvas being unusable.
    #[must_use]
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Self::OutOfBounds | Self::BelowMinimum { .. })
    }
}
