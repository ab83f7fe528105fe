// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How an overflowing rectangle is brought back inside the canvas.
///
/// This enum is derived from [`Intent`] and consulted by
/// [`crate::GeometryClamp::sanitize_overflow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep the size and shift the position back so the far edge touches 100%.
    RetainSize,
    /// Keep the position and shrink the size so the far edge touches 100%.
    #[default]
    Shrink,
}

/// A locked width/height ratio for a resize gesture.
///
/// The ratio is expressed in pixels (`width_px / height_px`) and is captured
/// once when the gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectLock {
    ratio: f64,
}

impl AspectLock {
    /// Creates a lock for `ratio`, or `None` if the ratio is not a positive,
    /// finite number.
    #[must_use]
    pub fn new(ratio: f64) -> Option<Self> {
        (ratio.is_finite() && ratio > 0.0).then_some(Self { ratio })
    }

    /// Creates a lock from a pixel size, or `None` for degenerate sizes.
    #[must_use]
    pub fn from_size(size: kurbo::Size) -> Option<Self> {
        if size.height <= 0.0 {
            return None;
        }
        Self::new(size.width / size.height)
    }

    /// Returns `width / height`.
    #[must_use]
    pub fn ratio(self) -> f64 {
        self.ratio
    }
}

/// What a proposed telemetry update is for.
///
/// The intent decides the overflow policy and whether the aspect-ratio step of
/// the pixel pipeline runs.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Intent {
    /// A drag or keyboard move. Moving never resizes: overflow shifts the card
    /// back inside the canvas.
    Move,
    /// A knob drag or keyboard resize. Overflow shrinks the card.
    ///
    /// With an aspect lock, vertical overflow is left alone by
    /// [`crate::GeometryClamp::sanitize_overflow`]; the aspect step of
    /// [`crate::GeometryClamp::apply_pixel_delta`] rejects out-of-canvas
    /// results before sanitizing ever sees them.
    Resize {
        /// Ratio to keep while resizing, if any.
        aspect: Option<AspectLock>,
    },
    /// Host-driven placement: creation, loading or an explicit set.
    /// Behaves like an unlocked resize.
    #[default]
    Place,
}

impl Intent {
    /// Shorthand for a resize without aspect lock.
    #[must_use]
    pub const fn resize() -> Self {
        Self::Resize { aspect: None }
    }

    /// Shorthand for a resize keeping `lock`.
    #[must_use]
    pub const fn resize_locked(lock: AspectLock) -> Self {
        Self::Resize { aspect: Some(lock) }
    }

    /// Returns the overflow policy for this intent.
    #[must_use]
    pub fn overflow_policy(self) -> OverflowPolicy {
        match self {
            Self::Move => OverflowPolicy::RetainSize,
            Self::Resize { .. } | Self::Place => OverflowPolicy::Shrink,
        }
    }

    /// Returns the aspect lock, if this is a locked resize.
    #[must_use]
    pub fn aspect(self) -> Option<AspectLock> {
        match self {
            Self::Resize { aspect } => aspect,
            Self::Move | Self::Place => None,
        }
    }
}
