// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard nudging: arrow keys with acceleration.
//!
//! While a move or resize toggle is active, each arrow keydown applies the
//! current step along the arrow's axis and then grows the step by a fixed
//! increment. Releasing the key resets the step to its base.
//!
//! ```
//! use ideaboard_gesture::nudge::{Key, NudgeAccumulator};
//! use kurbo::Vec2;
//!
//! let mut nudge = NudgeAccumulator::new(1.0, 0.5);
//! assert_eq!(nudge.step(Key::ArrowRight), Some(Vec2::new(1.0, 0.0)));
//! assert_eq!(nudge.step(Key::ArrowRight), Some(Vec2::new(1.5, 0.0)));
//! assert_eq!(nudge.step(Key::Enter), None);
//!
//! nudge.reset();
//! assert_eq!(nudge.step(Key::ArrowUp), Some(Vec2::new(0.0, -1.0)));
//! ```

use kurbo::Vec2;

/// Keys the interaction layer cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Either Shift key.
    Shift,
    /// Tab.
    Tab,
    /// Anything else.
    Other,
}

impl Key {
    /// Returns the unit direction of an arrow key, in screen coordinates
    /// (y grows downwards).
    #[must_use]
    pub fn arrow_direction(self) -> Option<Vec2> {
        match self {
            Self::ArrowLeft => Some(Vec2::new(-1.0, 0.0)),
            Self::ArrowRight => Some(Vec2::new(1.0, 0.0)),
            Self::ArrowUp => Some(Vec2::new(0.0, -1.0)),
            Self::ArrowDown => Some(Vec2::new(0.0, 1.0)),
            _ => None,
        }
    }

    /// Returns `true` for Enter and Space.
    #[must_use]
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Accelerating step size for repeated arrow keydowns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NudgeAccumulator {
    base: f64,
    increment: f64,
    current: f64,
}

impl NudgeAccumulator {
    /// Creates an accumulator starting at `base` pixels and growing by
    /// `increment` pixels per keydown.
    #[must_use]
    pub fn new(base: f64, increment: f64) -> Self {
        Self {
            base,
            increment,
            current: base,
        }
    }

    /// Returns the magnitude the next step will have.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Returns the base magnitude.
    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Returns the pixel offset for `key` and accelerates.
    ///
    /// Non-arrow keys return `None` and leave the step untouched.
    pub fn step(&mut self, key: Key) -> Option<Vec2> {
        let direction = key.arrow_direction()?;
        let offset = direction * self.current;
        self.current += self.increment;
        Some(offset)
    }

    /// Resets the magnitude to its base.
    pub fn reset(&mut self) {
        self.current = self.base;
    }
}
