// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use ideaboard_geometry::{DEFAULT_MIN_SIZE_PX, GeometryClamp};
use ideaboard_gesture::nudge::NudgeAccumulator;
use serde::{Deserialize, Serialize};

use crate::capability::HostMode;

/// Tunables shared by every element on a canvas.
///
/// Missing fields deserialize to their defaults, so a host can persist only
/// what it overrides.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Minimum card size in pixels, on both axes.
    pub min_size_px: f64,
    /// Width and height, in percent, of cards added without a size.
    pub default_size: f64,
    /// First keyboard step, in pixels, for both move and resize.
    pub base_delta_px: f64,
    /// Growth of the keyboard move step per repeated keydown.
    pub move_increment_px: f64,
    /// Growth of the keyboard resize step per repeated keydown.
    pub resize_increment_px: f64,
    /// How long focus loss is ignored after a card is re-focused.
    pub focus_grace_ms: u64,
    /// Authoring or playback.
    pub host_mode: HostMode,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_size_px: DEFAULT_MIN_SIZE_PX,
            default_size: 33.3,
            base_delta_px: 1.0,
            move_increment_px: 0.4,
            resize_increment_px: 0.2,
            focus_grace_ms: 100,
            host_mode: HostMode::default(),
        }
    }
}

impl InteractionConfig {
    pub(crate) fn clamp(&self) -> GeometryClamp {
        GeometryClamp::new(self.min_size_px)
    }

    pub(crate) fn move_nudge(&self) -> NudgeAccumulator {
        NudgeAccumulator::new(self.base_delta_px, self.move_increment_px)
    }

    pub(crate) fn resize_nudge(&self) -> NudgeAccumulator {
        NudgeAccumulator::new(self.base_delta_px, self.resize_increment_px)
    }
}
