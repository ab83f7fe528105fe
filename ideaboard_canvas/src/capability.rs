// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// What a card allows its user to do.
    ///
    /// Elements resolve their set once, at creation, with
    /// [`Capabilities::resolve`]; nothing consults the host mode afterwards.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Enter `interact` mode and edit the hosted content.
        const EDIT   = 0b0000_0001;
        /// Drag or nudge the card.
        const MOVE   = 0b0000_0010;
        /// Resize through knobs or the keyboard.
        const RESIZE = 0b0000_0100;
        /// Request deletion.
        const DELETE = 0b0000_1000;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Whether the board is being authored or played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Authoring: every card is fully editable.
    Editor,
    /// Playback: each card's requested capabilities apply.
    #[default]
    Player,
}

impl Capabilities {
    /// Resolves the effective capabilities of a card.
    #[must_use]
    pub fn resolve(requested: Self, host_mode: HostMode) -> Self {
        match host_mode {
            HostMode::Editor => Self::all(),
            HostMode::Player => requested,
        }
    }
}
