// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use crate::capability::Capabilities;

/// A button in a card's action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Request editing of the content.
    Edit,
    /// Keyboard move toggle.
    Move,
    /// Keyboard resize toggle.
    Resize,
    /// Move to the top of the stack.
    BringToFront,
    /// Move to the bottom of the stack.
    SendToBack,
    /// Request deletion.
    Delete,
}

impl MenuAction {
    /// Returns `true` for the move and resize toggles.
    #[must_use]
    pub fn is_toggle(self) -> bool {
        matches!(self, Self::Move | Self::Resize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MenuButton {
    action: MenuAction,
    active: bool,
}

/// The per-card action menu: which buttons exist, which toggles are active,
/// and whether the menu is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMenu {
    buttons: SmallVec<[MenuButton; 6]>,
    visible: bool,
}

impl ActionMenu {
    /// Builds the menu for `capabilities`.
    ///
    /// Order is fixed: edit, move, resize, bring to front, send to back,
    /// delete. Reordering is always available.
    #[must_use]
    pub fn new(capabilities: Capabilities) -> Self {
        let candidates = [
            (MenuAction::Edit, capabilities.contains(Capabilities::EDIT)),
            (MenuAction::Move, capabilities.contains(Capabilities::MOVE)),
            (MenuAction::Resize, capabilities.contains(Capabilities::RESIZE)),
            (MenuAction::BringToFront, true),
            (MenuAction::SendToBack, true),
            (MenuAction::Delete, capabilities.contains(Capabilities::DELETE)),
        ];
        let buttons = candidates
            .into_iter()
            .filter(|&(_, present)| present)
            .map(|(action, _)| MenuButton {
                action,
                active: false,
            })
            .collect();
        Self {
            buttons,
            visible: false,
        }
    }

    /// Returns the buttons in display order.
    pub fn actions(&self) -> impl Iterator<Item = MenuAction> + '_ {
        self.buttons.iter().map(|b| b.action)
    }

    /// Returns `true` if the menu has a button for `action`.
    #[must_use]
    pub fn contains(&self, action: MenuAction) -> bool {
        self.buttons.iter().any(|b| b.action == action)
    }

    /// Returns `true` if `action` is a toggle that is currently active.
    #[must_use]
    pub fn is_active(&self, action: MenuAction) -> bool {
        self.buttons
            .iter()
            .any(|b| b.action == action && b.active)
    }

    /// Flips a toggle and returns its new state.
    ///
    /// Returns `None` for non-toggle or missing buttons.
    pub fn toggle(&mut self, action: MenuAction) -> Option<bool> {
        if !action.is_toggle() {
            return None;
        }
        let button = self.buttons.iter_mut().find(|b| b.action == action)?;
        button.active = !button.active;
        Some(button.active)
    }

    /// Returns `true` while the menu is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the menu; returns `true` if that changed anything.
    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }
}
