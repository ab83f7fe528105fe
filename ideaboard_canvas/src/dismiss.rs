// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashSet;

use crate::id::ElementId;

/// Change to the shared dismiss listener required by a subscription update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerTransition {
    /// First subscriber: register the listener.
    Register,
    /// Last subscriber left: unregister the listener.
    Unregister,
}

/// Ref-counted subscription to the shared dismiss listener.
///
/// Keyed by element id, so repeated activation of the same element counts
/// once. The listener is registered exactly while the set is non-empty.
#[derive(Clone, Debug, Default)]
pub struct DismissSubscription {
    active: HashSet<ElementId>,
}

impl DismissSubscription {
    /// Creates an empty subscription.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id`; returns [`ListenerTransition::Register`] on 0→1.
    pub fn activate(&mut self, id: ElementId) -> Option<ListenerTransition> {
        let was_empty = self.active.is_empty();
        (self.active.insert(id) && was_empty).then_some(ListenerTransition::Register)
    }

    /// Removes `id`; returns [`ListenerTransition::Unregister`] on 1→0.
    pub fn deactivate(&mut self, id: &ElementId) -> Option<ListenerTransition> {
        (self.active.remove(id) && self.active.is_empty()).then_some(ListenerTransition::Unregister)
    }

    /// Returns `true` if `id` is in the active-edit set.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.active.contains(id)
    }

    /// Returns `true` while the listener should be registered.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        !self.active.is_empty()
    }

    /// Number of active elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns `true` if no element is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
