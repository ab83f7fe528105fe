// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use ideaboard_geometry::Telemetry;
use ideaboard_gesture::session::PointerId;
use kurbo::Rect;

use crate::id::ElementId;
use crate::menu::MenuAction;

/// Where focus should go after a canvas operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The element's root.
    Element(ElementId),
    /// One of the element's action-menu buttons.
    MenuButton(ElementId, MenuAction),
}

/// Screen-reader announcements emitted after canvas operations.
///
/// Wording and translation are up to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Announcement {
    /// A card was moved to the top of the stack.
    BroughtToFront,
    /// A card was moved to the bottom of the stack.
    SentToBack,
    /// A card was removed.
    Deleted,
}

/// A card's place in the stacking order, used for its accessible summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StackPosition {
    /// 1-based position from the bottom.
    pub position: usize,
    /// Number of cards on the canvas.
    pub total: usize,
}

/// Everything the canvas needs from its embedding application.
///
/// Only the canvas rectangle and the clock are required. Every other method
/// has a no-op default, so hosts implement what they render.
///
/// The host is passed by `&mut` to each [`Canvas`](crate::Canvas) call and is
/// never stored.
pub trait CanvasHost {
    /// Handle to the hosted content of one card (a widget, a DOM node, ...).
    type Surface;

    /// Returns the canvas rectangle in client/device pixels.
    ///
    /// Called once per gesture step; the result is never cached.
    fn canvas_rect(&self) -> Rect;

    /// Returns a monotonic timestamp in milliseconds.
    fn now_ms(&self) -> u64;

    /// Returns a description of the card's content for its summary.
    fn summary_text(&mut self, id: &ElementId) -> String {
        let _ = id;
        String::new()
    }

    /// Returns the "card N of M" part of a card's summary.
    fn denominator(&mut self, id: &ElementId, stack: StackPosition) -> String {
        let _ = id;
        format!("Card {} of {}", stack.position, stack.total)
    }

    /// A card's summary changed and should be re-announced.
    fn summary_changed(&mut self, id: &ElementId, summary: &str) {
        let _ = (id, summary);
    }

    /// Attaches a card's content surface to the canvas.
    fn attach_surface(&mut self, id: &ElementId, surface: &Self::Surface) {
        let _ = (id, surface);
    }

    /// Detaches a card's content surface from the canvas.
    fn detach_surface(&mut self, id: &ElementId, surface: &Self::Surface) {
        let _ = (id, surface);
    }

    /// Makes content non-interactive (`true`) or interactive (`false`).
    fn set_content_inert(&mut self, surface: &Self::Surface, inert: bool) {
        let _ = (surface, inert);
    }

    /// Moves keyboard focus into the content.
    fn focus_content(&mut self, surface: &Self::Surface) {
        let _ = surface;
    }

    /// Adds (`true`) or removes (`false`) the card root from the tab order.
    fn set_tab_stop(&mut self, id: &ElementId, enabled: bool) {
        let _ = (id, enabled);
    }

    /// Shows or hides a card's action menu.
    fn set_menu_visible(&mut self, id: &ElementId, visible: bool) {
        let _ = (id, visible);
    }

    /// A card's telemetry changed; update its visual surface.
    fn telemetry_changed(&mut self, id: &ElementId, telemetry: &Telemetry) {
        let _ = (id, telemetry);
    }

    /// Routes subsequent events from `pointer` to the card.
    fn capture_pointer(&mut self, id: &ElementId, pointer: PointerId) {
        let _ = (id, pointer);
    }

    /// Ends a capture started with [`CanvasHost::capture_pointer`].
    fn release_pointer(&mut self, id: &ElementId, pointer: PointerId) {
        let _ = (id, pointer);
    }

    /// Moves keyboard focus.
    fn request_focus(&mut self, target: FocusTarget) {
        let _ = target;
    }

    /// Speaks `announcement` through the screen reader.
    fn announce(&mut self, announcement: Announcement) {
        let _ = announcement;
    }

    /// A pointer move of the card has finished.
    fn move_completed(&mut self, id: &ElementId) {
        let _ = id;
    }

    /// A knob resize of the card has finished; hosted content may re-layout.
    fn resize_completed(&mut self, id: &ElementId) {
        let _ = id;
    }

    /// The user asked to edit the card's content.
    fn edit_requested(&mut self, id: &ElementId) {
        let _ = id;
    }

    /// The user asked to delete the card. The host confirms and then calls
    /// [`Canvas::delete_element`](crate::Canvas::delete_element).
    fn delete_requested(&mut self, id: &ElementId) {
        let _ = id;
    }

    /// Installs the shared click listener that ends editing.
    fn register_dismiss_listener(&mut self) {}

    /// Removes the shared click listener.
    fn unregister_dismiss_listener(&mut self) {}
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{CanvasHost, StackPosition};
    use crate::id::ElementId;

    struct Bare;

    impl CanvasHost for Bare {
        type Surface = ();

        fn canvas_rect(&self) -> Rect {
            Rect::ZERO
        }

        fn now_ms(&self) -> u64 {
            0
        }
    }

    #[test]
    fn default_denominator_counts_from_the_bottom() {
        let stack = StackPosition {
            position: 2,
            total: 3,
        };
        assert_eq!(
            Bare.denominator(&ElementId::from("a"), stack),
            "Card 2 of 3"
        );
    }
}
