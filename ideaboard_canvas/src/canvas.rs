// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered collection of cards and the cross-card concerns: stacking
//! order, the shared dismiss listener and input routing.

use hashbrown::HashSet;
use ideaboard_geometry::{CanvasFrame, Telemetry, TelemetryPatch};
use ideaboard_gesture::knob::KnobPosition;
use ideaboard_gesture::nudge::Key;
use ideaboard_gesture::session::PointerEvent;
use kurbo::{Point, Size};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::config::InteractionConfig;
use crate::dismiss::{DismissSubscription, ListenerTransition};
use crate::element::{
    EventTarget, FocusDestination, InputSource, InteractionElement, Mode, Signal, Signals,
};
use crate::error::CanvasError;
use crate::host::{Announcement, CanvasHost, FocusTarget, StackPosition};
use crate::id::ElementId;
use crate::menu::MenuAction;

/// Persisted shape of one card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Card id.
    pub id: ElementId,
    /// Position and size in percent.
    pub telemetry: Telemetry,
}

/// Everything needed to put a card on the canvas.
#[derive(Clone, Debug)]
pub struct ElementSpec<S> {
    /// Id to use; a UUID v4 is minted when absent.
    pub id: Option<ElementId>,
    /// Initial telemetry. A missing position is random, a missing size is
    /// [`InteractionConfig::default_size`].
    pub telemetry: TelemetryPatch,
    /// Capabilities requested by the card; resolved against the host mode.
    pub capabilities: Capabilities,
    /// Hosted content.
    pub surface: S,
}

impl<S> ElementSpec<S> {
    /// A fully capable card with default placement.
    pub fn new(surface: S) -> Self {
        Self {
            id: None,
            telemetry: TelemetryPatch::default(),
            capabilities: Capabilities::default(),
            surface,
        }
    }

    /// Restores a persisted card.
    pub fn from_snapshot(snapshot: ElementSnapshot, surface: S) -> Self {
        Self {
            id: Some(snapshot.id),
            telemetry: snapshot.telemetry.into(),
            ..Self::new(surface)
        }
    }

    /// Sets the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the initial telemetry.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: impl Into<TelemetryPatch>) -> Self {
        self.telemetry = telemetry.into();
        self
    }

    /// Sets the requested capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

/// An idea-board canvas.
///
/// Element order is both the stacking order (last is on top) and the tab
/// order. Every call takes the host by `&mut`; see [`CanvasHost`].
#[derive(Debug)]
pub struct Canvas<S> {
    config: InteractionConfig,
    elements: Vec<InteractionElement<S>>,
    dismiss: DismissSubscription,
}

impl<S> Default for Canvas<S> {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl<S> Canvas<S> {
    /// Creates an empty canvas.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            dismiss: DismissSubscription::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the canvas has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the card with `id`.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&InteractionElement<S>> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Returns the cards bottom to top.
    pub fn elements(&self) -> impl Iterator<Item = &InteractionElement<S>> + '_ {
        self.elements.iter()
    }

    /// Returns the ids bottom to top.
    pub fn order(&self) -> impl Iterator<Item = &ElementId> + '_ {
        self.elements.iter().map(InteractionElement::id)
    }

    /// Returns the telemetry of `id`.
    #[must_use]
    pub fn telemetry(&self, id: &ElementId) -> Option<Telemetry> {
        self.element(id).map(InteractionElement::telemetry)
    }

    /// Returns the persisted shape of every card, bottom to top.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ElementSnapshot> {
        self.elements
            .iter()
            .map(|e| ElementSnapshot {
                id: e.id().clone(),
                telemetry: e.telemetry(),
            })
            .collect()
    }

    /// Returns `true` while the shared dismiss listener is registered.
    #[must_use]
    pub fn is_dismiss_registered(&self) -> bool {
        self.dismiss.is_registered()
    }

    /// Returns `true` if `id` is in `interact` mode.
    #[must_use]
    pub fn is_editing(&self, id: &ElementId) -> bool {
        self.dismiss.contains(id)
    }

    /// Returns `true` if a touch on `target` of `id` should not scroll.
    #[must_use]
    pub fn suppresses_touch(&self, id: &ElementId, target: EventTarget) -> bool {
        self.element(id).is_some_and(|e| e.suppresses_touch(target))
    }

    /// Adds a card on top of the stack and focuses it.
    ///
    /// # Errors
    ///
    /// [`CanvasError::DuplicateId`] if the id is taken.
    pub fn add_element<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        spec: ElementSpec<S>,
    ) -> Result<ElementId, CanvasError> {
        let id = self.insert_element(host, self.elements.len(), spec)?;
        host.request_focus(FocusTarget::Element(id.clone()));
        Ok(id)
    }

    /// Inserts a card at `index` (clamped to the stack height).
    ///
    /// # Errors
    ///
    /// [`CanvasError::DuplicateId`] if the id is taken.
    pub fn insert_element<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        index: usize,
        spec: ElementSpec<S>,
    ) -> Result<ElementId, CanvasError> {
        if let Some(id) = &spec.id
            && self.element(id).is_some()
        {
            return Err(CanvasError::DuplicateId(id.clone()));
        }
        let element = self.build(host, spec);
        let id = element.id().clone();
        element.attach(host);

        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        tracing::debug!(id = %id, index, "element added");
        self.refresh_summary(host, &id);
        Ok(id)
    }

    /// Appends persisted cards, re-running their telemetry through the clamp
    /// pipeline.
    ///
    /// Nothing is added if any id is duplicated.
    ///
    /// # Errors
    ///
    /// [`CanvasError::DuplicateId`] for an id already on the canvas or
    /// repeated within `specs`.
    pub fn load<H, I>(&mut self, host: &mut H, specs: I) -> Result<Vec<ElementId>, CanvasError>
    where
        H: CanvasHost<Surface = S>,
        I: IntoIterator<Item = ElementSpec<S>>,
    {
        let specs: Vec<_> = specs.into_iter().collect();
        {
            let mut seen: HashSet<&ElementId> = self.order().collect();
            for id in specs.iter().filter_map(|s| s.id.as_ref()) {
                if !seen.insert(id) {
                    return Err(CanvasError::DuplicateId(id.clone()));
                }
            }
        }

        let count = specs.len();
        let mut ids = Vec::with_capacity(count);
        for spec in specs {
            ids.push(self.insert_element(host, self.elements.len(), spec)?);
        }
        tracing::debug!(count, total = self.elements.len(), "snapshot loaded");
        Ok(ids)
    }

    /// Removes a card.
    ///
    /// Returns its surface and the id that should receive focus next: the
    /// card above it, else the one below.
    ///
    /// # Errors
    ///
    /// [`CanvasError::UnknownElement`] if `id` is not on the canvas.
    pub fn delete_element<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
    ) -> Result<(S, Option<ElementId>), CanvasError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| CanvasError::UnknownElement(id.clone()))?;
        let mut element = self.elements.remove(index);
        element.cancel_gestures(host);
        let transition = self.dismiss.deactivate(id);
        apply_listener(host, transition);

        let next_focus = self
            .elements
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|i| self.elements.get(i)))
            .map(|e| e.id().clone());

        host.detach_surface(id, element.surface());
        host.announce(Announcement::Deleted);
        tracing::debug!(id = %id, index, ?next_focus, "element deleted");
        Ok((element.into_surface(), next_focus))
    }

    /// Removes every card and returns their surfaces, bottom to top.
    pub fn clear<H: CanvasHost<Surface = S>>(&mut self, host: &mut H) -> Vec<S> {
        let ids: Vec<ElementId> = self.order().cloned().collect();
        for id in &ids {
            let transition = self.dismiss.deactivate(id);
            apply_listener(host, transition);
        }
        self.elements
            .drain(..)
            .map(|mut element| {
                element.cancel_gestures(host);
                host.detach_surface(element.id(), element.surface());
                element.into_surface()
            })
            .collect()
    }

    /// Moves `id` to the top of the stack, keeping everyone else's relative
    /// order, then focuses `focus` or the card itself.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn bring_to_front<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        focus: Option<FocusTarget>,
    ) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::trace!(id = %id, "bring to front of unknown element");
            return false;
        };
        let element = self.elements.remove(index);
        self.elements.push(element);
        tracing::debug!(id = %id, from = index, "brought to front");
        self.after_reorder(host, id, focus, Announcement::BroughtToFront);
        true
    }

    /// Moves `id` to the bottom of the stack; the dual of
    /// [`Canvas::bring_to_front`].
    pub fn send_to_back<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        focus: Option<FocusTarget>,
    ) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::trace!(id = %id, "send to back of unknown element");
            return false;
        };
        let element = self.elements.remove(index);
        self.elements.insert(0, element);
        tracing::debug!(id = %id, from = index, "sent to back");
        self.after_reorder(host, id, focus, Announcement::SentToBack);
        true
    }

    /// Applies a sparse telemetry update through the sanitize step.
    ///
    /// # Errors
    ///
    /// [`CanvasError::UnknownElement`] if `id` is not on the canvas.
    pub fn set_telemetry<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        patch: TelemetryPatch,
    ) -> Result<Telemetry, CanvasError> {
        let element = self
            .element_mut(id)
            .ok_or_else(|| CanvasError::UnknownElement(id.clone()))?;
        Ok(element.set_telemetry(host, patch))
    }

    /// Puts `id` into `interact` mode and asks the host to open its editor.
    ///
    /// Returns `false` if `id` is unknown or cannot be edited.
    pub fn edit_element<H: CanvasHost<Surface = S>>(&mut self, host: &mut H, id: &ElementId) -> bool {
        let Some(element) = self.element_mut(id) else {
            tracing::trace!(id = %id, "edit of unknown element");
            return false;
        };
        if !element.capabilities().contains(Capabilities::EDIT) {
            tracing::trace!(id = %id, "edit without edit capability");
            return false;
        }
        let signals = element.set_mode(host, Mode::Interact);
        self.dispatch(host, id, signals);
        host.edit_requested(id);
        true
    }

    /// Sets the mode of `id`. Returns `false` if `id` is unknown.
    pub fn set_mode<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        mode: Mode,
    ) -> bool {
        self.route(host, id, |e, h| e.set_mode(h, mode))
    }

    /// Handles a click seen by the shared dismiss listener.
    ///
    /// `inside` is the card whose root contains the click target, if any.
    /// Every other card in `interact` mode returns to `view`.
    pub fn dismiss_click<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        inside: Option<&ElementId>,
    ) {
        let dismissed: Vec<ElementId> = self
            .order()
            .filter(|&id| self.dismiss.contains(id) && Some(id) != inside)
            .cloned()
            .collect();
        for id in &dismissed {
            self.set_mode(host, id, Mode::View);
        }
    }

    /// Returns the largest size with the canvas aspect ratio that fits
    /// `available`.
    pub fn fullscreen_size<H: CanvasHost<Surface = S>>(
        &self,
        host: &H,
        available: Size,
    ) -> Option<Size> {
        CanvasFrame::new(host.canvas_rect()).fit_within(available)
    }

    /// Converts a client-space drop point into canvas percentages.
    pub fn drop_position<H: CanvasHost<Surface = S>>(&self, host: &H, client: Point) -> Point {
        CanvasFrame::new(host.canvas_rect()).point_to_percent(client)
    }

    /// Pointer down on a card.
    pub fn pointer_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        target: EventTarget,
        event: PointerEvent,
    ) {
        self.route(host, id, |e, h| {
            e.pointer_down(h, target, event);
            Signals::new()
        });
    }

    /// Pointer move captured by a card.
    pub fn pointer_move<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        event: PointerEvent,
    ) {
        self.route(host, id, |e, h| {
            e.pointer_move(h, event);
            Signals::new()
        });
    }

    /// Pointer up captured by a card.
    pub fn pointer_up<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        event: PointerEvent,
    ) {
        self.route(host, id, |e, h| e.pointer_up(h, event));
    }

    /// Pointer down on one of a card's resize knobs.
    pub fn knob_pointer_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        knob: KnobPosition,
        event: PointerEvent,
    ) {
        self.route(host, id, |e, h| {
            e.knob_pointer_down(h, knob, event);
            Signals::new()
        });
    }

    /// Pointer move captured by a resize knob.
    pub fn knob_pointer_move<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        knob: KnobPosition,
        event: PointerEvent,
    ) {
        self.route(host, id, |e, h| {
            e.knob_pointer_move(h, knob, event);
            Signals::new()
        });
    }

    /// Pointer up captured by a resize knob.
    pub fn knob_pointer_up<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        knob: KnobPosition,
        event: PointerEvent,
    ) {
        self.route(host, id, |e, h| {
            e.knob_pointer_up(h, knob, event);
            Signals::new()
        });
    }

    /// Keydown inside a card.
    pub fn key_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        target: EventTarget,
        key: Key,
    ) {
        self.route(host, id, |e, h| e.key_down(h, target, key));
    }

    /// Keyup inside a card.
    pub fn key_up<H: CanvasHost<Surface = S>>(&mut self, host: &mut H, id: &ElementId, key: Key) {
        self.route(host, id, |e, _| {
            e.key_up(key);
            Signals::new()
        });
    }

    /// Focus entered a card.
    pub fn focus_in<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        target: EventTarget,
    ) {
        self.route(host, id, |e, h| e.focus_in(h, target));
    }

    /// Focus left part of a card.
    pub fn focus_out<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        destination: FocusDestination,
    ) {
        self.route(host, id, |e, h| e.focus_out(h, destination));
    }

    /// Keydown on an action-menu button.
    pub fn menu_key_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        action: MenuAction,
        key: Key,
    ) {
        self.route(host, id, |e, h| e.menu_key_down(h, action, key));
    }

    /// Keyup on an action-menu button.
    pub fn menu_key_up<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        action: MenuAction,
        key: Key,
    ) {
        self.route(host, id, |e, _| {
            e.menu_key_up(action, key);
            Signals::new()
        });
    }

    /// An action-menu button was pressed.
    pub fn menu_press<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        action: MenuAction,
        source: InputSource,
    ) {
        self.route(host, id, |e, h| e.menu_press(h, action, source));
    }

    fn build<H: CanvasHost<Surface = S>>(
        &self,
        host: &mut H,
        spec: ElementSpec<S>,
    ) -> InteractionElement<S> {
        let frame = CanvasFrame::new(host.canvas_rect());
        let mut rng = rand::rng();
        let mut random_percent = || f64::from(rng.random_range(0_u32..100));
        let patch = spec.telemetry;
        let telemetry = Telemetry {
            x: patch.x.unwrap_or_else(&mut random_percent),
            y: patch.y.unwrap_or_else(&mut random_percent),
            width: patch.width.unwrap_or(self.config.default_size),
            height: patch.height.unwrap_or(self.config.default_size),
        };
        InteractionElement::new(
            spec.id.unwrap_or_else(ElementId::new_v4),
            telemetry,
            spec.capabilities,
            spec.surface,
            self.config,
            &frame,
        )
    }

    fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    fn element_mut(&mut self, id: &ElementId) -> Option<&mut InteractionElement<S>> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Runs `f` on the card and then processes the signals it returned.
    fn route<H, F>(&mut self, host: &mut H, id: &ElementId, f: F) -> bool
    where
        H: CanvasHost<Surface = S>,
        F: FnOnce(&mut InteractionElement<S>, &mut H) -> Signals,
    {
        let Some(element) = self.element_mut(id) else {
            tracing::trace!(id = %id, "event for unknown element");
            return false;
        };
        let signals = f(element, host);
        self.dispatch(host, id, signals);
        true
    }

    fn dispatch<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        signals: Signals,
    ) {
        for signal in signals {
            match signal {
                Signal::ModeChanged(Mode::Interact) => {
                    let transition = self.dismiss.activate(id.clone());
                    apply_listener(host, transition);
                }
                Signal::ModeChanged(Mode::View) => {
                    let transition = self.dismiss.deactivate(id);
                    apply_listener(host, transition);
                }
                Signal::SummaryStale => self.refresh_summary(host, id),
                Signal::BringToFront(focus) => {
                    self.bring_to_front(host, id, focus);
                }
                Signal::SendToBack(focus) => {
                    self.send_to_back(host, id, focus);
                }
                Signal::EditRequested => {
                    self.edit_element(host, id);
                }
                Signal::DeleteRequested => host.delete_requested(id),
            }
        }
    }

    fn refresh_summary<H: CanvasHost<Surface = S>>(&mut self, host: &mut H, id: &ElementId) {
        let total = self.elements.len();
        let Some(index) = self.index_of(id) else {
            return;
        };
        let stack = StackPosition {
            position: index + 1,
            total,
        };
        let denominator = host.denominator(id, stack);
        let text = host.summary_text(id);
        if let Some(element) = self.elements.get_mut(index) {
            element.set_summary(host, format!("{denominator}. {text}"));
        }
    }

    fn after_reorder<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        id: &ElementId,
        focus: Option<FocusTarget>,
        announcement: Announcement,
    ) {
        // Re-attaching a node drops its focus; keep the card from leaving
        // `interact` on the resulting focus-out.
        if let Some(element) = self.element_mut(id) {
            element.retain_focus(host);
        }
        host.request_focus(focus.unwrap_or_else(|| FocusTarget::Element(id.clone())));
        host.announce(announcement);
    }
}

fn apply_listener<H: CanvasHost>(host: &mut H, transition: Option<ListenerTransition>) {
    match transition {
        Some(ListenerTransition::Register) => {
            tracing::debug!("dismiss listener registered");
            host.register_dismiss_listener();
        }
        Some(ListenerTransition::Unregister) => {
            tracing::debug!("dismiss listener unregistered");
            host.unregister_dismiss_listener();
        }
        None => {}
    }
}
