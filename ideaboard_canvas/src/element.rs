// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One card on the canvas: telemetry, mode and the gestures that change them.

use ideaboard_geometry::{
    CanvasFrame, GeometryClamp, Intent, PERCENT_MAX, PixelDelta, Telemetry, TelemetryPatch,
};
use ideaboard_gesture::guard::SuppressionWindow;
use ideaboard_gesture::knob::{KnobPosition, ResizeKnob};
use ideaboard_gesture::nudge::{Key, NudgeAccumulator};
use ideaboard_gesture::session::{DragSession, PointerEvent};
use smallvec::{SmallVec, smallvec};

use crate::capability::Capabilities;
use crate::config::InteractionConfig;
use crate::host::{CanvasHost, FocusTarget};
use crate::id::ElementId;
use crate::menu::{ActionMenu, MenuAction};

/// Interaction mode of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Input moves and resizes the card; hosted content is inert.
    #[default]
    View,
    /// Input goes to the hosted content.
    Interact,
}

/// What inside a card an event was aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The card's own root.
    Root,
    /// Hosted content, a menu button or any other descendant.
    Descendant,
}

/// Where focus went when it left part of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusDestination {
    /// Still inside the card.
    Within(EventTarget),
    /// Outside the card, or nowhere.
    Outside,
}

/// How a menu button was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Mouse, pen or touch.
    Pointer,
    /// Enter or Space on the focused button.
    Keyboard,
}

/// Cross-element work an element asks the canvas to do.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Signal {
    ModeChanged(Mode),
    SummaryStale,
    BringToFront(Option<FocusTarget>),
    SendToBack(Option<FocusTarget>),
    EditRequested,
    DeleteRequested,
}

pub(crate) type Signals = SmallVec<[Signal; 2]>;

/// A card on the canvas.
///
/// Elements are created and driven by [`Canvas`](crate::Canvas); the public
/// surface here is read-only.
#[derive(Debug)]
pub struct InteractionElement<S> {
    id: ElementId,
    telemetry: Telemetry,
    mode: Mode,
    capabilities: Capabilities,
    surface: S,
    config: InteractionConfig,
    clamp: GeometryClamp,
    tab_stop: bool,
    content_inert: bool,
    menu: ActionMenu,
    knobs: SmallVec<[ResizeKnob; 8]>,
    drag: DragSession,
    had_focus: bool,
    focus: Option<EventTarget>,
    shift: bool,
    move_nudge: NudgeAccumulator,
    resize_nudge: NudgeAccumulator,
    guard: SuppressionWindow,
    summary: String,
}

impl<S> InteractionElement<S> {
    /// Creates an element in `view` mode.
    ///
    /// Telemetry is sanitized for construction: values are clamped into
    /// `[0, 100]`, positions are pulled back so the card fits, then the regular
    /// clamp pipeline runs against `frame`.
    pub(crate) fn new(
        id: ElementId,
        telemetry: Telemetry,
        requested: Capabilities,
        surface: S,
        config: InteractionConfig,
        frame: &CanvasFrame,
    ) -> Self {
        let capabilities = Capabilities::resolve(requested, config.host_mode);
        let clamp = config.clamp();
        let knobs = if capabilities.contains(Capabilities::RESIZE) {
            KnobPosition::ALL.into_iter().map(ResizeKnob::new).collect()
        } else {
            SmallVec::new()
        };

        Self {
            id,
            telemetry: construction_sanitize(&clamp, telemetry, frame),
            mode: Mode::View,
            capabilities,
            surface,
            config,
            clamp,
            tab_stop: true,
            content_inert: true,
            menu: ActionMenu::new(capabilities),
            knobs,
            drag: DragSession::default(),
            had_focus: false,
            focus: None,
            shift: false,
            move_nudge: config.move_nudge(),
            resize_nudge: config.resize_nudge(),
            guard: SuppressionWindow::default(),
            summary: String::new(),
        }
    }

    /// Returns the element id.
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Returns the current telemetry.
    #[must_use]
    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the resolved capabilities.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns the hosted content surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns `true` while the root is in the tab order.
    #[must_use]
    pub fn tab_stop(&self) -> bool {
        self.tab_stop
    }

    /// Returns `true` while hosted content is inert.
    #[must_use]
    pub fn content_inert(&self) -> bool {
        self.content_inert
    }

    /// Returns the action menu.
    #[must_use]
    pub fn menu(&self) -> &ActionMenu {
        &self.menu
    }

    /// Returns the knob positions; empty without the resize capability.
    pub fn knobs(&self) -> impl Iterator<Item = KnobPosition> + '_ {
        self.knobs.iter().map(ResizeKnob::position)
    }

    /// Returns the accessible summary, `"{denominator}. {summary text}"`.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns `true` during a pointer move gesture.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Returns `true` during a knob resize gesture.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.knobs.iter().any(ResizeKnob::is_resizing)
    }

    /// Returns `true` while Shift is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift
    }

    /// Returns `true` if a touch on `target` should not scroll the page.
    #[must_use]
    pub fn suppresses_touch(&self, target: EventTarget) -> bool {
        self.capabilities.contains(Capabilities::MOVE)
            && self.mode == Mode::View
            && target == EventTarget::Root
    }

    pub(crate) fn into_surface(self) -> S {
        self.surface
    }

    pub(crate) fn set_summary<H: CanvasHost<Surface = S>>(&mut self, host: &mut H, summary: String) {
        self.summary = summary;
        host.summary_changed(&self.id, &self.summary);
    }

    /// Ends any drag or knob gesture in progress and releases its pointer.
    pub(crate) fn cancel_gestures<H: CanvasHost<Surface = S>>(&mut self, host: &mut H) {
        if let Some(pointer) = self.drag.captured() {
            self.drag.end(pointer);
            self.had_focus = false;
            if self.capabilities.contains(Capabilities::MOVE) {
                host.release_pointer(&self.id, pointer);
            }
        }
        for knob in &mut self.knobs {
            if let Some(pointer) = knob.captured() {
                knob.pointer_up(pointer);
                host.release_pointer(&self.id, pointer);
            }
        }
    }

    /// Shows the element to the host in its initial state.
    pub(crate) fn attach<H: CanvasHost<Surface = S>>(&self, host: &mut H) {
        host.attach_surface(&self.id, &self.surface);
        host.set_content_inert(&self.surface, self.content_inert);
        host.set_tab_stop(&self.id, self.tab_stop);
        host.telemetry_changed(&self.id, &self.telemetry);
    }

    /// Arms the focus-retention guard.
    pub(crate) fn retain_focus<H: CanvasHost<Surface = S>>(&mut self, host: &mut H) {
        self.guard.arm(host.now_ms(), self.config.focus_grace_ms);
    }

    /// Switches mode.
    ///
    /// Without the edit capability a request for `interact` is downgraded to
    /// `view`; the focus guard is still armed and the menu stays as it is.
    pub(crate) fn set_mode<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        requested: Mode,
    ) -> Signals {
        let downgraded =
            requested == Mode::Interact && !self.capabilities.contains(Capabilities::EDIT);
        let mode = if downgraded { Mode::View } else { requested };
        let previous = core::mem::replace(&mut self.mode, mode);
        if previous != mode || downgraded {
            tracing::debug!(id = %self.id, ?previous, ?mode, downgraded, "mode set");
        }

        let mut signals = Signals::new();
        match mode {
            Mode::Interact => {
                self.retain_focus(host);
                self.set_tab_stop(host, false);
                self.set_content_inert(host, false);
                host.focus_content(&self.surface);
            }
            Mode::View => {
                if downgraded {
                    self.retain_focus(host);
                } else {
                    self.set_menu_visible(host, false);
                }
                signals.push(Signal::SummaryStale);
                self.set_tab_stop(host, true);
                self.set_content_inert(host, true);
            }
        }
        signals.push(Signal::ModeChanged(mode));
        signals
    }

    pub(crate) fn key_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        target: EventTarget,
        key: Key,
    ) -> Signals {
        match key {
            Key::Shift => {
                self.shift = true;
                Signals::new()
            }
            Key::Escape => {
                let signals = self.set_mode(host, Mode::View);
                host.request_focus(FocusTarget::Element(self.id.clone()));
                signals
            }
            _ if key.is_activation() && target == EventTarget::Root => {
                self.set_mode(host, Mode::Interact)
            }
            _ => Signals::new(),
        }
    }

    pub(crate) fn key_up(&mut self, key: Key) {
        if key == Key::Shift {
            self.shift = false;
        }
    }

    pub(crate) fn focus_in<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        target: EventTarget,
    ) -> Signals {
        self.focus = Some(target);
        self.set_menu_visible(host, true);
        smallvec![Signal::SummaryStale]
    }

    pub(crate) fn focus_out<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        destination: FocusDestination,
    ) -> Signals {
        self.focus = match destination {
            FocusDestination::Within(target) => Some(target),
            FocusDestination::Outside => None,
        };
        if self.guard.is_active(host.now_ms()) {
            tracing::trace!(id = %self.id, "focus loss suppressed");
            return Signals::new();
        }
        match destination {
            FocusDestination::Within(_) => Signals::new(),
            FocusDestination::Outside => self.set_mode(host, Mode::View),
        }
    }

    pub(crate) fn pointer_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        target: EventTarget,
        event: PointerEvent,
    ) {
        if target != EventTarget::Root || self.mode != Mode::View {
            return;
        }

        self.had_focus = self.focus == Some(EventTarget::Root);
        if !self.had_focus {
            host.request_focus(FocusTarget::Element(self.id.clone()));
        }

        // Without the move capability the session only tracks the click.
        self.drag.start(event.pointer, event.position);
        if self.capabilities.contains(Capabilities::MOVE) {
            host.capture_pointer(&self.id, event.pointer);
        }
    }

    pub(crate) fn pointer_move<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        event: PointerEvent,
    ) {
        if self.mode != Mode::View || !self.capabilities.contains(Capabilities::MOVE) {
            return;
        }
        let frame = CanvasFrame::new(host.canvas_rect());
        let Some(offset) = self.drag.update(event.pointer, event.position, &frame) else {
            tracing::trace!(id = %self.id, pointer = event.pointer.0, "stale pointer move");
            return;
        };
        self.apply(host, PixelDelta::translate(offset), &frame, Intent::Move);
    }

    pub(crate) fn pointer_up<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        event: PointerEvent,
    ) -> Signals {
        let moved = self.drag.has_moved();
        if !self.drag.end(event.pointer) {
            tracing::trace!(id = %self.id, pointer = event.pointer.0, "stale pointer up");
            return Signals::new();
        }
        let had_focus = core::mem::take(&mut self.had_focus);

        if self.capabilities.contains(Capabilities::MOVE) {
            host.release_pointer(&self.id, event.pointer);
        }
        if moved {
            host.move_completed(&self.id);
        }

        if self.mode == Mode::View && had_focus && !moved {
            return self.set_mode(host, Mode::Interact);
        }
        Signals::new()
    }

    pub(crate) fn knob_pointer_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        position: KnobPosition,
        event: PointerEvent,
    ) {
        let frame = CanvasFrame::new(host.canvas_rect());
        let card_px = frame.telemetry_to_rect(&self.telemetry).size();
        let Some(knob) = self.knobs.iter_mut().find(|k| k.position() == position) else {
            tracing::trace!(id = %self.id, knob = position.name(), "no resize capability");
            return;
        };
        knob.pointer_down(event, card_px);
        host.capture_pointer(&self.id, event.pointer);
    }

    pub(crate) fn knob_pointer_move<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        position: KnobPosition,
        event: PointerEvent,
    ) {
        let frame = CanvasFrame::new(host.canvas_rect());
        let shift = self.shift;
        let step = self
            .knobs
            .iter_mut()
            .find(|k| k.position() == position)
            .and_then(|knob| knob.pointer_move(event, &frame, shift));
        let Some(step) = step else {
            tracing::trace!(id = %self.id, knob = position.name(), "stale knob move");
            return;
        };
        self.apply(host, step.delta, &frame, step.intent());
    }

    pub(crate) fn knob_pointer_up<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        position: KnobPosition,
        event: PointerEvent,
    ) {
        let ended = self
            .knobs
            .iter_mut()
            .find(|k| k.position() == position)
            .is_some_and(|knob| knob.pointer_up(event.pointer));
        if !ended {
            tracing::trace!(id = %self.id, knob = position.name(), "stale knob up");
            return;
        }
        host.release_pointer(&self.id, event.pointer);
        host.resize_completed(&self.id);
    }

    /// Arrow keydown on a menu button. Steps an active toggle; any other key
    /// is handled as a keydown inside the card.
    pub(crate) fn menu_key_down<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        action: MenuAction,
        key: Key,
    ) -> Signals {
        if self.menu.is_active(action) {
            let frame = CanvasFrame::new(host.canvas_rect());
            let consumed = match action {
                MenuAction::Move => self.move_nudge.step(key).map(|offset| {
                    self.apply(host, PixelDelta::translate(offset), &frame, Intent::Move);
                }),
                MenuAction::Resize => self.resize_nudge.step(key).map(|offset| {
                    self.apply(
                        host,
                        PixelDelta::grow(offset.x, offset.y),
                        &frame,
                        Intent::resize(),
                    );
                }),
                _ => None,
            };
            if consumed.is_some() {
                return Signals::new();
            }
        }
        self.key_down(host, EventTarget::Descendant, key)
    }

    pub(crate) fn menu_key_up(&mut self, action: MenuAction, key: Key) {
        match action {
            MenuAction::Move => self.move_nudge.reset(),
            MenuAction::Resize => self.resize_nudge.reset(),
            _ => {}
        }
        self.key_up(key);
    }

    pub(crate) fn menu_press<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        action: MenuAction,
        source: InputSource,
    ) -> Signals {
        if !self.menu.contains(action) {
            tracing::trace!(id = %self.id, ?action, "menu action not available");
            return Signals::new();
        }
        let refocus = (source == InputSource::Keyboard)
            .then(|| FocusTarget::MenuButton(self.id.clone(), action));

        match action {
            MenuAction::Edit => smallvec![Signal::EditRequested],
            MenuAction::Move | MenuAction::Resize => {
                if self.menu.toggle(action) == Some(false) {
                    match action {
                        MenuAction::Move => self.move_nudge.reset(),
                        _ => self.resize_nudge.reset(),
                    }
                }
                Signals::new()
            }
            MenuAction::BringToFront => {
                self.retain_focus(host);
                smallvec![Signal::BringToFront(refocus)]
            }
            MenuAction::SendToBack => {
                self.retain_focus(host);
                smallvec![Signal::SendToBack(refocus)]
            }
            MenuAction::Delete => smallvec![Signal::DeleteRequested],
        }
    }

    /// Replaces telemetry through the sanitize step, as for host updates.
    pub(crate) fn set_telemetry<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        patch: TelemetryPatch,
    ) -> Telemetry {
        let frame = CanvasFrame::new(host.canvas_rect());
        self.telemetry = self
            .clamp
            .sanitize(&self.telemetry, patch, &frame, Intent::Place);
        host.telemetry_changed(&self.id, &self.telemetry);
        self.telemetry
    }

    fn apply<H: CanvasHost<Surface = S>>(
        &mut self,
        host: &mut H,
        delta: PixelDelta,
        frame: &CanvasFrame,
        intent: Intent,
    ) {
        match self
            .clamp
            .apply_pixel_delta(&self.telemetry, delta, frame, intent)
        {
            Ok(telemetry) => {
                self.telemetry = telemetry;
                host.telemetry_changed(&self.id, &telemetry);
            }
            Err(error) => {
                tracing::trace!(id = %self.id, ?error, "geometry update discarded");
            }
        }
    }

    fn set_tab_stop<H: CanvasHost<Surface = S>>(&mut self, host: &mut H, enabled: bool) {
        if self.tab_stop != enabled {
            self.tab_stop = enabled;
            host.set_tab_stop(&self.id, enabled);
        }
    }

    fn set_content_inert<H: CanvasHost<Surface = S>>(&mut self, host: &mut H, inert: bool) {
        if self.content_inert != inert {
            self.content_inert = inert;
            host.set_content_inert(&self.surface, inert);
        }
    }

    fn set_menu_visible<H: CanvasHost<Surface = S>>(&mut self, host: &mut H, visible: bool) {
        if self.menu.set_visible(visible) {
            host.set_menu_visible(&self.id, visible);
        }
    }
}

/// Clamps raw construction values into range and pulls overflowing positions
/// back before running the regular pipeline. Non-finite values become `0`.
fn construction_sanitize(
    clamp: &GeometryClamp,
    telemetry: Telemetry,
    frame: &CanvasFrame,
) -> Telemetry {
    let unit = |v: f64| {
        if v.is_finite() {
            v.max(0.0).min(PERCENT_MAX)
        } else {
            0.0
        }
    };
    let mut t = Telemetry::new(
        unit(telemetry.x),
        unit(telemetry.y),
        unit(telemetry.width),
        unit(telemetry.height),
    );
    if t.x > PERCENT_MAX - t.width {
        t.x = PERCENT_MAX - t.width;
    }
    if t.y > PERCENT_MAX - t.height {
        t.y = PERCENT_MAX - t.height;
    }
    clamp.sanitize(&t, t.into(), frame, Intent::Place)
}
