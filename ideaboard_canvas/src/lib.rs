// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ideaboard Canvas: cards, their interaction modes and the canvas that
//! stacks them.
//!
//! A [`Canvas`] owns an ordered list of [`InteractionElement`]s. List order is
//! the stacking order (last on top) and the tab order. Each element owns its
//! card's [`Telemetry`] and a [`Mode`]:
//! - In `view` mode, pointer drags move the card, knobs resize it, and the
//!   action menu's move/resize toggles step it with the arrow keys.
//! - In `interact` mode, input goes to the hosted content.
//!
//! The canvas does not render anything. Everything it needs from the
//! embedding application (the live canvas rectangle, a clock, focus and
//! pointer capture, screen-reader output) goes through the [`CanvasHost`]
//! trait, which is passed by `&mut` into every call.
//!
//! ## Minimal example
//!
//! ```rust
//! use ideaboard_canvas::{Canvas, CanvasHost, ElementId, ElementSpec, InteractionConfig, Telemetry};
//! use kurbo::Rect;
//!
//! struct Board;
//!
//! impl CanvasHost for Board {
//!     type Surface = &'static str;
//!
//!     fn canvas_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 1000.0, 500.0)
//!     }
//!
//!     fn now_ms(&self) -> u64 {
//!         0
//!     }
//! }
//!
//! let mut host = Board;
//! let mut canvas = Canvas::new(InteractionConfig::default());
//!
//! // Out-of-range telemetry is pulled back inside on creation.
//! let note = ElementSpec::new("note")
//!     .with_id("a")
//!     .with_telemetry(Telemetry::new(80.0, 80.0, 30.0, 30.0));
//! let a = canvas.add_element(&mut host, note).unwrap();
//! assert_eq!(canvas.telemetry(&a), Some(Telemetry::new(70.0, 70.0, 30.0, 30.0)));
//!
//! let b = canvas.add_element(&mut host, ElementSpec::new("image").with_id("b")).unwrap();
//! canvas.send_to_back(&mut host, &b, None);
//! let order: Vec<_> = canvas.order().map(ElementId::as_str).collect();
//! assert_eq!(order, ["b", "a"]);
//! ```
//!
//! ## Errors and logging
//!
//! Input never fails. Geometry the clamp rejects, events from a pointer the
//! card did not capture, actions the card lacks the capability for and events
//! for unknown ids are dropped and logged with `tracing` at trace level.
//! Mode transitions, reordering, the dismiss listener and add/delete/load are
//! logged at debug level. Only the administrative calls ([`Canvas::add_element`],
//! [`Canvas::insert_element`], [`Canvas::load`], [`Canvas::set_telemetry`],
//! [`Canvas::delete_element`]) return a [`CanvasError`].
//!
//! ## The dismiss listener
//!
//! While any card is in `interact` mode, the host keeps one click listener
//! installed and forwards clicks to [`Canvas::dismiss_click`]. The canvas asks
//! for the listener with [`CanvasHost::register_dismiss_listener`] when the
//! first card starts editing and releases it when the last one stops,
//! regardless of how many cards edit at once.

mod canvas;
mod capability;
mod config;
mod dismiss;
mod element;
mod error;
mod host;
mod id;
mod menu;

pub use canvas::{Canvas, ElementSnapshot, ElementSpec};
pub use capability::{Capabilities, HostMode};
pub use config::InteractionConfig;
pub use dismiss::{DismissSubscription, ListenerTransition};
pub use element::{EventTarget, FocusDestination, InputSource, InteractionElement, Mode};
pub use error::CanvasError;
pub use host::{Announcement, CanvasHost, FocusTarget, StackPosition};
pub use id::ElementId;
pub use menu::{ActionMenu, MenuAction};

pub use ideaboard_geometry::{Telemetry, TelemetryPatch};
pub use ideaboard_gesture::knob::KnobPosition;
pub use ideaboard_gesture::nudge::Key;
pub use ideaboard_gesture::session::{PointerEvent, PointerId};
