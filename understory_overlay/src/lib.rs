// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Overlay: lifecycle of anchored floating surfaces.
//!
//! ## Overview
//!
//! An overlay is a surface (menu, listbox, popover, tooltip) positioned against a trigger
//! element. This crate owns everything about it except drawing:
//!
//! - [`OverlayController`]: open/closed state, controlled or uncontrolled, with dismissal on
//!   outside pointer presses and Escape, and repositioning on viewport resize and scroll.
//! - [`OverlayStack`]: optional shared ordering for overlays that are open at the same time.
//! - [`Tooltip`]: hover-intent visibility combined with placement.
//! - [`Measure`]: how controllers read live layout. Trigger bounds are read on every event that
//!   needs them and never cached between events.
//!
//! Global listeners come from a [`ListenerHost`](understory_responder::listener::ListenerHost)
//! and are held only while an overlay is open. Closing or dropping the controller releases them.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::{Point, Rect, Size};
//! use understory_overlay::{DismissReason, OverlayController, OverlayEvent, StaticLayout};
//! use understory_responder::listener::{ListenerHost, ListenerRegistry};
//!
//! let registry = Rc::new(ListenerRegistry::new());
//! let host: Rc<dyn ListenerHost> = registry.clone();
//! let layout = StaticLayout::new(
//!     Rect::new(20.0, 20.0, 120.0, 50.0),
//!     Size::new(200.0, 150.0),
//!     Size::new(1024.0, 768.0),
//! );
//!
//! let mut menu = OverlayController::new(host);
//! assert_eq!(menu.toggle(&layout), Some(OverlayEvent::Opened));
//! // Centered below the trigger, then clamped off the left edge.
//! assert_eq!(menu.position(), Point::new(8.0, 50.0));
//!
//! // A press far away dismisses it and releases every listener.
//! let closed = menu.handle_pointer_down(Point::new(900.0, 700.0), &layout);
//! assert_eq!(closed, Some(OverlayEvent::Closed(DismissReason::OutsidePointer)));
//! assert!(registry.is_empty());
//! ```
//!
//! This crate requires `std`.

mod controller;
mod measure;
mod stack;
mod tooltip;

pub use controller::{
    DismissReason, MountPolicy, OverlayConfig, OverlayController, OverlayEvent, OverlayState,
};
pub use measure::{Measure, StaticLayout};
pub use stack::{BASE_Z_INDEX, LayerId, OverlayStack};
pub use tooltip::Tooltip;
