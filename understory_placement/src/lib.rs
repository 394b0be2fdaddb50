// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Placement: position a floating box against a trigger.
//!
//! ## Overview
//!
//! Given a trigger rectangle, an overlay size, a viewport size and a [`Placement`], this crate
//! computes where the overlay's top-left corner goes. It is a pure function of its inputs and is
//! cheap enough to call on every scroll or resize.
//!
//! The algorithm:
//! 1. Anchor on the requested [`Side`] of the trigger, pushed away by [`Placement::side_offset`].
//! 2. Align on the cross axis: [`Align::Start`] lines up leading edges, [`Align::End`] lines up
//!    trailing edges, [`Align::Center`] centers. [`Placement::align_offset`] nudges start/end
//!    inward.
//! 3. Clamp each axis into the viewport, keeping [`VIEWPORT_MARGIN`] from the edges.
//!
//! There is no automatic side flipping unless [`Placement::avoid_collisions`] is set, in which
//! case the overlay moves to the opposite side only when that side fits and the preferred one
//! does not.
//!
//! Rectangles are [`kurbo::Rect`] in viewport coordinates (origin top-left, y down).
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_placement::{Align, Placement, Side, compute_position};
//!
//! let trigger = Rect::new(100.0, 100.0, 200.0, 140.0);
//! let placement = Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0);
//! let origin = compute_position(
//!     trigger,
//!     Size::new(160.0, 90.0),
//!     Size::new(800.0, 600.0),
//!     &placement,
//! );
//! assert_eq!(origin, Point::new(100.0, 144.0));
//! ```
//!
//! An overlay larger than the viewport never fails; it is pinned to the viewport origin on the
//! overflowing axis.
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod engine;
mod types;

pub use engine::{Resolved, VIEWPORT_MARGIN, clamp_axis, compute_position, resolve_position};
pub use types::{Align, Placement, Side};
