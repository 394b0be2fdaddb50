// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Responder: deterministic, `no_std` building blocks for reacting to UI input.
//!
//! ## Overview
//!
//! This crate holds the pieces every interactive widget needs regardless of what it draws:
//!
//! - [`listener`]: global listener subscriptions as RAII guards. A component asks a
//!   [`ListenerHost`](crate::listener::ListenerHost) for viewport, pointer or key events while it
//!   needs them; dropping the [`Subscription`](crate::listener::Subscription) removes the listener.
//! - [`controllable`]: one value, owned either by the widget (uncontrolled, with a default) or by
//!   its caller (controlled, with a change callback). The two modes are observably identical.
//! - [`hover_intent`]: the delay-based show/hide machine behind tooltips, with explicit timers
//!   the host polls instead of callbacks that can outlive their owner.
//! - [`input`]: the small key vocabulary and handler [`Outcome`](crate::input::Outcome).
//!
//! It does not perform hit testing or layout and never touches a platform event loop. A host
//! forwards events to components and reads state back.
//!
//! ## Single-threaded by construction
//!
//! Shared handles are `Rc` and interior mutability is `RefCell`. All transitions run
//! synchronously inside the call that delivers the input.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controllable;
pub mod hover_intent;
pub mod input;
pub mod listener;
