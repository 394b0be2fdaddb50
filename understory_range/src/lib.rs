// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Range: a headless multi-thumb slider.
//!
//! ## Overview
//!
//! [`RangeSlider`] holds one or more values on a `[min, max]` grid of `step`. The host reports
//! thumb presses, track presses, pointer moves with the live track rect, releases and key
//! presses; the slider projects the pointer onto the track, quantizes, and reports new values.
//!
//! Thumbs may pass each other ([`ThumbCrossing::Reorder`], the default) or stop at their
//! neighbours ([`ThumbCrossing::Stop`]). Either way [`RangeSlider::values`] stays sorted.
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::{Point, Rect};
//! use understory_range::{RangeConfig, RangeSlider};
//! use understory_responder::listener::{ListenerHost, ListenerRegistry};
//!
//! let registry = Rc::new(ListenerRegistry::new());
//! let host: Rc<dyn ListenerHost> = registry.clone();
//! let track = Rect::new(0.0, 0.0, 100.0, 10.0);
//!
//! let mut price = RangeSlider::new(host, RangeConfig::default().with_step(5.0))
//!     .default_value(&[20.0, 80.0]);
//! price.pointer_down_thumb(0);
//! price.pointer_move(Point::new(95.0, 5.0), track);
//! assert_eq!(price.values(), [80.0, 95.0]);
//!
//! price.pointer_up();
//! assert!(registry.is_empty());
//! ```
//!
//! Value math lives in [`value`] for hosts that draw thumbs and need the same projection.
//!
//! This crate requires `std`.

mod config;
mod slider;
pub mod value;

pub use config::{Orientation, RangeConfig, ThumbCrossing};
pub use slider::{OnValues, RangeSlider};
