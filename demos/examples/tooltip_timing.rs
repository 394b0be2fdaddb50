// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip hover intent with explicit time.
//!
//! The host owns the clock. It forwards pointer events with a timestamp and calls `poll`
//! whenever it wakes up.
//!
//! Run:
//! - `cargo run -p understory_demos --example tooltip_timing`

use core::time::Duration;
use std::rc::Rc;

use kurbo::{Rect, Size};
use understory_overlay::{StaticLayout, Tooltip};
use understory_responder::hover_intent::{HoverIntentConfig, HoverPhase, HoverTransition};
use understory_responder::listener::{ListenerHost, ListenerRegistry};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn main() {
    let registry = Rc::new(ListenerRegistry::new());
    let host: Rc<dyn ListenerHost> = registry.clone();
    let layout = StaticLayout::new(
        Rect::new(100.0, 100.0, 140.0, 124.0),
        Size::new(80.0, 24.0),
        Size::new(800.0, 600.0),
    );
    let config = HoverIntentConfig::default()
        .with_delay(ms(200))
        .with_skip_delay(ms(300));
    let mut tip = Tooltip::new(host, config);

    // A quick pass over the trigger never shows anything.
    tip.pointer_enter(ms(0), &layout);
    tip.pointer_leave(ms(100));
    assert_eq!(tip.poll(ms(400), &layout), None);
    println!("== Quick pass ==\n  {:?}", tip.phase());

    // Dwell long enough and it shows.
    tip.pointer_enter(ms(1_000), &layout);
    println!("  next deadline: {:?}", tip.next_deadline());
    assert_eq!(tip.poll(ms(1_250), &layout), Some(HoverTransition::Show));
    println!("== Shown at {:?} ==", tip.position());

    // Leaving and coming back inside the skip delay keeps it up.
    tip.pointer_leave(ms(1_400));
    assert_eq!(tip.phase(), HoverPhase::PendingHide);
    tip.pointer_enter(ms(1_600), &layout);
    assert_eq!(tip.phase(), HoverPhase::Shown);
    assert_eq!(tip.poll(ms(2_000), &layout), None);
    println!("== Re-entered ==\n  {:?}", tip.phase());

    tip.pointer_leave(ms(2_100));
    assert_eq!(tip.poll(ms(2_400), &layout), Some(HoverTransition::Hide));
    assert!(registry.is_empty());
    println!("== Hidden ==\n  {:?}", tip.phase());
}
