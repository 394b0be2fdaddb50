// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-thumb range slider.
//!
//! Drag one thumb past the other, press the track, and step with the keyboard.
//!
//! Run:
//! - `cargo run -p understory_demos --example range_slider`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_range::{RangeConfig, RangeSlider, ThumbCrossing};
use understory_responder::input::Key;
use understory_responder::listener::{ListenerHost, ListenerRegistry, ListenerSet};

fn main() {
    let registry = Rc::new(ListenerRegistry::new());
    let host: Rc<dyn ListenerHost> = registry.clone();
    // 0..100 over 400 px.
    let track = Rect::new(50.0, 0.0, 450.0, 16.0);
    let at = |value: f64| Point::new(50.0 + value * 4.0, 8.0);

    let commits = Rc::new(RefCell::new(Vec::new()));
    let sink = commits.clone();
    let mut price = RangeSlider::new(host.clone(), RangeConfig::default().with_step(5.0))
        .default_value(&[20.0, 80.0])
        .on_value_commit(move |v| sink.borrow_mut().push(v.to_vec()));

    price.pointer_down_thumb(0);
    assert_eq!(registry.active(), ListenerSet::DRAG);
    price.pointer_move(at(95.0), track);
    println!("== Dragged past ==\n  {:?} (active {:?})", price.values(), price.active_thumb());
    assert_eq!(price.values(), [80.0, 95.0]);
    price.pointer_up();
    assert!(registry.is_empty());

    price.track_press(at(30.0), track);
    price.pointer_up();
    println!("== Track press ==\n  {:?}", price.values());
    assert_eq!(price.values(), [30.0, 95.0]);

    price.focus_thumb(1);
    price.handle_key(Key::PageDown);
    println!("== PageDown ==\n  {:?}", price.values());
    assert_eq!(price.values(), [30.0, 45.0]);
    println!("== Commits ==\n  {:?}", commits.borrow());
    assert_eq!(commits.borrow().len(), 3);

    // Stop keeps each thumb on its own side.
    let mut budget = RangeSlider::new(
        host,
        RangeConfig::default()
            .with_step(5.0)
            .with_crossing(ThumbCrossing::Stop)
            .with_min_steps_between_thumbs(1),
    )
    .default_value(&[20.0, 80.0]);
    budget.pointer_down_thumb(0);
    budget.pointer_move(at(95.0), track);
    budget.pointer_up();
    println!("== Stop policy ==\n  {:?}", budget.values());
    assert_eq!(budget.values(), [75.0, 80.0]);
}
