// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A select inside a popover, sharing one stacking order.
//!
//! Presses inside the inner list do not dismiss the popover, and Escape closes only the
//! topmost overlay.
//!
//! Run:
//! - `cargo run -p understory_demos --example nested_overlays`

use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use understory_overlay::{OverlayStack, StaticLayout};
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::{ListenerHost, ListenerRegistry};
use understory_widgets::{Popover, Select};

fn main() {
    let registry = Rc::new(ListenerRegistry::new());
    let host: Rc<dyn ListenerHost> = registry.clone();
    let stack = OverlayStack::new();
    let viewport = Size::new(800.0, 600.0);

    let outer = StaticLayout::new(
        Rect::new(350.0, 50.0, 450.0, 80.0),
        Size::new(300.0, 200.0),
        viewport,
    );
    let inner = StaticLayout::new(
        Rect::new(260.0, 250.0, 400.0, 278.0),
        Size::new(140.0, 120.0),
        viewport,
    );

    let mut filters = Popover::new(host.clone(), "Filters").with_stack(stack.clone());
    let mut sort =
        Select::new(host, [("new", "Newest"), ("old", "Oldest")]).with_stack(stack.clone());

    filters.activate_trigger(&outer);
    sort.activate_trigger(&inner);
    println!("== Open ==\n  layers: {}  listeners: {}", stack.len(), registry.len());
    println!(
        "  popover z {:?}, select z {:?}",
        filters.overlay().z_index(),
        sort.listbox().overlay().z_index()
    );

    // A press in the list hangs outside the popover's box but is covered by a higher layer.
    let in_list = Point::new(300.0, 330.0);
    assert_eq!(filters.handle_pointer_down(in_list, &outer), None);
    assert_eq!(sort.handle_pointer_down(in_list, &inner), None);

    // Escape goes to the topmost overlay only.
    assert_eq!(filters.handle_key(Key::Escape), Outcome::Continue);
    assert_eq!(sort.handle_key(Key::Escape, &inner), Outcome::Consumed);
    assert!(filters.is_open());
    assert!(!sort.is_open());
    println!(
        "== After Escape ==\n  popover open: {}  select open: {}",
        filters.is_open(),
        sort.is_open()
    );

    assert_eq!(filters.handle_key(Key::Escape), Outcome::Consumed);
    assert!(stack.is_empty());
    assert!(registry.is_empty());
}
