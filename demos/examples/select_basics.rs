// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select and combobox basics.
//!
//! Open a select, pick with the keyboard, then filter a combobox by typing.
//!
//! Run:
//! - `cargo run -p understory_demos --example select_basics`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Rect, Size};
use understory_overlay::StaticLayout;
use understory_responder::input::Key;
use understory_responder::listener::{ListenerHost, ListenerRegistry};
use understory_widgets::{Combobox, Select};

fn main() {
    let registry = Rc::new(ListenerRegistry::new());
    let host: Rc<dyn ListenerHost> = registry.clone();
    let layout = StaticLayout::new(
        Rect::new(40.0, 40.0, 200.0, 72.0),
        Size::new(160.0, 120.0),
        Size::new(800.0, 600.0),
    );

    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = picked.clone();
    let mut team = Select::new(host.clone(), [("dm", "Marketing"), ("web", "Web"), ("ops", "Ops")])
        .with_placeholder("Team")
        .on_value_change(move |value, label| sink.borrow_mut().push(format!("{value} ({label})")));

    println!("== Trigger ==\n  {:?}", team.trigger());
    team.handle_key(Key::ArrowDown, &layout);
    println!("== Open at {:?} ==", team.position());
    println!("  listeners: {:?}", registry.active());

    // First item is highlighted on open; move down once and accept.
    team.handle_key(Key::ArrowDown, &layout);
    team.handle_key(Key::Enter, &layout);
    println!("== Picked ==\n  {:?}", picked.borrow());

    assert_eq!(team.value(), Some("web"));
    assert_eq!(team.trigger().text, "Web");
    assert!(registry.is_empty(), "closing releases every listener");

    let mut dept = Combobox::new(
        host,
        [("mkt", "Marketing"), ("des", "Design"), ("mku", "Markup")],
    );
    dept.activate_trigger(&layout);
    dept.set_search("mar");
    let labels: Vec<_> = dept.items().iter().map(|i| i.label().to_owned()).collect();
    println!("== Search \"mar\" ==\n  {labels:?}");
    assert_eq!(labels, ["Marketing", "Markup"]);

    dept.set_search("xyz");
    println!("== Search \"xyz\" ==\n  {:?}", dept.empty_message());
    assert_eq!(dept.empty_message(), Some("No results found."));

    dept.handle_key(Key::Escape, &layout);
    assert!(!dept.is_open());
    assert!(registry.is_empty());
}
