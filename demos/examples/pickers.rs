// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color and time pickers, reporting through a notifier.
//!
//! Each channel edit emits one value. Bad text entry is rejected and posted as an error
//! notification instead.
//!
//! Run:
//! - `cargo run -p understory_demos --example pickers`

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveTime;
use understory_responder::listener::{ListenerHost, ListenerRegistry};
use understory_widgets::{ColorPicker, HourCycle, Notifier, NotifierEvent, TimePicker};

fn main() {
    let registry = Rc::new(ListenerRegistry::new());
    let host: Rc<dyn ListenerHost> = registry;

    let shown = Rc::new(RefCell::new(Vec::new()));
    let sink = shown.clone();
    let mut notifier = Notifier::new(move |event| match event {
        NotifierEvent::Shown(n) => {
            println!("  [toast {:?}] {}", n.level, n.message);
            sink.borrow_mut().push(n.message.clone());
        }
        NotifierEvent::Dismissed(id) => println!("  [toast dismissed] {id:?}"),
    });

    let emitted = Rc::new(RefCell::new(Vec::new()));
    let colors = emitted.clone();
    let mut accent = ColorPicker::new(host.clone())
        .on_value_change(move |hex, css| colors.borrow_mut().push(format!("{hex} {css}")));

    println!("== Color edits ==");
    accent.set_saturation(1.0);
    accent.set_lightness(0.5);
    accent.set_alpha(0.5);
    for line in emitted.borrow().iter() {
        println!("  {line}");
    }
    assert_eq!(accent.hex(), "#ff000080");
    assert_eq!(emitted.borrow().len(), 3);

    if let Err(err) = accent.set_text("not a color") {
        notifier.error(err.to_string(), Duration::ZERO);
    }
    assert!(!accent.is_text_valid());

    println!("== Time edits ==");
    let mut meeting = TimePicker::new(host)
        .with_hour_cycle(HourCycle::H12)
        .default_value(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN))
        .on_value_change(|value, label| println!("  {value} ({label})"));
    meeting.set_text("2:30 PM").unwrap();
    assert_eq!(meeting.value_string(), "14:30:00");
    assert_eq!(meeting.display(), "02:30 PM");

    if let Err(err) = meeting.set_text("half past") {
        notifier.error(err.to_string(), Duration::ZERO);
    }
    assert_eq!(shown.borrow().len(), 2);

    println!("== Expiry ==");
    assert_eq!(notifier.poll(Duration::from_secs(5)), 2);
    assert!(notifier.active().is_empty());
}
