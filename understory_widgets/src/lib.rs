// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Widgets: headless overlay widgets.
//!
//! ## Overview
//!
//! Every widget here is one [`OverlayController`](understory_overlay::OverlayController) plus a
//! content model. The host draws the trigger from a [`TriggerState`], draws the content from the
//! widget's item views, and forwards input to the widget's `activate_trigger`, `handle_key` and
//! `handle_pointer_down` methods.
//!
//! - [`Select`] and [`Combobox`]: choose one value; the combobox filters as you type.
//! - [`CommandPalette`]: searchable, grouped actions with shortcut hints.
//! - [`DropdownMenu`]: actions, checkbox items, radio groups and separators.
//! - [`Popover`]: host-rendered content anchored to a trigger.
//! - [`ColorPicker`] and [`TimePicker`]: channel editors that emit one value per edit.
//! - [`Notifier`]: a notification bus with an injected sink.
//!
//! ## Values and callbacks
//!
//! Values are strings. Value callbacks receive `(value, label)`: the select reports the option's
//! value and label, the color picker `#rrggbbaa` and a CSS string, the time picker `HH:MM:SS` and
//! the display text. Each value can be controlled (the caller pushes it back with `sync_value`)
//! or uncontrolled (the widget keeps it, starting from `default_value`).
//!
//! Disabled items are skipped by keyboard navigation and never reach a callback.
//!
//! This crate requires `std`.

mod color_picker;
mod command;
mod error;
mod listbox;
mod menu;
mod option;
mod popover;
mod select;
mod selection;
mod time_picker;
mod toast;
mod trigger;

pub use color_picker::{ColorPicker, Hsla};
pub use command::{CommandGroup, CommandPalette};
pub use error::InputError;
pub use listbox::{ChooseMode, Highlight, ItemView, Listbox};
pub use menu::{DropdownMenu, MenuEntry, MenuItemView};
pub use option::{ItemFlags, OptionItem, filter_options, find_option};
pub use popover::Popover;
pub use select::{Combobox, Select, list_overlay_config};
pub use selection::{OnValueChange, SelectionState, SelectionValue};
pub use time_picker::{HourCycle, Period, TimePicker, VALUE_FORMAT};
pub use toast::{
    DEFAULT_DURATION, Level, Notification, NotificationId, Notifier, NotifierEvent, NotifySink,
};
pub use trigger::TriggerState;
