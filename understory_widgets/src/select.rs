// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select and combobox: choose one value from a list in an overlay.

use std::rc::Rc;

use kurbo::Point;
use understory_overlay::{Measure, OverlayConfig, OverlayController, OverlayEvent, OverlayStack};
use understory_placement::{Align, Placement, Side};
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::ListenerHost;

use crate::listbox::{ItemView, Listbox};
use crate::option::OptionItem;
use crate::selection::SelectionValue;
use crate::trigger::TriggerState;

/// Overlay configuration shared by list-style widgets: below the trigger, leading edges aligned.
pub fn list_overlay_config() -> OverlayConfig {
    OverlayConfig::default()
        .with_placement(Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0))
}

/// Choose one value from a fixed list.
///
/// ```
/// use std::rc::Rc;
/// use kurbo::{Rect, Size};
/// use understory_overlay::StaticLayout;
/// use understory_responder::listener::{ListenerHost, ListenerRegistry};
/// use understory_widgets::Select;
///
/// let registry = Rc::new(ListenerRegistry::new());
/// let host: Rc<dyn ListenerHost> = registry.clone();
/// let layout = StaticLayout::new(
///     Rect::new(0.0, 0.0, 120.0, 32.0),
///     Size::new(120.0, 80.0),
///     Size::new(800.0, 600.0),
/// );
///
/// let mut team =
///     Select::new(host, [("dm", "Marketing"), ("web", "Web")]).with_placeholder("Team");
/// assert_eq!(team.trigger().text, "Team");
///
/// team.activate_trigger(&layout);
/// team.choose(0);
/// assert_eq!(team.value(), Some("dm"));
/// assert_eq!(team.trigger().text, "Marketing");
/// assert!(!team.is_open());
/// assert!(registry.is_empty());
/// ```
#[derive(Debug)]
pub struct Select {
    list: Listbox,
    placeholder: String,
    disabled: bool,
}

impl Select {
    /// Create a closed, uncontrolled select with nothing chosen.
    pub fn new<I>(host: Rc<dyn ListenerHost>, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OptionItem>,
    {
        let overlay = OverlayController::new(host).with_config(list_overlay_config());
        Self {
            list: Listbox::new(overlay, options.into_iter().map(Into::into).collect()),
            placeholder: String::from("Select..."),
            disabled: false,
        }
    }

    pub(crate) fn from_listbox(list: Listbox) -> Self {
        Self {
            list,
            placeholder: String::from("Select..."),
            disabled: false,
        }
    }

    /// Trigger text while nothing is chosen.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Initial value for uncontrolled use.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.list
            .selection_mut()
            .sync(SelectionValue::Single(Some(value.into())));
        self
    }

    /// Hand the value to the caller.
    #[must_use]
    pub fn controlled_value(mut self, value: Option<String>) -> Self {
        self.list
            .selection_mut()
            .set_controlled(SelectionValue::Single(value));
        self
    }

    /// Report `(value, label)` whenever a different item is chosen.
    #[must_use]
    pub fn on_value_change(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.list.selection_mut().set_on_value_change(Some(Box::new(f)));
        self
    }

    /// Initial open state for uncontrolled use.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        self.list = self.list.map_overlay(|o| o.default_open(open));
        self
    }

    /// Hand the open state to the caller.
    #[must_use]
    pub fn controlled_open(mut self, open: bool) -> Self {
        self.list = self.list.map_overlay(|o| o.controlled(open));
        self
    }

    /// Report every requested open-state change.
    #[must_use]
    pub fn on_open_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.list = self.list.map_overlay(|o| o.on_open_change(f));
        self
    }

    /// Replace the overlay configuration.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.list = self.list.map_overlay(|o| o.with_config(config));
        self
    }

    /// Participate in a shared stacking order.
    #[must_use]
    pub fn with_stack(mut self, stack: OverlayStack) -> Self {
        self.list = self.list.map_overlay(|o| o.with_stack(stack));
        self
    }

    /// Disable or enable the trigger.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Change the disabled state.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Trigger rendering bundle.
    pub fn trigger(&self) -> TriggerState {
        TriggerState::new(
            self.is_open(),
            self.list.selected_label(),
            &self.placeholder,
            self.disabled,
        )
    }

    /// The chosen value.
    pub fn value(&self) -> Option<&str> {
        self.list.selection().value().first()
    }

    /// Push the caller's value.
    pub fn sync_value(&mut self, value: Option<String>) -> bool {
        self.list.selection_mut().sync(SelectionValue::Single(value))
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.list.overlay().is_open()
    }

    /// List origin.
    pub fn position(&self) -> Point {
        self.list.overlay().position()
    }

    /// Views of the visible options.
    pub fn items(&self) -> Vec<ItemView<'_>> {
        self.list.items()
    }

    /// The underlying listbox.
    pub fn listbox(&self) -> &Listbox {
        &self.list
    }

    pub(crate) fn listbox_mut(&mut self) -> &mut Listbox {
        &mut self.list
    }

    /// Trigger pressed.
    pub fn activate_trigger(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        if self.disabled {
            return None;
        }
        self.list.toggle(layout)
    }

    /// Push the caller's open state.
    pub fn sync_open(&mut self, open: bool, layout: &impl Measure) -> Option<OverlayEvent> {
        self.list.sync_open(open, layout)
    }

    /// Pointer activation of the option at `index`.
    pub fn choose(&mut self, index: usize) -> bool {
        self.list.choose(index)
    }

    /// Pointer hover over the option at `index`.
    pub fn hover(&mut self, index: usize) {
        self.list.set_highlight(index);
    }

    /// Key press on the trigger or the list.
    pub fn handle_key(&mut self, key: Key, layout: &impl Measure) -> Outcome {
        if self.disabled && !self.is_open() {
            return Outcome::Continue;
        }
        self.list.handle_key(key, layout)
    }

    /// Global pointer press.
    pub fn handle_pointer_down(
        &mut self,
        pt: Point,
        layout: &impl Measure,
    ) -> Option<OverlayEvent> {
        self.list.handle_pointer_down(pt, layout)
    }

    /// Viewport resize or scroll.
    pub fn handle_viewport_change(&mut self, layout: &impl Measure) -> bool {
        self.list.handle_viewport_change(layout)
    }
}

/// A select whose list can be narrowed by typing.
///
/// The empty-results message is only shown while search text is present and nothing matches.
#[derive(Debug)]
pub struct Combobox {
    select: Select,
    empty_message: String,
}

impl Combobox {
    /// Create a closed, uncontrolled combobox.
    pub fn new<I>(host: Rc<dyn ListenerHost>, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OptionItem>,
    {
        let overlay = OverlayController::new(host).with_config(list_overlay_config());
        let list = Listbox::new(overlay, options.into_iter().map(Into::into).collect())
            .with_search(false);
        Self {
            select: Select::from_listbox(list),
            empty_message: String::from("No results found."),
        }
    }

    /// Apply a builder to the inner select.
    #[must_use]
    pub fn map_select(mut self, f: impl FnOnce(Select) -> Select) -> Self {
        self.select = f(self.select);
        self
    }

    /// Text shown when the search matches nothing.
    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// The inner select.
    pub fn select(&self) -> &Select {
        &self.select
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        self.select.listbox().selection().search()
    }

    /// Replace the search text.
    pub fn set_search(&mut self, text: &str) -> bool {
        self.select.listbox_mut().set_search(text)
    }

    /// The message to show, if the current search matches nothing.
    pub fn empty_message(&self) -> Option<&str> {
        self.select
            .listbox()
            .is_empty_result()
            .then_some(self.empty_message.as_str())
    }

    /// Trigger rendering bundle.
    pub fn trigger(&self) -> TriggerState {
        self.select.trigger()
    }

    /// The chosen value.
    pub fn value(&self) -> Option<&str> {
        self.select.value()
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.select.is_open()
    }

    /// Views of the options matching the search.
    pub fn items(&self) -> Vec<ItemView<'_>> {
        self.select.items()
    }

    /// Trigger pressed.
    pub fn activate_trigger(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        self.select.activate_trigger(layout)
    }

    /// Pointer activation of the option at `index`.
    pub fn choose(&mut self, index: usize) -> bool {
        self.select.choose(index)
    }

    /// Key press on the input or the list.
    pub fn handle_key(&mut self, key: Key, layout: &impl Measure) -> Outcome {
        self.select.handle_key(key, layout)
    }

    /// Global pointer press.
    pub fn handle_pointer_down(
        &mut self,
        pt: Point,
        layout: &impl Measure,
    ) -> Option<OverlayEvent> {
        self.select.handle_pointer_down(pt, layout)
    }

    /// Viewport resize or scroll.
    pub fn handle_viewport_change(&mut self, layout: &impl Measure) -> bool {
        self.select.handle_viewport_change(layout)
    }
}
