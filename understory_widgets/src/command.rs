// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command palette: searchable, grouped actions.

use std::rc::Rc;

use kurbo::Point;
use understory_overlay::{Measure, OverlayConfig, OverlayController, OverlayEvent, OverlayStack};
use understory_placement::{Align, Placement, Side};
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::ListenerHost;

use crate::listbox::{ChooseMode, ItemView, Listbox};
use crate::option::OptionItem;

/// A run of items sharing a group heading, in display order.
#[derive(Clone, Debug)]
pub struct CommandGroup<'a> {
    /// Heading; `None` for ungrouped items.
    pub heading: Option<&'a str>,
    /// Items in the group.
    pub items: Vec<ItemView<'a>>,
}

/// Searchable list of actions.
///
/// Search matches labels and descriptions. Running a command reports `(value, label)` and
/// closes the palette; nothing stays selected.
#[derive(Debug)]
pub struct CommandPalette {
    list: Listbox,
    empty_message: String,
}

impl CommandPalette {
    /// Create a closed palette. It opens centered under its anchor.
    pub fn new<I>(host: Rc<dyn ListenerHost>, commands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OptionItem>,
    {
        let config = OverlayConfig::default()
            .with_placement(Placement::new(Side::Bottom, Align::Center).with_side_offset(8.0));
        let overlay = OverlayController::new(host).with_config(config);
        let list = Listbox::new(overlay, commands.into_iter().map(Into::into).collect())
            .with_search(true)
            .with_mode(ChooseMode::Report);
        Self {
            list,
            empty_message: String::from("No results found."),
        }
    }

    /// Report `(value, label)` of every command run.
    #[must_use]
    pub fn on_select(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.list.selection_mut().set_on_value_change(Some(Box::new(f)));
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

    /// Participate in a shared stacking order.
    #[must_use]
    pub fn with_stack(mut self, stack: OverlayStack) -> Self {
        self.list = self.list.map_overlay(|o| o.with_stack(stack));
        self
    }

    /// Text shown when the search matches nothing.
    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        self.list.overlay().is_open()
    }

    /// Palette origin.
    pub fn position(&self) -> Point {
        self.list.overlay().position()
    }

    /// Open or close, for example from a global shortcut.
    pub fn toggle(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        self.list.toggle(layout)
    }

    /// Push the caller's open state.
    pub fn sync_open(&mut self, open: bool, layout: &impl Measure) -> Option<OverlayEvent> {
        self.list.sync_open(open, layout)
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        self.list.selection().search()
    }

    /// Replace the search text.
    pub fn set_search(&mut self, text: &str) -> bool {
        self.list.set_search(text)
    }

    /// The message to show, if the current search matches nothing.
    pub fn empty_message(&self) -> Option<&str> {
        self.list
            .is_empty_result()
            .then_some(self.empty_message.as_str())
    }

    /// Matching commands, flat.
    pub fn items(&self) -> Vec<ItemView<'_>> {
        self.list.items()
    }

    /// Matching commands, grouped by heading in order of first appearance. Empty groups are
    /// omitted.
    pub fn groups(&self) -> Vec<CommandGroup<'_>> {
        let mut groups: Vec<CommandGroup<'_>> = Vec::new();
        for view in self.list.items() {
            let heading = view.item.group.as_deref();
            match groups.iter_mut().find(|g| g.heading == heading) {
                Some(group) => group.items.push(view),
                None => groups.push(CommandGroup {
                    heading,
                    items: vec![view],
                }),
            }
        }
        groups
    }

    /// Run the command at `index`.
    pub fn run(&mut self, index: usize) -> bool {
        self.list.choose(index)
    }

    /// Pointer hover over the command at `index`.
    pub fn hover(&mut self, index: usize) {
        self.list.set_highlight(index);
    }

    /// Key press inside the palette.
    pub fn handle_key(&mut self, key: Key, layout: &impl Measure) -> Outcome {
        if !self.is_open() {
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
