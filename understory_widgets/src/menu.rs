// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown menu with action, checkbox and radio items.

use std::rc::Rc;

use kurbo::Point;
use understory_overlay::{
    DismissReason, Measure, MountPolicy, OverlayConfig, OverlayController, OverlayEvent,
    OverlayStack,
};
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::ListenerHost;

use crate::listbox::Highlight;
use crate::option::OptionItem;
use crate::select::list_overlay_config;
use crate::selection::{OnValueChange, SelectionState, SelectionValue};
use crate::trigger::TriggerState;

/// One row of a menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    /// Runs an action and closes the menu.
    Action(OptionItem),
    /// Toggles membership of its value in the checked set.
    Checkbox(OptionItem),
    /// Makes its value the menu's single radio value.
    Radio(OptionItem),
    /// Visual divider.
    Separator,
    /// Non-interactive heading.
    Label(String),
}

impl MenuEntry {
    /// The item, for interactive entries.
    pub fn item(&self) -> Option<&OptionItem> {
        match self {
            Self::Action(item) | Self::Checkbox(item) | Self::Radio(item) => Some(item),
            Self::Separator | Self::Label(_) => None,
        }
    }

    fn is_candidate(&self) -> bool {
        self.item()
            .is_some_and(|item| !item.is_disabled() && !item.is_hidden())
    }
}

/// Read-only view of one menu row.
#[derive(Clone, Copy, Debug)]
pub struct MenuItemView<'a> {
    /// Index to pass back to [`DropdownMenu::activate`].
    pub index: usize,
    /// The entry.
    pub entry: &'a MenuEntry,
    /// Checked state of checkbox and radio entries.
    pub checked: bool,
    /// Whether the row has the keyboard highlight.
    pub highlighted: bool,
}

/// A menu opened from a trigger.
pub struct DropdownMenu {
    overlay: OverlayController,
    entries: Vec<MenuEntry>,
    highlight: Highlight,
    checked: SelectionState,
    radio: SelectionState,
    on_action: Option<OnValueChange>,
    label: String,
    disabled: bool,
}

impl core::fmt::Debug for DropdownMenu {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropdownMenu")
            .field("overlay", &self.overlay)
            .field("entries", &self.entries.len())
            .field("highlight", &self.highlight)
            .field("checked", &self.checked)
            .field("radio", &self.radio)
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl DropdownMenu {
    /// Create a closed menu. `label` is the trigger text.
    pub fn new(
        host: Rc<dyn ListenerHost>,
        label: impl Into<String>,
        entries: Vec<MenuEntry>,
    ) -> Self {
        Self {
            overlay: OverlayController::new(host).with_config(list_overlay_config()),
            entries,
            highlight: Highlight::new(),
            checked: SelectionState::multiple(Vec::new()),
            radio: SelectionState::single(None),
            on_action: None,
            label: label.into(),
            disabled: false,
        }
    }

    /// Report `(value, label)` of every action run.
    #[must_use]
    pub fn on_action(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.on_action = Some(Box::new(f));
        self
    }

    /// Report `(value, label)` of every checkbox toggled.
    #[must_use]
    pub fn on_checked_change(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.checked.set_on_value_change(Some(Box::new(f)));
        self
    }

    /// Report `(value, label)` of every radio choice.
    #[must_use]
    pub fn on_radio_change(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.radio.set_on_value_change(Some(Box::new(f)));
        self
    }

    /// Initial checked values for uncontrolled use.
    #[must_use]
    pub fn default_checked(mut self, values: Vec<String>) -> Self {
        self.checked.sync(SelectionValue::Multiple(values));
        self
    }

    /// Hand the checked values to the caller.
    #[must_use]
    pub fn controlled_checked(mut self, values: Vec<String>) -> Self {
        self.checked.set_controlled(SelectionValue::Multiple(values));
        self
    }

    /// Initial radio value for uncontrolled use.
    #[must_use]
    pub fn default_radio(mut self, value: impl Into<String>) -> Self {
        self.radio.sync(SelectionValue::Single(Some(value.into())));
        self
    }

    /// Hand the radio value to the caller.
    #[must_use]
    pub fn controlled_radio(mut self, value: Option<String>) -> Self {
        self.radio.set_controlled(SelectionValue::Single(value));
        self
    }

    /// Hand the open state to the caller.
    #[must_use]
    pub fn controlled_open(mut self, open: bool) -> Self {
        self.overlay = self.overlay.controlled(open);
        self
    }

    /// Report every requested open-state change.
    #[must_use]
    pub fn on_open_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.overlay = self.overlay.on_open_change(f);
        self
    }

    /// Replace the overlay configuration.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.overlay = self.overlay.with_config(config);
        self
    }

    /// Participate in a shared stacking order.
    #[must_use]
    pub fn with_stack(mut self, stack: OverlayStack) -> Self {
        self.overlay = self.overlay.with_stack(stack);
        self
    }

    /// Disable or enable the trigger.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Trigger rendering bundle.
    pub fn trigger(&self) -> TriggerState {
        TriggerState::new(self.is_open(), Some(&self.label), "", self.disabled)
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Menu origin.
    pub fn position(&self) -> Point {
        self.overlay.position()
    }

    /// The overlay controller.
    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// Checked checkbox values.
    pub fn checked(&self) -> &SelectionValue {
        self.checked.value()
    }

    /// Current radio value.
    pub fn radio(&self) -> Option<&str> {
        self.radio.value().first()
    }

    /// Push the caller's checked values.
    pub fn sync_checked(&mut self, values: Vec<String>) -> bool {
        self.checked.sync(SelectionValue::Multiple(values))
    }

    /// Push the caller's radio value.
    pub fn sync_radio(&mut self, value: Option<String>) -> bool {
        self.radio.sync(SelectionValue::Single(value))
    }

    /// Views of the visible rows.
    pub fn entries(&self) -> Vec<MenuItemView<'_>> {
        let highlighted = self.highlight.get();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.item().is_none_or(|item| !item.is_hidden()))
            .map(|(index, entry)| MenuItemView {
                index,
                entry,
                checked: match entry {
                    MenuEntry::Checkbox(item) => self.checked.is_selected(&item.value),
                    MenuEntry::Radio(item) => self.radio.is_selected(&item.value),
                    _ => false,
                },
                highlighted: highlighted == Some(index),
            })
            .collect()
    }

    fn candidates(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_candidate())
            .map(|(i, _)| i)
            .collect()
    }

    /// Activate the row at `index`. Separators, labels and disabled items are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        if !entry.is_candidate() {
            return false;
        }
        match entry {
            MenuEntry::Action(item) => {
                log::debug!("menu action {:?}", item.value);
                if let Some(f) = self.on_action.as_mut() {
                    f(&item.value, &item.label);
                }
            }
            MenuEntry::Checkbox(item) => {
                self.checked.choose(&item.value, &item.label);
            }
            MenuEntry::Radio(item) => {
                self.radio.choose(&item.value, &item.label);
            }
            MenuEntry::Separator | MenuEntry::Label(_) => return false,
        }
        let event = self.overlay.select_item();
        self.after_overlay(event);
        true
    }

    /// Pointer hover over the row at `index`.
    pub fn hover(&mut self, index: usize) {
        if self.candidates().contains(&index) {
            self.highlight.set(Some(index));
        }
    }

    /// Trigger pressed.
    pub fn activate_trigger(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        if self.disabled {
            return None;
        }
        let event = self.overlay.toggle(layout);
        self.after_overlay(event);
        event
    }

    /// Push the caller's open state.
    pub fn sync_open(&mut self, open: bool, layout: &impl Measure) -> Option<OverlayEvent> {
        let event = self.overlay.sync_open(open, layout);
        self.after_overlay(event);
        event
    }

    /// Key press on the trigger or the menu.
    ///
    /// A printable character moves the highlight to the next item whose label starts with it.
    pub fn handle_key(&mut self, key: Key, layout: &impl Measure) -> Outcome {
        if !self.is_open() {
            if self.disabled {
                return Outcome::Continue;
            }
            return match key {
                Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space => {
                    self.activate_trigger(layout);
                    Outcome::Consumed
                }
                _ => Outcome::Continue,
            };
        }
        match key {
            Key::Escape => {
                let outcome = self.overlay.handle_key(key);
                self.after_overlay(None);
                outcome
            }
            Key::Enter | Key::Space => match self.highlight.get() {
                Some(index) => Outcome::from(self.activate(index)),
                None => Outcome::Consumed,
            },
            Key::Tab => {
                let event = self.overlay.close(DismissReason::Programmatic);
                self.after_overlay(event);
                Outcome::Continue
            }
            Key::Character(c) => Outcome::from(self.typeahead(c)),
            _ => {
                let candidates = self.candidates();
                Outcome::from(self.highlight.navigate(key, &candidates))
            }
        }
    }

    /// Global pointer press.
    pub fn handle_pointer_down(
        &mut self,
        pt: Point,
        layout: &impl Measure,
    ) -> Option<OverlayEvent> {
        let event = self.overlay.handle_pointer_down(pt, layout);
        self.after_overlay(event);
        event
    }

    /// Viewport resize or scroll.
    pub fn handle_viewport_change(&mut self, layout: &impl Measure) -> bool {
        self.overlay.handle_viewport_change(layout)
    }

    fn typeahead(&mut self, c: char) -> bool {
        let candidates = self.candidates();
        let start = self
            .highlight
            .get()
            .and_then(|h| candidates.iter().position(|&i| i == h))
            .map_or(0, |p| p + 1);
        let needle: String = c.to_lowercase().collect();
        let n = candidates.len();
        let hit = (0..n).map(|k| candidates[(start + k) % n]).find(|&i| {
            self.entries[i]
                .item()
                .is_some_and(|item| item.label.to_lowercase().starts_with(&needle))
        });
        if hit.is_some() {
            self.highlight.set(hit);
        }
        hit.is_some()
    }

    fn after_overlay(&mut self, event: Option<OverlayEvent>) {
        if event == Some(OverlayEvent::Opened) {
            self.highlight.set(self.candidates().first().copied());
        }
        if !self.overlay.is_open() && self.overlay.config().mount == MountPolicy::OnOpen {
            self.highlight.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use kurbo::{Rect, Size};
    use understory_overlay::StaticLayout;
    use understory_responder::listener::ListenerRegistry;

    use super::*;

    const LAYOUT: StaticLayout = StaticLayout::new(
        Rect::new(10.0, 10.0, 90.0, 34.0),
        Size::new(180.0, 200.0),
        Size::new(800.0, 600.0),
    );

    fn entries() -> Vec<MenuEntry> {
        vec![
            MenuEntry::Label("Edit".into()),
            MenuEntry::Action(OptionItem::new("copy", "Copy")),
            MenuEntry::Action(OptionItem::new("cut", "Cut").disabled()),
            MenuEntry::Separator,
            MenuEntry::Checkbox(OptionItem::new("grid", "Show grid")),
            MenuEntry::Checkbox(OptionItem::new("rulers", "Show rulers")),
            MenuEntry::Separator,
            MenuEntry::Radio(OptionItem::new("sm", "Small")),
            MenuEntry::Radio(OptionItem::new("lg", "Large")),
        ]
    }

    fn menu() -> (Rc<ListenerRegistry>, DropdownMenu) {
        let registry = Rc::new(ListenerRegistry::new());
        let host: Rc<dyn ListenerHost> = registry.clone();
        (registry, DropdownMenu::new(host, "View", entries()))
    }

    #[test]
    fn action_reports_and_closes() {
        let (registry, menu) = menu();
        let ran = Rc::new(RefCell::new(Vec::new()));
        let sink = ran.clone();
        let mut menu = menu.on_action(move |v, l| sink.borrow_mut().push(format!("{v}:{l}")));
        menu.activate_trigger(&LAYOUT);
        assert!(menu.activate(1));
        assert_eq!(*ran.borrow(), ["copy:Copy"]);
        assert!(!menu.is_open());
        assert!(registry.is_empty());
    }

    #[test]
    fn inert_rows_are_ignored() {
        let (_r, mut menu) = menu();
        menu.activate_trigger(&LAYOUT);
        assert!(!menu.activate(0), "label");
        assert!(!menu.activate(2), "disabled");
        assert!(!menu.activate(3), "separator");
        assert!(menu.is_open());
    }

    #[test]
    fn checkbox_and_radio_state() {
        let (_r, menu) = menu();
        let mut menu = menu.default_checked(vec!["rulers".into()]).default_radio("sm");
        menu.activate_trigger(&LAYOUT);
        menu.activate(4);
        assert_eq!(menu.checked().values(), ["rulers", "grid"]);
        menu.activate_trigger(&LAYOUT);
        menu.activate(5);
        assert_eq!(menu.checked().values(), ["grid"]);
        menu.activate_trigger(&LAYOUT);
        menu.activate(8);
        assert_eq!(menu.radio(), Some("lg"));

        let rows = menu.entries();
        assert!(rows[4].checked);
        assert!(!rows[5].checked);
        assert!(rows[8].checked);
        assert!(!rows[7].checked);
    }

    #[test]
    fn keyboard_skips_disabled_and_inert_rows() {
        let (_r, mut menu) = menu();
        assert_eq!(menu.handle_key(Key::Enter, &LAYOUT), Outcome::Consumed);
        let hl = |m: &DropdownMenu| m.entries().iter().find(|v| v.highlighted).map(|v| v.index);
        assert_eq!(hl(&menu), Some(1));
        menu.handle_key(Key::ArrowDown, &LAYOUT);
        assert_eq!(hl(&menu), Some(4), "skips disabled Cut and the separator");
        menu.handle_key(Key::End, &LAYOUT);
        assert_eq!(hl(&menu), Some(8));
        menu.handle_key(Key::ArrowDown, &LAYOUT);
        assert_eq!(hl(&menu), Some(1), "wraps");
    }

    #[test]
    fn typeahead_cycles_matching_labels() {
        let (_r, mut menu) = menu();
        menu.activate_trigger(&LAYOUT);
        let hl = |m: &DropdownMenu| m.entries().iter().find(|v| v.highlighted).map(|v| v.index);
        assert_eq!(menu.handle_key(Key::Character('s'), &LAYOUT), Outcome::Consumed);
        assert_eq!(hl(&menu), Some(4));
        menu.handle_key(Key::Character('S'), &LAYOUT);
        assert_eq!(hl(&menu), Some(5));
        menu.handle_key(Key::Character('s'), &LAYOUT);
        assert_eq!(hl(&menu), Some(7));
        assert_eq!(menu.handle_key(Key::Character('z'), &LAYOUT), Outcome::Continue);
    }

    #[test]
    fn escape_closes_and_clears_highlight() {
        let (registry, mut menu) = menu();
        menu.activate_trigger(&LAYOUT);
        assert_eq!(menu.handle_key(Key::Escape, &LAYOUT), Outcome::Consumed);
        assert!(!menu.is_open());
        assert!(menu.entries().iter().all(|v| !v.highlighted));
        assert!(registry.is_empty());
    }
}
