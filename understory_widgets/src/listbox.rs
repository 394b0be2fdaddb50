// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A list of options inside an overlay, with keyboard highlight and optional search.
//!
//! [`Listbox`] is the shared engine behind [`Select`](crate::Select),
//! [`Combobox`](crate::Combobox) and [`CommandPalette`](crate::CommandPalette). It composes one
//! [`OverlayController`] with the option model, a [`SelectionState`] and a [`Highlight`].

use kurbo::Point;
use understory_overlay::{DismissReason, Measure, MountPolicy, OverlayController, OverlayEvent};
use understory_responder::input::{Key, Outcome};

use crate::option::{OptionItem, filter_options};
use crate::selection::SelectionState;

/// Keyboard highlight over a list of candidate indices.
///
/// Candidates are the item indices that can be highlighted, in display order. Disabled and
/// filtered-out items are simply not candidates, so navigation skips them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    current: Option<usize>,
}

impl Highlight {
    /// No highlight.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Highlighted item index.
    pub fn get(&self) -> Option<usize> {
        self.current
    }

    /// Highlight `index` directly, for example on pointer hover.
    pub fn set(&mut self, index: Option<usize>) {
        self.current = index;
    }

    /// Remove the highlight.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Apply a navigation key. Arrows wrap; Home and End jump. Returns `true` if `key` is a
    /// navigation key.
    pub fn navigate(&mut self, key: Key, candidates: &[usize]) -> bool {
        let pos = self
            .current
            .and_then(|c| candidates.iter().position(|&i| i == c));
        let n = candidates.len();
        let next = match key {
            Key::ArrowDown => match pos {
                _ if n == 0 => None,
                Some(p) => Some((p + 1) % n),
                None => Some(0),
            },
            Key::ArrowUp => match pos {
                _ if n == 0 => None,
                Some(p) => Some((p + n - 1) % n),
                None => Some(n - 1),
            },
            Key::Home => (n > 0).then_some(0),
            Key::End => n.checked_sub(1),
            _ => return false,
        };
        self.current = next.map(|p| candidates[p]);
        true
    }

    /// Keep the highlight if it is still a candidate, otherwise move it to the first one.
    pub fn retain(&mut self, candidates: &[usize]) {
        if self.current.is_some_and(|c| candidates.contains(&c)) {
            return;
        }
        self.current = candidates.first().copied();
    }
}

/// Read-only view of one item, computed by the owning widget.
#[derive(Clone, Copy, Debug)]
pub struct ItemView<'a> {
    /// Index into the widget's options; pass it back to `choose`.
    pub index: usize,
    /// The item.
    pub item: &'a OptionItem,
    /// Whether the item's value is selected.
    pub selected: bool,
    /// Whether the item has the keyboard highlight.
    pub highlighted: bool,
}

impl ItemView<'_> {
    /// Item label.
    pub fn label(&self) -> &str {
        &self.item.label
    }

    /// True if the item cannot be chosen.
    pub fn is_disabled(&self) -> bool {
        self.item.is_disabled()
    }
}

/// What choosing an item does to the widget value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChooseMode {
    /// Store the item's value as the selection (select, combobox).
    #[default]
    Retain,
    /// Only report it; nothing stays selected (command palette).
    Report,
}

/// Options in an overlay.
#[derive(Debug)]
pub struct Listbox {
    overlay: OverlayController,
    options: Vec<OptionItem>,
    selection: SelectionState,
    highlight: Highlight,
    searchable: bool,
    search_description: bool,
    mode: ChooseMode,
}

impl Listbox {
    /// Create a listbox over `options` driven by `overlay`.
    pub fn new(overlay: OverlayController, options: Vec<OptionItem>) -> Self {
        Self {
            overlay,
            options,
            selection: SelectionState::default(),
            highlight: Highlight::new(),
            searchable: false,
            search_description: false,
            mode: ChooseMode::Retain,
        }
    }

    /// Transform the overlay controller, for forwarding builder calls.
    #[must_use]
    pub fn map_overlay(mut self, f: impl FnOnce(OverlayController) -> OverlayController) -> Self {
        self.overlay = f(self.overlay);
        self
    }

    /// Enable search. Descriptions are searched too when `descriptions` is set.
    #[must_use]
    pub fn with_search(mut self, descriptions: bool) -> Self {
        self.searchable = true;
        self.search_description = descriptions;
        self
    }

    /// Set what choosing does.
    #[must_use]
    pub fn with_mode(mut self, mode: ChooseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Mutable selection state.
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// The overlay controller.
    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// All options.
    pub fn options(&self) -> &[OptionItem] {
        &self.options
    }

    /// Replace the options. The highlight moves to the first candidate if its item is gone.
    pub fn set_options(&mut self, options: Vec<OptionItem>) {
        self.options = options;
        if self.highlight.get().is_some() {
            let candidates = self.candidates();
            self.highlight.retain(&candidates);
        }
    }

    /// Current highlight.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlight.get()
    }

    /// Highlight an item, for example on pointer hover. Ignored for non-candidates.
    pub fn set_highlight(&mut self, index: usize) {
        if self.candidates().contains(&index) {
            self.highlight.set(Some(index));
        }
    }

    /// Indices of items to display, in order.
    pub fn visible(&self) -> Vec<usize> {
        let query = if self.searchable {
            self.selection.search()
        } else {
            ""
        };
        filter_options(&self.options, query, self.search_description)
    }

    /// Visible items that can be highlighted and chosen.
    pub fn candidates(&self) -> Vec<usize> {
        self.visible()
            .into_iter()
            .filter(|&i| !self.options[i].is_disabled())
            .collect()
    }

    /// Views of the visible items.
    pub fn items(&self) -> Vec<ItemView<'_>> {
        let highlighted = self.highlight.get();
        self.visible()
            .into_iter()
            .map(|index| {
                let item = &self.options[index];
                ItemView {
                    index,
                    item,
                    selected: self.mode == ChooseMode::Retain
                        && self.selection.is_selected(&item.value),
                    highlighted: highlighted == Some(index),
                }
            })
            .collect()
    }

    /// True when search text is present and nothing matches it.
    pub fn is_empty_result(&self) -> bool {
        self.searchable && !self.selection.search().trim().is_empty() && self.visible().is_empty()
    }

    /// Label of the selected option, if the selection names one.
    pub fn selected_label(&self) -> Option<&str> {
        let value = self.selection.value().first()?;
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Replace the search text and re-seat the highlight.
    pub fn set_search(&mut self, text: &str) -> bool {
        if !self.searchable || !self.selection.set_search(text) {
            return false;
        }
        let candidates = self.candidates();
        self.highlight.set(candidates.first().copied());
        true
    }

    /// Choose the item at `index`. Disabled, hidden or unknown items are ignored.
    ///
    /// Reports `(value, label)` and closes the overlay. Returns `true` if the item was accepted.
    pub fn choose(&mut self, index: usize) -> bool {
        let Some(item) = self.options.get(index) else {
            return false;
        };
        if item.is_disabled() || item.is_hidden() {
            log::trace!("ignoring choice of unavailable item {index}");
            return false;
        }
        let (value, label) = (item.value.clone(), item.label.clone());
        match self.mode {
            ChooseMode::Retain => {
                self.selection.choose(&value, &label);
            }
            ChooseMode::Report => self.selection.report(&value, &label),
        }
        let event = self.overlay.select_item();
        self.after_overlay(event);
        true
    }

    /// Trigger activation.
    pub fn toggle(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
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

    /// Key press on the trigger or inside the content.
    pub fn handle_key(&mut self, key: Key, layout: &impl Measure) -> Outcome {
        if !self.overlay.is_open() {
            return match key {
                Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space => {
                    self.toggle(layout);
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
            Key::Enter => self.choose_highlighted(),
            // A space is text while searching.
            Key::Space if !self.searchable => self.choose_highlighted(),
            Key::Tab => {
                let event = self.overlay.close(DismissReason::Programmatic);
                self.after_overlay(event);
                Outcome::Continue
            }
            _ => {
                let candidates = self.candidates();
                Outcome::from(self.highlight.navigate(key, &candidates))
            }
        }
    }

    fn choose_highlighted(&mut self) -> Outcome {
        match self.highlight.get() {
            Some(index) => Outcome::from(self.choose(index)),
            None => Outcome::Consumed,
        }
    }

    /// Seat or tear down content state after the overlay may have changed.
    fn after_overlay(&mut self, event: Option<OverlayEvent>) {
        if event == Some(OverlayEvent::Opened) {
            let candidates = self.candidates();
            let selected = candidates
                .iter()
                .copied()
                .find(|&i| self.selection.is_selected(&self.options[i].value));
            self.highlight.set(selected.or_else(|| candidates.first().copied()));
        }
        if !self.overlay.is_open() && self.overlay.config().mount == MountPolicy::OnOpen {
            self.highlight.clear();
            self.selection.clear_search();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use kurbo::{Rect, Size};
    use understory_overlay::StaticLayout;
    use understory_responder::listener::{ListenerHost, ListenerRegistry};

    use super::*;

    const LAYOUT: StaticLayout = StaticLayout::new(
        Rect::new(10.0, 10.0, 110.0, 40.0),
        Size::new(160.0, 120.0),
        Size::new(640.0, 480.0),
    );

    fn listbox(options: Vec<OptionItem>) -> (Rc<ListenerRegistry>, Listbox) {
        let registry = Rc::new(ListenerRegistry::new());
        let host: Rc<dyn ListenerHost> = registry.clone();
        (registry, Listbox::new(OverlayController::new(host), options))
    }

    #[test]
    fn navigation_wraps_and_skips_missing_candidates() {
        let mut h = Highlight::new();
        let candidates = [0, 2, 3];
        assert!(h.navigate(Key::ArrowDown, &candidates));
        assert_eq!(h.get(), Some(0));
        h.navigate(Key::ArrowDown, &candidates);
        assert_eq!(h.get(), Some(2));
        h.navigate(Key::End, &candidates);
        assert_eq!(h.get(), Some(3));
        h.navigate(Key::ArrowDown, &candidates);
        assert_eq!(h.get(), Some(0), "wraps");
        h.navigate(Key::ArrowUp, &candidates);
        assert_eq!(h.get(), Some(3), "wraps backwards");
        assert!(!h.navigate(Key::Enter, &candidates));
        h.navigate(Key::ArrowDown, &[]);
        assert_eq!(h.get(), None);
    }

    #[test]
    fn open_highlights_selected_else_first_enabled() {
        let (_r, mut lb) = listbox(vec![
            OptionItem::new("a", "A").disabled(),
            OptionItem::new("b", "B"),
            OptionItem::new("c", "C"),
        ]);
        lb.toggle(&LAYOUT);
        assert_eq!(lb.highlighted(), Some(1));
        lb.handle_key(Key::Escape, &LAYOUT);
        assert_eq!(lb.highlighted(), None);

        lb.selection_mut().sync(crate::SelectionValue::Single(Some("c".into())));
        lb.toggle(&LAYOUT);
        assert_eq!(lb.highlighted(), Some(2));
    }

    #[test]
    fn keyboard_choice_skips_disabled() {
        let (registry, mut lb) = listbox(vec![
            OptionItem::new("a", "A"),
            OptionItem::new("b", "B").disabled(),
            OptionItem::new("c", "C"),
        ]);
        assert_eq!(lb.handle_key(Key::ArrowDown, &LAYOUT), Outcome::Consumed);
        assert!(lb.overlay().is_open());
        lb.handle_key(Key::ArrowDown, &LAYOUT);
        assert_eq!(lb.highlighted(), Some(2));
        assert_eq!(lb.handle_key(Key::Enter, &LAYOUT), Outcome::Consumed);
        assert_eq!(lb.selection().value().first(), Some("c"));
        assert!(!lb.overlay().is_open());
        assert!(registry.is_empty());
    }

    #[test]
    fn disabled_items_cannot_be_chosen() {
        let (_r, mut lb) = listbox(vec![OptionItem::new("a", "A").disabled()]);
        lb.toggle(&LAYOUT);
        assert!(!lb.choose(0));
        assert!(!lb.choose(7));
        assert!(lb.overlay().is_open());
        assert!(lb.selection().value().is_empty());
    }

    #[test]
    fn closing_resets_search_under_on_open_policy() {
        let (_r, mut lb) = listbox(vec![
            OptionItem::new("a", "Apple"),
            OptionItem::new("b", "Banana"),
        ]);
        lb = lb.with_search(false);
        lb.toggle(&LAYOUT);
        assert!(lb.set_search("ban"));
        assert_eq!(lb.visible(), [1]);
        assert_eq!(lb.highlighted(), Some(1));
        lb.toggle(&LAYOUT);
        assert_eq!(lb.selection().search(), "");
        assert_eq!(lb.visible(), [0, 1]);
    }

    #[test]
    fn tab_closes_without_consuming() {
        let (registry, mut lb) = listbox(vec![OptionItem::new("a", "A")]);
        lb.toggle(&LAYOUT);
        assert_eq!(lb.handle_key(Key::Tab, &LAYOUT), Outcome::Continue);
        assert!(!lb.overlay().is_open());
        assert!(registry.is_empty());
    }
}
