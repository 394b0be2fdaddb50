// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and search state shared by a widget and its items.
//!
//! The owning widget is the only writer. Items receive read-only views that say whether they
//! are selected; they report activation back to the widget by index.

use understory_responder::controllable::Controllable;

/// Value-change callback: `(value, label)` of the item that changed.
pub type OnValueChange = Box<dyn FnMut(&str, &str)>;

/// The selected value of a widget.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionValue {
    /// At most one value (select, combobox, radio group).
    Single(Option<String>),
    /// Any number of values, in the order they were added (checkbox items).
    Multiple(Vec<String>),
}

impl Default for SelectionValue {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl SelectionValue {
    /// True if `value` is selected.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(v) => v.as_deref() == Some(value),
            Self::Multiple(vs) => vs.iter().any(|v| v == value),
        }
    }

    /// The single value, or the first of several.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(v) => v.as_deref(),
            Self::Multiple(vs) => vs.first().map(String::as_str),
        }
    }

    /// Every selected value.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(v) => v.as_deref().into_iter().collect(),
            Self::Multiple(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(v) => v.is_none(),
            Self::Multiple(vs) => vs.is_empty(),
        }
    }

    /// The value after choosing `value`: replaces a single value, toggles membership of a multiple.
    fn chosen(&self, value: &str) -> Self {
        match self {
            Self::Single(_) => Self::Single(Some(value.to_owned())),
            Self::Multiple(vs) => {
                let mut next = vs.clone();
                if let Some(pos) = next.iter().position(|v| v == value) {
                    next.remove(pos);
                } else {
                    next.push(value.to_owned());
                }
                Self::Multiple(next)
            }
        }
    }
}

/// A widget's value plus its search text.
pub struct SelectionState {
    value: Controllable<SelectionValue>,
    search: String,
    on_value_change: Option<OnValueChange>,
}

impl core::fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectionState")
            .field("value", &self.value)
            .field("search", &self.search)
            .field("on_value_change", &self.on_value_change.is_some())
            .finish()
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::single(None)
    }
}

impl SelectionState {
    /// Uncontrolled single selection.
    pub fn single(default: Option<String>) -> Self {
        Self::uncontrolled(SelectionValue::Single(default))
    }

    /// Uncontrolled multiple selection.
    pub fn multiple(default: Vec<String>) -> Self {
        Self::uncontrolled(SelectionValue::Multiple(default))
    }

    /// Widget-owned value.
    pub fn uncontrolled(default: SelectionValue) -> Self {
        Self {
            value: Controllable::uncontrolled(default),
            search: String::new(),
            on_value_change: None,
        }
    }

    /// Hand the value to the caller, starting from `value`.
    pub fn set_controlled(&mut self, value: SelectionValue) {
        self.value.set_controlled(value);
    }

    /// Set the change callback.
    pub fn set_on_value_change(&mut self, f: Option<OnValueChange>) {
        self.on_value_change = f;
    }

    /// Current value.
    pub fn value(&self) -> &SelectionValue {
        self.value.get()
    }

    /// True if the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        self.value.is_controlled()
    }

    /// True if `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.value.get().contains(value)
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search text. Returns `true` if it changed.
    pub fn set_search(&mut self, text: &str) -> bool {
        if self.search == text {
            return false;
        }
        text.clone_into(&mut self.search);
        true
    }

    /// Clear the search text.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Choose an item. Reports `(value, label)` when the selection changes, and applies the
    /// change when uncontrolled. Returns `true` if a change was reported.
    pub fn choose(&mut self, value: &str, label: &str) -> bool {
        let next = self.value.get().chosen(value);
        if next == *self.value.get() {
            return false;
        }
        log::debug!("selection -> {value:?}");
        if let Some(f) = self.on_value_change.as_mut() {
            f(value, label);
        }
        self.value.set(next);
        true
    }

    /// Report `(value, label)` without touching the held value. Used for action items.
    pub fn report(&mut self, value: &str, label: &str) {
        if let Some(f) = self.on_value_change.as_mut() {
            f(value, label);
        }
    }

    /// Push the caller's value.
    pub fn sync(&mut self, value: SelectionValue) -> bool {
        self.value.sync(value)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<(String, String)>>>, OnValueChange) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let f: OnValueChange =
            Box::new(move |v: &str, l: &str| sink.borrow_mut().push((v.into(), l.into())));
        (log, f)
    }

    #[test]
    fn single_choice_replaces_and_reports() {
        let (log, f) = recorder();
        let mut s = SelectionState::single(None);
        s.set_on_value_change(Some(f));
        assert!(s.choose("dm", "Marketing"));
        assert_eq!(s.value().first(), Some("dm"));
        assert!(!s.choose("dm", "Marketing"), "same value is not a change");
        assert_eq!(*log.borrow(), [("dm".to_owned(), "Marketing".to_owned())]);
    }

    #[test]
    fn multiple_choice_toggles() {
        let mut s = SelectionState::multiple(vec!["a".into()]);
        s.choose("b", "B");
        assert_eq!(s.value().values(), ["a", "b"]);
        s.choose("a", "A");
        assert_eq!(s.value().values(), ["b"]);
        assert!(s.is_selected("b"));
        assert!(!s.is_selected("a"));
    }

    #[test]
    fn controlled_reports_and_keeps_value() {
        let (log, f) = recorder();
        let mut s = SelectionState::default();
        s.set_controlled(SelectionValue::Single(Some("web".into())));
        s.set_on_value_change(Some(f));
        assert!(s.choose("dm", "Marketing"));
        assert_eq!(s.value().first(), Some("web"));
        assert_eq!(log.borrow().len(), 1);
        s.sync(SelectionValue::Single(Some("dm".into())));
        assert!(s.is_selected("dm"));
    }

    #[test]
    fn search_text_round_trips() {
        let mut s = SelectionState::default();
        assert!(s.set_search("mar"));
        assert!(!s.set_search("mar"));
        assert_eq!(s.search(), "mar");
        s.clear_search();
        assert!(s.search().is_empty());
    }
}
