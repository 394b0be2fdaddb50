// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options shown in listbox-style content, and search filtering over them.

bitflags::bitflags! {
    /// Per-item state bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFlags: u8 {
        /// Shown, but cannot be chosen or highlighted.
        const DISABLED = 0b0000_0001;
        /// Kept in the model but excluded from views and navigation.
        const HIDDEN   = 0b0000_0010;
    }
}

/// One choosable entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionItem {
    /// Value reported when chosen.
    pub value: String,
    /// Text shown for the item and on the trigger once chosen.
    pub label: String,
    /// Secondary text; searched by the command palette.
    pub description: Option<String>,
    /// Group heading the item is listed under.
    pub group: Option<String>,
    /// Keyboard shortcut hint, display only.
    pub shortcut: Option<String>,
    /// State bits.
    pub flags: ItemFlags,
}

impl OptionItem {
    /// Create an enabled item.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            group: None,
            shortcut: None,
            flags: ItemFlags::empty(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the group heading.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the shortcut hint.
    #[must_use]
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Mark as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.flags.insert(ItemFlags::DISABLED);
        self
    }

    /// True if the item cannot be chosen.
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ItemFlags::DISABLED)
    }

    /// True if the item is excluded from views.
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ItemFlags::HIDDEN)
    }

    /// Case-insensitive substring match on the label, and on the description when asked.
    ///
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str, search_description: bool) -> bool {
        if self.label.to_lowercase().contains(needle) {
            return true;
        }
        search_description
            && self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for OptionItem {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// Indices of the visible items matching `query`, in model order.
///
/// An empty query matches every visible item. Matching is a case-insensitive substring test
/// on the label, and on the description when `search_description` is set.
pub fn filter_options(items: &[OptionItem], query: &str, search_description: bool) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_hidden())
        .filter(|(_, item)| needle.is_empty() || item.matches(&needle, search_description))
        .map(|(i, _)| i)
        .collect()
}

/// Find an item by value.
pub fn find_option<'a>(items: &'a [OptionItem], value: &str) -> Option<(usize, &'a OptionItem)> {
    items.iter().enumerate().find(|(_, item)| item.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<OptionItem> {
        vec![
            OptionItem::new("mkt", "Marketing"),
            OptionItem::new("des", "Design").with_description("Product and brand"),
            OptionItem::new("mku", "Markup"),
        ]
    }

    #[test]
    fn substring_is_case_insensitive() {
        assert_eq!(filter_options(&teams(), "mar", false), [0, 2]);
        assert_eq!(filter_options(&teams(), "MAR", false), [0, 2]);
        assert_eq!(filter_options(&teams(), "kup", false), [2]);
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(filter_options(&teams(), "", false), [0, 1, 2]);
        assert_eq!(filter_options(&teams(), "  ", false), [0, 1, 2]);
    }

    #[test]
    fn description_only_when_asked() {
        assert!(filter_options(&teams(), "brand", false).is_empty());
        assert_eq!(filter_options(&teams(), "brand", true), [1]);
    }

    #[test]
    fn hidden_items_never_match() {
        let mut items = teams();
        items[0].flags.insert(ItemFlags::HIDDEN);
        assert_eq!(filter_options(&items, "", false), [1, 2]);
        assert_eq!(filter_options(&items, "mar", false), [2]);
    }

    #[test]
    fn tuples_convert() {
        let item: OptionItem = ("dm", "Marketing").into();
        assert_eq!(item.value, "dm");
        assert!(!item.is_disabled());
        assert_eq!(find_option(&[item], "dm").map(|(i, _)| i), Some(0));
    }
}
