// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// What a host needs to render a widget's trigger.
///
/// Widgets never reach into the trigger element; the host draws it from this bundle and calls
/// the widget's `activate_trigger`, `handle_key` and `handle_pointer_down` methods.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerState {
    /// Whether the widget's overlay is open.
    pub open: bool,
    /// Text to show: the chosen label, or the placeholder.
    pub text: String,
    /// True when `text` is the placeholder.
    pub is_placeholder: bool,
    /// True when the trigger ignores activation.
    pub disabled: bool,
}

impl TriggerState {
    /// Build a bundle from an optional chosen label and a placeholder.
    pub(crate) fn new(open: bool, label: Option<&str>, placeholder: &str, disabled: bool) -> Self {
        Self {
            open,
            text: label.unwrap_or(placeholder).to_owned(),
            is_placeholder: label.is_none(),
            disabled,
        }
    }
}
