// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Free-text entry that could not be turned into a value.
///
/// Returned by the pickers' `set_text`. The widget also clears its validity flag and does not
/// report a value change.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Text is not a recognizable color.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor {
        /// The rejected text.
        input: String,
        /// Parser message.
        reason: String,
    },
    /// Text is not a recognizable time of day.
    #[error("invalid time {0:?}")]
    InvalidTime(String),
    /// A channel or field was set outside its range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Which field.
        field: &'static str,
        /// The rejected value, formatted.
        value: String,
    },
}
