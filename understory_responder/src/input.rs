// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary shared by the widgets: keys and handler outcomes.

/// Logical keys the widgets react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Dismiss.
    Escape,
    /// Activate.
    Enter,
    /// Activate.
    Space,
    /// Focus traversal.
    Tab,
    /// Previous item / increment vertical value.
    ArrowUp,
    /// Next item / decrement vertical value.
    ArrowDown,
    /// Decrement horizontal value.
    ArrowLeft,
    /// Increment horizontal value.
    ArrowRight,
    /// First item / minimum value.
    Home,
    /// Last item / maximum value.
    End,
    /// Large increment.
    PageUp,
    /// Large decrement.
    PageDown,
    /// Printable character.
    Character(char),
}

/// Handler outcome reported back to the host.
///
/// A host uses this to decide whether to keep propagating the event and whether to suppress the
/// platform default action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// The event was not used; keep propagating.
    #[default]
    Continue,
    /// The event was used; stop propagation and suppress the default action.
    Consumed,
}

impl Outcome {
    /// True for [`Outcome::Consumed`].
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

impl From<bool> for Outcome {
    fn from(consumed: bool) -> Self {
        if consumed {
            Self::Consumed
        } else {
            Self::Continue
        }
    }
}
