// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative placement intent: side, alignment, and offsets.

/// Edge of the trigger that an overlay attaches to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Above the trigger.
    Top,
    /// To the right of the trigger.
    Right,
    /// Below the trigger.
    #[default]
    Bottom,
    /// To the left of the trigger.
    Left,
}

impl Side {
    /// The side across the trigger from this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True when the main axis of this side is vertical (`Top` and `Bottom`).
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Cross-axis alignment of an overlay along the trigger edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Leading edges line up.
    Start,
    /// Centers line up.
    #[default]
    Center,
    /// Trailing edges line up.
    End,
}

/// Where an overlay attaches to its trigger.
///
/// `side_offset` pushes the overlay away from the trigger along the main axis.
/// `align_offset` nudges it along the cross axis: inward from the leading edge for
/// [`Align::Start`], inward from the trailing edge for [`Align::End`], ignored for
/// [`Align::Center`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Placement {
    /// Trigger edge the overlay attaches to.
    pub side: Side,
    /// Cross-axis alignment.
    pub align: Align,
    /// Main-axis gap between trigger and overlay.
    pub side_offset: f64,
    /// Cross-axis nudge applied for `Start` and `End` alignment.
    pub align_offset: f64,
    /// Flip to the opposite side when the preferred side overflows the viewport
    /// and the opposite side does not. Off by default.
    pub avoid_collisions: bool,
}

impl Placement {
    /// Create a placement with zero offsets and no collision avoidance.
    pub const fn new(side: Side, align: Align) -> Self {
        Self {
            side,
            align,
            side_offset: 0.0,
            align_offset: 0.0,
            avoid_collisions: false,
        }
    }

    /// Set the main-axis gap.
    #[must_use]
    pub const fn with_side_offset(mut self, offset: f64) -> Self {
        self.side_offset = offset;
        self
    }

    /// Set the cross-axis nudge.
    #[must_use]
    pub const fn with_align_offset(mut self, offset: f64) -> Self {
        self.align_offset = offset;
        self
    }

    /// Enable or disable side flipping.
    #[must_use]
    pub const fn with_avoid_collisions(mut self, avoid: bool) -> Self {
        self.avoid_collisions = avoid;
        self
    }
}
