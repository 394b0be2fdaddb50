// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Axis the track runs along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Minimum at the left edge.
    #[default]
    Horizontal,
    /// Minimum at the bottom edge.
    Vertical,
}

/// What happens when a moving thumb reaches a neighbour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThumbCrossing {
    /// The thumb passes its neighbour. Values are re-sorted and the active thumb follows its
    /// value to the new index.
    #[default]
    Reorder,
    /// The thumb stops at its neighbour, keeping
    /// [`min_steps_between_thumbs`](RangeConfig::min_steps_between_thumbs) steps of distance.
    Stop,
}

/// Slider bounds and behavior.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangeConfig {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Quantum; values are always `min + k * step`. Non-positive disables snapping.
    pub step: f64,
    /// Track axis.
    pub orientation: Orientation,
    /// Crossing policy.
    pub crossing: ThumbCrossing,
    /// Minimum distance between neighbours, in steps, under [`ThumbCrossing::Stop`].
    pub min_steps_between_thumbs: u32,
    /// Steps moved by `PageUp` and `PageDown`.
    pub page_steps: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            orientation: Orientation::Horizontal,
            crossing: ThumbCrossing::Reorder,
            min_steps_between_thumbs: 0,
            page_steps: 10,
        }
    }
}

impl RangeConfig {
    /// Set the bounds. Reversed bounds are swapped.
    #[must_use]
    pub const fn with_bounds(mut self, min: f64, max: f64) -> Self {
        if max < min {
            self.min = max;
            self.max = min;
        } else {
            self.min = min;
            self.max = max;
        }
        self
    }

    /// Set the step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the track axis.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the crossing policy.
    #[must_use]
    pub const fn with_crossing(mut self, crossing: ThumbCrossing) -> Self {
        self.crossing = crossing;
        self
    }

    /// Set the minimum neighbour distance used by [`ThumbCrossing::Stop`].
    #[must_use]
    pub const fn with_min_steps_between_thumbs(mut self, steps: u32) -> Self {
        self.min_steps_between_thumbs = steps;
        self
    }

    /// Set the `PageUp`/`PageDown` multiplier.
    #[must_use]
    pub const fn with_page_steps(mut self, steps: u32) -> Self {
        self.page_steps = steps;
        self
    }

    /// The span from `min` to `max`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
