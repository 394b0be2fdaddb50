// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live layout reads.

use kurbo::{Rect, Size};

/// Reads the geometry an overlay is positioned from.
///
/// Implementations read the live layout every time they are called; controllers never keep the
/// trigger box between events. All values are in viewport coordinates.
pub trait Measure {
    /// Current bounding box of the trigger element.
    fn trigger_bounds(&self) -> Rect;
    /// Current size of the overlay content.
    fn content_size(&self) -> Size;
    /// Current viewport size.
    fn viewport(&self) -> Size;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn trigger_bounds(&self) -> Rect {
        (**self).trigger_bounds()
    }

    fn content_size(&self) -> Size {
        (**self).content_size()
    }

    fn viewport(&self) -> Size {
        (**self).viewport()
    }
}

/// A fixed layout snapshot.
///
/// Useful for hosts that measure once per event, and for tests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StaticLayout {
    /// Trigger bounding box.
    pub trigger: Rect,
    /// Overlay content size.
    pub content: Size,
    /// Viewport size.
    pub viewport: Size,
}

impl StaticLayout {
    /// Build a snapshot.
    pub const fn new(trigger: Rect, content: Size, viewport: Size) -> Self {
        Self {
            trigger,
            content,
            viewport,
        }
    }
}

impl Measure for StaticLayout {
    fn trigger_bounds(&self) -> Rect {
        self.trigger
    }

    fn content_size(&self) -> Size {
        self.content
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}
