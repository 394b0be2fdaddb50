// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking order for simultaneously open overlays.
//!
//! ## Overview
//!
//! Overlays work without a stack; each one owns its listeners independently and paints in
//! default order. Sharing an [`OverlayStack`] between controllers adds three rules:
//!
//! - each open overlay gets a layer above every overlay opened before it
//!   ([`OverlayStack::z_index`]);
//! - Escape is only honored by the topmost layer, so one key press closes one overlay;
//! - a pointer press inside a layer above does not count as "outside" for layers below, so a
//!   select opened from inside a popover does not close the popover.
//!
//! The stack is a cheap shared handle; clone it into every controller that should participate.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};

/// Base z-index assigned to the lowest open layer.
pub const BASE_Z_INDEX: i32 = 50;

/// Identifier of a layer in an [`OverlayStack`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

#[derive(Clone, Debug)]
struct Layer {
    id: LayerId,
    bounds: Rect,
}

#[derive(Debug, Default)]
struct StackInner {
    next_id: u32,
    // Bottom to top.
    layers: Vec<Layer>,
}

/// Shared stacking coordinator.
#[derive(Clone, Debug, Default)]
pub struct OverlayStack {
    inner: Rc<RefCell<StackInner>>,
}

impl OverlayStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new topmost layer with the given content bounds.
    pub fn push(&self, bounds: Rect) -> LayerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = LayerId(inner.next_id);
        inner.layers.push(Layer { id, bounds });
        id
    }

    /// Remove a layer. Unknown ids are ignored.
    pub fn remove(&self, id: LayerId) {
        self.inner.borrow_mut().layers.retain(|l| l.id != id);
    }

    /// Update the content bounds of a layer after it moved.
    pub fn set_bounds(&self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self
            .inner
            .borrow_mut()
            .layers
            .iter_mut()
            .find(|l| l.id == id)
        {
            layer.bounds = bounds;
        }
    }

    /// Number of open layers.
    pub fn len(&self) -> usize {
        self.inner.borrow().layers.len()
    }

    /// True if no layer is open.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().layers.is_empty()
    }

    /// The topmost layer.
    pub fn topmost(&self) -> Option<LayerId> {
        self.inner.borrow().layers.last().map(|l| l.id)
    }

    /// True if `id` is the topmost layer.
    pub fn is_topmost(&self, id: LayerId) -> bool {
        self.topmost() == Some(id)
    }

    /// Paint order for `id`: [`BASE_Z_INDEX`] plus its position from the bottom.
    pub fn z_index(&self, id: LayerId) -> Option<i32> {
        let inner = self.inner.borrow();
        let pos = inner.layers.iter().position(|l| l.id == id)?;
        Some(BASE_Z_INDEX.saturating_add(i32::try_from(pos).unwrap_or(i32::MAX)))
    }

    /// True if `pt` falls inside any layer stacked above `id`.
    pub fn covered_above(&self, id: LayerId, pt: Point) -> bool {
        let inner = self.inner.borrow();
        let Some(pos) = inner.layers.iter().position(|l| l.id == id) else {
            return false;
        };
        inner.layers[pos + 1..]
            .iter()
            .any(|l| l.bounds.contains(pt))
    }
}
