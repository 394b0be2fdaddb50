// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global listener subscriptions with RAII release.
//!
//! ## Overview
//!
//! Overlays and drag controllers need global input (viewport resize and scroll, document-level
//! pointer and key events) only while they are open or dragging. Every such need is expressed as
//! a [`Subscription`] obtained from a [`ListenerHost`]. Dropping the subscription removes the
//! listener, so releasing it is tied to the state transition (or the owner's drop) that ends the
//! need for it.
//!
//! [`ListenerRegistry`] is a host implementation that records which listeners are live. A platform
//! binding consults it to decide which global events to forward; tests use it to check that
//! nothing is left behind.
//!
//! ```
//! use std::rc::Rc;
//! use understory_responder::listener::{
//!     ListenerHost, ListenerKind, ListenerRegistry, ListenerSet, Subscriptions,
//! };
//!
//! let registry = Rc::new(ListenerRegistry::new());
//! let host: Rc<dyn ListenerHost> = registry.clone();
//!
//! let mut subs = Subscriptions::new();
//! subs.subscribe_all(&host, ListenerSet::RESIZE | ListenerSet::SCROLL);
//! assert_eq!(registry.count(ListenerKind::Scroll), 1);
//!
//! subs.clear();
//! assert!(registry.is_empty());
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

/// A kind of global input a component can listen for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Viewport resize.
    Resize,
    /// Scroll of the viewport or any scroll container.
    Scroll,
    /// Pointer press anywhere in the document.
    PointerDown,
    /// Key press anywhere in the document.
    KeyDown,
    /// Pointer movement anywhere in the document.
    PointerMove,
    /// Pointer release anywhere in the document.
    PointerUp,
}

impl ListenerKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Resize,
        Self::Scroll,
        Self::PointerDown,
        Self::KeyDown,
        Self::PointerMove,
        Self::PointerUp,
    ];

    /// The single-bit set for this kind.
    pub const fn as_set(self) -> ListenerSet {
        match self {
            Self::Resize => ListenerSet::RESIZE,
            Self::Scroll => ListenerSet::SCROLL,
            Self::PointerDown => ListenerSet::POINTER_DOWN,
            Self::KeyDown => ListenerSet::KEY_DOWN,
            Self::PointerMove => ListenerSet::POINTER_MOVE,
            Self::PointerUp => ListenerSet::POINTER_UP,
        }
    }
}

bitflags::bitflags! {
    /// A set of [`ListenerKind`]s.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListenerSet: u8 {
        /// Viewport resize.
        const RESIZE       = 0b0000_0001;
        /// Viewport or container scroll.
        const SCROLL       = 0b0000_0010;
        /// Document pointer press.
        const POINTER_DOWN = 0b0000_0100;
        /// Document key press.
        const KEY_DOWN     = 0b0000_1000;
        /// Document pointer move.
        const POINTER_MOVE = 0b0001_0000;
        /// Document pointer release.
        const POINTER_UP   = 0b0010_0000;
        /// What an open overlay listens for.
        const OVERLAY = Self::RESIZE.bits()
            | Self::SCROLL.bits()
            | Self::POINTER_DOWN.bits()
            | Self::KEY_DOWN.bits();
        /// What an active drag listens for.
        const DRAG = Self::POINTER_MOVE.bits() | Self::POINTER_UP.bits();
        /// What a positioned, non-dismissable surface listens for.
        const VIEWPORT = Self::RESIZE.bits() | Self::SCROLL.bits();
    }
}

impl ListenerSet {
    /// Iterate the kinds in this set.
    pub fn kinds(self) -> impl Iterator<Item = ListenerKind> {
        ListenerKind::ALL
            .into_iter()
            .filter(move |k| self.contains(k.as_set()))
    }
}

/// Generational handle of a registered listener.
///
/// Stale ids never alias a newer listener in the same slot because the generation must match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32, u32);

/// Something that can register and unregister global listeners.
///
/// Methods take `&self`; implementations use interior mutability because a host is shared by
/// every component through an [`Rc`].
pub trait ListenerHost {
    /// Register interest in `kind` and return its handle.
    fn add_listener(&self, kind: ListenerKind) -> ListenerId;
    /// Remove a listener. Unknown or stale ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

/// A live listener registration. Dropping it unregisters the listener.
#[must_use = "dropping a Subscription immediately removes the listener"]
pub struct Subscription {
    host: Rc<dyn ListenerHost>,
    id: ListenerId,
    kind: ListenerKind,
}

impl Subscription {
    /// Register `kind` with `host`.
    pub fn new(host: &Rc<dyn ListenerHost>, kind: ListenerKind) -> Self {
        let id = host.add_listener(kind);
        log::trace!("subscribed {kind:?} as {id:?}");
        Self {
            host: Rc::clone(host),
            id,
            kind,
        }
    }

    /// The registered id.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The registered kind.
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        log::trace!("unsubscribed {:?} ({:?})", self.kind, self.id);
        self.host.remove_listener(self.id);
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// An owned group of subscriptions released together.
#[derive(Debug, Default)]
pub struct Subscriptions {
    subs: Vec<Subscription>,
}

impl Subscriptions {
    /// An empty group.
    pub fn new() -> Self {
        Self { subs: Vec::new() }
    }

    /// Subscribe to every kind in `set` that this group does not already hold.
    pub fn subscribe_all(&mut self, host: &Rc<dyn ListenerHost>, set: ListenerSet) {
        let held = self.kinds();
        for kind in set.difference(held).kinds() {
            self.subs.push(Subscription::new(host, kind));
        }
    }

    /// Release every subscription in the group.
    pub fn clear(&mut self) {
        self.subs.clear();
    }

    /// True if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// The kinds currently held.
    pub fn kinds(&self) -> ListenerSet {
        self.subs
            .iter()
            .fold(ListenerSet::empty(), |acc, s| acc | s.kind.as_set())
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    kind: Option<ListenerKind>,
}

/// In-process [`ListenerHost`] that tracks live listeners.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    slots: RefCell<Vec<Slot>>,
    free_list: RefCell<Vec<usize>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live listeners of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|s| s.kind == Some(kind))
            .count()
    }

    /// Total number of live listeners.
    pub fn len(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|s| s.kind.is_some())
            .count()
    }

    /// True if no listener is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kinds with at least one live listener.
    ///
    /// A platform binding forwards only these events.
    pub fn active(&self) -> ListenerSet {
        self.slots
            .borrow()
            .iter()
            .filter_map(|s| s.kind)
            .fold(ListenerSet::empty(), |acc, k| acc | k.as_set())
    }

    /// True if `id` refers to a live listener.
    pub fn is_live(&self, id: ListenerId) -> bool {
        self.slots
            .borrow()
            .get(id.0 as usize)
            .is_some_and(|s| s.generation == id.1 && s.kind.is_some())
    }
}

impl ListenerHost for ListenerRegistry {
    fn add_listener(&self, kind: ListenerKind) -> ListenerId {
        let mut slots = self.slots.borrow_mut();
        let idx = if let Some(idx) = self.free_list.borrow_mut().pop() {
            slots[idx].generation += 1;
            slots[idx].kind = Some(kind);
            idx
        } else {
            slots.push(Slot {
                generation: 1,
                kind: Some(kind),
            });
            slots.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ListenerId uses 32-bit indices by design."
        )]
        ListenerId(idx as u32, slots[idx].generation)
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut slots = self.slots.borrow_mut();
        let idx = id.0 as usize;
        if let Some(slot) = slots.get_mut(idx)
            && slot.generation == id.1
            && slot.kind.is_some()
        {
            slot.kind = None;
            self.free_list.borrow_mut().push(idx);
        }
    }
}
