// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled and uncontrolled state behind one interface.
//!
//! Every widget value (open flag, selection, slider values, color, time) follows the same
//! contract:
//! - **Uncontrolled**: the widget owns the value, starting from a default. Changes apply locally
//!   and are also reported to the change callback if one is set.
//! - **Controlled**: the caller owns the value. Changes are only reported; the widget keeps
//!   showing the caller's value until the caller pushes a new one with [`Controllable::sync`].
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_responder::controllable::Controllable;
//!
//! let seen = Rc::new(Cell::new(false));
//! let sink = seen.clone();
//! let mut open = Controllable::controlled(false).with_on_change(move |v: &bool| sink.set(*v));
//!
//! // Reported, not applied.
//! assert!(!open.set(true));
//! assert!(seen.get());
//! assert!(!*open.get());
//!
//! // The caller accepts the change.
//! assert!(open.sync(true));
//! assert!(*open.get());
//! ```

use alloc::boxed::Box;

/// Change callback type.
pub type OnChange<T> = Box<dyn FnMut(&T)>;

/// A value owned either by the widget or by its caller.
pub struct Controllable<T> {
    value: T,
    controlled: bool,
    on_change: Option<OnChange<T>>,
}

impl<T: core::fmt::Debug> core::fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controllable")
            .field("value", &self.value)
            .field("controlled", &self.controlled)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<T: Default + PartialEq> Default for Controllable<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}

impl<T: PartialEq> Controllable<T> {
    /// Widget-owned value starting at `default`.
    pub fn uncontrolled(default: T) -> Self {
        Self {
            value: default,
            controlled: false,
            on_change: None,
        }
    }

    /// Caller-owned value.
    pub fn controlled(value: T) -> Self {
        Self {
            value,
            controlled: true,
            on_change: None,
        }
    }

    /// Hand ownership to the caller, starting from `value`. The change callback is kept.
    pub fn set_controlled(&mut self, value: T) {
        self.controlled = true;
        self.value = value;
    }

    /// Attach a change callback.
    #[must_use]
    pub fn with_on_change(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Replace the change callback.
    pub fn set_on_change(&mut self, f: Option<OnChange<T>>) {
        self.on_change = f;
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// True if the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Request a change to `next`.
    ///
    /// Equal values are ignored. Otherwise the callback sees `next`, and in uncontrolled mode
    /// the value is replaced. Returns `true` if the held value changed.
    pub fn set(&mut self, next: T) -> bool {
        if next == self.value {
            return false;
        }
        if let Some(f) = self.on_change.as_mut() {
            f(&next);
        }
        if self.controlled {
            false
        } else {
            self.value = next;
            true
        }
    }

    /// Replace the held value without reporting it.
    ///
    /// This is how a caller pushes its value into a controlled widget. Returns `true` if the
    /// held value changed.
    pub fn sync(&mut self, value: T) -> bool {
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn uncontrolled_applies_and_reports() {
        let (log, cb) = recorder::<u32>();
        let mut c = Controllable::uncontrolled(1).with_on_change(cb);
        assert!(c.set(2));
        assert_eq!(*c.get(), 2);
        assert_eq!(*log.borrow(), [2]);
    }

    #[test]
    fn controlled_reports_without_applying() {
        let (log, cb) = recorder::<u32>();
        let mut c = Controllable::controlled(1).with_on_change(cb);
        assert!(!c.set(2));
        assert_eq!(*c.get(), 1);
        assert_eq!(*log.borrow(), [2]);
        assert!(c.sync(2));
        assert_eq!(*c.get(), 2);
        assert_eq!(log.borrow().len(), 1, "sync must not report");
    }

    #[test]
    fn equal_value_is_not_reported() {
        let (log, cb) = recorder::<u32>();
        let mut c = Controllable::uncontrolled(3).with_on_change(cb);
        assert!(!c.set(3));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn default_is_uncontrolled() {
        let c: Controllable<bool> = Controllable::default();
        assert!(!c.is_controlled());
        assert!(!*c.get());
    }
}
