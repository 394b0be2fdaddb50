// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_responder::controllable::Controllable;
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::{ListenerHost, ListenerSet, Subscriptions};

use crate::config::{RangeConfig, ThumbCrossing};
use crate::value::{fraction_along, normalize, snap, value_at};

/// Values callback type.
pub type OnValues = Box<dyn FnMut(&[f64])>;

/// Multi-thumb range slider.
///
/// Values are kept sorted, inside `[min, max]` and on the step grid. A drag holds document
/// pointer-move and pointer-up listeners from the thumb press until the release; nothing is
/// held otherwise.
pub struct RangeSlider {
    host: Rc<dyn ListenerHost>,
    config: RangeConfig,
    values: Controllable<Vec<f64>>,
    /// Last values reported while controlled and not yet synced back.
    pending: Option<Vec<f64>>,
    on_value_commit: Option<OnValues>,
    active_thumb: Option<usize>,
    focused_thumb: Option<usize>,
    drag: Subscriptions,
    disabled: bool,
}

impl core::fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RangeSlider")
            .field("config", &self.config)
            .field("values", &self.values)
            .field("pending", &self.pending)
            .field("active_thumb", &self.active_thumb)
            .field("focused_thumb", &self.focused_thumb)
            .field("listeners", &self.drag.kinds())
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl RangeSlider {
    /// Create an uncontrolled slider with one thumb at `min`.
    pub fn new(host: Rc<dyn ListenerHost>, config: RangeConfig) -> Self {
        Self {
            host,
            values: Controllable::uncontrolled(vec![config.min]),
            pending: None,
            config,
            on_value_commit: None,
            active_thumb: None,
            focused_thumb: None,
            drag: Subscriptions::new(),
            disabled: false,
        }
    }

    /// Initial values for uncontrolled use; one thumb per value.
    #[must_use]
    pub fn default_value(mut self, values: &[f64]) -> Self {
        self.values.sync(normalize(values, &self.config));
        self
    }

    /// Hand the values to the caller.
    #[must_use]
    pub fn controlled_value(mut self, values: &[f64]) -> Self {
        self.values.set_controlled(normalize(values, &self.config));
        self
    }

    /// Report every change, including each step of a drag.
    #[must_use]
    pub fn on_value_change(mut self, mut f: impl FnMut(&[f64]) + 'static) -> Self {
        self.values
            .set_on_change(Some(Box::new(move |v: &Vec<f64>| f(v.as_slice()))));
        self
    }

    /// Report the final values when a drag ends or a key changes a value.
    #[must_use]
    pub fn on_value_commit(mut self, f: impl FnMut(&[f64]) + 'static) -> Self {
        self.on_value_commit = Some(Box::new(f));
        self
    }

    /// Disable or enable all interaction.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Disable or enable all interaction. Disabling ends a drag without committing.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.end_drag();
        }
    }

    /// Bounds and behavior.
    pub fn config(&self) -> &RangeConfig {
        &self.config
    }

    /// Current values, ascending.
    pub fn values(&self) -> &[f64] {
        self.values.get()
    }

    /// Push the caller's values.
    ///
    /// Thumb indices stay as they were after the last reported change, so a caller that
    /// pushes something other than what was reported may see the drag continue on a
    /// different thumb.
    pub fn sync_value(&mut self, values: &[f64]) -> bool {
        let next = normalize(values, &self.config);
        let count = next.len();
        self.pending = None;
        let changed = self.values.sync(next);
        if self.active_thumb.is_some_and(|i| i >= count) {
            self.end_drag();
        }
        if self.focused_thumb.is_some_and(|i| i >= count) {
            self.focused_thumb = None;
        }
        changed
    }

    /// Thumb being dragged.
    pub fn active_thumb(&self) -> Option<usize> {
        self.active_thumb
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active_thumb.is_some()
    }

    /// Global listener kinds currently held.
    pub fn listeners(&self) -> ListenerSet {
        self.drag.kinds()
    }

    /// Whether interaction is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Pointer pressed on thumb `thumb`. Starts a drag.
    pub fn pointer_down_thumb(&mut self, thumb: usize) -> bool {
        if self.disabled || thumb >= self.values().len() {
            return false;
        }
        self.begin_drag(thumb);
        true
    }

    /// Pointer moved during a drag. `track` is the live track rect.
    pub fn pointer_move(&mut self, pt: Point, track: Rect) -> bool {
        let Some(thumb) = self.active_thumb else {
            return false;
        };
        let value = value_at(fraction_along(pt, track, self.config.orientation), &self.config);
        self.move_thumb(thumb, value)
    }

    /// Pointer released. Ends the drag, releases its listeners and reports the commit.
    pub fn pointer_up(&mut self) -> bool {
        if self.active_thumb.is_none() {
            return false;
        }
        self.commit();
        self.end_drag();
        true
    }

    /// Pointer pressed on the track away from a thumb.
    ///
    /// The thumb nearest the pressed value jumps there and a drag begins from it.
    pub fn track_press(&mut self, pt: Point, track: Rect) -> bool {
        if self.disabled {
            return false;
        }
        let value = value_at(fraction_along(pt, track, self.config.orientation), &self.config);
        let thumb = nearest_thumb(self.current(), value);
        self.begin_drag(thumb);
        self.move_thumb(thumb, value);
        true
    }

    /// A thumb received keyboard focus.
    pub fn focus_thumb(&mut self, thumb: usize) {
        if thumb < self.values().len() {
            self.focused_thumb = Some(thumb);
        }
    }

    /// Keyboard focus left the slider.
    pub fn blur(&mut self) {
        self.focused_thumb = None;
    }

    /// Thumb with keyboard focus.
    pub fn focused_thumb(&self) -> Option<usize> {
        self.focused_thumb
    }

    /// Key press on the focused thumb.
    ///
    /// Arrows move one step (up and right increase), `PageUp`/`PageDown` move
    /// [`page_steps`](RangeConfig::page_steps) steps, and `Home`/`End` jump to the bounds.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        let Some(thumb) = self.focused_thumb else {
            return Outcome::Continue;
        };
        if self.disabled {
            return Outcome::Continue;
        }
        let current = self.current()[thumb];
        let step = self.config.step;
        let page = step * f64::from(self.config.page_steps);
        let target = match key {
            Key::ArrowRight | Key::ArrowUp => current + step,
            Key::ArrowLeft | Key::ArrowDown => current - step,
            Key::PageUp => current + page,
            Key::PageDown => current - page,
            Key::Home => self.config.min,
            Key::End => self.config.max,
            _ => return Outcome::Continue,
        };
        if self.move_thumb(thumb, snap(target, &self.config)) {
            self.commit();
        }
        Outcome::Consumed
    }

    /// Values edits apply to: the last report while a controlled change is unsynced.
    fn current(&self) -> &[f64] {
        self.pending.as_deref().unwrap_or(self.values.get())
    }

    fn begin_drag(&mut self, thumb: usize) {
        self.active_thumb = Some(thumb);
        self.focused_thumb = Some(thumb);
        self.drag.subscribe_all(&self.host, ListenerSet::DRAG);
        log::debug!("slider drag start on thumb {thumb}");
    }

    fn end_drag(&mut self) {
        if let Some(thumb) = self.active_thumb.take() {
            log::debug!("slider drag end on thumb {thumb}");
        }
        self.drag.clear();
        self.pending = None;
    }

    /// Write `value` into `thumb` under the crossing policy and follow the thumb to its new
    /// index. Returns `true` if the requested values differ from the current ones.
    fn move_thumb(&mut self, thumb: usize, value: f64) -> bool {
        let (next, index) = match self.config.crossing {
            ThumbCrossing::Reorder => reorder(self.current(), thumb, value),
            ThumbCrossing::Stop => stop(self.current(), thumb, value, &self.config),
        };
        if self.active_thumb.is_some() {
            self.active_thumb = Some(index);
        }
        if self.focused_thumb.is_some() {
            self.focused_thumb = Some(index);
        }
        if next.as_slice() == self.current() {
            return false;
        }
        log::trace!("slider values {next:?}");
        if self.values.is_controlled() {
            self.pending = Some(next.clone());
        }
        self.values.set(next);
        true
    }

    fn commit(&mut self) {
        let values = self.pending.as_deref().unwrap_or(self.values.get());
        if let Some(f) = self.on_value_commit.as_mut() {
            f(values);
        }
    }
}

/// Move one value and re-sort. A thumb moving up lands after equal values, moving down before.
fn reorder(values: &[f64], thumb: usize, value: f64) -> (Vec<f64>, usize) {
    let mut next = values.to_vec();
    let old = next.remove(thumb);
    let index = if value > old {
        next.partition_point(|&v| v <= value)
    } else {
        next.partition_point(|&v| v < value)
    };
    next.insert(index, value);
    (next, index)
}

/// Clamp one value between its neighbours, keeping the configured gap.
fn stop(values: &[f64], thumb: usize, value: f64, config: &RangeConfig) -> (Vec<f64>, usize) {
    let gap = config.step.max(0.0) * f64::from(config.min_steps_between_thumbs);
    let lo = thumb
        .checked_sub(1)
        .map_or(config.min, |i| values[i] + gap);
    let hi = values.get(thumb + 1).map_or(config.max, |v| v - gap);
    let mut next = values.to_vec();
    next[thumb] = if lo > hi { values[thumb] } else { value.clamp(lo, hi) };
    (next, thumb)
}

/// Index of the value closest to `value`. Ties go to the thumb that can move toward it without
/// crossing: the last one when pressing above, the first otherwise.
fn nearest_thumb(values: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &v) in values.iter().enumerate() {
        let dist = (v - value).abs();
        if dist < best_dist || (dist == best_dist && value > v) {
            best = i;
            best_dist = dist;
        }
    }
    best
}
