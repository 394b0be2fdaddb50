// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-of-day picker with hour, minute, optional second and AM/PM selectors.

use std::rc::Rc;

use chrono::{NaiveTime, Timelike};
use kurbo::Point;
use understory_overlay::{Measure, OverlayConfig, OverlayController, OverlayEvent, OverlayStack};
use understory_responder::controllable::Controllable;
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::ListenerHost;

use crate::error::InputError;
use crate::select::list_overlay_config;
use crate::selection::OnValueChange;
use crate::trigger::TriggerState;

/// Value format reported to callbacks.
pub const VALUE_FORMAT: &str = "%H:%M:%S";

/// Formats accepted by [`TimePicker::set_text`], tried in order.
const TEXT_FORMATS: [&str; 5] = ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p", "%I:%M%p"];

/// How hours are displayed and chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HourCycle {
    /// 1 to 12 plus an AM/PM selector.
    H12,
    /// 0 to 23.
    #[default]
    H24,
}

/// Half of the day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Period {
    /// Before noon.
    Am,
    /// Noon and after.
    Pm,
}

/// A time editor in an overlay.
///
/// Each selector edit recomputes one time and reports `(HH:MM:SS, display)`.
pub struct TimePicker {
    overlay: OverlayController,
    time: Controllable<NaiveTime>,
    on_value_change: Option<OnValueChange>,
    hour_cycle: HourCycle,
    show_seconds: bool,
    minute_step: u32,
    text: String,
    text_valid: bool,
    disabled: bool,
}

impl core::fmt::Debug for TimePicker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimePicker")
            .field("overlay", &self.overlay)
            .field("time", &self.time)
            .field("hour_cycle", &self.hour_cycle)
            .field("show_seconds", &self.show_seconds)
            .field("minute_step", &self.minute_step)
            .field("text", &self.text)
            .field("text_valid", &self.text_valid)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl TimePicker {
    /// Create a closed, uncontrolled 24-hour picker at midnight.
    pub fn new(host: Rc<dyn ListenerHost>) -> Self {
        let mut picker = Self {
            overlay: OverlayController::new(host).with_config(list_overlay_config()),
            time: Controllable::uncontrolled(NaiveTime::MIN),
            on_value_change: None,
            hour_cycle: HourCycle::H24,
            show_seconds: false,
            minute_step: 1,
            text: String::new(),
            text_valid: true,
            disabled: false,
        };
        picker.text = picker.display();
        picker
    }

    /// Set the hour cycle.
    #[must_use]
    pub fn with_hour_cycle(mut self, cycle: HourCycle) -> Self {
        self.hour_cycle = cycle;
        self.text = self.display();
        self
    }

    /// Show the seconds selector.
    #[must_use]
    pub fn with_seconds(mut self, show: bool) -> Self {
        self.show_seconds = show;
        self.text = self.display();
        self
    }

    /// Spacing of the minute options. Zero is treated as one.
    #[must_use]
    pub fn with_minute_step(mut self, step: u32) -> Self {
        self.minute_step = step.clamp(1, 60);
        self
    }

    /// Initial time for uncontrolled use.
    #[must_use]
    pub fn default_value(mut self, time: NaiveTime) -> Self {
        self.time.sync(time);
        self.text = self.display();
        self
    }

    /// Hand the time to the caller.
    #[must_use]
    pub fn controlled_value(mut self, time: NaiveTime) -> Self {
        self.time.set_controlled(time);
        self.text = self.display();
        self
    }

    /// Report `(HH:MM:SS, display)` on every change.
    #[must_use]
    pub fn on_value_change(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.on_value_change = Some(Box::new(f));
        self
    }

    /// Replace the overlay configuration.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.overlay = self.overlay.with_config(config);
        self
    }

    /// Participate in a shared stacking order.
    #[must_use]
    pub fn with_stack(mut self, stack: OverlayStack) -> Self {
        self.overlay = self.overlay.with_stack(stack);
        self
    }

    /// Disable or enable the trigger.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Current time.
    pub fn value(&self) -> NaiveTime {
        *self.time.get()
    }

    /// Current time as `HH:MM:SS`.
    pub fn value_string(&self) -> String {
        self.value().format(VALUE_FORMAT).to_string()
    }

    /// Current time in the display format for the hour cycle.
    pub fn display(&self) -> String {
        format_display(self.value(), self.hour_cycle, self.show_seconds)
    }

    /// Current half of the day.
    pub fn period(&self) -> Period {
        if self.value().hour() < 12 {
            Period::Am
        } else {
            Period::Pm
        }
    }

    /// Hour displayed in the hour selector.
    pub fn display_hour(&self) -> u32 {
        match self.hour_cycle {
            HourCycle::H24 => self.value().hour(),
            HourCycle::H12 => self.value().hour12().1,
        }
    }

    /// Entries of the hour selector.
    pub fn hour_options(&self) -> Vec<u32> {
        match self.hour_cycle {
            HourCycle::H24 => (0..24).collect(),
            HourCycle::H12 => (1..=12).collect(),
        }
    }

    /// Entries of the minute selector.
    pub fn minute_options(&self) -> Vec<u32> {
        (0..60).step_by(self.minute_step as usize).collect()
    }

    /// Entries of the second selector; empty when seconds are hidden.
    pub fn second_options(&self) -> Vec<u32> {
        if self.show_seconds {
            (0..60).collect()
        } else {
            Vec::new()
        }
    }

    /// Text in the entry field.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// False after text entry that did not parse.
    pub fn is_text_valid(&self) -> bool {
        self.text_valid
    }

    /// Trigger rendering bundle.
    pub fn trigger(&self) -> TriggerState {
        let display = self.display();
        TriggerState::new(self.is_open(), Some(display.as_str()), "", self.disabled)
    }

    /// Whether the editor is open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Editor origin.
    pub fn position(&self) -> Point {
        self.overlay.position()
    }

    /// Push the caller's time.
    pub fn sync_value(&mut self, time: NaiveTime) -> bool {
        let changed = self.time.sync(time);
        if changed {
            self.text = self.display();
            self.text_valid = true;
        }
        changed
    }

    /// Hour selector. In 12-hour mode `hour` is 1 to 12 and the current period is kept.
    pub fn set_hour(&mut self, hour: u32) -> Result<bool, InputError> {
        let hour24 = match self.hour_cycle {
            HourCycle::H24 if hour < 24 => hour,
            HourCycle::H12 if (1..=12).contains(&hour) => {
                let base = hour % 12;
                match self.period() {
                    Period::Am => base,
                    Period::Pm => base + 12,
                }
            }
            _ => return Err(out_of_range("hour", hour)),
        };
        let next = self.value().with_hour(hour24).ok_or_else(|| out_of_range("hour", hour))?;
        Ok(self.apply(next))
    }

    /// Minute selector.
    pub fn set_minute(&mut self, minute: u32) -> Result<bool, InputError> {
        let next = self
            .value()
            .with_minute(minute)
            .ok_or_else(|| out_of_range("minute", minute))?;
        Ok(self.apply(next))
    }

    /// Second selector.
    pub fn set_second(&mut self, second: u32) -> Result<bool, InputError> {
        let next = self
            .value()
            .with_second(second)
            .ok_or_else(|| out_of_range("second", second))?;
        Ok(self.apply(next))
    }

    /// AM/PM selector.
    pub fn set_period(&mut self, period: Period) -> bool {
        if period == self.period() {
            return false;
        }
        let hour = self.value().hour();
        let hour = match period {
            Period::Am => hour - 12,
            Period::Pm => hour + 12,
        };
        match self.value().with_hour(hour) {
            Some(next) => self.apply(next),
            None => false,
        }
    }

    /// Free-text entry such as `14:30`, `14:30:15` or `2:30 PM`. On failure the validity flag
    /// is cleared and nothing is reported.
    pub fn set_text(&mut self, text: &str) -> Result<(), InputError> {
        text.clone_into(&mut self.text);
        let trimmed = text.trim();
        let parsed = TEXT_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok());
        match parsed {
            Some(time) => {
                self.text_valid = true;
                self.apply(time);
                Ok(())
            }
            None => {
                let err = InputError::InvalidTime(text.to_owned());
                log::debug!("rejected time entry: {err}");
                self.text_valid = false;
                Err(err)
            }
        }
    }

    /// Trigger pressed.
    pub fn activate_trigger(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        if self.disabled {
            return None;
        }
        self.overlay.toggle(layout)
    }

    /// Key press.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        self.overlay.handle_key(key)
    }

    /// Global pointer press.
    pub fn handle_pointer_down(
        &mut self,
        pt: Point,
        layout: &impl Measure,
    ) -> Option<OverlayEvent> {
        self.overlay.handle_pointer_down(pt, layout)
    }

    /// Viewport resize or scroll.
    pub fn handle_viewport_change(&mut self, layout: &impl Measure) -> bool {
        self.overlay.handle_viewport_change(layout)
    }

    fn apply(&mut self, next: NaiveTime) -> bool {
        if next == self.value() {
            return false;
        }
        let value = next.format(VALUE_FORMAT).to_string();
        let display = format_display(next, self.hour_cycle, self.show_seconds);
        if let Some(f) = self.on_value_change.as_mut() {
            f(&value, &display);
        }
        if self.time.set(next) {
            self.text = display;
        }
        true
    }
}

fn format_display(time: NaiveTime, cycle: HourCycle, seconds: bool) -> String {
    let fmt = match (cycle, seconds) {
        (HourCycle::H24, false) => "%H:%M",
        (HourCycle::H24, true) => "%H:%M:%S",
        (HourCycle::H12, false) => "%I:%M %p",
        (HourCycle::H12, true) => "%I:%M:%S %p",
    };
    time.format(fmt).to_string()
}

fn out_of_range(field: &'static str, value: u32) -> InputError {
    InputError::OutOfRange {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use understory_responder::listener::ListenerRegistry;

    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn picker() -> (Rc<RefCell<Vec<String>>>, TimePicker) {
        let registry = Rc::new(ListenerRegistry::new());
        let host: Rc<dyn ListenerHost> = registry;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let picker =
            TimePicker::new(host).on_value_change(move |v, _| sink.borrow_mut().push(v.to_owned()));
        (seen, picker)
    }

    #[test]
    fn each_selector_edit_emits_one_value() {
        let (seen, mut p) = picker();
        assert_eq!(p.set_hour(9), Ok(true));
        assert_eq!(p.set_minute(5), Ok(true));
        assert_eq!(p.set_second(30), Ok(true));
        assert_eq!(p.set_minute(5), Ok(false));
        assert_eq!(*seen.borrow(), ["09:00:00", "09:05:00", "09:05:30"]);
        assert_eq!(p.display(), "09:05");
    }

    #[test]
    fn twelve_hour_cycle_keeps_period() {
        let (seen, p) = picker();
        let mut p = p.with_hour_cycle(HourCycle::H12).default_value(hms(15, 0, 0));
        assert_eq!(p.display_hour(), 3);
        assert_eq!(p.period(), Period::Pm);
        p.set_hour(12).unwrap();
        assert_eq!(p.value(), hms(12, 0, 0), "12 PM is noon");
        p.set_period(Period::Am);
        assert_eq!(p.value(), hms(0, 0, 0), "12 AM is midnight");
        assert_eq!(p.display(), "12:00 AM");
        assert_eq!(*seen.borrow(), ["12:00:00", "00:00:00"]);
        assert_eq!(p.hour_options().first(), Some(&1));
        assert_eq!(p.hour_options().len(), 12);
    }

    #[test]
    fn out_of_range_selector_values_are_errors() {
        let (seen, mut p) = picker();
        assert!(matches!(p.set_hour(24), Err(InputError::OutOfRange { field: "hour", .. })));
        assert!(p.set_minute(60).is_err());
        let mut p12 = p.with_hour_cycle(HourCycle::H12);
        assert!(p12.set_hour(0).is_err());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn text_entry_accepts_common_forms() {
        let (_seen, mut p) = picker();
        p.set_text("14:30").unwrap();
        assert_eq!(p.value(), hms(14, 30, 0));
        p.set_text("14:30:15").unwrap();
        assert_eq!(p.value_string(), "14:30:15");
        p.set_text("2:05 PM").unwrap();
        assert_eq!(p.value(), hms(14, 5, 0));
        assert!(p.is_text_valid());
    }

    #[test]
    fn bad_text_clears_validity_without_reporting() {
        let (seen, mut p) = picker();
        assert_eq!(p.set_text("25:99"), Err(InputError::InvalidTime("25:99".into())));
        assert!(!p.is_text_valid());
        assert!(seen.borrow().is_empty());
        assert_eq!(p.value(), NaiveTime::MIN);
    }

    #[test]
    fn options_follow_configuration() {
        let (_seen, p) = picker();
        let p = p.with_minute_step(15).with_seconds(true);
        assert_eq!(p.minute_options(), [0, 15, 30, 45]);
        assert_eq!(p.second_options().len(), 60);
        assert_eq!(p.display(), "00:00:00");
    }
}
