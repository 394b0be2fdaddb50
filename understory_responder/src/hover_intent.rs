// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent: delayed show and hide for tooltips.
//!
//! ## Phases
//!
//! ```text
//! Hidden --enter/focus--> PendingShow --delay elapses--> Shown
//! Shown --leave/blur--> PendingHide --skip delay elapses--> Hidden
//! PendingShow --leave/blur--> Hidden
//! PendingHide --enter--> Shown              (show delay is not re-run)
//! PendingHide --content enter--> Shown      (unless hoverable content is disabled)
//! ```
//!
//! ## Timers
//!
//! The machine never sleeps. It holds at most one pending timer as a `(TimerId, deadline)` pair.
//! Timestamps are [`Duration`]s on any monotonic clock the host picks (for example time since
//! app start). The host either calls [`HoverIntent::poll`] with the current time whenever it
//! wakes, or schedules a platform timer for [`HoverIntent::next_deadline`] and calls
//! [`HoverIntent::fire`] with the id it was given. A fired id that no longer matches the pending
//! timer is ignored, so a late callback after a cancel or [`HoverIntent::dispose`] is harmless.
//!
//! ```
//! use core::time::Duration;
//! use understory_responder::hover_intent::{
//!     HoverIntent, HoverIntentConfig, HoverPhase, HoverTransition,
//! };
//!
//! let ms = Duration::from_millis;
//! let mut tip = HoverIntent::new(HoverIntentConfig::default().with_delay(ms(200)));
//! tip.pointer_enter(ms(0));
//! assert_eq!(tip.phase(), HoverPhase::PendingShow);
//! assert_eq!(tip.poll(ms(150)), None);
//! assert_eq!(tip.poll(ms(200)), Some(HoverTransition::Show));
//! ```

use core::time::Duration;

/// Phase of a [`HoverIntent`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverPhase {
    /// Not visible, nothing pending.
    #[default]
    Hidden,
    /// Waiting for the show delay.
    PendingShow,
    /// Visible, nothing pending.
    Shown,
    /// Visible, waiting for the hide delay.
    PendingHide,
}

impl HoverPhase {
    /// True while the tooltip should be on screen.
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Shown | Self::PendingHide)
    }
}

/// Visibility change produced by an input or a timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverTransition {
    /// Became visible.
    Show,
    /// Became hidden.
    Hide,
}

/// Handle of the pending timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Hover intent timing configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoverIntentConfig {
    /// Time from enter to show.
    pub delay_duration: Duration,
    /// Time from leave to hide; re-entering within it keeps the tooltip up.
    pub skip_delay_duration: Duration,
    /// When set, pointer entry into the tooltip content does not cancel a pending hide.
    pub disable_hoverable_content: bool,
}

impl Default for HoverIntentConfig {
    fn default() -> Self {
        Self {
            delay_duration: Duration::from_millis(700),
            skip_delay_duration: Duration::from_millis(300),
            disable_hoverable_content: false,
        }
    }
}

impl HoverIntentConfig {
    /// Set the show delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_duration = delay;
        self
    }

    /// Set the hide delay.
    #[must_use]
    pub const fn with_skip_delay(mut self, delay: Duration) -> Self {
        self.skip_delay_duration = delay;
        self
    }

    /// Enable or disable hoverable content.
    #[must_use]
    pub const fn with_disable_hoverable_content(mut self, disable: bool) -> Self {
        self.disable_hoverable_content = disable;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PendingTimer {
    id: TimerId,
    deadline: Duration,
}

/// Delay-based show/hide state machine.
#[derive(Clone, Debug, Default)]
pub struct HoverIntent {
    config: HoverIntentConfig,
    phase: HoverPhase,
    timer: Option<PendingTimer>,
    next_id: u64,
}

impl HoverIntent {
    /// Create a hidden machine.
    pub fn new(config: HoverIntentConfig) -> Self {
        Self {
            config,
            phase: HoverPhase::Hidden,
            timer: None,
            next_id: 0,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &HoverIntentConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    /// True while the tooltip should be on screen.
    pub fn is_visible(&self) -> bool {
        self.phase.is_visible()
    }

    /// Deadline of the pending timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.map(|t| t.deadline)
    }

    /// Id of the pending timer, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer.map(|t| t.id)
    }

    /// Pointer entered the trigger.
    pub fn pointer_enter(&mut self, now: Duration) -> Option<HoverTransition> {
        match self.phase {
            HoverPhase::Hidden => {
                if self.config.delay_duration.is_zero() {
                    self.enter_phase(HoverPhase::Shown);
                    return Some(HoverTransition::Show);
                }
                self.schedule(now + self.config.delay_duration);
                self.enter_phase(HoverPhase::PendingShow);
                None
            }
            HoverPhase::PendingHide => {
                self.cancel();
                self.enter_phase(HoverPhase::Shown);
                None
            }
            HoverPhase::PendingShow | HoverPhase::Shown => None,
        }
    }

    /// Pointer left the trigger.
    pub fn pointer_leave(&mut self, now: Duration) -> Option<HoverTransition> {
        match self.phase {
            HoverPhase::PendingShow => {
                self.cancel();
                self.enter_phase(HoverPhase::Hidden);
                None
            }
            HoverPhase::Shown => {
                if self.config.skip_delay_duration.is_zero() {
                    self.enter_phase(HoverPhase::Hidden);
                    return Some(HoverTransition::Hide);
                }
                self.schedule(now + self.config.skip_delay_duration);
                self.enter_phase(HoverPhase::PendingHide);
                None
            }
            HoverPhase::Hidden | HoverPhase::PendingHide => None,
        }
    }

    /// Trigger gained keyboard focus. Same as [`HoverIntent::pointer_enter`].
    pub fn focus(&mut self, now: Duration) -> Option<HoverTransition> {
        self.pointer_enter(now)
    }

    /// Trigger lost keyboard focus. Same as [`HoverIntent::pointer_leave`].
    pub fn blur(&mut self, now: Duration) -> Option<HoverTransition> {
        self.pointer_leave(now)
    }

    /// Pointer entered the tooltip content.
    pub fn content_enter(&mut self, now: Duration) -> Option<HoverTransition> {
        if self.config.disable_hoverable_content || self.phase != HoverPhase::PendingHide {
            return None;
        }
        self.pointer_enter(now)
    }

    /// Pointer left the tooltip content.
    pub fn content_leave(&mut self, now: Duration) -> Option<HoverTransition> {
        if self.config.disable_hoverable_content {
            return None;
        }
        self.pointer_leave(now)
    }

    /// Process the pending timer if its deadline is at or before `now`.
    pub fn poll(&mut self, now: Duration) -> Option<HoverTransition> {
        let timer = self.timer?;
        if timer.deadline > now {
            return None;
        }
        self.expire()
    }

    /// Process the timer `id`. Ignored unless `id` is the pending timer.
    pub fn fire(&mut self, id: TimerId) -> Option<HoverTransition> {
        if self.pending_timer() != Some(id) {
            log::trace!("ignoring stale hover timer {id:?}");
            return None;
        }
        self.expire()
    }

    /// Hide immediately, for example on Escape or a press on the trigger.
    pub fn dismiss(&mut self) -> Option<HoverTransition> {
        let was_visible = self.is_visible();
        self.cancel();
        self.enter_phase(HoverPhase::Hidden);
        was_visible.then_some(HoverTransition::Hide)
    }

    /// Drop any pending timer and return to hidden. Call when the owner goes away.
    pub fn dispose(&mut self) {
        self.cancel();
        self.phase = HoverPhase::Hidden;
    }

    fn expire(&mut self) -> Option<HoverTransition> {
        self.timer = None;
        match self.phase {
            HoverPhase::PendingShow => {
                self.enter_phase(HoverPhase::Shown);
                Some(HoverTransition::Show)
            }
            HoverPhase::PendingHide => {
                self.enter_phase(HoverPhase::Hidden);
                Some(HoverTransition::Hide)
            }
            HoverPhase::Hidden | HoverPhase::Shown => None,
        }
    }

    fn schedule(&mut self, deadline: Duration) {
        self.next_id += 1;
        self.timer = Some(PendingTimer {
            id: TimerId(self.next_id),
            deadline,
        });
    }

    fn cancel(&mut self) {
        self.timer = None;
    }

    fn enter_phase(&mut self, phase: HoverPhase) {
        if self.phase != phase {
            log::trace!("hover intent {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
