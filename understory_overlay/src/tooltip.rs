// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip: hover intent plus anchored placement.

use core::time::Duration;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_placement::{Align, Placement, Side, resolve_position};
use understory_responder::hover_intent::{
    HoverIntent, HoverIntentConfig, HoverPhase, HoverTransition, TimerId,
};
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::{ListenerHost, ListenerSet, Subscriptions};

use crate::measure::Measure;

/// A tooltip attached to one trigger.
///
/// Visibility follows [`HoverIntent`]. The position is computed when the tooltip becomes visible
/// and afterwards only on viewport resize or scroll; those two listeners are held exactly while
/// the tooltip is visible.
///
/// Methods that can make the tooltip visible take the live layout so the position is computed at
/// that moment.
pub struct Tooltip {
    intent: HoverIntent,
    placement: Placement,
    host: Rc<dyn ListenerHost>,
    subscriptions: Subscriptions,
    position: Point,
    side: Side,
}

impl core::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tooltip")
            .field("intent", &self.intent)
            .field("placement", &self.placement)
            .field("position", &self.position)
            .field("side", &self.side)
            .field("listeners", &self.subscriptions.kinds())
            .finish_non_exhaustive()
    }
}

impl Tooltip {
    /// Create a hidden tooltip. Placement defaults to above the trigger.
    pub fn new(host: Rc<dyn ListenerHost>, config: HoverIntentConfig) -> Self {
        Self {
            intent: HoverIntent::new(config),
            placement: Placement::new(Side::Top, Align::Center).with_side_offset(4.0),
            host,
            subscriptions: Subscriptions::new(),
            position: Point::ZERO,
            side: Side::Top,
        }
    }

    /// Replace the placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> HoverPhase {
        self.intent.phase()
    }

    /// True while the tooltip should be on screen.
    pub fn is_visible(&self) -> bool {
        self.intent.is_visible()
    }

    /// Content origin, valid while visible.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Side used for the current position.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Content box at the current position.
    pub fn content_rect(&self, layout: &impl Measure) -> Rect {
        Rect::from_origin_size(self.position, layout.content_size())
    }

    /// Deadline the host should wake up at, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.intent.next_deadline()
    }

    /// Id of the pending timer, for hosts that schedule platform timers.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.intent.pending_timer()
    }

    /// Global listener kinds currently held.
    pub fn listeners(&self) -> ListenerSet {
        self.subscriptions.kinds()
    }

    /// Pointer entered the trigger.
    pub fn pointer_enter(
        &mut self,
        now: Duration,
        layout: &impl Measure,
    ) -> Option<HoverTransition> {
        let t = self.intent.pointer_enter(now);
        self.apply(t, layout)
    }

    /// Pointer left the trigger.
    pub fn pointer_leave(&mut self, now: Duration) -> Option<HoverTransition> {
        let t = self.intent.pointer_leave(now);
        self.apply_hide(t)
    }

    /// Trigger gained focus.
    pub fn focus(&mut self, now: Duration, layout: &impl Measure) -> Option<HoverTransition> {
        let t = self.intent.focus(now);
        self.apply(t, layout)
    }

    /// Trigger lost focus.
    pub fn blur(&mut self, now: Duration) -> Option<HoverTransition> {
        let t = self.intent.blur(now);
        self.apply_hide(t)
    }

    /// Pointer entered the tooltip content.
    pub fn content_enter(&mut self, now: Duration) -> Option<HoverTransition> {
        // Only cancels a pending hide, so it never shows.
        self.intent.content_enter(now)
    }

    /// Pointer left the tooltip content.
    pub fn content_leave(&mut self, now: Duration) -> Option<HoverTransition> {
        let t = self.intent.content_leave(now);
        self.apply_hide(t)
    }

    /// Run the pending timer if it is due.
    pub fn poll(&mut self, now: Duration, layout: &impl Measure) -> Option<HoverTransition> {
        let t = self.intent.poll(now);
        self.apply(t, layout)
    }

    /// Run timer `id`. Stale ids are ignored.
    pub fn fire(&mut self, id: TimerId, layout: &impl Measure) -> Option<HoverTransition> {
        let t = self.intent.fire(id);
        self.apply(t, layout)
    }

    /// Escape hides immediately.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        if key != Key::Escape || !self.is_visible() {
            return Outcome::Continue;
        }
        self.dismiss();
        Outcome::Consumed
    }

    /// Hide immediately, for example when the trigger is pressed.
    pub fn dismiss(&mut self) -> Option<HoverTransition> {
        let t = self.intent.dismiss();
        self.apply_hide(t)
    }

    /// Viewport resized or scrolled. Returns `true` if the tooltip was repositioned.
    pub fn handle_viewport_change(&mut self, layout: &impl Measure) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.reposition(layout);
        true
    }

    /// Cancel any pending timer, hide, and release listeners.
    pub fn dispose(&mut self) {
        self.intent.dispose();
        self.subscriptions.clear();
    }

    fn apply(
        &mut self,
        transition: Option<HoverTransition>,
        layout: &impl Measure,
    ) -> Option<HoverTransition> {
        if transition == Some(HoverTransition::Show) {
            self.subscriptions
                .subscribe_all(&self.host, ListenerSet::VIEWPORT);
            self.reposition(layout);
            log::debug!("tooltip shown at {:?}", self.position);
        }
        self.apply_hide(transition)
    }

    fn apply_hide(&mut self, transition: Option<HoverTransition>) -> Option<HoverTransition> {
        if transition == Some(HoverTransition::Hide) {
            self.subscriptions.clear();
            log::debug!("tooltip hidden");
        }
        transition
    }

    fn reposition(&mut self, layout: &impl Measure) {
        let resolved = resolve_position(
            layout.trigger_bounds(),
            layout.content_size(),
            layout.viewport(),
            &self.placement,
        );
        self.position = resolved.origin;
        self.side = resolved.side;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use understory_responder::listener::ListenerRegistry;

    use super::*;
    use crate::measure::StaticLayout;

    const LAYOUT: StaticLayout = StaticLayout::new(
        Rect::new(300.0, 200.0, 340.0, 220.0),
        Size::new(60.0, 24.0),
        Size::new(800.0, 600.0),
    );

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn tooltip() -> (Rc<ListenerRegistry>, Tooltip) {
        let registry = Rc::new(ListenerRegistry::new());
        let host: Rc<dyn ListenerHost> = registry.clone();
        let config = HoverIntentConfig::default()
            .with_delay(ms(200))
            .with_skip_delay(ms(300));
        (registry, Tooltip::new(host, config))
    }

    #[test]
    fn shows_above_trigger_and_holds_viewport_listeners() {
        let (registry, mut tip) = tooltip();
        tip.pointer_enter(ms(0), &LAYOUT);
        assert!(registry.is_empty());
        assert_eq!(tip.poll(ms(200), &LAYOUT), Some(HoverTransition::Show));
        // Centered above: x = 320 - 30, y = 200 - 4 - 24.
        assert_eq!(tip.position(), Point::new(290.0, 172.0));
        assert_eq!(registry.active(), ListenerSet::VIEWPORT);

        tip.pointer_leave(ms(250));
        assert_eq!(registry.active(), ListenerSet::VIEWPORT, "still visible");
        assert_eq!(tip.poll(ms(550), &LAYOUT), Some(HoverTransition::Hide));
        assert!(registry.is_empty());
    }

    #[test]
    fn brief_pass_never_subscribes() {
        let (registry, mut tip) = tooltip();
        tip.pointer_enter(ms(0), &LAYOUT);
        tip.pointer_leave(ms(100));
        assert_eq!(tip.poll(ms(1_000), &LAYOUT), None);
        assert!(!tip.is_visible());
        assert!(registry.is_empty());
    }

    #[test]
    fn position_is_fixed_until_viewport_changes() {
        let (_registry, mut tip) = tooltip();
        tip.focus(ms(0), &LAYOUT);
        tip.poll(ms(200), &LAYOUT);
        let shown_at = tip.position();

        let moved = StaticLayout {
            trigger: Rect::new(100.0, 100.0, 140.0, 120.0),
            ..LAYOUT
        };
        // Re-entering does not recompute.
        tip.pointer_enter(ms(210), &moved);
        assert_eq!(tip.position(), shown_at);
        assert!(tip.handle_viewport_change(&moved));
        assert_eq!(tip.position(), Point::new(90.0, 72.0));
    }

    #[test]
    fn escape_hides_and_releases() {
        let (registry, mut tip) = tooltip();
        assert_eq!(tip.handle_key(Key::Escape), Outcome::Continue);
        tip.pointer_enter(ms(0), &LAYOUT);
        let id = tip.pending_timer().unwrap();
        assert_eq!(tip.fire(id, &LAYOUT), Some(HoverTransition::Show));
        assert_eq!(tip.handle_key(Key::Escape), Outcome::Consumed);
        assert!(!tip.is_visible());
        assert!(registry.is_empty());
    }

    #[test]
    fn dispose_releases_and_late_fire_is_ignored() {
        let (registry, mut tip) = tooltip();
        tip.pointer_enter(ms(0), &LAYOUT);
        tip.poll(ms(200), &LAYOUT);
        tip.pointer_leave(ms(210));
        let id = tip.pending_timer().unwrap();
        tip.dispose();
        assert!(registry.is_empty());
        assert_eq!(tip.fire(id, &LAYOUT), None);
        assert!(registry.is_empty());
    }
}
