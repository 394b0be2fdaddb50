// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/closed lifecycle of one anchored overlay.

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_placement::{Placement, Side, resolve_position};
use understory_responder::controllable::Controllable;
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::{ListenerHost, ListenerSet, Subscriptions};

use crate::measure::Measure;
use crate::stack::{LayerId, OverlayStack};

/// Whether overlay content stays mounted while closed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MountPolicy {
    /// Content exists only while open; its state resets on every close.
    #[default]
    OnOpen,
    /// Content is always mounted and keeps its state while hidden.
    Persistent,
}

/// Why an overlay closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// The trigger was activated while open.
    Trigger,
    /// A pointer press landed outside the trigger and the content.
    OutsidePointer,
    /// Escape was pressed.
    Escape,
    /// Code asked for it.
    Programmatic,
    /// An item inside the content reported a selection.
    ItemSelected,
}

/// A lifecycle transition that took effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverlayEvent {
    /// Entered the open state: listeners are live and the position is computed.
    Opened,
    /// Entered the closed state: every listener was released.
    Closed(DismissReason),
}

/// Snapshot of an overlay's observable state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayState {
    /// Whether the overlay is open.
    pub open: bool,
    /// Top-left corner of the content, valid while open.
    pub position: Point,
}

/// Overlay behavior configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Where the content attaches to the trigger.
    pub placement: Placement,
    /// Whether content stays mounted while closed.
    pub mount: MountPolicy,
    /// Close on Escape.
    pub dismiss_on_escape: bool,
    /// Close on a pointer press outside the trigger and the content.
    pub dismiss_on_outside_pointer: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            mount: MountPolicy::OnOpen,
            dismiss_on_escape: true,
            dismiss_on_outside_pointer: true,
        }
    }
}

impl OverlayConfig {
    /// Set the placement.
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the mount policy.
    #[must_use]
    pub const fn with_mount(mut self, mount: MountPolicy) -> Self {
        self.mount = mount;
        self
    }

    /// Enable or disable Escape dismissal.
    #[must_use]
    pub const fn with_dismiss_on_escape(mut self, enabled: bool) -> Self {
        self.dismiss_on_escape = enabled;
        self
    }

    /// Enable or disable outside-pointer dismissal.
    #[must_use]
    pub const fn with_dismiss_on_outside_pointer(mut self, enabled: bool) -> Self {
        self.dismiss_on_outside_pointer = enabled;
        self
    }

    /// Global listeners an open overlay with this configuration holds.
    pub fn listeners(&self) -> ListenerSet {
        let mut set = ListenerSet::VIEWPORT;
        set.set(ListenerSet::POINTER_DOWN, self.dismiss_on_outside_pointer);
        set.set(ListenerSet::KEY_DOWN, self.dismiss_on_escape);
        set
    }
}

/// Open/closed state machine for one overlay.
///
/// ## Lifecycle
///
/// - Entering open subscribes to viewport resize and scroll, plus pointer-down and key-down when
///   the matching dismissal is enabled, and computes the position.
/// - Entering closed releases every subscription. Dropping the controller while open does too.
///
/// ## Controlled mode
///
/// With [`OverlayController::controlled`], requests are only reported through
/// [`OverlayController::on_open_change`]; they take effect when the caller pushes the new value
/// with [`OverlayController::sync_open`]. Methods return the [`OverlayEvent`] that actually took
/// effect, so in controlled mode they return `None` until the caller syncs.
///
/// ## Host wiring
///
/// The host forwards the events named by [`OverlayController::listeners`]:
/// resize and scroll to [`OverlayController::handle_viewport_change`], pointer presses to
/// [`OverlayController::handle_pointer_down`] and key presses to
/// [`OverlayController::handle_key`]. Trigger activation goes to [`OverlayController::toggle`].
pub struct OverlayController {
    open: Controllable<bool>,
    config: OverlayConfig,
    host: Rc<dyn ListenerHost>,
    subscriptions: Subscriptions,
    active: bool,
    position: Point,
    side: Side,
    stack: Option<OverlayStack>,
    layer: Option<LayerId>,
    requested: Option<DismissReason>,
    last_dismiss: Option<DismissReason>,
}

impl core::fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayController")
            .field("open", &self.open)
            .field("config", &self.config)
            .field("active", &self.active)
            .field("position", &self.position)
            .field("side", &self.side)
            .field("layer", &self.layer)
            .field("listeners", &self.subscriptions.kinds())
            .finish_non_exhaustive()
    }
}

impl OverlayController {
    /// Create a closed, uncontrolled overlay with default configuration.
    pub fn new(host: Rc<dyn ListenerHost>) -> Self {
        Self {
            open: Controllable::uncontrolled(false),
            config: OverlayConfig::default(),
            host,
            subscriptions: Subscriptions::new(),
            active: false,
            position: Point::ZERO,
            side: Side::default(),
            stack: None,
            layer: None,
            requested: None,
            last_dismiss: None,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial open state for uncontrolled use. Call [`OverlayController::reconcile`] once
    /// layout is available to establish the open-state effects.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        self.open.sync(open);
        self
    }

    /// Hand the open state to the caller, starting at `open`.
    #[must_use]
    pub fn controlled(mut self, open: bool) -> Self {
        self.open.set_controlled(open);
        self
    }

    /// Report every requested open-state change.
    #[must_use]
    pub fn on_open_change(mut self, mut f: impl FnMut(bool) + 'static) -> Self {
        self.open.set_on_change(Some(Box::new(move |v: &bool| f(*v))));
        self
    }

    /// Participate in a shared stacking order.
    #[must_use]
    pub fn with_stack(mut self, stack: OverlayStack) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Change the placement. Takes effect on the next reposition.
    pub fn set_placement(&mut self, placement: Placement) {
        self.config.placement = placement;
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        *self.open.get()
    }

    /// Whether the caller owns the open state.
    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    /// Whether content should be mounted right now.
    pub fn is_mounted(&self) -> bool {
        match self.config.mount {
            MountPolicy::Persistent => true,
            MountPolicy::OnOpen => self.is_open(),
        }
    }

    /// Content origin from the last reposition.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Side used by the last reposition.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Open flag and position.
    pub fn state(&self) -> OverlayState {
        OverlayState {
            open: self.is_open(),
            position: self.position,
        }
    }

    /// Content box at the current position, sized from the live layout.
    pub fn content_rect(&self, layout: &impl Measure) -> Rect {
        Rect::from_origin_size(self.position, layout.content_size())
    }

    /// Global listener kinds currently held.
    pub fn listeners(&self) -> ListenerSet {
        self.subscriptions.kinds()
    }

    /// Stack layer while open, if participating in a stack.
    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    /// Paint order while open, if participating in a stack.
    pub fn z_index(&self) -> Option<i32> {
        let stack = self.stack.as_ref()?;
        stack.z_index(self.layer?)
    }

    /// Reason for the most recent close.
    pub fn last_dismiss(&self) -> Option<DismissReason> {
        self.last_dismiss
    }

    /// Request the open state.
    pub fn open(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        let layout: &dyn Measure = layout;
        self.request(true, DismissReason::Programmatic, Some(layout))
    }

    /// Request the closed state.
    pub fn close(&mut self, reason: DismissReason) -> Option<OverlayEvent> {
        self.request(false, reason, None)
    }

    /// Trigger activation: open when closed, close when open.
    pub fn toggle(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        let layout: &dyn Measure = layout;
        let next = !self.is_open();
        self.request(next, DismissReason::Trigger, Some(layout))
    }

    /// An item inside the content reported a selection.
    pub fn select_item(&mut self) -> Option<OverlayEvent> {
        self.close(DismissReason::ItemSelected)
    }

    /// Push the caller's open state (controlled mode), or set it directly (uncontrolled).
    pub fn sync_open(&mut self, open: bool, layout: &impl Measure) -> Option<OverlayEvent> {
        if open {
            self.requested = None;
        }
        let was_open = self.is_open();
        self.open.sync(open);
        let layout: &dyn Measure = layout;
        self.settle(was_open, Some(layout))
    }

    /// Bring listeners and position in line with the current open state.
    pub fn reconcile(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        let layout: &dyn Measure = layout;
        self.apply_effects(Some(layout))
    }

    /// Viewport resized or scrolled. Returns `true` if the overlay was repositioned.
    pub fn handle_viewport_change(&mut self, layout: &impl Measure) -> bool {
        if !self.active {
            return false;
        }
        self.reposition(layout);
        true
    }

    /// Recompute the position from the live layout.
    pub fn reposition(&mut self, layout: &impl Measure) {
        let layout: &dyn Measure = layout;
        self.reposition_dyn(layout);
    }

    /// Global pointer press. Closes when it lands outside the trigger, the content, and any
    /// overlay stacked above this one.
    pub fn handle_pointer_down(
        &mut self,
        pt: Point,
        layout: &impl Measure,
    ) -> Option<OverlayEvent> {
        if !self.is_open() || !self.config.dismiss_on_outside_pointer {
            return None;
        }
        if layout.trigger_bounds().abs().contains(pt) || self.content_rect(layout).contains(pt) {
            return None;
        }
        if let (Some(stack), Some(layer)) = (&self.stack, self.layer)
            && stack.covered_above(layer, pt)
        {
            return None;
        }
        self.close(DismissReason::OutsidePointer)
    }

    /// Global key press. Escape closes the overlay if it is open and topmost.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        if key != Key::Escape || !self.is_open() || !self.config.dismiss_on_escape {
            return Outcome::Continue;
        }
        if let (Some(stack), Some(layer)) = (&self.stack, self.layer)
            && !stack.is_topmost(layer)
        {
            return Outcome::Continue;
        }
        self.close(DismissReason::Escape);
        Outcome::Consumed
    }

    fn request(
        &mut self,
        next: bool,
        reason: DismissReason,
        layout: Option<&dyn Measure>,
    ) -> Option<OverlayEvent> {
        if next == self.is_open() {
            return None;
        }
        if next {
            log::debug!("overlay open requested");
        } else {
            log::debug!("overlay close requested: {reason:?}");
            self.requested = Some(reason);
        }
        let was_open = self.is_open();
        self.open.set(next);
        self.settle(was_open, layout)
    }

    /// Apply effects after the held state may have changed. An overlay that was open but never
    /// reconciled has nothing to release and still reports its close.
    fn settle(&mut self, was_open: bool, layout: Option<&dyn Measure>) -> Option<OverlayEvent> {
        let event = self.apply_effects(layout);
        if event.is_none() && was_open && !self.is_open() {
            let reason = self.requested.take().unwrap_or(DismissReason::Programmatic);
            self.last_dismiss = Some(reason);
            return Some(OverlayEvent::Closed(reason));
        }
        event
    }

    fn apply_effects(&mut self, layout: Option<&dyn Measure>) -> Option<OverlayEvent> {
        let open = self.is_open();
        if open == self.active {
            return None;
        }
        if open {
            let layout = layout?;
            self.active = true;
            self.subscriptions
                .subscribe_all(&self.host, self.config.listeners());
            self.reposition_dyn(layout);
            Some(OverlayEvent::Opened)
        } else {
            self.active = false;
            self.subscriptions.clear();
            if let (Some(stack), Some(layer)) = (&self.stack, self.layer.take()) {
                stack.remove(layer);
            }
            let reason = self.requested.take().unwrap_or(DismissReason::Programmatic);
            self.last_dismiss = Some(reason);
            Some(OverlayEvent::Closed(reason))
        }
    }

    fn reposition_dyn(&mut self, layout: &dyn Measure) {
        let size = layout.content_size();
        let resolved = resolve_position(
            layout.trigger_bounds(),
            size,
            layout.viewport(),
            &self.config.placement,
        );
        self.position = resolved.origin;
        self.side = resolved.side;
        let bounds = resolved.rect(size);
        match (&self.stack, self.layer) {
            (Some(stack), Some(layer)) => stack.set_bounds(layer, bounds),
            (Some(stack), None) if self.active => self.layer = Some(stack.push(bounds)),
            _ => {}
        }
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        if let (Some(stack), Some(layer)) = (&self.stack, self.layer.take()) {
            stack.remove(layer);
        }
        // Subscriptions release themselves when the field drops.
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use kurbo::Size;
    use understory_placement::Align;
    use understory_responder::listener::{ListenerKind, ListenerRegistry};

    use super::*;
    use crate::measure::StaticLayout;

    const LAYOUT: StaticLayout = StaticLayout::new(
        Rect::new(100.0, 100.0, 200.0, 130.0),
        Size::new(150.0, 80.0),
        Size::new(800.0, 600.0),
    );

    fn host() -> (Rc<ListenerRegistry>, Rc<dyn ListenerHost>) {
        let registry = Rc::new(ListenerRegistry::new());
        let host: Rc<dyn ListenerHost> = registry.clone();
        (registry, host)
    }

    fn config() -> OverlayConfig {
        OverlayConfig::default()
            .with_placement(Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0))
    }

    #[test]
    fn open_then_close_leaves_no_listeners() {
        let (registry, host) = host();
        let mut overlay = OverlayController::new(host).with_config(config());
        assert_eq!(overlay.toggle(&LAYOUT), Some(OverlayEvent::Opened));
        assert_eq!(registry.active(), ListenerSet::OVERLAY);
        assert_eq!(overlay.position(), Point::new(100.0, 134.0));
        assert_eq!(
            overlay.toggle(&LAYOUT),
            Some(OverlayEvent::Closed(DismissReason::Trigger))
        );
        assert!(registry.is_empty());
        assert!(overlay.listeners().is_empty());
    }

    #[test]
    fn outside_press_dismisses_inside_press_does_not() {
        let (registry, host) = host();
        let mut overlay = OverlayController::new(host).with_config(config());
        overlay.open(&LAYOUT);
        assert_eq!(overlay.handle_pointer_down(Point::new(150.0, 115.0), &LAYOUT), None);
        assert_eq!(overlay.handle_pointer_down(Point::new(120.0, 200.0), &LAYOUT), None);
        assert!(overlay.is_open());
        assert_eq!(
            overlay.handle_pointer_down(Point::new(700.0, 500.0), &LAYOUT),
            Some(OverlayEvent::Closed(DismissReason::OutsidePointer))
        );
        assert_eq!(overlay.last_dismiss(), Some(DismissReason::OutsidePointer));
        assert!(registry.is_empty());
    }

    #[test]
    fn escape_closes_and_is_consumed() {
        let (registry, host) = host();
        let mut overlay = OverlayController::new(host);
        assert_eq!(overlay.handle_key(Key::Escape), Outcome::Continue);
        overlay.open(&LAYOUT);
        assert_eq!(overlay.handle_key(Key::Enter), Outcome::Continue);
        assert_eq!(overlay.handle_key(Key::Escape), Outcome::Consumed);
        assert!(!overlay.is_open());
        assert!(registry.is_empty());
    }

    #[test]
    fn viewport_change_repositions_only_while_open() {
        let (_registry, host) = host();
        let mut overlay = OverlayController::new(host).with_config(config());
        assert!(!overlay.handle_viewport_change(&LAYOUT));
        overlay.open(&LAYOUT);
        let scrolled = StaticLayout {
            trigger: LAYOUT.trigger - kurbo::Vec2::new(0.0, 60.0),
            ..LAYOUT
        };
        assert!(overlay.handle_viewport_change(&scrolled));
        assert_eq!(overlay.position(), Point::new(100.0, 74.0));
    }

    #[test]
    fn controlled_reports_and_waits_for_sync() {
        let (registry, host) = host();
        let requests = Rc::new(RefCell::new(Vec::new()));
        let sink = requests.clone();
        let mut overlay = OverlayController::new(host)
            .controlled(false)
            .on_open_change(move |open| sink.borrow_mut().push(open));

        assert_eq!(overlay.toggle(&LAYOUT), None);
        assert_eq!(*requests.borrow(), [true]);
        assert!(!overlay.is_open());
        assert!(registry.is_empty());

        assert_eq!(overlay.sync_open(true, &LAYOUT), Some(OverlayEvent::Opened));
        assert_eq!(registry.active(), ListenerSet::OVERLAY);

        assert_eq!(overlay.handle_key(Key::Escape), Outcome::Consumed);
        assert_eq!(*requests.borrow(), [true, false]);
        assert!(overlay.is_open(), "caller has not accepted the close yet");
        assert_eq!(
            overlay.sync_open(false, &LAYOUT),
            Some(OverlayEvent::Closed(DismissReason::Escape))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn controlled_and_uncontrolled_report_the_same_sequence() {
        fn drive(controlled: bool) -> (Vec<bool>, Vec<Option<OverlayEvent>>) {
            let (_registry, host) = host();
            let reported = Rc::new(RefCell::new(Vec::new()));
            let sink = reported.clone();
            let mut overlay = OverlayController::new(host)
                .on_open_change(move |open| sink.borrow_mut().push(open));
            if controlled {
                overlay = overlay.controlled(false);
            }
            let mut events = Vec::new();
            let mut step = |overlay: &mut OverlayController, ev: Option<OverlayEvent>| {
                // A controlled caller accepts every request immediately.
                let ev = if controlled {
                    let wanted = *reported.borrow().last().unwrap_or(&false);
                    overlay.sync_open(wanted, &LAYOUT)
                } else {
                    ev
                };
                events.push(ev);
            };
            let ev = overlay.toggle(&LAYOUT);
            step(&mut overlay, ev);
            let ev = overlay.handle_pointer_down(Point::new(790.0, 590.0), &LAYOUT);
            step(&mut overlay, ev);
            let ev = overlay.open(&LAYOUT);
            step(&mut overlay, ev);
            let ev = overlay.select_item();
            step(&mut overlay, ev);
            let log = reported.borrow().clone();
            (log, events)
        }
        assert_eq!(drive(false), drive(true));
    }

    #[test]
    fn dropping_open_controller_releases_listeners() {
        let (registry, host) = host();
        let stack = OverlayStack::new();
        {
            let mut overlay = OverlayController::new(host).with_stack(stack.clone());
            overlay.open(&LAYOUT);
            assert!(!registry.is_empty());
            assert_eq!(stack.len(), 1);
        }
        assert!(registry.is_empty());
        assert!(stack.is_empty());
    }

    #[test]
    fn persistent_content_stays_mounted() {
        let (_registry, host) = host();
        let mut overlay = OverlayController::new(host)
            .with_config(OverlayConfig::default().with_mount(MountPolicy::Persistent));
        assert!(overlay.is_mounted());
        overlay.open(&LAYOUT);
        overlay.close(DismissReason::Programmatic);
        assert!(overlay.is_mounted());

        let (_registry, host) = self::host();
        let mut lazy = OverlayController::new(host);
        assert!(!lazy.is_mounted());
        lazy.open(&LAYOUT);
        assert!(lazy.is_mounted());
    }

    #[test]
    fn disabled_dismissals_hold_fewer_listeners() {
        let (registry, host) = host();
        let mut overlay = OverlayController::new(host).with_config(
            OverlayConfig::default()
                .with_dismiss_on_escape(false)
                .with_dismiss_on_outside_pointer(false),
        );
        overlay.open(&LAYOUT);
        assert_eq!(registry.active(), ListenerSet::VIEWPORT);
        assert_eq!(registry.count(ListenerKind::PointerDown), 0);
        assert_eq!(overlay.handle_pointer_down(Point::new(790.0, 590.0), &LAYOUT), None);
        assert_eq!(overlay.handle_key(Key::Escape), Outcome::Continue);
        assert!(overlay.is_open());
    }

    #[test]
    fn default_open_needs_reconcile_for_effects() {
        let (registry, host) = host();
        let mut overlay = OverlayController::new(host).default_open(true);
        assert!(overlay.is_open());
        assert!(registry.is_empty());
        assert_eq!(overlay.reconcile(&LAYOUT), Some(OverlayEvent::Opened));
        assert_eq!(overlay.reconcile(&LAYOUT), None);
        assert!(!registry.is_empty());
    }

    #[test]
    fn closing_an_unreconciled_default_open_still_reports() {
        let (registry, host) = host();
        let mut overlay = OverlayController::new(host).default_open(true);
        assert_eq!(
            overlay.close(DismissReason::Programmatic),
            Some(OverlayEvent::Closed(DismissReason::Programmatic))
        );
        assert!(!overlay.is_open());
        assert_eq!(overlay.last_dismiss(), Some(DismissReason::Programmatic));
        assert!(registry.is_empty());

        let (_registry, host) = self::host();
        let mut overlay = OverlayController::new(host).default_open(true);
        assert_eq!(
            overlay.handle_pointer_down(Point::new(790.0, 590.0), &LAYOUT),
            Some(OverlayEvent::Closed(DismissReason::OutsidePointer))
        );
        assert_eq!(overlay.last_dismiss(), Some(DismissReason::OutsidePointer));
    }

    #[test]
    fn nested_overlay_press_and_escape_affect_only_the_top() {
        let (registry, host) = host();
        let stack = OverlayStack::new();
        let mut popover = OverlayController::new(host.clone())
            .with_config(config())
            .with_stack(stack.clone());
        popover.open(&LAYOUT);

        // A select inside the popover content, opening to the right of it.
        let inner = StaticLayout::new(
            Rect::new(110.0, 150.0, 240.0, 170.0),
            Size::new(120.0, 100.0),
            LAYOUT.viewport,
        );
        let mut select = OverlayController::new(host)
            .with_config(
                OverlayConfig::default().with_placement(Placement::new(Side::Right, Align::Start)),
            )
            .with_stack(stack.clone());
        select.open(&inner);
        assert!(select.z_index() > popover.z_index());

        // Press inside the select content, which lies outside the popover box.
        let pt = Point::new(300.0, 240.0);
        assert!(!popover.content_rect(&LAYOUT).contains(pt));
        assert_eq!(popover.handle_pointer_down(pt, &LAYOUT), None);
        assert_eq!(select.handle_pointer_down(pt, &inner), None);
        assert!(popover.is_open());

        // Escape closes only the select.
        assert_eq!(popover.handle_key(Key::Escape), Outcome::Continue);
        assert_eq!(select.handle_key(Key::Escape), Outcome::Consumed);
        assert!(popover.is_open());
        assert_eq!(popover.handle_key(Key::Escape), Outcome::Consumed);
        assert!(registry.is_empty());
        assert!(stack.is_empty());
    }
}
