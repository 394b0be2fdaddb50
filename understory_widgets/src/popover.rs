// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover: arbitrary content anchored to a trigger.

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_overlay::{
    DismissReason, Measure, OverlayConfig, OverlayController, OverlayEvent, OverlayStack,
};
use understory_placement::{Align, Placement, Side};
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::ListenerHost;

use crate::trigger::TriggerState;

/// Floating panel with host-rendered content.
///
/// The popover owns only the open state and position. Content that wants to close it (a
/// "Done" button, a form submit) calls [`Popover::close`].
#[derive(Debug)]
pub struct Popover {
    overlay: OverlayController,
    label: String,
    disabled: bool,
}

impl Popover {
    /// Create a closed popover centered below its trigger.
    pub fn new(host: Rc<dyn ListenerHost>, label: impl Into<String>) -> Self {
        let config = OverlayConfig::default()
            .with_placement(Placement::new(Side::Bottom, Align::Center).with_side_offset(4.0));
        Self {
            overlay: OverlayController::new(host).with_config(config),
            label: label.into(),
            disabled: false,
        }
    }

    /// Replace the overlay configuration.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.overlay = self.overlay.with_config(config);
        self
    }

    /// Initial open state for uncontrolled use.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        self.overlay = self.overlay.default_open(open);
        self
    }

    /// Hand the open state to the caller.
    #[must_use]
    pub fn controlled_open(mut self, open: bool) -> Self {
        self.overlay = self.overlay.controlled(open);
        self
    }

    /// Report every requested open-state change.
    #[must_use]
    pub fn on_open_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.overlay = self.overlay.on_open_change(f);
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

    /// Trigger rendering bundle.
    pub fn trigger(&self) -> TriggerState {
        TriggerState::new(self.is_open(), Some(&self.label), "", self.disabled)
    }

    /// Whether the popover is open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Whether the host should keep the content mounted.
    pub fn is_mounted(&self) -> bool {
        self.overlay.is_mounted()
    }

    /// Content origin.
    pub fn position(&self) -> Point {
        self.overlay.position()
    }

    /// Content box at the current position.
    pub fn content_rect(&self, layout: &impl Measure) -> Rect {
        self.overlay.content_rect(layout)
    }

    /// The overlay controller.
    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// Trigger pressed.
    pub fn activate_trigger(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        if self.disabled {
            return None;
        }
        self.overlay.toggle(layout)
    }

    /// Reconcile after construction with `default_open(true)`.
    pub fn reconcile(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        self.overlay.reconcile(layout)
    }

    /// Push the caller's open state.
    pub fn sync_open(&mut self, open: bool, layout: &impl Measure) -> Option<OverlayEvent> {
        self.overlay.sync_open(open, layout)
    }

    /// Close from inside the content.
    pub fn close(&mut self) -> Option<OverlayEvent> {
        self.overlay.close(DismissReason::Programmatic)
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
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use understory_overlay::{MountPolicy, StaticLayout};
    use understory_responder::listener::ListenerRegistry;

    use super::*;
    use crate::select::Select;

    #[test]
    fn select_inside_popover_keeps_popover_open() {
        let registry = Rc::new(ListenerRegistry::new());
        let host: Rc<dyn ListenerHost> = registry.clone();
        let stack = OverlayStack::new();
        let viewport = Size::new(800.0, 600.0);

        let outer = StaticLayout::new(
            Rect::new(350.0, 50.0, 450.0, 80.0),
            Size::new(300.0, 200.0),
            viewport,
        );
        let mut popover = Popover::new(host.clone(), "Filters").with_stack(stack.clone());
        popover.activate_trigger(&outer);
        assert_eq!(popover.position(), Point::new(250.0, 84.0));

        // The select's list hangs below the popover's bottom edge.
        let inner = StaticLayout::new(
            Rect::new(260.0, 250.0, 400.0, 278.0),
            Size::new(140.0, 120.0),
            viewport,
        );
        let mut select = Select::new(host, [("a", "Alpha"), ("b", "Beta")]).with_stack(stack);
        select.activate_trigger(&inner);

        let in_list = Point::new(300.0, 330.0);
        assert!(!popover.content_rect(&outer).contains(in_list));
        assert_eq!(popover.handle_pointer_down(in_list, &outer), None);
        assert_eq!(select.handle_pointer_down(in_list, &inner), None);
        select.choose(1);
        assert!(popover.is_open());

        popover.close();
        assert!(registry.is_empty());
    }

    #[test]
    fn persistent_content_survives_close() {
        let registry = Rc::new(ListenerRegistry::new());
        let host: Rc<dyn ListenerHost> = registry.clone();
        let layout = StaticLayout::new(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Size::new(50.0, 50.0),
            Size::new(100.0, 100.0),
        );
        let mut tabs = Popover::new(host, "Tabs").with_config(
            OverlayConfig::default().with_mount(MountPolicy::Persistent),
        );
        tabs.activate_trigger(&layout);
        tabs.close();
        assert!(!tabs.is_open());
        assert!(tabs.is_mounted());
    }
}
