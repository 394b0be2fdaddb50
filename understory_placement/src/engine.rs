// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position computation: anchor on a side, align on the cross axis, clamp to the viewport.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, Placement, Side};

/// Minimum gap kept between an overlay and the viewport edges, in the same units as the input
/// rects.
pub const VIEWPORT_MARGIN: f64 = 8.0;

/// Result of [`resolve_position`]: the overlay origin and the side it actually uses.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Top-left corner of the overlay in viewport coordinates.
    pub origin: Point,
    /// Side used after optional collision flipping.
    pub side: Side,
}

impl Resolved {
    /// The overlay box at the resolved origin.
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin, size)
    }
}

/// Compute the top-left corner of an overlay of size `overlay` attached to `trigger`.
///
/// The result always keeps an overlay that fits in `viewport` fully inside it.
/// See [`resolve_position`] for the side that was used.
pub fn compute_position(
    trigger: Rect,
    overlay: Size,
    viewport: Size,
    placement: &Placement,
) -> Point {
    resolve_position(trigger, overlay, viewport, placement).origin
}

/// Compute the overlay origin and report which side was used.
///
/// Steps:
/// 1. pick the side, flipping to the opposite one only when
///    [`Placement::avoid_collisions`] is set and that side fits where the preferred one does not;
/// 2. anchor on that side, offset by [`Placement::side_offset`];
/// 3. align on the cross axis per [`Placement::align`];
/// 4. clamp each axis with [`clamp_axis`] using [`VIEWPORT_MARGIN`].
pub fn resolve_position(
    trigger: Rect,
    overlay: Size,
    viewport: Size,
    placement: &Placement,
) -> Resolved {
    let trigger = trigger.abs();
    let mut side = placement.side;
    if placement.avoid_collisions
        && overflows_main_axis(trigger, overlay, viewport, side, placement.side_offset)
        && !overflows_main_axis(
            trigger,
            overlay,
            viewport,
            side.opposite(),
            placement.side_offset,
        )
    {
        side = side.opposite();
    }

    let anchored = anchor(trigger, overlay, side, placement);
    let origin = Point::new(
        clamp_axis(anchored.x, overlay.width, viewport.width, VIEWPORT_MARGIN),
        clamp_axis(anchored.y, overlay.height, viewport.height, VIEWPORT_MARGIN),
    );
    Resolved { origin, side }
}

/// Clamp a leading-edge coordinate so `[pos, pos + extent]` stays inside `[0, available]`.
///
/// The box is kept `margin` away from both edges when there is room. When the box fits but
/// not with both margins, the margin shrinks to split the slack evenly. When the box is larger
/// than `available`, the leading edge is pinned to `0`.
pub fn clamp_axis(pos: f64, extent: f64, available: f64, margin: f64) -> f64 {
    let slack = available - extent;
    if slack <= 0.0 {
        return 0.0;
    }
    let margin = margin.max(0.0).min(slack / 2.0);
    pos.max(margin).min(slack - margin)
}

fn anchor(trigger: Rect, overlay: Size, side: Side, placement: &Placement) -> Point {
    let main = match side {
        Side::Top => trigger.y0 - overlay.height - placement.side_offset,
        Side::Bottom => trigger.y1 + placement.side_offset,
        Side::Left => trigger.x0 - overlay.width - placement.side_offset,
        Side::Right => trigger.x1 + placement.side_offset,
    };
    if side.is_vertical() {
        let cross = align_cross(trigger.x0, trigger.x1, overlay.width, placement);
        Point::new(cross, main)
    } else {
        let cross = align_cross(trigger.y0, trigger.y1, overlay.height, placement);
        Point::new(main, cross)
    }
}

fn align_cross(start: f64, end: f64, extent: f64, placement: &Placement) -> f64 {
    match placement.align {
        Align::Start => start + placement.align_offset,
        Align::End => end - extent - placement.align_offset,
        Align::Center => (start + end - extent) / 2.0,
    }
}

fn overflows_main_axis(
    trigger: Rect,
    overlay: Size,
    viewport: Size,
    side: Side,
    offset: f64,
) -> bool {
    match side {
        Side::Top => trigger.y0 - offset - overlay.height < VIEWPORT_MARGIN,
        Side::Bottom => trigger.y1 + offset + overlay.height > viewport.height - VIEWPORT_MARGIN,
        Side::Left => trigger.x0 - offset - overlay.width < VIEWPORT_MARGIN,
        Side::Right => trigger.x1 + offset + overlay.width > viewport.width - VIEWPORT_MARGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);
    const TRIGGER: Rect = Rect::new(100.0, 100.0, 200.0, 140.0);
    const OVERLAY: Size = Size::new(80.0, 50.0);

    fn at(side: Side, align: Align) -> Placement {
        Placement::new(side, align).with_side_offset(4.0)
    }

    #[test]
    fn bottom_center_centers_under_trigger() {
        let p = compute_position(TRIGGER, OVERLAY, VIEWPORT, &at(Side::Bottom, Align::Center));
        assert_eq!(p, Point::new(110.0, 144.0));
    }

    #[test]
    fn top_start_applies_align_offset_inward() {
        let placement = at(Side::Top, Align::Start).with_align_offset(5.0);
        let p = compute_position(TRIGGER, OVERLAY, VIEWPORT, &placement);
        assert_eq!(p, Point::new(105.0, 46.0));
    }

    #[test]
    fn right_end_aligns_trailing_edges() {
        let p = compute_position(TRIGGER, OVERLAY, VIEWPORT, &at(Side::Right, Align::End));
        assert_eq!(p, Point::new(204.0, 90.0));
    }

    #[test]
    fn left_center_centers_vertically() {
        let p = compute_position(TRIGGER, OVERLAY, VIEWPORT, &at(Side::Left, Align::Center));
        assert_eq!(p, Point::new(16.0, 95.0));
    }

    #[test]
    fn clamps_against_trailing_viewport_edge() {
        let trigger = Rect::new(760.0, 10.0, 790.0, 30.0);
        let p = compute_position(
            trigger,
            Size::new(100.0, 40.0),
            VIEWPORT,
            &Placement::new(Side::Bottom, Align::Center),
        );
        assert_eq!(p, Point::new(692.0, 30.0));
    }

    #[test]
    fn clamps_against_leading_viewport_edge_without_flipping() {
        let trigger = Rect::new(300.0, 10.0, 340.0, 30.0);
        let r = resolve_position(
            trigger,
            OVERLAY,
            VIEWPORT,
            &Placement::new(Side::Top, Align::Center),
        );
        assert_eq!(r.side, Side::Top);
        assert_eq!(r.origin.y, VIEWPORT_MARGIN);
    }

    #[test]
    fn oversized_overlay_pins_to_origin() {
        let p = compute_position(
            TRIGGER,
            Size::new(900.0, 700.0),
            VIEWPORT,
            &Placement::default(),
        );
        assert_eq!(p, Point::ZERO);
    }

    #[test]
    fn tight_fit_shrinks_margin_evenly() {
        assert_eq!(clamp_axis(50.0, 90.0, 100.0, VIEWPORT_MARGIN), 5.0);
        assert_eq!(clamp_axis(-20.0, 90.0, 100.0, VIEWPORT_MARGIN), 5.0);
    }

    #[test]
    fn flips_when_preferred_side_overflows() {
        let trigger = Rect::new(100.0, 550.0, 200.0, 580.0);
        let placement = Placement::new(Side::Bottom, Align::Start).with_avoid_collisions(true);
        let r = resolve_position(trigger, OVERLAY, VIEWPORT, &placement);
        assert_eq!(r.side, Side::Top);
        assert_eq!(r.origin, Point::new(100.0, 500.0));
    }

    #[test]
    fn does_not_flip_when_both_sides_overflow() {
        let viewport = Size::new(400.0, 100.0);
        let trigger = Rect::new(0.0, 40.0, 10.0, 60.0);
        let placement = Placement::new(Side::Bottom, Align::Start).with_avoid_collisions(true);
        let r = resolve_position(trigger, OVERLAY, viewport, &placement);
        assert_eq!(r.side, Side::Bottom);
    }

    #[test]
    fn does_not_flip_unless_asked() {
        let trigger = Rect::new(100.0, 550.0, 200.0, 580.0);
        let r = resolve_position(
            trigger,
            OVERLAY,
            VIEWPORT,
            &Placement::new(Side::Bottom, Align::Start),
        );
        assert_eq!(r.side, Side::Bottom);
    }

    #[test]
    fn inverted_trigger_rect_is_normalized() {
        let inverted = Rect::new(200.0, 140.0, 100.0, 100.0);
        let a = compute_position(inverted, OVERLAY, VIEWPORT, &at(Side::Bottom, Align::Center));
        let b = compute_position(TRIGGER, OVERLAY, VIEWPORT, &at(Side::Bottom, Align::Center));
        assert_eq!(a, b);
    }

    // xorshift; deterministic sweep over triggers, sizes, and placements.
    struct Rng(u64);

    impl Rng {
        fn next_f64(&mut self) -> f64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            (x >> 11) as f64 / (1_u64 << 53) as f64
        }
    }

    #[test]
    fn overlay_that_fits_always_stays_inside_viewport() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        let sides = [Side::Top, Side::Right, Side::Bottom, Side::Left];
        let aligns = [Align::Start, Align::Center, Align::End];
        for i in 0..2000 {
            let viewport =
                Size::new(50.0 + rng.next_f64() * 1500.0, 50.0 + rng.next_f64() * 1000.0);
            let x = rng.next_f64() * 2000.0 - 250.0;
            let y = rng.next_f64() * 1400.0 - 200.0;
            let trigger = Rect::new(x, y, x + rng.next_f64() * 300.0, y + rng.next_f64() * 80.0);
            let overlay = Size::new(
                rng.next_f64() * viewport.width,
                rng.next_f64() * viewport.height,
            );
            let placement = Placement::new(sides[i % 4], aligns[i % 3])
                .with_side_offset(rng.next_f64() * 20.0)
                .with_align_offset(rng.next_f64() * 20.0 - 10.0)
                .with_avoid_collisions(i % 2 == 0);
            let rect = resolve_position(trigger, overlay, viewport, &placement).rect(overlay);
            assert!(
                rect.x0 >= 0.0 && rect.y0 >= 0.0,
                "leading edge escaped: {rect:?} in {viewport:?}"
            );
            assert!(
                rect.x1 <= viewport.width + 1e-9 && rect.y1 <= viewport.height + 1e-9,
                "trailing edge escaped: {rect:?} in {viewport:?}"
            );
        }
    }
}
