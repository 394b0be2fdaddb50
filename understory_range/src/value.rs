// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between track geometry and quantized values.

use kurbo::{Point, Rect};

use crate::config::{Orientation, RangeConfig};

/// Position of `pt` along the track, in `[0, 1]` from the minimum end.
///
/// Vertical tracks put the minimum at the bottom, so the fraction is inverted. A degenerate
/// track reports `0`.
pub fn fraction_along(pt: Point, track: Rect, orientation: Orientation) -> f64 {
    let t = match orientation {
        Orientation::Horizontal => ratio(pt.x - track.x0, track.width()),
        Orientation::Vertical => 1.0 - ratio(pt.y - track.y0, track.height()),
    };
    t.clamp(0.0, 1.0)
}

/// Value at fraction `t` of the track, quantized.
pub fn value_at(t: f64, config: &RangeConfig) -> f64 {
    snap(config.min + t * config.span(), config)
}

/// Fraction of the track at which `value` sits, for drawing thumbs.
pub fn fraction_of(value: f64, config: &RangeConfig) -> f64 {
    ratio(value - config.min, config.span()).clamp(0.0, 1.0)
}

/// Quantize to the step grid anchored at `min`, clamp into range, and drop float noise beyond
/// the step's own precision.
///
/// When `max` is not on the grid the largest reachable value is the last step below it.
pub fn snap(value: f64, config: &RangeConfig) -> f64 {
    let RangeConfig { min, max, step, .. } = *config;
    let value = if step > 0.0 {
        let last = (config.span() / step + GRID_EPSILON).floor().max(0.0);
        let k = ((value - min) / step).round().clamp(0.0, last);
        min + k * step
    } else {
        value.max(min).min(max)
    };
    round_to_precision(value, step)
}

/// Snap every value and sort ascending. An empty list becomes `[min]`.
pub fn normalize(values: &[f64], config: &RangeConfig) -> Vec<f64> {
    if values.is_empty() {
        return vec![config.min];
    }
    let mut out: Vec<f64> = values.iter().map(|&v| snap(v, config)).collect();
    out.sort_by(f64::total_cmp);
    out
}

/// Slack for step counts that land just under an integer, like `0.3 / 0.1`.
const GRID_EPSILON: f64 = 1e-9;

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

fn round_to_precision(value: f64, step: f64) -> f64 {
    let decimals = decimals(step);
    if decimals == 0 {
        return value;
    }
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Number of fractional digits in `step`'s shortest decimal form.
fn decimals(step: f64) -> i32 {
    let text = step.to_string();
    let digits = text.split_once('.').map_or(0, |(_, frac)| frac.len());
    i32::try_from(digits.min(15)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent() -> RangeConfig {
        RangeConfig::default().with_step(10.0)
    }

    #[test]
    fn vertical_axis_is_inverted() {
        let track = Rect::new(0.0, 0.0, 20.0, 200.0);
        assert_eq!(fraction_along(Point::new(10.0, 200.0), track, Orientation::Vertical), 0.0);
        assert_eq!(fraction_along(Point::new(10.0, 50.0), track, Orientation::Vertical), 0.75);
        assert_eq!(fraction_along(Point::new(5.0, 0.0), track, Orientation::Horizontal), 0.25);
    }

    #[test]
    fn points_beyond_the_track_clamp() {
        let track = Rect::new(100.0, 0.0, 300.0, 10.0);
        assert_eq!(fraction_along(Point::new(0.0, 5.0), track, Orientation::Horizontal), 0.0);
        assert_eq!(fraction_along(Point::new(900.0, 5.0), track, Orientation::Horizontal), 1.0);
        let flat = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(fraction_along(Point::new(3.0, 5.0), flat, Orientation::Horizontal), 0.0);
    }

    #[test]
    fn snapping_rounds_to_nearest_step() {
        let c = percent();
        assert_eq!(snap(94.0, &c), 90.0);
        assert_eq!(snap(95.0, &c), 100.0);
        assert_eq!(snap(-3.0, &c), 0.0);
        assert_eq!(snap(250.0, &c), 100.0);
        assert_eq!(value_at(0.42, &c), 40.0);
    }

    #[test]
    fn grid_is_anchored_at_min() {
        let c = RangeConfig::default().with_bounds(3.0, 23.0).with_step(5.0);
        assert_eq!(snap(9.0, &c), 8.0);
        assert_eq!(fraction_of(13.0, &c), 0.5);
    }

    #[test]
    fn off_grid_max_stays_on_the_grid() {
        let c = RangeConfig::default().with_bounds(0.0, 95.0).with_step(10.0);
        assert_eq!(value_at(1.0, &c), 90.0);
        assert_eq!(snap(95.0, &c), 90.0);
        assert_eq!(snap(1_000.0, &c), 90.0);
        assert_eq!(snap(84.0, &c), 80.0);
    }

    #[test]
    fn fractional_steps_have_no_float_noise() {
        let c = RangeConfig::default().with_bounds(0.0, 1.0).with_step(0.1);
        assert_eq!(snap(0.3, &c), 0.3);
        assert_eq!(value_at(0.7, &c), 0.7);
    }

    #[test]
    fn normalize_sorts_and_defaults() {
        let c = percent();
        assert_eq!(normalize(&[80.0, 21.0], &c), [20.0, 80.0]);
        assert_eq!(normalize(&[], &c), [0.0]);
    }
}
