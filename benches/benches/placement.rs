// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_placement::{Align, Placement, Side, compute_position};
use understory_range::RangeConfig;
use understory_range::value::{fraction_along, value_at};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // xorshift64*
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        let v = self.0.wrapping_mul(0x2545_f491_4f6c_dd1d);
        (v >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn gen_triggers(n: usize, viewport: Size) -> Vec<Rect> {
    let mut rng = Rng::new(0x5eed);
    (0..n)
        .map(|_| {
            let x = rng.next_f64() * viewport.width;
            let y = rng.next_f64() * viewport.height;
            Rect::new(x, y, x + 40.0 + rng.next_f64() * 120.0, y + 24.0)
        })
        .collect()
}

fn bench_compute_position(c: &mut Criterion) {
    let viewport = Size::new(1280.0, 800.0);
    let overlay = Size::new(240.0, 320.0);
    let triggers = gen_triggers(1_000, viewport);
    let mut group = c.benchmark_group("compute_position");
    for (name, placement) in [
        ("bottom_start", Placement::new(Side::Bottom, Align::Start)),
        ("right_center", Placement::new(Side::Right, Align::Center)),
        (
            "bottom_center_avoid",
            Placement::new(Side::Bottom, Align::Center).with_avoid_collisions(true),
        ),
    ] {
        group.bench_function(format!("{name}_n1000"), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for &trigger in &triggers {
                    let p = compute_position(trigger, overlay, viewport, black_box(&placement));
                    acc += p.x + p.y;
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn bench_slider_projection(c: &mut Criterion) {
    let track = Rect::new(0.0, 0.0, 400.0, 16.0);
    let config = RangeConfig::default().with_step(0.5);
    let mut rng = Rng::new(7);
    let points: Vec<Point> = (0..1_000)
        .map(|_| Point::new(rng.next_f64() * 440.0 - 20.0, 8.0))
        .collect();
    c.bench_function("slider_project_n1000", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &pt in &points {
                acc += value_at(fraction_along(pt, track, config.orientation), &config);
            }
            black_box(acc)
        });
    });
}

criterion_group!(benches, bench_compute_position, bench_slider_projection);
criterion_main!(benches);
