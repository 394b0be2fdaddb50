// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_widgets::{OptionItem, filter_options};

const WORDS: [&str; 8] = [
    "Marketing", "Design", "Markup", "Support", "Finance", "Legal", "Platform", "Research",
];

fn gen_options(n: usize) -> Vec<OptionItem> {
    (0..n)
        .map(|i| {
            let word = WORDS[i % WORDS.len()];
            OptionItem::new(format!("opt{i}"), format!("{word} {i}"))
                .with_description(format!("Team {} in {word}", i / WORDS.len()))
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_options");
    for n in [100_usize, 1_000, 10_000] {
        let items = gen_options(n);
        group.bench_function(format!("label_mar_n{n}"), |b| {
            b.iter(|| black_box(filter_options(&items, black_box("mar"), false)));
        });
        group.bench_function(format!("description_team_n{n}"), |b| {
            b.iter(|| black_box(filter_options(&items, black_box("team 1"), true)));
        });
        group.bench_function(format!("empty_query_n{n}"), |b| {
            b.iter_batched(
                || items.clone(),
                |items| black_box(filter_options(&items, "", false).len()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
