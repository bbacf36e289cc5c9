// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_table_window::{
    OffsetTable, Overscan, PrefixSumOffsets, RowHeight, UniformOffsets, WindowedRenderer,
};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_offset(&mut self, total: f64) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * total
    }
}

fn variable_heights() -> RowHeight<f64> {
    // Heights between 20 and 51 that vary per row but are stable per index.
    RowHeight::per_row(|index: usize| {
        20.0 + f64::from(((index.wrapping_mul(2_654_435_761) >> 7) & 31) as u32)
    })
}

fn random_offsets(total: f64, count: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..count).map(|_| rng.next_offset(total)).collect()
}

fn bench_offsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_table_window/offsets");
    group.sample_size(50);

    for &n in &[1_000_usize, 100_000, 1_000_000] {
        let mut uniform = UniformOffsets::new(n, 30.0_f64);
        let queries = random_offsets(uniform.total_height(), 1_024, 0x7AB1_E000_0000_0001);
        group.bench_function(format!("uniform_index_at_offset(n={n})"), |b| {
            b.iter(|| {
                for &offset in &queries {
                    black_box(uniform.index_at_offset(offset));
                }
            });
        });

        let mut warm = PrefixSumOffsets::new(n, variable_heights());
        let queries = random_offsets(warm.total_height(), 1_024, 0x7AB1_E000_0000_0002);
        group.bench_function(format!("prefix_sum_index_at_offset_warm(n={n})"), |b| {
            b.iter(|| {
                for &offset in &queries {
                    black_box(warm.index_at_offset(offset));
                }
            });
        });

        group.bench_function(format!("prefix_sum_total_height_cold(n={n})"), |b| {
            b.iter_batched(
                || PrefixSumOffsets::new(n, variable_heights()),
                |mut offsets| black_box(offsets.total_height()),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_table_window/scroll");
    group.sample_size(50);

    for &n in &[1_000_usize, 1_000_000] {
        for (name, heights) in [
            ("fixed", RowHeight::Fixed(30.0_f64)),
            ("per_row", variable_heights()),
        ] {
            let mut window = WindowedRenderer::new(n, heights, 300.0, Overscan::symmetric(10));
            let total = window.total_height();
            let steps = random_offsets(total, 256, 0x7AB1_E000_0000_0003);
            group.bench_function(format!("random_jumps_{name}(n={n})"), |b| {
                b.iter(|| {
                    for &scroll_top in &steps {
                        black_box(window.on_scroll(scroll_top).map(<[_]>::len));
                    }
                });
            });

            group.bench_function(format!("smooth_scroll_{name}(n={n})"), |b| {
                b.iter(|| {
                    window.on_scroll(0.0);
                    for step in 0..600_u32 {
                        black_box(window.on_scroll(f64::from(step) * 7.5).map(<[_]>::len));
                    }
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_offsets, bench_scroll);
criterion_main!(benches);
