// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use overstory_flex_table::{Column, FlexTable, RowFields, TableConfig};

struct Row(usize);

impl RowFields for Row {
    fn field(&self, data_key: &str) -> Option<String> {
        match data_key {
            "index" => Some(self.0.to_string()),
            "name" => Some(format!("Item {}", self.0 + 1)),
            _ => None,
        }
    }
}

fn table(rows_count: usize) -> FlexTable<Row> {
    let config = TableConfig {
        rows_count,
        ..TableConfig::default()
    };
    let columns = vec![
        Column::new("index", 50.0),
        Column::new("name", 90.0),
        Column::new("random", 210.0).flex_grow(1.0).disable_sort(),
    ];
    match FlexTable::new(config, columns) {
        Ok(table) => table,
        Err(err) => panic!("bench table config rejected: {err}"),
    }
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("overstory_flex_table");
    group.sample_size(50);

    for &n in &[1_000_usize, 1_000_000] {
        let mut table = table(n);
        group.bench_function(format!("scroll_and_render(n={n})"), |b| {
            let mut scroll_top = 0.0;
            b.iter(|| {
                scroll_top = (scroll_top + 95.0) % 30_000.0;
                table.on_scroll(scroll_top);
                black_box(table.render_rows(&|index: usize| Row(index)));
            });
        });
    }

    group.bench_function("layout", |b| {
        let table = table(1_000);
        b.iter(|| black_box(table.layout()));
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
