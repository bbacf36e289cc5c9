// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flex table demo.
//!
//! Drives a 1000-row table through a scripted session (scrolling, header
//! sorting, and the same inputs the interactive demo exposes) and prints the
//! rendered window after each step.
//!
//! Run:
//! - `cargo run -p understory_table_demos --bin flex_table`
//! - `RUST_LOG=trace cargo run -p understory_table_demos --bin flex_table` to
//!   watch every window recompute.

use understory_table_demos::TableExample;

enum Step {
    Scroll(f64),
    ClickHeader(usize),
    RowsCount(&'static str),
    ScrollTo(&'static str),
    Height(&'static str),
    RowHeight(&'static str),
    HeaderHeight(&'static str),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut example = match TableExample::new() {
        Ok(example) => example,
        Err(err) => {
            log::error!("invalid demo table: {err}");
            return;
        }
    };

    println!("=== FlexTable ===");
    println!("{}", example.render_text());

    let steps = [
        Step::Scroll(1500.0),
        Step::ClickHeader(1),
        Step::ClickHeader(2),
        Step::ScrollTo("999"),
        Step::RowHeight("45"),
        Step::RowsCount("25"),
        Step::ScrollTo("abc"),
        Step::HeaderHeight("40"),
        Step::Height("-5"),
        Step::Height("200"),
    ];

    for step in steps {
        let (label, result) = match step {
            Step::Scroll(scroll_top) => {
                example.scroll(scroll_top);
                (format!("scroll to {scroll_top}px"), Ok(()))
            }
            Step::ClickHeader(column) => (
                format!("click header {column}"),
                example.click_header(column),
            ),
            Step::RowsCount(input) => (
                format!("num rows = {input:?}"),
                example.set_rows_count(input),
            ),
            Step::ScrollTo(input) => (
                format!("scroll to row {input:?}"),
                example.set_scroll_to(input),
            ),
            Step::Height(input) => (format!("list height = {input:?}"), example.set_height(input)),
            Step::RowHeight(input) => (
                format!("row height = {input:?}"),
                example.set_row_height(input),
            ),
            Step::HeaderHeight(input) => (
                format!("header height = {input:?}"),
                example.set_header_height(input),
            ),
        };
        println!("--- {label}");
        if let Err(err) = result {
            log::warn!("rejected: {err}");
            continue;
        }
        println!("{}", example.render_text());
    }
}
