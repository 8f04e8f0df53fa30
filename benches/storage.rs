//! Text storage benchmarks: line lookup, edits and cursor movement.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use qedit_core::{Cursor, TextStorage};
use std::hint::black_box;

fn build_source(lines: usize) -> String {
    let line = "func example() { x := 42; fmt.Println(\"héllo\", x) }\n";
    let mut text = String::with_capacity(lines * line.len());
    for _ in 0..lines {
        text.push_str(line);
    }
    text
}

fn storage_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage_creation");
    for lines in [1_000, 100_000] {
        let source = build_source(lines);
        group.bench_with_input(BenchmarkId::new("new", lines), &source, |b, input| {
            b.iter(|| TextStorage::new(black_box(input)));
        });
    }
    group.finish();
}

fn storage_line_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage_line_lookup");
    for lines in [1_000, 100_000] {
        let text = TextStorage::new(&build_source(lines));
        let probes: Vec<usize> = (0..64).map(|i| (i * 7919) % lines).collect();
        group.bench_with_input(BenchmarkId::new("line", lines), &probes, |b, probes| {
            b.iter(|| {
                for &line in probes {
                    black_box(text.line(line));
                }
            });
        });
        group.bench_with_input(
            BenchmarkId::new("runes_in_line", lines),
            &probes,
            |b, probes| {
                b.iter(|| {
                    for &line in probes {
                        black_box(text.runes_in_line(line));
                    }
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("pos_to_line_col", lines),
            &probes,
            |b, probes| {
                b.iter(|| {
                    for &line in probes {
                        let pos = text.line_col_to_pos(line, 20);
                        black_box(text.pos_to_line_col(pos));
                    }
                });
            },
        );
    }
    group.finish();
}

fn storage_edits(c: &mut Criterion) {
    let source = build_source(100_000);
    let mut group = c.benchmark_group("storage_edits");

    group.bench_function("insert_middle", |b| {
        b.iter_batched(
            || TextStorage::new(&source),
            |mut text| {
                text.insert(50_000, 10, "inserted ");
                black_box(text)
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("remove_multiline", |b| {
        b.iter_batched(
            || TextStorage::new(&source),
            |mut text| {
                text.remove(50_000, 4, 50_010, 4);
                black_box(text)
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("typing_burst", |b| {
        b.iter_batched(
            || TextStorage::new(&source),
            |mut text| {
                for col in 0..100 {
                    text.insert(40_000, col, "x");
                }
                black_box(text)
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn cursor_movement(c: &mut Criterion) {
    let text = TextStorage::new(&build_source(10_000));
    c.bench_function("cursor_down_1000", |b| {
        b.iter(|| {
            let mut cursor = Cursor::at(&text, 0, 30);
            for _ in 0..1_000 {
                cursor = cursor.down(&text);
            }
            black_box(cursor)
        });
    });
    c.bench_function("cursor_word_motion_line", |b| {
        b.iter(|| {
            let mut cursor = Cursor::at(&text, 5_000, 0);
            for _ in 0..20 {
                cursor = cursor.next_word_boundary_end(&text);
            }
            black_box(cursor)
        });
    });
}

criterion_group!(
    benches,
    storage_creation,
    storage_line_lookup,
    storage_edits,
    cursor_movement
);
criterion_main!(benches);
