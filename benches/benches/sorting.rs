// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_dnd::arrange::{array_move, move_in_place};
use understory_dnd::sensor::PointerEvent;
use understory_sortable::{Sortable, SortableOptions, SortingStrategy, create_sortable};

fn bench_array_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_move");
    for &n in &[64usize, 1024, 16384] {
        let seq: Vec<u32> = (0..n as u32).collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("copy_first_to_last_n{n}"), |b| {
            b.iter(|| black_box(array_move(black_box(&seq), 0, n - 1)));
        });
        group.bench_function(format!("in_place_first_to_last_n{n}"), |b| {
            b.iter_batched(
                || seq.clone(),
                |mut s| {
                    let _ = move_in_place(&mut s, 0, n - 1);
                    black_box(s);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

const ROW: f64 = 32.0;

fn column(n: u32, strategy: SortingStrategy) -> Sortable<u32> {
    let options = SortableOptions::default().with_strategy(strategy);
    let mut list = create_sortable(0..n, options).expect("unique ids");
    list.measure((0..n).map(|id| {
        let y = f64::from(id) * ROW;
        (id, Rect::new(0.0, y, 300.0, y + ROW))
    }));
    list
}

/// One pointer drag across the whole list with a frame after every move.
fn bench_drag_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_frames");
    for &n in &[32u32, 256] {
        for (name, strategy) in [
            ("vertical", SortingStrategy::VerticalList),
            ("grid", SortingStrategy::Grid),
        ] {
            group.throughput(Throughput::Elements(u64::from(n)));
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter_batched(
                    || column(n, strategy),
                    |mut list| {
                        let start = Point::new(150.0, ROW / 2.0);
                        let t = Duration::from_millis;
                        list.pointer_event(&PointerEvent::down(start, t(0)));
                        for step in 1..n {
                            let at = start + Vec2::new(0.0, f64::from(step) * ROW);
                            list.pointer_event(&PointerEvent::moved(at, t(u64::from(step))));
                            black_box(list.frames());
                        }
                        list.pointer_event(&PointerEvent::up(start, t(u64::from(n))));
                        black_box(list.items().len());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_array_move, bench_drag_frames);
criterion_main!(benches);
