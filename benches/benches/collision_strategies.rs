// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dnd::collision::{CollisionInput, CollisionStrategy};
use understory_dnd::types::Droppable;

fn gen_column(n: usize, row: f64) -> Vec<Droppable<u32>> {
    (0..n)
        .map(|i| {
            let y = i as f64 * row;
            Droppable {
                id: i as u32,
                rect: Rect::new(0.0, y, 300.0, y + row),
            }
        })
        .collect()
}

fn gen_grid(n: usize, cell: f64) -> Vec<Droppable<u32>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Droppable {
                id: (y * n + x) as u32,
                rect: Rect::new(x0, y0, x0 + cell * 0.9, y0 + cell * 0.9),
            });
        }
    }
    out
}

const STRATEGIES: [(&str, CollisionStrategy); 4] = [
    ("closest_center", CollisionStrategy::ClosestCenter),
    ("closest_corners", CollisionStrategy::ClosestCorners),
    ("rect_intersection", CollisionStrategy::RectIntersection),
    ("pointer_within", CollisionStrategy::PointerWithin),
];

fn bench_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_column");
    for &n in &[16usize, 256, 4096] {
        let droppables = gen_column(n, 40.0);
        let mid = n as f64 * 20.0;
        let input = CollisionInput {
            collision_rect: Rect::new(10.0, mid - 15.0, 310.0, mid + 25.0),
            droppables: &droppables,
            pointer: Some(Point::new(150.0, mid)),
        };
        group.throughput(Throughput::Elements(n as u64));
        for (name, strategy) in STRATEGIES {
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter(|| black_box(strategy.detect(black_box(&input))));
            });
        }
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_grid");
    for &n in &[8usize, 32, 64] {
        let droppables = gen_grid(n, 100.0);
        let mid = n as f64 * 50.0;
        let input = CollisionInput {
            collision_rect: Rect::new(mid - 40.0, mid - 40.0, mid + 50.0, mid + 50.0),
            droppables: &droppables,
            pointer: Some(Point::new(mid, mid)),
        };
        group.throughput(Throughput::Elements((n * n) as u64));
        for (name, strategy) in STRATEGIES {
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter(|| black_box(strategy.detect(black_box(&input))));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_column, bench_grid);
criterion_main!(benches);
