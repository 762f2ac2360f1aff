// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic vertical sortable list.
//!
//! A simulated pointer drags the fourth row up by two slots. Each step prints
//! the per-item transforms a renderer would apply, then the committed order and
//! the layout animation frames that follow.
//!
//! Run:
//! - `cargo run -p understory_demos --example sortable_vertical`
//! - `RUST_LOG=debug cargo run -p understory_demos --example sortable_vertical`

use std::time::Duration;

use kurbo::{Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_dnd::sensor::PointerEvent;
use understory_sortable::render::ItemFrame;
use understory_sortable::{SortableOptions, create_sortable};

const ROW: f64 = 48.0;

fn layout(items: &[&'static str]) -> Vec<(&'static str, Rect)> {
    items
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let y = i as f64 * (ROW + 8.0);
            (*id, Rect::new(0.0, y, 320.0, y + ROW))
        })
        .collect()
}

fn print_frames(label: &str, frames: &[ItemFrame<&'static str>]) {
    println!("== {label} ==");
    for f in frames {
        let transition = f
            .transition
            .map(|t| t.to_string())
            .unwrap_or_else(|| "none".into());
        println!(
            "  {:>6} dy={:>7.1} transition={transition} flags={:?}",
            f.id, f.transform.translate.y, f.flags
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let items = ["alpha", "bravo", "charlie", "delta", "echo"];
    let mut list = create_sortable(items, SortableOptions::default()).expect("unique ids");
    list.measure(layout(&items));
    list.subscribe(|order| tracing::info!(?order, "order changed"));

    let t = Duration::from_millis;
    let grab = Point::new(160.0, 3.0 * (ROW + 8.0) + ROW / 2.0);
    list.pointer_event(&PointerEvent::down(grab, t(0)));
    for (step, dy) in [-20.0, -60.0, -100.0].into_iter().enumerate() {
        let at = grab + Vec2::new(0.0, dy);
        list.pointer_event(&PointerEvent::moved(at, t(16 * (step as u64 + 1))));
        print_frames(&format!("move {dy}"), &list.frames());
    }
    list.pointer_event(&PointerEvent::up(grab + Vec2::new(0.0, -100.0), t(80)));

    let order: Vec<&'static str> = list.items().to_vec();
    list.measure(layout(&order));
    print_frames("after drop (invert)", &list.frames());
    print_frames("after drop (play)", &list.frames());
}
