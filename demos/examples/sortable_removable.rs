// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Removable items and drag handles.
//!
//! Items can only be dragged by a small handle on their right edge. Removing
//! an item re-measures the list. The layout policy treats every removal like
//! the end of a drag, so the remaining rows animate into the gap. Removing the
//! item being dragged cancels the drag without committing.
//!
//! Run:
//! - `cargo run -p understory_demos --example sortable_removable`

use std::time::Duration;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_dnd::events::DragEvent;
use understory_dnd::sensor::PointerEvent;
use understory_sortable::render::{
    AnimateLayoutChanges, FrameFlags, LayoutChange, default_animate_layout_changes,
};
use understory_sortable::{Sortable, SortableOptions, create_sortable};

const ROW: f64 = 50.0;

fn relayout(list: &mut Sortable<u32>) {
    let items = list.items().to_vec();
    for (i, id) in items.iter().enumerate() {
        let y = i as f64 * ROW;
        list.set_handle_rect(*id, Some(Rect::new(260.0, y + 10.0, 290.0, y + 40.0)));
    }
    list.measure(items.iter().enumerate().map(|(i, id)| {
        let y = i as f64 * ROW;
        (*id, Rect::new(0.0, y, 300.0, y + ROW))
    }));
}

fn print_frames(list: &mut Sortable<u32>) {
    for frame in list.frames() {
        let layout = frame.flags.contains(FrameFlags::LAYOUT);
        println!(
            "  {} {:?} layout={layout} {:?}",
            frame.id, frame.transform.translate, frame.transition
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let animate = AnimateLayoutChanges::When(Box::new(|change: &LayoutChange<u32>| {
        default_animate_layout_changes(&LayoutChange {
            was_dragging: true,
            ..*change
        })
    }));
    let options = SortableOptions::default()
        .with_handle(true)
        .with_animate_layout_changes(animate);
    let mut list = create_sortable(1..=5_u32, options).expect("unique ids");
    relayout(&mut list);
    list.subscribe_events(|event| match event {
        DragEvent::Started { active, .. } => tracing::info!(active, "started"),
        DragEvent::Cancelled { active } => tracing::info!(active, "cancelled"),
        DragEvent::OrderChanged { order, .. } => tracing::info!(?order, "order changed"),
        _ => {}
    });

    let t = Duration::from_millis;
    // A press on the row body is ignored; only the handle starts a drag.
    list.pointer_event(&PointerEvent::down(Point::new(100.0, 25.0), t(0)));
    println!("dragging after body press: {}", list.is_dragging());
    list.pointer_event(&PointerEvent::up(Point::new(100.0, 25.0), t(10)));

    // Remove a row while idle; the rows below it slide up.
    list.set_items([1, 2, 4, 5]).expect("unique ids");
    relayout(&mut list);
    println!("after removing 3: items={:?}", list.items());
    print_frames(&mut list);
    println!("next frame:");
    print_frames(&mut list);

    list.pointer_event(&PointerEvent::down(Point::new(275.0, 75.0), t(20)));
    list.pointer_event(&PointerEvent::moved(Point::new(275.0, 160.0), t(40)));

    // Remove the dragged item while the drag is in progress.
    list.set_items([1, 4, 5]).expect("unique ids");
    relayout(&mut list);
    println!(
        "after removing 2 mid-drag: dragging={} items={:?}",
        list.is_dragging(),
        list.items()
    );
    print_frames(&mut list);
}
