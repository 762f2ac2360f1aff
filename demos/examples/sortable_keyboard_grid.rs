// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard sorting in a grid with a drag overlay.
//!
//! Picks up a tile with Space, walks it right and down with the arrow keys,
//! and drops it with Enter. The overlay frame follows the keyboard position
//! while the source tile is shown in its projected slot.
//!
//! Run:
//! - `cargo run -p understory_demos --example sortable_keyboard_grid`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_dnd::keyboard::KeyCode;
use understory_sortable::{SortableOptions, SortingStrategy, create_sortable};

const COLUMNS: u32 = 4;
const TILE: f64 = 100.0;
const GAP: f64 = 10.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let options = SortableOptions::default()
        .with_strategy(SortingStrategy::Grid)
        .with_drag_overlay(true);
    let mut grid = create_sortable(0..12_u32, options).expect("unique ids");
    grid.measure((0..12_u32).map(|id| {
        let x = f64::from(id % COLUMNS) * (TILE + GAP);
        let y = f64::from(id / COLUMNS) * (TILE + GAP);
        (id, Rect::new(x, y, x + TILE, y + TILE))
    }));
    grid.subscribe(|order| tracing::info!(?order, "order changed"));

    grid.key_event(KeyCode::Space, Some(1));
    for key in [KeyCode::ArrowRight, KeyCode::ArrowDown] {
        grid.key_event(key, None);
        let session = grid.session().expect("keyboard drag is active");
        println!("{key:?}: target index {}", session.target_index());
        if let Some(overlay) = grid.overlay_frame() {
            println!("  overlay translate {:?}", overlay.transform.translate);
        }
        for frame in grid.frames().iter().filter(|f| !f.transform.is_identity()) {
            let t = frame.transform;
            println!(
                "  tile {:>2} translate {:?} scale ({}, {})",
                frame.id, t.translate, t.scale_x, t.scale_y
            );
        }
    }
    grid.key_event(KeyCode::Enter, None);
}
