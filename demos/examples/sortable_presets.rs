// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical list presets.
//!
//! Replays the same gesture against several configurations: a locked axis,
//! a press delay, a minimum distance, disabled items, and a scroll container.
//! The gesture presses the first row, wiggles, and drags diagonally down.
//!
//! Run:
//! - `cargo run -p understory_demos --example sortable_presets`

use std::time::Duration;

use kurbo::{Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_dnd::modifiers::{
    ModifierContext, Modifiers, restrict_to_first_scrollable_ancestor, restrict_to_vertical_axis,
};
use understory_dnd::sensor::{ActivationConstraint, PointerEvent};
use understory_sortable::{Sortable, SortableOptions, create_sortable};

const ROW: f64 = 40.0;
const LEN: u32 = 8;

fn build(options: SortableOptions<u32>) -> Sortable<u32> {
    let mut list = create_sortable(1..=LEN, options).expect("unique ids");
    list.measure((1..=LEN).map(|id| {
        let y = f64::from(id - 1) * ROW;
        (id, Rect::new(0.0, y, 240.0, y + ROW))
    }));
    list
}

/// Press, wiggle 4px for 300ms, then drag diagonally over three rows.
fn replay(name: &str, list: &mut Sortable<u32>) {
    let _span = tracing::info_span!("preset", name).entered();
    let t = Duration::from_millis;
    let press = Point::new(120.0, ROW / 2.0);
    list.pointer_event(&PointerEvent::down(press, t(0)));
    list.pointer_event(&PointerEvent::moved(press + Vec2::new(4.0, 0.0), t(100)));
    list.tick(t(300));
    let started = list.is_dragging();
    tracing::info!(started, "after hold");
    list.pointer_event(&PointerEvent::moved(press + Vec2::new(90.0, 3.0 * ROW), t(400)));
    let transform = list.session().map(|s| s.transform().translate);
    list.pointer_event(&PointerEvent::up(press + Vec2::new(90.0, 3.0 * ROW), t(450)));
    println!(
        "{name:>18}: started during hold={started:<5} last transform={transform:?} order={:?}",
        list.items()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let locked = Modifiers::new().with(restrict_to_vertical_axis);
    replay(
        "locked axis",
        &mut build(SortableOptions::default().with_modifiers(locked)),
    );

    let hold = ActivationConstraint::delay(Duration::from_millis(250), 5.0);
    replay(
        "press delay",
        &mut build(SortableOptions::default().with_activation_constraint(hold)),
    );

    let distance = ActivationConstraint::distance(15.0);
    replay(
        "minimum distance",
        &mut build(SortableOptions::default().with_activation_constraint(distance)),
    );

    replay(
        "disabled items",
        &mut build(SortableOptions::default().with_disabled(|id: &u32| id % 3 == 0)),
    );

    let scroll = Modifiers::new().with(restrict_to_first_scrollable_ancestor);
    let mut scrolled = build(SortableOptions::default().with_modifiers(scroll));
    scrolled.set_bounds(ModifierContext {
        scrollable_ancestor_rect: Some(Rect::new(0.0, 0.0, 240.0, 2.5 * ROW)),
        ..ModifierContext::default()
    });
    replay("scroll container", &mut scrolled);
}
