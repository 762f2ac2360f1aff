// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Sortable: headless sortable lists and grids.
//!
//! ## Overview
//!
//! [`create_sortable`] wires the pieces of `understory_dnd` into one object:
//! pointer and keyboard sensors, the drag coordinator, and a
//! [`RenderAdapter`](render::RenderAdapter) that turns the drag into per-item
//! transforms. The caller owns layout and painting:
//!
//! 1) Render the items, measure their world-space rects, and pass them to
//!    [`Sortable::measure`].
//! 2) Forward input with [`Sortable::pointer_event`], [`Sortable::key_event`],
//!    and [`Sortable::tick`].
//! 3) Each frame, apply [`Sortable::frames`] (a transform and transition per
//!    item) and, when a drag overlay is enabled, [`Sortable::overlay_frame`].
//! 4) When a drop is committed, subscribers registered with
//!    [`Sortable::subscribe`] receive the new order. Re-render, then measure again.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_dnd::sensor::{ActivationConstraint, PointerEvent};
//! use understory_sortable::{SortableOptions, create_sortable};
//!
//! let options = SortableOptions::default()
//!     .with_activation_constraint(ActivationConstraint::distance(15.0));
//! let mut list = create_sortable(["a", "b", "c"], options).unwrap();
//! list.measure([
//!     ("a", Rect::new(0.0, 0.0, 200.0, 50.0)),
//!     ("b", Rect::new(0.0, 50.0, 200.0, 100.0)),
//!     ("c", Rect::new(0.0, 100.0, 200.0, 150.0)),
//! ]);
//!
//! let t = Duration::from_millis;
//! list.pointer_event(&PointerEvent::down(Point::new(100.0, 25.0), t(0)));
//! list.pointer_event(&PointerEvent::moved(Point::new(100.0, 130.0), t(16)));
//! assert_eq!(list.active(), Some("a"));
//!
//! let frames = list.frames();
//! assert_eq!(frames[0].transform.translate.y, 105.0);
//! assert_eq!(frames[1].transform.translate.y, -50.0);
//!
//! list.pointer_event(&PointerEvent::up(Point::new(100.0, 130.0), t(32)));
//! assert_eq!(list.items(), &["b", "c", "a"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: select Kurbo's float backend.
//! - `tracing`: log lifecycle transitions through `tracing`.
//! - `serde`: derive serialization for plain configuration types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod coordinates;
pub mod error;
pub mod options;
pub mod render;
pub mod sortable;
pub mod strategy;

pub use error::SortableError;
pub use options::{Sensors, SortableOptions};
pub use sortable::{Sortable, create_sortable};
pub use strategy::SortingStrategy;
