// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory DnD: a headless, `no_std` drag-and-drop core.
//!
//! ## Overview
//!
//! This crate turns raw pointer and keyboard input into a drag lifecycle over an
//! ordered collection of item identifiers. It does not render, lay out, or hit
//! test. Upstream code measures item rectangles and feeds events; downstream
//! code (for example `understory_sortable`) turns the session into per-item
//! transforms.
//!
//! ## Pipeline
//!
//! 1) A sensor ([`PointerSensor`](crate::sensor::PointerSensor) or
//!    [`KeyboardSensor`](crate::keyboard::KeyboardSensor)) buffers input and
//!    emits [`SensorEvent`](crate::sensor::SensorEvent)s once its
//!    [`ActivationConstraint`](crate::sensor::ActivationConstraint) is satisfied.
//! 2) The [`DragCoordinator`](crate::coordinator::DragCoordinator) owns the one
//!    active [`DragSession`](crate::coordinator::DragSession). On every move it
//!    runs the [`Modifiers`](crate::modifiers::Modifiers) pipeline on the pointer
//!    delta and ranks slots with a
//!    [`CollisionStrategy`](crate::collision::CollisionStrategy).
//! 3) On drop the coordinator commits with the ordering strategy
//!    ([`array_move`](crate::arrange::array_move)) and publishes
//!    [`DragEvent`](crate::events::DragEvent)s to subscribers.
//!
//! ## Single drag
//!
//! At most one session exists. A second `begin` while a drag is active is
//! ignored rather than reported as an error, so noisy input devices cannot
//! disturb a drag in progress.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_dnd::coordinator::{DragCoordinator, DragOutcome};
//! use understory_dnd::items::Items;
//!
//! let mut dnd = DragCoordinator::new(Items::new([1, 2, 3]).unwrap());
//! for (i, id) in [1, 2, 3].into_iter().enumerate() {
//!     let y = i as f64 * 50.0;
//!     dnd.measure(id, Rect::new(0.0, y, 200.0, y + 50.0));
//! }
//!
//! assert!(dnd.begin(1, Point::new(100.0, 25.0)));
//! assert_eq!(dnd.update(Point::new(100.0, 125.0)), Some(2));
//! assert_eq!(dnd.end(), DragOutcome::Committed { from: 0, to: 2 });
//! assert_eq!(dnd.items().as_slice(), &[2, 3, 1]);
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

pub mod arrange;
pub mod collision;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod items;
pub mod keyboard;
pub mod modifiers;
pub mod sensor;
pub mod types;

pub use error::DndError;
pub use types::Transform;
