// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard coordinates that jump from slot to slot.
//!
//! Arrow keys move the dragged rect onto the nearest measured slot in that
//! direction, ranked with [`closest_corners`]. A slot is "in that direction"
//! when its leading edge lies strictly beyond the leading edge of the dragged
//! rect on the arrow's axis.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use understory_dnd::collision::{CollisionInput, closest_corners};
use understory_dnd::keyboard::{Direction, KeyboardCoordinates};
use understory_dnd::types::Droppable;

/// [`KeyboardCoordinates`] over the measured slots of a sortable collection.
#[derive(Copy, Clone, Debug)]
pub struct SortableKeyboardCoordinates<'a, K> {
    droppables: &'a [Droppable<K>],
    collision_rect: Option<Rect>,
}

impl<'a, K> SortableKeyboardCoordinates<'a, K> {
    /// Coordinates over `droppables`, moving a drag whose rect is `collision_rect`.
    ///
    /// Without a collision rect no key moves the drag.
    pub fn new(droppables: &'a [Droppable<K>], collision_rect: Option<Rect>) -> Self {
        Self {
            droppables,
            collision_rect,
        }
    }
}

impl<K: Copy + Eq> KeyboardCoordinates for SortableKeyboardCoordinates<'_, K> {
    fn next(&self, direction: Direction, current: Point) -> Option<Point> {
        let from = self.collision_rect?;
        let ahead = |r: &Rect| match direction {
            Direction::Up => r.y0 < from.y0,
            Direction::Down => r.y0 > from.y0,
            Direction::Left => r.x0 < from.x0,
            Direction::Right => r.x0 > from.x0,
        };
        let candidates: Vec<Droppable<K>> = self
            .droppables
            .iter()
            .filter(|d| ahead(&d.rect))
            .copied()
            .collect();
        let best = closest_corners(&CollisionInput {
            collision_rect: from,
            droppables: &candidates,
            pointer: None,
        })
        .first()?
        .id;
        let target = candidates.iter().find(|d| d.id == best)?;
        Some(current + (target.rect.origin() - from.origin()))
    }
}
