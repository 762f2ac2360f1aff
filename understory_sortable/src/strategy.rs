// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorting strategies: where each item is displayed while another one is dragged.
//!
//! ## Overview
//!
//! Given the measured rects of all items (in collection order), the index of
//! the dragged item, and the index it currently targets, a strategy returns the
//! displacement of one item from its measured position.
//!
//! - [`SortingStrategy::VerticalList`] and [`SortingStrategy::HorizontalList`]
//!   shift the items between the two indices by the dragged item's size plus the
//!   gap to their neighbor, so variable sizes and margins are honored.
//! - [`SortingStrategy::Grid`] moves every item to the rect it would occupy after
//!   the move, scaling it when the slot has a different size.
//!
//! For the dragged item itself, the result is the displacement into its
//! projected slot. The render adapter only uses it when the item is shown as a
//! placeholder under a drag overlay.

use kurbo::{Rect, Vec2};
use understory_dnd::Transform;
use understory_dnd::arrange::array_move;

/// Layout-specific displacement policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum SortingStrategy {
    /// Items stacked top to bottom.
    #[default]
    VerticalList,
    /// Items laid out left to right.
    HorizontalList,
    /// Items in a wrapping grid of possibly different sizes.
    Grid,
}

impl SortingStrategy {
    /// Displacement of the item at `index`.
    ///
    /// Returns `None` when an index has no rect.
    pub fn item_transform(
        self,
        rects: &[Rect],
        active_index: usize,
        over_index: usize,
        index: usize,
    ) -> Option<Transform> {
        match self {
            Self::VerticalList => list(Axis::Vertical, rects, active_index, over_index, index),
            Self::HorizontalList => list(Axis::Horizontal, rects, active_index, over_index, index),
            Self::Grid => grid(rects, active_index, over_index, index),
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn start(self, r: &Rect) -> f64 {
        match self {
            Self::Horizontal => r.x0,
            Self::Vertical => r.y0,
        }
    }

    fn end(self, r: &Rect) -> f64 {
        match self {
            Self::Horizontal => r.x1,
            Self::Vertical => r.y1,
        }
    }

    fn along(self, d: f64) -> Transform {
        match self {
            Self::Horizontal => Transform::translate(Vec2::new(d, 0.0)),
            Self::Vertical => Transform::translate(Vec2::new(0.0, d)),
        }
    }
}

fn list(
    axis: Axis,
    rects: &[Rect],
    active_index: usize,
    over_index: usize,
    index: usize,
) -> Option<Transform> {
    let active = rects.get(active_index)?;
    if index == active_index {
        let over = rects.get(over_index)?;
        let d = if active_index < over_index {
            axis.end(over) - axis.end(active)
        } else {
            axis.start(over) - axis.start(active)
        };
        return Some(axis.along(d));
    }
    rects.get(index)?;
    let size = axis.end(active) - axis.start(active);
    let gap = item_gap(axis, rects, index, active_index);
    let d = if index > active_index && index <= over_index {
        -(size + gap)
    } else if index < active_index && index >= over_index {
        size + gap
    } else {
        0.0
    };
    Some(axis.along(d))
}

/// Space between the item at `index` and the neighbor it moves toward.
fn item_gap(axis: Axis, rects: &[Rect], index: usize, active_index: usize) -> f64 {
    let current = &rects[index];
    let previous = index.checked_sub(1).and_then(|i| rects.get(i));
    let next = rects.get(index + 1);
    let before = previous.map(|p| axis.start(current) - axis.end(p));
    let after = next.map(|n| axis.start(n) - axis.end(current));
    if active_index < index {
        before.or(after).unwrap_or(0.0)
    } else {
        after.or(before).unwrap_or(0.0)
    }
}

fn grid(rects: &[Rect], active_index: usize, over_index: usize, index: usize) -> Option<Transform> {
    let moved = array_move(rects, active_index, over_index).ok()?;
    let old = rects.get(index)?;
    let new = moved.get(index)?;
    Some(Transform {
        translate: new.origin() - old.origin(),
        scale_x: ratio(new.width(), old.width()),
        scale_y: ratio(new.height(), old.height()),
    })
}

fn ratio(new: f64, old: f64) -> f64 {
    if old > 0.0 { new / old } else { 1.0 }
}
