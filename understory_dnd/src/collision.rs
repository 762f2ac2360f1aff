// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision detection: rank droppable slots against the dragged rectangle.
//!
//! ## Overview
//!
//! Every strategy takes a [`CollisionInput`] and returns the matching
//! droppables as [`Collision`] values, best first. The coordinator uses the
//! first entry as the current `over` target.
//!
//! - [`closest_center`]: distance between centers, ascending. Every droppable matches.
//! - [`closest_corners`]: mean distance between corresponding corners, ascending.
//! - [`rect_intersection`]: intersection-over-union ratio, descending. Only
//!   overlapping slots match.
//! - [`pointer_within`]: slots containing the pointer, ranked by mean corner
//!   distance to the pointer.
//!
//! Ties keep input order (sorting is stable).

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::types::Droppable;

/// A ranked match produced by a collision strategy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collision<K> {
    /// Identifier of the matched droppable.
    pub id: K,
    /// Strategy-specific score (a distance or an overlap ratio).
    pub value: f64,
}

/// Inputs to a collision strategy.
#[derive(Copy, Clone, Debug)]
pub struct CollisionInput<'a, K> {
    /// The rectangle being dragged, already translated by the current transform.
    pub collision_rect: Rect,
    /// Candidate slots.
    pub droppables: &'a [Droppable<K>],
    /// Current pointer position, when the drag is pointer-driven.
    pub pointer: Option<Point>,
}

/// Built-in collision detection algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum CollisionStrategy {
    /// See [`closest_center`].
    #[default]
    ClosestCenter,
    /// See [`closest_corners`].
    ClosestCorners,
    /// See [`rect_intersection`].
    RectIntersection,
    /// See [`pointer_within`].
    PointerWithin,
}

impl CollisionStrategy {
    /// Run this strategy.
    pub fn detect<K: Copy>(self, input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
        match self {
            Self::ClosestCenter => closest_center(input),
            Self::ClosestCorners => closest_corners(input),
            Self::RectIntersection => rect_intersection(input),
            Self::PointerWithin => pointer_within(input),
        }
    }
}

/// Rank every droppable by the distance between its center and the collision rect's center.
pub fn closest_center<K: Copy>(input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
    let center = input.collision_rect.center();
    let mut out: Vec<Collision<K>> = input
        .droppables
        .iter()
        .map(|d| Collision {
            id: d.id,
            value: d.rect.center().distance(center),
        })
        .collect();
    sort_ascending(&mut out);
    out
}

/// Rank every droppable by the mean distance between corresponding corners.
pub fn closest_corners<K: Copy>(input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
    let corners = corners_of(input.collision_rect);
    let mut out: Vec<Collision<K>> = input
        .droppables
        .iter()
        .map(|d| {
            let total: f64 = corners_of(d.rect)
                .iter()
                .zip(corners.iter())
                .map(|(a, b)| a.distance(*b))
                .sum();
            Collision {
                id: d.id,
                value: total / 4.0,
            }
        })
        .collect();
    sort_ascending(&mut out);
    out
}

/// Rank overlapping droppables by intersection over union, largest first.
pub fn rect_intersection<K: Copy>(input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
    let mut out: Vec<Collision<K>> = input
        .droppables
        .iter()
        .filter_map(|d| {
            let ratio = intersection_ratio(d.rect, input.collision_rect);
            (ratio > 0.0).then_some(Collision {
                id: d.id,
                value: ratio,
            })
        })
        .collect();
    out.sort_by(|a, b| b.value.total_cmp(&a.value));
    out
}

/// Rank droppables that contain the pointer by mean corner distance to it.
///
/// Returns nothing when the drag is not pointer-driven.
pub fn pointer_within<K: Copy>(input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
    let Some(pointer) = input.pointer else {
        return Vec::new();
    };
    let mut out: Vec<Collision<K>> = input
        .droppables
        .iter()
        .filter(|d| contains_inclusive(d.rect, pointer))
        .map(|d| {
            let total: f64 = corners_of(d.rect).iter().map(|c| c.distance(pointer)).sum();
            Collision {
                id: d.id,
                value: total / 4.0,
            }
        })
        .collect();
    sort_ascending(&mut out);
    out
}

fn sort_ascending<K>(out: &mut [Collision<K>]) {
    out.sort_by(|a, b| a.value.total_cmp(&b.value));
}

fn corners_of(r: Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x0, r.y1),
        Point::new(r.x1, r.y1),
    ]
}

fn contains_inclusive(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

fn intersection_ratio(target: Rect, entry: Rect) -> f64 {
    let left = target.x0.max(entry.x0);
    let top = target.y0.max(entry.y0);
    let right = target.x1.min(entry.x1);
    let bottom = target.y1.min(entry.y1);
    if left >= right || top >= bottom {
        return 0.0;
    }
    let intersection = (right - left) * (bottom - top);
    let union = target.area() + entry.area() - intersection;
    if union > 0.0 { intersection / union } else { 0.0 }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn strategies_serialize_as_kebab_case() {
        let names = [
            (CollisionStrategy::ClosestCenter, r#""closest-center""#),
            (CollisionStrategy::ClosestCorners, r#""closest-corners""#),
            (CollisionStrategy::RectIntersection, r#""rect-intersection""#),
            (CollisionStrategy::PointerWithin, r#""pointer-within""#),
        ];
        for (strategy, name) in names {
            assert_eq!(serde_json::to_string(&strategy).unwrap(), name);
            assert_eq!(
                serde_json::from_str::<CollisionStrategy>(name).unwrap(),
                strategy
            );
        }
    }
}
