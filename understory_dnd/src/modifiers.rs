// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modifier pipeline: pure functions that constrain a proposed drag transform.
//!
//! ## Overview
//!
//! A [`Modifier`] maps `(Transform, &ModifierContext) -> Transform`. Any
//! `Fn(Transform, &ModifierContext) -> Transform` is a modifier, so the
//! built-ins below are plain functions.
//!
//! [`Modifiers`] applies a chain in registration order, feeding each modifier
//! the previous output. Modifiers cannot fail. If one produces a non-finite
//! transform, the pipeline discards that output and continues with its input.
//! A non-finite input collapses to [`Transform::IDENTITY`] before the chain runs.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use understory_dnd::modifiers::{
//!     ModifierContext, Modifiers, restrict_to_vertical_axis, restrict_to_window_edges,
//! };
//! use understory_dnd::types::Transform;
//!
//! let pipeline = Modifiers::new()
//!     .with(restrict_to_vertical_axis)
//!     .with(restrict_to_window_edges);
//! let ctx = ModifierContext {
//!     active_rect: Some(Rect::new(0.0, 100.0, 300.0, 200.0)),
//!     window_rect: Some(Rect::new(0.0, 0.0, 800.0, 600.0)),
//!     ..Default::default()
//! };
//! let out = pipeline.apply(Transform::translate(Vec2::new(40.0, -250.0)), &ctx);
//! assert_eq!(out.translate, Vec2::new(0.0, -100.0));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::types::Transform;

/// Geometry available to modifiers.
///
/// Bounds are supplied by the caller; a modifier whose bound is absent leaves
/// the transform unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModifierContext {
    /// Bounds of the dragged item when the drag began.
    pub active_rect: Option<Rect>,
    /// Bounds of the item's container (the parent element).
    pub container_rect: Option<Rect>,
    /// Visible bounds of the nearest scrollable ancestor.
    pub scrollable_ancestor_rect: Option<Rect>,
    /// Bounds of the window or viewport.
    pub window_rect: Option<Rect>,
}

/// A pure, total transform constraint.
pub trait Modifier {
    /// Return the constrained transform.
    fn modify(&self, transform: Transform, ctx: &ModifierContext) -> Transform;
}

impl<F> Modifier for F
where
    F: Fn(Transform, &ModifierContext) -> Transform,
{
    fn modify(&self, transform: Transform, ctx: &ModifierContext) -> Transform {
        self(transform, ctx)
    }
}

/// An ordered chain of modifiers.
#[derive(Default)]
pub struct Modifiers {
    chain: Vec<Box<dyn Modifier>>,
}

impl core::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Modifiers")
            .field("len", &self.chain.len())
            .finish_non_exhaustive()
    }
}

impl Modifiers {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self { chain: Vec::new() }
    }

    /// Append a modifier, builder style.
    #[must_use]
    pub fn with(mut self, modifier: impl Modifier + 'static) -> Self {
        self.push(modifier);
        self
    }

    /// Append a modifier.
    pub fn push(&mut self, modifier: impl Modifier + 'static) {
        self.chain.push(Box::new(modifier));
    }

    /// Number of registered modifiers.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if no modifiers are registered.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Run the chain in registration order.
    pub fn apply(&self, transform: Transform, ctx: &ModifierContext) -> Transform {
        let start = if transform.is_finite() {
            transform
        } else {
            Transform::IDENTITY
        };
        self.chain.iter().fold(start, |acc, modifier| {
            let next = modifier.modify(acc, ctx);
            if next.is_finite() { next } else { acc }
        })
    }
}

/// Lock movement to the vertical axis.
pub fn restrict_to_vertical_axis(transform: Transform, _ctx: &ModifierContext) -> Transform {
    let mut out = transform;
    out.translate.x = 0.0;
    out
}

/// Lock movement to the horizontal axis.
pub fn restrict_to_horizontal_axis(transform: Transform, _ctx: &ModifierContext) -> Transform {
    let mut out = transform;
    out.translate.y = 0.0;
    out
}

/// Keep the dragged item inside the window.
pub fn restrict_to_window_edges(transform: Transform, ctx: &ModifierContext) -> Transform {
    match (ctx.active_rect, ctx.window_rect) {
        (Some(rect), Some(bounds)) => restrict_to_bounding_rect(transform, rect, bounds),
        _ => transform,
    }
}

/// Keep the dragged item inside the visible bounds of its first scrollable ancestor.
pub fn restrict_to_first_scrollable_ancestor(
    transform: Transform,
    ctx: &ModifierContext,
) -> Transform {
    match (ctx.active_rect, ctx.scrollable_ancestor_rect) {
        (Some(rect), Some(bounds)) => restrict_to_bounding_rect(transform, rect, bounds),
        _ => transform,
    }
}

/// Keep the dragged item inside its container.
pub fn restrict_to_parent_element(transform: Transform, ctx: &ModifierContext) -> Transform {
    match (ctx.active_rect, ctx.container_rect) {
        (Some(rect), Some(bounds)) => restrict_to_bounding_rect(transform, rect, bounds),
        _ => transform,
    }
}

/// Clamp the translation so that `rect`, once moved, stays within `bounds`.
///
/// When `rect` is larger than `bounds` on an axis, the leading edge wins.
pub fn restrict_to_bounding_rect(transform: Transform, rect: Rect, bounds: Rect) -> Transform {
    let mut out = transform;
    let t = &mut out.translate;
    if rect.y0 + t.y <= bounds.y0 {
        t.y = bounds.y0 - rect.y0;
    } else if rect.y1 + t.y >= bounds.y1 {
        t.y = bounds.y1 - rect.y1;
    }
    if rect.x0 + t.x <= bounds.x0 {
        t.x = bounds.x0 - rect.x0;
    } else if rect.x1 + t.x >= bounds.x1 {
        t.x = bounds.x1 - rect.x1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn ctx() -> ModifierContext {
        ModifierContext {
            active_rect: Some(Rect::new(100.0, 100.0, 200.0, 150.0)),
            container_rect: Some(Rect::new(50.0, 50.0, 400.0, 400.0)),
            scrollable_ancestor_rect: Some(Rect::new(0.0, 80.0, 350.0, 300.0)),
            window_rect: Some(Rect::new(0.0, 0.0, 1000.0, 800.0)),
        }
    }

    #[test]
    fn axis_locks_zero_one_component() {
        let t = Transform::from_xy(12.0, -7.0);
        assert_eq!(
            restrict_to_vertical_axis(t, &ctx()).translate,
            Vec2::new(0.0, -7.0)
        );
        assert_eq!(
            restrict_to_horizontal_axis(t, &ctx()).translate,
            Vec2::new(12.0, 0.0)
        );
    }

    #[test]
    fn bounding_rect_clamps_each_edge() {
        let rect = Rect::new(100.0, 100.0, 200.0, 150.0);
        let bounds = Rect::new(0.0, 0.0, 300.0, 300.0);
        let up_left = restrict_to_bounding_rect(Transform::from_xy(-500.0, -500.0), rect, bounds);
        assert_eq!(up_left.translate, Vec2::new(-100.0, -100.0));
        let down_right = restrict_to_bounding_rect(Transform::from_xy(500.0, 500.0), rect, bounds);
        assert_eq!(down_right.translate, Vec2::new(100.0, 150.0));
        let inside = restrict_to_bounding_rect(Transform::from_xy(10.0, 10.0), rect, bounds);
        assert_eq!(inside.translate, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn missing_bounds_leave_transform_alone() {
        let t = Transform::from_xy(-5000.0, 5000.0);
        let empty = ModifierContext::default();
        assert_eq!(restrict_to_window_edges(t, &empty), t);
        assert_eq!(restrict_to_first_scrollable_ancestor(t, &empty), t);
        assert_eq!(restrict_to_parent_element(t, &empty), t);
    }

    #[test]
    fn scroll_ancestor_and_parent_use_their_own_bounds() {
        let t = Transform::from_xy(0.0, -1000.0);
        assert_eq!(
            restrict_to_first_scrollable_ancestor(t, &ctx()).translate,
            Vec2::new(0.0, -20.0)
        );
        assert_eq!(
            restrict_to_parent_element(t, &ctx()).translate,
            Vec2::new(0.0, -50.0)
        );
    }

    #[test]
    fn pipeline_applies_in_registration_order() {
        let double = |t: Transform, _: &ModifierContext| {
            Transform::from_xy(t.translate.x * 2.0, t.translate.y)
        };
        let shift = |t: Transform, _: &ModifierContext| {
            Transform::from_xy(t.translate.x + 1.0, t.translate.y)
        };
        let pipeline = Modifiers::new().with(double).with(shift);
        assert_eq!(pipeline.len(), 2);
        let out = pipeline.apply(Transform::from_xy(3.0, 0.0), &ctx());
        assert_eq!(out.translate.x, 7.0);
    }

    #[test]
    fn non_finite_output_is_skipped() {
        let pipeline = Modifiers::new()
            .with(|_: Transform, _: &ModifierContext| Transform::from_xy(f64::NAN, 0.0))
            .with(restrict_to_vertical_axis);
        let out = pipeline.apply(Transform::from_xy(4.0, 9.0), &ctx());
        assert_eq!(out, Transform::from_xy(0.0, 9.0));
    }

    #[test]
    fn non_finite_input_collapses_to_identity() {
        let pipeline = Modifiers::new();
        assert!(pipeline.is_empty());
        let out = pipeline.apply(Transform::from_xy(f64::INFINITY, 1.0), &ctx());
        assert_eq!(out, Transform::IDENTITY);
    }
}
