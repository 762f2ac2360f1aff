// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render adapter: per-item transforms and transitions for a rendering layer.
//!
//! ## Overview
//!
//! A [`RenderAdapter`] turns the drag state into one [`ItemFrame`] per item.
//! Frames are plain data: a [`Transform`] relative to the item's measured
//! rect and an optional [`Transition`] to animate toward it.
//!
//! - While sorting, the dragged item follows the session transform with no
//!   transition, and the others take the displacement computed by the
//!   [`SortingStrategy`]. Disabled items stay at identity.
//! - With a drag overlay, the dragged item is displaced into its projected slot
//!   like any other item and [`RenderAdapter::overlay_frame`] tracks the pointer.
//! - After a relayout (new measurements once a drop has been committed), items
//!   that moved are first shown at their previous visual position without a
//!   transition, then animated back to identity (FLIP).
//!
//! ## Minimal example
//!
//! ```
//! use understory_sortable::render::{FrameFlags, FrameInput, RenderAdapter};
//! use understory_sortable::strategy::SortingStrategy;
//!
//! let mut render = RenderAdapter::<u32>::default();
//! let frames = render.frames(&FrameInput {
//!     items: &[1, 2, 3],
//!     rects: None,
//!     sorting: None,
//!     strategy: SortingStrategy::VerticalList,
//!     disabled: &|_| false,
//! });
//! assert_eq!(frames.len(), 3);
//! assert!(frames.iter().all(|f| f.transform.is_identity()));
//! assert!(frames.iter().all(|f| !f.flags.contains(FrameFlags::SORTING)));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::Rect;
use understory_dnd::Transform;

use crate::strategy::SortingStrategy;

/// Timing function of a [`Transition`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start, fast middle, slow end.
    #[default]
    Ease,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
    /// Custom cubic Bézier curve through `(x1, y1)` and `(x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Returns `true` unless a custom curve has non-finite points or an `x` outside `[0, 1]`.
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::CubicBezier(x1, y1, x2, y2) => {
                y1.is_finite()
                    && y2.is_finite()
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// How a transform change should be animated.
///
/// Displays as a CSS transition shorthand, e.g. `transform 250ms ease`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Animation length.
    pub duration: Duration,
    /// Timing function.
    pub easing: Easing,
}

impl Transition {
    /// `transform 250ms ease`.
    pub const DEFAULT: Self = Self {
        duration: Duration::from_millis(250),
        easing: Easing::Ease,
    };

    /// A transition of `duration` with `easing`.
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Returns `true` if the easing is valid.
    pub fn is_valid(&self) -> bool {
        self.easing.is_valid()
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transform {}ms {}", self.duration.as_millis(), self.easing)
    }
}

bitflags::bitflags! {
    /// Role of an item in a frame.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FrameFlags: u8 {
        /// The item being dragged.
        const ACTIVE = 1 << 0;
        /// The item currently targeted.
        const OVER = 1 << 1;
        /// A drag is in progress.
        const SORTING = 1 << 2;
        /// The item is disabled.
        const DISABLED = 1 << 3;
        /// Inverted layout position; the next frame animates it to identity.
        const LAYOUT = 1 << 4;
        /// The frame of the drag overlay.
        const OVERLAY = 1 << 5;
    }
}

/// What the renderer should apply to one item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemFrame<K> {
    /// Item identifier.
    pub id: K,
    /// Position in the collection.
    pub index: usize,
    /// Displacement from the item's measured rect.
    pub transform: Transform,
    /// How to animate to `transform`; `None` applies it immediately.
    pub transition: Option<Transition>,
    /// Role of the item.
    pub flags: FrameFlags,
}

/// Context handed to an [`AnimateLayoutChanges`] predicate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutChange<K> {
    /// The item.
    pub id: K,
    /// Its index before the change.
    pub index: usize,
    /// Its index after the change.
    pub new_index: usize,
    /// A drag is in progress.
    pub is_sorting: bool,
    /// A drag ended since the previous layout.
    pub was_dragging: bool,
    /// Items were added or removed.
    pub items_changed: bool,
}

/// Whether displacements are animated.
pub enum AnimateLayoutChanges<K> {
    /// Use [`default_animate_layout_changes`].
    Default,
    /// Always animate.
    Always,
    /// Never animate.
    Never,
    /// Ask a predicate.
    When(Box<dyn Fn(&LayoutChange<K>) -> bool>),
}

impl<K> Default for AnimateLayoutChanges<K> {
    fn default() -> Self {
        Self::Default
    }
}

impl<K> From<bool> for AnimateLayoutChanges<K> {
    fn from(animate: bool) -> Self {
        if animate { Self::Always } else { Self::Never }
    }
}

impl<K> fmt::Debug for AnimateLayoutChanges<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::When(_) => f.write_str("When(..)"),
        }
    }
}

impl<K> AnimateLayoutChanges<K> {
    /// Evaluate the policy for one item.
    pub fn allows(&self, change: &LayoutChange<K>) -> bool {
        match self {
            Self::Default => default_animate_layout_changes(change),
            Self::Always => true,
            Self::Never => false,
            Self::When(f) => f(change),
        }
    }
}

/// Animate while sorting and right after a drop, but not for items that kept
/// their index when the collection was edited.
pub fn default_animate_layout_changes<K>(change: &LayoutChange<K>) -> bool {
    if !change.was_dragging && !change.is_sorting {
        return false;
    }
    if change.items_changed && change.index == change.new_index {
        return false;
    }
    change.is_sorting || change.index != change.new_index
}

/// The drag state a frame is computed from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sorting<K> {
    /// The dragged item.
    pub active: K,
    /// Its index in the collection.
    pub active_index: usize,
    /// The targeted item.
    pub over: Option<K>,
    /// The index it would be dropped at.
    pub over_index: usize,
    /// The session transform.
    pub transform: Transform,
}

/// Everything [`RenderAdapter::frames`] reads.
pub struct FrameInput<'a, K> {
    /// Items in collection order.
    pub items: &'a [K],
    /// Measured rects aligned with `items`, or `None` if any item is unmeasured.
    pub rects: Option<&'a [Rect]>,
    /// The active drag.
    pub sorting: Option<Sorting<K>>,
    /// Displacement policy.
    pub strategy: SortingStrategy,
    /// Disabled predicate.
    pub disabled: &'a dyn Fn(&K) -> bool,
}

impl<K: fmt::Debug> fmt::Debug for FrameInput<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameInput")
            .field("items", &self.items)
            .field("rects", &self.rects)
            .field("sorting", &self.sorting)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Turns drag state into [`ItemFrame`]s and plays layout animations.
pub struct RenderAdapter<K> {
    transition: Option<Transition>,
    animate: AnimateLayoutChanges<K>,
    drag_overlay: bool,
    /// Where each item was last shown.
    visual: Vec<(K, Rect)>,
    /// Collection order at the last relayout.
    order: Vec<K>,
    /// Inverted positions waiting to be shown once.
    pending: Vec<(K, Transform)>,
    was_dragging: bool,
}

impl<K: fmt::Debug> fmt::Debug for RenderAdapter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderAdapter")
            .field("transition", &self.transition)
            .field("animate", &self.animate)
            .field("drag_overlay", &self.drag_overlay)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<K> Default for RenderAdapter<K> {
    fn default() -> Self {
        Self::new(Some(Transition::DEFAULT), AnimateLayoutChanges::Default, false)
    }
}

impl<K> RenderAdapter<K> {
    /// Create an adapter. `transition: None` disables all animation.
    pub fn new(
        transition: Option<Transition>,
        animate: AnimateLayoutChanges<K>,
        drag_overlay: bool,
    ) -> Self {
        Self {
            transition,
            animate,
            drag_overlay,
            visual: Vec::new(),
            order: Vec::new(),
            pending: Vec::new(),
            was_dragging: false,
        }
    }

    /// The configured transition.
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Returns `true` if the dragged item is rendered through an overlay.
    pub fn uses_drag_overlay(&self) -> bool {
        self.drag_overlay
    }

    /// Returns `true` while inverted layout frames wait to be shown.
    pub fn has_pending_layout(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl<K: Copy + Eq> RenderAdapter<K> {
    /// Compute this frame.
    ///
    /// While sorting, the shown rect of every item is remembered for the next
    /// [`relayout`](Self::relayout). Outside a drag, a pending inverted frame is
    /// returned once, after which the item animates to identity.
    pub fn frames(&mut self, input: &FrameInput<'_, K>) -> Vec<ItemFrame<K>> {
        let frames: Vec<ItemFrame<K>> = match input.sorting {
            Some(sorting) => input
                .items
                .iter()
                .enumerate()
                .map(|(index, &id)| self.sorting_frame(input, &sorting, index, id))
                .collect(),
            None => input
                .items
                .iter()
                .enumerate()
                .map(|(index, &id)| self.idle_frame(input, index, id))
                .collect(),
        };
        if input.sorting.is_some()
            && let Some(rects) = input.rects
        {
            for (frame, rect) in frames.iter().zip(rects) {
                self.remember(frame.id, frame.transform.apply_to_rect(*rect));
            }
        }
        frames
    }

    /// The frame of the drag overlay, when enabled and sorting.
    pub fn overlay_frame(&self, sorting: Option<&Sorting<K>>) -> Option<ItemFrame<K>> {
        if !self.drag_overlay {
            return None;
        }
        let sorting = sorting?;
        Some(ItemFrame {
            id: sorting.active,
            index: sorting.active_index,
            transform: sorting.transform,
            transition: None,
            flags: FrameFlags::ACTIVE | FrameFlags::SORTING | FrameFlags::OVERLAY,
        })
    }

    /// Record that a drag just ended; the next relayout may animate.
    pub fn drag_ended(&mut self) {
        self.was_dragging = true;
    }

    /// Take new measurements.
    ///
    /// Outside a drag, items whose rect moved away from where they were last
    /// shown get an inverted frame if the layout policy allows it. Disabled
    /// items never animate. During a drag, rects already shown are kept so a
    /// later drop animates from the displaced position.
    pub fn relayout(
        &mut self,
        items: &[K],
        rects: &[Option<Rect>],
        disabled: &dyn Fn(&K) -> bool,
        is_sorting: bool,
    ) {
        let items_changed = self.order.len() != items.len()
            || items.iter().any(|id| !self.order.contains(id));
        for (new_index, (&id, rect)) in items.iter().zip(rects).enumerate() {
            let Some(rect) = *rect else { continue };
            if !is_sorting
                && !disabled(&id)
                && let Some(previous) = self.visual_of(&id)
                && previous != rect
            {
                let change = LayoutChange {
                    id,
                    index: self.order.iter().position(|k| *k == id).unwrap_or(new_index),
                    new_index,
                    is_sorting,
                    was_dragging: self.was_dragging,
                    items_changed,
                };
                if self.transition.is_some() && self.animate.allows(&change) {
                    let inverted = invert(previous, rect);
                    #[cfg(feature = "tracing")]
                    tracing::trace!(index = new_index, "layout animation queued");
                    self.pending.retain(|(k, _)| *k != id);
                    self.pending.push((id, inverted));
                }
            }
            // Mid-drag the last shown rect includes the displacement.
            if !is_sorting || self.visual_of(&id).is_none() {
                self.remember(id, rect);
            }
        }
        self.visual.retain(|(k, _)| items.contains(k));
        self.pending.retain(|(k, _)| items.contains(k));
        self.order.clear();
        self.order.extend_from_slice(items);
        if !is_sorting {
            self.was_dragging = false;
        }
    }

    /// Drop pending animations and treat `measured` as the shown rects.
    ///
    /// Used when a drag is cancelled: every item returns to identity.
    pub fn settle(&mut self, measured: impl IntoIterator<Item = (K, Rect)>) {
        self.pending.clear();
        self.was_dragging = false;
        for (id, rect) in measured {
            self.remember(id, rect);
        }
    }

    fn sorting_frame(
        &self,
        input: &FrameInput<'_, K>,
        sorting: &Sorting<K>,
        index: usize,
        id: K,
    ) -> ItemFrame<K> {
        let mut flags = FrameFlags::SORTING;
        if sorting.over == Some(id) {
            flags |= FrameFlags::OVER;
        }
        if id == sorting.active {
            flags |= FrameFlags::ACTIVE;
            if !self.drag_overlay {
                return ItemFrame {
                    id,
                    index,
                    transform: sorting.transform,
                    transition: None,
                    flags,
                };
            }
        } else if (input.disabled)(&id) {
            return ItemFrame {
                id,
                index,
                transform: Transform::IDENTITY,
                transition: self.transition,
                flags: flags | FrameFlags::DISABLED,
            };
        }
        let transform = input
            .rects
            .and_then(|rects| {
                input.strategy.item_transform(
                    rects,
                    sorting.active_index,
                    sorting.over_index,
                    index,
                )
            })
            .unwrap_or(Transform::IDENTITY);
        let change = LayoutChange {
            id,
            index,
            new_index: index,
            is_sorting: true,
            was_dragging: false,
            items_changed: false,
        };
        let transition = self.transition.filter(|_| self.animate.allows(&change));
        ItemFrame {
            id,
            index,
            transform,
            transition,
            flags,
        }
    }

    fn idle_frame(&mut self, input: &FrameInput<'_, K>, index: usize, id: K) -> ItemFrame<K> {
        let mut flags = FrameFlags::empty();
        if (input.disabled)(&id) {
            flags |= FrameFlags::DISABLED;
        }
        if let Some(i) = self.pending.iter().position(|(k, _)| *k == id) {
            let (_, transform) = self.pending.swap_remove(i);
            return ItemFrame {
                id,
                index,
                transform,
                transition: None,
                flags: flags | FrameFlags::LAYOUT,
            };
        }
        ItemFrame {
            id,
            index,
            transform: Transform::IDENTITY,
            transition: self.transition,
            flags,
        }
    }

    fn visual_of(&self, id: &K) -> Option<Rect> {
        self.visual.iter().find(|(k, _)| k == id).map(|(_, r)| *r)
    }

    fn remember(&mut self, id: K, rect: Rect) {
        match self.visual.iter_mut().find(|(k, _)| *k == id) {
            Some((_, r)) => *r = rect,
            None => self.visual.push((id, rect)),
        }
    }
}

/// Transform that shows `current` where `previous` was.
fn invert(previous: Rect, current: Rect) -> Transform {
    let ratio = |p: f64, c: f64| if c > 0.0 { p / c } else { 1.0 };
    Transform {
        translate: previous.origin() - current.origin(),
        scale_x: ratio(previous.width(), current.width()),
        scale_y: ratio(previous.height(), current.height()),
    }
}
