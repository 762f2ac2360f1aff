// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag coordinator: owns the single active drag session.
//!
//! ## Lifecycle
//!
//! - [`DragCoordinator::begin`] creates a [`DragSession`]. It is a no-op while
//!   another session exists, or for disabled or unknown items.
//! - [`DragCoordinator::update`] runs the modifier pipeline on the pointer
//!   delta, moves the active item's rect by the result, and asks the
//!   [`CollisionStrategy`] for the best slot. The candidates are the active
//!   item's own slot plus every enabled item with a measured rect.
//!   [`DragEvent::IndexChanged`] is published only when the target index
//!   differs from the last reported one.
//! - [`DragCoordinator::end`] commits through [`array_move`](crate::arrange::array_move)
//!   semantics. Subscribers see [`DragEvent::OrderChanged`] with the full new
//!   order while the session still exists, then [`DragEvent::Dropped`].
//! - [`DragCoordinator::cancel`] destroys the session without committing.
//!
//! ## Failure
//!
//! If the collection changed during the drag so that the target index is no
//! longer valid, the commit is aborted, the session is cancelled, and
//! [`DragOutcome::Aborted`] carries the [`DndError`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::collision::{CollisionInput, CollisionStrategy};
use crate::error::DndError;
use crate::events::{DragEvent, Emitter, SubscriptionId};
use crate::items::Items;
use crate::modifiers::{ModifierContext, Modifiers};
use crate::types::{Droppable, Transform};

/// Predicate marking items that can neither be dragged nor targeted.
pub type DisabledFn<K> = Box<dyn Fn(&K) -> bool>;

/// State of the one drag in progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession<K> {
    active: K,
    from_index: usize,
    initial_pointer: Point,
    pointer: Point,
    active_rect: Option<Rect>,
    transform: Transform,
    over: Option<K>,
    target_index: usize,
}

impl<K: Copy> DragSession<K> {
    /// The dragged item.
    pub fn active(&self) -> K {
        self.active
    }

    /// Index of the dragged item when the drag began.
    pub fn from_index(&self) -> usize {
        self.from_index
    }

    /// Pointer position at drag start.
    pub fn initial_pointer(&self) -> Point {
        self.initial_pointer
    }

    /// Latest pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Offset of the initial pointer inside the active rect.
    pub fn pointer_offset(&self) -> Vec2 {
        self.active_rect
            .map(|r| self.initial_pointer - r.origin())
            .unwrap_or(Vec2::ZERO)
    }

    /// Latest measured bounds of the dragged item, if any.
    pub fn active_rect(&self) -> Option<Rect> {
        self.active_rect
    }

    /// Current transform of the dragged item, after modifiers.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The item currently targeted, if any.
    pub fn over(&self) -> Option<K> {
        self.over
    }

    /// Index the dragged item would take if dropped now.
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// The rectangle used for collision detection.
    ///
    /// Falls back to an empty rect at the pointer when the item was not measured.
    pub fn collision_rect(&self) -> Rect {
        match self.active_rect {
            Some(r) => r + self.transform.translate,
            None => Rect::from_origin_size(self.pointer, (0.0, 0.0)),
        }
    }
}

/// Result of [`DragCoordinator::end`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// There was no session.
    Idle,
    /// Dropped where it started.
    Unchanged {
        /// The unchanged index.
        index: usize,
    },
    /// The collection was reordered.
    Committed {
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// The commit failed and the session was cancelled instead.
    Aborted(DndError),
}

/// Owner of the ordered collection, measurements, and the active drag.
pub struct DragCoordinator<K> {
    items: Items<K>,
    rects: Vec<Droppable<K>>,
    bounds: ModifierContext,
    modifiers: Modifiers,
    collision: CollisionStrategy,
    disabled: Option<DisabledFn<K>>,
    session: Option<DragSession<K>>,
    events: Emitter<DragEvent<K>>,
}

impl<K: core::fmt::Debug> core::fmt::Debug for DragCoordinator<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("items", &self.items)
            .field("measured", &self.rects.len())
            .field("collision", &self.collision)
            .field("modifiers", &self.modifiers)
            .field("session", &self.session)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq> DragCoordinator<K> {
    /// Create a coordinator with closest-center collision detection and no modifiers.
    pub fn new(items: Items<K>) -> Self {
        Self {
            items,
            rects: Vec::new(),
            bounds: ModifierContext::default(),
            modifiers: Modifiers::new(),
            collision: CollisionStrategy::default(),
            disabled: None,
            session: None,
            events: Emitter::new(),
        }
    }

    /// Builder: set the collision strategy.
    #[must_use]
    pub fn with_collision_strategy(mut self, collision: CollisionStrategy) -> Self {
        self.collision = collision;
        self
    }

    /// Builder: set the modifier pipeline.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Builder: set the disabled predicate.
    #[must_use]
    pub fn with_disabled(mut self, disabled: impl Fn(&K) -> bool + 'static) -> Self {
        self.disabled = Some(Box::new(disabled));
        self
    }

    /// The ordered collection.
    pub fn items(&self) -> &Items<K> {
        &self.items
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession<K>> {
        self.session.as_ref()
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` if `id` is disabled.
    pub fn is_disabled(&self, id: &K) -> bool {
        self.disabled.as_ref().is_some_and(|f| f(id))
    }

    /// The collision strategy.
    pub fn collision_strategy(&self) -> CollisionStrategy {
        self.collision
    }

    /// Replace the collision strategy.
    pub fn set_collision_strategy(&mut self, collision: CollisionStrategy) {
        self.collision = collision;
    }

    /// Replace the modifier pipeline.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Replace the disabled predicate.
    pub fn set_disabled(&mut self, disabled: Option<DisabledFn<K>>) {
        self.disabled = disabled;
    }

    /// Modifier bounds (container, scrollable ancestor, window).
    ///
    /// The `active_rect` field is ignored; it is filled from the session.
    pub fn set_bounds(&mut self, bounds: ModifierContext) {
        self.bounds = ModifierContext {
            active_rect: None,
            ..bounds
        };
    }

    /// Current modifier bounds.
    pub fn bounds(&self) -> &ModifierContext {
        &self.bounds
    }

    /// Record the measured bounds of one item. Unknown ids are ignored.
    ///
    /// Measuring the dragged item mid-drag resizes its collision rect and
    /// recomputes the target.
    pub fn measure(&mut self, id: K, rect: Rect) {
        if !self.items.contains(&id) {
            return;
        }
        match self.rects.iter_mut().find(|d| d.id == id) {
            Some(d) => d.rect = rect,
            None => self.rects.push(Droppable { id, rect }),
        }
        if let Some(session) = self.session.as_mut()
            && session.active == id
        {
            session.active_rect = Some(rect);
            self.refresh();
        }
    }

    /// Re-run collision detection at the last pointer position.
    ///
    /// Call after measuring a batch mid-drag. Returns the new target index
    /// when it changed.
    pub fn refresh(&mut self) -> Option<usize> {
        let pointer = self.session.as_ref()?.pointer;
        self.update(pointer)
    }

    /// Measured bounds of `id`.
    pub fn rect_of(&self, id: &K) -> Option<Rect> {
        self.rects.iter().find(|d| d.id == *id).map(|d| d.rect)
    }

    /// Measured bounds in collection order; `None` for unmeasured items.
    pub fn rects_in_order(&self) -> Vec<Option<Rect>> {
        self.items.iter().map(|id| self.rect_of(&id)).collect()
    }

    /// Replace the collection.
    ///
    /// Measurements of removed items are dropped. If the dragged item was
    /// removed, the session is cancelled.
    pub fn set_items(&mut self, items: Items<K>) {
        self.items = items;
        let items = &self.items;
        self.rects.retain(|d| items.contains(&d.id));
        if let Some(active) = self.session.as_ref().map(|s| s.active)
            && !self.items.contains(&active)
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("dragged item removed from collection; cancelling");
            self.cancel();
        }
    }

    /// Subscribe to drag events.
    pub fn subscribe(&mut self, listener: impl FnMut(&DragEvent<K>) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Drop every subscription.
    pub fn clear_subscriptions(&mut self) {
        self.events.clear();
    }

    /// Begin dragging `item` from `pointer`.
    ///
    /// Returns `false` without side effects if a session is already active,
    /// or if the item is disabled or not in the collection.
    pub fn begin(&mut self, item: K, pointer: Point) -> bool {
        if self.session.is_some() {
            #[cfg(feature = "tracing")]
            tracing::trace!("ignoring drag start while another drag is active");
            return false;
        }
        if self.is_disabled(&item) {
            return false;
        }
        let Some(index) = self.items.index_of(&item) else {
            return false;
        };
        self.session = Some(DragSession {
            active: item,
            from_index: index,
            initial_pointer: pointer,
            pointer,
            active_rect: self.rect_of(&item),
            transform: Transform::IDENTITY,
            over: None,
            target_index: index,
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(index, "drag started");
        self.events.emit(&DragEvent::Started {
            active: item,
            index,
        });
        true
    }

    /// Move the active drag to `pointer`.
    ///
    /// Returns the new target index when it changed.
    pub fn update(&mut self, pointer: Point) -> Option<usize> {
        let active = self.session.as_ref()?.active;
        let droppables = self.droppables(active);
        let current_index = self.items.index_of(&active);
        let session = self.session.as_mut()?;

        session.pointer = pointer;
        let ctx = ModifierContext {
            active_rect: session.active_rect,
            ..self.bounds
        };
        let raw = Transform::translate(pointer - session.initial_pointer);
        session.transform = self.modifiers.apply(raw, &ctx);

        let collisions = self.collision.detect(&CollisionInput {
            collision_rect: session.collision_rect(),
            droppables: &droppables,
            pointer: Some(pointer),
        });
        session.over = collisions.first().map(|c| c.id);
        let target = session
            .over
            .and_then(|id| self.items.index_of(&id))
            .or(current_index)
            .unwrap_or(session.from_index);

        if target == session.target_index {
            return None;
        }
        let previous = session.target_index;
        session.target_index = target;
        #[cfg(feature = "tracing")]
        tracing::debug!(previous, current = target, "drag target changed");
        self.events.emit(&DragEvent::IndexChanged {
            active,
            previous,
            current: target,
        });
        Some(target)
    }

    /// Drop the active item at its current target and destroy the session.
    pub fn end(&mut self) -> DragOutcome {
        let Some(session) = self.session.as_ref() else {
            return DragOutcome::Idle;
        };
        let active = session.active;
        let to = session.target_index;
        let Some(from) = self.items.index_of(&active) else {
            self.cancel();
            return DragOutcome::Aborted(DndError::UnknownItem);
        };

        if from == to {
            self.session = None;
            #[cfg(feature = "tracing")]
            tracing::debug!(index = from, "drag dropped in place");
            self.events.emit(&DragEvent::Dropped { active, from, to });
            return DragOutcome::Unchanged { index: from };
        }

        if let Err(err) = self.items.commit_move(from, to) {
            #[cfg(feature = "tracing")]
            tracing::warn!(%err, "aborting drop; cancelling drag");
            self.cancel();
            return DragOutcome::Aborted(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(from, to, "drag committed");
        let order = self.items.as_slice().to_vec();
        self.events.emit(&DragEvent::OrderChanged {
            active,
            from,
            to,
            order,
        });
        self.session = None;
        self.events.emit(&DragEvent::Dropped { active, from, to });
        DragOutcome::Committed { from, to }
    }

    /// Destroy the active session without committing.
    ///
    /// Returns `false` if there was no session.
    pub fn cancel(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!("drag cancelled");
        self.events.emit(&DragEvent::Cancelled {
            active: session.active,
        });
        true
    }

    fn droppables(&self, active: K) -> Vec<Droppable<K>> {
        self.items
            .iter()
            .filter(|id| *id == active || !self.is_disabled(id))
            .filter_map(|id| self.rect_of(&id).map(|rect| Droppable { id, rect }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::restrict_to_vertical_axis;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    /// Five 300x100 rows stacked from y = 0.
    fn column(ids: &[u32]) -> DragCoordinator<u32> {
        let mut c = DragCoordinator::new(Items::new(ids.iter().copied()).unwrap());
        for (i, id) in ids.iter().enumerate() {
            let y = i as f64 * 100.0;
            c.measure(*id, Rect::new(0.0, y, 300.0, y + 100.0));
        }
        c
    }

    fn record(c: &mut DragCoordinator<u32>) -> Rc<RefCell<Vec<DragEvent<u32>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        c.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn begin_twice_keeps_first_session() {
        let mut c = column(&[1, 2, 3]);
        assert!(c.begin(1, Point::new(10.0, 10.0)));
        assert!(!c.begin(2, Point::new(10.0, 110.0)));
        assert_eq!(c.session().map(|s| s.active()), Some(1));
    }

    #[test]
    fn disabled_and_unknown_items_do_not_begin() {
        let mut c = column(&[1, 2, 3]).with_disabled(|id| *id == 2);
        assert!(!c.begin(2, Point::ZERO));
        assert!(!c.begin(99, Point::ZERO));
        assert!(!c.is_dragging());
    }

    #[test]
    fn update_reports_only_changes() {
        let mut c = column(&[1, 2, 3, 4, 5]);
        let log = record(&mut c);
        c.begin(1, Point::new(150.0, 50.0));
        assert_eq!(c.update(Point::new(150.0, 60.0)), None);
        assert_eq!(c.update(Point::new(150.0, 160.0)), Some(1));
        assert_eq!(c.update(Point::new(150.0, 170.0)), None);
        assert_eq!(c.update(Point::new(150.0, 260.0)), Some(2));
        let events = log.borrow();
        assert_eq!(
            events[1..],
            [
                DragEvent::IndexChanged {
                    active: 1,
                    previous: 0,
                    current: 1
                },
                DragEvent::IndexChanged {
                    active: 1,
                    previous: 1,
                    current: 2
                },
            ]
        );
    }

    #[test]
    fn end_commits_and_publishes_order_before_drop() {
        let mut c = column(&[1, 2, 3]);
        let log = record(&mut c);
        c.begin(1, Point::new(150.0, 50.0));
        c.update(Point::new(150.0, 250.0));
        assert_eq!(c.end(), DragOutcome::Committed { from: 0, to: 2 });
        assert_eq!(c.items().as_slice(), &[2, 3, 1]);
        assert!(!c.is_dragging());
        assert_eq!(
            *log.borrow(),
            vec![
                DragEvent::Started {
                    active: 1,
                    index: 0
                },
                DragEvent::IndexChanged {
                    active: 1,
                    previous: 0,
                    current: 2
                },
                DragEvent::OrderChanged {
                    active: 1,
                    from: 0,
                    to: 2,
                    order: vec![2, 3, 1]
                },
                DragEvent::Dropped {
                    active: 1,
                    from: 0,
                    to: 2
                },
            ]
        );
    }

    #[test]
    fn drop_in_place_does_not_publish_order() {
        let mut c = column(&[1, 2, 3]);
        let log = record(&mut c);
        c.begin(2, Point::new(150.0, 150.0));
        c.update(Point::new(150.0, 160.0));
        assert_eq!(c.end(), DragOutcome::Unchanged { index: 1 });
        assert!(
            !log.borrow()
                .iter()
                .any(|e| matches!(e, DragEvent::OrderChanged { .. }))
        );
    }

    #[test]
    fn cancel_never_commits() {
        let mut c = column(&[1, 2, 3]);
        let log = record(&mut c);
        c.begin(1, Point::new(150.0, 50.0));
        c.update(Point::new(150.0, 250.0));
        assert!(c.cancel());
        assert!(!c.cancel());
        assert_eq!(c.items().as_slice(), &[1, 2, 3]);
        assert_eq!(c.end(), DragOutcome::Idle);
        assert_eq!(
            log.borrow().last(),
            Some(&DragEvent::Cancelled { active: 1 })
        );
    }

    #[test]
    fn disabled_items_are_not_targets() {
        let mut c = column(&[1, 2, 3]).with_disabled(|id| *id == 2);
        c.begin(1, Point::new(150.0, 50.0));
        c.update(Point::new(150.0, 150.0));
        let session = c.session().unwrap();
        assert_ne!(session.over(), Some(2));
    }

    #[test]
    fn measuring_the_dragged_item_retargets() {
        let mut c = column(&[1, 2, 3]);
        let log = record(&mut c);
        c.begin(1, Point::new(150.0, 50.0));
        assert_eq!(c.update(Point::new(150.0, 90.0)), None);

        // The dragged row grows to twice its height.
        c.measure(1, Rect::new(0.0, 0.0, 300.0, 200.0));
        let session = c.session().unwrap();
        assert_eq!(session.active_rect(), Some(Rect::new(0.0, 0.0, 300.0, 200.0)));
        assert_eq!(session.collision_rect(), Rect::new(0.0, 40.0, 300.0, 240.0));
        assert_eq!(session.target_index(), 1);
        assert_eq!(
            log.borrow().last(),
            Some(&DragEvent::IndexChanged {
                active: 1,
                previous: 0,
                current: 1
            })
        );
        assert_eq!(c.refresh(), None);
    }

    #[test]
    fn modifiers_shape_the_transform() {
        let mut c =
            column(&[1, 2]).with_modifiers(Modifiers::new().with(restrict_to_vertical_axis));
        c.begin(1, Point::new(150.0, 50.0));
        c.update(Point::new(400.0, 80.0));
        let session = c.session().unwrap();
        assert_eq!(session.transform(), Transform::from_xy(0.0, 30.0));
        assert_eq!(session.collision_rect(), Rect::new(0.0, 30.0, 300.0, 130.0));
        assert_eq!(session.pointer_offset(), Vec2::new(150.0, 50.0));
    }

    #[test]
    fn shrinking_collection_mid_drag_aborts_commit() {
        let mut c = column(&[1, 2, 3, 4]);
        c.begin(1, Point::new(150.0, 50.0));
        c.update(Point::new(150.0, 350.0));
        assert_eq!(c.session().map(|s| s.target_index()), Some(3));
        c.set_items(Items::new([1, 2]).unwrap());
        assert!(c.is_dragging());
        assert_eq!(
            c.end(),
            DragOutcome::Aborted(DndError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert!(!c.is_dragging());
        assert_eq!(c.items().as_slice(), &[1, 2]);
    }

    #[test]
    fn removing_the_dragged_item_cancels() {
        let mut c = column(&[1, 2, 3]);
        let log = record(&mut c);
        c.begin(2, Point::new(150.0, 150.0));
        c.set_items(Items::new([1, 3]).unwrap());
        assert!(!c.is_dragging());
        assert_eq!(
            log.borrow().last(),
            Some(&DragEvent::Cancelled { active: 2 })
        );
        assert_eq!(c.rect_of(&2), None);
    }
}
