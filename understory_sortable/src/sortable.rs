// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sortable facade: sensors, coordinator, and render adapter wired together.
//!
//! ## Input
//!
//! - [`Sortable::pointer_event`] hit-tests presses against measured item rects
//!   (or handle rects when [`SortableOptions::handle`] is set) and skips
//!   disabled items.
//! - [`Sortable::key_event`] drives the keyboard sensor with
//!   [`SortableKeyboardCoordinates`]. Escape also cancels a pointer drag.
//! - [`Sortable::tick`] fires press-and-hold activations.
//!
//! Only the sensor that started a drag may move, drop, or cancel it.
//!
//! ## Measurement
//!
//! Rects are caller-measured in world space. After a drop is committed the
//! caller renders the new order and calls [`Sortable::measure`] again; moved
//! items then produce layout-animation frames.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use understory_dnd::coordinator::{DragCoordinator, DragOutcome, DragSession};
use understory_dnd::events::{DragEvent, SubscriptionId};
use understory_dnd::items::Items;
use understory_dnd::keyboard::{KeyCode, KeyboardSensor};
use understory_dnd::modifiers::ModifierContext;
use understory_dnd::sensor::{PointerEvent, PointerEventKind, PointerSensor, SensorEvent};
use understory_dnd::types::Droppable;

use crate::coordinates::SortableKeyboardCoordinates;
use crate::error::SortableError;
use crate::options::{Sensors, SortableOptions};
use crate::render::{FrameInput, ItemFrame, RenderAdapter, Sorting};
use crate::strategy::SortingStrategy;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Source {
    Pointer,
    Keyboard,
}

/// Create a sortable collection.
///
/// Fails if `items` contains a duplicate or `options` does not validate.
pub fn create_sortable<K: Copy + Eq + 'static>(
    items: impl IntoIterator<Item = K>,
    options: SortableOptions<K>,
) -> Result<Sortable<K>, SortableError> {
    options.validate()?;
    let items = Items::new(items)?;
    let SortableOptions {
        strategy,
        activation_constraint,
        collision,
        modifiers,
        disabled,
        animate_layout_changes,
        transition,
        sensors,
        handle,
        drag_overlay,
    } = options;
    let mut coordinator = DragCoordinator::new(items)
        .with_collision_strategy(collision)
        .with_modifiers(modifiers);
    coordinator.set_disabled(disabled);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        len = coordinator.items().len(),
        ?strategy,
        "sortable created"
    );
    Ok(Sortable {
        coordinator,
        pointer: PointerSensor::new(activation_constraint),
        keyboard: KeyboardSensor::new(),
        render: RenderAdapter::new(transition, animate_layout_changes, drag_overlay),
        strategy,
        sensors,
        handle,
        handles: Vec::new(),
        source: None,
        destroyed: false,
    })
}

/// A sortable collection.
pub struct Sortable<K> {
    coordinator: DragCoordinator<K>,
    pointer: PointerSensor<K>,
    keyboard: KeyboardSensor,
    render: RenderAdapter<K>,
    strategy: SortingStrategy,
    sensors: Sensors,
    handle: bool,
    handles: Vec<(K, Rect)>,
    source: Option<Source>,
    destroyed: bool,
}

impl<K: fmt::Debug> fmt::Debug for Sortable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sortable")
            .field("coordinator", &self.coordinator)
            .field("render", &self.render)
            .field("strategy", &self.strategy)
            .field("sensors", &self.sensors)
            .field("handle", &self.handle)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + 'static> Sortable<K> {
    /// Items in their current order.
    pub fn items(&self) -> &[K] {
        self.coordinator.items().as_slice()
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession<K>> {
        self.coordinator.session()
    }

    /// The dragged item, if any.
    pub fn active(&self) -> Option<K> {
        self.coordinator.session().map(DragSession::active)
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.coordinator.is_dragging()
    }

    /// Returns `true` once [`destroy`](Self::destroy) was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The sorting strategy.
    pub fn strategy(&self) -> SortingStrategy {
        self.strategy
    }

    /// Returns `true` if `id` is disabled.
    pub fn is_disabled(&self, id: &K) -> bool {
        self.coordinator.is_disabled(id)
    }

    /// Call `on_order_changed` with the full new order after every committed drop.
    pub fn subscribe(
        &mut self,
        mut on_order_changed: impl FnMut(&[K]) + 'static,
    ) -> SubscriptionId {
        self.coordinator.subscribe(move |event| {
            if let DragEvent::OrderChanged { order, .. } = event {
                on_order_changed(order);
            }
        })
    }

    /// Observe every drag event.
    pub fn subscribe_events(
        &mut self,
        listener: impl FnMut(&DragEvent<K>) + 'static,
    ) -> SubscriptionId {
        self.coordinator.subscribe(listener)
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.coordinator.unsubscribe(id)
    }

    /// Tear down: cancel any drag without committing, drop every listener,
    /// and ignore further input.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if self.coordinator.cancel() {
            self.settle();
        }
        self.pointer.reset();
        self.keyboard.reset();
        self.source = None;
        self.coordinator.clear_subscriptions();
        self.destroyed = true;
        #[cfg(feature = "tracing")]
        tracing::debug!("sortable destroyed");
    }

    /// Record measured item bounds and start layout animations for moved items.
    ///
    /// Measure every item that moved in one call so they animate together.
    pub fn measure(&mut self, rects: impl IntoIterator<Item = (K, Rect)>) {
        if self.destroyed {
            return;
        }
        for (id, rect) in rects {
            self.coordinator.measure(id, rect);
        }
        if self.coordinator.is_dragging() {
            self.coordinator.refresh();
        }
        let coordinator = &self.coordinator;
        self.render.relayout(
            coordinator.items().as_slice(),
            &coordinator.rects_in_order(),
            &|id| coordinator.is_disabled(id),
            coordinator.is_dragging(),
        );
    }

    /// Set or clear the drag handle of `id`.
    pub fn set_handle_rect(&mut self, id: K, rect: Option<Rect>) {
        self.handles.retain(|(k, _)| *k != id);
        if let Some(rect) = rect
            && self.coordinator.items().contains(&id)
        {
            self.handles.push((id, rect));
        }
    }

    /// Bounds used by the restricting modifiers.
    pub fn set_bounds(&mut self, bounds: ModifierContext) {
        self.coordinator.set_bounds(bounds);
    }

    /// Replace the collection.
    ///
    /// If the dragged item was removed, the drag is cancelled.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = K>) -> Result<(), SortableError> {
        if self.destroyed {
            return Err(SortableError::Destroyed);
        }
        let items = Items::new(items)?;
        let was_dragging = self.coordinator.is_dragging();
        self.coordinator.set_items(items);
        let coordinator = &self.coordinator;
        self.handles.retain(|(k, _)| coordinator.items().contains(k));
        if was_dragging && !self.coordinator.is_dragging() {
            self.pointer.reset();
            self.keyboard.reset();
            self.source = None;
            self.settle();
        }
        Ok(())
    }

    /// Feed a raw pointer event. Returns the sensor event it produced, if any.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> Option<SensorEvent<K>> {
        if self.destroyed || !self.sensors.contains(Sensors::POINTER) {
            return None;
        }
        let target = match event.kind {
            PointerEventKind::Down(_) => self.draggable_at(event.position),
            _ => None,
        };
        let out = self.pointer.handle(event, target)?;
        self.apply(out, Source::Pointer);
        Some(out)
    }

    /// Feed a key press. `focused` is the item that has keyboard focus.
    pub fn key_event(&mut self, code: KeyCode, focused: Option<K>) -> Option<SensorEvent<K>> {
        if self.destroyed {
            return None;
        }
        if code == KeyCode::Escape && self.source == Some(Source::Pointer) {
            let out = self.pointer.cancel()?;
            self.apply(out, Source::Pointer);
            return Some(out);
        }
        if !self.sensors.contains(Sensors::KEYBOARD) {
            return None;
        }
        let focused = focused
            .filter(|id| !self.coordinator.is_disabled(id))
            .and_then(|id| self.coordinator.rect_of(&id).map(|r| (id, r.center())));
        let targets = self.keyboard_targets();
        let collision_rect = self.coordinator.session().map(DragSession::collision_rect);
        let coordinates = SortableKeyboardCoordinates::new(&targets, collision_rect);
        let out = self.keyboard.handle(code, focused, &coordinates)?;
        self.apply(out, Source::Keyboard);
        Some(out)
    }

    /// Advance time for press-and-hold activation.
    pub fn tick(&mut self, now: core::time::Duration) -> Option<SensorEvent<K>> {
        if self.destroyed {
            return None;
        }
        let out = self.pointer.tick(now)?;
        self.apply(out, Source::Pointer);
        Some(out)
    }

    /// One frame per item, in collection order.
    pub fn frames(&mut self) -> Vec<ItemFrame<K>> {
        let rects: Option<Vec<Rect>> = self.coordinator.rects_in_order().into_iter().collect();
        let sorting = self.sorting();
        let coordinator = &self.coordinator;
        self.render.frames(&FrameInput {
            items: coordinator.items().as_slice(),
            rects: rects.as_deref(),
            sorting,
            strategy: self.strategy,
            disabled: &|id| coordinator.is_disabled(id),
        })
    }

    /// The drag overlay frame, when overlays are enabled and a drag is active.
    pub fn overlay_frame(&self) -> Option<ItemFrame<K>> {
        self.render.overlay_frame(self.sorting().as_ref())
    }

    fn sorting(&self) -> Option<Sorting<K>> {
        let session = self.coordinator.session()?;
        let active = session.active();
        Some(Sorting {
            active,
            active_index: self
                .coordinator
                .items()
                .index_of(&active)
                .unwrap_or(session.from_index()),
            over: session.over(),
            over_index: session.target_index(),
            transform: session.transform(),
        })
    }

    fn apply(&mut self, event: SensorEvent<K>, source: Source) {
        match event {
            SensorEvent::Start {
                item,
                origin,
                position,
            } => {
                if !self.coordinator.begin(item, origin) {
                    self.reset_sensor(source);
                    return;
                }
                self.source = Some(source);
                if position != origin {
                    self.coordinator.update(position);
                }
            }
            SensorEvent::Move { position } => {
                if self.source == Some(source) {
                    self.coordinator.update(position);
                }
            }
            SensorEvent::End { position } => {
                if self.source != Some(source) {
                    return;
                }
                self.source = None;
                self.coordinator.update(position);
                match self.coordinator.end() {
                    DragOutcome::Aborted(_) => self.settle(),
                    DragOutcome::Idle => {}
                    DragOutcome::Unchanged { .. } | DragOutcome::Committed { .. } => {
                        self.render.drag_ended();
                    }
                }
            }
            SensorEvent::Cancel => {
                if self.source != Some(source) {
                    return;
                }
                self.source = None;
                self.coordinator.cancel();
                self.settle();
            }
        }
    }

    fn reset_sensor(&mut self, source: Source) {
        match source {
            Source::Pointer => self.pointer.reset(),
            Source::Keyboard => self.keyboard.reset(),
        }
    }

    /// Return every item to identity at its measured rect.
    fn settle(&mut self) {
        let coordinator = &self.coordinator;
        self.render.settle(
            coordinator
                .items()
                .iter()
                .filter_map(|id| coordinator.rect_of(&id).map(|rect| (id, rect))),
        );
    }

    fn draggable_at(&self, point: Point) -> Option<K> {
        self.coordinator
            .items()
            .iter()
            .filter(|id| !self.coordinator.is_disabled(id))
            .find(|id| {
                let rect = if self.handle {
                    self.handles.iter().find(|(k, _)| k == id).map(|(_, r)| *r)
                } else {
                    self.coordinator.rect_of(id)
                };
                rect.is_some_and(|r| r.contains(point))
            })
    }

    fn keyboard_targets(&self) -> Vec<Droppable<K>> {
        let active = self.active();
        self.coordinator
            .items()
            .iter()
            .filter(|id| Some(*id) == active || !self.coordinator.is_disabled(id))
            .filter_map(|id| self.coordinator.rect_of(&id).map(|rect| Droppable { id, rect }))
            .collect()
    }
}
