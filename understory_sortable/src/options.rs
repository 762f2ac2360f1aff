// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options accepted by [`create_sortable`](crate::create_sortable).
//!
//! Every field has a default; builders override one at a time:
//!
//! ```
//! use core::time::Duration;
//! use understory_dnd::modifiers::{Modifiers, restrict_to_vertical_axis};
//! use understory_dnd::sensor::ActivationConstraint;
//! use understory_sortable::options::SortableOptions;
//!
//! let options = SortableOptions::<u32>::default()
//!     .with_activation_constraint(ActivationConstraint::delay(Duration::from_millis(250), 5.0))
//!     .with_modifiers(Modifiers::new().with(restrict_to_vertical_axis))
//!     .with_disabled(|id| *id == 3);
//! assert!(options.validate().is_ok());
//! ```

use alloc::boxed::Box;
use core::fmt;

use understory_dnd::collision::CollisionStrategy;
use understory_dnd::coordinator::DisabledFn;
use understory_dnd::modifiers::Modifiers;
use understory_dnd::sensor::ActivationConstraint;

use crate::error::SortableError;
use crate::render::{AnimateLayoutChanges, Transition};
use crate::strategy::SortingStrategy;

bitflags::bitflags! {
    /// Input sources allowed to start a drag.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Sensors: u8 {
        /// Mouse, pen, and touch.
        const POINTER = 1 << 0;
        /// Space/Enter and arrow keys on a focused item.
        const KEYBOARD = 1 << 1;
    }
}

impl Default for Sensors {
    fn default() -> Self {
        Self::all()
    }
}

/// Configuration of a [`Sortable`](crate::Sortable).
pub struct SortableOptions<K> {
    /// How the other items make room while sorting.
    pub strategy: SortingStrategy,
    /// When a pointer press becomes a drag; `None` starts on press.
    pub activation_constraint: Option<ActivationConstraint>,
    /// How the targeted item is picked.
    pub collision: CollisionStrategy,
    /// Constraints on the drag transform, in order.
    pub modifiers: Modifiers,
    /// Items that can neither be dragged nor targeted.
    pub disabled: Option<DisabledFn<K>>,
    /// Whether displacements are animated.
    pub animate_layout_changes: AnimateLayoutChanges<K>,
    /// Transition of displaced items; `None` disables animation.
    pub transition: Option<Transition>,
    /// Enabled input sources.
    pub sensors: Sensors,
    /// Only a press on an item's handle rect starts a drag.
    pub handle: bool,
    /// Render the dragged item through a separate overlay frame.
    pub drag_overlay: bool,
}

impl<K> Default for SortableOptions<K> {
    fn default() -> Self {
        Self {
            strategy: SortingStrategy::default(),
            activation_constraint: None,
            collision: CollisionStrategy::default(),
            modifiers: Modifiers::new(),
            disabled: None,
            animate_layout_changes: AnimateLayoutChanges::default(),
            transition: Some(Transition::DEFAULT),
            sensors: Sensors::default(),
            handle: false,
            drag_overlay: false,
        }
    }
}

impl<K> fmt::Debug for SortableOptions<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableOptions")
            .field("strategy", &self.strategy)
            .field("activation_constraint", &self.activation_constraint)
            .field("collision", &self.collision)
            .field("modifiers", &self.modifiers)
            .field("disabled", &self.disabled.is_some())
            .field("animate_layout_changes", &self.animate_layout_changes)
            .field("transition", &self.transition)
            .field("sensors", &self.sensors)
            .field("handle", &self.handle)
            .field("drag_overlay", &self.drag_overlay)
            .finish()
    }
}

impl<K> SortableOptions<K> {
    /// Builder: set the sorting strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SortingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder: set the pointer activation constraint.
    #[must_use]
    pub fn with_activation_constraint(mut self, constraint: ActivationConstraint) -> Self {
        self.activation_constraint = Some(constraint);
        self
    }

    /// Builder: set the collision strategy.
    #[must_use]
    pub fn with_collision(mut self, collision: CollisionStrategy) -> Self {
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

    /// Builder: set the layout animation policy.
    #[must_use]
    pub fn with_animate_layout_changes(
        mut self,
        animate: impl Into<AnimateLayoutChanges<K>>,
    ) -> Self {
        self.animate_layout_changes = animate.into();
        self
    }

    /// Builder: set the transition; `None` disables animation.
    #[must_use]
    pub fn with_transition(mut self, transition: Option<Transition>) -> Self {
        self.transition = transition;
        self
    }

    /// Builder: set the enabled sensors.
    #[must_use]
    pub fn with_sensors(mut self, sensors: Sensors) -> Self {
        self.sensors = sensors;
        self
    }

    /// Builder: require presses on a drag handle.
    #[must_use]
    pub fn with_handle(mut self, handle: bool) -> Self {
        self.handle = handle;
        self
    }

    /// Builder: render the dragged item through an overlay.
    #[must_use]
    pub fn with_drag_overlay(mut self, drag_overlay: bool) -> Self {
        self.drag_overlay = drag_overlay;
        self
    }

    /// Check thresholds and easing.
    pub fn validate(&self) -> Result<(), SortableError> {
        if let Some(constraint) = self.activation_constraint
            && !constraint.is_valid()
        {
            return Err(SortableError::InvalidActivationConstraint);
        }
        if let Some(transition) = self.transition
            && !transition.is_valid()
        {
            return Err(SortableError::InvalidTransition);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Easing;
    use core::time::Duration;

    #[test]
    fn defaults() {
        let o = SortableOptions::<u32>::default();
        assert_eq!(o.strategy, SortingStrategy::VerticalList);
        assert_eq!(o.activation_constraint, None);
        assert_eq!(o.transition, Some(Transition::DEFAULT));
        assert_eq!(o.sensors, Sensors::POINTER | Sensors::KEYBOARD);
        assert!(o.modifiers.is_empty());
        assert!(!o.handle && !o.drag_overlay);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let negative = SortableOptions::<u32>::default()
            .with_activation_constraint(ActivationConstraint::distance(-1.0));
        assert_eq!(
            negative.validate(),
            Err(SortableError::InvalidActivationConstraint)
        );
        let nan_tolerance = SortableOptions::<u32>::default()
            .with_activation_constraint(ActivationConstraint::delay(Duration::ZERO, f64::NAN));
        assert_eq!(
            nan_tolerance.validate(),
            Err(SortableError::InvalidActivationConstraint)
        );
    }

    #[test]
    fn validate_rejects_bad_easing() {
        let o = SortableOptions::<u32>::default().with_transition(Some(Transition::new(
            Duration::from_millis(100),
            Easing::CubicBezier(-0.5, 0.0, 1.0, 1.0),
        )));
        assert_eq!(o.validate(), Err(SortableError::InvalidTransition));
        assert!(
            SortableOptions::<u32>::default()
                .with_transition(None)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn animate_accepts_bool() {
        let o = SortableOptions::<u32>::default().with_animate_layout_changes(false);
        assert!(matches!(o.animate_layout_changes, AnimateLayoutChanges::Never));
    }
}
