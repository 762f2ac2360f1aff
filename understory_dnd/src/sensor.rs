// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer sensor: turns raw pointer input into drag start/move/end events.
//!
//! ## State machine
//!
//! ```text
//! Idle --down(primary, on item)--> Pending --constraint met--> Active --up--> Idle
//!                                    |  \--tolerance exceeded--> Discarded --up--> Idle
//!                                    \--up--> Idle (no-op)
//! ```
//!
//! Without an [`ActivationConstraint`] the sensor goes straight from `Idle` to
//! `Active` on pointer-down.
//!
//! ## Invariants
//!
//! 1. Only one pointer is tracked. Any event from a different pointer while one
//!    is pending, active, or discarded is ignored.
//! 2. [`SensorEvent::Start`] is emitted at most once per press.
//! 3. A pending press never produces [`SensorEvent::End`] or [`SensorEvent::Cancel`].
//! 4. After a delay activation is discarded, nothing is emitted until the pointer is released.
//!
//! ## Time
//!
//! Timestamps are caller-supplied monotonic durations. Delay constraints are
//! evaluated on [`PointerSensor::tick`] and on movement of the tracked pointer.
//! When a movement arrives after the deadline, the activation that a timer would
//! already have fired is applied first. A release never activates.

use core::time::Duration;

use kurbo::Point;

/// Identifier of a physical pointer (mouse, pen, or touch contact).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Pointer buttons. Only [`PointerButton::Primary`] can start a drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Auxiliary,
    /// Any other button.
    Other(u16),
}

/// Kind of a raw pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// The platform cancelled the pointer (e.g. lost capture).
    Cancel,
}

/// A raw pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Which pointer produced the event.
    pub pointer: PointerId,
    /// What happened.
    pub kind: PointerEventKind,
    /// World-space position.
    pub position: Point,
    /// Monotonic timestamp.
    pub time: Duration,
}

impl PointerEvent {
    /// Primary-button press of pointer `0`.
    pub fn down(position: Point, time: Duration) -> Self {
        Self {
            pointer: PointerId::default(),
            kind: PointerEventKind::Down(PointerButton::Primary),
            position,
            time,
        }
    }

    /// Movement of pointer `0`.
    pub fn moved(position: Point, time: Duration) -> Self {
        Self {
            pointer: PointerId::default(),
            kind: PointerEventKind::Move,
            position,
            time,
        }
    }

    /// Release of pointer `0`.
    pub fn up(position: Point, time: Duration) -> Self {
        Self {
            pointer: PointerId::default(),
            kind: PointerEventKind::Up,
            position,
            time,
        }
    }

    /// Cancellation of pointer `0`.
    pub fn cancel(position: Point, time: Duration) -> Self {
        Self {
            pointer: PointerId::default(),
            kind: PointerEventKind::Cancel,
            position,
            time,
        }
    }

    /// The same event attributed to another pointer.
    #[must_use]
    pub fn with_pointer(self, pointer: PointerId) -> Self {
        Self { pointer, ..self }
    }
}

/// Rule deciding when a press becomes a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ActivationConstraint {
    /// Start once the pointer has moved at least `distance` from where it was pressed.
    Distance {
        /// Minimum Euclidean distance, in world units.
        distance: f64,
    },
    /// Start after the pointer has been held for `delay`, provided it stayed within `tolerance`.
    Delay {
        /// Hold duration.
        delay: Duration,
        /// Maximum Euclidean movement allowed during the hold.
        tolerance: f64,
    },
}

impl ActivationConstraint {
    /// A minimum-distance constraint.
    pub const fn distance(distance: f64) -> Self {
        Self::Distance { distance }
    }

    /// A press-and-hold constraint.
    pub const fn delay(delay: Duration, tolerance: f64) -> Self {
        Self::Delay { delay, tolerance }
    }

    /// Returns `true` if all thresholds are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Distance { distance } => distance.is_finite() && distance >= 0.0,
            Self::Delay { tolerance, .. } => tolerance.is_finite() && tolerance >= 0.0,
        }
    }
}

/// Output of a sensor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SensorEvent<K> {
    /// A drag should begin.
    Start {
        /// Item the press landed on.
        item: K,
        /// Where the press happened.
        origin: Point,
        /// Where the pointer is now (differs from `origin` when a constraint delayed activation).
        position: Point,
    },
    /// The active drag moved.
    Move {
        /// Current position.
        position: Point,
    },
    /// The active drag was released.
    End {
        /// Final position.
        position: Point,
    },
    /// The active drag was aborted.
    Cancel,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum PointerState<K> {
    Idle,
    Pending {
        pointer: PointerId,
        item: K,
        origin: Point,
        pressed_at: Duration,
    },
    Active {
        pointer: PointerId,
        position: Point,
    },
    Discarded {
        pointer: PointerId,
    },
}

/// Pointer sensor with an optional activation constraint.
#[derive(Clone, Debug)]
pub struct PointerSensor<K> {
    constraint: Option<ActivationConstraint>,
    state: PointerState<K>,
}

impl<K: Copy> PointerSensor<K> {
    /// Create a sensor. `None` activates immediately on press.
    pub fn new(constraint: Option<ActivationConstraint>) -> Self {
        Self {
            constraint,
            state: PointerState::Idle,
        }
    }

    /// The configured constraint.
    pub fn constraint(&self) -> Option<ActivationConstraint> {
        self.constraint
    }

    /// Returns `true` while a press is waiting for its constraint.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, PointerState::Pending { .. })
    }

    /// Returns `true` while a drag is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, PointerState::Active { .. })
    }

    /// Process a raw event. `target` is the draggable item under a press, if any;
    /// it is ignored for other event kinds.
    pub fn handle(&mut self, event: &PointerEvent, target: Option<K>) -> Option<SensorEvent<K>> {
        if let PointerEventKind::Down(button) = event.kind {
            return self.on_down(event, button, target);
        }
        if self.tracked_pointer() != Some(event.pointer) {
            return None;
        }
        match event.kind {
            PointerEventKind::Move => {
                // Let an overdue hold fire before interpreting the movement.
                if let Some(SensorEvent::Start { item, origin, .. }) = self.tick(event.time) {
                    self.state = PointerState::Active {
                        pointer: event.pointer,
                        position: event.position,
                    };
                    return Some(SensorEvent::Start {
                        item,
                        origin,
                        position: event.position,
                    });
                }
                self.on_move(event.position)
            }
            PointerEventKind::Up => self.on_up(event.position),
            PointerEventKind::Cancel => self.cancel(),
            PointerEventKind::Down(_) => None,
        }
    }

    /// Fire a pending delay activation whose deadline has passed.
    pub fn tick(&mut self, now: Duration) -> Option<SensorEvent<K>> {
        let PointerState::Pending {
            pointer,
            item,
            origin,
            pressed_at,
        } = self.state
        else {
            return None;
        };
        let Some(ActivationConstraint::Delay { delay, .. }) = self.constraint else {
            return None;
        };
        if now.saturating_sub(pressed_at) < delay {
            return None;
        }
        self.state = PointerState::Active {
            pointer,
            position: origin,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?delay, "pointer hold satisfied activation delay");
        Some(SensorEvent::Start {
            item,
            origin,
            position: origin,
        })
    }

    /// Abort the current press. Emits [`SensorEvent::Cancel`] only if a drag was active.
    pub fn cancel(&mut self) -> Option<SensorEvent<K>> {
        let was_active = self.is_active();
        self.state = PointerState::Idle;
        was_active.then_some(SensorEvent::Cancel)
    }

    /// Forget any press without emitting anything.
    pub fn reset(&mut self) {
        self.state = PointerState::Idle;
    }

    fn tracked_pointer(&self) -> Option<PointerId> {
        match self.state {
            PointerState::Idle => None,
            PointerState::Pending { pointer, .. }
            | PointerState::Active { pointer, .. }
            | PointerState::Discarded { pointer } => Some(pointer),
        }
    }

    fn on_down(
        &mut self,
        event: &PointerEvent,
        button: PointerButton,
        target: Option<K>,
    ) -> Option<SensorEvent<K>> {
        if !matches!(self.state, PointerState::Idle) || button != PointerButton::Primary {
            return None;
        }
        let item = target?;
        if self.constraint.is_none() {
            self.state = PointerState::Active {
                pointer: event.pointer,
                position: event.position,
            };
            return Some(SensorEvent::Start {
                item,
                origin: event.position,
                position: event.position,
            });
        }
        self.state = PointerState::Pending {
            pointer: event.pointer,
            item,
            origin: event.position,
            pressed_at: event.time,
        };
        None
    }

    fn on_move(&mut self, position: Point) -> Option<SensorEvent<K>> {
        match self.state {
            PointerState::Pending {
                pointer,
                item,
                origin,
                ..
            } => {
                let moved = origin.distance(position);
                match self.constraint {
                    Some(ActivationConstraint::Distance { distance }) if moved >= distance => {
                        self.state = PointerState::Active { pointer, position };
                        Some(SensorEvent::Start {
                            item,
                            origin,
                            position,
                        })
                    }
                    Some(ActivationConstraint::Delay { tolerance, .. }) if moved > tolerance => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(moved, tolerance, "pending activation discarded");
                        self.state = PointerState::Discarded { pointer };
                        None
                    }
                    _ => None,
                }
            }
            PointerState::Active {
                pointer,
                position: last,
            } => {
                if last == position {
                    return None;
                }
                self.state = PointerState::Active { pointer, position };
                Some(SensorEvent::Move { position })
            }
            PointerState::Idle | PointerState::Discarded { .. } => None,
        }
    }

    fn on_up(&mut self, position: Point) -> Option<SensorEvent<K>> {
        let was_active = self.is_active();
        self.state = PointerState::Idle;
        was_active.then_some(SensorEvent::End { position })
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn constraints_use_kebab_case_tags() {
        let delay = ActivationConstraint::delay(Duration::from_millis(250), 5.0);
        let json = serde_json::to_string(&delay).unwrap();
        assert_eq!(
            json,
            r#"{"delay":{"delay":{"secs":0,"nanos":250000000},"tolerance":5.0}}"#
        );
        assert_eq!(
            serde_json::from_str::<ActivationConstraint>(&json).unwrap(),
            delay
        );

        let distance: ActivationConstraint =
            serde_json::from_str(r#"{"distance":{"distance":15.0}}"#).unwrap();
        assert_eq!(distance, ActivationConstraint::distance(15.0));
    }
}
