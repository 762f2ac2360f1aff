// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard sensor: pick up, move, drop, and cancel with keys.
//!
//! - Space or Enter on a focused item starts a drag.
//! - Arrow keys move the drag; the next position comes from a [`KeyboardCoordinates`] source.
//! - Space or Enter drops; Escape cancels.
//!
//! Keyboard drags have no activation constraint.

use kurbo::{Point, Vec2};

use crate::sensor::SensorEvent;

/// Keys the sensor understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Space bar.
    Space,
    /// Enter or Return.
    Enter,
    /// Escape.
    Escape,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Anything else.
    Other,
}

/// Direction requested by an arrow key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

impl KeyCode {
    /// The direction of an arrow key.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::ArrowUp => Some(Direction::Up),
            Self::ArrowDown => Some(Direction::Down),
            Self::ArrowLeft => Some(Direction::Left),
            Self::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }

    fn is_activator(self) -> bool {
        matches!(self, Self::Space | Self::Enter)
    }
}

/// Source of the next drag position for an arrow key.
pub trait KeyboardCoordinates {
    /// Position after moving from `current` in `direction`, or `None` to stay put.
    fn next(&self, direction: Direction, current: Point) -> Option<Point>;
}

/// Moves by a fixed distance per key press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedStep(pub f64);

impl Default for FixedStep {
    fn default() -> Self {
        Self(25.0)
    }
}

impl KeyboardCoordinates for FixedStep {
    fn next(&self, direction: Direction, current: Point) -> Option<Point> {
        let step = self.0;
        let delta = match direction {
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Down => Vec2::new(0.0, step),
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Right => Vec2::new(step, 0.0),
        };
        Some(current + delta)
    }
}

/// Keyboard-driven sensor.
#[derive(Clone, Debug)]
pub struct KeyboardSensor {
    position: Option<Point>,
}

impl Default for KeyboardSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardSensor {
    /// A sensor with no drag in progress.
    pub fn new() -> Self {
        Self { position: None }
    }

    /// Returns `true` while a keyboard drag is active.
    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    /// Process a key press.
    ///
    /// `focused` is the focused item and the point a drag of it should start
    /// from; it is only consulted when no drag is active.
    pub fn handle<K: Copy>(
        &mut self,
        code: KeyCode,
        focused: Option<(K, Point)>,
        coordinates: &dyn KeyboardCoordinates,
    ) -> Option<SensorEvent<K>> {
        let Some(current) = self.position else {
            if !code.is_activator() {
                return None;
            }
            let (item, origin) = focused?;
            self.position = Some(origin);
            return Some(SensorEvent::Start {
                item,
                origin,
                position: origin,
            });
        };
        if code.is_activator() {
            self.position = None;
            return Some(SensorEvent::End { position: current });
        }
        if code == KeyCode::Escape {
            return self.cancel();
        }
        let next = coordinates.next(code.direction()?, current)?;
        if next == current {
            return None;
        }
        self.position = Some(next);
        Some(SensorEvent::Move { position: next })
    }

    /// Abort the current drag. Emits [`SensorEvent::Cancel`] only if one was active.
    pub fn cancel<K>(&mut self) -> Option<SensorEvent<K>> {
        self.position.take().map(|_| SensorEvent::Cancel)
    }

    /// Forget any drag without emitting anything.
    pub fn reset(&mut self) {
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_up_move_and_drop() {
        let mut s = KeyboardSensor::new();
        let step = FixedStep::default();
        assert_eq!(s.handle::<u8>(KeyCode::ArrowDown, None, &step), None);
        let start = s.handle(KeyCode::Space, Some((4_u8, Point::new(10.0, 10.0))), &step);
        assert!(matches!(start, Some(SensorEvent::Start { item: 4, .. })));
        assert_eq!(
            s.handle::<u8>(KeyCode::ArrowDown, None, &step),
            Some(SensorEvent::Move {
                position: Point::new(10.0, 35.0)
            })
        );
        assert_eq!(
            s.handle::<u8>(KeyCode::Enter, None, &step),
            Some(SensorEvent::End {
                position: Point::new(10.0, 35.0)
            })
        );
        assert!(!s.is_active());
    }

    #[test]
    fn escape_cancels_only_active_drag() {
        let mut s = KeyboardSensor::new();
        let step = FixedStep(5.0);
        assert_eq!(s.handle::<u8>(KeyCode::Escape, None, &step), None);
        s.handle(KeyCode::Enter, Some((1_u8, Point::ZERO)), &step);
        assert_eq!(
            s.handle::<u8>(KeyCode::Escape, None, &step),
            Some(SensorEvent::Cancel)
        );
        assert!(!s.is_active());
    }

    #[test]
    fn activator_without_focus_does_nothing() {
        let mut s = KeyboardSensor::new();
        assert_eq!(s.handle::<u8>(KeyCode::Space, None, &FixedStep::default()), None);
        assert!(!s.is_active());
    }

    #[test]
    fn coordinates_returning_none_keep_position() {
        struct Wall;
        impl KeyboardCoordinates for Wall {
            fn next(&self, _: Direction, _: Point) -> Option<Point> {
                None
            }
        }
        let mut s = KeyboardSensor::new();
        s.handle(KeyCode::Space, Some((1_u8, Point::ZERO)), &Wall);
        assert_eq!(s.handle::<u8>(KeyCode::ArrowLeft, None, &Wall), None);
        assert!(s.is_active());
    }
}
