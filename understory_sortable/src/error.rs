// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by sortable construction and collection updates.

use understory_dnd::DndError;

/// Errors from [`create_sortable`](crate::create_sortable) and [`Sortable`](crate::Sortable).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SortableError {
    /// The collection or a move was rejected.
    #[error(transparent)]
    Dnd(#[from] DndError),
    /// An activation threshold is negative or not finite.
    #[error("activation constraint thresholds must be finite and non-negative")]
    InvalidActivationConstraint,
    /// The transition easing has non-finite or out-of-range control points.
    #[error("transition easing control points must be finite with x in [0, 1]")]
    InvalidTransition,
    /// The sortable was destroyed.
    #[error("the sortable has been destroyed")]
    Destroyed,
}
