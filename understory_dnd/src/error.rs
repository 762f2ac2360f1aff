// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for collection and ordering operations.

/// Errors produced by the drag-and-drop core.
///
/// A second [`begin`](crate::coordinator::DragCoordinator::begin) while a drag
/// is active is deliberately not represented here: it is a documented no-op.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DndError {
    /// An index passed to the ordering strategy is outside `[0, len)`.
    #[error("index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the collection.
        len: usize,
    },
    /// The same identifier appears more than once in a collection.
    #[error("duplicate identifier at positions {first} and {second}")]
    DuplicateIdentifier {
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeated occurrence.
        second: usize,
    },
    /// The identifier is not part of the collection.
    #[error("identifier is not part of the collection")]
    UnknownItem,
}
