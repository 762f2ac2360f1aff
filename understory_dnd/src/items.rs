// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered collection of sortable item identifiers.

use alloc::vec::Vec;

use crate::arrange::move_in_place;
use crate::error::DndError;

/// An ordered, duplicate-free sequence of item identifiers.
///
/// Insertion order is visual order. Uniqueness is checked once at construction;
/// afterwards the only mutation is a whole-element move, which cannot introduce
/// a duplicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Items<K> {
    ids: Vec<K>,
}

impl<K> Default for Items<K> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<K: Copy + Eq> Items<K> {
    /// Build a collection, failing with [`DndError::DuplicateIdentifier`] on a repeated id.
    ///
    /// The check compares pairs, so it is quadratic in the number of items.
    pub fn new(ids: impl IntoIterator<Item = K>) -> Result<Self, DndError> {
        let ids: Vec<K> = ids.into_iter().collect();
        for (second, id) in ids.iter().enumerate() {
            if let Some(first) = ids[..second].iter().position(|other| other == id) {
                return Err(DndError::DuplicateIdentifier { first, second });
            }
        }
        Ok(Self { ids })
    }

    /// Identifiers in visual order.
    pub fn as_slice(&self) -> &[K] {
        &self.ids
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Current index of `id`, if present.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.ids.iter().position(|k| k == id)
    }

    /// Returns `true` if `id` is part of the collection.
    pub fn contains(&self, id: &K) -> bool {
        self.ids.contains(id)
    }

    /// Identifier at `index`.
    pub fn get(&self, index: usize) -> Option<K> {
        self.ids.get(index).copied()
    }

    /// Iterate identifiers in visual order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.ids.iter().copied()
    }

    /// Apply a committed move.
    pub(crate) fn commit_move(&mut self, from: usize, to: usize) -> Result<(), DndError> {
        move_in_place(&mut self.ids, from, to)
    }
}
