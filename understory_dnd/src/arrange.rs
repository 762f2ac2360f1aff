// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering strategy: move one element of a sequence to a new position.
//!
//! ## Minimal example
//!
//! ```
//! use understory_dnd::arrange::array_move;
//!
//! assert_eq!(array_move(&[1, 2, 3], 0, 2).unwrap(), vec![2, 3, 1]);
//! assert_eq!(array_move(&[1, 2, 3, 4, 5], 3, 1).unwrap(), vec![1, 4, 2, 3, 5]);
//! assert!(array_move(&[1, 2, 3], 0, 3).is_err());
//! ```

use alloc::vec::Vec;

use crate::error::DndError;

/// Return a copy of `items` with the element at `from` moved to `to`.
///
/// Elements between the two positions shift by one toward `from`.
/// When `from == to` the result equals the input.
///
/// Errors with [`DndError::IndexOutOfRange`] if either index is outside `[0, len)`.
pub fn array_move<K: Clone>(items: &[K], from: usize, to: usize) -> Result<Vec<K>, DndError> {
    check_index(items.len(), from)?;
    check_index(items.len(), to)?;
    let mut out = items.to_vec();
    move_in_place(&mut out, from, to)?;
    Ok(out)
}

/// Move the element at `from` to `to` within `items`, rotating the range between them.
///
/// Errors with [`DndError::IndexOutOfRange`] if either index is outside `[0, len)`;
/// `items` is left untouched in that case.
pub fn move_in_place<K>(items: &mut [K], from: usize, to: usize) -> Result<(), DndError> {
    check_index(items.len(), from)?;
    check_index(items.len(), to)?;
    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
    Ok(())
}

fn check_index(len: usize, index: usize) -> Result<(), DndError> {
    if index < len {
        Ok(())
    } else {
        Err(DndError::IndexOutOfRange { index, len })
    }
}
