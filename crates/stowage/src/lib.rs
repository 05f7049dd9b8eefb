// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable contiguous container built on raw storage blocks.
//!
//! `StowVec<T>` is a dynamic array assembled from first principles on top
//! of [`RawBlock`], the raw storage owner from `stowage-block`. The block
//! acquires and releases uninitialized bytes; `StowVec` decides, for every
//! mutating operation, exactly which slots hold live values and how to
//! migrate them when capacity runs out.
//!
//! # Core guarantees
//!
//! - **Amortized O(1) append**: capacity doubles on exhaustion
//!   (`max(1, 2 * capacity)`), so N appends from empty cost O(N) total.
//! - **Strong guarantee on reallocation paths**: when growth constructs the
//!   incoming element (`push_with`, `insert_with` and the reallocating
//!   halves of `push`/`insert`), the element is built into the fresh block
//!   *before* any live value is relocated. An unwinding constructor
//!   releases only the fresh, still-empty block; the sequence is untouched.
//! - **Basic guarantee on in-place paths**: shifting inserts/removes and
//!   the storage-reuse branch of `clone_from` leave the sequence valid but
//!   possibly partially updated if element code unwinds.
//! - **No leaks, no double drops**: every live slot is dropped exactly
//!   once, elements first and bytes second, on every path including
//!   unwinds.
//!
//! # Example
//!
//! ```rust
//! use stowage::StowVec;
//!
//! let mut vec = StowVec::new();
//! vec.push(1);
//! vec.push(2);
//! vec.push(3);
//!
//! assert_eq!(vec.len(), 3);
//! assert_eq!(vec.capacity(), 4); // 1 -> 2 -> 4
//!
//! vec.insert(1, 9);
//! assert_eq!(vec.as_slice(), &[1, 9, 2, 3]);
//!
//! assert_eq!(vec.remove(0), 1);
//! assert_eq!(vec.as_slice(), &[9, 2, 3]);
//! ```
//!
//! # Fallible growth
//!
//! Allocation failure normally diverges through the global allocation
//! error hook. Callers that want to handle it use [`StowVec::try_reserve`],
//! which propagates the [`BlockError`] unchanged:
//!
//! ```rust
//! use stowage::{BlockError, StowVec};
//!
//! let mut vec: StowVec<u64> = StowVec::new();
//! let result = vec.try_reserve(usize::MAX);
//! assert_eq!(result.unwrap_err(), BlockError::CapacityOverflow);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod stow_vec;

pub use stow_vec::StowVec;
pub use stowage_block::{BlockError, RawBlock};
