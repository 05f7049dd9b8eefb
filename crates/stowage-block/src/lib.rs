// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw uninitialized storage sized in element slots.
//!
//! `RawBlock<T>` owns a single heap allocation capable of holding up to
//! `capacity` values of `T`, and nothing more. It never constructs,
//! destroys, clones, or relocates element values — which slots currently
//! hold live values is entirely the caller's concern. The block only
//! acquires and releases the bytes.
//!
//! This split is what makes a growable container safe to write: the
//! container decides element liveness, the block guarantees the bytes
//! behind it are exclusively owned and correctly sized.
//!
//! # Example
//!
//! ```rust
//! use stowage_block::RawBlock;
//!
//! let mut block = RawBlock::<u64>::with_capacity(4);
//! assert_eq!(block.capacity(), 4);
//!
//! // The capacity region is uninitialized; writes go through MaybeUninit.
//! block.as_uninit_mut_slice()[0].write(42);
//! ```
//!
//! # Fallible allocation
//!
//! ```rust
//! use stowage_block::{BlockError, RawBlock};
//!
//! // A slot count whose byte size cannot be represented.
//! let result = RawBlock::<u64>::try_with_capacity(usize::MAX);
//! assert_eq!(result.unwrap_err(), BlockError::CapacityOverflow);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod raw_block;

pub use error::BlockError;
pub use raw_block::RawBlock;
