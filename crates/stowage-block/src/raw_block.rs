// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{alloc, dealloc, handle_alloc_error};
use core::alloc::Layout;
use core::mem::{self, MaybeUninit};
use core::ptr::NonNull;
use core::slice;

use crate::error::BlockError;

/// Exclusively owned raw storage for up to `capacity` values of `T`.
///
/// The block tracks no element liveness. Slots are opaque, element-sized
/// byte regions; constructing into them, reading them as live values and
/// destroying their contents is the caller's responsibility. Dropping a
/// block while the caller still considers slots live leaks those values —
/// the block's own `Drop` frees the bytes and nothing else.
///
/// There is deliberately no `Clone` impl: copying raw storage without
/// knowing which slots are live is meaningless. Ownership moves with the
/// value, or is exchanged in constant time via [`swap`](RawBlock::swap).
///
/// Zero capacity and zero-sized `T` perform no allocation; the pointer is
/// dangling but well-aligned in both cases.
pub struct RawBlock<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> RawBlock<T> {
    /// Creates an empty block with zero capacity. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocates a block sized for exactly `capacity` slots.
    ///
    /// The slots are uninitialized. `capacity == 0` and zero-sized `T`
    /// perform no allocation.
    ///
    /// # Panics / Aborts
    ///
    /// Panics if the byte size of the request is not representable, and
    /// diverges via [`handle_alloc_error`] if the system allocator refuses
    /// the request. The propagating variant is
    /// [`try_with_capacity`](RawBlock::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(block) => block,
            Err(BlockError::CapacityOverflow) => panic!("RawBlock capacity overflow"),
            Err(BlockError::AllocFailed { .. }) => {
                let layout = Layout::array::<T>(capacity)
                    .expect("infallible: AllocFailed is only reported after the layout was built");
                handle_alloc_error(layout)
            }
        }
    }

    /// Allocates a block sized for exactly `capacity` slots, reporting
    /// failure instead of diverging.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::CapacityOverflow`] if `capacity` slots of `T`
    /// have no representable byte size, and [`BlockError::AllocFailed`] if
    /// the system allocator refuses the request.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, BlockError> {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
            });
        }

        let layout = Layout::array::<T>(capacity).map_err(|_| BlockError::CapacityOverflow)?;

        // SAFETY (PRECONDITIONS ARE MET): capacity > 0 and T is not
        // zero-sized, so the layout has non-zero size.
        let raw = unsafe { alloc(layout) };

        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self { ptr, capacity }),
            None => Err(BlockError::AllocFailed {
                bytes: layout.size(),
            }),
        }
    }

    /// Returns the number of element slots this block holds.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the base pointer, i.e. the address of slot 0.
    ///
    /// Dangling (but well-aligned) when the block owns no allocation.
    #[inline]
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns the address of slot `n`.
    ///
    /// `n == capacity` is allowed: the one-past-end address is the usual
    /// iteration boundary.
    ///
    /// # Safety
    ///
    /// `n` must not exceed `capacity`. This is debug-asserted; in release
    /// builds a larger `n` is undefined behaviour.
    #[inline]
    pub unsafe fn offset(&self, n: usize) -> *mut T {
        debug_assert!(n <= self.capacity, "RawBlock::offset past the capacity sentinel");

        // SAFETY (PRECONDITIONS ARE MET): n <= capacity keeps the offset
        // within the allocation, or at its one-past-end sentinel.
        unsafe { self.ptr.as_ptr().add(n) }
    }

    /// Returns the whole capacity region as uninitialized slots.
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY (PRECONDITIONS ARE MET): the pointer covers `capacity`
        // slots and MaybeUninit places no validity requirement on them.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// Returns the whole capacity region as mutable uninitialized slots.
    pub fn as_uninit_mut_slice(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY (PRECONDITIONS ARE MET): the pointer covers `capacity`
        // slots, the borrow is exclusive, and MaybeUninit places no
        // validity requirement on them.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// Exchanges ownership of the two blocks in constant time.
    ///
    /// No slot is read or written; only the pointers and capacities travel.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Default for RawBlock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return;
        }

        let layout = Layout::array::<T>(self.capacity)
            .expect("infallible: the layout was representable when the block was allocated");

        // SAFETY (PRECONDITIONS ARE MET): the pointer was returned by
        // `alloc` with this exact layout and has not been freed.
        unsafe { dealloc(self.ptr.as_ptr().cast(), layout) };
    }
}

impl<T> core::fmt::Debug for RawBlock<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawBlock")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

// SAFETY: the block exclusively owns storage for `T` values; transferring
// or sharing it across threads transfers or shares exactly that storage.
unsafe impl<T: Send> Send for RawBlock<T> {}
unsafe impl<T: Sync> Sync for RawBlock<T> {}
