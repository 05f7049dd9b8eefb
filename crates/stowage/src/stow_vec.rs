// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use stowage_block::{BlockError, RawBlock};

/// A growable contiguous container with value semantics.
///
/// Slots `[0, len)` of the owned [`RawBlock`] hold live values; slots
/// `[len, capacity)` are uninitialized bytes. Every operation maintains
/// that invariant, dropping elements before bytes are released and never
/// reading a dead slot as live.
///
/// Block-to-block migration is always a bitwise relocation
/// (`ptr::copy_nonoverlapping`): a Rust move cannot fail, so the fallible
/// copy fallback a throwing-move world needs collapses away. Clone-based
/// transfer appears only where deep copies are the point — [`Clone`],
/// [`from_slice`](StowVec::from_slice),
/// [`extend_from_slice`](StowVec::extend_from_slice).
///
/// # Example
///
/// ```rust
/// use stowage::StowVec;
///
/// let mut vec = StowVec::from_slice(&[10, 20, 30]);
/// vec.insert(1, 15);
///
/// assert_eq!(vec.as_slice(), &[10, 15, 20, 30]);
/// assert_eq!(vec.remove(2), 20);
/// ```
pub struct StowVec<T> {
    block: RawBlock<T>,
    len: usize,
    // StowVec logically owns its `T` values even though the block type
    // never touches them.
    _owns: PhantomData<T>,
}

impl<T> StowVec<T> {
    /// Creates an empty sequence. Does not allocate.
    pub const fn new() -> Self {
        Self {
            block: RawBlock::new(),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Creates an empty sequence backed by exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            block: RawBlock::with_capacity(capacity),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Creates a sequence of `len` default-constructed elements.
    ///
    /// Storage is sized exactly: `len() == capacity() == len`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage::StowVec;
    ///
    /// let vec: StowVec<u32> = StowVec::with_len(3);
    ///
    /// assert_eq!(vec.as_slice(), &[0, 0, 0]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut vec = Self::with_capacity(len);
        vec.resize(len);
        vec
    }

    /// Creates a sequence holding a clone of every element of `values`.
    ///
    /// Storage is sized exactly to `values.len()`.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(values.len());
        vec.extend_from_slice(values);
        vec
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the current block holds.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Returns the live range as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Returns the live range as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Capacity for the next growth step: `max(1, 2 * capacity)`.
    fn grown_capacity(&self) -> usize {
        cmp::max(1, self.capacity().saturating_mul(2))
    }

    /// Relocates all live elements into `new_block` and installs it.
    ///
    /// Bitwise relocation runs no element code, so this step cannot fail.
    fn install_block(&mut self, mut new_block: RawBlock<T>) {
        debug_assert!(new_block.capacity() >= self.len);

        // SAFETY (PRECONDITIONS ARE MET): both blocks hold at least `len`
        // slots and are distinct allocations; the copy vacates the old
        // slots, transferring ownership of the values to the new block.
        unsafe { ptr::copy_nonoverlapping(self.block.ptr(), new_block.ptr(), self.len) };

        self.block.swap(&mut new_block);
        // `new_block` now owns the vacated old block; its drop frees bytes only.
    }

    /// Grows to at least `min_capacity` slots.
    ///
    /// No-op when current capacity suffices; otherwise allocates exactly
    /// `min_capacity` slots and relocates the live elements. Never changes
    /// `len()` and never shrinks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage::StowVec;
    ///
    /// let mut vec = StowVec::from_slice(&[1, 2]);
    /// vec.reserve(10);
    ///
    /// assert_eq!(vec.len(), 2);
    /// assert_eq!(vec.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, min_capacity: usize) {
        if min_capacity <= self.capacity() {
            return;
        }

        self.install_block(RawBlock::with_capacity(min_capacity));
    }

    /// Fallible variant of [`reserve`](StowVec::reserve).
    ///
    /// On failure the sequence is completely unchanged: the error is
    /// raised before any element is relocated.
    ///
    /// # Errors
    ///
    /// Propagates the [`BlockError`] from the failed block allocation.
    pub fn try_reserve(&mut self, min_capacity: usize) -> Result<(), BlockError> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }

        let new_block = RawBlock::try_with_capacity(min_capacity)?;
        self.install_block(new_block);

        Ok(())
    }

    /// Drops every element beyond `new_len`.
    ///
    /// No-op when `new_len >= len()`. Capacity is untouched.
    pub fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;

            // SAFETY (PRECONDITIONS ARE MET): slot `len` was live and the
            // decrement has already retired it from the live range, so an
            // unwinding drop cannot cause a second drop.
            unsafe { ptr::drop_in_place(self.block.offset(self.len)) };
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to exactly `new_len` elements.
    ///
    /// Shrinking drops the tail in place. Growing reserves `new_len` slots
    /// and default-constructs the new tail, one element at a time so that
    /// an unwinding constructor leaves only fully built elements behind.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage::StowVec;
    ///
    /// let mut vec = StowVec::from_slice(&[7, 7]);
    /// vec.resize(4);
    /// assert_eq!(vec.as_slice(), &[7, 7, 0, 0]);
    ///
    /// vec.resize(1);
    /// assert_eq!(vec.as_slice(), &[7]);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len < self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len);

        while self.len < new_len {
            // SAFETY (PRECONDITIONS ARE MET): len < new_len <= capacity,
            // and slot `len` is uninitialized.
            unsafe { ptr::write(self.block.offset(self.len), T::default()) };
            self.len += 1;
        }
    }

    /// Appends an element.
    ///
    /// With spare capacity the value is written directly into slot `len`.
    /// On exhaustion the block grows to `max(1, 2 * capacity)` slots and
    /// the incoming value is placed in the new block before the existing
    /// elements are relocated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage::StowVec;
    ///
    /// let mut vec = StowVec::new();
    /// vec.push(1);
    /// vec.push(2);
    /// vec.push(3);
    ///
    /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn push(&mut self, value: T) {
        self.push_with(move || value);
    }

    /// Appends an element constructed in place in its final slot.
    ///
    /// Returns a reference to the new element. If `f` unwinds nothing has
    /// been relocated yet, so the sequence is unchanged — on the growth
    /// path only the fresh, still-empty block is released.
    pub fn push_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let index = self.len;

        if self.len < self.capacity() {
            // SAFETY (PRECONDITIONS ARE MET): len < capacity and slot
            // `len` is uninitialized. `f` runs before the write lands, and
            // no state has changed if it unwinds.
            unsafe { ptr::write(self.block.offset(index), f()) };
            self.len += 1;
        } else {
            self.grow_push_with(f);
        }

        // SAFETY (PRECONDITIONS ARE MET): slot `index` was just constructed
        // and index < len.
        unsafe { &mut *self.block.offset(index) }
    }

    #[cold]
    #[inline(never)]
    fn grow_push_with<F>(&mut self, f: F)
    where
        F: FnOnce() -> T,
    {
        let mut new_block = RawBlock::with_capacity(self.grown_capacity());

        // SAFETY (PRECONDITIONS ARE MET): len < new capacity and the slot
        // is uninitialized. If `f` unwinds here, `new_block` is released
        // with no live slots and the sequence is untouched.
        unsafe { ptr::write(new_block.offset(self.len), f()) };

        // SAFETY (PRECONDITIONS ARE MET): both blocks hold at least `len`
        // slots; the copy vacates the old slots.
        unsafe { ptr::copy_nonoverlapping(self.block.ptr(), new_block.ptr(), self.len) };

        self.block.swap(&mut new_block);
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` when empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage::StowVec;
    ///
    /// let mut vec = StowVec::from_slice(&[1, 2]);
    ///
    /// assert_eq!(vec.pop(), Some(2));
    /// assert_eq!(vec.pop(), Some(1));
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY (PRECONDITIONS ARE MET): slot `len` was live; the
        // decrement retired it, so the read-out value is the sole owner.
        Some(unsafe { ptr::read(self.block.offset(self.len)) })
    }

    /// Inserts `value` at `index`, shifting everything after it one slot
    /// toward the end. `index == len()` appends.
    ///
    /// Returns a reference to the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage::StowVec;
    ///
    /// let mut vec = StowVec::from_slice(&[1, 2, 3]);
    /// vec.insert(1, 9);
    ///
    /// assert_eq!(vec.as_slice(), &[1, 9, 2, 3]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.insert_with(index, move || value)
    }

    /// Inserts an element constructed in place at `index`.
    ///
    /// Two regimes:
    ///
    /// - *In place* (spare capacity): `f` runs first; only then is
    ///   `[index, len)` shifted one slot right by a single overlapping
    ///   copy and the value written into the gap. An unwinding `f` leaves
    ///   the sequence unchanged.
    /// - *Reallocating* (exhausted): the block grows per the growth policy
    ///   and `f` constructs directly into slot `index` of the new block.
    ///   If `f` unwinds, the new block is released untouched and the
    ///   sequence is unchanged — strong guarantee. Only then are the
    ///   prefix `[0, index)` and suffix `[index, len)` relocated around
    ///   the new element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_with<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        assert!(
            index <= self.len,
            "insert index {index} out of range for length {len}",
            len = self.len
        );

        if self.len < self.capacity() {
            let value = f();

            // SAFETY (PRECONDITIONS ARE MET): index <= len < capacity, so
            // the shifted range ends at most at the capacity sentinel. The
            // gap still holds the stale bits of the shifted element and is
            // overwritten without a drop.
            unsafe {
                let slot = self.block.offset(index);
                ptr::copy(slot, slot.add(1), self.len - index);
                ptr::write(slot, value);
            }

            self.len += 1;
        } else {
            self.grow_insert_with(index, f);
        }

        // SAFETY (PRECONDITIONS ARE MET): slot `index` was just constructed
        // and index < len.
        unsafe { &mut *self.block.offset(index) }
    }

    #[cold]
    #[inline(never)]
    fn grow_insert_with<F>(&mut self, index: usize, f: F)
    where
        F: FnOnce() -> T,
    {
        let mut new_block = RawBlock::with_capacity(self.grown_capacity());

        // SAFETY (PRECONDITIONS ARE MET): index <= len < new capacity and
        // the slot is uninitialized. If `f` unwinds here, `new_block` is
        // released with no live slots and the sequence is untouched.
        unsafe { ptr::write(new_block.offset(index), f()) };

        // SAFETY (PRECONDITIONS ARE MET): prefix and suffix land in
        // disjoint regions around slot `index` of the new block, which
        // holds len + 1 <= new capacity slots; the copies vacate the old
        // slots.
        unsafe {
            ptr::copy_nonoverlapping(self.block.ptr(), new_block.ptr(), index);
            ptr::copy_nonoverlapping(
                self.block.offset(index),
                new_block.offset(index + 1),
                self.len - index,
            );
        }

        self.block.swap(&mut new_block);
        self.len += 1;
    }

    /// Removes and returns the element at `index`, shifting everything
    /// after it one slot toward the front.
    ///
    /// The element that followed the removed one now lives at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage::StowVec;
    ///
    /// let mut vec = StowVec::from_slice(&[9, 2, 3]);
    ///
    /// assert_eq!(vec.remove(0), 9);
    /// assert_eq!(vec.as_slice(), &[2, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "remove index {index} out of range for length {len}",
            len = self.len
        );

        // SAFETY (PRECONDITIONS ARE MET): index < len, so the slot is live
        // and the shifted range stays within the live region. The read
        // takes sole ownership of the value; the overlapping copy then
        // vacates the duplicate bits.
        unsafe {
            let slot = self.block.offset(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Exchanges contents with `other` in constant time.
    ///
    /// Only the blocks and lengths travel; no element is constructed,
    /// dropped, cloned, or relocated. Equivalent to `core::mem::swap`,
    /// kept inherent so it does not shadow `<[T]>::swap` through deref.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.block.swap(&mut other.block);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Appends a clone of every element of `other`.
    ///
    /// Length is bumped per element, so an unwinding `clone` leaves only
    /// fully constructed elements behind.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        let new_len = self
            .len
            .checked_add(other.len())
            .expect("StowVec length overflow");

        if new_len > self.capacity() {
            self.reserve(cmp::max(new_len, self.grown_capacity()));
        }

        for value in other {
            // SAFETY (PRECONDITIONS ARE MET): len < new_len <= capacity
            // and slot `len` is uninitialized.
            unsafe { ptr::write(self.block.offset(self.len), value.clone()) };
            self.len += 1;
        }
    }
}

impl<T> Drop for StowVec<T> {
    fn drop(&mut self) {
        // Elements first; the block's own drop then releases the bytes.
        self.truncate(0);
    }
}

impl<T> Default for StowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for StowVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): slots [0, len) are live.
        unsafe { slice::from_raw_parts(self.block.ptr(), self.len) }
    }
}

impl<T> DerefMut for StowVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY (PRECONDITIONS ARE MET): slots [0, len) are live and the
        // borrow is exclusive.
        unsafe { slice::from_raw_parts_mut(self.block.ptr(), self.len) }
    }
}

impl<T: Clone> Clone for StowVec<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self)
    }

    /// Reuses existing storage when it is large enough.
    ///
    /// A source longer than the current capacity is cloned into a fresh
    /// sequence that replaces `self` wholesale (strong guarantee).
    /// Otherwise the excess tail is dropped, the overlapping prefix is
    /// clone-assigned element-wise and the remaining tail clone-constructed
    /// into spare capacity (basic guarantee).
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut replacement = source.clone();
            self.swap_with(&mut replacement);
            // `replacement` now holds the previous contents and drops them.
            return;
        }

        self.truncate(source.len);

        for (dst, src) in self.iter_mut().zip(source.iter()) {
            dst.clone_from(src);
        }

        let overlap = self.len;
        self.extend_from_slice(&source[overlap..]);
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for StowVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq> PartialEq for StowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for StowVec<T> {}

impl<T> Extend<T> for StowVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();

        let (lower, _) = iter.size_hint();
        if lower > 0 {
            let hinted = self.len.saturating_add(lower);
            if hinted > self.capacity() {
                self.reserve(cmp::max(hinted, self.grown_capacity()));
            }
        }

        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for StowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<'a, T> IntoIterator for &'a StowVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut StowVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
