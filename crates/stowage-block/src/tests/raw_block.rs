// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{BlockError, RawBlock};

// =============================================================================
// new()
// =============================================================================

#[test]
fn test_new_has_zero_capacity() {
    let block: RawBlock<u64> = RawBlock::new();

    assert_eq!(block.capacity(), 0);
}

#[test]
fn test_new_pointer_is_aligned() {
    let block: RawBlock<u64> = RawBlock::new();

    assert_eq!(block.ptr() as usize % align_of::<u64>(), 0);
}

// =============================================================================
// with_capacity()
// =============================================================================

#[test]
fn test_with_capacity_holds_requested_slots() {
    let block: RawBlock<u32> = RawBlock::with_capacity(7);

    assert_eq!(block.capacity(), 7);
    assert!(!block.ptr().is_null());
}

#[test]
fn test_with_capacity_zero_does_not_allocate() {
    let block: RawBlock<u32> = RawBlock::with_capacity(0);

    assert_eq!(block.capacity(), 0);
}

#[test]
fn test_with_capacity_slots_are_writable() {
    let mut block: RawBlock<u32> = RawBlock::with_capacity(4);

    for (i, slot) in block.as_uninit_mut_slice().iter_mut().enumerate() {
        slot.write(i as u32 * 10);
    }

    for (i, slot) in block.as_uninit_slice().iter().enumerate() {
        // SAFETY (PRECONDITIONS ARE MET): every slot was written above.
        let value = unsafe { slot.assume_init_read() };
        assert_eq!(value, i as u32 * 10);
    }
}

#[test]
fn test_with_capacity_zero_sized_elements() {
    let block: RawBlock<()> = RawBlock::with_capacity(1_000_000);

    assert_eq!(block.capacity(), 1_000_000);
}

// =============================================================================
// try_with_capacity()
// =============================================================================

#[test]
fn test_try_with_capacity_reports_capacity_overflow() {
    let result = RawBlock::<u64>::try_with_capacity(usize::MAX);

    assert_eq!(result.unwrap_err(), BlockError::CapacityOverflow);
}

#[test]
fn test_try_with_capacity_matches_infallible_variant() {
    let block = RawBlock::<u8>::try_with_capacity(16).unwrap();

    assert_eq!(block.capacity(), 16);
}

// =============================================================================
// offset()
// =============================================================================

#[test]
fn test_offset_reaches_every_slot() {
    let block: RawBlock<u16> = RawBlock::with_capacity(5);

    for n in 0..block.capacity() {
        // SAFETY (PRECONDITIONS ARE MET): n < capacity.
        let slot = unsafe { block.offset(n) };
        assert_eq!(slot as usize, block.ptr() as usize + n * size_of::<u16>());
    }
}

#[test]
fn test_offset_allows_one_past_end_sentinel() {
    let block: RawBlock<u16> = RawBlock::with_capacity(5);

    // SAFETY (PRECONDITIONS ARE MET): n == capacity is the sentinel.
    let end = unsafe { block.offset(block.capacity()) };

    assert_eq!(end as usize, block.ptr() as usize + 5 * size_of::<u16>());
}

// =============================================================================
// swap()
// =============================================================================

#[test]
fn test_swap_exchanges_pointer_and_capacity() {
    let mut a: RawBlock<u8> = RawBlock::with_capacity(3);
    let mut b: RawBlock<u8> = RawBlock::with_capacity(9);

    let a_ptr = a.ptr();
    let b_ptr = b.ptr();

    a.swap(&mut b);

    assert_eq!(a.capacity(), 9);
    assert_eq!(b.capacity(), 3);
    assert_eq!(a.ptr(), b_ptr);
    assert_eq!(b.ptr(), a_ptr);
}

// =============================================================================
// move semantics
// =============================================================================

#[test]
fn test_move_transfers_pointer_and_capacity() {
    let block: RawBlock<u8> = RawBlock::with_capacity(12);
    let ptr = block.ptr();

    let moved = block;

    assert_eq!(moved.capacity(), 12);
    assert_eq!(moved.ptr(), ptr);
}

// =============================================================================
// Debug
// =============================================================================

#[test]
fn test_debug_reports_capacity() {
    let block: RawBlock<u8> = RawBlock::with_capacity(2);

    let rendered = format!("{block:?}");

    assert!(rendered.contains("RawBlock"));
    assert!(rendered.contains("capacity: 2"));
}
