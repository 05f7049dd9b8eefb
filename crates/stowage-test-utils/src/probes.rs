// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Element that records every drop in a shared counter.
///
/// Pairing the counter against the number of constructed values detects
/// both leaks (too few drops) and double drops (too many).
///
/// # Example
///
/// ```rust
/// use stowage_test_utils::DropTally;
///
/// let drops = DropTally::counter();
/// {
///     let _probe = DropTally::new(7, &drops);
/// }
/// assert_eq!(DropTally::count(&drops), 1);
/// ```
#[derive(Debug)]
pub struct DropTally {
    /// Payload, so element order stays observable alongside the accounting.
    pub value: u32,
    drops: Arc<AtomicUsize>,
}

impl DropTally {
    /// Creates a fresh shared drop counter.
    pub fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    /// Creates a probe that reports its drop to `drops`.
    pub fn new(value: u32, drops: &Arc<AtomicUsize>) -> Self {
        Self {
            value,
            drops: Arc::clone(drops),
        }
    }

    /// Returns the number of drops recorded so far.
    pub fn count(drops: &Arc<AtomicUsize>) -> usize {
        drops.load(Ordering::Relaxed)
    }
}

impl Clone for DropTally {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            drops: Arc::clone(&self.drops),
        }
    }
}

impl PartialEq for DropTally {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for DropTally {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

/// Element whose `clone` panics once a shared fuse burns down.
///
/// The fuse counts clones that are still allowed to succeed; the clone
/// after that unwinds. Drops are recorded like [`DropTally`] so rollback
/// paths can be audited.
///
/// # Example
///
/// ```rust
/// use stowage_test_utils::CloneBomb;
///
/// let fuse = CloneBomb::fuse(1);
/// let drops = CloneBomb::drop_counter();
/// let bomb = CloneBomb::new(1, &fuse, &drops);
///
/// let _ok = bomb.clone();
/// assert!(std::panic::catch_unwind(|| bomb.clone()).is_err());
/// ```
#[derive(Debug)]
pub struct CloneBomb {
    /// Payload, so element order stays observable alongside the accounting.
    pub value: u32,
    fuse: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl CloneBomb {
    /// Creates a fuse allowing `successful_clones` clones before unwinding.
    pub fn fuse(successful_clones: usize) -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(successful_clones))
    }

    /// Creates a fresh shared drop counter.
    pub fn drop_counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    /// Creates a probe wired to the given fuse and drop counter.
    pub fn new(value: u32, fuse: &Arc<AtomicUsize>, drops: &Arc<AtomicUsize>) -> Self {
        Self {
            value,
            fuse: Arc::clone(fuse),
            drops: Arc::clone(drops),
        }
    }

    /// Returns the number of drops recorded so far.
    pub fn dropped(drops: &Arc<AtomicUsize>) -> usize {
        drops.load(Ordering::Relaxed)
    }
}

impl Clone for CloneBomb {
    fn clone(&self) -> Self {
        let remaining = self.fuse.load(Ordering::Relaxed);
        if remaining == 0 {
            panic!("CloneBomb fuse burned");
        }
        self.fuse.store(remaining - 1, Ordering::Relaxed);

        Self {
            value: self.value,
            fuse: Arc::clone(&self.fuse),
            drops: Arc::clone(&self.drops),
        }
    }
}

impl Drop for CloneBomb {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

thread_local! {
    static DEFAULT_FUSE: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Arms the [`DefaultBomb`] fuse on the current thread.
///
/// The next `successful_defaults` default constructions succeed; the one
/// after that unwinds and disarms the fuse.
pub fn arm_default_fuse(successful_defaults: usize) {
    DEFAULT_FUSE.set(Some(successful_defaults));
}

/// Disarms the [`DefaultBomb`] fuse on the current thread.
pub fn disarm_default_fuse() {
    DEFAULT_FUSE.set(None);
}

/// Element whose `Default::default` panics once the thread-local fuse
/// armed via [`arm_default_fuse`] burns down.
///
/// With the fuse disarmed it behaves like a plain zero-valued element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBomb(pub u32);

impl Default for DefaultBomb {
    fn default() -> Self {
        if let Some(remaining) = DEFAULT_FUSE.get() {
            if remaining == 0 {
                DEFAULT_FUSE.set(None);
                panic!("DefaultBomb fuse burned");
            }
            DEFAULT_FUSE.set(Some(remaining - 1));
        }

        Self(0)
    }
}
