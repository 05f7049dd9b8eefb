// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for stowage crates.
//!
//! Probe element types for exercising container lifecycle edges:
//! [`DropTally`] accounts for drops, [`CloneBomb`] unwinds on a chosen
//! clone, [`DefaultBomb`] unwinds on a chosen default construction.

#![warn(missing_docs)]

mod probes;

pub use probes::{CloneBomb, DefaultBomb, DropTally, arm_default_fuse, disarm_default_fuse};
