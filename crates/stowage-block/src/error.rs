// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stowage-block.

use thiserror::Error;

/// Errors that can occur when acquiring a raw block.
///
/// These propagate unchanged to the caller: no retry, no fallback.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum BlockError {
    /// The requested slot count has no representable byte size.
    #[error("capacity overflow: requested slot count exceeds the maximum allocation size")]
    CapacityOverflow,

    /// The system allocator refused the request.
    #[error("allocation of {bytes} bytes failed")]
    AllocFailed {
        /// Size of the refused request in bytes.
        bytes: usize,
    },
}
