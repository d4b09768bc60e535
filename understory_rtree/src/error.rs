// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type.

/// Errors reported by the tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `max_entries` was zero.
    #[error("max_entries must be a positive number, got {0}")]
    InvalidMaxEntries(usize),
    /// A node's bbox is not the union of its children's rectangles.
    #[error("node bbox at depth {depth} does not match the union of its children")]
    BBoxMismatch {
        /// Depth of the offending node; the root is at depth 0.
        depth: usize,
    },
}

/// Result alias with [`Error`] as the default error.
pub type Result<T, E = Error> = core::result::Result<T, E>;
