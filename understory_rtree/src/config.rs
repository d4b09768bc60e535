// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree configuration.

use crate::error::{Error, Result};

/// Node capacity settings.
///
/// With the `serde` feature the config can be read from any serde format,
/// e.g. `{"max_entries": 16}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RTreeConfig {
    /// Maximum number of children per node (M). Values below
    /// [`RTreeConfig::MIN_MAX_ENTRIES`] are raised to it; zero is rejected.
    pub max_entries: usize,
}

impl Default for RTreeConfig {
    fn default() -> Self {
        Self { max_entries: 9 }
    }
}

impl RTreeConfig {
    /// Smallest effective fan-out.
    pub const MIN_MAX_ENTRIES: usize = 4;

    /// Config with the given fan-out.
    pub const fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }

    /// Reject a zero fan-out and clamp the rest to at least four.
    pub fn validate(self) -> Result<Self> {
        if self.max_entries == 0 {
            return Err(Error::InvalidMaxEntries(self.max_entries));
        }
        Ok(Self {
            max_entries: self.max_entries.max(Self::MIN_MAX_ENTRIES),
        })
    }

    /// Minimum fill (m) of a node produced by a split: `max(2, floor(0.4 * M))`,
    /// computed on the clamped fan-out.
    pub fn min_fill(&self) -> usize {
        let m = self.max_entries.max(Self::MIN_MAX_ENTRIES);
        (m * 2 / 5).max(2)
    }
}
