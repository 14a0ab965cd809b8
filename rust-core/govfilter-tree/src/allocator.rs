// SPDX-License-Identifier: PMPL-1.0-or-later
//! Per-session unique index allocator.

use serde::{Deserialize, Serialize};

/// Hands out strictly increasing `uniqueIndex` values.
///
/// One allocator belongs to one filter builder session and lives as long as
/// the session does, so indices are never reused, even when the tree is
/// re-parsed from a new incoming filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAllocator {
    seed: u64,
    next: u64,
}

impl IndexAllocator {
    /// Allocator starting at 1.
    pub fn new() -> Self {
        Self::with_seed(1)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed, next: seed }
    }

    pub fn next_index(&mut self) -> u64 {
        let index = self.next;
        self.next += 1;
        index
    }

    /// The value the next call to [`next_index`](Self::next_index) returns.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// How many indices have been handed out.
    pub fn allocated(&self) -> u64 {
        self.next - self.seed
    }
}

impl Default for IndexAllocator {
    fn default() -> Self {
        Self::new()
    }
}
