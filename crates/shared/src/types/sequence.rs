//! Per-entity id sequences.

use serde::{Deserialize, Serialize};

/// Monotonic id counter for one entity type.
///
/// Starts at 0; the first id handed out is 1. Callers `peek` while
/// validating and only `advance` once every check has passed, so a failed
/// creation never consumes an id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    last: u64,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Returns the last value handed out (0 when none).
    #[must_use]
    pub const fn last(&self) -> u64 {
        self.last
    }

    /// Returns the value the next `advance` would hand out, or `None` if the
    /// sequence is exhausted.
    #[must_use]
    pub const fn peek(&self) -> Option<u64> {
        self.last.checked_add(1)
    }

    /// Hands out the next value.
    ///
    /// Returns `None` without changing state if the sequence is exhausted.
    pub fn advance(&mut self) -> Option<u64> {
        let next = self.peek()?;
        self.last = next;
        Some(next)
    }
}
