use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of a stored user.
///
/// Serializes as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct UserId(pub u64);

impl UserId {
    /// Wraps a raw integer id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    /// Parses a path segment as a non-negative decimal integer.
    ///
    /// Signs, whitespace and trailing garbage are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidUserId { input: s.to_owned() });
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidUserId { input: s.to_owned() })
    }
}

/// Sequential id source: 1, 2, 3, ...
///
/// Values are never handed out twice, even after the user holding them is
/// deleted. Not persisted; a fresh allocator starts over at 1.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next id and advances the sequence.
    pub fn allocate(&mut self) -> UserId {
        let id = UserId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn allocator_starts_at_one_and_increments() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), UserId(1));
        assert_eq!(ids.allocate(), UserId(2));
        assert_eq!(ids.allocate(), UserId(3));
    }

    #[test]
    fn user_id_parses_plain_digits() {
        let id: UserId = match "42".parse() {
            Ok(id) => id,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn user_id_rejects_non_integer_text() {
        for input in ["", "abc", "1abc", "-1", "+1", " 1", "1.0", "99999999999999999999999"] {
            assert!(input.parse::<UserId>().is_err(), "'{input}' must not parse");
        }
    }

    #[test]
    fn user_id_serializes_as_bare_integer() {
        let json = match serde_json::to_string(&UserId(7)) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "7");
    }

    proptest! {
        #[test]
        fn allocated_ids_are_strictly_increasing(n in 1usize..500) {
            let mut ids = IdAllocator::new();
            let mut prev = UserId(0);
            for _ in 0..n {
                let id = ids.allocate();
                prop_assert!(id > prev, "{id} must be greater than {prev}");
                prev = id;
            }
            prop_assert_eq!(prev.get(), n as u64);
        }
    }
}
