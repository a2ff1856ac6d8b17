//! Checker identity allocation.

use std::fmt;

use serde::Serialize;

/// Stable identifier of a checker for the lifetime of a registry generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CheckerId(pub u32);

impl From<u32> for CheckerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<CheckerId> for u32 {
    fn from(id: CheckerId) -> Self {
        id.0
    }
}

impl fmt::Display for CheckerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues monotonically increasing checker ids starting at zero.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next identity.
    pub fn allocate(&mut self) -> CheckerId {
        let id = CheckerId(self.next);
        self.next += 1;
        id
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_is_sequential_and_resettable() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), CheckerId(0));
        assert_eq!(ids.allocate(), CheckerId(1));

        ids.reset();
        assert_eq!(ids.allocate(), CheckerId(0));
    }
}
