//! Explicit id allocation for builder entities.
//!
//! The builder used to rely on hidden module-level counters. Callers now own
//! an `IdSequence` and pass it to every constructor that needs a fresh id, so
//! two independent builders never share numbering and the compiler stays
//! counter-free.

use serde::{Deserialize, Serialize};

/// Monotonic id allocator shared by nodes, relationships and conditions.
///
/// Ids look like `node-1`, `rel-2`, `cond-3`; the counter is shared across
/// kinds so every id is unique within one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume numbering after ids that already exist (e.g. a reloaded state)
    pub fn starting_after(last: u64) -> Self {
        Self { next: last }
    }

    pub fn next_node_id(&mut self) -> String {
        self.allocate("node")
    }

    pub fn next_relationship_id(&mut self) -> String {
        self.allocate("rel")
    }

    pub fn next_condition_id(&mut self) -> String {
        self.allocate("cond")
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next
    }

    fn allocate(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}-{}", prefix, self.next)
    }
}
