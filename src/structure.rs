//! Structural diagnostics: depth, record counts, and lifetime statistics.

use crate::types::{NodeRef, PartIndex, Statistics, NULL_NODE};

impl PartIndex {
    /// Number of nodes on the path from the root to any leaf. Uniform
    /// across all leaves by construction; 1 for an empty index.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.root;
        while let NodeRef::Internal(id) = current {
            depth += 1;
            current = self.internal(id).children[0];
        }
        depth
    }

    /// Total live records, summed over the leaf chain.
    pub fn record_count(&self) -> usize {
        let mut count = 0;
        let mut leaf_id = self.first_leaf();
        while leaf_id != NULL_NODE {
            let leaf = self.leaf(leaf_id);
            count += leaf.len();
            leaf_id = leaf.next;
        }
        count
    }

    /// Returns true if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Number of leaf nodes in the chain.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut leaf_id = self.first_leaf();
        while leaf_id != NULL_NODE {
            count += 1;
            leaf_id = self.leaf(leaf_id).next;
        }
        count
    }

    /// Lifetime split and fusion counters. Never reset.
    pub fn statistics(&self) -> Statistics {
        self.stats
    }
}
