//! Construction and reset for `PartIndex`.

use crate::arena::Arena;
use crate::types::{LeafNode, NodeRef, PartIndex, Statistics};

impl PartIndex {
    /// Create an empty index: a single empty leaf as the root.
    pub fn new() -> Self {
        let mut leaves = Arena::new();
        let root_id = leaves.allocate(LeafNode::new());

        Self {
            root: NodeRef::Leaf(root_id),
            leaves,
            internals: Arena::new(),
            stats: Statistics::default(),
        }
    }

    /// Remove every record, returning the index to its construction
    /// state. Lifetime statistics are kept; they are never reset.
    pub fn clear(&mut self) {
        self.leaves.clear();
        self.internals.clear();
        let root_id = self.leaves.allocate(LeafNode::new());
        self.root = NodeRef::Leaf(root_id);
    }
}

impl Default for PartIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_index_is_a_single_empty_leaf() {
        let index = PartIndex::new();
        assert!(index.root.is_leaf());
        assert_eq!(index.record_count(), 0);
        assert_eq!(index.depth(), 1);
    }

    #[test]
    fn clear_resets_structure_but_not_statistics() {
        let mut index = PartIndex::new();
        for i in 0..20 {
            index
                .insert(crate::Record::new(format!("K{i:04}"), "payload"))
                .unwrap();
        }
        let splits_before = index.statistics().splits;
        assert!(splits_before > 0);

        index.clear();
        assert_eq!(index.record_count(), 0);
        assert_eq!(index.depth(), 1);
        assert_eq!(index.statistics().splits, splits_before);
    }
}
