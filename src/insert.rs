//! Insertion engine: leaf insert, split-on-overflow, and upward
//! propagation of promoted separators.
//!
//! A leaf is allowed to exceed `LEAF_MAX` by exactly one record between
//! the insert and the split it triggers; the same holds for internal
//! nodes and `INTERNAL_MAX`. Propagation is an explicit loop bounded by
//! the current depth, so worst-case stack use is flat.

use crate::error::{IndexError, IndexResult};
use crate::types::{
    InternalNode, LeafNode, NodeId, NodeRef, PartIndex, Record, INTERNAL_MAX, LEAF_MAX, NULL_NODE,
};

impl PartIndex {
    /// Insert a record. Rejects empty keys and duplicates; on rejection
    /// the index is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use partdex::{IndexError, PartIndex, Record};
    ///
    /// let mut index = PartIndex::new();
    /// index.insert(Record::new("P-100", "hex bolt")).unwrap();
    ///
    /// let err = index.insert(Record::new("P-100", "again")).unwrap_err();
    /// assert_eq!(err, IndexError::DuplicateKey("P-100".to_string()));
    /// ```
    pub fn insert(&mut self, record: Record) -> IndexResult<()> {
        if record.key.is_empty() {
            return Err(IndexError::InvalidKey);
        }

        let leaf_id = self.find_leaf(&record.key);
        let leaf = self.leaf_mut(leaf_id);
        match leaf.keys.binary_search(&record.key) {
            Ok(_) => Err(IndexError::DuplicateKey(record.key)),
            Err(pos) => {
                leaf.keys.insert(pos, record.key);
                leaf.payloads.insert(pos, record.payload);
                if leaf.len() > LEAF_MAX {
                    self.split_leaf(leaf_id);
                }
                Ok(())
            }
        }
    }

    /// Split an overfull leaf. The upper half (`mid..`, floor midpoint)
    /// moves to a new right leaf spliced into the chain; the right leaf's
    /// first key is promoted to the parent.
    fn split_leaf(&mut self, leaf_id: NodeId) {
        let (new_right, promoted) = {
            let leaf = self.leaf_mut(leaf_id);
            let mid = leaf.len() / 2;
            let right_keys = leaf.keys.split_off(mid);
            let right_payloads = leaf.payloads.split_off(mid);
            let promoted = right_keys[0].clone();
            let right = LeafNode {
                keys: right_keys,
                payloads: right_payloads,
                next: leaf.next,
                prev: leaf_id,
                parent: leaf.parent,
            };
            (right, promoted)
        };

        let old_next = new_right.next;
        let right_id = self.leaves.allocate(new_right);
        if old_next != NULL_NODE {
            self.leaf_mut(old_next).prev = right_id;
        }
        self.leaf_mut(leaf_id).next = right_id;
        self.stats.splits += 1;

        self.insert_into_parent(NodeRef::Leaf(leaf_id), promoted, NodeRef::Leaf(right_id));
    }

    /// Hang `right` (with separator `key`) next to `left` in the parent,
    /// splitting internal nodes on overflow. Loops upward at most once
    /// per level; may end by creating a new root.
    fn insert_into_parent(&mut self, mut left: NodeRef, mut key: String, mut right: NodeRef) {
        loop {
            let parent_id = self.parent_of(left);
            if parent_id == NULL_NODE {
                // `left` was the root; grow the tree by one level.
                let root = InternalNode {
                    keys: vec![key],
                    children: vec![left, right],
                    parent: NULL_NODE,
                };
                let root_id = self.internals.allocate(root);
                self.set_parent(left, root_id);
                self.set_parent(right, root_id);
                self.root = NodeRef::Internal(root_id);
                self.stats.internal_splits += 1;
                return;
            }

            let idx = self.internal(parent_id).child_index(left);
            {
                let parent = self.internal_mut(parent_id);
                parent.keys.insert(idx, key);
                parent.children.insert(idx + 1, right);
            }
            self.set_parent(right, parent_id);

            if self.internal(parent_id).len() <= INTERNAL_MAX {
                return;
            }

            let (right_id, promoted) = self.split_internal(parent_id);
            left = NodeRef::Internal(parent_id);
            right = NodeRef::Internal(right_id);
            key = promoted;
        }
    }

    /// Split an overfull internal node. The key at the floor midpoint is
    /// promoted (not copied); separators and children above it move to a
    /// new right node, whose children are re-parented.
    fn split_internal(&mut self, node_id: NodeId) -> (NodeId, String) {
        let (new_right, promoted) = {
            let node = self.internal_mut(node_id);
            let mid = node.len() / 2;
            let promoted = node.keys.remove(mid);
            let right_keys = node.keys.split_off(mid);
            let right_children = node.children.split_off(mid + 1);
            let right = InternalNode {
                keys: right_keys,
                children: right_children,
                parent: node.parent,
            };
            (right, promoted)
        };

        let moved = new_right.children.clone();
        let right_id = self.internals.allocate(new_right);
        for child in moved {
            self.set_parent(child, right_id);
        }
        self.stats.splits += 1;
        self.stats.internal_splits += 1;

        (right_id, promoted)
    }
}
