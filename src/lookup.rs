//! Lookup: root-to-leaf descent, point search, and in-place update.
//!
//! Also home to the arena accessors the rest of the engine goes through.

use crate::error::{IndexError, IndexResult};
use crate::types::{InternalNode, LeafNode, NodeId, NodeRef, PartIndex, Record, NULL_NODE};

impl PartIndex {
    // ========================================================================
    // PUBLIC OPERATIONS
    // ========================================================================

    /// Look up the record for `key`. A miss is a normal outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use partdex::{PartIndex, Record};
    ///
    /// let mut index = PartIndex::new();
    /// index.insert(Record::new("P-100", "hex bolt")).unwrap();
    ///
    /// assert_eq!(index.search("P-100").unwrap().payload, "hex bolt");
    /// assert!(index.search("P-999").is_none());
    /// ```
    pub fn search(&self, key: &str) -> Option<Record> {
        let leaf = self.leaf(self.find_leaf(key));
        let idx = leaf.keys.binary_search_by(|k| k.as_str().cmp(key)).ok()?;
        Some(Record::new(leaf.keys[idx].clone(), leaf.payloads[idx].clone()))
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        let leaf = self.leaf(self.find_leaf(key));
        leaf.keys.binary_search_by(|k| k.as_str().cmp(key)).is_ok()
    }

    /// Replace the payload of an existing record in place. No structural
    /// effect.
    pub fn update(&mut self, key: &str, payload: impl Into<String>) -> IndexResult<()> {
        if key.is_empty() {
            return Err(IndexError::InvalidKey);
        }
        let leaf_id = self.find_leaf(key);
        let leaf = self.leaf_mut(leaf_id);
        match leaf.keys.binary_search_by(|k| k.as_str().cmp(key)) {
            Ok(idx) => {
                leaf.payloads[idx] = payload.into();
                Ok(())
            }
            Err(_) => Err(IndexError::NotFound(key.to_string())),
        }
    }

    // ========================================================================
    // DESCENT
    // ========================================================================

    /// Descend from the root to the leaf owning `key`. O(depth).
    pub(crate) fn find_leaf(&self, key: &str) -> NodeId {
        let mut current = self.root;
        loop {
            match current {
                NodeRef::Leaf(id) => return id,
                NodeRef::Internal(id) => current = self.internal(id).child_for(key),
            }
        }
    }

    // ========================================================================
    // ARENA ACCESS
    // ========================================================================

    pub(crate) fn leaf(&self, id: NodeId) -> &LeafNode {
        &self.leaves[id]
    }

    pub(crate) fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode {
        &mut self.leaves[id]
    }

    pub(crate) fn internal(&self, id: NodeId) -> &InternalNode {
        &self.internals[id]
    }

    pub(crate) fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode {
        &mut self.internals[id]
    }

    pub(crate) fn parent_of(&self, node: NodeRef) -> NodeId {
        match node {
            NodeRef::Leaf(id) => self.leaf(id).parent,
            NodeRef::Internal(id) => self.internal(id).parent,
        }
    }

    pub(crate) fn set_parent(&mut self, node: NodeRef, parent: NodeId) {
        match node {
            NodeRef::Leaf(id) => self.leaf_mut(id).parent = parent,
            NodeRef::Internal(id) => self.internal_mut(id).parent = parent,
        }
    }

    /// Handle of the leftmost leaf; the start of the chain.
    pub(crate) fn first_leaf(&self) -> NodeId {
        let mut current = self.root;
        loop {
            match current {
                NodeRef::Leaf(id) => return id,
                NodeRef::Internal(id) => current = self.internal(id).children[0],
            }
        }
    }

    /// True if `node` is the current root.
    pub(crate) fn is_root(&self, node: NodeRef) -> bool {
        self.root == node && self.parent_of(node) == NULL_NODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_on_empty_index_misses() {
        let index = PartIndex::new();
        assert!(index.search("ANY").is_none());
        assert!(!index.contains_key("ANY"));
    }

    #[test]
    fn update_replaces_payload_in_place() {
        let mut index = PartIndex::new();
        index.insert(Record::new("P-100", "old")).unwrap();

        index.update("P-100", "new").unwrap();
        assert_eq!(index.search("P-100").unwrap().payload, "new");
        assert_eq!(index.record_count(), 1);
    }

    #[test]
    fn update_of_missing_key_reports_not_found() {
        let mut index = PartIndex::new();
        assert_eq!(
            index.update("P-100", "x"),
            Err(IndexError::NotFound("P-100".to_string()))
        );
    }

    #[test]
    fn update_rejects_empty_key() {
        let mut index = PartIndex::new();
        assert_eq!(index.update("", "x"), Err(IndexError::InvalidKey));
    }

    #[test]
    fn find_leaf_descends_across_splits() {
        let mut index = PartIndex::new();
        for i in 0..60 {
            index.insert(Record::new(format!("K{i:04}"), "p")).unwrap();
        }
        for i in 0..60 {
            let key = format!("K{i:04}");
            let leaf = index.leaf(index.find_leaf(&key));
            assert!(leaf.keys.iter().any(|k| *k == key));
        }
    }
}
