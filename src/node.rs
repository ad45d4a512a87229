//! Node-level operations for leaves and internal nodes.
//!
//! These are the record- and separator-level helpers the engine composes:
//! occupancy checks, donation for borrowing, and child location. Anything
//! that touches more than one node (splitting, merging, re-parenting)
//! lives with the engine, which owns the arenas.

use crate::types::{InternalNode, LeafNode, NodeRef, INTERNAL_MIN, LEAF_MAX, LEAF_MIN};

// ============================================================================
// LEAF NODE
// ============================================================================

impl LeafNode {
    pub(crate) fn new() -> Self {
        // One extra slot: a leaf holds LEAF_MAX + 1 records momentarily
        // between an insert and the split it triggers.
        Self {
            keys: Vec::with_capacity(LEAF_MAX + 1),
            payloads: Vec::with_capacity(LEAF_MAX + 1),
            ..Self::default()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn is_underfull(&self) -> bool {
        self.keys.len() < LEAF_MIN
    }

    fn can_donate(&self) -> bool {
        self.keys.len() > LEAF_MIN
    }

    /// Give up the last record, if this leaf can spare one.
    pub(crate) fn borrow_last(&mut self) -> Option<(String, String)> {
        if !self.can_donate() {
            return None;
        }
        let key = self.keys.pop()?;
        let payload = self.payloads.pop()?;
        Some((key, payload))
    }

    /// Give up the first record, if this leaf can spare one.
    pub(crate) fn borrow_first(&mut self) -> Option<(String, String)> {
        if !self.can_donate() {
            return None;
        }
        Some((self.keys.remove(0), self.payloads.remove(0)))
    }
}

// ============================================================================
// INTERNAL NODE
// ============================================================================

impl InternalNode {
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    fn can_donate(&self) -> bool {
        self.keys.len() > INTERNAL_MIN
    }

    /// The child to descend into for `key`: the number of separators
    /// less than or equal to `key`.
    pub(crate) fn child_for(&self, key: &str) -> NodeRef {
        let idx = self.keys.partition_point(|k| k.as_str() <= key);
        self.children[idx]
    }

    /// Position of `child` in the child list.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not among this node's children; parent
    /// back-references guarantee containment.
    pub(crate) fn child_index(&self, child: NodeRef) -> usize {
        self.children
            .iter()
            .position(|c| *c == child)
            .expect("child handle missing from parent")
    }

    /// Give up the last separator and child, if this node can spare them.
    pub(crate) fn borrow_last(&mut self) -> Option<(String, NodeRef)> {
        if !self.can_donate() {
            return None;
        }
        let key = self.keys.pop()?;
        let child = self.children.pop()?;
        Some((key, child))
    }

    /// Give up the first separator and child, if this node can spare them.
    pub(crate) fn borrow_first(&mut self) -> Option<(String, NodeRef)> {
        if !self.can_donate() {
            return None;
        }
        Some((self.keys.remove(0), self.children.remove(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NULL_NODE;

    fn leaf_with(n: usize) -> LeafNode {
        let mut leaf = LeafNode::new();
        for i in 0..n {
            leaf.keys.push(format!("K{i:03}"));
            leaf.payloads.push(format!("payload {i}"));
        }
        leaf
    }

    #[test]
    fn leaf_donates_only_above_minimum() {
        let mut at_min = leaf_with(LEAF_MIN);
        assert_eq!(at_min.borrow_last(), None);
        assert_eq!(at_min.borrow_first(), None);

        let mut above = leaf_with(LEAF_MIN + 1);
        let (key, payload) = above.borrow_last().unwrap();
        assert_eq!(key, "K008");
        assert_eq!(payload, "payload 8");
        assert_eq!(above.len(), LEAF_MIN);
    }

    #[test]
    fn internal_child_for_follows_separators() {
        let node = InternalNode {
            keys: vec!["B".into(), "D".into()],
            children: vec![NodeRef::Leaf(0), NodeRef::Leaf(1), NodeRef::Leaf(2)],
            parent: NULL_NODE,
        };

        assert_eq!(node.child_for("A"), NodeRef::Leaf(0));
        assert_eq!(node.child_for("B"), NodeRef::Leaf(1), "equal key goes right");
        assert_eq!(node.child_for("C"), NodeRef::Leaf(1));
        assert_eq!(node.child_for("D"), NodeRef::Leaf(2));
        assert_eq!(node.child_for("Z"), NodeRef::Leaf(2));
    }

    #[test]
    fn internal_child_index_finds_position() {
        let node = InternalNode {
            keys: vec!["M".into()],
            children: vec![NodeRef::Leaf(7), NodeRef::Internal(3)],
            parent: NULL_NODE,
        };
        assert_eq!(node.child_index(NodeRef::Leaf(7)), 0);
        assert_eq!(node.child_index(NodeRef::Internal(3)), 1);
    }
}
