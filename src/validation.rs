//! Invariant checking and test scaffolding.
//!
//! `check_invariants` verifies every structural invariant the engine is
//! supposed to maintain: node occupancy bounds, separator/child counts,
//! key ordering and bounds, parent back-reference consistency, uniform
//! leaf depth, the doubly-linked leaf chain, and arena/tree agreement on
//! the set of live nodes. Tests call it after every mutation batch.

use crate::types::{
    NodeId, NodeRef, PartIndex, INTERNAL_MAX, INTERNAL_MIN, LEAF_MAX, LEAF_MIN, NULL_NODE,
};

impl PartIndex {
    /// Verify every structural invariant, reporting the first violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.parent_of(self.root) != NULL_NODE {
            return Err("root has a parent reference".to_string());
        }

        let mut leaf_depth = None;
        self.check_node(self.root, NULL_NODE, None, None, 1, &mut leaf_depth)?;
        self.check_chain()?;
        self.check_arena_consistency()
    }

    /// Record counts of each leaf, left to right along the chain.
    pub fn leaf_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut leaf_id = self.first_leaf();
        while leaf_id != NULL_NODE {
            let leaf = self.leaf(leaf_id);
            sizes.push(leaf.len());
            leaf_id = leaf.next;
        }
        sizes
    }

    fn check_node(
        &self,
        node: NodeRef,
        parent: NodeId,
        min: Option<&str>,
        max: Option<&str>,
        depth: usize,
        leaf_depth: &mut Option<usize>,
    ) -> Result<(), String> {
        match node {
            NodeRef::Leaf(id) => {
                let leaf = self
                    .leaves
                    .get(id)
                    .ok_or_else(|| format!("leaf {id} not allocated"))?;

                if leaf.parent != parent {
                    return Err(format!(
                        "leaf {id} parent is {} but containment says {}",
                        leaf.parent, parent
                    ));
                }
                if leaf.keys.len() != leaf.payloads.len() {
                    return Err(format!("leaf {id} keys/payloads length mismatch"));
                }
                for pair in leaf.keys.windows(2) {
                    if pair[0] >= pair[1] {
                        return Err(format!("leaf {id} keys not strictly ascending"));
                    }
                }
                if parent != NULL_NODE && leaf.len() < LEAF_MIN {
                    return Err(format!("non-root leaf {id} underfull: {}", leaf.len()));
                }
                if leaf.len() > LEAF_MAX {
                    return Err(format!("leaf {id} overfull: {}", leaf.len()));
                }
                if let (Some(min), Some(first)) = (min, leaf.keys.first()) {
                    if first.as_str() < min {
                        return Err(format!("leaf {id} first key below separator bound"));
                    }
                }
                if let (Some(max), Some(last)) = (max, leaf.keys.last()) {
                    if last.as_str() >= max {
                        return Err(format!("leaf {id} last key at or above separator bound"));
                    }
                }

                match *leaf_depth {
                    None => *leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(format!(
                            "leaf {id} at depth {depth}, expected uniform depth {expected}"
                        ));
                    }
                    Some(_) => {}
                }
                Ok(())
            }
            NodeRef::Internal(id) => {
                let node = self
                    .internals
                    .get(id)
                    .ok_or_else(|| format!("internal {id} not allocated"))?;

                if node.parent != parent {
                    return Err(format!(
                        "internal {id} parent is {} but containment says {}",
                        node.parent, parent
                    ));
                }
                if node.keys.len() + 1 != node.children.len() {
                    return Err(format!(
                        "internal {id} has {} separators but {} children",
                        node.keys.len(),
                        node.children.len()
                    ));
                }
                for pair in node.keys.windows(2) {
                    if pair[0] >= pair[1] {
                        return Err(format!("internal {id} separators not strictly ascending"));
                    }
                }
                if node.keys.is_empty() {
                    return Err(format!("internal {id} has no separators"));
                }
                if parent != NULL_NODE && node.len() < INTERNAL_MIN {
                    return Err(format!("non-root internal {id} underfull: {}", node.len()));
                }
                if node.len() > INTERNAL_MAX {
                    return Err(format!("internal {id} overfull: {}", node.len()));
                }

                for (i, child) in node.children.iter().enumerate() {
                    let child_min = if i == 0 {
                        min
                    } else {
                        Some(node.keys[i - 1].as_str())
                    };
                    let child_max = if i == node.keys.len() {
                        max
                    } else {
                        Some(node.keys[i].as_str())
                    };
                    self.check_node(*child, id, child_min, child_max, depth + 1, leaf_depth)?;
                }
                Ok(())
            }
        }
    }

    /// The chain must visit every leaf of the tree exactly once, in
    /// ascending key order, with consistent back-links at each step.
    fn check_chain(&self) -> Result<(), String> {
        let mut tree_leaves = Vec::new();
        collect_leaf_ids(self, self.root, &mut tree_leaves);

        let mut chain_leaves = Vec::new();
        let mut prev_id = NULL_NODE;
        let mut prev_key: Option<&str> = None;
        let mut leaf_id = self.first_leaf();

        while leaf_id != NULL_NODE {
            if chain_leaves.len() > tree_leaves.len() {
                return Err("leaf chain is longer than the tree (cycle?)".to_string());
            }
            let leaf = self
                .leaves
                .get(leaf_id)
                .ok_or_else(|| format!("chain reaches unallocated leaf {leaf_id}"))?;
            if leaf.prev != prev_id {
                return Err(format!(
                    "leaf {leaf_id} prev is {} but chain order says {}",
                    leaf.prev, prev_id
                ));
            }
            for key in &leaf.keys {
                if let Some(prev) = prev_key {
                    if prev >= key.as_str() {
                        return Err(format!("chain keys not ascending at leaf {leaf_id}"));
                    }
                }
                prev_key = Some(key.as_str());
            }
            chain_leaves.push(leaf_id);
            prev_id = leaf_id;
            leaf_id = leaf.next;
        }

        let mut tree_sorted = tree_leaves.clone();
        tree_sorted.sort_unstable();
        let mut chain_sorted = chain_leaves.clone();
        chain_sorted.sort_unstable();
        if tree_sorted != chain_sorted {
            return Err(format!(
                "tree leaves {tree_sorted:?} differ from chain leaves {chain_sorted:?}"
            ));
        }
        Ok(())
    }

    /// Every arena slot must be reachable from the root and vice versa.
    fn check_arena_consistency(&self) -> Result<(), String> {
        let mut tree_leaves = Vec::new();
        collect_leaf_ids(self, self.root, &mut tree_leaves);
        if tree_leaves.len() != self.leaves.len() {
            return Err(format!(
                "{} leaves in tree but {} allocated",
                tree_leaves.len(),
                self.leaves.len()
            ));
        }

        let mut tree_internals = Vec::new();
        collect_internal_ids(self, self.root, &mut tree_internals);
        if tree_internals.len() != self.internals.len() {
            return Err(format!(
                "{} internal nodes in tree but {} allocated",
                tree_internals.len(),
                self.internals.len()
            ));
        }
        Ok(())
    }
}

fn collect_leaf_ids(index: &PartIndex, node: NodeRef, out: &mut Vec<NodeId>) {
    match node {
        NodeRef::Leaf(id) => out.push(id),
        NodeRef::Internal(id) => {
            for child in &index.internal(id).children {
                collect_leaf_ids(index, *child, out);
            }
        }
    }
}

fn collect_internal_ids(index: &PartIndex, node: NodeRef, out: &mut Vec<NodeId>) {
    if let NodeRef::Internal(id) = node {
        out.push(id);
        for child in &index.internal(id).children {
            collect_internal_ids(index, *child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;

    #[test]
    fn fresh_index_passes() {
        PartIndex::new().check_invariants().unwrap();
    }

    #[test]
    fn invariants_hold_through_mixed_growth() {
        let mut index = PartIndex::new();
        for i in 0..300 {
            // Interleave two key ranges so inserts hit interior leaves.
            let k = if i % 2 == 0 { i } else { 1000 - i };
            index
                .insert(Record::new(format!("K{k:04}"), "p"))
                .unwrap();
            index.check_invariants().unwrap();
        }
    }

    #[test]
    fn detects_a_broken_chain_link() {
        let mut index = PartIndex::new();
        for i in 0..40 {
            index
                .insert(Record::new(format!("K{i:04}"), "p"))
                .unwrap();
        }
        // Corrupt one back-link.
        let second = {
            let first = index.first_leaf();
            index.leaf(first).next
        };
        index.leaf_mut(second).prev = NULL_NODE;
        assert!(index.check_invariants().is_err());
    }
}
