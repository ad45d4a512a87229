//! Deletion engine: record removal and underflow resolution.
//!
//! A node that drops below its minimum first tries to borrow from a
//! sibling, then merges. The left sibling is preferred for both borrowing
//! and merging at every level; this tie-break is part of the observable
//! behavior and must not change. Merges remove a separator from the
//! parent, which may underflow in turn; resolution recurses upward, at
//! most once per level, until the root. An internal root left with zero
//! separators collapses onto its sole remaining child.

use crate::error::{IndexError, IndexResult};
use crate::types::{NodeId, NodeRef, PartIndex, INTERNAL_MIN, NULL_NODE};

impl PartIndex {
    /// Delete the record for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use partdex::{PartIndex, Record};
    ///
    /// let mut index = PartIndex::new();
    /// index.insert(Record::new("P-100", "hex bolt")).unwrap();
    /// index.delete("P-100").unwrap();
    ///
    /// assert!(index.search("P-100").is_none());
    /// assert!(index.delete("P-100").is_err());
    /// ```
    pub fn delete(&mut self, key: &str) -> IndexResult<()> {
        if key.is_empty() {
            return Err(IndexError::InvalidKey);
        }

        let leaf_id = self.find_leaf(key);
        let leaf = self.leaf_mut(leaf_id);
        let pos = match leaf.keys.binary_search_by(|k| k.as_str().cmp(key)) {
            Ok(pos) => pos,
            Err(_) => return Err(IndexError::NotFound(key.to_string())),
        };
        leaf.keys.remove(pos);
        leaf.payloads.remove(pos);

        if self.is_root(NodeRef::Leaf(leaf_id)) {
            // A root leaf may hold any count down to zero; emptied, it
            // already is the fresh empty leaf the next insert starts from.
            return Ok(());
        }

        if self.leaf(leaf_id).is_underfull() {
            self.handle_leaf_underflow(leaf_id);
        }
        Ok(())
    }

    /// Restore the minimum occupancy of a non-root leaf: borrow from the
    /// left sibling, else from the right, else merge (left preferred).
    fn handle_leaf_underflow(&mut self, leaf_id: NodeId) {
        let parent_id = self.leaf(leaf_id).parent;
        let parent = self.internal(parent_id);
        let idx = parent.child_index(NodeRef::Leaf(leaf_id));
        let left_id = idx.checked_sub(1).map(|i| parent.children[i].id());
        let right_id = parent.children.get(idx + 1).map(|c| c.id());

        if let Some(lid) = left_id {
            if let Some((key, payload)) = self.leaf_mut(lid).borrow_last() {
                let new_first = {
                    let leaf = self.leaf_mut(leaf_id);
                    leaf.keys.insert(0, key);
                    leaf.payloads.insert(0, payload);
                    leaf.keys[0].clone()
                };
                // Separator left of this leaf tracks its first key.
                self.internal_mut(parent_id).keys[idx - 1] = new_first;
                return;
            }
        }

        if let Some(rid) = right_id {
            if let Some((key, payload)) = self.leaf_mut(rid).borrow_first() {
                {
                    let leaf = self.leaf_mut(leaf_id);
                    leaf.keys.push(key);
                    leaf.payloads.push(payload);
                }
                // Separator right of this leaf tracks the right sibling's
                // new first key.
                let sep = self.leaf(rid).keys[0].clone();
                self.internal_mut(parent_id).keys[idx] = sep;
                return;
            }
        }

        // No sibling can donate; merge. Left preferred.
        if let Some(lid) = left_id {
            if let Some(mut dead) = self.leaves.deallocate(leaf_id) {
                let left = self.leaf_mut(lid);
                left.keys.append(&mut dead.keys);
                left.payloads.append(&mut dead.payloads);
                left.next = dead.next;
                if dead.next != NULL_NODE {
                    self.leaf_mut(dead.next).prev = lid;
                }
            }
            let parent = self.internal_mut(parent_id);
            parent.children.remove(idx);
            parent.keys.remove(idx - 1);
            self.stats.fusions += 1;
        } else if let Some(rid) = right_id {
            if let Some(mut dead) = self.leaves.deallocate(rid) {
                let leaf = self.leaf_mut(leaf_id);
                leaf.keys.append(&mut dead.keys);
                leaf.payloads.append(&mut dead.payloads);
                leaf.next = dead.next;
                if dead.next != NULL_NODE {
                    self.leaf_mut(dead.next).prev = leaf_id;
                }
            }
            let parent = self.internal_mut(parent_id);
            parent.children.remove(idx + 1);
            parent.keys.remove(idx);
            self.stats.fusions += 1;
        }

        self.resolve_internal_after_merge(parent_id);
    }

    /// A merge took one separator and one child from `node_id`; decide
    /// whether the tree shrinks, the node rebalances, or nothing more is
    /// needed.
    fn resolve_internal_after_merge(&mut self, node_id: NodeId) {
        if self.is_root(NodeRef::Internal(node_id)) {
            if self.internal(node_id).len() == 0 {
                self.collapse_root(node_id);
            }
            return;
        }
        if self.internal(node_id).len() < INTERNAL_MIN {
            self.handle_internal_underflow(node_id);
        }
    }

    /// Promote the sole remaining child of a separator-less internal
    /// root; the tree loses one level.
    fn collapse_root(&mut self, root_id: NodeId) {
        if let Some(old_root) = self.internals.deallocate(root_id) {
            let child = old_root.children[0];
            self.set_parent(child, NULL_NODE);
            self.root = child;
            self.stats.internal_fusions += 1;
        }
    }

    /// Restore the minimum occupancy of a non-root internal node. Same
    /// borrow-then-merge shape as the leaf case, except separators rotate
    /// through the parent: on a borrow the parent separator moves down
    /// into the underfull node and the donated key replaces it.
    fn handle_internal_underflow(&mut self, node_id: NodeId) {
        let parent_id = self.internal(node_id).parent;
        let parent = self.internal(parent_id);
        let idx = parent.child_index(NodeRef::Internal(node_id));
        let left_id = idx.checked_sub(1).map(|i| parent.children[i].id());
        let right_id = parent.children.get(idx + 1).map(|c| c.id());

        if let Some(lid) = left_id {
            if let Some((donated_key, moved_child)) = self.internal_mut(lid).borrow_last() {
                let sep = std::mem::replace(
                    &mut self.internal_mut(parent_id).keys[idx - 1],
                    donated_key,
                );
                {
                    let node = self.internal_mut(node_id);
                    node.keys.insert(0, sep);
                    node.children.insert(0, moved_child);
                }
                self.set_parent(moved_child, node_id);
                return;
            }
        }

        if let Some(rid) = right_id {
            if let Some((donated_key, moved_child)) = self.internal_mut(rid).borrow_first() {
                let sep =
                    std::mem::replace(&mut self.internal_mut(parent_id).keys[idx], donated_key);
                {
                    let node = self.internal_mut(node_id);
                    node.keys.push(sep);
                    node.children.push(moved_child);
                }
                self.set_parent(moved_child, node_id);
                return;
            }
        }

        // Merge, folding the separating parent key into the survivor.
        if let Some(lid) = left_id {
            let sep = self.internal_mut(parent_id).keys.remove(idx - 1);
            if let Some(mut dead) = self.internals.deallocate(node_id) {
                let moved = dead.children.clone();
                {
                    let left = self.internal_mut(lid);
                    left.keys.push(sep);
                    left.keys.append(&mut dead.keys);
                    left.children.append(&mut dead.children);
                }
                for child in moved {
                    self.set_parent(child, lid);
                }
            }
            self.internal_mut(parent_id).children.remove(idx);
            self.stats.fusions += 1;
        } else if let Some(rid) = right_id {
            let sep = self.internal_mut(parent_id).keys.remove(idx);
            if let Some(mut dead) = self.internals.deallocate(rid) {
                let moved = dead.children.clone();
                {
                    let node = self.internal_mut(node_id);
                    node.keys.push(sep);
                    node.keys.append(&mut dead.keys);
                    node.children.append(&mut dead.children);
                }
                for child in moved {
                    self.set_parent(child, node_id);
                }
            }
            self.internal_mut(parent_id).children.remove(idx + 1);
            self.stats.fusions += 1;
        }

        // Recursion depth is bounded by the tree depth.
        self.resolve_internal_after_merge(parent_id);
    }
}
