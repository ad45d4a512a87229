//! Slot arena for node storage.
//!
//! All nodes live in an arena and are referenced by integer handle. The
//! arena owns the storage; handles are the only form of node reference,
//! which keeps re-parenting during splits and merges O(1) and avoids any
//! ownership cycles between parents, children, and chained leaves.

use std::convert::TryFrom;

/// Handle to a node slot in an arena.
pub type NodeId = u32;

/// Sentinel handle meaning "no node" (absent parent, end of chain).
pub const NULL_NODE: NodeId = u32::MAX;

/// Slot arena with a free list. Freed slots are reused by later
/// allocations, so handles are only stable while their node is live.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    storage: Vec<T>,
    free_list: Vec<usize>,
    allocated: Vec<bool>,
}

impl<T: Default> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated: Vec::new(),
        }
    }

    /// Allocate a slot for `item` and return its handle.
    pub(crate) fn allocate(&mut self, item: T) -> NodeId {
        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated[free_index] = true;
            free_index
        } else {
            let index = self.storage.len();
            self.storage.push(item);
            self.allocated.push(true);
            index
        };

        NodeId::try_from(index).expect("arena index fits in NodeId")
    }

    /// Free a slot and return its contents, or `None` if the handle is
    /// stale or `NULL_NODE`.
    pub(crate) fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let index = usize::try_from(id).ok()?;
        if !self.allocated.get(index).copied().unwrap_or(false) {
            return None;
        }

        self.allocated[index] = false;
        self.free_list.push(index);
        Some(std::mem::take(&mut self.storage[index]))
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        let index = usize::try_from(id).ok()?;
        if self.allocated.get(index).copied().unwrap_or(false) {
            Some(&self.storage[index])
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = usize::try_from(id).ok()?;
        if self.allocated.get(index).copied().unwrap_or(false) {
            Some(&mut self.storage[index])
        } else {
            None
        }
    }

    /// Number of live slots.
    pub(crate) fn len(&self) -> usize {
        self.allocated.iter().filter(|&&a| a).count()
    }

    /// Drop every slot and reset the free list.
    pub(crate) fn clear(&mut self) {
        self.storage.clear();
        self.allocated.clear();
        self.free_list.clear();
    }
}

impl<T: Default> std::ops::Index<NodeId> for Arena<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `id` is `NULL_NODE` or does not refer to a live slot.
    fn index(&self, id: NodeId) -> &T {
        self.get(id).expect("stale or null node handle")
    }
}

impl<T: Default> std::ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        self.get_mut(id).expect("stale or null node handle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_get() {
        let mut arena = Arena::new();
        let a = arena.allocate(42);
        let b = arena.allocate(84);

        assert_eq!(arena.get(a), Some(&42));
        assert_eq!(arena.get(b), Some(&84));
        assert_eq!(arena.get(NULL_NODE), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn deallocate_then_reuse_slot() {
        let mut arena = Arena::new();
        let a = arena.allocate(1);
        let _b = arena.allocate(2);

        assert_eq!(arena.deallocate(a), Some(1));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.deallocate(a), None);

        let c = arena.allocate(3);
        assert_eq!(c, a, "freed slot is reused");
        assert_eq!(arena.get(c), Some(&3));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut arena = Arena::new();
        arena.allocate(1);
        arena.allocate(2);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(0), None);
    }

    #[test]
    #[should_panic(expected = "stale or null node handle")]
    fn indexing_stale_handle_panics() {
        let mut arena = Arena::new();
        let a = arena.allocate(1);
        arena.deallocate(a);
        let _ = arena[a];
    }
}
