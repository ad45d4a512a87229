//! Core types and data structures for the part index.
//!
//! This module holds the capacity constants, the record type, the tagged
//! node reference, both node shapes, and the `PartIndex` aggregate that
//! owns the arenas and the root.

use crate::arena::Arena;
pub use crate::arena::{NodeId, NULL_NODE};

// ============================================================================
// CAPACITY CONSTANTS
// ============================================================================

/// Maximum records per leaf node.
pub const LEAF_MAX: usize = 16;
/// Minimum records per non-root leaf node.
pub const LEAF_MIN: usize = 8;
/// Maximum separator keys per internal node.
pub const INTERNAL_MAX: usize = 4;
/// Minimum separator keys per non-root internal node.
pub const INTERNAL_MIN: usize = 2;

// ============================================================================
// RECORDS
// ============================================================================

/// A catalog record: a unique, immutable key and a mutable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub payload: String,
}

impl Record {
    pub fn new(key: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<7}  {}", self.key, self.payload)
    }
}

// ============================================================================
// NODES
// ============================================================================

/// Tagged reference to a node: the handle plus which arena it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Leaf(NodeId),
    Internal(NodeId),
}

impl NodeRef {
    /// The raw handle, without the leaf/internal tag.
    pub fn id(&self) -> NodeId {
        match *self {
            NodeRef::Leaf(id) | NodeRef::Internal(id) => id,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_))
    }
}

/// Leaf node: records as parallel sorted vectors, plus the chain links
/// and the parent back-reference.
#[derive(Debug, Clone)]
pub struct LeafNode {
    /// Sorted, unique record keys.
    pub(crate) keys: Vec<String>,
    /// Payloads, parallel to `keys`.
    pub(crate) payloads: Vec<String>,
    /// Next leaf in ascending key order, `NULL_NODE` at the right end.
    pub(crate) next: NodeId,
    /// Previous leaf, `NULL_NODE` at the left end.
    pub(crate) prev: NodeId,
    /// Owning internal node, `NULL_NODE` only for a root leaf.
    pub(crate) parent: NodeId,
}

/// Internal node: `k` separator keys and `k + 1` children. Separator `i`
/// equals the first key of the subtree rooted at child `i + 1`.
#[derive(Debug, Clone)]
pub struct InternalNode {
    pub(crate) keys: Vec<String>,
    pub(crate) children: Vec<NodeRef>,
    /// Owning internal node, `NULL_NODE` only for the root.
    pub(crate) parent: NodeId,
}

// Defaults exist so freed arena slots can be backfilled; all handles start
// at NULL_NODE, never at a live slot index.
impl Default for LeafNode {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            payloads: Vec::new(),
            next: NULL_NODE,
            prev: NULL_NODE,
            parent: NULL_NODE,
        }
    }
}

impl Default for InternalNode {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            parent: NULL_NODE,
        }
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Structural counters accumulated over the index lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Node splits (leaf and internal).
    pub splits: u64,
    /// Internal-node splits, plus root creation by a split.
    pub internal_splits: u64,
    /// Node merges (leaf and internal).
    pub fusions: u64,
    /// Root collapses onto a sole remaining child.
    pub internal_fusions: u64,
}

// ============================================================================
// THE INDEX
// ============================================================================

/// In-memory B+ tree index over string-keyed records.
///
/// Keys are ordered lexicographically. Leaves hold the records and form a
/// doubly-linked chain in ascending key order; internal nodes hold only
/// separator keys. Structural balance is maintained by split-on-overflow
/// and borrow-then-merge-on-underflow, with left-sibling preference at
/// every level.
///
/// # Examples
///
/// ```
/// use partdex::{PartIndex, Record};
///
/// let mut index = PartIndex::new();
/// index.insert(Record::new("P-100", "hex bolt")).unwrap();
/// index.insert(Record::new("P-200", "washer")).unwrap();
///
/// assert_eq!(index.search("P-100").unwrap().payload, "hex bolt");
/// assert_eq!(index.record_count(), 2);
/// ```
#[derive(Debug)]
pub struct PartIndex {
    /// The root node; a leaf until the first split.
    pub(crate) root: NodeRef,
    /// Arena storage for leaf nodes.
    pub(crate) leaves: Arena<LeafNode>,
    /// Arena storage for internal nodes.
    pub(crate) internals: Arena<InternalNode>,
    pub(crate) stats: Statistics,
}
