//! An in-memory B+ tree index for part records.
//!
//! `PartIndex` maps unique string keys to string payloads and keeps
//! them in ascending key order. Leaves hold the records and form a
//! doubly-linked chain for ordered scans; internal nodes hold only
//! separator keys. Nodes live in per-kind arenas and refer to each
//! other by integer handle, so parent and sibling links never fight
//! the borrow checker.
//!
//! Capacities are fixed: leaves hold 8 to 16 records, internal nodes
//! 2 to 4 separators (root excepted). Overflow splits at the floor
//! midpoint; underflow borrows from a sibling before merging, trying
//! the left sibling first in both cases.
//!
//! ```
//! use partdex::{PartIndex, Record};
//!
//! let mut index = PartIndex::new();
//! index.insert(Record::new("P-100", "hex bolt")).unwrap();
//! index.insert(Record::new("P-200", "washer")).unwrap();
//!
//! assert_eq!(index.search("P-200").unwrap().payload, "washer");
//! assert_eq!(index.scan_from("P-100", 10).len(), 2);
//! ```
//!
//! The [`catalog`] module reads and writes the fixed-column part
//! catalog files the index is typically populated from.

mod arena;
pub mod catalog;
mod construction;
mod delete;
mod error;
mod insert;
mod lookup;
mod node;
mod scan;
mod structure;
mod types;
mod validation;

pub use error::{IndexError, IndexResult};
pub use scan::Records;
pub use types::{
    PartIndex, Record, Statistics, INTERNAL_MAX, INTERNAL_MIN, LEAF_MAX, LEAF_MIN,
};
