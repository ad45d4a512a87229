//! Ordered iteration over the leaf chain.
//!
//! The chain gives the full ascending key order independent of tree
//! shape, so scans never touch internal nodes after the initial descent.

use crate::types::{NodeId, PartIndex, Record, NULL_NODE};

impl PartIndex {
    /// Collect up to `count` records with key >= `start_key`, in
    /// ascending order. Non-mutating; the result is a snapshot, not a
    /// live cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use partdex::{PartIndex, Record};
    ///
    /// let mut index = PartIndex::new();
    /// for key in ["P-100", "P-200", "P-300"] {
    ///     index.insert(Record::new(key, "part")).unwrap();
    /// }
    ///
    /// let hits = index.scan_from("P-150", 10);
    /// let keys: Vec<_> = hits.iter().map(|r| r.key.as_str()).collect();
    /// assert_eq!(keys, ["P-200", "P-300"]);
    /// ```
    pub fn scan_from(&self, start_key: &str, count: usize) -> Vec<Record> {
        let mut out = Vec::new();
        let mut leaf_id = self.find_leaf(start_key);
        // First record at or after the start key within the owning leaf.
        let mut idx = self
            .leaf(leaf_id)
            .keys
            .partition_point(|k| k.as_str() < start_key);

        while leaf_id != NULL_NODE && out.len() < count {
            let leaf = self.leaf(leaf_id);
            while idx < leaf.len() && out.len() < count {
                out.push(Record::new(leaf.keys[idx].clone(), leaf.payloads[idx].clone()));
                idx += 1;
            }
            leaf_id = leaf.next;
            idx = 0;
        }
        out
    }

    /// Iterate over all records in ascending key order as borrowed
    /// `(key, payload)` pairs.
    pub fn records(&self) -> Records<'_> {
        Records {
            index: self,
            leaf_id: self.first_leaf(),
            idx: 0,
        }
    }
}

/// Borrowing iterator over the whole leaf chain.
pub struct Records<'a> {
    index: &'a PartIndex,
    leaf_id: NodeId,
    idx: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while self.leaf_id != NULL_NODE {
            let leaf = self.index.leaf(self.leaf_id);
            if self.idx < leaf.len() {
                let item = (
                    leaf.keys[self.idx].as_str(),
                    leaf.payloads[self.idx].as_str(),
                );
                self.idx += 1;
                return Some(item);
            }
            self.leaf_id = leaf.next;
            self.idx = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LEAF_MAX;

    fn key(i: usize) -> String {
        format!("A{i:04}")
    }

    fn filled(n: usize) -> PartIndex {
        let mut index = PartIndex::new();
        for i in 0..n {
            index.insert(Record::new(key(i), format!("payload {i}"))).unwrap();
        }
        index
    }

    #[test]
    fn scan_from_start_of_a_multi_leaf_tree() {
        let index = filled(3 * LEAF_MAX);
        let all = index.scan_from("", usize::MAX);
        assert_eq!(all.len(), 3 * LEAF_MAX);
        for (i, record) in all.iter().enumerate() {
            assert_eq!(record.key, key(i));
        }
    }

    #[test]
    fn scan_respects_count_and_start_key() {
        let index = filled(40);
        let hits = index.scan_from(&key(10), 5);
        let keys: Vec<_> = hits.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, vec![key(10), key(11), key(12), key(13), key(14)]);
    }

    #[test]
    fn scan_starts_at_first_key_at_or_after_missing_start() {
        let index = filled(20);
        // "A0010x" sorts between A0010 and A0011.
        let hits = index.scan_from("A0010x", 3);
        let keys: Vec<_> = hits.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, vec![key(11), key(12), key(13)]);
    }

    #[test]
    fn scan_past_the_end_is_empty() {
        let index = filled(10);
        assert!(index.scan_from("Z", 5).is_empty());
        assert!(index.scan_from(&key(0), 0).is_empty());
    }

    #[test]
    fn scan_crosses_leaf_boundaries_in_order() {
        let index = filled(2 * LEAF_MAX);
        // Start inside the first leaf, read well into the second.
        let hits = index.scan_from(&key(5), LEAF_MAX);
        assert_eq!(hits.len(), LEAF_MAX);
        for window in hits.windows(2) {
            assert!(window[0].key < window[1].key);
        }
    }

    #[test]
    fn records_iterator_walks_the_whole_chain() {
        let index = filled(50);
        let collected: Vec<_> = index.records().map(|(k, _)| k.to_string()).collect();
        assert_eq!(collected.len(), 50);
        assert!(collected.windows(2).all(|w| w[0] < w[1]));
    }
}
