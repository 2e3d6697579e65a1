use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{DuplicateKey, ReconError, Side};
use crate::model::TxRecord;

/// How duplicate keys are resolved during index construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later occurrence replaces the stored record; iteration position
    /// stays where the key first appeared.
    #[default]
    KeepLast,
    /// Later occurrences are ignored.
    KeepFirst,
    /// Index construction fails, listing every duplicated key.
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeepLast => "keep_last",
            Self::KeepFirst => "keep_first",
            Self::Reject => "reject",
        }
    }
}

/// Ordered key → record view of one source collection.
///
/// Iteration is first-seen key order. At most one record per key; rows with
/// an empty reference go to the `unkeyed` bucket and never enter the key
/// map, so they cannot collide with each other or with keyed rows.
#[derive(Debug, Clone, Default)]
pub struct KeyedIndex {
    records: Vec<TxRecord>,
    by_key: HashMap<String, usize>,
    unkeyed: Vec<TxRecord>,
    source_rows: usize,
}

impl KeyedIndex {
    /// Build the index in one pass. Total for `keep_last`/`keep_first`;
    /// only `reject` can fail. `side` labels duplicate-key reports.
    pub fn build(
        side: Side,
        records: Vec<TxRecord>,
        policy: DuplicatePolicy,
    ) -> Result<Self, ReconError> {
        let mut index = Self::default();
        let mut dup_counts: HashMap<String, usize> = HashMap::new();

        for record in records {
            index.source_rows += 1;

            if record.reference.is_empty() {
                index.unkeyed.push(record);
                continue;
            }

            match index.by_key.get(&record.reference) {
                None => {
                    index.by_key.insert(record.reference.clone(), index.records.len());
                    index.records.push(record);
                }
                Some(&slot) => match policy {
                    DuplicatePolicy::KeepLast => index.records[slot] = record,
                    DuplicatePolicy::KeepFirst => {}
                    DuplicatePolicy::Reject => {
                        // First duplicate means the key was seen twice.
                        *dup_counts.entry(record.reference).or_insert(1) += 1;
                    }
                },
            }
        }

        if !dup_counts.is_empty() {
            let mut dups: Vec<DuplicateKey> = dup_counts
                .into_iter()
                .map(|(key, count)| DuplicateKey { side, key, count })
                .collect();
            dups.sort_by(|a, b| a.key.cmp(&b.key));
            return Err(ReconError::DuplicateKeys(dups));
        }

        Ok(index)
    }

    /// Stored record for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&TxRecord> {
        self.by_key.get(key).map(|&slot| &self.records[slot])
    }

    /// Stored record plus its first-seen position.
    pub fn lookup(&self, key: &str) -> Option<(usize, &TxRecord)> {
        self.by_key.get(key).map(|&slot| (slot, &self.records[slot]))
    }

    /// Records in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = &TxRecord> {
        self.records.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the source collection had no rows at all, keyed or not.
    pub fn is_empty(&self) -> bool {
        self.source_rows == 0
    }

    /// Rows consumed from the source, keyed + unkeyed.
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    /// Rows whose reference was empty; reported separately, never joined.
    pub fn unkeyed(&self) -> &[TxRecord] {
        &self.unkeyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(reference: &str, amount: &str) -> TxRecord {
        TxRecord::new(reference, amount, "paid")
    }

    #[test]
    fn keep_last_overwrites_value_keeps_position() {
        let index = KeyedIndex::build(
            Side::Internal,
            vec![rec("A", "1"), rec("B", "5"), rec("A", "2")],
            DuplicatePolicy::KeepLast,
        )
        .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("A").unwrap().amount, "2");
        // "A" stays in the slot where it first appeared.
        let order: Vec<&str> = index.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn keep_first_ignores_later_occurrences() {
        let index = KeyedIndex::build(
            Side::Internal,
            vec![rec("A", "1"), rec("A", "2")],
            DuplicatePolicy::KeepFirst,
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("A").unwrap().amount, "1");
    }

    #[test]
    fn reject_lists_every_duplicate_with_count() {
        let err = KeyedIndex::build(
            Side::Provider,
            vec![rec("A", "1"), rec("A", "2"), rec("A", "3"), rec("B", "4")],
            DuplicatePolicy::Reject,
        )
        .unwrap_err();

        match err {
            ReconError::DuplicateKeys(dups) => {
                assert_eq!(dups.len(), 1);
                assert_eq!(dups[0].key, "A");
                assert_eq!(dups[0].count, 3);
                assert_eq!(dups[0].side, Side::Provider);
            }
            other => panic!("expected DuplicateKeys, got {other:?}"),
        }
    }

    #[test]
    fn empty_keys_bucket_separately() {
        let index = KeyedIndex::build(
            Side::Internal,
            vec![rec("", "1"), rec("A", "2"), rec("", "3")],
            DuplicatePolicy::KeepLast,
        )
        .unwrap();

        // Two unkeyed rows do not collide into one entry.
        assert_eq!(index.unkeyed().len(), 2);
        assert_eq!(index.len(), 1);
        assert_eq!(index.source_rows(), 3);
        assert!(index.get("").is_none());
    }

    #[test]
    fn empty_input_is_empty_index() {
        let index =
            KeyedIndex::build(Side::Internal, vec![], DuplicatePolicy::KeepLast).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.source_rows(), 0);
    }

    #[test]
    fn unkeyed_rows_still_count_as_source_rows() {
        let index = KeyedIndex::build(
            Side::Internal,
            vec![rec("", "1")],
            DuplicatePolicy::KeepLast,
        )
        .unwrap();
        assert!(!index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
