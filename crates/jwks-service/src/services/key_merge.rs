//! Deduplication of JWK records that describe the same key.
//!
//! Records are folded into an ordered accumulator one at a time. Each incoming
//! record is compared against the accumulator front to back and merged into
//! the first record it matches ([`JsonWebKey::same_key_as`]); otherwise it is
//! appended. Merging only fills members the existing record lacks.
//!
//! The match relation is not transitive, so the result depends on input
//! order: a record matching two accumulated records on different members is
//! merged into the earlier one only, and the two are never combined.

use crate::models::JsonWebKey;

/// What [`KeyMerger::push`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No accumulated record matched; the record starts a new key.
    Appended,
    /// Merged into the accumulated record at `index`.
    Merged { index: usize },
}

/// Ordered accumulator of distinct keys, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct KeyMerger {
    keys: Vec<JsonWebKey>,
}

impl KeyMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the accumulator.
    pub fn push(&mut self, incoming: JsonWebKey) -> MergeOutcome {
        let matched = self
            .keys
            .iter_mut()
            .enumerate()
            .find(|(_, existing)| existing.same_key_as(&incoming));

        match matched {
            Some((index, existing)) => {
                existing.fill_missing_from(&incoming);
                MergeOutcome::Merged { index }
            }
            None => {
                self.keys.push(incoming);
                MergeOutcome::Appended
            }
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_keys(self) -> Vec<JsonWebKey> {
        self.keys
    }
}

impl Extend<JsonWebKey> for KeyMerger {
    fn extend<I: IntoIterator<Item = JsonWebKey>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }
}

impl FromIterator<JsonWebKey> for KeyMerger {
    fn from_iter<I: IntoIterator<Item = JsonWebKey>>(records: I) -> Self {
        let mut merger = KeyMerger::new();
        merger.extend(records);
        merger
    }
}

/// Merge a sequence of records into distinct keys.
pub fn merge_keys<I>(records: I) -> Vec<JsonWebKey>
where
    I: IntoIterator<Item = JsonWebKey>,
{
    records.into_iter().collect::<KeyMerger>().into_keys()
}
