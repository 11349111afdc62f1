//! Category counters and diagnostic message sets.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::btree_set;
use std::collections::{BTreeMap, BTreeSet};

/// Count of diagnostics per category key
///
/// Keys with a zero count are never stored, so an absent key and a zero
/// count are the same thing. Iteration is in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counter(BTreeMap<String, u64>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` to the count of `key`
    pub fn add(&mut self, key: impl Into<String>, n: u64) {
        if n == 0 {
            return;
        }
        let count = self.0.entry(key.into()).or_insert(0);
        *count = count.saturating_add(n);
    }

    /// Add one to the count of `key`
    pub fn increment(&mut self, key: impl Into<String>) {
        self.add(key, 1);
    }

    /// Count for `key`, zero when absent
    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |sum, &n| sum.saturating_add(n))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, u64> {
        self.0.iter()
    }

    /// Multiset subtraction: `self - other`, keeping only keys whose result is positive
    pub fn subtract(&self, other: &Counter) -> Counter {
        self.0
            .iter()
            .filter_map(|(key, &count)| {
                let remaining = count.saturating_sub(other.get(key));
                (remaining > 0).then(|| (key.clone(), remaining))
            })
            .collect()
    }

    /// Signed difference `self - other` for every key where the two counters differ
    ///
    /// Differences beyond the `i64` range saturate.
    pub fn delta(&self, other: &Counter) -> BTreeMap<String, i64> {
        let keys: BTreeSet<&String> = self.0.keys().chain(other.0.keys()).collect();
        keys.into_iter()
            .filter_map(|key| {
                let diff = i128::from(self.get(key)) - i128::from(other.get(key));
                let diff = i64::try_from(diff).unwrap_or(if diff > 0 {
                    i64::MAX
                } else {
                    i64::MIN
                });
                (diff != 0).then(|| (key.clone(), diff))
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Counter {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut counter = Counter::new();
        for (key, n) in iter {
            counter.add(key, n);
        }
        counter
    }
}

impl<'a> IntoIterator for &'a Counter {
    type Item = (&'a String, &'a u64);
    type IntoIter = btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Set of unique diagnostic strings, kept in lexicographic order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageSet(BTreeSet<String>);

impl MessageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message; returns false if it was already present
    pub fn insert(&mut self, message: impl Into<String>) -> bool {
        self.0.insert(message.into())
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.contains(message)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Messages in `self` but not in `other`, sorted
    pub fn difference(&self, other: &MessageSet) -> Vec<String> {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Messages in both sets, sorted
    pub fn intersection(&self, other: &MessageSet) -> Vec<String> {
        self.0.intersection(&other.0).cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for MessageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        MessageSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a MessageSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
