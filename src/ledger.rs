//! OrderLedger: global insertion order of keys across both partitions.
//!
//! The ledger knows nothing about partitions; it is a plain sequence of
//! distinct keys compared by equality. Its length always equals the sum of
//! the partition lengths (maintained by `AnyKeyMap`).

#[derive(Clone, Debug)]
pub(crate) struct OrderLedger<K> {
    keys: Vec<K>,
}

impl<K: PartialEq> OrderLedger<K> {
    pub(crate) fn new() -> Self {
        Self { keys: Vec::new() }
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            keys: Vec::with_capacity(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Append `key` unless an equal key is already recorded.
    /// Returns whether the key was appended.
    pub(crate) fn add(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove the first key equal to `key`.
    pub(crate) fn remove(&mut self, key: &K) -> Option<K> {
        let i = self.position(key)?;
        Some(self.keys.remove(i))
    }

    pub(crate) fn last(&self) -> Option<&K> {
        self.keys.last()
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
    }

    pub(crate) fn into_keys(self) -> Vec<K> {
        self.keys
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, K> {
        self.keys.iter()
    }
}
