//! AnyKeyMap: the composite map.
//!
//! Every operation enters here. A key's hashability decides which
//! partition owns it; the ledger records the global insertion order across
//! both. Reads that return several entries walk the ledger and look each
//! key up in its partition.

use crate::cursor::{CursorParent, ItemCursor, KeyCursor, MapId, ValueCursor};
use crate::error::AnyKeyError;
use crate::hash_partition::HashPartition;
use crate::key::{try_hash, AnyKey};
use crate::ledger::OrderLedger;
use crate::linear_partition::LinearPartition;
use crate::mapping::{mapping_eq, Containable, Indexable, Lengthable, Mapping, Source};
use crate::views::{Items, Keys, Values};
use core::fmt;
use core::hash::BuildHasher;
use std::collections::hash_map::RandomState;

pub struct AnyKeyMap<K, V, S = RandomState> {
    id: MapId,
    hasher: S,
    hashed: HashPartition<K, V>,
    linear: LinearPartition<K, V>,
    ledger: OrderLedger<K>,
}

impl<K, V> AnyKeyMap<K, V>
where
    K: AnyKey + Clone,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity(n: usize) -> Self {
        Self::with_capacity_and_hasher(n, Default::default())
    }
}

impl<K, V, S> AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(n: usize, hasher: S) -> Self {
        Self {
            id: MapId::fresh(),
            hasher,
            hashed: HashPartition::with_capacity(n),
            linear: LinearPartition::new(),
            ledger: OrderLedger::with_capacity(n),
        }
    }

    /// Build from an optional source. `None` yields an empty map.
    pub fn from_source(source: Option<Source<'_, K, V>>) -> Self
    where
        S: Default,
        V: Clone,
    {
        let mut m = Self::with_hasher(S::default());
        m.update(source);
        m
    }

    /// Build a map whose keys all map to a clone of `value`.
    pub fn fromkeys<I>(keys: I, value: V) -> Self
    where
        I: IntoIterator<Item = K>,
        S: Default,
        V: Clone,
    {
        keys.into_iter().map(|k| (k, value.clone())).collect()
    }

    fn hash_of(&self, key: &K) -> Option<u64> {
        try_hash(&self.hasher, key)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries stored in the hash-indexed partition.
    pub fn hashed_len(&self) -> usize {
        self.hashed.len()
    }

    /// Number of entries stored in the equality-scanned partition.
    pub fn linear_len(&self) -> usize {
        self.linear.len()
    }

    /// Insert or replace. A replaced key keeps its position; a new key is
    /// appended to the order. Returns the previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.hash_of(&key) {
            Some(h) => {
                if let Some(slot) = self.hashed.get_mut(h, &key) {
                    return Some(core::mem::replace(slot, value));
                }
                self.ledger.add(key.clone());
                self.hashed.insert(h, key, value)
            }
            None => {
                if let Some(slot) = self.linear.get_mut(&key) {
                    return Some(core::mem::replace(slot, value));
                }
                log::trace!(
                    "key has no hash; appending to linear partition ({} entries)",
                    self.linear.len()
                );
                self.ledger.add(key.clone());
                self.linear.insert(key, value)
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        if let Some(h) = self.hash_of(key) {
            if let Some(v) = self.hashed.get(h, key) {
                return Some(v);
            }
        }
        self.linear.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if let Some(h) = self.hash_of(key) {
            if let Some(v) = self.hashed.get_mut(h, key) {
                return Some(v);
            }
        }
        self.linear.get_mut(key)
    }

    /// The stored value, or `default` when the key is absent.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Subscript-style read: a missing key is an error.
    pub fn try_get(&self, key: &K) -> Result<&V, AnyKeyError> {
        self.get(key).ok_or(AnyKeyError::MissingKey)
    }

    /// Return the stored value for `key`, inserting `make()` first if absent.
    ///
    /// `make` runs before anything is recorded, so a panic inside it leaves
    /// the map unchanged.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        match self.hash_of(&key) {
            Some(h) => {
                if self.hashed.get(h, &key).is_none() {
                    let value = make();
                    self.ledger.add(key.clone());
                    return self.hashed.get_or_insert_with(h, key, move || value);
                }
                self.hashed.get_or_insert_with(h, key, make)
            }
            None => {
                if self.linear.get(&key).is_none() {
                    let value = make();
                    self.ledger.add(key.clone());
                    return self.linear.get_or_insert_with(key, move || value);
                }
                self.linear.get_or_insert_with(key, make)
            }
        }
    }

    /// Insert `default` if `key` is absent; return the stored value.
    pub fn setdefault(&mut self, key: K, default: V) -> &mut V {
        self.get_or_insert_with(key, || default)
    }

    /// Membership by equality scan of the order ledger, independent of
    /// which partition holds the key.
    pub fn contains(&self, key: &K) -> bool {
        self.ledger.contains(key)
    }

    fn take_from_partitions(&mut self, key: &K) -> Option<(K, V)> {
        match self.hash_of(key) {
            Some(h) => self
                .hashed
                .remove(h, key)
                .or_else(|| self.linear.remove(key)),
            None => self.linear.remove(key),
        }
    }

    fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let entry = self.take_from_partitions(key)?;
        self.ledger.remove(&entry.0);
        Some(entry)
    }

    /// Remove `key` from its partition and from the order.
    pub fn delete(&mut self, key: &K) -> Result<(), AnyKeyError> {
        self.remove_entry(key)
            .map(|_| ())
            .ok_or(AnyKeyError::MissingKey)
    }

    pub fn pop(&mut self, key: &K) -> Result<V, AnyKeyError> {
        self.remove_entry(key)
            .map(|(_, v)| v)
            .ok_or(AnyKeyError::MissingKey)
    }

    pub fn pop_or(&mut self, key: &K, default: V) -> V {
        self.pop(key).unwrap_or(default)
    }

    /// Remove and return the most recently inserted entry.
    pub fn popitem(&mut self) -> Result<(K, V), AnyKeyError> {
        let last = self.ledger.last().cloned().ok_or(AnyKeyError::MissingKey)?;
        self.remove_entry(&last).ok_or(AnyKeyError::MissingKey)
    }

    pub fn clear(&mut self) {
        self.hashed.clear();
        self.linear.clear();
        self.ledger.clear();
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            map: self,
            order: self.ledger.iter(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K> {
        Keys::new(self.id, self.ledger.iter().collect())
    }

    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.id, self.iter().map(|(_, v)| v).collect())
    }

    pub fn items(&self) -> Items<'_, K, V> {
        Items::new(self.id, self.iter().collect())
    }

    pub fn key_cursor(&self) -> KeyCursor<K> {
        self.keys().cursor()
    }

    pub fn value_cursor(&self) -> ValueCursor<V>
    where
        V: Clone,
    {
        self.values().cursor()
    }

    pub fn item_cursor(&self) -> ItemCursor<K, V>
    where
        V: Clone,
    {
        self.items().cursor()
    }

    /// Merge `source` into this map. Mapping sources are walked through
    /// their key list; pair sources are applied in order. `None` is a no-op.
    pub fn update(&mut self, source: Option<Source<'_, K, V>>)
    where
        V: Clone,
    {
        match source {
            None => {}
            Some(Source::Pairs(pairs)) => {
                for (k, v) in pairs {
                    self.set(k, v);
                }
            }
            Some(Source::Mapping(m)) => {
                for k in m.key_list() {
                    if let Some(v) = m.lookup(k) {
                        self.set(k.clone(), v.clone());
                    }
                }
            }
        }
    }

    /// A new, independently mutable map with the same items in the same
    /// order.
    pub fn copy(&self) -> Self
    where
        V: Clone,
        S: Clone,
    {
        let mut out = Self::with_capacity_and_hasher(self.len(), self.hasher.clone());
        for (k, v) in self.iter() {
            out.set(k.clone(), v.clone());
        }
        out
    }

    /// Order-independent structural equality against any mapping.
    pub fn equals<M>(&self, other: &M) -> bool
    where
        M: Mapping<K, V> + ?Sized,
        V: PartialEq,
    {
        mapping_eq(self, other)
    }
}

/// Iterator over `(&K, &V)` in insertion order.
pub struct Iter<'a, K, V, S> {
    map: &'a AnyKeyMap<K, V, S>,
    order: core::slice::Iter<'a, K>,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let k = self.order.next()?;
            if let Some(v) = self.map.get(k) {
                return Some((k, v));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len()))
    }
}

/// Owning iterator over `(K, V)` in insertion order.
pub struct IntoIter<K, V, S> {
    map: AnyKeyMap<K, V, S>,
    order: std::vec::IntoIter<K>,
}

impl<K, V, S> Iterator for IntoIter<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let k = self.order.next()?;
            if let Some(entry) = self.map.take_from_partitions(&k) {
                return Some(entry);
            }
        }
    }
}

impl<K, V, S> IntoIterator for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, S>;

    fn into_iter(mut self) -> Self::IntoIter {
        let order = core::mem::replace(&mut self.ledger, OrderLedger::new())
            .into_keys()
            .into_iter();
        IntoIter { map: self, order }
    }
}

impl<'a, K, V, S> IntoIterator for &'a AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Default for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Clone for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<K, V, S> fmt::Debug for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, M> PartialEq<M> for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    V: PartialEq,
    S: BuildHasher,
    M: Mapping<K, V>,
{
    fn eq(&self, other: &M) -> bool {
        self.equals(other)
    }
}

impl<K, V, S> core::ops::Index<&K> for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present. Use [`AnyKeyMap::try_get`] for a
    /// fallible read.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found in AnyKeyMap")
    }
}

impl<K, V, S> FromIterator<(K, V)> for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}

impl<K, V, S> Extend<(K, V)> for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for AnyKeyMap<K, V>
where
    K: AnyKey + Clone,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for AnyKeyMap<K, V>
where
    K: AnyKey + Clone,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, S> Lengthable for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        AnyKeyMap::len(self)
    }
}

impl<K, V, S> CursorParent for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn map_id(&self) -> MapId {
        self.id
    }
}

impl<K, V, S> Containable<K> for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }
}

impl<K, V, S> Indexable<K, V> for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}

impl<K, V, S> Mapping<K, V> for AnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn key_list(&self) -> Vec<&K> {
        self.ledger.iter().collect()
    }
}
