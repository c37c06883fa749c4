//! FrozenAnyKeyMap: a read-only AnyKeyMap with a structural hash.
//!
//! The data is fixed at construction. The mutation entry points still
//! exist so callers written against the mutable surface keep compiling,
//! but every one of them fails with `Immutable` and leaves the map as it
//! was.

use crate::cursor::{CursorParent, ItemCursor, KeyCursor, MapId, ValueCursor};
use crate::error::AnyKeyError;
use crate::key::AnyKey;
use crate::map::{AnyKeyMap, Iter};
use crate::mapping::{mapping_eq, Containable, Indexable, Lengthable, Mapping, Source};
use crate::views::{Items, Keys, Values};
use core::fmt;
use core::hash::{BuildHasher, Hasher};
use std::collections::hash_map::{DefaultHasher, RandomState};

pub struct FrozenAnyKeyMap<K, V, S = RandomState> {
    inner: AnyKeyMap<K, V, S>,
}

fn rejected<T>(op: &'static str) -> Result<T, AnyKeyError> {
    log::debug!("rejected `{}` on a frozen map", op);
    Err(AnyKeyError::Immutable { op })
}

impl<K, V, S> FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    /// Build from an optional source. `None` yields an empty frozen map.
    pub fn new(source: Option<Source<'_, K, V>>) -> Self
    where
        S: Default,
        V: Clone,
    {
        Self {
            inner: AnyKeyMap::from_source(source),
        }
    }

    /// Freeze an existing map, taking ownership of its entries.
    pub fn from_map(inner: AnyKeyMap<K, V, S>) -> Self {
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.inner.get_or(key, default)
    }

    pub fn try_get(&self, key: &K) -> Result<&V, AnyKeyError> {
        self.inner.try_get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    pub fn iter(&self) -> Iter<'_, K, V, S> {
        self.inner.iter()
    }

    pub fn keys(&self) -> Keys<'_, K> {
        self.inner.keys()
    }

    pub fn values(&self) -> Values<'_, V> {
        self.inner.values()
    }

    pub fn items(&self) -> Items<'_, K, V> {
        self.inner.items()
    }

    pub fn key_cursor(&self) -> KeyCursor<K> {
        self.inner.key_cursor()
    }

    pub fn value_cursor(&self) -> ValueCursor<V>
    where
        V: Clone,
    {
        self.inner.value_cursor()
    }

    pub fn item_cursor(&self) -> ItemCursor<K, V>
    where
        V: Clone,
    {
        self.inner.item_cursor()
    }

    pub fn copy(&self) -> Self
    where
        V: Clone,
        S: Clone,
    {
        Self {
            inner: self.inner.copy(),
        }
    }

    /// A mutable copy of the contents.
    pub fn thaw(&self) -> AnyKeyMap<K, V, S>
    where
        V: Clone,
        S: Clone,
    {
        self.inner.copy()
    }

    pub fn equals<M>(&self, other: &M) -> bool
    where
        M: Mapping<K, V> + ?Sized,
        V: PartialEq,
    {
        mapping_eq(self, other)
    }

    pub fn set(&mut self, _key: K, _value: V) -> Result<Option<V>, AnyKeyError> {
        rejected("set")
    }

    pub fn delete(&mut self, _key: &K) -> Result<(), AnyKeyError> {
        rejected("delete")
    }

    pub fn clear(&mut self) -> Result<(), AnyKeyError> {
        rejected("clear")
    }

    pub fn setdefault(&mut self, _key: K, _default: V) -> Result<&mut V, AnyKeyError> {
        rejected("setdefault")
    }

    pub fn pop(&mut self, _key: &K) -> Result<V, AnyKeyError> {
        rejected("pop")
    }

    pub fn popitem(&mut self) -> Result<(K, V), AnyKeyError> {
        rejected("popitem")
    }

    pub fn update(&mut self, _source: Option<Source<'_, K, V>>) -> Result<(), AnyKeyError> {
        rejected("update")
    }

    /// Sum of per-item hashes, or `None` if any key or value has no hash.
    fn item_hash_sum(&self) -> Option<u64>
    where
        V: AnyKey,
    {
        let mut sum = 0u64;
        for (k, v) in self.iter() {
            if !k.is_hashable() || !v.is_hashable() {
                return None;
            }
            let mut h = DefaultHasher::new();
            k.hash_key(&mut h);
            v.hash_key(&mut h);
            sum = sum.wrapping_add(h.finish());
        }
        Some(sum)
    }

    /// Structural hash of the contents, independent of insertion order.
    ///
    /// Deterministic across instances: two frozen maps with the same items
    /// hash alike whatever order they were built in.
    pub fn hash(&self) -> Result<u64, AnyKeyError>
    where
        V: AnyKey,
    {
        let sum = self
            .item_hash_sum()
            .ok_or(AnyKeyError::UnhashableInFrozenHash)?;
        let mut h = DefaultHasher::new();
        h.write_usize(self.len());
        h.write_u64(sum);
        Ok(h.finish())
    }
}

impl<K, V, S> AnyKey for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    V: AnyKey,
    S: BuildHasher,
{
    fn is_hashable(&self) -> bool {
        self.item_hash_sum().is_some()
    }

    fn hash_key<H: Hasher>(&self, state: &mut H) {
        if let Ok(h) = self.hash() {
            state.write_u64(h);
        }
    }
}

impl<K, V, S> Clone for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<K, V, S> fmt::Debug for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FrozenAnyKeyMap(")?;
        f.debug_list().entries(self.iter()).finish()?;
        f.write_str(")")
    }
}

impl<K, V, S, M> PartialEq<M> for FrozenAnyKeyMap<K, V, S>
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

impl<K, V, S> core::ops::Index<&K> for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        &self.inner[key]
    }
}

impl<K, V, S> FromIterator<(K, V)> for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FrozenAnyKeyMap<K, V>
where
    K: AnyKey + Clone,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, S> From<AnyKeyMap<K, V, S>> for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn from(inner: AnyKeyMap<K, V, S>) -> Self {
        Self::from_map(inner)
    }
}

impl<'a, K, V, S> IntoIterator for &'a FrozenAnyKeyMap<K, V, S>
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

impl<K, V, S> Lengthable for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, S> CursorParent for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn map_id(&self) -> MapId {
        self.inner.map_id()
    }
}

impl<K, V, S> Containable<K> for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains(key)
    }
}

impl<K, V, S> Indexable<K, V> for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn lookup(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }
}

impl<K, V, S> Mapping<K, V> for FrozenAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn key_list(&self) -> Vec<&K> {
        self.inner.key_list()
    }
}
