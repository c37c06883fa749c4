//! DefaultAnyKeyMap: an AnyKeyMap that fills missing keys from a factory.

use crate::cursor::{CursorParent, ItemCursor, KeyCursor, MapId, ValueCursor};
use crate::error::AnyKeyError;
use crate::key::AnyKey;
use crate::map::{AnyKeyMap, Iter};
use crate::mapping::{mapping_eq, Containable, Indexable, Lengthable, Mapping, Source};
use crate::views::{Items, Keys, Values};
use core::cell::RefCell;
use core::fmt;
use core::hash::BuildHasher;
use std::collections::hash_map::RandomState;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

type Factory<V> = Rc<RefCell<dyn FnMut() -> V>>;

pub struct DefaultAnyKeyMap<K, V, S = RandomState> {
    inner: AnyKeyMap<K, V, S>,
    factory: Option<Factory<V>>,
}

impl<K, V, S> DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    /// Build from an optional factory and optional initial data.
    ///
    /// A supplied factory is called once up front and its result thrown
    /// away; if that call panics the map is not built and
    /// `InvalidFactory` is returned.
    pub fn new<F>(factory: Option<F>, data: Option<Source<'_, K, V>>) -> Result<Self, AnyKeyError>
    where
        F: FnMut() -> V + 'static,
        S: Default,
        V: Clone,
    {
        let factory = match factory {
            None => None,
            Some(mut f) => {
                if panic::catch_unwind(AssertUnwindSafe(|| drop(f()))).is_err() {
                    log::debug!("default factory panicked on its trial call");
                    return Err(AnyKeyError::InvalidFactory);
                }
                let f: Factory<V> = Rc::new(RefCell::new(f));
                Some(f)
            }
        };
        Ok(Self {
            inner: AnyKeyMap::from_source(data),
            factory,
        })
    }

    /// A map with no factory: missing keys stay missing.
    pub fn without_factory(data: Option<Source<'_, K, V>>) -> Self
    where
        S: Default,
        V: Clone,
    {
        Self {
            inner: AnyKeyMap::from_source(data),
            factory: None,
        }
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Subscript-style read that creates missing entries.
    ///
    /// Present keys return their value. An absent key is filled with a
    /// fresh factory value, which is stored and returned; without a factory
    /// it is `MissingKey`.
    pub fn get_or_create(&mut self, key: K) -> Result<&mut V, AnyKeyError> {
        match &self.factory {
            None => self.inner.get_mut(&key).ok_or(AnyKeyError::MissingKey),
            Some(factory) => {
                let factory = Rc::clone(factory);
                Ok(self
                    .inner
                    .get_or_insert_with(key, || (&mut *factory.borrow_mut())()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.inner.set(key, value)
    }

    /// Plain read; never consults the factory.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(key)
    }

    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.inner.get_or(key, default)
    }

    /// Plain subscript read: a missing key is `MissingKey`, even with a
    /// factory. Use [`DefaultAnyKeyMap::get_or_create`] to fill it.
    pub fn try_get(&self, key: &K) -> Result<&V, AnyKeyError> {
        self.inner.try_get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    pub fn delete(&mut self, key: &K) -> Result<(), AnyKeyError> {
        self.inner.delete(key)
    }

    pub fn setdefault(&mut self, key: K, default: V) -> &mut V {
        self.inner.setdefault(key, default)
    }

    pub fn pop(&mut self, key: &K) -> Result<V, AnyKeyError> {
        self.inner.pop(key)
    }

    pub fn pop_or(&mut self, key: &K, default: V) -> V {
        self.inner.pop_or(key, default)
    }

    pub fn popitem(&mut self) -> Result<(K, V), AnyKeyError> {
        self.inner.popitem()
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn update(&mut self, source: Option<Source<'_, K, V>>)
    where
        V: Clone,
    {
        self.inner.update(source)
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

    /// Clone the entries; the copy shares this map's factory.
    pub fn copy(&self) -> Self
    where
        V: Clone,
        S: Clone,
    {
        Self {
            inner: self.inner.copy(),
            factory: self.factory.clone(),
        }
    }

    pub fn equals<M>(&self, other: &M) -> bool
    where
        M: Mapping<K, V> + ?Sized,
        V: PartialEq,
    {
        mapping_eq(self, other)
    }
}

impl<K, V, S> Clone for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<K, V, S> fmt::Debug for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factory = if self.has_factory() { "<factory>" } else { "None" };
        write!(f, "DefaultAnyKeyMap({}, ", factory)?;
        f.debug_list().entries(self.iter()).finish()?;
        f.write_str(")")
    }
}

impl<K, V, S, M> PartialEq<M> for DefaultAnyKeyMap<K, V, S>
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

impl<K, V, S> core::ops::Index<&K> for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present. Indexing never runs the factory.
    fn index(&self, key: &K) -> &V {
        &self.inner[key]
    }
}

/// Collected maps carry no factory.
impl<K, V, S> FromIterator<(K, V)> for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<AnyKeyMap<K, V, S>>())
    }
}

impl<K, V, S> Extend<(K, V)> for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.extend(iter)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for DefaultAnyKeyMap<K, V>
where
    K: AnyKey + Clone,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for DefaultAnyKeyMap<K, V>
where
    K: AnyKey + Clone,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, S> From<AnyKeyMap<K, V, S>> for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn from(inner: AnyKeyMap<K, V, S>) -> Self {
        Self {
            inner,
            factory: None,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a DefaultAnyKeyMap<K, V, S>
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

impl<K, V, S> Lengthable for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, S> CursorParent for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn map_id(&self) -> MapId {
        self.inner.map_id()
    }
}

impl<K, V, S> Containable<K> for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains(key)
    }
}

impl<K, V, S> Indexable<K, V> for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn lookup(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }
}

impl<K, V, S> Mapping<K, V> for DefaultAnyKeyMap<K, V, S>
where
    K: AnyKey + Clone,
    S: BuildHasher,
{
    fn key_list(&self) -> Vec<&K> {
        self.inner.key_list()
    }
}
