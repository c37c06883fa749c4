//! Read-only views over a map's keys, values and items.
//!
//! Each view is built from the parent's ledger order at the moment it is
//! requested and holds borrows into the parent, so it can neither outlive
//! the parent nor see it change. Ask the parent again for a fresh view.

use crate::cursor::{ItemCursor, KeyCursor, MapId, ValueCursor};
use core::fmt;

pub struct Keys<'a, K> {
    origin: MapId,
    keys: Vec<&'a K>,
}

impl<'a, K> Keys<'a, K> {
    pub(crate) fn new(origin: MapId, keys: Vec<&'a K>) -> Self {
        Self { origin, keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.keys.iter().any(|k| *k == key)
    }

    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, &'a K>> {
        self.keys.iter().copied()
    }

    /// A detached cursor over clones of these keys.
    pub fn cursor(&self) -> KeyCursor<K>
    where
        K: Clone,
    {
        KeyCursor::new(self.origin, self.iter().cloned().collect())
    }
}

impl<'a, K> IntoIterator for Keys<'a, K> {
    type Item = &'a K;
    type IntoIter = std::vec::IntoIter<&'a K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'a, 'b, K> IntoIterator for &'b Keys<'a, K> {
    type Item = &'a K;
    type IntoIter = core::iter::Copied<core::slice::Iter<'b, &'a K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: PartialEq> PartialEq<[K]> for Keys<'a, K> {
    fn eq(&self, other: &[K]) -> bool {
        self.keys.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<'a, K: PartialEq, const N: usize> PartialEq<[K; N]> for Keys<'a, K> {
    fn eq(&self, other: &[K; N]) -> bool {
        *self == other[..]
    }
}

impl<'a, K: PartialEq> PartialEq<Vec<K>> for Keys<'a, K> {
    fn eq(&self, other: &Vec<K>) -> bool {
        *self == other[..]
    }
}

impl<'a, K: fmt::Debug> fmt::Debug for Keys<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Keys").field(&self.keys).finish()
    }
}

pub struct Values<'a, V> {
    origin: MapId,
    values: Vec<&'a V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(origin: MapId, values: Vec<&'a V>) -> Self {
        Self { origin, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values.iter().any(|v| *v == value)
    }

    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, &'a V>> {
        self.values.iter().copied()
    }

    pub fn cursor(&self) -> ValueCursor<V>
    where
        V: Clone,
    {
        ValueCursor::new(self.origin, self.iter().cloned().collect())
    }
}

impl<'a, V> IntoIterator for Values<'a, V> {
    type Item = &'a V;
    type IntoIter = std::vec::IntoIter<&'a V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, 'b, V> IntoIterator for &'b Values<'a, V> {
    type Item = &'a V;
    type IntoIter = core::iter::Copied<core::slice::Iter<'b, &'a V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V: PartialEq> PartialEq<[V]> for Values<'a, V> {
    fn eq(&self, other: &[V]) -> bool {
        self.values.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<'a, V: PartialEq, const N: usize> PartialEq<[V; N]> for Values<'a, V> {
    fn eq(&self, other: &[V; N]) -> bool {
        *self == other[..]
    }
}

impl<'a, V: PartialEq> PartialEq<Vec<V>> for Values<'a, V> {
    fn eq(&self, other: &Vec<V>) -> bool {
        *self == other[..]
    }
}

impl<'a, V: fmt::Debug> fmt::Debug for Values<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Values").field(&self.values).finish()
    }
}

pub struct Items<'a, K, V> {
    origin: MapId,
    items: Vec<(&'a K, &'a V)>,
}

impl<'a, K, V> Items<'a, K, V> {
    pub(crate) fn new(origin: MapId, items: Vec<(&'a K, &'a V)>) -> Self {
        Self { origin, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the pair `(key, value)` is among the items.
    pub fn contains(&self, key: &K, value: &V) -> bool
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.items.iter().any(|(k, v)| *k == key && *v == value)
    }

    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, (&'a K, &'a V)>> {
        self.items.iter().copied()
    }

    pub fn cursor(&self) -> ItemCursor<K, V>
    where
        K: Clone,
        V: Clone,
    {
        ItemCursor::new(
            self.origin,
            self.iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl<'a, K, V> IntoIterator for Items<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::vec::IntoIter<(&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, 'b, K, V> IntoIterator for &'b Items<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = core::iter::Copied<core::slice::Iter<'b, (&'a K, &'a V)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: PartialEq, V: PartialEq> PartialEq<[(K, V)]> for Items<'a, K, V> {
    fn eq(&self, other: &[(K, V)]) -> bool {
        self.items.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|((k, v), (ok, ov))| k == ok && v == ov)
    }
}

impl<'a, K: PartialEq, V: PartialEq, const N: usize> PartialEq<[(K, V); N]> for Items<'a, K, V> {
    fn eq(&self, other: &[(K, V); N]) -> bool {
        *self == other[..]
    }
}

impl<'a, K: PartialEq, V: PartialEq> PartialEq<Vec<(K, V)>> for Items<'a, K, V> {
    fn eq(&self, other: &Vec<(K, V)>) -> bool {
        *self == other[..]
    }
}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for Items<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Items").field(&self.items).finish()
    }
}
