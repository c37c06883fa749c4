//! Capability traits for mapping-like types.
//!
//! Equality and `update` accept anything that can report its length,
//! answer membership and hand out values by key. The three capabilities are
//! separate traits; `Mapping` bundles them and adds an ordered key list so a
//! source can be walked. All map variants in this crate implement them, as
//! do `std::collections::HashMap` and `BTreeMap`.

use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};

pub trait Lengthable {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait Containable<K: ?Sized> {
    fn contains_key(&self, key: &K) -> bool;
}

pub trait Indexable<K: ?Sized, V> {
    fn lookup(&self, key: &K) -> Option<&V>;
}

/// A keyed source: length, membership, lookup and a walkable key list.
pub trait Mapping<K, V>: Lengthable + Containable<K> + Indexable<K, V> {
    fn key_list(&self) -> Vec<&K>;
}

/// Order-independent structural equality over the capability traits.
///
/// Equal iff both have the same length and every key of `a` is present in
/// `b` with an equal value.
pub fn mapping_eq<K, V, A, B>(a: &A, b: &B) -> bool
where
    A: Mapping<K, V> + ?Sized,
    B: Mapping<K, V> + ?Sized,
    V: PartialEq,
{
    if a.len() != b.len() {
        return false;
    }
    a.key_list()
        .into_iter()
        .all(|k| b.contains_key(k) && a.lookup(k) == b.lookup(k))
}

/// Input accepted by constructors and `update`: either a stream of pairs
/// or a mapping walked through its key list.
pub enum Source<'a, K, V> {
    Pairs(Box<dyn Iterator<Item = (K, V)> + 'a>),
    Mapping(&'a dyn Mapping<K, V>),
}

impl<'a, K, V> Source<'a, K, V> {
    pub fn pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'a,
    {
        Source::Pairs(Box::new(pairs.into_iter()))
    }

    pub fn mapping<M: Mapping<K, V>>(m: &'a M) -> Self {
        Source::Mapping(m)
    }
}

impl<'a, K: 'a, V: 'a> From<Vec<(K, V)>> for Source<'a, K, V> {
    fn from(v: Vec<(K, V)>) -> Self {
        Source::pairs(v)
    }
}

impl<'a, K: 'a, V: 'a, const N: usize> From<[(K, V); N]> for Source<'a, K, V> {
    fn from(v: [(K, V); N]) -> Self {
        Source::pairs(v)
    }
}

impl<K, V, S> Lengthable for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Containable<K> for HashMap<K, V, S> {
    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Indexable<K, V> for HashMap<K, V, S> {
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Mapping<K, V> for HashMap<K, V, S> {
    fn key_list(&self) -> Vec<&K> {
        self.keys().collect()
    }
}

impl<K, V> Lengthable for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<K: Ord, V> Containable<K> for BTreeMap<K, V> {
    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }
}

impl<K: Ord, V> Indexable<K, V> for BTreeMap<K, V> {
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}

impl<K: Ord, V> Mapping<K, V> for BTreeMap<K, V> {
    fn key_list(&self) -> Vec<&K> {
        self.keys().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: equality ignores order and compares values per key.
    #[test]
    fn std_maps_compare_structurally() {
        let a: HashMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
        let b: BTreeMap<i32, &str> = [(2, "two"), (1, "one")].into_iter().collect();
        assert!(mapping_eq(&a, &b));

        let c: BTreeMap<i32, &str> = [(1, "one"), (2, "TWO")].into_iter().collect();
        assert!(!mapping_eq(&a, &c));

        let d: BTreeMap<i32, &str> = [(1, "one")].into_iter().collect();
        assert!(!mapping_eq(&a, &d));
    }

    /// Invariant: a pair source yields its pairs in order.
    #[test]
    fn pair_source_preserves_order() {
        match Source::from(vec![(3, 'c'), (1, 'a')]) {
            Source::Pairs(it) => assert_eq!(it.collect::<Vec<_>>(), vec![(3, 'c'), (1, 'a')]),
            Source::Mapping(_) => panic!("expected pairs"),
        }
    }
}
