//! HashPartition: hash-indexed storage for keys that have a hash.
//!
//! Entries live in a `SlotMap` and a `HashTable` of slot keys indexes them
//! by hash. Each entry stores the hash it was inserted with, so growing the
//! table never calls back into `K`. The hash itself is computed by the
//! owning map (which holds the `BuildHasher`) and passed in, so a key is
//! hashed once per operation.

use crate::key::AnyKey;
use hashbrown::hash_table::Entry as TableEntry;
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

pub(crate) struct HashPartition<K, V> {
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Entry<K, V>>, // storage using generational keys
}

impl<K, V> HashPartition<K, V>
where
    K: AnyKey,
{
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            index: HashTable::with_capacity(n),
            slots: SlotMap::with_capacity_and_key(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    fn find(&self, hash: u64, key: &K) -> Option<DefaultKey> {
        self.index
            .find(hash, |&k| {
                self.slots
                    .get(k)
                    .map(|e| e.hash == hash && &e.key == key)
                    .unwrap_or(false)
            })
            .copied()
    }

    pub(crate) fn get(&self, hash: u64, key: &K) -> Option<&V> {
        let k = self.find(hash, key)?;
        self.slots.get(k).map(|e| &e.value)
    }

    pub(crate) fn get_mut(&mut self, hash: u64, key: &K) -> Option<&mut V> {
        let k = self.find(hash, key)?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    /// Insert or replace. On replace the stored key is kept and the old
    /// value is returned.
    pub(crate) fn insert(&mut self, hash: u64, key: K, value: V) -> Option<V> {
        match self.index.entry(
            hash,
            |&kk| {
                self.slots
                    .get(kk)
                    .map(|e| e.hash == hash && e.key == key)
                    .unwrap_or(false)
            },
            |&kk| self.slots.get(kk).map(|e| e.hash).unwrap_or(0),
        ) {
            TableEntry::Occupied(o) => {
                let k = *o.get();
                self.slots
                    .get_mut(k)
                    .map(|e| core::mem::replace(&mut e.value, value))
            }
            TableEntry::Vacant(v) => {
                let k = self.slots.insert(Entry { key, value, hash });
                let _ = v.insert(k);
                None
            }
        }
    }

    /// Return the stored value, inserting `make()` first if the key is absent.
    pub(crate) fn get_or_insert_with<F>(&mut self, hash: u64, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let k = match self.index.entry(
            hash,
            |&kk| {
                self.slots
                    .get(kk)
                    .map(|e| e.hash == hash && e.key == key)
                    .unwrap_or(false)
            },
            |&kk| self.slots.get(kk).map(|e| e.hash).unwrap_or(0),
        ) {
            TableEntry::Occupied(o) => *o.get(),
            TableEntry::Vacant(v) => {
                let value = make();
                let k = self.slots.insert(Entry { key, value, hash });
                let _ = v.insert(k);
                k
            }
        };
        &mut self.slots[k].value
    }

    pub(crate) fn remove(&mut self, hash: u64, key: &K) -> Option<(K, V)> {
        // Unlink from the index first, then take the slot.
        let (k, _) = self
            .index
            .find_entry(hash, |&kk| {
                self.slots
                    .get(kk)
                    .map(|e| e.hash == hash && &e.key == key)
                    .unwrap_or(false)
            })
            .ok()?
            .remove();
        self.slots.remove(k).map(|e| (e.key, e.value))
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
    }
}
