//! LinearPartition: storage for keys without a hash.
//!
//! Two parallel vectors; index `i` of `keys` owns index `i` of `values`.
//! Every lookup is an O(n) equality scan.

#[derive(Clone, Debug)]
pub(crate) struct LinearPartition<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
}

impl<K: PartialEq, V> LinearPartition<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|i| &self.values[i])
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.position(key)?;
        Some(&mut self.values[i])
    }

    /// Append, or replace the value in place if an equal key is stored.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(i) => Some(core::mem::replace(&mut self.values[i], value)),
            None => {
                self.keys.push(key);
                self.values.push(value);
                None
            }
        }
    }

    pub(crate) fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let i = match self.position(&key) {
            Some(i) => i,
            None => {
                self.keys.push(key);
                self.values.push(make());
                self.values.len() - 1
            }
        };
        &mut self.values[i]
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let i = self.position(key)?;
        Some((self.keys.remove(i), self.values.remove(i)))
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }
}
