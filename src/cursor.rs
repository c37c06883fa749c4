//! Detached cursors with a length-based staleness check.
//!
//! A borrowing iterator cannot observe a mutation of its parent, so the
//! mutation-detection contract lives here: a cursor owns a snapshot taken
//! when it was created, together with the parent's length at that moment,
//! and is advanced by handing it the parent again.
//!
//! The staleness check compares lengths only. A mutation that leaves the
//! length unchanged (delete one key, add another) goes unnoticed and the
//! cursor keeps yielding its original snapshot.
//!
//! A cursor also records which map it was made from and refuses to be
//! advanced against any other, even one with the same length.

use crate::error::AnyKeyError;
use crate::mapping::Lengthable;
use core::sync::atomic::{AtomicU64, Ordering};

/// Identity of one map instance. Copies and clones get a fresh one;
/// freezing or wrapping a map keeps its identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MapId(u64);

impl MapId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        MapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A map that cursors can be checked against.
pub trait CursorParent: Lengthable {
    fn map_id(&self) -> MapId;
}

#[derive(Clone, Debug)]
pub struct Cursor<T> {
    origin: MapId,
    expected_len: usize,
    items: std::vec::IntoIter<T>,
}

pub type KeyCursor<K> = Cursor<K>;
pub type ValueCursor<V> = Cursor<V>;
pub type ItemCursor<K, V> = Cursor<(K, V)>;

impl<T> Cursor<T> {
    pub(crate) fn new(origin: MapId, items: Vec<T>) -> Self {
        Self {
            origin,
            expected_len: items.len(),
            items: items.into_iter(),
        }
    }

    /// Yield the next snapshot element, or `Ok(None)` once exhausted.
    ///
    /// Fails without advancing: with `WrongMap` if `parent` is not the map
    /// this cursor was made from, and with `IterationInvalidated` if its
    /// length differs from the length captured at creation.
    pub fn next<P>(&mut self, parent: &P) -> Result<Option<T>, AnyKeyError>
    where
        P: CursorParent + ?Sized,
    {
        if parent.map_id() != self.origin {
            log::debug!("cursor from {:?} advanced against {:?}", self.origin, parent.map_id());
            return Err(AnyKeyError::WrongMap);
        }
        let now = parent.len();
        if now != self.expected_len {
            log::debug!(
                "cursor invalidated: parent length {} -> {}",
                self.expected_len,
                now
            );
            return Err(AnyKeyError::IterationInvalidated);
        }
        Ok(self.items.next())
    }

    /// Drain the rest of the snapshot, checking `parent` before each step.
    pub fn collect_remaining<P>(&mut self, parent: &P) -> Result<Vec<T>, AnyKeyError>
    where
        P: CursorParent + ?Sized,
    {
        let mut out = Vec::with_capacity(self.remaining());
        while let Some(item) = self.next(parent)? {
            out.push(item);
        }
        Ok(out)
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}
