//! anykey-map: an insertion-ordered map whose keys need not be hashable.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: accept any key that supports equality, hash the ones that can be
//!   hashed, and still present a single map with one global order.
//! - Layers:
//!   - HashPartition<K, V>: slot storage indexed by a hash table of slot
//!     keys; each entry keeps the hash it was inserted with.
//!   - LinearPartition<K, V>: parallel key/value vectors searched by
//!     equality, for keys without a hash.
//!   - OrderLedger<K>: the global insertion order across both partitions.
//!   - AnyKeyMap<K, V, S>: public API; routes each key by
//!     `AnyKey::is_hashable` and keeps the ledger in step.
//!   - FrozenAnyKeyMap and DefaultAnyKeyMap: composed around an
//!     `AnyKeyMap`, not layered on it by inheritance.
//!
//! Constraints
//! - Single-threaded; no internal locking.
//! - Hashability is decided per value, once per operation. A key's
//!   hashability must not change while it is stored.
//! - Keys are `Clone`: the ledger holds its own copy of every key.
//! - Unhashable keys cost O(n) per lookup; membership and removal scan the
//!   ledger and are O(n) as well.
//!
//! Iteration
//! - `iter`, `keys`, `values` and `items` borrow the map, so the compiler
//!   rules out mutation while they are alive.
//! - Cursors (`key_cursor` and friends) are detached snapshots advanced by
//!   passing the map back in. They fail with `IterationInvalidated` when
//!   the map's length has changed since they were made. Changes that keep
//!   the length are not detected. Each map carries a `MapId`; a cursor
//!   handed a different map fails with `WrongMap`.
//!
//! Errors
//! - One enum, [`AnyKeyError`]. Only `Index` panics, like std maps.
//!
//! Logging
//! - Routing decisions go to the `log` facade at `trace`; cursor
//!   invalidation and rejected frozen mutations at `debug`. The crate never
//!   installs a logger.

mod cursor;
mod default_map;
mod error;
mod frozen;
mod hash_partition;
mod key;
mod ledger;
mod linear_partition;
mod map;
mod map_proptest;
mod mapping;
mod value;
mod views;

// Public surface
pub use cursor::{Cursor, CursorParent, ItemCursor, KeyCursor, MapId, ValueCursor};
pub use default_map::DefaultAnyKeyMap;
pub use error::AnyKeyError;
pub use frozen::FrozenAnyKeyMap;
pub use key::AnyKey;
pub use map::{AnyKeyMap, IntoIter, Iter};
pub use mapping::{mapping_eq, Containable, Indexable, Lengthable, Mapping, Source};
pub use value::Value;
pub use views::{Items, Keys, Values};
