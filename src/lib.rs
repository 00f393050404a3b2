//! # Probe Table
//!
//! An open addressing hash table with pluggable hash functions and probing
//! policies.
//!
//! Entries are stored directly in a power-of-two array of tri-state slots
//! (empty, occupied, deleted). The table grows by doubling once the occupied
//! share would pass 0.7, and rebuilds itself in place once tombstones pass
//! 0.3 of the slots. Every table counts the collisions it meets while
//! inserting and rehashing, see [`ProbeStats`].
//!
//! ## Basic Usage
//!
//! ```rust
//! use probe_table::OpenTable;
//!
//! let mut table = OpenTable::new();
//!
//! table.insert("apple".to_string(), 1);
//! table.insert("banana".to_string(), 2);
//! assert_eq!(table.get("apple"), Some(&1));
//!
//! // inserting an existing key replaces its value
//! assert_eq!(table.insert("apple".to_string(), 10), Some(1));
//! assert_eq!(table.len(), 2);
//!
//! table.remove("apple");
//! assert_eq!(table.get("apple"), None);
//! assert_eq!(table.tombstones(), 1);
//! ```
//!
//! ## Choosing a policy
//!
//! ```rust
//! use probe_table::{DefaultHash, OpenTable, Quadratic};
//!
//! let mut table: OpenTable<i32, i32, DefaultHash, Quadratic> = OpenTable::default();
//! for key in (0..150).step_by(2) {
//!     table.insert(key, key * 100);
//! }
//! assert_eq!(table.len(), 75);
//! assert_eq!(table.capacity(), 128);
//! println!("{:?}", table.stats());
//! ```
//!
//! ## Custom keys
//!
//! A key type needs `PartialEq` and a [`HashFunction`] that returns equal
//! hashes for equal keys.
//!
//! ```rust
//! use probe_table::{DefaultHash, HashFunction, OpenTable};
//!
//! #[derive(PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! #[derive(Default)]
//! struct PointHash;
//!
//! impl HashFunction<Point> for PointHash {
//!     fn hash(&self, point: &Point) -> u64 {
//!         DefaultHash.hash(&point.x) ^ DefaultHash.hash(&point.y).rotate_left(1)
//!     }
//! }
//!
//! let mut table: OpenTable<Point, &str, PointHash> = OpenTable::default();
//! table.insert(Point { x: 1, y: 2 }, "A");
//! assert!(table.contains_key(&Point { x: 1, y: 2 }));
//! ```

/// Errors returned by table operations
mod error;
/// Hash functions and the hash function trait
mod hash;
/// Iterators over table entries
mod iter;
/// Probing policies
mod probe;
/// Backing array slots
mod slot;
/// The table itself
mod table;
/// Capacity and load factor helpers
mod utils;

pub use error::TableError;
pub use hash::{BuildHasherHash, DefaultHash, HashFunction, Murmur64};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use probe::{DoubleHashing, Linear, ProbingPolicy, Quadratic};
pub use slot::{Slot, SlotState};
pub use table::{OpenTable, ProbeStats};
pub use utils::{
    DELETE_FACTOR, LOAD_FACTOR, MIN_CAPACITY, is_valid_capacity, min_capacity_for,
    normalize_capacity,
};
