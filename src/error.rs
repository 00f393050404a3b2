//! Error type shared by the fallible `OpenTable` operations

use thiserror::Error;

/// Failures reported by [`OpenTable`](crate::OpenTable).
///
/// Plain lookups (`get`, `contains_key`) and removals never fail; they report
/// absence through `Option`/`bool`/counts instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// `at`/`at_mut` found no occupied slot holding the key
    #[error("key was not found in the table")]
    KeyNotFound,
    /// `rehash` was asked for a capacity the table cannot use
    #[error(
        "invalid capacity {requested}: expected a power of two no smaller than {minimum}"
    )]
    InvalidCapacity {
        /// The capacity passed by the caller
        requested: usize,
        /// The smallest capacity that can hold the current entries
        minimum: usize,
    },
}
