//! Capacity and occupancy-ratio helpers for `OpenTable`

/// Maximum share of occupied slots after an insert, as `LOAD_FACTOR.0 / LOAD_FACTOR.1`
pub const LOAD_FACTOR: (usize, usize) = (7, 10);

/// Maximum share of tombstones after an erase, as `DELETE_FACTOR.0 / DELETE_FACTOR.1`
pub const DELETE_FACTOR: (usize, usize) = (3, 10);

/// Smallest capacity a table ever uses
pub const MIN_CAPACITY: usize = 4;

/// Returns true if `count / capacity` is strictly greater than `ratio`.
///
/// Compares with integer cross-multiplication so no float rounding can
/// shift a threshold.
#[must_use]
pub(crate) fn exceeds(count: usize, capacity: usize, ratio: (usize, usize)) -> bool {
    count.saturating_mul(ratio.1) > capacity.saturating_mul(ratio.0)
}

/// Returns true if `capacity` is a usable slot count: a power of two, at least
/// [`MIN_CAPACITY`].
#[must_use]
pub fn is_valid_capacity(capacity: usize) -> bool {
    capacity >= MIN_CAPACITY && capacity.is_power_of_two()
}

/// Rounds a requested capacity up to a valid one.
#[must_use]
pub fn normalize_capacity(capacity: usize) -> usize {
    capacity.max(MIN_CAPACITY).checked_next_power_of_two().unwrap_or(!(usize::MAX >> 1))
}

/// Smallest valid capacity that keeps `len` entries within the load factor.
#[must_use]
pub fn min_capacity_for(len: usize) -> usize {
    let mut capacity = MIN_CAPACITY;
    while exceeds(len, capacity, LOAD_FACTOR) {
        match capacity.checked_mul(2) {
            Some(doubled) => capacity = doubled,
            None => break,
        }
    }
    capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeds() {
        // 3 of 4 is 0.75
        assert!(exceeds(3, 4, LOAD_FACTOR));
        // 2 of 4 is 0.5
        assert!(!exceeds(2, 4, LOAD_FACTOR));
        // exactly on the threshold does not exceed it
        assert!(!exceeds(7, 10, LOAD_FACTOR));
        assert!(exceeds(10, 32, DELETE_FACTOR));
        assert!(!exceeds(9, 32, DELETE_FACTOR));
    }

    #[test]
    fn test_is_valid_capacity() {
        assert!(is_valid_capacity(4));
        assert!(is_valid_capacity(1024));
        assert!(!is_valid_capacity(2));
        assert!(!is_valid_capacity(0));
        assert!(!is_valid_capacity(12));
    }

    #[test]
    fn test_normalize_capacity() {
        assert_eq!(normalize_capacity(0), 4);
        assert_eq!(normalize_capacity(3), 4);
        assert_eq!(normalize_capacity(5), 8);
        assert_eq!(normalize_capacity(64), 64);
        assert_eq!(normalize_capacity(100), 128);
    }

    #[test]
    fn test_min_capacity_for() {
        assert_eq!(min_capacity_for(0), 4);
        assert_eq!(min_capacity_for(2), 4);
        assert_eq!(min_capacity_for(3), 8);
        assert_eq!(min_capacity_for(75), 128);
        assert_eq!(min_capacity_for(89), 128);
        assert_eq!(min_capacity_for(90), 256);
    }
}
