//! Probing policies
//!
//! A policy maps `(hash, attempt, capacity)` to the slot index to inspect on
//! that attempt. Capacities are powers of two, so reducing modulo the
//! capacity is a mask with `capacity - 1`. All three policies visit every
//! slot exactly once over attempts `0..capacity`.

/// Produces the probe sequence of a hash.
pub trait ProbingPolicy {
    /// Returns the slot index for `attempt`, in `0..capacity`.
    ///
    /// `capacity` must be a power of two.
    fn probe(&self, hash: u64, attempt: usize, capacity: usize) -> usize;
}

/// Truncates a hash to the native word for masking
#[allow(clippy::cast_possible_truncation)]
fn base(hash: u64) -> usize {
    hash as usize
}

/// `hash + attempt`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

impl ProbingPolicy for Linear {
    fn probe(&self, hash: u64, attempt: usize, capacity: usize) -> usize {
        base(hash).wrapping_add(attempt) & capacity.wrapping_sub(1)
    }
}

/// `hash + attempt * (attempt + 1) / 2`, the triangular-number sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quadratic;

impl ProbingPolicy for Quadratic {
    fn probe(&self, hash: u64, attempt: usize, capacity: usize) -> usize {
        // one of attempt, attempt + 1 is even, so halve that one first
        let step = if attempt % 2 == 0 {
            (attempt / 2).wrapping_mul(attempt.wrapping_add(1))
        } else {
            attempt.wrapping_mul(attempt.wrapping_add(1) / 2)
        };
        base(hash).wrapping_add(step) & capacity.wrapping_sub(1)
    }
}

/// `hash + attempt * hash2` with `hash2 = (hash >> 16) | 1`
///
/// The secondary hash is odd, hence coprime with any power-of-two capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleHashing;

impl ProbingPolicy for DoubleHashing {
    fn probe(&self, hash: u64, attempt: usize, capacity: usize) -> usize {
        let step = base(hash >> 16) | 1;
        base(hash).wrapping_add(attempt.wrapping_mul(step)) & capacity.wrapping_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts the first `capacity` attempts hit every slot once
    fn assert_full_cycle<P: ProbingPolicy>(policy: &P, hash: u64, capacity: usize) {
        let mut seen = vec![false; capacity];
        for attempt in 0..capacity {
            let index = policy.probe(hash, attempt, capacity);
            assert!(index < capacity);
            assert!(!seen[index], "slot {index} visited twice for hash {hash:#x}");
            seen[index] = true;
        }
    }

    const HASHES: [u64; 6] = [0, 1, 0xdead_beef, 2_654_435_761, u64::MAX, 0x1234_5678_9abc_def0];

    #[test]
    fn test_linear_sequence() {
        assert_eq!(Linear.probe(5, 0, 8), 5);
        assert_eq!(Linear.probe(5, 1, 8), 6);
        assert_eq!(Linear.probe(5, 3, 8), 0);
    }

    #[test]
    fn test_quadratic_sequence() {
        let indices: Vec<usize> = (0..5).map(|attempt| Quadratic.probe(0, attempt, 16)).collect();
        assert_eq!(indices, vec![0, 1, 3, 6, 10]);
    }

    #[test]
    fn test_double_hashing_sequence() {
        // hash2 = (0x30002 >> 16) | 1 = 3
        assert_eq!(DoubleHashing.probe(0x3_0002, 0, 16), 2);
        assert_eq!(DoubleHashing.probe(0x3_0002, 1, 16), 5);
        assert_eq!(DoubleHashing.probe(0x3_0002, 2, 16), 8);
    }

    #[test]
    fn test_full_cycle() {
        for capacity in [4, 8, 64, 1024] {
            for hash in HASHES {
                assert_full_cycle(&Linear, hash, capacity);
                assert_full_cycle(&Quadratic, hash, capacity);
                assert_full_cycle(&DoubleHashing, hash, capacity);
            }
        }
    }

    #[test]
    fn test_large_attempts_do_not_overflow() {
        assert!(Quadratic.probe(u64::MAX, usize::MAX, 64) < 64);
        assert!(DoubleHashing.probe(u64::MAX, usize::MAX, 64) < 64);
        assert!(Linear.probe(u64::MAX, usize::MAX, 64) < 64);
    }
}
