//! Pluggable hash functions
//!
//! A table hashes keys through a [`HashFunction`] chosen as a type parameter,
//! so the call is resolved at compile time. [`DefaultHash`] covers the
//! built-in key types; [`BuildHasherHash`] adapts any `std` [`BuildHasher`]
//! for keys that derive [`Hash`].
//!
//! # Hash/equality law
//!
//! Every implementation must return equal hashes for keys that compare equal
//! under `Eq`. The table never checks this. Breaking it makes lookups miss
//! entries that are present.

use std::hash::{BuildHasher, Hash};

/// Knuth's multiplicative hashing constant
const KNUTH: u32 = 2_654_435_761;

/// Maps a key to an unsigned hash.
pub trait HashFunction<K: ?Sized> {
    /// Hashes `key`. Keys that compare equal must hash equal.
    fn hash(&self, key: &K) -> u64;
}

/// The reference hash functions for integers, bytes, floats and strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultHash;

/// Multiplicative hash over 32 bits
fn knuth32(bits: u32) -> u64 {
    u64::from(bits.wrapping_mul(KNUTH))
}

/// Multiplicative hash over 64 bits
fn knuth64(bits: u64) -> u64 {
    bits.wrapping_mul(u64::from(KNUTH))
}

/// Spreads a byte over the upper bits before the multiplicative hash
fn byte_hash(byte: i32) -> u64 {
    let spread = byte.wrapping_shl(8).wrapping_mul(0xF5);
    knuth32(u32::from_ne_bytes(spread.to_ne_bytes()))
}

/// Xorshift-multiply finalizer for float bit patterns
fn mix32(mut bits: u32) -> u64 {
    bits ^= bits >> 17;
    bits = bits.wrapping_mul(0xEF59_A5B3);
    bits ^= bits >> 11;
    bits = bits.wrapping_mul(0xAC4C_1B51);
    bits ^= bits >> 15;
    bits = bits.wrapping_mul(0x3184_8BAB);
    bits ^= bits >> 14;
    u64::from(bits)
}

impl HashFunction<i32> for DefaultHash {
    fn hash(&self, key: &i32) -> u64 {
        knuth32(u32::from_ne_bytes(key.to_ne_bytes()))
    }
}

impl HashFunction<u32> for DefaultHash {
    fn hash(&self, key: &u32) -> u64 {
        knuth32(*key)
    }
}

impl HashFunction<i16> for DefaultHash {
    fn hash(&self, key: &i16) -> u64 {
        knuth32(u32::from(u16::from_ne_bytes(key.to_ne_bytes())))
    }
}

impl HashFunction<u16> for DefaultHash {
    fn hash(&self, key: &u16) -> u64 {
        knuth32(u32::from(*key))
    }
}

impl HashFunction<i64> for DefaultHash {
    fn hash(&self, key: &i64) -> u64 {
        knuth64(u64::from_ne_bytes(key.to_ne_bytes()))
    }
}

impl HashFunction<u64> for DefaultHash {
    fn hash(&self, key: &u64) -> u64 {
        knuth64(*key)
    }
}

impl HashFunction<usize> for DefaultHash {
    fn hash(&self, key: &usize) -> u64 {
        knuth64(*key as u64)
    }
}

impl HashFunction<isize> for DefaultHash {
    #[allow(clippy::cast_sign_loss)]
    fn hash(&self, key: &isize) -> u64 {
        knuth64(*key as u64)
    }
}

impl HashFunction<u8> for DefaultHash {
    fn hash(&self, key: &u8) -> u64 {
        byte_hash(i32::from(*key))
    }
}

impl HashFunction<i8> for DefaultHash {
    fn hash(&self, key: &i8) -> u64 {
        byte_hash(i32::from(*key))
    }
}

impl HashFunction<char> for DefaultHash {
    fn hash(&self, key: &char) -> u64 {
        knuth32(u32::from(*key))
    }
}

impl HashFunction<f32> for DefaultHash {
    fn hash(&self, key: &f32) -> u64 {
        // -0.0 == 0.0, so both must produce the same bits
        let bits = if key.to_bits() == (-0.0f32).to_bits() { 0 } else { key.to_bits() };
        mix32(bits)
    }
}

impl HashFunction<f64> for DefaultHash {
    #[allow(clippy::cast_possible_truncation)]
    fn hash(&self, key: &f64) -> u64 {
        let bits = if key.to_bits() == (-0.0f64).to_bits() { 0 } else { key.to_bits() };
        mix32((bits >> 32) as u32 ^ bits as u32)
    }
}

impl HashFunction<[u8]> for DefaultHash {
    fn hash(&self, key: &[u8]) -> u64 {
        Murmur64::default().hash(key)
    }
}

impl HashFunction<Vec<u8>> for DefaultHash {
    fn hash(&self, key: &Vec<u8>) -> u64 {
        Murmur64::default().hash(key.as_slice())
    }
}

impl HashFunction<str> for DefaultHash {
    fn hash(&self, key: &str) -> u64 {
        Murmur64::default().hash(key.as_bytes())
    }
}

impl HashFunction<String> for DefaultHash {
    fn hash(&self, key: &String) -> u64 {
        Murmur64::default().hash(key.as_bytes())
    }
}

impl HashFunction<&str> for DefaultHash {
    fn hash(&self, key: &&str) -> u64 {
        Murmur64::default().hash(key.as_bytes())
    }
}

/// Seeded 64-bit `MurmurHash64A` over byte sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur64 {
    /// Seed mixed into the initial state
    pub seed: u64,
}

impl Murmur64 {
    /// Seed used by [`DefaultHash`] for strings and byte slices
    pub const DEFAULT_SEED: u64 = 0xc70f_6907;

    /// Odd multiplier applied to every block
    const M: u64 = 0xc6a4_a793_5bd1_e995;

    /// Right shift used by the block mix and the final avalanche
    const R: u32 = 47;

    /// Creates a hasher with the given seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for Murmur64 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl HashFunction<[u8]> for Murmur64 {
    fn hash(&self, key: &[u8]) -> u64 {
        let mut h = self.seed ^ (key.len() as u64).wrapping_mul(Self::M);

        let chunks = key.chunks_exact(8);
        let tail = chunks.remainder();
        for chunk in chunks {
            let mut block = [0u8; 8];
            block.copy_from_slice(chunk);
            let mut k = u64::from_le_bytes(block);
            k = k.wrapping_mul(Self::M);
            k ^= k >> Self::R;
            k = k.wrapping_mul(Self::M);
            h ^= k;
            h = h.wrapping_mul(Self::M);
        }

        if !tail.is_empty() {
            for (i, &byte) in tail.iter().enumerate().rev() {
                h ^= u64::from(byte) << (i * 8);
            }
            h = h.wrapping_mul(Self::M);
        }

        h ^= h >> Self::R;
        h = h.wrapping_mul(Self::M);
        h ^= h >> Self::R;
        h
    }
}

impl HashFunction<str> for Murmur64 {
    fn hash(&self, key: &str) -> u64 {
        self.hash(key.as_bytes())
    }
}

impl HashFunction<String> for Murmur64 {
    fn hash(&self, key: &String) -> u64 {
        self.hash(key.as_bytes())
    }
}

impl HashFunction<&str> for Murmur64 {
    fn hash(&self, key: &&str) -> u64 {
        self.hash(key.as_bytes())
    }
}

impl HashFunction<Vec<u8>> for Murmur64 {
    fn hash(&self, key: &Vec<u8>) -> u64 {
        self.hash(key.as_slice())
    }
}

/// Adapts a [`BuildHasher`] such as `RandomState` into a [`HashFunction`]
/// for any key implementing [`Hash`].
#[derive(Debug, Clone, Default)]
pub struct BuildHasherHash<S> {
    /// The wrapped hasher builder
    build: S,
}

impl<S: BuildHasher> BuildHasherHash<S> {
    /// Wraps `build`
    #[must_use]
    pub fn new(build: S) -> Self {
        Self { build }
    }
}

impl<K: Hash + ?Sized, S: BuildHasher> HashFunction<K> for BuildHasherHash<S> {
    fn hash(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }
}
