//! Iterators over the live entries of an `OpenTable`
//!
//! Every iterator walks the backing array in physical slot order and skips
//! empty slots and tombstones. Borrowing iterators hold a borrow of the
//! table, so the table cannot be mutated (and its array cannot be
//! reallocated) while one is alive.

use std::{slice, vec};

use crate::slot::Slot;

/// Iterator over `(&K, &V)` pairs, created by `OpenTable::iter`
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Remaining slots of the backing array
    slots: slice::Iter<'a, Slot<K, V>>,
    /// Live entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates an iterator over `slots`, which hold `len` live entries
    pub(crate) fn new(slots: &'a [Slot<K, V>], len: usize) -> Self {
        Self { slots: slots.iter(), remaining: len }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(Slot::entry)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` pairs, created by `OpenTable::iter_mut`
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    /// Remaining slots of the backing array
    slots: slice::IterMut<'a, Slot<K, V>>,
    /// Live entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    /// Creates an iterator over `slots`, which hold `len` live entries
    pub(crate) fn new(slots: &'a mut [Slot<K, V>], len: usize) -> Self {
        Self { slots: slots.iter_mut(), remaining: len }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(Slot::entry_mut)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` pairs, created by `OpenTable::into_iter`
#[derive(Debug)]
pub struct IntoIter<K, V> {
    /// Remaining slots of the former backing array
    slots: vec::IntoIter<Slot<K, V>>,
    /// Live entries not yet yielded
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    /// Creates an iterator consuming `slots`, which hold `len` live entries
    pub(crate) fn new(slots: Vec<Slot<K, V>>, len: usize) -> Self {
        Self { slots: slots.into_iter(), remaining: len }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(Slot::into_entry)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// Iterator over the keys of a table
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    /// Underlying entry iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    /// Wraps an entry iterator
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the values of a table
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    /// Underlying entry iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    /// Wraps an entry iterator
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Mutable iterator over the values of a table
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    /// Underlying entry iterator
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    /// Wraps a mutable entry iterator
    pub(crate) fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
