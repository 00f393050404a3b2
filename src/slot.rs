//! The tri-state slot stored in every cell of the backing array

/// State tag of a [`Slot`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Never used since the last allocation or `clear`; terminates probe sequences
    Empty,
    /// Holds a live key-value pair
    Occupied,
    /// Tombstone left by an erase; probes continue past it, inserts may reuse it
    Deleted,
}

/// One cell of the table's backing array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// Free slot
    Empty,
    /// Slot holding a live entry
    Occupied {
        /// The stored key
        key: K,
        /// The value associated with the key
        value: V,
    },
    /// Tombstone
    Deleted,
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<K, V> Slot<K, V> {
    /// Returns the state tag of this slot
    #[must_use]
    pub fn state(&self) -> SlotState {
        match self {
            Self::Empty => SlotState::Empty,
            Self::Occupied { .. } => SlotState::Occupied,
            Self::Deleted => SlotState::Deleted,
        }
    }

    /// Returns true if the slot holds a live entry
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    /// Returns the key and value if the slot is occupied
    #[must_use]
    pub fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::Empty | Self::Deleted => None,
        }
    }

    /// Returns the key and a mutable value if the slot is occupied
    pub(crate) fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::Empty | Self::Deleted => None,
        }
    }

    /// Returns the value of a slot the caller knows to be occupied
    #[allow(clippy::unreachable)]
    pub(crate) fn occupied_value(&mut self) -> &mut V {
        match self {
            Self::Occupied { value, .. } => value,
            Self::Empty | Self::Deleted => unreachable!("slot is not occupied"),
        }
    }

    /// Stores a live entry in the slot and returns its value
    pub(crate) fn fill(&mut self, key: K, value: V) -> &mut V {
        *self = Self::Occupied { key, value };
        self.occupied_value()
    }

    /// Consumes the slot, returning its entry if it was occupied
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::Empty | Self::Deleted => None,
        }
    }
}
