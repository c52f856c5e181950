//! A hand: six fixed slots addressed by column.
//!
//! Slots are never reordered or compacted. A captured card leaves its slot
//! empty until the next deal.

use serde::{Deserialize, Serialize};

use super::kind::CardKind;
use crate::core::config::HAND_SLOTS;

/// Six card slots, columns A-F.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    slots: [Option<CardKind>; HAND_SLOTS],
}

impl Hand {
    /// Create a hand with every slot empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a hand from explicit slot contents.
    #[must_use]
    pub const fn from_slots(slots: [Option<CardKind>; HAND_SLOTS]) -> Self {
        Self { slots }
    }

    /// Create a fully occupied hand.
    #[must_use]
    pub fn from_kinds(kinds: [CardKind; HAND_SLOTS]) -> Self {
        Self {
            slots: kinds.map(Some),
        }
    }

    /// Card at `slot`, or `None` if the slot is empty or out of range.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<CardKind> {
        self.slots.get(slot).copied().flatten()
    }

    /// Empty `slot`, returning what was there.
    pub fn take(&mut self, slot: usize) -> Option<CardKind> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// All slots in column order.
    #[must_use]
    pub fn slots(&self) -> &[Option<CardKind>; HAND_SLOTS] {
        &self.slots
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }
}
