//! Deck construction, shuffle and deal.
//!
//! Every round starts from a fresh 16-card deck (four of each kind),
//! shuffled with the duel's RNG and dealt six to each side. The four cards
//! left over are discarded; nothing carries over between rounds.

use serde::{Deserialize, Serialize};

use super::hand::Hand;
use super::kind::CardKind;
use crate::core::config::{COPIES_PER_KIND, HAND_SLOTS};
use crate::core::player::SideMap;
use crate::core::rng::GameRng;

/// Total cards in a fresh deck.
pub const DECK_SIZE: usize = COPIES_PER_KIND * CardKind::ALL.len();

/// An ordered stack of cards. Index 0 is drawn first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardKind>,
}

impl Deck {
    /// Build the unshuffled 16-card deck.
    #[must_use]
    pub fn new() -> Self {
        let cards = (0..COPIES_PER_KIND)
            .flat_map(|_| CardKind::ALL)
            .collect();
        Self { cards }
    }

    /// Build a fresh deck and shuffle it.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Shuffle into a uniformly random permutation.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Cards in draw order.
    #[must_use]
    pub fn cards(&self) -> &[CardKind] {
        &self.cards
    }

    /// Number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Count cards of one kind.
    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }

    /// Deal the first six cards to side 0 and the next six to side 1.
    ///
    /// Consumes the deck; anything past the twelfth card is discarded. A
    /// short deck leaves the trailing slots empty.
    #[must_use]
    pub fn deal(self) -> SideMap<Hand> {
        let mut draw = self.cards.into_iter();
        let mut next_hand = || {
            let mut slots = [None; HAND_SLOTS];
            for slot in &mut slots {
                *slot = draw.next();
            }
            Hand::from_slots(slots)
        };
        let first = next_hand();
        let second = next_hand();
        SideMap::from_pair(first, second)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::Side;

    #[test]
    fn test_new_deck_composition() {
        let deck = Deck::new();
        assert_eq!(deck.len(), DECK_SIZE);
        for kind in CardKind::ALL {
            assert_eq!(deck.count(kind), 4);
        }
    }

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut rng = GameRng::new(42);
        let deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.len(), DECK_SIZE);
        for kind in CardKind::ALL {
            assert_eq!(deck.count(kind), 4);
        }
    }

    #[test]
    fn test_deal_fills_both_hands_in_draw_order() {
        let deck = Deck::new();
        let order = deck.cards().to_vec();
        let hands = deck.deal();

        for slot in 0..HAND_SLOTS {
            assert_eq!(hands[Side::First].get(slot), Some(order[slot]));
            assert_eq!(hands[Side::Second].get(slot), Some(order[HAND_SLOTS + slot]));
        }
        assert_eq!(hands[Side::First].occupied(), 6);
        assert_eq!(hands[Side::Second].occupied(), 6);
    }

    #[test]
    fn test_shuffle_is_not_biased_toward_original_order() {
        let original = Deck::new();
        let mut first_card_counts = [0usize; 4];
        let mut unchanged = 0;

        for seed in 0..4000u64 {
            let mut rng = GameRng::new(seed);
            let deck = Deck::shuffled(&mut rng);
            if deck == original {
                unchanged += 1;
            }
            first_card_counts[deck.cards()[0] as usize] += 1;
        }

        assert_eq!(unchanged, 0);
        // Expected 1000 per kind; sigma is about 27
        for count in first_card_counts {
            assert!((800..=1200).contains(&count), "first-card counts {first_card_counts:?}");
        }
    }
}
