//! Card system: kinds, hands and the deck.
//!
//! ## Key Types
//!
//! - `CardKind`: One of four kinds; owns the combat table and the glyph art
//! - `Hand`: Six fixed slots, columns A-F
//! - `Deck`: Twelve cards, shuffled and dealt once per round

pub mod kind;
pub mod hand;
pub mod deck;

pub use kind::{CardKind, Glyph};
pub use hand::Hand;
pub use deck::{Deck, DECK_SIZE};
