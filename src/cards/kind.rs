//! The four card kinds and their combat rules.
//!
//! Combat is a closed table:
//! - An Arrow defeats anything, and anything defeats an Arrow.
//! - Otherwise AXE beats HAMMER, HAMMER beats SWORD, SWORD beats AXE.
//!
//! Captures involving an Arrow on either side never score.

use serde::{Deserialize, Serialize};

/// Three rows of three characters drawn for a card.
pub type Glyph = [&'static str; 3];

/// A card. Cards have no identity beyond their kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    /// Beats Hammer.
    Axe,
    /// Beats Sword.
    Hammer,
    /// Beats Axe.
    Sword,
    /// Beats and is beaten by everything; never scores.
    Arrow,
}

impl CardKind {
    /// All kinds, in deck construction order.
    pub const ALL: [CardKind; 4] = [CardKind::Axe, CardKind::Hammer, CardKind::Sword, CardKind::Arrow];

    /// Whether `self` attacking `defender` captures it.
    #[must_use]
    pub const fn can_defeat(self, defender: CardKind) -> bool {
        match (self, defender) {
            (CardKind::Arrow, _) | (_, CardKind::Arrow) => true,
            (CardKind::Axe, CardKind::Hammer)
            | (CardKind::Hammer, CardKind::Sword)
            | (CardKind::Sword, CardKind::Axe) => true,
            _ => false,
        }
    }

    /// Whether capturing `self` with `attacker` awards a point.
    #[must_use]
    pub const fn earns_points(self, attacker: CardKind) -> bool {
        !matches!(self, CardKind::Arrow) && !matches!(attacker, CardKind::Arrow)
    }

    /// Upper-case name used in log messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Axe => "AXE",
            CardKind::Hammer => "HAMMER",
            CardKind::Sword => "SWORD",
            CardKind::Arrow => "ARROW",
        }
    }

    /// The fixed 3x3 art drawn for this kind in a frame.
    #[must_use]
    pub const fn glyph(self) -> Glyph {
        match self {
            CardKind::Axe => ["<7>", " I ", " L "],
            CardKind::Hammer => ["[=]", " I ", " I "],
            CardKind::Sword => ["  /", " / ", "X  "],
            CardKind::Arrow => [" ^ ", " I ", "/^\\"],
        }
    }

    /// Recover a kind from its art. Returns `None` for unknown art.
    #[must_use]
    pub fn from_glyph(rows: [&str; 3]) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.glyph() == rows)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
