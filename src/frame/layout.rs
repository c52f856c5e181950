//! Grid-address table for the 40x19 frame.
//!
//! Row and column indices are 0-based. The encoder writes at these
//! addresses and the decoder reads from the same ones, so this table is the
//! wire format.

use crate::core::config::HAND_SLOTS;

/// Characters per frame row.
pub const WIDTH: usize = 40;
/// Rows per frame.
pub const HEIGHT: usize = 19;

pub const ROW_TOP_BORDER: usize = 0;
pub const ROW_OPPONENT_HEADER: usize = 1;
pub const ROW_OPPONENT_SCORE: usize = 7;
pub const ROW_ROUND: usize = 8;
pub const ROW_OWN_SCORE: usize = 9;
pub const ROW_OWN_HEADER: usize = 15;
pub const ROW_DIVIDER: usize = 16;
pub const ROW_LOG: usize = 17;
pub const ROW_BOTTOM_BORDER: usize = 18;

/// Column of the header text (`" A     B ..."`).
pub const HEADER_COLUMN: usize = 2;
/// Header text; each letter sits above the middle of its card.
pub const HEADER_TEXT: &str = " A     B     C     D     E     F";

/// Column of `[N]` score boxes and of the `R<n><` round marker.
pub const SCORE_COLUMN: usize = 36;
/// Column of the `<===...>` separator on the round row.
pub const SEPARATOR_COLUMN: usize = 1;
/// Number of `=` between the separator's arrowheads.
pub const SEPARATOR_FILL: usize = 33;

/// Column of the divider above the log line.
pub const DIVIDER_COLUMN: usize = 1;
/// Column where the log message starts.
pub const LOG_COLUMN: usize = 1;
/// Longest log message the frame shows.
pub const LOG_MAX_CHARS: usize = 30;

/// Column of the three-cell turn indicator in each band.
pub const INDICATOR_COLUMN: usize = 38;

/// Card top edge art.
pub const CARD_TOP: &str = "/---\\";
/// Card bottom edge art.
pub const CARD_BOTTOM: &str = "\\---/";
/// Card side edge art.
pub const CARD_SIDE: char = '|';
/// Width of a glyph window.
pub const GLYPH_WIDTH: usize = 3;

/// Left edge of a card slot (its top-left corner and left bar).
#[must_use]
pub const fn slot_column(slot: usize) -> usize {
    1 + 6 * slot
}

/// First column of a slot's glyph window.
#[must_use]
pub const fn glyph_column(slot: usize) -> usize {
    slot_column(slot) + 1
}

/// Right bar of a card slot.
#[must_use]
pub const fn right_bar_column(slot: usize) -> usize {
    slot_column(slot) + 4
}

/// One of the two card bands.
///
/// The viewer's own hand is always the bottom band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// Opponent's hand, rows 2-6.
    Opponent,
    /// Viewer's hand, rows 10-14.
    Own,
}

impl Band {
    /// Both bands, top to bottom.
    pub const ALL: [Band; 2] = [Band::Opponent, Band::Own];

    /// Row of the card top edges.
    #[must_use]
    pub const fn top_row(self) -> usize {
        match self {
            Band::Opponent => 2,
            Band::Own => 10,
        }
    }

    /// The three glyph rows.
    #[must_use]
    pub const fn glyph_rows(self) -> [usize; 3] {
        let top = self.top_row();
        [top + 1, top + 2, top + 3]
    }

    /// Row of the card bottom edges.
    #[must_use]
    pub const fn bottom_row(self) -> usize {
        self.top_row() + 4
    }

    /// Rows of the turn indicator cells, top to bottom.
    ///
    /// The own band's indicator is shifted one row down onto its bottom edge.
    #[must_use]
    pub const fn indicator_rows(self) -> [usize; 3] {
        match self {
            Band::Opponent => [3, 4, 5],
            Band::Own => [12, 13, 14],
        }
    }

    /// Row of the column-letter header next to this band.
    #[must_use]
    pub const fn header_row(self) -> usize {
        match self {
            Band::Opponent => ROW_OPPONENT_HEADER,
            Band::Own => ROW_OWN_HEADER,
        }
    }

    /// Row of this band's score box.
    #[must_use]
    pub const fn score_row(self) -> usize {
        match self {
            Band::Opponent => ROW_OPPONENT_SCORE,
            Band::Own => ROW_OWN_SCORE,
        }
    }
}

/// Row and column the decoder reads the turn indicator from.
pub const INDICATOR_READ: (usize, usize) = (5, INDICATOR_COLUMN);

/// Slot indices in column order.
pub fn slots() -> impl Iterator<Item = usize> {
    0..HAND_SLOTS
}
