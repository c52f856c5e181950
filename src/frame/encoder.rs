//! Render a `GameState` into a frame from one side's point of view.
//!
//! The viewer's hand always fills the bottom band and the opponent's the
//! top band, whichever side the viewer is.

use super::grid::Frame;
use super::layout::{
    self, Band, CARD_BOTTOM, CARD_SIDE, CARD_TOP, DIVIDER_COLUMN, HEADER_COLUMN, HEADER_TEXT,
    INDICATOR_COLUMN, LOG_COLUMN, LOG_MAX_CHARS, ROW_BOTTOM_BORDER, ROW_DIVIDER, ROW_LOG,
    ROW_ROUND, ROW_TOP_BORDER, SCORE_COLUMN, SEPARATOR_COLUMN, SEPARATOR_FILL, WIDTH,
};
use crate::cards::Hand;
use crate::core::player::Side;
use crate::core::state::GameState;

/// Turn indicator as seen by one viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    /// Viewer's turn, duel running.
    ViewerTurn,
    /// Opponent's turn, duel running.
    OpponentTurn,
    /// Duel over.
    GameOver,
}

impl Indicator {
    /// Indicator for `viewer` in `state`.
    #[must_use]
    pub fn for_viewer(state: &GameState, viewer: Side) -> Self {
        if state.is_game_over() {
            Indicator::GameOver
        } else if state.current_player() == viewer {
            Indicator::ViewerTurn
        } else {
            Indicator::OpponentTurn
        }
    }

    /// The three cells, top to bottom.
    #[must_use]
    pub const fn cells(self) -> [char; 3] {
        match self {
            Indicator::ViewerTurn => ['-', '|', 'v'],
            Indicator::OpponentTurn => ['^', '|', '-'],
            Indicator::GameOver => ['-', '|', '-'],
        }
    }
}

/// Render `state` as seen by `viewer`.
#[must_use]
pub fn encode(state: &GameState, viewer: Side) -> Frame {
    let mut frame = Frame::blank();

    draw_chrome(&mut frame);
    draw_indicator(&mut frame, Indicator::for_viewer(state, viewer));
    draw_scores(&mut frame, state, viewer);
    draw_hand(&mut frame, Band::Opponent, state.hand(viewer.opponent()));
    draw_hand(&mut frame, Band::Own, state.hand(viewer));
    draw_log(&mut frame, state.last_log_message());

    frame
}

/// Borders, headers, card outlines and the dividers. Identical in every frame.
fn draw_chrome(frame: &mut Frame) {
    let rule = "-".repeat(WIDTH - 2);
    frame.put_str(ROW_TOP_BORDER, 0, &format!("/{rule}\\"));
    frame.put_str(ROW_BOTTOM_BORDER, 0, &format!("\\{rule}/"));

    for band in Band::ALL {
        frame.put_str(band.header_row(), HEADER_COLUMN, HEADER_TEXT);

        for slot in layout::slots() {
            let left = layout::slot_column(slot);
            frame.put_str(band.top_row(), left, CARD_TOP);
            frame.put_str(band.bottom_row(), left, CARD_BOTTOM);
            for row in band.glyph_rows() {
                frame.put_char(row, left, CARD_SIDE);
                frame.put_char(row, layout::right_bar_column(slot), CARD_SIDE);
            }
        }
    }

    let separator = format!("<{}>", "=".repeat(SEPARATOR_FILL));
    frame.put_str(ROW_ROUND, SEPARATOR_COLUMN, &separator);
    frame.put_str(ROW_DIVIDER, DIVIDER_COLUMN, &"-".repeat(WIDTH - 2));
}

fn draw_indicator(frame: &mut Frame, indicator: Indicator) {
    for band in Band::ALL {
        for (row, cell) in band.indicator_rows().into_iter().zip(indicator.cells()) {
            frame.put_char(row, INDICATOR_COLUMN, cell);
        }
    }
}

fn draw_scores(frame: &mut Frame, state: &GameState, viewer: Side) {
    frame.put_str(ROW_ROUND, SCORE_COLUMN, &format!("R{}<", state.round_number()));
    frame.put_str(
        Band::Opponent.score_row(),
        SCORE_COLUMN,
        &format!("[{}]", state.score(viewer.opponent())),
    );
    frame.put_str(Band::Own.score_row(), SCORE_COLUMN, &format!("[{}]", state.score(viewer)));
}

fn draw_hand(frame: &mut Frame, band: Band, hand: &Hand) {
    for (slot, card) in hand.slots().iter().enumerate() {
        let Some(kind) = card else { continue };
        let column = layout::glyph_column(slot);
        for (row, art) in band.glyph_rows().into_iter().zip(kind.glyph()) {
            frame.put_str(row, column, art);
        }
    }
}

fn draw_log(frame: &mut Frame, message: &str) {
    let shown: String = message.chars().take(LOG_MAX_CHARS).collect();
    frame.put_str(ROW_LOG, LOG_COLUMN, &shown);
}
