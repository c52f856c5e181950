//! Recover duel state from frame text.
//!
//! The decoder is the inverse of `encode` for everything a frame shows. Each
//! field is read on its own: a short, missing or garbled row leaves that
//! field unchanged (or the slot empty) and never aborts the rest.
//!
//! ## Fields
//!
//! - Round: `R<digits>` on the round row, else a digit run in its last 3 chars
//! - Scores: digits after the first `[` on rows 7 and 9
//! - Turn: the indicator cell at row 5, column 38
//! - Hands: the 3x3 glyph window of every slot in both bands
//! - Log: row 17, trimmed

use serde::{Deserialize, Serialize};

use super::layout::{
    self, Band, GLYPH_WIDTH, INDICATOR_READ, ROW_LOG, ROW_OPPONENT_SCORE, ROW_OWN_SCORE,
    ROW_ROUND,
};
use crate::cards::{CardKind, Hand};
use crate::core::config::{RulesConfig, HAND_SLOTS};

/// How a finished duel looks from the viewer's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Won,
    Lost,
    Draw,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Verdict::Won => "You won",
            Verdict::Lost => "You lost",
            Verdict::Draw => "Draw",
        })
    }
}

/// Duel state as one viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameView {
    /// Viewer's hand (bottom band).
    pub own_hand: Hand,
    /// Opponent's hand (top band).
    pub opponent_hand: Hand,
    pub own_score: u32,
    pub opponent_score: u32,
    pub round: u32,
    /// Whether the viewer may act.
    pub my_turn: bool,
    pub game_over: bool,
    /// Log line as shown, possibly truncated.
    pub log: String,
}

impl Default for FrameView {
    fn default() -> Self {
        Self {
            own_hand: Hand::empty(),
            opponent_hand: Hand::empty(),
            own_score: 0,
            opponent_score: 0,
            round: 1,
            my_turn: false,
            game_over: false,
            log: String::new(),
        }
    }
}

impl FrameView {
    /// Update from one frame, using the standard thresholds for game-over
    /// inference.
    pub fn apply(&mut self, text: &str) {
        self.apply_with_rules(text, &RulesConfig::default());
    }

    /// Update from one frame.
    ///
    /// A `-` indicator only means game over once the round limit or win
    /// score has been reached; otherwise it just means "not your turn".
    pub fn apply_with_rules(&mut self, text: &str, rules: &RulesConfig) {
        let lines: Vec<&str> = text.lines().collect();
        let row = |index: usize| lines.get(index).copied();

        if let Some(round) = row(ROW_ROUND).and_then(parse_round) {
            self.round = round;
        }
        if let Some(score) = row(ROW_OWN_SCORE).and_then(parse_score) {
            self.own_score = score;
        }
        if let Some(score) = row(ROW_OPPONENT_SCORE).and_then(parse_score) {
            self.opponent_score = score;
        }

        let (indicator_row, indicator_column) = INDICATOR_READ;
        match row(indicator_row).and_then(|line| line.chars().nth(indicator_column)) {
            Some('v') => {
                self.my_turn = true;
                self.game_over = false;
            }
            Some('^') => {
                self.my_turn = false;
                self.game_over = false;
            }
            Some('-') => {
                self.my_turn = false;
                self.game_over = self.round >= rules.round_limit
                    || self.own_score >= rules.win_score
                    || self.opponent_score >= rules.win_score;
            }
            _ => {}
        }

        self.own_hand = read_hand(&lines, Band::Own);
        self.opponent_hand = read_hand(&lines, Band::Opponent);

        if let Some(log) = row(ROW_LOG) {
            self.log = log.trim().to_string();
        }
    }

    /// Check whether the viewer can act at all.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.my_turn && !self.game_over
    }

    /// End-of-duel result for the viewer, once the duel is over.
    ///
    /// Tied scores only count as a draw once the round limit was reached.
    #[must_use]
    pub fn verdict(&self, rules: &RulesConfig) -> Option<Verdict> {
        if !self.game_over {
            return None;
        }
        if self.own_score > self.opponent_score {
            Some(Verdict::Won)
        } else if self.opponent_score > self.own_score {
            Some(Verdict::Lost)
        } else if self.round >= rules.round_limit {
            Some(Verdict::Draw)
        } else {
            None
        }
    }
}

/// Decode a frame from scratch.
#[must_use]
pub fn decode(text: &str) -> FrameView {
    let mut view = FrameView::default();
    view.apply(text);
    view
}

/// Round number from the round row.
fn parse_round(line: &str) -> Option<u32> {
    let chars: Vec<char> = line.chars().collect();

    let marked = chars
        .windows(2)
        .position(|pair| pair[0] == 'R' && pair[1].is_ascii_digit())
        .and_then(|at| leading_number(&chars[at + 1..]));
    if marked.is_some() {
        return marked;
    }

    if chars.len() < 3 {
        return None;
    }
    let tail = &chars[chars.len() - 3..];
    let start = tail.iter().position(char::is_ascii_digit)?;
    leading_number(&tail[start..])
}

/// Score from a `[N]` box: digits right after the first `[`.
fn parse_score(line: &str) -> Option<u32> {
    let chars: Vec<char> = line.chars().collect();
    let open = chars.iter().position(|&c| c == '[')?;
    leading_number(&chars[open + 1..])
}

fn leading_number(chars: &[char]) -> Option<u32> {
    let digits: String = chars.iter().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn read_hand(lines: &[&str], band: Band) -> Hand {
    let mut slots = [None; HAND_SLOTS];
    for (slot, card) in slots.iter_mut().enumerate() {
        *card = read_glyph(lines, band, slot);
    }
    Hand::from_slots(slots)
}

/// Match one slot's 3x3 window against the glyph set. Blank or unknown art
/// reads as an empty slot.
fn read_glyph(lines: &[&str], band: Band, slot: usize) -> Option<CardKind> {
    let column = layout::glyph_column(slot);
    let window = band.glyph_rows().map(|row| {
        let mut cell: String = lines
            .get(row)
            .map(|line| line.chars().skip(column).take(GLYPH_WIDTH).collect())
            .unwrap_or_default();
        while cell.len() < GLYPH_WIDTH {
            cell.push(' ');
        }
        cell
    });

    if window.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }
    CardKind::from_glyph([window[0].as_str(), window[1].as_str(), window[2].as_str()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_marker() {
        assert_eq!(parse_round(" <===> R3<"), Some(3));
        assert_eq!(parse_round("R12<"), Some(12));
        assert_eq!(parse_round("xR<R4"), Some(4));
    }

    #[test]
    fn test_parse_round_tail_fallback() {
        assert_eq!(parse_round("======= 7<"), Some(7));
        assert_eq!(parse_round("=====<  "), None);
        assert_eq!(parse_round("R"), None);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("      [7]"), Some(7));
        assert_eq!(parse_score("[10]"), Some(10));
        assert_eq!(parse_score("[]"), None);
        assert_eq!(parse_score("no box"), None);
    }

    #[test]
    fn test_empty_text_keeps_defaults() {
        let view = decode("");
        assert_eq!(view, FrameView::default());
        assert_eq!(view.round, 1);
    }

    #[test]
    fn test_unknown_art_is_empty_slot() {
        let mut lines = vec![" ".repeat(40); 19];
        lines[3].replace_range(2..5, "???");
        lines[4].replace_range(8..11, " I ");
        let view = decode(&lines.join("\n"));
        assert_eq!(view.opponent_hand, Hand::empty());
    }

    #[test]
    fn test_dash_indicator_needs_threshold() {
        let mut lines = vec![" ".repeat(40); 19];
        lines[5].replace_range(38..39, "-");
        lines[8].replace_range(36..39, "R2<");
        let mut view = decode(&lines.join("\n"));
        assert!(!view.game_over);
        assert!(!view.my_turn);

        lines[8].replace_range(36..39, "R5<");
        view.apply(&lines.join("\n"));
        assert!(view.game_over);
    }

    #[test]
    fn test_verdict() {
        let rules = RulesConfig::default();
        let mut view = FrameView { game_over: true, own_score: 9, opponent_score: 3, ..FrameView::default() };
        assert_eq!(view.verdict(&rules), Some(Verdict::Won));

        view.own_score = 1;
        assert_eq!(view.verdict(&rules), Some(Verdict::Lost));

        view.own_score = 3;
        view.round = 5;
        assert_eq!(view.verdict(&rules), Some(Verdict::Draw));
        assert_eq!(Verdict::Draw.to_string(), "Draw");

        view.game_over = false;
        assert_eq!(view.verdict(&rules), None);
    }
}
