//! Authoritative duel state.
//!
//! ## GameState
//!
//! One instance per duel, owned by that duel's session and mutated only
//! through `rules::DuelRules`:
//! - Two hands of six slots
//! - Scores, current side, round number, pass flags
//! - Game-over flag and the last log message
//! - The duel's RNG, used for every deal

use super::player::{Side, SideMap};
use super::rng::GameRng;
use crate::cards::{Deck, Hand};

/// Log message shown when a duel starts.
pub const NEW_GAME_MESSAGE: &str = "NEW GAME";

/// Full duel state.
#[derive(Clone, Debug)]
pub struct GameState {
    hands: SideMap<Hand>,
    scores: SideMap<u32>,
    current: Side,
    round: u32,
    passed: SideMap<bool>,
    game_over: bool,
    last_log: String,

    /// Deterministic RNG used for deals.
    pub rng: GameRng,
}

impl GameState {
    /// Create a duel: random starting side, fresh shuffled deal, round 1.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    /// Create a duel seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }

    /// Create a duel from an existing RNG.
    #[must_use]
    pub fn with_rng(mut rng: GameRng) -> Self {
        let current = if rng.gen_bool(0.5) { Side::First } else { Side::Second };
        let hands = Deck::shuffled(&mut rng).deal();

        Self {
            hands,
            scores: SideMap::with_value(0),
            current,
            round: 1,
            passed: SideMap::with_value(false),
            game_over: false,
            last_log: NEW_GAME_MESSAGE.to_string(),
            rng,
        }
    }

    // === Accessors ===

    /// A side's hand.
    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side]
    }

    /// Mutable access to a side's hand.
    pub fn hand_mut(&mut self, side: Side) -> &mut Hand {
        &mut self.hands[side]
    }

    /// A side's score.
    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side]
    }

    /// The side whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Side {
        self.current
    }

    /// Current round (starts at 1, never decreases).
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round
    }

    /// Whether a side has passed since its last move this round.
    #[must_use]
    pub fn has_passed(&self, side: Side) -> bool {
        self.passed[side]
    }

    /// Whether the duel has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The last log message, untruncated.
    #[must_use]
    pub fn last_log_message(&self) -> &str {
        &self.last_log
    }

    // === Setup ===
    //
    // Used to stage positions for replays and tests.

    /// Replace a side's hand.
    pub fn set_hand(&mut self, side: Side, hand: Hand) {
        self.hands[side] = hand;
    }

    /// Set a side's score.
    pub fn set_score(&mut self, side: Side, score: u32) {
        self.scores[side] = score;
    }

    /// Set whose turn it is.
    pub fn set_current_player(&mut self, side: Side) {
        self.current = side;
    }

    /// Overwrite the log message.
    pub fn set_last_log_message(&mut self, message: impl Into<String>) {
        self.last_log = message.into();
    }

    // === Mutation primitives (driven by the rules engine) ===

    pub(crate) fn add_point(&mut self, side: Side) {
        self.scores[side] += 1;
    }

    pub(crate) fn flip_turn(&mut self) {
        self.current = self.current.opponent();
    }

    pub(crate) fn set_passed(&mut self, side: Side, passed: bool) {
        self.passed[side] = passed;
    }

    pub(crate) fn both_passed(&self) -> bool {
        self.passed.iter().all(|(_, &p)| p)
    }

    pub(crate) fn advance_round(&mut self) {
        self.round += 1;
    }

    pub(crate) fn end_game(&mut self) {
        self.game_over = true;
    }

    pub(crate) fn append_log(&mut self, suffix: &str) {
        self.last_log.push_str(suffix);
    }

    /// Deal a fresh shuffled deck and clear both pass flags.
    pub(crate) fn redeal(&mut self) {
        self.hands = Deck::shuffled(&mut self.rng).deal();
        self.passed = SideMap::with_value(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42);

        assert_eq!(state.round_number(), 1);
        assert_eq!(state.score(Side::First), 0);
        assert_eq!(state.score(Side::Second), 0);
        assert!(!state.is_game_over());
        assert!(!state.has_passed(Side::First));
        assert!(!state.has_passed(Side::Second));
        assert_eq!(state.last_log_message(), "NEW GAME");
        assert_eq!(state.hand(Side::First).occupied(), 6);
        assert_eq!(state.hand(Side::Second).occupied(), 6);
    }

    #[test]
    fn test_initial_hands_use_the_full_deck() {
        let state = GameState::new(7);

        for kind in CardKind::ALL {
            let count: usize = Side::ALL
                .iter()
                .map(|&side| state.hand(side).slots().iter().filter(|s| **s == Some(kind)).count())
                .sum();
            assert_eq!(count, 4, "{kind}");
        }
    }

    #[test]
    fn test_starting_side_is_seeded() {
        let a = GameState::new(99);
        let b = GameState::new(99);
        assert_eq!(a.current_player(), b.current_player());
        assert_eq!(a.hand(Side::First), b.hand(Side::First));
    }

    #[test]
    fn test_both_starting_sides_occur() {
        let firsts = (0..200u64)
            .filter(|&seed| GameState::new(seed).current_player() == Side::First)
            .count();
        assert!(firsts > 50 && firsts < 150, "side 0 started {firsts} of 200");
    }

    #[test]
    fn test_redeal_resets_pass_flags() {
        let mut state = GameState::new(1);
        state.set_passed(Side::First, true);
        state.set_passed(Side::Second, true);
        assert!(state.both_passed());

        state.hand_mut(Side::First).take(0);
        state.redeal();

        assert!(!state.has_passed(Side::First));
        assert!(!state.has_passed(Side::Second));
        assert_eq!(state.hand(Side::First).occupied(), 6);
    }
}
