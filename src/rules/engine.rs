//! Turn state machine.
//!
//! `DuelRules` is the only code that mutates a `GameState` during a duel.
//! Every command either succeeds (state advances, log describes what
//! happened) or is rejected (only the log message changes).
//!
//! ## States
//!
//! - Awaiting a move from the current side
//! - Round end: both sides passed, a fresh deal follows (or a draw)
//! - Game over: terminal, every further command is rejected

use thiserror::Error;
use tracing::debug;

use crate::cards::CardKind;
use crate::core::action::{Command, CommandError};
use crate::core::config::{RulesConfig, HAND_SLOTS};
use crate::core::player::Side;
use crate::core::state::GameState;

/// Log message after a successful pass.
pub const PASSED_MESSAGE: &str = "PLAYER PASSED";
/// Log message after a fresh round is dealt.
pub const NEW_ROUND_MESSAGE: &str = "NEW ROUND";
/// Log message when the round limit ends the duel.
pub const DRAW_MESSAGE: &str = "GAME OVER - DRAW";

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// One side reached the winning score.
    Winner(Side),
    /// The round limit was reached first.
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Why a command was refused. `Display` is the log message shown to both sides.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The line was neither `PS` nor a column pair.
    #[error("SYNTAX ERROR")]
    Syntax(#[from] CommandError),

    /// A slot index outside 0..6.
    #[error("INVALID MOVE: OUT OF BOUNDS")]
    OutOfBounds {
        /// Attacking slot index.
        from: usize,
        /// Defending slot index.
        to: usize,
    },

    /// The attacker cannot capture the defender, or either slot is empty.
    #[error("INVALID MOVE: CANNOT DEFEAT TARGET")]
    CannotDefeat,

    /// The side does not own the turn.
    #[error("NOT YOUR TURN")]
    NotYourTurn,

    /// The duel already ended.
    #[error("GAME OVER")]
    GameOver,
}

/// What a successful command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A card was captured.
    Captured {
        /// Attacking kind.
        attacker: CardKind,
        /// Captured kind.
        defender: CardKind,
        /// Whether the capture scored a point.
        scored: bool,
    },
    /// The side passed and the round continues.
    Passed,
    /// Both sides passed; the given round was dealt.
    NewRound(u32),
}

/// A successful transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// What happened.
    pub event: Event,
    /// Set when this transition ended the duel.
    pub result: Option<GameResult>,
}

/// Rules engine trait.
///
/// The session dispatcher drives a duel through this trait.
pub trait RulesEngine {
    /// Get the duel thresholds.
    fn config(&self) -> &RulesConfig;

    /// Apply one parsed command for `side`.
    ///
    /// On rejection the state's log message is set to the rejection text
    /// and nothing else changes.
    fn apply_command(
        &self,
        state: &mut GameState,
        side: Side,
        command: Command,
    ) -> Result<Outcome, Rejection>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Parse and apply one raw command line.
    fn apply_line(&self, state: &mut GameState, side: Side, line: &str) -> Result<Outcome, Rejection> {
        match Command::parse(line) {
            Ok(command) => self.apply_command(state, side, command),
            Err(error) => {
                let rejection = Rejection::from(error);
                state.set_last_log_message(rejection.to_string());
                Err(rejection)
            }
        }
    }
}

/// The duel's rules: combat, pass/round flow, win and draw thresholds.
#[derive(Clone, Debug, Default)]
pub struct DuelRules {
    config: RulesConfig,
}

impl DuelRules {
    /// Create rules with the given thresholds.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Attack the opponent's slot `to` with `side`'s slot `from`.
    pub fn make_move(
        &self,
        state: &mut GameState,
        side: Side,
        from: usize,
        to: usize,
    ) -> Result<Outcome, Rejection> {
        let outcome = self.try_move(state, side, from, to);
        record(state, side, outcome)
    }

    /// Pass the turn for `side`.
    pub fn pass(&self, state: &mut GameState, side: Side) -> Result<Outcome, Rejection> {
        let outcome = self.try_pass(state, side);
        record(state, side, outcome)
    }

    fn try_move(
        &self,
        state: &mut GameState,
        side: Side,
        from: usize,
        to: usize,
    ) -> Result<Outcome, Rejection> {
        if state.is_game_over() {
            return Err(Rejection::GameOver);
        }
        if from >= HAND_SLOTS || to >= HAND_SLOTS {
            return Err(Rejection::OutOfBounds { from, to });
        }
        if side != state.current_player() {
            return Err(Rejection::NotYourTurn);
        }

        let defender_side = side.opponent();
        let (attacker, defender) = match (state.hand(side).get(from), state.hand(defender_side).get(to)) {
            (Some(a), Some(d)) if a.can_defeat(d) => (a, d),
            _ => return Err(Rejection::CannotDefeat),
        };

        state.hand_mut(defender_side).take(to);
        let scored = defender.earns_points(attacker);
        if scored {
            state.add_point(side);
        }

        state.set_last_log_message(format!("{attacker} TAKES {defender}"));
        state.set_passed(side, false);
        state.flip_turn();

        let result = self.check_game_over(state);
        Ok(Outcome {
            event: Event::Captured { attacker, defender, scored },
            result,
        })
    }

    fn try_pass(&self, state: &mut GameState, side: Side) -> Result<Outcome, Rejection> {
        if state.is_game_over() {
            return Err(Rejection::GameOver);
        }
        if side != state.current_player() {
            return Err(Rejection::NotYourTurn);
        }

        state.set_passed(side, true);
        state.set_last_log_message(PASSED_MESSAGE);
        state.flip_turn();

        let mut event = Event::Passed;
        if state.both_passed() {
            state.advance_round();
            if state.round_number() >= self.config.round_limit {
                state.end_game();
                state.set_last_log_message(DRAW_MESSAGE);
            } else {
                state.redeal();
                state.set_last_log_message(NEW_ROUND_MESSAGE);
                event = Event::NewRound(state.round_number());
            }
        }

        let result = self.check_game_over(state);
        Ok(Outcome { event, result })
    }

    /// End the duel if a side reached the winning score, appending the win
    /// suffix to the log. Returns the result once the duel is over.
    fn check_game_over(&self, state: &mut GameState) -> Option<GameResult> {
        let winner = Side::ALL
            .into_iter()
            .find(|&side| state.score(side) >= self.config.win_score);

        if let Some(side) = winner {
            state.end_game();
            state.append_log(&format!("; {side} WON!"));
        }

        self.is_terminal(state)
    }
}

/// Write the rejection text into the log and trace the outcome.
fn record(
    state: &mut GameState,
    side: Side,
    outcome: Result<Outcome, Rejection>,
) -> Result<Outcome, Rejection> {
    match &outcome {
        Ok(ok) => debug!(%side, event = ?ok.event, result = ?ok.result, "command applied"),
        Err(rejection) => {
            debug!(%side, %rejection, "command rejected");
            state.set_last_log_message(rejection.to_string());
        }
    }
    outcome
}

impl RulesEngine for DuelRules {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn apply_command(
        &self,
        state: &mut GameState,
        side: Side,
        command: Command,
    ) -> Result<Outcome, Rejection> {
        match command {
            Command::Move { from, to } => self.make_move(state, side, from, to),
            Command::Pass => self.pass(state, side),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if !state.is_game_over() {
            return None;
        }

        let winner = Side::ALL
            .into_iter()
            .find(|&side| state.score(side) >= self.config.win_score);

        Some(winner.map_or(GameResult::Draw, GameResult::Winner))
    }
}
