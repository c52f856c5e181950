//! Turn state machine for the duel.
//!
//! `RulesEngine` is the seam the session drives:
//! - Apply a command for a side
//! - Report whether the duel is over
//!
//! `DuelRules` is the one implementation. The session never inspects
//! combat or round logic directly.

pub mod engine;

pub use engine::{
    DuelRules, Event, GameResult, Outcome, Rejection, RulesEngine, DRAW_MESSAGE,
    NEW_ROUND_MESSAGE, PASSED_MESSAGE,
};
