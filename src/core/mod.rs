//! Core duel types: sides, RNG, rule thresholds, commands and state.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Side, SideMap};
pub use rng::GameRng;
pub use config::{RulesConfig, HAND_SLOTS, COPIES_PER_KIND};
pub use action::{Command, CommandError, PASS_COMMAND, column_to_index, index_to_column};
pub use state::GameState;
