//! # coexistence
//!
//! A two-player card duel played over a plain text protocol.
//!
//! ## Design Principles
//!
//! 1. **One Owner Per Duel**: Each duel owns its `GameState` outright. The
//!    session reads only from the side whose turn it is, so no state is
//!    shared or locked.
//!
//! 2. **The Frame Is The Protocol**: Clients receive nothing but a 40x19
//!    character grid. `frame::layout` is its address table; `encode` and
//!    `decode` are exact inverses for every field a frame shows.
//!
//! 3. **Rejections Are Not Errors**: A bad command only changes the log
//!    line. Transport failures are the only thing that ends a duel early.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, rule thresholds, commands, duel state
//! - `cards`: Card kinds, combat table, hands, deck
//! - `rules`: Turn state machine (`DuelRules`)
//! - `frame`: Grid encoder, decoder and line assembler
//! - `session`: Per-duel dispatch loop over two peers
//! - `server`: TCP accept-and-pair loop and its configuration
//! - `client`: Terminal client with local command checks

pub mod core;
pub mod cards;
pub mod rules;
pub mod frame;
pub mod session;
pub mod server;
pub mod client;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    GameRng,
    RulesConfig, Command, CommandError,
    GameState,
};

pub use crate::cards::{CardKind, Deck, Hand};

pub use crate::rules::{DuelRules, Event, GameResult, Outcome, Rejection, RulesEngine};

pub use crate::frame::{decode, encode, Frame, FrameAssembler, FrameView, Verdict};

pub use crate::session::{Peer, Session, SessionEnd, SessionError};

pub use crate::server::{ConfigError, DuelServer, ServerConfig};

pub use crate::client::{DuelClient, LocalRejection};
