//! Per-duel dispatch loop.
//!
//! ## Flow
//!
//! 1. Send the opening frame to both sides
//! 2. Read one line from the side whose turn it is, apply it, send both
//!    sides a fresh frame (accepted or rejected)
//! 3. Repeat until the duel is over, then hold the connections for the
//!    grace period
//!
//! Only the current side is ever read, so the state has a single owner and
//! needs no locking. There is no read timeout. Both connections are shut
//! down on every exit path.

use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info, warn};

use super::peer::Peer;
use crate::core::player::{Side, SideMap};
use crate::core::state::GameState;
use crate::frame::encode;
use crate::rules::{GameResult, RulesEngine};

/// Default time both connections stay open after the final frame.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// How a session ended without a transport failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The duel reached a result.
    Finished(GameResult),
    /// A side closed its connection mid-duel. No winner is declared.
    Disconnected(Side),
}

/// Transport failure. Always ends the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read from {side}: {source}")]
    Read {
        side: Side,
        #[source]
        source: io::Error,
    },

    #[error("failed to send frame to {side}: {source}")]
    Write {
        side: Side,
        #[source]
        source: io::Error,
    },
}

/// One duel between two peers.
pub struct Session<E, R, W> {
    rules: E,
    state: GameState,
    peers: SideMap<Peer<R, W>>,
    grace_period: Duration,
}

impl<E, R, W> Session<E, R, W>
where
    E: RulesEngine,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a session. `first` plays side 0, `second` side 1.
    pub fn new(rules: E, state: GameState, first: Peer<R, W>, second: Peer<R, W>) -> Self {
        Self {
            rules,
            state,
            peers: SideMap::from_pair(first, second),
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Set how long to hold the connections after game over.
    #[must_use]
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// The duel state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run the duel to completion, then close both connections.
    pub async fn run(&mut self) -> Result<SessionEnd, SessionError> {
        info!(
            starting = %self.state.current_player(),
            seed = self.state.rng.seed(),
            "duel started"
        );

        let end = self.dispatch().await;
        match &end {
            Ok(SessionEnd::Finished(result)) => info!(?result, "duel finished"),
            Ok(SessionEnd::Disconnected(side)) => info!(%side, "peer disconnected"),
            Err(error) => warn!(%error, "duel aborted"),
        }

        self.close().await;
        end
    }

    async fn dispatch(&mut self) -> Result<SessionEnd, SessionError> {
        self.broadcast().await?;

        loop {
            if let Some(result) = self.rules.is_terminal(&self.state) {
                tokio::time::sleep(self.grace_period).await;
                return Ok(SessionEnd::Finished(result));
            }

            let side = self.state.current_player();
            let line = self.peers[side]
                .read_command()
                .await
                .map_err(|source| SessionError::Read { side, source })?;
            let Some(line) = line else {
                return Ok(SessionEnd::Disconnected(side));
            };

            debug!(%side, command = %line, "command received");
            if let Err(rejection) = self.rules.apply_line(&mut self.state, side, &line) {
                debug!(%side, %rejection, "command refused");
            }

            self.broadcast().await?;
        }
    }

    /// Send every side its own view of the current state.
    async fn broadcast(&mut self) -> Result<(), SessionError> {
        for side in Side::ALL {
            let frame = encode(&self.state, side);
            self.peers[side]
                .send_frame(&frame)
                .await
                .map_err(|source| SessionError::Write { side, source })?;
        }
        Ok(())
    }

    async fn close(&mut self) {
        for side in Side::ALL {
            if let Err(error) = self.peers[side].shutdown().await {
                debug!(%side, %error, "shutdown failed");
            }
        }
    }
}
