//! TCP accept loop.
//!
//! Connections are paired in arrival order: the first of a pair plays
//! side 0, the second side 1. Every pair gets its own task, so duels run
//! in parallel and share nothing.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

use super::config::ServerConfig;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::rules::DuelRules;
use crate::session::{Peer, Session};

/// First wait after a failed accept.
const ACCEPT_BACKOFF_BASE: Duration = Duration::from_millis(50);
/// Longest wait between accept retries.
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(2);

/// Listening duel server.
pub struct DuelServer {
    config: ServerConfig,
    listener: TcpListener,
    duels_started: u64,
}

impl DuelServer {
    /// Bind the configured address.
    pub async fn bind(config: ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        info!(addr = %listener.local_addr()?, "duel server listening");
        Ok(Self {
            config,
            listener,
            duels_started: 0,
        })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept pairs forever.
    pub async fn run(mut self) -> io::Result<()> {
        loop {
            let first = self.accept_one().await;
            info!(peer = %first.1, "waiting for an opponent");
            let second = self.accept_one().await;
            self.spawn_duel(first, second);
        }
    }

    /// Accept the next connection, retrying failed accepts with backoff.
    async fn accept_one(&self) -> (TcpStream, SocketAddr) {
        let mut failures = 0;
        loop {
            match self.listener.accept().await {
                Ok(accepted) => return accepted,
                Err(error) => {
                    let delay = accept_backoff(failures);
                    warn!(%error, retry_in = ?delay, "accept failed");
                    tokio::time::sleep(delay).await;
                    failures = failures.saturating_add(1);
                }
            }
        }
    }

    /// Start one duel on its own task.
    pub fn spawn_duel(
        &mut self,
        (first, first_addr): (TcpStream, SocketAddr),
        (second, second_addr): (TcpStream, SocketAddr),
    ) -> JoinHandle<()> {
        let id = self.duels_started;
        self.duels_started += 1;

        let rng = match self.config.seed {
            Some(base) => GameRng::new(base.wrapping_add(id)),
            None => GameRng::from_entropy(),
        };
        let state = GameState::with_rng(rng);

        let mut session = Session::new(
            DuelRules::new(self.config.rules),
            state,
            peer(first),
            peer(second),
        )
        .with_grace_period(self.config.grace_period());

        let span = info_span!("duel", id, first = %first_addr, second = %second_addr);
        tokio::spawn(
            async move {
                // Outcome is already logged by the session
                let _ = session.run().await;
            }
            .instrument(span),
        )
    }
}

/// Wait before the next accept after `failures` failures in a row.
fn accept_backoff(failures: u32) -> Duration {
    ACCEPT_BACKOFF_BASE
        .saturating_mul(1 << failures.min(6))
        .min(ACCEPT_BACKOFF_MAX)
}

fn peer(
    stream: TcpStream,
) -> Peer<BufReader<tokio::net::tcp::OwnedReadHalf>, tokio::net::tcp::OwnedWriteHalf> {
    let (read, write) = stream.into_split();
    Peer::new(BufReader::new(read), write)
}
