//! Terminal duel client.
//!
//! Receives frames, decodes them with `FrameView` and prints the raw frame
//! plus a one-line status. Typed commands are checked against the decoded
//! view before they are sent: nothing goes out unless it is the viewer's
//! turn, and a move needs a card in both the chosen own column and the
//! target column. The server re-checks everything.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::core::action::{index_to_column, Command, CommandError};
use crate::core::config::RulesConfig;
use crate::frame::{FrameAssembler, FrameView, Verdict};

/// Why the client refused to send a command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LocalRejection {
    #[error("not a command ({0}); type two columns like AB, or PS to pass")]
    Syntax(#[from] CommandError),

    #[error("the duel is over")]
    GameOver,

    #[error("wait for your turn")]
    NotYourTurn,

    #[error("you have no card in column {0}")]
    EmptyOwnSlot(char),

    #[error("the opponent has no card in column {0}")]
    EmptyTarget(char),
}

/// Check a typed command against the last decoded frame.
pub fn check_command(view: &FrameView, input: &str) -> Result<Command, LocalRejection> {
    let command = Command::parse(input)?;

    if !view.can_act() {
        return Err(if view.game_over {
            LocalRejection::GameOver
        } else {
            LocalRejection::NotYourTurn
        });
    }

    if let Command::Move { from, to } = command {
        if view.own_hand.get(from).is_none() {
            return Err(LocalRejection::EmptyOwnSlot(index_to_column(from).unwrap_or('?')));
        }
        if view.opponent_hand.get(to).is_none() {
            return Err(LocalRejection::EmptyTarget(index_to_column(to).unwrap_or('?')));
        }
    }

    Ok(command)
}

/// One-line summary of a decoded frame.
#[must_use]
pub fn status_line(view: &FrameView) -> String {
    let turn = if view.game_over {
        "game over"
    } else if view.my_turn {
        "your turn"
    } else {
        "opponent's turn"
    };
    format!(
        "Round {} | You {} - {} Opponent | {} | {}",
        view.round, view.own_score, view.opponent_score, turn, view.log
    )
}

/// Client connection to a duel server.
pub struct DuelClient<R, W> {
    server: Lines<R>,
    writer: W,
    assembler: FrameAssembler,
    view: FrameView,
    rules: RulesConfig,
}

impl DuelClient<BufReader<OwnedReadHalf>, OwnedWriteHalf> {
    /// Connect over TCP.
    pub async fn connect(addr: &str) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        info!(%addr, "connected");
        let (read, write) = stream.into_split();
        Ok(Self::new(BufReader::new(read), write))
    }
}

impl<R, W> DuelClient<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wrap an established connection.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            server: reader.lines(),
            writer,
            assembler: FrameAssembler::new(),
            view: FrameView::default(),
            rules: RulesConfig::default(),
        }
    }

    /// Thresholds used to infer game over and the final verdict.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// The last decoded frame.
    pub fn view(&self) -> &FrameView {
        &self.view
    }

    /// Play until the server closes the connection.
    ///
    /// Commands are read from `input`; frames, status lines and local
    /// rejections go to `output`. Returns the final verdict, if the duel
    /// finished.
    pub async fn run<I, O>(&mut self, input: I, mut output: O) -> io::Result<Option<Verdict>>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut input = input.lines();
        let mut input_open = true;

        loop {
            tokio::select! {
                line = self.server.next_line() => {
                    let Some(line) = line? else {
                        output.write_all(b"connection closed\n").await?;
                        output.flush().await?;
                        return Ok(self.view.verdict(&self.rules));
                    };
                    if let Some(frame) = self.assembler.push_line(&line) {
                        self.show_frame(&frame, &mut output).await?;
                    }
                }
                line = input.next_line(), if input_open => {
                    match line? {
                        Some(text) => self.submit(&text, &mut output).await?,
                        None => input_open = false,
                    }
                }
            }
        }
    }

    async fn show_frame<O>(&mut self, frame: &str, output: &mut O) -> io::Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        self.view.apply_with_rules(frame, &self.rules);
        debug!(view = ?self.view, "frame decoded");

        output.write_all(frame.as_bytes()).await?;
        output.write_all(status_line(&self.view).as_bytes()).await?;
        output.write_all(b"\n").await?;
        if let Some(verdict) = self.view.verdict(&self.rules) {
            output.write_all(format!("Game over - {verdict}\n").as_bytes()).await?;
        }
        output.flush().await
    }

    async fn submit<O>(&mut self, text: &str, output: &mut O) -> io::Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        if text.trim().is_empty() {
            return Ok(());
        }
        match check_command(&self.view, text) {
            Ok(command) => {
                let wire = command.to_wire();
                debug!(command = %wire, "sending");
                self.writer.write_all(format!("{wire}\n").as_bytes()).await?;
                self.writer.flush().await
            }
            Err(rejection) => {
                output.write_all(format!("{rejection}\n").as_bytes()).await?;
                output.flush().await
            }
        }
    }
}
