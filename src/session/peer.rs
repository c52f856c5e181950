//! One connected side of a duel.
//!
//! The session needs exactly two things from a transport: read one command
//! line, write one frame. `Peer` wraps any buffered reader and writer pair,
//! so TCP halves and in-memory pipes work the same.
//!
//! Command lines are read as raw bytes. Bytes that are not UTF-8 become
//! replacement characters and a line longer than [`MAX_LINE_BYTES`] is cut
//! there, with the rest of it skipped. Either way the rules see a bad
//! command, never a transport error.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::frame::Frame;

/// Longest command line kept, in bytes.
pub const MAX_LINE_BYTES: u64 = 256;

/// Line-oriented duplex connection to one side.
#[derive(Debug)]
pub struct Peer<R, W> {
    reader: R,
    writer: W,
    line: Vec<u8>,
}

impl<R, W> Peer<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wrap a reader/writer pair.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: Vec::new(),
        }
    }

    /// Read the next command line without its line ending.
    ///
    /// Returns `Ok(None)` once the peer closed its side of the stream.
    pub async fn read_command(&mut self) -> io::Result<Option<String>> {
        self.line.clear();
        let read = (&mut self.reader)
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', &mut self.line)
            .await?;
        if read == 0 {
            return Ok(None);
        }
        if !self.line.ends_with(b"\n") && read as u64 == MAX_LINE_BYTES {
            debug!(limit = MAX_LINE_BYTES, "command line cut");
            self.skip_line().await?;
        }

        let text = String::from_utf8_lossy(&self.line);
        Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Discard input up to and including the next newline.
    async fn skip_line(&mut self) -> io::Result<()> {
        loop {
            let (found, used) = {
                let available = self.reader.fill_buf().await?;
                if available.is_empty() {
                    return Ok(());
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(end) => (true, end + 1),
                    None => (false, available.len()),
                }
            };
            self.reader.consume(used);
            if found {
                return Ok(());
            }
        }
    }

    /// Send one frame and flush it.
    pub async fn send_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.writer.write_all(frame.to_wire().as_bytes()).await?;
        self.writer.flush().await
    }

    /// Close the write side. The read side closes when the peer is dropped.
    pub async fn shutdown(&mut self) -> io::Result<()> {
        self.writer.shutdown().await
    }
}
