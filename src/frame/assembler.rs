//! Regroup a stream of lines into whole frames.
//!
//! A line starting with `/` opens a frame (the top border), a line ending
//! with `/` closes it (the bottom border). Lines outside a frame are
//! dropped. A new top border discards any half-received frame.

/// Incremental frame collector for a line-oriented reader.
#[derive(Clone, Debug, Default)]
pub struct FrameAssembler {
    buffer: String,
    in_frame: bool,
}

impl FrameAssembler {
    /// Create an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (with or without its newline). Returns the complete
    /// frame text once the closing line arrives.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end_matches(['\n', '\r']);

        if line.starts_with('/') {
            self.buffer.clear();
            self.in_frame = true;
        }
        if !self.in_frame {
            return None;
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');

        if line.ends_with('/') {
            self.in_frame = false;
            return Some(std::mem::take(&mut self.buffer));
        }
        None
    }

    /// Check if a frame is partly received.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.in_frame
    }
}
