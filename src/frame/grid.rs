//! Fixed-size character grid.
//!
//! Writes that would not fit inside the row are dropped whole, so the
//! encoder can never fail.

use std::fmt;

use super::layout::{HEIGHT, WIDTH};

/// A 40x19 grid of ASCII characters, space-filled.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    cells: [[u8; WIDTH]; HEIGHT],
}

impl Frame {
    /// Create an all-space frame.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            cells: [[b' '; WIDTH]; HEIGHT],
        }
    }

    /// Write `text` starting at (`row`, `column`).
    ///
    /// No-op if the row does not exist, the text does not fit before the
    /// right edge, or it is not ASCII.
    pub fn put_str(&mut self, row: usize, column: usize, text: &str) {
        let Some(line) = self.cells.get_mut(row) else {
            return;
        };
        if !text.is_ascii() || column + text.len() > WIDTH {
            return;
        }
        line[column..column + text.len()].copy_from_slice(text.as_bytes());
    }

    /// Write one character at (`row`, `column`), clipped like `put_str`.
    pub fn put_char(&mut self, row: usize, column: usize, ch: char) {
        let mut buf = [0u8; 4];
        self.put_str(row, column, ch.encode_utf8(&mut buf));
    }

    /// Character at (`row`, `column`), if inside the grid.
    #[must_use]
    pub fn char_at(&self, row: usize, column: usize) -> Option<char> {
        self.cells.get(row)?.get(column).map(|&b| b as char)
    }

    /// One row as text.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&str> {
        // Cells only ever hold ASCII
        self.cells.get(row).and_then(|line| std::str::from_utf8(line).ok())
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().filter_map(|line| std::str::from_utf8(line).ok())
    }

    /// Wire form: 19 lines of 40 characters, each newline-terminated.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let mut out = String::with_capacity(HEIGHT * (WIDTH + 1));
        for row in self.rows() {
            out.push_str(row);
            out.push('\n');
        }
        out
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame_shape() {
        let frame = Frame::blank();
        let wire = frame.to_wire();
        let lines: Vec<&str> = wire.lines().collect();

        assert_eq!(lines.len(), HEIGHT);
        assert!(lines.iter().all(|l| l.len() == WIDTH && l.trim().is_empty()));
        assert!(wire.ends_with('\n'));
    }

    #[test]
    fn test_put_str_fits() {
        let mut frame = Frame::blank();
        frame.put_str(3, 36, "[9]");

        assert_eq!(frame.char_at(3, 36), Some('['));
        assert_eq!(frame.char_at(3, 38), Some(']'));
        assert_eq!(frame.char_at(3, 39), Some(' '));
    }

    #[test]
    fn test_put_str_clips_whole_text() {
        let mut frame = Frame::blank();
        frame.put_str(0, 38, "abc");
        frame.put_str(HEIGHT, 0, "x");
        frame.put_str(1, 0, "é");

        assert_eq!(frame, Frame::blank());
    }

    #[test]
    fn test_put_str_exact_fit() {
        let mut frame = Frame::blank();
        frame.put_str(2, 37, "abc");
        assert_eq!(frame.row(2).unwrap().trim_start(), "abc");
    }

    #[test]
    fn test_put_char() {
        let mut frame = Frame::blank();
        frame.put_char(5, 38, 'v');
        frame.put_char(5, WIDTH, 'x');
        assert_eq!(frame.char_at(5, 38), Some('v'));
        assert_eq!(frame.char_at(5, WIDTH), None);
    }
}
