//! Line framing for the serial command link.
//!
//! Bytes are accumulated until `\r` or `\n`. A `\n` directly after `\r` is
//! part of the same terminator and is swallowed. Empty lines are ignored and
//! a line that outgrows the buffer is abandoned.

use crate::config::MAX_LINE_LEN;
use crate::error::FrameError;
use heapless::Vec;

/// A complete line, terminator excluded.
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Incremental line assembler.
pub struct LineFramer {
    buf: Line,
    skip_lf: bool,
}

impl LineFramer {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            skip_lf: false,
        }
    }

    /// Feeds one byte.
    ///
    /// # Returns
    /// * `None` - the byte was buffered, absorbed or ended an empty line
    /// * `Some(Ok(line))` - a terminator completed a non-empty line
    /// * `Some(Err(FrameError::TooLong))` - the line overflowed and was
    ///   discarded together with this byte
    pub fn push(&mut self, byte: u8) -> Option<Result<Line, FrameError>> {
        match byte {
            b'\r' => {
                self.skip_lf = true;
                self.take_line()
            }
            b'\n' if self.skip_lf => {
                self.skip_lf = false;
                None
            }
            b'\n' => self.take_line(),
            _ => {
                self.skip_lf = false;
                if self.buf.push(byte).is_err() {
                    self.buf.clear();
                    return Some(Err(FrameError::TooLong));
                }
                None
            }
        }
    }

    /// Bytes buffered for the current line.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    /// Drops any partially received line.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.skip_lf = false;
    }

    fn take_line(&mut self) -> Option<Result<Line, FrameError>> {
        if self.buf.is_empty() {
            return None;
        }
        let line = self.buf.clone();
        self.buf.clear();
        Some(Ok(line))
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(framer: &mut LineFramer, bytes: &[u8]) -> std::vec::Vec<Result<Line, FrameError>> {
        bytes.iter().filter_map(|&b| framer.push(b)).collect()
    }

    #[test]
    fn test_lf_terminates_line() {
        let mut framer = LineFramer::new();
        let events = feed(&mut framer, b"1 505\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().as_slice(), b"1 505");
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let mut framer = LineFramer::new();
        let events = feed(&mut framer, b"4\r\n0\r\n");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].as_ref().unwrap().as_slice(), b"4");
        assert_eq!(events[1].as_ref().unwrap().as_slice(), b"0");
    }

    #[test]
    fn test_lone_cr_terminates_line() {
        let mut framer = LineFramer::new();
        let events = feed(&mut framer, b"4\r4\r");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_lf_after_cr_is_absorbed_only_once() {
        let mut framer = LineFramer::new();
        // The second \n is a real (empty) line break and produces nothing
        assert!(feed(&mut framer, b"\r\n\n").is_empty());
        // After "\r\n", a following line still frames normally
        let events = feed(&mut framer, b"4\n");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_empty_lines_produce_nothing() {
        let mut framer = LineFramer::new();
        assert!(feed(&mut framer, b"\n\n\r\r\n").is_empty());
    }

    #[test]
    fn test_max_length_line_dispatches() {
        let mut framer = LineFramer::new();
        let payload = [b'a'; MAX_LINE_LEN];
        assert!(feed(&mut framer, &payload).is_empty());
        let events = feed(&mut framer, b"\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().len(), MAX_LINE_LEN);
    }

    #[test]
    fn test_overflow_discards_and_restarts() {
        let mut framer = LineFramer::new();
        let payload = [b'a'; MAX_LINE_LEN];
        assert!(feed(&mut framer, &payload).is_empty());

        // The 20th byte overflows
        assert_eq!(framer.push(b'b'), Some(Err(FrameError::TooLong)));
        assert!(framer.pending().is_empty());

        // Following bytes start a fresh line
        let events = feed(&mut framer, b"4\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().as_slice(), b"4");
    }

    #[test]
    fn test_reset_drops_partial_line() {
        let mut framer = LineFramer::new();
        feed(&mut framer, b"1 50");
        framer.reset();
        let events = feed(&mut framer, b"4\n");
        assert_eq!(events[0].as_ref().unwrap().as_slice(), b"4");
    }
}
