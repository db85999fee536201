//! Input line editor
//!
//! Accumulates bytes from the serial stream into a fixed buffer with
//! backspace editing. The buffer is always NUL terminated within
//! `MAX_CHARS + 1` bytes.

/// Maximum number of characters in one command line
pub const MAX_CHARS: usize = 80;

const BACKSPACE: u8 = 8;
const CARRIAGE_RETURN: u8 = 13;
const DELETE: u8 = 127;

/// Result of feeding one byte to the line editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEvent {
    /// More bytes are needed
    Pending,
    /// The line is complete (CR received or buffer full)
    Complete,
}

/// Bounded command line buffer
#[derive(Clone)]
pub struct InputLine {
    buffer: [u8; MAX_CHARS + 1],
    len: usize,
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for InputLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("InputLine").field(&self.as_str()).finish()
    }
}

impl InputLine {
    /// Create an empty line
    pub const fn new() -> Self {
        Self {
            buffer: [0; MAX_CHARS + 1],
            len: 0,
        }
    }

    /// Build a line from text, as if typed and terminated with CR
    ///
    /// Bytes the editor would drop are dropped; text beyond capacity is cut.
    pub fn from_text(text: &str) -> Self {
        let mut line = Self::new();
        for &byte in text.as_bytes() {
            if line.push(byte) == LineEvent::Complete {
                break;
            }
        }
        line
    }

    /// Discard the contents so the buffer can be reused for the next line
    pub fn clear(&mut self) {
        self.buffer = [0; MAX_CHARS + 1];
        self.len = 0;
    }

    /// Feed one received byte
    ///
    /// - Backspace (8) or DEL (127) removes the last byte, if any
    /// - CR (13) completes the line
    /// - Other control bytes and non-ASCII bytes are ignored
    /// - Printable bytes are appended; reaching capacity completes the line
    pub fn push(&mut self, byte: u8) -> LineEvent {
        match byte {
            BACKSPACE | DELETE => {
                if self.len > 0 {
                    self.len -= 1;
                    self.buffer[self.len] = 0;
                }
                LineEvent::Pending
            }
            CARRIAGE_RETURN => LineEvent::Complete,
            b' '..=b'~' if self.len >= MAX_CHARS => LineEvent::Complete,
            b' '..=b'~' => {
                self.buffer[self.len] = byte;
                self.len += 1;
                if self.len == MAX_CHARS {
                    LineEvent::Complete
                } else {
                    LineEvent::Pending
                }
            }
            _ => LineEvent::Pending,
        }
    }

    /// Number of buffered characters
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no characters are buffered
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Buffered bytes, excluding the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// Buffered text
    ///
    /// Only printable ASCII is ever stored, so this is always valid UTF-8.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[..self.len]
    }

    /// Check the terminator invariant
    pub fn is_terminated(&self) -> bool {
        self.buffer[self.len] == 0
    }
}
