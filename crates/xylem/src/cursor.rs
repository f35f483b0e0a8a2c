//! Byte cursor for single-pass input scanning

use crate::error::{Error, ErrorKind, Result};

/// Opening marker of the XML declaration; the prolog reader skips exactly
/// this many bytes before handing off to the attribute reader.
pub const XML_DECL_OPEN: &[u8] = b"<?xml";

/// Bytes a closing tag adds around its name (`</` before, `>` after).
pub const CLOSING_TAG_OVERHEAD: usize = b"</".len() + b">".len();

/// Returns true for bytes below 33: ASCII control codes plus space.
/// These act as insignificant separators between markup constructs.
pub const fn is_control(b: u8) -> bool {
    b < 33
}

/// Cursor over raw input bytes with a single advancing offset
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create cursor from byte slice
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Get current byte without consuming
    pub fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at byte ahead without consuming
    pub fn peek(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.pos.saturating_add(ahead)).copied()
    }

    /// Byte immediately before the current position, if any
    pub fn previous(&self) -> Option<u8> {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.input.get(idx).copied())
    }

    /// Advance cursor by one byte
    pub fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    /// Advance cursor by several bytes, clamped to the end of input
    pub fn advance_by(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count).min(self.input.len());
    }

    /// Get current position index
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Check if at end of input
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Skip insignificant separator bytes (below 33)
    pub fn skip_control(&mut self) {
        while let Some(b) = self.current() {
            if is_control(b) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advance one byte at a time until `<` is current.
    /// Used once per document, to move past any pre-root content.
    pub fn seek_element_start(&mut self) -> Result<()> {
        loop {
            match self.current() {
                Some(b'<') => return Ok(()),
                Some(_) => self.advance(),
                None => {
                    return Err(Error::at(
                        ErrorKind::UnexpectedEof {
                            expected: "element start",
                        },
                        self.pos,
                    ))
                }
            }
        }
    }
}
