//! Attribute reader: a small state machine over `key="value"` runs
//!
//! Shared by the prolog reader (`<?xml ... ?>`) and every element opening
//! tag. Scanning stops at `>`, `/>` or `?>`, leaving the cursor just past
//! the terminator.

use indexmap::IndexMap;

use crate::cursor::{is_control, Cursor};
use crate::error::{Error, ErrorKind, Result};

/// Scanner state: either accumulating a key, or accumulating a value
/// delimited by the quote byte recorded when `="` / `='` was seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ReadingKey,
    ReadingValue { quote: u8 },
}

/// Result of scanning one tag's attribute run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrList {
    pub attributes: IndexMap<String, String>,
    pub self_closing: bool,
}

/// Consume `name=value` pairs until a tag terminator.
///
/// Values are captured verbatim between their quotes; there is no escaping,
/// so a value containing its own delimiter terminates early. Separator bytes
/// (below 33) are skipped between pairs but preserved inside values. A `?>`
/// terminates in any state and is never self-closing.
pub fn read_attributes(cursor: &mut Cursor<'_>) -> Result<AttrList> {
    let mut attributes = IndexMap::new();
    let mut key: Vec<u8> = Vec::new();
    let mut value: Vec<u8> = Vec::new();
    let mut state = State::ReadingKey;

    loop {
        let Some(b) = cursor.current() else {
            return Err(Error::at(
                ErrorKind::UnexpectedEof {
                    expected: "tag terminator",
                },
                cursor.pos(),
            ));
        };

        if b == b'?' && cursor.peek(1) == Some(b'>') {
            cursor.advance_by(b"?>".len());
            return Ok(AttrList {
                attributes,
                self_closing: false,
            });
        }

        match state {
            State::ReadingKey => {
                if is_control(b) {
                    cursor.advance();
                    continue;
                }
                if b == b'>' {
                    // A trailing `/` ended up in the pending key accumulator;
                    // uncommitted accumulators are discarded either way.
                    let self_closing = cursor.previous() == Some(b'/');
                    cursor.advance();
                    return Ok(AttrList {
                        attributes,
                        self_closing,
                    });
                }
                if b == b'=' {
                    if let Some(quote @ (b'\'' | b'"')) = cursor.peek(1) {
                        cursor.advance_by(b"=\"".len());
                        state = State::ReadingValue { quote };
                        continue;
                    }
                }
                key.push(b);
                cursor.advance();
            }
            State::ReadingValue { quote } => {
                if b == quote {
                    let name = take_utf8(&mut key, cursor.pos())?;
                    let text = take_utf8(&mut value, cursor.pos())?;
                    attributes.insert(name, text);
                    state = State::ReadingKey;
                    cursor.advance();
                    continue;
                }
                value.push(b);
                cursor.advance();
            }
        }
    }
}

fn take_utf8(buf: &mut Vec<u8>, offset: usize) -> Result<String> {
    String::from_utf8(std::mem::take(buf)).map_err(|_| Error::at(ErrorKind::InvalidUtf8, offset))
}
