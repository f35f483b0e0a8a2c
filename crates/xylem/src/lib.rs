//! xylem - restricted-dialect XML parser with a JSON-compatible projection
//!
//! Parses well-formed documents with a single root element, an optional
//! `<?xml ...?>` declaration, quoted attributes, and element content that is
//! either nested elements or a single text run (never both), then projects
//! the tree into a generic [`Value`].
//!
//! # Quick Start
//!
//! ```
//! use xylem::from_str;
//! # fn main() -> Result<(), xylem::Error> {
//! let value = from_str("<greeting lang=\"en\">hello</greeting>")?;
//! let root = value
//!     .as_object()
//!     .and_then(|obj| obj.get("root"))
//!     .and_then(|v| v.as_object())
//!     .unwrap();
//! assert_eq!(root.get("text").and_then(|v| v.as_string()), Some("hello"));
//! # Ok(())
//! # }
//! ```
//!
//! Unsupported markup (DOCTYPE, namespaces, CDATA, comments, entity
//! references, mixed content) is out of scope. A closing tag whose name does
//! not match its opening tag is reported as a `tracing` warning and parsing
//! continues; truncated input fails with [`ErrorKind::UnexpectedEof`].

#![forbid(unsafe_code)]

use std::future::Future;

pub mod error;
pub use error::{Error, ErrorKind, Result};

pub mod cursor;
pub use cursor::Cursor;

pub mod attr;
pub use attr::AttrList;

pub mod model;
pub use model::{Document, Element, ElementId};

pub mod parser;
pub use parser::Parser;

pub mod value;
pub use value::{Array, Object, Value};

pub mod project;
pub mod json;

/// Parse an XML document and project it to a value
pub fn from_str(s: &str) -> Result<Value> {
    from_bytes(s.as_bytes())
}

/// Parse an XML document from bytes and project it to a value
pub fn from_bytes(bytes: &[u8]) -> Result<Value> {
    let doc = parse_document_bytes(bytes)?;
    Ok(project::to_value(&doc))
}

/// Parse an XML document into its tree form without projecting
pub fn parse_document(s: &str) -> Result<Document> {
    parse_document_bytes(s.as_bytes())
}

/// Parse an XML document from bytes into its tree form
pub fn parse_document_bytes(bytes: &[u8]) -> Result<Document> {
    let mut parser = Parser::new(bytes);
    parser.parse()
}

/// Await a deferred source of document text, then parse and project it.
///
/// The only suspension point is resolving the source; parsing itself runs
/// synchronously once the text is available.
pub async fn from_pending<F>(source: F) -> Result<Value>
where
    F: Future<Output = String>,
{
    let text = source.await;
    from_str(&text)
}
