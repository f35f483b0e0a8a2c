//! Recursive-descent document parser
//!
//! A single forward pass over the input bytes: the prolog reader consumes an
//! optional `<?xml ...?>` declaration, the cursor seeks the first `<`, and
//! the element builder recurses from the root. Elements are pushed into the
//! document arena in creation order.

use indexmap::IndexMap;
use tracing::warn;

use crate::attr::read_attributes;
use crate::cursor::{is_control, Cursor, CLOSING_TAG_OVERHEAD, XML_DECL_OPEN};
use crate::error::{Error, ErrorKind, Result};
use crate::model::{Document, Element, ElementId};

/// XML parser. One-shot: build a new parser per document.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    elements: Vec<Element>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over raw input bytes
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            elements: Vec::new(),
        }
    }

    /// Parse the document: optional prolog, then exactly one root element
    pub fn parse(&mut self) -> Result<Document> {
        let declaration = self.read_prolog()?;
        self.cursor.seek_element_start()?;
        self.cursor.advance(); // past the `<`
        let root = self.build_element(None)?;

        Ok(Document {
            declaration,
            elements: std::mem::take(&mut self.elements),
            root,
        })
    }

    /// Consume the `<?xml ...?>` declaration if present, returning its
    /// attributes; otherwise leave the cursor untouched.
    fn read_prolog(&mut self) -> Result<IndexMap<String, String>> {
        if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'?') {
            self.cursor.advance_by(XML_DECL_OPEN.len());
            let list = read_attributes(&mut self.cursor)?;
            return Ok(list.attributes);
        }
        Ok(IndexMap::new())
    }

    /// Build one element, cursor positioned just past its opening `<`.
    ///
    /// Content is either child elements or a single text run: once a text
    /// run starts, everything up to the next `</` is captured verbatim and
    /// the element is finished, so interleaved markup after text is
    /// swallowed as text rather than recursed into.
    fn build_element(&mut self, parent: Option<ElementId>) -> Result<ElementId> {
        let name = self.read_name()?;
        let list = read_attributes(&mut self.cursor)?;

        let id = ElementId(self.elements.len());
        let mut element = Element::new(name.clone(), list.attributes);
        element.parent = parent;
        self.elements.push(element);

        if list.self_closing {
            return Ok(id);
        }

        loop {
            let Some(b) = self.cursor.current() else {
                return Err(Error::at(
                    ErrorKind::UnexpectedEof {
                        expected: "closing tag",
                    },
                    self.cursor.pos(),
                ));
            };

            if is_control(b) {
                self.cursor.advance();
                continue;
            }

            if b == b'<' && self.cursor.peek(1) == Some(b'/') {
                self.cursor.advance_by(b"</".len());
                let closing = self.read_name()?;
                if closing != name {
                    let offset = self.cursor.pos();
                    warn!(
                        "closing tag \"{closing}\" did not match opening tag \
                         \"{name}\" at offset {offset}"
                    );
                }
                self.cursor.advance(); // past the closing `>`
                return Ok(id);
            }

            if b == b'<' {
                self.cursor.advance(); // past the child's `<`
                let child = self.build_element(Some(id))?;
                if let Some(parent_element) = self.elements.get_mut(id.0) {
                    parent_element.children.push(child);
                }
                continue;
            }

            // First non-separator byte that is not markup: the element's
            // content is a single text run.
            let text = self.read_text_run(name.len())?;
            if let Some(element) = self.elements.get_mut(id.0) {
                element.text = text;
            }
            return Ok(id);
        }
    }

    /// Scan a tag name: bytes up to the next separator or `>`.
    /// Used for opening and closing tags alike; the cursor is left at the
    /// terminating byte.
    fn read_name(&mut self) -> Result<String> {
        let mut name = Vec::new();
        loop {
            match self.cursor.current() {
                Some(b) if is_control(b) || b == b'>' => {
                    return into_utf8(name, self.cursor.pos());
                }
                Some(b) => {
                    name.push(b);
                    self.cursor.advance();
                }
                None => {
                    return Err(Error::at(
                        ErrorKind::UnexpectedEof {
                            expected: "name terminator",
                        },
                        self.cursor.pos(),
                    ))
                }
            }
        }
    }

    /// Capture a verbatim text run up to the element's closing tag, then
    /// jump the cursor past `</`, the opening tag's name, and `>`. The
    /// closing name is not re-scanned here.
    fn read_text_run(&mut self, name_len: usize) -> Result<String> {
        let mut text = Vec::new();
        loop {
            match self.cursor.current() {
                Some(b'<') if self.cursor.peek(1) == Some(b'/') => {
                    self.cursor.advance_by(CLOSING_TAG_OVERHEAD + name_len);
                    return into_utf8(text, self.cursor.pos());
                }
                Some(b) => {
                    text.push(b);
                    self.cursor.advance();
                }
                None => {
                    return Err(Error::at(
                        ErrorKind::UnexpectedEof {
                            expected: "closing tag",
                        },
                        self.cursor.pos(),
                    ))
                }
            }
        }
    }
}

fn into_utf8(bytes: Vec<u8>, offset: usize) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| Error::at(ErrorKind::InvalidUtf8, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input.as_bytes()).parse()
    }

    #[test]
    fn test_bare_root() -> Result<()> {
        let doc = parse("<root></root>")?;
        assert_eq!(doc.root().name, "root");
        assert!(doc.root().text.is_empty());
        assert!(doc.root().children.is_empty());
        assert!(doc.declaration().is_empty());
        Ok(())
    }

    #[test]
    fn test_prolog_attributes() -> Result<()> {
        let doc = parse("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root></root>")?;
        assert_eq!(doc.declaration().get("version"), Some(&"1.0".to_string()));
        assert_eq!(doc.declaration().get("encoding"), Some(&"UTF-8".to_string()));
        assert_eq!(doc.root().name, "root");
        Ok(())
    }

    #[test]
    fn test_self_closing_root() -> Result<()> {
        let doc = parse("<item key=\"x\"/>")?;
        assert_eq!(doc.root().name, "item");
        assert_eq!(doc.root().attributes.get("key"), Some(&"x".to_string()));
        assert!(doc.root().children.is_empty());
        assert!(doc.root().text.is_empty());
        Ok(())
    }

    #[test]
    fn test_bare_self_closing_keeps_slash_in_name() -> Result<()> {
        // Name scanning stops only at separator bytes or `>`, so without a
        // space before `/>` the slash lands in the name. Matches the
        // demonstrated behavior of the dialect.
        let doc = parse("<br/>")?;
        assert_eq!(doc.root().name, "br/");
        assert!(doc.root().children.is_empty());
        Ok(())
    }

    #[test]
    fn test_text_content() -> Result<()> {
        let doc = parse("<greeting>hello world</greeting>")?;
        assert_eq!(doc.root().text, "hello world");
        assert!(doc.root().children.is_empty());
        Ok(())
    }

    #[test]
    fn test_nested_children_in_order() -> Result<()> {
        let doc = parse("<root>\n  <a>1</a>\n  <b />\n  <c>3</c>\n</root>")?;
        let root = doc.root();
        let names: Vec<&str> = root
            .children
            .iter()
            .map(|&id| doc[id].name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(doc[root.children[0]].text, "1");
        assert!(root.text.is_empty());
        Ok(())
    }

    #[test]
    fn test_parent_back_references() -> Result<()> {
        let doc = parse("<root><child><leaf /></child></root>")?;
        let root_id = doc.root_id();
        let child_id = doc.root().children[0];
        let leaf_id = doc[child_id].children[0];
        assert_eq!(doc.root().parent, None);
        assert_eq!(doc[child_id].parent, Some(root_id));
        assert_eq!(doc[leaf_id].parent, Some(child_id));
        Ok(())
    }

    #[test]
    fn test_mismatched_closing_tag_is_non_fatal() -> Result<()> {
        // Structure follows the opening tag; only a warning is emitted.
        let doc = parse("<a><b></a></b>")?;
        assert_eq!(doc.root().name, "a");
        assert_eq!(doc.root().children.len(), 1);
        assert_eq!(doc[doc.root().children[0]].name, "b");
        Ok(())
    }

    #[test]
    fn test_text_run_swallows_trailing_markup() -> Result<()> {
        // Mixed content is unsupported: once text starts, markup before the
        // next `</` is captured as literal text.
        let doc = parse("<p>before <b>bold</b> after</p>")?;
        assert_eq!(doc.root().text, "before <b>bold");
        assert!(doc.root().children.is_empty());
        Ok(())
    }

    #[test]
    fn test_truncated_input_is_error() {
        for input in ["<root>", "<root", "<root><child></chi", "<?xml version=\"1.0\""] {
            let err = parse(input).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::UnexpectedEof { .. }),
                "expected eof error for {input:?}, got {err}"
            );
        }
    }

    #[test]
    fn test_multibyte_text_preserved() -> Result<()> {
        let doc = parse("<t>héllo wörld</t>")?;
        assert_eq!(doc.root().text, "héllo wörld");
        Ok(())
    }

    #[test]
    fn test_leading_whitespace_before_root() -> Result<()> {
        let doc = parse("\n\n  <root></root>")?;
        assert_eq!(doc.root().name, "root");
        Ok(())
    }
}
