//! Document tree produced by the parser
//!
//! Elements live in a flat arena owned by the [`Document`]; parent and child
//! links are arena indices, so back-references never form ownership cycles.

use indexmap::IndexMap;
use std::ops::Index;

/// Index of an element in its document's arena
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementId(pub(crate) usize);

/// One tag and its content.
///
/// Content is exclusive: a built element carries child elements or a single
/// text run, never both. The parser's control flow guarantees this rather
/// than any validation here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub attributes: IndexMap<String, String>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(name: String, attributes: IndexMap<String, String>) -> Self {
        Self {
            name,
            text: String::new(),
            attributes,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A parsed document: declaration attributes plus exactly one root element.
/// Constructed once per parse and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub(crate) declaration: IndexMap<String, String>,
    pub(crate) elements: Vec<Element>,
    pub(crate) root: ElementId,
}

impl Document {
    /// Attributes of the `<?xml ...?>` declaration, empty if absent
    pub fn declaration(&self) -> &IndexMap<String, String> {
        &self.declaration
    }

    /// The root element
    pub fn root(&self) -> &Element {
        &self[self.root]
    }

    /// Id of the root element
    pub const fn root_id(&self) -> ElementId {
        self.root
    }

    /// Resolve an element id, None if it belongs to another document
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Number of elements in the document
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// A document always has a root, so this is never true; kept for
    /// symmetry with the container API conventions.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Index<ElementId> for Document {
    type Output = Element;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, id: ElementId) -> &Self::Output {
        &self.elements[id.0]
    }
}
