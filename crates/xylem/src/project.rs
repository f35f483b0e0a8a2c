//! Tree-to-value projection
//!
//! Post-order walk over a parsed [`Document`] producing the output shape
//! `{ xml: <declaration>, root: <element> }`. Per element, `name` is always
//! present; `text`, `attributes` and `children` appear only when non-empty.

use indexmap::IndexMap;

use crate::model::{Document, Element};
use crate::value::{Array, Object, Value};

/// Project a document into its output value.
///
/// Pure over the document: projecting twice yields structurally identical
/// values.
pub fn to_value(doc: &Document) -> Value {
    let mut data = Object::new();
    data.insert("xml", attributes_to_value(doc.declaration()));
    data.insert("root", element_to_value(doc, doc.root()));
    Value::Object(data)
}

fn element_to_value(doc: &Document, element: &Element) -> Value {
    let mut data = Object::new();
    data.insert("name", element.name.as_str());

    if !element.text.is_empty() {
        data.insert("text", element.text.as_str());
    }

    if !element.attributes.is_empty() {
        data.insert("attributes", attributes_to_value(&element.attributes));
    }

    if !element.children.is_empty() {
        let children: Array = element
            .children
            .iter()
            .map(|&id| element_to_value(doc, &doc[id]))
            .collect();
        data.insert("children", children);
    }

    Value::Object(data)
}

fn attributes_to_value(attributes: &IndexMap<String, String>) -> Value {
    let mut data = Object::new();
    for (key, value) in attributes {
        data.insert(key.as_str(), value.as_str());
    }
    Value::Object(data)
}
