//! End-to-end tests for parsing and projection

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{span, Event, Level, Metadata, Subscriber};

use xylem::json::to_json_string;
use xylem::{from_str, parse_document, project, ErrorKind, Value};

/// Minimal subscriber that collects warning messages, so tests can assert
/// on the diagnostic channel without capturing stderr.
#[derive(Clone, Default)]
struct WarningCollector {
    messages: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

impl Subscriber for WarningCollector {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        *metadata.level() == Level::WARN
    }

    fn new_span(&self, _attrs: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _id: &span::Id, _values: &span::Record<'_>) {}

    fn record_follows_from(&self, _id: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut visitor = MessageVisitor { message: None };
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.messages.lock().unwrap().push(message);
        }
    }

    fn enter(&self, _id: &span::Id) {}

    fn exit(&self, _id: &span::Id) {}
}

fn collect_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let collector = WarningCollector::default();
    let messages = Arc::clone(&collector.messages);
    let result = tracing::subscriber::with_default(collector, f);
    let collected = messages.lock().unwrap().clone();
    (result, collected)
}

#[test]
fn bare_root_projects_to_name_only() {
    let value = from_str("<solo></solo>").unwrap();
    assert_eq!(to_json_string(&value), "{\"xml\":{},\"root\":{\"name\":\"solo\"}}");
}

#[test]
fn full_document_example() {
    let value = from_str(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><root a=\"1\"><child>hi</child></root>",
    )
    .unwrap();
    assert_eq!(
        to_json_string(&value),
        "{\"xml\":{\"version\":\"1.0\",\"encoding\":\"UTF-8\"},\
         \"root\":{\"name\":\"root\",\"attributes\":{\"a\":\"1\"},\
         \"children\":[{\"name\":\"child\",\"text\":\"hi\"}]}}"
    );
}

#[test]
fn self_closing_root_has_no_children_key() {
    let value = from_str("<item key=\"x\"/>").unwrap();
    assert_eq!(
        to_json_string(&value),
        "{\"xml\":{},\"root\":{\"name\":\"item\",\"attributes\":{\"key\":\"x\"}}}"
    );
}

#[test]
fn mismatched_closing_tag_warns_once_and_completes() {
    let (result, warnings) = collect_warnings(|| from_str("<a><b></c></a>"));
    let value = result.unwrap();
    assert_eq!(warnings.len(), 1, "expected exactly one warning: {warnings:?}");
    assert!(warnings[0].contains("\"c\""));
    assert!(warnings[0].contains("\"b\""));

    // Structure follows the opening tags.
    let root = value
        .as_object()
        .and_then(|obj| obj.get("root"))
        .and_then(Value::as_object)
        .unwrap();
    assert_eq!(root.get("name"), Some(&"a".into()));
}

#[test]
fn matched_tags_emit_no_warnings() {
    let (result, warnings) = collect_warnings(|| from_str("<a><b></b></a>"));
    result.unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn projection_is_idempotent() {
    let doc = parse_document("<root a=\"1\"><child>hi</child><other /></root>").unwrap();
    let first = project::to_value(&doc);
    let second = project::to_value(&doc);
    assert_eq!(first, second);
}

#[test]
fn other_quote_preserved_verbatim() {
    let value = from_str("<e a=\"it's fine\" b='say \"hi\"'/>").unwrap();
    let attrs = value
        .as_object()
        .and_then(|obj| obj.get("root"))
        .and_then(Value::as_object)
        .and_then(|root| root.get("attributes"))
        .and_then(Value::as_object)
        .unwrap();
    assert_eq!(attrs.get("a"), Some(&"it's fine".into()));
    assert_eq!(attrs.get("b"), Some(&"say \"hi\"".into()));
}

#[test]
fn same_quote_truncates_value() {
    // The embedded delimiter ends the value early; this is a documented
    // limitation with an exact truncation point.
    let doc = parse_document("<e a=\"tru\"ncated\"></e>").unwrap();
    assert_eq!(doc.root().attributes.get("a"), Some(&"tru".to_string()));
    assert_eq!(doc.root().attributes.len(), 1);
}

#[test]
fn whitespace_between_children_is_insignificant() {
    let value = from_str("<root>\n  <a />\n  <b />\n</root>").unwrap();
    let root = value
        .as_object()
        .and_then(|obj| obj.get("root"))
        .and_then(Value::as_object)
        .unwrap();
    assert!(!root.contains_key("text"));
    let children = root.get("children").and_then(Value::as_array).unwrap();
    assert_eq!(children.len(), 2);
}

#[test]
fn whitespace_only_content_projects_to_nothing() {
    let value = from_str("<root>   \n\t </root>").unwrap();
    assert_eq!(to_json_string(&value), "{\"xml\":{},\"root\":{\"name\":\"root\"}}");
}

#[test]
fn truncated_documents_fail_with_eof() {
    for input in ["", "<", "<root", "<root>", "<root>text", "<root><child>"] {
        let err = from_str(input).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::UnexpectedEof { .. }),
            "expected eof error for {input:?}, got {err}"
        );
    }
}

#[test]
fn declaration_without_root_fails() {
    let err = from_str("<?xml version=\"1.0\"?>").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnexpectedEof { .. }));
}
