//! JSON rendering of projected values

use crate::value::Value;

/// Serialize a value to compact JSON
pub fn to_json_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => format!("\"{}\"", escape_json(s)),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_json_string).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(obj) => {
            let pairs: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", escape_json(k), to_json_string(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

/// Serialize a value to JSON with two-space indentation
pub fn to_json_string_pretty(value: &Value) -> String {
    render_pretty(value, 0)
}

fn render_pretty(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let inner_pad = "  ".repeat(indent + 1);
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let items: Vec<String> = arr
                .iter()
                .map(|v| format!("{inner_pad}{}", render_pretty(v, indent + 1)))
                .collect();
            format!("[\n{}\n{pad}]", items.join(",\n"))
        }
        Value::Object(obj) if !obj.is_empty() => {
            let pairs: Vec<String> = obj
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{inner_pad}\"{}\": {}",
                        escape_json(k),
                        render_pretty(v, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{pad}}}", pairs.join(",\n"))
        }
        _ => to_json_string(value),
    }
}

fn escape_json(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            ch if ch.is_control() => {
                result.push_str(&format!("\\u{:04x}", u32::from(ch)));
            }
            ch => result.push(ch),
        }
    }
    result
}
