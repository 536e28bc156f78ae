use serde_json::Value;

use super::FormatError;
use crate::record::BookmarkRecord;

/// Flatten a Chrome bookmark-tree export into records.
///
/// Folders nest arbitrarily under `roots`; every object tagged
/// `"type": "url"` becomes one record, emitted in pre-order so the source
/// ordering carries through. Wrong-shaped nodes are skipped, not raised:
/// partial or hand-edited exports still yield what they can.
pub fn parse(content: &str) -> Result<Vec<BookmarkRecord>, FormatError> {
    let data: Value = serde_json::from_str(content)?;
    let mut records = Vec::new();
    if let Some(roots) = data.get("roots") {
        walk(roots, &mut records);
    }
    Ok(records)
}

fn walk(node: &Value, out: &mut Vec<BookmarkRecord>) {
    match node {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("url") {
                let url = map.get("url").and_then(Value::as_str).unwrap_or("");
                let name = match map.get("name").and_then(Value::as_str) {
                    Some(n) if !n.is_empty() => n,
                    _ => url,
                };
                out.push(BookmarkRecord::new(name, url));
            }
            for value in map.values() {
                if value.is_object() || value.is_array() {
                    walk(value, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, out);
            }
        }
        _ => {}
    }
}
