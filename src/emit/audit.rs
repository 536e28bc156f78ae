use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use crate::classify::Buckets;

/// The machine-readable mirror of the report: bucket name → ordered record
/// list, plus the `Others` list. Bucket order is preserved in the map.
pub fn index(buckets: &Buckets) -> Value {
    let mut by_name = Map::new();
    for (name, records) in buckets.named() {
        by_name.insert(name.to_string(), json!(records));
    }
    json!({
        "buckets": by_name,
        "others": &buckets.others,
    })
}

pub fn write_index(buckets: &Buckets, path: &Path) -> Result<()> {
    let body = serde_json::to_string_pretty(&index(buckets))?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DEFAULT_ORDER;
    use crate::record::BookmarkRecord;

    fn buckets(records: Vec<BookmarkRecord>) -> Buckets {
        let order: Vec<String> = DEFAULT_ORDER.iter().map(|s| s.to_string()).collect();
        Buckets::partition(records, &order)
    }

    #[test]
    fn index_shape() {
        let idx = index(&buckets(vec![
            BookmarkRecord::new("GH", "https://github.com/x"),
            BookmarkRecord::new("Plain", "https://example.com/"),
        ]));
        assert_eq!(
            idx["buckets"]["40-Tools"],
            json!([{ "name": "GH", "url": "https://github.com/x" }])
        );
        assert_eq!(idx["others"], json!([{ "name": "Plain", "url": "https://example.com/" }]));
        // Every named bucket appears, empty ones as empty lists.
        let map = idx["buckets"].as_object().unwrap();
        assert_eq!(map.len(), DEFAULT_ORDER.len());
        assert_eq!(idx["buckets"]["00-Inbox"], json!([]));
    }

    #[test]
    fn bucket_order_preserved_in_map() {
        let idx = index(&buckets(vec![]));
        let keys: Vec<&String> = idx["buckets"].as_object().unwrap().keys().collect();
        let expected: Vec<String> = DEFAULT_ORDER.iter().map(|s| s.to_string()).collect();
        assert_eq!(keys, expected.iter().collect::<Vec<_>>());
    }

    #[test]
    fn empty_url_records_included() {
        let idx = index(&buckets(vec![BookmarkRecord::new("Untitled", "")]));
        assert_eq!(idx["others"], json!([{ "name": "Untitled", "url": "" }]));
    }

    #[test]
    fn writes_pretty_json_and_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/bookmarks_index.json");
        write_index(&buckets(vec![BookmarkRecord::new("GH", "https://github.com/x")]), &path)
            .unwrap();
        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("{\n"));
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["buckets"]["40-Tools"][0]["name"], "GH");
    }
}
