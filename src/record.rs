use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A flattened bookmark. Folder structure from the source is discarded;
/// this pair is the only thing that moves through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub name: String,
    pub url: String,
}

impl BookmarkRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Identity key for dedup: URL wins over display name. Distinct titles
    /// pointing at the same URL collapse; same title with different URLs
    /// stay distinct.
    pub fn identity_key(&self) -> &str {
        if self.url.is_empty() {
            &self.name
        } else {
            &self.url
        }
    }
}

/// Drop later records sharing an identity key. First occurrence in
/// traversal order wins; duplicates are dropped without warning.
pub fn dedupe(records: Vec<BookmarkRecord>) -> Vec<BookmarkRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        if seen.contains(record.identity_key()) {
            continue;
        }
        seen.insert(record.identity_key().to_string());
        out.push(record);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, url: &str) -> BookmarkRecord {
        BookmarkRecord::new(name, url)
    }

    #[test]
    fn first_seen_wins() {
        let out = dedupe(vec![
            rec("GH", "https://github.com/x"),
            rec("GitHub", "https://github.com/x"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "GH");
    }

    #[test]
    fn url_identity_dominates_name() {
        // Same title, different URLs: both survive.
        let out = dedupe(vec![
            rec("Docs", "https://a.example/"),
            rec("Docs", "https://b.example/"),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn empty_url_falls_back_to_name() {
        let out = dedupe(vec![
            rec("Untitled", ""),
            rec("Untitled", ""),
            rec("Other", ""),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "Untitled");
        assert_eq!(out[1].name, "Other");
    }

    #[test]
    fn all_empty_keys_on_empty_string() {
        // Both name and url empty: key is "" and only the first survives.
        let out = dedupe(vec![rec("", ""), rec("", ""), rec("", "")]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn idempotent_and_length_monotone() {
        let input = vec![
            rec("A", "https://a.example/"),
            rec("B", "https://a.example/"),
            rec("C", "https://c.example/"),
        ];
        let once = dedupe(input.clone());
        assert!(once.len() <= input.len());
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }
}
