use std::collections::HashMap;

use url::Url;

use crate::record::BookmarkRecord;

/// Fixed bucket order. `Others` is the implicit catch-all, never part of this
/// list, and always rendered last. Several buckets have no routing rule yet
/// and stay empty; they still render so the layout is stable.
pub const DEFAULT_ORDER: &[&str] = &[
    "00-Inbox",
    "10-Work",
    "20-School",
    "30-Research",
    "40-Tools",
    "50-Finance",
    "60-Read-Later",
    "70-Personal",
    "90-Archive",
];

pub const OTHERS: &str = "Others";

// Routing tables: case-sensitive, unanchored substring over the URL
// authority. Known over-matchers ("edu" inside any domain, "finance" inside
// an unrelated path word) are kept as-is; the rules are a crude heuristic,
// not a registry.
const TOOL_HOSTS: &[&str] = &["github.com", "gitlab.com"];
const SCHOOL_HOSTS: &[&str] = &["edu", "udrive", "udel.edu"];
const RESEARCH_HOSTS: &[&str] = &["medium.com", "x.com", "twitter.com", "substack.com"];
const FINANCE_HOSTS: &[&str] = &["bank", "bloomberg", "yahoo.com"];
const FINANCE_LITERAL: &str = "finance";

/// First-match-wins routing; `None` is the catch-all `Others`. Pure in the
/// URL, the display name never participates.
pub fn classify(url: &str) -> Option<&'static str> {
    let domain = extract_domain(url);
    if TOOL_HOSTS.iter().any(|h| domain.contains(h)) {
        Some("40-Tools")
    } else if SCHOOL_HOSTS.iter().any(|h| domain.contains(h)) {
        Some("20-School")
    } else if RESEARCH_HOSTS.iter().any(|h| domain.contains(h)) {
        Some("30-Research")
    } else if url.contains(FINANCE_LITERAL) || FINANCE_HOSTS.iter().any(|h| domain.contains(h)) {
        Some("50-Finance")
    } else {
        None
    }
}

/// Bucket identifier including the catch-all.
pub fn bucket_name(url: &str) -> &'static str {
    classify(url).unwrap_or(OTHERS)
}

/// URL authority, or empty when the URL does not parse. Never fails.
fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Classified records, keyed by the configured bucket order plus the
/// trailing `Others` list.
#[derive(Debug)]
pub struct Buckets {
    order: Vec<String>,
    by_name: HashMap<String, Vec<BookmarkRecord>>,
    pub others: Vec<BookmarkRecord>,
}

impl Buckets {
    /// Fan records into buckets. A rule target missing from `order` falls
    /// through to `Others` instead of erroring.
    pub fn partition(records: Vec<BookmarkRecord>, order: &[String]) -> Buckets {
        let mut by_name: HashMap<String, Vec<BookmarkRecord>> =
            order.iter().map(|n| (n.clone(), Vec::new())).collect();
        let mut others = Vec::new();
        for record in records {
            match classify(&record.url).and_then(|b| by_name.get_mut(b)) {
                Some(bucket) => bucket.push(record),
                None => others.push(record),
            }
        }
        Buckets {
            order: order.to_vec(),
            by_name,
            others,
        }
    }

    /// Named buckets in configured order, empty ones included.
    pub fn named(&self) -> impl Iterator<Item = (&str, &[BookmarkRecord])> {
        self.order.iter().map(|n| {
            let records = self.by_name.get(n).map_or(&[][..], |v| v.as_slice());
            (n.as_str(), records)
        })
    }

    /// Per-bucket counts for the stage report, `Others` last.
    pub fn counts(&self) -> Vec<(String, usize)> {
        let mut out: Vec<(String, usize)> =
            self.named().map(|(n, r)| (n.to_string(), r.len())).collect();
        out.push((OTHERS.to_string(), self.others.len()));
        out
    }

    pub fn total(&self) -> usize {
        self.named().map(|(_, r)| r.len()).sum::<usize>() + self.others.len()
    }
}
