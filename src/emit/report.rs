use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use super::{escape_attr, escape_text};
use crate::classify::Buckets;
use crate::record::BookmarkRecord;

/// Write the grouped review HTML: one heading + list per bucket in fixed
/// order (empty buckets render with a zero count), `Others` last. For human
/// eyes, not for re-import.
pub fn write_report(buckets: &Buckets, path: &Path) -> Result<()> {
    let stamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string();
    let body = render(buckets, &stamp);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

pub fn render(buckets: &Buckets, stamp: &str) -> String {
    let mut out = String::new();
    out.push_str(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Bookmarks reorganized</title></head><body>\n",
    );
    out.push_str(&format!("<h1>Bookmarks reorganized - {stamp}</h1>\n"));
    for (name, records) in buckets.named() {
        out.push_str(&format!("<h2>{} ({})</h2>\n<ul>\n", name, records.len()));
        push_items(&mut out, records);
        out.push_str("</ul>\n");
    }
    out.push_str(&format!("<h2>Others ({})</h2><ul>\n", buckets.others.len()));
    push_items(&mut out, &buckets.others);
    out.push_str("</ul>\n</body></html>");
    out
}

fn push_items(out: &mut String, records: &[BookmarkRecord]) {
    for record in records {
        // Unlike the import file there is no validity filter here; a broken
        // record should be visible in review, just escaped.
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_attr(&record.url),
            escape_text(&record.name)
        ));
    }
}
