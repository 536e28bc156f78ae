use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use super::{escape_attr, escape_text};
use crate::record::BookmarkRecord;

/// Write a minimal Netscape bookmark file Chrome can import: one folder
/// holding every record, no nesting. The header block is a fixed contract;
/// Chrome rejects the import if the DOCTYPE or meta line drifts.
pub fn write_import_file(
    records: &[BookmarkRecord],
    path: &Path,
    folder_name: &str,
    title: &str,
) -> Result<()> {
    let body = render(records, folder_name, title, Utc::now().timestamp());
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

/// Render with a caller-supplied timestamp so the output stays byte-testable.
pub fn render(records: &[BookmarkRecord], folder_name: &str, title: &str, ts: i64) -> String {
    let esc_title = escape_text(title);
    let esc_folder = escape_text(folder_name);

    let mut out = String::new();
    out.push_str("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
    out.push_str("<!-- This is an automatically generated file.\n");
    out.push_str("     It will be read and overwritten.\n");
    out.push_str("     DO NOT EDIT! -->\n");
    out.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
    out.push_str(&format!("<TITLE>{esc_title}</TITLE>\n"));
    out.push_str(&format!("<H1>{esc_title}</H1>\n"));
    out.push_str("<DL><p>\n");
    out.push_str(&format!(
        "<DT><H3 ADD_DATE=\"{ts}\" LAST_MODIFIED=\"{ts}\" PERSONAL_TOOLBAR_FOLDER=\"false\">{esc_folder}</H3>\n"
    ));
    out.push_str("<DL><p>\n");

    for record in records {
        let url = record.url.trim();
        // Last-chance validity filter: a bookmark without a URL cannot be
        // imported, everything else passed through earlier stages untouched.
        if url.is_empty() {
            continue;
        }
        let name = if record.name.is_empty() {
            url
        } else {
            record.name.trim()
        };
        out.push_str(&format!(
            "<DT><A HREF=\"{}\">{}</A>\n",
            escape_attr(url),
            escape_text(name)
        ));
    }

    out.push_str("</DL><p>\n");
    out.push_str("</DL><p>\n");
    out
}
