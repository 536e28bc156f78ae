pub mod json_tree;
pub mod netscape;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::record::BookmarkRecord;

/// Tag signature used for content sniffing; only the first 1 KiB is examined.
static HTML_SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!doctype|<html|<meta|<dl|<a\s").unwrap());

const SNIFF_WINDOW: usize = 1024;

/// The two supported input variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Nested browser bookmark-tree export (Chrome `Bookmarks` JSON).
    JsonTree,
    /// Legacy Netscape bookmark file (HTML export).
    NetscapeHtml,
}

/// Fatal input errors. Anything recoverable inside a valid input is skipped
/// instead of raised.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{0}: matches neither a JSON bookmark tree nor a Netscape bookmark file")]
    Unrecognized(PathBuf),
    #[error("not a JSON bookmark tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read the input file and flatten it into records, sniffing the format when
/// the caller did not force one.
pub fn parse(path: &Path, format: Option<SourceFormat>) -> Result<Vec<BookmarkRecord>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let format = match format {
        Some(f) => f,
        None => detect_format(path, &content)?,
    };
    debug!("parsing {} as {:?}", path.display(), format);
    match format {
        SourceFormat::JsonTree => Ok(json_tree::parse(&content)?),
        SourceFormat::NetscapeHtml => Ok(netscape::parse(&content)),
    }
}

/// Route by extension/basename first, then by an HTML tag signature in the
/// first 1 KiB of content.
pub fn detect_format(path: &Path, content: &str) -> Result<SourceFormat, FormatError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let basename = path.file_name().and_then(|n| n.to_str());

    match ext.as_deref() {
        Some("json") => return Ok(SourceFormat::JsonTree),
        Some("html") | Some("htm") => return Ok(SourceFormat::NetscapeHtml),
        _ => {}
    }
    // Chrome keeps its live export in a bare file named `Bookmarks`.
    if basename == Some("Bookmarks") {
        return Ok(SourceFormat::JsonTree);
    }
    if HTML_SIGNATURE_RE.is_match(sniff_window(content)) {
        return Ok(SourceFormat::NetscapeHtml);
    }
    Err(FormatError::Unrecognized(path.to_path_buf()))
}

fn sniff_window(content: &str) -> &str {
    let mut end = content.len().min(SNIFF_WINDOW);
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}
