use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

use crate::record::BookmarkRecord;

/// Anchor-scan state: everything outside `<A>…</A>` is ignored.
enum State {
    Outside,
    InsideAnchor { href: String, text: String },
}

/// Scan a legacy Netscape bookmark file and emit one record per anchor.
///
/// These files are not well-formed XML (unclosed `<DT>`, `<DL><p>` nesting),
/// so the reader runs with end-name checking off and only the anchor state
/// machine interprets events: entering `<A>` captures `HREF` and resets the
/// text buffer, text inside accumulates, `</A>` emits. Folder headers and
/// list structure never reach the output. A tokenizer error stops the scan
/// but keeps every record already emitted.
pub fn parse(content: &str) -> Vec<BookmarkRecord> {
    let mut reader = Reader::from_reader(content.as_bytes());
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    // Real exports carry bare `&` in titles; keep it as text.
    config.allow_dangling_amp = true;

    let mut records = Vec::new();
    let mut state = State::Outside;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref().eq_ignore_ascii_case(b"a") => {
                state = State::InsideAnchor {
                    href: attr_value(&e, b"href"),
                    text: String::new(),
                };
            }
            // Self-closing anchor: enter and leave in one event.
            Ok(Event::Empty(e)) if e.name().as_ref().eq_ignore_ascii_case(b"a") => {
                records.push(make_record(attr_value(&e, b"href"), ""));
                state = State::Outside;
            }
            Ok(Event::End(e)) if e.name().as_ref().eq_ignore_ascii_case(b"a") => {
                if let State::InsideAnchor { href, text } = state {
                    records.push(make_record(href, &text));
                }
                state = State::Outside;
            }
            // Entity references arrive as separate GeneralRef events, so
            // text here is already plain.
            Ok(Event::Text(e)) => {
                if let State::InsideAnchor { text, .. } = &mut state {
                    match e.decode() {
                        Ok(t) => text.push_str(&t),
                        Err(_) => text.push_str(&String::from_utf8_lossy(&e)),
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let State::InsideAnchor { text, .. } = &mut state {
                    let name = String::from_utf8_lossy(&e);
                    text.push_str(&resolve_reference(&name));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("stopping bookmark scan on malformed markup: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    records
}

fn make_record(href: String, text: &str) -> BookmarkRecord {
    let trimmed = text.trim();
    let name = if trimmed.is_empty() { href.clone() } else { trimmed.to_string() };
    BookmarkRecord { name, url: href }
}

/// First attribute matching `key` (ASCII case-insensitive), unescaped.
/// Unreadable attributes are skipped rather than failing the anchor.
fn attr_value(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> String {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref().eq_ignore_ascii_case(key))
        .map(|a| match a.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
        .unwrap_or_default()
}

/// Resolve `&name;` references the way a lenient HTML reader would: the five
/// standard entities plus numeric character references; anything else is kept
/// verbatim.
fn resolve_reference(name: &str) -> String {
    match name {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        _ => {
            if let Some(digits) = name.strip_prefix('#') {
                let parsed = match digits.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => digits.parse::<u32>().ok(),
                };
                if let Some(c) = parsed.and_then(char::from_u32) {
                    return c.to_string();
                }
            }
            format!("&{};", name)
        }
    }
}
