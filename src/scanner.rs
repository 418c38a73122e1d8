//! Attribute span scanner
//!
//! Enumerates `key="value"` occurrences in document text with byte offsets.
//! Documents are routinely malformed mid-keystroke, so the scanner is
//! fail-soft: an occurrence without a matching close quote is skipped and
//! scanning continues after it.

/// Attribute keys whose values are plain class lists
pub const CLASS_KEYS: &[&str] = &["class", "className", ":class"];

/// The value part of an attribute occurrence; `start..end` are byte offsets
/// of `raw` in the scanned document (quotes excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValueSpan {
    pub raw: String,
    pub start: usize,
    pub end: usize,
}

/// An attribute occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSpan {
    pub key: String,
    pub value: AttrValueSpan,
}

/// Lazily scan all attribute occurrences in document order.
pub fn scan_attributes(text: &str) -> AttrScanner<'_> {
    AttrScanner { text, pos: 0 }
}

pub struct AttrScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl Iterator for AttrScanner<'_> {
    type Item = AttrSpan;

    fn next(&mut self) -> Option<AttrSpan> {
        while self.pos < self.text.len() {
            let eq = match self.text[self.pos..].find('=') {
                Some(rel) => self.pos + rel,
                None => {
                    self.pos = self.text.len();
                    return None;
                }
            };

            // Resume after this `=` regardless of the outcome below
            self.pos = eq + 1;

            let key = match key_before(self.text, eq) {
                Some(key) => key,
                None => continue,
            };

            // Only `=` inside an open tag introduces an attribute
            if !inside_tag(&self.text[..eq]) {
                continue;
            }

            let after = &self.text[eq + 1..];
            let value_rel = after.len() - after.trim_start().len();
            let quote = match after.trim_start().chars().next() {
                Some(q @ ('"' | '\'')) => q,
                _ => continue,
            };

            let start = eq + 1 + value_rel + 1;
            let close_rel = match self.text[start..].find(quote) {
                Some(rel) => rel,
                // Unterminated value: skip it, keep scanning
                None => continue,
            };
            let end = start + close_rel;

            // A tag boundary inside the value means the quote never closed
            if self.text[start..end].contains(['<', '>']) {
                continue;
            }

            self.pos = end + 1;
            return Some(AttrSpan {
                key: key.to_string(),
                value: AttrValueSpan {
                    raw: self.text[start..end].to_string(),
                    start,
                    end,
                },
            });
        }
        None
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.' | '@')
}

/// Attribute key immediately before `=` (whitespace allowed around `=`)
fn key_before(text: &str, eq: usize) -> Option<&str> {
    let before = text[..eq].trim_end();
    let end = before.len();
    let start = before
        .rfind(|c: char| !is_key_char(c))
        .map(|p| p + before[p..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    if start >= end {
        None
    } else {
        Some(&before[start..end])
    }
}

/// Whether the position at the end of `prefix` sits inside an open tag
fn inside_tag(prefix: &str) -> bool {
    match (prefix.rfind('<'), prefix.rfind('>')) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}
