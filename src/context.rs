//! Cursor context classification
//!
//! Determines what kind of token is being typed from the document text before
//! the cursor. This runs on partial, in-progress markup on every keystroke, so
//! it is a small backward state machine over the trailing tag window rather
//! than a parser: unmatched constructs classify as `Context::None` instead of
//! failing.

use crate::types::Position;
use crate::vocabulary::VocabularyIndex;
use serde::{Deserialize, Serialize};

/// File type selecting which class-bearing recognition markers apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Html,
    Vue,
    Js,
    Css,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "html" | "htm" | "php" | "erb" => Some(FileType::Html),
            "vue" | "svelte" => Some(FileType::Vue),
            "js" | "jsx" | "ts" | "tsx" | "mdx" => Some(FileType::Js),
            "css" | "scss" | "less" => Some(FileType::Css),
            _ => None,
        }
    }

    /// Markers that open a class-bearing attribute for this file type
    fn class_markers(&self) -> &'static [&'static str] {
        match self {
            FileType::Html => &["class="],
            FileType::Vue => &[":class=", "class="],
            FileType::Js => &["className=", "class="],
            FileType::Css => &[],
        }
    }
}

/// The active completion mode at the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Inside a class list (or an attributify variant attribute's value):
    /// full utility completions apply.
    UtilityList {
        /// Set when the enclosing attribute is itself a variant name
        /// (`<div sm="...`), for documentation binding.
        attr_variant: Option<String>,
    },
    /// Inside an opening tag with no attribute value open: attribute keys.
    AttrKey,
    /// Inside the value of a recognized attribute-mode key.
    AttrValue {
        key: String,
        /// Trailing `variant:` token already typed inside the value
        variant: Option<String>,
    },
    /// No completions apply here.
    None,
}

/// Classify the cursor position given the document text up to the cursor.
///
/// Rule priority is fixed: class context, attributify variant attribute,
/// recognized attribute value, attribute key, none. The first match wins.
pub fn classify(prefix: &str, file_type: FileType, vocab: &VocabularyIndex) -> Context {
    if in_class_value(prefix, file_type) {
        return Context::UtilityList { attr_variant: None };
    }

    if file_type == FileType::Css {
        return Context::None;
    }

    let tag = match open_tag_window(prefix) {
        Some(tag) => tag,
        None => return Context::None,
    };

    // Closing tags, comments and processing instructions never complete
    if tag.starts_with('/') || tag.starts_with('!') || tag.starts_with('?') {
        return Context::None;
    }

    // The tag needs at least a name before attribute modes apply
    if tag.split_whitespace().next().is_none() {
        return Context::None;
    }

    match open_attr_value(tag) {
        Some((raw_key, partial)) => {
            let key = trailing_key(raw_key);
            if vocab.is_variant(key) {
                // Attributify variant attribute: its values are utilities
                Context::UtilityList {
                    attr_variant: Some(key.to_string()),
                }
            } else if vocab.has_attr_key(key) {
                Context::AttrValue {
                    key: key.to_string(),
                    variant: trailing_variant(partial, vocab),
                }
            } else {
                Context::None
            }
        }
        None => Context::AttrKey,
    }
}

/// Classify at a 1-based line/column position in the full document.
pub fn classify_at(
    source: &str,
    line: u32,
    column: u32,
    file_type: FileType,
    vocab: &VocabularyIndex,
) -> Context {
    match text_before(source, line, column) {
        Some(prefix) => classify(&prefix, file_type, vocab),
        None => Context::None,
    }
}

/// Whether the cursor sits inside an open class-bearing value.
///
/// Mirrors the per-file-type recognition: a marker (`class=` etc.) followed by
/// an opening quote with no closing quote before the cursor; for CSS, an
/// unterminated `@apply` run.
fn in_class_value(prefix: &str, file_type: FileType) -> bool {
    if file_type == FileType::Css {
        if let Some(pos) = prefix.rfind("@apply") {
            let rest = &prefix[pos + "@apply".len()..];
            return !rest.contains(';') && !rest.contains('}');
        }
        return false;
    }

    let mut start = None;
    for marker in file_type.class_markers() {
        if let Some(pos) = prefix.rfind(marker) {
            let end = pos + marker.len();
            start = Some(start.map_or(end, |s: usize| s.max(end)));
        }
    }

    let start = match start {
        Some(s) => s,
        None => return false,
    };

    let rest = &prefix[start..];
    let mut chars = rest.chars();
    match chars.next() {
        Some('"') | Some('\'') => {
            let tail = chars.as_str();
            !tail.contains('"') && !tail.contains('\'')
        }
        _ => false,
    }
}

/// Content of the unclosed opening tag the cursor sits in, if any
fn open_tag_window(prefix: &str) -> Option<&str> {
    let open = prefix.rfind('<')?;
    if let Some(close) = prefix.rfind('>') {
        if close > open {
            return None;
        }
    }
    Some(&prefix[open + 1..])
}

/// If an attribute value is open at the end of the tag window, return the raw
/// key before `=` and the value text typed so far.
fn open_attr_value(tag: &str) -> Option<(&str, &str)> {
    let eq = tag.rfind('=')?;
    let key = tag[..eq].split_whitespace().last()?;

    let after = tag[eq + 1..].trim_start();
    let mut chars = after.chars();
    match chars.next() {
        Some(q @ ('"' | '\'')) => {
            let body = chars.as_str();
            if body.contains(q) {
                // Value already closed; back to attribute-key position
                None
            } else {
                Some((key, body))
            }
        }
        // Right after `=`
        None => Some((key, "")),
        // Unquoted value still being typed
        Some(_) => {
            if after.contains('"') || after.contains('\'') {
                None
            } else {
                Some((key, after))
            }
        }
    }
}

/// Trailing key segment: the run after the last `:` or `-`, or the whole
/// token when it ends in a separator (which then matches nothing).
fn trailing_key(raw: &str) -> &str {
    match raw.rsplit([':', '-']).next() {
        Some("") | None => raw,
        Some(segment) => segment,
    }
}

/// Variant name bound by a trailing `variant:` token inside an open value
fn trailing_variant(partial: &str, vocab: &VocabularyIndex) -> Option<String> {
    let sep = vocab.separator();
    if !partial.ends_with(sep) {
        return None;
    }
    let token = partial.rsplit(char::is_whitespace).next()?;
    let trimmed = token.strip_suffix(sep)?;
    let name = trimmed.rsplit(sep).next()?;
    if vocab.is_variant(name) {
        Some(name.to_string())
    } else {
        None
    }
}

/// Document text from the start up to a 1-based line/column cursor
pub fn text_before(content: &str, line: u32, column: u32) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    let line_idx = (line as usize).checked_sub(1)?;
    if line_idx >= lines.len() {
        return None;
    }

    let mut before = String::new();
    for (i, l) in lines.iter().enumerate() {
        if i < line_idx {
            before.push_str(l);
            before.push('\n');
        } else if i == line_idx {
            let col = (column as usize).saturating_sub(1);
            let cut = floor_char_boundary(l, col.min(l.len()));
            before.push_str(&l[..cut]);
        }
    }
    Some(before)
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

const WORD_BREAK: &[char] = &[
    ' ', '\t', '(', ')', ';', '{', '}', '\'', '"', '=', '`', '<', '>',
];

/// Word under the cursor plus its position range, using the utility-token
/// character class (everything except quotes, braces and separators that end
/// a token).
pub fn word_at(content: &str, line: u32, column: u32) -> Option<(String, Position, Position)> {
    let lines: Vec<&str> = content.split('\n').collect();
    let line_idx = (line as usize).checked_sub(1)?;
    let line_content = *lines.get(line_idx)?;

    let col = floor_char_boundary(
        line_content,
        ((column as usize).saturating_sub(1)).min(line_content.len()),
    );

    // All break characters are single-byte
    let start = line_content[..col].rfind(WORD_BREAK).map(|p| p + 1).unwrap_or(0);

    let end = line_content[col..]
        .find(WORD_BREAK)
        .map(|p| col + p)
        .unwrap_or(line_content.len());

    if start >= end {
        return None;
    }

    Some((
        line_content[start..end].to_string(),
        Position::new(line, start as u32 + 1),
        Position::new(line, end as u32 + 1),
    ))
}
