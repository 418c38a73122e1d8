//! Hover preview provider
//!
//! Resolves the word under the cursor to CSS and renders it as a fenced
//! markdown block. The enclosing attribute decides how the word is
//! interpreted: class lists and `@apply` runs treat it as a utility token,
//! recognized attribute-mode keys as a value body, variant-named attributes
//! as a utility under that variant. Hovering an attribute key name previews
//! the whole value list at once. A word the resolver cannot fully interpret
//! produces no hover at all rather than a partial preview.

use crate::context::{classify, text_before, word_at, Context, FileType};
use crate::preview::{highlight_css, rem_to_px};
use crate::resolver::StyleResolver;
use crate::scanner::{scan_attributes, AttrSpan, CLASS_KEYS};
use crate::types::{Config, HoverInfo, HoverResult};
use crate::vocabulary::VocabularyIndex;

pub fn hover(
    vocab: &VocabularyIndex,
    resolver: &dyn StyleResolver,
    source: &str,
    line: u32,
    column: u32,
    file_type: FileType,
    config: &Config,
) -> HoverResult {
    let (word, start, end) = match word_at(source, line, column) {
        Some(found) => found,
        None => return HoverResult::none(),
    };
    let prefix = match text_before(source, line, column) {
        Some(prefix) => prefix,
        None => return HoverResult::none(),
    };
    let offset = prefix.len();

    let style = if let Some(attr) = enclosing_attr(source, offset) {
        // A value token: interpret just the word
        if CLASS_KEYS.contains(&attr.key.as_str()) {
            resolver.interpret(&word)
        } else if vocab.is_variant(&attr.key) {
            resolver.interpret(&format!("{}{}{}", attr.key, resolver.separator(), word))
        } else if vocab.has_attr_key(&attr.key) {
            resolver.attributify(&attr.key, &[word.clone()])
        } else {
            return HoverResult::none();
        }
    } else if let Some(attr) = next_attr(source, offset).filter(|a| a.key == word) {
        // The attribute key name itself: preview the whole value list
        let values: Vec<String> = attr
            .value
            .raw
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if values.is_empty() {
            return HoverResult::none();
        }

        if CLASS_KEYS.contains(&attr.key.as_str()) {
            resolver.interpret(&attr.value.raw)
        } else if vocab.is_variant(&attr.key) {
            let sep = resolver.separator();
            let list = values
                .iter()
                .map(|v| format!("{}{}{}", attr.key, sep, v))
                .collect::<Vec<_>>()
                .join(" ");
            resolver.interpret(&list)
        } else if vocab.has_attr_key(&attr.key) {
            resolver.attributify(&attr.key, &values)
        } else {
            return HoverResult::none();
        }
    } else {
        // No closed attribute span here; `@apply` runs and mid-edit markup
        // still classify as a utility list.
        match classify(&prefix, file_type, vocab) {
            Context::UtilityList { .. } => resolver.interpret(&word),
            _ => return HoverResult::none(),
        }
    };

    if style.is_empty() || !style.ignored.is_empty() {
        return HoverResult::none();
    }

    let css = if config.enable_rem_to_px_preview {
        rem_to_px(&style.css)
    } else {
        style.css
    };

    HoverResult::some(HoverInfo::new(highlight_css(&css)).with_range(start, end))
}

/// The attribute value span containing the byte offset, if any
fn enclosing_attr(source: &str, offset: usize) -> Option<AttrSpan> {
    scan_attributes(source).find(|attr| attr.value.start <= offset && offset <= attr.value.end)
}

/// The first attribute whose value begins after the offset; when the cursor
/// sits on a key name, this is that key's attribute.
fn next_attr(source: &str, offset: usize) -> Option<AttrSpan> {
    scan_attributes(source).find(|attr| attr.value.start > offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::TableResolver;
    use crate::vocabulary::{VariantDefinition, VariantKind, VocabularySource};
    use std::collections::HashMap;

    fn fixtures() -> (VocabularyIndex, TableResolver) {
        let mut rules = HashMap::new();
        rules.insert("flex".to_string(), "display: flex".to_string());
        rules.insert("p-4".to_string(), "padding: 1rem".to_string());
        rules.insert(
            "bg-red-500".to_string(),
            "background-color: #ef4444".to_string(),
        );

        let source = VocabularySource {
            utilities: vec![
                "flex".to_string(),
                "p-4".to_string(),
                "bg-red-500".to_string(),
            ],
            variants: vec![VariantDefinition {
                name: "hover".to_string(),
                kind: VariantKind::PseudoSelector("&:hover".to_string()),
            }],
            rules,
            ..Default::default()
        };

        (
            VocabularyIndex::build(&source),
            TableResolver::from_source(&source),
        )
    }

    fn hover_at(source: &str, line: u32, column: u32, file_type: FileType) -> HoverResult {
        let (vocab, resolver) = fixtures();
        hover(
            &vocab,
            &resolver,
            source,
            line,
            column,
            file_type,
            &Config::default(),
        )
    }

    #[test]
    fn test_hover_class_word() {
        let result = hover_at(r#"<div class="flex p-4">"#, 1, 14, FileType::Html);

        let info = result.info.unwrap();
        assert_eq!(info.content, "```css\n.flex {\n  display: flex;\n}\n```");
        let (start, end) = info.range.unwrap();
        assert_eq!(start.column, 13);
        assert_eq!(end.column, 17);
    }

    #[test]
    fn test_hover_variant_token() {
        let result = hover_at(r#"<div class="hover:flex">"#, 1, 16, FileType::Html);

        let info = result.info.unwrap();
        assert!(info.content.contains(".hover\\:flex:hover"));
    }

    #[test]
    fn test_hover_attr_value() {
        let result = hover_at(r#"<div bg="red-500">"#, 1, 12, FileType::Html);

        let info = result.info.unwrap();
        assert!(info.content.contains("[bg~=\"red-500\"]"));
        assert!(info.content.contains("background-color: #ef4444;"));
    }

    #[test]
    fn test_hover_variant_attr_value() {
        // `<div hover="flex">`: the value resolves under the variant.
        let result = hover_at(r#"<div hover="flex">"#, 1, 14, FileType::Html);

        let info = result.info.unwrap();
        assert!(info.content.contains(":hover"));
        assert!(info.content.contains("display: flex;"));
    }

    #[test]
    fn test_hover_attr_key_name() {
        // Hovering `bg` itself previews its whole value list, attributified.
        let result = hover_at(r#"<div bg="red-500">"#, 1, 6, FileType::Html);

        let info = result.info.unwrap();
        assert!(info.content.contains("[bg~=\"red-500\"]"));
        assert!(info.content.contains("background-color: #ef4444;"));
    }

    #[test]
    fn test_hover_class_key_name() {
        // Hovering `class` previews every utility in the list.
        let result = hover_at(r#"<div class="flex p-4">"#, 1, 7, FileType::Html);

        let info = result.info.unwrap();
        assert!(info.content.contains(".flex {\n  display: flex;\n}"));
        assert!(info.content.contains(".p-4 {\n  padding: 1rem;\n}"));
    }

    #[test]
    fn test_hover_variant_key_name() {
        // Hovering the variant-named key previews the values under it.
        let result = hover_at(r#"<div hover="flex">"#, 1, 7, FileType::Html);

        let info = result.info.unwrap();
        assert!(info.content.contains(":hover"));
        assert!(info.content.contains("display: flex;"));
    }

    #[test]
    fn test_hover_unknown_key_name_is_none() {
        assert!(hover_at(r#"<div id="main">"#, 1, 7, FileType::Html)
            .info
            .is_none());
    }

    #[test]
    fn test_hover_key_name_empty_value_is_none() {
        assert!(hover_at(r#"<div bg="">"#, 1, 6, FileType::Html)
            .info
            .is_none());
    }

    #[test]
    fn test_hover_tag_name_is_none() {
        // `div` precedes the class attribute but is not its key.
        assert!(hover_at(r#"<div class="flex">"#, 1, 3, FileType::Html)
            .info
            .is_none());
    }

    #[test]
    fn test_hover_unknown_word_is_none() {
        assert!(hover_at(r#"<div class="no-such">"#, 1, 14, FileType::Html)
            .info
            .is_none());
    }

    #[test]
    fn test_hover_unrelated_attr_is_none() {
        assert!(hover_at(r#"<div id="flex">"#, 1, 11, FileType::Html)
            .info
            .is_none());
    }

    #[test]
    fn test_hover_plain_text_is_none() {
        assert!(hover_at("flex outside markup", 1, 2, FileType::Html)
            .info
            .is_none());
    }

    #[test]
    fn test_hover_css_apply() {
        let result = hover_at(".btn {\n  @apply flex;\n}", 2, 11, FileType::Css);
        assert!(result.info.unwrap().content.contains("display: flex;"));
    }

    #[test]
    fn test_hover_rem_to_px_gating() {
        let (vocab, resolver) = fixtures();
        let source = r#"<div class="p-4">"#;
        let config = Config {
            enable_rem_to_px_preview: true,
            ..Default::default()
        };

        let plain = hover(
            &vocab,
            &resolver,
            source,
            1,
            14,
            FileType::Html,
            &Config::default(),
        );
        assert!(plain.info.unwrap().content.contains("padding: 1rem;"));

        let converted = hover(&vocab, &resolver, source, 1, 14, FileType::Html, &config);
        assert!(converted.info.unwrap().content.contains("padding: 16px;"));
    }
}
