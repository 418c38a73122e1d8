//! Color decoration provider
//!
//! Emits one swatch span per recognized color token in the document, driven
//! entirely by the vocabulary's color table. Class-bearing and variant-named
//! attributes hold qualified labels (`bg-red-500`); attribute-mode values hold
//! bodies (`red-500`) qualified by their key. Variant prefixes are stripped
//! before lookup, so `sm:bg-red-500` decorates the same as `bg-red-500`.

use crate::scanner::{scan_attributes, CLASS_KEYS};
use crate::types::ColorInfo;
use crate::vocabulary::VocabularyIndex;

pub fn document_colors(vocab: &VocabularyIndex, source: &str) -> Vec<ColorInfo> {
    let mut out = Vec::new();

    for attr in scan_attributes(source) {
        let key = attr.key.as_str();
        let class_like = CLASS_KEYS.contains(&key) || vocab.is_variant(key);
        if !class_like && !vocab.has_attr_key(key) {
            continue;
        }

        for (offset, token) in tokens(&attr.value.raw) {
            let base = strip_variants(vocab, token);
            let hex = if class_like {
                vocab.color_hex(base)
            } else {
                vocab
                    .attr_colors(key)
                    .iter()
                    .find(|c| c.value == base)
                    .map(|c| c.hex.as_str())
            };

            if let Some(rgb) = hex.and_then(hex_to_rgb) {
                let start = attr.value.start + offset;
                out.push(ColorInfo {
                    start,
                    end: start + token.len(),
                    rgb,
                });
            }
        }
    }

    out
}

/// Parse `#rgb` or `#rrggbb` into RGB components.
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                // Each shorthand digit doubles: #f00 -> #ff0000
                rgb[i] = c.to_digit(16)? as u8 * 17;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(digits.get(i * 2..i * 2 + 2)?, 16).ok()?;
            }
            Some(rgb)
        }
        _ => None,
    }
}

/// Whitespace-separated tokens of `raw` with their byte offsets
fn tokens(raw: &str) -> Vec<(usize, &str)> {
    let bytes = raw.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        out.push((start, &raw[start..i]));
    }
    out
}

fn strip_variants<'a>(vocab: &VocabularyIndex, token: &'a str) -> &'a str {
    let sep = vocab.separator();
    let mut rest = token;
    while let Some((head, tail)) = rest.split_once(sep) {
        if vocab.is_variant(head) {
            rest = tail;
        } else {
            break;
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{
        ColorCompletion, VariantDefinition, VariantKind, VocabularySource,
    };

    fn test_vocab() -> VocabularyIndex {
        VocabularyIndex::build(&VocabularySource {
            utilities: vec!["flex".to_string(), "bg-red-500".to_string()],
            colors: vec![
                ColorCompletion {
                    label: "bg-red-500".to_string(),
                    hex: "#ef4444".to_string(),
                },
                ColorCompletion {
                    label: "text-white".to_string(),
                    hex: "#fff".to_string(),
                },
            ],
            variants: vec![VariantDefinition {
                name: "sm".to_string(),
                kind: VariantKind::MediaQuery("@media (min-width: 640px)".to_string()),
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_one_span_per_color_token() {
        let vocab = test_vocab();
        let source = r#"<div class="bg-red-500 flex bg-red-500">"#;
        let infos = document_colors(&vocab, source);

        assert_eq!(infos.len(), 2);
        for info in &infos {
            assert_eq!(&source[info.start..info.end], "bg-red-500");
            assert_eq!(info.rgb, [0xef, 0x44, 0x44]);
        }
        assert_ne!(infos[0].start, infos[1].start);
    }

    #[test]
    fn test_variant_prefix_stripped() {
        let vocab = test_vocab();
        let source = r#"<div class="sm:bg-red-500">"#;
        let infos = document_colors(&vocab, source);

        assert_eq!(infos.len(), 1);
        // The span covers the whole token, prefix included.
        assert_eq!(&source[infos[0].start..infos[0].end], "sm:bg-red-500");
    }

    #[test]
    fn test_attr_mode_value() {
        let vocab = test_vocab();
        let source = r#"<div bg="red-500" text="white">"#;
        let infos = document_colors(&vocab, source);

        assert_eq!(infos.len(), 2);
        assert_eq!(&source[infos[0].start..infos[0].end], "red-500");
        assert_eq!(infos[0].rgb, [0xef, 0x44, 0x44]);
        // Shorthand hex expands per digit.
        assert_eq!(infos[1].rgb, [0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_variant_named_attribute() {
        let vocab = test_vocab();
        let source = r#"<div sm="bg-red-500">"#;
        let infos = document_colors(&vocab, source);

        assert_eq!(infos.len(), 1);
        assert_eq!(&source[infos[0].start..infos[0].end], "bg-red-500");
    }

    #[test]
    fn test_unrelated_attrs_ignored() {
        let vocab = test_vocab();
        let infos = document_colors(&vocab, r#"<div id="bg-red-500" href="red-500">"#);
        assert!(infos.is_empty());
    }

    #[test]
    fn test_non_color_tokens_ignored() {
        let vocab = test_vocab();
        let infos = document_colors(&vocab, r#"<div class="flex block unknown">"#);
        assert!(infos.is_empty());
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ef4444"), Some([0xef, 0x44, 0x44]));
        assert_eq!(hex_to_rgb("#fff"), Some([0xff, 0xff, 0xff]));
        assert_eq!(hex_to_rgb("#000"), Some([0, 0, 0]));
        assert_eq!(hex_to_rgb("ef4444"), None);
        assert_eq!(hex_to_rgb("#ef44"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
    }

    #[test]
    fn test_malformed_document() {
        let vocab = test_vocab();
        assert!(document_colors(&vocab, r#"<div class="bg-red-500"#).is_empty());
        assert!(document_colors(&vocab, "").is_empty());
    }
}
