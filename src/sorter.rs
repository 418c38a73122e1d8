//! Class-list sorting by variant precedence
//!
//! Used by the reformat command: tokens are grouped by the precedence rank of
//! their variant prefix (declared variant order, 1-based; no prefix ranks 0)
//! with a stable sort, so equal-rank tokens keep their relative order. No
//! semantic validation happens here; unrecognized tokens pass through.

use crate::scanner::{scan_attributes, CLASS_KEYS};
use std::collections::HashMap;

/// Reorder a whitespace-separated class list by variant precedence.
pub fn sort_class_list(
    list: &str,
    ranks: &HashMap<String, usize>,
    separator: &str,
) -> String {
    let mut tokens: Vec<&str> = list.split_whitespace().collect();
    tokens.sort_by_key(|token| variant_rank(token, ranks, separator));
    tokens.join(" ")
}

fn variant_rank(token: &str, ranks: &HashMap<String, usize>, separator: &str) -> usize {
    token
        .split_once(separator)
        .and_then(|(prefix, _)| ranks.get(prefix).copied())
        .unwrap_or(0)
}

/// Rewrite every class-bearing attribute value in a document with its sorted
/// form, leaving all other text untouched.
pub fn sort_document(
    source: &str,
    ranks: &HashMap<String, usize>,
    separator: &str,
) -> String {
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    for attr in scan_attributes(source) {
        if !CLASS_KEYS.contains(&attr.key.as_str()) {
            continue;
        }
        output.push_str(&source[cursor..attr.value.start]);
        output.push_str(&sort_class_list(&attr.value.raw, ranks, separator));
        cursor = attr.value.end;
    }

    output.push_str(&source[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks() -> HashMap<String, usize> {
        let mut ranks = HashMap::new();
        ranks.insert("sm".to_string(), 1);
        ranks.insert("hover".to_string(), 2);
        ranks
    }

    #[test]
    fn test_sort_by_variant_rank() {
        let sorted = sort_class_list("sm:flex hover:block flex block", &ranks(), ":");
        assert_eq!(sorted, "flex block sm:flex hover:block");
    }

    #[test]
    fn test_sort_is_stable() {
        // Equal-rank tokens keep their relative order.
        let sorted = sort_class_list("b a hover:z hover:a", &ranks(), ":");
        assert_eq!(sorted, "b a hover:z hover:a");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = sort_class_list("hover:block sm:flex block flex", &ranks(), ":");
        let twice = sort_class_list(&once, &ranks(), ":");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unrecognized_prefix_ranks_zero() {
        let sorted = sort_class_list("sm:flex foo:bar flex", &ranks(), ":");
        assert_eq!(sorted, "foo:bar flex sm:flex");
    }

    #[test]
    fn test_sort_empty_and_whitespace() {
        assert_eq!(sort_class_list("", &ranks(), ":"), "");
        assert_eq!(sort_class_list("  flex   block ", &ranks(), ":"), "flex block");
    }

    #[test]
    fn test_sort_document_rewrites_class_spans() {
        let source = r#"<div class="sm:flex flex" id="x"><span className="hover:a b"></span>"#;
        let sorted = sort_document(source, &ranks(), ":");
        assert_eq!(
            sorted,
            r#"<div class="flex sm:flex" id="x"><span className="b hover:a"></span>"#
        );
    }

    #[test]
    fn test_sort_document_rewrites_bound_class() {
        let source = r#"<div :class="sm:flex flex">"#;
        assert_eq!(
            sort_document(source, &ranks(), ":"),
            r#"<div :class="flex sm:flex">"#
        );
    }

    #[test]
    fn test_sort_document_leaves_other_attrs() {
        let source = r#"<div bg="sm:red flex">"#;
        assert_eq!(sort_document(source, &ranks(), ":"), source);
    }

    #[test]
    fn test_sort_document_malformed() {
        // Unterminated markup passes through unchanged.
        let source = r#"<div class="sm:flex flex"#;
        assert_eq!(sort_document(source, &ranks(), ":"), source);
    }
}
