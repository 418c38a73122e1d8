//! Style resolver seam
//!
//! The engine never interprets utility classes itself; it delegates to a
//! [`StyleResolver`] collaborator. Tokens the resolver cannot interpret come
//! back in `ignored` and simply drop out of previews and color decoration;
//! bad input means "no suggestion", not an error.
//!
//! [`TableResolver`] is a rule-table-backed implementation driven by the
//! vocabulary source; it serves the CLI and tests.

use crate::vocabulary::{VariantDefinition, VariantKind, VocabularySource, NO_BODY};
use std::collections::HashMap;

/// Result of interpreting a class list or attributify mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    /// Generated CSS text; empty when nothing resolved
    pub css: String,
    /// Tokens the resolver could not interpret
    pub ignored: Vec<String>,
}

impl ResolvedStyle {
    pub fn is_empty(&self) -> bool {
        self.css.trim().is_empty()
    }
}

/// External utility-class-to-CSS resolution engine.
pub trait StyleResolver {
    /// Variant separator shared with the vocabulary (usually `:`)
    fn separator(&self) -> &str;

    /// Interpret a whitespace-separated utility class list.
    fn interpret(&self, input: &str) -> ResolvedStyle;

    /// Interpret attribute-mode values for a single key.
    fn attributify(&self, key: &str, values: &[String]) -> ResolvedStyle;

    /// Escape an identifier for use inside a CSS selector.
    fn escape(&self, ident: &str) -> String {
        let mut out = String::with_capacity(ident.len());
        for c in ident.chars() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                out.push(c);
            } else {
                out.push('\\');
                out.push(c);
            }
        }
        out
    }
}

/// Rule-table-backed resolver built from a vocabulary source.
pub struct TableResolver {
    rules: HashMap<String, String>,
    variants: HashMap<String, VariantDefinition>,
    separator: String,
}

impl TableResolver {
    pub fn from_source(source: &VocabularySource) -> Self {
        Self {
            rules: source.rules.clone(),
            variants: source
                .variants
                .iter()
                .map(|v| (v.name.clone(), v.clone()))
                .collect(),
            separator: source.separator.clone(),
        }
    }

    /// Split a token into its variant prefixes and the base utility.
    fn strip_variants<'a>(&self, token: &'a str) -> (Vec<&VariantDefinition>, &'a str) {
        let mut variants = Vec::new();
        let mut rest = token;
        while let Some((head, tail)) = rest.split_once(self.separator.as_str()) {
            match self.variants.get(head) {
                Some(def) => {
                    variants.push(def);
                    rest = tail;
                }
                None => break,
            }
        }
        (variants, rest)
    }

    /// Render one rule for `selector` with declarations from the table,
    /// wrapped by the token's variants.
    fn render_rule(&self, selector: &str, declarations: &str, variants: &[&VariantDefinition]) -> String {
        let mut selector = selector.to_string();
        for def in variants {
            if let VariantKind::PseudoSelector(template) = &def.kind {
                selector = template.replace('&', &selector);
            }
        }

        let body = declarations
            .split(';')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| format!("  {};", d))
            .collect::<Vec<_>>()
            .join("\n");
        let mut rule = format!("{} {{\n{}\n}}", selector, body);

        // Media wrappers apply outside-in
        for def in variants.iter().rev() {
            if let VariantKind::MediaQuery(query) = &def.kind {
                let indented = rule
                    .lines()
                    .map(|l| format!("  {}", l))
                    .collect::<Vec<_>>()
                    .join("\n");
                rule = format!("{} {{\n{}\n}}", query, indented);
            }
        }
        rule
    }
}

impl StyleResolver for TableResolver {
    fn separator(&self) -> &str {
        &self.separator
    }

    fn interpret(&self, input: &str) -> ResolvedStyle {
        let mut rules = Vec::new();
        let mut ignored = Vec::new();

        for token in input.split_whitespace() {
            let (variants, base) = self.strip_variants(token);
            match self.rules.get(base) {
                Some(declarations) => {
                    let selector = format!(".{}", self.escape(token));
                    rules.push(self.render_rule(&selector, declarations, &variants));
                }
                None => ignored.push(token.to_string()),
            }
        }

        ResolvedStyle {
            css: rules.join("\n"),
            ignored,
        }
    }

    fn attributify(&self, key: &str, values: &[String]) -> ResolvedStyle {
        let mut rules = Vec::new();
        let mut ignored = Vec::new();

        for value in values {
            let (variants, body) = self.strip_variants(value);
            let utility = if body == NO_BODY {
                key.to_string()
            } else {
                format!("{}-{}", key, body)
            };
            match self.rules.get(&utility) {
                Some(declarations) => {
                    let selector = format!("[{}~=\"{}\"]", self.escape(key), value);
                    rules.push(self.render_rule(&selector, declarations, &variants));
                }
                None => ignored.push(value.clone()),
            }
        }

        ResolvedStyle {
            css: rules.join("\n"),
            ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{VariantDefinition, VariantKind};

    fn test_resolver() -> TableResolver {
        let mut rules = HashMap::new();
        rules.insert("flex".to_string(), "display: flex".to_string());
        rules.insert(
            "bg-red-500".to_string(),
            "background-color: #ef4444".to_string(),
        );
        rules.insert(
            "p-4".to_string(),
            "padding: 1rem".to_string(),
        );

        TableResolver::from_source(&VocabularySource {
            rules,
            variants: vec![
                VariantDefinition {
                    name: "sm".to_string(),
                    kind: VariantKind::MediaQuery("@media (min-width: 640px)".to_string()),
                },
                VariantDefinition {
                    name: "hover".to_string(),
                    kind: VariantKind::PseudoSelector("&:hover".to_string()),
                },
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_interpret_basic() {
        let resolver = test_resolver();
        let style = resolver.interpret("flex");

        assert_eq!(style.css, ".flex {\n  display: flex;\n}");
        assert!(style.ignored.is_empty());
    }

    #[test]
    fn test_interpret_unknown_is_ignored() {
        let resolver = test_resolver();
        let style = resolver.interpret("flex no-such-utility");

        assert_eq!(style.ignored, ["no-such-utility"]);
        assert!(style.css.contains(".flex"));
    }

    #[test]
    fn test_interpret_pseudo_variant() {
        let resolver = test_resolver();
        let style = resolver.interpret("hover:flex");

        assert_eq!(style.css, ".hover\\:flex:hover {\n  display: flex;\n}");
    }

    #[test]
    fn test_interpret_media_variant() {
        let resolver = test_resolver();
        let style = resolver.interpret("sm:flex");

        assert_eq!(
            style.css,
            "@media (min-width: 640px) {\n  .sm\\:flex {\n    display: flex;\n  }\n}"
        );
    }

    #[test]
    fn test_interpret_stacked_variants() {
        let resolver = test_resolver();
        let style = resolver.interpret("sm:hover:flex");

        assert!(style.css.starts_with("@media (min-width: 640px) {"));
        assert!(style.css.contains(":hover"));
        assert!(style.ignored.is_empty());
    }

    #[test]
    fn test_attributify_body() {
        let resolver = test_resolver();
        let style = resolver.attributify("bg", &["red-500".to_string()]);

        assert_eq!(
            style.css,
            "[bg~=\"red-500\"] {\n  background-color: #ef4444;\n}"
        );
    }

    #[test]
    fn test_attributify_sentinel_body() {
        let resolver = test_resolver();
        let style = resolver.attributify("flex", &[NO_BODY.to_string()]);

        assert_eq!(style.css, "[flex~=\"~\"] {\n  display: flex;\n}");
    }

    #[test]
    fn test_attributify_unknown_value_ignored() {
        let resolver = test_resolver();
        let style = resolver.attributify("bg", &["nope".to_string()]);

        assert!(style.is_empty());
        assert_eq!(style.ignored, ["nope"]);
    }

    #[test]
    fn test_escape() {
        let resolver = test_resolver();
        assert_eq!(resolver.escape("sm:flex"), "sm\\:flex");
        assert_eq!(resolver.escape("p-4"), "p-4");
    }
}
