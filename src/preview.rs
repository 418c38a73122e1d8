//! CSS preview rendering for documentation and hover
//!
//! Previews are resolved lazily, only for the item the user is actually
//! inspecting: resolution goes through the style resolver and is too costly to
//! run for hundreds of list items per keystroke. Rendering is a pure function
//! of its inputs; the vocabulary is never touched.

use crate::resolver::StyleResolver;
use crate::types::Config;
use crate::vocabulary::{VariantDefinition, VariantKind, NO_BODY};

/// Marker standing in for a variant's normal target in placeholder previews
pub const PLACEHOLDER: &str = "...";

/// Wrap CSS text in a fenced markdown block for host-side highlighting.
pub fn highlight_css(css: &str) -> String {
    format!("```css\n{}\n```", css.trim_end())
}

fn rule(selector: &str, body: &str) -> String {
    format!("{} {{\n  {}\n}}", selector, body)
}

fn media_block(query: &str, inner: &str) -> String {
    let indented = inner
        .lines()
        .map(|l| format!("  {}", l))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{} {{\n{}\n}}", query, indented)
}

/// Render the rule shape of a variant applied to `target`, with a placeholder
/// body: the preview shows what the variant does to a selector without any
/// real match target.
fn variant_shape(def: &VariantDefinition, target: &str) -> String {
    match &def.kind {
        VariantKind::PseudoSelector(template) => rule(&template.replace('&', target), PLACEHOLDER),
        VariantKind::MediaQuery(query) => media_block(query, &rule(target, PLACEHOLDER)),
    }
}

/// Preview for a bare variant in a class-list context.
pub fn render_variant(def: &VariantDefinition) -> String {
    highlight_css(&variant_shape(def, "&"))
}

/// Preview for a variant offered as an attributify key (`<div sm="...">`).
pub fn render_variant_attr(def: &VariantDefinition, escaped_name: &str) -> String {
    let target = format!("[{}~=\"&\"]", escaped_name);
    highlight_css(&variant_shape(def, &target))
}

/// Preview for an attribute-mode key, optionally bound to a variant typed
/// inside its value.
pub fn render_attr(
    escaped_key: &str,
    variant: Option<(&VariantDefinition, &str)>,
) -> String {
    match variant {
        Some((def, separator)) => {
            let target = format!("[{}~=\"{}{}&\"]", escaped_key, def.name, separator);
            highlight_css(&variant_shape(def, &target))
        }
        None => highlight_css(&rule(&format!("[{}~=\"&\"]", escaped_key), PLACEHOLDER)),
    }
}

/// Interpret a utility class and render its CSS, or nothing when the resolver
/// produced no output.
pub fn render_utility(
    resolver: &dyn StyleResolver,
    class: &str,
    config: &Config,
) -> Option<String> {
    let style = resolver.interpret(class);
    if style.is_empty() {
        return None;
    }
    Some(highlight_css(&convert_units(&style.css, config)))
}

/// Render an attribute-mode value binding (`key="value"`).
pub fn render_attr_value(
    resolver: &dyn StyleResolver,
    key: &str,
    value: &str,
    config: &Config,
) -> Option<String> {
    let style = resolver.attributify(key, &[value.to_string()]);
    if style.is_empty() {
        return None;
    }
    Some(highlight_css(&convert_units(&style.css, config)))
}

/// Raw (unfenced) CSS for an attribute-mode value, used for `detail` fields.
pub fn raw_attr_value(resolver: &dyn StyleResolver, key: &str, value: &str) -> Option<String> {
    let style = resolver.attributify(key, &[value.to_string()]);
    if style.is_empty() {
        None
    } else {
        Some(style.css)
    }
}

/// Raw CSS for a utility class, used for `detail` fields.
pub fn raw_utility(resolver: &dyn StyleResolver, class: &str) -> Option<String> {
    let style = resolver.interpret(class);
    if style.is_empty() {
        None
    } else {
        Some(style.css)
    }
}

/// Rebuild the qualified utility label for an attribute-mode value body.
pub fn qualify(key: &str, value: &str) -> String {
    if value == NO_BODY {
        key.to_string()
    } else {
        format!("{}-{}", key, value)
    }
}

fn convert_units(css: &str, config: &Config) -> String {
    if config.enable_rem_to_px_preview {
        rem_to_px(css)
    } else {
        css.to_string()
    }
}

/// Convert `rem` quantities to `px` (1rem = 16px).
///
/// Only numbers immediately followed by the `rem` unit are touched; unit-less
/// values and non-numeric tokens pass through unchanged.
pub fn rem_to_px(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let bytes = css.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        let starts_number = c.is_ascii_digit()
            || (c == '.' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()));

        if starts_number && !ident_tail(bytes, i) {
            let mut j = i;
            while j < bytes.len() && (bytes[j].is_ascii_digit() || bytes[j] == b'.') {
                j += 1;
            }

            let unit_end = j + "rem".len();
            let has_rem = css[j..].starts_with("rem")
                && bytes
                    .get(unit_end)
                    .map_or(true, |b| !b.is_ascii_alphanumeric());

            if has_rem {
                if let Ok(value) = css[i..j].parse::<f64>() {
                    let px = value * 16.0;
                    if px.fract() == 0.0 {
                        out.push_str(&format!("{}px", px as i64));
                    } else {
                        out.push_str(&format!("{}px", px));
                    }
                    i = unit_end;
                    continue;
                }
            }

            out.push_str(&css[i..j]);
            i = j;
            continue;
        }

        let ch = css[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

/// Whether position `i` continues an identifier or number (so the digit run
/// starting here is not a standalone quantity).
fn ident_tail(bytes: &[u8], i: usize) -> bool {
    i > 0
        && (bytes[i - 1].is_ascii_alphanumeric()
            || bytes[i - 1] == b'.'
            || bytes[i - 1] == b'#'
            || bytes[i - 1] == b'_')
}
