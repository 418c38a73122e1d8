//! Attribute-value mode candidates

use crate::types::{Command, CompletionItem, CompletionKind, Config, ResolveData, Taxonomy};
use crate::vocabulary::VocabularyIndex;

/// Candidates inside the value of a recognized attribute-mode key: colors,
/// then value bodies, then dynamics, then variants. An unrecognized key yields
/// nothing.
pub fn complete(vocab: &VocabularyIndex, config: &Config, key: &str) -> Vec<CompletionItem> {
    if !vocab.has_attr_key(key) {
        return Vec::new();
    }

    let mut items = Vec::new();

    for (i, color) in vocab.attr_colors(key).iter().enumerate() {
        items.push(
            CompletionItem::new(&color.value, CompletionKind::Color, Taxonomy::Color.sort_key(i))
                .with_detail(key)
                .with_documentation(&color.hex)
                .with_resolve(ResolveData::AttrColor {
                    key: key.to_string(),
                    value: color.value.clone(),
                }),
        );
    }

    for (i, value) in vocab.attr_values(key).iter().enumerate() {
        items.push(
            CompletionItem::new(value, CompletionKind::Utility, Taxonomy::Static.sort_key(i))
                .with_detail(key)
                .with_resolve(ResolveData::AttrValue {
                    key: key.to_string(),
                    value: value.clone(),
                }),
        );
    }

    if config.enable_dynamic_completion {
        for (i, dynamic) in vocab.attr_dynamics(key).iter().enumerate() {
            items.push(
                CompletionItem::new(
                    &dynamic.value,
                    CompletionKind::Dynamic,
                    Taxonomy::Dynamic.sort_key(i),
                )
                .with_command(Command::SelectLeft {
                    chars: dynamic.offset,
                }),
            );
        }
    }

    if config.enable_variant_completion {
        let separator = vocab.separator();
        for (i, variant) in vocab.variants().iter().enumerate() {
            items.push(
                CompletionItem::new(
                    format!("{}{}", variant.name, separator),
                    CompletionKind::Variant,
                    Taxonomy::Variant.sort_key(i),
                )
                .with_command(Command::TriggerSuggest)
                .with_resolve(ResolveData::AttrVariant {
                    key: key.to_string(),
                    variant: variant.name.clone(),
                }),
            );
        }
    }

    items
}
