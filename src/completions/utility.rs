//! Utility-list mode candidates

use crate::types::{Command, CompletionItem, CompletionKind, Config, ResolveData, Taxonomy};
use crate::vocabulary::VocabularyIndex;

/// Candidates inside a class list: colors, static utilities, variant
/// prefixes, dynamic placeholders.
pub fn complete(vocab: &VocabularyIndex, config: &Config) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    for (i, color) in vocab.colors().iter().enumerate() {
        items.push(
            CompletionItem::new(&color.label, CompletionKind::Color, Taxonomy::Color.sort_key(i))
                .with_documentation(&color.hex)
                .with_resolve(ResolveData::Color {
                    class: color.label.clone(),
                }),
        );
    }

    if config.enable_utility_completion {
        for (i, class) in vocab.statics().iter().enumerate() {
            items.push(
                CompletionItem::new(class, CompletionKind::Utility, Taxonomy::Static.sort_key(i))
                    .with_resolve(ResolveData::Utility {
                        class: class.clone(),
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
                .with_detail(&variant.name)
                // Keep the list open so the user continues with the utility
                .with_command(Command::TriggerSuggest)
                .with_resolve(ResolveData::Variant {
                    name: variant.name.clone(),
                }),
            );
        }
    }

    if config.enable_dynamic_completion {
        for (i, dynamic) in vocab.dynamics().iter().enumerate() {
            items.push(
                CompletionItem::new(
                    &dynamic.label,
                    CompletionKind::Dynamic,
                    Taxonomy::Dynamic.sort_key(i),
                )
                .with_command(Command::SelectLeft {
                    chars: dynamic.offset,
                }),
            );
        }
    }

    items
}
