//! Attribute-key mode candidates

use crate::types::{Command, CompletionItem, CompletionKind, Config, ResolveData};
use crate::types::named_sort_key;
use crate::vocabulary::VocabularyIndex;

/// Candidates inside an opening tag: attribute keys first, then variants
/// usable as attributify keys. Both insert `key="<cursor>"` and immediately
/// reopen the completion list, walking the user from key to value.
pub fn complete(vocab: &VocabularyIndex, config: &Config) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    for key in vocab.attr_keys() {
        items.push(
            CompletionItem::new(key, CompletionKind::AttrKey, named_sort_key(0, key))
                .with_insert_text(format!("{}=\"$1\"", key))
                .as_snippet()
                .with_command(Command::TriggerSuggest)
                .with_resolve(ResolveData::AttrKey {
                    key: key.to_string(),
                }),
        );
    }

    if config.enable_variant_completion {
        for variant in vocab.variants() {
            items.push(
                CompletionItem::new(
                    &variant.name,
                    CompletionKind::AttrVariant,
                    named_sort_key(1, &variant.name),
                )
                .with_insert_text(format!("{}=\"$1\"", variant.name))
                .as_snippet()
                .with_command(Command::TriggerSuggest)
                .with_resolve(ResolveData::VariantAttr {
                    name: variant.name.clone(),
                }),
            );
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completions::tests::test_vocab;

    #[test]
    fn test_keys_then_variants() {
        let vocab = test_vocab();
        let items = complete(&vocab, &Config::default());

        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        // Keys are alphabetic (bg, flex from the sample vocabulary), variants
        // follow in declared order.
        assert_eq!(labels, ["bg", "flex", "sm", "hover"]);
    }

    #[test]
    fn test_key_snippet_and_retrigger() {
        let vocab = test_vocab();
        let items = complete(&vocab, &Config::default());

        let bg = items.iter().find(|i| i.label == "bg").unwrap();
        assert_eq!(bg.insert_text, "bg=\"$1\"");
        assert!(bg.is_snippet);
        assert_eq!(bg.command, Some(Command::TriggerSuggest));
        assert_eq!(bg.sort_text, "0-bg");
    }

    #[test]
    fn test_variant_group_sorts_after_keys() {
        let vocab = test_vocab();
        let items = complete(&vocab, &Config::default());

        let key_max = items
            .iter()
            .filter(|i| i.kind == CompletionKind::AttrKey)
            .map(|i| i.sort_text.clone())
            .max()
            .unwrap();
        let variant_min = items
            .iter()
            .filter(|i| i.kind == CompletionKind::AttrVariant)
            .map(|i| i.sort_text.clone())
            .min()
            .unwrap();
        assert!(key_max < variant_min);
    }

    #[test]
    fn test_variant_gating() {
        let vocab = test_vocab();
        let config = Config {
            enable_variant_completion: false,
            ..Default::default()
        };
        let items = complete(&vocab, &config);
        assert!(items.iter().all(|i| i.kind == CompletionKind::AttrKey));
    }
}
