//! Candidate generation
//!
//! Pure functions of (classified context, vocabulary snapshot, config).
//! Unknown keys and unmatched contexts yield empty lists, never errors. Items
//! come out in taxonomy order with sort keys already assigned; the host's
//! lexicographic sort over `sort_text` reproduces the same order.

mod attr_key;
mod attr_value;
mod utility;

use crate::context::Context;
use crate::types::{CompletionResult, Config};
use crate::vocabulary::VocabularyIndex;

/// Get completions for the given context
pub fn get_completions(
    vocab: &VocabularyIndex,
    ctx: &Context,
    config: &Config,
) -> CompletionResult {
    let items = match ctx {
        Context::UtilityList { .. } => utility::complete(vocab, config),
        Context::AttrKey => attr_key::complete(vocab, config),
        Context::AttrValue { key, .. } => attr_value::complete(vocab, config, key),
        Context::None => Vec::new(),
    };

    CompletionResult::new(items)
}
