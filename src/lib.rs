//! utilisense - context-aware completion engine for utility-first CSS
//!
//! Provides editor intelligence for utility-class vocabularies embedded in
//! markup: cursor context classification, completion candidates across four
//! taxonomies (colors, static utilities, variant prefixes, dynamic
//! placeholders), lazy CSS documentation, hover previews, color decoration,
//! and class-list sorting by variant precedence.
//!
//! [`Engine`] is the session entry point: it owns an immutable vocabulary
//! snapshot, a [`StyleResolver`] collaborator, and feature configuration.
//! Requests never fail; malformed or unrecognized input yields empty results.

pub mod completions;
pub mod context;
pub mod preview;
pub mod providers;
pub mod resolver;
pub mod scanner;
pub mod sorter;
pub mod types;
pub mod vocabulary;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

pub use context::{Context, FileType};
pub use resolver::{ResolvedStyle, StyleResolver, TableResolver};
pub use types::{
    ColorInfo, CompletionItem, CompletionKind, CompletionResult, Config, HoverInfo, HoverResult,
    Position, ResolveData,
};
pub use vocabulary::{
    VariantDefinition, VariantKind, VocabularyError, VocabularyIndex, VocabularySource,
};

use serde::Serialize;

/// Vocabulary size counters for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub utilities: usize,
    pub colors: usize,
    pub variants: usize,
    pub dynamics: usize,
    pub attr_keys: usize,
}

/// A completion session.
///
/// Holds everything a request needs, so requests are pure functions of
/// (document, position, snapshot). [`Engine::rebuild`] swaps the snapshot
/// wholesale; in-flight readers keep the `Arc` they already cloned.
pub struct Engine {
    vocabulary: Arc<VocabularyIndex>,
    resolver: Arc<dyn StyleResolver + Send + Sync>,
    config: Config,
}

impl Engine {
    /// Create a session from a vocabulary source, with the table-driven
    /// resolver built from the same source.
    pub fn new(source: &VocabularySource) -> Self {
        let engine = Self {
            vocabulary: Arc::new(VocabularyIndex::build(source)),
            resolver: Arc::new(TableResolver::from_source(source)),
            config: Config::default(),
        };
        let stats = engine.stats();
        tracing::info!(
            utilities = stats.utilities,
            colors = stats.colors,
            variants = stats.variants,
            "vocabulary loaded"
        );
        engine
    }

    /// Create a session from a vocabulary file (JSON or YAML).
    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        Ok(Self::new(&VocabularySource::load(path)?))
    }

    /// Replace the style resolver. The default table resolver only knows the
    /// vocabulary's rule table; a host with a real CSS generator plugs it in
    /// here.
    pub fn with_resolver(mut self, resolver: Arc<dyn StyleResolver + Send + Sync>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuild the vocabulary snapshot (and the table resolver) from a new
    /// source. A resolver installed via [`Engine::with_resolver`] must be
    /// re-applied afterwards.
    pub fn rebuild(&mut self, source: &VocabularySource) {
        self.vocabulary = Arc::new(VocabularyIndex::build(source));
        self.resolver = Arc::new(TableResolver::from_source(source));
        tracing::info!("vocabulary rebuilt");
    }

    /// Completion candidates at a 1-based position.
    pub fn complete(
        &self,
        source: &str,
        line: u32,
        column: u32,
        file_type: FileType,
    ) -> CompletionResult {
        if !self.config.enable_code_completion {
            return CompletionResult::empty();
        }

        catch_unwind(AssertUnwindSafe(|| {
            let ctx = context::classify_at(source, line, column, file_type, &self.vocabulary);
            tracing::debug!(?ctx, line, column, "completion request");
            completions::get_completions(&self.vocabulary, &ctx, &self.config)
        }))
        .unwrap_or_else(|_| {
            tracing::warn!(line, column, "completion request panicked");
            CompletionResult::empty()
        })
    }

    /// Fill in the lazily-resolved documentation of a completion item.
    ///
    /// List generation attaches a [`ResolveData`] payload instead of running
    /// the resolver per item; the host calls this for the one item the user
    /// focuses.
    pub fn resolve(&self, item: CompletionItem) -> CompletionItem {
        let fallback = item.clone();
        catch_unwind(AssertUnwindSafe(|| self.resolve_inner(item))).unwrap_or_else(|_| {
            tracing::warn!(label = %fallback.label, "resolve request panicked");
            fallback
        })
    }

    fn resolve_inner(&self, mut item: CompletionItem) -> CompletionItem {
        use preview::{
            raw_attr_value, raw_utility, render_attr, render_attr_value, render_utility,
            render_variant, render_variant_attr,
        };

        let data = match item.resolve.clone() {
            Some(data) => data,
            None => return item,
        };

        match data {
            ResolveData::Utility { class } => {
                if let Some(doc) = render_utility(&*self.resolver, &class, &self.config) {
                    item.documentation = Some(doc);
                }
            }
            ResolveData::Color { class } => {
                if let Some(css) = raw_utility(&*self.resolver, &class) {
                    item.detail = Some(css);
                }
            }
            ResolveData::Variant { name } => {
                if let Some(def) = self.vocabulary.variant(&name) {
                    item.documentation = Some(render_variant(def));
                }
            }
            ResolveData::VariantAttr { name } => {
                if let Some(def) = self.vocabulary.variant(&name) {
                    let escaped = self.resolver.escape(&name);
                    item.documentation = Some(render_variant_attr(def, &escaped));
                }
            }
            ResolveData::AttrKey { key } => {
                item.documentation = Some(render_attr(&self.resolver.escape(&key), None));
            }
            ResolveData::AttrValue { key, value } => {
                if let Some(doc) = render_attr_value(&*self.resolver, &key, &value, &self.config) {
                    item.documentation = Some(doc);
                }
            }
            ResolveData::AttrColor { key, value } => {
                if let Some(css) = raw_attr_value(&*self.resolver, &key, &value) {
                    item.detail = Some(css);
                }
            }
            ResolveData::AttrVariant { key, variant } => {
                if let Some(def) = self.vocabulary.variant(&variant) {
                    let escaped = self.resolver.escape(&key);
                    let doc = render_attr(&escaped, Some((def, self.vocabulary.separator())));
                    item.documentation = Some(doc);
                }
            }
        }

        item
    }

    /// Hover preview for the word at a 1-based position.
    pub fn hover(&self, source: &str, line: u32, column: u32, file_type: FileType) -> HoverResult {
        if !self.config.enable_hover_preview {
            return HoverResult::none();
        }

        catch_unwind(AssertUnwindSafe(|| {
            providers::hover::hover(
                &self.vocabulary,
                &*self.resolver,
                source,
                line,
                column,
                file_type,
                &self.config,
            )
        }))
        .unwrap_or_else(|_| {
            tracing::warn!(line, column, "hover request panicked");
            HoverResult::none()
        })
    }

    /// Color swatch spans for a whole document.
    pub fn document_colors(&self, source: &str) -> Vec<ColorInfo> {
        if !self.config.enable_color_decorators {
            return Vec::new();
        }

        catch_unwind(AssertUnwindSafe(|| {
            providers::colors::document_colors(&self.vocabulary, source)
        }))
        .unwrap_or_else(|_| {
            tracing::warn!("color decoration request panicked");
            Vec::new()
        })
    }

    /// Sort a whitespace-separated class list by variant precedence.
    pub fn sort_classes(&self, list: &str) -> String {
        catch_unwind(AssertUnwindSafe(|| {
            sorter::sort_class_list(
                list,
                &self.vocabulary.variant_ranks(),
                self.vocabulary.separator(),
            )
        }))
        .unwrap_or_else(|_| {
            tracing::warn!("sort request panicked");
            list.to_string()
        })
    }

    /// Sort every class-bearing attribute value in a document.
    pub fn sort_document(&self, source: &str) -> String {
        catch_unwind(AssertUnwindSafe(|| {
            sorter::sort_document(
                source,
                &self.vocabulary.variant_ranks(),
                self.vocabulary.separator(),
            )
        }))
        .unwrap_or_else(|_| {
            tracing::warn!("sort request panicked");
            source.to_string()
        })
    }

    /// Classify the cursor context at a 1-based position.
    pub fn classify_at(
        &self,
        source: &str,
        line: u32,
        column: u32,
        file_type: FileType,
    ) -> Context {
        context::classify_at(source, line, column, file_type, &self.vocabulary)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            utilities: self.vocabulary.statics().len(),
            colors: self.vocabulary.colors().len(),
            variants: self.vocabulary.variants().len(),
            dynamics: self.vocabulary.dynamics().len(),
            attr_keys: self.vocabulary.attr_keys().len(),
        }
    }

    pub fn vocabulary(&self) -> &VocabularyIndex {
        &self.vocabulary
    }
}
