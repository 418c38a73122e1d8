//! Vocabulary index built from a utility vocabulary source
//!
//! The index is built once per session activation and rebuilt wholesale when
//! configuration changes; readers always see a consistent snapshot because the
//! engine swaps the whole `Arc` rather than mutating in place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Sentinel body for a utility with no separator (`flex` -> key `flex`, body `~`)
pub const NO_BODY: &str = "~";

fn default_separator() -> String {
    ":".to_string()
}

/// Split a utility at its first `-` into (key, body).
///
/// A utility without a `-` maps to the sentinel body. Utilities with an empty
/// key (leading `-`) cannot be indexed and return `None`.
pub fn split_utility(utility: &str) -> Option<(&str, &str)> {
    match utility.split_once('-') {
        Some(("", _)) => None,
        Some((key, body)) => Some((key, body)),
        None => {
            if utility.is_empty() {
                None
            } else {
                Some((utility, NO_BODY))
            }
        }
    }
}

/// How a variant conditions a utility's selector.
///
/// A tagged value rather than a callable: it carries enough data to render a
/// preview without executing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VariantKind {
    /// Wraps the rule in a media query, e.g. `@media (min-width: 640px)`
    MediaQuery(String),
    /// Rewrites the selector; `&` marks the target, e.g. `&:hover`
    PseudoSelector(String),
}

/// A variant definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDefinition {
    pub name: String,
    #[serde(flatten)]
    pub kind: VariantKind,
}

/// A color completion: qualified utility label plus its hex value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCompletion {
    pub label: String,
    pub hex: String,
}

/// A dynamic (placeholder-bearing) completion. `offset` is how many characters
/// left of the cursor to select after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicCompletion {
    pub label: String,
    pub offset: u32,
}

/// A color value body under an attribute key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrColor {
    pub value: String,
    pub hex: String,
}

/// A dynamic value body under an attribute key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrDynamic {
    pub value: String,
    pub offset: u32,
}

/// Raw vocabulary as loaded from a JSON or YAML file.
///
/// `rules` maps a base utility to its CSS declarations and drives the
/// table-backed reference resolver; the completion engine itself never reads
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySource {
    pub separator: String,
    pub utilities: Vec<String>,
    pub colors: Vec<ColorCompletion>,
    pub variants: Vec<VariantDefinition>,
    pub dynamics: Vec<DynamicCompletion>,
    pub rules: HashMap<String, String>,
}

impl Default for VocabularySource {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            utilities: Vec::new(),
            colors: Vec::new(),
            variants: Vec::new(),
            dynamics: Vec::new(),
            rules: HashMap::new(),
        }
    }
}

/// Vocabulary loading error
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary {path}: {message}")]
    Parse { path: String, message: String },

    #[error("unsupported vocabulary format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

impl VocabularySource {
    /// Load a vocabulary from a JSON or YAML file, selected by extension.
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: display.clone(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        match ext {
            "json" => serde_json::from_str(&content).map_err(|e| VocabularyError::Parse {
                path: display,
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| VocabularyError::Parse {
                path: display,
                message: e.to_string(),
            }),
            other => Err(VocabularyError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Precomputed completion vocabulary.
///
/// Every keyed table (`attr_values`, `attr_colors`, `attr_dynamics`) derives
/// its keys with the same splitting rule, so lookups agree across taxonomies.
/// Keys only exist once they hold at least one value.
#[derive(Debug, Default)]
pub struct VocabularyIndex {
    statics: Vec<String>,
    attr_values: HashMap<String, Vec<String>>,
    variants: Vec<VariantDefinition>,
    variant_pos: HashMap<String, usize>,
    colors: Vec<ColorCompletion>,
    color_hex: HashMap<String, String>,
    attr_colors: HashMap<String, Vec<AttrColor>>,
    dynamics: Vec<DynamicCompletion>,
    attr_dynamics: HashMap<String, Vec<AttrDynamic>>,
    separator: String,
}

impl VocabularyIndex {
    pub fn build(source: &VocabularySource) -> Self {
        let mut index = VocabularyIndex {
            separator: source.separator.clone(),
            ..Default::default()
        };

        for utility in &source.utilities {
            index.statics.push(utility.clone());
            if let Some((key, body)) = split_utility(utility) {
                index
                    .attr_values
                    .entry(key.to_string())
                    .or_default()
                    .push(body.to_string());
            }
        }

        for color in &source.colors {
            index.colors.push(color.clone());
            index
                .color_hex
                .insert(color.label.clone(), color.hex.clone());
            if let Some((key, body)) = split_utility(&color.label) {
                index
                    .attr_colors
                    .entry(key.to_string())
                    .or_default()
                    .push(AttrColor {
                        value: body.to_string(),
                        hex: color.hex.clone(),
                    });
            }
        }

        for (pos, variant) in source.variants.iter().enumerate() {
            index.variant_pos.insert(variant.name.clone(), pos);
            index.variants.push(variant.clone());
        }

        for dynamic in &source.dynamics {
            index.dynamics.push(dynamic.clone());
            if let Some((key, body)) = split_utility(&dynamic.label) {
                index
                    .attr_dynamics
                    .entry(key.to_string())
                    .or_default()
                    .push(AttrDynamic {
                        value: body.to_string(),
                        offset: dynamic.offset,
                    });
            }
        }

        index
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn statics(&self) -> &[String] {
        &self.statics
    }

    pub fn variants(&self) -> &[VariantDefinition] {
        &self.variants
    }

    pub fn variant(&self, name: &str) -> Option<&VariantDefinition> {
        self.variant_pos.get(name).map(|&pos| &self.variants[pos])
    }

    pub fn is_variant(&self, name: &str) -> bool {
        self.variant_pos.contains_key(name)
    }

    pub fn colors(&self) -> &[ColorCompletion] {
        &self.colors
    }

    /// Hex value for a qualified color label (e.g. `bg-red-500`)
    pub fn color_hex(&self, label: &str) -> Option<&str> {
        self.color_hex.get(label).map(String::as_str)
    }

    pub fn dynamics(&self) -> &[DynamicCompletion] {
        &self.dynamics
    }

    /// Whether `key` is a recognized attribute-mode key in any taxonomy
    pub fn has_attr_key(&self, key: &str) -> bool {
        self.attr_values.contains_key(key)
            || self.attr_colors.contains_key(key)
            || self.attr_dynamics.contains_key(key)
    }

    pub fn attr_values(&self, key: &str) -> &[String] {
        self.attr_values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn attr_colors(&self, key: &str) -> &[AttrColor] {
        self.attr_colors.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn attr_dynamics(&self, key: &str) -> &[AttrDynamic] {
        self.attr_dynamics
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sorted attribute keys for attribute-key completion. Sorted because the
    /// name-based sort keys make alphabetic order the display order anyway.
    pub fn attr_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.attr_values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Variant precedence ranks for class sorting: declared order, 1-based.
    /// Rank 0 is reserved for tokens with no variant prefix.
    pub fn variant_ranks(&self) -> HashMap<String, usize> {
        self.variants
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.clone(), i + 1))
            .collect()
    }
}
