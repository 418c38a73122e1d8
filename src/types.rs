//! Core types for utilisense

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Position in a document (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

// ============================================================================
// Ranking
// ============================================================================

/// Fixed priority group used to order completion candidates.
///
/// The host sorts completion lists lexicographically by `sort_text`, so sort
/// keys are rendered as `"{rank}-{index:08}"`: any color key compares below
/// any static-utility key, and so on, regardless of list sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    Color,
    Static,
    Variant,
    Dynamic,
}

impl Taxonomy {
    pub fn rank(self) -> u8 {
        match self {
            Taxonomy::Color => 0,
            Taxonomy::Static => 1,
            Taxonomy::Variant => 2,
            Taxonomy::Dynamic => 3,
        }
    }

    /// Sort key for the item at `index` within this taxonomy's source order.
    pub fn sort_key(self, index: usize) -> String {
        format!("{}-{:08}", self.rank(), index)
    }
}

/// Sort key for name-ordered groups (attribute-key mode), where the host's
/// alphabetic sort within a group is the intended order.
pub fn named_sort_key(group: u8, name: &str) -> String {
    format!("{}-{}", group, name)
}

// ============================================================================
// Completion Types
// ============================================================================

/// Kind of completion item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    /// Color-producing utility (swatch-decorated by the host)
    Color,
    /// Static utility class or attribute value body
    Utility,
    /// Variant prefix (responsive breakpoint, pseudo-state)
    Variant,
    /// Dynamic utility with a placeholder needing post-insert selection
    Dynamic,
    /// Attribute key in attribute mode
    AttrKey,
    /// Variant offered as an attribute-mode key
    AttrVariant,
}

/// Editor command attached to a completion item, executed after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Reopen the completion list (walks the user key -> value)
    TriggerSuggest,
    /// Move the cursor left selecting `chars` characters (placeholder values)
    SelectLeft { chars: u32 },
}

/// Payload carried by an item so its documentation can be resolved lazily,
/// without re-classifying the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveData {
    /// Interpret a full utility class
    Utility { class: String },
    /// Color utility; resolved CSS goes into `detail`
    Color { class: String },
    /// Bare variant preview with a placeholder target
    Variant { name: String },
    /// Variant offered as an attribute-mode key
    VariantAttr { name: String },
    /// Attribute key preview (`[key~="&"]` shape)
    AttrKey { key: String },
    /// Attribute-mode value body
    AttrValue { key: String, value: String },
    /// Attribute-mode color value; resolved CSS goes into `detail`
    AttrColor { key: String, value: String },
    /// Variant typed inside an attribute-mode value
    AttrVariant { key: String, variant: String },
}

/// A completion item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Label shown in completion list
    pub label: String,

    /// Kind of completion
    pub kind: CompletionKind,

    /// Text to insert
    pub insert_text: String,

    /// Whether insert_text is a snippet
    #[serde(default)]
    pub is_snippet: bool,

    /// Sort key; host sorts lexicographically
    pub sort_text: String,

    /// Short detail text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Full documentation (markdown), filled in by lazy resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Post-insertion editor command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,

    /// Lazy resolution payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveData>,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionKind, sort_text: String) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            is_snippet: false,
            sort_text,
            detail: None,
            documentation: None,
            command: None,
            resolve: None,
        }
    }

    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    pub fn with_resolve(mut self, data: ResolveData) -> Self {
        self.resolve = Some(data);
        self
    }

    pub fn as_snippet(mut self) -> Self {
        self.is_snippet = true;
        self
    }
}

/// Result of completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
    #[serde(default)]
    pub is_incomplete: bool,
}

impl CompletionResult {
    pub fn new(items: Vec<CompletionItem>) -> Self {
        Self {
            items,
            is_incomplete: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            is_incomplete: false,
        }
    }
}

// ============================================================================
// Hover Types
// ============================================================================

/// Hover information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverInfo {
    /// Main content (markdown)
    pub content: String,

    /// Optional range this hover applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(Position, Position)>,
}

impl HoverInfo {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, start: Position, end: Position) -> Self {
        self.range = Some((start, end));
        self
    }
}

/// Result of hover request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<HoverInfo>,
}

impl HoverResult {
    pub fn some(info: HoverInfo) -> Self {
        Self { info: Some(info) }
    }

    pub fn none() -> Self {
        Self { info: None }
    }
}

// ============================================================================
// Color Decoration Types
// ============================================================================

/// A color swatch span: byte offsets into the document plus the RGB value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub start: usize,
    pub end: usize,
    pub rgb: [u8; 3],
}

// ============================================================================
// Configuration
// ============================================================================

/// Feature configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Master switch for completion
    pub enable_code_completion: bool,
    pub enable_utility_completion: bool,
    pub enable_variant_completion: bool,
    pub enable_dynamic_completion: bool,
    pub enable_hover_preview: bool,
    pub enable_color_decorators: bool,
    /// Convert rem units to px in rendered previews
    pub enable_rem_to_px_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_code_completion: true,
            enable_utility_completion: true,
            enable_variant_completion: true,
            enable_dynamic_completion: true,
            enable_hover_preview: true,
            enable_color_decorators: true,
            enable_rem_to_px_preview: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}
