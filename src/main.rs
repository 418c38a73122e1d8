//! Utilisense CLI - Context-aware completion for utility-first CSS in markup
//!
//! # Usage
//!
//! ```bash
//! # Get completions at position
//! utilisense --vocab windi.json complete index.html --line 10 --column 5
//!
//! # Get hover preview
//! utilisense --vocab windi.json hover index.html --line 10 --column 5
//!
//! # List color swatch spans
//! utilisense --vocab windi.json colors index.html
//!
//! # Sort class lists in place
//! utilisense --vocab windi.json sort index.html --write
//! ```

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use utilisense::{Config, Engine, FileType, VocabularySource};

#[derive(Parser)]
#[command(name = "utilisense")]
#[command(about = "Context-aware completion engine for utility-first CSS in markup")]
#[command(version)]
struct Cli {
    /// Path to vocabulary file (JSON or YAML)
    #[arg(long, env = "UTILISENSE_VOCAB")]
    vocab: Option<PathBuf>,

    /// Path to configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, short, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Get completions at position
    Complete {
        /// Path to markup file
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,

        /// Resolve documentation for every item (normally lazy)
        #[arg(long)]
        resolve: bool,

        /// Maximum completions to return
        #[arg(long, default_value = "50")]
        max: usize,
    },

    /// Get hover preview at position
    Hover {
        /// Path to markup file
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,
    },

    /// Show the classified cursor context
    Context {
        /// Path to markup file
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,
    },

    /// List color swatch spans in a document
    Colors {
        /// Path to markup file
        file: PathBuf,
    },

    /// Sort class lists by variant precedence
    Sort {
        /// Path to markup file
        file: PathBuf,

        /// Rewrite the file instead of printing the result
        #[arg(long)]
        write: bool,
    },

    /// Show vocabulary statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match cli.vocab {
        Some(ref path) => VocabularySource::load(path)?,
        None => VocabularySource::default(),
    };

    let mut engine = Engine::new(&source);
    if let Some(ref path) = cli.config {
        engine.set_config(Config::load(path)?);
    }

    match cli.command {
        Commands::Complete {
            file,
            line,
            column,
            resolve,
            max,
        } => {
            let text = read(&file)?;
            let mut result = engine.complete(&text, line, column, file_type_of(&file));
            result.items.truncate(max);
            if resolve {
                result.items = result
                    .items
                    .into_iter()
                    .map(|item| engine.resolve(item))
                    .collect();
            }

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => {
                    if result.items.is_empty() {
                        println!("No completions found");
                    } else {
                        println!("Completions ({}):", result.items.len());
                        for item in &result.items {
                            let kind = format!("{:?}", item.kind);
                            let detail = item.detail.as_deref().unwrap_or("");
                            println!("  {:24} {:12} {}", item.label, kind, detail);
                        }
                    }
                }
            }
        }

        Commands::Hover { file, line, column } => {
            let text = read(&file)?;
            let result = engine.hover(&text, line, column, file_type_of(&file));

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => {
                    if let Some(info) = result.info {
                        println!("{}", info.content);
                    } else {
                        println!("No hover information");
                    }
                }
            }
        }

        Commands::Context { file, line, column } => {
            let text = read(&file)?;
            let ctx = engine.classify_at(&text, line, column, file_type_of(&file));

            match cli.format {
                OutputFormat::Json => {
                    #[derive(serde::Serialize)]
                    struct ContextOutput {
                        context: String,
                        attr_key: Option<String>,
                        variant: Option<String>,
                    }

                    let output = match ctx {
                        utilisense::Context::UtilityList { attr_variant } => ContextOutput {
                            context: "utility_list".to_string(),
                            attr_key: None,
                            variant: attr_variant,
                        },
                        utilisense::Context::AttrKey => ContextOutput {
                            context: "attr_key".to_string(),
                            attr_key: None,
                            variant: None,
                        },
                        utilisense::Context::AttrValue { key, variant } => ContextOutput {
                            context: "attr_value".to_string(),
                            attr_key: Some(key),
                            variant,
                        },
                        utilisense::Context::None => ContextOutput {
                            context: "none".to_string(),
                            attr_key: None,
                            variant: None,
                        },
                    };

                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    println!("Cursor context at {}:{}", line, column);
                    println!("  {:?}", ctx);
                }
            }
        }

        Commands::Colors { file } => {
            let text = read(&file)?;
            let infos = engine.document_colors(&text);

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&infos)?);
                }
                OutputFormat::Text => {
                    if infos.is_empty() {
                        println!("No colors found");
                    } else {
                        for info in &infos {
                            println!(
                                "  {:6}..{:6} #{:02x}{:02x}{:02x} {}",
                                info.start,
                                info.end,
                                info.rgb[0],
                                info.rgb[1],
                                info.rgb[2],
                                &text[info.start..info.end]
                            );
                        }
                    }
                }
            }
        }

        Commands::Sort { file, write } => {
            let text = read(&file)?;
            let sorted = engine.sort_document(&text);

            if write {
                if sorted != text {
                    std::fs::write(&file, &sorted)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    println!("Rewrote {}", file.display());
                } else {
                    println!("Already sorted");
                }
            } else {
                print!("{}", sorted);
            }
        }

        Commands::Stats => {
            let stats = engine.stats();

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                }
                OutputFormat::Text => {
                    println!("Vocabulary statistics:");
                    println!("  Utilities:      {}", stats.utilities);
                    println!("  Colors:         {}", stats.colors);
                    println!("  Variants:       {}", stats.variants);
                    println!("  Dynamics:       {}", stats.dynamics);
                    println!("  Attribute keys: {}", stats.attr_keys);
                }
            }
        }
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn file_type_of(path: &Path) -> FileType {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(FileType::from_extension)
        .unwrap_or_default()
}
