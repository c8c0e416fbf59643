//! Tracing configuration for inspecting a renaming pass.
//!
//! Supports three output formats controlled by `SHROUD_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, nested per pass
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Every assigned name, nested under the pass that assigned it
//! SHROUD_LOG=debug SHROUD_LOG_FORMAT=tree shroud --model model.json
//!
//! # Rejected candidates too
//! SHROUD_LOG="shroud_obfuscate=trace" shroud --model model.json
//!
//! # JSON for tooling
//! SHROUD_LOG=debug SHROUD_LOG_FORMAT=json shroud --model model.json
//! ```
//!
//! ## Spans and events
//!
//! - `obfuscate` (info): the whole pass, with the number of types.
//! - `obfuscate_types`, `obfuscate_members`, `obfuscate_metadata_names`
//!   (debug): one per phase, in that order.
//! - `shroud_obfuscate::name_obfuscator` emits one debug event per assigned
//!   type, namespace, member, module, alias or property name, and trace
//!   events for every rejected candidate.
//! - `shroud_obfuscate::type_obfuscator` warns about self-referencing,
//!   dangling or cyclic nesting records it had to ignore.
//!
//! Filter on a target to follow one part, e.g.
//! `SHROUD_LOG="shroud_obfuscate::type_obfuscator=debug"`.
//!
//! The subscriber is only initialised when `SHROUD_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "SHROUD_LOG";
const LOG_FORMAT_VAR: &str = "SHROUD_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parses a format name; unknown names fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `SHROUD_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_VAR) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `SHROUD_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with a mapping printed to stdout.
pub fn init_tracing() {
    let has_shroud_log = std::env::var(LOG_VAR).is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_shroud_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
