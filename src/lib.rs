//! # html-insert-assets
//!
//! Inserts `<script>` and `<link>` tags for build outputs into an HTML
//! document, with URLs relative to where the document is written and a
//! cache-busting query on every local asset.
//!
//! ## Modules
//!
//! - `config` - command-line resolution into a `Configuration`
//! - `core` - errors, collaborators and the read-rewrite-write pipeline
//! - `parsers` - HTML parsing, tag insertion and serialization
//! - `utils` - path normalization and URL helpers

pub mod config;
pub mod core;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::config::{classify_asset, resolve_args, AssetKind, Configuration};
pub use crate::core::{
    insert_assets_into_html, run, run_with, Collaborators, InsertError, InsertResult,
};
