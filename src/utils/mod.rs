//! # Utilities
//!
//! - `path` - lexical path normalization and asset URL computation
//! - `url` - detection of external, scheme-qualified asset URLs

pub mod path;
pub mod url;

// Re-export commonly used items for convenience
pub use path::{
    normalize_dir_path, normalize_path, relative_to_html, remove_external, remove_root_path,
    UrlResolver,
};
pub use url::is_external_url;
