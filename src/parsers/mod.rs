//! # Parsers
//!
//! - `html` - HTML document parsing, asset tag insertion and serialization

pub mod html;

// Re-export commonly used items for convenience
pub use html::{html_to_dom, insert_assets, serialize_document};
