//! HTML parsing, mutation and serialization
//!
//! - `dom`: parsing and basic DOM operations
//! - `assets`: insertion of script and link tags
//! - `serializer`: turning the DOM back into text

pub mod assets;
pub mod dom;
pub mod serializer;

pub use assets::{has_matching_module, insert_assets, is_module_script, script_kind, ScriptKind};
pub use dom::{
    append_child, create_tag, find_element_by_name, find_first_node, get_node_attr,
    get_node_name, has_explicit_tag, html_to_dom,
};
pub use serializer::serialize_document;
