//! Asset tag insertion
//!
//! Scripts are appended to `<body>`, stylesheets and icons to `<head>`, each
//! kind in the order the assets were given. Scripts follow the differential
//! loading convention: `*.mjs` and `*.es2015.js` bundles load as modules, and
//! a classic script with a module twin becomes the `nomodule` fallback.

use markup5ever_rcdom::{Handle, RcDom};
use tracing::debug;

use crate::config::{AssetKind, Configuration};
use crate::core::{InsertError, InsertResult};
use crate::utils::path::UrlResolver;
use crate::utils::url::is_external_url;

use super::dom::{append_child, create_tag, find_element_by_name};

/// How a local script is loaded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptKind {
    /// `type="module"`, run by module-capable browsers only
    Module,
    /// `nomodule`, the legacy fallback for a module bundle
    NoModule,
    /// A classic script without extra attributes
    Plain,
}

/// Checks for the `.mjs` or `.es2015.js` module naming, ignoring case
pub fn is_module_script(path: &str) -> bool {
    let lowercased = path.to_ascii_lowercase();
    lowercased.ends_with(".mjs") || lowercased.ends_with(".es2015.js")
}

/// Checks whether a classic script has a module twin among the scripts
///
/// `app.js` is twinned by `app.mjs` or `app.es2015.js`.
pub fn has_matching_module(path: &str, scripts: &[String]) -> bool {
    let stem = match path.len().checked_sub(3).and_then(|end| path.get(..end)) {
        Some(stem) => stem,
        None => return false,
    };
    let module = format!("{stem}.mjs");
    let es2015 = format!("{stem}.es2015.js");

    scripts
        .iter()
        .any(|script| script.eq_ignore_ascii_case(&module) || script.eq_ignore_ascii_case(&es2015))
}

pub fn script_kind(path: &str, scripts: &[String]) -> ScriptKind {
    if is_module_script(path) {
        ScriptKind::Module
    } else if has_matching_module(path, scripts) {
        ScriptKind::NoModule
    } else {
        ScriptKind::Plain
    }
}

fn insert_scripts(dom: &RcDom, body: &Handle, scripts: &[String], resolver: &UrlResolver) {
    for path in scripts {
        let script = if is_external_url(path) {
            debug!("external script \"{path}\" kept verbatim");
            create_tag(dom, "script", &[("src", path.as_str())])
        } else {
            let url = resolver.to_url(path);
            match script_kind(path, scripts) {
                ScriptKind::Module => {
                    create_tag(dom, "script", &[("type", "module"), ("src", url.as_str())])
                }
                ScriptKind::NoModule => {
                    create_tag(dom, "script", &[("nomodule", ""), ("src", url.as_str())])
                }
                ScriptKind::Plain => create_tag(dom, "script", &[("src", url.as_str())]),
            }
        };

        append_child(body, script);
    }
}

/// Appends tags for every configured asset to the document's head and body
pub fn insert_assets(
    dom: &RcDom,
    config: &Configuration,
    resolver: &UrlResolver,
) -> InsertResult<()> {
    let head = find_element_by_name(&dom.document, "head")
        .ok_or_else(|| InsertError::Document("no <head> element found".to_string()))?;
    let body = find_element_by_name(&dom.document, "body")
        .ok_or_else(|| InsertError::Document("no <body> element found".to_string()))?;

    insert_scripts(dom, &body, config.assets(AssetKind::Js), resolver);

    for path in config.assets(AssetKind::Css) {
        let url = resolver.to_url(path);
        append_child(
            &head,
            create_tag(dom, "link", &[("rel", "stylesheet"), ("href", url.as_str())]),
        );
    }

    for path in config.assets(AssetKind::Ico) {
        let url = resolver.to_url(path);
        append_child(
            &head,
            create_tag(
                dom,
                "link",
                &[("rel", "shortcut icon"), ("type", "image/ico"), ("href", url.as_str())],
            ),
        );
    }

    for path in config.assets(AssetKind::Unknown) {
        debug!("skipping \"{path}\": unknown asset type");
    }

    Ok(())
}
