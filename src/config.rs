//! Command-line configuration
//!
//! Turns the flat list of CLI tokens into an immutable [`Configuration`].

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{InsertError, InsertResult};
use crate::utils::path::{normalize_dir_path, normalize_path};
use crate::utils::url::is_external_url;

static LOCAL_ASSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(m?js|css|ico)$").expect("invalid local asset pattern"));
static EXTERNAL_ASSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://.*\.(m?js|css|ico)(\?.*)?$")
        .expect("invalid external asset pattern")
});

/// Flags taking every following token up to the next `--` flag
const VARIADIC_FLAGS: [&str; 2] = ["--assets", "--roots"];

/// Kind of asset, decided by its file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKind {
    Js,
    Css,
    Ico,
    Unknown,
}

/// Classifies an asset path or external URL by extension
///
/// Matching is case-insensitive and `.mjs` counts as JavaScript. External
/// URLs may carry a query string after the extension, local paths may not.
pub fn classify_asset(asset: &str) -> AssetKind {
    let captures = if is_external_url(asset) {
        EXTERNAL_ASSET_RE.captures(asset)
    } else {
        LOCAL_ASSET_RE.captures(asset)
    };

    let extension = captures
        .and_then(|captures| captures.get(1))
        .map(|extension| extension.as_str().to_ascii_lowercase());

    match extension.as_deref() {
        Some("js") | Some("mjs") => AssetKind::Js,
        Some("css") => AssetKind::Css,
        Some("ico") => AssetKind::Ico,
        _ => AssetKind::Unknown,
    }
}

/// Everything one run needs to know, fixed once resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    input_file: String,
    output_file: String,
    assets: BTreeMap<AssetKind, Vec<String>>,
    root_dirs: Vec<String>,
    verbose: bool,
    strict: bool,
}

impl Configuration {
    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    /// Assets of one kind, in the order they were given
    pub fn assets(&self, kind: AssetKind) -> &[String] {
        self.assets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Root directories, longest first
    pub fn root_dirs(&self) -> &[String] {
        &self.root_dirs
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// Describes the command line understood by [`resolve_args`]
pub fn command() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("html")
                .long("html")
                .value_name("PATH")
                .required(true)
                .help("HTML document to read"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("PATH")
                .required(true)
                .help("Where to write the resulting document"),
        )
        .arg(
            Arg::new("assets")
                .long("assets")
                .value_name("PATH")
                .num_args(0..)
                .action(ArgAction::Append)
                .help("Scripts, stylesheets and icons to insert, in order"),
        )
        .arg(
            Arg::new("roots")
                .long("roots")
                .value_name("DIR")
                .num_args(0..)
                .action(ArgAction::Append)
                .help("Directory prefixes stripped from asset paths"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail on assets of unknown type instead of skipping them"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log the configuration and every path decision"),
        )
}

fn values(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}

/// Attaches each value of a variadic list to its flag, `--assets=<value>`
///
/// clap would end the list after an attached value and would read a value
/// like `-legacy.js` as a short flag. Only tokens starting with `--` end a list.
fn attach_variadic_values(tokens: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut attached = Vec::new();
    let mut current: Option<&str> = None;

    for token in tokens {
        let long_flag = token.to_str().filter(|text| text.starts_with("--"));

        if let Some(text) = long_flag {
            let (name, value) = match text.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (text, None),
            };
            current = VARIADIC_FLAGS.iter().copied().find(|flag| *flag == name);

            match (current, value) {
                (Some(flag), Some(value)) => attached.push(format!("{flag}={value}").into()),
                // A bare variadic flag only opens its list
                (Some(_), None) => {}
                (None, _) => attached.push(OsString::from(text)),
            }
        } else if let Some(flag) = current {
            let mut value = OsString::from(format!("{flag}="));
            value.push(&token);
            attached.push(value);
        } else {
            attached.push(token);
        }
    }

    attached
}

/// Builds a [`Configuration`] from CLI tokens, without the program name
///
/// `--flag=value` and `--flag value` are equivalent. `--assets` and `--roots`
/// take every following token up to the next flag and may be repeated.
pub fn resolve_args<I, T>(tokens: I) -> InsertResult<Configuration>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv = std::iter::once(OsString::from(crate_name!()))
        .chain(attach_variadic_values(tokens.into_iter().map(Into::into)));
    let matches = command().try_get_matches_from(argv)?;

    let input_file = matches
        .get_one::<String>("html")
        .map(|path| normalize_path(path))
        .ok_or_else(|| InsertError::config("missing required --html"))?;
    let output_file = matches
        .get_one::<String>("out")
        .map(|path| normalize_path(path))
        .ok_or_else(|| InsertError::config("missing required --out"))?;
    let strict = matches.get_flag("strict");

    let mut assets: BTreeMap<AssetKind, Vec<String>> = BTreeMap::new();
    for asset in values(&matches, "assets") {
        assets.entry(classify_asset(&asset)).or_default().push(asset);
    }

    if strict {
        if let Some(unknown) = assets.get(&AssetKind::Unknown) {
            return Err(InsertError::config(format!(
                "assets of unknown type: {}",
                unknown.join(", ")
            )));
        }
    }

    let mut root_dirs: Vec<String> = values(&matches, "roots")
        .iter()
        .map(|dir| normalize_dir_path(dir))
        .collect();
    // Stable, so equally long roots keep their order
    root_dirs.sort_by(|a, b| b.len().cmp(&a.len()));

    Ok(Configuration {
        input_file,
        output_file,
        assets,
        root_dirs,
        verbose: matches.get_flag("verbose"),
        strict,
    })
}
