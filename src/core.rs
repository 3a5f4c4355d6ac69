use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Configuration;
use crate::parsers::html::{has_explicit_tag, html_to_dom, insert_assets, serialize_document};
use crate::utils::path::UrlResolver;

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Represents errors that can occur while inserting assets
///
/// Every variant is fatal: the run stops at the first one.
#[derive(Debug, Error)]
pub enum InsertError {
    /// Bad or missing command-line arguments, or a strict-mode violation
    #[error("configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<clap::Error>,
    },

    /// The input document lacks `<head>` or `<body>`
    #[error("document error: {0}")]
    Document(String),

    /// Reading the input or writing the output failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InsertError {
    pub fn config(message: impl Into<String>) -> Self {
        InsertError::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        InsertError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<clap::Error> for InsertError {
    fn from(err: clap::Error) -> Self {
        // Keep only the summary, without usage and hints
        let rendered = err.to_string();
        let summary = rendered.split("\n\n").next().unwrap_or_default();
        let message = summary
            .trim_start_matches("error: ")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        InsertError::Config {
            message,
            source: Some(err),
        }
    }
}

pub type InsertResult<T> = Result<T, InsertError>;

pub type ReadFn = dyn Fn(&Path) -> io::Result<String>;
pub type WriteFn = dyn Fn(&Path, &str) -> io::Result<()>;
pub type TimestampFn = dyn Fn(&str) -> String;

/// Side effects of a run, replaceable for testing
///
/// `timestamp` receives each local asset exactly as given on the command line
/// and returns the cache-busting value for it.
pub struct Collaborators {
    pub read: Box<ReadFn>,
    pub write: Box<WriteFn>,
    pub timestamp: Box<TimestampFn>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            read: Box::new(|path: &Path| fs::read_to_string(path)),
            write: Box::new(write_output),
            timestamp: Box::new(current_timestamp),
        }
    }
}

/// Current time in milliseconds, whatever the asset
pub fn current_timestamp(_asset: &str) -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Writes the document, creating missing parent directories first
pub fn write_output(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)
}

/// Inserts the configured assets into an HTML document held in memory
///
/// # Arguments
///
/// * `html` - Source markup, which must contain explicit `<head>` and `<body>` tags
/// * `config` - Resolved configuration
/// * `timestamp` - Cache-busting value for each local asset
///
/// # Returns
///
/// The serialized document, or a `Document` error if a required tag is missing.
///
/// # Examples
///
/// ```
/// use html_insert_assets::{insert_assets_into_html, resolve_args};
///
/// let config = resolve_args(["--html", "in.html", "--out", "index.html", "--assets", "app.css"])
///     .unwrap();
/// let html = insert_assets_into_html(
///     "<html><head></head><body></body></html>",
///     &config,
///     &|_: &str| "1".to_string(),
/// )
/// .unwrap();
///
/// assert!(html.contains(r#"<link rel="stylesheet" href="./app.css?v=1">"#));
/// ```
pub fn insert_assets_into_html(
    html: &str,
    config: &Configuration,
    timestamp: &TimestampFn,
) -> InsertResult<String> {
    for tag_name in ["head", "body"] {
        if !has_explicit_tag(html, tag_name) {
            return Err(InsertError::Document(format!(
                "no <{tag_name}> element found in {}",
                config.input_file()
            )));
        }
    }

    let dom = html_to_dom(html);
    let resolver = UrlResolver::new(config.output_file(), config.root_dirs(), timestamp);
    insert_assets(&dom, config, &resolver)?;

    serialize_document(dom).map_err(|err| InsertError::io(config.output_file(), err))
}

/// Reads, rewrites and writes one document using the given collaborators
pub fn run_with(config: &Configuration, collaborators: &Collaborators) -> InsertResult<()> {
    debug!("{config:#?}");

    let input_file = Path::new(config.input_file());
    let output_file = Path::new(config.output_file());

    let html = (collaborators.read)(input_file).map_err(|err| InsertError::io(input_file, err))?;
    let output = insert_assets_into_html(&html, config, collaborators.timestamp.as_ref())?;
    (collaborators.write)(output_file, &output).map_err(|err| InsertError::io(output_file, err))?;

    info!("Wrote {}", output_file.display());
    Ok(())
}

/// Reads, rewrites and writes one document on the real filesystem
pub fn run(config: &Configuration) -> InsertResult<()> {
    run_with(config, &Collaborators::default())
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}
