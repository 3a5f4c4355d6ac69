//! Lexical path handling for asset URLs
//!
//! Every function here works on forward-slash strings and never touches the
//! filesystem. The one exception is [`relative_path`], which consults the
//! working directory when the source directory climbs above it.

use tracing::debug;

/// Prefix under which sandboxed build systems stage external dependencies
const EXTERNAL_PREFIX: &str = "./external/";

/// Resolves `.`/`..` segments and collapses separators, keeping a trailing slash
fn normalize_lexically(path: &str) -> String {
    let path = path.replace('\\', "/");
    let is_absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().map_or(false, |last| *last != "..") {
                    segments.pop();
                } else if !is_absolute {
                    // Nothing left to climb out of in an absolute path
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    let mut normalized = if is_absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    };

    if path.ends_with('/') && !normalized.ends_with('/') {
        normalized.push('/');
    }

    normalized
}

/// Normalizes a path and makes sure relative paths start with `./`
///
/// ```
/// use html_insert_assets::utils::path::normalize_path;
///
/// assert_eq!(normalize_path("a/b/../c"), "./a/c");
/// assert_eq!(normalize_path("/a/b"), "/a/b");
/// assert_eq!(normalize_path("a\\b.js"), "./a/b.js");
/// ```
pub fn normalize_path(path: &str) -> String {
    let normalized = normalize_lexically(path);

    if normalized.starts_with('/') || normalized.starts_with('.') {
        normalized
    } else {
        format!("./{normalized}")
    }
}

/// Same as [`normalize_path`], with exactly one trailing slash
pub fn normalize_dir_path(dir: &str) -> String {
    let mut normalized = normalize_path(dir);

    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    normalized
}

/// Undoes the `./external/` staging prefix, restoring the source-relative path
pub fn remove_external(path: &str) -> String {
    match path.strip_prefix(EXTERNAL_PREFIX) {
        Some(rest) => normalize_path(rest),
        None => path.to_string(),
    }
}

/// Strips the most specific root directory that prefixes `path`
///
/// Roots are expected to be ordered longest-first already; the longest match
/// wins either way.
pub fn remove_root_path(path: &str, root_dirs: &[String]) -> String {
    let stripped = root_dirs
        .iter()
        .filter(|root| path.starts_with(root.as_str()))
        .max_by_key(|root| root.len())
        .map(|root| &path[root.len()..]);

    match stripped {
        Some(rest) => {
            debug!("stripped root from \"{path}\": \"{rest}\"");
            rest.to_string()
        }
        None => path.to_string(),
    }
}

/// Directory containing `path`, in the same lexical form
fn parent_dir(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
        None => ".",
    }
}

fn current_dir() -> Option<String> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.to_string_lossy().replace('\\', "/"))
}

fn anchor(path: &str, cwd: Option<&str>) -> String {
    match cwd {
        Some(cwd) if !path.starts_with('/') => normalize_lexically(&format!("{cwd}/{path}")),
        _ => normalize_lexically(path),
    }
}

/// Computes the relative path leading from directory `from` to `to`
///
/// Both paths are taken relative to the same working directory, which is
/// only looked up when one of them cannot be resolved lexically.
pub fn relative_path(from: &str, to: &str) -> String {
    let mut from = normalize_lexically(from);
    let mut to = normalize_lexically(to);

    if from.starts_with('/') != to.starts_with('/') || from.starts_with("..") {
        let cwd = current_dir();
        from = anchor(&from, cwd.as_deref());
        to = anchor(&to, cwd.as_deref());
    }

    let from_segments: Vec<&str> = from
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    let to_segments: Vec<&str> = to
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let common = from_segments
        .iter()
        .zip(to_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_segments.len() - common];
    parts.extend_from_slice(&to_segments[common..]);
    parts.join("/")
}

/// Makes `path` relative to the output document's directory
///
/// Absolute paths are served as-is.
pub fn relative_to_html(path: &str, output_dir: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        relative_path(output_dir, path)
    }
}

/// Root-stripped directory of the output document, never absolute
pub fn html_output_dir(output_file: &str, root_dirs: &[String]) -> String {
    let output_file = normalize_path(output_file);
    let dir = normalize_dir_path(parent_dir(&output_file));
    let dir = remove_root_path(&dir, root_dirs);

    match dir.strip_prefix('/') {
        Some(rest) => format!("./{rest}"),
        None => dir,
    }
}

/// Turns asset paths into browser URLs relative to one output document
pub struct UrlResolver<'a> {
    root_dirs: &'a [String],
    output_dir: String,
    timestamp: &'a dyn Fn(&str) -> String,
}

impl<'a> UrlResolver<'a> {
    pub fn new(
        output_file: &str,
        root_dirs: &'a [String],
        timestamp: &'a dyn Fn(&str) -> String,
    ) -> Self {
        let output_dir = html_output_dir(output_file, root_dirs);
        debug!("output directory for URLs: \"{output_dir}\"");

        Self {
            root_dirs,
            output_dir,
            timestamp,
        }
    }

    /// Computes the cache-busted URL for a local asset
    ///
    /// The timestamp function receives the asset exactly as given on the
    /// command line.
    pub fn to_url(&self, original_path: &str) -> String {
        let path = normalize_path(original_path);
        let path = remove_external(&path);
        let path = remove_root_path(&path, self.root_dirs);
        let path = relative_to_html(&path, &self.output_dir);
        let path = normalize_path(&path);

        let stamp = (self.timestamp)(original_path);
        debug!("\"{original_path}\" -> \"{path}\" (v={stamp})");

        format!("{path}?v={stamp}")
    }
}
