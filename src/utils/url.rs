pub use url::Url;

/// Checks whether the asset is a scheme-qualified URL such as `https://...`
///
/// Drive-letter paths (`C:/app.js`) and opaque URLs (`data:...`) are not
/// considered external.
pub fn is_external_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed_url) => input
            .get(parsed_url.scheme().len()..)
            .map_or(false, |rest| rest.starts_with("://")),
        Err(_) => false,
    }
}
