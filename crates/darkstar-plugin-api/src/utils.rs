//! Common utilities for plugin implementations

use reqwest::Url;

use crate::{
    PluginError,
    PluginResult,
};

/// Parses an absolute http/https URL
pub fn parse_http_url(input: &str) -> PluginResult<Url> {
    let url = Url::parse(input).map_err(|e| PluginError::InvalidUrl(format!("{input}: {e}")))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(PluginError::InvalidUrl(format!(
            "{input}: only http and https URLs are accepted"
        ))),
    }
}

/// Path plus query string, as most purge APIs address objects
///
/// # Example
///
/// ```
/// use darkstar_plugin_api::utils::path_and_query;
///
/// assert_eq!(path_and_query("https://example.com/a/b?c=d").unwrap(), "/a/b?c=d");
/// ```
pub fn path_and_query(input: &str) -> PluginResult<String> {
    let url = parse_http_url(input)?;
    Ok(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    })
}
