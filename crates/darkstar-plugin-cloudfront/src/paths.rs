//! Invalidation paths derived from the submitted URLs

use std::collections::HashSet;

use darkstar_plugin_api::utils::path_and_query;
use darkstar_plugin_api::PluginResult;

pub(crate) const WILDCARD: &str = "/*";

/// Invalidates every object of the distribution
pub(crate) fn distribution_paths() -> Vec<String> {
    vec![WILDCARD.to_string()]
}

/// `path?query` of each URL, duplicates removed, first occurrence kept
pub(crate) fn url_paths(urls: &[String]) -> PluginResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::with_capacity(urls.len());

    for url in urls {
        let path = path_and_query(url)?;
        if seen.insert(path.clone()) {
            paths.push(path);
        }
    }

    Ok(paths)
}

/// Wildcard below each directory: `dir/*`, or `dir*` when the directory
/// already ends with a slash
pub(crate) fn directory_paths(directories: &[String]) -> PluginResult<Vec<String>> {
    let wildcards: Vec<String> = directories
        .iter()
        .map(|directory| {
            if directory.ends_with('/') {
                format!("{directory}*")
            } else {
                format!("{directory}/*")
            }
        })
        .collect();

    url_paths(&wildcards)
}
