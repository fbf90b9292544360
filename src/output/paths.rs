//! Route to file-path mapping

use crate::output::{OutputError, OutputResult};
use std::path::{Path, PathBuf};

/// File stem used for the site root route `/`
const INDEX_STEM: &str = "index";

/// Joins the crawl's base URL and a route into the page's full URL
///
/// A trailing `/` on the base URL is dropped so that `https://example.com/`
/// and `/about` do not produce a double slash.
pub fn page_url(base_url: &str, route: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), route)
}

/// Maps a route onto a relative path, without extension
///
/// The leading `/` is stripped and the remaining segments become nested
/// directories. Empty segments are dropped; `/` itself maps to `index`.
/// Segments are never normalized: a route containing `.` or `..` segments
/// or a backslash is refused instead.
///
/// # Examples
///
/// ```
/// use site_scribe::output::relative_path_for_route;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     relative_path_for_route("/foo/bar").unwrap(),
///     PathBuf::from("foo").join("bar")
/// );
/// assert!(relative_path_for_route("/a/../b").is_err());
/// ```
pub fn relative_path_for_route(route: &str) -> OutputResult<PathBuf> {
    let unsafe_route = |reason| OutputError::UnsafeRoute {
        route: route.to_string(),
        reason,
    };

    if route.contains('\\') {
        return Err(unsafe_route("contains a backslash"));
    }

    let segments: Vec<&str> = route
        .trim_start_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(unsafe_route("contains a relative path segment"));
    }

    if segments.is_empty() {
        return Ok(PathBuf::from(INDEX_STEM));
    }

    Ok(segments.iter().collect())
}

/// Full output path for a route under `root` with the given extension
pub(crate) fn output_path(root: &Path, route: &str, extension: &str) -> OutputResult<PathBuf> {
    let relative = relative_path_for_route(route)?;
    let mut file_name = relative.into_os_string();
    file_name.push(".");
    file_name.push(extension);
    Ok(root.join(file_name))
}
