//! Plain-text output and the route manifest

use crate::output::paths::output_path;
use crate::output::{ensure_parent, OutputError, OutputResult};
use std::path::{Path, PathBuf};

/// Manifest file name, written in the text output root
pub const MANIFEST_FILE: &str = "routes.txt";

/// Formats the text copy of a page: a `URL:` header, a blank line, then the
/// sanitized markup as-is
pub fn format_text_output(url: &str, content: &str) -> String {
    format!("URL: {}\n\n{}", url, content)
}

/// Writes `<text_root>/<route>.txt` and returns its path
pub async fn write_text(
    route: &str,
    content: &str,
    text_root: &Path,
    url: &str,
) -> OutputResult<PathBuf> {
    let path = output_path(text_root, route, "txt")?;
    ensure_parent(&path).await?;

    tokio::fs::write(&path, format_text_output(url, content))
        .await
        .map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// Writes the processed routes, one per line, to `<text_root>/routes.txt`
pub async fn write_manifest(routes: &[String], text_root: &Path) -> OutputResult<PathBuf> {
    let path = text_root.join(MANIFEST_FILE);
    ensure_parent(&path).await?;

    tokio::fs::write(&path, routes.join("\n"))
        .await
        .map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}
