//! Output module for persisting crawled pages
//!
//! This module handles:
//! - Mapping routes onto a mirrored directory tree
//! - Writing the plain-text copy of each page
//! - Packaging the converted content blocks as a `.docx` document
//! - Writing the route manifest at the end of a crawl

mod docx;
mod paths;
mod text;

pub use docx::{build_docx, write_docx};
pub use paths::{page_url, relative_path_for_route};
pub use text::{format_text_output, write_manifest, write_text, MANIFEST_FILE};

use crate::config::OutputOptions;
use crate::content::convert_html;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to package document: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Refusing to map route {route:?} to a file: {reason}")]
    UnsafeRoute { route: String, reason: &'static str },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Where the two copies of one page were written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedPage {
    pub text_path: Option<PathBuf>,
    pub docx_path: Option<PathBuf>,
}

impl SavedPage {
    pub fn is_complete(&self) -> bool {
        self.text_path.is_some() && self.docx_path.is_some()
    }
}

/// Writes both the text and the `.docx` copy of a page
///
/// The two writes are independent: a failure in one is logged and does not
/// prevent the other. Nothing is propagated to the caller; the returned
/// [`SavedPage`] records which files exist.
///
/// # Arguments
///
/// * `route` - The root-relative route, e.g. `/about/team`
/// * `content` - Sanitized markup for the page
/// * `text_root` - Root directory for `.txt` output
/// * `docx_root` - Root directory for `.docx` output
/// * `base_url` - The crawl's base URL, used for the `URL:` header
pub async fn save_content(
    route: &str,
    content: &str,
    text_root: &Path,
    docx_root: &Path,
    base_url: &str,
) -> SavedPage {
    let url = page_url(base_url, route);
    let mut saved = SavedPage::default();

    match write_text(route, content, text_root, &url).await {
        Ok(path) => {
            tracing::info!("Saved TXT content to: {}", path.display());
            saved.text_path = Some(path);
        }
        Err(e) => tracing::error!("Error saving TXT content for {}: {}", route, e),
    }

    let blocks = convert_html(content);
    tracing::debug!("Converted {} into {} blocks", route, blocks.len());

    match write_docx(route, &blocks, docx_root, &url).await {
        Ok(path) => {
            tracing::info!("Saved DOCX content to: {}", path.display());
            saved.docx_path = Some(path);
        }
        Err(e) => tracing::error!("Error saving DOCX content for {}: {}", route, e),
    }

    saved
}

/// Removes the output directory and recreates its `txt/` and `docx/` roots
///
/// A missing output directory is not an error.
pub async fn prepare_output_directory(options: &OutputOptions) -> OutputResult<()> {
    let root = &options.output_directory;
    match tokio::fs::remove_dir_all(root).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(OutputError::Io {
                path: root.clone(),
                source,
            })
        }
    }

    for dir in [options.text_dir(), options.docx_dir()] {
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| OutputError::Io {
                path: dir.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Creates the parent directories of `path`
pub(crate) async fn ensure_parent(path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_failure_reports_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("txt");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = write_text("/a/b", "<p>x</p>", &blocker, "http://example.com/a/b").await;
        match result {
            Err(OutputError::Io { path, .. }) => assert!(path.starts_with(&blocker)),
            other => panic!("expected an Io error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prepare_output_directory_clears_previous_run() {
        let dir = TempDir::new().unwrap();
        let options = OutputOptions {
            output_directory: dir.path().join("data"),
        };
        std::fs::create_dir_all(options.text_dir().join("old")).unwrap();
        std::fs::write(options.text_dir().join("old/page.txt"), "stale").unwrap();

        prepare_output_directory(&options).await.unwrap();

        assert!(options.text_dir().is_dir());
        assert!(options.docx_dir().is_dir());
        assert!(!options.text_dir().join("old").exists());
    }

    #[tokio::test]
    async fn test_prepare_output_directory_when_missing() {
        let dir = TempDir::new().unwrap();
        let options = OutputOptions {
            output_directory: dir.path().join("fresh"),
        };
        prepare_output_directory(&options).await.unwrap();
        assert!(options.docx_dir().is_dir());
    }

    #[tokio::test]
    async fn test_save_content_writes_both_formats() {
        let dir = TempDir::new().unwrap();
        let text_root = dir.path().join("txt");
        let docx_root = dir.path().join("docx");

        let saved = save_content(
            "/foo/bar",
            "<h1>Title</h1>",
            &text_root,
            &docx_root,
            "https://example.com",
        )
        .await;

        assert!(saved.is_complete());
        assert_eq!(saved.text_path, Some(text_root.join("foo/bar.txt")));
        assert_eq!(saved.docx_path, Some(docx_root.join("foo/bar.docx")));
        assert!(docx_root.join("foo/bar.docx").exists());
    }

    #[tokio::test]
    async fn test_save_content_swallows_unsafe_route() {
        let dir = TempDir::new().unwrap();
        let saved = save_content(
            "/../escape",
            "<p>x</p>",
            &dir.path().join("txt"),
            &dir.path().join("docx"),
            "https://example.com",
        )
        .await;

        assert_eq!(saved, SavedPage::default());
        assert!(!dir.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_one_failed_write_does_not_block_the_other() {
        let dir = TempDir::new().unwrap();
        // A regular file where the docx root directory should be
        let docx_root = dir.path().join("docx");
        std::fs::write(&docx_root, b"not a directory").unwrap();

        let saved = save_content(
            "/page",
            "<p>x</p>",
            &dir.path().join("txt"),
            &docx_root,
            "https://example.com",
        )
        .await;

        assert!(saved.text_path.is_some());
        assert!(saved.docx_path.is_none());
        assert!(!saved.is_complete());
    }
}
