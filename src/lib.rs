//! Site-Scribe: a single-site content archiver
//!
//! This crate collects the internal links of a seed page, fetches every linked
//! page, reduces its markup to a small allow-list of structural tags and
//! stores the result as a plain-text file and a `.docx` document.

pub mod config;
pub mod content;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Site-Scribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Base URL must use http or https: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Site-Scribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{clean_content, convert_html, ContentBlock, HeadingLevel};
pub use crawler::{crawl, CrawlReport};
pub use state::CrawlState;
