//! Configuration module for Site-Scribe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file yields the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use site_scribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-scribe.toml")).unwrap();
//! println!("Writing output to: {}", config.output_options.output_directory.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ExcludeOptions, LogLevel, OutputOptions, ScraperOptions};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_or_default, load_config_with_hash,
    DEFAULT_CONFIG_FILE,
};
