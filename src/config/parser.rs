use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "site-scribe.toml";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the configuration, falling back to defaults when the file does not exist
///
/// Returns the config together with the file's hash, or `None` when the
/// defaults were used. A file that exists but cannot be read, parsed, or
/// validated is still an error.
///
/// Nothing is logged here; this runs before the subscriber is installed.
pub fn load_config_or_default(path: &Path) -> Result<(Config, Option<String>), ConfigError> {
    if !path.exists() {
        return Ok((Config::default(), None));
    }

    let (config, hash) = load_config_with_hash(path)?;
    Ok((config, Some(hash)))
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged on load so two runs can be matched to the settings they used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
