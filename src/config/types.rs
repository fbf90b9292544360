use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Site-Scribe
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub output_options: OutputOptions,

    /// Routes containing any of these substrings are skipped
    pub exclude_routes: Vec<String>,

    pub scraper_options: ScraperOptions,

    pub exclude_options: ExcludeOptions,

    pub log_level: LogLevel,
}

impl Config {
    /// Returns true if `route` contains any configured exclusion pattern.
    ///
    /// This is a plain substring test: `/admin` excludes `/admin/login`
    /// and `/adminxyz` alike.
    pub fn is_route_excluded(&self, route: &str) -> bool {
        self.exclude_routes
            .iter()
            .any(|pattern| route.contains(pattern.as_str()))
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputOptions {
    /// Root directory for all crawl output; cleared at the start of every crawl
    pub output_directory: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("data"),
        }
    }
}

impl OutputOptions {
    /// Directory receiving the `.txt` files and the route manifest
    pub fn text_dir(&self) -> PathBuf {
        self.output_directory.join("txt")
    }

    /// Directory receiving the `.docx` files
    pub fn docx_dir(&self) -> PathBuf {
        self.output_directory.join("docx")
    }
}

/// HTTP behavior configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScraperOptions {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Per-attempt timeout (milliseconds)
    pub timeout: u64,

    /// Attempts per page before giving up
    pub max_retries: u32,

    /// Pause before each route fetch (milliseconds, 0 disables)
    pub request_delay: u64,
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_MAX_RETRIES: u32 = 3;

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            request_delay: 0,
        }
    }
}

// A zero or blank value in the file means "use the default", not "disable".
impl ScraperOptions {
    /// User-Agent to send; a blank value falls back to `Mozilla/5.0`
    pub fn user_agent(&self) -> &str {
        if self.user_agent.trim().is_empty() {
            DEFAULT_USER_AGENT
        } else {
            &self.user_agent
        }
    }

    /// Per-attempt timeout; `0` falls back to 5000ms
    pub fn timeout_duration(&self) -> Duration {
        match self.timeout {
            0 => Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }

    /// Delay between routes, or None when disabled
    pub fn request_delay_duration(&self) -> Option<Duration> {
        (self.request_delay > 0).then(|| Duration::from_millis(self.request_delay))
    }

    /// Number of fetch attempts; `0` falls back to 3
    pub fn attempts(&self) -> u32 {
        match self.max_retries {
            0 => DEFAULT_MAX_RETRIES,
            n => n,
        }
    }
}

/// Markup removed from every fetched page before sanitization
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExcludeOptions {
    /// Class names; a value with spaces matches elements carrying all of them
    pub exclude_classes: Vec<String>,

    /// Tag names, e.g. "header" or "footer"
    pub exclude_tags: Vec<String>,
}

/// Console verbosity
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    ///
    /// `Error` still lets error events through.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "site_scribe=info,warn",
            Self::Debug => "site_scribe=debug,info",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
