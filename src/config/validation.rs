use crate::config::types::{Config, ExcludeOptions, OutputOptions};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_output_options(&config.output_options)?;
    validate_exclude_options(&config.exclude_options)?;
    validate_exclude_routes(&config.exclude_routes)?;
    Ok(())
}

fn validate_output_options(options: &OutputOptions) -> Result<(), ConfigError> {
    if options.output_directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_exclude_options(options: &ExcludeOptions) -> Result<(), ConfigError> {
    if options.exclude_classes.iter().any(|c| c.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "exclude-classes cannot contain empty entries".to_string(),
        ));
    }

    if let Some(tag) = options
        .exclude_tags
        .iter()
        .find(|t| t.is_empty() || !t.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
    {
        return Err(ConfigError::Validation(format!(
            "exclude-tags entries must be tag names, got '{}'",
            tag
        )));
    }

    Ok(())
}

/// An empty pattern would match every route
fn validate_exclude_routes(routes: &[String]) -> Result<(), ConfigError> {
    if routes.iter().any(|r| r.is_empty()) {
        return Err(ConfigError::Validation(
            "exclude-routes cannot contain empty patterns".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_output_directory() {
        let mut config = Config::default();
        config.output_options.output_directory = PathBuf::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_and_blank_scraper_options_are_accepted() {
        // These fall back to defaults at use time
        let mut config = Config::default();
        config.scraper_options.user_agent = "  ".to_string();
        config.scraper_options.timeout = 0;
        config.scraper_options.max_retries = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_exclude_tag() {
        let mut config = Config::default();
        config.exclude_options.exclude_tags = vec!["div > p".to_string()];
        assert!(validate(&config).is_err());

        config.exclude_options.exclude_tags = vec!["header".to_string(), "h1".to_string()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_exclude_class() {
        let mut config = Config::default();
        config.exclude_options.exclude_classes = vec!["".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_exclude_route() {
        let mut config = Config::default();
        config.exclude_routes = vec!["/admin".to_string(), String::new()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
