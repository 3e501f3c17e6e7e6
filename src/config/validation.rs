use crate::config::types::{CaptureConfig, Config, GeneratorConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_generator_config(&config.generator)?;
    validate_capture_config(&config.capture)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates sitemap generator configuration
fn validate_generator_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates browser and settle protocol configuration
fn validate_capture_config(config: &CaptureConfig) -> Result<(), ConfigError> {
    if config.viewport_width < 1 || config.viewport_height < 1 {
        return Err(ConfigError::Validation(format!(
            "viewport must be at least 1x1, got {}x{}",
            config.viewport_width, config.viewport_height
        )));
    }

    if config.navigation_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "navigation-timeout-secs must be >= 1, got {}",
            config.navigation_timeout_secs
        )));
    }

    // A zero step would never reach the bottom of the page
    if config.scroll_step_px < 1 {
        return Err(ConfigError::Validation(format!(
            "scroll-step-px must be >= 1, got {}",
            config.scroll_step_px
        )));
    }

    if let Some(path) = &config.chrome_executable {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "chrome-executable cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dist_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "dist-dir cannot be empty".to_string(),
        ));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    if config.dist_dir == config.output_dir {
        return Err(ConfigError::Validation(format!(
            "dist-dir and output-dir must differ, both are '{}'",
            config.dist_dir.display()
        )));
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
    fn test_validate_crawler_name() {
        let mut config = Config::default();
        config.generator.crawler_name = "Bad Name!".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));

        config.generator.crawler_name = String::new();
        assert!(validate(&config).is_err());

        config.generator.crawler_name = "Shot-Bot2".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_contact_url() {
        let mut config = Config::default();
        config.generator.contact_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_capture_limits() {
        let mut config = Config::default();
        config.capture.navigation_timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.capture.viewport_width = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_output_dirs_differ() {
        let mut config = Config::default();
        config.output.output_dir = PathBuf::from("dist");
        assert!(validate(&config).is_err());
    }
}
