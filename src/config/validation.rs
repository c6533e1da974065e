use crate::config::types::{CrawlConfig, RawConfig};
use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Validates a raw document and converts it into a typed configuration
pub fn validate(raw: RawConfig) -> Result<CrawlConfig, ConfigError> {
    let start_urls = validate_start_urls(&raw)?;
    validate_globs("scrapeUrlGlobs", &raw.scrape_url_globs)?;
    validate_globs("paginationUrlGlobs", &raw.pagination_url_globs)?;
    validate_globs("ignoreUrlGlobs", &raw.ignore_url_globs)?;

    if raw.max_requests_per_crawl < 1 {
        return Err(ConfigError::Validation(format!(
            "maxRequestsPerCrawl must be >= 1, got {}",
            raw.max_requests_per_crawl
        )));
    }

    if raw.output_file.trim().is_empty() {
        return Err(ConfigError::Validation(
            "outputFile cannot be empty".to_string(),
        ));
    }

    let delay = validate_seconds("delaySeconds", raw.delay_seconds, true)?;
    let timeout = validate_seconds("timeoutSeconds", raw.timeout_seconds, false)?;

    if let Some(agent) = &raw.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "userAgent cannot be empty when given".to_string(),
            ));
        }
    }

    Ok(CrawlConfig {
        start_urls,
        scrape_url_globs: raw.scrape_url_globs,
        pagination_url_globs: raw.pagination_url_globs,
        ignore_url_globs: raw.ignore_url_globs,
        max_requests_per_crawl: raw.max_requests_per_crawl,
        output_file: PathBuf::from(raw.output_file),
        delay,
        timeout,
        user_agent: raw.user_agent,
    })
}

/// Start URLs must be present and non-empty; unparseable entries are kept
/// here and dropped at seeding time
fn validate_start_urls(raw: &RawConfig) -> Result<Vec<String>, ConfigError> {
    let entries = raw
        .start_urls
        .as_ref()
        .ok_or_else(|| ConfigError::Validation("startUrls is required".to_string()))?;

    if entries.is_empty() {
        return Err(ConfigError::Validation(
            "startUrls must contain at least one URL".to_string(),
        ));
    }

    Ok(entries.iter().map(|e| e.as_str().to_string()).collect())
}

fn validate_globs(field: &str, patterns: &[String]) -> Result<(), ConfigError> {
    if let Some(index) = patterns.iter().position(|p| p.is_empty()) {
        return Err(ConfigError::Validation(format!(
            "{}[{}] cannot be an empty pattern",
            field, index
        )));
    }
    Ok(())
}

fn validate_seconds(field: &str, value: f64, allow_zero: bool) -> Result<Duration, ConfigError> {
    let in_range = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !value.is_finite() || !in_range {
        let bound = if allow_zero { ">= 0" } else { "> 0" };
        return Err(ConfigError::Validation(format!(
            "{} must be a finite number {}, got {}",
            field, bound, value
        )));
    }
    Ok(Duration::from_secs_f64(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::StartUrl;

    fn raw_config() -> RawConfig {
        RawConfig {
            start_urls: Some(vec![StartUrl::Plain("https://example.com".to_string())]),
            scrape_url_globs: vec![],
            pagination_url_globs: vec![],
            ignore_url_globs: vec![],
            max_requests_per_crawl: 100,
            output_file: "data/output.json".to_string(),
            delay_seconds: 0.0,
            timeout_seconds: 20.0,
            user_agent: None,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = validate(raw_config()).unwrap();
        assert_eq!(config.start_urls, vec!["https://example.com"]);
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_missing_start_urls() {
        let mut raw = raw_config();
        raw.start_urls = None;
        assert!(matches!(validate(raw), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_start_urls() {
        let mut raw = raw_config();
        raw.start_urls = Some(vec![]);
        assert!(matches!(validate(raw), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut raw = raw_config();
        raw.max_requests_per_crawl = 0;
        assert!(validate(raw).is_err());
    }

    #[test]
    fn test_negative_delay_rejected() {
        let mut raw = raw_config();
        raw.delay_seconds = -1.0;
        assert!(validate(raw).is_err());
    }

    #[test]
    fn test_nan_delay_rejected() {
        let mut raw = raw_config();
        raw.delay_seconds = f64::NAN;
        assert!(validate(raw).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut raw = raw_config();
        raw.timeout_seconds = 0.0;
        assert!(validate(raw).is_err());
    }

    #[test]
    fn test_fractional_delay() {
        let mut raw = raw_config();
        raw.delay_seconds = 0.25;
        let config = validate(raw).unwrap();
        assert_eq!(config.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_glob_rejected() {
        let mut raw = raw_config();
        raw.ignore_url_globs = vec!["*.pdf".to_string(), String::new()];
        let err = validate(raw).unwrap_err();
        assert!(err.to_string().contains("ignoreUrlGlobs[1]"));
    }

    #[test]
    fn test_empty_output_file_rejected() {
        let mut raw = raw_config();
        raw.output_file = "  ".to_string();
        assert!(validate(raw).is_err());
    }
}
