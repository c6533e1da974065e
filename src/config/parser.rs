use crate::config::types::{CrawlConfig, RawConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates a configuration file
///
/// JSON is the expected format; a file with a `.toml` extension is read as
/// TOML using the same camelCase keys.
///
/// # Arguments
///
/// * `path` - Path to the input configuration document
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use meta_harvest::config::load_config;
///
/// let config = load_config(Path::new("data/inputs.sample.json")).unwrap();
/// println!("Budget: {}", config.max_requests_per_crawl);
/// ```
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content, is_toml(path))
}

/// Parses configuration text and validates it
pub fn parse_config(content: &str, toml_format: bool) -> Result<CrawlConfig, ConfigError> {
    let raw: RawConfig = if toml_format {
        toml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };

    validate(raw)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so an output file can be traced back to its input.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(CrawlConfig, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
