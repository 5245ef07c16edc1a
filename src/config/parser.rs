use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

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
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[crawler]
index-url = "https://gamewith.net/genshin-impact/article/show/22408"
allowed-domains = ["gamewith.net"]
base-delay-ms = 2000
max-jitter-ms = 1000

[output]
csv-path = "./quests.csv"

[[region]]
name = "Natlan"
reputation-anchor = "natWQL"
non-reputation-anchor = "natNR1"

[[region]]
name = "Fontaine"
reputation-anchor = "fonWQL"
non-reputation-anchor = "fonNR1"
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.allowed_domains, vec!["gamewith.net"]);
        assert_eq!(config.crawler.base_delay_ms, 2000);
        assert_eq!(config.crawler.max_jitter_ms, 1000);
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[0].name, "Natlan");
        assert_eq!(config.regions[1].non_reputation_anchor, "fonNR1");
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse_config(VALID_CONFIG).unwrap();

        assert_eq!(config.crawler.request_timeout_secs, 30);
        assert_eq!(config.output.unknown_steps_marker, "Unknown");
        assert!(config.browser.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.browser.accept_language, "en-US,en;q=0.5");
    }

    #[test]
    fn test_region_order_preserved() {
        let config = parse_config(VALID_CONFIG).unwrap();
        let names: Vec<&str> = config.regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Natlan", "Fontaine"]);
    }

    #[test]
    fn test_bundled_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("quests.toml");
        let config = load_config(&path).unwrap();

        let names: Vec<&str> = config.regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Natlan", "Fontaine", "Sumeru", "Inazuma", "Liyue", "Mondstadt"]
        );
        assert_eq!(config.output.csv_path, "genshin_quests.csv");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/quests.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
index-url = "https://gamewith.net/genshin-impact/article/show/22408"

[output]
csv-path = "./quests.csv"
"#;

        let result = parse_config(config_content);
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
