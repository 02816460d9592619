//! Configuration loaded once at startup from config.json

use crate::error::{BuywizardError, Result};
use serde::Deserialize;
use std::path::Path;

/// Article search filters sent to Cardmarket and applied client-side.
///
/// Every filter is a named, typed field; `countries` is applied locally when
/// building the price matrix, the rest become query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchFilters {
    /// Seller countries accepted into the price matrix (Cardmarket country codes)
    pub countries: Vec<String>,
    /// Minimum card condition, e.g. "EX" or "NM"
    #[serde(default)]
    pub min_condition: Option<String>,
    /// Cardmarket language id (1 = English)
    #[serde(default)]
    pub id_language: Option<u32>,
    /// Cap on articles returned per product
    #[serde(default)]
    pub max_results: Option<u32>,
}

impl SearchFilters {
    /// Whether a seller from the given country passes the country filter
    pub fn allows_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }
}

/// Application configuration, immutable after startup
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Cardmarket app token, sent as a bearer header when present
    #[serde(default)]
    pub app_token: Option<String>,
    /// env_logger filter used as the default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub search_filters: SearchFilters,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a JSON file. A missing or malformed file is
    /// fatal at startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BuywizardError::Config(format!(
                "cannot read {} (copy config_template.json to config.json and fill it in): {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| BuywizardError::Config(format!("{}: {}", path.display(), e)))?;

        if config.search_filters.countries.is_empty() {
            return Err(BuywizardError::Config(
                "search_filters.countries must list at least one country".to_string(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{json}").unwrap();
        tmp
    }

    #[test]
    fn load_full_config() {
        let tmp = write_config(
            r#"{
                "app_token": "secret",
                "log_level": "debug",
                "search_filters": {
                    "countries": ["NL", "D", "B"],
                    "min_condition": "EX",
                    "id_language": 1,
                    "max_results": 200
                }
            }"#,
        );

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.app_token.as_deref(), Some("secret"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.search_filters.countries.len(), 3);
        assert_eq!(config.search_filters.min_condition.as_deref(), Some("EX"));
        assert_eq!(config.search_filters.id_language, Some(1));
    }

    #[test]
    fn load_minimal_config_defaults() {
        let tmp = write_config(r#"{"search_filters": {"countries": ["NL"]}}"#);

        let config = Config::load(tmp.path()).unwrap();
        assert!(config.app_token.is_none());
        assert_eq!(config.log_level, "info");
        assert!(config.search_filters.min_condition.is_none());
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let result = Config::load("/nonexistent/config.json");
        match result.unwrap_err() {
            BuywizardError::Config(_) => {}
            other => panic!("Expected Config error, got: {other:?}"),
        }
    }

    #[test]
    fn load_rejects_empty_country_list() {
        let tmp = write_config(r#"{"search_filters": {"countries": []}}"#);
        assert!(Config::load(tmp.path()).is_err());
    }

    #[test]
    fn allows_country_matches_exactly() {
        let filters = SearchFilters {
            countries: vec!["NL".to_string(), "D".to_string()],
            min_condition: None,
            id_language: None,
            max_results: None,
        };
        assert!(filters.allows_country("NL"));
        assert!(filters.allows_country("D"));
        assert!(!filters.allows_country("F"));
    }
}
