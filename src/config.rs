use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

/// Forecast endpoint for the single village (adm4 code) this job advises on
pub const DEFAULT_BMKG_URL: &str = "https://api.bmkg.go.id/publik/prakiraan-cuaca?adm4=32.78.08.1008";

/// Upper bound for the whole forecast request
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_DB_PATH: &str = "aquaprediksi.db";

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BmkgParameters {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for BmkgParameters {
    fn default() -> Self {
        Self {
            url: DEFAULT_BMKG_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StorageParameters {
    pub db_path: String,
}

impl Default for StorageParameters {
    fn default() -> Self {
        Self { db_path: DEFAULT_DB_PATH.to_string() }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LevelFilter::Info,
            log_to_stdout: true,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub bmkg: BmkgParameters,
    pub storage: StorageParameters,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items.
/// Sections or items left out of the file keep their built-in defaults.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.bmkg.url, DEFAULT_BMKG_URL);
        assert_eq!(config.bmkg.timeout_secs, 10);
        assert_eq!(config.storage.db_path, DEFAULT_DB_PATH);
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert!(config.general.log_to_stdout);
        assert!(config.general.log_path.is_none());
    }

    #[test]
    fn partial_document_overrides_only_given_items() {
        let toml = r#"
            [storage]
            db_path = "/var/lib/aquaprediksi/data.db"

            [general]
            log_level = "debug"
            log_path = "/var/log/aquaprediksi.log"
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.storage.db_path, "/var/lib/aquaprediksi/data.db");
        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert_eq!(config.general.log_path.as_deref(), Some("/var/log/aquaprediksi.log"));
        assert_eq!(config.bmkg.url, DEFAULT_BMKG_URL);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_config("/nonexistent/aquaprediksi/config.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
