use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "FNOL_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable holding the structured-model credential
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable overriding the extraction model
const ENV_EXTRACTION_MODEL: &str = "EXTRACTION_MODEL";

const DEFAULT_EXTRACTION_MODEL: &str = rig::providers::openai::GPT_4O_MINI;
const DEFAULT_TIMEOUT_SECS: u64 = 25;
const DEFAULT_MAX_OUTPUT_TOKENS: u64 = 2048;

/// Structured-model extraction settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Model name passed to the provider
    pub model: String,
    /// Wall-clock bound for a single model call
    pub timeout_secs: u64,
    pub max_output_tokens: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_EXTRACTION_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl ExtractionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub extraction: ExtractionConfig,
    /// Credential for the structured-model service. `None` means pattern-only extraction.
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            openai_api_key: None,
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut extraction = Self::load_config_file(&config_path)
            .map(|cf| cf.extraction)
            .unwrap_or_default();

        if let Ok(model) = std::env::var(ENV_EXTRACTION_MODEL)
            && !model.trim().is_empty()
        {
            extraction.model = model;
        }

        // A blank key is as good as no key
        let openai_api_key = std::env::var(ENV_OPENAI_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if openai_api_key.is_none() {
            tracing::warn!(
                "{} not set, structured-model extraction disabled (pattern extraction only)",
                ENV_OPENAI_API_KEY
            );
        }

        Self {
            extraction,
            openai_api_key,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let file = write_config("extraction:\n  model: gpt-4o\n  timeout_secs: 10\n");

        let config = Config::load_config_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.extraction.model, "gpt-4o");
        assert_eq!(config.extraction.timeout(), Duration::from_secs(10));
        // Unset keys keep their defaults
        assert_eq!(config.extraction.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let file = write_config("   \n");

        let config = Config::load_config_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.extraction.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.extraction.model, DEFAULT_EXTRACTION_MODEL);
    }

    #[test]
    fn test_invalid_config_file_is_ignored() {
        let file = write_config("extraction: [not, a, map");

        assert!(Config::load_config_file(file.path().to_str().unwrap()).is_none());
    }

    #[test]
    fn test_missing_config_file_is_ignored() {
        assert!(Config::load_config_file("/nonexistent/fnol/config.yaml").is_none());
    }

    #[test]
    fn test_bind_addr() {
        let config = Config {
            port: 9000,
            host: "0.0.0.0".to_string(),
            ..Config::default()
        };

        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }
}
