use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// YAML-serializable configuration structure
#[derive(Serialize, Deserialize, Debug)]
pub struct ConfigYaml {
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
}

/// Connection settings for the stock-data service.
///
/// Passed to each orchestrator at construction; nothing reads it from
/// process-wide state afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host of the service, without trailing slash
    pub base_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url(base_url)?,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    // Load configuration from YAML file or environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Check for CONFIG_FILE environment variable first
        if let Ok(config_file) = env::var("CONFIG_FILE") {
            Self::from_yaml(&config_file)
        } else {
            Self::from_env()
        }
    }

    pub fn from_yaml(file_path: &str) -> Result<Self, ConfigError> {
        let yaml_content = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
            path: file_path.to_string(),
            source,
        })?;

        let yaml_config: ConfigYaml = serde_yaml::from_str(&yaml_content)?;

        let timeout_secs = yaml_config
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self::new(&yaml_config.base_url)?
            .with_request_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url =
            env::var("REALTICKER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("REALTICKER_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: "REALTICKER_REQUEST_TIMEOUT_SECS",
                value: raw.clone(),
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self::new(&base_url)?.with_request_timeout(Duration::from_secs(timeout_secs)))
    }
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://localhost:8000/").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ClientConfig::new("not a url").is_err());
        assert!(ClientConfig::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://api.example.com/\nrequest_timeout_secs: 5").unwrap();

        let config = ClientConfig::from_yaml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_yaml_default_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://127.0.0.1:9000").unwrap();

        let config = ClientConfig::from_yaml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn test_from_yaml_missing_file() {
        let err = ClientConfig::from_yaml("/nonexistent/realticker.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    // Only test touching these variables; keep it that way to avoid races
    #[test]
    fn test_from_env_timeout() {
        env::set_var("REALTICKER_API_URL", "http://127.0.0.1:9100/");

        env::set_var("REALTICKER_REQUEST_TIMEOUT_SECS", "soon");
        match ClientConfig::from_env() {
            Err(ConfigError::InvalidValue { name, value }) => {
                assert_eq!(name, "REALTICKER_REQUEST_TIMEOUT_SECS");
                assert_eq!(value, "soon");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }

        env::set_var("REALTICKER_REQUEST_TIMEOUT_SECS", " 12 ");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9100");
        assert_eq!(config.request_timeout, Duration::from_secs(12));

        env::remove_var("REALTICKER_REQUEST_TIMEOUT_SECS");
        env::remove_var("REALTICKER_API_URL");
    }
}
