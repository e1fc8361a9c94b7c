use crate::error::ConfigError;
use crate::types::DEFAULT_MAX_COMMENTS;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "PSYCHE_TIMEOUT_SECS";

/// Operator-facing settings, read from an optional TOML file and the
/// environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub reddit_base_url: String,
    pub user_agent: String,
    pub model: String,
    pub max_comments: usize,
    /// Deadline for a whole analysis.
    pub timeout_secs: u64,
    /// Transport timeout for a single HTTP request.
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            reddit_base_url: "https://www.reddit.com".to_string(),
            user_agent: "rust:reddit-psyche:v0.1.0".to_string(),
            model: "gpt-4o".to_string(),
            max_comments: DEFAULT_MAX_COMMENTS,
            timeout_secs: 60,
            http_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads `path` if given, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    })?;
                debug!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_OPENAI_API_KEY).filter(|k| !k.is_empty()) {
            self.openai_api_key = Some(key);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.openai_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(ConfigError::MissingField {
                    field: "openai_api_key".to_string(),
                })
            }
        }

        for (field, value) in [
            ("openai_base_url", &self.openai_base_url),
            ("reddit_base_url", &self.reddit_base_url),
        ] {
            Url::parse(value).map_err(|_| ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.clone(),
            })?;
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "user_agent".to_string(),
            });
        }

        for (field, value) in [
            ("max_comments", self.max_comments as u64),
            ("timeout_secs", self.timeout_secs),
            ("http_timeout_secs", self.http_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: "0".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
