use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::constants::{
    DEFAULT_API_VERSION, ENV_API_KEY, ENV_API_VERSION, ENV_DEPLOYMENT, ENV_ENDPOINT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Connection settings for the Azure OpenAI deployment
#[derive(Clone, PartialEq, Eq)]
pub struct AzureConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
}

impl AzureConfig {
    /// Read the settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the settings through `lookup`; blank values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| value(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            endpoint: required(ENV_ENDPOINT)?,
            api_key: required(ENV_API_KEY)?,
            api_version: value(ENV_API_VERSION).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            deployment: required(ENV_DEPLOYMENT)?,
        })
    }
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}

/// Load variables from an env file into the process environment.
///
/// Variables that are already set keep their value. Without an explicit path,
/// a missing `./.env` is not an error.
pub fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        }),
        None => match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(err) if err.not_found() => Ok(()),
            Err(source) => Err(ConfigError::EnvFile {
                path: ".env".to_string(),
                source,
            }),
        },
    }
}
