use std::{env, fmt};

use thiserror::Error;

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4";
pub const DEFAULT_API_VERSION: &str = "2024-02-01";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Azure OpenAI credentials not configured")]
    MissingCredentials,
}

/// Process configuration, resolved once and handed to the handler.
///
/// Endpoint and key stay optional here: a missing value only fails the request that
/// needs it, via [`Settings::credentials`].
#[derive(Clone)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub deployment: String,
    pub api_version: String,
    pub development: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Empty values count as unset.
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            endpoint: get("AZURE_OPENAI_ENDPOINT"),
            api_key: get("AZURE_OPENAI_KEY"),
            deployment: get("AZURE_OPENAI_DEPLOYMENT")
                .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
            api_version: get("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            development: get("NODE_ENV").as_deref() == Some("development"),
        }
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (&self.endpoint, &self.api_key) {
            (Some(endpoint), Some(api_key)) => Ok(Credentials {
                endpoint: endpoint.clone(),
                api_key: api_key.clone(),
                api_version: self.api_version.clone(),
            }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("development", &self.development)
            .finish()
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}
