//! Configuration management for the World Trading Data client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Main configuration struct for the World Trading Data client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// World Trading Data API token
  pub api_token: String,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Base URL for the World Trading Data API
  pub base_url: String,
}

impl Config {
  /// Load configuration from environment variables
  ///
  /// A `.env` file in the working directory is honoured. `WTD_API_TOKEN` is
  /// required; `WTD_BASE_URL` and `WTD_TIMEOUT_SECS` fall back to defaults.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_token = env::var("WTD_API_TOKEN").map_err(|_| Error::MissingCredential)?;

    let timeout_secs = env::var("WTD_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid WTD_TIMEOUT_SECS".to_string()))?;

    let base_url = env::var("WTD_BASE_URL").unwrap_or_else(|_| crate::DEFAULT_BASE_URL.to_string());

    let config = Config { api_token, timeout_secs, base_url };
    config.validate()?;
    Ok(config)
  }

  /// Create a config with default values (for testing)
  pub fn default_with_key(api_token: String) -> Self {
    Config {
      api_token,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      base_url: crate::DEFAULT_BASE_URL.to_string(),
    }
  }

  /// Point the config at a different API host
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Check the credential and base URL
  pub fn validate(&self) -> Result<()> {
    if self.api_token.trim().is_empty() {
      return Err(Error::MissingCredential);
    }

    Url::parse(&self.base_url)
      .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;

    Ok(())
  }
}
