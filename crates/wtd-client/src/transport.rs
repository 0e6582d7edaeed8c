//! HTTP transport layer for World Trading Data requests

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;
use wtd_core::{Config, Endpoint, Error, ParameterSet, Result};

/// Query parameter carrying the API credential
pub const API_TOKEN_PARAM: &str = "api_token";

/// HTTP transport layer for making requests to the World Trading Data API
pub struct Transport {
  client: Client,
  base_url: String,
  api_token: String,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("wtd-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.clone(),
      api_token: config.api_token.clone(),
    })
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    Self {
      client: Client::new(),
      base_url: "https://mock.worldtradingdata.com/api/v1".to_string(),
      api_token: "test_token".to_string(),
    }
  }

  /// Make a GET request to the World Trading Data API
  ///
  /// # Arguments
  ///
  /// * `endpoint` - The API endpoint to call
  /// * `params` - Query parameters, already normalized, in wire order
  ///
  /// # Returns
  ///
  /// Returns a `Result` containing the deserialized response or an error.
  /// Failed requests are not retried.
  #[instrument(skip(self, params), fields(endpoint = %endpoint))]
  pub async fn get<T>(&self, endpoint: Endpoint, params: &ParameterSet) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let url = self.build_url(endpoint, params)?;
    debug!("Requesting /{} with {} parameters", endpoint, params.len());

    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let status = response.status();
    let text = response
      .text()
      .await
      .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

    debug!("Response status {} with {} bytes", status, text.len());

    // Error envelopes can arrive with any status
    self.check_api_error(&text)?;

    if !status.is_success() {
      error!("Request failed with status: {}", status);
      return Err(Error::Http(format!("HTTP error: {}", status)));
    }

    match serde_json::from_str::<T>(&text) {
      Ok(data) => {
        info!("Successfully parsed response for endpoint: {}", endpoint);
        Ok(data)
      }
      Err(e) => {
        error!("Failed to parse JSON response: {}", e);
        Err(Error::Parse(format!(
          "Failed to parse response: {}. Response: {}",
          e,
          excerpt(&text, 200)
        )))
      }
    }
  }

  /// Build the full URL for an API request
  fn build_url(&self, endpoint: Endpoint, params: &ParameterSet) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path()))
      .map_err(|e| Error::Http(format!("Invalid base URL: {}", e)))?;

    {
      let mut query_pairs = url.query_pairs_mut();
      for (key, value) in params.to_query_pairs() {
        query_pairs.append_pair(&key, &value);
      }
      if !params.contains_key(API_TOKEN_PARAM) {
        query_pairs.append_pair(API_TOKEN_PARAM, &self.api_token);
      }
    }

    Ok(url)
  }

  /// Check for World Trading Data error messages in the response
  fn check_api_error(&self, response_text: &str) -> Result<()> {
    if !response_text.contains("\"Message\"") {
      return Ok(());
    }

    let message = serde_json::from_str::<serde_json::Value>(response_text)
      .ok()
      .and_then(|body| body.get("Message").and_then(|m| m.as_str()).map(str::to_string));

    match message {
      Some(msg) if msg.to_ascii_lowercase().contains("api key") => Err(Error::ApiKey(msg)),
      Some(msg) => Err(Error::Api(msg)),
      None => Ok(()),
    }
  }

  /// API token sent with every request
  pub(crate) fn api_token(&self) -> &str {
    &self.api_token
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

fn excerpt(text: &str, max_chars: usize) -> &str {
  match text.char_indices().nth(max_chars) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_build_url() {
    let transport = Transport::new_mock();
    let params = ParameterSet::new()
      .with("symbol", "AAPL")
      .with("date_from", "2020-01-05")
      .with("sort", "newest");

    let url = transport.build_url(Endpoint::History, &params).unwrap().to_string();

    assert_eq!(
      url,
      "https://mock.worldtradingdata.com/api/v1/history?symbol=AAPL&date_from=2020-01-05&sort=newest&api_token=test_token"
    );
  }

  #[test]
  fn test_build_url_keeps_caller_token_position() {
    let transport = Transport::new_mock();
    let params = ParameterSet::new()
      .with("symbol", "AAPL,MSFT")
      .with(API_TOKEN_PARAM, "other")
      .with("exchange", wtd_core::ParamValue::Null);

    let url = transport.build_url(Endpoint::History, &params).unwrap().to_string();

    assert!(url.ends_with("/history?symbol=AAPL%2CMSFT&api_token=other"));
  }

  #[test]
  fn test_check_api_error_invalid_key() {
    let transport = Transport::new_mock();
    let response = r#"{"Message": "Invalid API Key."}"#;

    match transport.check_api_error(response) {
      Err(Error::ApiKey(msg)) => assert_eq!(msg, "Invalid API Key."),
      other => panic!("Expected ApiKey error, got {:?}", other),
    }
  }

  #[test]
  fn test_check_api_error_message() {
    let transport = Transport::new_mock();
    let response = r#"{"Message": "Error! The requested stock(s) could not be found."}"#;

    let result = transport.check_api_error(response);
    if let Err(Error::Api(_)) = result {
      // Expected
    } else {
      panic!("Expected Api error");
    }
  }

  #[test]
  fn test_check_api_error_success() {
    let transport = Transport::new_mock();
    let response = r#"{"name": "AAPL", "history": {}}"#;

    assert!(transport.check_api_error(response).is_ok());
  }

  #[test]
  fn test_excerpt_respects_char_boundaries() {
    assert_eq!(excerpt("héllo", 2), "hé");
    assert_eq!(excerpt("abc", 10), "abc");
  }
}
