use thiserror::Error;

/// The main error type for wtd-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// No API token configured
  #[error("No API token specified")]
  MissingCredential,

  /// API key rejected by the service
  #[error("API key error: {0}")]
  ApiKey(String),

  /// A date-like value could not be read as a calendar date
  #[error("Invalid date: {0}")]
  InvalidDate(String),

  /// A request argument failed validation
  #[error("Invalid parameter: {0}")]
  InvalidParameter(String),

  /// Unknown output format requested
  #[error("Invalid output format: {0}")]
  InvalidFormat(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// Error message returned by World Trading Data
  #[error("API error: {0}")]
  Api(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

/// Result type alias for wtd-* crates
pub type Result<T> = std::result::Result<T, Error>;
