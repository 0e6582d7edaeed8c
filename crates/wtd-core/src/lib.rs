//! # wtd-core
//!
//! Errors, configuration and query-parameter normalization shared by the
//! wtd-* crates.

pub mod config;
pub mod error;
pub mod params;

pub use config::Config;
pub use error::{Error, Result};
pub use params::{
  normalize_date, normalize_params, normalize_value, parse_text_date, DateLike, ParamValue,
  ParameterSet, DATE_FROM, DATE_TO,
};

/// The supported World Trading Data endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  /// Full daily price history for one or more symbols
  History,
}

impl Endpoint {
  /// Path segment appended to the base URL
  pub fn path(&self) -> &'static str {
    match self {
      Endpoint::History => "history",
    }
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.path())
  }
}

/// Base URL for the World Trading Data API
pub const DEFAULT_BASE_URL: &str = "https://www.worldtradingdata.com/api/v1";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Canonical wire format for dates in query strings
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";
