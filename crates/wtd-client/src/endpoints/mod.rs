//! Endpoint groups and the request-assembly helpers they share

pub mod history;

use crate::transport::{Transport, API_TOKEN_PARAM};
use wtd_core::{normalize_params, Error, ParameterSet, Result};

/// Check a symbol or comma-separated symbol list and tidy its spacing
pub(crate) fn validate_symbols(symbol: &str) -> Result<String> {
  let symbols: Vec<&str> = symbol.split(',').map(str::trim).collect();
  if symbols.iter().any(|s| s.is_empty()) {
    return Err(Error::InvalidParameter(format!("Invalid symbol list '{}'", symbol)));
  }
  Ok(symbols.join(","))
}

/// Assemble the outbound parameters for one request
///
/// `symbol` and the API token lead, followed by the caller's parameters,
/// which win on conflicting keys. Date fields are normalized last.
pub(crate) fn request_params(
  transport: &Transport,
  symbol: &str,
  params: &ParameterSet,
) -> Result<ParameterSet> {
  let mut assembled = ParameterSet::new()
    .with("symbol", validate_symbols(symbol)?)
    .with(API_TOKEN_PARAM, transport.api_token());
  assembled.merge(params);
  normalize_params(&assembled)
}

#[cfg(test)]
mod tests {
  use super::*;
  use wtd_core::{ParamValue, DATE_FROM};

  #[test]
  fn test_validate_symbols() {
    assert_eq!(validate_symbols("AAPL").unwrap(), "AAPL");
    assert_eq!(validate_symbols(" AAPL , MSFT ").unwrap(), "AAPL,MSFT");
    assert!(matches!(validate_symbols(""), Err(Error::InvalidParameter(_))));
    assert!(matches!(validate_symbols("AAPL,,MSFT"), Err(Error::InvalidParameter(_))));
  }

  #[test]
  fn test_request_params_order_and_normalization() {
    let transport = Transport::new_mock();
    let params = ParameterSet::new().with("sort", "oldest").with(DATE_FROM, "Jan 5, 2020");

    let assembled = request_params(&transport, "AAPL", &params).unwrap();

    assert_eq!(
      assembled.keys().collect::<Vec<_>>(),
      vec!["symbol", "api_token", "sort", "date_from"]
    );
    assert_eq!(assembled.get("api_token"), Some(&ParamValue::Text("test_token".to_string())));
    assert_eq!(assembled.get(DATE_FROM), Some(&ParamValue::Text("2020-01-05".to_string())));
  }

  #[test]
  fn test_request_params_caller_overrides() {
    let transport = Transport::new_mock();
    let params = ParameterSet::new().with("symbol", "MSFT");

    let assembled = request_params(&transport, "AAPL", &params).unwrap();

    assert_eq!(assembled.get("symbol"), Some(&ParamValue::Text("MSFT".to_string())));
    assert_eq!(assembled.keys().next(), Some("symbol"));
  }
}
