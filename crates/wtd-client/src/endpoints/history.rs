/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Historical price endpoints
//!
//! This module wraps World Trading Data's `/history` endpoint, which returns
//! the full daily price history for one or more symbols, optionally limited
//! by `date_from` / `date_to` and ordered with `sort`.

use super::request_params;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::{info, instrument};
use wtd_core::{DateLike, Endpoint, ParamValue, ParameterSet, Result, DATE_FROM, DATE_TO};
use wtd_models::{HistoryData, HistoryResponse, HistoryTable, OutputFormat};

/// Row ordering for history results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
  /// Most recent day first
  Newest,
  /// Oldest day first
  Oldest,
}

impl std::fmt::Display for Sort {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Sort::Newest => write!(f, "newest"),
      Sort::Oldest => write!(f, "oldest"),
    }
  }
}

/// Builder for a `/history` request
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
  symbol: String,
  params: ParameterSet,
}

impl HistoryQuery {
  /// Start a query for `symbol` (a single ticker or a comma-separated list)
  pub fn new(symbol: impl Into<String>) -> Self {
    Self { symbol: symbol.into(), params: ParameterSet::new() }
  }

  /// First day to include; any chrono date value or a date string
  pub fn date_from(self, date: impl Into<DateLike>) -> Self {
    self.param(DATE_FROM, date.into())
  }

  /// Last day to include; any chrono date value or a date string
  pub fn date_to(self, date: impl Into<DateLike>) -> Self {
    self.param(DATE_TO, date.into())
  }

  /// Row ordering
  pub fn sort(self, sort: Sort) -> Self {
    self.param("sort", sort.to_string())
  }

  /// Any other query parameter, passed through as given
  pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
    self.params.insert(key, value);
    self
  }

  /// Symbol the query is for
  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  /// Split into the symbol and the caller-supplied parameters
  pub fn into_parts(self) -> (String, ParameterSet) {
    (self.symbol, self.params)
  }
}

/// Historical price endpoints
pub struct HistoryEndpoints {
  transport: Arc<Transport>,
}

impl HistoryEndpoints {
  /// Create a new history endpoints instance
  pub fn new(transport: Arc<Transport>) -> Self {
    Self { transport }
  }

  /// Get daily price history as a plain mapping
  ///
  /// # Arguments
  ///
  /// * `symbol` - The stock symbol, or a comma-separated list (e.g., "AAPL,MSFT")
  /// * `params` - Extra query parameters; `date_from` / `date_to` may be any
  ///   date-like value and are sent as `YYYY-MM-DD`
  ///
  /// # Errors
  ///
  /// `InvalidDate` or `InvalidParameter` before any request is made, then
  /// transport, API or parse errors from the request itself.
  ///
  /// # Examples
  ///
  /// ```ignore
  /// # use wtd_client::{HistoryEndpoints, ParameterSet};
  /// let params = ParameterSet::new()
  ///   .with("date_from", "Jan 5, 2020")
  ///   .with("date_to", chrono::NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
  /// let history = endpoints.history("AAPL", &params).await?;
  /// for (day, fields) in &history.history {
  ///     println!("{}: {:?}", day, fields.get("close"));
  /// }
  /// # Ok::<(), wtd_core::Error>(())
  /// ```
  #[instrument(skip(self, params))]
  pub async fn history(&self, symbol: &str, params: &ParameterSet) -> Result<HistoryResponse> {
    let params = request_params(&self.transport, symbol, params)?;

    let response: HistoryResponse = self.transport.get(Endpoint::History, &params).await?;
    info!("Received {} history rows for {}", response.len(), response.name);
    Ok(response)
  }

  /// Get daily price history as a date-indexed table with numeric columns
  #[instrument(skip(self, params))]
  pub async fn history_table(&self, symbol: &str, params: &ParameterSet) -> Result<HistoryTable> {
    self.history(symbol, params).await?.to_table()
  }

  /// Get daily price history in the shape named by `format`
  ///
  /// `format` is parsed before anything else, so an unknown format fails with
  /// `InvalidFormat` without a request being sent.
  #[instrument(skip(self, params))]
  pub async fn history_as(
    &self,
    symbol: &str,
    params: &ParameterSet,
    format: &str,
  ) -> Result<HistoryData> {
    let format: OutputFormat = format.parse()?;
    let response = self.history(symbol, params).await?;
    HistoryData::from_response(response, format)
  }

  /// Run a [`HistoryQuery`] and return the plain mapping
  pub async fn query(&self, query: HistoryQuery) -> Result<HistoryResponse> {
    let (symbol, params) = query.into_parts();
    self.history(&symbol, &params).await
  }

  /// Run a [`HistoryQuery`] and return a table
  pub async fn query_table(&self, query: HistoryQuery) -> Result<HistoryTable> {
    let (symbol, params) = query.into_parts();
    self.history_table(&symbol, &params).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  #[test]
  fn test_history_query_builder() {
    let query = HistoryQuery::new("AAPL")
      .date_from("Jan 5, 2020")
      .date_to(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap())
      .sort(Sort::Oldest)
      .param("formatted", true);

    assert_eq!(query.symbol(), "AAPL");
    let (_, params) = query.into_parts();
    assert_eq!(params.keys().collect::<Vec<_>>(), vec!["date_from", "date_to", "sort", "formatted"]);
    assert_eq!(params.get(DATE_FROM), Some(&ParamValue::Date(DateLike::Text("Jan 5, 2020".to_string()))));
    assert_eq!(params.get("sort"), Some(&ParamValue::Text("oldest".to_string())));
  }

  #[test]
  fn test_sort_display() {
    assert_eq!(Sort::Newest.to_string(), "newest");
    assert_eq!(Sort::Oldest.to_string(), "oldest");
  }
}
