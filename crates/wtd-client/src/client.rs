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

//! Client entry point and credential guard

use crate::endpoints::history::HistoryEndpoints;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::debug;
use wtd_core::{Config, Result};

/// Main World Trading Data API client
///
/// Holds the configured transport and hands out endpoint groups. Construction
/// fails with [`wtd_core::Error::MissingCredential`] when no API token is set,
/// so every client in existence can issue authenticated requests.
///
/// # Examples
///
/// ```ignore
/// use wtd_client::{HistoryQuery, WtdClient};
/// use wtd_core::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = WtdClient::new(Config::from_env()?)?;
///
///     let query = HistoryQuery::new("AAPL").date_from("Jan 5, 2020").date_to("2020-02-01");
///     let table = client.history().query_table(query).await?;
///     println!("{} trading days", table.len());
///
///     Ok(())
/// }
/// ```
pub struct WtdClient {
  transport: Arc<Transport>,
}

impl WtdClient {
  /// Create a new World Trading Data API client
  ///
  /// # Arguments
  ///
  /// * `config` - Configuration containing the API token and other settings
  ///
  /// # Errors
  ///
  /// Returns `MissingCredential` if the token is empty, `Config` if the base
  /// URL is malformed, or `Http` if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    config.validate()?;
    debug!("Creating client for {}", config.base_url);

    let transport = Arc::new(Transport::new(&config)?);

    Ok(Self { transport })
  }

  /// Create a client from `WTD_*` environment variables
  pub fn from_env() -> Result<Self> {
    Self::new(Config::from_env()?)
  }

  /// Get access to the price history endpoints
  ///
  /// # Examples
  ///
  /// ```ignore
  /// # use wtd_client::WtdClient;
  /// # use wtd_core::ParameterSet;
  /// # let client = WtdClient::from_env().unwrap();
  /// let params = ParameterSet::new().with("date_from", "2020-01-01");
  /// let history = client.history().history("AAPL", &params).await?;
  /// # Ok::<(), wtd_core::Error>(())
  /// ```
  pub fn history(&self) -> HistoryEndpoints {
    HistoryEndpoints::new(self.transport.clone())
  }

  /// Get the base URL requests are sent to
  pub fn base_url(&self) -> &str {
    self.transport.base_url()
  }
}
