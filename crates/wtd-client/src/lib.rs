//! # wtd-client
//!
//! A World Trading Data API client for Rust.
//!
//! ## Features
//!
//! - **Date Normalization**: `date_from` / `date_to` accept chrono values or
//!   free text (`"Jan 5, 2020"`, `"01/05/2020"`, ISO 8601) and are sent as
//!   `YYYY-MM-DD`
//! - **Two Output Shapes**: plain mappings or date-indexed numeric tables
//! - **Async/Await**: Built on tokio and reqwest
//! - **Configurable**: Environment-based configuration via wtd-core
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wtd_client::{HistoryQuery, WtdClient};
//! use wtd_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = WtdClient::new(config)?;
//!
//!     let query = HistoryQuery::new("AAPL").date_from("Jan 5, 2020");
//!     let table = client.history().query_table(query).await?;
//!     println!("Latest close: {:?}", table.column("close").and_then(|c| c.last().copied()));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, wtd_core::Error>`. A bad date or output
//! format fails the call before any request is sent; nothing is retried.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod transport;

// Re-export the main client and common types
pub use client::WtdClient;
pub use endpoints::history::{HistoryEndpoints, HistoryQuery, Sort};
pub use wtd_core::{Config, DateLike, Error, ParamValue, ParameterSet, Result};
pub use wtd_models::*;
