//! # wtd-models
//!
//! Data models for World Trading Data API responses.
//!
//! Responses come back either as plain order-preserving mappings
//! ([`HistoryResponse`]) or as a date-indexed table with numeric columns
//! ([`HistoryTable`]). [`OutputFormat`] picks between the two.
//!
//! ## Usage
//!
//! ```ignore
//! use wtd_models::{HistoryResponse, HistoryTable};
//!
//! let history: HistoryResponse = serde_json::from_str(&response_json)?;
//! let table = HistoryTable::from_rows(&history.history)?;
//! println!("{} rows from {:?}", table.len(), table.first_date());
//! ```

#![warn(clippy::all)]

pub mod format;
pub mod history;
pub mod table;

pub use format::{HistoryData, OutputFormat};
pub use history::{HistoryResponse, Row};
pub use table::{Cell, HistoryTable};
