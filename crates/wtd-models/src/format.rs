//! Output shapes for endpoint results

use crate::history::HistoryResponse;
use crate::table::HistoryTable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use wtd_core::Error;

/// How a response should be handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
  /// Plain mapping, as decoded from the JSON payload
  Mapping,
  /// Date-indexed table with numeric columns
  Table,
}

impl std::fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OutputFormat::Mapping => write!(f, "mapping"),
      OutputFormat::Table => write!(f, "table"),
    }
  }
}

impl FromStr for OutputFormat {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "dict" | "json" | "mapping" => Ok(OutputFormat::Mapping),
      "frame" | "df" | "table" | "pandas" => Ok(OutputFormat::Table),
      _ => Err(Error::InvalidFormat(s.to_string())),
    }
  }
}

/// History in the shape picked by an [`OutputFormat`]
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryData {
  Mapping(HistoryResponse),
  Table(HistoryTable),
}

impl HistoryData {
  /// Reshape `response` into `format`
  pub fn from_response(response: HistoryResponse, format: OutputFormat) -> wtd_core::Result<Self> {
    match format {
      OutputFormat::Mapping => Ok(HistoryData::Mapping(response)),
      OutputFormat::Table => response.to_table().map(HistoryData::Table),
    }
  }

  pub fn format(&self) -> OutputFormat {
    match self {
      HistoryData::Mapping(_) => OutputFormat::Mapping,
      HistoryData::Table(_) => OutputFormat::Table,
    }
  }
}
