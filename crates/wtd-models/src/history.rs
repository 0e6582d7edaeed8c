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

//! `/history` response payload

use crate::table::HistoryTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use wtd_core::Result;

/// Field name to raw JSON value for one trading day
pub type Row = IndexMap<String, serde_json::Value>;

/// Daily price history for a symbol, as returned by `/history`
///
/// Rows are keyed by date string and keep the order of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
  /// Symbol the history belongs to
  pub name: String,

  /// Date string to row fields (`open`, `close`, `high`, `low`, `volume`)
  pub history: IndexMap<String, Row>,
}

impl HistoryResponse {
  /// Number of trading days in the payload
  pub fn len(&self) -> usize {
    self.history.len()
  }

  pub fn is_empty(&self) -> bool {
    self.history.is_empty()
  }

  /// Reshape into a date-indexed table with numeric columns
  pub fn to_table(&self) -> Result<HistoryTable> {
    HistoryTable::from_rows(&self.history)
  }
}
