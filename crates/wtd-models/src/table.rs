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

//! Date-indexed tabular view of price history

use crate::history::Row;
use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use wtd_core::{parse_text_date, Error, Result};

/// One coerced table value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Number(Decimal),
  Text(String),
  Null,
}

impl Cell {
  /// Coerce a raw JSON value, preferring a number where one can be read
  pub fn from_json(value: &Value) -> Self {
    match value {
      Value::Null => Cell::Null,
      Value::Number(n) => parse_decimal(&n.to_string()).map_or_else(|| Cell::Text(n.to_string()), Cell::Number),
      Value::String(s) => parse_decimal(s).map_or_else(|| Cell::Text(s.clone()), Cell::Number),
      Value::Bool(b) => Cell::Text(b.to_string()),
      other => Cell::Text(other.to_string()),
    }
  }

  pub fn as_decimal(&self) -> Option<Decimal> {
    match self {
      Cell::Number(d) => Some(*d),
      _ => None,
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Cell::Null)
  }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
  let s = s.trim();
  if s.is_empty() {
    return None;
  }
  Decimal::from_str(s).ok().or_else(|| Decimal::from_scientific(s).ok())
}

/// Price history as rows indexed by trading date, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryTable {
  columns: Vec<String>,
  index: Vec<NaiveDate>,
  rows: Vec<Vec<Cell>>,
}

impl HistoryTable {
  /// Build a table from a row-key to row-fields mapping
  ///
  /// Row keys become the date index, columns are the union of the row fields
  /// in first-seen order, and cells are coerced to numbers where possible.
  /// Rows missing a column get [`Cell::Null`].
  pub fn from_rows(rows: &IndexMap<String, Row>) -> Result<Self> {
    let mut by_date: BTreeMap<NaiveDate, &Row> = BTreeMap::new();
    let mut columns: IndexSet<&str> = IndexSet::new();

    for (key, fields) in rows {
      let date = parse_text_date(key)
        .map_err(|e| Error::Parse(format!("Bad row index '{}': {}", key, e)))?;
      if by_date.insert(date, fields).is_some() {
        return Err(Error::Parse(format!("Duplicate row for {}", date)));
      }
      columns.extend(fields.keys().map(String::as_str));
    }

    let table_rows: Vec<Vec<Cell>> = by_date
      .values()
      .map(|fields| {
        columns
          .iter()
          .map(|col| fields.get(*col).map_or(Cell::Null, Cell::from_json))
          .collect::<Vec<_>>()
      })
      .collect();

    Ok(Self {
      columns: columns.into_iter().map(str::to_string).collect(),
      index: by_date.into_keys().collect(),
      rows: table_rows,
    })
  }

  pub fn len(&self) -> usize {
    self.index.len()
  }

  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  pub fn columns(&self) -> &[String] {
    &self.columns
  }

  /// Trading dates, ascending
  pub fn index(&self) -> &[NaiveDate] {
    &self.index
  }

  pub fn first_date(&self) -> Option<NaiveDate> {
    self.index.first().copied()
  }

  pub fn last_date(&self) -> Option<NaiveDate> {
    self.index.last().copied()
  }

  /// Cells for `date`, in [`columns`](Self::columns) order
  pub fn row(&self, date: NaiveDate) -> Option<&[Cell]> {
    let pos = self.index.binary_search(&date).ok()?;
    Some(&self.rows[pos])
  }

  pub fn get(&self, date: NaiveDate, column: &str) -> Option<&Cell> {
    let col = self.column_position(column)?;
    self.row(date).map(|row| &row[col])
  }

  /// Numeric values of one column, `None` where a cell is not a number
  pub fn column(&self, name: &str) -> Option<Vec<Option<Decimal>>> {
    let col = self.column_position(name)?;
    Some(self.rows.iter().map(|row| row[col].as_decimal()).collect())
  }

  pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Cell])> {
    self.index.iter().copied().zip(self.rows.iter().map(Vec::as_slice))
  }

  fn column_position(&self, name: &str) -> Option<usize> {
    self.columns.iter().position(|c| c == name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::history::HistoryResponse;
  use serde_json::json;

  const PAYLOAD: &str = r#"{
    "name": "AAPL",
    "history": {
      "2020-01-06": {"open": "73.45", "close": "74.95", "high": "74.99", "low": "73.19", "volume": "118387200"},
      "2020-01-03": {"open": "74.29", "close": "74.36", "high": "75.14", "low": "74.13", "volume": "146322800"},
      "2020-01-02": {"open": "74.06", "close": "75.09", "high": "75.15", "low": "73.80", "volume": "135480400"}
    }
  }"#;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
  }

  #[test]
  fn test_table_is_sorted_and_numeric() {
    let history: HistoryResponse = serde_json::from_str(PAYLOAD).unwrap();
    let table = history.to_table().unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.index(), &[date(2020, 1, 2), date(2020, 1, 3), date(2020, 1, 6)]);
    assert_eq!(table.columns(), &["open", "close", "high", "low", "volume"]);
    assert_eq!(table.first_date(), Some(date(2020, 1, 2)));
    assert_eq!(table.last_date(), Some(date(2020, 1, 6)));

    assert_eq!(table.get(date(2020, 1, 3), "close"), Some(&Cell::Number(dec("74.36"))));
    assert_eq!(
      table.column("volume").unwrap(),
      vec![Some(dec("135480400")), Some(dec("146322800")), Some(dec("118387200"))]
    );
    assert!(table.row(date(2020, 1, 4)).is_none());
    assert!(table.column("adj_close").is_none());
  }

  #[test]
  fn test_non_numeric_and_missing_cells() {
    let mut rows = IndexMap::new();
    let mut first = Row::new();
    first.insert("close".to_string(), json!(10.5));
    first.insert("note".to_string(), json!("halted"));
    rows.insert("2021-03-01".to_string(), first);
    let mut second = Row::new();
    second.insert("close".to_string(), json!("N/A"));
    second.insert("volume".to_string(), Value::Null);
    rows.insert("2021-03-02".to_string(), second);

    let table = HistoryTable::from_rows(&rows).unwrap();

    assert_eq!(table.columns(), &["close", "note", "volume"]);
    let first_row = table.row(date(2021, 3, 1)).unwrap();
    assert_eq!(first_row[0], Cell::Number(dec("10.5")));
    assert_eq!(first_row[1], Cell::Text("halted".to_string()));
    assert!(first_row[2].is_null());
    assert_eq!(table.column("close").unwrap(), vec![Some(dec("10.5")), None]);
  }

  #[test]
  fn test_bad_index_is_a_parse_error() {
    let mut rows = IndexMap::new();
    rows.insert("yesterday".to_string(), Row::new());
    assert!(matches!(HistoryTable::from_rows(&rows), Err(Error::Parse(_))));
  }

  #[test]
  fn test_duplicate_dates_are_rejected() {
    let mut rows = IndexMap::new();
    rows.insert("2020-01-05".to_string(), Row::new());
    rows.insert("Jan 5, 2020".to_string(), Row::new());
    assert!(matches!(HistoryTable::from_rows(&rows), Err(Error::Parse(_))));
  }

  #[test]
  fn test_empty_history() {
    let table = HistoryTable::from_rows(&IndexMap::new()).unwrap();
    assert!(table.is_empty());
    assert!(table.columns().is_empty());
    assert_eq!(table.first_date(), None);
    assert_eq!(table.iter().count(), 0);
  }

  #[test]
  fn test_cell_coercion() {
    assert_eq!(Cell::from_json(&json!(" 12.50 ")), Cell::Number(dec("12.50")));
    assert_eq!(Cell::from_json(&json!(3)), Cell::Number(dec("3")));
    assert_eq!(Cell::from_json(&json!("1e3")), Cell::Number(dec("1000")));
    assert_eq!(Cell::from_json(&json!("")), Cell::Text(String::new()));
    assert_eq!(Cell::from_json(&json!(true)), Cell::Text("true".to_string()));
  }
}
