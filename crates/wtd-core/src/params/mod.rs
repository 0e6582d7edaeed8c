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

//! Query-parameter assembly and date normalization
//!
//! Request methods collect their arguments into a [`ParameterSet`] and pass
//! it through [`normalize_params`] before anything goes on the wire. The
//! reserved keys [`DATE_FROM`] and [`DATE_TO`] come out as `YYYY-MM-DD`.

mod date;

pub use date::{normalize_date, parse_text_date, DateLike};

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use indexmap::IndexMap;

/// Start of a date range
pub const DATE_FROM: &str = "date_from";

/// End of a date range
pub const DATE_TO: &str = "date_to";

/// A single query-parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
  Null,
  Bool(bool),
  Integer(i64),
  Float(f64),
  Text(String),
  Date(DateLike),
}

impl ParamValue {
  /// Whether the value counts as "set"
  ///
  /// Null, `false`, zero and the empty string are not.
  pub fn is_truthy(&self) -> bool {
    match self {
      ParamValue::Null => false,
      ParamValue::Bool(b) => *b,
      ParamValue::Integer(i) => *i != 0,
      ParamValue::Float(f) => *f != 0.0,
      ParamValue::Text(s) => !s.is_empty(),
      ParamValue::Date(_) => true,
    }
  }

  /// Query-string rendering; `None` for values that are left out of the URL
  pub fn to_query_value(&self) -> Option<String> {
    match self {
      ParamValue::Null => None,
      ParamValue::Bool(b) => Some(b.to_string()),
      ParamValue::Integer(i) => Some(i.to_string()),
      ParamValue::Float(f) => Some(f.to_string()),
      ParamValue::Text(s) => Some(s.clone()),
      ParamValue::Date(DateLike::Structured(d)) => {
        Some(d.format(crate::CANONICAL_DATE_FORMAT).to_string())
      }
      ParamValue::Date(DateLike::Text(s)) => Some(s.clone()),
    }
  }
}

impl From<&str> for ParamValue {
  fn from(s: &str) -> Self {
    ParamValue::Text(s.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(s: String) -> Self {
    ParamValue::Text(s)
  }
}

impl From<bool> for ParamValue {
  fn from(b: bool) -> Self {
    ParamValue::Bool(b)
  }
}

impl From<i32> for ParamValue {
  fn from(i: i32) -> Self {
    ParamValue::Integer(i64::from(i))
  }
}

impl From<i64> for ParamValue {
  fn from(i: i64) -> Self {
    ParamValue::Integer(i)
  }
}

impl From<u32> for ParamValue {
  fn from(i: u32) -> Self {
    ParamValue::Integer(i64::from(i))
  }
}

impl From<f64> for ParamValue {
  fn from(f: f64) -> Self {
    ParamValue::Float(f)
  }
}

impl From<DateLike> for ParamValue {
  fn from(d: DateLike) -> Self {
    ParamValue::Date(d)
  }
}

impl From<NaiveDate> for ParamValue {
  fn from(d: NaiveDate) -> Self {
    ParamValue::Date(d.into())
  }
}

impl From<NaiveDateTime> for ParamValue {
  fn from(dt: NaiveDateTime) -> Self {
    ParamValue::Date(dt.into())
  }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ParamValue {
  fn from(dt: DateTime<Tz>) -> Self {
    ParamValue::Date(dt.into())
  }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
  fn from(value: Option<T>) -> Self {
    value.map_or(ParamValue::Null, Into::into)
  }
}

/// Insertion-ordered request parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
  inner: IndexMap<String, ParamValue>,
}

impl ParameterSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `key`, replacing an existing value in place
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
    self.inner.insert(key.into(), value.into())
  }

  /// Builder-style [`insert`](Self::insert)
  pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
    self.insert(key, value);
    self
  }

  pub fn get(&self, key: &str) -> Option<&ParamValue> {
    self.inner.get(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.inner.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.inner.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
    self.inner.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Copy every entry of `other` over this set; later values win
  pub fn merge(&mut self, other: &ParameterSet) {
    for (key, value) in &other.inner {
      self.inner.insert(key.clone(), value.clone());
    }
  }

  /// Rendered `(key, value)` pairs in insertion order, without null values
  pub fn to_query_pairs(&self) -> Vec<(String, String)> {
    self
      .inner
      .iter()
      .filter_map(|(k, v)| v.to_query_value().map(|v| (k.clone(), v)))
      .collect()
  }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut set = ParameterSet::new();
    for (k, v) in iter {
      set.insert(k, v);
    }
    set
  }
}

/// Canonical date for a reserved-key value
///
/// Only text and date values are date-like; anything else is rejected.
pub fn normalize_value(value: &ParamValue) -> Result<String> {
  match value {
    ParamValue::Date(date) => normalize_date(date),
    ParamValue::Text(text) => normalize_date(&DateLike::Text(text.clone())),
    other => Err(Error::InvalidDate(format!("not a date-like value: {:?}", other))),
  }
}

/// Copy of `params` with truthy `date_from`/`date_to` rewritten as `YYYY-MM-DD`
///
/// Other keys, and falsy reserved values, are passed through untouched and
/// in order. Any bad date rejects the whole set.
pub fn normalize_params(params: &ParameterSet) -> Result<ParameterSet> {
  let mut normalized = params.clone();
  for key in [DATE_FROM, DATE_TO] {
    if let Some(value) = params.get(key).filter(|v| v.is_truthy()) {
      let canonical = normalize_value(value)?;
      normalized.insert(key, canonical);
    }
  }
  Ok(normalized)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn aapl() -> ParameterSet {
    ParameterSet::new().with("symbol", "AAPL")
  }

  #[test]
  fn test_normalizes_both_dates() {
    let params = aapl().with(DATE_FROM, "Jan 5, 2020").with(DATE_TO, "2020-02-01");

    let normalized = normalize_params(&params).unwrap();

    let expected = aapl().with(DATE_FROM, "2020-01-05").with(DATE_TO, "2020-02-01");
    assert_eq!(normalized, expected);
    assert_eq!(normalized.keys().collect::<Vec<_>>(), vec!["symbol", "date_from", "date_to"]);
  }

  #[test]
  fn test_input_is_not_mutated() {
    let params = aapl().with(DATE_FROM, "Jan 5, 2020");
    let before = params.clone();

    let _ = normalize_params(&params).unwrap();

    assert_eq!(params, before);
    assert_eq!(params.get(DATE_FROM), Some(&ParamValue::Text("Jan 5, 2020".to_string())));
  }

  #[test]
  fn test_falsy_dates_pass_through() {
    let params = aapl().with(DATE_FROM, "").with(DATE_TO, ParamValue::Null);
    let normalized = normalize_params(&params).unwrap();
    assert_eq!(normalized, params);

    let zero = aapl().with(DATE_FROM, 0i64);
    assert_eq!(normalize_params(&zero).unwrap(), zero);
  }

  #[test]
  fn test_identity_without_date_keys() {
    let params: ParameterSet = vec![
      ("symbol", ParamValue::from("AAPL,MSFT")),
      ("sort", ParamValue::from("newest")),
      ("limit", ParamValue::from(5i64)),
      ("formatted", ParamValue::from(true)),
    ]
    .into_iter()
    .collect();

    let normalized = normalize_params(&params).unwrap();

    assert_eq!(normalized, params);
    assert_eq!(
      normalized.keys().collect::<Vec<_>>(),
      vec!["symbol", "sort", "limit", "formatted"]
    );
  }

  #[test]
  fn test_structured_dates() {
    let from = NaiveDate::from_ymd_opt(2019, 7, 4).unwrap();
    let to = from.and_hms_opt(9, 30, 0).unwrap();
    let params = aapl().with(DATE_FROM, from).with(DATE_TO, to);

    let normalized = normalize_params(&params).unwrap();

    assert_eq!(normalized.get(DATE_FROM), Some(&ParamValue::Text("2019-07-04".to_string())));
    assert_eq!(normalized.get(DATE_TO), Some(&ParamValue::Text("2019-07-04".to_string())));
  }

  #[test]
  fn test_non_date_value_is_rejected() {
    assert!(matches!(normalize_value(&ParamValue::Integer(42)), Err(Error::InvalidDate(_))));
    assert!(matches!(normalize_value(&ParamValue::Float(1.5)), Err(Error::InvalidDate(_))));
    assert!(matches!(normalize_value(&ParamValue::Bool(true)), Err(Error::InvalidDate(_))));

    let params = aapl().with(DATE_FROM, 42i64);
    assert!(matches!(normalize_params(&params), Err(Error::InvalidDate(_))));
  }

  #[test]
  fn test_bad_date_rejects_whole_set() {
    let params = aapl().with(DATE_FROM, "2020-01-01").with(DATE_TO, "not a date");
    assert!(matches!(normalize_params(&params), Err(Error::InvalidDate(_))));
  }

  #[test]
  fn test_query_pairs() {
    let params = aapl()
      .with("api_token", "secret")
      .with(DATE_FROM, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap())
      .with("exchange", Option::<&str>::None)
      .with("formatted", false)
      .with("limit", 10u32);

    assert_eq!(
      params.to_query_pairs(),
      vec![
        ("symbol".to_string(), "AAPL".to_string()),
        ("api_token".to_string(), "secret".to_string()),
        ("date_from".to_string(), "2020-01-02".to_string()),
        ("formatted".to_string(), "false".to_string()),
        ("limit".to_string(), "10".to_string()),
      ]
    );
  }

  #[test]
  fn test_merge_overrides_in_place() {
    let mut base = aapl().with("api_token", "secret");
    let extra = ParameterSet::new().with("sort", "oldest").with("symbol", "MSFT");

    base.merge(&extra);

    assert_eq!(base.keys().collect::<Vec<_>>(), vec!["symbol", "api_token", "sort"]);
    assert_eq!(base.get("symbol"), Some(&ParamValue::Text("MSFT".to_string())));
  }
}
