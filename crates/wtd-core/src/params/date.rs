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

//! Date-like request values and their canonical `YYYY-MM-DD` rendering

use crate::error::{Error, Result};
use crate::CANONICAL_DATE_FORMAT;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// A value that can stand in for a calendar date in a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLike {
  /// Calendar fields taken from a chrono value, without timezone conversion
  Structured(NaiveDate),
  /// Free text to be read by [`parse_text_date`]
  Text(String),
}

impl From<NaiveDate> for DateLike {
  fn from(date: NaiveDate) -> Self {
    DateLike::Structured(date)
  }
}

impl From<NaiveDateTime> for DateLike {
  fn from(dt: NaiveDateTime) -> Self {
    DateLike::Structured(dt.date())
  }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateLike {
  fn from(dt: DateTime<Tz>) -> Self {
    DateLike::Structured(dt.date_naive())
  }
}

impl From<&str> for DateLike {
  fn from(s: &str) -> Self {
    DateLike::Text(s.to_string())
  }
}

impl From<String> for DateLike {
  fn from(s: String) -> Self {
    DateLike::Text(s)
  }
}

/// Render a date-like value as `YYYY-MM-DD`
///
/// Years outside `0..=9999` cannot be written in that shape and are rejected.
pub fn normalize_date(value: &DateLike) -> Result<String> {
  let date = match value {
    DateLike::Structured(date) => *date,
    DateLike::Text(text) => parse_text_date(text)?,
  };
  if !(0..=9999).contains(&date.year()) {
    return Err(Error::InvalidDate(format!("year {} has no four-digit form", date.year())));
  }
  Ok(date.format(CANONICAL_DATE_FORMAT).to_string())
}

/// Best-effort parse of a human-written date
///
/// RFC 3339 and RFC 2822 timestamps are read by chrono. Anything else is
/// split into words: month names (full or abbreviated, hyphenated or not),
/// numbers with optional ordinal suffixes, and times of day (24- or 12-hour,
/// with or without an offset). Weekday names are ignored. Numeric dates are
/// read year-first when the first number has four digits, otherwise month
/// first, falling back to day first when the month would be out of range.
/// Years need two or four digits; two-digit years map to 1969..=2068.
/// Timestamps keep their own calendar date.
pub fn parse_text_date(input: &str) -> Result<NaiveDate> {
  let invalid = || Error::InvalidDate(format!("unrecognised date '{}'", input));

  let raw = input.trim();
  if raw.is_empty() {
    return Err(Error::InvalidDate("empty date string".to_string()));
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(dt.date_naive());
  }
  if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
    return Ok(dt.date_naive());
  }

  let mut parts = DateParts::default();
  for word in split_words(raw) {
    parts.push_word(&word).ok_or_else(invalid)?;
  }
  parts.resolve().ok_or_else(invalid)
}

const ORDINALS: &[&str] = &["st", "nd", "rd", "th"];
const FILLERS: &[&str] = &["at", "on", "of", "the", "and"];
const ZONES: &[&str] = &["z", "utc", "gmt"];
const MERIDIEMS: &[&str] = &["am", "pm", "a.m.", "p.m."];

/// Whitespace-separated words; commas and an ISO `T` between digits act as spaces
fn split_words(raw: &str) -> Vec<String> {
  let chars: Vec<char> = raw.chars().collect();
  let spaced: String = chars
    .iter()
    .enumerate()
    .map(|(i, &c)| {
      let iso_t = (c == 'T' || c == 't')
        && i > 0
        && chars[i - 1].is_ascii_digit()
        && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
      if c == ',' || iso_t {
        ' '
      } else {
        c
      }
    })
    .collect();
  spaced.split_whitespace().map(str::to_ascii_lowercase).collect()
}

#[derive(Debug, Default)]
struct DateParts {
  numbers: Vec<String>,
  month: Option<u32>,
}

impl DateParts {
  fn push_word(&mut self, word: &str) -> Option<()> {
    if word.contains(':') {
      return is_time_of_day(word).then_some(());
    }
    if is_offset(word) || ZONES.contains(&word) || MERIDIEMS.contains(&word) {
      return Some(());
    }
    for part in word.split(|c: char| matches!(c, '/' | '-' | '.')).filter(|p| !p.is_empty()) {
      self.push_part(part)?;
    }
    Some(())
  }

  fn push_part(&mut self, part: &str) -> Option<()> {
    let digits = part.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if !digits.is_empty() {
      let suffix = &part[digits.len()..];
      let numeric = digits.chars().all(|c| c.is_ascii_digit());
      if numeric && (suffix.is_empty() || ORDINALS.contains(&suffix)) {
        self.numbers.push(digits.to_string());
        return Some(());
      }
      return None;
    }
    if let Some(month) = month_number(part) {
      return self.month.replace(month).is_none().then_some(());
    }
    (is_weekday(part) || FILLERS.contains(&part)).then_some(())
  }

  fn resolve(&self) -> Option<NaiveDate> {
    let (year, month, day) = match (self.month, self.numbers.as_slice()) {
      (Some(month), [a, b]) => {
        let (year, day) = if a.len() == 4 || (b.len() != 4 && value(a)? > 31) {
          (a, b)
        } else {
          (b, a)
        };
        if day.len() > 2 {
          return None;
        }
        (year_value(year)?, month, value(day)?)
      }
      (None, [compact]) if compact.len() == 8 => {
        (year_value(&compact[..4])?, value(&compact[4..6])?, value(&compact[6..])?)
      }
      (None, [a, b, c]) if a.len() == 4 => {
        if b.len() > 2 || c.len() > 2 {
          return None;
        }
        (year_value(a)?, value(b)?, value(c)?)
      }
      (None, [a, b, c]) => {
        if a.len() > 2 || b.len() > 2 {
          return None;
        }
        let (first, second) = (value(a)?, value(b)?);
        let (month, day) = if first > 12 { (second, first) } else { (first, second) };
        (year_value(c)?, month, day)
      }
      _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
  }
}

fn value(digits: &str) -> Option<u32> {
  digits.parse().ok()
}

fn year_value(digits: &str) -> Option<i32> {
  let year: i32 = digits.parse().ok()?;
  match digits.len() {
    4 => Some(year),
    2 if year < 69 => Some(2000 + year),
    2 => Some(1900 + year),
    _ => None,
  }
}

fn month_number(word: &str) -> Option<u32> {
  let month = match word {
    "jan" | "january" => 1,
    "feb" | "february" => 2,
    "mar" | "march" => 3,
    "apr" | "april" => 4,
    "may" => 5,
    "jun" | "june" => 6,
    "jul" | "july" => 7,
    "aug" | "august" => 8,
    "sep" | "sept" | "september" => 9,
    "oct" | "october" => 10,
    "nov" | "november" => 11,
    "dec" | "december" => 12,
    _ => return None,
  };
  Some(month)
}

fn is_weekday(word: &str) -> bool {
  matches!(
    word,
    "mon"
      | "monday"
      | "tue"
      | "tues"
      | "tuesday"
      | "wed"
      | "wednesday"
      | "thu"
      | "thur"
      | "thurs"
      | "thursday"
      | "fri"
      | "friday"
      | "sat"
      | "saturday"
      | "sun"
      | "sunday"
  )
}

/// `+02`, `-0500`, `+05:30`
fn is_offset(word: &str) -> bool {
  let Some(rest) = word.strip_prefix(['+', '-']) else {
    return false;
  };
  let digits = rest.chars().filter(|c| c.is_ascii_digit()).count();
  rest.chars().all(|c| c.is_ascii_digit() || c == ':') && (digits == 2 || digits == 4)
}

/// `16:00`, `4:00pm`, `10:00:00.123`, `23:30:00-0500`, `10:00:00z`
fn is_time_of_day(word: &str) -> bool {
  let mut time = word;
  for suffix in MERIDIEMS.iter().chain(ZONES) {
    time = time.strip_suffix(suffix).unwrap_or(time);
  }
  if let Some(pos) = time.rfind(['+', '-']) {
    if pos > 0 && is_offset(&time[pos..]) {
      time = &time[..pos];
    }
  }
  NaiveTime::parse_from_str(time, "%H:%M:%S%.f").is_ok()
    || NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}
