//! Date normalisation into the `YYYY-MM` month token the service expects.
//!
//! # Design
//! Structured values (`chrono` dates and timestamps) are formatted straight
//! from their own year and month fields. Text is matched against a fixed,
//! ordered list of formats; the first format that yields a valid calendar
//! date wins. Slash-delimited dates with the year last are read month-first
//! (`03/04/2022` is March 4th). Day-first is tried only when month-first
//! cannot produce a valid date, e.g. `15/06/2022`. Years must be written with
//! four digits; `6/15/22` is rejected rather than read as year 22. No
//! timezone conversion is ever applied: the month is the one written in the
//! input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::error::ApiError;

/// Full-date formats, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Date-time formats without an offset.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Month-only formats. Parsed by appending a synthetic first day.
const MONTH_FORMATS: &[(&str, &str)] = &[
    ("%Y-%m", "-01"),
    ("%Y/%m", "/01"),
    ("%B %Y", " 01"),
];

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateToken {
    year: i32,
    month: u32,
}

impl DateToken {
    /// Build a token from a year and a month in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, ApiError> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidDateInput(format!(
                "month {month} is out of range"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn from_datelike(value: &impl Datelike) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
        }
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for DateToken {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_text(s)
    }
}

impl Serialize for DateToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Anything a caller may hand over as a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// A structured calendar date; no parsing involved.
    Structured(NaiveDate),
    /// A month that has already been normalised.
    Month(DateToken),
    /// Free-form text, parsed best-effort.
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Structured(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(datetime: NaiveDateTime) -> Self {
        DateInput::Structured(datetime.date())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(datetime: DateTime<Tz>) -> Self {
        DateInput::Structured(datetime.date_naive())
    }
}

impl From<DateToken> for DateInput {
    fn from(token: DateToken) -> Self {
        DateInput::Month(token)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl TryFrom<&serde_json::Value> for DateInput {
    type Error = ApiError;

    /// Only JSON strings are date candidates; numbers, null and containers
    /// are rejected outright.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(text) => Ok(DateInput::Text(text.clone())),
            other => Err(ApiError::InvalidDateInput(format!(
                "expected a date string, got {other}"
            ))),
        }
    }
}

/// Normalise `input` into a `YYYY-MM` token.
pub fn normalize(input: impl Into<DateInput>) -> Result<DateToken, ApiError> {
    match input.into() {
        DateInput::Structured(date) => Ok(DateToken::from_datelike(&date)),
        DateInput::Month(token) => Ok(token),
        DateInput::Text(text) => parse_text(&text),
    }
}

/// Normalise a loosely typed JSON value.
pub fn normalize_value(value: &serde_json::Value) -> Result<DateToken, ApiError> {
    normalize(DateInput::try_from(value)?)
}

fn parse_text(raw: &str) -> Result<DateToken, ApiError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ApiError::InvalidDateInput("empty date string".to_string()));
    }

    let token = parse_full_date(text)
        .or_else(|| parse_datetime(text))
        .or_else(|| parse_month(text))
        .map(|date| DateToken::from_datelike(&date))
        .ok_or_else(|| ApiError::InvalidDateInput(format!("unrecognised date {raw:?}")))?;

    trace!(input = raw, %token, "normalised date");
    Ok(token)
}

fn parse_full_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok().filter(has_full_year))
}

fn parse_datetime(text: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive()).filter(has_full_year);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|datetime| datetime.date())
        .filter(has_full_year)
}

fn parse_month(text: &str) -> Option<NaiveDate> {
    MONTH_FORMATS.iter().find_map(|(fmt, day)| {
        let padded = format!("{text}{day}");
        let full_fmt = format!("{fmt}{}", day.replace("01", "%d"));
        NaiveDate::parse_from_str(&padded, &full_fmt)
            .ok()
            .filter(has_full_year)
    })
}

/// `%Y` accepts any digit count, so `June 2022` can match `%B %d %Y` as day
/// 20 of year 22. Only four-digit years are accepted.
fn has_full_year(date: &NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}
