//! Timestamp literals.
//!
//! A [`Timestamp`] stores the literal text exactly as it appeared in the
//! document. The parser only checks that the text has the shape of an
//! extended date/time; turning it into an instant is left to `chrono` and
//! happens lazily in [`Timestamp::to_datetime`].
//!
//! Accepted shapes:
//!
//! ```text
//! 1979-05-27
//! 1979-05-27T07:32
//! 1979-05-27T07:32:12Z
//! 1979-05-27 07:32:12.999-08:00
//! 1979-05-27t07:32:12,5+0530
//! ```

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

const TIMESTAMP_PATTERN: &str = concat!(
    r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])",
    r"([Tt ]([01]\d|2[0-3]):[0-5]\d(:[0-5]\d([.,]\d+)?)?",
    r"([zZ]|[+-]([01]\d|2[0-3])(:?[0-5]\d)?)?)?$",
);

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern compiles"))
}

/// Returns `true` if `text` has the shape of a timestamp literal.
pub(crate) fn is_timestamp(text: &str) -> bool {
    pattern().is_match(text)
}

/// A validated timestamp literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// Validates and wraps a timestamp literal.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidValue`] if the text is not a timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Timestamp;
    ///
    /// let ts = Timestamp::parse("1979-05-27T07:32:12Z").unwrap();
    /// assert_eq!(ts.as_str(), "1979-05-27T07:32:12Z");
    /// assert!(Timestamp::parse("yesterday").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        if is_timestamp(text) {
            Ok(Timestamp(text.to_string()))
        } else {
            Err(Error::invalid_value(text, "not a timestamp"))
        }
    }

    /// Wraps text the caller has already matched against the pattern.
    pub(crate) fn from_literal(text: &str) -> Self {
        Timestamp(text.to_string())
    }

    /// Returns the literal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the literal carries a `Z` or numeric offset.
    #[must_use]
    pub fn has_offset(&self) -> bool {
        split_offset(self.time_part()).1.is_some()
    }

    fn time_part(&self) -> &str {
        self.0.get(11..).unwrap_or("")
    }

    /// Interprets the literal as an instant with its offset preserved.
    ///
    /// A literal without an offset is read as UTC and a date-only literal
    /// as midnight.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidValue`] if the literal names a date or
    /// time the calendar does not have, such as `2023-02-30`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::FixedOffset;
    /// use toml_tree::Timestamp;
    ///
    /// let ts = Timestamp::parse("1979-05-27T07:32:00-08:00").unwrap();
    /// let dt = ts.to_datetime().unwrap();
    /// assert_eq!(*dt.offset(), FixedOffset::west_opt(8 * 3600).unwrap());
    /// ```
    pub fn to_datetime(&self) -> Result<DateTime<FixedOffset>> {
        let invalid = |reason: &str| Error::invalid_value(&self.0, reason);

        let date = self.0.get(..10).ok_or_else(|| invalid("missing date"))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| invalid("date does not exist"))?;

        let (time, offset) = split_offset(self.time_part());
        let naive = if time.is_empty() {
            date.and_hms_opt(0, 0, 0)
                .ok_or_else(|| invalid("date does not exist"))?
        } else {
            let mut time = time.replace(',', ".");
            if time.len() == 5 {
                time.push_str(":00");
            }
            NaiveDateTime::parse_from_str(
                &format!("{}T{}", date.format("%Y-%m-%d"), time),
                "%Y-%m-%dT%H:%M:%S%.f",
            )
            .map_err(|_| invalid("time does not exist"))?
        };

        let seconds = match offset {
            None => 0,
            Some(offset) => offset_seconds(offset).ok_or_else(|| invalid("bad offset"))?,
        };
        let offset = FixedOffset::east_opt(seconds).ok_or_else(|| invalid("bad offset"))?;
        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| invalid("ambiguous local time"))
    }

    /// Interprets the literal and converts it to UTC.
    ///
    /// # Errors
    ///
    /// See [`Timestamp::to_datetime`].
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        Ok(self.to_datetime()?.with_timezone(&Utc))
    }
}

/// Splits `HH:MM:SS.fffZ` into the clock part and the offset suffix.
fn split_offset(time: &str) -> (&str, Option<&str>) {
    if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        return (clock, Some("Z"));
    }
    match time.rfind(['+', '-']) {
        Some(at) => (&time[..at], Some(&time[at..])),
        None => (time, None),
    }
}

fn offset_seconds(offset: &str) -> Option<i32> {
    if offset == "Z" {
        return Some(0);
    }
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits: String = offset[1..].chars().filter(|c| *c != ':').collect();
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = match digits.get(2..) {
        Some("") | None => 0,
        Some(minutes) => minutes.parse().ok()?,
    };
    Some(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Timestamp(value.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp(value.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
    }
}
