//! SQL DATETIME values
//!
//! A `DateTime` is a calendar date plus wall-clock time without a timezone,
//! kept at microsecond precision. Values compare chronologically.
//!
//! When a datetime is compared with a number, the engine uses its numeric
//! form `YYYYMMDDhhmmss.ffffff` (see [`DateTime::to_number`]).

use crate::error::{Error, Result};
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Timezone-less datetime with microsecond precision
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    inner: NaiveDateTime,
}

impl DateTime {
    /// Parse a datetime literal
    ///
    /// Accepts:
    /// - `2024-01-15 10:30:00`, optionally with fractional seconds
    /// - the same with a `T` separator
    /// - minutes precision: `2024-01-15 10:30`
    /// - date only: `2024-01-15` (midnight)
    ///
    /// Fractional seconds beyond microseconds are truncated.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        for fmt in DATETIME_FORMATS {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self::from_naive(ndt));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from_naive(ndt));
            }
        }
        Err(Error::invalid_datetime(s))
    }

    /// Build from calendar parts; `None` if any part is out of range
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)
            .map(Self::from_naive)
    }

    /// Wrap a chrono value, truncating to microseconds
    pub fn from_naive(ndt: NaiveDateTime) -> Self {
        let micros = ndt.nanosecond() / 1_000 * 1_000;
        let inner = ndt.with_nanosecond(micros).unwrap_or(ndt);
        Self { inner }
    }

    /// Sub-second part in microseconds
    pub fn microsecond(&self) -> u32 {
        self.inner.nanosecond() / 1_000
    }

    /// Numeric form `YYYYMMDDhhmmss.ffffff`
    ///
    /// This is how a datetime takes part in comparisons against numbers:
    /// `2024-01-15 10:30:00` compares like `20240115103000`.
    pub fn to_number(&self) -> BigDecimal {
        let d = &self.inner;
        let whole = i64::from(d.year()) * 10_000_000_000
            + i64::from(d.month()) * 100_000_000
            + i64::from(d.day()) * 1_000_000
            + i64::from(d.hour()) * 10_000
            + i64::from(d.minute()) * 100
            + i64::from(d.second());
        let scaled = i128::from(whole) * 1_000_000 + i128::from(self.microsecond());
        BigDecimal::new(BigInt::from(scaled), 6)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse(s)
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(ndt: NaiveDateTime) -> Self {
        DateTime::from_naive(ndt)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format("%Y-%m-%d %H:%M:%S"))?;
        let micros = self.microsecond();
        if micros != 0 {
            write!(f, ".{:06}", micros)?;
        }
        Ok(())
    }
}

// Serialized as the display string so JSON fixtures stay readable.
impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse(&s).map_err(serde::de::Error::custom)
    }
}
