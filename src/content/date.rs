//! Publish timestamps as written in the content registries.
//!
//! A [`PostDate`] keeps the string as written (it is what gets serialized back
//! out) next to two parsed views:
//!
//! | View      | Used for                         |
//! |-----------|----------------------------------|
//! | `instant` | ordering (newest first)          |
//! | `day`     | grouping by day / year, sitemaps |
//!
//! Timestamps without an offset are treated as naive local time, which is how
//! the registries are written. Timestamps with `Z` or an offset are ordered by
//! their UTC instant, but `day` stays the calendar date as written.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use serde::{Serialize, Serializer};
use std::{cmp::Ordering, fmt};

/// Accepted layouts for timestamps without an offset.
///
/// `%.f` consumes nothing when there is no fractional part.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone)]
pub struct PostDate {
    raw: String,
    /// UTC instant.
    instant: NaiveDateTime,
    day: NaiveDate,
}

impl PostDate {
    /// Parse from "YYYY-MM-DD", "YYYY-MM-DDTHH:MM[:SS[.fff]]" or RFC 3339.
    pub fn parse(s: &str) -> Option<Self> {
        let raw = s.trim();
        if raw.len() < 10 {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self {
                raw: raw.to_owned(),
                instant: dt.naive_utc(),
                day: dt.date_naive(),
            });
        }

        let local = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;

        Some(Self {
            raw: raw.to_owned(),
            instant: local_to_utc(local),
            day: local.date(),
        })
    }

    /// The timestamp exactly as written in the registry.
    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[allow(dead_code)]
    pub const fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    /// Calendar date as written (no offset conversion).
    pub const fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn year(&self) -> i32 {
        self.day.year()
    }

    /// `YYYY-MM-DD`, the form used by sitemaps and day dividers.
    pub fn ymd(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}

/// Resolve a wall-clock time in the local zone to UTC.
///
/// Ambiguous times take the earlier instant. Times skipped by a DST jump are
/// moved forward an hour.
fn local_to_utc(local: NaiveDateTime) -> NaiveDateTime {
    Local
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(local + TimeDelta::hours(1))).earliest())
        .map_or(local, |dt| dt.naive_utc())
}

impl PartialEq for PostDate {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for PostDate {}

impl PartialOrd for PostDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PostDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
