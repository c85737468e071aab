//! Timestamp normalization for streaming-history records.
//!
//! Raw exports carry UTC wall-clock timestamps of the form
//! `YYYY-MM-DDTHH:MM:SSZ`. Two strategies turn them into a local play time:
//! a fixed signed UTC offset, or combining the record's date with the time of
//! day of its offline-playback timestamp.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use serde_json::Value;

use crate::error::{ListenError, Result};
use crate::models::TimestampParts;

/// Offset (in hours) applied when none is configured.
pub const DEFAULT_UTC_OFFSET: i32 = -8;

/// Exact layout accepted by [`parse_timestamp`].
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const TIMESTAMP_LEN: usize = 20;

/// Epoch values at or above this are treated as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

// ── Fixed-offset contract ─────────────────────────────────────────────────────

/// Shift an hour of day by `offset` hours, wrapping around the 24-hour wheel.
///
/// Uses Euclidean remainder so negative sums wrap instead of going below zero.
///
/// # Examples
///
/// ```
/// use listen_core::time_utils::apply_offset;
///
/// assert_eq!(apply_offset(0, -8), 16);
/// assert_eq!(apply_offset(8, -8), 0);
/// assert_eq!(apply_offset(23, 3), 2);
/// ```
pub fn apply_offset(hour: u32, offset: i32) -> u32 {
    (hour as i64 + offset as i64).rem_euclid(24) as u32
}

/// Parse `YYYY-MM-DDTHH:MM:SSZ` into `(year, month, day, hour, minute)`.
///
/// No offset is applied. Seconds are validated but not returned.
pub fn parse_timestamp(s: &str) -> Result<TimestampParts> {
    let dt = parse_utc(s)?;
    Ok(TimestampParts {
        year: dt.year(),
        month: dt.month(),
        day: dt.day(),
        hour: dt.hour(),
        minute: dt.minute(),
    })
}

/// Parse a timestamp and apply `offset` to its hour only.
///
/// The calendar fields are returned exactly as parsed, even when the hour
/// wraps past midnight.
pub fn process_timestamp(s: &str, offset: i32) -> Result<TimestampParts> {
    let mut parts = parse_timestamp(s)?;
    parts.hour = apply_offset(parts.hour, offset);
    Ok(parts)
}

/// Parse a strict `YYYY-MM-DDTHH:MM:SSZ` string into a naive UTC datetime.
pub fn parse_utc(s: &str) -> Result<NaiveDateTime> {
    if !has_timestamp_layout(s) {
        return Err(ListenError::MalformedTimestamp(s.to_string()));
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|_| ListenError::MalformedTimestamp(s.to_string()))
}

/// Check separators and digit positions before handing off to chrono, which
/// would otherwise accept unpadded fields.
fn has_timestamp_layout(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        10 => b == b'T',
        13 | 16 => b == b':',
        19 => b == b'Z',
        _ => b.is_ascii_digit(),
    })
}

// ── Offline timestamp combination ─────────────────────────────────────────────

/// Floor `base` to midnight and add the time of day of `offline`.
pub fn combine_with_time_of_day(base: NaiveDateTime, offline: NaiveDateTime) -> NaiveDateTime {
    let midnight = NaiveDateTime::new(base.date(), NaiveTime::default());
    let delta = offline.hour() as i64 * 3_600 + offline.minute() as i64 * 60 + offline.second() as i64;
    midnight + Duration::seconds(delta)
}

/// Read an offline-playback timestamp.
///
/// Accepts epoch seconds, epoch milliseconds, digit strings of either, or a
/// `YYYY-MM-DDTHH:MM:SSZ` string. `null`, zero and empty strings mean the
/// record has no offline timestamp.
pub fn parse_offline_timestamp(value: &Value) -> Result<Option<NaiveDateTime>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let epoch = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .ok_or_else(|| offline_coercion_error(value))?;
            epoch_to_datetime(epoch, value)
        }
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) if s.bytes().all(|b| b.is_ascii_digit()) => {
            let epoch: i64 = s.parse().map_err(|_| offline_coercion_error(value))?;
            epoch_to_datetime(epoch, value)
        }
        Value::String(s) => parse_utc(s).map(Some),
        _ => Err(offline_coercion_error(value)),
    }
}

fn epoch_to_datetime(epoch: i64, raw: &Value) -> Result<Option<NaiveDateTime>> {
    if epoch == 0 {
        return Ok(None);
    }
    if epoch < 0 {
        return Err(offline_coercion_error(raw));
    }
    let dt = if epoch >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp(epoch / 1_000, ((epoch % 1_000) * 1_000_000) as u32)
    } else {
        DateTime::from_timestamp(epoch, 0)
    };
    dt.map(|d| Some(d.naive_utc()))
        .ok_or_else(|| offline_coercion_error(raw))
}

fn offline_coercion_error(value: &Value) -> ListenError {
    ListenError::TypeCoercion {
        field: "offline_timestamp",
        value: value.to_string(),
    }
}

// ── TimestampStrategy ─────────────────────────────────────────────────────────

/// How a raw UTC timestamp becomes a local play time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStrategy {
    /// Shift the whole timestamp by a signed number of hours.
    FixedOffset { hours: i32 },
    /// Keep the record's date and take the time of day from its offline
    /// timestamp, when it has one.
    OfflineCombination,
}

impl Default for TimestampStrategy {
    fn default() -> Self {
        Self::FixedOffset {
            hours: DEFAULT_UTC_OFFSET,
        }
    }
}

impl TimestampStrategy {
    /// Normalize the raw timestamp string `ts`.
    ///
    /// `offline` is the record's offline timestamp value and is only consulted
    /// by [`TimestampStrategy::OfflineCombination`].
    pub fn normalize(&self, ts: &str, offline: Option<&Value>) -> Result<NaiveDateTime> {
        let base = parse_utc(ts)?;
        match *self {
            Self::FixedOffset { hours } => base
                .checked_add_signed(Duration::hours(hours as i64))
                .ok_or_else(|| ListenError::MalformedTimestamp(ts.to_string())),
            Self::OfflineCombination => {
                let offline = match offline {
                    Some(value) => parse_offline_timestamp(value)?,
                    None => None,
                };
                Ok(match offline {
                    Some(offline) => combine_with_time_of_day(base, offline),
                    None => base,
                })
            }
        }
    }

    /// Short human-readable description for logs and report headers.
    pub fn describe(&self) -> String {
        match self {
            Self::FixedOffset { hours } => format!("UTC{:+}", hours),
            Self::OfflineCombination => "offline time of day".to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
