use serde_json::Value;

use crate::error::{ListenError, Result};
use crate::models::PlayEvent;
use crate::time_utils::TimestampStrategy;

// ── Field name candidates ─────────────────────────────────────────────────────
//
// Each export generation names the same column differently. The first key
// present on the record wins.

const TIMESTAMP_KEYS: &[&str] = &["ts", "timestamp"];
const PLATFORM_KEYS: &[&str] = &["platform"];
const MS_PLAYED_KEYS: &[&str] = &["ms_played", "msPlayed"];
const COUNTRY_KEYS: &[&str] = &["conn_country", "country"];
const TRACK_NAME_KEYS: &[&str] = &["master_metadata_track_name", "trackName", "track_name"];
const ARTIST_KEYS: &[&str] = &[
    "master_metadata_album_artist_name",
    "artistName",
    "track_artist",
];
const ALBUM_KEYS: &[&str] = &[
    "master_metadata_album_album_name",
    "albumName",
    "track_album",
];
const TRACK_URI_KEYS: &[&str] = &["spotify_track_uri", "trackUri", "track_uri"];
const START_REASON_KEYS: &[&str] = &["reason_start", "start_reason"];
const END_REASON_KEYS: &[&str] = &["reason_end", "end_reason"];
const SHUFFLE_KEYS: &[&str] = &["shuffle"];
const SKIPPED_KEYS: &[&str] = &["skipped"];
const INCOGNITO_KEYS: &[&str] = &["incognito_mode", "incognito"];
const OFFLINE_TIMESTAMP_KEYS: &[&str] = &["offline_timestamp"];

// ── RecordAdapter ─────────────────────────────────────────────────────────────

/// Maps raw export records onto [`PlayEvent`].
pub struct RecordAdapter;

impl RecordAdapter {
    /// Track identifier of a raw record, or `None` when it is absent, `null`
    /// or empty. Such records never become a [`PlayEvent`].
    pub fn track_uri(data: &Value) -> Option<&str> {
        Self::find(data, TRACK_URI_KEYS)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Build a [`PlayEvent`] from a raw record.
    ///
    /// Returns `Ok(None)` when the record has no track identifier. Fails when
    /// the timestamp is malformed or a numeric / boolean field cannot be
    /// coerced.
    pub fn to_play_event(data: &Value, strategy: &TimestampStrategy) -> Result<Option<PlayEvent>> {
        let Some(track_uri) = Self::track_uri(data) else {
            return Ok(None);
        };

        let raw_ts = Self::find(data, TIMESTAMP_KEYS)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ListenError::MalformedTimestamp(
                    Self::find(data, TIMESTAMP_KEYS)
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "<missing>".to_string()),
                )
            })?;
        let timestamp = strategy.normalize(raw_ts, Self::find(data, OFFLINE_TIMESTAMP_KEYS))?;

        Ok(Some(PlayEvent {
            timestamp,
            platform: Self::text(data, PLATFORM_KEYS),
            ms_played: Self::duration(data, MS_PLAYED_KEYS, "ms_played")?,
            country: Self::text(data, COUNTRY_KEYS),
            track_name: Self::text(data, TRACK_NAME_KEYS),
            track_album: Self::text(data, ALBUM_KEYS),
            track_artist: Self::text(data, ARTIST_KEYS),
            track_uri: track_uri.to_string(),
            start_reason: Self::text(data, START_REASON_KEYS),
            end_reason: Self::text(data, END_REASON_KEYS),
            shuffle: Self::flag(data, SHUFFLE_KEYS, "shuffle")?,
            skipped: Self::flag(data, SKIPPED_KEYS, "skipped")?,
            incognito: Self::flag(data, INCOGNITO_KEYS, "incognito")?,
        }))
    }

    // ── Coercion helpers ──────────────────────────────────────────────────────

    /// First non-missing value among `keys`.
    fn find<'a>(data: &'a Value, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|&key| data.get(key))
    }

    /// Best-effort string coercion. `null` and absent fields become `""`.
    fn text(data: &Value, keys: &[&str]) -> String {
        match Self::find(data, keys) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Non-negative integer coercion for millisecond durations.
    fn duration(data: &Value, keys: &[&str], field: &'static str) -> Result<u64> {
        let value = Self::find(data, keys).unwrap_or(&Value::Null);
        let coerced = match value {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        coerced.ok_or_else(|| ListenError::TypeCoercion {
            field,
            value: value.to_string(),
        })
    }

    /// Boolean coercion. `null` and absent fields mean `false`.
    fn flag(data: &Value, keys: &[&str], field: &'static str) -> Result<bool> {
        let value = match Self::find(data, keys) {
            None | Some(Value::Null) => return Ok(false),
            Some(v) => v,
        };
        let coerced = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        };
        coerced.ok_or_else(|| ListenError::TypeCoercion {
            field,
            value: value.to_string(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
