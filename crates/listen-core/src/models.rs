use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single listening record after normalization.
///
/// Serialized field names match the checkpoint CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    /// Local play time, already corrected by the configured timestamp strategy.
    #[serde(rename = "Timestamp")]
    pub timestamp: NaiveDateTime,
    /// Device / client platform string.
    #[serde(rename = "Platform")]
    pub platform: String,
    /// Milliseconds of audio played.
    #[serde(rename = "MsPlayed")]
    pub ms_played: u64,
    /// Country code of the connection.
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "TrackName")]
    pub track_name: String,
    #[serde(rename = "TrackAlbum")]
    pub track_album: String,
    #[serde(rename = "TrackArtist")]
    pub track_artist: String,
    /// Track identifier; never empty for a constructed event.
    #[serde(rename = "URI")]
    pub track_uri: String,
    /// Why playback of this track started.
    #[serde(rename = "StartReason")]
    pub start_reason: String,
    /// Why playback of this track ended.
    #[serde(rename = "EndReason")]
    pub end_reason: String,
    #[serde(rename = "Shuffle")]
    pub shuffle: bool,
    #[serde(rename = "Skipped")]
    pub skipped: bool,
    #[serde(rename = "Incognito")]
    pub incognito: bool,
}

impl PlayEvent {
    /// Hour of day (0–23) of the local play time.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Calendar date of the local play time.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// `hour * 3600 + minute * 60 + second`.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.timestamp.num_seconds_from_midnight()
    }
}

/// `(year, month, day, hour, minute)` as produced by the timestamp parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl TimestampParts {
    pub fn as_tuple(&self) -> (i32, u32, u32, u32, u32) {
        (self.year, self.month, self.day, self.hour, self.minute)
    }
}
