//! Analysis pipeline for listen-stats.
//!
//! Runs every aggregator query over a loaded history and bundles the outputs
//! into a [`ListeningReport`] ready for the reporter.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use listen_core::error::Result;
use listen_core::models::PlayEvent;
use tracing::{debug, info};

use crate::aggregator::{HourlyDistribution, ListeningAggregator, RankedEntry};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of events the report was computed from.
    pub events_analyzed: usize,
    /// Requested length of each ranking.
    pub top_n: usize,
    /// Earliest local play date, `None` for an empty history.
    pub first_date: Option<NaiveDate>,
    /// Latest local play date, `None` for an empty history.
    pub last_date: Option<NaiveDate>,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_history`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct ListeningReport {
    pub top_tracks: Vec<RankedEntry>,
    pub top_albums: Vec<RankedEntry>,
    pub top_artists: Vec<RankedEntry>,
    pub total_hours: f64,
    pub hourly: HourlyDistribution,
    pub metadata: ReportMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every aggregation over `events`.
///
/// Fails with `EmptyDataset` when the history holds no listening time.
pub fn analyze_history(events: &[PlayEvent], top_n: usize) -> Result<ListeningReport> {
    let start = Instant::now();

    let hourly = ListeningAggregator::hourly_distribution(events)?;
    let top_tracks = ListeningAggregator::top_tracks(events, top_n);
    let top_albums = ListeningAggregator::top_albums(events, top_n);
    let top_artists = ListeningAggregator::top_artists(events, top_n);
    let total_hours = ListeningAggregator::total_hours(events);

    let first_date = events.iter().map(PlayEvent::date).min();
    let last_date = events.iter().map(PlayEvent::date).max();

    let elapsed = start.elapsed().as_secs_f64();
    debug!(
        "Aggregated {} events in {:.3}s (peak hour {})",
        events.len(),
        elapsed,
        hourly.peak_hour()
    );
    info!("Total listening time: {:.2} hours", total_hours);

    Ok(ListeningReport {
        top_tracks,
        top_albums,
        top_artists,
        total_hours,
        hourly,
        metadata: ReportMetadata {
            generated_at: Utc::now().to_rfc3339(),
            events_analyzed: events.len(),
            top_n,
            first_date,
            last_date,
            aggregate_time_seconds: elapsed,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use listen_core::error::ListenError;

    fn make_event(ts: &str, track: &str, ms: u64) -> PlayEvent {
        PlayEvent {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            platform: "ios".to_string(),
            ms_played: ms,
            country: "GB".to_string(),
            track_name: track.to_string(),
            track_album: format!("{track} (album)"),
            track_artist: "Someone".to_string(),
            track_uri: format!("spotify:track:{track}"),
            start_reason: "clickrow".to_string(),
            end_reason: "endplay".to_string(),
            shuffle: true,
            skipped: false,
            incognito: false,
        }
    }

    #[test]
    fn test_analyze_history_bundles_all_queries() {
        let events = vec![
            make_event("2023-03-02 08:00:00", "A", 1_800_000),
            make_event("2023-03-01 20:00:00", "A", 1_800_000),
            make_event("2023-03-05 20:30:00", "B", 3_600_000),
        ];
        let report = analyze_history(&events, 5).unwrap();

        assert_eq!(report.top_tracks[0].name, "A");
        assert_eq!(report.top_tracks[0].count, 2);
        assert_eq!(report.top_albums.len(), 2);
        assert_eq!(report.top_artists[0].count, 3);
        assert_eq!(report.total_hours, 2.0);
        assert!((report.hourly.percentage(20).unwrap() - 75.0).abs() < 1e-9);
        assert!((report.hourly.percentage(8).unwrap() - 25.0).abs() < 1e-9);

        assert_eq!(report.metadata.events_analyzed, 3);
        assert_eq!(report.metadata.top_n, 5);
        assert_eq!(
            report.metadata.first_date,
            NaiveDate::from_ymd_opt(2023, 3, 1)
        );
        assert_eq!(
            report.metadata.last_date,
            NaiveDate::from_ymd_opt(2023, 3, 5)
        );
    }

    #[test]
    fn test_analyze_history_respects_top_n() {
        let events: Vec<PlayEvent> = ["A", "B", "C", "D"]
            .iter()
            .map(|t| make_event("2023-03-01 10:00:00", t, 1_000))
            .collect();
        let report = analyze_history(&events, 2).unwrap();
        assert_eq!(report.top_tracks.len(), 2);
        assert_eq!(report.top_artists.len(), 1);
    }

    #[test]
    fn test_analyze_history_empty_fails() {
        let err = analyze_history(&[], 10).unwrap_err();
        assert!(matches!(err, ListenError::EmptyDataset(_)));
    }
}
