//! Read-only statistics over a collection of play events.
//!
//! Every query takes `&[PlayEvent]` and is insensitive to the order of the
//! events, except for tie order in rankings.

use std::collections::HashMap;

use listen_core::error::{ListenError, Result};
use listen_core::models::PlayEvent;
use serde::Serialize;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Number of hour-of-day buckets.
pub const HOURS_PER_DAY: usize = 24;

// ── GroupField ────────────────────────────────────────────────────────────────

/// Text field a ranking groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Track,
    Artist,
    Album,
}

impl GroupField {
    fn key(self, event: &PlayEvent) -> &str {
        match self {
            Self::Track => &event.track_name,
            Self::Artist => &event.track_artist,
            Self::Album => &event.track_album,
        }
    }
}

// ── RankedEntry ───────────────────────────────────────────────────────────────

/// One row of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
}

// ── HourlyDistribution ────────────────────────────────────────────────────────

/// Listening time per hour of day and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDistribution {
    ms_by_hour: [u64; HOURS_PER_DAY],
    percent_by_hour: [f64; HOURS_PER_DAY],
    total_ms: u64,
}

impl HourlyDistribution {
    /// Build from accumulated per-hour milliseconds.
    ///
    /// Fails with [`ListenError::EmptyDataset`] when the grand total is zero,
    /// since the percentages would be undefined.
    pub fn from_buckets(ms_by_hour: [u64; HOURS_PER_DAY]) -> Result<Self> {
        let total_ms: u64 = ms_by_hour.iter().sum();
        if total_ms == 0 {
            return Err(ListenError::EmptyDataset(
                "no listening time recorded, hourly distribution is undefined".to_string(),
            ));
        }

        let mut percent_by_hour = [0.0; HOURS_PER_DAY];
        for (percent, &ms) in percent_by_hour.iter_mut().zip(ms_by_hour.iter()) {
            *percent = ms as f64 / total_ms as f64 * 100.0;
        }

        Ok(Self {
            ms_by_hour,
            percent_by_hour,
            total_ms,
        })
    }

    /// Accumulated milliseconds for `hour`, `None` outside 0–23.
    pub fn ms(&self, hour: usize) -> Option<u64> {
        self.ms_by_hour.get(hour).copied()
    }

    /// Share of the total for `hour` in percent, `None` outside 0–23.
    pub fn percentage(&self, hour: usize) -> Option<f64> {
        self.percent_by_hour.get(hour).copied()
    }

    pub fn percentages(&self) -> &[f64; HOURS_PER_DAY] {
        &self.percent_by_hour
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Hour with the largest share; the earliest hour wins ties.
    pub fn peak_hour(&self) -> usize {
        let mut peak = 0;
        for hour in 1..HOURS_PER_DAY {
            if self.ms_by_hour[hour] > self.ms_by_hour[peak] {
                peak = hour;
            }
        }
        peak
    }
}

// ── ListeningAggregator ───────────────────────────────────────────────────────

/// Stateless helper computing summary statistics.
pub struct ListeningAggregator;

impl ListeningAggregator {
    /// The `n` most frequent values of `field`, by number of plays.
    ///
    /// Ties keep first-seen order; callers must not rely on it.
    pub fn top_n(events: &[PlayEvent], field: GroupField, n: usize) -> Vec<RankedEntry> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut ranked: Vec<RankedEntry> = Vec::new();

        for event in events {
            let key = field.key(event);
            match index.get(key) {
                Some(&i) => ranked[i].count += 1,
                None => {
                    index.insert(key, ranked.len());
                    ranked.push(RankedEntry {
                        name: key.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    pub fn top_tracks(events: &[PlayEvent], n: usize) -> Vec<RankedEntry> {
        Self::top_n(events, GroupField::Track, n)
    }

    pub fn top_artists(events: &[PlayEvent], n: usize) -> Vec<RankedEntry> {
        Self::top_n(events, GroupField::Artist, n)
    }

    pub fn top_albums(events: &[PlayEvent], n: usize) -> Vec<RankedEntry> {
        Self::top_n(events, GroupField::Album, n)
    }

    /// Sum of `ms_played` over all events.
    pub fn total_ms(events: &[PlayEvent]) -> u64 {
        events.iter().map(|e| e.ms_played).sum()
    }

    /// Total listening time in hours.
    pub fn total_hours(events: &[PlayEvent]) -> f64 {
        Self::total_ms(events) as f64 / MS_PER_HOUR
    }

    /// Share of listening time per hour of day.
    pub fn hourly_distribution(events: &[PlayEvent]) -> Result<HourlyDistribution> {
        let mut buckets = [0u64; HOURS_PER_DAY];
        for event in events {
            buckets[event.hour() as usize] += event.ms_played;
        }
        HourlyDistribution::from_buckets(buckets)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
