//! Console rendering of a [`ListeningReport`].
//!
//! Line building is kept in pure functions so the layout can be tested
//! without a terminal; [`ConsoleReporter`] only writes the lines out.

use std::io::Write;

use listen_core::error::Result;
use listen_core::formatting::{format_count, hour_label};
use listen_data::aggregator::{HourlyDistribution, RankedEntry};
use listen_data::analysis::ListeningReport;
use unicode_width::UnicodeWidthStr;

/// Inner width of a boxed section header.
pub const HEADER_WIDTH: usize = 32;

/// Placeholder shown for groups whose name was missing in the export.
pub const UNKNOWN_NAME: &str = "(unknown)";

/// Destination for a finished report.
pub trait ReportSink {
    fn report(&mut self, report: &ListeningReport) -> Result<()>;
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Three-line box around `title`, followed by an indented description.
pub fn section_header(title: &str, description: &str) -> Vec<String> {
    let bar = "━".repeat(HEADER_WIDTH);
    vec![
        String::new(),
        format!("    ┏{bar}┓"),
        format!("    ┃{title:^width$}┃", width = HEADER_WIDTH),
        format!("    ┗{bar}┛"),
        String::new(),
        format!("  {description}"),
        String::new(),
    ]
}

/// One line per entry, names padded to a common display width.
pub fn ranked_lines(entries: &[RankedEntry]) -> Vec<String> {
    let names: Vec<&str> = entries
        .iter()
        .map(|e| {
            if e.name.is_empty() {
                UNKNOWN_NAME
            } else {
                e.name.as_str()
            }
        })
        .collect();
    let name_width = names.iter().map(|n| n.width()).max().unwrap_or(0);
    let counts: Vec<String> = entries.iter().map(|e| format_count(e.count)).collect();
    let count_width = counts.iter().map(String::len).max().unwrap_or(0);

    names
        .iter()
        .zip(counts.iter())
        .enumerate()
        .map(|(i, (name, count))| {
            let pad = " ".repeat(name_width - name.width());
            format!("{:>2}. {name}{pad}  {count:>count_width$}", i + 1)
        })
        .collect()
}

pub fn total_time_line(hours: f64) -> String {
    format!("Total Listen Time: {hours:.2} hours")
}

/// `"{label}: {percentage:.2}%"` for each of the 24 hours, midnight first.
pub fn hourly_lines(hourly: &HourlyDistribution) -> Vec<String> {
    hourly
        .percentages()
        .iter()
        .enumerate()
        .map(|(hour, pct)| format!("{}: {:.2}%", hour_label(hour as u32), pct))
        .collect()
}

/// Every line of the report in print order.
pub fn report_lines(report: &ListeningReport) -> Vec<String> {
    let n = report.metadata.top_n;
    let mut lines = Vec::new();

    lines.extend(section_header(
        "TOP SONGS",
        &format!("Displays the total top {n} most played songs"),
    ));
    lines.extend(ranked_lines(&report.top_tracks));

    lines.extend(section_header(
        "TOP ALBUMS",
        &format!("Displays the total top {n} most played albums"),
    ));
    lines.extend(ranked_lines(&report.top_albums));

    lines.extend(section_header(
        "TOP ARTISTS",
        &format!("Displays the total top {n} most played artists"),
    ));
    lines.extend(ranked_lines(&report.top_artists));

    lines.extend(section_header(
        "TOTAL LISTENING TIME",
        "Displays the total time spent listening in hours.",
    ));
    lines.push(total_time_line(report.total_hours));

    lines.extend(section_header(
        "FAVOURITE LISTENING TIMES",
        "Displays the percentage of time spent listening for each hour of the day.",
    ));
    lines.extend(hourly_lines(&report.hourly));
    lines.push(String::new());

    lines
}

// ── ConsoleReporter ───────────────────────────────────────────────────────────

/// Writes the plain-text report to any [`Write`] target, usually stdout.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleReporter<W> {
    fn report(&mut self, report: &ListeningReport) -> Result<()> {
        for line in report_lines(report) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use listen_core::models::PlayEvent;
    use listen_data::aggregator::HOURS_PER_DAY;
    use listen_data::analysis::analyze_history;

    fn entry(name: &str, count: u64) -> RankedEntry {
        RankedEntry {
            name: name.to_string(),
            count,
        }
    }

    fn make_event(ts: &str, track: &str, ms: u64) -> PlayEvent {
        PlayEvent {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            platform: "web".to_string(),
            ms_played: ms,
            country: "SE".to_string(),
            track_name: track.to_string(),
            track_album: "Album".to_string(),
            track_artist: "Artist".to_string(),
            track_uri: format!("spotify:track:{track}"),
            start_reason: "fwdbtn".to_string(),
            end_reason: "trackdone".to_string(),
            shuffle: false,
            skipped: false,
            incognito: false,
        }
    }

    // ── section_header ───────────────────────────────────────────────────────

    #[test]
    fn test_section_header_box_is_aligned() {
        let lines = section_header("TOP SONGS", "desc");
        assert_eq!(lines[1].width(), lines[2].width());
        assert_eq!(lines[2].width(), lines[3].width());
        assert!(lines[2].contains("TOP SONGS"));
        assert_eq!(lines[5], "  desc");
    }

    // ── ranked_lines ─────────────────────────────────────────────────────────

    #[test]
    fn test_ranked_lines_pad_by_display_width() {
        let lines = ranked_lines(&[entry("東京", 12), entry("Paris", 3)]);
        assert_eq!(lines.len(), 2);
        // "東京" is four columns wide, "Paris" five.
        assert_eq!(lines[0], " 1. 東京   12");
        assert_eq!(lines[1], " 2. Paris   3");
        assert_eq!(lines[0].width(), lines[1].width());
    }

    #[test]
    fn test_ranked_lines_group_large_counts() {
        let lines = ranked_lines(&[entry("A", 1_234)]);
        assert_eq!(lines[0], " 1. A  1,234");
    }

    #[test]
    fn test_ranked_lines_unknown_name() {
        let lines = ranked_lines(&[entry("", 2)]);
        assert!(lines[0].contains(UNKNOWN_NAME));
    }

    #[test]
    fn test_ranked_lines_empty() {
        assert!(ranked_lines(&[]).is_empty());
    }

    // ── totals and hours ─────────────────────────────────────────────────────

    #[test]
    fn test_total_time_line() {
        assert_eq!(total_time_line(1.5), "Total Listen Time: 1.50 hours");
        assert_eq!(total_time_line(0.004), "Total Listen Time: 0.00 hours");
    }

    #[test]
    fn test_hourly_lines_use_twelve_hour_clock() {
        let mut buckets = [0u64; HOURS_PER_DAY];
        buckets[0] = 1;
        buckets[13] = 3;
        let dist = HourlyDistribution::from_buckets(buckets).unwrap();
        let lines = hourly_lines(&dist);
        assert_eq!(lines.len(), 24);
        assert_eq!(lines[0], "12am: 25.00%");
        assert_eq!(lines[12], "12pm: 0.00%");
        assert_eq!(lines[13], "1pm: 75.00%");
        assert_eq!(lines[23], "11pm: 0.00%");
    }

    // ── ConsoleReporter ──────────────────────────────────────────────────────

    #[test]
    fn test_console_reporter_writes_all_sections() {
        let events = vec![
            make_event("2023-05-01 09:00:00", "Song A", 3_600_000),
            make_event("2023-05-01 21:00:00", "Song A", 1_800_000),
            make_event("2023-05-02 21:30:00", "Song B", 1_800_000),
        ];
        let report = analyze_history(&events, 10).unwrap();

        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.report(&report).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        for title in [
            "TOP SONGS",
            "TOP ALBUMS",
            "TOP ARTISTS",
            "TOTAL LISTENING TIME",
            "FAVOURITE LISTENING TIMES",
        ] {
            assert!(text.contains(title), "missing section {title}");
        }
        assert!(text.contains("Displays the total top 10 most played songs"));
        assert!(text.contains(" 1. Song A  2"));
        assert!(text.contains("Total Listen Time: 2.00 hours\n"));
        assert!(text.contains("9am: 50.00%\n"));
        assert!(text.contains("9pm: 50.00%\n"));
        assert_eq!(text.matches('%').count(), 24);
    }

    #[test]
    fn test_section_order() {
        let events = vec![make_event("2023-05-01 09:00:00", "X", 1_000)];
        let report = analyze_history(&events, 3).unwrap();
        let lines = report_lines(&report);
        let position = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();
        assert!(position("TOP SONGS") < position("TOP ALBUMS"));
        assert!(position("TOP ALBUMS") < position("TOP ARTISTS"));
        assert!(position("TOP ARTISTS") < position("TOTAL LISTENING TIME"));
        assert!(position("TOTAL LISTENING TIME") < position("FAVOURITE LISTENING TIMES"));
    }
}
