use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::time_utils::{TimestampStrategy, DEFAULT_UTC_OFFSET};

/// Default number of entries in each ranking.
pub const DEFAULT_TOP_N: usize = 10;

// ── StrategyKind ───────────────────────────────────────────────────────────────

/// Command-line name of a [`TimestampStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Shift every timestamp by `--utc-offset` hours.
    FixedOffset,
    /// Use the time of day of the offline-playback timestamp.
    Offline,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Listening statistics for streaming-history exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "listen-stats",
    about = "Listening statistics for streaming-history exports",
    version
)]
pub struct Settings {
    /// History files to load, in order (defaults to every JSON file in --data-dir)
    #[arg(value_name = "FILE")]
    pub sources: Vec<PathBuf>,

    /// Directory scanned for history files when none are given
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Fixed UTC offset in hours
    #[arg(
        long,
        default_value_t = DEFAULT_UTC_OFFSET,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-12..=14)
    )]
    pub utc_offset: i32,

    /// Timestamp correction strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::FixedOffset)]
    pub strategy: StrategyKind,

    /// Number of entries in each ranking
    #[arg(long, default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    pub top: usize,

    /// Checkpoint CSV written after loading
    #[arg(long, default_value = "out.csv")]
    pub checkpoint: PathBuf,

    /// Do not write the checkpoint CSV
    #[arg(long)]
    pub no_checkpoint: bool,

    /// Show the time-of-day scatter chart after the report
    #[arg(long)]
    pub plot: bool,

    /// Chart theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

fn parse_top_n(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err("must be at least 1".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

// ── AnalysisConfig ─────────────────────────────────────────────────────────────

/// Everything the loader and aggregator need for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Explicit sources, loaded in order. Empty means "discover in `data_dir`".
    pub sources: Vec<PathBuf>,
    pub data_dir: PathBuf,
    pub strategy: TimestampStrategy,
    pub top_n: usize,
    /// Where to write the checkpoint CSV, if anywhere.
    pub checkpoint: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            data_dir: PathBuf::from("data"),
            strategy: TimestampStrategy::default(),
            top_n: DEFAULT_TOP_N,
            checkpoint: Some(PathBuf::from("out.csv")),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments.
    ///
    /// Nothing is read from or written to disk: the same command line always
    /// yields the same settings.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with explicit arguments.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::parse_from(args).apply_debug_flag()
    }

    /// `--debug` overrides the log level.
    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// The timestamp strategy selected by `--strategy` / `--utc-offset`.
    pub fn timestamp_strategy(&self) -> TimestampStrategy {
        match self.strategy {
            StrategyKind::FixedOffset => TimestampStrategy::FixedOffset {
                hours: self.utc_offset,
            },
            StrategyKind::Offline => TimestampStrategy::OfflineCombination,
        }
    }

    /// Build the run configuration handed to the loader and aggregator.
    pub fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            sources: self.sources.clone(),
            data_dir: self.data_dir.clone(),
            strategy: self.timestamp_strategy(),
            top_n: self.top,
            checkpoint: (!self.no_checkpoint).then(|| self.checkpoint.clone()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── CLI parsing ───────────────────────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["listen-stats"]);

        assert!(settings.sources.is_empty());
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.utc_offset, -8);
        assert_eq!(settings.strategy, StrategyKind::FixedOffset);
        assert_eq!(settings.top, 10);
        assert_eq!(settings.checkpoint, PathBuf::from("out.csv"));
        assert!(!settings.no_checkpoint);
        assert!(!settings.plot);
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_positional_sources_keep_order() {
        let settings = Settings::parse_from(["listen-stats", "b.json", "a.json"]);
        assert_eq!(
            settings.sources,
            vec![PathBuf::from("b.json"), PathBuf::from("a.json")]
        );
    }

    #[test]
    fn test_settings_negative_offset() {
        let settings = Settings::parse_from(["listen-stats", "--utc-offset", "-5"]);
        assert_eq!(settings.utc_offset, -5);
    }

    #[test]
    fn test_settings_offset_out_of_range_rejected() {
        let result = Settings::try_parse_from(["listen-stats", "--utc-offset", "20"]);
        assert!(result.is_err());
        let result = Settings::try_parse_from(["listen-stats", "--utc-offset", "99"]);
        assert!(result.is_err());
        let result = Settings::try_parse_from(["listen-stats", "--utc-offset", "-13"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_top_zero_rejected() {
        let result = Settings::try_parse_from(["listen-stats", "--top", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_offline_strategy() {
        let settings = Settings::parse_from(["listen-stats", "--strategy", "offline"]);
        assert_eq!(
            settings.timestamp_strategy(),
            TimestampStrategy::OfflineCombination
        );
    }

    // ── to_config ─────────────────────────────────────────────────────────────

    #[test]
    fn test_to_config_fixed_offset() {
        let settings =
            Settings::parse_from(["listen-stats", "--utc-offset", "3", "--top", "5", "x.json"]);
        let config = settings.to_config();
        assert_eq!(config.strategy, TimestampStrategy::FixedOffset { hours: 3 });
        assert_eq!(config.top_n, 5);
        assert_eq!(config.sources, vec![PathBuf::from("x.json")]);
        assert_eq!(config.checkpoint, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_to_config_no_checkpoint() {
        let settings = Settings::parse_from(["listen-stats", "--no-checkpoint"]);
        assert!(settings.to_config().checkpoint.is_none());
    }

    #[test]
    fn test_analysis_config_default_matches_cli_defaults() {
        let settings = Settings::parse_from(["listen-stats"]);
        assert_eq!(settings.to_config(), AnalysisConfig::default());
    }

    // ── load_from_args ────────────────────────────────────────────────────────

    #[test]
    fn test_load_from_args_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["listen-stats", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_repeated_loads_are_independent() {
        let first = Settings::load_from_args(["listen-stats", "--utc-offset", "3", "--top", "2"]);
        assert_eq!(first.utc_offset, 3);
        assert_eq!(first.top, 2);

        let second = Settings::load_from_args(["listen-stats"]);
        assert_eq!(second.utc_offset, -8);
        assert_eq!(second.top, 10);
        assert_eq!(
            second.to_config().strategy,
            TimestampStrategy::FixedOffset { hours: -8 }
        );
    }
}
