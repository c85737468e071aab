//! History file discovery, loading and checkpointing.
//!
//! Reads streaming-history exports (JSON arrays of play records), keeps the
//! records that carry a track identifier and converts them into
//! [`PlayEvent`]s. The concatenated result of a full load is dumped to a CSV
//! checkpoint.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use listen_core::data_processors::RecordAdapter;
use listen_core::error::{ListenError, Result};
use listen_core::models::PlayEvent;
use listen_core::settings::AnalysisConfig;
use listen_core::time_utils::TimestampStrategy;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Column order of the checkpoint file.
pub const CHECKPOINT_HEADER: [&str; 13] = [
    "Timestamp",
    "Platform",
    "MsPlayed",
    "Country",
    "TrackName",
    "TrackAlbum",
    "TrackArtist",
    "URI",
    "StartReason",
    "EndReason",
    "Shuffle",
    "Skipped",
    "Incognito",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` files recursively under `data_path`, sorted by path.
pub fn find_history_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// The sources a run will load: the explicit list when one is configured,
/// otherwise every history file discovered under `data_dir`.
pub fn resolve_sources(config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    if !config.sources.is_empty() {
        return Ok(config.sources.clone());
    }
    let discovered = find_history_files(&config.data_dir);
    if discovered.is_empty() {
        return Err(ListenError::NoDataFiles(config.data_dir.clone()));
    }
    Ok(discovered)
}

/// Load a single history file.
///
/// Records without a track identifier are dropped. Any malformed timestamp or
/// uncoercible field aborts the load.
pub fn load_source(path: &Path, strategy: &TimestampStrategy) -> Result<Vec<PlayEvent>> {
    if !path.exists() {
        return Err(ListenError::SourceNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|source| ListenError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ListenError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut events = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in &records {
        match RecordAdapter::to_play_event(record, strategy)? {
            Some(event) => events.push(event),
            None => dropped += 1,
        }
    }

    debug!(
        "File {}: {} read, {} without track identifier, {} kept",
        path.display(),
        records.len(),
        dropped,
        events.len(),
    );

    Ok(events)
}

/// Load every configured source in order and concatenate the results.
///
/// No cross-source sorting is done. When a checkpoint path is configured the
/// concatenated collection is written there after the load completes.
pub fn load_history(config: &AnalysisConfig) -> Result<Vec<PlayEvent>> {
    let sources = resolve_sources(config)?;
    info!(
        "Loading {} history source(s) with {}",
        sources.len(),
        config.strategy.describe()
    );

    let mut all_events: Vec<PlayEvent> = Vec::new();
    for source in &sources {
        all_events.extend(load_source(source, &config.strategy)?);
    }

    info!(
        "Loaded {} play events from {} source(s)",
        all_events.len(),
        sources.len()
    );

    if let Some(checkpoint) = &config.checkpoint {
        write_checkpoint(&all_events, checkpoint)?;
    }

    Ok(all_events)
}

/// Write `events` as a flat CSV file with a header row, one row per event.
pub fn write_checkpoint(events: &[PlayEvent], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    // Serialization only emits the header alongside the first row.
    if events.is_empty() {
        writer.write_record(CHECKPOINT_HEADER)?;
    }
    for event in events {
        writer.serialize(event)?;
    }
    writer.flush()?;

    debug!(
        "Checkpoint written to {} ({} rows)",
        path.display(),
        events.len()
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
