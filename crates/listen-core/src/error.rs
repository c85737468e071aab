use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and analysing listening history.
#[derive(Error, Debug)]
pub enum ListenError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A history file is not a valid JSON document.
    #[error("Failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A timestamp string did not match `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// A numeric or boolean field held a value that cannot be coerced.
    #[error("Cannot coerce field '{field}' from value {value}")]
    TypeCoercion { field: &'static str, value: String },

    /// A ratio was requested over a collection whose total is zero.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// A configured history source does not exist.
    #[error("History source not found: {0}")]
    SourceNotFound(PathBuf),

    /// No history files were found under the given directory.
    #[error("No history files found in {0}")]
    NoDataFiles(PathBuf),

    /// The checkpoint file could not be written.
    #[error("Failed to write checkpoint: {0}")]
    Checkpoint(#[from] csv::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the listen crates.
pub type Result<T> = std::result::Result<T, ListenError>;
