//! Core domain types for listen-stats.
//!
//! Holds the normalized [`models::PlayEvent`] record, the error type, the
//! command-line settings, timestamp normalization and the raw-record adapter
//! shared by the data and UI crates.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{ListenError, Result};
