//! Data loading and aggregation for listen-stats.
//!
//! Reads streaming-history exports into [`PlayEvent`](listen_core::models::PlayEvent)s,
//! writes the optional checkpoint, and computes the summary statistics.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use listen_core as core;
