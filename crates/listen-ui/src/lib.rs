//! Presentation layer for listen-stats.
//!
//! Provides the plain-text console reporter and the [`ratatui`] scatter chart
//! of listening times.

pub mod reporter;
pub mod themes;
pub mod visualizer;

pub use listen_core as core;
