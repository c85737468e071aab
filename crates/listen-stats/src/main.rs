mod bootstrap;

use std::io;

use anyhow::{Context, Result};
use listen_core::settings::Settings;
use listen_data::analysis::analyze_history;
use listen_data::reader::load_history;
use listen_ui::reporter::{ConsoleReporter, ReportSink};
use listen_ui::themes::Theme;
use listen_ui::visualizer::{run_scatter, ScatterData};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("listen-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let config = settings.to_config();
    tracing::info!(
        "Timestamp strategy: {}, top: {}, theme: {}",
        config.strategy.describe(),
        config.top_n,
        settings.theme
    );

    let events = load_history(&config).context("failed to load listening history")?;
    let report = analyze_history(&events, config.top_n)?;

    let mut reporter = ConsoleReporter::new(io::stdout().lock());
    reporter.report(&report)?;

    if settings.plot {
        tracing::info!("Opening listening-time chart...");
        let theme = Theme::from_name(&settings.theme);
        run_scatter(&ScatterData::from_events(&events), &theme)
            .context("terminal error while showing the chart")?;
    }

    Ok(())
}
