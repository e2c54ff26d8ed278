//! Segcat
//!
//! Cuts a list of time ranges out of one video and joins them into a single
//! output file, in the order the ranges are listed.
//!
//! # Usage
//!
//! ```bash
//! segcat -i movie.mkv -o clip.mp4 -f config.json
//! segcat -i movie.mkv -o clip.mp4 --max-concurrent 4 --cleanup
//! segcat -i movie.mkv -o clip.mp4 --dry-run --json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use segcat::adapters::tracing_log::{init_logging, LogFormat};
use segcat::app::{AppContainer, DefaultAppContainer};
use segcat::cli::Cli;
use segcat::config_initialization::initialize_settings;

/// Main entry point for the segcat CLI
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format: LogFormat = cli.log_format.parse()?;
    init_logging(&cli.log_level, format)?;

    info!("Starting segcat");

    let settings = initialize_settings(&cli.run).context("Invalid settings")?;
    let container = DefaultAppContainer::new(settings);
    let pipeline = container.pipeline_interactor();

    let report = match pipeline.execute().await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Pipeline aborted");
            return Err(e).context("segcat failed");
        }
    };

    if cli.run.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!(
        output = %report.output.display(),
        segments = report.segments.len(),
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "segcat completed successfully"
    );
    Ok(())
}
