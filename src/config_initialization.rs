//! Configuration initialization and hierarchy management

use tracing::info;

use crate::adapters::TomlSettingsAdapter;
use crate::app::settings::PipelineSettings;
use crate::cli::RunArgs;
use crate::error::PipelineResult;

/// Resolve settings following precedence: CLI/env > settings file > defaults.
///
/// Environment variables reach this point through clap, so they share the
/// command-line layer.
pub fn initialize_settings(args: &RunArgs) -> PipelineResult<PipelineSettings> {
    let mut settings = PipelineSettings::new(
        args.input.clone().unwrap_or_default(),
        args.output.clone().unwrap_or_default(),
    );

    if let Some(path) = &args.settings {
        let file = TomlSettingsAdapter::load(path)?;
        file.pipeline.apply_to(&mut settings);
    }

    let overrides = apply_cli_overrides(args, &mut settings);
    if overrides > 0 {
        info!("Applied {} command-line overrides", overrides);
    }

    settings.validate()?;
    Ok(settings)
}

/// Apply every flag that was given; returns how many were
fn apply_cli_overrides(args: &RunArgs, settings: &mut PipelineSettings) -> usize {
    let mut applied = 0;

    if let Some(ranges) = &args.ranges {
        settings.ranges_path = ranges.clone();
        applied += 1;
    }
    if let Some(work_root) = &args.work_root {
        settings.work_root = work_root.clone();
        applied += 1;
    }
    if let Some(engine) = &args.engine {
        settings.engine = engine.clone();
        applied += 1;
    }
    if let Some(resolution) = &args.resolution {
        settings.resolution = resolution.clone();
        applied += 1;
    }
    if let Some(bitrate) = &args.bitrate {
        settings.video_bitrate = bitrate.clone();
        applied += 1;
    }
    if let Some(extension) = &args.segment_extension {
        settings.segment_extension = extension.clone();
        applied += 1;
    }
    if let Some(concurrency) = args.max_concurrent {
        settings.concurrency = concurrency;
        applied += 1;
    }
    if args.cleanup {
        settings.cleanup_work_dir = true;
        applied += 1;
    }
    if args.dry_run {
        settings.dry_run = true;
        applied += 1;
    }

    applied
}
