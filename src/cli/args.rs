//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::app::settings::Concurrency;

/// Arguments describing one pipeline run
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output video file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Range config, one "<start> <end>" pair per line [default: config.json]
    #[arg(short = 'f', long = "config")]
    pub ranges: Option<PathBuf>,

    /// TOML settings file with a [pipeline] table
    #[arg(long, env = "SEGCAT_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Directory the <input>_tmp working directory is created in [default: .]
    #[arg(long, env = "SEGCAT_WORK_ROOT")]
    pub work_root: Option<PathBuf>,

    /// Transcoding engine executable [default: ffmpeg]
    #[arg(long, env = "SEGCAT_ENGINE")]
    pub engine: Option<PathBuf>,

    /// Master file resolution, WIDTHxHEIGHT [default: 1280x720]
    #[arg(long, env = "SEGCAT_RESOLUTION")]
    pub resolution: Option<String>,

    /// Master file video bitrate [default: 1500k]
    #[arg(long, env = "SEGCAT_BITRATE")]
    pub bitrate: Option<String>,

    /// Segment file extension [default: mp4]
    #[arg(long)]
    pub segment_extension: Option<String>,

    /// Maximum concurrent segment extractions: unbounded, auto, or a number [default: unbounded]
    #[arg(long, env = "SEGCAT_MAX_CONCURRENT")]
    pub max_concurrent: Option<Concurrency>,

    /// Remove the working directory after a successful run
    #[arg(long)]
    pub cleanup: bool,

    /// Log engine invocations without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
