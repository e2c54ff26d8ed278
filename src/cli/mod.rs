//! CLI module for segcat
//!
//! This module handles command-line argument parsing.

use clap::Parser;

pub mod args;

pub use args::RunArgs;

const AFTER_HELP: &str = "\
Range config example:
-----------------------------
00:00:12 00:08:00
00:09:00 00:23:10
...
-----------------------------";

/// Segcat
///
/// Re-encodes the input once, cuts every configured range out of it in
/// parallel, and concatenates the cuts in config order.
#[derive(Parser, Debug)]
#[command(name = "segcat")]
#[command(about = "Cut time ranges out of a video and join them into one file")]
#[command(version)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", env = "SEGCAT_LOG_LEVEL", global = true)]
    pub log_level: String,

    /// Log output format: pretty or json
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: String,

    #[command(flatten)]
    pub run: RunArgs,
}
