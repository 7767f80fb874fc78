//! Command-line argument definitions for the stackmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every argument is optional: without any, the tool renders
//! the overview to `docs/overview.png`.

use clap::Parser;

use stackmap::config::OutputFormat;

/// Render the server farm architecture overview
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output path; the format extension is appended when missing [default: docs/overview]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (png, svg, jpg, pdf, dot) [default: png, or the output path extension]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding an icon pack laid out as <provider>/<category>/<resource>.png
    #[arg(long)]
    pub icon_dir: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
