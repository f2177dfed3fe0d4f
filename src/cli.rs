//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use review_export::{DEFAULT_API_URL, DEFAULT_MAX_RETRIES, PidStrategy};

/// Export product reviews to CSV.
///
/// Paste a product page URL (or pass the product identifier directly) and
/// review-export walks the paginated reviews API, collects every review,
/// and writes a date-stamped CSV file.
#[derive(Parser, Debug)]
#[command(name = "review-export")]
#[command(author, version, about)]
pub struct Args {
    /// Product page URL to extract the product identifier from
    #[arg(required_unless_present = "product_id")]
    pub url: Option<String>,

    /// Product identifier to use directly (skips URL extraction)
    #[arg(short = 'p', long)]
    pub product_id: Option<String>,

    /// How to extract the product identifier from the URL
    #[arg(long, value_enum, default_value_t = PidFormat::PSuffix)]
    pub pid_format: PidFormat,

    /// Maximum retry attempts for transient failures (0-10)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_RETRIES as u8, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub max_retries: u8,

    /// Directory to write the CSV export into
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Override the reviews API endpoint (primarily for testing)
    #[arg(long, default_value = DEFAULT_API_URL, hide_default_value = true)]
    pub api_url: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output and the progress display
    #[arg(short, long)]
    pub quiet: bool,
}

/// Product identifier extraction strategies exposed on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PidFormat {
    /// Match a `-P<digits>` suffix (with a fallback scan)
    PSuffix,
    /// Take the last dash-delimited segment of the URL
    TrailingSegment,
}

impl From<PidFormat> for PidStrategy {
    fn from(format: PidFormat) -> Self {
        match format {
            PidFormat::PSuffix => PidStrategy::PSuffix,
            PidFormat::TrailingSegment => PidStrategy::TrailingSegment,
        }
    }
}
