//! CLI entry point for the review export tool.

use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use review_export::{
    ApiConfig, ExportEngine, ProgressEvent, RetryPolicy, ReviewsClient, extract_review_rows,
    product_id_from_url, run_review_export, write_csv_export,
};
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // Resolve the product identifier: explicit flag wins over URL extraction.
    let product_id = match &args.product_id {
        Some(pid) => {
            let pid = pid.trim();
            if pid.is_empty() {
                bail!("--product-id must not be empty");
            }
            pid.to_string()
        }
        None => {
            let url = args.url.as_deref().unwrap_or_default();
            product_id_from_url(url, args.pid_format.into())?
        }
    };

    info!(product_id = %product_id, "starting review export");

    let config = ApiConfig::with_base_url(args.api_url.clone());
    let retry = RetryPolicy::with_max_retries(u32::from(args.max_retries));
    let engine = ExportEngine::new(ReviewsClient::new(config, retry));

    let spinner = build_spinner(args.quiet);
    let spinner_events = spinner.clone();
    let on_progress = move |event: &ProgressEvent| match event {
        ProgressEvent::Retrying {
            attempt,
            total_attempts,
            delay,
        } => {
            spinner_events.set_message(format!(
                "request failed (attempt {attempt}/{total_attempts}), retrying in {}ms...",
                delay.as_millis()
            ));
        }
        ProgressEvent::PageFetched { state, collected } => {
            let total = if state.total_results > 0 {
                state.total_results.to_string()
            } else {
                "?".to_string()
            };
            spinner_events.set_message(format!(
                "[{collected}/{total}] fetched page {}",
                state.pages_fetched
            ));
        }
    };

    let outcome = run_review_export(&engine, &product_id, Some(&on_progress)).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(outcome) => {
            if outcome.reviews.is_empty() {
                info!(product_id = %product_id, "no reviews found; nothing to export");
                return Ok(());
            }

            if let Some(path) = write_csv_export(&outcome.reviews, &args.output_dir)? {
                info!(
                    reviews = outcome.reviews.len(),
                    pages = outcome.pages_fetched,
                    total = outcome.total_results,
                    path = %path.display(),
                    "review export complete"
                );
            }
            Ok(())
        }
        Err(aborted) => {
            // Keep whatever was collected before the failing page.
            let rows = extract_review_rows(&aborted.partial);
            if !rows.is_empty() {
                match write_csv_export(&rows, &args.output_dir) {
                    Ok(Some(path)) => warn!(
                        reviews = rows.len(),
                        path = %path.display(),
                        "wrote partial export before failure"
                    ),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "failed to write partial export"),
                }
            }
            Err(aborted.into())
        }
    }
}

/// Builds the progress spinner; hidden when quiet output is requested.
fn build_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
