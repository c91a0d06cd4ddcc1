//! # Blog Roundup
//!
//! Collects blog post metadata from a blog's yearly archive pages and
//! renders a roundup of the posts published in a caller-supplied date
//! window.
//!
//! ## Usage
//!
//! ```sh
//! blog_roundup -b https://blog.example.com -s 2023-01-01 -e 2023-12-31
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Enumerate**: One archive URL per calendar year the window touches,
//!    plus the site root
//! 2. **Crawl**: Page through each archive strictly sequentially with a
//!    fixed inter-page delay
//! 3. **Collect**: Filter to the window, deduplicate by URL, sort newest
//!    first
//! 4. **Render**: Markdown, HTML, CSV, or JSON to stdout or a file
//!
//! Logs go to stderr so a roundup printed to stdout stays clean.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use blog_roundup::cli::Cli;
use blog_roundup::utils::ensure_writable_parent;
use blog_roundup::{CrawlConfig, collect_posts, render};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("blog_roundup starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(
        ?args.base_url,
        ?args.start_date,
        ?args.end_date,
        max_pages = args.max_pages,
        format = %args.format,
        "Parsed CLI arguments"
    );

    // --- Validate inputs once ---
    let config = match CrawlConfig::new(
        &args.base_url,
        &args.start_date,
        &args.end_date,
        args.max_pages,
    ) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Rejected input; nothing was fetched");
            return Err(e.into());
        }
    };

    // Early check: ensure the output location is writable
    if let Some(ref output) = args.output {
        if let Err(e) = ensure_writable_parent(output).await {
            error!(
                path = %output,
                error = %e,
                "Output location is not writable (fix perms or choose a different path)"
            );
            return Err(e.into());
        }
    }

    // ---- Crawl ----
    let roundup = collect_posts(&config).await?;
    info!(
        count = roundup.totalCount,
        start = %roundup.period.startDate,
        end = %roundup.period.endDate,
        "Collected posts in window"
    );

    // ---- Render & write ----
    let rendered = render(&roundup, args.format, &args.render_options())?;
    match args.output {
        Some(ref path) => {
            info!(path = %path, format = %args.format, "Writing roundup");
            if let Err(e) = tokio::fs::write(path, &rendered).await {
                error!(path = %path, error = %e, "Failed writing roundup");
                return Err(e.into());
            }
            info!(path = %path, bytes = rendered.len(), "Wrote roundup");
        }
        None => {
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
