//! Command-line interface definitions for the roundup collector.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate. Date and URL validation does not happen here: raw values go to
//! [`CrawlConfig::new`](crate::CrawlConfig::new), which rejects bad input
//! before anything is fetched.

use clap::Parser;

use crate::outputs::{Format, RenderOptions};

/// Command-line arguments for the roundup collector.
///
/// # Examples
///
/// ```sh
/// # Markdown roundup of one year, to stdout
/// blog_roundup -b https://blog.example.com -s 2023-01-01 -e 2023-12-31
///
/// # JSON envelope for a narrow window, written to a file
/// blog_roundup -b https://blog.example.com -s 2023-07-01 -e 2023-07-31 \
///     --format json -o july.json
///
/// # Compact CSV without summaries
/// blog_roundup -b https://blog.example.com -s 2023-01-01 -e 2023-12-31 \
///     --format csv --skip-summary
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root URL of the blog to collect from
    #[arg(short, long, env = "BLOG_ROUNDUP_BASE_URL")]
    pub base_url: String,

    /// First day of the window, YYYY-MM-DD, inclusive
    #[arg(short, long)]
    pub start_date: String,

    /// Last day of the window, YYYY-MM-DD, inclusive
    #[arg(short, long)]
    pub end_date: String,

    /// Maximum number of pages fetched per archive URL
    #[arg(long, default_value_t = 5)]
    pub max_pages: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Leave category labels out of the output
    #[arg(long)]
    pub skip_categories: bool,

    /// Leave summaries out of the output
    #[arg(long)]
    pub skip_summary: bool,

    /// Write the rendered roundup to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

impl Cli {
    /// The renderer switches implied by the skip flags.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_categories: !self.skip_categories,
            include_summary: !self.skip_summary,
        }
    }
}
