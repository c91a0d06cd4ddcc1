//! Collect blog post metadata from yearly archive pages and render period
//! roundups.
//!
//! The pipeline enumerates one archive URL per calendar year in the
//! requested window plus the site root, pages through each sequentially
//! with a fixed delay, extracts post metadata (title, URL, date, author,
//! summary, categories), filters to the inclusive window, deduplicates by
//! URL, and sorts the survivors newest first. The [`outputs`] module
//! renders the resulting [`Roundup`] as Markdown, HTML, CSV, or JSON.
//!
//! Entry points: [`CrawlConfig::new`] validates the caller's inputs once,
//! [`collect_posts`] runs the crawl, [`render`] formats the envelope.

use thiserror::Error;

pub mod archive;
pub mod cli;
pub mod config;
pub mod models;
pub mod outputs;
pub mod utils;

pub use archive::collect_posts;
pub use config::{CrawlConfig, DateWindow};
pub use models::{BlogPost, Period, Roundup};
pub use outputs::{Format, RenderOptions, render};

/// Errors surfaced by configuration, rendering, and output writing.
///
/// Fetch and parse failures during the crawl never appear here: they are
/// logged and end the affected archive URL's crawl, nothing more.
#[derive(Debug, Error)]
pub enum RoundupError {
    /// A window date was not `YYYY-MM-DD` or named an impossible day.
    #[error("invalid date `{date}`: expected YYYY-MM-DD")]
    InvalidDate { date: String },

    /// The window's end date came before its start date.
    #[error("end date {end} is earlier than start date {start}")]
    WindowInverted { start: String, end: String },

    /// A page budget of zero would fetch nothing.
    #[error("max pages must be at least 1")]
    ZeroMaxPages,

    /// The base URL did not parse.
    #[error("invalid base URL `{url}`")]
    BadBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The shared HTTP client could not be constructed.
    #[error("failed to build the HTTP client")]
    Client(#[from] reqwest::Error),

    /// CSV rendering failed.
    #[error("CSV rendering failed")]
    Csv(#[from] csv::Error),

    /// JSON rendering failed.
    #[error("JSON rendering failed")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the output location failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RoundupError>;
