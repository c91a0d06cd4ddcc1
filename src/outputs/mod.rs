//! Rendering of a collected roundup into its output formats.
//!
//! This module contains submodules responsible for turning a [`Roundup`]
//! into text:
//!
//! # Submodules
//!
//! - [`markdown`]: A Markdown document with the posts as a table
//! - [`html`]: A standalone HTML document with the same table
//! - [`csv`]: One record per post for spreadsheet import
//! - [`json`]: The roundup envelope serialized as JSON
//!
//! # Ordering
//!
//! Renderers do not trust their input's order: every format re-sorts its
//! own copy of the posts newest first before rendering. The sort is stable,
//! so posts sharing a date keep their incoming relative order.

pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;

use clap::ValueEnum;
use std::fmt;

use crate::Result;
use crate::models::{BlogPost, Roundup};

/// Placeholder shown in Markdown and HTML cells with nothing to show.
pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// Output format for a rendered roundup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Markdown,
    Html,
    Csv,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Markdown => "markdown",
            Format::Html => "html",
            Format::Csv => "csv",
            Format::Json => "json",
        };
        write!(f, "{name}")
    }
}

/// Column and field switches shared by every renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Show each post's category labels.
    pub include_categories: bool,
    /// Show each post's summary.
    pub include_summary: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            include_categories: true,
            include_summary: true,
        }
    }
}

/// Render a roundup in the requested format.
pub fn render(roundup: &Roundup, format: Format, options: &RenderOptions) -> Result<String> {
    let sorted = sorted_for_render(&roundup.articles);
    match format {
        Format::Markdown => Ok(markdown::render(&roundup.period, &sorted, options)),
        Format::Html => Ok(html::render(&roundup.period, &sorted, options)),
        Format::Csv => csv::render(&sorted, options),
        Format::Json => {
            let mut sorted_roundup = roundup.clone();
            sorted_roundup.articles = sorted;
            json::render(&sorted_roundup, options)
        }
    }
}

/// An independently sorted copy of the posts, newest first.
fn sorted_for_render(posts: &[BlogPost]) -> Vec<BlogPost> {
    let mut posts = posts.to_vec();
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}
