//! Data models for collected blog posts and the roundup envelope.
//!
//! This module defines the core data structures used throughout the application:
//! - [`BlogPost`]: Metadata for a single post accepted into the roundup
//! - [`Period`]: The inclusive date window a roundup covers
//! - [`Roundup`]: The envelope holding the sorted posts plus window metadata
//!
//! The models use camelCase field names to match the JSON envelope consumed
//! downstream, hence the `#[allow(non_snake_case)]` attributes.

use serde::{Deserialize, Serialize};

/// Metadata for a single blog post accepted into a roundup.
///
/// Every field is already normalized by the extractor: `date` is always
/// `YYYY-MM-DD`, `author` is the resolved author (never empty), and
/// `summary` falls back to the truncated-title form when the post has no
/// description of its own.
///
/// # Field notes
///
/// * `url` is the post's identity: the collector accepts the first post
///   seen for a given URL and drops later duplicates. An empty string is a
///   valid (unlinked) value and deduplicates like any other.
/// * `authorFromIntro` / `authorFromData` keep the lower-priority author
///   candidates even when a higher-priority source won, so consumers can
///   audit how `author` was resolved.
/// * `categories` preserves document order and may contain repeats.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlogPost {
    /// The post title from the heading link. May be empty.
    pub title: String,
    /// The absolute post URL. Empty when the entry had no heading link.
    pub url: String,
    /// Publication date in `YYYY-MM-DD` format.
    pub date: String,
    /// The resolved author name.
    pub author: String,
    /// Author candidate recovered from a greeting sentence in the summary.
    pub authorFromIntro: Option<String>,
    /// Author candidate recovered from the entry's user-name data attribute.
    pub authorFromData: Option<String>,
    /// The post description, or `"<title>..."` when none was present.
    pub summary: String,
    /// Category labels in document order, repeats preserved.
    pub categories: Vec<String>,
}

/// The inclusive date window a roundup covers.
///
/// Both bounds are `YYYY-MM-DD` strings and both days belong to the window.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Period {
    /// First day of the window.
    pub startDate: String,
    /// Last day of the window.
    pub endDate: String,
}

/// The result envelope for one collection run.
///
/// `articles` is sorted by `date` descending; posts sharing a date keep the
/// order in which the crawl accepted them. `totalCount` always equals
/// `articles.len()` and exists so envelope consumers need not count.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Roundup {
    /// The accepted posts, newest first.
    pub articles: Vec<BlogPost>,
    /// Number of posts in `articles`.
    pub totalCount: usize,
    /// The date window this roundup covers.
    pub period: Period,
}

impl Roundup {
    /// Wrap an already-sorted post list in the envelope, filling in the count.
    pub fn new(articles: Vec<BlogPost>, period: Period) -> Self {
        Roundup {
            totalCount: articles.len(),
            articles,
            period,
        }
    }
}
