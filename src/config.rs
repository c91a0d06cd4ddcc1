//! Crawl configuration, validated once at process start.
//!
//! All caller input funnels through [`CrawlConfig::new`]. Construction
//! rejects malformed dates, an inverted window, a zero page budget, and an
//! unparseable base URL, so the pipeline itself never re-checks inputs.

use chrono::NaiveDate;
use std::time::Duration;
use url::Url;

use crate::models::Period;
use crate::{Result, RoundupError};

/// Pause between successive page fetches within one archive URL.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// The inclusive date window posts must fall into.
///
/// Both bounds belong to the window: a post dated exactly `start` or
/// exactly `end` is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Whether `date` falls inside the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The window in its envelope form.
    pub fn period(&self) -> Period {
        Period {
            startDate: self.start.format("%Y-%m-%d").to_string(),
            endDate: self.end.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Validated inputs for one collection run.
///
/// `page_delay` is not part of the constructor signature: production runs
/// always pace page fetches by [`DEFAULT_PAGE_DELAY`], and only tests
/// shorten it.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The blog's root URL. Yearly archive URLs are joined onto this.
    pub base_url: Url,
    /// The inclusive date window to collect.
    pub window: DateWindow,
    /// Upper bound on pages fetched per archive URL.
    pub max_pages: u32,
    /// Pause before every page fetch after the first within one archive URL.
    pub page_delay: Duration,
}

impl CrawlConfig {
    /// Validate raw inputs into a config.
    ///
    /// # Errors
    ///
    /// * [`RoundupError::BadBaseUrl`] when `base_url` does not parse
    /// * [`RoundupError::InvalidDate`] when either date is not `YYYY-MM-DD`
    /// * [`RoundupError::WindowInverted`] when the end predates the start
    /// * [`RoundupError::ZeroMaxPages`] when `max_pages` is zero
    pub fn new(base_url: &str, start_date: &str, end_date: &str, max_pages: u32) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|source| RoundupError::BadBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let start = parse_window_date(start_date)?;
        let end = parse_window_date(end_date)?;
        if end < start {
            return Err(RoundupError::WindowInverted {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }
        if max_pages == 0 {
            return Err(RoundupError::ZeroMaxPages);
        }
        Ok(CrawlConfig {
            base_url,
            window: DateWindow { start, end },
            max_pages,
            page_delay: DEFAULT_PAGE_DELAY,
        })
    }
}

fn parse_window_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RoundupError::InvalidDate {
        date: s.to_string(),
    })
}
