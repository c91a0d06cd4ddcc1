//! Paginated archive crawling.
//!
//! One call to [`crawl_source`] walks every page of a single archive URL,
//! feeding extracted posts into the shared collector. Sources are isolated
//! from each other: whatever ends a crawl here, the caller just moves on to
//! its next archive URL.
//!
//! # Page sequence
//!
//! Page 1 is the archive URL exactly as enumerated. Every later page is the
//! same URL with a `page` query parameter appended, so page 4 of
//! `/archive/2023` is `/archive/2023?page=4`. Between pages of one source
//! the crawler sleeps for the configured delay; the first page of a source
//! is fetched immediately.
//!
//! # Crawl states
//!
//! Each source runs a small state machine: `Fetching` requests the current
//! page, `Extracting` parses its body and banks the entries, and
//! `AdvancingPage` decides whether another page follows. The terminal
//! states are `Done` for the three normal stops and `Aborted` for the two
//! failure stops, each carrying its [`CrawlEnd`] reason.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use url::Url;

use super::PostCollector;
use super::extract::extract_page;
use crate::config::CrawlConfig;

/// The User-Agent header sent with every page request.
pub const USER_AGENT: &str = concat!("blog_roundup/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every fetch of a collection run.
///
/// The client always identifies itself with [`USER_AGENT`]. Timeouts keep a
/// dead server from stalling the run: 10 s to connect, 30 s per request.
pub fn build_client() -> crate::Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Why a source's crawl stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlEnd {
    /// A page held no entries at all; the crawl ran past the archive's end.
    NoEntries,
    /// The page offered no link to a following page.
    NoNextPage,
    /// The next page would exceed the configured page budget.
    PageBudget,
    /// The server answered with a non-success status.
    BadStatus(StatusCode),
    /// The request failed outright: transport error, timeout, unreadable body.
    FetchFailed,
}

impl CrawlEnd {
    /// Whether the crawl was cut short rather than finishing normally.
    pub fn is_abort(&self) -> bool {
        matches!(self, CrawlEnd::BadStatus(_) | CrawlEnd::FetchFailed)
    }
}

/// Crawl progress through one source.
#[derive(Debug)]
enum CrawlState {
    /// Requesting the current page.
    Fetching,
    /// Parsing the fetched body and banking its entries.
    Extracting { body: String },
    /// Deciding whether another page follows.
    AdvancingPage { has_next: bool },
    /// Finished normally.
    Done(CrawlEnd),
    /// Cut short by a fetch failure.
    Aborted(CrawlEnd),
}

/// Crawl every page of one archive URL into `collector`.
///
/// Returns how the crawl ended. Fetch failures never propagate: they are
/// logged, the source is abandoned, and the posts banked so far stay in the
/// collector.
#[instrument(level = "info", skip_all, fields(source = %source_url))]
pub async fn crawl_source(
    client: &Client,
    source_url: &Url,
    config: &CrawlConfig,
    collector: &mut PostCollector,
) -> CrawlEnd {
    let mut page: u32 = 1;
    let mut state = CrawlState::Fetching;

    loop {
        state = match state {
            CrawlState::Fetching => {
                if page > 1 {
                    sleep(config.page_delay).await;
                }
                match fetch_page(client, source_url, page).await {
                    Ok(body) => CrawlState::Extracting { body },
                    Err(end) => CrawlState::Aborted(end),
                }
            }
            CrawlState::Extracting { body } => {
                let page_url = page_request_url(source_url, page);
                let extract = extract_page(&body, &page_url, &config.window);
                let accepted = collector.accept_all(extract.posts);
                debug!(
                    page,
                    entries = extract.entry_count,
                    accepted,
                    "Extracted archive page"
                );
                if extract.entry_count == 0 {
                    CrawlState::Done(CrawlEnd::NoEntries)
                } else {
                    CrawlState::AdvancingPage {
                        has_next: extract.has_next_page,
                    }
                }
            }
            CrawlState::AdvancingPage { has_next } => {
                if !has_next {
                    CrawlState::Done(CrawlEnd::NoNextPage)
                } else if page >= config.max_pages {
                    CrawlState::Done(CrawlEnd::PageBudget)
                } else {
                    page += 1;
                    CrawlState::Fetching
                }
            }
            CrawlState::Done(end) | CrawlState::Aborted(end) => {
                debug!(pages = page, end = ?end, "Leaving source crawl loop");
                return end;
            }
        };
    }
}

/// Fetch one page's body, mapping every failure to the [`CrawlEnd`] that
/// stops this source.
async fn fetch_page(client: &Client, source_url: &Url, page: u32) -> Result<String, CrawlEnd> {
    let page_url = page_request_url(source_url, page);
    let response = match client.get(page_url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, page, url = %page_url, "Archive page fetch failed");
            return Err(CrawlEnd::FetchFailed);
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(
            status = status.as_u16(),
            page,
            url = %page_url,
            "Archive page returned non-success status"
        );
        return Err(CrawlEnd::BadStatus(status));
    }

    match response.text().await {
        Ok(body) => Ok(body),
        Err(e) => {
            warn!(error = %e, page, url = %page_url, "Archive page body could not be read");
            Err(CrawlEnd::FetchFailed)
        }
    }
}

/// The request URL for one page of a source: the source itself for page 1,
/// the source with a `page` query parameter from page 2 on.
fn page_request_url(source_url: &Url, page: u32) -> Url {
    if page <= 1 {
        return source_url.clone();
    }
    let mut url = source_url.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_one_uses_source_url_verbatim() {
        let source = Url::parse("https://blog.example.com/archive/2023").unwrap();
        assert_eq!(page_request_url(&source, 1), source);
    }

    #[test]
    fn test_later_pages_append_page_parameter() {
        let source = Url::parse("https://blog.example.com/archive/2023").unwrap();
        assert_eq!(
            page_request_url(&source, 2).as_str(),
            "https://blog.example.com/archive/2023?page=2"
        );
        assert_eq!(
            page_request_url(&source, 10).as_str(),
            "https://blog.example.com/archive/2023?page=10"
        );
    }

    #[test]
    fn test_page_parameter_preserves_existing_query() {
        let source = Url::parse("https://blog.example.com/?order=asc").unwrap();
        assert_eq!(
            page_request_url(&source, 3).as_str(),
            "https://blog.example.com/?order=asc&page=3"
        );
    }

    #[test]
    fn test_crawl_end_abort_classification() {
        assert!(CrawlEnd::FetchFailed.is_abort());
        assert!(CrawlEnd::BadStatus(StatusCode::INTERNAL_SERVER_ERROR).is_abort());
        assert!(!CrawlEnd::NoEntries.is_abort());
        assert!(!CrawlEnd::NoNextPage.is_abort());
        assert!(!CrawlEnd::PageBudget.is_abort());
    }

    #[test]
    fn test_user_agent_identifies_the_crate() {
        assert!(USER_AGENT.starts_with("blog_roundup/"));
    }
}
