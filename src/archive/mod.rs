//! The collection pipeline: enumerate, crawl, collect, sort.
//!
//! One call to [`collect_posts`] runs the whole pipeline for a validated
//! [`CrawlConfig`]:
//!
//! 1. **Enumerate**: [`sources`] derives the archive URLs to visit from the
//!    base URL and the date window
//! 2. **Crawl**: [`crawler`] pages through each source in turn, strictly
//!    sequentially, extracting entries via [`extract`]
//! 3. **Collect**: the [`PostCollector`] keeps the first post seen per URL
//!    and drops every later duplicate
//! 4. **Sort**: accepted posts are ordered newest first and wrapped in the
//!    [`Roundup`] envelope
//!
//! A source whose crawl aborts costs only its own remaining pages; the
//! pipeline always visits every enumerated source.

pub mod crawler;
pub mod extract;
pub mod sources;

pub use crawler::{CrawlEnd, USER_AGENT, build_client, crawl_source};
pub use extract::FALLBACK_AUTHOR;

use std::collections::HashSet;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::config::CrawlConfig;
use crate::models::{BlogPost, Roundup};

/// Accumulates posts across every source of a run, dropping repeats.
///
/// The first post accepted for a URL wins; later posts with the same URL
/// are discarded no matter which page or source produced them. The empty
/// URL of an unlinked entry deduplicates like any other value.
#[derive(Debug, Default)]
pub struct PostCollector {
    posts: Vec<BlogPost>,
    seen: HashSet<String>,
}

impl PostCollector {
    pub fn new() -> Self {
        PostCollector::default()
    }

    /// Accept one post unless its URL has been accepted before.
    ///
    /// Returns whether the post was kept.
    pub fn accept(&mut self, post: BlogPost) -> bool {
        if self.seen.insert(post.url.clone()) {
            self.posts.push(post);
            true
        } else {
            false
        }
    }

    /// Accept a page's worth of posts, returning how many were kept.
    pub fn accept_all(&mut self, posts: Vec<BlogPost>) -> usize {
        let mut accepted = 0;
        for post in posts {
            if self.accept(post) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Number of posts accepted so far.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Finish collecting: posts ordered newest first.
    ///
    /// The sort is stable, so posts sharing a date keep the order in which
    /// the crawl accepted them.
    pub fn into_sorted_posts(mut self) -> Vec<BlogPost> {
        self.posts.sort_by(|a, b| b.date.cmp(&a.date));
        self.posts
    }
}

/// Run the full collection pipeline for one validated config.
///
/// The only fatal error is failing to build the HTTP client. Everything
/// that goes wrong during the crawl itself is logged and scoped to the
/// source it happened on; in the worst case the returned roundup is empty.
#[instrument(level = "info", skip_all, fields(base = %config.base_url))]
pub async fn collect_posts(config: &CrawlConfig) -> Result<Roundup> {
    let client = crawler::build_client()?;
    let source_urls = sources::enumerate(&config.base_url, &config.window);
    info!(
        source_count = source_urls.len(),
        start = %config.window.start,
        end = %config.window.end,
        "Enumerated archive sources"
    );

    let mut collector = PostCollector::new();
    for source_url in &source_urls {
        let before = collector.len();
        let end = crawler::crawl_source(&client, source_url, config, &mut collector).await;
        let banked = collector.len() - before;
        if end.is_abort() {
            warn!(
                source = %source_url,
                end = ?end,
                banked,
                "Source crawl aborted; continuing with remaining sources"
            );
        } else {
            info!(source = %source_url, end = ?end, banked, "Source crawl finished");
        }
    }

    let posts = collector.into_sorted_posts();
    info!(count = posts.len(), "Collected unique posts in window");
    Ok(Roundup::new(posts, config.window.period()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(url: &str, date: &str, title: &str) -> BlogPost {
        BlogPost {
            title: title.to_string(),
            url: url.to_string(),
            date: date.to_string(),
            author: "編集部".to_string(),
            authorFromIntro: None,
            authorFromData: None,
            summary: format!("{title}..."),
            categories: vec![],
        }
    }

    #[test]
    fn test_collector_first_post_wins_per_url() {
        let mut collector = PostCollector::new();
        assert!(collector.accept(post("https://b.example/a", "2023-01-01", "first")));
        assert!(!collector.accept(post("https://b.example/a", "2023-06-01", "second")));
        assert!(collector.accept(post("https://b.example/b", "2023-01-02", "other")));

        let posts = collector.into_sorted_posts();
        assert_eq!(posts.len(), 2);
        let kept: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert!(kept.contains(&"first"));
        assert!(!kept.contains(&"second"));
    }

    #[test]
    fn test_collector_accept_all_counts_kept_posts() {
        let mut collector = PostCollector::new();
        let accepted = collector.accept_all(vec![
            post("https://b.example/a", "2023-01-01", "a"),
            post("https://b.example/a", "2023-01-01", "a again"),
            post("https://b.example/b", "2023-01-02", "b"),
        ]);
        assert_eq!(accepted, 2);
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn test_collector_empty_urls_deduplicate_too() {
        let mut collector = PostCollector::new();
        assert!(collector.accept(post("", "2023-01-01", "unlinked one")));
        assert!(!collector.accept(post("", "2023-02-01", "unlinked two")));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_sorted_posts_are_newest_first() {
        let mut collector = PostCollector::new();
        collector.accept(post("https://b.example/old", "2022-11-30", "old"));
        collector.accept(post("https://b.example/new", "2023-06-15", "new"));
        collector.accept(post("https://b.example/mid", "2023-01-05", "mid"));

        let dates: Vec<String> = collector
            .into_sorted_posts()
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(dates, vec!["2023-06-15", "2023-01-05", "2022-11-30"]);
    }

    #[test]
    fn test_sort_is_stable_for_same_date_posts() {
        let mut collector = PostCollector::new();
        collector.accept(post("https://b.example/z", "2023-03-03", "accepted first"));
        collector.accept(post("https://b.example/a", "2023-03-03", "accepted second"));
        collector.accept(post("https://b.example/m", "2023-03-03", "accepted third"));

        let titles: Vec<String> = collector
            .into_sorted_posts()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(
            titles,
            vec!["accepted first", "accepted second", "accepted third"]
        );
    }

    #[test]
    fn test_empty_collector_produces_empty_list() {
        let collector = PostCollector::new();
        assert!(collector.is_empty());
        assert!(collector.into_sorted_posts().is_empty());
    }
}
