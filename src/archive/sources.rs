//! Crawl source enumeration.
//!
//! A collection run starts from a fixed, deterministic list of archive URLs
//! derived from the base URL and the date window: one yearly archive per
//! calendar year the window touches, oldest year first, and the site root
//! last. The root mops up posts the yearly archives miss, at the cost of
//! mostly re-listing posts the collector has already accepted.
//!
//! # URL pattern
//!
//! Yearly archives live at `<base>/archive/<year>`. The join is relative,
//! so a base URL with a path (`https://host/blog/`) keeps its prefix.

use chrono::Datelike;
use url::Url;

use crate::config::DateWindow;

/// Enumerate the archive URLs to crawl for `window`, in crawl order.
pub fn enumerate(base_url: &Url, window: &DateWindow) -> Vec<Url> {
    let join_base = with_trailing_slash(base_url);
    let mut sources = Vec::new();
    for year in window.start.year()..=window.end.year() {
        if let Ok(url) = join_base.join(&format!("archive/{year}")) {
            sources.push(url);
        }
    }
    sources.push(base_url.clone());
    sources
}

/// A copy of the base whose path ends in `/`, so joins append instead of
/// replacing the last path segment. The original base is still crawled
/// verbatim as the root source.
fn with_trailing_slash(base: &Url) -> Url {
    if base.path().ends_with('/') {
        base.clone()
    } else {
        let mut url = base.clone();
        url.set_path(&format!("{}/", base.path()));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow {
            start: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            end: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn test_enumerate_one_archive_per_touched_year_then_root() {
        let base = Url::parse("https://blog.example.com/").unwrap();
        let sources = enumerate(&base, &window("2022-03-01", "2023-01-15"));
        let as_strings: Vec<&str> = sources.iter().map(Url::as_str).collect();
        assert_eq!(
            as_strings,
            vec![
                "https://blog.example.com/archive/2022",
                "https://blog.example.com/archive/2023",
                "https://blog.example.com/",
            ]
        );
    }

    #[test]
    fn test_enumerate_single_year_window() {
        let base = Url::parse("https://blog.example.com/").unwrap();
        let sources = enumerate(&base, &window("2023-05-01", "2023-05-31"));
        let as_strings: Vec<&str> = sources.iter().map(Url::as_str).collect();
        assert_eq!(
            as_strings,
            vec![
                "https://blog.example.com/archive/2023",
                "https://blog.example.com/",
            ]
        );
    }

    #[test]
    fn test_enumerate_is_deterministic() {
        let base = Url::parse("https://blog.example.com/").unwrap();
        let w = window("2020-01-01", "2024-12-31");
        assert_eq!(enumerate(&base, &w), enumerate(&base, &w));
        assert_eq!(enumerate(&base, &w).len(), 6);
    }

    #[test]
    fn test_enumerate_preserves_base_path_prefix() {
        let base = Url::parse("https://www.example.com/blog").unwrap();
        let sources = enumerate(&base, &window("2023-01-01", "2023-12-31"));
        let as_strings: Vec<&str> = sources.iter().map(Url::as_str).collect();
        assert_eq!(
            as_strings,
            vec![
                "https://www.example.com/blog/archive/2023",
                "https://www.example.com/blog",
            ]
        );
    }
}
