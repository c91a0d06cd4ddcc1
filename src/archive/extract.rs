//! Entry extraction from archive pages.
//!
//! This module turns one fetched archive page into [`BlogPost`] records.
//! Entries whose date cannot be recovered are skipped; entries dated outside
//! the requested window are dropped. Deduplication happens later in the
//! collector, so a post appearing on several pages leaves here every time.
//!
//! # Markup contract
//!
//! Archive pages carry one node per post, in the Hatena archive shape:
//!
//! - entry: `.archive-entry`, optionally with a `data-user-name` attribute
//! - heading link: `.entry-title a` (title text, `href` to the post)
//! - date: `.archive-date time`, preferring the `datetime` attribute
//! - explicit author: `.entry-author`
//! - description: `.entry-description`
//! - category labels: `.archive-entry-tags a`
//! - next-page affordance: `.pager-next a`

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::config::DateWindow;
use crate::models::BlogPost;
use crate::utils::{squish_whitespace, truncate_for_log};

/// Author recorded when no extraction strategy yields a name.
pub const FALLBACK_AUTHOR: &str = "編集部";

struct Selectors {
    entry: Selector,
    title_link: Selector,
    date_container: Selector,
    date_time: Selector,
    author: Selector,
    summary: Selector,
    category_links: Selector,
    next_page: Selector,
}

static SELECTORS: Lazy<Selectors> = Lazy::new(|| Selectors {
    entry: Selector::parse(".archive-entry").unwrap(),
    title_link: Selector::parse(".entry-title a").unwrap(),
    date_container: Selector::parse(".archive-date").unwrap(),
    date_time: Selector::parse(".archive-date time").unwrap(),
    author: Selector::parse(".entry-author").unwrap(),
    summary: Selector::parse(".entry-description").unwrap(),
    category_links: Selector::parse(".archive-entry-tags a").unwrap(),
    next_page: Selector::parse(".pager-next a").unwrap(),
});

/// A date written out in text, e.g. `2023年7月4日`, `2023-07-04`, `2023/7/4`.
static DATE_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})[年/.\-](\d{1,2})[月/.\-](\d{1,2})").unwrap());

/// The self-introduction opening many posts use:
/// 「こんにちは、〈unit〉の〈name〉です」. The unit suffix anchors the match so
/// ordinary こんにちは…です sentences are not mistaken for an introduction.
static GREETING_AUTHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"こんにちは[、。，,]?\s*[^\s。、]{1,30}?(?:部|チーム|グループ|課)の([^\s。、]{1,20}?)です")
        .unwrap()
});

/// Everything the crawler needs from one parsed page.
#[derive(Debug)]
pub struct PageExtract {
    /// Posts that parsed cleanly and fall inside the window.
    pub posts: Vec<BlogPost>,
    /// Entry nodes present on the page, including skipped and filtered ones.
    pub entry_count: usize,
    /// Whether the page links to a following page.
    pub has_next_page: bool,
}

/// Parse one archive page and pull out its posts.
///
/// `page_url` is the URL the page was fetched from; relative hrefs are
/// resolved against it.
pub fn extract_page(html: &str, page_url: &Url, window: &DateWindow) -> PageExtract {
    let document = Html::parse_document(html);

    let mut posts = Vec::new();
    let mut entry_count = 0;
    for entry in document.select(&SELECTORS.entry) {
        entry_count += 1;
        if let Some(post) = extract_entry(entry, page_url, window) {
            posts.push(post);
        }
    }

    let has_next_page = document.select(&SELECTORS.next_page).next().is_some();
    PageExtract {
        posts,
        entry_count,
        has_next_page,
    }
}

/// Extract a single entry node, or `None` when its date is unusable or
/// outside the window.
fn extract_entry(entry: ElementRef, page_url: &Url, window: &DateWindow) -> Option<BlogPost> {
    let (title, url) = title_and_url(entry, page_url);

    let date = match entry_date(entry) {
        Some(date) => date,
        None => {
            debug!(
                title = %truncate_for_log(&title, 60),
                "Skipping entry without a parseable date"
            );
            return None;
        }
    };
    if !window.contains(date) {
        return None;
    }

    let summary_text = entry
        .select(&SELECTORS.summary)
        .next()
        .map(|el| squish_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();

    let from_data = data_attribute_author(entry);
    let from_intro = greeting_author(&summary_text);
    let author = resolve_author(
        explicit_author(entry).as_deref(),
        from_data.as_deref(),
        from_intro.as_deref(),
    );

    let summary = if summary_text.is_empty() {
        format!("{title}...")
    } else {
        summary_text
    };

    let categories = entry
        .select(&SELECTORS.category_links)
        .map(|el| squish_whitespace(&el.text().collect::<String>()))
        .filter(|label| !label.is_empty())
        .collect();

    Some(BlogPost {
        title,
        url,
        date: date.format("%Y-%m-%d").to_string(),
        author,
        authorFromIntro: from_intro,
        authorFromData: from_data,
        summary,
        categories,
    })
}

/// Title text and absolute URL from the heading link.
///
/// An entry without a heading link yields two empty strings; it stays a
/// valid (unlinked) record as long as its date parses.
fn title_and_url(entry: ElementRef, page_url: &Url) -> (String, String) {
    match entry.select(&SELECTORS.title_link).next() {
        Some(link) => {
            let title = squish_whitespace(&link.text().collect::<String>());
            let url = match link.value().attr("href") {
                Some(href) => match page_url.join(href) {
                    Ok(resolved) => resolved.to_string(),
                    Err(_) => href.to_string(),
                },
                None => String::new(),
            };
            (title, url)
        }
        None => (String::new(), String::new()),
    }
}

// ---- Date strategies, tried in order ----

/// Publication date of one entry: the `datetime` attribute when it parses,
/// otherwise a date written in the element's display text.
fn entry_date(entry: ElementRef) -> Option<NaiveDate> {
    if let Some(time_el) = entry.select(&SELECTORS.date_time).next() {
        if let Some(stamp) = time_el.value().attr("datetime") {
            if let Some(date) = date_from_attr(stamp) {
                return Some(date);
            }
        }
    }
    let container = entry.select(&SELECTORS.date_container).next()?;
    let text = squish_whitespace(&container.text().collect::<String>());
    date_from_text(&text)
}

/// Parse a machine-readable timestamp: RFC 3339 (normalized to the UTC
/// calendar date) or a bare `YYYY-MM-DD`.
fn date_from_attr(value: &str) -> Option<NaiveDate> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Pull a year/month/day triple out of display text.
///
/// `NaiveDate::from_ymd_opt` both validates the triple (rejecting a month
/// of 13 or a day of 40) and lets the formatter zero-pad single digits.
fn date_from_text(text: &str) -> Option<NaiveDate> {
    let caps = DATE_IN_TEXT.captures(text)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// ---- Author strategies, tried in order ----

/// Strategy 1: a dedicated author element on the entry.
fn explicit_author(entry: ElementRef) -> Option<String> {
    let el = entry.select(&SELECTORS.author).next()?;
    let name = squish_whitespace(&el.text().collect::<String>());
    if name.is_empty() { None } else { Some(name) }
}

/// Strategy 2: the entry's `data-user-name` attribute.
fn data_attribute_author(entry: ElementRef) -> Option<String> {
    let name = entry.value().attr("data-user-name")?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Strategy 3: a name introduced in the summary's greeting sentence.
pub fn greeting_author(text: &str) -> Option<String> {
    GREETING_AUTHOR
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// First strategy that produced a name wins; otherwise [`FALLBACK_AUTHOR`].
fn resolve_author(
    explicit: Option<&str>,
    from_data: Option<&str>,
    from_intro: Option<&str>,
) -> String {
    explicit
        .or(from_data)
        .or(from_intro)
        .unwrap_or(FALLBACK_AUTHOR)
        .to_string()
}
