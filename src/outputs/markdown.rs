//! Markdown output generation.
//!
//! The roundup renders as a single document: a heading, a line naming the
//! period and post count, and a table with one row per post. The post URL
//! rides inside the title link instead of having its own column. Cells with
//! nothing to show render as `N/A`.

use itertools::Itertools;
use std::fmt::Write;

use super::{NOT_AVAILABLE, RenderOptions};
use crate::models::{BlogPost, Period};

/// Render already-sorted posts as a Markdown document.
pub fn render(period: &Period, posts: &[BlogPost], options: &RenderOptions) -> String {
    let mut md = String::new();
    writeln!(md, "# Blog Roundup").unwrap();
    writeln!(md).unwrap();
    writeln!(
        md,
        "Period: {} to {} ({} posts)",
        period.startDate,
        period.endDate,
        posts.len()
    )
    .unwrap();
    writeln!(md).unwrap();

    if posts.is_empty() {
        writeln!(md, "No posts in this period.").unwrap();
        return md;
    }

    let mut header = vec!["Date", "Title", "Author"];
    if options.include_categories {
        header.push("Categories");
    }
    if options.include_summary {
        header.push("Summary");
    }
    writeln!(md, "| {} |", header.iter().join(" | ")).unwrap();
    writeln!(md, "| {} |", header.iter().map(|_| "---").join(" | ")).unwrap();

    for post in posts {
        let mut row = vec![cell(&post.date), title_cell(post), cell_or_na(&post.author)];
        if options.include_categories {
            row.push(cell_or_na(&post.categories.iter().join(", ")));
        }
        if options.include_summary {
            row.push(cell_or_na(&post.summary));
        }
        writeln!(md, "| {} |", row.iter().join(" | ")).unwrap();
    }

    md
}

/// The title cell: a link when the post has a URL, plain text when it only
/// has a title, `N/A` when it has neither.
fn title_cell(post: &BlogPost) -> String {
    if post.url.is_empty() {
        cell_or_na(&post.title)
    } else if post.title.is_empty() {
        format!("[{}]({})", NOT_AVAILABLE, post.url)
    } else {
        format!("[{}]({})", cell(&post.title), post.url)
    }
}

/// Escape a value for use inside a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn cell_or_na(text: &str) -> String {
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        cell(text)
    }
}
