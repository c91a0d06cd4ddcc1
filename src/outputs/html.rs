//! HTML output generation.
//!
//! Renders the same table as the Markdown output, wrapped in a minimal
//! standalone document so the file opens directly in a browser. All text
//! is entity-escaped; URLs are additionally escaped for attribute position.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use super::{NOT_AVAILABLE, RenderOptions};
use crate::models::{BlogPost, Period};

/// Render already-sorted posts as a standalone HTML document.
pub fn render(period: &Period, posts: &[BlogPost], options: &RenderOptions) -> String {
    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>").unwrap();
    writeln!(html, "<html>").unwrap();
    writeln!(html, "<head>").unwrap();
    writeln!(html, "<meta charset=\"utf-8\">").unwrap();
    writeln!(html, "<title>Blog Roundup</title>").unwrap();
    writeln!(html, "</head>").unwrap();
    writeln!(html, "<body>").unwrap();
    writeln!(html, "<h1>Blog Roundup</h1>").unwrap();
    writeln!(
        html,
        "<p>Period: {} to {} ({} posts)</p>",
        encode_text(&period.startDate),
        encode_text(&period.endDate),
        posts.len()
    )
    .unwrap();

    if posts.is_empty() {
        writeln!(html, "<p>No posts in this period.</p>").unwrap();
    } else {
        write_table(&mut html, posts, options);
    }

    writeln!(html, "</body>").unwrap();
    writeln!(html, "</html>").unwrap();
    html
}

fn write_table(html: &mut String, posts: &[BlogPost], options: &RenderOptions) {
    writeln!(html, "<table>").unwrap();

    let mut header = vec!["Date", "Title", "Author"];
    if options.include_categories {
        header.push("Categories");
    }
    if options.include_summary {
        header.push("Summary");
    }
    write!(html, "<thead><tr>").unwrap();
    for name in &header {
        write!(html, "<th>{name}</th>").unwrap();
    }
    writeln!(html, "</tr></thead>").unwrap();

    writeln!(html, "<tbody>").unwrap();
    for post in posts {
        write!(html, "<tr>").unwrap();
        write!(html, "<td>{}</td>", encode_text(&post.date)).unwrap();
        write!(html, "<td>{}</td>", title_cell(post)).unwrap();
        write!(html, "<td>{}</td>", text_or_na(&post.author)).unwrap();
        if options.include_categories {
            write!(html, "<td>{}</td>", text_or_na(&post.categories.join(", "))).unwrap();
        }
        if options.include_summary {
            write!(html, "<td>{}</td>", text_or_na(&post.summary)).unwrap();
        }
        writeln!(html, "</tr>").unwrap();
    }
    writeln!(html, "</tbody>").unwrap();
    writeln!(html, "</table>").unwrap();
}

/// The title cell: an anchor when the post has a URL, plain text when it
/// only has a title, `N/A` when it has neither.
fn title_cell(post: &BlogPost) -> String {
    if post.url.is_empty() {
        text_or_na(&post.title).into_owned()
    } else {
        format!(
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(&post.url),
            text_or_na(&post.title)
        )
    }
}

fn text_or_na(text: &str) -> std::borrow::Cow<'_, str> {
    if text.is_empty() {
        std::borrow::Cow::Borrowed(NOT_AVAILABLE)
    } else {
        encode_text(text)
    }
}
