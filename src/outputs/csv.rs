//! CSV output generation.
//!
//! One record per post, header row included, for spreadsheet import. The
//! URL gets its own column here since CSV has no way to attach it to the
//! title. Unlike the Markdown and HTML tables there is no `N/A`
//! placeholder: missing values become empty fields, which spreadsheet
//! tools treat as blank cells.

use csv::WriterBuilder;
use itertools::Itertools;

use super::RenderOptions;
use crate::Result;
use crate::models::BlogPost;

/// Render already-sorted posts as CSV.
pub fn render(posts: &[BlogPost], options: &RenderOptions) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(vec![]);

    let mut header = vec!["date", "title", "url", "author"];
    if options.include_categories {
        header.push("categories");
    }
    if options.include_summary {
        header.push("summary");
    }
    writer.write_record(&header)?;

    for post in posts {
        let mut record = vec![
            post.date.clone(),
            post.title.clone(),
            post.url.clone(),
            post.author.clone(),
        ];
        if options.include_categories {
            record.push(post.categories.iter().join(", "));
        }
        if options.include_summary {
            record.push(post.summary.clone());
        }
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> BlogPost {
        BlogPost {
            title: "新機能の紹介".to_string(),
            url: "https://blog.example.com/entry/new-feature".to_string(),
            date: "2023-07-04".to_string(),
            author: "田中".to_string(),
            authorFromIntro: None,
            authorFromData: None,
            summary: "今日は新機能を紹介します。".to_string(),
            categories: vec!["開発".to_string(), "リリース".to_string()],
        }
    }

    #[test]
    fn test_render_writes_header_and_record() {
        let csv = render(&[sample_post()], &RenderOptions::default()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,title,url,author,categories,summary"));
        let record = lines.next().unwrap();
        assert!(record.starts_with("2023-07-04,新機能の紹介,"));
        assert!(record.contains("開発, リリース"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let csv = render(&[sample_post()], &RenderOptions::default()).unwrap();
        // The joined category list contains a comma, so the writer must
        // quote that field.
        assert!(csv.contains("\"開発, リリース\""));
    }

    #[test]
    fn test_missing_values_are_empty_fields() {
        let mut post = sample_post();
        post.categories.clear();
        post.summary.clear();
        let csv = render(&[post], &RenderOptions::default()).unwrap();
        let record = csv.lines().nth(1).unwrap();
        assert!(record.ends_with("田中,,"));
    }

    #[test]
    fn test_optional_columns_can_be_dropped() {
        let options = RenderOptions {
            include_categories: false,
            include_summary: false,
        };
        let csv = render(&[sample_post()], &options).unwrap();
        assert_eq!(csv.lines().next(), Some("date,title,url,author"));
        assert!(!csv.contains("今日は新機能を紹介します。"));
    }

    #[test]
    fn test_empty_roundup_renders_header_only() {
        let csv = render(&[], &RenderOptions::default()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
