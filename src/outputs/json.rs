//! JSON output generation.
//!
//! Serializes the whole roundup envelope: the sorted posts under
//! `articles`, the post count under `totalCount`, and the covered window
//! under `period`. The column switches of the table formats become key
//! removal here, so a consumer never sees a field the caller asked to
//! drop.

use serde_json::Value;

use super::RenderOptions;
use crate::Result;
use crate::models::Roundup;

/// Render the roundup envelope as pretty-printed JSON.
pub fn render(roundup: &Roundup, options: &RenderOptions) -> Result<String> {
    let mut value = serde_json::to_value(roundup)?;
    if let Some(Value::Array(articles)) = value.get_mut("articles") {
        for article in articles {
            if let Value::Object(fields) = article {
                if !options.include_categories {
                    fields.remove("categories");
                }
                if !options.include_summary {
                    fields.remove("summary");
                }
            }
        }
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
