//! Documentation-comment merging.
//!
//! The checker hands back a plain comment plus a flat tag list; this module
//! folds them into one [`JsDoc`] the extractors consume. The checker-facing
//! half (root-symbol fallback) lives on `Extractor` in `extract`.

use std::collections::HashMap;

use crate::checker::DocTag;

/// Merged view of a symbol's documentation comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsDoc {
    /// Primary comment text, without tags.
    pub description: String,
    /// Description joined with all rendered non-default tags, trimmed.
    pub full_comment: String,
    /// Tag name → tag text, repeated tags newline-concatenated.
    pub tags: HashMap<String, String>,
}

impl JsDoc {
    pub fn is_empty(&self) -> bool {
        self.full_comment.is_empty()
    }
}

/// Fold a comment and its tags into a [`JsDoc`].
///
/// Repeated tags aggregate rather than overwrite. The `default` tag is kept
/// in the tag map for default-value lookup but held out of the rendered
/// comment body.
pub fn merge(comment: &str, tags: &[DocTag]) -> JsDoc {
    let description = comment.replace("\r\n", "\n");

    let mut tag_map: HashMap<String, String> = HashMap::new();
    let mut tag_comments: Vec<String> = Vec::new();

    for tag in tags {
        let trimmed = tag.text.as_deref().unwrap_or("").trim();
        tag_map
            .entry(tag.name.clone())
            .and_modify(|existing| {
                existing.push('\n');
                existing.push_str(trimmed);
            })
            .or_insert_with(|| trimmed.to_string());

        if tag.name != "default" {
            tag_comments.push(format_tag(tag));
        }
    }

    let full_comment = format!("{}\n{}", description, tag_comments.join("\n"))
        .trim()
        .to_string();

    JsDoc {
        description,
        full_comment,
        tags: tag_map,
    }
}

/// Render a tag as `@name text`.
fn format_tag(tag: &DocTag) -> String {
    match tag.text.as_deref() {
        Some(text) if !text.is_empty() => format!("@{} {}", tag.name, text),
        _ => format!("@{}", tag.name),
    }
}
