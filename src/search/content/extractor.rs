// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML to visible text
//!
//! Drops script/style/noscript/template content and joins the remaining
//! text nodes with single spaces.

use scraper::Html;

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract visible text from an HTML document, capped at `max_chars` characters
pub fn extract_visible_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| HIDDEN_TAGS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let text: &str = text;
        words.extend(text.split_whitespace());
    }

    truncate_chars(&words.join(" "), max_chars)
}

/// Keep at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
