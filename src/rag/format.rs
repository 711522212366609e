// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context formatting
//!
//! Turns extracted pages into one bounded, source-attributed context string.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use super::config::RetrievalConfig;
use crate::search::SearchResult;

/// Substring the fact verifier looks for in a context to mark a token unconfirmed
pub const NOT_FOUND_MARKER: &str = "не найдено";

/// Appended when an assembled context had to be cut to the window
pub const TRUNCATION_MARKER: &str = "\n[...информация обрезана...]";

/// Footer label preceding the number of sources used
pub const SOURCES_FOOTER: &str = "Всего источников:";

const SOURCE_ELLIPSIS: &str = "...";

/// Canned context for queries with no usable sources
pub fn insufficient_information(query: &str) -> String {
    format!(
        "По запросу '{}' {} достаточно актуальной информации.",
        query, NOT_FOUND_MARKER
    )
}

/// Markdown/URL scrubber for extracted page text
struct ContentCleaner {
    whitespace: Regex,
    headings: Regex,
    bold_stars: Regex,
    bold_underscores: Regex,
    italic_stars: Regex,
    italic_underscores: Regex,
    links: Regex,
    list_markers: Regex,
    rules: Regex,
    stray_markup: Regex,
    urls: Regex,
    runs_of_spaces: Regex,
}

impl ContentCleaner {
    fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").unwrap(),
            headings: Regex::new(r"#{1,6}\s*").unwrap(),
            bold_stars: Regex::new(r"\*\*(.*?)\*\*").unwrap(),
            bold_underscores: Regex::new(r"__(.*?)__").unwrap(),
            italic_stars: Regex::new(r"\*(.*?)\*").unwrap(),
            italic_underscores: Regex::new(r"_(.*?)_").unwrap(),
            links: Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap(),
            list_markers: Regex::new(r"(?m)^[\s>*•-]+").unwrap(),
            rules: Regex::new(r"[-=]{3,}").unwrap(),
            stray_markup: Regex::new(r"[~`>]").unwrap(),
            urls: Regex::new(r"(?i)https?://\S*").unwrap(),
            runs_of_spaces: Regex::new(r"\s{2,}").unwrap(),
        }
    }

    fn global() -> &'static ContentCleaner {
        static CLEANER: OnceLock<ContentCleaner> = OnceLock::new();
        CLEANER.get_or_init(ContentCleaner::new)
    }

    fn clean(&self, content: &str) -> String {
        let text = self.whitespace.replace_all(content, " ");
        let text = self.headings.replace_all(&text, "");
        let text = self.bold_stars.replace_all(&text, "$1");
        let text = self.bold_underscores.replace_all(&text, "$1");
        let text = self.italic_stars.replace_all(&text, "$1");
        let text = self.italic_underscores.replace_all(&text, "$1");
        let text = self.links.replace_all(&text, "$1");
        let text = self.list_markers.replace_all(&text, "");
        let text = self.rules.replace_all(&text, " ");
        let text = self.stray_markup.replace_all(&text, "");
        // URLs go last so earlier removals cannot splice a new one together
        let text = self.urls.replace_all(&text, "");
        let text = self.runs_of_spaces.replace_all(&text, " ");
        text.trim().to_string()
    }
}

/// Scrub markdown, raw URLs, list bullets and rules; cap at `max_chars` plus an ellipsis
pub fn clean_content(content: &str, max_chars: usize) -> String {
    let cleaned = ContentCleaner::global().clean(content);
    match cleaned.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &cleaned[..byte_idx], SOURCE_ELLIPSIS),
        None => cleaned,
    }
}

/// Host of `url` without a leading "www."; the raw string if it does not parse
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url).ok().as_ref().and_then(|u| u.host_str()) {
        Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
        None => url.to_string(),
    }
}

/// Cut `text` to `window` characters, ending with the truncation marker when cut
pub fn bound_to_window(text: String, window: usize) -> String {
    if text.chars().count() <= window {
        return text;
    }
    let keep = window.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut bounded: String = text.chars().take(keep).collect();
    bounded.push_str(TRUNCATION_MARKER);
    bounded
}

/// Formatting limits taken from [`RetrievalConfig`]
#[derive(Debug, Clone)]
pub struct ContextFormat {
    pub context_window: usize,
    pub min_content_chars: usize,
    pub source_chars: usize,
}

impl ContextFormat {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            context_window: config.context_window,
            min_content_chars: config.min_content_chars,
            source_chars: config.source_chars,
        }
    }

    /// Whether a result carries enough text to be worth citing
    pub fn is_substantial(&self, result: &SearchResult) -> bool {
        result.content_chars() > self.min_content_chars
    }

    /// Assemble the context for `query` from extracted results
    pub fn render(&self, results: &[SearchResult], query: &str) -> String {
        let usable: Vec<&SearchResult> =
            results.iter().filter(|r| self.is_substantial(r)).collect();

        if usable.is_empty() {
            return bound_to_window(insufficient_information(query), self.context_window);
        }

        let mut parts = vec![
            format!("🔍 Информация по '{}':", query),
            "=".repeat(50),
        ];
        for (i, result) in usable.iter().enumerate() {
            let content = result.content.as_deref().unwrap_or_default();
            parts.push(format!(
                "Источник {} | {}:\n{}",
                i + 1,
                extract_domain(&result.url),
                clean_content(content, self.source_chars)
            ));
            parts.push("-".repeat(40));
        }
        parts.push(format!("{} {}", SOURCES_FOOTER, usable.len()));

        bound_to_window(parts.join("\n"), self.context_window)
    }
}

impl Default for ContextFormat {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}
