// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Link extraction from search engine result pages

use scraper::{Html, Selector};
use url::Url;

/// Collect outbound result links from a result page
///
/// Every `<a href>` is passed through `decode` (engines that wrap results in
/// redirect links unwrap them there); only absolute HTTP(S) links whose host
/// does not contain `engine_marker` survive. Page order is preserved,
/// duplicates are dropped and the list is cut at `limit`.
pub fn extract_result_links<F>(
    html: &str,
    engine_marker: &str,
    limit: usize,
    decode: F,
) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut links: Vec<String> = Vec::new();
    for anchor in document.select(&selector) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(link) = decode(href.trim()) else {
            continue;
        };
        if is_external_link(&link, engine_marker) && !links.contains(&link) {
            links.push(link);
        }
    }
    links
}

/// True for absolute http(s) links that do not point back at the engine
pub fn is_external_link(link: &str, engine_marker: &str) -> bool {
    let Ok(parsed) = Url::parse(link) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match parsed.host_str() {
        Some(host) => !host.to_lowercase().contains(engine_marker),
        None => false,
    }
}
