// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content fetching for candidate pages
//!
//! ```text
//! Candidate URL → ContentFetcher → HTML → extract_visible_text → bounded text
//! ```
//!
//! Every failure (timeout, connection error, non-text response, unsafe URL)
//! is per-URL: `PageExtractor::extract` turns it into empty text so a batch
//! never aborts on one bad page.

pub mod config;
pub mod extractor;
pub mod fetcher;

pub use config::ContentFetchConfig;
pub use extractor::extract_visible_text;
pub use fetcher::{ContentFetcher, FetchError, PageExtractor};
