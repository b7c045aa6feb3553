//! Listing-to-posts crawl driver over a caller-supplied [`DocumentFetcher`].
//!
//! The driver knows nothing about HTTP, retries, or rate limits: the fetcher owns
//! those. It only sequences pages, post documents, and `next` links, keeping
//! `count` in step with the pages visited.

use crate::listing::ListingResult;
use crate::pipeline::TalosParser;
use crate::post::PostResult;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Retrieves the raw document behind a machine-readable URL.
pub trait DocumentFetcher {
    fn fetch(&self, url: &str) -> Result<Value>;
}

impl<F> DocumentFetcher for F
where
    F: Fn(&str) -> Result<Value>,
{
    fn fetch(&self, url: &str) -> Result<Value> {
        self(url)
    }
}

/// Machine-readable form of a page or post URL: `.json` appended to the path,
/// query string preserved.
pub fn json_endpoint(url: &str) -> String {
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (url, None),
    };
    if path.ends_with(".json") {
        return url.to_string();
    }
    let sep = if path.ends_with('/') { "" } else { "/" };
    match query {
        Some(q) => format!("{path}{sep}.json?{q}"),
        None => format!("{path}{sep}.json"),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CrawledPost {
    pub url: String,
    pub result: PostResult,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CrawlReport {
    /// Listing pages in visit order.
    pub pages: Vec<ListingResult>,
    /// Posts in visit order (page order, then listing order within a page).
    pub posts: Vec<CrawledPost>,
}

pub struct Crawler<'a, F: DocumentFetcher> {
    parser: TalosParser,
    fetcher: &'a F,
    max_pages: usize,
    fetch_posts: bool,
}

impl<'a, F: DocumentFetcher> Crawler<'a, F> {
    pub fn new(parser: TalosParser, fetcher: &'a F) -> Self {
        Self { parser, fetcher, max_pages: 1, fetch_posts: true }
    }

    pub fn max_pages(mut self, n: usize) -> Self { self.max_pages = n.max(1); self }
    /// When false, only listing pages are visited.
    pub fn fetch_posts(mut self, yes: bool) -> Self { self.fetch_posts = yes; self }

    /// Crawl from a listing URL (e.g. `https://old.reddit.com/r/rust/`).
    /// Stops after `max_pages`, on a failed listing, or when a listing fetch errors
    /// (recorded as a failed page).
    pub fn run(&self, start_url: &str) -> CrawlReport {
        let mut report = CrawlReport::default();
        let mut parser = self.parser.clone();
        let mut url = start_url.to_string();

        for page_no in 0..self.max_pages {
            let fetched = self
                .fetcher
                .fetch(&json_endpoint(&url))
                .with_context(|| format!("fetch listing page {} ({url})", page_no + 1));
            let page = match fetched {
                Ok(doc) => parser.parse_listing(&doc),
                Err(e) => ListingResult::Failure { error: format!("{e:#}") },
            };

            if let ListingResult::Failure { error } = &page {
                tracing::warn!("listing {} failed, stopping crawl: {}", url, error);
                report.pages.push(page);
                break;
            }

            if self.fetch_posts {
                for post_url in page.urls() {
                    report.posts.push(CrawledPost { url: post_url.clone(), result: self.crawl_post(&parser, post_url) });
                }
            }

            let next = page.next().map(str::to_string);
            report.pages.push(page);
            match next {
                Some(n) => url = n,
                None => break,
            }
            let seen = parser.options().count.coerce().unwrap_or(0) + parser.options().page_size;
            parser = parser.count(seen);
        }
        report
    }

    fn crawl_post(&self, parser: &TalosParser, post_url: &str) -> PostResult {
        match self.fetcher.fetch(&json_endpoint(post_url)) {
            Ok(doc) => parser.parse_post(&doc),
            Err(e) => {
                tracing::warn!("fetch {} failed: {:#}", post_url, e);
                PostResult::Failure { error: format!("{e:#}") }
            }
        }
    }
}
