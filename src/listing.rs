//! Listing pages: ordered post permalinks plus the next-page URL.

use crate::config::{ParserOptions, SortBy};
use crate::error::ParseError;
use crate::json_utils::{children, data, str_field};
use serde::Serialize;
use serde_json::Value;

/// Outcome of parsing one listing page. Failures carry no partial URL list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ListingResult {
    Success { urls: Vec<String>, next: String },
    Failure { error: String },
}

impl ListingResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ListingResult::Success { .. })
    }

    pub fn urls(&self) -> &[String] {
        match self {
            ListingResult::Success { urls, .. } => urls,
            ListingResult::Failure { .. } => &[],
        }
    }

    pub fn next(&self) -> Option<&str> {
        match self {
            ListingResult::Success { next, .. } => Some(next),
            ListingResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListingResult::Failure { error } => Some(error),
            ListingResult::Success { .. } => None,
        }
    }
}

/// Build the listing result; any error collapses the whole page to `Failure`.
pub fn parse_listing(doc: &Value, opts: &ParserOptions) -> ListingResult {
    match build_listing(doc, opts) {
        Ok((urls, next)) => ListingResult::Success { urls, next },
        Err(e) => {
            tracing::debug!("listing parse failed: {e}");
            ListingResult::Failure { error: e.to_string() }
        }
    }
}

fn build_listing(doc: &Value, opts: &ParserOptions) -> Result<(Vec<String>, String), ParseError> {
    let sort_by = SortBy::parse_opt(opts.sort_by.as_deref())?;

    let page = data(doc)?;
    let posts = children(doc)?;
    let count = opts.count.coerce()?;

    let mut urls = Vec::with_capacity(posts.len());
    let mut last_subreddit = None;
    for child in posts {
        let post = data(child)?;
        urls.push(opts.link(str_field(post, "permalink")?));
        last_subreddit = Some(str_field(post, "subreddit_name_prefixed")?);
    }
    // `after` pages relative to the final post, so its subreddit drives the URL.
    let subreddit = last_subreddit.ok_or(ParseError::EmptyListing)?;

    let after = match page.get("after") {
        Some(v) if !v.is_null() => after_token(v)?,
        _ => String::new(),
    };
    let next = next_page_url(opts, subreddit, sort_by, count.saturating_add(opts.page_size), &after);
    Ok((urls, next))
}

fn after_token(v: &Value) -> Result<String, ParseError> {
    match v {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ParseError::wrong_type("after", "a string or null")),
    }
}

/// `{base}/{subreddit}/{sort/}?count={count}&after={after}`; the sort segment is
/// omitted entirely for the unqualified listing.
pub fn next_page_url(opts: &ParserOptions, subreddit: &str, sort_by: SortBy, count: i64, after: &str) -> String {
    let subreddit = subreddit.trim_matches('/');
    match sort_by.segment() {
        "" => format!("{}/{}/?count={}&after={}", opts.base_url, subreddit, count, after),
        seg => format!("{}/{}/{}/?count={}&after={}", opts.base_url, subreddit, seg, count, after),
    }
}
