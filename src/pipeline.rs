use crate::config::{PageCount, ParserOptions};
use crate::listing::{parse_listing, ListingResult};
use crate::post::{parse_post, PostResult};
use serde::Serialize;
use serde_json::Value;

/// Result of routing one document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedDocument {
    Listing(ListingResult),
    Post(PostResult),
}

impl ParsedDocument {
    pub fn is_success(&self) -> bool {
        match self {
            ParsedDocument::Listing(l) => l.is_success(),
            ParsedDocument::Post(p) => p.is_success(),
        }
    }
}

/// A listing page is a `{kind, data}` object; a post page is a two element array.
/// Only the presence of `kind` is checked.
pub fn is_listing(doc: &Value) -> bool {
    doc.as_object().is_some_and(|m| m.contains_key("kind"))
}

#[derive(Clone, Debug, Default)]
pub struct TalosParser {
    pub(crate) opts: ParserOptions,
}

impl TalosParser {
    pub fn new() -> Self {
        Self { opts: ParserOptions::default() }
    }

    pub fn with_options(opts: ParserOptions) -> Self {
        Self { opts }
    }

    /// Defaults with environment overrides (`TALOS_BASE_URL`).
    pub fn from_env() -> Self {
        Self { opts: ParserOptions::from_env() }
    }

    // -------- Builder methods --------
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self { self.opts = self.opts.with_base_url(url); self }
    pub fn sort_by(mut self, sort_by: Option<impl Into<String>>) -> Self { self.opts = self.opts.with_sort_by(sort_by); self }
    pub fn count(mut self, count: impl Into<PageCount>) -> Self { self.opts = self.opts.with_count(count); self }
    pub fn page_size(mut self, n: i64) -> Self { self.opts = self.opts.with_page_size(n); self }
    pub fn parallelism(mut self, threads: usize) -> Self { self.opts = self.opts.with_parallelism(threads); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self { self.opts = self.opts.with_io_buffers(read_bytes, write_bytes); self }

    pub fn options(&self) -> &ParserOptions {
        &self.opts
    }

    // -------- Operations --------

    /// Route the document to the listing or post builder.
    pub fn parse(&self, doc: &Value) -> ParsedDocument {
        if is_listing(doc) {
            ParsedDocument::Listing(self.parse_listing(doc))
        } else {
            ParsedDocument::Post(self.parse_post(doc))
        }
    }

    pub fn parse_listing(&self, doc: &Value) -> ListingResult {
        parse_listing(doc, &self.opts)
    }

    pub fn parse_post(&self, doc: &Value) -> PostResult {
        parse_post(doc, &self.opts)
    }
}
