use crate::error::ParseError;
use serde_json::Value;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://old.reddit.com";

/// Listings are served 25 posts at a time; the pagination `count` advances by this.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Listing sort order. `Hot` is the unqualified listing and has no path segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Hot,
    New,
    Rising,
    Controversial,
    Top,
}

impl SortBy {
    /// Validate an optional user value. `None` is the unqualified listing.
    pub fn parse_opt(s: Option<&str>) -> Result<Self, ParseError> {
        match s {
            None => Ok(SortBy::Hot),
            Some(s) => s.parse(),
        }
    }

    /// Path segment used in next-page URLs; empty for `Hot`.
    pub fn segment(self) -> &'static str {
        match self {
            SortBy::Hot => "",
            SortBy::New => "new",
            SortBy::Rising => "rising",
            SortBy::Controversial => "controversial",
            SortBy::Top => "top",
        }
    }
}

impl FromStr for SortBy {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(SortBy::New),
            "rising" => Ok(SortBy::Rising),
            "controversial" => Ok(SortBy::Controversial),
            "top" => Ok(SortBy::Top),
            other => Err(ParseError::InvalidSortBy(other.to_string())),
        }
    }
}

/// Number of posts already seen, as handed to the listing builder.
/// Callers pass either a number or its textual form (e.g. straight from argv).
#[derive(Clone, Debug, PartialEq)]
pub enum PageCount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl PageCount {
    /// Coerce to an integer: floats truncate, text is trimmed then parsed as an integer.
    pub fn coerce(&self) -> Result<i64, ParseError> {
        match self {
            PageCount::Int(n) => Ok(*n),
            PageCount::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            PageCount::Float(f) => Err(ParseError::InvalidCount(f.to_string())),
            PageCount::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidCount(s.clone())),
        }
    }

    pub fn from_value(v: &Value) -> Self {
        match v {
            Value::Number(n) => match n.as_i64() {
                Some(i) => PageCount::Int(i),
                None => PageCount::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => PageCount::Text(s.clone()),
            other => PageCount::Text(other.to_string()),
        }
    }
}

impl Default for PageCount {
    fn default() -> Self {
        PageCount::Int(0)
    }
}

impl From<i64> for PageCount {
    fn from(n: i64) -> Self { PageCount::Int(n) }
}
impl From<f64> for PageCount {
    fn from(f: f64) -> Self { PageCount::Float(f) }
}
impl From<&str> for PageCount {
    fn from(s: &str) -> Self { PageCount::Text(s.to_string()) }
}
impl From<String> for PageCount {
    fn from(s: String) -> Self { PageCount::Text(s) }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ParserOptions {
    pub base_url: String,             // no trailing slash
    pub sort_by: Option<String>,      // validated lazily, at listing build time
    pub count: PageCount,
    pub page_size: i64,
    pub parallelism: Option<usize>,   // Some(N) to set rayon threads, None to use default
    pub progress: bool,
    pub progress_label: Option<String>,

    // IO tuning
    pub read_buffer_bytes: usize,
    pub write_buffer_bytes: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sort_by: None,
            count: PageCount::default(),
            page_size: DEFAULT_PAGE_SIZE,
            parallelism: None,
            progress: true,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
        }
    }
}

impl ParserOptions {
    /// Defaults, with `TALOS_BASE_URL` applied when set and non-blank.
    pub fn from_env() -> Self {
        let opts = Self::default();
        match std::env::var("TALOS_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => opts.with_base_url(url),
            _ => opts,
        }
    }

    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = url.as_ref().trim().trim_end_matches('/').to_string();
        self
    }
    pub fn with_sort_by(mut self, sort_by: Option<impl Into<String>>) -> Self {
        self.sort_by = sort_by.map(Into::into);
        self
    }
    pub fn with_count(mut self, count: impl Into<PageCount>) -> Self {
        self.count = count.into();
        self
    }
    pub fn with_page_size(mut self, n: i64) -> Self {
        self.page_size = n.max(1);
        self
    }
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }

    /// `{base_url}{suffix}` for a site-relative permalink.
    #[inline]
    pub fn link(&self, suffix: &str) -> String {
        format!("{}{}", self.base_url, suffix)
    }
}
