mod config;
mod error;
mod json_utils;
mod util;

mod classify;
mod extract;
mod comments;
mod post;
mod listing;
mod pipeline;

mod source;
mod ndjson;
mod progress;
mod batch;
mod crawl;

pub use crate::config::{PageCount, ParserOptions, SortBy, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use crate::error::{ErrorKind, ParseError};
pub use crate::pipeline::{is_listing, ParsedDocument, TalosParser};

// Core builders, usable without the `TalosParser` facade.
pub use crate::listing::{next_page_url, parse_listing, ListingResult};
pub use crate::post::{parse_post, parse_post_at, post_data, ParsedPost, PostRecord, PostResult, DELETED_MARKER};
pub use crate::classify::{classify, is_image_url, PostType, IMAGE_EXTENSIONS};
pub use crate::extract::{extract_content, PostContent};
pub use crate::comments::{flatten_comments, CommentParseResult, CommentRecord, COMMENT_KIND};

// Field accessors for callers pulling extra fields out of raw documents.
pub use crate::json_utils::{
    array_field, author_identity, bool_field, epoch_field, f64_field, field, has_field, i64_field,
    object_field, opt_str_field, str_field,
};

// I/O glue: loading, batch output, crawling.
pub use crate::source::{discover_documents, expand_inputs, for_each_document_line, load_document, InputFormat};
pub use crate::ndjson::NdjsonWriter;
pub use crate::batch::{BatchRecord, BatchSummary};
pub use crate::crawl::{json_endpoint, CrawlReport, CrawledPost, Crawler, DocumentFetcher};
pub use crate::progress::make_count_progress;
pub use crate::util::{init_tracing_once, now_epoch_secs};
