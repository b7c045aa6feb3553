//! Single post pages: `[postListing, commentListing]` into one [`PostResult`].

use crate::classify::classify;
use crate::comments::{flatten_comments, CommentParseResult};
use crate::config::ParserOptions;
use crate::error::ParseError;
use crate::extract::{extract_content, PostContent};
use crate::json_utils::{
    author_identity, bool_field, children, data, element, epoch_field, f64_field, i64_field, index,
    opt_str_field, str_field,
};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Marker Reddit substitutes for the self text of a deleted post.
pub const DELETED_MARKER: &str = "[deleted]";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PostResult {
    Success(PostRecord),
    Failure { error: String },
}

impl PostResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PostResult::Success(_))
    }

    pub fn record(&self) -> Option<&PostRecord> {
        match self {
            PostResult::Success(r) => Some(r),
            PostResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PostResult::Failure { error } => Some(error),
            PostResult::Success(_) => None,
        }
    }
}

/// A deleted post carries nothing but its `type`.
#[derive(Clone, Debug, PartialEq)]
pub enum PostRecord {
    Deleted,
    Parsed(Box<ParsedPost>),
}

impl PostRecord {
    pub fn parsed(&self) -> Option<&ParsedPost> {
        match self {
            PostRecord::Parsed(p) => Some(p),
            PostRecord::Deleted => None,
        }
    }
}

impl Serialize for PostRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PostRecord::Deleted => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", "deleted")?;
                map.end()
            }
            PostRecord::Parsed(post) => post.serialize(serializer),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParsedPost {
    #[serde(flatten)]
    pub content: PostContent,
    pub is_internal: bool,

    pub id: String,
    pub title: String,
    pub subreddit: String,
    pub author_id: Option<String>,
    pub is_author_premium: bool,
    pub text: String,
    pub flair: Option<String>,

    pub upvotes: i64,
    pub upvote_ratio: f64,
    pub num_rewards: i64,
    pub num_crossposts: i64,
    pub num_comments: i64,

    pub is_over_18: bool,
    pub is_quarantined: bool,
    pub is_locked: bool,

    pub published_at: i64,
    pub crawled_at: i64,
    pub post_link: String,

    #[serde(flatten)]
    pub discussion: CommentParseResult,
}

/// Build a post record; any error collapses the whole record to `Failure`.
pub fn parse_post(doc: &Value, opts: &ParserOptions) -> PostResult {
    parse_post_at(doc, opts, crate::util::now_epoch_secs())
}

/// As [`parse_post`], with an explicit crawl timestamp.
pub fn parse_post_at(doc: &Value, opts: &ParserOptions, crawled_at: i64) -> PostResult {
    match build_post(doc, opts, crawled_at) {
        Ok(record) => PostResult::Success(record),
        Err(e) => {
            tracing::debug!("post parse failed: {e}");
            PostResult::Failure { error: e.to_string() }
        }
    }
}

/// The post's `data` object: `doc[0].data.children[0].data`.
pub fn post_data(doc: &Value) -> Result<&Value, ParseError> {
    let post_listing = element(doc, 0)?;
    data(index(data(post_listing)?, "children", 0)?)
}

fn build_post(doc: &Value, opts: &ParserOptions, crawled_at: i64) -> Result<PostRecord, ParseError> {
    let post = post_data(doc)?;

    // Deleted posts lack most of the envelope; stop before touching it.
    if str_field(post, "selftext")?.contains(DELETED_MARKER) {
        return Ok(PostRecord::Deleted);
    }

    let post_type = classify(post)?;
    let (author_id, is_author_premium) = author_identity(post);
    let forest = children(element(doc, 1)?)?;

    let parsed = ParsedPost {
        content: extract_content(post, post_type, opts)?,
        is_internal: post_type.is_internal(),
        id: str_field(post, "id")?.to_string(),
        title: str_field(post, "title")?.to_string(),
        subreddit: str_field(post, "subreddit_name_prefixed")?.to_string(),
        author_id,
        is_author_premium,
        text: str_field(post, "selftext")?.to_string(),
        flair: opt_str_field(post, "link_flair_text")?.map(str::to_string),
        upvotes: i64_field(post, "ups")?,
        upvote_ratio: f64_field(post, "upvote_ratio")?,
        num_rewards: i64_field(post, "total_awards_received")?,
        num_crossposts: i64_field(post, "num_crossposts")?,
        num_comments: i64_field(post, "num_comments")?,
        is_over_18: bool_field(post, "over_18")?,
        is_quarantined: bool_field(post, "quarantine")?,
        is_locked: bool_field(post, "locked")?,
        published_at: epoch_field(post, "created")?,
        crawled_at,
        post_link: opts.link(str_field(post, "permalink")?),
        discussion: flatten_comments(forest),
    };
    Ok(PostRecord::Parsed(Box::new(parsed)))
}
