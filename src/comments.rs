//! Comment forest flattening.
//!
//! Reddit returns comments as a tree of `{kind: "t1", data: {..., replies}}` things,
//! where `replies` is either a nested listing or an empty string. The walk below
//! emits one flat record per comment in pre-order. A comment that fails to parse
//! records an error and drops its own subtree; its siblings are unaffected.

use crate::error::ParseError;
use crate::json_utils::{author_identity, bool_field, children, data, epoch_field, i64_field, str_field};
use serde::Serialize;
use serde_json::Value;

/// `kind` tag of a comment. Other kinds (e.g. `more`) are load-more stubs.
pub const COMMENT_KIND: &str = "t1";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommentRecord {
    /// `None` when the comment replies directly to the post.
    pub parent_id: Option<String>,
    pub author_id: Option<String>,
    pub is_author_premium: bool,
    pub id: String,
    pub text: String,
    pub subreddit: String,
    pub upvotes: i64,
    pub depth: i64,
    pub num_awards: i64,
    pub published_at: i64,
    pub is_controversial: bool,
    pub is_score_hidden: bool,
    pub is_locked: bool,
    pub permalink: String,
    pub num_children: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CommentParseResult {
    pub comments: Vec<CommentRecord>,
    pub errors: Vec<String>,
}

/// Flatten a comment forest (the `children` array of the comment listing).
pub fn flatten_comments(forest: &[Value]) -> CommentParseResult {
    let mut out = CommentParseResult::default();
    for root in forest {
        walk(root, &mut out);
    }
    out
}

fn walk(node: &Value, out: &mut CommentParseResult) {
    match node.get("kind").map(Value::as_str) {
        Some(Some(COMMENT_KIND)) => {}
        Some(_) => return,
        None => {
            push_error(out, &ParseError::MissingField("kind".to_string()));
            return;
        }
    }

    let built = data(node).and_then(|c| Ok((build_comment(c)?, replies_of(c)?)));
    match built {
        Ok((record, replies)) => {
            out.comments.push(record);
            for child in replies {
                walk(child, out);
            }
        }
        Err(e) => push_error(out, &e),
    }
}

fn push_error(out: &mut CommentParseResult, e: &ParseError) {
    tracing::debug!("skipping comment subtree: {e}");
    out.errors.push(e.to_string());
}

/// Direct reply things. Anything other than an object (`""`, null, false) means no replies.
fn replies_of(comment: &Value) -> Result<&[Value], ParseError> {
    let replies = comment.get("replies").ok_or_else(|| ParseError::MissingField("replies".to_string()))?;
    if replies.is_object() {
        Ok(children(replies)?.as_slice())
    } else {
        Ok(&[])
    }
}

fn build_comment(c: &Value) -> Result<CommentRecord, ParseError> {
    let parent = str_field(c, "parent_id")?;
    let parent_id = if parent.starts_with("t3_") { None } else { Some(parent.to_string()) };
    let (author_id, is_author_premium) = author_identity(c);

    Ok(CommentRecord {
        parent_id,
        author_id,
        is_author_premium,
        id: str_field(c, "name")?.to_string(),
        text: str_field(c, "body")?.to_string(),
        subreddit: str_field(c, "subreddit_name_prefixed")?.to_string(),
        upvotes: i64_field(c, "ups")?,
        depth: i64_field(c, "depth")?,
        num_awards: i64_field(c, "total_awards_received")?,
        published_at: epoch_field(c, "created")?,
        is_controversial: i64_field(c, "controversiality")? != 0,
        is_score_hidden: bool_field(c, "score_hidden")?,
        is_locked: bool_field(c, "locked")?,
        permalink: str_field(c, "permalink")?.to_string(),
        num_children: replies_of(c)?.len(),
    })
}
