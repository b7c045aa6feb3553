//! Type-specific content extraction, dispatched on [`PostType`].

use crate::classify::PostType;
use crate::config::ParserOptions;
use crate::error::ParseError;
use crate::json_utils::{field, has_field, index, object_field, str_field};
use serde::Serialize;
use serde_json::Value;

/// The `type` tag and `content` payload of a parsed post.
/// Serialized adjacently so it can be flattened into the record envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum PostContent {
    Text,
    Crosspost(String),
    Image(Vec<String>),
    Video(Vec<String>),
    Link(Vec<String>),
}

pub fn extract_content(post: &Value, post_type: PostType, opts: &ParserOptions) -> Result<PostContent, ParseError> {
    match post_type {
        PostType::Text => Ok(PostContent::Text),
        PostType::Crosspost => {
            let parent = index(post, "crosspost_parent_list", 0)?;
            Ok(PostContent::Crosspost(opts.link(str_field(parent, "permalink")?)))
        }
        PostType::InternalImage | PostType::ExternalImage => {
            if has_field(post, "gallery_data") {
                Ok(PostContent::Image(gallery_urls(post)?))
            } else {
                Ok(PostContent::Image(vec![str_field(post, "url_overridden_by_dest")?.to_string()]))
            }
        }
        PostType::InternalVideo => {
            let video = field(field(post, "secure_media")?, "reddit_video")?;
            Ok(PostContent::Video(vec![str_field(video, "fallback_url")?.to_string()]))
        }
        PostType::ExternalVideo => {
            Ok(PostContent::Video(vec![str_field(post, "url_overridden_by_dest")?.to_string()]))
        }
        PostType::ExternalLink => Ok(PostContent::Link(vec![str_field(post, "url")?.to_string()])),
    }
}

/// Gallery image URLs in `media_metadata` key order (document order with
/// `preserve_order`). The API HTML-escapes these (`&amp;`).
fn gallery_urls(post: &Value) -> Result<Vec<String>, ParseError> {
    let media = object_field(post, "media_metadata")?;
    let mut urls = Vec::with_capacity(media.len());
    for item in media.values() {
        let source = field(item, "s")?;
        // animated gallery items carry `gif`/`mp4` instead of `u`
        let raw = match source.get("u").and_then(Value::as_str) {
            Some(u) => u,
            None => str_field(source, "gif").map_err(|_| ParseError::MissingField("u".to_string()))?,
        };
        urls.push(html_escape::decode_html_entities(raw).into_owned());
    }
    Ok(urls)
}
