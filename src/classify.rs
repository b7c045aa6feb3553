//! Post content-type classification.

use crate::error::ParseError;
use crate::json_utils::{bool_field, field, has_field, opt_str_field, str_field};
use serde_json::Value;

/// https://developer.mozilla.org/en-US/docs/Web/Media/Formats/Image_types
pub const IMAGE_EXTENSIONS: [&str; 17] = [
    ".apng", ".avif", ".gif", ".gifv", ".jpg", ".jpeg", ".jfif", ".pjpeg", ".pjp",
    ".png", ".svg", ".webp", ".bmp", ".ico", ".cur", ".tif", ".tiff",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostType {
    Text,
    Crosspost,
    InternalImage,
    InternalVideo,
    ExternalImage,
    ExternalVideo,
    ExternalLink,
}

impl PostType {
    /// Hosted on Reddit itself (self text, crossposts, i.redd.it / v.redd.it, galleries).
    pub fn is_internal(self) -> bool {
        !matches!(self, PostType::ExternalImage | PostType::ExternalVideo | PostType::ExternalLink)
    }
}

/// Classify a post's `data` object. First matching rule wins, so the order of
/// the checks below is significant.
pub fn classify(post: &Value) -> Result<PostType, ParseError> {
    // Both keys must exist even though they are only consulted late.
    let url = field(post, "url")?;
    let media = field(post, "media")?;

    // `domain` can be null on removed posts; it is only read once `is_self` is false.
    if bool_field(post, "is_self")? {
        return Ok(PostType::Text);
    }
    let domain = opt_str_field(post, "domain")?
        .ok_or_else(|| ParseError::wrong_type("domain", "a string"))?;
    let subreddit = str_field(post, "subreddit")?;

    if domain.contains(&format!("self.{subreddit}")) {
        return Ok(PostType::Text);
    }
    if has_field(post, "crosspost_parent_list") {
        return Ok(PostType::Crosspost);
    }
    if domain.contains("i.redd.it") || has_field(post, "gallery_data") {
        return Ok(PostType::InternalImage);
    }
    if domain.contains("v.redd.it") {
        return Ok(PostType::InternalVideo);
    }

    let url = url.as_str().ok_or_else(|| ParseError::wrong_type("url", "a string"))?;
    if is_image_url(url) {
        return Ok(PostType::ExternalImage);
    }
    if media.is_null() {
        Ok(PostType::ExternalLink)
    } else {
        Ok(PostType::ExternalVideo)
    }
}

/// Substring match, not suffix: image hosts often append query strings.
pub fn is_image_url(url: &str) -> bool {
    url.contains("gfycat") || IMAGE_EXTENSIONS.iter().any(|ext| url.contains(ext))
}
