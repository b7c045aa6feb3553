#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Listing page `{kind: "Listing", data: {after, children}}` with one `t3` child per
/// `(permalink, subreddit_name_prefixed)` pair.
pub fn listing_doc(posts: &[(&str, &str)], after: Option<&str>) -> Value {
    let children: Vec<Value> = posts
        .iter()
        .map(|(permalink, sub)| {
            json!({"kind": "t3", "data": {"permalink": permalink, "subreddit_name_prefixed": sub}})
        })
        .collect();
    json!({"kind": "Listing", "data": {"after": after, "dist": children.len(), "children": children}})
}

/// A complete self post in r/test, by "bob". Tests override fields as needed.
pub fn base_post() -> Value {
    json!({
        "id": "abc123",
        "name": "t3_abc123",
        "title": "Hello world",
        "subreddit": "test",
        "subreddit_name_prefixed": "r/test",
        "author": "bob",
        "author_fullname": "t2_bob",
        "author_premium": true,
        "selftext": "just some text",
        "link_flair_text": "Discussion",
        "ups": 42,
        "upvote_ratio": 0.97,
        "total_awards_received": 1,
        "num_crossposts": 0,
        "num_comments": 3,
        "over_18": false,
        "quarantine": false,
        "locked": false,
        "created": 1690000000.0,
        "permalink": "/r/test/comments/abc123/hello_world/",
        "url": "https://old.reddit.com/r/test/comments/abc123/hello_world/",
        "domain": "self.test",
        "is_self": true,
        "media": null
    })
}

/// Non-self post with the given link fields.
pub fn link_post(domain: &str, url: &str, media: Value) -> Value {
    let mut p = base_post();
    p["is_self"] = json!(false);
    p["selftext"] = json!("");
    p["domain"] = json!(domain);
    p["url"] = json!(url);
    p["url_overridden_by_dest"] = json!(url);
    p["media"] = media;
    p
}

/// `{kind: "t1"}` comment thing. Empty `replies` is rendered the way the API does: `""`.
pub fn comment(name: &str, parent_id: &str, depth: i64, replies: Vec<Value>) -> Value {
    let replies = if replies.is_empty() {
        json!("")
    } else {
        json!({"kind": "Listing", "data": {"after": null, "children": replies}})
    };
    json!({
        "kind": "t1",
        "data": {
            "name": name,
            "parent_id": parent_id,
            "author_fullname": format!("t2_{name}"),
            "author_premium": false,
            "body": format!("body of {name}"),
            "subreddit_name_prefixed": "r/test",
            "ups": 5,
            "depth": depth,
            "total_awards_received": 0,
            "created": 1690000100.5,
            "controversiality": 0,
            "score_hidden": false,
            "locked": false,
            "permalink": format!("/r/test/comments/abc123/hello_world/{name}/"),
            "replies": replies
        }
    })
}

/// "load more comments" stub.
pub fn more_stub(parent_id: &str) -> Value {
    json!({"kind": "more", "data": {"count": 12, "parent_id": parent_id, "children": ["x1", "x2"]}})
}

/// Two element post page: `[postListing, commentListing]`.
pub fn post_doc(post: Value, comments: Vec<Value>) -> Value {
    json!([
        {"kind": "Listing", "data": {"after": null, "children": [{"kind": "t3", "data": post}]}},
        {"kind": "Listing", "data": {"after": null, "children": comments}}
    ])
}

pub fn write_json(path: &Path, v: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec(v).unwrap()).unwrap();
}

/// Write `lines` as a zstd-compressed file, one JSON value per line.
pub fn write_zst_lines(path: &Path, lines: &[Value]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Read a JSONL file into a vector of `serde_json::Value` (skips empty lines).
pub fn read_jsonl_values(path: &Path) -> Vec<Value> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines()
        .map(|l| l.unwrap())
        .filter(|s| !s.is_empty())
        .map(|s| serde_json::from_str(&s).unwrap())
        .collect()
}
