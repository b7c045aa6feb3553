#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::{json, Value};
use talos::flatten_comments;

fn ids(forest: &[Value]) -> Vec<String> {
    flatten_comments(forest).comments.into_iter().map(|c| c.id).collect()
}

/// Pre-order: each comment before its replies, replies in document order.
#[test]
fn flattens_in_pre_order() {
    let forest = vec![
        comment(
            "t1_a",
            "t3_p",
            0,
            vec![
                comment("t1_a1", "t1_a", 1, vec![comment("t1_a1x", "t1_a1", 2, vec![])]),
                comment("t1_a2", "t1_a", 1, vec![]),
            ],
        ),
        comment("t1_b", "t3_p", 0, vec![]),
    ];
    assert_eq!(ids(&forest), ["t1_a", "t1_a1", "t1_a1x", "t1_a2", "t1_b"]);
}

#[test]
fn record_fields_and_parent_links() {
    let forest = vec![comment("t1_a", "t3_p", 0, vec![comment("t1_b", "t1_a", 1, vec![])])];
    let out = flatten_comments(&forest);
    assert!(out.errors.is_empty());

    let root = &out.comments[0];
    assert_eq!(root.parent_id, None, "top-level comments reply to the post");
    assert_eq!(root.author_id.as_deref(), Some("t2_t1_a"));
    assert!(!root.is_author_premium);
    assert_eq!(root.text, "body of t1_a");
    assert_eq!(root.subreddit, "r/test");
    assert_eq!(root.upvotes, 5);
    assert_eq!(root.depth, 0);
    assert_eq!(root.num_awards, 0);
    assert_eq!(root.published_at, 1_690_000_100);
    assert!(!root.is_controversial && !root.is_score_hidden && !root.is_locked);
    assert_eq!(root.permalink, "/r/test/comments/abc123/hello_world/t1_a/");
    assert_eq!(root.num_children, 1);

    let reply = &out.comments[1];
    assert_eq!(reply.parent_id.as_deref(), Some("t1_a"));
    assert_eq!(reply.depth, 1);
    assert_eq!(reply.num_children, 0);
}

/// A malformed middle node drops its own subtree and nothing else.
#[test]
fn malformed_middle_node_skips_only_its_subtree() {
    let mut middle = comment("t1_mid", "t1_root", 1, vec![comment("t1_leaf", "t1_mid", 2, vec![])]);
    middle["data"].as_object_mut().unwrap().remove("ups");

    let forest = vec![
        comment(
            "t1_root",
            "t3_p",
            0,
            vec![middle, comment("t1_sib", "t1_root", 1, vec![comment("t1_sibkid", "t1_sib", 2, vec![])])],
        ),
        comment("t1_other", "t3_p", 0, vec![]),
    ];

    let out = flatten_comments(&forest);
    let got: Vec<&str> = out.comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(got, ["t1_root", "t1_sib", "t1_sibkid", "t1_other"]);
    assert_eq!(out.errors, vec!["missing field 'ups'".to_string()]);
    // the parent still counts the malformed reply as a direct child
    assert_eq!(out.comments[0].num_children, 2);
}

/// "load more" stubs are skipped silently, wherever they appear.
#[test]
fn more_stubs_are_skipped_without_error() {
    let forest = vec![
        comment("t1_a", "t3_p", 0, vec![comment("t1_b", "t1_a", 1, vec![]), more_stub("t1_a")]),
        more_stub("t3_p"),
    ];
    let out = flatten_comments(&forest);
    assert_eq!(out.comments.len(), 2);
    assert!(out.errors.is_empty());
    assert_eq!(out.comments[0].num_children, 2);
}

#[test]
fn deleted_author_defaults() {
    let mut c = comment("t1_a", "t3_p", 0, vec![]);
    let data = c["data"].as_object_mut().unwrap();
    data.remove("author_fullname");
    data.remove("author_premium");
    data.insert("body".into(), json!("[deleted]"));

    let out = flatten_comments(&[c]);
    assert!(out.errors.is_empty());
    assert_eq!(out.comments[0].author_id, None);
    assert!(!out.comments[0].is_author_premium);
}

/// `replies` comes as `""` when empty, but null/false are tolerated the same way.
#[test]
fn non_object_replies_mean_no_children() {
    for empty in [json!(""), json!(null), json!(false)] {
        let mut c = comment("t1_a", "t3_p", 0, vec![]);
        c["data"]["replies"] = empty.clone();
        let out = flatten_comments(&[c]);
        assert!(out.errors.is_empty(), "replies={empty}");
        assert_eq!(out.comments[0].num_children, 0);
    }
}

#[test]
fn replies_listing_without_children_is_an_error() {
    let mut c = comment("t1_a", "t3_p", 0, vec![]);
    c["data"]["replies"] = json!({"kind": "Listing", "data": {}});
    let out = flatten_comments(&[c, comment("t1_b", "t3_p", 0, vec![])]);
    assert_eq!(ids_of(&out), ["t1_b"]);
    assert_eq!(out.errors, vec!["missing field 'children'".to_string()]);
}

#[test]
fn node_without_kind_is_reported() {
    let forest = vec![json!({"data": {"name": "t1_x"}}), comment("t1_a", "t3_p", 0, vec![])];
    let out = flatten_comments(&forest);
    assert_eq!(ids_of(&out), ["t1_a"]);
    assert_eq!(out.errors, vec!["missing field 'kind'".to_string()]);
}

#[test]
fn controversiality_maps_to_bool() {
    let mut c = comment("t1_a", "t3_p", 0, vec![]);
    c["data"]["controversiality"] = json!(1);
    assert!(flatten_comments(&[c]).comments[0].is_controversial);
}

fn ids_of(out: &talos::CommentParseResult) -> Vec<&str> {
    out.comments.iter().map(|c| c.id.as_str()).collect()
}
