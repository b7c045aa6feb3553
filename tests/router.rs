#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::json;
use talos::{is_listing, ParsedDocument, PostResult, TalosParser};

/// Only the presence of `kind` matters, not its value.
#[test]
fn listing_detection_checks_kind_presence_only() {
    assert!(is_listing(&json!({"kind": "Listing", "data": {}})));
    assert!(is_listing(&json!({"kind": null})));
    assert!(is_listing(&json!({"kind": ""})));

    assert!(!is_listing(&json!({"data": {"children": []}})));
    assert!(!is_listing(&post_doc(base_post(), vec![])));
    assert!(!is_listing(&json!("kind")));
}

#[test]
fn parse_dispatches_on_document_shape() {
    let parser = TalosParser::new();

    let listing = listing_doc(&[("/r/test/comments/1/a/", "r/test")], Some("t3_1"));
    match parser.parse(&listing) {
        ParsedDocument::Listing(l) => assert!(l.is_success()),
        other => panic!("expected listing, got {other:?}"),
    }

    let post = post_doc(base_post(), vec![comment("t1_a", "t3_abc123", 0, vec![])]);
    match parser.parse(&post) {
        ParsedDocument::Post(PostResult::Success(_)) => {}
        other => panic!("expected parsed post, got {other:?}"),
    }
}

/// The routed result serializes without any wrapper.
#[test]
fn routed_results_serialize_flat() {
    let parser = TalosParser::new();
    let listing = listing_doc(&[("/r/test/comments/1/a/", "r/test")], Some("t3_1"));
    let v = serde_json::to_value(parser.parse(&listing)).unwrap();
    assert_eq!(
        v,
        json!({
            "status": "success",
            "urls": ["https://old.reddit.com/r/test/comments/1/a/"],
            "next": "https://old.reddit.com/r/test/?count=25&after=t3_1"
        })
    );

    // a `{data}` object without `kind` is routed to the post builder and fails there
    let v = serde_json::to_value(parser.parse(&json!({"data": {}}))).unwrap();
    assert_eq!(v["status"], "failure");
}
