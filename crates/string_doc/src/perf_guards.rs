use crate::Document;
use crate::perf_fixtures::make_posts;
use crate::traverse::fragments;

const LARGE_POSTS: usize = 5_000;
// For one post: <article> with slot and closer (3); <h2> with slot, text and
// closer (4); <p class=meta> holds a marked span so it is structured too:
// p, slot, closer, "by ", then span with slot, text and closer (8); <div> with
// slot, raw "<p>Body text</p>" and closer (4).
const NODES_PER_POST: usize = 19;

#[test]
fn perf_guard_large_document_node_count() {
    let doc = Document::parse(&make_posts(LARGE_POSTS)).expect("parse");
    let posts = doc.scope("post");
    assert_eq!(posts.len(), LARGE_POSTS);

    let body = doc.container("main").expect("main container");
    let inner = body.node().and_then(|n| n.content_slot()).expect("slot").children();
    let nodes = fragments(&inner).len();
    assert_eq!(nodes, LARGE_POSTS * NODES_PER_POST, "unexpected node count");
}

#[test]
fn perf_guard_mutating_every_post_keeps_size_linear() {
    let input = make_posts(LARGE_POSTS);
    let doc = Document::parse(&input).expect("parse");
    for post in doc.scopes() {
        for prop in post.props {
            prop.doc.set_text("x");
        }
    }
    let rendered = doc.to_html();
    assert!(rendered.len() < input.len(), "rendered output grew after shrinking every prop");
    assert_eq!(doc.scope("post").len(), LARGE_POSTS);
}
