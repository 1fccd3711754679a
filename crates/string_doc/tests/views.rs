use string_doc::debug::outline;
use string_doc::{AttrKey, Document, Insertable, ParseError, ParserConfig, deep_copy, parse, render};

const BLOG: &str = concat!(
    "<html><head><title>Blog</title></head><body>",
    r#"<article data-scope="post"><h1 data-prop="title">First</h1>"#,
    r#"<ul><li data-scope="comment"><p data-prop="body">Nice</p></li></ul></article>"#,
    r#"<article data-scope="post"><h1 data-prop="title">Second</h1></article>"#,
    "</body></html>",
);

#[test]
fn every_view_aliases_the_source() {
    let doc = parse(BLOG).expect("parse");
    let posts = doc.scope("post");
    assert_eq!(posts.len(), 2);

    posts[1].prop_view("title").set_text("Changed");
    assert!(doc.to_html().contains(r#"<h1 data-prop="title">Changed</h1>"#));
    assert_eq!(doc.scopes()[2].props[0].doc.text(), "Changed");
}

trait PropView {
    fn prop_view(&self, name: &str) -> Document;
}

impl PropView for Document {
    fn prop_view(&self, name: &str) -> Document {
        self.props()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.doc)
            .expect("prop present")
    }
}

#[test]
fn scope_records_come_in_document_order() {
    let doc = parse(BLOG).expect("parse");
    let names: Vec<String> = doc.bindings().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["post", "comment", "post"]);

    let first = &doc.scopes()[0];
    assert_eq!(first.props.len(), 1);
    assert_eq!(first.nested.len(), 1);
    assert_eq!(first.nested[0].props[0].doc.text(), "Nice");
}

#[test]
fn duplicates_are_independent_both_ways() {
    let doc = parse(BLOG).expect("parse");
    let copy = doc.duplicate();

    copy.set_title("Copy");
    doc.scope("comment")[0].remove();

    assert_eq!(doc.title().as_deref(), Some("Blog"));
    assert_eq!(copy.title().as_deref(), Some("Copy"));
    assert!(doc.scope("comment").is_empty());
    assert_eq!(copy.scope("comment").len(), 1);
}

#[test]
fn duplicated_view_keeps_its_focus() {
    let doc = parse(BLOG).expect("parse");
    let second = doc.scope("post").remove(1);
    let copy = second.duplicate();
    assert!(copy.is_view());
    assert_eq!(copy.prop_view("title").text(), "Second");

    copy.prop_view("title").set_text("Other");
    assert_eq!(second.prop_view("title").text(), "Second");
}

#[test]
fn documents_can_be_composed() {
    let layout = parse(r#"<main data-container="content"></main>"#).expect("parse");
    let page = parse(r#"<section data-scope="hero"><h2 data-prop="heading">Hi</h2></section>"#)
        .expect("parse");

    let content = layout.container("content").expect("container");
    content.append(&page);
    assert_eq!(
        layout.to_string(),
        r#"<main data-container="content"><section data-scope="hero"><h2 data-prop="heading">Hi</h2></section></main>"#
    );
    assert_eq!(layout.scope("hero").len(), 1);

    content.prepend(Insertable::text(42));
    assert!(content.html().starts_with("42<section"));
}

#[test]
fn deep_copy_of_a_structure_renders_identically() {
    let doc = parse(BLOG).expect("parse");
    let copy = deep_copy(doc.structure());
    assert_eq!(render(&copy), doc.to_html());
    assert!(!copy.ptr_eq(doc.structure()));
}

#[test]
fn attribute_keys_are_canonical() {
    let doc = parse(r#"<div data-scope="box" data-partial="card">x</div>"#).expect("parse");
    let view = doc.scope("box").remove(0);
    assert_eq!(view.get_attribute("partial").as_deref(), Some("card"));
    assert_eq!(view.get_attribute(AttrKey::Partial).as_deref(), Some("card"));
    assert_eq!(view.get_attribute("DATA-SCOPE").as_deref(), Some("box"));

    view.set_attribute(AttrKey::Container, "slot");
    assert!(doc.to_html().contains(r#"data-container="slot""#));
    assert!(doc.container("slot").is_some());
}

#[test]
fn parser_limits_and_errors_surface() {
    let config = ParserConfig {
        max_depth: 2,
        ..ParserConfig::default()
    };
    let err = Document::parse_with_config(
        r#"<a data-prop="1"><b><c data-prop="2">x</c></b></a>"#,
        &config,
    )
    .expect_err("too deep");
    assert!(matches!(err, ParseError::NestingTooDeep { max_depth: 2, .. }));
    assert!(err.to_string().contains("deeper than 2"));

    let err = parse(r#"<p data-prop="x""#).expect_err("unterminated");
    assert!(matches!(err, ParseError::UnterminatedTag { .. }));
}

#[test]
fn outline_shows_binding_points() {
    let doc = parse(r#"<div data-scope="post"><h1 data-prop="title">Hello</h1></div>"#)
        .expect("parse");
    assert_eq!(
        outline(doc.structure(), 10),
        [
            r#"<div data-scope="post">"#,
            r#"  <h1 data-prop="title">"#,
            r#"    "Hello""#,
        ]
    );
}
