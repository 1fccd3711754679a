#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use string_doc::Document;

const TEMPLATE: &str = concat!(
    "<html><head><title>T</title></head><body>",
    r#"<main data-container="main"><article data-scope="post">"#,
    r#"<h1 data-prop="title">t</h1><ul><li data-scope="comment">"#,
    r#"<p data-prop="body">b</p></li></ul></article></main>"#,
    r#"<nav data-partial="nav"><a href="/">home</a></nav></body></html>"#,
);

#[derive(Arbitrary, Debug)]
enum Target {
    Document,
    Scope(u8),
    Prop(u8, u8),
    Container,
    Partial,
}

#[derive(Arbitrary, Debug)]
enum Op {
    SetText(Target, String),
    SetHtml(Target, String),
    Append(Target, String),
    Prepend(Target, String),
    After(Target, String),
    Before(Target, String),
    Replace(Target, String),
    Clear(Target),
    Remove(Target),
    SetAttribute(Target, String, String),
    RemoveAttribute(Target, String),
    SetTitle(String),
    AppendCopy(Target, Target),
}

fn resolve(doc: &Document, target: &Target) -> Option<Document> {
    match target {
        Target::Document => Some(doc.clone()),
        Target::Scope(i) => {
            let scopes = doc.scopes();
            let len = scopes.len();
            (len > 0).then(|| scopes[*i as usize % len].doc.clone())
        }
        Target::Prop(s, p) => {
            let scopes = doc.scopes();
            if scopes.is_empty() {
                return None;
            }
            let props = &scopes[*s as usize % scopes.len()].props;
            (!props.is_empty()).then(|| props[*p as usize % props.len()].doc.clone())
        }
        Target::Container => doc.container("main"),
        Target::Partial => doc.partial("nav"),
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let Ok(doc) = Document::parse(TEMPLATE) else {
        return;
    };
    let pristine = doc.duplicate();
    for op in ops.iter().take(32) {
        match op {
            Op::SetTitle(title) => doc.set_title(title),
            Op::AppendCopy(into, from) => {
                // Copies only: appending a live ancestor would make a cycle.
                if let (Some(into), Some(from)) = (resolve(&doc, into), resolve(&doc, from)) {
                    into.append(from.duplicate());
                }
            }
            Op::SetText(t, v) => resolve(&doc, t).into_iter().for_each(|d| d.set_text(v)),
            Op::SetHtml(t, v) => resolve(&doc, t).into_iter().for_each(|d| d.set_html(v)),
            Op::Append(t, v) => resolve(&doc, t).into_iter().for_each(|d| d.append(v)),
            Op::Prepend(t, v) => resolve(&doc, t).into_iter().for_each(|d| d.prepend(v)),
            Op::After(t, v) => resolve(&doc, t).into_iter().for_each(|d| d.after(v)),
            Op::Before(t, v) => resolve(&doc, t).into_iter().for_each(|d| d.before(v)),
            Op::Replace(t, v) => resolve(&doc, t).into_iter().for_each(|d| d.replace(v)),
            Op::Clear(t) => resolve(&doc, t).into_iter().for_each(|d| d.clear()),
            Op::Remove(t) => resolve(&doc, t).into_iter().for_each(|d| d.remove()),
            Op::SetAttribute(t, k, v) => resolve(&doc, t)
                .into_iter()
                .for_each(|d| d.set_attribute(k, v.as_str())),
            Op::RemoveAttribute(t, k) => resolve(&doc, t)
                .into_iter()
                .for_each(|d| d.remove_attribute(k)),
        }
        let _ = doc.to_html();
    }
    assert_eq!(pristine.to_html(), TEMPLATE, "edits leaked into a duplicate");
});
