#![no_main]

use libfuzzer_sys::fuzz_target;
use string_doc::{Document, ParserConfig};

fuzz_target!(|data: &[u8]| {
    let config = ParserConfig {
        max_depth: 64,
        ..ParserConfig::default()
    };
    let Ok(doc) = Document::parse_bytes(data, &config) else {
        return;
    };
    let html = doc.to_html();
    if doc.structure().nodes().iter().all(|node| node.is_leaf()) {
        assert_eq!(html.as_bytes(), data, "unmarked input must render unchanged");
    }

    let _ = doc.title();
    for scope in doc.scopes() {
        let _ = scope.doc.text();
    }
    let copy = doc.duplicate();
    assert_eq!(copy.to_html(), html);
});
