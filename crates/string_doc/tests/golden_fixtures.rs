use std::env;
use std::path::{Path, PathBuf};
use string_doc::{Document, Node, Scope};
use string_doc_test_support::fixtures::{Op, Target, TemplateCase, load_fixture_file};
use string_doc_test_support::{diff_lines, escape_text, html_lines};

struct FixtureFilter {
    raw: Option<String>,
}

impl FixtureFilter {
    fn matches(&self, name: &str) -> bool {
        let Some(filter) = &self.raw else {
            return true;
        };
        name.contains(filter)
    }
}

fn fixture_filter() -> FixtureFilter {
    FixtureFilter {
        raw: env::var("STRING_DOC_FIXTURE").ok(),
    }
}

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/templates.toml")
}

fn resolve(doc: &Document, target: &Target, case: &str) -> Document {
    let found = if let Some(name) = &target.container {
        doc.container(name)
    } else if let Some(name) = &target.partial {
        doc.partial(name)
    } else if let Some(scope) = &target.scope {
        match &target.prop {
            Some(prop) => doc.prop(scope, prop).into_iter().nth(target.index),
            None => doc.scope(scope).into_iter().nth(target.index),
        }
    } else {
        Some(doc.clone())
    };
    found.unwrap_or_else(|| panic!("fixture '{case}': target {target:?} matched nothing"))
}

fn apply(doc: &Document, op: &Op, case: &str) {
    match op {
        Op::SetText { target, value } => resolve(doc, target, case).set_text(value),
        Op::SetHtml { target, value } => resolve(doc, target, case).set_html(value),
        Op::Append { target, value } => resolve(doc, target, case).append(value),
        Op::Prepend { target, value } => resolve(doc, target, case).prepend(value),
        Op::After { target, value } => resolve(doc, target, case).after(value),
        Op::Before { target, value } => resolve(doc, target, case).before(value),
        Op::Replace { target, value } => resolve(doc, target, case).replace(value),
        Op::Clear { target } => resolve(doc, target, case).clear(),
        Op::Remove { target } => resolve(doc, target, case).remove(),
        Op::SetAttribute { target, key, value } => {
            resolve(doc, target, case).set_attribute(key, value.as_str())
        }
        Op::RemoveAttribute { target, key } => resolve(doc, target, case).remove_attribute(key),
        Op::SetTitle { value } => doc.set_title(value),
    }
}

/// `name: prop, prop` per scope, indented by nesting; nested scopes appear
/// only under their parent.
fn scope_outline(doc: &Document) -> Vec<String> {
    fn focus(scope: &Scope) -> Option<Node> {
        scope.doc.node()
    }

    fn push(scope: &Scope, depth: usize, out: &mut Vec<String>) {
        let props: Vec<&str> = scope.props.iter().map(|p| p.name.as_str()).collect();
        let mut line = format!("{}{}", "  ".repeat(depth), scope.name);
        if !props.is_empty() {
            line.push_str(": ");
            line.push_str(&props.join(", "));
        }
        out.push(line);
        for nested in &scope.nested {
            push(nested, depth + 1, out);
        }
    }

    let all = doc.scopes();
    let mut nested_nodes = Vec::new();
    for scope in &all {
        collect_nested(scope, &mut nested_nodes);
    }
    let mut out = Vec::new();
    for scope in &all {
        let is_nested = focus(scope)
            .is_some_and(|node| nested_nodes.iter().any(|n: &Node| n.ptr_eq(&node)));
        if !is_nested {
            push(scope, 0, &mut out);
        }
    }
    out
}

fn collect_nested(scope: &Scope, out: &mut Vec<Node>) {
    for nested in &scope.nested {
        out.extend(nested.doc.node());
        collect_nested(nested, out);
    }
}

fn check_list(case: &TemplateCase, what: &str, expected: &Option<Vec<String>>, actual: Vec<String>) {
    if let Some(expected) = expected {
        assert!(
            expected == &actual,
            "fixture '{}' {what} mismatch\n{}",
            case.name,
            diff_lines(expected, &actual)
        );
    }
}

fn run_case(case: &TemplateCase) {
    let doc = Document::parse(&case.input)
        .unwrap_or_else(|err| panic!("fixture '{}' failed to parse: {err}", case.name));

    if let Some(expected) = &case.title {
        assert_eq!(
            doc.title().as_deref(),
            Some(expected.as_str()),
            "fixture '{}' title",
            case.name
        );
    }
    check_list(case, "scopes", &case.scopes, scope_outline(&doc));
    check_list(case, "containers", &case.containers, doc.containers().into_keys().collect());
    check_list(case, "partials", &case.partials, doc.partials().into_keys().collect());

    for op in &case.ops {
        apply(&doc, op, &case.name);
    }

    let actual = doc.to_html();
    let expected = case.expected_html();
    if actual != expected {
        panic!(
            "fixture '{}' rendered markup mismatch\n{}\nexpected: \"{}\"\n  actual: \"{}\"",
            case.name,
            diff_lines(&html_lines(expected), &html_lines(&actual)),
            escape_text(expected),
            escape_text(&actual)
        );
    }
}

#[test]
fn golden_template_fixtures() {
    let file = load_fixture_file(&fixture_path());
    let filter = fixture_filter();
    let mut ran = 0usize;
    for case in &file.cases {
        if !filter.matches(&case.name) {
            continue;
        }
        ran += 1;
        run_case(case);
    }
    assert!(ran > 0, "no fixtures matched filter");
}

#[test]
fn golden_fixtures_survive_a_duplicate() {
    let file = load_fixture_file(&fixture_path());
    for case in &file.cases {
        let doc = Document::parse(&case.input).expect("parse");
        let copy = doc.duplicate();
        for op in &case.ops {
            apply(&copy, op, &case.name);
        }
        assert_eq!(
            doc.to_html(),
            Document::parse(&case.input).expect("parse").to_html(),
            "fixture '{}': mutating a duplicate changed the source",
            case.name
        );
        assert_eq!(copy.to_html(), case.expected_html(), "fixture '{}'", case.name);
    }
}
