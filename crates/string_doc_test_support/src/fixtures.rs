//! Golden template fixtures stored as TOML.
//!
//! ```toml
//! format = "string-doc-templates-v1"
//!
//! [[cases]]
//! name = "post-title"
//! input = '<div data-scope="post"><h1 data-prop="title">Hello</h1></div>'
//! scopes = ["post: title"]
//! expected_html = '<div data-scope="post"><h1 data-prop="title">Bye</h1></div>'
//!
//! [[cases.ops]]
//! op = "set_text"
//! target = { scope = "post", prop = "title" }
//! value = "Bye"
//! ```

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const TEMPLATE_FIXTURES_FORMAT_V1: &str = "string-doc-templates-v1";

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureFile {
    pub format: String,
    #[serde(default)]
    pub cases: Vec<TemplateCase>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateCase {
    pub name: String,
    pub input: String,
    /// Expected `title()`. Absent means the title is not checked; `""` is an empty title.
    pub title: Option<String>,
    /// Scope outline: one line per scope, two spaces of indent per nesting
    /// level, `name: prop, prop`.
    pub scopes: Option<Vec<String>>,
    pub containers: Option<Vec<String>>,
    pub partials: Option<Vec<String>>,
    #[serde(default)]
    pub ops: Vec<Op>,
    /// Rendered markup after `ops`. Defaults to `input`.
    pub expected_html: Option<String>,
}

impl TemplateCase {
    pub fn expected_html(&self) -> &str {
        self.expected_html.as_deref().unwrap_or(&self.input)
    }
}

/// Selects the view an op applies to. An empty target is the whole document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Target {
    pub scope: Option<String>,
    pub prop: Option<String>,
    pub container: Option<String>,
    pub partial: Option<String>,
    /// Which match, when a scope or prop lookup returns several.
    pub index: usize,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    SetText {
        #[serde(default)]
        target: Target,
        value: String,
    },
    SetHtml {
        #[serde(default)]
        target: Target,
        value: String,
    },
    Append {
        #[serde(default)]
        target: Target,
        value: String,
    },
    Prepend {
        #[serde(default)]
        target: Target,
        value: String,
    },
    After {
        #[serde(default)]
        target: Target,
        value: String,
    },
    Before {
        #[serde(default)]
        target: Target,
        value: String,
    },
    Replace {
        #[serde(default)]
        target: Target,
        value: String,
    },
    Clear {
        #[serde(default)]
        target: Target,
    },
    Remove {
        #[serde(default)]
        target: Target,
    },
    SetAttribute {
        #[serde(default)]
        target: Target,
        key: String,
        value: String,
    },
    RemoveAttribute {
        #[serde(default)]
        target: Target,
        key: String,
    },
    SetTitle {
        value: String,
    },
}

/// Load and validate a fixture file. Panics with the path on any problem.
pub fn load_fixture_file(path: &Path) -> FixtureFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture file {path:?}: {err}"));
    let file: FixtureFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture file {path:?}: {err}"));
    assert_eq!(
        file.format, TEMPLATE_FIXTURES_FORMAT_V1,
        "unsupported fixture format in {path:?}"
    );
    let mut seen = BTreeSet::new();
    for case in &file.cases {
        assert!(
            seen.insert(case.name.as_str()),
            "duplicate fixture name in {path:?}: {}",
            case.name
        );
    }
    file
}
