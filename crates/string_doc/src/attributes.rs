//! Attribute keys and the ordered attribute map carried by structured nodes.
//!
//! Keys are canonicalised once, at the map boundary: `"data-scope"`,
//! `"DATA-SCOPE"` and [`AttrKey::Scope`] all address the same entry. The four
//! binding markers get their own variants; every other name is kept
//! ASCII-lowercased in [`AttrKey::Other`].

use std::borrow::Cow;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrKey {
    /// `data-scope`: the node opens a binding scope.
    Scope,
    /// `data-prop`: the node is a property of its nearest enclosing scope.
    Prop,
    /// `container` (markup: `data-container`): a named composition slot.
    Container,
    /// `partial` (markup: `data-partial`): a named reusable fragment.
    Partial,
    Other(Box<str>),
}

impl AttrKey {
    pub fn new(name: &str) -> Self {
        let name: Cow<'_, str> = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(name)
        };
        match name.as_ref() {
            "data-scope" => AttrKey::Scope,
            "data-prop" => AttrKey::Prop,
            "data-container" | "container" => AttrKey::Container,
            "data-partial" | "partial" => AttrKey::Partial,
            _ => AttrKey::Other(name.into_owned().into_boxed_str()),
        }
    }

    /// Name written back into markup by the renderer.
    pub fn markup_name(&self) -> &str {
        match self {
            AttrKey::Scope => "data-scope",
            AttrKey::Prop => "data-prop",
            AttrKey::Container => "data-container",
            AttrKey::Partial => "data-partial",
            AttrKey::Other(name) => name,
        }
    }

    /// True for the four keys that turn an element into a binding point.
    pub fn is_binding(&self) -> bool {
        !matches!(self, AttrKey::Other(_))
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.markup_name())
    }
}

impl From<&str> for AttrKey {
    fn from(name: &str) -> Self {
        AttrKey::new(name)
    }
}

impl From<String> for AttrKey {
    fn from(name: String) -> Self {
        AttrKey::new(&name)
    }
}

impl From<&String> for AttrKey {
    fn from(name: &String) -> Self {
        AttrKey::new(name)
    }
}

impl From<&AttrKey> for AttrKey {
    fn from(key: &AttrKey) -> Self {
        key.clone()
    }
}

/// Insertion-ordered attribute map with unique keys.
///
/// A `None` value is a bare attribute (`<input disabled>`); lookups report it
/// as the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(AttrKey, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &AttrKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &AttrKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// Set `key`, keeping its position when it already exists.
    pub fn set(&mut self, key: AttrKey, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert only when `key` is not present yet. Returns whether it was inserted.
    ///
    /// Markup with a repeated attribute keeps the first occurrence.
    pub fn insert_new(&mut self, key: AttrKey, value: Option<String>) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn remove(&mut self, key: &AttrKey) -> Option<Option<String>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k, v.as_deref()))
    }

    /// True when any binding marker is present.
    pub fn has_binding(&self) -> bool {
        self.entries.iter().any(|(k, _)| k.is_binding())
    }
}
