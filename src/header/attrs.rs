// src/header/attrs.rs

//! Ordered attribute maps for a single clause

use crate::version::Version;
use std::fmt;

/// Suffix that marks an attribute key as a directive
pub const DIRECTIVE_SUFFIX: char = ':';

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Plain string attribute, rendered with `=`
    String(String),
    Long(i64),
    Double(f64),
    Version(Version),
    List(Vec<String>),
}

impl AttrValue {
    /// Whether this value renders as a typed attribute (`key:=value`)
    pub fn is_typed(&self) -> bool {
        !matches!(self, Self::String(_))
    }

    /// Textual form of the value, before any quoting
    pub fn text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Long(n) => n.to_string(),
            // Always keeps a fractional part, so 2.0 never reads as a Long
            Self::Double(d) => format!("{:?}", d),
            Self::Version(v) => v.to_string(),
            Self::List(items) => items.join(","),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Version> for AttrValue {
    fn from(v: Version) -> Self {
        Self::Version(v)
    }
}

/// How an attribute is assigned in the rendered clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignOp {
    /// `key=value`
    Plain,
    /// `key:=value`, used by directives and typed attributes
    Colon,
}

/// A rendered-level view of one clause entry, used to compare clauses
/// independently of the typed representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Assignment {
    pub key: String,
    pub op: AssignOp,
    pub value: String,
}

/// Ordered key/value attributes of one clause
///
/// Insertion order is preserved. Replacing an existing key keeps its
/// position; new keys are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    entries: Vec<(String, AttrValue)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Textual form of an attribute, whatever its type
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).map(AttrValue::text)
    }

    /// Insert or replace an attribute
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert a directive; the directive suffix is added to the key
    pub fn insert_directive(&mut self, name: &str, value: impl Into<String>) {
        self.insert(format!("{}{}", name, DIRECTIVE_SUFFIX), AttrValue::String(value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut AttrValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into the assignments the rendered clause will contain
    pub fn assignments(&self) -> Vec<Assignment> {
        self.entries
            .iter()
            .map(|(key, value)| match key.strip_suffix(DIRECTIVE_SUFFIX) {
                Some(name) => Assignment {
                    key: name.to_string(),
                    op: AssignOp::Colon,
                    value: value.text(),
                },
                None => Assignment {
                    key: key.clone(),
                    op: if value.is_typed() {
                        AssignOp::Colon
                    } else {
                        AssignOp::Plain
                    },
                    value: value.text(),
                },
            })
            .collect()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl fmt::Display for Attrs {
    /// Renders `key=value;dir:=value;typed:=value` without a leading separator
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, assignment) in self.assignments().iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            let op = match assignment.op {
                AssignOp::Plain => "=",
                AssignOp::Colon => ":=",
            };
            write!(f, "{}{}{}", assignment.key, op, super::quote(&assignment.value))?;
        }
        Ok(())
    }
}
