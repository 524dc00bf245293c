// src/marker/instance.rs

//! Marker occurrences and their element values

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single marker element value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerValue {
    Bool(bool),
    Long(i64),
    Double(f64),
    Str(String),
    Strs(Vec<String>),
}

impl MarkerValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Strings of an array element; a lone string counts as one item
    pub fn as_strs(&self) -> Vec<String> {
        match self {
            Self::Strs(items) => items.clone(),
            Self::Str(s) => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for MarkerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Long(n) => write!(f, "{}", n),
            Self::Double(d) => write!(f, "{}", d),
            Self::Str(s) => f.write_str(s),
            Self::Strs(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for MarkerValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for MarkerValue {
    fn from(n: i64) -> Self {
        Self::Long(n)
    }
}

impl From<Vec<&str>> for MarkerValue {
    fn from(items: Vec<&str>) -> Self {
        Self::Strs(items.into_iter().map(String::from).collect())
    }
}

/// Ordered element map of a marker
///
/// Order is the declaration order seen by type discovery; it decides the
/// attribute order of generated clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Elements(Vec<(String, MarkerValue)>);

impl Elements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MarkerValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace, keeping the position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MarkerValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MarkerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<MarkerValue>> FromIterator<(K, V)> for Elements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut elements = Elements::new();
        for (k, v) in iter {
            elements.insert(k, v);
        }
        elements
    }
}

impl Serialize for Elements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Elements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ElementsVisitor;

        impl<'de> Visitor<'de> for ElementsVisitor {
            type Value = Elements;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of marker element values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Elements, A::Error> {
                let mut elements = Elements::new();
                while let Some((key, value)) = access.next_entry::<String, MarkerValue>()? {
                    elements.insert(key, value);
                }
                Ok(elements)
            }
        }

        deserializer.deserialize_map(ElementsVisitor)
    }
}

/// One occurrence of a marker on a type or on a marker declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerInstance {
    /// Qualified name of the marker type, recognized or not
    #[serde(rename = "type")]
    pub name: String,

    #[serde(default)]
    pub values: Elements,
}

impl MarkerInstance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Elements::new(),
        }
    }

    /// Builder-style element insertion
    pub fn with(mut self, key: &str, value: impl Into<MarkerValue>) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MarkerValue> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MarkerValue::as_str)
    }

    /// Overlay the values of a use-site instance onto this declaring-site
    /// instance. Use-site values win key by key. Shallow: values are never
    /// themselves inspected for further markers.
    pub fn merge(&mut self, use_site: &MarkerInstance) {
        for (key, value) in use_site.values.iter() {
            self.values.insert(key, value.clone());
        }
    }

    /// Fill keys that are still absent from the declaring type's defaults
    pub fn add_defaults(&mut self, defaults: &Elements) {
        for (key, value) in defaults.iter() {
            if !self.values.contains_key(key) {
                self.values.insert(key, value.clone());
            }
        }
    }
}
