// src/scan/mod.rs

//! Type discovery
//!
//! The resolver does not read compiled types itself. It asks a
//! [`TypeSpace`] for the types in scope, for the declaration of a marker
//! type, and for the markers attached to that declaration. [`ScanSpace`] is
//! the in-memory implementation backed by a scan file:
//!
//! ```toml
//! [[types]]
//! name = "com.example.Angular"
//! kind = "marker"
//! defaults = { version = "1.3" }
//! markers = [
//!   { type = "aQute.bnd.annotation.headers.RequireCapability", values = { ns = "osgi.webresource", filter = "(version>=${version})" } },
//! ]
//!
//! [[types]]
//! name = "com.example.MySpace"
//! markers = [{ type = "com.example.Angular" }]
//! ```

use crate::error::{Error, Result};
use crate::marker::{Elements, MarkerInstance};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// What sort of type a [`TypeDef`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    /// A marker declaration; never a subject of header generation itself
    Marker,
}

/// A compiled type in the build's scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Fully qualified name, e.g. `com.example.MySpace`
    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,

    /// Markers attached directly to the type, in discovery order
    #[serde(default)]
    pub markers: Vec<MarkerInstance>,

    /// Element defaults declared by a marker type
    #[serde(default)]
    pub defaults: Elements,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            markers: Vec::new(),
            defaults: Elements::new(),
        }
    }

    /// Declare a marker type
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Marker,
            ..Self::new(name)
        }
    }

    pub fn with_marker(mut self, marker: MarkerInstance) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_default(mut self, key: &str, value: impl Into<crate::marker::MarkerValue>) -> Self {
        self.defaults.insert(key, value);
        self
    }

    pub fn is_marker(&self) -> bool {
        self.kind == TypeKind::Marker
    }

    /// Simple name without the package
    pub fn short_name(&self) -> &str {
        self.name.rsplit_once('.').map_or(self.name.as_str(), |(_, short)| short)
    }

    /// Owning package; empty for the default package
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(pkg, _)| pkg)
    }
}

/// Access to the types of one build
pub trait TypeSpace {
    /// Types in scope, in discovery order
    fn types(&self) -> Result<Vec<&TypeDef>>;

    /// Find a type by qualified name, in or out of scope
    fn find_type(&self, name: &str) -> Result<Option<&TypeDef>>;

    /// Markers attached to the declaration of `ty`
    ///
    /// Implementations that read types lazily force a full parse here.
    fn declared_markers(&self, ty: &TypeDef) -> Result<Vec<MarkerInstance>> {
        Ok(ty.markers.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ScanFile {
    #[serde(default)]
    types: Vec<TypeDef>,

    /// Types visible for lookup but not part of the build's scope
    #[serde(default)]
    classpath: Vec<TypeDef>,
}

/// In-memory type space
#[derive(Debug, Clone, Default)]
pub struct ScanSpace {
    types: Vec<TypeDef>,
    classpath: Vec<TypeDef>,
    index: HashMap<String, (bool, usize)>,
}

impl ScanSpace {
    pub fn new(types: Vec<TypeDef>) -> Self {
        Self::with_classpath(types, Vec::new())
    }

    pub fn with_classpath(types: Vec<TypeDef>, classpath: Vec<TypeDef>) -> Self {
        let mut index = HashMap::new();
        // In-scope types shadow classpath types of the same name
        for (i, ty) in classpath.iter().enumerate() {
            index.insert(ty.name.clone(), (false, i));
        }
        for (i, ty) in types.iter().enumerate() {
            index.insert(ty.name.clone(), (true, i));
        }
        Self {
            types,
            classpath,
            index,
        }
    }

    /// Parse a scan file in TOML format
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ScanFile = toml::from_str(content)?;
        Ok(Self::with_classpath(file.types, file.classpath))
    }

    /// Parse a scan file in JSON format
    pub fn from_json(content: &str) -> Result<Self> {
        let file: ScanFile = serde_json::from_str(content)?;
        Ok(Self::with_classpath(file.types, file.classpath))
    }

    /// Load a scan file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let space = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)?,
            Some("toml") | None => Self::from_toml(&content)?,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Unsupported scan file extension '{}': {}",
                    other,
                    path.display()
                )));
            }
        };
        debug!(
            "Loaded {} types ({} on classpath) from {}",
            space.types.len(),
            space.classpath.len(),
            path.display()
        );
        Ok(space)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeSpace for ScanSpace {
    fn types(&self) -> Result<Vec<&TypeDef>> {
        Ok(self.types.iter().collect())
    }

    fn find_type(&self, name: &str) -> Result<Option<&TypeDef>> {
        Ok(self.index.get(name).map(|&(in_scope, i)| {
            if in_scope {
                &self.types[i]
            } else {
                &self.classpath[i]
            }
        }))
    }
}
