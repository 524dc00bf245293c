// src/config.rs

//! Build configuration
//!
//! Everything the header pass needs from the surrounding build besides the
//! types themselves:
//!
//! ```toml
//! [properties]
//! "Bundle-License" = "EPL-1.0"
//! vendor = "Example"
//!
//! [exported-packages."com.example.api"]
//! version = "1.2.0"
//!
//! [contained-packages."com.example.impl"]
//! version = "0.9"
//! ```

use crate::error::{Error, Result};
use crate::macros::Properties;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Attributes recorded for a package, e.g. its `version`
pub type PackageAttrs = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Build properties: pre-existing header values and macro variables
    #[serde(default)]
    pub properties: Properties,

    /// Packages exported by the build's classpath
    #[serde(default)]
    pub exported_packages: BTreeMap<String, PackageAttrs>,

    /// Packages contained in the bundle being built
    #[serde(default)]
    pub contained_packages: BTreeMap<String, PackageAttrs>,
}

impl BuildConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: BuildConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let packages = self
            .exported_packages
            .keys()
            .chain(self.contained_packages.keys());
        for name in packages {
            if name.trim().is_empty() {
                return Err(Error::Config("Empty package name".to_string()));
            }
        }
        Ok(())
    }

    /// Pre-existing value of a property, typically a header
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Version of a package: exported table first, then contained table
    pub fn package_version(&self, package: &str) -> Option<&str> {
        self.exported_packages
            .get(package)
            .or_else(|| self.contained_packages.get(package))
            .and_then(|attrs| attrs.get("version"))
            .map(String::as_str)
    }
}
