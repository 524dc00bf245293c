// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use bundle_headers::{MarkerInstance, MarkerKind};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Qualified name of a recognized marker kind
pub fn qualified(kind: MarkerKind) -> &'static str {
    kind.qualified_name()
}

/// A recognized marker with no fields set
pub fn marker(kind: MarkerKind) -> MarkerInstance {
    MarkerInstance::new(kind.qualified_name())
}

/// Scan file for a small web bundle
///
/// `com.example.Angular` is a meta-marker carrying a Require-Capability with
/// a `${version}` placeholder and a declared default of 1.3.
pub const WEB_SCAN: &str = r#"
[[types]]
name = "com.example.Angular"
kind = "marker"
defaults = { version = "1.3" }
markers = [
  { type = "aQute.bnd.annotation.headers.RequireCapability", values = { ns = "osgi.webresource", filter = "(&(osgi.webresource=/google/angular)(version>=${version}))" } },
]

[[types]]
name = "com.example.web.MySpace"
markers = [
  { type = "com.example.Angular", values = { version = "1.4" } },
  { type = "aQute.bnd.annotation.headers.BundleCategory", values = { custom = ["web"] } },
  { type = "aQute.bnd.annotation.headers.BundleCopyright", values = { value = "(c) ${@class-short} ${@version}" } },
]

[[types]]
name = "com.example.web.Plain"
markers = [
  { type = "com.example.Angular" },
  { type = "aQute.bnd.annotation.headers.ProvideCapability", values = { ns = "osgi.webresource", name = "/example/plain", version = "2.1" } },
]

[[types]]
name = "com.example.web.People"
markers = [
  { type = "aQute.bnd.annotation.headers.BundleDevelopers", values = { value = "jdoe", name = "Jane Doe", roles = ["architect"], timezone = 1 } },
  { type = "aQute.bnd.annotation.headers.BundleLicense", values = { name = "Apache-2.0", link = "https://www.apache.org/licenses/LICENSE-2.0" } },
  { type = "aQute.bnd.annotation.headers.BundleDocURL", values = { value = "https://${vendor}.example.org/docs" } },
]
"#;

/// Build configuration matching [`WEB_SCAN`]
pub const WEB_CONFIG: &str = r#"
[properties]
vendor = "acme"
"Bundle-Category" = "legacy"

[exported-packages."com.example.web"]
version = "2.0.1"
"#;

/// Temporary directory holding test input files
///
/// Keep the value alive for as long as the paths are used.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `content` to `name` inside the fixture directory
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
