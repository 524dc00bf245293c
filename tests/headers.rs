// tests/headers.rs

//! End-to-end header generation from scan and configuration files.

mod common;

use bundle_headers::header::{
    AssignOp, BUNDLE_CATEGORY, BUNDLE_COPYRIGHT, BUNDLE_DEVELOPERS, BUNDLE_DOCURL, BUNDLE_LICENSE,
    PROVIDE_CAPABILITY, REQUIRE_CAPABILITY,
};
use bundle_headers::{
    generate_headers, parse_header, BuildConfig, MarkerError, MarkerInstance, MarkerKind,
    ScanSpace, TypeDef,
};
use common::{marker, qualified, Fixture, WEB_CONFIG, WEB_SCAN};

fn web_analysis() -> bundle_headers::Analysis {
    let fixture = Fixture::new();
    let scan = fixture.write("scan.toml", WEB_SCAN);
    let config = fixture.write("build.toml", WEB_CONFIG);

    let space = ScanSpace::from_file(&scan).unwrap();
    let config = BuildConfig::from_file(&config).unwrap();
    generate_headers(&space, &config).unwrap()
}

#[test]
fn test_meta_marker_use_sites() {
    let analysis = web_analysis();
    assert_eq!(
        analysis.header(REQUIRE_CAPABILITY).as_deref(),
        Some(concat!(
            "osgi.webresource;filter:='(&(osgi.webresource=/google/angular)(version>=1.3.0))';version:=1.3.0,",
            "osgi.webresource;filter:='(&(osgi.webresource=/google/angular)(version>=1.4.0))';version:=1.4.0"
        ))
    );
}

#[test]
fn test_provide_capability_from_file() {
    let analysis = web_analysis();
    assert_eq!(
        analysis.header(PROVIDE_CAPABILITY).as_deref(),
        Some("osgi.webresource;osgi.webresource=/example/plain;version:=2.1.0")
    );
}

#[test]
fn test_existing_property_comes_first() {
    let analysis = web_analysis();
    assert_eq!(analysis.header(BUNDLE_CATEGORY).as_deref(), Some("legacy,web"));
}

#[test]
fn test_type_context_and_package_version() {
    let analysis = web_analysis();
    assert_eq!(
        analysis.header(BUNDLE_COPYRIGHT).as_deref(),
        Some("(c) MySpace 2.0.1")
    );
}

#[test]
fn test_descriptive_headers() {
    let analysis = web_analysis();
    assert_eq!(
        analysis.header(BUNDLE_DEVELOPERS).as_deref(),
        Some("jdoe;name='Jane Doe';roles='architect';timezone=1")
    );
    assert_eq!(
        analysis.header(BUNDLE_LICENSE).as_deref(),
        Some("Apache-2.0;link=https://www.apache.org/licenses/LICENSE-2.0")
    );
    assert_eq!(
        analysis.header(BUNDLE_DOCURL).as_deref(),
        Some("https://acme.example.org/docs")
    );
    assert!(analysis.diagnostics().is_empty());
}

#[test]
fn test_generated_header_parses_back() {
    let analysis = web_analysis();
    let header = analysis.header(REQUIRE_CAPABILITY).unwrap();
    let clauses = parse_header(&header).unwrap();
    assert_eq!(clauses.len(), 2);

    let filter = clauses[1].get("filter").unwrap();
    assert_eq!(filter.op, AssignOp::Colon);
    assert_eq!(
        filter.value,
        "(&(osgi.webresource=/google/angular)(version>=1.4.0))"
    );
    assert_eq!(clauses[1].get("version").unwrap().value, "1.4.0");
}

#[test]
fn test_json_scan_file() {
    let fixture = Fixture::new();
    let scan = fixture.write(
        "scan.json",
        r#"{
          "types": [
            {
              "name": "a.B",
              "markers": [
                {
                  "type": "aQute.bnd.annotation.headers.BundleCategory",
                  "values": { "custom": ["web", "osgi"] }
                }
              ]
            }
          ]
        }"#,
    );
    let space = ScanSpace::from_file(&scan).unwrap();
    let analysis = generate_headers(&space, &BuildConfig::default()).unwrap();
    assert_eq!(analysis.header(BUNDLE_CATEGORY).as_deref(), Some("osgi,web"));
}

#[test]
fn test_meta_marker_declared_on_classpath() {
    let declaration = TypeDef::marker("lib.Licensed").with_marker(
        marker(MarkerKind::License)
            .with("name", "EPL-2.0")
            .with("description", "Eclipse Public License"),
    );
    let space = ScanSpace::with_classpath(
        vec![TypeDef::new("app.Main").with_marker(MarkerInstance::new("lib.Licensed"))],
        vec![declaration],
    );
    let analysis = generate_headers(&space, &BuildConfig::default()).unwrap();
    assert_eq!(
        analysis.header(BUNDLE_LICENSE).as_deref(),
        Some("EPL-2.0;description='Eclipse Public License'")
    );
}

#[test]
fn test_missing_field_is_reported() {
    let space = ScanSpace::new(vec![
        TypeDef::new("a.NoId").with_marker(
            MarkerInstance::new(qualified(MarkerKind::Contributors)).with("name", "Anon"),
        ),
    ]);
    let analysis = generate_headers(&space, &BuildConfig::default()).unwrap();
    assert_eq!(analysis.header("Bundle-Contributors"), None);
    assert_eq!(
        analysis.diagnostics()[0].error,
        MarkerError::MissingField {
            kind: "Bundle-Contributors",
            field: "value"
        }
    );
}
