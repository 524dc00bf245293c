// src/clause/capability.rs

//! Translators for markers that produce full clauses: license and the two
//! capability kinds

use super::{directives_and_version, extract_attrs, required_str, MarkerError};
use crate::header::Clause;
use crate::marker::{MarkerInstance, MarkerKind};
use crate::substitute::substitute;

const FILTER_DIRECTIVE: &str = "filter:";

/// `name;description=..;link=..`
pub(super) fn license(marker: &MarkerInstance) -> Result<Clause, MarkerError> {
    let name = required_str(marker, MarkerKind::License, "name")?;
    Ok(Clause::new(name, extract_attrs(marker, &["name"])))
}

/// Require-Capability clause
///
/// `filter`, `effective` and `resolution` become directives, `version`
/// becomes a typed version. Local placeholders are substituted before an
/// empty filter is dropped. A non-blank `extra` is appended as free text.
pub(super) fn require_capability(marker: &MarkerInstance) -> Result<Clause, MarkerError> {
    let ns = required_str(marker, MarkerKind::RequireCapability, "ns")?;
    let mut attrs = extract_attrs(marker, &["ns", "extra"]);
    directives_and_version(&mut attrs, &["filter", "effective", "resolution"])?;
    substitute(&mut attrs)?;

    if attrs
        .get_text(FILTER_DIRECTIVE)
        .is_some_and(|filter| filter.is_empty())
    {
        attrs.remove(FILTER_DIRECTIVE);
    }

    let clause = Clause::new(ns, attrs);
    let extra = marker
        .get_str("extra")
        .map(str::trim)
        .filter(|extra| !extra.is_empty());
    Ok(match extra {
        Some(extra) => clause.with_trailing(extra),
        None => clause,
    })
}

/// Provide-Capability clause
///
/// A `name` field is re-keyed under the namespace itself. `value` is free
/// text appended after the attributes, never quoted.
pub(super) fn provide_capability(marker: &MarkerInstance) -> Result<Clause, MarkerError> {
    let ns = required_str(marker, MarkerKind::ProvideCapability, "ns")?;
    let mut attrs = extract_attrs(marker, &["ns"]);

    if let Some(name) = attrs.remove("name") {
        attrs.insert(ns, name);
    }
    let value = attrs.remove("value").map(|v| v.text());
    directives_and_version(&mut attrs, &["uses", "mandatory", "effective"])?;

    let clause = Clause::new(ns, attrs);
    Ok(match value.filter(|v| !v.is_empty()) {
        Some(text) => clause.with_trailing(text),
        None => clause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{parse_clause, AssignOp};
    use crate::marker::MarkerValue;

    fn require() -> MarkerInstance {
        MarkerInstance::new(MarkerKind::RequireCapability.qualified_name())
    }

    fn provide() -> MarkerInstance {
        MarkerInstance::new(MarkerKind::ProvideCapability.qualified_name())
    }

    #[test]
    fn test_provide_webresource() {
        let marker = provide()
            .with("ns", "osgi.webresource")
            .with("name", "/google/angular")
            .with("version", "1.0");
        let clause = provide_capability(&marker).unwrap();
        assert_eq!(
            clause.to_string(),
            "osgi.webresource;osgi.webresource=/google/angular;version:=1.0.0"
        );
    }

    #[test]
    fn test_provide_directives_and_value() {
        let marker = provide()
            .with("ns", "osgi.service")
            .with("uses", vec!["a.b", "c.d"])
            .with("value", "objectClass:List<String>=\"x.Y\"");
        let clause = provide_capability(&marker).unwrap();
        assert_eq!(
            clause.to_string(),
            "osgi.service;uses:='a.b,c.d';objectClass:List<String>=\"x.Y\""
        );
    }

    #[test]
    fn test_provide_mandatory_effective_directives() {
        let marker = provide()
            .with("ns", "x")
            .with("mandatory", vec!["a"])
            .with("effective", "active");
        let rendered = provide_capability(&marker).unwrap().to_string();
        assert_eq!(rendered, "x;mandatory:=a;effective:=active");

        let parsed = parse_clause(&rendered).unwrap();
        assert_eq!(parsed.get("mandatory").unwrap().op, AssignOp::Colon);
        assert_eq!(parsed.get("effective").unwrap().op, AssignOp::Colon);
    }

    #[test]
    fn test_provide_empty_value_not_appended() {
        let marker = provide().with("ns", "x").with("value", "");
        assert_eq!(provide_capability(&marker).unwrap().to_string(), "x");
    }

    #[test]
    fn test_provide_bad_version() {
        let marker = provide().with("ns", "x").with("version", "1.x");
        assert!(matches!(
            provide_capability(&marker),
            Err(MarkerError::MalformedVersion { .. })
        ));
    }

    #[test]
    fn test_require_filter_directive() {
        let marker = require()
            .with("ns", "osgi.extender")
            .with("filter", "(osgi.extender=osgi.component)")
            .with("resolution", "optional");
        let rendered = require_capability(&marker).unwrap().to_string();
        assert_eq!(
            rendered,
            "osgi.extender;filter:='(osgi.extender=osgi.component)';resolution:=optional"
        );
        let parsed = parse_clause(&rendered).unwrap();
        assert_eq!(parsed.get("filter").unwrap().op, AssignOp::Colon);
    }

    #[test]
    fn test_require_effective_directive() {
        let marker = require()
            .with("ns", "osgi.extender")
            .with("effective", "active")
            .with("filter", "(osgi.extender=x)");
        assert_eq!(
            require_capability(&marker).unwrap().to_string(),
            "osgi.extender;filter:='(osgi.extender=x)';effective:=active"
        );
    }

    #[test]
    fn test_require_empty_filter_dropped() {
        let marker = require().with("ns", "osgi.ee").with("filter", "");
        let clause = require_capability(&marker).unwrap();
        assert!(!clause.attrs.contains_key("filter:"));
        assert_eq!(clause.to_string(), "osgi.ee");
    }

    #[test]
    fn test_require_substitutes_local_placeholders() {
        let marker = require()
            .with("ns", "osgi.webresource")
            .with("filter", "(&(osgi.webresource=/angular)(version>=${version}))")
            .with("version", "1.3");
        let clause = require_capability(&marker).unwrap();
        assert_eq!(
            clause.attrs.get_text("filter:").as_deref(),
            Some("(&(osgi.webresource=/angular)(version>=1.3.0))")
        );
    }

    #[test]
    fn test_require_placeholder_to_empty_filter() {
        let marker = require()
            .with("ns", "x")
            .with("f", "")
            .with("filter", "${f}");
        let clause = require_capability(&marker).unwrap();
        assert!(!clause.attrs.contains_key("filter:"));
    }

    #[test]
    fn test_require_nested_placeholder_fails() {
        let marker = require()
            .with("ns", "x")
            .with("a", "${b}")
            .with("filter", "(x=${a})");
        assert!(matches!(
            require_capability(&marker),
            Err(MarkerError::NestedSubstitutionNotPermitted { .. })
        ));
    }

    #[test]
    fn test_require_extra_appended() {
        let marker = require()
            .with("ns", "x")
            .with("extra", "  cardinality:=multiple ");
        assert_eq!(
            require_capability(&marker).unwrap().to_string(),
            "x;cardinality:=multiple"
        );
    }

    #[test]
    fn test_missing_namespace() {
        let marker = require().with("filter", "(a=b)");
        assert_eq!(
            require_capability(&marker),
            Err(MarkerError::MissingField {
                kind: "Require-Capability",
                field: "ns"
            })
        );
    }

    #[test]
    fn test_license() {
        let marker = MarkerInstance::new(MarkerKind::License.qualified_name())
            .with("name", "Apache-2.0")
            .with("description", "Apache License, Version 2.0")
            .with("link", "http://www.apache.org/licenses/LICENSE-2.0");
        assert_eq!(
            license(&marker).unwrap().to_string(),
            "Apache-2.0;description='Apache License, Version 2.0';link=http://www.apache.org/licenses/LICENSE-2.0"
        );
    }

    #[test]
    fn test_numeric_fields_are_typed() {
        let marker = provide()
            .with("ns", "x")
            .with("priority", MarkerValue::Long(5));
        assert_eq!(provide_capability(&marker).unwrap().to_string(), "x;priority:=5");
    }
}
