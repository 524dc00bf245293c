// src/clause/mod.rs
//! Marker to clause translation
//!
//! Each recognized [`MarkerKind`] has a translator that turns a (possibly
//! merged) marker instance into zero or more header values. Values are
//! returned unexpanded; macro expansion happens when they are accumulated.

mod capability;
mod descriptive;
mod error;

pub use error::MarkerError;

use crate::header::{AttrValue, Attrs};
use crate::marker::{MarkerInstance, MarkerKind, MarkerValue};
use crate::version::Version;

/// Translate a marker of a recognized kind into header values
pub fn translate(kind: MarkerKind, marker: &MarkerInstance) -> Result<Vec<String>, MarkerError> {
    check_fields(kind, marker)?;
    let values = match kind {
        MarkerKind::License => vec![capability::license(marker)?.to_string()],
        MarkerKind::RequireCapability => {
            vec![capability::require_capability(marker)?.to_string()]
        }
        MarkerKind::ProvideCapability => {
            vec![capability::provide_capability(marker)?.to_string()]
        }
        MarkerKind::Category => descriptive::category(marker),
        MarkerKind::DocUrl | MarkerKind::Copyright => descriptive::single_value(marker),
        MarkerKind::Developers | MarkerKind::Contributors => {
            vec![descriptive::person(marker, kind)?]
        }
    };
    Ok(values)
}

/// Check the elements declared by the kind's schema against their types
///
/// Elements the schema does not name are free attributes and pass as is.
pub fn check_fields(kind: MarkerKind, marker: &MarkerInstance) -> Result<(), MarkerError> {
    for (key, value) in marker.values.iter() {
        let Some(spec) = kind.field(key) else {
            continue;
        };
        if !spec.ty.accepts(value) {
            return Err(MarkerError::FieldType {
                kind: kind.header(),
                field: spec.name,
                expected: spec.ty,
            });
        }
    }
    Ok(())
}

/// Build attributes from every marker element except `ignore`
pub fn extract_attrs(marker: &MarkerInstance, ignore: &[&str]) -> Attrs {
    let mut attrs = Attrs::new();
    for (key, value) in marker.values.iter() {
        if ignore.contains(&key) {
            continue;
        }
        let value = match value {
            MarkerValue::Str(s) => AttrValue::String(s.clone()),
            MarkerValue::Bool(b) => AttrValue::String(b.to_string()),
            MarkerValue::Long(n) => AttrValue::Long(*n),
            MarkerValue::Double(d) => AttrValue::Double(*d),
            MarkerValue::Strs(items) => AttrValue::List(items.clone()),
        };
        attrs.insert(key, value);
    }
    attrs
}

/// Move the named attributes to directive form and retype `version`
fn directives_and_version(attrs: &mut Attrs, directives: &[&str]) -> Result<(), MarkerError> {
    for directive in directives {
        if let Some(value) = attrs.remove(directive) {
            attrs.insert_directive(directive, value.text());
        }
    }

    if let Some(raw) = attrs.remove("version") {
        let raw = raw.text();
        let version = Version::parse(&raw).map_err(|source| MarkerError::MalformedVersion {
            value: raw.clone(),
            source,
        })?;
        attrs.insert("version", version);
    }
    Ok(())
}

fn required_str<'a>(
    marker: &'a MarkerInstance,
    kind: MarkerKind,
    field: &'static str,
) -> Result<&'a str, MarkerError> {
    marker.get_str(field).ok_or(MarkerError::MissingField {
        kind: kind.header(),
        field,
    })
}
