// src/clause/descriptive.rs

//! Translators for descriptive headers: category, doc URL, copyright,
//! developers and contributors

use super::{required_str, MarkerError};
use crate::header::escape_into;
use crate::marker::{MarkerInstance, MarkerKind, MarkerValue};

/// Quoted person attributes, in output order
const PERSON_ATTRIBUTES: &[&str] = &["name", "roles", "organizationUrl", "organization"];

/// One value per custom category followed by one per category constant
pub(super) fn category(marker: &MarkerInstance) -> Vec<String> {
    ["custom", "value"]
        .iter()
        .filter_map(|field| marker.get(field))
        .flat_map(MarkerValue::as_strs)
        .collect()
}

/// The `value` field, passed through unchanged
pub(super) fn single_value(marker: &MarkerInstance) -> Vec<String> {
    marker
        .get("value")
        .map(|v| vec![v.to_string()])
        .unwrap_or_default()
}

/// `id;name='..';roles='..';organizationUrl='..';organization='..';timezone=N`
///
/// A timezone of 0 means unspecified and is left out.
pub(super) fn person(marker: &MarkerInstance, kind: MarkerKind) -> Result<String, MarkerError> {
    let mut out = required_str(marker, kind, "value")?.to_string();

    for attribute in PERSON_ATTRIBUTES {
        if let Some(value) = marker.get(attribute) {
            out.push(';');
            out.push_str(attribute);
            out.push_str("='");
            escape_into(&mut out, &value.to_string());
            out.push('\'');
        }
    }

    if let Some(tz) = marker
        .get("timezone")
        .and_then(MarkerValue::as_long)
        .filter(|tz| *tz != 0)
    {
        out.push_str(&format!(";timezone={}", tz));
    }

    Ok(out)
}
