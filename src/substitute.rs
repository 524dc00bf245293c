// src/substitute.rs

//! Local placeholder substitution inside a single clause
//!
//! `${name}` in an attribute value is replaced by the value of attribute
//! `name` of the same clause. Only one level is allowed: a value that is
//! itself a placeholder carrier cannot be substituted. Placeholders naming
//! keys that are not in the clause are left untouched so the wider macro
//! pass can still resolve them.

use crate::clause::MarkerError;
use crate::header::{AttrValue, Attrs};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static SIMPLE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_$][A-Za-z0-9_$]*)\}").unwrap());

/// Whether a string contains a `${identifier}` placeholder
pub fn has_placeholder(s: &str) -> bool {
    SIMPLE_PARAM.is_match(s)
}

/// Substitute placeholders in every value of `attrs`
///
/// Lookups see the values as they were before this pass, so the result does
/// not depend on attribute order.
pub fn substitute(attrs: &mut Attrs) -> Result<(), MarkerError> {
    let snapshot: HashMap<String, String> = attrs
        .iter()
        .map(|(k, v)| (k.to_string(), v.text()))
        .collect();

    for (_, value) in attrs.iter_mut() {
        match value {
            AttrValue::String(s) => {
                if let Some(replaced) = replace_in(s, &snapshot)? {
                    *s = replaced;
                }
            }
            AttrValue::List(items) => {
                for item in items.iter_mut() {
                    if let Some(replaced) = replace_in(item, &snapshot)? {
                        *item = replaced;
                    }
                }
            }
            AttrValue::Long(_) | AttrValue::Double(_) | AttrValue::Version(_) => {}
        }
    }
    Ok(())
}

/// Returns `None` when the value holds no placeholder at all
fn replace_in(
    value: &str,
    lookup: &HashMap<String, String>,
) -> Result<Option<String>, MarkerError> {
    if !has_placeholder(value) {
        return Ok(None);
    }

    let mut out = String::with_capacity(value.len());
    let mut last = 0;
    for caps in SIMPLE_PARAM.captures_iter(value) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let key = key.as_str();
        out.push_str(&value[last..whole.start()]);
        match lookup.get(key) {
            None => out.push_str(whole.as_str()),
            Some(resolved) if has_placeholder(resolved) => {
                return Err(MarkerError::NestedSubstitutionNotPermitted {
                    key: key.to_string(),
                    value: resolved.clone(),
                });
            }
            Some(resolved) => out.push_str(resolved),
        }
        last = whole.end();
    }
    out.push_str(&value[last..]);
    Ok(Some(out))
}
