// src/clause/error.rs

use crate::marker::FieldType;
use crate::version::VersionError;
use thiserror::Error;

/// A failure confined to the translation of one marker
///
/// The resolver logs these and moves on to the next marker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("malformed version '{value}': {source}")]
    MalformedVersion {
        value: String,
        #[source]
        source: VersionError,
    },

    #[error("nested substitutions not permitted: ${{{key}}} resolves to '{value}'")]
    NestedSubstitutionNotPermitted { key: String, value: String },

    #[error("{kind} marker field '{field}' is not {expected}")]
    FieldType {
        kind: &'static str,
        field: &'static str,
        expected: FieldType,
    },

    #[error("{kind} marker is missing required field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}
