// src/marker/kind.rs

//! The fixed set of recognized marker kinds and their field schemas

use super::MarkerValue;
use crate::header;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Markers in this namespace belong to the platform and are never inspected
pub const PLATFORM_PREFIX: &str = "java.";

/// A recognized header marker
///
/// The string form is the marker's stable qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum MarkerKind {
    #[strum(serialize = "aQute.bnd.annotation.headers.BundleLicense")]
    License,
    #[strum(serialize = "aQute.bnd.annotation.headers.RequireCapability")]
    RequireCapability,
    #[strum(serialize = "aQute.bnd.annotation.headers.ProvideCapability")]
    ProvideCapability,
    #[strum(serialize = "aQute.bnd.annotation.headers.BundleCategory")]
    Category,
    #[strum(serialize = "aQute.bnd.annotation.headers.BundleDocURL")]
    DocUrl,
    #[strum(serialize = "aQute.bnd.annotation.headers.BundleDevelopers")]
    Developers,
    #[strum(serialize = "aQute.bnd.annotation.headers.BundleContributors")]
    Contributors,
    #[strum(serialize = "aQute.bnd.annotation.headers.BundleCopyright")]
    Copyright,
}

/// Declared type of a marker field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FieldType {
    #[strum(to_string = "a string")]
    String,
    #[strum(to_string = "a string array")]
    StringArray,
    #[strum(to_string = "an integer")]
    Int,
    /// Enum constant, carried by name
    #[strum(to_string = "an enum constant")]
    Enum,
    #[strum(to_string = "an enum constant array")]
    EnumArray,
}

impl FieldType {
    /// Whether an element value fits this type
    ///
    /// A lone value is accepted where an array is declared.
    pub fn accepts(&self, value: &MarkerValue) -> bool {
        match self {
            Self::String | Self::Enum => matches!(value, MarkerValue::Str(_)),
            Self::StringArray | Self::EnumArray => {
                matches!(value, MarkerValue::Str(_) | MarkerValue::Strs(_))
            }
            Self::Int => matches!(value, MarkerValue::Long(_)),
        }
    }
}

/// One named field of a marker kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        required: false,
    }
}

const fn required(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        required: true,
    }
}

const LICENSE_FIELDS: &[FieldSpec] = &[
    required("name", FieldType::String),
    field("description", FieldType::String),
    field("link", FieldType::String),
];

const REQUIRE_FIELDS: &[FieldSpec] = &[
    required("ns", FieldType::String),
    field("filter", FieldType::String),
    field("effective", FieldType::String),
    field("resolution", FieldType::Enum),
    field("extra", FieldType::String),
];

const PROVIDE_FIELDS: &[FieldSpec] = &[
    required("ns", FieldType::String),
    field("name", FieldType::String),
    field("version", FieldType::String),
    field("uses", FieldType::StringArray),
    field("mandatory", FieldType::StringArray),
    field("effective", FieldType::String),
    field("value", FieldType::String),
];

const CATEGORY_FIELDS: &[FieldSpec] = &[
    field("value", FieldType::EnumArray),
    field("custom", FieldType::StringArray),
];

const SINGLE_VALUE_FIELDS: &[FieldSpec] = &[required("value", FieldType::String)];

const PERSON_FIELDS: &[FieldSpec] = &[
    required("value", FieldType::String),
    field("name", FieldType::String),
    field("roles", FieldType::StringArray),
    field("organization", FieldType::String),
    field("organizationUrl", FieldType::String),
    field("timezone", FieldType::Int),
];

impl MarkerKind {
    /// Look up a kind by its qualified marker name
    pub fn from_qualified_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn qualified_name(&self) -> &'static str {
        self.into()
    }

    /// Header the kind's clauses are accumulated under
    pub fn header(&self) -> &'static str {
        match self {
            Self::License => header::BUNDLE_LICENSE,
            Self::RequireCapability => header::REQUIRE_CAPABILITY,
            Self::ProvideCapability => header::PROVIDE_CAPABILITY,
            Self::Category => header::BUNDLE_CATEGORY,
            Self::DocUrl => header::BUNDLE_DOCURL,
            Self::Developers => header::BUNDLE_DEVELOPERS,
            Self::Contributors => header::BUNDLE_CONTRIBUTORS,
            Self::Copyright => header::BUNDLE_COPYRIGHT,
        }
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Self::License => LICENSE_FIELDS,
            Self::RequireCapability => REQUIRE_FIELDS,
            Self::ProvideCapability => PROVIDE_FIELDS,
            Self::Category => CATEGORY_FIELDS,
            Self::DocUrl | Self::Copyright => SINGLE_VALUE_FIELDS,
            Self::Developers | Self::Contributors => PERSON_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.schema().iter().find(|f| f.name == name)
    }
}

/// Whether a marker name is one of the recognized kinds
pub fn is_recognized(name: &str) -> bool {
    MarkerKind::from_qualified_name(name).is_some()
}

/// Whether a marker name belongs to the platform namespace
pub fn is_platform(name: &str) -> bool {
    name.starts_with(PLATFORM_PREFIX)
}
