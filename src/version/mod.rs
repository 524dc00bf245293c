// src/version/mod.rs

//! Structured bundle versions
//!
//! Capability clauses carry versions as typed attributes so that range
//! filters compare them numerically. This module parses the
//! `major[.minor[.micro[.qualifier]]]` form and always renders at least the
//! three numeric segments.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing a version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid numeric segment '{segment}' in version '{input}'")]
    InvalidSegment { input: String, segment: String },

    #[error("invalid qualifier '{qualifier}' in version '{input}'")]
    InvalidQualifier { input: String, qualifier: String },

    #[error("too many segments in version '{0}'")]
    TooManySegments(String),
}

/// A parsed bundle version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub qualifier: String,
}

impl Version {
    /// Create a version without a qualifier
    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: String::new(),
        }
    }

    /// Parse a version string
    ///
    /// Format: major[.minor[.micro[.qualifier]]]
    /// Examples:
    /// - "1" → 1.0.0
    /// - "1.0" → 1.0.0
    /// - "2.3.4" → 2.3.4
    /// - "1.2.3.beta-1" → 1.2.3.beta-1
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut parts = input.splitn(4, '.');
        let mut numbers = [0u64; 3];
        for (index, slot) in numbers.iter_mut().enumerate() {
            match parts.next() {
                Some(segment) => *slot = parse_segment(input, segment)?,
                // Only the major segment is mandatory
                None if index > 0 => break,
                None => return Err(VersionError::Empty),
            }
        }

        let qualifier = parts.next().unwrap_or_default();
        if qualifier.contains('.') {
            return Err(VersionError::TooManySegments(input.to_string()));
        }
        let valid_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
        if !qualifier.chars().all(valid_char) || (input.ends_with('.') && qualifier.is_empty()) {
            return Err(VersionError::InvalidQualifier {
                input: input.to_string(),
                qualifier: qualifier.to_string(),
            });
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            micro: numbers[2],
            qualifier: qualifier.to_string(),
        })
    }
}

fn parse_segment(input: &str, segment: &str) -> Result<u64, VersionError> {
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
        return Err(VersionError::InvalidSegment {
            input: input.to_string(),
            segment: segment.to_string(),
        });
    }
    segment.parse::<u64>().map_err(|_| VersionError::InvalidSegment {
        input: input.to_string(),
        segment: segment.to_string(),
    })
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.micro.cmp(&other.micro))
            // Qualifiers compare lexicographically, empty sorts first
            .then_with(|| self.qualifier.cmp(&other.qualifier))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
