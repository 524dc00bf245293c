// src/error.rs

//! Crate-level error type
//!
//! Errors that reach this type abort the whole header-generation pass.
//! Failures scoped to a single marker are reported as
//! [`MarkerError`](crate::clause::MarkerError) and never surface here
//! unless a caller chooses to escalate them.

use thiserror::Error;

/// Errors that abort a header-generation pass
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Macro expansion failed: {0}")]
    Macro(#[from] crate::macros::MacroError),

    #[error("Type space error: {0}")]
    TypeSpace(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Header parse error: {0}")]
    Header(#[from] crate::header::ClauseParseError),
}

/// Result type for header-generation operations
pub type Result<T> = std::result::Result<T, Error>;
