// src/lib.rs

//! Bundle header generation from type markers
//!
//! Compiles declarative markers attached to a build's types into bundle
//! manifest headers: capabilities and requirements, licensing, categories
//! and people.
//!
//! # Architecture
//!
//! - Type discovery is external: a [`TypeSpace`] supplies the types and
//!   their markers
//! - Eight recognized [`MarkerKind`]s, each with its own clause translator
//! - Meta-markers: custom markers whose declaration carries a recognized
//!   marker expand into it at every use site
//! - One-level local `${name}` substitution inside capability clauses
//! - Every generated value is macro-expanded with shell access disabled
//!   before it is accumulated in a sorted, deduplicated [`HeaderTable`]

pub mod clause;
pub mod config;
pub mod context;
mod error;
pub mod header;
pub mod headers;
pub mod macros;
pub mod marker;
pub mod resolver;
pub mod scan;
pub mod substitute;
pub mod version;

pub use clause::{translate, MarkerError};
pub use config::BuildConfig;
pub use context::ContextExpander;
pub use error::{Error, Result};
pub use header::{parse_clause, parse_header, AttrValue, Attrs, Clause, ClauseParseError};
pub use headers::{Analysis, Diagnostic, HeaderTable};
pub use macros::{Macro, MacroEngine, MacroError, NoSystem, Properties};
pub use marker::{Elements, MarkerInstance, MarkerKind, MarkerValue};
pub use resolver::{analyze, generate_headers, MarkerResolver, TypeState};
pub use scan::{ScanSpace, TypeDef, TypeKind, TypeSpace};
pub use version::{Version, VersionError};
