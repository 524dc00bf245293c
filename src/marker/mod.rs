// src/marker/mod.rs
//! Header markers
//!
//! A marker is structured metadata attached to a type. Eight marker kinds
//! are recognized and translated into manifest headers; any other marker is
//! a candidate meta-marker whose own declaration may carry a recognized one.

mod instance;
mod kind;

pub use instance::{Elements, MarkerInstance, MarkerValue};
pub use kind::{is_platform, is_recognized, FieldSpec, FieldType, MarkerKind, PLATFORM_PREFIX};
