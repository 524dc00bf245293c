// src/context.rs

//! Per-type macro context
//!
//! Each generated value is expanded against the type it came from:
//!
//! | Variable       | Value                                  |
//! |----------------|----------------------------------------|
//! | `@class`       | fully qualified type name              |
//! | `@class-short` | type name without package              |
//! | `@package`     | owning package                         |
//! | `@version`     | package version, when the build has one|

use crate::config::BuildConfig;
use crate::error::Result;
use crate::macros::{MacroEngine, NoSystem, Properties};
use crate::scan::TypeDef;

pub const CLASS: &str = "@class";
pub const CLASS_SHORT: &str = "@class-short";
pub const PACKAGE: &str = "@package";
pub const VERSION: &str = "@version";

/// Expands generated values in the context of their originating type
pub struct ContextExpander<'a, M: MacroEngine + ?Sized> {
    config: &'a BuildConfig,
    engine: &'a mut M,
}

impl<'a, M: MacroEngine + ?Sized> ContextExpander<'a, M> {
    pub fn new(config: &'a BuildConfig, engine: &'a mut M) -> Self {
        Self { config, engine }
    }

    pub fn context_for(&self, ty: &TypeDef) -> Properties {
        let mut context = Properties::new();
        context.insert(CLASS.to_string(), ty.name.clone());
        context.insert(CLASS_SHORT.to_string(), ty.short_name().to_string());
        context.insert(PACKAGE.to_string(), ty.package().to_string());
        if let Some(version) = self.config.package_version(ty.package()) {
            context.insert(VERSION.to_string(), version.to_string());
        }
        context
    }

    /// Expand one value with system commands disabled
    ///
    /// Marker text comes from source code that may be third party, so it
    /// must never reach a shell.
    pub fn expand(&mut self, ty: &TypeDef, value: &str) -> Result<String> {
        let context = self.context_for(ty);
        let mut engine = NoSystem::new(&mut *self.engine);
        Ok(engine.process(&context, value)?)
    }
}
