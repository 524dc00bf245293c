// src/resolver.rs

//! Marker resolution and the header pass
//!
//! Every type in scope is scanned for markers. A recognized marker is
//! translated directly. Any other marker is looked up as a type: when its
//! own declaration carries recognized markers, each of those is merged with
//! the use-site values, completed from the marker type's defaults and
//! translated as if it had been written on the type. This lets a build
//! define shorthand markers:
//!
//! ```text
//! @RequireCapability(ns = "osgi.webresource",
//!     filter = "(&(osgi.webresource=/google/angular)(version>=${version}))")
//! marker Angular { version = "1.3" }
//!
//! @Angular class MySpace
//! ```
//!
//! Resolution goes one hop only: markers found on a declaration are never
//! themselves chased further.

use crate::clause;
use crate::config::BuildConfig;
use crate::context::ContextExpander;
use crate::error::Result;
use crate::headers::{Analysis, Diagnostic, HeaderTable};
use crate::macros::{Macro, MacroEngine};
use crate::marker::{is_platform, is_recognized, MarkerInstance, MarkerKind};
use crate::scan::{TypeDef, TypeSpace};
use tracing::{debug, info, warn};

/// Whether a type takes part in header generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeState {
    Scanning,
    /// No markers, or the type declares a marker itself
    Rejected,
}

impl TypeState {
    pub fn of(ty: &TypeDef) -> Self {
        if ty.markers.is_empty() || ty.is_marker() {
            Self::Rejected
        } else {
            Self::Scanning
        }
    }
}

/// Walks the markers of each type and feeds translated values into a
/// [`HeaderTable`]
pub struct MarkerResolver<'s, S: TypeSpace + ?Sized> {
    space: &'s S,
    diagnostics: Vec<Diagnostic>,
}

impl<'s, S: TypeSpace + ?Sized> MarkerResolver<'s, S> {
    pub fn new(space: &'s S) -> Self {
        Self {
            space,
            diagnostics: Vec::new(),
        }
    }

    /// Process all markers of one type
    pub fn process_type<M: MacroEngine + ?Sized>(
        &mut self,
        ty: &TypeDef,
        expander: &mut ContextExpander<'_, M>,
        table: &mut HeaderTable,
    ) -> Result<()> {
        if TypeState::of(ty) == TypeState::Rejected {
            return Ok(());
        }

        debug!("Scanning {} ({} markers)", ty.name, ty.markers.len());
        for marker in &ty.markers {
            self.resolve(ty, marker, expander, table)?;
        }
        Ok(())
    }

    fn resolve<M: MacroEngine + ?Sized>(
        &mut self,
        ty: &TypeDef,
        marker: &MarkerInstance,
        expander: &mut ContextExpander<'_, M>,
        table: &mut HeaderTable,
    ) -> Result<()> {
        if is_platform(&marker.name) {
            return Ok(());
        }

        if let Some(kind) = MarkerKind::from_qualified_name(&marker.name) {
            return self.emit(ty, kind, marker, &marker.name, expander, table);
        }

        let space = self.space;
        let Some(declaring) = space.find_type(&marker.name)? else {
            debug!("Marker {} on {} is not a known type", marker.name, ty.name);
            return Ok(());
        };
        if !declaring.markers.iter().any(|m| is_recognized(&m.name)) {
            return Ok(());
        }

        debug!("Expanding meta-marker {} on {}", marker.name, ty.name);
        for declared in space.declared_markers(declaring)? {
            let Some(kind) = MarkerKind::from_qualified_name(&declared.name) else {
                continue;
            };
            let mut merged = declared;
            merged.merge(marker);
            merged.add_defaults(&declaring.defaults);
            self.emit(ty, kind, &merged, &marker.name, expander, table)?;
        }
        Ok(())
    }

    /// Translate one recognized marker, expand and accumulate the values
    ///
    /// Translation failures are recorded and skipped; expansion failures
    /// abort the pass.
    fn emit<M: MacroEngine + ?Sized>(
        &mut self,
        ty: &TypeDef,
        kind: MarkerKind,
        marker: &MarkerInstance,
        origin: &str,
        expander: &mut ContextExpander<'_, M>,
        table: &mut HeaderTable,
    ) -> Result<()> {
        let values = match clause::translate(kind, marker) {
            Ok(values) => values,
            Err(error) => {
                warn!("Skipping {} on {}: {}", origin, ty.name, error);
                self.diagnostics.push(Diagnostic {
                    type_name: ty.name.clone(),
                    marker: origin.to_string(),
                    error,
                });
                return Ok(());
            }
        };

        for value in values {
            let expanded = expander.expand(ty, &value)?;
            debug!("{}: {}", kind.header(), expanded);
            table.add(kind.header(), expanded);
        }
        Ok(())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Run the header pass over every type in scope
pub fn analyze<S, M>(space: &S, config: &BuildConfig, engine: &mut M) -> Result<Analysis>
where
    S: TypeSpace + ?Sized,
    M: MacroEngine + ?Sized,
{
    let mut table = HeaderTable::new();
    let mut expander = ContextExpander::new(config, engine);
    let mut resolver = MarkerResolver::new(space);

    let types = space.types()?;
    for ty in &types {
        resolver.process_type(ty, &mut expander, &mut table)?;
    }

    let diagnostics = resolver.into_diagnostics();
    info!(
        "Header pass: {} types, {} headers generated, {} markers skipped",
        types.len(),
        table.names().count(),
        diagnostics.len()
    );
    Ok(Analysis::new(table, config, diagnostics))
}

/// Run the header pass with the default macro engine over the build's
/// properties
pub fn generate_headers<S: TypeSpace + ?Sized>(
    space: &S,
    config: &BuildConfig,
) -> Result<Analysis> {
    let mut engine = Macro::new(config.properties.clone());
    analyze(space, config, &mut engine)
}
