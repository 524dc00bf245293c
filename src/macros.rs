// src/macros.rs

//! Macro expansion for generated header values
//!
//! Generated values may reference build properties and the per-type
//! context (`${@class}`, `${@package}`, ...). The engine is a trait so a
//! host build tool can plug in its own expander; [`Macro`] is the default.
//!
//! Supported forms:
//! - `${name}`: context property, then build property, expanded recursively
//! - `${env;NAME}`: environment variable
//! - `${system;command}` / `${system-allow-fail;command}`: shell output,
//!   refused while the no-system flag is set
//!
//! Unknown names are left verbatim.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Name to value map used as a macro context
pub type Properties = BTreeMap<String, String>;

const MAX_DEPTH: usize = 100;

#[derive(Error, Debug)]
pub enum MacroError {
    #[error("system commands are disabled in this context: ${{{0}}}")]
    SystemDisabled(String),

    #[error("command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("macro expansion too deep in '{0}'")]
    TooDeep(String),
}

/// A macro expander
pub trait MacroEngine {
    /// Expand `template` with `context` layered over the engine's own
    /// properties
    fn process(&mut self, context: &Properties, template: &str) -> Result<String, MacroError>;

    /// Set the no-system flag, returning the previous value
    fn set_nosystem(&mut self, nosystem: bool) -> bool;

    fn is_nosystem(&self) -> bool;
}

/// Holds an engine with the no-system flag forced on
///
/// The previous flag is restored when the guard is dropped, including on
/// early return through `?`.
pub struct NoSystem<'a, M: MacroEngine + ?Sized> {
    engine: &'a mut M,
    previous: bool,
}

impl<'a, M: MacroEngine + ?Sized> NoSystem<'a, M> {
    pub fn new(engine: &'a mut M) -> Self {
        let previous = engine.set_nosystem(true);
        Self { engine, previous }
    }
}

impl<M: MacroEngine + ?Sized> Deref for NoSystem<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.engine
    }
}

impl<M: MacroEngine + ?Sized> DerefMut for NoSystem<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.engine
    }
}

impl<M: MacroEngine + ?Sized> Drop for NoSystem<'_, M> {
    fn drop(&mut self) {
        self.engine.set_nosystem(self.previous);
    }
}

/// Default macro engine over a set of build properties
#[derive(Debug, Clone, Default)]
pub struct Macro {
    properties: Properties,
    nosystem: bool,
}

impl Macro {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            nosystem: false,
        }
    }

    fn expand(&self, text: &str, context: &Properties, depth: usize) -> Result<String, MacroError> {
        if depth > MAX_DEPTH {
            return Err(MacroError::TooDeep(text.to_string()));
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let body = &rest[start + 2..];
            match matching_brace(body) {
                Some(end) => {
                    // Inner macros first, so `${${name}}` works
                    let inner = self.expand(&body[..end], context, depth + 1)?;
                    out.push_str(&self.evaluate(&inner, context, depth)?);
                    rest = &body[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }

    fn evaluate(
        &self,
        inner: &str,
        context: &Properties,
        depth: usize,
    ) -> Result<String, MacroError> {
        let mut parts = inner.split(';');
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            "system" | "system-allow-fail" if !args.is_empty() => {
                self.system(inner, &args.join(";"), name == "system-allow-fail")
            }
            "env" if args.len() == 1 => {
                Ok(std::env::var(args[0]).unwrap_or_else(|_| literal(inner)))
            }
            _ if args.is_empty() => {
                match context.get(name).or_else(|| self.properties.get(name)) {
                    Some(value) => self.expand(value, context, depth + 1),
                    None => Ok(literal(inner)),
                }
            }
            _ => Ok(literal(inner)),
        }
    }

    fn system(&self, inner: &str, command: &str, allow_fail: bool) -> Result<String, MacroError> {
        if self.nosystem {
            return Err(MacroError::SystemDisabled(inner.to_string()));
        }

        debug!("Running macro command: {}", command);
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| MacroError::CommandFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() && !allow_fail {
            return Err(MacroError::CommandFailed {
                command: command.to_string(),
                reason: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl MacroEngine for Macro {
    fn process(&mut self, context: &Properties, template: &str) -> Result<String, MacroError> {
        self.expand(template, context, 0)
    }

    fn set_nosystem(&mut self, nosystem: bool) -> bool {
        std::mem::replace(&mut self.nosystem, nosystem)
    }

    fn is_nosystem(&self) -> bool {
        self.nosystem
    }
}

fn literal(inner: &str) -> String {
    format!("${{{}}}", inner)
}

/// Index of the `}` closing a macro body, skipping nested `${...}`
fn matching_brace(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut nested = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                nested += 1;
                i += 2;
                continue;
            }
            b'}' if nested == 0 => return Some(i),
            b'}' => nested -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}
