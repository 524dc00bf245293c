// src/header/mod.rs

//! Clause grammar for bundle manifest headers
//!
//! A header value is a comma separated list of clauses. Each clause is a
//! namespace followed by `;` separated attributes and directives:
//!
//! ```text
//! osgi.webresource;osgi.webresource=/google/angular;version:=1.0.0
//! osgi.ee;filter:='(osgi.ee=JavaSE)';resolution:=optional
//! ```
//!
//! Plain attributes use `=`, directives and typed attributes use `:=`.
//! Values with special characters are wrapped in apostrophes with `\` and
//! `'` backslash-escaped.

mod attrs;

pub use attrs::{AssignOp, Assignment, AttrValue, Attrs, DIRECTIVE_SUFFIX};

use std::fmt;
use thiserror::Error;

pub const BUNDLE_LICENSE: &str = "Bundle-License";
pub const REQUIRE_CAPABILITY: &str = "Require-Capability";
pub const PROVIDE_CAPABILITY: &str = "Provide-Capability";
pub const BUNDLE_CATEGORY: &str = "Bundle-Category";
pub const BUNDLE_DOCURL: &str = "Bundle-DocURL";
pub const BUNDLE_DEVELOPERS: &str = "Bundle-Developers";
pub const BUNDLE_CONTRIBUTORS: &str = "Bundle-Contributors";
pub const BUNDLE_COPYRIGHT: &str = "Bundle-Copyright";

/// Errors raised while parsing a header value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseParseError {
    #[error("clause has no namespace: '{0}'")]
    MissingNamespace(String),

    #[error("unterminated quote in '{0}'")]
    UnterminatedQuote(String),

    #[error("attribute without a key in '{0}'")]
    EmptyKey(String),
}

/// A clause ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub namespace: String,
    pub attrs: Attrs,
    /// Free text appended after the attributes, never quoted
    pub trailing: Option<String>,
}

impl Clause {
    pub fn new(namespace: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            namespace: namespace.into(),
            attrs,
            trailing: None,
        }
    }

    pub fn with_trailing(mut self, text: impl Into<String>) -> Self {
        self.trailing = Some(text.into());
        self
    }

    pub fn assignments(&self) -> Vec<Assignment> {
        self.attrs.assignments()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.namespace)?;
        if !self.attrs.is_empty() {
            write!(f, ";{}", self.attrs)?;
        }
        if let Some(ref text) = self.trailing {
            write!(f, ";{}", text)?;
        }
        Ok(())
    }
}

/// A clause read back from its textual form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClause {
    pub namespace: String,
    pub assignments: Vec<Assignment>,
    /// Bare segments after the namespace that carry no `=`
    pub extras: Vec<String>,
}

impl ParsedClause {
    pub fn get(&self, key: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.key == key)
    }
}

impl fmt::Display for ParsedClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.namespace)?;
        for a in &self.assignments {
            let op = match a.op {
                AssignOp::Plain => "=",
                AssignOp::Colon => ":=",
            };
            write!(f, ";{}{}{}", a.key, op, quote(&a.value))?;
        }
        for extra in &self.extras {
            write!(f, ";{}", extra)?;
        }
        Ok(())
    }
}

fn needs_quote(s: &str) -> bool {
    s.is_empty()
        || s.chars()
            .any(|c| matches!(c, ';' | ',' | '=' | '\'' | '"' | '\\') || c.is_whitespace())
}

/// Quote a value for use in a clause if it contains special characters
pub fn quote(s: &str) -> String {
    if !needs_quote(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    escape_into(&mut out, s);
    out.push('\'');
    out
}

/// Backslash-escape `\` and `'` without adding the surrounding quotes
pub fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Strip surrounding quotes and undo backslash escapes
pub fn unquote(s: &str) -> String {
    let s = s.trim();
    let quoted = s.len() >= 2
        && ((s.starts_with('\'') && s.ends_with('\'')) || (s.starts_with('"') && s.ends_with('"')));
    if !quoted {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s[1..s.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Split on `delim` outside of quoted sections
fn split_outside_quotes(s: &str, delim: char) -> Result<Vec<&str>, ClauseParseError> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(q) => {
                if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == delim => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            None => {}
        }
    }

    if quote.is_some() {
        return Err(ClauseParseError::UnterminatedQuote(s.to_string()));
    }
    parts.push(&s[start..]);
    Ok(parts)
}

/// Parse a single clause
pub fn parse_clause(s: &str) -> Result<ParsedClause, ClauseParseError> {
    let segments = split_outside_quotes(s, ';')?;
    let namespace = segments[0].trim();
    if namespace.is_empty() || split_outside_quotes(namespace, '=')?.len() > 1 {
        return Err(ClauseParseError::MissingNamespace(s.to_string()));
    }

    let mut assignments = Vec::new();
    let mut extras = Vec::new();
    for segment in &segments[1..] {
        let segment = segment.trim();
        let pieces = split_outside_quotes(segment, '=')?;
        if pieces.len() == 1 {
            extras.push(segment.to_string());
            continue;
        }

        let raw_key = pieces[0].trim();
        // Everything after the first '=' is the value, quotes included
        let raw_value = segment[pieces[0].len() + 1..].trim();
        let (key, op) = match raw_key.strip_suffix(DIRECTIVE_SUFFIX) {
            Some(k) => (k.trim(), AssignOp::Colon),
            None => (raw_key, AssignOp::Plain),
        };
        if key.is_empty() {
            return Err(ClauseParseError::EmptyKey(s.to_string()));
        }
        assignments.push(Assignment {
            key: key.to_string(),
            op,
            value: unquote(raw_value),
        });
    }

    Ok(ParsedClause {
        namespace: namespace.to_string(),
        assignments,
        extras,
    })
}

/// Parse a full header value into its clauses
pub fn parse_header(s: &str) -> Result<Vec<ParsedClause>, ClauseParseError> {
    split_outside_quotes(s, ',')?
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .map(parse_clause)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn test_quote_plain_value() {
        assert_eq!(quote("/google/angular"), "/google/angular");
        assert_eq!(quote("1.0.0"), "1.0.0");
    }

    #[test]
    fn test_quote_special_value() {
        assert_eq!(quote("a;b"), "'a;b'");
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"c:\x"), r"'c:\\x'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r"'it\'s'"), "it's");
        assert_eq!(unquote("\"a,b\""), "a,b");
        assert_eq!(unquote("bare"), "bare");
    }

    #[test]
    fn test_clause_display() {
        let mut attrs = Attrs::new();
        attrs.insert("osgi.webresource", "/google/angular");
        attrs.insert("version", Version::new(1, 0, 0));
        let clause = Clause::new("osgi.webresource", attrs);
        assert_eq!(
            clause.to_string(),
            "osgi.webresource;osgi.webresource=/google/angular;version:=1.0.0"
        );
    }

    #[test]
    fn test_clause_trailing_text() {
        let clause = Clause::new("ns", Attrs::new()).with_trailing("x=1; y");
        assert_eq!(clause.to_string(), "ns;x=1; y");
    }

    #[test]
    fn test_parse_clause() {
        let parsed =
            parse_clause("osgi.ee;filter:='(&(osgi.ee=JavaSE)(version>=1.8))';x=y;extra").unwrap();
        assert_eq!(parsed.namespace, "osgi.ee");
        let filter = parsed.get("filter").unwrap();
        assert_eq!(filter.op, AssignOp::Colon);
        assert_eq!(filter.value, "(&(osgi.ee=JavaSE)(version>=1.8))");
        assert_eq!(parsed.get("x").unwrap().op, AssignOp::Plain);
        assert_eq!(parsed.extras, vec!["extra"]);
    }

    #[test]
    fn test_parse_header_respects_quotes() {
        let clauses = parse_header("a;uses:='p,q',b;x=1").unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].get("uses").unwrap().value, "p,q");
        assert_eq!(clauses[1].namespace, "b");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_clause(";x=1"),
            Err(ClauseParseError::MissingNamespace(_))
        ));
        assert!(matches!(
            parse_clause("ns;x='open"),
            Err(ClauseParseError::UnterminatedQuote(_))
        ));
        assert!(matches!(
            parse_clause("ns;=1"),
            Err(ClauseParseError::EmptyKey(_))
        ));
    }

    #[test]
    fn test_render_parse_agree() {
        let mut attrs = Attrs::new();
        attrs.insert("name", "it's me");
        attrs.insert_directive("effective", "active");
        attrs.insert("n", AttrValue::Long(-4));
        let clause = Clause::new("ns", attrs);
        let parsed = parse_clause(&clause.to_string()).unwrap();
        assert_eq!(parsed.assignments, clause.assignments());
        assert_eq!(parsed.to_string(), clause.to_string());
    }
}
