// src/cli.rs
//! CLI definitions for bundle-headers
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations live in `main.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bundle-headers")]
#[command(author = "Bundle Headers Contributors")]
#[command(version)]
#[command(about = "Generate bundle manifest headers from type markers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate headers from a scan file
    Generate {
        /// Scan file listing the build's types and markers (.toml or .json)
        #[arg(short, long)]
        scan: PathBuf,

        /// Build configuration (properties and package tables)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print these headers (default: every header that has a value)
        #[arg(long = "header", value_name = "NAME")]
        headers: Vec<String>,

        /// Print a JSON object instead of manifest lines
        #[arg(long)]
        json: bool,

        /// Exit with an error if any marker could not be translated
        #[arg(long)]
        strict: bool,
    },

    /// List recognized marker kinds and their fields
    Kinds,

    /// Parse a header value and print its clauses
    Parse {
        /// Header value, e.g. "osgi.ee;filter:='(osgi.ee=JavaSE)'"
        value: String,
    },
}
