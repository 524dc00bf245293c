// src/main.rs

mod cli;

use anyhow::{bail, Context, Result};
use bundle_headers::header::AssignOp;
use bundle_headers::{generate_headers, parse_header, BuildConfig, MarkerKind, ScanSpace};
use clap::Parser;
use cli::{Cli, Commands};
use serde_json::{Map, Value};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        // stdout carries the generated headers
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            scan,
            config,
            headers,
            json,
            strict,
        } => cmd_generate(&scan, config.as_deref(), &headers, json, strict),
        Commands::Kinds => cmd_kinds(),
        Commands::Parse { value } => cmd_parse(&value),
    }
}

fn cmd_generate(
    scan: &Path,
    config: Option<&Path>,
    requested: &[String],
    json: bool,
    strict: bool,
) -> Result<()> {
    info!("Loading scan from {}", scan.display());
    let space = ScanSpace::from_file(scan)
        .with_context(|| format!("Failed to load scan file {}", scan.display()))?;

    let config = match config {
        Some(path) => {
            info!("Loading build configuration from {}", path.display());
            BuildConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => BuildConfig::default(),
    };

    let analysis = generate_headers(&space, &config).context("Header generation failed")?;
    info!(
        "Processed {} types, {} headers generated",
        space.len(),
        analysis.table().names().count()
    );

    let names: Vec<String> = if requested.is_empty() {
        analysis.table().names().map(str::to_string).collect()
    } else {
        requested.to_vec()
    };

    if json {
        let mut object = Map::new();
        for name in &names {
            if let Some(value) = analysis.header(name) {
                object.insert(name.clone(), Value::String(value));
            }
        }
        println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);
    } else {
        for name in &names {
            if let Some(value) = analysis.header(name) {
                println!("{}: {}", name, value);
            }
        }
    }

    if strict && !analysis.diagnostics().is_empty() {
        bail!(
            "{} marker(s) could not be translated",
            analysis.diagnostics().len()
        );
    }

    Ok(())
}

fn cmd_kinds() -> Result<()> {
    for kind in MarkerKind::iter() {
        println!("{} -> {}", kind.qualified_name(), kind.header());
        for field in kind.schema() {
            let required = if field.required { " (required)" } else { "" };
            println!("    {}: {:?}{}", field.name, field.ty, required);
        }
    }
    Ok(())
}

fn cmd_parse(value: &str) -> Result<()> {
    let clauses = parse_header(value).context("Failed to parse header value")?;
    for clause in &clauses {
        println!("{}", clause.namespace);
        for assignment in &clause.assignments {
            let op = match assignment.op {
                AssignOp::Plain => "=",
                AssignOp::Colon => ":=",
            };
            println!("    {}{}{}", assignment.key, op, assignment.value);
        }
        for extra in &clause.extras {
            println!("    {}", extra);
        }
    }
    Ok(())
}
