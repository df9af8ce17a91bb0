use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sintegra_cli::batch::{BatchReport, build_batch, read_batch};
use sintegra_cli::layout::{catalog_table, layout_table};
use sintegra_record::{WriterOptions, write_records};
use sintegra_standards::SchemaRegistry;
use tracing::{info, info_span};

use crate::cli::{BuildArgs, LayoutArgs};

pub struct BuildOutcome {
    pub input: PathBuf,
    /// Written file; `None` when any record failed.
    pub output: Option<PathBuf>,
    pub registry: SchemaRegistry,
    pub report: BatchReport,
}

pub fn run_build(args: &BuildArgs) -> Result<BuildOutcome> {
    let span = info_span!("build", input = %args.input.display());
    let _guard = span.enter();

    let registry = load_registry(args.catalog_dir.as_deref())?;
    let entries = read_batch(&args.input)?;
    info!(entries = entries.len(), "read record batch");
    let report = build_batch(&registry, &entries);

    let output = if report.has_failures() {
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| args.input.with_extension("txt"));
        let options = WriterOptions {
            line_ending: args.line_ending.into(),
        };
        let written = write_records(&path, &report.records, options)
            .with_context(|| format!("write {}", path.display()))?;
        info!(records = written, path = %path.display(), "flat file written");
        Some(path)
    };

    Ok(BuildOutcome {
        input: args.input.clone(),
        output,
        registry,
        report,
    })
}

pub fn run_layout(args: &LayoutArgs) -> Result<()> {
    let registry = load_registry(args.catalog_dir.as_deref())?;
    match &args.code {
        Some(code) => {
            let schema = registry.require(code.trim())?;
            match &schema.description {
                Some(description) => println!("Record {}: {description}", schema.code),
                None => println!("Record {}", schema.code),
            }
            println!("Line width: {}", schema.line_width());
            println!("{}", layout_table(schema));
        }
        None => println!("{}", catalog_table(&registry)),
    }
    Ok(())
}

fn load_registry(catalog_dir: Option<&Path>) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::builtin().context("load built-in catalogs")?;
    if let Some(dir) = catalog_dir {
        let loaded = registry
            .load_dir(dir)
            .with_context(|| format!("load catalogs from {}", dir.display()))?;
        info!(loaded, dir = %dir.display(), "loaded catalog directory");
    }
    Ok(registry)
}
