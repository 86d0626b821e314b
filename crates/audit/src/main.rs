//! Character record auditor.
//!
//! Usage: `sheet-audit <record.json>...`
//!
//! In `report` mode every violation of every record is printed and the
//! process exits with status 1 if any were found. In `repair` mode the
//! repaired records, with fresh derived stats, are written to stdout.
mod config;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use config::AuditConfig;
use sheet_content::{ContentFactory, RecordLoader};
use sheet_core::{SheetEngine, ValidationMode};

fn main() -> Result<ExitCode> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: sheet-audit <record.json>...");
        return Ok(ExitCode::from(2));
    }

    let config = AuditConfig::from_env();
    tracing::info!(
        content_dir = %config.content_dir.display(),
        mode = %config.mode,
        "loading content"
    );

    let factory = ContentFactory::new(&config.content_dir);
    let catalog = factory.load_catalog()?;
    let rules = factory.load_rules()?;
    let engine = SheetEngine::new(&catalog, &rules);

    let mut violations = 0;
    for path in &paths {
        let path = Path::new(path);
        match config.mode {
            ValidationMode::Report => violations += report(&engine, path)?,
            ValidationMode::Repair => repair(&engine, path, config.pretty)?,
        }
    }

    if violations > 0 {
        tracing::info!(records = paths.len(), violations, "audit failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints the violations of one record; returns how many there were.
fn report(engine: &SheetEngine<'_>, path: &Path) -> Result<usize> {
    let character = RecordLoader::read(path)?;
    let errors = engine
        .audit(&character)
        .with_context(|| format!("Failed to audit {}", path.display()))?;

    if errors.is_empty() {
        println!("{}: ok", path.display());
    }
    for error in &errors {
        println!("{}: {}", path.display(), error);
    }
    Ok(errors.len())
}

fn repair(engine: &SheetEngine<'_>, path: &Path, pretty: bool) -> Result<()> {
    let mut character = RecordLoader::read(path)?;
    let repairs = engine
        .recompute(&mut character)
        .with_context(|| format!("Failed to repair {}", path.display()))?;
    for violation in repairs {
        let error = sheet_core::ValidationError::from(violation);
        tracing::info!(path = %path.display(), "repaired {}", error);
    }
    println!("{}", RecordLoader::to_json(&character, pretty)?);
    Ok(())
}

/// Logs go to stderr so stdout stays clean for records.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
