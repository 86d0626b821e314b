//! Character record loader.
//!
//! Records are JSON. The stored `derived_stats` block is informational only:
//! [`RecordLoader::import`] always recomputes it.

use std::path::Path;

use sheet_core::{Character, SheetEngine, ValidationError};

use crate::loaders::{LoadResult, read_file};

/// Reads and writes character records.
pub struct RecordLoader;

impl RecordLoader {
    /// Parse a record as stored, without any validation.
    pub fn read(path: &Path) -> LoadResult<Character> {
        let content = read_file(path)?;
        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character record {}: {}", path.display(), e))
    }

    pub fn write(path: &Path, character: &Character, pretty: bool) -> LoadResult<()> {
        let json = Self::to_json(character, pretty)?;
        std::fs::write(path, json)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }

    pub fn to_json(character: &Character, pretty: bool) -> LoadResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(character)?
        } else {
            serde_json::to_string(character)?
        };
        Ok(json)
    }

    /// Read a record and run it through the engine.
    ///
    /// Returns the repaired record with fresh derived stats and every
    /// violation the stored record had.
    pub fn import(
        path: &Path,
        engine: &SheetEngine<'_>,
    ) -> LoadResult<(Character, Vec<ValidationError>)> {
        let stored = Self::read(path)?;
        let (character, report) = engine
            .import(stored)
            .map_err(|e| anyhow::anyhow!("Failed to recompute {}: {}", path.display(), e))?;
        tracing::debug!(
            path = %path.display(),
            violations = report.len(),
            "imported character record"
        );
        Ok((character, report))
    }
}
