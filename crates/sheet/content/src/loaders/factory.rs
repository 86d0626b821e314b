//! Content factory for building the catalog and rules from a data directory.

use std::path::{Path, PathBuf};

use sheet_core::{Catalog, RulesConfig};

use crate::loaders::{CatalogLoader, LoadResult, RulesLoader};

/// Content factory that loads all sheet content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml            (optional)
/// ├── classes.ron
/// ├── subclasses.ron
/// ├── domain_cards.ron
/// ├── weapons.ron
/// ├── armor.ron
/// ├── level_up_options.ron
/// └── loot.ron              (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const RULES: &'static str = "rules.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules from `rules.toml`, or the defaults when it is absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        RulesLoader::load_or_default(&self.data_dir.join(Self::RULES))
    }

    /// Load and cross-check every catalog table.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load_dir(&self.data_dir)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
