//! Catalog table loader.
//!
//! Every table is its own RON file of the form `(entries: [ ... ])`.
//! Modifiers are validated while parsing, so an entry with an unknown stat
//! target or a malformed condition fails the whole file.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sheet_core::{Catalog, CatalogError};

use crate::loaders::{LoadResult, read_file};

/// One catalog table as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFile<T> {
    pub entries: Vec<T>,
}

type Insert<T> = fn(&mut Catalog, T) -> Result<(), CatalogError>;

/// Loader for catalog tables from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub const CLASSES: &'static str = "classes.ron";
    pub const SUBCLASSES: &'static str = "subclasses.ron";
    pub const DOMAIN_CARDS: &'static str = "domain_cards.ron";
    pub const WEAPONS: &'static str = "weapons.ron";
    pub const ARMOR: &'static str = "armor.ron";
    pub const LEVEL_UP_OPTIONS: &'static str = "level_up_options.ron";
    pub const LOOT: &'static str = "loot.ron";

    /// Load the entries of a single table file.
    pub fn load_table<T: DeserializeOwned>(path: &Path) -> LoadResult<Vec<T>> {
        let content = read_file(path)?;
        let table: TableFile<T> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        Ok(table.entries)
    }

    /// Load every table under `dir` and check cross-table references.
    ///
    /// `loot.ron` is optional; every other table must exist.
    pub fn load_dir(dir: &Path) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();

        Self::fill(&mut catalog, dir, Self::CLASSES, true, Catalog::insert_class)?;
        Self::fill(&mut catalog, dir, Self::SUBCLASSES, true, Catalog::insert_subclass)?;
        Self::fill(&mut catalog, dir, Self::DOMAIN_CARDS, true, Catalog::insert_domain_card)?;
        Self::fill(&mut catalog, dir, Self::WEAPONS, true, Catalog::insert_weapon)?;
        Self::fill(&mut catalog, dir, Self::ARMOR, true, Catalog::insert_armor)?;
        Self::fill(&mut catalog, dir, Self::LEVEL_UP_OPTIONS, true, Catalog::insert_option)?;
        Self::fill(&mut catalog, dir, Self::LOOT, false, Catalog::insert_loot)?;

        catalog
            .validate_references()
            .map_err(|e| anyhow::anyhow!("Inconsistent catalog in {}: {}", dir.display(), e))?;

        tracing::debug!(
            classes = catalog.class_count(),
            domain_cards = catalog.domain_card_count(),
            options = catalog.option_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn fill<T: DeserializeOwned>(
        catalog: &mut Catalog,
        dir: &Path,
        file: &str,
        required: bool,
        insert: Insert<T>,
    ) -> LoadResult<()> {
        let path = dir.join(file);
        if !required && !path.exists() {
            tracing::warn!(path = %path.display(), "optional catalog table not found, skipping");
            return Ok(());
        }

        for entry in Self::load_table::<T>(&path)? {
            insert(catalog, entry)
                .map_err(|e| anyhow::anyhow!("Invalid entry in {}: {}", path.display(), e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::{CatalogOracle, ClassDef, StatTarget};

    #[test]
    fn class_table_parses_modifiers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CatalogLoader::CLASSES);
        std::fs::write(
            &path,
            r#"(entries: [
                (
                    id: "guardian",
                    name: "Guardian",
                    domains: ["valor", "blade"],
                    modifiers: [
                        (behaviour: base, kind: flat(value: 9), target: "evasion"),
                        (
                            behaviour: bonus,
                            kind: derived_from_trait(trait: strength, multiplier: 1),
                            target: "max_hp",
                            conditions: [armor_equipped(value: true)],
                        ),
                    ],
                ),
            ])"#,
        )
        .expect("write");

        let classes: Vec<ClassDef> = CatalogLoader::load_table(&path).expect("load");
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].modifiers[1].target(), StatTarget::MaxHp);
        assert_eq!(classes[0].modifiers[1].conditions().len(), 1);
    }

    #[test]
    fn invalid_condition_rejects_the_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CatalogLoader::CLASSES);
        std::fs::write(
            &path,
            r#"(entries: [
                (
                    id: "guardian",
                    name: "Guardian",
                    domains: ["valor"],
                    modifiers: [
                        (
                            behaviour: bonus,
                            kind: flat(value: 1),
                            target: "evasion",
                            conditions: [level(min: 6, max: 2)],
                        ),
                    ],
                ),
            ])"#,
        )
        .expect("write");

        let result: LoadResult<Vec<ClassDef>> = CatalogLoader::load_table(&path);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_target_rejects_the_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CatalogLoader::CLASSES);
        std::fs::write(
            &path,
            r#"(entries: [
                (
                    id: "guardian",
                    name: "Guardian",
                    domains: ["valor"],
                    modifiers: [(behaviour: base, kind: flat(value: 3), target: "max_mana")],
                ),
            ])"#,
        )
        .expect("write");

        let err = CatalogLoader::load_table::<ClassDef>(&path).expect_err("unknown target");
        assert!(err.to_string().contains("max_mana"));
    }

    #[test]
    fn missing_required_table_fails_but_missing_loot_does_not() {
        let dir = tempfile::tempdir().expect("tempdir");
        for file in [
            CatalogLoader::CLASSES,
            CatalogLoader::SUBCLASSES,
            CatalogLoader::DOMAIN_CARDS,
            CatalogLoader::WEAPONS,
            CatalogLoader::ARMOR,
            CatalogLoader::LEVEL_UP_OPTIONS,
        ] {
            std::fs::write(dir.path().join(file), "(entries: [])").expect("write");
        }

        let catalog = CatalogLoader::load_dir(dir.path()).expect("loot is optional");
        assert_eq!(catalog.class_count(), 0);
        assert!(catalog.loot(&"anything".into()).is_none());

        std::fs::remove_file(dir.path().join(CatalogLoader::WEAPONS)).expect("remove");
        assert!(CatalogLoader::load_dir(dir.path()).is_err());
    }
}
