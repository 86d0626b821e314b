//! Rules configuration loader.

use std::path::Path;

use sheet_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
///
/// Every field has a default, so a file only lists what it overrides.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML {}: {}", path.display(), e))
    }

    /// Like [`Self::load`], falling back to the defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> LoadResult<RulesConfig> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "rules file not found, using defaults");
            return Ok(RulesConfig::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let rules: RulesConfig = toml::from_str(content)?;
        if rules.max_level == 0 || rules.max_level > RulesConfig::MAX_LEVEL {
            anyhow::bail!(
                "max_level must lie within 1..={}, got {}",
                RulesConfig::MAX_LEVEL,
                rules.max_level
            );
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_the_other_defaults() {
        let rules = RulesLoader::parse(
            r#"
            multiclass_min_level = 4
            thresholds_include_level = false

            [defaults]
            max_loadout = 6
            "#,
        )
        .expect("parse");
        assert_eq!(rules.multiclass_min_level, 4);
        assert!(!rules.thresholds_include_level);
        assert_eq!(rules.defaults.max_loadout, 6);
        assert_eq!(rules.defaults.max_stress, 6);
        assert_eq!(rules.max_level, RulesConfig::MAX_LEVEL);
        assert_eq!(rules.achievements_at(5), (2, 2));
    }

    #[test]
    fn achievements_table_can_be_replaced() {
        let rules = RulesLoader::parse(
            r#"
            [[achievements]]
            level = 3
            proficiency = 2
            experiences = 0
            "#,
        )
        .expect("parse");
        assert_eq!(rules.achievements_at(2), (0, 0));
        assert_eq!(rules.achievements_at(10), (2, 0));
    }

    #[test]
    fn level_cap_above_ten_is_rejected() {
        assert!(RulesLoader::parse("max_level = 12").is_err());
    }

    #[test]
    fn absent_file_means_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let rules = RulesLoader::load_or_default(&dir.path().join("rules.toml")).expect("defaults");
        assert_eq!(rules, RulesConfig::default());
    }
}
