//! Edit pipeline and snapshot publishing.
//!
//! [`SheetEngine`] is the only way a character record changes. Every edit is
//! applied to a copy, followed by the full repair sequence and a fresh
//! resolution, so a record handed back by the engine is always consistent
//! and carries up-to-date derived stats. [`SheetSession`] wraps one record
//! and republishes the result of every edit to its subscribers.

mod edit;
mod errors;
mod publish;

pub use edit::{Edit, EditError};
pub use errors::EngineError;
pub use publish::{Published, SheetSession, SnapshotSink};

use crate::catalog::CatalogOracle;
use crate::character::Character;
use crate::config::RulesConfig;
use crate::progression::{UsageCounts, ValidationError, Validator, Violation, option_usage};
use crate::stats::{DerivedStats, ResolveError, resolve};

/// Result of one edit: the new record and the repairs it triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub character: Character,
    /// Fixes applied after the raw write, in application order.
    pub repairs: Vec<Violation>,
}

/// Pure edit reducer over read-only content.
#[derive(Clone, Copy)]
pub struct SheetEngine<'a> {
    catalog: &'a dyn CatalogOracle,
    rules: &'a RulesConfig,
}

impl<'a> SheetEngine<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, rules: &'a RulesConfig) -> Self {
        Self { catalog, rules }
    }

    pub fn catalog(&self) -> &'a dyn CatalogOracle {
        self.catalog
    }

    pub fn rules(&self) -> &'a RulesConfig {
        self.rules
    }

    /// Applies `edit` to a copy of `character`.
    ///
    /// Pipeline: raw write → repair → resolve → store derived. The input is
    /// never touched; on error nothing is returned.
    pub fn apply_edit(&self, character: &Character, edit: Edit) -> Result<EditOutcome, EngineError> {
        let mut next = character.clone();
        edit.apply_raw(&mut next, self.rules)?;
        let repairs = self.recompute(&mut next)?;
        Ok(EditOutcome {
            character: next,
            repairs,
        })
    }

    /// Repairs `character` in place and refreshes its derived stats.
    pub fn recompute(&self, character: &mut Character) -> Result<Vec<Violation>, ResolveError> {
        let repairs = Validator::new(self.catalog, self.rules).repair(character)?;
        let derived = self.resolve(character)?;
        character.store_derived(derived);
        Ok(repairs)
    }

    /// Explicit-validation path: every violation, nothing mutated.
    pub fn audit(&self, character: &Character) -> Result<Vec<ValidationError>, ResolveError> {
        Validator::new(self.catalog, self.rules).report(character)
    }

    /// Reads an untrusted record: reports its violations, then returns the
    /// repaired, recomputed copy alongside them.
    pub fn import(
        &self,
        character: Character,
    ) -> Result<(Character, Vec<ValidationError>), ResolveError> {
        let report = self.audit(&character)?;
        let mut repaired = character;
        self.recompute(&mut repaired)?;
        Ok((repaired, report))
    }

    /// Derived stats of `character` as it stands, without repairing it.
    pub fn resolve(&self, character: &Character) -> Result<DerivedStats, ResolveError> {
        resolve(character, self.catalog, self.rules)
    }

    pub fn usage(&self, character: &Character) -> UsageCounts {
        option_usage(character, self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Slot;
    use crate::progression::RuleKind;
    use crate::testing::{fixture_catalog, guardian};

    #[test]
    fn edit_returns_a_new_record_and_leaves_the_input_alone() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let engine = SheetEngine::new(&catalog, &rules);
        let character = guardian("Quill");

        let outcome = engine
            .apply_edit(&character, Edit::SetLevel(2))
            .expect("level up");
        assert_eq!(character.level, 1);
        assert_eq!(outcome.character.level, 2);
        assert_eq!(outcome.character.derived_stats().proficiency, 2);
        assert!(outcome.repairs.is_empty());
    }

    #[test]
    fn lowering_the_level_repairs_orphaned_choices() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let engine = SheetEngine::new(&catalog, &rules);
        let mut character = guardian("Quill");
        character.level = 3;
        *character.choice_mut(3, Slot::A) =
            crate::character::LevelUpChoice::with_option("hp_slot");
        engine.recompute(&mut character).expect("recompute");
        assert_eq!(character.derived_stats().max_hp, 8);

        let outcome = engine
            .apply_edit(&character, Edit::SetLevel(2))
            .expect("level down");
        assert_eq!(outcome.repairs.len(), 1);
        assert_eq!(outcome.repairs[0].rule, RuleKind::LevelHorizon);
        assert_eq!(outcome.character.derived_stats().max_hp, 7);
        assert!(outcome.character.level_up_choices.get(&3).is_none());
    }

    #[test]
    fn malformed_edit_is_rejected() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let engine = SheetEngine::new(&catalog, &rules);
        let result = engine.apply_edit(
            &guardian("Quill"),
            Edit::SelectOption {
                level: 1,
                slot: Slot::A,
                option_id: Some("hp_slot".into()),
            },
        );
        assert!(matches!(result, Err(EngineError::Edit(EditError::NoLevelUpAtLevel(1)))));
    }

    #[test]
    fn import_reports_then_repairs() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let engine = SheetEngine::new(&catalog, &rules);
        let mut character = guardian("Quill");
        character.level = 2;
        *character.choice_mut(2, Slot::B) =
            crate::character::LevelUpChoice::with_option("hope_surge");

        let (repaired, report) = engine.import(character).expect("import");
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].rule, RuleKind::TierGating);
        assert!(repaired.choice(2, Slot::B).is_none_or(|choice| choice.is_empty()));
        assert_eq!(repaired.derived_stats().max_hope, 6);
    }
}
