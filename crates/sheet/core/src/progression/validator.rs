//! Runs the rule sequence in repair or report mode.

use std::sync::Arc;

use super::rules::{ProgressionRule, RuleContext, default_rules};
use super::violation::{ValidationError, Violation};
use crate::catalog::CatalogOracle;
use crate::character::Character;
use crate::config::RulesConfig;
use crate::stats::ResolveError;

/// How violations are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ValidationMode {
    /// Apply every fix; used by the live editor.
    Repair,
    /// Leave the record untouched and list what repair would change.
    #[default]
    Report,
}

/// Progression validator.
///
/// Each rule is asked for its first violation until it has none; in between,
/// the violation's fix is applied. A rule whose fixes fail to converge within
/// [`Validator::MAX_FIXES_PER_RULE`] steps is abandoned for this pass.
///
/// A later rule can invalidate an earlier one (dropping a loadout card may
/// lower burden capacity), so the sequence is rerun until a pass changes
/// nothing, at most [`Validator::MAX_PASSES`] times.
pub struct Validator<'a> {
    ctx: RuleContext<'a>,
    rules: Arc<[Arc<dyn ProgressionRule>]>,
}

impl<'a> Validator<'a> {
    pub const MAX_FIXES_PER_RULE: usize = 256;
    pub const MAX_PASSES: usize = 8;

    pub fn new(catalog: &'a dyn CatalogOracle, rules: &'a RulesConfig) -> Self {
        Self {
            ctx: RuleContext::new(catalog, rules),
            rules: default_rules(),
        }
    }

    /// Repairs `character` in place and returns the applied violations in
    /// the order they were fixed.
    pub fn repair(&self, character: &mut Character) -> Result<Vec<Violation>, ResolveError> {
        let mut applied = Vec::new();
        for pass in 1..=Self::MAX_PASSES {
            let fixed = self.repair_pass(character, &mut applied)?;
            if fixed == 0 {
                return Ok(applied);
            }
            tracing::trace!(pass, fixed, "repair pass");
        }
        tracing::warn!(passes = Self::MAX_PASSES, "repair did not reach a fixed point");
        Ok(applied)
    }

    /// One run of the rule sequence; returns how many fixes it applied.
    fn repair_pass(
        &self,
        character: &mut Character,
        applied: &mut Vec<Violation>,
    ) -> Result<usize, ResolveError> {
        let start = applied.len();
        for rule in self.rules.iter() {
            let mut steps = 0;
            while let Some(violation) = rule.inspect(character, &self.ctx)? {
                tracing::debug!(
                    rule = %violation.rule,
                    level = ?violation.level,
                    slot = ?violation.slot,
                    fix = ?violation.fix,
                    "{}",
                    violation.message
                );
                violation.fix.apply(character);
                applied.push(violation);

                steps += 1;
                if steps >= Self::MAX_FIXES_PER_RULE {
                    tracing::warn!(rule = %rule.kind(), "rule did not converge");
                    break;
                }
            }
        }
        Ok(applied.len() - start)
    }

    /// Lists every violation repair would fix, without touching `character`.
    pub fn report(&self, character: &Character) -> Result<Vec<ValidationError>, ResolveError> {
        let mut scratch = character.clone();
        Ok(self
            .repair(&mut scratch)?
            .into_iter()
            .map(ValidationError::from)
            .collect())
    }

    pub fn run(
        &self,
        mode: ValidationMode,
        character: &mut Character,
    ) -> Result<Vec<ValidationError>, ResolveError> {
        match mode {
            ValidationMode::Repair => Ok(self
                .repair(character)?
                .into_iter()
                .map(ValidationError::from)
                .collect()),
            ValidationMode::Report => self.report(character),
        }
    }

    /// Whether `character` already satisfies every rule.
    pub fn is_consistent(&self, character: &Character) -> Result<bool, ResolveError> {
        for rule in self.rules.iter() {
            if rule.inspect(character, &self.ctx)?.is_some() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, DomainCardDef};
    use crate::character::{EquipSlot, LevelUpChoice, Slot};
    use crate::model::{Modifier, StatTarget};
    use crate::progression::fix::Fix;
    use crate::progression::violation::RuleKind;
    use crate::testing::{fixture_catalog, guardian};

    fn with_strong_back() -> Catalog {
        let mut catalog = fixture_catalog();
        catalog
            .insert_domain_card(DomainCardDef {
                id: "strong_back".into(),
                domain_id: "valor".into(),
                name: "Strong Back".into(),
                level_requirement: 1,
                modifiers: vec![Modifier::flat_bonus(StatTarget::MaxBurden, 1)],
            })
            .expect("card");
        catalog
    }

    fn rules_and_fixes(applied: Vec<Violation>) -> Vec<(RuleKind, Fix)> {
        applied
            .into_iter()
            .map(|violation| (violation.rule, violation.fix))
            .collect()
    }

    #[test]
    fn report_leaves_the_record_untouched() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let validator = Validator::new(&catalog, &rules);
        let mut character = guardian("Maeve");
        character.level = 2;
        *character.choice_mut(2, Slot::A) = LevelUpChoice::with_option("hope_surge");
        let before = character.clone();

        let errors = validator.report(&character).expect("report");
        assert_eq!(character, before);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, RuleKind::TierGating);
        assert_eq!(errors[0].level, Some(2));
        assert_eq!(errors[0].slot, Some(Slot::A));
    }

    #[test]
    fn repair_reaches_a_fixed_point() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let validator = Validator::new(&catalog, &rules);
        let mut character = guardian("Maeve");
        character.level = 12;
        *character.choice_mut(3, Slot::A) = LevelUpChoice::with_option("multiclass");
        character.secondary_class = Some("wizard".into());
        character.loadout = vec![0, 0, 4];

        let applied = validator.repair(&mut character).expect("repair");
        assert!(!applied.is_empty());
        assert!(validator.is_consistent(&character).expect("check"));
        assert!(validator.repair(&mut character).expect("repair").is_empty());
    }

    #[test]
    fn repeated_loadout_card_does_not_raise_burden_capacity() {
        let catalog = with_strong_back();
        let mut rules = RulesConfig::default();
        rules.defaults.max_burden = 1;
        let validator = Validator::new(&catalog, &rules);
        let mut character = guardian("Maeve");
        character.starting_domain_cards = vec!["strong_back".into()];
        character.loadout = vec![0, 0];
        character.equipment.primary_weapon = Some("greatsword".into());
        character.equipment.secondary_weapon = Some("round_shield".into());

        let applied = validator.repair(&mut character).expect("repair");
        assert_eq!(
            rules_and_fixes(applied),
            [
                (RuleKind::Equipment, Fix::Unequip(EquipSlot::SecondaryWeapon)),
                (RuleKind::Loadout, Fix::RemoveLoadoutEntry(1)),
            ]
        );
        assert!(validator.repair(&mut character).expect("repair").is_empty());
    }

    #[test]
    fn loadout_trim_reopens_equipment() {
        let catalog = with_strong_back();
        let mut rules = RulesConfig::default();
        rules.defaults.max_burden = 1;
        rules.defaults.max_loadout = 1;
        let validator = Validator::new(&catalog, &rules);
        let mut character = guardian("Maeve");
        character.starting_domain_cards = vec!["get_back_up".into(), "strong_back".into()];
        character.loadout = vec![0, 1];
        character.equipment.primary_weapon = Some("greatsword".into());

        let applied = validator.repair(&mut character).expect("repair");
        assert_eq!(
            rules_and_fixes(applied),
            [
                (RuleKind::Loadout, Fix::RemoveLoadoutEntry(1)),
                (RuleKind::Equipment, Fix::Unequip(EquipSlot::PrimaryWeapon)),
            ]
        );
        assert_eq!(character.loadout, [0]);
        assert!(validator.is_consistent(&character).expect("check"));
        assert!(validator.repair(&mut character).expect("repair").is_empty());
    }

    #[test]
    fn mode_parses_from_snake_case() {
        assert_eq!("repair".parse::<ValidationMode>(), Ok(ValidationMode::Repair));
        assert_eq!(ValidationMode::default(), ValidationMode::Report);
    }
}
