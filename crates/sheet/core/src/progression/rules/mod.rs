//! Progression rules.
//!
//! Each rule guards one invariant. [`ProgressionRule::inspect`] reports the
//! first violation in the current state; the validator applies its fix and
//! asks again until the rule is satisfied, then moves on to the next rule.
//! Stats-dependent rules can be unsettled by later fixes, so the validator
//! reruns the whole sequence until nothing changes.

mod cards;
mod classes;
mod equipment;
mod options;
mod selections;
mod structure;

use std::sync::Arc;

use super::usage::{Occurrence, occurrences};
use super::violation::{RuleKind, Violation};
use crate::catalog::{CatalogOracle, LevelUpOptionDef, OptionKind};
use crate::character::{Character, LevelUpChoice};
use crate::config::RulesConfig;
use crate::stats::{DerivedStats, ResolveError, resolve};

/// Read-only inputs shared by every rule.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub catalog: &'a dyn CatalogOracle,
    pub rules: &'a RulesConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, rules: &'a RulesConfig) -> Self {
        Self { catalog, rules }
    }

    pub fn option(&self, choice: &LevelUpChoice) -> Option<&'a LevelUpOptionDef> {
        choice
            .option_id
            .as_ref()
            .and_then(|id| self.catalog.level_up_option(id))
    }

    pub fn kind_of(&self, choice: &LevelUpChoice) -> Option<OptionKind> {
        self.option(choice).map(|option| option.kind)
    }

    /// Option occurrences with their kind, oldest first.
    pub fn occurrences(&self, character: &Character) -> Vec<(Occurrence, Option<OptionKind>)> {
        occurrences(character, self.catalog)
            .into_iter()
            .map(|occurrence| {
                let kind = self.catalog.option_kind(&occurrence.option_id);
                (occurrence, kind)
            })
            .collect()
    }

    pub fn resolve(&self, character: &Character) -> Result<DerivedStats, ResolveError> {
        resolve(character, self.catalog, self.rules)
    }
}

/// One consistency invariant over a character's raw selections.
pub trait ProgressionRule: Send + Sync {
    fn kind(&self) -> RuleKind;

    /// First violation of this rule, `None` when the character satisfies it.
    ///
    /// Rules that need derived stats resolve the character as it stands, so
    /// they see the fixes applied by earlier iterations.
    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError>;
}

/// The full rule sequence, in [`RuleKind`] order.
pub fn default_rules() -> Arc<[Arc<dyn ProgressionRule>]> {
    let mut rules: Vec<Arc<dyn ProgressionRule>> = vec![
        Arc::new(structure::LevelHorizon),
        Arc::new(structure::UnknownReference),
        Arc::new(options::TierGating),
        Arc::new(options::TwoSlot),
        Arc::new(options::UsageCeiling),
        Arc::new(options::Multiclass),
        Arc::new(options::StalePayload),
        Arc::new(classes::ClassCoherence),
        Arc::new(classes::SubclassUpgrade),
        Arc::new(selections::TraitMarks),
        Arc::new(cards::DomainCard),
        Arc::new(equipment::EquipmentLegality),
        Arc::new(cards::Loadout),
        Arc::new(selections::ExperienceBonus),
    ];

    rules.sort_by_key(|rule| rule.kind());

    rules.into()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn sequence_covers_every_rule_once_in_order() {
        let kinds: Vec<_> = default_rules().iter().map(|rule| rule.kind()).collect();
        let expected: Vec<_> = RuleKind::iter().collect();
        assert_eq!(kinds, expected);
    }
}
