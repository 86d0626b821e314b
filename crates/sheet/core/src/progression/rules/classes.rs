//! Class and subclass coherence.

use super::{ProgressionRule, RuleContext};
use crate::catalog::OptionKind;
use crate::character::{Character, SubclassTier};
use crate::progression::fix::{ClassField, Fix, PayloadField};
use crate::progression::violation::{RuleKind, Violation};
use crate::stats::ResolveError;

/// Subclasses follow their class, the secondary class follows a multiclass
/// choice, and the multiclass domain follows the secondary class.
#[derive(Debug)]
pub struct ClassCoherence;

impl ClassCoherence {
    fn clear(&self, field: ClassField, message: impl Into<String>) -> Option<Violation> {
        Some(Violation::new(
            RuleKind::ClassCoherence,
            message,
            Fix::ClearClassField(field),
        ))
    }
}

impl ProgressionRule for ClassCoherence {
    fn kind(&self) -> RuleKind {
        RuleKind::ClassCoherence
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let catalog = ctx.catalog;

        if let Some(subclass) = &character.primary_subclass {
            let belongs = catalog
                .subclass(subclass)
                .is_some_and(|def| character.primary_class.as_ref() == Some(&def.class_id));
            if !belongs {
                return Ok(self.clear(
                    ClassField::PrimarySubclass,
                    format!("subclass '{subclass}' does not belong to the primary class"),
                ));
            }
        }

        if let Some(secondary) = &character.secondary_class {
            if character.primary_class.as_ref() == Some(secondary) {
                return Ok(self.clear(
                    ClassField::SecondaryClass,
                    format!("secondary class '{secondary}' repeats the primary class"),
                ));
            }
            let multiclassed = ctx
                .occurrences(character)
                .iter()
                .any(|(_, kind)| *kind == Some(OptionKind::Multiclass));
            if !multiclassed {
                return Ok(self.clear(
                    ClassField::SecondaryClass,
                    format!("secondary class '{secondary}' without a multiclass choice"),
                ));
            }
        }

        if let Some(subclass) = &character.secondary_subclass {
            let belongs = catalog
                .subclass(subclass)
                .is_some_and(|def| character.secondary_class.as_ref() == Some(&def.class_id));
            if !belongs {
                return Ok(self.clear(
                    ClassField::SecondarySubclass,
                    format!("subclass '{subclass}' does not belong to the secondary class"),
                ));
            }
        }

        if let Some(domain) = &character.multiclass_domain {
            let granted = character
                .secondary_class
                .as_ref()
                .and_then(|class| catalog.class(class))
                .is_some_and(|class| class.has_domain(domain));
            if !granted {
                return Ok(self.clear(
                    ClassField::MulticlassDomain,
                    format!("domain '{domain}' is not offered by the secondary class"),
                ));
            }
        }

        Ok(None)
    }
}

/// Recorded subclass upgrades unlock tiers in sequence on a side that has a
/// subclass: specialization then mastery for the primary, specialization
/// only for the secondary.
#[derive(Debug)]
pub struct SubclassUpgrade;

impl ProgressionRule for SubclassUpgrade {
    fn kind(&self) -> RuleKind {
        RuleKind::SubclassUpgrade
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let mut primary_next = Some(SubclassTier::Specialization);
        let mut secondary_next = Some(SubclassTier::Specialization);

        for (level, slot, choice) in character.active_choices() {
            let Some(recorded) = choice.selected_subclass_upgrade else {
                continue;
            };
            let (next, has_subclass, side, cap) = match ctx.kind_of(choice) {
                Some(OptionKind::SubclassUpgrade) => (
                    &mut primary_next,
                    character.primary_subclass.is_some(),
                    "primary",
                    SubclassTier::Mastery,
                ),
                Some(OptionKind::SecondarySubclassUpgrade) => (
                    &mut secondary_next,
                    character.secondary_subclass.is_some(),
                    "secondary",
                    SubclassTier::Specialization,
                ),
                _ => continue,
            };

            let problem = if !has_subclass {
                Some(format!("no {side} subclass to upgrade"))
            } else if *next != Some(recorded) || recorded > cap {
                Some(format!("{side} subclass cannot unlock {recorded} here"))
            } else {
                None
            };

            if let Some(message) = problem {
                let fix = Fix::ClearPayload {
                    level,
                    slot,
                    field: PayloadField::SelectedSubclassUpgrade,
                };
                return Ok(Some(
                    Violation::new(self.kind(), message, fix).at(level, Some(slot)),
                ));
            }
            *next = recorded.next();
        }

        Ok(None)
    }
}
