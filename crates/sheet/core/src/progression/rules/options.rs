//! Rules over which options are taken where.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::{ProgressionRule, RuleContext};
use crate::catalog::OptionKind;
use crate::character::{Character, Slot};
use crate::ids::OptionId;
use crate::progression::fix::{Fix, PayloadField};
use crate::progression::tier::Tier;
use crate::progression::usage::Occurrence;
use crate::progression::violation::{RuleKind, Violation};
use crate::stats::ResolveError;

/// An option is only available from its own tier on.
#[derive(Debug)]
pub struct TierGating;

impl ProgressionRule for TierGating {
    fn kind(&self) -> RuleKind {
        RuleKind::TierGating
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        for (level, slot, choice) in character.active_choices() {
            let Some(option) = ctx.option(choice) else {
                continue;
            };
            let available = Tier::of_level(level);
            if option.tier > available {
                let message = format!(
                    "'{}' is a tier {} option, level {level} is tier {}",
                    option.id,
                    option.tier.number(),
                    available.number()
                );
                return Ok(Some(
                    Violation::new(self.kind(), message, Fix::ClearChoice { level, slot })
                        .at(level, Some(slot)),
                ));
            }
        }
        Ok(None)
    }
}

/// A two-slot option holds both slots of its level.
#[derive(Debug)]
pub struct TwoSlot;

impl ProgressionRule for TwoSlot {
    fn kind(&self) -> RuleKind {
        RuleKind::TwoSlot
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        for (level, slots) in &character.level_up_choices {
            if *level > character.level {
                break;
            }
            let two_slot = |slot: Slot| {
                ctx.option(slots.get(slot))
                    .filter(|option| option.costs_two_slots)
            };
            // slot A wins when both hold different two-slot options
            let Some((from, option)) = two_slot(Slot::A)
                .map(|option| (Slot::A, option))
                .or_else(|| two_slot(Slot::B).map(|option| (Slot::B, option)))
            else {
                continue;
            };
            let other = from.other();
            if slots.get(other).option_id.as_ref() != Some(&option.id) {
                let message = format!("'{}' takes both slots of level {level}", option.id);
                return Ok(Some(
                    Violation::new(self.kind(), message, Fix::Mirror { level: *level, from })
                        .at(*level, Some(other)),
                ));
            }
        }
        Ok(None)
    }
}

/// Each option is taken at most `max_usage` times; the newest extra goes.
#[derive(Debug)]
pub struct UsageCeiling;

impl ProgressionRule for UsageCeiling {
    fn kind(&self) -> RuleKind {
        RuleKind::UsageCeiling
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let mut taken: BTreeMap<OptionId, Vec<Occurrence>> = BTreeMap::new();
        for (occurrence, _) in ctx.occurrences(character) {
            taken
                .entry(occurrence.option_id.clone())
                .or_default()
                .push(occurrence);
        }

        for (option_id, occurrences) in taken {
            let Some(option) = ctx.catalog.level_up_option(&option_id) else {
                continue;
            };
            let max = usize::from(option.max_usage);
            if occurrences.len() <= max {
                continue;
            }
            if let Some(newest) = occurrences.last() {
                let message = format!(
                    "'{option_id}' taken {} times, at most {max} allowed",
                    occurrences.len()
                );
                let fix = Fix::clear_occurrence(newest.level, newest.slot());
                return Ok(Some(
                    Violation::new(self.kind(), message, fix).at(newest.level, newest.slot()),
                ));
            }
        }
        Ok(None)
    }
}

/// Multiclassing: minimum level, once only, exclusive with a subclass upgrade
/// in the same tier, and required before a secondary subclass upgrade.
#[derive(Debug)]
pub struct Multiclass;

impl Multiclass {
    fn clear(&self, occurrence: &Occurrence, message: String) -> Violation {
        Violation::new(
            RuleKind::Multiclass,
            message,
            Fix::clear_occurrence(occurrence.level, occurrence.slot()),
        )
        .at(occurrence.level, occurrence.slot())
    }
}

impl ProgressionRule for Multiclass {
    fn kind(&self) -> RuleKind {
        RuleKind::Multiclass
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let occurrences = ctx.occurrences(character);
        let of_kind = |wanted: OptionKind| {
            occurrences
                .iter()
                .filter(move |(_, kind)| *kind == Some(wanted))
                .map(|(occurrence, _)| occurrence)
        };

        let min_level = ctx.rules.multiclass_min_level;
        if let Some(early) = of_kind(OptionKind::Multiclass).find(|m| m.level < min_level) {
            let message = format!("multiclassing needs level {min_level}, taken at {}", early.level);
            return Ok(Some(self.clear(early, message)));
        }

        let multiclasses: Vec<&Occurrence> = of_kind(OptionKind::Multiclass).collect();
        if let [first, .., newest] = multiclasses.as_slice() {
            let message = format!("already multiclassed at level {}", first.level);
            return Ok(Some(self.clear(newest, message)));
        }

        if let Some(multiclass) = multiclasses.first() {
            let tier = Tier::of_level(multiclass.level);
            let conflict = of_kind(OptionKind::SubclassUpgrade)
                .find(|upgrade| Tier::of_level(upgrade.level) == tier);
            if let Some(upgrade) = conflict {
                let (later, earlier) = if upgrade.level >= multiclass.level {
                    (upgrade, *multiclass)
                } else {
                    (*multiclass, upgrade)
                };
                let message = format!(
                    "subclass upgrade and multiclass share tier {}; kept level {}",
                    tier.number(),
                    earlier.level
                );
                return Ok(Some(self.clear(later, message)));
            }
        }

        let premature = of_kind(OptionKind::SecondarySubclassUpgrade)
            .find(|upgrade| !multiclasses.iter().any(|m| m.level < upgrade.level));
        if let Some(upgrade) = premature {
            let message = "secondary subclass upgrade before multiclassing".to_owned();
            return Ok(Some(self.clear(upgrade, message)));
        }

        Ok(None)
    }
}

/// Payload field an option kind owns, if any.
fn payload_of(kind: OptionKind) -> Option<PayloadField> {
    match kind {
        OptionKind::TraitIncrease => Some(PayloadField::MarkedTraits),
        OptionKind::ExperienceBonus => Some(PayloadField::SelectedExperiences),
        OptionKind::DomainCard => Some(PayloadField::SelectedDomainCard),
        OptionKind::SubclassUpgrade | OptionKind::SecondarySubclassUpgrade => {
            Some(PayloadField::SelectedSubclassUpgrade)
        }
        OptionKind::HitPointSlot
        | OptionKind::StressSlot
        | OptionKind::Evasion
        | OptionKind::Proficiency
        | OptionKind::Multiclass
        | OptionKind::Other => None,
    }
}

/// Payload left behind by a replaced option is cleared.
#[derive(Debug)]
pub struct StalePayload;

impl ProgressionRule for StalePayload {
    fn kind(&self) -> RuleKind {
        RuleKind::StalePayload
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        for (level, slot, choice) in character.active_choices() {
            let owned = ctx.kind_of(choice).and_then(payload_of);
            let stale = PayloadField::iter().find(|field| field.is_set(choice) && Some(*field) != owned);
            if let Some(field) = stale {
                let message = match &choice.option_id {
                    Some(option_id) => format!("{field} does not belong to '{option_id}'"),
                    None => format!("{field} left without an option"),
                };
                return Ok(Some(
                    Violation::new(self.kind(), message, Fix::ClearPayload { level, slot, field })
                        .at(level, Some(slot)),
                ));
            }
        }
        Ok(None)
    }
}
