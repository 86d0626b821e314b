//! Domain-card legality and loadout sanitation.

use super::{ProgressionRule, RuleContext};
use crate::catalog::OptionKind;
use crate::character::{CardOrigin, Character};
use crate::ids::DomainCardId;
use crate::progression::fix::{Fix, PayloadField};
use crate::progression::violation::{RuleKind, Violation};
use crate::stats::ResolveError;

/// Acquired cards come from an accessible domain, respect their level
/// requirement, and appear once.
///
/// A card from a primary-class domain may require up to the level it was
/// acquired at. A card from the multiclass domain needs multiclassing at or
/// before that level and may require at most half of it, rounded up.
#[derive(Debug)]
pub struct DomainCard;

impl ProgressionRule for DomainCard {
    fn kind(&self) -> RuleKind {
        RuleKind::DomainCard
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let catalog = ctx.catalog;
        let primary = character
            .primary_class
            .as_ref()
            .and_then(|id| catalog.class(id));
        let multiclassed_at = ctx
            .occurrences(character)
            .into_iter()
            .find(|(_, kind)| *kind == Some(OptionKind::Multiclass))
            .map(|(occurrence, _)| occurrence.level);

        let mut held: Vec<&DomainCardId> = Vec::new();
        for (position, entry) in character.card_acquisitions().into_iter().enumerate() {
            let Some(card) = catalog.domain_card(entry.card) else {
                continue;
            };
            let level = entry.origin.level();
            let through_multiclass = character.multiclass_domain.as_ref() == Some(&card.domain_id)
                && multiclassed_at.is_some_and(|at| at <= level);

            let problem = if held.contains(&entry.card) {
                Some(format!("'{}' is already in the vault", card.id))
            } else if primary.is_some_and(|class| class.has_domain(&card.domain_id)) {
                (card.level_requirement > level).then(|| {
                    format!(
                        "'{}' needs level {}, acquired at level {level}",
                        card.id, card.level_requirement
                    )
                })
            } else if through_multiclass {
                let cap = level.div_ceil(2);
                (card.level_requirement > cap).then(|| {
                    format!(
                        "'{}' needs level {}, multiclass cards at level {level} are capped at {cap}",
                        card.id, card.level_requirement
                    )
                })
            } else {
                Some(format!(
                    "domain '{}' of '{}' is not accessible",
                    card.domain_id, card.id
                ))
            };

            if let Some(message) = problem {
                let violation = match entry.origin {
                    CardOrigin::Starting => {
                        Violation::new(self.kind(), message, Fix::RemoveStartingDomainCard(position))
                    }
                    CardOrigin::LevelReward(level) => {
                        Violation::new(self.kind(), message, Fix::RemoveLevelDomainCard(level))
                            .at(level, None)
                    }
                    CardOrigin::Choice { level, slot } => {
                        let fix = Fix::ClearPayload {
                            level,
                            slot,
                            field: PayloadField::SelectedDomainCard,
                        };
                        Violation::new(self.kind(), message, fix).at(level, Some(slot))
                    }
                };
                return Ok(Some(violation));
            }
            held.push(entry.card);
        }
        Ok(None)
    }
}

/// Loadout indices are unique, inside the vault and within capacity.
#[derive(Debug)]
pub struct Loadout;

impl ProgressionRule for Loadout {
    fn kind(&self) -> RuleKind {
        RuleKind::Loadout
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let vault_size = character.vault().len();
        for (position, index) in character.loadout.iter().enumerate() {
            let message = if *index >= vault_size {
                Some(format!("loadout index {index} is outside the vault ({vault_size} cards)"))
            } else if character.loadout[..position].contains(index) {
                Some(format!("loadout index {index} is listed twice"))
            } else {
                None
            };
            if let Some(message) = message {
                return Ok(Some(Violation::new(
                    self.kind(),
                    message,
                    Fix::RemoveLoadoutEntry(position),
                )));
            }
        }

        let capacity = ctx.resolve(character)?.loadout_capacity();
        if character.loadout.len() > capacity {
            let message = format!(
                "{} loadout cards, capacity is {capacity}",
                character.loadout.len()
            );
            let last = character.loadout.len() - 1;
            return Ok(Some(Violation::new(
                self.kind(),
                message,
                Fix::RemoveLoadoutEntry(last),
            )));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{LevelUpChoice, Slot};
    use crate::config::RulesConfig;
    use crate::testing::{fixture_catalog, guardian};

    fn first(rule: &dyn ProgressionRule, character: &Character) -> Option<Violation> {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        rule.inspect(character, &RuleContext::new(&catalog, &rules))
            .expect("inspect")
    }

    #[test]
    fn card_above_acquisition_level_is_removed() {
        let mut character = guardian("Isolde");
        character.level = 4;
        // rage_up requires level 3
        character.level_up_domain_cards.insert(2, "rage_up".into());
        let violation = first(&DomainCard, &character).expect("violation");
        assert_eq!(violation.fix, Fix::RemoveLevelDomainCard(2));

        character.level_up_domain_cards.clear();
        character.level_up_domain_cards.insert(3, "rage_up".into());
        assert_eq!(first(&DomainCard, &character), None);
    }

    #[test]
    fn duplicate_acquisition_is_removed() {
        let mut character = guardian("Isolde");
        character.level = 2;
        character.starting_domain_cards = vec!["get_back_up".into()];
        let mut choice = LevelUpChoice::with_option("domain_card");
        choice.selected_domain_card = Some("get_back_up".into());
        *character.choice_mut(2, Slot::A) = choice;
        let violation = first(&DomainCard, &character).expect("violation");
        assert_eq!(violation.slot, Some(Slot::A));
    }

    #[test]
    fn card_outside_accessible_domains_is_removed() {
        let mut character = guardian("Isolde");
        character.starting_domain_cards = vec!["get_back_up".into(), "book_of_ava".into()];
        let violation = first(&DomainCard, &character).expect("violation");
        assert_eq!(violation.fix, Fix::RemoveStartingDomainCard(1));
    }

    #[test]
    fn loadout_drops_out_of_range_then_duplicates() {
        let mut character = guardian("Isolde");
        character.starting_domain_cards = vec!["get_back_up".into(), "bare_bones".into()];
        character.loadout = vec![1, 5, 1];
        let violation = first(&Loadout, &character).expect("violation");
        assert_eq!(violation.fix, Fix::RemoveLoadoutEntry(1));

        character.loadout = vec![1, 0, 1];
        let violation = first(&Loadout, &character).expect("violation");
        assert_eq!(violation.fix, Fix::RemoveLoadoutEntry(2));
    }
}
