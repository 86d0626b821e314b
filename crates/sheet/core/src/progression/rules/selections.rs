//! Payload rules for trait marks and experience bonuses.

use super::{ProgressionRule, RuleContext};
use crate::catalog::OptionKind;
use crate::character::Character;
use crate::model::TraitKind;
use crate::progression::fix::Fix;
use crate::progression::tier::Tier;
use crate::progression::violation::{RuleKind, Violation};
use crate::stats::ResolveError;

/// A trait is marked at most once per tier window; the later mark goes.
#[derive(Debug)]
pub struct TraitMarks;

impl ProgressionRule for TraitMarks {
    fn kind(&self) -> RuleKind {
        RuleKind::TraitMarks
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let allowed = ctx.rules.trait_marks_per_option;
        let mut marked: Vec<(Tier, TraitKind)> = Vec::new();

        for (level, slot, choice) in character.active_choices() {
            if ctx.kind_of(choice) != Some(OptionKind::TraitIncrease) {
                continue;
            }
            let tier = Tier::of_level(level);
            for (index, mark) in choice.marked_traits.iter().enumerate() {
                let Some(trait_kind) = *mark else {
                    continue;
                };
                let message = if index >= allowed {
                    Some(format!("only {allowed} traits may be marked per choice"))
                } else if marked.contains(&(tier, trait_kind)) {
                    Some(format!(
                        "{trait_kind} already marked in tier {}",
                        tier.number()
                    ))
                } else {
                    None
                };
                if let Some(message) = message {
                    let fix = Fix::ClearMarkedTrait { level, slot, index };
                    return Ok(Some(
                        Violation::new(self.kind(), message, fix).at(level, Some(slot)),
                    ));
                }
                marked.push((tier, trait_kind));
            }
        }
        Ok(None)
    }
}

/// Experience selections are distinct, in range and within the per-option
/// allowance.
#[derive(Debug)]
pub struct ExperienceBonus;

impl ProgressionRule for ExperienceBonus {
    fn kind(&self) -> RuleKind {
        RuleKind::ExperienceBonus
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let selecting: Vec<_> = character
            .active_choices()
            .filter(|(_, _, choice)| {
                !choice.selected_experiences.is_empty()
                    && ctx.kind_of(choice) == Some(OptionKind::ExperienceBonus)
            })
            .collect();
        if selecting.is_empty() {
            return Ok(None);
        }

        let slots = ctx.resolve(character)?.experience_slots();
        let per_option = ctx.rules.experiences_per_bonus;
        for (level, slot, choice) in selecting {
            let mut kept: Vec<usize> = Vec::with_capacity(per_option);
            for index in &choice.selected_experiences {
                if *index < slots && !kept.contains(index) && kept.len() < per_option {
                    kept.push(*index);
                }
            }
            if kept != choice.selected_experiences {
                let message = format!(
                    "experience selection {:?} narrowed to {kept:?} ({slots} experiences)",
                    choice.selected_experiences
                );
                let fix = Fix::SetExperienceSelection {
                    level,
                    slot,
                    indices: kept,
                };
                return Ok(Some(
                    Violation::new(self.kind(), message, fix).at(level, Some(slot)),
                ));
            }
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

    fn marks(first: TraitKind, second: TraitKind) -> LevelUpChoice {
        let mut choice = LevelUpChoice::with_option("trait_increase");
        choice.marked_traits = [Some(first), Some(second)];
        choice
    }

    #[test]
    fn later_duplicate_in_the_same_tier_is_nulled() {
        let mut character = guardian("Corin");
        character.level = 4;
        *character.choice_mut(2, Slot::A) = marks(TraitKind::Agility, TraitKind::Strength);
        *character.choice_mut(4, Slot::B) = marks(TraitKind::Finesse, TraitKind::Agility);
        let violation = first(&TraitMarks, &character).expect("violation");
        assert_eq!(
            violation.fix,
            Fix::ClearMarkedTrait {
                level: 4,
                slot: Slot::B,
                index: 1
            }
        );
    }

    #[test]
    fn tier_windows_are_independent() {
        let mut character = guardian("Corin");
        character.level = 5;
        *character.choice_mut(2, Slot::A) = marks(TraitKind::Agility, TraitKind::Strength);
        *character.choice_mut(5, Slot::A) = marks(TraitKind::Agility, TraitKind::Strength);
        assert_eq!(first(&TraitMarks, &character), None);
    }

    #[test]
    fn same_trait_twice_in_one_choice_is_nulled() {
        let mut character = guardian("Corin");
        character.level = 2;
        *character.choice_mut(2, Slot::A) = marks(TraitKind::Presence, TraitKind::Presence);
        let violation = first(&TraitMarks, &character).expect("violation");
        assert_eq!(
            violation.fix,
            Fix::ClearMarkedTrait {
                level: 2,
                slot: Slot::A,
                index: 1
            }
        );
    }

    #[test]
    fn experience_selection_drops_duplicates_and_out_of_range() {
        let mut character = guardian("Corin");
        character.level = 2;
        let mut choice = LevelUpChoice::with_option("experience_bonus");
        // level 2: 2 base experiences + 1 achievement
        choice.selected_experiences = vec![1, 1, 7, 2];
        *character.choice_mut(2, Slot::A) = choice;
        let violation = first(&ExperienceBonus, &character).expect("violation");
        assert_eq!(
            violation.fix,
            Fix::SetExperienceSelection {
                level: 2,
                slot: Slot::A,
                indices: vec![1, 2]
            }
        );
    }
}
