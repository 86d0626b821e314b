//! Condition evaluation against a character snapshot.

use std::collections::BTreeMap;

use super::resolve::ResolveError;
use crate::catalog::{CatalogOracle, DomainCardDef};
use crate::character::{Character, Equipment};
use crate::ids::DomainCardId;
use crate::model::Condition;

/// The slice of a character conditions can observe.
///
/// Captured once per resolution so that every modifier sees the same state.
#[derive(Clone, Debug)]
pub struct CharacterSnapshot<'a> {
    pub level: u8,
    pub equipment: &'a Equipment,
    /// Catalog entries of the loadout cards, in loadout order.
    pub loadout: Vec<&'a DomainCardDef>,
    pub card_choices: &'a BTreeMap<DomainCardId, BTreeMap<String, String>>,
}

impl<'a> CharacterSnapshot<'a> {
    pub fn capture<C>(character: &'a Character, catalog: &'a C) -> Result<Self, ResolveError>
    where
        C: CatalogOracle + ?Sized,
    {
        let loadout = character
            .loadout_cards()
            .into_iter()
            .map(|id| {
                catalog
                    .domain_card(id)
                    .ok_or_else(|| ResolveError::unknown("domain card", id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            level: character.level,
            equipment: &character.equipment,
            loadout,
            card_choices: &character.domain_card_choices,
        })
    }

    fn in_loadout(&self, card: &DomainCardId) -> bool {
        self.loadout.iter().any(|def| &def.id == card)
    }
}

/// Whether `condition` holds for `snapshot`.
pub fn evaluate(condition: &Condition, snapshot: &CharacterSnapshot<'_>) -> bool {
    match condition {
        Condition::Level { min, max } => (*min..=*max).contains(&snapshot.level),
        Condition::ArmorEquipped { value } => snapshot.equipment.armor_equipped() == *value,
        Condition::PrimaryWeaponEquipped { weapon_id } => {
            snapshot.equipment.primary_weapon == *weapon_id
        }
        Condition::SecondaryWeaponEquipped { weapon_id } => {
            snapshot.equipment.secondary_weapon == *weapon_id
        }
        Condition::MinLoadoutCardsFromDomain {
            domain_id,
            min_cards,
        } => {
            let count = snapshot
                .loadout
                .iter()
                .filter(|card| &card.domain_id == domain_id)
                .count();
            count >= *min_cards as usize
        }
        Condition::DomainCardChoice {
            domain_card_id,
            choice_id,
            selection_id,
        } => {
            snapshot.in_loadout(domain_card_id)
                && snapshot
                    .card_choices
                    .get(domain_card_id)
                    .and_then(|choices| choices.get(choice_id))
                    .is_some_and(|selected| selected == selection_id)
        }
    }
}

/// Logical AND over `conditions`; an empty list always holds.
pub fn all_hold(conditions: &[Condition], snapshot: &CharacterSnapshot<'_>) -> bool {
    conditions
        .iter()
        .all(|condition| evaluate(condition, snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_catalog;

    fn snapshot_of<'a>(
        character: &'a Character,
        catalog: &'a crate::catalog::Catalog,
    ) -> CharacterSnapshot<'a> {
        CharacterSnapshot::capture(character, catalog).expect("known loadout")
    }

    #[test]
    fn level_range_is_inclusive_at_both_ends() {
        let catalog = fixture_catalog();
        let mut character = Character::new("Edda");
        let condition = Condition::level(2, 4).expect("valid");
        for (level, expected) in [(1, false), (2, true), (4, true), (5, false)] {
            character.level = level;
            assert_eq!(
                evaluate(&condition, &snapshot_of(&character, &catalog)),
                expected,
                "level {level}"
            );
        }
    }

    #[test]
    fn weapon_condition_with_no_id_means_empty_slot() {
        let catalog = fixture_catalog();
        let mut character = Character::new("Edda");
        let empty = Condition::secondary_weapon(None);
        assert!(evaluate(&empty, &snapshot_of(&character, &catalog)));

        character.equipment.secondary_weapon = Some("round_shield".into());
        assert!(!evaluate(&empty, &snapshot_of(&character, &catalog)));
        assert!(evaluate(
            &Condition::secondary_weapon(Some("round_shield".into())),
            &snapshot_of(&character, &catalog)
        ));
    }

    #[test]
    fn loadout_count_ignores_vault_only_cards() {
        let catalog = fixture_catalog();
        let mut character = Character::new("Edda");
        character.starting_domain_cards = vec!["get_back_up".into(), "bare_bones".into()];
        character.loadout = vec![0];
        let condition = Condition::min_loadout_cards("valor".into(), 2).expect("valid");
        assert!(!evaluate(&condition, &snapshot_of(&character, &catalog)));

        character.loadout = vec![0, 1];
        assert!(evaluate(&condition, &snapshot_of(&character, &catalog)));
    }

    #[test]
    fn card_choice_requires_the_card_in_loadout() {
        let catalog = fixture_catalog();
        let mut character = Character::new("Edda");
        character.starting_domain_cards = vec!["get_back_up".into()];
        character
            .domain_card_choices
            .entry("get_back_up".into())
            .or_default()
            .insert("stance".into(), "steady".into());
        let condition =
            Condition::domain_card_choice("get_back_up".into(), "stance", "steady").expect("valid");
        assert!(!evaluate(&condition, &snapshot_of(&character, &catalog)));

        character.loadout = vec![0];
        assert!(evaluate(&condition, &snapshot_of(&character, &catalog)));
    }

    #[test]
    fn empty_condition_list_always_holds() {
        let catalog = fixture_catalog();
        let character = Character::new("Edda");
        assert!(all_hold(&[], &snapshot_of(&character, &catalog)));
    }

    #[test]
    fn unknown_loadout_card_is_a_resolve_error() {
        let catalog = fixture_catalog();
        let mut character = Character::new("Edda");
        character.starting_domain_cards = vec!["no_such_card".into()];
        character.loadout = vec![0];
        assert!(matches!(
            CharacterSnapshot::capture(&character, &catalog),
            Err(ResolveError::UnknownReference { table: "domain card", .. })
        ));
    }
}
