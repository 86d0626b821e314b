//! Structural rules: level bounds and catalog references.

use super::{ProgressionRule, RuleContext};
use crate::character::{Character, EquipSlot};
use crate::config::RulesConfig;
use crate::progression::fix::{ClassField, Fix, PayloadField};
use crate::progression::violation::{RuleKind, Violation};
use crate::stats::ResolveError;

/// Level within `1..=max`; nothing recorded outside `2..=level`.
#[derive(Debug)]
pub struct LevelHorizon;

impl ProgressionRule for LevelHorizon {
    fn kind(&self) -> RuleKind {
        RuleKind::LevelHorizon
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let cap = ctx.rules.level_cap();
        if !(1..=cap).contains(&character.level) {
            return Ok(Some(Violation::new(
                self.kind(),
                format!("level {} is outside 1..={cap}", character.level),
                Fix::SetLevel(character.level.clamp(1, cap)),
            )));
        }

        let outside = |level: u8| level < RulesConfig::FIRST_LEVEL_UP || level > character.level;
        let stray = character
            .level_up_choices
            .iter()
            .filter(|(level, slots)| outside(**level) && !slots.is_empty())
            .map(|(level, _)| *level)
            .chain(
                character
                    .level_up_domain_cards
                    .keys()
                    .filter(|level| outside(**level))
                    .copied(),
            )
            .min();

        Ok(stray.map(|level| {
            Violation::new(
                self.kind(),
                format!(
                    "selections at level {level} are beyond level {}",
                    character.level
                ),
                Fix::DropLevel(level),
            )
            .at(level, None)
        }))
    }
}

/// Every id names a catalog entry.
#[derive(Debug)]
pub struct UnknownReference;

impl UnknownReference {
    fn violation(&self, what: &str, id: impl std::fmt::Display, fix: Fix) -> Violation {
        Violation::new(RuleKind::UnknownReference, format!("unknown {what} '{id}'"), fix)
    }
}

impl ProgressionRule for UnknownReference {
    fn kind(&self) -> RuleKind {
        RuleKind::UnknownReference
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let catalog = ctx.catalog;

        let classes = [
            (&character.primary_class, ClassField::PrimaryClass),
            (&character.secondary_class, ClassField::SecondaryClass),
        ];
        for (class, field) in classes {
            if let Some(id) = class
                && catalog.class(id).is_none()
            {
                return Ok(Some(self.violation("class", id, Fix::ClearClassField(field))));
            }
        }
        let subclasses = [
            (&character.primary_subclass, ClassField::PrimarySubclass),
            (&character.secondary_subclass, ClassField::SecondarySubclass),
        ];
        for (subclass, field) in subclasses {
            if let Some(id) = subclass
                && catalog.subclass(id).is_none()
            {
                return Ok(Some(self.violation("subclass", id, Fix::ClearClassField(field))));
            }
        }

        for (level, slot, choice) in character.active_choices() {
            if let Some(id) = &choice.option_id
                && catalog.level_up_option(id).is_none()
            {
                let fix = Fix::ClearChoice { level, slot };
                return Ok(Some(self.violation("level-up option", id, fix).at(level, Some(slot))));
            }
            if let Some(card) = &choice.selected_domain_card
                && catalog.domain_card(card).is_none()
            {
                let fix = Fix::ClearPayload {
                    level,
                    slot,
                    field: PayloadField::SelectedDomainCard,
                };
                return Ok(Some(self.violation("domain card", card, fix).at(level, Some(slot))));
            }
        }

        for (level, card) in character.level_up_domain_cards.range(..=character.level) {
            if catalog.domain_card(card).is_none() {
                let fix = Fix::RemoveLevelDomainCard(*level);
                return Ok(Some(self.violation("domain card", card, fix).at(*level, None)));
            }
        }
        for (index, card) in character.starting_domain_cards.iter().enumerate() {
            if catalog.domain_card(card).is_none() {
                let fix = Fix::RemoveStartingDomainCard(index);
                return Ok(Some(self.violation("domain card", card, fix)));
            }
        }

        let equipment = &character.equipment;
        let weapons = [
            (&equipment.primary_weapon, EquipSlot::PrimaryWeapon),
            (&equipment.secondary_weapon, EquipSlot::SecondaryWeapon),
        ];
        for (weapon, slot) in weapons {
            if let Some(id) = weapon
                && catalog.weapon(id).is_none()
            {
                return Ok(Some(self.violation("weapon", id, Fix::Unequip(slot))));
            }
        }
        if let Some(id) = &equipment.armor
            && catalog.armor(id).is_none()
        {
            return Ok(Some(self.violation("armor", id, Fix::Unequip(EquipSlot::Armor))));
        }

        for id in &character.additional_modifier_ids {
            if catalog.loot(id).is_none() {
                let fix = Fix::RemoveAdditionalModifier(id.clone());
                return Ok(Some(self.violation("additional modifier", id, fix)));
            }
        }

        Ok(None)
    }
}
