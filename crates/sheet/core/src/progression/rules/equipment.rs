//! Equipment legality.

use super::{ProgressionRule, RuleContext};
use crate::catalog::WeaponCategory;
use crate::character::{Character, EquipSlot};
use crate::progression::fix::Fix;
use crate::progression::violation::{RuleKind, Violation};
use crate::stats::ResolveError;

/// Equipped items fit their slot, the character's level and the burden
/// capacity. Over capacity, the secondary weapon goes first.
#[derive(Debug)]
pub struct EquipmentLegality;

impl EquipmentLegality {
    fn unequip(&self, slot: EquipSlot, message: String) -> Option<Violation> {
        Some(Violation::new(RuleKind::Equipment, message, Fix::Unequip(slot)))
    }
}

impl ProgressionRule for EquipmentLegality {
    fn kind(&self) -> RuleKind {
        RuleKind::Equipment
    }

    fn inspect(
        &self,
        character: &Character,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Violation>, ResolveError> {
        let catalog = ctx.catalog;
        let equipment = &character.equipment;
        let level = character.level;

        let weapons = [
            (
                EquipSlot::PrimaryWeapon,
                &equipment.primary_weapon,
                WeaponCategory::Primary,
            ),
            (
                EquipSlot::SecondaryWeapon,
                &equipment.secondary_weapon,
                WeaponCategory::Secondary,
            ),
        ];
        let mut burden: u32 = 0;
        for (slot, id, expected) in weapons {
            let Some(weapon) = id.as_ref().and_then(|id| catalog.weapon(id)) else {
                continue;
            };
            if weapon.category != expected {
                return Ok(self.unequip(
                    slot,
                    format!("'{}' is a {} weapon, equipped as {slot}", weapon.id, weapon.category),
                ));
            }
            if weapon.level_requirement > level {
                return Ok(self.unequip(
                    slot,
                    format!("'{}' needs level {}", weapon.id, weapon.level_requirement),
                ));
            }
            burden += u32::from(weapon.burden);
        }

        if let Some(armor) = equipment.armor.as_ref().and_then(|id| catalog.armor(id))
            && armor.level_requirement > level
        {
            return Ok(self.unequip(
                EquipSlot::Armor,
                format!("'{}' needs level {}", armor.id, armor.level_requirement),
            ));
        }

        if burden == 0 {
            return Ok(None);
        }
        let capacity = ctx.resolve(character)?.max_burden;
        if i64::from(burden) > i64::from(capacity) {
            let slot = if equipment.is_filled(EquipSlot::SecondaryWeapon) {
                EquipSlot::SecondaryWeapon
            } else {
                EquipSlot::PrimaryWeapon
            };
            return Ok(self.unequip(
                slot,
                format!("weapons need {burden} hands, burden capacity is {capacity}"),
            ));
        }
        Ok(None)
    }
}
