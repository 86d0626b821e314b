//! Active weapons and armor.

use crate::ids::{ArmorId, WeaponId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    PrimaryWeapon,
    SecondaryWeapon,
    Armor,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub primary_weapon: Option<WeaponId>,
    pub secondary_weapon: Option<WeaponId>,
    pub armor: Option<ArmorId>,
}

impl Equipment {
    pub fn armor_equipped(&self) -> bool {
        self.armor.is_some()
    }

    pub fn unequip(&mut self, slot: EquipSlot) {
        match slot {
            EquipSlot::PrimaryWeapon => self.primary_weapon = None,
            EquipSlot::SecondaryWeapon => self.secondary_weapon = None,
            EquipSlot::Armor => self.armor = None,
        }
    }

    pub fn is_filled(&self, slot: EquipSlot) -> bool {
        match slot {
            EquipSlot::PrimaryWeapon => self.primary_weapon.is_some(),
            EquipSlot::SecondaryWeapon => self.secondary_weapon.is_some(),
            EquipSlot::Armor => self.armor.is_some(),
        }
    }
}
