//! Catalog entry definitions.
//!
//! Content data only: each entry carries the modifiers it contributes while
//! active on a character. Display text beyond a name belongs to the
//! presentation layer.

use crate::character::SubclassTier;
use crate::ids::{ArmorId, ClassId, DomainCardId, DomainId, LootId, OptionId, SubclassId, WeaponId};
use crate::model::Modifier;
use crate::progression::Tier;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub id: ClassId,
    pub name: String,
    /// Domains the class grants access to.
    pub domains: Vec<DomainId>,
    /// Class features (starting evasion, hit points, ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
}

impl ClassDef {
    pub fn has_domain(&self, domain: &DomainId) -> bool {
        self.domains.contains(domain)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubclassDef {
    pub id: SubclassId,
    pub class_id: ClassId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub foundation: Vec<Modifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub specialization: Vec<Modifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mastery: Vec<Modifier>,
}

impl SubclassDef {
    pub fn features(&self, tier: SubclassTier) -> &[Modifier] {
        match tier {
            SubclassTier::Foundation => &self.foundation,
            SubclassTier::Specialization => &self.specialization,
            SubclassTier::Mastery => &self.mastery,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainCardDef {
    pub id: DomainCardId,
    pub domain_id: DomainId,
    pub name: String,
    pub level_requirement: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum WeaponCategory {
    Primary,
    Secondary,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDef {
    pub id: WeaponId,
    pub name: String,
    pub category: WeaponCategory,
    pub level_requirement: u8,
    /// Hands needed to wield.
    pub burden: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorDef {
    pub id: ArmorId,
    pub name: String,
    pub level_requirement: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
}

/// Loot, relics and purchased bonuses referenced from
/// `additional_modifier_ids`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDef {
    pub id: LootId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
}

/// What a level-up option does beyond its plain modifiers.
///
/// The kind decides which [`crate::character::LevelUpChoice`] payload fields
/// are meaningful and which progression rules look at the choice.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum OptionKind {
    /// Marks two distinct traits for +1 each.
    TraitIncrease,
    HitPointSlot,
    StressSlot,
    /// +1 to two selected experiences.
    ExperienceBonus,
    /// Grants one extra domain card.
    DomainCard,
    Evasion,
    /// Unlocks the next tier of the primary subclass.
    SubclassUpgrade,
    /// Unlocks the specialization of the multiclass subclass.
    SecondarySubclassUpgrade,
    Proficiency,
    Multiclass,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpOptionDef {
    pub id: OptionId,
    pub name: String,
    pub kind: OptionKind,
    /// Earliest tier offering this option.
    pub tier: Tier,
    /// Times the option may be taken over the whole character history.
    pub max_usage: u8,
    /// Takes both slots of one level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub costs_two_slots: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
}
