//! The character record: raw selections plus the derived-stats block.
//!
//! Raw fields are written by edits (see [`crate::engine::Edit`]). The derived
//! block is private and only the engine stores into it, so it is always the
//! output of the last recompute.
mod equipment;
mod level_up;
mod vault;

pub use equipment::{EquipSlot, Equipment};
pub use level_up::{LevelUpChoice, LevelUpSlots, Slot, SubclassTier};
pub use vault::{CardOrigin, VaultEntry};

use std::collections::BTreeMap;

use crate::ids::{ClassId, DomainCardId, DomainId, LootId, SubclassId};
use crate::model::TraitKind;
use crate::stats::DerivedStats;

/// One score per trait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraitScores {
    pub agility: i32,
    pub strength: i32,
    pub finesse: i32,
    pub instinct: i32,
    pub presence: i32,
    pub knowledge: i32,
}

impl TraitScores {
    pub fn get(&self, kind: TraitKind) -> i32 {
        match kind {
            TraitKind::Agility => self.agility,
            TraitKind::Strength => self.strength,
            TraitKind::Finesse => self.finesse,
            TraitKind::Instinct => self.instinct,
            TraitKind::Presence => self.presence,
            TraitKind::Knowledge => self.knowledge,
        }
    }

    pub fn set(&mut self, kind: TraitKind, value: i32) {
        let score = match kind {
            TraitKind::Agility => &mut self.agility,
            TraitKind::Strength => &mut self.strength,
            TraitKind::Finesse => &mut self.finesse,
            TraitKind::Instinct => &mut self.instinct,
            TraitKind::Presence => &mut self.presence,
            TraitKind::Knowledge => &mut self.knowledge,
        };
        *score = value;
    }
}

/// Character-entered starting values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub traits: TraitScores,
    pub proficiency: i32,
    /// Experiences the character starts with.
    pub max_experiences: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            traits: TraitScores::default(),
            proficiency: 1,
            max_experiences: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Character {
    pub name: String,
    pub level: u8,
    pub primary_class: Option<ClassId>,
    pub primary_subclass: Option<SubclassId>,
    /// Only legal after a multiclass level-up option.
    pub secondary_class: Option<ClassId>,
    pub secondary_subclass: Option<SubclassId>,
    /// Domain of the secondary class opened up by multiclassing.
    pub multiclass_domain: Option<DomainId>,
    pub base_stats: BaseStats,
    /// Keyed by level, 2..=10.
    pub level_up_choices: BTreeMap<u8, LevelUpSlots>,
    /// Card granted for reaching each level, 2..=10.
    pub level_up_domain_cards: BTreeMap<u8, DomainCardId>,
    /// Cards picked at level 1.
    pub starting_domain_cards: Vec<DomainCardId>,
    /// Indices into [`Character::vault`].
    pub loadout: Vec<usize>,
    /// Per card, answers to its choices: choice id → selection id.
    pub domain_card_choices: BTreeMap<DomainCardId, BTreeMap<String, String>>,
    pub equipment: Equipment,
    /// Ad-hoc sources such as relics or purchased bonuses.
    pub additional_modifier_ids: Vec<LootId>,
    derived_stats: DerivedStats,
}

impl Character {
    /// Blank level-1 character.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            primary_class: None,
            primary_subclass: None,
            secondary_class: None,
            secondary_subclass: None,
            multiclass_domain: None,
            base_stats: BaseStats::default(),
            level_up_choices: BTreeMap::new(),
            level_up_domain_cards: BTreeMap::new(),
            starting_domain_cards: Vec::new(),
            loadout: Vec::new(),
            domain_card_choices: BTreeMap::new(),
            equipment: Equipment::default(),
            additional_modifier_ids: Vec::new(),
            derived_stats: DerivedStats::default(),
        }
    }

    /// Output of the last recompute. Stale until the record has been fed
    /// through the engine.
    pub fn derived_stats(&self) -> &DerivedStats {
        &self.derived_stats
    }

    pub(crate) fn store_derived(&mut self, derived: DerivedStats) {
        self.derived_stats = derived;
    }

    pub fn choice(&self, level: u8, slot: Slot) -> Option<&LevelUpChoice> {
        self.level_up_choices.get(&level).map(|slots| slots.get(slot))
    }

    /// Mutable slot, created on demand.
    pub fn choice_mut(&mut self, level: u8, slot: Slot) -> &mut LevelUpChoice {
        self.level_up_choices.entry(level).or_default().get_mut(slot)
    }

    /// Non-empty choices from level 2 up to the current level, ordered by
    /// level then slot.
    pub fn active_choices(&self) -> impl Iterator<Item = (u8, Slot, &LevelUpChoice)> + '_ {
        self.level_up_choices
            .range(2..=self.level.max(2))
            .filter(move |(level, _)| **level <= self.level)
            .flat_map(|(level, slots)| {
                [(*level, Slot::A, &slots.a), (*level, Slot::B, &slots.b)]
            })
            .filter(|(_, _, choice)| !choice.is_empty())
    }

    pub fn card_choice(&self, card: &DomainCardId, choice_id: &str) -> Option<&str> {
        self.domain_card_choices
            .get(card)
            .and_then(|choices| choices.get(choice_id))
            .map(String::as_str)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_choices_stop_at_current_level() {
        let mut character = Character::new("Ila");
        character.level = 3;
        *character.choice_mut(2, Slot::B) = LevelUpChoice::with_option("hp_slot");
        *character.choice_mut(3, Slot::A) = LevelUpChoice::with_option("stress_slot");
        *character.choice_mut(4, Slot::A) = LevelUpChoice::with_option("evasion_plus_1");

        let seen: Vec<_> = character
            .active_choices()
            .map(|(level, slot, _)| (level, slot))
            .collect();
        assert_eq!(seen, [(2, Slot::B), (3, Slot::A)]);
    }

    #[test]
    fn level_one_has_no_active_choices() {
        let mut character = Character::new("Ila");
        *character.choice_mut(2, Slot::A) = LevelUpChoice::with_option("hp_slot");
        assert_eq!(character.active_choices().count(), 0);
    }
}
