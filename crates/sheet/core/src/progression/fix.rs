//! Repairs applied to a character's raw selections.

use crate::character::{Character, EquipSlot, LevelUpChoice, Slot};
use crate::ids::{LootId, OptionId};

/// A class-side reference field of the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ClassField {
    PrimaryClass,
    PrimarySubclass,
    SecondaryClass,
    SecondarySubclass,
    MulticlassDomain,
}

/// An option-specific payload field of a [`LevelUpChoice`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum PayloadField {
    MarkedTraits,
    SelectedExperiences,
    SelectedDomainCard,
    SelectedSubclassUpgrade,
}

impl PayloadField {
    pub fn is_set(&self, choice: &LevelUpChoice) -> bool {
        match self {
            Self::MarkedTraits => choice.marked_traits.iter().any(Option::is_some),
            Self::SelectedExperiences => !choice.selected_experiences.is_empty(),
            Self::SelectedDomainCard => choice.selected_domain_card.is_some(),
            Self::SelectedSubclassUpgrade => choice.selected_subclass_upgrade.is_some(),
        }
    }

    fn clear(&self, choice: &mut LevelUpChoice) {
        match self {
            Self::MarkedTraits => choice.marked_traits = [None, None],
            Self::SelectedExperiences => choice.selected_experiences.clear(),
            Self::SelectedDomainCard => choice.selected_domain_card = None,
            Self::SelectedSubclassUpgrade => choice.selected_subclass_upgrade = None,
        }
    }
}

/// One mutation that brings a character closer to consistency.
///
/// Every fix only removes or narrows a selection, except [`Fix::SetLevel`]
/// (clamping) and [`Fix::Mirror`] (completing a two-slot option).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Fix {
    SetLevel(u8),
    /// Drops both choices and the reward card of one level.
    DropLevel(u8),
    ClearChoice { level: u8, slot: Slot },
    /// Clears a mirrored two-slot pair.
    ClearPair { level: u8 },
    /// Makes the other slot hold the same option as `from`, without payload.
    Mirror { level: u8, from: Slot },
    ClearPayload { level: u8, slot: Slot, field: PayloadField },
    ClearMarkedTrait { level: u8, slot: Slot, index: usize },
    SetExperienceSelection { level: u8, slot: Slot, indices: Vec<usize> },
    RemoveLevelDomainCard(u8),
    RemoveStartingDomainCard(usize),
    /// Removes the loadout entry at this position of the loadout list.
    RemoveLoadoutEntry(usize),
    ClearClassField(ClassField),
    RemoveAdditionalModifier(LootId),
    Unequip(EquipSlot),
}

impl Fix {
    /// Clears an occurrence: one slot, or the pair when `slot` is `None`.
    pub fn clear_occurrence(level: u8, slot: Option<Slot>) -> Self {
        match slot {
            Some(slot) => Self::ClearChoice { level, slot },
            None => Self::ClearPair { level },
        }
    }

    /// Applies the fix. When it changes the vault, loadout entries keep
    /// pointing at the same cards and entries whose card is gone are dropped.
    pub fn apply(&self, character: &mut Character) {
        if !self.touches_vault() {
            self.write(character);
            return;
        }
        let before = character.vault_cards();
        self.write(character);
        character.remap_loadout(&before);
    }

    fn touches_vault(&self) -> bool {
        match self {
            Self::SetLevel(_)
            | Self::DropLevel(_)
            | Self::ClearChoice { .. }
            | Self::ClearPair { .. }
            | Self::Mirror { .. }
            | Self::RemoveLevelDomainCard(_)
            | Self::RemoveStartingDomainCard(_) => true,
            Self::ClearPayload { field, .. } => *field == PayloadField::SelectedDomainCard,
            Self::ClearMarkedTrait { .. }
            | Self::SetExperienceSelection { .. }
            | Self::RemoveLoadoutEntry(_)
            | Self::ClearClassField(_)
            | Self::RemoveAdditionalModifier(_)
            | Self::Unequip(_) => false,
        }
    }

    fn write(&self, character: &mut Character) {
        match self {
            Self::SetLevel(level) => character.level = *level,
            Self::DropLevel(level) => {
                character.level_up_choices.remove(level);
                character.level_up_domain_cards.remove(level);
            }
            Self::ClearChoice { level, slot } => {
                if let Some(slots) = character.level_up_choices.get_mut(level) {
                    slots.get_mut(*slot).clear();
                }
            }
            Self::ClearPair { level } => {
                if let Some(slots) = character.level_up_choices.get_mut(level) {
                    slots.a.clear();
                    slots.b.clear();
                }
            }
            Self::Mirror { level, from } => {
                let option_id: Option<OptionId> = character
                    .choice(*level, *from)
                    .and_then(|choice| choice.option_id.clone());
                let target = character.choice_mut(*level, from.other());
                target.clear();
                target.option_id = option_id;
            }
            Self::ClearPayload { level, slot, field } => {
                if let Some(slots) = character.level_up_choices.get_mut(level) {
                    field.clear(slots.get_mut(*slot));
                }
            }
            Self::ClearMarkedTrait { level, slot, index } => {
                if let Some(slots) = character.level_up_choices.get_mut(level)
                    && let Some(mark) = slots.get_mut(*slot).marked_traits.get_mut(*index)
                {
                    *mark = None;
                }
            }
            Self::SetExperienceSelection {
                level,
                slot,
                indices,
            } => {
                if let Some(slots) = character.level_up_choices.get_mut(level) {
                    slots.get_mut(*slot).selected_experiences = indices.clone();
                }
            }
            Self::RemoveLevelDomainCard(level) => {
                character.level_up_domain_cards.remove(level);
            }
            Self::RemoveStartingDomainCard(index) => {
                if *index < character.starting_domain_cards.len() {
                    character.starting_domain_cards.remove(*index);
                }
            }
            Self::RemoveLoadoutEntry(position) => {
                if *position < character.loadout.len() {
                    character.loadout.remove(*position);
                }
            }
            Self::ClearClassField(field) => match field {
                ClassField::PrimaryClass => character.primary_class = None,
                ClassField::PrimarySubclass => character.primary_subclass = None,
                ClassField::SecondaryClass => character.secondary_class = None,
                ClassField::SecondarySubclass => character.secondary_subclass = None,
                ClassField::MulticlassDomain => character.multiclass_domain = None,
            },
            Self::RemoveAdditionalModifier(id) => {
                character.additional_modifier_ids.retain(|kept| kept != id);
            }
            Self::Unequip(slot) => character.equipment.unequip(*slot),
        }
    }
}
