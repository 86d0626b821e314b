//! Raw-field writes on a character record.

use crate::character::{Character, Slot, SubclassTier};
use crate::config::RulesConfig;
use crate::error::{ErrorSeverity, SheetError};
use crate::ids::{ArmorId, ClassId, DomainCardId, DomainId, LootId, OptionId, SubclassId, WeaponId};
use crate::model::TraitKind;

/// One discrete edit.
///
/// An edit only writes the field it names. Consequences for other fields
/// (orphaned payloads, illegal cards, over-capacity loadouts) are left to
/// the repair pass that follows every edit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Edit {
    SetName(String),
    SetLevel(u8),
    SetPrimaryClass(Option<ClassId>),
    SetPrimarySubclass(Option<SubclassId>),
    SetSecondaryClass(Option<ClassId>),
    SetSecondarySubclass(Option<SubclassId>),
    SetMulticlassDomain(Option<DomainId>),
    SetTrait {
        trait_kind: TraitKind,
        value: i32,
    },
    SetBaseProficiency(i32),
    SetBaseExperiences(i32),

    /// Replaces the option in a slot; `None` empties the slot entirely.
    SelectOption {
        level: u8,
        slot: Slot,
        option_id: Option<OptionId>,
    },
    MarkTrait {
        level: u8,
        slot: Slot,
        index: usize,
        trait_kind: Option<TraitKind>,
    },
    SelectExperiences {
        level: u8,
        slot: Slot,
        indices: Vec<usize>,
    },
    SelectDomainCard {
        level: u8,
        slot: Slot,
        card: Option<DomainCardId>,
    },
    SelectSubclassUpgrade {
        level: u8,
        slot: Slot,
        tier: Option<SubclassTier>,
    },

    SetLevelDomainCard {
        level: u8,
        card: Option<DomainCardId>,
    },
    SetStartingDomainCards(Vec<DomainCardId>),
    SetLoadout(Vec<usize>),
    SetDomainCardChoice {
        card: DomainCardId,
        choice_id: String,
        selection_id: Option<String>,
    },

    EquipPrimaryWeapon(Option<WeaponId>),
    EquipSecondaryWeapon(Option<WeaponId>),
    EquipArmor(Option<ArmorId>),
    SetAdditionalModifiers(Vec<LootId>),
}

/// Malformed edits, rejected before anything is written.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u8, max: u8 },

    #[error("level {0} has no level-up slots")]
    NoLevelUpAtLevel(u8),

    #[error("level {level} is above the character level {current}")]
    LevelNotReached { level: u8, current: u8 },

    #[error("trait mark index {index} is out of range (max {max})")]
    MarkIndexOutOfRange { index: usize, max: usize },
}

impl SheetError for EditError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelOutOfRange { .. } => "EDIT_LEVEL_OUT_OF_RANGE",
            Self::NoLevelUpAtLevel(_) => "EDIT_NO_LEVEL_UP_AT_LEVEL",
            Self::LevelNotReached { .. } => "EDIT_LEVEL_NOT_REACHED",
            Self::MarkIndexOutOfRange { .. } => "EDIT_MARK_INDEX_OUT_OF_RANGE",
        }
    }
}

impl Edit {
    /// Writes the edit into `character` without any follow-up repair.
    pub fn apply_raw(self, character: &mut Character, rules: &RulesConfig) -> Result<(), EditError> {
        match self {
            Edit::SetName(name) => character.name = name,
            Edit::SetLevel(level) => {
                let max = rules.level_cap();
                if !(1..=max).contains(&level) {
                    return Err(EditError::LevelOutOfRange { level, max });
                }
                character.level = level;
            }
            Edit::SetPrimaryClass(id) => character.primary_class = id,
            Edit::SetPrimarySubclass(id) => character.primary_subclass = id,
            Edit::SetSecondaryClass(id) => character.secondary_class = id,
            Edit::SetSecondarySubclass(id) => character.secondary_subclass = id,
            Edit::SetMulticlassDomain(id) => character.multiclass_domain = id,
            Edit::SetTrait { trait_kind, value } => {
                character.base_stats.traits.set(trait_kind, value);
            }
            Edit::SetBaseProficiency(value) => character.base_stats.proficiency = value,
            Edit::SetBaseExperiences(value) => character.base_stats.max_experiences = value,

            Edit::SelectOption {
                level,
                slot,
                option_id,
            } => {
                check_slot_level(character, level)?;
                let choice = character.choice_mut(level, slot);
                match option_id {
                    Some(id) => choice.option_id = Some(id),
                    None => choice.clear(),
                }
            }
            Edit::MarkTrait {
                level,
                slot,
                index,
                trait_kind,
            } => {
                check_slot_level(character, level)?;
                let marks = &mut character.choice_mut(level, slot).marked_traits;
                let max = marks.len() - 1;
                let mark = marks
                    .get_mut(index)
                    .ok_or(EditError::MarkIndexOutOfRange { index, max })?;
                *mark = trait_kind;
            }
            Edit::SelectExperiences {
                level,
                slot,
                indices,
            } => {
                check_slot_level(character, level)?;
                character.choice_mut(level, slot).selected_experiences = indices;
            }
            Edit::SelectDomainCard { level, slot, card } => {
                check_slot_level(character, level)?;
                character.choice_mut(level, slot).selected_domain_card = card;
            }
            Edit::SelectSubclassUpgrade { level, slot, tier } => {
                check_slot_level(character, level)?;
                character.choice_mut(level, slot).selected_subclass_upgrade = tier;
            }

            Edit::SetLevelDomainCard { level, card } => {
                check_slot_level(character, level)?;
                match card {
                    Some(card) => {
                        character.level_up_domain_cards.insert(level, card);
                    }
                    None => {
                        character.level_up_domain_cards.remove(&level);
                    }
                }
            }
            Edit::SetStartingDomainCards(cards) => character.starting_domain_cards = cards,
            Edit::SetLoadout(indices) => character.loadout = indices,
            Edit::SetDomainCardChoice {
                card,
                choice_id,
                selection_id,
            } => match selection_id {
                Some(selection) => {
                    character
                        .domain_card_choices
                        .entry(card)
                        .or_default()
                        .insert(choice_id, selection);
                }
                None => {
                    if let Some(choices) = character.domain_card_choices.get_mut(&card) {
                        choices.remove(&choice_id);
                        if choices.is_empty() {
                            character.domain_card_choices.remove(&card);
                        }
                    }
                }
            },

            Edit::EquipPrimaryWeapon(id) => character.equipment.primary_weapon = id,
            Edit::EquipSecondaryWeapon(id) => character.equipment.secondary_weapon = id,
            Edit::EquipArmor(id) => character.equipment.armor = id,
            Edit::SetAdditionalModifiers(ids) => character.additional_modifier_ids = ids,
        }
        Ok(())
    }
}

fn check_slot_level(character: &Character, level: u8) -> Result<(), EditError> {
    if level < RulesConfig::FIRST_LEVEL_UP {
        return Err(EditError::NoLevelUpAtLevel(level));
    }
    if level > character.level {
        return Err(EditError::LevelNotReached {
            level,
            current: character.level,
        });
    }
    Ok(())
}
