//! Level-up slot selections.

use crate::ids::{DomainCardId, OptionId};
use crate::model::TraitKind;

/// One of the two choice slots offered at each level.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(&self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Subclass feature tier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SubclassTier {
    Foundation,
    Specialization,
    Mastery,
}

impl SubclassTier {
    /// Tier an upgrade unlocks after `self`.
    pub fn next(&self) -> Option<SubclassTier> {
        match self {
            Self::Foundation => Some(Self::Specialization),
            Self::Specialization => Some(Self::Mastery),
            Self::Mastery => None,
        }
    }
}

/// Selection in one slot.
///
/// Payload fields are only meaningful for the option kind that defines them;
/// the `stale_payload` rule clears the rest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelUpChoice {
    pub option_id: Option<OptionId>,
    /// Trait-increase marks.
    pub marked_traits: [Option<TraitKind>; 2],
    /// Experience-bonus targets, as indices into the character's experiences.
    pub selected_experiences: Vec<usize>,
    pub selected_domain_card: Option<DomainCardId>,
    pub selected_subclass_upgrade: Option<SubclassTier>,
}

impl LevelUpChoice {
    pub fn with_option(option_id: impl Into<OptionId>) -> Self {
        Self {
            option_id: Some(option_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.option_id.is_none() && !self.has_payload()
    }

    pub fn has_payload(&self) -> bool {
        self.marked_traits.iter().any(Option::is_some)
            || !self.selected_experiences.is_empty()
            || self.selected_domain_card.is_some()
            || self.selected_subclass_upgrade.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn clear_payload(&mut self) {
        self.marked_traits = [None, None];
        self.selected_experiences.clear();
        self.selected_domain_card = None;
        self.selected_subclass_upgrade = None;
    }
}

/// Both slots of one level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelUpSlots {
    pub a: LevelUpChoice,
    pub b: LevelUpChoice,
}

impl LevelUpSlots {
    pub fn get(&self, slot: Slot) -> &LevelUpChoice {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut LevelUpChoice {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}
