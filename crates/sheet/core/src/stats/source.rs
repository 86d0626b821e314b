//! Modifier sources and their priority.

use std::borrow::Cow;

use crate::model::Modifier;

/// Where an active modifier comes from.
///
/// The declaration order is the priority order used for `base` modifiers:
/// a later tier overrides an earlier one, and within a tier the modifier
/// collected last wins.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SourceTier {
    Class,
    Subclass,
    Equipment,
    DomainCard,
    LevelUp,
    /// Loot, relics and purchased bonuses.
    Additional,
}

/// A modifier tagged with its source tier.
///
/// Catalog modifiers are borrowed; modifiers synthesised from a choice
/// payload (trait marks) are owned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcedModifier<'a> {
    pub tier: SourceTier,
    pub modifier: Cow<'a, Modifier>,
}

impl<'a> SourcedModifier<'a> {
    pub fn borrowed(tier: SourceTier, modifier: &'a Modifier) -> Self {
        Self {
            tier,
            modifier: Cow::Borrowed(modifier),
        }
    }

    pub fn owned(tier: SourceTier, modifier: Modifier) -> Self {
        Self {
            tier,
            modifier: Cow::Owned(modifier),
        }
    }
}
