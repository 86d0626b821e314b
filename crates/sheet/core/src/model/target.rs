//! Closed enumeration of derived-stat keys a modifier may target.

use core::fmt;
use core::str::FromStr;

use strum::IntoEnumIterator;

use crate::error::ModelError;

/// The six character traits.
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
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TraitKind {
    Agility,
    Strength,
    Finesse,
    Instinct,
    Presence,
    Knowledge,
}

/// Order in which stats are resolved.
///
/// A modifier may only derive from stats of an earlier stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResolutionStage {
    Traits,
    Proficiency,
    Dependent,
}

/// A derived stat a modifier can target.
///
/// String keys: `trait:<name>`, `proficiency`, `evasion`, `max_hp`,
/// `max_stress`, `max_hope`, `major_damage_threshold`,
/// `severe_damage_threshold`, `max_armor`, `max_burden`, `max_loadout`,
/// `max_experiences`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum StatTarget {
    Trait(TraitKind),
    Proficiency,
    Evasion,
    MaxHp,
    MaxStress,
    MaxHope,
    MajorDamageThreshold,
    SevereDamageThreshold,
    MaxArmor,
    MaxBurden,
    MaxLoadout,
    MaxExperiences,
}

impl StatTarget {
    const TRAIT_PREFIX: &'static str = "trait:";

    /// Non-trait targets resolved after proficiency.
    const DEPENDENT: [StatTarget; 10] = [
        StatTarget::Evasion,
        StatTarget::MaxHp,
        StatTarget::MaxStress,
        StatTarget::MaxHope,
        StatTarget::MajorDamageThreshold,
        StatTarget::SevereDamageThreshold,
        StatTarget::MaxArmor,
        StatTarget::MaxBurden,
        StatTarget::MaxLoadout,
        StatTarget::MaxExperiences,
    ];

    pub fn stage(&self) -> ResolutionStage {
        match self {
            Self::Trait(_) => ResolutionStage::Traits,
            Self::Proficiency => ResolutionStage::Proficiency,
            _ => ResolutionStage::Dependent,
        }
    }

    /// Every target, in dependency order: traits, proficiency, the rest.
    pub fn resolution_order() -> impl Iterator<Item = StatTarget> {
        TraitKind::iter()
            .map(StatTarget::Trait)
            .chain(core::iter::once(StatTarget::Proficiency))
            .chain(Self::DEPENDENT)
    }

    /// Key used in catalogs and logs.
    pub fn key(&self) -> String {
        match self {
            Self::Trait(kind) => format!("{}{}", Self::TRAIT_PREFIX, kind.as_ref()),
            other => other.simple_key().to_owned(),
        }
    }

    fn simple_key(&self) -> &'static str {
        match self {
            Self::Trait(_) => "trait",
            Self::Proficiency => "proficiency",
            Self::Evasion => "evasion",
            Self::MaxHp => "max_hp",
            Self::MaxStress => "max_stress",
            Self::MaxHope => "max_hope",
            Self::MajorDamageThreshold => "major_damage_threshold",
            Self::SevereDamageThreshold => "severe_damage_threshold",
            Self::MaxArmor => "max_armor",
            Self::MaxBurden => "max_burden",
            Self::MaxLoadout => "max_loadout",
            Self::MaxExperiences => "max_experiences",
        }
    }
}

impl fmt::Display for StatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for StatTarget {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(Self::TRAIT_PREFIX) {
            return TraitKind::from_str(name)
                .map(StatTarget::Trait)
                .map_err(|_| ModelError::UnknownTrait(name.to_owned()));
        }

        core::iter::once(StatTarget::Proficiency)
            .chain(Self::DEPENDENT)
            .find(|target| target.simple_key() == s)
            .ok_or_else(|| ModelError::UnknownTarget(s.to_owned()))
    }
}

impl TryFrom<String> for StatTarget {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatTarget> for String {
    fn from(target: StatTarget) -> Self {
        target.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back_to_the_same_target() {
        for target in StatTarget::resolution_order() {
            assert_eq!(target.key().parse::<StatTarget>(), Ok(target));
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(
            "max_mana".parse::<StatTarget>(),
            Err(ModelError::UnknownTarget("max_mana".into()))
        );
        assert_eq!(
            "trait:luck".parse::<StatTarget>(),
            Err(ModelError::UnknownTrait("luck".into()))
        );
    }

    #[test]
    fn traits_resolve_before_proficiency_and_the_rest() {
        let stages: Vec<_> = StatTarget::resolution_order()
            .map(|target| target.stage())
            .collect();
        let mut sorted = stages.clone();
        sorted.sort();
        assert_eq!(stages, sorted);
        assert_eq!(stages.len(), 17);
    }
}
