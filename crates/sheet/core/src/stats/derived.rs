//! The derived-stats block published for a character.

use std::collections::BTreeMap;

use crate::character::TraitScores;
use crate::model::StatTarget;

/// Final statistics of a character.
///
/// Never hand-edited: always the output of [`crate::stats::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DerivedStats {
    pub traits: TraitScores,
    pub proficiency: i32,
    pub evasion: i32,
    pub max_hp: i32,
    pub max_stress: i32,
    pub max_hope: i32,
    pub major_damage_threshold: i32,
    pub severe_damage_threshold: i32,
    pub max_armor: i32,
    pub max_burden: i32,
    pub max_loadout: i32,
    pub max_experiences: i32,
    /// Bonus per experience index granted by experience-bonus choices.
    pub experience_bonuses: BTreeMap<usize, i32>,
}

impl DerivedStats {
    pub fn get(&self, target: StatTarget) -> i32 {
        match target {
            StatTarget::Trait(kind) => self.traits.get(kind),
            StatTarget::Proficiency => self.proficiency,
            StatTarget::Evasion => self.evasion,
            StatTarget::MaxHp => self.max_hp,
            StatTarget::MaxStress => self.max_stress,
            StatTarget::MaxHope => self.max_hope,
            StatTarget::MajorDamageThreshold => self.major_damage_threshold,
            StatTarget::SevereDamageThreshold => self.severe_damage_threshold,
            StatTarget::MaxArmor => self.max_armor,
            StatTarget::MaxBurden => self.max_burden,
            StatTarget::MaxLoadout => self.max_loadout,
            StatTarget::MaxExperiences => self.max_experiences,
        }
    }

    pub fn set(&mut self, target: StatTarget, value: i32) {
        let slot = match target {
            StatTarget::Trait(kind) => {
                self.traits.set(kind, value);
                return;
            }
            StatTarget::Proficiency => &mut self.proficiency,
            StatTarget::Evasion => &mut self.evasion,
            StatTarget::MaxHp => &mut self.max_hp,
            StatTarget::MaxStress => &mut self.max_stress,
            StatTarget::MaxHope => &mut self.max_hope,
            StatTarget::MajorDamageThreshold => &mut self.major_damage_threshold,
            StatTarget::SevereDamageThreshold => &mut self.severe_damage_threshold,
            StatTarget::MaxArmor => &mut self.max_armor,
            StatTarget::MaxBurden => &mut self.max_burden,
            StatTarget::MaxLoadout => &mut self.max_loadout,
            StatTarget::MaxExperiences => &mut self.max_experiences,
        };
        *slot = value;
    }

    /// Loadout capacity as a count; negative capacities hold nothing.
    pub fn loadout_capacity(&self) -> usize {
        usize::try_from(self.max_loadout).unwrap_or(0)
    }

    /// Experience-slot count; negative counts hold nothing.
    pub fn experience_slots(&self) -> usize {
        usize::try_from(self.max_experiences).unwrap_or(0)
    }
}

/// Clamping bounds for one resolved stat.
///
/// The ranges keep a runaway content bonus from producing a sheet no table
/// could use; ordinary characters never reach them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Trait scores [-10, 20].
    pub const TRAITS: Self = Self { min: -10, max: 20 };

    /// Counted maximums (proficiency, hit points, slots, ...) [0, 99].
    pub const COUNTS: Self = Self { min: 0, max: 99 };

    /// Evasion and damage thresholds [0, 999].
    pub const DEFENCES: Self = Self { min: 0, max: 999 };

    pub fn for_target(target: StatTarget) -> Self {
        match target {
            StatTarget::Trait(_) => Self::TRAITS,
            StatTarget::Evasion
            | StatTarget::MajorDamageThreshold
            | StatTarget::SevereDamageThreshold => Self::DEFENCES,
            _ => Self::COUNTS,
        }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TraitKind;

    #[test]
    fn get_reads_back_what_set_wrote() {
        let mut derived = DerivedStats::default();
        for (index, target) in StatTarget::resolution_order().enumerate() {
            derived.set(target, index as i32 + 1);
        }
        for (index, target) in StatTarget::resolution_order().enumerate() {
            assert_eq!(derived.get(target), index as i32 + 1, "{target}");
        }
        assert_eq!(derived.traits.get(TraitKind::Agility), 1);
    }

    #[test]
    fn bounds_clamp_per_target_family() {
        assert_eq!(StatBounds::for_target(StatTarget::MaxHp).clamp(-3), 0);
        assert_eq!(
            StatBounds::for_target(StatTarget::Trait(TraitKind::Finesse)).clamp(-3),
            -3
        );
    }
}
