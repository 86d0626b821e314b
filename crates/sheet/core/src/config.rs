//! Rules constants and tunable defaults.

use crate::model::StatTarget;

/// Starting values for stats that no `base` modifier sets.
///
/// Traits, proficiency and the experience count start from the character's
/// own [`crate::character::BaseStats`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatDefaults {
    pub evasion: i32,
    pub max_hp: i32,
    pub max_stress: i32,
    pub max_hope: i32,
    pub major_damage_threshold: i32,
    pub severe_damage_threshold: i32,
    pub max_armor: i32,
    pub max_burden: i32,
    pub max_loadout: i32,
}

impl StatDefaults {
    /// Default for a non-character-driven target, `None` for traits,
    /// proficiency and experiences.
    pub fn get(&self, target: StatTarget) -> Option<i32> {
        match target {
            StatTarget::Trait(_) | StatTarget::Proficiency | StatTarget::MaxExperiences => None,
            StatTarget::Evasion => Some(self.evasion),
            StatTarget::MaxHp => Some(self.max_hp),
            StatTarget::MaxStress => Some(self.max_stress),
            StatTarget::MaxHope => Some(self.max_hope),
            StatTarget::MajorDamageThreshold => Some(self.major_damage_threshold),
            StatTarget::SevereDamageThreshold => Some(self.severe_damage_threshold),
            StatTarget::MaxArmor => Some(self.max_armor),
            StatTarget::MaxBurden => Some(self.max_burden),
            StatTarget::MaxLoadout => Some(self.max_loadout),
        }
    }
}

impl Default for StatDefaults {
    fn default() -> Self {
        Self {
            evasion: 0,
            max_hp: 0,
            max_stress: 6,
            max_hope: 6,
            major_damage_threshold: 0,
            severe_damage_threshold: 0,
            max_armor: 0,
            max_burden: 2,
            max_loadout: 5,
        }
    }
}

/// Fixed bonus granted on reaching a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierAchievement {
    pub level: u8,
    pub proficiency: i32,
    pub experiences: i32,
}

/// Progression rules and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub max_level: u8,
    /// Lowest level at which a multiclass option may be taken.
    pub multiclass_min_level: u8,
    pub defaults: StatDefaults,
    /// Cumulative: every achievement at or below the character level applies.
    pub achievements: Vec<TierAchievement>,
    /// Add the character level to both damage thresholds.
    pub thresholds_include_level: bool,
    pub trait_marks_per_option: usize,
    pub experiences_per_bonus: usize,
}

impl RulesConfig {
    // ===== compile-time constants =====
    pub const MAX_LEVEL: u8 = 10;
    pub const FIRST_LEVEL_UP: u8 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MULTICLASS_MIN_LEVEL: u8 = 5;
    pub const DEFAULT_TRAIT_MARKS: usize = 2;
    pub const DEFAULT_EXPERIENCES_PER_BONUS: usize = 2;

    pub fn new() -> Self {
        Self {
            max_level: Self::MAX_LEVEL,
            multiclass_min_level: Self::DEFAULT_MULTICLASS_MIN_LEVEL,
            defaults: StatDefaults::default(),
            achievements: [2, 5, 8]
                .into_iter()
                .map(|level| TierAchievement {
                    level,
                    proficiency: 1,
                    experiences: 1,
                })
                .collect(),
            thresholds_include_level: true,
            trait_marks_per_option: Self::DEFAULT_TRAIT_MARKS,
            experiences_per_bonus: Self::DEFAULT_EXPERIENCES_PER_BONUS,
        }
    }

    /// Total achievement bonus `(proficiency, experiences)` at `level`.
    pub fn achievements_at(&self, level: u8) -> (i32, i32) {
        self.achievements
            .iter()
            .filter(|achievement| achievement.level <= level)
            .fold((0, 0), |(proficiency, experiences), achievement| {
                (
                    proficiency + achievement.proficiency,
                    experiences + achievement.experiences,
                )
            })
    }

    /// Highest level a character may have, never above [`Self::MAX_LEVEL`].
    pub fn level_cap(&self) -> u8 {
        self.max_level.clamp(1, Self::MAX_LEVEL)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
