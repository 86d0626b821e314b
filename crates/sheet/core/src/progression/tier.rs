//! Level tiers.

use core::ops::RangeInclusive;

/// Level-range grouping gating level-up options and trait marks.
///
/// Tier 1 is level 1, tier 2 levels 2–4, tier 3 levels 5–7, tier 4 levels 8–10.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    One,
    Two,
    Three,
    Four,
}

impl Tier {
    /// Tier containing `level`; levels past 10 stay in tier 4.
    pub fn of_level(level: u8) -> Self {
        match level {
            0 | 1 => Self::One,
            2..=4 => Self::Two,
            5..=7 => Self::Three,
            _ => Self::Four,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Levels belonging to this tier.
    pub fn levels(&self) -> RangeInclusive<u8> {
        match self {
            Self::One => 1..=1,
            Self::Two => 2..=4,
            Self::Three => 5..=7,
            Self::Four => 8..=10,
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(format!("tier must be between 1 and 4, got {other}")),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::of_level(1), Tier::One);
        assert_eq!(Tier::of_level(2), Tier::Two);
        assert_eq!(Tier::of_level(4), Tier::Two);
        assert_eq!(Tier::of_level(5), Tier::Three);
        assert_eq!(Tier::of_level(7), Tier::Three);
        assert_eq!(Tier::of_level(8), Tier::Four);
        assert_eq!(Tier::of_level(10), Tier::Four);
    }

    #[test]
    fn every_level_sits_in_its_own_tier_range() {
        for level in 1..=10 {
            assert!(Tier::of_level(level).levels().contains(&level));
        }
    }
}
