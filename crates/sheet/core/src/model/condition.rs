//! Applicability conditions for modifiers.

use crate::config::RulesConfig;
use crate::error::ModelError;
use crate::ids::{DomainCardId, DomainId, WeaponId};

/// Predicate over a character snapshot.
///
/// A modifier applies only when every condition in its list holds. The
/// evaluator lives in [`crate::stats::evaluate`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Condition {
    /// Character level within `min..=max`.
    Level { min: u8, max: u8 },

    /// Whether any armor is currently equipped.
    ArmorEquipped { value: bool },

    /// Primary weapon slot holds exactly this weapon; `None` means empty.
    PrimaryWeaponEquipped { weapon_id: Option<WeaponId> },

    /// Secondary weapon slot holds exactly this weapon; `None` means empty.
    SecondaryWeaponEquipped { weapon_id: Option<WeaponId> },

    /// At least `min_cards` loadout cards come from `domain_id`.
    MinLoadoutCardsFromDomain { domain_id: DomainId, min_cards: u32 },

    /// The card is in the loadout and `choice_id` was answered with `selection_id`.
    DomainCardChoice {
        domain_card_id: DomainCardId,
        choice_id: String,
        selection_id: String,
    },
}

impl Condition {
    pub fn level(min: u8, max: u8) -> Result<Self, ModelError> {
        let condition = Self::Level { min, max };
        condition.validate()?;
        Ok(condition)
    }

    pub fn armor_equipped(value: bool) -> Self {
        Self::ArmorEquipped { value }
    }

    pub fn primary_weapon(weapon_id: Option<WeaponId>) -> Self {
        Self::PrimaryWeaponEquipped { weapon_id }
    }

    pub fn secondary_weapon(weapon_id: Option<WeaponId>) -> Self {
        Self::SecondaryWeaponEquipped { weapon_id }
    }

    pub fn min_loadout_cards(domain_id: DomainId, min_cards: u32) -> Result<Self, ModelError> {
        let condition = Self::MinLoadoutCardsFromDomain {
            domain_id,
            min_cards,
        };
        condition.validate()?;
        Ok(condition)
    }

    pub fn domain_card_choice(
        domain_card_id: DomainCardId,
        choice_id: impl Into<String>,
        selection_id: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let condition = Self::DomainCardChoice {
            domain_card_id,
            choice_id: choice_id.into(),
            selection_id: selection_id.into(),
        };
        condition.validate()?;
        Ok(condition)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Level { .. } => "level",
            Self::ArmorEquipped { .. } => "armor_equipped",
            Self::PrimaryWeaponEquipped { .. } => "primary_weapon_equipped",
            Self::SecondaryWeaponEquipped { .. } => "secondary_weapon_equipped",
            Self::MinLoadoutCardsFromDomain { .. } => "min_loadout_cards_from_domain",
            Self::DomainCardChoice { .. } => "domain_card_choice",
        }
    }

    /// Checks the payload is complete and internally consistent.
    pub fn validate(&self) -> Result<(), ModelError> {
        let kind = self.kind();
        match self {
            Self::Level { min, max } => {
                if *min < 1 || *max > RulesConfig::MAX_LEVEL || min > max {
                    return Err(ModelError::InvalidCondition {
                        kind,
                        reason: format!(
                            "range {min}..={max} must lie within 1..={}",
                            RulesConfig::MAX_LEVEL
                        ),
                    });
                }
            }
            Self::ArmorEquipped { .. } => {}
            Self::PrimaryWeaponEquipped { weapon_id } | Self::SecondaryWeaponEquipped { weapon_id } => {
                if weapon_id.as_ref().is_some_and(WeaponId::is_empty) {
                    return Err(ModelError::MissingField {
                        kind,
                        field: "weapon_id",
                    });
                }
            }
            Self::MinLoadoutCardsFromDomain { domain_id, .. } => {
                if domain_id.is_empty() {
                    return Err(ModelError::MissingField {
                        kind,
                        field: "domain_id",
                    });
                }
            }
            Self::DomainCardChoice {
                domain_card_id,
                choice_id,
                selection_id,
            } => {
                let missing = if domain_card_id.is_empty() {
                    Some("domain_card_id")
                } else if choice_id.is_empty() {
                    Some("choice_id")
                } else if selection_id.is_empty() {
                    Some("selection_id")
                } else {
                    None
                };
                if let Some(field) = missing {
                    return Err(ModelError::MissingField { kind, field });
                }
            }
        }
        Ok(())
    }
}
