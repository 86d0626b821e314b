//! Rule identifiers and the violation records the validator produces.

use super::fix::Fix;
use crate::character::Slot;

/// Consistency rules, in the order the validator runs them.
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
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RuleKind {
    LevelHorizon,
    UnknownReference,
    TierGating,
    TwoSlot,
    UsageCeiling,
    Multiclass,
    StalePayload,
    ClassCoherence,
    SubclassUpgrade,
    TraitMarks,
    DomainCard,
    Equipment,
    Loadout,
    ExperienceBonus,
}

/// A detected inconsistency together with the fix that resolves it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    pub rule: RuleKind,
    pub level: Option<u8>,
    pub slot: Option<Slot>,
    pub message: String,
    pub fix: Fix,
}

impl Violation {
    pub fn new(rule: RuleKind, message: impl Into<String>, fix: Fix) -> Self {
        Self {
            rule,
            level: None,
            slot: None,
            message: message.into(),
            fix,
        }
    }

    pub fn at(mut self, level: u8, slot: Option<Slot>) -> Self {
        self.level = Some(level);
        self.slot = slot;
        self
    }
}

/// Report-mode record of one violation; nothing is mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationError {
    pub level: Option<u8>,
    pub slot: Option<Slot>,
    pub rule: RuleKind,
    pub message: String,
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self {
            level: violation.level,
            slot: violation.slot,
            rule: violation.rule,
            message: violation.message,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.rule)?;
        if let Some(level) = self.level {
            write!(f, " level {level}")?;
        }
        if let Some(slot) = self.slot {
            write!(f, " slot {slot}")?;
        }
        write!(f, ": {}", self.message)
    }
}
