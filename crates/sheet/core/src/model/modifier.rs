//! Conditional stat modifiers.

use super::condition::Condition;
use super::target::{ResolutionStage, StatTarget, TraitKind};
use crate::error::ModelError;

/// How a modifier combines with others on the same target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Behaviour {
    /// Establishes the starting value; the last applicable base wins.
    Base,
    /// Adds on top of the established base.
    Bonus,
}

/// How a modifier computes its contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierKind {
    /// Literal value.
    Flat { value: i32 },

    /// `trait_value * multiplier`.
    DerivedFromTrait {
        #[cfg_attr(feature = "serde", serde(rename = "trait"))]
        trait_kind: TraitKind,
        multiplier: i32,
    },

    /// `proficiency * multiplier`.
    DerivedFromProficiency { multiplier: i32 },

    /// `level * multiplier`.
    DerivedFromLevel { multiplier: i32 },
}

impl ModifierKind {
    /// Stage whose value this kind reads, if any.
    fn reads(&self) -> Option<(ResolutionStage, &'static str)> {
        match self {
            Self::Flat { .. } | Self::DerivedFromLevel { .. } => None,
            Self::DerivedFromTrait { .. } => Some((ResolutionStage::Traits, "a trait")),
            Self::DerivedFromProficiency { .. } => {
                Some((ResolutionStage::Proficiency, "proficiency"))
            }
        }
    }
}

/// One conditional effect on one stat.
///
/// Immutable once built. [`Modifier::new`] rejects invalid conditions and
/// derivations that would read a stat not yet resolved when the target is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "ModifierSpec", into = "ModifierSpec")
)]
pub struct Modifier {
    behaviour: Behaviour,
    kind: ModifierKind,
    target: StatTarget,
    conditions: Vec<Condition>,
}

impl Modifier {
    pub fn new(
        behaviour: Behaviour,
        kind: ModifierKind,
        target: StatTarget,
        conditions: Vec<Condition>,
    ) -> Result<Self, ModelError> {
        if let Some((stage, source_stat)) = kind.reads()
            && stage >= target.stage()
        {
            return Err(ModelError::CyclicDerivation {
                target: target.key(),
                source_stat,
            });
        }
        for condition in &conditions {
            condition.validate()?;
        }

        Ok(Self {
            behaviour,
            kind,
            target,
            conditions,
        })
    }

    /// Unconditional flat bonus.
    pub fn flat_bonus(target: StatTarget, value: i32) -> Self {
        Self {
            behaviour: Behaviour::Bonus,
            kind: ModifierKind::Flat { value },
            target,
            conditions: Vec::new(),
        }
    }

    /// Unconditional flat base.
    pub fn flat_base(target: StatTarget, value: i32) -> Self {
        Self {
            behaviour: Behaviour::Base,
            kind: ModifierKind::Flat { value },
            target,
            conditions: Vec::new(),
        }
    }

    /// Returns this modifier with one more condition attached.
    pub fn when(mut self, condition: Condition) -> Result<Self, ModelError> {
        condition.validate()?;
        self.conditions.push(condition);
        Ok(self)
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn kind(&self) -> &ModifierKind {
        &self.kind
    }

    pub fn target(&self) -> StatTarget {
        self.target
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Unvalidated modifier as authored in a catalog file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSpec {
    pub behaviour: Behaviour,
    pub kind: ModifierKind,
    pub target: StatTarget,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
}

impl TryFrom<ModifierSpec> for Modifier {
    type Error = ModelError;

    fn try_from(spec: ModifierSpec) -> Result<Self, Self::Error> {
        Modifier::new(spec.behaviour, spec.kind, spec.target, spec.conditions)
    }
}

impl From<Modifier> for ModifierSpec {
    fn from(modifier: Modifier) -> Self {
        Self {
            behaviour: modifier.behaviour,
            kind: modifier.kind,
            target: modifier.target,
            conditions: modifier.conditions,
        }
    }
}
