//! Modifier model: stat targets, applicability conditions and modifiers.
//!
//! These are immutable value types. Construction validates them so that a
//! catalog entry either yields a modifier that can apply or is rejected.

mod condition;
mod modifier;
mod target;

pub use condition::Condition;
pub use modifier::{Behaviour, Modifier, ModifierKind, ModifierSpec};
pub use target::{ResolutionStage, StatTarget, TraitKind};
