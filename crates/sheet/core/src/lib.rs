//! Character-sheet rules engine.
//!
//! `sheet-core` turns a character's raw selections (class, subclass, gear,
//! domain cards, level-up choices) into derived statistics and keeps those
//! selections consistent with the level-progression rules. Everything here is
//! a pure function of the character record and the read-only catalog; all
//! edits flow through [`engine::SheetEngine`] and are republished by
//! [`engine::SheetSession`].
pub mod catalog;
pub mod character;
pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod model;
pub mod progression;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{
    ArmorDef, Catalog, CatalogError, CatalogOracle, ClassDef, DomainCardDef, LevelUpOptionDef,
    LootDef, OptionKind, SubclassDef, WeaponCategory, WeaponDef,
};
pub use character::{
    BaseStats, CardOrigin, Character, EquipSlot, Equipment, LevelUpChoice, LevelUpSlots, Slot,
    SubclassTier, TraitScores, VaultEntry,
};
pub use config::{RulesConfig, StatDefaults, TierAchievement};
pub use engine::{
    Edit, EditError, EditOutcome, EngineError, Published, SheetEngine, SheetSession, SnapshotSink,
};
pub use error::{ErrorSeverity, ModelError, SheetError};
pub use ids::{ArmorId, ClassId, DomainCardId, DomainId, LootId, OptionId, SubclassId, WeaponId};
pub use model::{Behaviour, Condition, Modifier, ModifierKind, ModifierSpec, StatTarget, TraitKind};
pub use progression::{
    Fix, RuleKind, Tier, UsageCounts, ValidationError, ValidationMode, Validator, Violation,
    option_usage,
};
pub use stats::{DerivedStats, ResolveError, SourceTier, evaluate, resolve};
