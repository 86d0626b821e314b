//! Read-only content tables.
//!
//! The engine never mutates catalog data. Everything it needs is reached
//! through [`CatalogOracle`], so loaders, tests and embedders can supply the
//! tables however they like; [`Catalog`] is the in-memory implementation.
mod defs;
mod table;

pub use defs::{
    ArmorDef, ClassDef, DomainCardDef, LevelUpOptionDef, LootDef, OptionKind, SubclassDef,
    WeaponCategory, WeaponDef,
};
pub use table::{Catalog, CatalogError};

use crate::ids::{ArmorId, ClassId, DomainCardId, LootId, OptionId, SubclassId, WeaponId};

/// Lookup access to the content tables, keyed by identifier.
pub trait CatalogOracle: Send + Sync {
    fn class(&self, id: &ClassId) -> Option<&ClassDef>;

    fn subclass(&self, id: &SubclassId) -> Option<&SubclassDef>;

    fn domain_card(&self, id: &DomainCardId) -> Option<&DomainCardDef>;

    fn weapon(&self, id: &WeaponId) -> Option<&WeaponDef>;

    fn armor(&self, id: &ArmorId) -> Option<&ArmorDef>;

    fn loot(&self, id: &LootId) -> Option<&LootDef>;

    fn level_up_option(&self, id: &OptionId) -> Option<&LevelUpOptionDef>;

    /// Kind of a known option, `None` for unknown ids.
    fn option_kind(&self, id: &OptionId) -> Option<OptionKind> {
        self.level_up_option(id).map(|option| option.kind)
    }
}
