//! In-memory catalog.

use std::collections::HashMap;
use std::hash::Hash;

use super::CatalogOracle;
use super::defs::{ArmorDef, ClassDef, DomainCardDef, LevelUpOptionDef, LootDef, SubclassDef, WeaponDef};
use crate::error::{ErrorSeverity, SheetError};
use crate::ids::{ArmorId, ClassId, DomainCardId, LootId, OptionId, SubclassId, WeaponId};

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {table} id '{id}'")]
    DuplicateId { table: &'static str, id: String },

    #[error("{table} '{id}' references unknown {target} '{reference}'")]
    DanglingReference {
        table: &'static str,
        id: String,
        target: &'static str,
        reference: String,
    },
}

impl SheetError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            Self::DanglingReference { .. } => "CATALOG_DANGLING_REFERENCE",
        }
    }
}

/// Catalog tables held in memory.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    classes: HashMap<ClassId, ClassDef>,
    subclasses: HashMap<SubclassId, SubclassDef>,
    domain_cards: HashMap<DomainCardId, DomainCardDef>,
    weapons: HashMap<WeaponId, WeaponDef>,
    armor: HashMap<ArmorId, ArmorDef>,
    loot: HashMap<LootId, LootDef>,
    options: HashMap<OptionId, LevelUpOptionDef>,
}

fn insert_unique<K, V>(
    table: &mut HashMap<K, V>,
    name: &'static str,
    id: &K,
    value: V,
) -> Result<(), CatalogError>
where
    K: Eq + Hash + Clone + ToString,
{
    if table.contains_key(id) {
        return Err(CatalogError::DuplicateId {
            table: name,
            id: id.to_string(),
        });
    }
    table.insert(id.clone(), value);
    Ok(())
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_class(&mut self, def: ClassDef) -> Result<(), CatalogError> {
        let id = def.id.clone();
        insert_unique(&mut self.classes, "class", &id, def)
    }

    pub fn insert_subclass(&mut self, def: SubclassDef) -> Result<(), CatalogError> {
        let id = def.id.clone();
        insert_unique(&mut self.subclasses, "subclass", &id, def)
    }

    pub fn insert_domain_card(&mut self, def: DomainCardDef) -> Result<(), CatalogError> {
        let id = def.id.clone();
        insert_unique(&mut self.domain_cards, "domain card", &id, def)
    }

    pub fn insert_weapon(&mut self, def: WeaponDef) -> Result<(), CatalogError> {
        let id = def.id.clone();
        insert_unique(&mut self.weapons, "weapon", &id, def)
    }

    pub fn insert_armor(&mut self, def: ArmorDef) -> Result<(), CatalogError> {
        let id = def.id.clone();
        insert_unique(&mut self.armor, "armor", &id, def)
    }

    pub fn insert_loot(&mut self, def: LootDef) -> Result<(), CatalogError> {
        let id = def.id.clone();
        insert_unique(&mut self.loot, "loot", &id, def)
    }

    pub fn insert_option(&mut self, def: LevelUpOptionDef) -> Result<(), CatalogError> {
        let id = def.id.clone();
        insert_unique(&mut self.options, "level-up option", &id, def)
    }

    /// Checks cross-table references: subclass → class, and that every
    /// domain a card lives in is granted by some class.
    pub fn validate_references(&self) -> Result<(), CatalogError> {
        let mut subclasses: Vec<_> = self.subclasses.values().collect();
        subclasses.sort_by(|a, b| a.id.cmp(&b.id));
        for subclass in subclasses {
            if !self.classes.contains_key(&subclass.class_id) {
                return Err(CatalogError::DanglingReference {
                    table: "subclass",
                    id: subclass.id.to_string(),
                    target: "class",
                    reference: subclass.class_id.to_string(),
                });
            }
        }

        let mut cards: Vec<_> = self.domain_cards.values().collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        for card in cards {
            let granted = self
                .classes
                .values()
                .any(|class| class.has_domain(&card.domain_id));
            if !granted {
                return Err(CatalogError::DanglingReference {
                    table: "domain card",
                    id: card.id.to_string(),
                    target: "domain",
                    reference: card.domain_id.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn domain_card_count(&self) -> usize {
        self.domain_cards.len()
    }
}

impl CatalogOracle for Catalog {
    fn class(&self, id: &ClassId) -> Option<&ClassDef> {
        self.classes.get(id)
    }

    fn subclass(&self, id: &SubclassId) -> Option<&SubclassDef> {
        self.subclasses.get(id)
    }

    fn domain_card(&self, id: &DomainCardId) -> Option<&DomainCardDef> {
        self.domain_cards.get(id)
    }

    fn weapon(&self, id: &WeaponId) -> Option<&WeaponDef> {
        self.weapons.get(id)
    }

    fn armor(&self, id: &ArmorId) -> Option<&ArmorDef> {
        self.armor.get(id)
    }

    fn loot(&self, id: &LootId) -> Option<&LootDef> {
        self.loot.get(id)
    }

    fn level_up_option(&self, id: &OptionId) -> Option<&LevelUpOptionDef> {
        self.options.get(id)
    }
}
