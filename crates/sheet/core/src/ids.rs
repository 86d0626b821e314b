//! String identifiers keying the catalog tables.
//!
//! Every table uses its own newtype so a weapon id can never be looked up as a
//! domain card. Ids are compared and ordered by their string value.

use core::fmt;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

catalog_id!(
    /// Identifies a class (e.g. `guardian`).
    ClassId
);
catalog_id!(
    /// Identifies a subclass belonging to exactly one class.
    SubclassId
);
catalog_id!(
    /// Identifies a domain (e.g. `valor`, `codex`).
    DomainId
);
catalog_id!(
    /// Identifies a domain card.
    DomainCardId
);
catalog_id!(WeaponId);
catalog_id!(ArmorId);
catalog_id!(
    /// Identifies a loot entry, relic or purchased bonus.
    LootId
);
catalog_id!(
    /// Identifies a level-up option (e.g. `hp_slot`, `multiclass`).
    OptionId
);
